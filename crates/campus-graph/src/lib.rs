//! `campus-graph` — campus location graph, spatial index, and routing.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `CampusGraph` (CSR + R-tree), `CampusGraphBuilder`, `EdgeRef` |
//! | [`path`]   | `PathFinder` trait, `Route`, `DijkstraPathFinder`, `shortest_path` |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route`.                |

pub mod error;
pub mod graph;
pub mod path;


pub use error::{GraphError, GraphResult};
pub use graph::{CampusGraph, CampusGraphBuilder, EdgeRef};
pub use path::{DijkstraPathFinder, PathFinder, Route, shortest_path};
