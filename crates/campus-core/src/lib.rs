//! `campus-core` — foundational types for the `campus_sim` workspace.
//!
//! Every other `campus-*` crate depends on this one.  It has no `campus-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `LocationId`, `EdgeId`, `SegmentId`            |
//! | [`geo`]     | `MapPoint`, normalized map coordinates and interpolation  |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`, `UnreachablePolicy`      |
//! | [`rng`]     | `AgentRng` — per-agent deterministic RNG                  |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{MapPoint, smoothstep};
pub use ids::{AgentId, EdgeId, LocationId, SegmentId};
pub use rng::AgentRng;
pub use time::{DAY_SECS, SimClock, SimConfig, Tick, UnreachablePolicy};
