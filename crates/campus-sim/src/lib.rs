//! `campus-sim` — tick driver for the campus_sim workspace.
//!
//! # Tick loop
//!
//! ```text
//! while not every agent is Done and clock < config.end_tick():
//!   ① Clock   — advance one second; observer.on_tick_start.
//!   ② Update  — Agent::step for every agent against the shared graph and
//!               its own schedule (parallel with the `parallel` feature).
//!   ③ Report  — in ascending AgentId order: fold outcomes into a
//!               TickSummary, log, forward unreachable targets to
//!               observer.on_unreachable.
//!   ④ Output  — observer.on_tick_end; every output_interval_ticks,
//!               observer.on_snapshot with every agent's AgentView.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the update phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use campus_core::SimConfig;
//! use campus_graph::DijkstraPathFinder;
//! use campus_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), graph, DijkstraPathFinder)
//!     .agents(homes)
//!     .schedules(schedules)
//!     .build()?;
//! let stats = sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use stats::{SimStats, TickSummary};
