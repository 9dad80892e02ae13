//! `campus-output` — CSV writers for simulation output.
//!
//! | File                  | Written from                        |
//! |-----------------------|-------------------------------------|
//! | `agent_snapshots.csv` | `SimObserver::on_snapshot`          |
//! | `tick_summaries.csv`  | `SimObserver::on_tick_end`          |
//! | `unreachable.csv`     | `SimObserver::on_unreachable`       |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `campus_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use campus_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow, UnreachableRow};
pub use writer::OutputWriter;
