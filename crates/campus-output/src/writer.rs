//! The `OutputWriter` trait implemented by every backend.

use crate::row::{AgentSnapshotRow, TickSummaryRow, UnreachableRow};
use crate::OutputResult;

/// A sink for simulation output rows.
pub trait OutputWriter {
    /// Write a batch of agent snapshot rows (one per agent).
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write the summary row for one tick.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Record a failed route lookup.
    fn write_unreachable(&mut self, row: &UnreachableRow) -> OutputResult<()>;

    /// Flush buffered data.  Called once from `on_sim_end`; calling it
    /// again must be a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
