//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv` — `agent_id,tick,x,y,state,schedule_cursor`
//! - `tick_summaries.csv`  — `tick,clock,departed,arrived,completed,unreachable,done_agents`
//! - `unreachable.csv`     — `agent_id,tick,target`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{AgentSnapshotRow, TickSummaryRow, UnreachableRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

pub const SNAPSHOT_HEADER: [&str; 6] = ["agent_id", "tick", "x", "y", "state", "schedule_cursor"];
pub const SUMMARY_HEADER: [&str; 7] =
    ["tick", "clock", "departed", "arrived", "completed", "unreachable", "done_agents"];
pub const UNREACHABLE_HEADER: [&str; 3] = ["agent_id", "tick", "target"];

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    snapshots:   Writer<File>,
    summaries:   Writer<File>,
    unreachable: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the output files, and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut unreachable = Writer::from_path(dir.join("unreachable.csv"))?;
        unreachable.write_record(UNREACHABLE_HEADER)?;

        Ok(Self { snapshots, summaries, unreachable, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                row.state.to_owned(),
                row.schedule_cursor.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.clock.to_string(),
            row.departed.to_string(),
            row.arrived.to_string(),
            row.completed.to_string(),
            row.unreachable.to_string(),
            row.done_agents.to_string(),
        ])?;
        Ok(())
    }

    fn write_unreachable(&mut self, row: &UnreachableRow) -> OutputResult<()> {
        self.unreachable.write_record(&[
            row.agent_id.to_string(),
            row.tick.to_string(),
            row.target.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.unreachable.flush()?;
        Ok(())
    }
}
