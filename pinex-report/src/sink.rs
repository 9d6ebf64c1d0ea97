use std::path::PathBuf;

use tracing::{info, warn};

use crate::aggregate::SummaryRow;
use crate::csv::to_csv;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives the finished CSV bytes. How they reach storage (download,
/// filesystem, elsewhere) is the sink's business; the core's responsibility
/// ends at producing the text.
pub trait FileSink {
    fn emit(&self, filename: &str, contents: &str) -> Result<(), SinkError>;
}

/// Writes `<dir>/<filename>`, creating the directory on demand.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirSink {
    fn emit(&self, filename: &str, contents: &str) -> Result<(), SinkError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(filename), contents)?;
        Ok(())
    }
}

/// `study_data_participant_<first participant in the dataset>.csv`.
pub fn export_filename(rows: &[SummaryRow]) -> String {
    let first = rows.first().map_or(0, |row| row.participant.get());
    format!("study_data_participant_{first}.csv")
}

/// Serializes the rows once and emits them through the primary sink. A
/// configured secondary sink is best-effort: its failure is logged and
/// never surfaced.
pub fn export(
    rows: &[SummaryRow],
    primary: &dyn FileSink,
    secondary: Option<&dyn FileSink>,
) -> Result<(), SinkError> {
    let filename = export_filename(rows);
    let csv = to_csv(rows);
    primary.emit(&filename, &csv)?;
    info!(rows = rows.len(), %filename, "study data exported");
    if let Some(sink) = secondary {
        if let Err(err) = sink.emit(&filename, &csv) {
            warn!(%err, %filename, "secondary export sink failed");
        }
    }
    Ok(())
}
