pub mod aggregate;
pub mod csv;
pub mod sink;

pub use aggregate::{aggregate, SummaryRow};
pub use csv::{to_csv, CSV_HEADER};
pub use sink::{export, export_filename, DirSink, FileSink, SinkError};
