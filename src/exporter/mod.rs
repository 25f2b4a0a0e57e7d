// file: src/exporter/mod.rs
// description: result exporters for the supported output formats

pub mod json;
pub mod table;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::search::SearchReport;
use std::io::Write;

pub use json::{ExportedResults, JsonExporter};
pub use table::TableExporter;

pub fn write_report<W: Write>(
    report: &SearchReport,
    format: OutputFormat,
    pretty: bool,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => TableExporter::new().write(report, out),
        OutputFormat::Json => JsonExporter::new(pretty).write(report, out),
    }
}
