// file: src/exporter/json.rs
// description: json export of search results

use crate::error::Result;
use crate::models::SearchResult;
use crate::search::{SearchReport, SearchStats, SkippedFile};
use chrono::Utc;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct ExportedResults {
    pub generated_at: String,
    pub phrase: String,
    pub total_matches: usize,
    pub results: Vec<SearchResult>,
    pub skipped: Vec<SkippedFile>,
    pub stats: SearchStats,
}

impl ExportedResults {
    pub fn from_report(report: &SearchReport) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            phrase: report.phrase.clone(),
            total_matches: report.matches.len(),
            results: report.results(),
            skipped: report.skipped.clone(),
            stats: report.stats.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn write<W: Write>(&self, report: &SearchReport, out: &mut W) -> Result<()> {
        let exported = ExportedResults::from_report(report);
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &exported)?;
        } else {
            serde_json::to_writer(&mut *out, &exported)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
