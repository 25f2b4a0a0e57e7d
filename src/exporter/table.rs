// file: src/exporter/table.rs
// description: two-column text table of search results

use crate::error::Result;
use crate::search::SearchReport;
use crate::utils::Validator;
use std::io::Write;

const FILE_HEADER: &str = "File Name";
const PAGE_HEADER: &str = "Page Number";
const MAX_NAME_WIDTH: usize = 60;

#[derive(Debug, Clone, Default)]
pub struct TableExporter;

impl TableExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &SearchReport) -> String {
        let rows: Vec<(String, String)> = report
            .results()
            .iter()
            .map(|r| {
                (
                    Validator::truncate_text(&r.file_name, MAX_NAME_WIDTH),
                    r.page_number.to_string(),
                )
            })
            .collect();

        let name_width = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .chain(std::iter::once(FILE_HEADER.len()))
            .max()
            .unwrap_or(FILE_HEADER.len());
        let page_width = rows
            .iter()
            .map(|(_, page)| page.len())
            .chain(std::iter::once(PAGE_HEADER.len()))
            .max()
            .unwrap_or(PAGE_HEADER.len());

        let mut out = String::new();
        out.push_str(&format!(
            "{:<name_width$} | {:>page_width$}\n",
            FILE_HEADER, PAGE_HEADER
        ));
        out.push_str(&format!(
            "{}-+-{}\n",
            "-".repeat(name_width),
            "-".repeat(page_width)
        ));
        for (name, page) in rows {
            out.push_str(&format!("{:<name_width$} | {:>page_width$}\n", name, page));
        }
        out
    }

    pub fn write<W: Write>(&self, report: &SearchReport, out: &mut W) -> Result<()> {
        out.write_all(self.render(report).as_bytes())?;
        Ok(())
    }
}
