/*!
 * Report assembly and run summary for ctxdump
 *
 * `ReportAssembler` produces the deliverable itself: one deterministic
 * plain-text report. `Reporter` prints the console summary shown after the
 * report has been delivered, using the tabled library for table rendering.
 */

use std::fs;
use std::io;
use std::path::Path;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::reader::FileEntry;
use crate::utils::TokenStats;

/// Delimiter line around each file's content section
const SECTION_RULE: &str = "----------------------------------------";

/// Assembles the final report text
pub struct ReportAssembler {
    project_name: String,
}

impl ReportAssembler {
    /// Create an assembler for a project
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
        }
    }

    /// Build the report: header, tree text, then one section per file in
    /// visitation order.
    ///
    /// The output contains no timestamps or host data, so identical inputs
    /// produce byte-identical reports.
    pub fn format(&self, directory_tree: &str, file_contents: &[FileEntry]) -> String {
        let mut report = vec![
            "Directory Structure:".to_string(),
            self.project_name.clone(),
            directory_tree.to_string(),
            "\nFile Contents:".to_string(),
        ];

        for entry in file_contents {
            report.push(format!("\nFile: {}", entry.rel_path.display()));
            report.push(SECTION_RULE.to_string());
            report.push(entry.content.render());
            report.push(SECTION_RULE.to_string());
        }

        report.join("\n")
    }

    /// Write a report to a file
    pub fn write_to_file(&self, report: &str, output_file: &Path) -> io::Result<()> {
        fs::write(output_file, report)
    }
}

/// Statistics shown after a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Where the report went ("clipboard" or a file path)
    pub destination: String,
    /// Directories visited, the root included
    pub directory_count: usize,
    /// Files included in the report
    pub file_count: usize,
    /// Total characters of text content
    pub total_chars: usize,
    /// Token statistics, absent when the tokenizer is unavailable
    pub tokens: Option<TokenStats>,
}

/// Console reporter for run summaries
pub struct Reporter;

impl Reporter {
    /// Create a reporter
    pub fn new() -> Self {
        Self
    }

    /// Print the summary to stdout
    pub fn print_summary(&self, summary: &RunSummary) {
        println!("\n{}", self.generate_summary(summary));
    }

    /// Render the summary tables
    pub fn generate_summary(&self, summary: &RunSummary) -> String {
        let mut sections = vec![self.create_summary_table(summary)];

        if let Some(tokens) = &summary.tokens {
            if !tokens.by_extension.is_empty() {
                sections.push("Token distribution by extension".to_string());
                sections.push(self.create_extension_table(tokens));
            }
        }

        sections.join("\n\n")
    }

    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    fn create_summary_table(&self, summary: &RunSummary) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let token_text = match &summary.tokens {
            Some(tokens) => format!("{} tokens (counted)", self.format_number(tokens.total)),
            None => format!(
                "{} tokens (estimated)",
                self.format_number(summary.total_chars / 4)
            ),
        };

        let rows = vec![
            SummaryRow {
                key: "Report sent to".to_string(),
                value: summary.destination.clone(),
            },
            SummaryRow {
                key: "Directories".to_string(),
                value: self.format_number(summary.directory_count),
            },
            SummaryRow {
                key: "Files".to_string(),
                value: self.format_number(summary.file_count),
            },
            SummaryRow {
                key: "Characters".to_string(),
                value: self.format_number(summary.total_chars),
            },
            SummaryRow {
                key: "LLM Tokens".to_string(),
                value: token_text,
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_extension_table(&self, tokens: &TokenStats) -> String {
        #[derive(Tabled)]
        struct ExtensionRow {
            #[tabled(rename = "Extension")]
            extension: String,

            #[tabled(rename = "Tokens")]
            tokens: String,

            #[tabled(rename = "Share")]
            share: String,
        }

        let total = tokens.total.max(1);
        let rows: Vec<ExtensionRow> = tokens
            .by_extension
            .iter()
            .map(|(extension, count)| ExtensionRow {
                extension: extension.clone(),
                tokens: self.format_number(*count),
                share: format!("{:.1}%", (*count as f64 / total as f64) * 100.0),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
