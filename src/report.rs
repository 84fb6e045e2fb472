use colored::Colorize;
use std::fmt;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::SkipReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Applied,
    Skipped(SkipReason),
}

/// Result of processing one media file
///
/// `future_date` is tracked apart from `status`: a future-dated file is still written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    pub future_date: bool,
}

impl FileOutcome {
    pub fn skipped(path: PathBuf, reason: SkipReason) -> Self {
        FileOutcome {
            path,
            status: FileStatus::Skipped(reason),
            future_date: false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub applied: usize,
    pub future_dates: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

impl Report {
    pub fn record(&mut self, outcome: FileOutcome) {
        let FileOutcome {
            path,
            status,
            future_date,
        } = outcome;

        if future_date {
            self.future_dates.push(path.clone());
        }

        match status {
            FileStatus::Applied => self.applied += 1,
            FileStatus::Skipped(reason) => self.skipped.push((path, reason)),
        }
    }

    /// Print the summary to stdout, with color when attached to a terminal
    pub fn print(&self) {
        print!("{}", self.render(std::io::stdout().is_terminal()));
    }

    fn render(&self, color: bool) -> String {
        let mut out = String::new();
        out.push('\n');

        let header = format!("Metadata written to {} files.", self.applied);
        if color {
            out.push_str(&header.as_str().green().bold().to_string());
        } else {
            out.push_str(&header);
        }
        out.push('\n');

        if !self.future_dates.is_empty() {
            let header = format!(
                "Suspicious future dates found in {} files:",
                self.future_dates.len()
            );
            out.push_str(&warning(header, color));
            out.push('\n');
            for path in &self.future_dates {
                out.push_str(&format!("   - {}\n", path.display()));
            }
        }

        if !self.skipped.is_empty() {
            let header = format!("Skipped {} files due to errors:", self.skipped.len());
            out.push_str(&warning(header, color));
            out.push('\n');
            for (path, reason) in &self.skipped {
                out.push_str(&format!("   - {}: {}\n", path.display(), reason));
            }
        }

        out
    }
}

fn warning(text: String, color: bool) -> String {
    if color {
        text.as_str().yellow().bold().to_string()
    } else {
        text
    }
}

impl FromIterator<FileOutcome> for Report {
    fn from_iter<I: IntoIterator<Item = FileOutcome>>(iter: I) -> Self {
        iter.into_iter().fold(Report::default(), |mut report, outcome| {
            report.record(outcome);
            report
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
