use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::args::validate_directory;
use crate::error::SkipReason;
use crate::media::MediaKind;
use crate::metadata::{build_assignments, validate_date_taken};
use crate::report::{FileOutcome, FileStatus, Report};
use crate::sidecar::{locate, read_sidecar};
use crate::writer::MetadataWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessorOptions {
    /// Remove the sidecar once its metadata has been written
    pub delete_sidecars: bool,
    pub show_progress: bool,
}

pub struct Processor<W: MetadataWriter> {
    writer: W,
    options: ProcessorOptions,
}

impl<W: MetadataWriter> Processor<W> {
    pub fn new(writer: W, options: ProcessorOptions) -> Self {
        Processor { writer, options }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Apply every sidecar found under `dir` and return the aggregate report
    ///
    /// Only a missing or unreadable root is an error; per-file problems end up in the report.
    pub fn process_directory(&mut self, dir: &Path) -> Result<Report> {
        validate_directory(dir)?;

        let files = collect_files(dir)
            .with_context(|| format!("Failed to scan directory: {}", dir.display()))?;
        log::info!("Found {} media files under {}", files.len(), dir.display());

        let progress = self.progress_bar(files.len())?;
        let mut report = Report::default();

        for (path, kind) in files {
            progress.set_message(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );

            let outcome = self.process_file(path, kind);
            report.record(outcome);
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(report)
    }

    /// Run the sidecar pipeline for a single media file
    pub fn process_file(&mut self, path: PathBuf, kind: MediaKind) -> FileOutcome {
        let sidecar_path = match locate(&path) {
            Some(p) => p,
            None => return skip(path, SkipReason::NoSidecar),
        };

        let record = match read_sidecar(&sidecar_path) {
            Ok(r) => r,
            Err(reason) => return skip(path, reason),
        };

        let future_date = match validate_date_taken(&record, Utc::now()) {
            Ok(future) => future,
            Err(reason) => return skip(path, reason),
        };
        if future_date {
            log::warn!("Future dateTaken in {}", sidecar_path.display());
        }

        let assignments = build_assignments(&record, kind);

        let status = match self.writer.write(&path, &assignments) {
            Ok(()) => {
                log::info!(
                    "Applied {} tags to {}",
                    assignments.len(),
                    path.display()
                );
                if self.options.delete_sidecars {
                    // Best effort; a leftover sidecar does not change the outcome
                    let _ = fs::remove_file(&sidecar_path);
                }
                FileStatus::Applied
            }
            Err(reason) => {
                log_skip(&path, &reason);
                FileStatus::Skipped(reason)
            }
        };

        FileOutcome {
            path,
            status,
            future_date,
        }
    }

    fn progress_bar(&self, len: usize) -> Result<ProgressBar> {
        if !self.options.show_progress || len == 0 {
            return Ok(ProgressBar::hidden());
        }

        let style = ProgressStyle::with_template(
            "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
        )?;
        let bar = ProgressBar::new(len as u64);
        bar.set_style(style.progress_chars("##-"));
        Ok(bar)
    }
}

fn skip(path: PathBuf, reason: SkipReason) -> FileOutcome {
    log_skip(&path, &reason);
    FileOutcome::skipped(path, reason)
}

fn log_skip(path: &Path, reason: &SkipReason) {
    match reason.detail() {
        Some(detail) => log::debug!("Skipped {}: {} ({})", path.display(), reason, detail),
        None => log::debug!("Skipped {}: {}", path.display(), reason),
    }
}

/// Recursively collect supported media files, sorted by name within each directory
pub fn collect_files(dir: &Path) -> Result<Vec<(PathBuf, MediaKind)>> {
    let mut files = Vec::new();

    for entry_result in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // The root itself must be readable
                if err.depth() == 0 {
                    return Err(err.into());
                }
                if let Some(path) = err.path() {
                    log::warn!("Failed to access {}: {}", path.display(), err);
                } else {
                    log::warn!("WalkDir error: {}", err);
                }
                continue;
            }
        };

        // Skip directories, even ones named like media; symlinked files count
        if !entry.path().is_file() {
            continue;
        }

        if let Some(kind) = MediaKind::from_path(entry.path()) {
            files.push((entry.into_path(), kind));
        }
    }

    Ok(files)
}
