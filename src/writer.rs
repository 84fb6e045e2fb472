use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::SkipReason;
use crate::metadata::TagAssignment;

/// Overwrite the file in place without leaving a `_original` backup
const OVERWRITE_FLAG: &str = "-overwrite_original";

/// Something that can embed tag assignments into a media file
pub trait MetadataWriter {
    fn write(&mut self, media_path: &Path, assignments: &[TagAssignment]) -> Result<(), SkipReason>;
}

/// Writes metadata by running ExifTool once per file
#[derive(Debug, Clone)]
pub struct ExifToolWriter {
    program: OsString,
}

impl ExifToolWriter {
    /// Use a specific executable (a bare name is looked up on `PATH`)
    pub fn with_program(program: impl Into<OsString>) -> Self {
        ExifToolWriter {
            program: program.into(),
        }
    }

    /// Full argument list: overwrite flag, one `-TAG=value` per assignment, file path last
    pub fn build_args(media_path: &Path, assignments: &[TagAssignment]) -> Vec<OsString> {
        let mut args = Vec::with_capacity(assignments.len() + 2);
        args.push(OsString::from(OVERWRITE_FLAG));
        args.extend(assignments.iter().map(|a| OsString::from(a.to_arg())));
        args.push(media_path.as_os_str().to_os_string());
        args
    }
}

impl MetadataWriter for ExifToolWriter {
    fn write(&mut self, media_path: &Path, assignments: &[TagAssignment]) -> Result<(), SkipReason> {
        let args = Self::build_args(media_path, assignments);
        log::debug!("Running {:?} {:?}", self.program, args);

        // Output is captured so the tool's chatter never reaches the terminal
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| {
                SkipReason::ToolFailure(format!(
                    "failed to launch {}: {}",
                    self.program.to_string_lossy(),
                    e
                ))
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        log::debug!(
            "{} failed on {} ({}): {}",
            self.program.to_string_lossy(),
            media_path.display(),
            output.status,
            stderr.trim()
        );

        Err(SkipReason::ToolFailure(format!(
            "{}: {}",
            output.status,
            stderr.trim()
        )))
    }
}
