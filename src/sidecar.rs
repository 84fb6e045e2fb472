use serde::Deserialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SkipReason;

/// Suffixes appended to the full media filename, in order of preference
const SIDECAR_SUFFIXES: &[&str] = &[".json", ".JSON"];

/// Known keys of a photo-export sidecar. Anything else in the file is ignored.
///
/// Explicit `null` values deserialize to `None` and count as absent, so
/// `"rating": null` never becomes a `-Rating=` assignment that would clear the tag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarRecord {
    pub date_taken: Option<Value>,
    pub description: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub rating: Option<Value>,
}

/// Keys a tag table can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarField {
    DateTaken,
    Description,
    Latitude,
    Longitude,
    Rating,
}

impl SidecarRecord {
    pub fn get(&self, field: SidecarField) -> Option<&Value> {
        match field {
            SidecarField::DateTaken => self.date_taken.as_ref(),
            SidecarField::Description => self.description.as_ref(),
            SidecarField::Latitude => self.latitude.as_ref(),
            SidecarField::Longitude => self.longitude.as_ref(),
            SidecarField::Rating => self.rating.as_ref(),
        }
    }

    /// Parse sidecar JSON text. Non-object documents are rejected.
    pub fn from_json(text: &str) -> Result<Self, SkipReason> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;
        if !value.is_object() {
            return Err(SkipReason::InvalidJson("sidecar is not a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| SkipReason::InvalidJson(e.to_string()))
    }
}

/// Find the sidecar for a media file: `<name>.json`, then `<name>.JSON`
///
/// The suffix is appended to the full file name (`photo.jpg` -> `photo.jpg.json`)
/// and only the media file's own directory is considered.
pub fn locate(media_path: &Path) -> Option<PathBuf> {
    let file_name = media_path.file_name()?;

    SIDECAR_SUFFIXES
        .iter()
        .map(|suffix| {
            let mut name = OsString::from(file_name);
            name.push(suffix);
            media_path.with_file_name(name)
        })
        .find(|candidate| candidate.is_file())
}

/// Read and parse a sidecar file
pub fn read_sidecar(sidecar_path: &Path) -> Result<SidecarRecord, SkipReason> {
    let bytes = fs::read(sidecar_path).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;
    SidecarRecord::from_json(&text)
}
