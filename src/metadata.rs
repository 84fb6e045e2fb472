use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::error::SkipReason;
use crate::media::MediaKind;
use crate::sidecar::{SidecarField, SidecarRecord};

/// Sidecar key -> ExifTool tag for still images, in emission order
pub const IMAGE_TAGS: &[(SidecarField, &str)] = &[
    (SidecarField::DateTaken, "AllDates"),
    (SidecarField::Description, "Description"),
    (SidecarField::Latitude, "GPSLatitude"),
    (SidecarField::Longitude, "GPSLongitude"),
    (SidecarField::Rating, "Rating"),
];

/// Sidecar key -> ExifTool tag for videos, in emission order
pub const VIDEO_TAGS: &[(SidecarField, &str)] = &[
    (SidecarField::DateTaken, "CreateDate"),
    (SidecarField::Description, "Description"),
    (SidecarField::Latitude, "GPSLatitude"),
    (SidecarField::Longitude, "GPSLongitude"),
    (SidecarField::Rating, "Rating"),
];

/// Date-time shapes with an explicit UTC offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y%m%dT%H%M%S%:z",
    "%Y%m%dT%H%M%S%.f%:z",
    "%Y%m%dT%H%M%:z",
];

/// Date-time shapes without an offset; interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// Calendar dates without a time; midnight UTC
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// A single `-TAG=value` argument for the metadata writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssignment {
    pub tag: &'static str,
    pub value: String,
}

impl TagAssignment {
    pub fn to_arg(&self) -> String {
        format!("-{}={}", self.tag, self.value)
    }
}

pub fn tag_table(kind: MediaKind) -> &'static [(SidecarField, &'static str)] {
    if kind.is_video() {
        VIDEO_TAGS
    } else {
        IMAGE_TAGS
    }
}

/// Build tag assignments for a sidecar in table order
///
/// Values are passed through as-is; absent keys are omitted.
pub fn build_assignments(record: &SidecarRecord, kind: MediaKind) -> Vec<TagAssignment> {
    tag_table(kind)
        .iter()
        .filter_map(|&(field, tag)| {
            record.get(field).map(|value| TagAssignment {
                tag,
                value: value_to_string(value),
            })
        })
        .collect()
}

/// Direct string form of a JSON value: strings unquoted, everything else as JSON text
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Check `dateTaken` before any metadata is written
///
/// Returns `Ok(true)` when the date lies after `now` (a warning, not a skip).
/// Absent or empty dates pass unchecked.
pub fn validate_date_taken(record: &SidecarRecord, now: DateTime<Utc>) -> Result<bool, SkipReason> {
    let value = match record.get(SidecarField::DateTaken) {
        Some(v) => v,
        None => return Ok(false),
    };

    let s = match value {
        Value::String(s) if s.is_empty() => return Ok(false),
        Value::String(s) => s,
        other => return Err(SkipReason::InvalidDateFormat(format!("not a string: {}", other))),
    };

    let date = parse_date_taken(s)
        .ok_or_else(|| SkipReason::InvalidDateFormat(format!("unrecognized date: {}", s)))?;

    Ok(date > now)
}

/// Parse an ISO-8601 timestamp; a trailing `Z` means `+00:00`
///
/// Extended (`2023-05-04T12:30:00`) and basic (`20230504T123000`) forms are
/// accepted, with a `T`, `t` or space separator and down to hour precision.
pub fn parse_date_taken(s: &str) -> Option<DateTime<Utc>> {
    let normalized = match s.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => s.to_string(),
    };
    let normalized = expand_hour_only(&normalized.replace('t', "T"));

    // Try with offset first
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// Pad an hour-only time with zero minutes: `2023-05-04T12` -> `2023-05-04T12:00`
fn expand_hour_only(s: &str) -> String {
    let sep = match s.find(|c: char| c == 'T' || c == ' ') {
        Some(i) => i,
        None => return s.to_string(),
    };

    let bytes = s.as_bytes();
    let hour_end = sep + 3;
    let hour_only = bytes.len() >= hour_end
        && bytes[sep + 1..hour_end].iter().all(u8::is_ascii_digit)
        && matches!(bytes.get(hour_end), None | Some(b'+') | Some(b'-'));
    if !hour_only {
        return s.to_string();
    }

    // Basic-format dates take basic-format minutes
    let minutes = if s[..sep].contains('-') { ":00" } else { "00" };
    format!("{}{}{}", &s[..hour_end], minutes, &s[hour_end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(json: &str) -> SidecarRecord {
        SidecarRecord::from_json(json).unwrap()
    }

    #[test]
    fn test_image_description_and_rating() {
        let assignments =
            build_assignments(&record(r#"{"description": "hello", "rating": 5}"#), MediaKind::Image);
        let args: Vec<String> = assignments.iter().map(TagAssignment::to_arg).collect();
        assert_eq!(args, vec!["-Description=hello", "-Rating=5"]);
    }

    #[test]
    fn test_table_order_and_video_date_tag() {
        let json = r#"{"rating": 3, "longitude": -73.98, "latitude": 40.75,
                       "description": "x", "dateTaken": "2021-06-01T10:00:00Z"}"#;

        let tags: Vec<&str> = build_assignments(&record(json), MediaKind::Video)
            .iter()
            .map(|a| a.tag)
            .collect();
        assert_eq!(
            tags,
            vec!["CreateDate", "Description", "GPSLatitude", "GPSLongitude", "Rating"]
        );

        let image = build_assignments(&record(json), MediaKind::Image);
        assert_eq!(image[0].to_arg(), "-AllDates=2021-06-01T10:00:00Z");
        assert_eq!(image[2].to_arg(), "-GPSLatitude=40.75");
        assert_eq!(image[3].to_arg(), "-GPSLongitude=-73.98");
    }

    #[test]
    fn test_empty_record_has_no_assignments() {
        assert!(build_assignments(&SidecarRecord::default(), MediaKind::Image).is_empty());
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&Value::from("a b")), "a b");
        assert_eq!(value_to_string(&Value::from(48.8584)), "48.8584");
        assert_eq!(value_to_string(&Value::from(true)), "true");
    }

    #[test]
    fn test_parse_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2023, 5, 4, 12, 30, 0).unwrap();
        assert_eq!(parse_date_taken("2023-05-04T12:30:00Z"), Some(expected));
        assert_eq!(parse_date_taken("2023-05-04T12:30:00+00:00"), Some(expected));
        assert_eq!(parse_date_taken("2023-05-04T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_date_taken("2023-05-04T12:30:00.000Z"), Some(expected));
        assert_eq!(parse_date_taken("2023-05-04 12:30:00"), Some(expected));
        assert_eq!(parse_date_taken("2023-05-04T12:30"), Some(expected));
        assert_eq!(
            parse_date_taken("2023-05-04"),
            Some(Utc.with_ymd_and_hms(2023, 5, 4, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_basic_and_hour_only_shapes() {
        let expected = Utc.with_ymd_and_hms(2023, 5, 4, 12, 30, 0).unwrap();
        let on_the_hour = Utc.with_ymd_and_hms(2023, 5, 4, 12, 0, 0).unwrap();

        assert_eq!(parse_date_taken("20230504T123000Z"), Some(expected));
        assert_eq!(parse_date_taken("20230504T123000"), Some(expected));
        assert_eq!(parse_date_taken("2023-05-04t12:30:00Z"), Some(expected));
        assert_eq!(parse_date_taken("2023-05-04T12"), Some(on_the_hour));
        assert_eq!(parse_date_taken("2023-05-04T14+02:00"), Some(on_the_hour));
        assert_eq!(parse_date_taken("20230504T12"), Some(on_the_hour));
        assert_eq!(
            parse_date_taken("20230504"),
            Some(Utc.with_ymd_and_hms(2023, 5, 4, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_null_rating_is_not_assigned() {
        let assignments =
            build_assignments(&record(r#"{"description": "x", "rating": null}"#), MediaKind::Image);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].tag, "Description");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date_taken("not-a-date"), None);
        assert_eq!(parse_date_taken("2023:05:04 12:30:00"), None);
        assert_eq!(parse_date_taken("2023-13-40"), None);
    }

    #[test]
    fn test_validate_date_taken() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(validate_date_taken(&SidecarRecord::default(), now), Ok(false));
        assert_eq!(validate_date_taken(&record(r#"{"dateTaken": ""}"#), now), Ok(false));
        assert_eq!(
            validate_date_taken(&record(r#"{"dateTaken": "2020-01-01T00:00:00Z"}"#), now),
            Ok(false)
        );
        assert_eq!(
            validate_date_taken(&record(r#"{"dateTaken": "2024-01-01T01:00:00Z"}"#), now),
            Ok(true)
        );
        assert!(matches!(
            validate_date_taken(&record(r#"{"dateTaken": "not-a-date"}"#), now),
            Err(SkipReason::InvalidDateFormat(_))
        ));
        assert!(matches!(
            validate_date_taken(&record(r#"{"dateTaken": 1700000000}"#), now),
            Err(SkipReason::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_one_hour_ahead_is_future() {
        let now = Utc::now();
        let ahead = (now + Duration::hours(1)).to_rfc3339();
        let rec = record(&format!(r#"{{"dateTaken": "{}"}}"#, ahead));
        assert_eq!(validate_date_taken(&rec, now), Ok(true));
    }
}
