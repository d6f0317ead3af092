use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use exif::Reader;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimestampSource {
    Exif,
    FileModified,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolvedTimestamp {
    pub source: TimestampSource,
    pub instant: DateTime<Local>,
}

// Never fails the caller: metadata-read errors become a diagnostic and the
// mtime fallback applies.
pub fn resolve_timestamp(path: &Path) -> ResolvedTimestamp {
    match read_capture_time(path) {
        Ok(Some(instant)) => {
            return ResolvedTimestamp {
                source: TimestampSource::Exif,
                instant,
            }
        }
        Ok(None) => {}
        Err(err) => debug!("no usable capture time for {}: {err:#}", path.display()),
    }

    ResolvedTimestamp {
        source: TimestampSource::FileModified,
        instant: file_modified_to_local(path).unwrap_or_else(Local::now),
    }
}

// Ok(None): the container parsed but carried no usable date tag.
pub fn read_capture_time(path: &Path) -> Result<Option<DateTime<Local>>> {
    let file = File::open(path)
        .with_context(|| format!("could not open file for EXIF read: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .with_context(|| format!("could not parse EXIF data: {}", path.display()))?;

    let date = find_field_value(
        &exif,
        &["DateTimeOriginal", "DateTimeDigitized", "DateTime"],
    )
    .and_then(|raw| parse_date(&raw));

    Ok(date)
}

fn find_field_value(exif: &exif::Exif, names: &[&str]) -> Option<String> {
    exif.fields().find_map(|field| {
        let tag_name = format!("{:?}", field.tag);
        if names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&tag_name))
        {
            Some(field.display_value().with_unit(exif).to_string())
        } else {
            None
        }
    })
}

fn parse_date(input: &str) -> Option<DateTime<Local>> {
    let normalized = input.trim();

    let candidates = [
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%.f%:z",
    ];

    for fmt in candidates {
        if let Ok(dt) = DateTime::parse_from_str(normalized, fmt) {
            return Some(dt.with_timezone(&Local));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            if let Some(local) = Local.from_local_datetime(&naive).single() {
                return Some(local);
            }
        }
    }

    None
}

fn file_modified_to_local(path: &Path) -> Option<DateTime<Local>> {
    let time = fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::from(time))
}

#[cfg(test)]
mod tests {
    use super::{parse_date, read_capture_time, resolve_timestamp, TimestampSource};
    use chrono::{Datelike, Timelike};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parse_date_accepts_exif_colon_format() {
        let parsed = parse_date("2023:06:15 13:45:09").expect("exif date should parse");
        assert_eq!(
            (parsed.year(), parsed.month(), parsed.day()),
            (2023, 6, 15)
        );
        assert_eq!((parsed.hour(), parsed.minute()), (13, 45));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn read_capture_time_fails_on_non_image_bytes() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("note.jpg");
        fs::write(&path, b"this is not a jpeg").expect("write sample");

        assert!(read_capture_time(&path).is_err());
    }

    #[test]
    fn resolve_falls_back_to_mtime_for_non_image_bytes() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("note.jpg");
        fs::write(&path, b"this is not a jpeg").expect("write sample");

        let resolved = resolve_timestamp(&path);
        assert_eq!(resolved.source, TimestampSource::FileModified);
    }
}
