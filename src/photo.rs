use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::constants::PHOTO_EXTENSIONS;

/// EXIF tags consulted for the capture time, in order of preference
const DATETIME_TAGS: [Tag; 3] = [Tag::DateTime, Tag::DateTimeOriginal, Tag::DateTimeDigitized];

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Whether the path has one of the accepted image extensions (case-insensitive)
pub fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            PHOTO_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Parse an EXIF datetime string (`YYYY:MM:DD HH:MM:SS`)
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(value, EXIF_DATETIME_FORMAT).ok()
}

fn read_exif_datetime(path: &Path) -> Result<Option<NaiveDateTime>, exif::Error> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader)?;

    for tag in DATETIME_TAGS {
        let Some(field) = exif.get_field(tag, In::PRIMARY) else {
            continue;
        };
        if let Value::Ascii(ref values) = field.value {
            if let Some(raw) = values.first() {
                let text = String::from_utf8_lossy(raw);
                match parse_exif_datetime(&text) {
                    Some(datetime) => return Ok(Some(datetime)),
                    None => warn!("Unparseable {} '{}' in {}", tag, text, path.display()),
                }
            }
        }
    }

    Ok(None)
}

/// Read the capture timestamp embedded in a photo
///
/// Missing or unreadable metadata yields `None`; the cause is logged.
pub fn capture_time(path: &Path) -> Option<NaiveDateTime> {
    match read_exif_datetime(path) {
        Ok(datetime) => datetime,
        Err(exif::Error::NotFound(_)) => {
            debug!("No EXIF data in {}", path.display());
            None
        }
        Err(e) => {
            warn!("Error reading photo datetime from {}: {}", path.display(), e);
            None
        }
    }
}
