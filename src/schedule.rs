//! Schedule extraction: turns appointment tables printed in PDF schedules
//! into [`Session`] records.
//!
//! A schedule page looks like:
//!
//! ```text
//! Päevakava ( Esmaspäev 01.04.2024 )
//! ...
//! Kell   Pikkus   Patsient         Isikukood
//! 09:00  30 min   John Smith       38011200123
//! 09:30  45 min   Mari Tamm        49001010000
//! ```
//!
//! Pages without a dated first line or without the table header are not
//! schedules and are skipped, as are rows that do not fit the column shape.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info};
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::constants::{HEADER_MARKERS, SCHEDULE_EXTENSION};
use crate::error::{Error, Result};
use crate::session::Session;

/// Turns the text of one schedule page into sessions.
///
/// Implement this to support a different schedule layout without touching
/// the photo matching.
pub trait ScheduleParser {
    fn parse_page(&self, page_text: &str) -> Vec<Session>;
}

/// Parser for the daily appointment table (Kell / Pikkus / Patsient / Isikukood)
pub struct AppointmentTableParser {
    date_re: Regex,
    time_re: Regex,
    duration_re: Regex,
}

impl Default for AppointmentTableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentTableParser {
    pub fn new() -> Self {
        Self {
            date_re: Regex::new(r"\((\s*\w+\s+(\d{2}\.\d{2}\.\d{4}))\s*\)")
                .expect("Invalid date regex"),
            time_re: Regex::new(r"\b(\d{2}:\d{2})\b").expect("Invalid time regex"),
            duration_re: Regex::new(r"(\d+)\s*min").expect("Invalid duration regex"),
        }
    }

    /// Parse the page date from a header line like `( Monday 01.04.2024 )`
    pub fn parse_page_date(&self, line: &str) -> Option<NaiveDate> {
        let caps = self.date_re.captures(line)?;
        let date_str = caps.get(2)?.as_str();
        match NaiveDate::parse_from_str(date_str, "%d.%m.%Y") {
            Ok(date) => Some(date),
            Err(e) => {
                debug!("Ignoring invalid page date '{}': {}", date_str, e);
                None
            }
        }
    }

    /// Parse one table row on the given date
    ///
    /// Returns `None` for rows without a time and duration token, with an
    /// impossible clock time, or whose remaining text cannot be split into
    /// name and personal code on the last space.
    pub fn parse_row(&self, date: NaiveDate, line: &str) -> Option<Session> {
        let line = line.trim();
        let time_str = self.time_re.captures(line)?.get(1)?.as_str();
        let duration_caps = self.duration_re.captures(line)?;
        let duration_str = duration_caps.get(1)?.as_str();
        let Ok(duration_minutes) = duration_str.parse::<u32>() else {
            debug!("Duration '{} min' out of range in row: {:?}", duration_str, line);
            return None;
        };
        let duration_end = duration_caps.get(0)?.end();

        let remaining = line[duration_end..].trim();
        let (name, client_id) = remaining.rsplit_once(' ')?;
        let (name, client_id) = (name.trim(), client_id.trim());
        if name.is_empty() || client_id.is_empty() {
            return None;
        }

        let time = NaiveTime::parse_from_str(time_str, "%H:%M").ok()?;
        let start = NaiveDateTime::new(date, time);

        Some(Session::new(start, duration_minutes, name, client_id))
    }
}

fn is_table_header(line: &str) -> bool {
    HEADER_MARKERS.iter().all(|marker| line.contains(marker))
}

impl ScheduleParser for AppointmentTableParser {
    fn parse_page(&self, page_text: &str) -> Vec<Session> {
        // Text extraction may emit blank lines before the page title
        let lines: Vec<&str> = page_text
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .collect();

        let Some(first_line) = lines.first() else {
            return Vec::new();
        };

        let Some(date) = self.parse_page_date(first_line) else {
            debug!("Skipping page without schedule date: {:?}", first_line);
            return Vec::new();
        };

        let Some(header_idx) = lines.iter().position(|line| is_table_header(line)) else {
            debug!("Skipping page dated {} without appointment table", date);
            return Vec::new();
        };

        let mut sessions = Vec::new();
        for line in &lines[header_idx + 1..] {
            if line.trim().is_empty() {
                continue;
            }
            match self.parse_row(date, line) {
                Some(session) => sessions.push(session),
                None => debug!("Skipping unrecognized row: {:?}", line.trim()),
            }
        }
        sessions
    }
}

fn is_schedule_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(SCHEDULE_EXTENSION))
        .unwrap_or(false)
}

/// Extract per-page text from a PDF document
///
/// pdf-extract can panic on malformed fonts, so extraction runs under
/// `catch_unwind` and a panic is reported like any other open failure.
pub fn read_pages(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::DocumentOpen(path.to_path_buf(), e.to_string()))?;

    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    })) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(Error::DocumentOpen(path.to_path_buf(), e.to_string())),
        Err(_panic) => Err(Error::DocumentOpen(
            path.to_path_buf(),
            "PDF text extraction panicked".to_string(),
        )),
    }
}

/// List schedule documents in `dir`, sorted by file name
pub fn list_schedule_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| Error::ReadDir(dir.to_path_buf(), e))?;
    let mut documents = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::ReadDir(dir.to_path_buf(), e))?.path();
        if path.is_file() && is_schedule_document(&path) {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Extract the sessions of every schedule document in `dir`
///
/// A document that cannot be opened aborts extraction; pages and rows that
/// are not part of an appointment table are skipped.
pub fn extract_sessions(dir: &Path, parser: &dyn ScheduleParser) -> Result<Vec<Session>> {
    let mut sessions = Vec::new();

    for document in list_schedule_documents(dir)? {
        let pages = read_pages(&document)?;
        let before = sessions.len();
        for page_text in &pages {
            if page_text.trim().is_empty() {
                continue;
            }
            sessions.extend(parser.parse_page(page_text));
        }
        info!(
            "{}: {} sessions from {} pages",
            document.display(),
            sessions.len() - before,
            pages.len()
        );
    }

    Ok(sessions)
}
