//! # Schedule Extraction Tests
//!
//! Directory-level behavior of schedule extraction: which files are read,
//! and which failures abort the run.
//!
//! ## Running the Tests
//!
//! ```bash
//! cargo test --test extract_test
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

use photos2folders::schedule::{list_schedule_documents, read_pages};
use photos2folders::{extract_sessions, AppointmentTableParser, Error, ScheduleParser, Session};

/// Write a PDF with one page per entry of `pages`, each line of text placed
/// below the previous one in a standard Courier font
fn write_schedule_pdf(path: &Path, pages: &[&[&str]]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("Td", vec![40.into(), 800.into()]),
        ];
        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

const MONDAY: &[&str] = &[
    "Paevakava ( Monday 01.04.2024 )",
    "Kell Pikkus Patsient Isikukood",
    "09:00 30 min John Smith 38011200123",
    "09:00 John Smith 1",
    "10:00 45 min Mari Tamm 49001010000",
];

const TUESDAY: &[&str] = &[
    "Paevakava ( Tuesday 02.04.2024 )",
    "Kell Pikkus Patsient Isikukood",
    "11:00 15 min Ann Lee 47002020000",
];

const NOTES: &[&str] = &["Monthly notes", "nothing to see"];

#[test]
fn test_sessions_extracted_from_multi_page_pdf() {
    let guard = tempfile::tempdir().unwrap();
    let pdf = guard.path().join("week.pdf");
    write_schedule_pdf(&pdf, &[MONDAY, TUESDAY]);

    let pages = read_pages(&pdf).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("( Monday 01.04.2024 )"));
    assert!(pages[1].contains("Ann Lee"));

    let sessions = extract_sessions(guard.path(), &AppointmentTableParser::new()).unwrap();

    assert_eq!(
        sessions,
        vec![
            Session::new(at(1, 9, 0), 30, "John Smith", "38011200123"),
            Session::new(at(1, 10, 0), 45, "Mari Tamm", "49001010000"),
            Session::new(at(2, 11, 0), 15, "Ann Lee", "47002020000"),
        ]
    );
    assert_eq!(sessions[0].end(), at(1, 9, 30));
}

#[test]
fn test_sessions_gathered_across_documents() {
    let guard = tempfile::tempdir().unwrap();
    write_schedule_pdf(&guard.path().join("a_monday.pdf"), &[MONDAY]);
    write_schedule_pdf(
        &guard.path().join("b_tuesday.PDF"),
        &[NOTES, TUESDAY],
    );

    let sessions = extract_sessions(guard.path(), &AppointmentTableParser::new()).unwrap();

    let ids: Vec<&str> = sessions.iter().map(|s| s.client_id.as_str()).collect();
    assert_eq!(ids, vec!["38011200123", "49001010000", "47002020000"]);
}

#[test]
fn test_empty_schedule_directory_yields_no_sessions() {
    let guard = tempfile::tempdir().unwrap();
    let sessions = extract_sessions(guard.path(), &AppointmentTableParser::new()).unwrap();
    assert!(sessions.is_empty());
}

#[test]
fn test_non_pdf_files_are_ignored() {
    let guard = tempfile::tempdir().unwrap();
    std::fs::write(guard.path().join("readme.txt"), b"( Monday 01.04.2024 )").unwrap();
    std::fs::write(guard.path().join("schedule.pdf.bak"), b"garbage").unwrap();
    std::fs::create_dir(guard.path().join("archive.pdf")).unwrap();

    assert!(list_schedule_documents(guard.path()).unwrap().is_empty());
    let sessions = extract_sessions(guard.path(), &AppointmentTableParser::new()).unwrap();
    assert!(sessions.is_empty());
}

#[test]
fn test_documents_listed_in_name_order_any_case() {
    let guard = tempfile::tempdir().unwrap();
    std::fs::write(guard.path().join("b_week.PDF"), b"").unwrap();
    std::fs::write(guard.path().join("a_week.pdf"), b"").unwrap();

    let names: Vec<String> = list_schedule_documents(guard.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_week.pdf", "b_week.PDF"]);
}

#[test]
fn test_missing_schedule_directory_is_fatal() {
    let guard = tempfile::tempdir().unwrap();
    let err = extract_sessions(&guard.path().join("schedule"), &AppointmentTableParser::new())
        .unwrap_err();
    assert!(matches!(err, Error::MissingDirectory(_)));
}

#[test]
fn test_corrupt_document_is_fatal() {
    let guard = tempfile::tempdir().unwrap();
    std::fs::write(guard.path().join("broken.pdf"), b"this is not a pdf").unwrap();

    let err = extract_sessions(guard.path(), &AppointmentTableParser::new()).unwrap_err();
    match err {
        Error::DocumentOpen(path, _) => assert!(path.ends_with("broken.pdf")),
        other => panic!("unexpected error: {}", other),
    }
}

/// Parser for a CSV-like layout, to exercise the parser seam
struct SemicolonParser;

impl ScheduleParser for SemicolonParser {
    fn parse_page(&self, page_text: &str) -> Vec<Session> {
        page_text
            .lines()
            .filter_map(|line| {
                let mut parts = line.split(';');
                let start = chrono::NaiveDateTime::parse_from_str(
                    parts.next()?,
                    "%Y-%m-%d %H:%M",
                )
                .ok()?;
                let minutes = parts.next()?.parse().ok()?;
                Some(Session::new(start, minutes, parts.next()?, parts.next()?))
            })
            .collect()
    }
}

#[test]
fn test_alternate_parser_plugs_in() {
    let parser: &dyn ScheduleParser = &SemicolonParser;
    let sessions = parser.parse_page("2024-04-01 09:00;30;John Smith;38011200123\nnoise");

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].client_id, "38011200123");
    assert_eq!(
        sessions[0].end(),
        chrono::NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    );
}
