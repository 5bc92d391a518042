//! Rendered output is a valid PDF carrying every section

use chrono::NaiveDate;
use lopdf::{Document, Object};
use pretty_assertions::assert_eq;
use report_extract::aggregate;
use report_render::{render_report, write_report, RenderOptions};
use report_types::{Count, ExtractionRecord};

fn record(name: &str, triggered: Option<u64>, critical: Option<u64>) -> ExtractionRecord {
    let mut record = ExtractionRecord::new(name);
    record.summary.name = Some(name.to_string());
    record.summary.date_range = Some("8-Mar-2025 - 8-Apr-2025".to_string());
    record.malicious.alerts_triggered = Count::from(triggered);
    record.severity_counts.critical = Count::from(critical);
    record
}

fn options() -> RenderOptions {
    RenderOptions {
        period: Some("March to April 2025".to_string()),
        generated_on: NaiveDate::from_ymd_opt(2025, 4, 9).unwrap(),
        ..Default::default()
    }
}

fn all_text(doc: &Document) -> String {
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    doc.extract_text(&pages).unwrap()
}

fn write_logo(path: &std::path::Path) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 4, 2);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&[200u8; 4 * 2 * 3]).unwrap();
}

#[test]
fn test_render_contains_all_sections() {
    let records = vec![
        record("Branch Lisbon", Some(2), Some(4)),
        record("Branch Porto", Some(3), None),
    ];
    let table = aggregate(&records);

    let bytes = render_report(&records, &table, &options()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert!(!doc.get_pages().is_empty());

    let text = all_text(&doc);
    assert!(text.contains("Executive Summary"));
    assert!(text.contains("Unified Report - Generated: 09-Apr-2025"));
    assert!(text.contains("Comparative Summary"));
    assert!(text.contains("TOTAL"));
    assert!(text.contains("N/A"));
    assert!(text.contains("Report: Branch Lisbon"));
    assert!(text.contains("Report: Branch Porto"));
    assert!(text.contains("Malicious Detections and Preventions"));
    assert!(text.contains("Page 1"));
}

#[test]
fn test_many_reports_span_pages() {
    let records: Vec<ExtractionRecord> = (0..12)
        .map(|i| record(&format!("Site {}", i), Some(i), Some(1)))
        .collect();
    let table = aggregate(&records);

    let bytes = render_report(&records, &table, &options()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let pages = doc.get_pages().len();
    assert!(pages > 1);

    let last = doc.extract_text(&[pages as u32]).unwrap();
    assert!(last.contains(&format!("Page {}", pages)));
}

#[test]
fn test_logo_is_embedded_as_image() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("logo.png");
    write_logo(&logo);

    let records = vec![record("Branch Lisbon", Some(1), Some(1))];
    let table = aggregate(&records);
    let options = RenderOptions {
        logo: Some(logo),
        ..options()
    };

    let bytes = render_report(&records, &table, &options).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    let images = doc
        .objects
        .values()
        .filter_map(|o| match o {
            Object::Stream(stream) => Some(stream),
            _ => None,
        })
        .filter(|s| {
            s.dict
                .get(b"Subtype")
                .and_then(|v| v.as_name())
                .map(|n| n == b"Image")
                .unwrap_or(false)
        })
        .count();
    assert_eq!(images, 1);
}

#[test]
fn test_missing_logo_falls_back_to_placeholder() {
    let records = vec![record("Branch Lisbon", Some(1), None)];
    let table = aggregate(&records);
    let options = RenderOptions {
        logo: Some("/nonexistent/logo.png".into()),
        ..options()
    };

    let bytes = render_report(&records, &table, &options).unwrap();
    assert!(Document::load_mem(&bytes).is_ok());
}

#[test]
fn test_non_latin1_names_are_replaced() {
    let records = vec![record("S\u{101}o Paulo", Some(1), None)];
    let table = aggregate(&records);

    let bytes = render_report(&records, &table, &options()).unwrap();
    let text = all_text(&Document::load_mem(&bytes).unwrap());
    assert!(text.contains("S?o Paulo"));
}

#[test]
fn test_write_report_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("unified_report_March_2025.pdf");

    let records = vec![record("Branch Lisbon", None, None)];
    let table = aggregate(&records);
    write_report(&path, &records, &table, &options()).unwrap();

    let doc = Document::load(&path).unwrap();
    assert!(!doc.get_pages().is_empty());
}
