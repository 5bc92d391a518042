//! In-memory executive report fixtures

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// Lines of a first page following the vendor template
pub const SAMPLE_LINES: &[&str] = &[
    "Executive Report",
    "Site Name",
    "Branch Lisbon",
    "Date Range",
    "8-Mar-2025 - 8-Apr-2025",
    "Generated",
    "9-Apr-2025 10:00",
    "* Times shown in UTC",
    "Malicious Detections and Preventions",
    "12",
    "Critical and high alerts were triggered",
    "7",
    "Critical and high alerts were handled",
    "3",
    "Affected files",
    "2",
    "Remediated files",
    "5",
    "Affected endpoints",
    "Automation",
    "41",
    "Automatic investigations",
    "9",
    "Response actions",
    "Alert Count by Severity",
    "Severity #Alerts",
    "Critical 4",
    "High 9",
    "Medium 1",
    "Low 0",
    "Inventory",
    "120",
    "Active endpoints",
];

/// Single-page PDF with one text line per `BT ... ET` block
pub fn report_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let y = 760 - 20 * i as i64;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
        operations.push(Operation::new("Td", vec![40.into(), y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 1000.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Write `bytes` as `name` under `dir`
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
