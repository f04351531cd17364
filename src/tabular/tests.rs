#![allow(clippy::panic, clippy::unwrap_used)]

use std::io::Cursor;

use tempfile::TempDir;

use super::{StockRecord, load_records, read_records, save_records, write_records};
use crate::error::{LibraryError, RecordError};

/// Record shorthand
fn record(id: &str, name: &str, price: f64, quantity: i64) -> StockRecord {
    StockRecord { id: id.to_owned(), name: name.to_owned(), price, quantity }
}

#[test]
fn test_reads_well_formed_records() {
    let input = "id,name,price,quantity\nP1,Pencil,0.5,100\nP2, Notebook ,2.25,40\n";
    let report = read_records(Cursor::new(input), ',').unwrap();

    assert_eq!(
        report.records,
        [record("P1", "Pencil", 0.5, 100), record("P2", "Notebook", 2.25, 40)]
    );
    assert!(report.skipped.is_empty());
}

#[test]
fn test_skips_malformed_lines_and_reports_line_numbers() {
    let input = "\
ID;Name;Price;Quantity
P1;Pencil;0.5;100
P2;Notebook;cheap;40
P3;Eraser;1.0

P4;Ruler;1.5;ten
;Nameless;1.0;1
P5;Stapler;7.99;3
";
    let report = read_records(Cursor::new(input), ';').unwrap();

    let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["P1", "P5"]);

    let skipped: Vec<(usize, RecordError)> =
        report.skipped.into_iter().map(|s| (s.line, s.reason)).collect();
    assert_eq!(
        skipped,
        [
            (3, RecordError::InvalidNumber { field: "price", value: "cheap".into() }),
            (4, RecordError::FieldCount { expected: 4, found: 3 }),
            (6, RecordError::InvalidNumber { field: "quantity", value: "ten".into() }),
            (7, RecordError::EmptyIdentifier),
        ]
    );
}

#[test]
fn test_rejects_non_finite_price() {
    let input = "id,name,price,quantity\nP1,Pencil,NaN,1\nP2,Pen,inf,1\n";
    let report = read_records(Cursor::new(input), ',').unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.skipped.len(), 2);
}

#[test]
fn test_wrong_header_is_an_error() {
    let input = "sku,title,cost\nP1,Pencil,0.5\n";
    let result = read_records(Cursor::new(input), ',');
    assert!(matches!(result, Err(LibraryError::InvalidHeader { .. })));
}

#[test]
fn test_empty_input_yields_empty_report() {
    let report = read_records(Cursor::new(""), ',').unwrap();
    assert!(report.records.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_written_records_read_back() {
    let records = vec![record("P1", "Pencil", 0.5, 100), record("P2", "Notebook", 2.25, -3)];
    let mut out = Vec::new();
    write_records(&mut out, &records, '|').unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("id|name|price|quantity\n"));
    let report = read_records(Cursor::new(text), '|').unwrap();
    assert_eq!(report.records, records);
}

#[test]
fn test_name_containing_delimiter_is_refused() {
    let mut out = Vec::new();
    let result = write_records(&mut out, &[record("P1", "Pens, blue", 1.0, 2)], ',');

    assert!(matches!(
        result,
        Err(LibraryError::UnwritableRecord {
            ref id,
            reason: RecordError::UnencodableField { field: "name" },
        }) if id == "P1"
    ));
    assert!(out.is_empty());

    // The same name is fine under a delimiter it does not contain.
    write_records(&mut out, &[record("P1", "Pens, blue", 1.0, 2)], ';').unwrap();
    let report = read_records(Cursor::new(out), ';').unwrap();
    assert_eq!(report.records, [record("P1", "Pens, blue", 1.0, 2)]);
}

#[test]
fn test_records_that_would_not_read_back_are_refused() {
    let cases = [
        (record("P|1", "Pencil", 0.5, 1), RecordError::UnencodableField { field: "id" }),
        (record("P1", "Two\nlines", 0.5, 1), RecordError::UnencodableField { field: "name" }),
        (record("P1", " Padded ", 0.5, 1), RecordError::UnencodableField { field: "name" }),
        (record("", "Nameless", 0.5, 1), RecordError::EmptyIdentifier),
        (
            record("P1", "Pencil", f64::NAN, 1),
            RecordError::InvalidNumber { field: "price", value: "NaN".into() },
        ),
    ];
    for (bad, expected) in cases {
        let mut out = Vec::new();
        let good = record("P0", "Ruler", 1.5, 3);
        match write_records(&mut out, &[good, bad], '|') {
            Err(LibraryError::UnwritableRecord { reason, .. }) => assert_eq!(reason, expected),
            other => panic!("expected UnwritableRecord, got {other:?}"),
        }
        assert!(out.is_empty());
    }
}

#[test]
fn test_file_helpers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.csv");
    let records = vec![record("P1", "Pencil", 0.5, 100)];

    save_records(&path, &records, ',').unwrap();
    assert_eq!(load_records(&path, ',').unwrap().records, records);
    assert!(matches!(
        load_records(dir.path().join("missing.csv"), ','),
        Err(LibraryError::Io { .. })
    ));
}
