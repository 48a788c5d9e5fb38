use losplit::pipeline::{
    derive_date_code, extract_records, group_records, locate_layout, Layout, Record,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn header_line() -> String {
    report_line("Date", "Sale ID", "Amount", "Customer", "LO", "Cash Check")
}

fn report_line(date: &str, id: &str, amount: &str, name: &str, code: &str, marker: &str) -> String {
    format!("{date:<10}{id:<12}{amount:>9}  {name:<20}{code:>5}  {marker}")
}

fn sample_report() -> Vec<String> {
    vec![
        "Refund Disbursement Report".to_string(),
        "October 3, 2024".to_string(),
        header_line(),
        report_line("10/01/24", "S-100231", "$120.00", "John Example", "481", "X"),
        report_line("10/01/24", "S-100232", "$80.50", "Mary Sample", "481", "X"),
        report_line("10/02/24", "S-100233", "$220.10", "Acme Corp", "552", "X"),
        "Total                                       $420.60".to_string(),
        "Authorized Signature ______________________".to_string(),
    ]
}

// ============================================================================
// Layout Locator Tests
// ============================================================================

#[test]
fn test_locate_layout_finds_header() {
    let lines = sample_report();
    let layout = locate_layout(&lines).expect("header should be located");

    assert_eq!(layout.header_line_index, 2);
    let header = &lines[2];
    assert_eq!(&header[layout.code_column.clone()], "LO");
}

#[test]
fn test_locate_layout_requires_payment_marker() {
    // "LO" alone in body text is not a header.
    let lines = vec![
        "This report covers LO performance".to_string(),
        "for the month of October".to_string(),
    ];
    assert!(locate_layout(&lines).is_none());
}

#[test]
fn test_locate_layout_requires_whole_token() {
    // "LOAN" contains the label but is not the label.
    let lines = vec!["Customer   LOAN   Cash  Check".to_string()];
    assert!(locate_layout(&lines).is_none());
}

#[test]
fn test_locate_layout_bounded_scan_window() {
    let mut lines: Vec<String> = (0..60).map(|i| format!("filler line number {i}")).collect();
    lines.push(header_line());
    assert!(
        locate_layout(&lines).is_none(),
        "header beyond the scan window should not be found"
    );
}

#[test]
fn test_locate_layout_empty_input() {
    assert!(locate_layout(&[]).is_none());
}

// ============================================================================
// Record Extractor Tests
// ============================================================================

fn extract_from_sample(cap: usize) -> Vec<Record> {
    let lines = sample_report();
    let layout = locate_layout(&lines).unwrap();
    extract_records(&lines, &layout, cap)
}

#[test]
fn test_extract_records_recovers_all_rows() {
    let records = extract_from_sample(20);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].code, "481");
    assert_eq!(records[1].code, "481");
    assert_eq!(records[2].code, "552");
    assert!(records[0].raw_line.contains("John Example"));
}

#[test]
fn test_extract_records_stops_at_total_line() {
    let mut lines = sample_report();
    // A data row below the totals line must never be extracted.
    lines.push(report_line(
        "10/03/24", "S-100299", "$999.99", "Ghost Row", "700", "X",
    ));

    let layout = locate_layout(&lines).unwrap();
    let records = extract_records(&lines, &layout, 20);

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.code != "700"));
}

#[test]
fn test_extract_records_honors_cap() {
    let records = extract_from_sample(2);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_extract_records_skips_short_lines() {
    let mut lines = sample_report();
    lines.insert(3, "x".to_string());

    let layout = locate_layout(&lines).unwrap();
    let records = extract_records(&lines, &layout, 20);
    assert_eq!(records.len(), 3);
}

#[test]
fn test_extract_records_rejects_out_of_range_codes() {
    let lines = vec![
        header_line(),
        report_line("10/01/24", "S-1", "$1.00", "Over Range", "901", "X"),
        report_line("10/01/24", "S-2", "$1.00", "Not Digits", "4a1", "X"),
        report_line("10/01/24", "S-3", "$1.00", "Valid Row", "800", "X"),
        report_line("10/01/24", "S-4", "$1.00", "Valid Low", "000", "X"),
    ];

    let layout = locate_layout(&lines).unwrap();
    let records = extract_records(&lines, &layout, 20);

    let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["800", "000"]);
}

#[test]
fn test_extract_records_tolerates_misaligned_codes() {
    // A code shifted off the header column is still recovered as the token
    // overlapping the column span.
    let mut lines = vec![header_line()];
    let shifted = report_line("10/01/24", "S-100231", "$120.00", "John Example", "481", "X")
        .replacen(" 481", "481 ", 1);
    lines.push(shifted);

    let layout = locate_layout(&lines).unwrap();
    let records = extract_records(&lines, &layout, 20);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code, "481");
}

#[test]
fn test_extract_records_zero_rows_after_header() {
    let lines = vec![
        header_line(),
        "Total                                       $0.00".to_string(),
    ];
    let layout = locate_layout(&lines).unwrap();
    let records = extract_records(&lines, &layout, 20);
    assert!(records.is_empty());
}

#[test]
fn test_extract_records_line_shorter_than_column() {
    let layout = Layout {
        header_line_index: 0,
        code_column: 50..52,
    };
    let lines = vec![
        header_line(),
        "a line of ordinary length".to_string(),
        "another line of ordinary length here".to_string(),
    ];
    let records = extract_records(&lines, &layout, 20);
    assert!(records.is_empty());
}

// ============================================================================
// Group Aggregator Tests
// ============================================================================

#[test]
fn test_group_records_partitions_by_code() {
    let records = extract_from_sample(20);
    let groups = group_records(records);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups["481"].len(), 2);
    assert_eq!(groups["552"].len(), 1);

    let total_lines: usize = groups.values().map(Vec::len).sum();
    assert_eq!(total_lines, 3);
}

#[test]
fn test_group_records_preserves_line_order() {
    let records = vec![
        Record {
            code: "481".to_string(),
            raw_line: "first".to_string(),
        },
        Record {
            code: "552".to_string(),
            raw_line: "other".to_string(),
        },
        Record {
            code: "481".to_string(),
            raw_line: "second".to_string(),
        },
    ];

    let groups = group_records(records);
    assert_eq!(groups["481"], vec!["first", "second"]);
}

#[test]
fn test_group_records_ascending_code_order() {
    let records = vec![
        Record {
            code: "552".to_string(),
            raw_line: "b".to_string(),
        },
        Record {
            code: "007".to_string(),
            raw_line: "a".to_string(),
        },
        Record {
            code: "481".to_string(),
            raw_line: "c".to_string(),
        },
    ];

    let groups = group_records(records);
    let codes: Vec<&String> = groups.keys().collect();
    assert_eq!(codes, vec!["007", "481", "552"]);
}

#[test]
fn test_group_records_empty_input() {
    assert!(group_records(Vec::new()).is_empty());
}

// ============================================================================
// Date Code Tests
// ============================================================================

#[test]
fn test_derive_date_code_from_long_form_date() {
    assert_eq!(derive_date_code("Report dated October 3, 2024"), "100324");
    assert_eq!(derive_date_code("january 15, 2023 summary"), "011523");
    assert_eq!(derive_date_code("Due December 31, 1999"), "123199");
}

#[test]
fn test_derive_date_code_uses_first_date() {
    let text = "Issued March 5, 2024 covering April 1, 2024";
    assert_eq!(derive_date_code(text), "030524");
}

#[test]
fn test_derive_date_code_falls_back_to_today() {
    let derived = derive_date_code("no recognizable date in here");
    let today = chrono::Local::now().format("%m%d%y").to_string();
    assert_eq!(derived, today);
    assert_eq!(derived.len(), 6);
    assert!(derived.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_derive_date_code_ignores_numeric_dates() {
    // Short-form dates inside rows must not drive the file naming.
    let derived = derive_date_code("10/01/24 S-100231 $120.00");
    let today = chrono::Local::now().format("%m%d%y").to_string();
    assert_eq!(derived, today);
}
