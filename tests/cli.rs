//! E2E tests for the gstinv command line

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn gstinv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gstinv"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Mixed taxable and GST-free lines for a registered business
#[test]
fn totals_registered_business() {
    let output = gstinv(&["totals", "-i", "tests/data/registered.json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("TAX INVOICE INV-202610-000042"));
    assert!(stdout.contains("$260.00"));
    assert!(stdout.contains("$20.00"));
    assert!(stdout.contains("$280.00"));
}

#[test]
fn totals_json_output() {
    let output = gstinv(&["totals", "-i", "tests/data/registered.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["subtotal"], "260.00");
    assert_eq!(json["gst_amount"], "20.00");
    assert_eq!(json["total"], "280.00");
    assert_eq!(json["is_tax_invoice"], true);
}

/// CSV rows are appended after the JSON items
#[test]
fn totals_with_csv_items() {
    let output = gstinv(&[
        "totals",
        "-i",
        "tests/data/registered.json",
        "--items",
        "tests/data/extra_items.csv",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["subtotal"], "400.00");
    assert_eq!(json["gst_amount"], "34.00");
    assert_eq!(json["total"], "434.00");
}

#[test]
fn totals_unregistered_business_is_not_tax_invoice() {
    let output = gstinv(&["totals", "-i", "tests/data/unregistered.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["gst_amount"], "0.00");
    assert_eq!(json["total"], "500.00");
    assert_eq!(json["is_tax_invoice"], false);
}

#[test]
fn gst_registered_flag_overrides_input() {
    let output = gstinv(&[
        "totals",
        "-i",
        "tests/data/registered.json",
        "--gst-registered",
        "false",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["gst_amount"], "0.00");
    assert_eq!(json["total"], "260.00");
}

#[test]
fn reads_invoice_from_stdin() {
    let input = std::fs::read("tests/data/registered.json").unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_gstinv"))
        .args(["totals", "-i", "-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");
    child.stdin.take().unwrap().write_all(&input).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], "280.00");
}

#[test]
fn validate_valid_invoice() {
    let output = gstinv(&["validate", "-i", "tests/data/registered.json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("No issues found"));
}

#[test]
fn validate_invalid_invoice_lists_errors_in_order() {
    let output = gstinv(&["validate", "-i", "tests/data/invalid.json"]);
    let stdout = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("3 issue(s) found"));

    let quantity = stdout.find("Item 1: Quantity must be greater than 0").unwrap();
    let abn = stdout.find("Valid ABN is required (11 digits)").unwrap();
    let client = stdout.find("Client name is required").unwrap();
    assert!(quantity < abn && abn < client);
}

#[test]
fn validate_json_output() {
    let output = gstinv(&["validate", "-i", "tests/data/invalid.json", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["is_valid"], false);
    assert_eq!(json["error_count"], 3);
    assert_eq!(json["errors"][0], "Item 1: Quantity must be greater than 0");
}

#[test]
fn preview_registered_business() {
    let output = gstinv(&["preview", "-i", "tests/data/registered.json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("TAX INVOICE"));
    assert!(stdout.contains("Safety inspection (GST-Free)"));
    assert!(stdout.contains("GST (10%):"));
    assert!(stdout.contains("Payment Details:"));
    assert!(stdout.contains("This invoice includes GST where applicable."));
    assert!(!stdout.contains("Please correct the following errors"));
}

#[test]
fn preview_unregistered_business_hides_gst() {
    let output = gstinv(&["preview", "-i", "tests/data/unregistered.json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("INVOICE"));
    assert!(!stdout.contains("GST (10%):"));
    assert!(!stdout.contains("This invoice includes GST where applicable."));
}

#[test]
fn preview_shows_validation_problems_first() {
    let output = gstinv(&["preview", "-i", "tests/data/invalid.json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("Please correct the following errors:"));
    assert!(stdout.contains("  - Client name is required"));
}

#[test]
fn preview_csv_line_items() {
    let output = gstinv(&["preview", "-i", "tests/data/registered.json", "--csv"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("description,quantity,unit_price,gst,total")
    );
    assert_eq!(lines.next(), Some("Labour,2,$100.00,$20.00,$220.00"));
    assert_eq!(
        lines.next(),
        Some("Safety inspection (GST-Free),1,$60.00,$0.00,$60.00")
    );
}

#[test]
fn export_writes_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.html");
    let output = gstinv(&[
        "export",
        "-i",
        "tests/data/registered.json",
        "-o",
        path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("TAX INVOICE"));
    assert!(html.contains("INV-202610-000042"));
    assert!(html.contains("$280.00"));
}

#[test]
fn export_refuses_invalid_invoice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.html");
    let output = gstinv(&[
        "export",
        "-i",
        "tests/data/invalid.json",
        "-o",
        path.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(!path.exists());
}

#[test]
fn schema_csv_header() {
    let output = gstinv(&["schema", "csv-header"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout(&output).trim(),
        "description,quantity,unit_price,gst_included,is_gst_free"
    );
}

#[test]
fn schema_json_describes_invoice_input() {
    let output = gstinv(&["schema"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "InvoiceInput");
    assert!(json["properties"]["business"].is_object());
    assert!(json["properties"]["items"].is_object());
    assert!(json["properties"]["number"].is_object());

    let state = json["definitions"]["Address"]["properties"]["state"]["description"]
        .as_str()
        .unwrap();
    assert!(state.contains("NSW") && state.contains("NT"), "{state}");
}

#[test]
fn number_for_given_date() {
    let output = gstinv(&["number", "--date", "2026-03-09"]);
    let stdout = stdout(&output);
    let number = stdout.trim();

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(number.starts_with("INV-202603-"), "{number}");
    assert_eq!(number.len(), "INV-202603-000000".len());
}

#[test]
fn validate_reports_blank_invoice_number() {
    let output = gstinv(&["validate", "-i", "tests/data/blank_number.json"]);
    let stdout = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("1 issue(s) found"));
    assert!(stdout.contains("Invoice number is required"));
}

#[test]
fn missing_invoice_number_is_suggested() {
    let output = gstinv(&["totals", "-i", "tests/data/unnumbered.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let number = json["number"].as_str().unwrap();
    assert!(number.starts_with("INV-"), "{number}");
}

/// Line amounts beyond the decimal range are reported, not a crash
#[test]
fn oversized_line_amount_is_a_validation_error() {
    let output = gstinv(&["validate", "-i", "tests/data/oversized.json", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["errors"][0], "Item 1: Amount is too large");
    assert_eq!(json["error_count"], 1);

    let output = gstinv(&["totals", "-i", "tests/data/oversized.json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.html");
    let output = gstinv(&[
        "export",
        "-i",
        "tests/data/oversized.json",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!path.exists());
}
