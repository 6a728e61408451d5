mod common;

use std::fs;

use common::TestHarness;
use tempfile::TempDir;
use vcodegen_core::{scan_file, Error, Language};

#[test]
fn test_scan_file_records_language_and_timescale() {
    let harness = TestHarness::default();

    let scanned = scan_file(&harness.fixture_path("modules/fifo.sv"))
        .unwrap()
        .unwrap();
    assert_eq!(scanned.language, Language::SystemVerilog);
    assert_eq!(scanned.timescale.as_deref(), Some("1ns/1ps"));
    assert_eq!(scanned.module.name(), "fifo");

    let scanned = scan_file(&harness.fixture_path("modules/uart_tx.v"))
        .unwrap()
        .unwrap();
    assert_eq!(scanned.language, Language::Verilog);
    assert_eq!(scanned.timescale, None);
}

#[test]
fn test_scan_file_without_module() {
    let harness = TestHarness::default();
    assert!(scan_file(&harness.fixture_path("none/defs.sv"))
        .unwrap()
        .is_none());
}

#[test]
fn test_scan_file_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adder.vhd");
    fs::write(&path, "entity adder is end entity;\n").unwrap();

    let err = scan_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidSpec { .. }));
}

#[test]
fn test_scan_file_missing_file_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let err = scan_file(&dir.path().join("missing.v")).unwrap_err();
    assert!(matches!(err, Error::UnreadableSource(_)));
}

#[test]
fn test_scan_file_with_crlf_line_endings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("and2.v");
    fs::write(
        &path,
        "module and2 (\r\n    input a,\r\n    input b,\r\n    output y\r\n);\r\nendmodule\r\n",
    )
    .unwrap();

    let scanned = scan_file(&path).unwrap().unwrap();
    assert_eq!(scanned.module.ports().len(), 3);
}
