//! End-to-end smoke tests for the volcar binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn template_json() -> &'static str {
    r#"{
        "name": "Plantilla",
        "cells": [
            {"row": 1, "col": 1, "value": {"text": "Fecha"}},
            {"row": 1, "col": 2, "value": {"text": "Total"}},
            {"row": 2, "col": 1, "value": {"text": "{{FECHA}}"}},
            {"row": 2, "col": 2, "value": {"text": "{{TOTAL}}"}}
        ]
    }"#
}

#[test]
fn schemas_lists_embedded_erps() {
    Command::cargo_bin("volcar")
        .unwrap()
        .arg("schemas")
        .assert()
        .success()
        .stdout(predicate::str::contains("contaplus"))
        .stdout(predicate::str::contains("windows-1252"));
}

#[test]
fn markers_lists_template_keys() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("plantilla.json");
    std::fs::write(&template, template_json()).unwrap();

    Command::cargo_bin("volcar")
        .unwrap()
        .arg("markers")
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains("{{FECHA}}"))
        .stdout(predicate::str::contains("{{TOTAL}}"));
}

#[test]
fn fill_writes_mutated_grid() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("plantilla.json");
    let doc = dir.path().join("doc.json");
    let output = dir.path().join("relleno.json");
    std::fs::write(&template, template_json()).unwrap();
    std::fs::write(&doc, r#"{"fecha": "2024-01-10", "total": 150.0}"#).unwrap();

    Command::cargo_bin("volcar")
        .unwrap()
        .arg("fill")
        .arg("--template")
        .arg(&template)
        .arg("--output")
        .arg(&output)
        .arg(&doc)
        .assert()
        .success();

    let filled = std::fs::read_to_string(&output).unwrap();
    assert!(filled.contains("2024-01-10"));
    assert!(!filled.contains("{{FECHA}}"));
}

#[test]
fn export_writes_legacy_file() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("doc.json");
    let output = dir.path().join("diario.txt");
    std::fs::write(
        &doc,
        r#"{"fecha": "2024-01-10", "total": "150.00", "empresa": "Acme", "numero": "F-9"}"#,
    )
    .unwrap();

    Command::cargo_bin("volcar")
        .unwrap()
        .arg("export")
        .arg("--schema")
        .arg("contaplus")
        .arg("--output")
        .arg(&output)
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("windows-1252"));

    let bytes = std::fs::read(&output).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("00000120240110"));
    assert!(text.contains("Factura F-9 - Acme"));
}

#[test]
fn export_rejects_unknown_erp() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("doc.json");
    std::fs::write(&doc, r#"{"fecha": "2024-01-10", "total": "1"}"#).unwrap();

    Command::cargo_bin("volcar")
        .unwrap()
        .arg("export")
        .arg("--schema")
        .arg("navision")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown ERP"));
}
