mod common;

use common::fixtures::*;
use common::{GeneratedPdf, TestResult};
use std::path::Path;
use std::process::{Command, Output};

fn docket(args: &[&str], cwd: &Path) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_docket"))
        .args(args)
        .current_dir(cwd)
        .output()
}

fn write_json(path: &Path, value: &serde_json::Value) -> std::io::Result<()> {
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
}

#[test]
fn test_list_and_render_from_store() -> TestResult {
    let dir = tempfile::tempdir()?;
    write_json(&dir.path().join("store.json"), &serde_json::json!([payslip_json()]))?;
    write_json(&dir.path().join("alice.json"), &alice())?;

    let listed = docket(&["list", "--store", "store.json"], dir.path())?;
    assert!(listed.status.success());
    let stdout = String::from_utf8(listed.stdout)?;
    assert!(stdout.contains("payslip-1\tPayslip – SALARY"));

    let rendered = docket(
        &[
            "render", "--store", "store.json", "--template", "payslip-1", "--data", "alice.json",
            "--out-dir", "out",
        ],
        dir.path(),
    )?;
    assert!(rendered.status.success(), "{}", String::from_utf8_lossy(&rendered.stderr));

    let pdf = GeneratedPdf::from_bytes(std::fs::read(dir.path().join("out").join("Payslip.pdf"))?)?;
    assert_pdf_contains_text!(pdf, "Alice Johnson");
    Ok(())
}

#[test]
fn test_render_salary_without_data_fails() -> TestResult {
    let dir = tempfile::tempdir()?;
    write_json(&dir.path().join("store.json"), &serde_json::json!([payslip_json()]))?;

    let output = docket(
        &["render", "--store", "store.json", "--template", "payslip-1"],
        dir.path(),
    )?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MissingRecord"));
    assert!(!dir.path().join("Payslip.pdf").exists());
    Ok(())
}

#[test]
fn test_render_unknown_template_fails() -> TestResult {
    let dir = tempfile::tempdir()?;
    let output = docket(
        &["render", "--store", "missing.json", "--template", "nope"],
        dir.path(),
    )?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("TemplateNotFound"));
    Ok(())
}

#[test]
fn test_render_file_with_layout() -> TestResult {
    let dir = tempfile::tempdir()?;
    write_json(&dir.path().join("payslip.json"), &payslip_json())?;
    write_json(&dir.path().join("alice.json"), &alice())?;
    write_json(
        &dir.path().join("a5.json"),
        &serde_json::json!({ "pageWidth": 148.0, "pageHeight": 210.0 }),
    )?;

    let output = docket(
        &[
            "render-file", "--template-file", "payslip.json", "--data", "alice.json",
            "--layout", "a5.json",
        ],
        dir.path(),
    )?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8(output.stdout)?.trim().ends_with("Payslip.pdf"));

    let pdf = GeneratedPdf::from_bytes(std::fs::read(dir.path().join("Payslip.pdf"))?)?;
    let page = pdf.doc.get_dictionary(pdf.doc.get_pages()[&1])?;
    let media_box = page.get(b"MediaBox")?.as_array()?;
    assert!((media_box[2].as_float()? - 148.0 * 72.0 / 25.4).abs() < 0.01);
    Ok(())
}
