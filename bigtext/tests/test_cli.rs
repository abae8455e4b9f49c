// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const PNG_SIGNATURE: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10];

/// `bigtext` run inside `dir`, without system fonts so output does not
/// depend on the machine.
fn bigtext(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bigtext").unwrap();
    cmd.current_dir(dir).arg("--no-system-fonts");
    cmd
}

fn stdout_path(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn test_styles_lists_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    bigtext(dir.path())
        .arg("styles")
        .assert()
        .success()
        .stdout(predicate::str::contains("gothic-reverie"))
        .stdout(predicate::str::contains("Rainbow"))
        .stdout(predicate::str::contains("multi-color"));
    Ok(())
}

#[test]
fn test_render_png_into_out_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let out_dir = dir.path().join("exports");
    let output = bigtext(dir.path())
        .args(["render", "--text", "HI", "--style", "fire", "--format", "png"])
        .arg("--out-dir")
        .arg(&out_dir)
        .output()?;
    assert!(output.status.success());

    let path = stdout_path(&output);
    let name = Path::new(&path).file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("bigtext-") && name.ends_with(".png"), "{name}");
    let bytes = fs::read(&path)?;
    assert_eq!(&bytes[..8], PNG_SIGNATURE);
    Ok(())
}

#[rstest]
#[case(1, 152, 60)]
#[case(2, 304, 120)]
fn test_render_svg(
    #[case] scale: u32,
    #[case] height: u32,
    #[case] font_size: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let svg_path = dir.path().join("out.svg");
    bigtext(dir.path())
        .args(["render", "-t", "Tom & Jerry", "-s", "bold", "-f", "svg", "-b", "white"])
        .args(["--scale", &scale.to_string()])
        .arg("-o")
        .arg(&svg_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("out.svg"));

    let svg = fs::read_to_string(&svg_path)?;
    assert!(svg.contains(&format!(r#"height="{height}""#)));
    assert!(svg.contains(&format!(r#"font-size="{font_size}" font-weight="bold""#)));
    assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##));
    assert!(svg.contains(">Tom &amp; Jerry</text>"));
    Ok(())
}

#[test]
fn test_render_pdf_writes_print_document() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let output = bigtext(dir.path())
        .args(["render", "--text", "Print me", "--color", "#ff0000", "--format", "pdf"])
        .output()?;
    assert!(output.status.success());

    let path = stdout_path(&output);
    assert!(path.ends_with(".html"), "{path}");
    let doc = fs::read_to_string(dir.path().join(&path))?;
    assert!(doc.contains(".text-content"));
    assert!(doc.contains("color: #ff0000;"));
    assert!(doc.contains("Print me"));
    Ok(())
}

#[test]
fn test_render_pdf_to_nested_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let target = dir.path().join("print").join("card.html");
    bigtext(dir.path())
        .args(["render", "--text", "Nested", "--format", "pdf", "-o"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("card.html"));
    let doc = fs::read_to_string(&target)?;
    assert!(doc.contains(r#"<div class="text-content">Nested</div>"#));
    Ok(())
}

#[test]
fn test_unsupported_format_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    bigtext(dir.path())
        .args(["render", "--text", "x", "--format", "bmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported output format: bmp"));
    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_invalid_color_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    bigtext(dir.path())
        .args(["render", "--color", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color: blue"));
    Ok(())
}

#[test]
fn test_preview_css() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    bigtext(dir.path())
        .args(["preview", "--style", "gradient", "--animation", "bounce"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text:  Hello World"))
        .stdout(predicate::str::contains("class: preview-text gradient animate-bounce"))
        .stdout(predicate::str::contains("background-image: linear-gradient(90deg, #ff6b6b 0%"))
        .stdout(predicate::str::contains("color: transparent;"));
    Ok(())
}

#[test]
fn test_preferences_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let prefs = dir.path().join("prefs.json");
    let with_prefs = || {
        let mut cmd = bigtext(dir.path());
        cmd.arg("--prefs").arg(&prefs);
        cmd
    };

    with_prefs()
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    with_prefs()
        .args(["prefs", "save", "--text", "SAVED", "--style", "neon", "--size", "72"])
        .assert()
        .success();
    let raw = fs::read_to_string(&prefs)?;
    assert!(raw.contains("bigTextGenerator_preferences"));

    with_prefs()
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""style": "neon""#))
        .stdout(predicate::str::contains(r#""fontSize": 72"#));

    with_prefs()
        .args(["preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text:  SAVED"))
        .stdout(predicate::str::contains("class: preview-text neon"));

    with_prefs().args(["prefs", "reset"]).assert().success();
    with_prefs()
        .args(["preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class: preview-text bold"));
    Ok(())
}

#[test]
fn test_unknown_style_keeps_current() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    bigtext(dir.path())
        .args(["preview", "--style", "nonexistent-style"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class: preview-text bold"))
        .stderr(predicate::str::contains("Unknown style"));
    Ok(())
}
