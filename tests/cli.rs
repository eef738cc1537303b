//! End-to-end tests running the built binary against temporary content
//! directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Content root plus scratch space for output and temp files.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write(
        &content,
        "010-Villa-Ikoyi/project.toml",
        "category = \"Residential\"\nlocation = \"Lagos\"\n",
    );
    write(&content, "010-Villa-Ikoyi/001-facade.jpg", "jpg");
    write(&content, "010-Villa-Ikoyi/002-atrium.jpg", "jpg");
    write(&content, "010-Villa-Ikoyi/003-terrace.jpg", "jpg");
    write(&content, "020-Harbour-Tower/001-elevation.png", "png");
    fs::create_dir_all(content.join("030-Empty-Lot")).unwrap();
    tmp
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio-lightbox"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn scan_writes_manifest() {
    let ws = workspace();
    let out = stdout(&run(ws.path(), &["scan"]));

    assert!(out.contains("001 Villa Ikoyi (3 photos)"));
    assert!(out.contains("003 Empty Lot (no photos, inert)"));
    let manifest =
        fs::read_to_string(ws.path().join(".folio-lightbox-temp/manifest.json")).unwrap();
    assert!(manifest.contains("010-Villa-Ikoyi/002-atrium.jpg"));
}

#[test]
fn build_writes_page_and_images() {
    let ws = workspace();
    let out = stdout(&run(ws.path(), &["build"]));

    assert!(out.contains("==> Build complete"));
    let html = fs::read_to_string(ws.path().join("dist/index.html")).unwrap();
    assert!(html.contains(r#"id="lightbox""#));
    assert!(html.contains(r#"data-name="Villa Ikoyi""#));
    assert!(
        ws.path()
            .join("dist/images/projects/020-Harbour-Tower/001-elevation.png")
            .exists()
    );
}

#[test]
fn generate_uses_custom_paths() {
    let ws = workspace();
    let content = ws.path().join("content");
    write(&content, "config.toml", "base_path = \"media\"\n");
    let args = ["--temp-dir", "tmp", "--output", "public"];

    stdout(&run(ws.path(), &[&args[..], &["scan"]].concat()));
    let out = stdout(&run(ws.path(), &[&args[..], &["generate"]].concat()));

    assert!(out.contains("Generated 1 page, 2 openable galleries, 4 photos"));
    assert!(ws.path().join("public/media/010-Villa-Ikoyi/001-facade.jpg").exists());
}

#[test]
fn check_reports_cards() {
    let ws = workspace();
    let out = stdout(&run(ws.path(), &["check"]));
    assert!(out.contains("Modal markup: ok (#lightbox)"));
    assert!(out.contains("001 Villa Ikoyi: opens 3 photos"));
    assert!(out.contains("003 Empty Lot: inert"));
    assert!(out.contains("==> Content is valid"));
}

#[test]
fn replay_prints_transcript_and_snapshot() {
    let ws = workspace();
    write(
        ws.path(),
        "walk.txt",
        "# Villa walkthrough\nopen villa-ikoyi\nprev\nclose overlay; key Escape\n",
    );
    let out = stdout(&run(
        ws.path(),
        &["replay", "walk.txt", "--snapshot", "modal.html"],
    ));

    assert!(out.contains("images/projects/010-Villa-Ikoyi/003-terrace.jpg"));
    assert!(out.contains("indicator 3"));
    assert!(out.contains("(no-op)"));
    assert!(out.contains("Final: closing, photo 3/3, scroll suspended"));
    let snapshot = fs::read_to_string(ws.path().join("modal.html")).unwrap();
    assert!(snapshot.contains("Residential — Lagos"));
}

#[test]
fn replay_script_error_names_file_and_line() {
    let ws = workspace();
    write(ws.path(), "bad.txt", "open 1\nzoom\n");
    let output = run(ws.path(), &["replay", "bad.txt"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad.txt: line 2"));
}

#[test]
fn invalid_config_fails() {
    let ws = workspace();
    write(&ws.path().join("content"), "config.toml", "theme = \"dark\"\n");
    let output = run(ws.path(), &["scan"]);
    assert!(!output.status.success());
}

#[test]
fn gen_config_prints_stock_file() {
    let ws = workspace();
    let out = stdout(&run(ws.path(), &["gen-config"]));
    assert!(out.contains("base_path"));
    assert!(out.contains("[transitions]"));
    assert!(out.contains("[modal]"));
}
