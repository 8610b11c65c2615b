/*!
 * Integration test for clipboard delivery
 */

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::process::Command;

use tempfile::tempdir;

#[test]
#[ignore] // Requires a running tmux session; run manually with:
          // cargo test --test clipboard_integration -- --ignored
fn test_clip_flag_matches_written_report() {
    // Skip if not in a tmux session
    if env::var("TMUX").is_err() {
        return;
    }

    let temp_dir = tempdir().unwrap();
    let test_file = temp_dir.path().join("test.txt");
    let output_file = temp_dir.path().join("report.txt");

    let mut file = File::create(&test_file).unwrap();
    writeln!(file, "Test content for clipboard integration").unwrap();

    // Build first so cargo run does not interleave build output
    assert!(Command::new("cargo")
        .args(["build"])
        .status()
        .unwrap()
        .success());

    // Ask for both outputs at once
    let status = Command::new("cargo")
        .args([
            "run",
            "--",
            "--clip",
            "--output-file",
            &output_file.to_string_lossy(),
            &temp_dir.path().to_string_lossy(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    assert!(output_file.exists());

    let written_report = fs::read_to_string(&output_file).unwrap();

    let clipboard_output = Command::new("tmux").args(["show-buffer"]).output().unwrap();
    let clipboard_content = String::from_utf8_lossy(&clipboard_output.stdout);

    assert_eq!(written_report, clipboard_content);
}
