//! Integration tests for bracketry-cli.
//!
//! Tests run the built binary against bracket files in temporary
//! directories: generation, validation, candidate listing, round layout, and
//! the edit commands.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to get the path to the `bracketry` binary built by cargo.
fn bracketry_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bracketry"))
}

fn run(args: &[&str]) -> Output {
    bracketry_bin()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run bracketry")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

/// Generate a bracket into `dir` and return its path.
fn generate(dir: &TempDir, file: &str, extra: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(file);
    let mut args = vec!["generate"];
    args.extend_from_slice(extra);
    args.extend_from_slice(&["--output", path_str(&path)]);
    let output = run(&args);
    assert!(output.status.success(), "generate failed: {}", stderr(&output));
    path
}

const BROKEN: &str = r#"
name = "Broken"

[[matches]]
id = "A"
display_number = 1
winner_next_match_id = "B"

[[matches]]
id = "B"
display_number = 2
winner_next_match_id = "A"
"#;

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_prints_toml() {
    let output = run(&["generate", "4"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("[[matches]]"));
    assert!(text.contains("id = \"W2-1\""));
    assert!(text.contains("type = \"single_elimination\""));
}

#[test]
fn cli_generate_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "cup.toml", &["8"]);

    let output = run(&["generate", "8", "--output", path_str(&path)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));

    let output = run(&["generate", "8", "--force", "--output", path_str(&path)]);
    assert!(output.status.success());
}

#[test]
fn cli_generate_rejects_single_entrant() {
    let output = run(&["generate", "1"]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn cli_validate_accepts_generated() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "double.json", &["12", "--format", "double"]);

    let output = run(&["validate", path_str(&path)]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("is valid"));
}

#[test]
fn cli_validate_reports_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, BROKEN).unwrap();

    let output = run(&["validate", path_str(&path)]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("cycle detected"));
    assert!(stderr(&output).contains("'Broken' is invalid"));

    let output = run(&["validate", "--json", path_str(&path)]);
    let messages: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(messages.iter().any(|m| m.contains("cycle")));
}

#[test]
fn cli_missing_bracket() {
    let output = run(&["validate", "no_such_bracket_24680"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not found"));
}

// ---------------------------------------------------------------------------
// candidates / rounds
// ---------------------------------------------------------------------------

#[test]
fn cli_candidates_lists_losers_targets() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "eight.toml", &["8", "--format", "double"]);

    let output = run(&["candidates", path_str(&path), "W2-1", "--kind", "loser"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("L2-1"));
    assert!(!text.contains("W3-1"));
}

#[test]
fn cli_candidates_unknown_source() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "four.toml", &["4"]);

    let output = run(&["candidates", path_str(&path), "nope"]);
    assert!(!output.status.success());
}

#[test]
fn cli_rounds_json_matrix() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "sixteen.toml", &["16"]);

    let output = run(&["rounds", "--json", path_str(&path)]);
    assert!(output.status.success(), "{}", stderr(&output));
    let rounds: Vec<Vec<Option<String>>> = serde_json::from_str(&stdout(&output)).unwrap();
    let widths: Vec<usize> = rounds.iter().map(Vec::len).collect();
    assert_eq!(widths, vec![8, 4, 2, 1]);
    assert_eq!(rounds[3], vec![Some("W4-1".to_string())]);
}

#[test]
fn cli_rounds_text_shows_labels_and_byes() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "five.toml", &["5"]);

    let output = run(&["rounds", path_str(&path)]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Quarterfinals"));
    assert!(text.contains("Semifinals"));
    assert!(text.contains("Final"));
    assert!(text.contains("(empty)"));
}

#[test]
fn cli_rounds_losers_view() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "eight.json", &["8", "-f", "double"]);

    let output = run(&["rounds", "--losers", path_str(&path)]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Losers Round 1"));
    assert!(text.contains("L4-1"));
}

// ---------------------------------------------------------------------------
// link / remove
// ---------------------------------------------------------------------------

#[test]
fn cli_link_rejects_cycle_and_keeps_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "four.toml", &["4"]);
    let before = std::fs::read_to_string(&path).unwrap();

    let output = run(&["link", path_str(&path), "W2-1", "winner", "W1-1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot link W2-1 winner"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn cli_remove_then_link() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "four.json", &["4"]);

    let output = run(&["remove", path_str(&path), "W1-2"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Removed #2 W1-2"));

    let output = run(&["validate", path_str(&path)]);
    assert!(output.status.success(), "{}", stdout(&output));

    // Clearing and restoring W1-1's edge goes through the edit pipeline.
    let output = run(&["link", path_str(&path), "W1-1", "winner"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let output = run(&["link", path_str(&path), "W1-1", "winner", "W2-1"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("W1-1 winner -> W2-1"));
}

#[test]
fn cli_link_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate(&temp_dir, "four.toml", &["4"]);
    let before = std::fs::read_to_string(&path).unwrap();

    let output = run(&["link", "--dry-run", path_str(&path), "W1-1", "winner"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("dry run"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn cli_list_directory() {
    let temp_dir = TempDir::new().unwrap();
    generate(&temp_dir, "alpha.toml", &["6", "--name", "Alpha"]);
    generate(&temp_dir, "beta.json", &["3", "-f", "double"]);
    std::fs::write(temp_dir.path().join("broken.toml"), "not = [toml").unwrap();

    let output = run(&["list", "--dir", path_str(temp_dir.path())]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("alpha"));
    assert!(text.contains("beta"));
    assert!(text.contains("double elimination"));
    assert!(text.contains("(error loading)"));
}

#[test]
fn cli_list_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["list", "--dir", path_str(temp_dir.path())]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("(none)"));
}
