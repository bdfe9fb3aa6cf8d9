//! CLI end-to-end tests
//!
//! Tests for the reelsort command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the reelsort binary
#[allow(deprecated)]
fn reelsort_cmd() -> Command {
    Command::cargo_bin("reelsort").unwrap()
}

fn write_config(dir: &Path, extra: &str) -> std::path::PathBuf {
    let config_file = dir.join("config.toml");
    let library = dir.join("library");
    fs::write(
        &config_file,
        format!(
            r#"
{extra}

[movies]
directory = "{movies}"
template = "{{title}} ({{year}})/{{title}} ({{year}}) [{{quality}}]"

[tvshows]
directory = "{tv}"
template = "{{show}}/Season {{season:02}}/{{show}} - S{{season:02}}E{{episode:02}} - {{name}}"
"#,
            movies = library.join("Movies").display(),
            tv = library.join("TV").display(),
        ),
    )
    .unwrap();
    config_file
}

fn write_release(dir: &Path, name: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), name).unwrap();
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = reelsort_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = reelsort_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reelsort"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = reelsort_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reelsort"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = reelsort_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_rename_help() {
    let mut cmd = reelsort_cmd();
    cmd.args(["rename", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--action"));
}

#[test]
fn test_cli_parse_release_name() {
    let mut cmd = reelsort_cmd();
    cmd.args(["parse", "Movie.Name.2020.1080p.BluRay.x264-GROUP.mkv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Movie Name"))
        .stdout(predicate::str::contains("Year: 2020"))
        .stdout(predicate::str::contains("Group: GROUP"))
        .stdout(predicate::str::contains("Quality: 1080p"));
}

#[test]
fn test_cli_parse_json() {
    let mut cmd = reelsort_cmd();
    let output = cmd
        .args(["parse", "--json", "Show.Name.S01E02.Pilot.720p.HDTV.x264-GRP"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["release"]["title"], "Show Name");
    assert_eq!(json["release"]["season"], 1);
    assert_eq!(json["release"]["episode"], 2);
    assert_eq!(json["metadata"]["source"], "HDTV");
}

#[test]
fn test_cli_scan_nonexistent_dir() {
    let mut cmd = reelsort_cmd();
    cmd.args(["scan", "/nonexistent/path/downloads"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_scan_lists_media() {
    let temp = tempdir().unwrap();
    let downloads = temp.path().join("downloads");
    write_release(&downloads, "Movie.Name.2020.1080p.BluRay.x264-GROUP.mkv");
    write_release(&downloads, "Movie.Name.2020.1080p.BluRay.x264-GROUP.en.srt");

    let mut cmd = reelsort_cmd();
    cmd.current_dir(temp.path())
        .args(["scan", downloads.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie Name (2020)"))
        .stdout(predicate::str::contains("2 media found, 1 subtitle(s)"));
}

#[test]
fn test_cli_rename_with_config() {
    let temp = tempdir().unwrap();
    let downloads = temp.path().join("downloads");
    write_release(&downloads, "Movie.Name.2020.1080p.BluRay.x264-GROUP.mkv");
    write_release(&downloads, "Show.Name.S01E02.Pilot.720p.HDTV.x264-GRP.mkv");
    let config_file = write_config(temp.path(), "action = \"copy\"");

    let mut cmd = reelsort_cmd();
    cmd.current_dir(temp.path())
        .args([
            "--config",
            config_file.to_str().unwrap(),
            "rename",
            downloads.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 renamed"));

    let library = temp.path().join("library");
    assert!(library
        .join("Movies/Movie Name (2020)/Movie Name (2020) [1080p].mkv")
        .exists());
    assert!(library
        .join("TV/Show Name/Season 01/Show Name - S01E02 - Pilot.mkv")
        .exists());
    assert!(downloads
        .join("Movie.Name.2020.1080p.BluRay.x264-GROUP.mkv")
        .exists());
}

#[test]
fn test_cli_rename_dry_run_shows_plan() {
    let temp = tempdir().unwrap();
    let downloads = temp.path().join("downloads");
    write_release(&downloads, "Movie.Name.2020.1080p.BluRay.x264-GROUP.mkv");
    let config_file = write_config(temp.path(), "");

    let mut cmd = reelsort_cmd();
    cmd.current_dir(temp.path())
        .args([
            "-c",
            config_file.to_str().unwrap(),
            "rename",
            "--action",
            "move",
            "--dry-run",
            downloads.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN]"))
        .stdout(predicate::str::contains("Movie Name (2020) [1080p].mkv"));

    assert!(!temp.path().join("library").exists());
    assert!(downloads
        .join("Movie.Name.2020.1080p.BluRay.x264-GROUP.mkv")
        .exists());
}

#[test]
fn test_cli_rename_in_place_keeps_files() {
    let temp = tempdir().unwrap();
    let movie_dir = temp.path().join("library/Movies/Movie Name (2020)");
    write_release(&movie_dir, "Movie Name (2020) [1080p].mkv");
    let config_file = write_config(temp.path(), "");

    for action in ["copy", "move"] {
        let mut cmd = reelsort_cmd();
        cmd.current_dir(temp.path().join("library/Movies"))
            .args([
                "-c",
                config_file.to_str().unwrap(),
                "rename",
                "--force",
                "--action",
                action,
                ".",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 renamed"));

        assert_eq!(
            fs::read_to_string(movie_dir.join("Movie Name (2020) [1080p].mkv")).unwrap(),
            "Movie Name (2020) [1080p].mkv",
            "{action}"
        );
    }
}

#[test]
fn test_cli_parse_name_without_extension() {
    let mut cmd = reelsort_cmd();
    cmd.args(["parse", "Movie.Name.2020.1080p.BluRay.x264-GROUP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group: GROUP"))
        .stdout(predicate::str::contains("Codec: x264"))
        .stdout(predicate::str::contains("Source: BluRay"));
}

#[test]
fn test_cli_parse_reports_unknown_tags() {
    let mut cmd = reelsort_cmd();
    cmd.args(["parse", "Home.Video.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Home Video"))
        .stdout(predicate::str::contains("Codec: unknown"))
        .stdout(predicate::str::contains("Quality: unknown"))
        .stdout(predicate::str::contains("Source: unknown"));
}

#[test]
fn test_cli_rename_reports_failures() {
    let temp = tempdir().unwrap();
    let downloads = temp.path().join("downloads");
    write_release(&downloads, "-GRP.mkv");
    let config_file = write_config(temp.path(), "");

    let mut cmd = reelsort_cmd();
    cmd.current_dir(temp.path())
        .args([
            "-c",
            config_file.to_str().unwrap(),
            "rename",
            downloads.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 failed"));
}

#[test]
fn test_cli_rename_invalid_action() {
    let mut cmd = reelsort_cmd();
    cmd.args(["rename", "--action", "teleport", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}

#[test]
fn test_cli_validate_with_file() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "action = \"hardlink\"\nscrape_concurrency = 2");

    let mut cmd = reelsort_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"))
        .stdout(predicate::str::contains("Action: hardlink"));
}

#[test]
fn test_cli_validate_invalid_template() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(
        &config_file,
        r#"
[movies]
directory = "/media/Movies"
template = "{show}"
"#,
    )
    .unwrap();

    let mut cmd = reelsort_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template"));
}

#[test]
fn test_cli_validate_nonexistent_config() {
    let mut cmd = reelsort_cmd();
    cmd.args(["validate", "/nonexistent/config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
