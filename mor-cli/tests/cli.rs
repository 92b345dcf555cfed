use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("mor-parser")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture to exist")
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write temp file");
    path
}

#[test]
fn dict_check_accepts_valid_files() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.arg("dict").arg("check").arg(fixture_path("nouns.cut"));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("No error is detected!"));
}

#[test]
fn dict_check_reports_each_bad_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let good = write(dir.path(), "good.cut", "cat\t{[scat n]}\n");
    let bad = write(dir.path(), "bad.cut", "cat\t{[scat n]}\ndog\t{[scat n]\n");

    let mut cmd = cargo_bin_cmd!("mor");
    cmd.arg("dict").arg("check").arg(&bad).arg(&good);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("bad.cut:2:"))
        .stderr(predicate::str::contains("No error is detected!").not());
}

#[test]
fn dict_check_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.arg("dict").arg("check").write_stdin("cat\t{[scat n]} =animal=\n");

    cmd.assert().success();
}

#[test]
fn dict_lint_rewrites_in_place() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(dir.path(), "bare.cut", "cat\t[scat n] =animal=");

    let mut cmd = cargo_bin_cmd!("mor");
    cmd.arg("dict").arg("lint").arg(&path);
    cmd.assert().success();

    assert_eq!(
        fs::read_to_string(&path).expect("read back"),
        "cat\t{[scat n]} =animal=\n"
    );
}

#[test]
fn dict_lint_keeps_the_sample_unchanged() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.arg("dict").arg("lint").write_stdin(fixture("nouns.cut"));

    cmd.assert().success().stdout(fixture("nouns.cut"));
}

#[test]
fn dict_lint_can_drop_comments() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["dict", "lint", "--no-comments"])
        .write_stdin("% header\ncat\t{[scat n]} % note\n");

    cmd.assert().success().stdout("cat\t{[scat n]}\n");
}

#[test]
fn dict_lint_continues_past_bad_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bad = write(dir.path(), "bad.cut", "cat\t{\n");
    let good = write(dir.path(), "good.cut", "cat\t[scat n]\n");

    let mut cmd = cargo_bin_cmd!("mor");
    cmd.arg("dict").arg("lint").arg(&bad).arg(&good);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("1 file failed"));

    assert_eq!(fs::read_to_string(&good).expect("read back"), "cat\t{[scat n]}\n");
    assert_eq!(fs::read_to_string(&bad).expect("read back"), "cat\t{\n");
}

#[test]
fn dict_check_duplicates_as_tsv() {
    let dir = tempfile::tempdir().expect("temp dir");
    let other = write(dir.path(), "more.cut", "fish\t{[scat n]}\ncat\t{[scat v]}\n");

    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["dict", "check-duplicates"])
        .arg(fixture_path("nouns.cut"))
        .arg(&other);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "dict_name\tline\tcolumn\tPhon\tCategory\tOverall Semantics\tMorphological Analysis\n",
        ))
        .stdout(predicate::str::contains("\t5\t1\tcat\t{[scat n]}\t=animal=\t\"a feline\"\n"))
        .stdout(predicate::str::contains("\t2\t1\tcat\t{[scat v]}\t\t\n"))
        .stdout(predicate::str::contains("fish").not());
}

#[test]
fn dict_check_duplicates_as_json() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["dict", "check-duplicates", "--format", "json"])
        .write_stdin("cat\t{[scat n]}\ndog\t{}\ncat\t{[scat v]} =animal=\n");

    let output = cmd.assert().success().get_output().stdout.clone();
    let rows: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    let rows = rows.as_array().expect("array of rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["dict_name"], "<stdin>");
    assert_eq!(rows[0]["line"], 1);
    assert_eq!(rows[1]["Overall Semantics"], "=animal=");
}

#[test]
fn dict_mask_disables_redundant_entries() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["dict", "mask", "--threshold", "1"])
        .write_stdin("cat\t{[scat n]} =animal= \"a feline\"\ncat\t{[scat n]} =animal=\n");

    cmd.assert().success().stdout(
        "cat\t{[scat n]} =animal= \"a feline\"\n% DISABLED: cat\t{[scat n]} =animal=\n",
    );
}

#[test]
fn dict_mask_respects_the_default_threshold() {
    let source = "cat\t{[scat n]} =animal= \"a feline\"\ncat\t{[scat n]} =animal=\n";
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["dict", "mask"]).write_stdin(source);

    cmd.assert().success().stdout(source);
}

#[test]
fn dict_mask_threshold_from_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = write(dir.path(), "custom.toml", "[masking]\nthreshold = 1\n");

    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["dict", "mask", "--config"])
        .arg(&config)
        .write_stdin("cat\t{[scat n]} =animal= \"a feline\"\ncat\t{[scat n]} =animal=\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("% DISABLED: cat"));
}

#[test]
fn missing_config_file_is_reported() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["dict", "check", "--config", "/nonexistent/mor.toml"])
        .write_stdin("cat\t{}\n");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn morcomb_yaml_round_trip() {
    let mut to_yaml = cargo_bin_cmd!("mor");
    to_yaml
        .args(["morcomb", "to-yaml"])
        .arg(fixture_path("sentences.mor"));
    let yaml = to_yaml.assert().success().get_output().stdout.clone();
    let yaml = String::from_utf8(yaml).expect("utf-8");
    assert!(yaml.contains("ID: s1"));
    assert!(yaml.contains("- n|dog-PL\n"));

    let mut from_yaml = cargo_bin_cmd!("mor");
    from_yaml.args(["morcomb", "from-yaml", "-"]).write_stdin(yaml);
    from_yaml.assert().success().stdout(fixture("sentences.mor"));
}

#[test]
fn morcomb_lint_stdin_to_stdout() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["morcomb", "lint", "-"])
        .write_stdin(fixture("sentences.mor"));

    cmd.assert().success().stdout(fixture("sentences.mor"));
}

#[test]
fn morcomb_errors_name_the_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(dir.path(), "broken.mor", "*CHI:\thi\n%comb:\thi\n");

    let mut cmd = cargo_bin_cmd!("mor");
    cmd.args(["morcomb", "lint"]).arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("broken.mor:2:"));
}

#[test]
fn crule_diagrams() {
    let mut uml = cargo_bin_cmd!("mor");
    uml.args(["crule", "uml"]).arg(fixture_path("rules.crule"));
    uml.assert()
        .success()
        .stdout(predicate::str::starts_with("@startuml"))
        .stdout(predicate::str::contains("partition n_pl"));

    let mut digest = cargo_bin_cmd!("mor");
    digest
        .args(["crule", "uml-digest", "-"])
        .write_stdin(fixture("rules.crule"));
    digest
        .assert()
        .success()
        .stdout(predicate::str::contains("[*] --> n_start"));
}

#[test]
fn no_subcommand_shows_help() {
    let mut cmd = cargo_bin_cmd!("mor");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
