// Regression tests: the formtree binary end to end over the fixture forms.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const FORM: &str = "tests/fixtures/profile.yaml";

fn formtree() -> Command {
    Command::cargo_bin("formtree").unwrap()
}

#[test]
fn cli_check_passes_valid_data() {
    formtree()
        .args(["check", FORM, "--data", "tests/fixtures/profile_valid.json", "--submit"])
        .assert()
        .success()
        .stdout(contains("form is valid"));
}

#[test]
fn cli_check_reports_miette_diagnostics_on_submit() {
    formtree()
        .args(["check", FORM, "--data", "tests/fixtures/profile_invalid.json", "--submit"])
        .assert()
        .failure()
        .stderr(
            contains("formtree::validation::is_blank")
                .and(contains("formtree::validation::email_invalid"))
                .and(contains("3 error(s) found")),
        );
}

#[test]
fn cli_check_hides_errors_of_untouched_fields() {
    formtree()
        .args(["check", FORM, "--data", "tests/fixtures/profile_invalid.json"])
        .assert()
        .success();
}

#[test]
fn cli_export_prints_nested_json() {
    formtree()
        .args(["export", FORM, "--data", "tests/fixtures/profile_valid.json"])
        .assert()
        .success()
        .stdout(contains("\"name\": \"Ada\"").and(contains("\"hobby\": \"looms\"")));
}

#[test]
fn cli_paths_lists_repeatable_indices() {
    formtree()
        .args(["paths", FORM, "--data", "tests/fixtures/profile_valid.json"])
        .assert()
        .success()
        .stdout(contains("hobbies.1.hobby").and(contains("/3/1")));
}

#[test]
fn cli_strict_import_rejects_unknown_keys() {
    formtree()
        .args(["export", FORM, "--data", "tests/fixtures/profile_extra.json"])
        .assert()
        .failure()
        .stderr(contains("No name path: nickname was found"));

    formtree()
        .args(["export", FORM, "--data", "tests/fixtures/profile_extra.json", "--lenient"])
        .assert()
        .success();
}

#[test]
fn cli_view_prints_render_json() {
    formtree()
        .args(["view", FORM])
        .assert()
        .success()
        .stdout(contains("\"kind\": \"repeatable\"").and(contains("\"label\": \"Name\"")));
}

#[test]
fn cli_reports_missing_files() {
    formtree()
        .args(["check", "tests/fixtures/missing.yaml"])
        .assert()
        .failure()
        .stderr(contains("formtree::io::read").or(contains("failed to read")));
}
