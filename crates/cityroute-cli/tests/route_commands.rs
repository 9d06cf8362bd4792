use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../cityroute-lib/data/cities.json")
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli() -> Command {
    cargo_bin_cmd!("cityroute")
}

fn prepare_command() -> Command {
    let mut cmd = cli();
    cmd.env_remove("CITYROUTE_DATA_PATH")
        .env_remove("CITYROUTE_HISTORY_PATH")
        .env("RUST_LOG", "error")
        .arg("--data")
        .arg(fixture_path());
    cmd
}

#[test]
fn route_prints_path_and_distance() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Ballari", "--to", "Gadag"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Ballari -> Gadag (4 hops, algorithm: a-star)",
        ))
        .stdout(predicate::str::contains("Koppal"))
        .stdout(predicate::str::contains("Distance: 156 km, estimated time: 3.12 hours"));
}

#[test]
fn dijkstra_algorithm_is_supported() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "Ballari",
        "--to",
        "Hospet",
        "--algorithm",
        "dijkstra",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: dijkstra"));
}

#[test]
fn json_format_matches_route_result() {
    let mut cmd = prepare_command();
    cmd.args([
        "route", "--from", "ballari", "--to", "HOSPET", "--format", "json",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["from"], "Ballari");
    assert_eq!(value["to"], "Hospet");
    assert_eq!(value["distance_km"], 60.0);
    assert_eq!(value["path"], serde_json::json!(["Ballari", "Hospet"]));
    assert_eq!(value["coordinates"][0][0], 15.1394);
}

#[test]
fn rich_format_outputs_markdown() {
    let mut cmd = prepare_command();
    cmd.args([
        "--format", "rich", "route", "--from", "Ballari", "--to", "Hospet",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("**Route**"))
        .stdout(predicate::str::contains("**Hospet**"));
}

#[test]
fn unknown_city_error_is_friendly() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Hospett", "--to", "Ballari"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown city 'Hospett'"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn restricted_route_can_fail() {
    let mut cmd = prepare_command();
    cmd.args([
        "route", "--from", "Hospet", "--to", "Ballari", "--allow", "Ballari",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "No route found between Hospet and Ballari.",
        ));
}

#[test]
fn user_searches_are_written_to_history() {
    let temp = tempdir().expect("create temp dir");
    let history = temp.path().join("history.jsonl");
    let mut cmd = prepare_command();
    cmd.env("CITYROUTE_HISTORY_PATH", &history).args([
        "route", "--from", "Kampli", "--to", "Ballari", "--user", "ada",
    ]);
    cmd.assert().success();

    let contents = fs::read_to_string(&history).expect("history written");
    let record: serde_json::Value =
        serde_json::from_str(contents.lines().next().expect("one line")).unwrap();
    assert_eq!(record["identity"], "ada");
    assert_eq!(record["action"], "search_route");
    assert_eq!(record["metadata"]["distance"], 55.0);
}

#[test]
fn missing_dataset_is_reported() {
    let temp = tempdir().expect("create temp dir");
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .arg("--data")
        .arg(temp.path().join("missing.json"))
        .arg("cities");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load the city dataset"));
}
