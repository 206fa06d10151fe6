//! End-to-end runs of the binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("release_bookkeeper").expect("binary should build");
    cmd.env_clear();
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-release"))
        .stdout(predicate::str::contains("create-page"));
}

#[test]
fn test_missing_required_inputs_fail() {
    bin()
        .arg("create-release")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--api-url"));
}

#[test]
fn test_non_numeric_identifier_rejected_before_network() {
    bin()
        .args(["create-release"])
        .env("JIRA_API_URL", "http://127.0.0.1:9/rest/api/3")
        .env("JIRA_URL", "http://127.0.0.1:9")
        .env("JIRA_API_USER", "bot")
        .env("JIRA_API_TOKEN", "secret")
        .env("JIRA_PROJECT_KEY", "ABC")
        .env("JIRA_RELEASE_IDENTIFIER", "24.07.beta")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must end in a numeric segment"));
}

#[test]
fn test_release_run_writes_outputs() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/project/ABC")
        .with_status(200)
        .with_body(r#"{"id":"10000","name":"Alpha"}"#)
        .create();
    server
        .mock("POST", "/version")
        .with_status(201)
        .with_body(r#"{"id":"10042"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let output_file = dir.path().join("output");
    let summary_file = dir.path().join("summary.md");

    bin()
        .args(["create-release", "--retries", "0"])
        .env("JIRA_API_URL", server.url())
        .env("JIRA_URL", "https://jira.example.com")
        .env("JIRA_API_USER", "bot")
        .env("JIRA_API_TOKEN", "secret")
        .env("JIRA_PROJECT_KEY", "ABC")
        .env("JIRA_RELEASE_IDENTIFIER", "24.07.27.07")
        .env("GITHUB_OUTPUT", &output_file)
        .env("GITHUB_STEP_SUMMARY", &summary_file)
        .assert()
        .success();

    let outputs = std::fs::read_to_string(&output_file).unwrap();
    assert!(outputs.contains("JIRA_RELEASE_NAME=ABC-R24.07.27.07\n"));
    assert!(outputs.contains(
        "JIRA_VERSION_URL=https://jira.example.com/projects/ABC/versions/10042\n"
    ));
    assert!(outputs.contains("JIRA_RELEASE_STATUS=succeeded\n"));

    let summary = std::fs::read_to_string(&summary_file).unwrap();
    assert!(summary.contains("# Initial Vars"));
    assert!(summary.contains("| ABC | ABC-R24.07.27.07 |"));
}

#[test]
fn test_conflict_exits_nonzero_with_suggestion() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/project/ABC")
        .with_status(200)
        .with_body(r#"{"id":"10000","name":"Alpha"}"#)
        .create();
    server
        .mock("POST", "/version")
        .with_status(400)
        .with_body(r#"{"errorMessages":[],"errors":{"name":"A version with this name already exists in this project."}}"#)
        .create();

    bin()
        .args(["create-release", "--retries", "0"])
        .env("JIRA_API_URL", server.url())
        .env("JIRA_URL", "https://jira.example.com")
        .env("JIRA_API_USER", "bot")
        .env("JIRA_API_TOKEN", "secret")
        .env("JIRA_PROJECT_KEY", "ABC")
        .env("JIRA_RELEASE_IDENTIFIER", "24.07.27.07")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Alpha"))
        .stderr(predicate::str::contains("24.07.27.08"));
}

#[test]
fn test_unincrementable_identifier_rejected_before_network() {
    let mut server = mockito::Server::new();
    let lookup = server.mock("GET", "/project/A").expect(0).create();

    bin()
        .args(["create-release"])
        .env("JIRA_API_URL", server.url())
        .env("JIRA_URL", "https://jira.example.com")
        .env("JIRA_API_USER", "bot")
        .env("JIRA_API_TOKEN", "secret")
        .env("JIRA_PROJECT_KEY", "A,B")
        .env("JIRA_RELEASE_IDENTIFIER", "1.99999999999999999999")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be incremented"));

    lookup.assert();
}

#[test]
fn test_page_lists_releases_and_failures_from_report_file() {
    let mut jira = mockito::Server::new();
    jira.mock("GET", "/project/A")
        .with_status(200)
        .with_body(r#"{"id":"1","name":"Alpha"}"#)
        .create();
    jira.mock("GET", "/project/B")
        .with_status(200)
        .with_body(r#"{"id":"2","name":"Beta"}"#)
        .create();
    jira.mock("POST", "/version")
        .match_body(mockito::Matcher::PartialJson(
            serde_json::json!({"name": "A-R24.07.27.07"}),
        ))
        .with_status(201)
        .with_body(r#"{"id":"501"}"#)
        .create();
    jira.mock("POST", "/version")
        .match_body(mockito::Matcher::PartialJson(
            serde_json::json!({"name": "B-R24.07.27.07"}),
        ))
        .with_status(400)
        .with_body(r#"{"errorMessages":[],"errors":{"name":"exists"}}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let report_file = dir.path().join("report.json");

    bin()
        .args(["create-release", "--retries", "0"])
        .env("JIRA_API_URL", jira.url())
        .env("JIRA_URL", "https://jira.example.com")
        .env("JIRA_API_USER", "bot")
        .env("JIRA_API_TOKEN", "secret")
        .env("JIRA_PROJECT_KEY", "A,B")
        .env("JIRA_RELEASE_IDENTIFIER", "24.07.27.07")
        .env("RELEASE_REPORT_FILE", &report_file)
        .assert()
        .code(1);

    let mut wiki = mockito::Server::new();
    wiki.mock("GET", "/rest/api/space/REL")
        .with_status(200)
        .with_body(r#"{"id":7,"name":"Releases"}"#)
        .create();
    let page = wiki
        .mock("POST", "/rest/api/content")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex("projects/A/versions/501".to_string()),
            mockito::Matcher::Regex("Not released".to_string()),
            mockito::Matcher::Regex(r"Try release identifier 24\.07\.27\.08".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"id":"900"}"#)
        .expect(1)
        .create();
    let output_file = dir.path().join("output");

    bin()
        .args(["create-page", "--retries", "0"])
        .env("CONFLUENCE_API_URL", wiki.url())
        .env("CONFLUENCE_URL", "https://wiki.example.com/wiki")
        .env("CONFLUENCE_API_USERNAME", "bot")
        .env("CONFLUENCE_API_TOKEN", "secret")
        .env("CONFLUENCE_SPACE_KEY", "REL")
        .env("CONFLUENCE_PAGE_TITLE", "Release 24.07.27.07")
        .env("RELEASE_REPORT_FILE", &report_file)
        .env("GITHUB_OUTPUT", &output_file)
        .assert()
        .success();

    page.assert();
    let outputs = std::fs::read_to_string(&output_file).unwrap();
    assert!(outputs.contains("CONFLUENCE_PAGE_ID=900\n"));
}
