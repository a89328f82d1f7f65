use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const REQUEST: &str = r##"{
  "kind": "markdown",
  "path": "projects/Launch.md",
  "contents": "# Launch\n- [ ] book venue\n  owner:: Sam\n",
  "stat": {"ctime": 0, "mtime": 0, "size": 42},
  "hints": {
    "headings": [{"line": 0, "heading": "Launch", "level": 1}],
    "blocks": [
      {"type": "heading", "line_start": 0, "line_end": 0},
      {"type": "list", "line_start": 1, "line_end": 2}
    ],
    "list_items": [{"line_start": 1, "line_end": 2, "parent": -1, "task": " "}],
    "tags": [{"tag": "launch", "line": 1}]
  }
}"##;

fn pdx(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pdx"));
    cmd.env("XDG_CONFIG_HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn import_from_file_prints_markdown_response() {
    let tmp = tempdir().unwrap();
    let req = tmp.path().join("request.json");
    fs::write(&req, REQUEST).unwrap();

    let assert = pdx(tmp.path()).arg("import").arg(&req).assert().success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let response: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(response["kind"], "markdown");

    let page = &response["page"];
    assert_eq!(page["path"], "projects/Launch.md");
    assert_eq!(page["tags"][0], "#launch");

    let item = &page["sections"][0]["blocks"][0]["items"][0];
    assert_eq!(item["status"], " ");
    assert_eq!(item["tags"][0], "#launch");
    assert_eq!(item["fields"][0]["key"], "owner");
    assert_eq!(item["fields"][0]["value"]["type"], "string");
    assert_eq!(item["fields"][0]["value"]["value"], "Sam");
}

#[test]
fn import_reads_stdin() {
    let tmp = tempdir().unwrap();
    pdx(tmp.path())
        .args(["import", "--pretty"])
        .write_stdin(REQUEST)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"markdown\""));
}

#[test]
fn error_response_exits_nonzero() {
    let tmp = tempdir().unwrap();
    let request = r#"{
      "kind": "markdown",
      "path": "bad.md",
      "contents": "```yaml:data\nkey: [oops\n```",
      "stat": {"ctime": 0, "mtime": 0, "size": 0},
      "hints": {"blocks": [{"type": "code", "line_start": 0, "line_end": 2}]}
    }"#;

    pdx(tmp.path())
        .arg("import")
        .write_stdin(request)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(r#""kind":"error""#))
        .stdout(predicate::str::contains("invalid data block on line 1"));
}

#[test]
fn malformed_request_fails() {
    let tmp = tempdir().unwrap();
    pdx(tmp.path())
        .arg("import")
        .write_stdin("{\"kind\": \"pdf\"}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid import request"));
}

#[test]
fn canvas_request_is_answered() {
    let tmp = tempdir().unwrap();
    let request = r##"{
      "kind": "canvas",
      "path": "Board.canvas",
      "contents": "{\"nodes\":[{\"id\":\"1\",\"type\":\"text\",\"text\":\"#idea see [[Launch]]\"}]}",
      "stat": {"ctime": 0, "mtime": 0, "size": 0}
    }"##;

    let assert = pdx(tmp.path()).arg("import").write_stdin(request).assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let response: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(response["kind"], "markdown");
    assert_eq!(response["page"]["extension"], "canvas");
    assert_eq!(response["page"]["tags"][0], "#idea");
    assert_eq!(response["page"]["links"][0]["path"], "Launch");
}
