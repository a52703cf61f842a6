//! End-to-end tests for the content-export binary
//!
//! Each test points `CONTENT_EXPORT_DIR` at its own temporary directory and
//! reads content from a repository dump written next to it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DUMP: &str = r#"{
  "contentTypes": [
    { "name": "jnt:news", "displayName": "news entry", "icon": "/icons/news" },
    { "name": "jnt:event", "displayName": "Event" }
  ],
  "attributes": {
    "jnt:news": [
      { "name": "jcr:title", "displayName": "Title" },
      { "name": "date", "displayName": "Date" },
      { "name": "j:internal", "displayName": "Internal", "hidden": true }
    ]
  },
  "result": {
    "uuid": "root",
    "path": "/sites/digitall",
    "name": "digitall",
    "displayName": "Digitall",
    "descendants": {
      "nodes": [
        {
          "uuid": "n1",
          "path": "/sites/digitall/news",
          "name": "news",
          "primaryNodeType": { "name": "jnt:news" },
          "displayName": "News",
          "properties": [
            { "name": "jcr:title", "value": "All \"news\"", "definition": { "multiple": false } }
          ],
          "tagList": [{ "values": ["press", "2024"] }],
          "defaultCategory": [{ "displayName": "Corporate" }]
        },
        {
          "uuid": "n2",
          "path": "/sites/digitall/news/launch",
          "name": "launch",
          "primaryNodeType": { "name": "jnt:news" },
          "properties": [
            { "name": "jcr:title", "value": "Launch; day", "definition": { "multiple": false } },
            { "name": "date", "value": "2024-03-05", "definition": { "multiple": false } }
          ],
          "interests": { "values": ["golf"] }
        },
        {
          "uuid": "e1",
          "path": "/sites/digitall/events/fair",
          "name": "fair",
          "primaryNodeType": { "name": "jnt:event" }
        }
      ]
    }
  }
}"#;

fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let dump = temp.path().join("dump.json");
    fs::write(&dump, DUMP).unwrap();
    (temp, dump)
}

fn content_export(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("content-export").unwrap();
    cmd.env("CONTENT_EXPORT_DIR", home.join("home"))
        .env_remove("CONTENT_EXPORT_SOURCE")
        .env_remove("RUST_LOG");
    cmd
}

fn only_file(dir: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one file in {}", dir.display());
    entries.into_iter().next().unwrap()
}

#[test]
fn test_types_sorted_by_label() {
    let (temp, dump) = setup();

    let output = content_export(temp.path())
        .args(["types", "--source"])
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("/icons/news.png"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let event = text.find("Event").unwrap();
    let news = text.find("news entry").unwrap();
    assert!(event < news);
}

#[test]
fn test_attributes_hide_hidden() {
    let (temp, dump) = setup();

    content_export(temp.path())
        .args(["attributes", "jnt:news", "--source"])
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("jcr:title"))
        .stdout(predicate::str::contains("j:internal").not());

    content_export(temp.path())
        .args(["attributes", "jnt:news", "--all", "--source"])
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("j:internal"));
}

#[test]
fn test_attributes_unknown_type_fails() {
    let (temp, dump) = setup();

    content_export(temp.path())
        .args(["attributes", "jnt:missing", "--source"])
        .arg(&dump)
        .assert()
        .failure()
        .stderr(predicate::str::contains("jnt:missing"));
}

#[test]
fn test_run_table_export() {
    let (temp, dump) = setup();
    let out = temp.path().join("out");

    content_export(temp.path())
        .args(["run", "--site", "digitall", "--type", "jnt:news", "--attr", "jcr:title"])
        .arg("--source")
        .arg(&dump)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported exported_content_"));

    let file = only_file(&out);
    assert_eq!(file.extension().unwrap(), "csv");

    let text = fs::read_to_string(&file).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "uuid;path;name;primaryNodeType;displayName;jcr:title;j:tagList;j:defaultCategory;interests"
    );
    assert_eq!(
        lines[1],
        "\"n1\";\"/sites/digitall/news\";\"news\";\"jnt:news\";\"News\";\"All \"\"news\"\"\";\"press,2024\";\"Corporate\";\"\""
    );
    assert!(lines[2].contains("\"Launch; day\""));
    assert!(lines[2].ends_with("\"golf\""));
}

#[test]
fn test_run_table_reads_back_with_csv_reader() {
    let (temp, dump) = setup();
    let out = temp.path().join("out");

    content_export(temp.path())
        .args(["run", "--site", "digitall", "--type", "jnt:news", "--delimiter", "|"])
        .arg("--source")
        .arg(&dump)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let file = only_file(&out);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .from_path(&file)
        .unwrap();

    let headers = reader.headers().unwrap().clone();
    // No --attr: every visible attribute of the type
    assert!(headers.iter().any(|h| h == "date"));
    assert!(!headers.iter().any(|h| h == "j:internal"));

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][0], "n2");
}

#[test]
fn test_run_tree_export() {
    let (temp, dump) = setup();
    let out = temp.path().join("out");

    content_export(temp.path())
        .args(["run", "--site", "digitall", "--type", "jnt:news", "--format", "tree"])
        .arg("--source")
        .arg(&dump)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes"));

    let file = only_file(&out);
    assert_eq!(file.extension().unwrap(), "json");

    let tree: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(tree["uuid"], "root");
    assert_eq!(tree["children"][0]["uuid"], "n1");
    assert_eq!(tree["children"][0]["children"][0]["uuid"], "n2");
    assert_eq!(tree["children"].as_array().unwrap().len(), 1);
}

#[test]
fn test_run_yaml_tree_export() {
    let (temp, dump) = setup();
    let out = temp.path().join("out");

    content_export(temp.path())
        .args(["run", "--site", "digitall", "--type", "jnt:news"])
        .args(["--format", "tree", "--encoding", "yaml", "--base-name", "news"])
        .arg("--source")
        .arg(&dump)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let file = only_file(&out);
    let name = file.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("news_"));
    assert!(name.ends_with(".yaml"));
    assert!(fs::read_to_string(&file)
        .unwrap()
        .starts_with("# Content tree export"));
}

#[test]
fn test_run_wrong_site_fails_with_file_name() {
    let (temp, dump) = setup();
    let out = temp.path().join("out");

    content_export(temp.path())
        .args(["run", "--site", "elsewhere", "--type", "jnt:news"])
        .arg("--source")
        .arg(&dump)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::is_match(r"exported_content_\d{8}T\d{9}Z\.csv failed: ").unwrap());

    assert!(!out.exists());
}

#[test]
fn test_run_missing_dump_fails() {
    let temp = TempDir::new().unwrap();

    content_export(temp.path())
        .args(["run", "--site", "digitall", "--type", "jnt:news", "--source"])
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed: Retrieval failed"));
}

#[test]
fn test_config_set_then_run_uses_saved_site() {
    let (temp, dump) = setup();
    let out = temp.path().join("out");

    content_export(temp.path())
        .args(["config", "set", "--site", "digitall", "--separator", ","])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    content_export(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digitall"));

    content_export(temp.path())
        .args(["run", "--type", "jnt:news", "--attr", "date"])
        .arg("--source")
        .arg(&dump)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(only_file(&out)).unwrap();
    assert!(text.starts_with("uuid,path,name,"));
}

#[test]
fn test_run_survives_malformed_optional_fields() {
    let temp = TempDir::new().unwrap();
    let dump = temp.path().join("dump.json");
    let broken = DUMP
        .replace(
            r#""tagList": [{ "values": ["press", "2024"] }]"#,
            r#""tagList": "x""#,
        )
        .replace(
            r#""defaultCategory": [{ "displayName": "Corporate" }]"#,
            r#""defaultCategory": [{ "displayName": "Corporate" }, null]"#,
        );
    assert_ne!(broken, DUMP);
    fs::write(&dump, broken).unwrap();
    let out = temp.path().join("out");

    content_export(temp.path())
        .args(["run", "--site", "digitall", "--type", "jnt:news", "--attr", "jcr:title"])
        .arg("--source")
        .arg(&dump)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(only_file(&out)).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(";\"\";\"Corporate\";\"\""));
}
