//! Integration tests for the `survey-editor` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fixtures::{option_added, question_dropped, write_intents};
use survey_editor::{BlockId, Intent, ItemKind, QuestionId};

fn editor(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("survey-editor").expect("binary builds");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

/// Intents that build one block with one answered question
fn build_intents() -> Vec<Intent> {
    vec![
        Intent::BlockDropped { target_id: None },
        question_dropped(&BlockId::from("b_1"), "Do you like surveys?"),
        option_added(&QuestionId::from("q_2"), "Yes"),
        option_added(&QuestionId::from("q_2"), "No"),
    ]
}

#[test]
fn test_replay_prints_resulting_survey() {
    let data_dir = TempDir::new().unwrap();
    let intents = write_intents(data_dir.path(), "build.jsonl", &build_intents());

    editor(&data_dir)
        .arg("replay")
        .arg(&intents)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Do you like surveys?\""))
        .stdout(predicate::str::contains("\"o_4\""))
        .stderr(predicate::str::contains("[success] New block added."));
}

#[test]
fn test_replay_save_then_list_and_show() {
    let data_dir = TempDir::new().unwrap();
    let intents = write_intents(data_dir.path(), "build.jsonl", &build_intents());

    editor(&data_dir)
        .arg("replay")
        .arg(&intents)
        .args(["--save", "Feedback"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Survey saved!"));

    editor(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Feedback\t"))
        .stdout(predicate::str::contains("1 blocks"));

    editor(&data_dir)
        .args(["show", "Feedback"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"b_1\""));
}

#[test]
fn test_replay_reports_rejected_intents() {
    let data_dir = TempDir::new().unwrap();
    let intents = write_intents(
        data_dir.path(),
        "bad.jsonl",
        &[Intent::ItemDelete {
            item_type: survey_editor::ItemType::Block.into(),
            item_id: "b_9".to_string(),
        }],
    );

    editor(&data_dir)
        .arg("replay")
        .arg(&intents)
        .assert()
        .success()
        .stderr(predicate::str::contains("[warning] block not found: b_9"));
}

#[test]
fn test_replay_skips_intent_with_unknown_item_type() {
    let data_dir = TempDir::new().unwrap();
    let intents = write_intents(
        data_dir.path(),
        "mixed.jsonl",
        &[
            Intent::BlockDropped { target_id: None },
            Intent::ItemDelete {
                item_type: ItemKind::Unknown("page".to_string()),
                item_id: "b_1".to_string(),
            },
            Intent::BlockDropped { target_id: None },
        ],
    );

    editor(&data_dir)
        .arg("replay")
        .arg(&intents)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"b_1\""))
        .stdout(predicate::str::contains("\"b_2\""))
        .stderr(predicate::str::contains(
            "[error] Not a valid item type for delete: page",
        ));
}

#[test]
fn test_replay_rejects_malformed_line() {
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("broken.jsonl");
    std::fs::write(&path, "{\"type\":\"block_dropped\"}\n{\"type\":\"fly\"}\n").unwrap();

    editor(&data_dir)
        .arg("replay")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid intent on line 2"));
}

#[test]
fn test_show_unknown_title_fails() {
    let data_dir = TempDir::new().unwrap();

    editor(&data_dir)
        .args(["show", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No saved survey titled"));
}

#[test]
fn test_first_run_writes_example_config() {
    let data_dir = TempDir::new().unwrap();

    editor(&data_dir).arg("list").assert().success().stdout("");

    let config = std::fs::read_to_string(data_dir.path().join("config.toml")).unwrap();
    assert!(config.contains("alert_timeout_ms"));
}
