use assert_cmd::Command;
use predicates::prelude::*;

fn json_mimic() -> Command {
    Command::cargo_bin("json-mimic").unwrap()
}

#[test]
fn lists_bundled_models() {
    json_mimic()
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("order").and(predicate::str::contains("inventory")));
}

#[test]
fn generates_and_verifies_a_model() {
    let output = json_mimic()
        .args(["generate", "--model", "order", "--sequence-length", "2", "--seed", "7", "--verify"])
        .assert()
        .success()
        .stderr(predicate::str::contains("decode as `order`"))
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["lines"].as_array().map(Vec::len), Some(2));
}

#[test]
fn count_emits_an_array_of_documents() {
    let output = json_mimic()
        .args(["generate", "-m", "inventory", "--count", "3", "--seed", "1", "--no-optionals"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let docs = value.as_array().unwrap();
    assert_eq!(docs.len(), 3);
    assert!(docs.iter().all(|d| d.get("audited_on").is_none()));
}

#[test]
fn numeric_range_accepts_negative_bounds() {
    json_mimic()
        .args(["generate", "-m", "profile", "--numeric-range", "-10..10", "--verify"])
        .assert()
        .success();
}

#[test]
fn config_file_is_layered_under_flags() {
    let dir = std::env::temp_dir().join(format!("json-mimic-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let config = dir.join("options.json");
    std::fs::write(&config, r#"{"sequence_length": 1, "string_length": {"min": 3, "max": 3}}"#).unwrap();
    let out = dir.join("nested").join("order.json");

    json_mimic()
        .args(["generate", "-m", "order", "--sequence-length", "4"])
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["lines"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["reference"].as_str().map(str::len), Some(3));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_model_fails() {
    json_mimic()
        .args(["generate", "--model", "spaceship"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown model `spaceship`"));
}

#[test]
fn invalid_options_fail() {
    json_mimic()
        .args(["generate", "--model", "order", "--temporal-format", "%Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid options"));
}
