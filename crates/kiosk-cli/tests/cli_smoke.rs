mod common;
use common::TestEnv;
use predicates::prelude::*;

#[test]
fn list_prints_catalog_order() {
    let t = TestEnv::new();
    t.bin()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hero Feature"))
        .stdout(predicate::str::contains("NTLM Deep Dive"));
}

#[test]
fn list_json_is_the_full_catalog() {
    let t = TestEnv::new();
    let out = t
        .bin()
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 4);
    assert_eq!(arr[0]["title"], "Hero Feature");
}

#[test]
fn search_json_returns_expected() {
    let t = TestEnv::new();
    let out = t
        .bin()
        .args(["search", "kerberos", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(v.as_array().unwrap().is_empty());

    let out = t
        .bin()
        .args(["search", "ntlm", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
}

#[test]
fn missing_catalog_fails_with_context() {
    let t = TestEnv::new();
    let mut cmd = assert_cmd::Command::cargo_bin("kiosk-cli").unwrap();
    cmd.env("XDG_CONFIG_HOME", &t.cfg)
        .arg("--posts")
        .arg("/definitely/not/here.json")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read catalog"));
}

#[test]
fn malformed_settings_warn_and_fall_back() {
    let t = TestEnv::new();
    let dir = t.cfg.join("kiosk");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("settings.toml"), "posts_path = [not toml").unwrap();
    t.bin()
        .env("RUST_LOG", "warn")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hero Feature"))
        .stderr(predicate::str::contains("ignoring malformed"));
}

#[test]
fn doctor_reports_catalog_ok() {
    let t = TestEnv::new();
    t.bin()
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog: ok (4 posts"));
}
