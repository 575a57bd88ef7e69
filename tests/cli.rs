//! CLI integration tests for the `cafebot` binary.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use cafebot::store::{SqliteStore, Store};
use predicates::prelude::*;
use serde_json::Value;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cafebot").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn send(&self, user_id: i64, input: &str) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["send", "--data-dir", &self.data_dir_str(), "--user-id"])
            .arg(user_id.to_string())
            .arg(input)
            .assert()
    }

    fn send_json(&self, extra: &[&str], user_id: i64, input: &str) -> Value {
        let output = self
            .cmd()
            .args(["send", "--json", "--data-dir", &self.data_dir_str(), "--user-id"])
            .arg(user_id.to_string())
            .args(extra)
            .arg(input)
            .output()
            .expect("failed to run command");

        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("failed to parse JSON")
    }

    fn store(&self) -> SqliteStore {
        SqliteStore::new(self.data_dir().join("cafebot.db")).expect("open store")
    }
}

#[test]
fn test_seed_creates_database() {
    let ctx = TestContext::new();
    ctx.cmd()
        .args(["seed", "--data-dir", &ctx.data_dir_str()])
        .assert()
        .success();

    ctx.temp_dir
        .child("cafebot.db")
        .assert(predicate::path::exists());

    // seeding twice is harmless
    ctx.cmd()
        .args(["seed", "--data-dir", &ctx.data_dir_str()])
        .assert()
        .success();
    assert_eq!(ctx.store().list_buildings().unwrap().len(), 4);
}

#[test]
fn test_send_start_registers_player() {
    let ctx = TestContext::new();
    ctx.send(42, "/start")
        .success()
        .stdout(predicate::str::contains("Street Cafe"));

    let player = ctx.store().get_player(42).unwrap().unwrap();
    assert_eq!(player.balance, 100);
    assert_eq!(player.level, 1);
}

#[test]
fn test_send_before_start_prompts_registration() {
    let ctx = TestContext::new();
    ctx.send(42, "/collect")
        .success()
        .stdout(predicate::str::contains("/start"));
}

#[test]
fn test_send_callback_buys_building() {
    let ctx = TestContext::new();
    ctx.send(42, "/start").success();

    let reply = ctx.send_json(&["--callback"], 42, "buy:Терраса");
    assert_eq!(reply["chat_id"], 42);
    assert!(reply["text"].as_str().unwrap().contains("Терраса"));

    let owned = ctx.store().get_owned_building(42, "Терраса").unwrap();
    assert_eq!(owned.map(|b| b.level), Some(1));
}

#[test]
fn test_admin_id_flag_enables_add_coins() {
    let ctx = TestContext::new();
    ctx.send(9, "/start").success();

    ctx.send(9, "/add_coins 50")
        .success()
        .stdout(predicate::str::contains("администратору"));

    ctx.cmd()
        .args(["send", "--data-dir", &ctx.data_dir_str(), "--admin-id", "9"])
        .args(["--user-id", "9", "/add_coins 50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("150"));
}

#[test]
fn test_config_file_sets_admin() {
    let ctx = TestContext::new();
    let config = ctx.temp_dir.child("cafebot.toml");
    config
        .write_str(&format!(
            "data_dir = {:?}\nadmin_id = 3\n",
            ctx.data_dir_str()
        ))
        .unwrap();

    ctx.cmd()
        .args(["send", "--config"])
        .arg(config.path())
        .args(["--user-id", "3", "/start"])
        .assert()
        .success();

    ctx.cmd()
        .args(["send", "--config"])
        .arg(config.path())
        .args(["--user-id", "3", "/add_coins 7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("107"));
}

#[test]
fn test_bad_config_file_fails() {
    let ctx = TestContext::new();
    let config = ctx.temp_dir.child("cafebot.toml");
    config.write_str("port = \"eighty\"").unwrap();

    ctx.cmd()
        .args(["send", "--config"])
        .arg(config.path())
        .args(["--user-id", "1", "/start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
