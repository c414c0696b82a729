//! Integration tests driving the `idlers` binary.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde_json::{Value, json};

fn idlers_binary() -> PathBuf {
	PathBuf::from(env!("CARGO_BIN_EXE_idlers"))
}

struct Workspace {
	dir: tempfile::TempDir,
}

impl Workspace {
	fn new(config: Value) -> Self {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("config.json"), config.to_string()).unwrap();
		Self { dir }
	}

	fn path(&self) -> &Path {
		self.dir.path()
	}

	fn run(&self, args: &[&str]) -> (i32, Value, String) {
		let output = Command::new(idlers_binary())
			.current_dir(self.path())
			.arg("--config")
			.arg(self.path().join("config.json"))
			.args(args)
			.output()
			.expect("failed to execute idlers");

		let stdout = String::from_utf8_lossy(&output.stdout).to_string();
		let stderr = String::from_utf8_lossy(&output.stderr).to_string();
		let parsed = serde_json::from_str::<Value>(&stdout).unwrap_or_else(|_| json!({ "raw": stdout }));
		(output.status.code().unwrap_or(-1), parsed, stderr)
	}
}

/// Workspace with a file-backed resource and an always-idle one.
fn sync_workspace() -> (Workspace, PathBuf) {
	let workspace = Workspace::new(json!({}));
	let marker = workspace.path().join("sync.lock");
	let config = json!({
		"resources": [
			{ "kind": "file", "class": "com.example.SyncIdle", "name": "sync", "path": marker },
			{ "kind": "alwaysIdle", "class": "com.example.UiIdle", "name": "ui" }
		]
	});
	std::fs::write(workspace.path().join("config.json"), config.to_string()).unwrap();
	(workspace, marker)
}

#[test]
fn classes_lists_builtin_and_configured() {
	let (workspace, _) = sync_workspace();

	let (code, json, _) = workspace.run(&["classes"]);

	assert_eq!(code, 0);
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "classes");
	let classes: Vec<_> = json["data"]
		.as_array()
		.unwrap()
		.iter()
		.map(|c| (c["class"].as_str().unwrap().to_string(), c["instantiable"] == true))
		.collect();
	assert!(classes.contains(&("idlers.AlwaysIdle".to_string(), true)));
	assert!(classes.contains(&("idlers.CountingIdlingResource".to_string(), false)));
	assert!(classes.contains(&("com.example.SyncIdle".to_string(), true)));
}

#[test]
fn resolve_reports_states_in_order() {
	let (workspace, marker) = sync_workspace();
	std::fs::write(&marker, b"").unwrap();

	let (code, json, _) = workspace.run(&["resolve", "-c", " com.example.UiIdle , com.example.SyncIdle"]);

	assert_eq!(code, 0, "unexpected failure: {json}");
	let data = &json["data"];
	assert_eq!(data[0]["name"], "ui");
	assert_eq!(data[0]["idle"], true);
	assert_eq!(data[1]["class"], "com.example.SyncIdle");
	assert_eq!(data[1]["idle"], false);
	assert_eq!(json["inputs"]["classNames"], " com.example.UiIdle , com.example.SyncIdle");
}

#[test]
fn resolve_accepts_params_json() {
	let (workspace, _) = sync_workspace();

	let (code, json, _) = workspace.run(&["resolve", "--params", r#"{"classNames": "com.example.UiIdle"}"#]);

	assert_eq!(code, 0);
	assert_eq!(json["data"][0]["name"], "ui");
}

#[test]
fn unknown_class_fails_with_code() {
	let (workspace, _) = sync_workspace();

	let (code, json, stderr) = workspace.run(&["resolve", "-c", "com.example.UiIdle, com.example.Typo"]);

	assert_eq!(code, 1);
	assert_eq!(json["ok"], false);
	assert_eq!(json["command"], "resolve");
	assert_eq!(json["error"]["code"], "INVALID_CLASS_NAME");
	assert_eq!(json["error"]["details"]["class"], "com.example.Typo");
	assert!(json.get("data").is_none());
	assert!(stderr.contains("'com.example.Typo' is not a valid class name"), "stderr: {stderr}");
}

#[test]
fn trailing_comma_is_an_invalid_class_name() {
	let (workspace, _) = sync_workspace();

	let (code, json, _) = workspace.run(&["resolve", "-c", "com.example.UiIdle,"]);

	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "INVALID_CLASS_NAME");
	assert_eq!(json["error"]["details"]["class"], "");
}

#[test]
fn declared_class_reports_missing_factory() {
	let (workspace, _) = sync_workspace();

	let (code, json, _) = workspace.run(&["resolve", "-c", "idlers.CountingIdlingResource"]);

	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "MISSING_FACTORY_METHOD");
}

#[test]
fn wait_succeeds_once_marker_is_removed() {
	let (workspace, marker) = sync_workspace();
	std::fs::write(&marker, b"").unwrap();

	let remover = {
		let marker = marker.clone();
		std::thread::spawn(move || {
			std::thread::sleep(Duration::from_millis(300));
			std::fs::remove_file(marker).unwrap();
		})
	};

	let (code, json, _) = workspace.run(&[
		"wait",
		"-c",
		"com.example.SyncIdle, com.example.UiIdle",
		"--timeout-ms",
		"10000",
		"--poll-ms",
		"20",
	]);
	remover.join().unwrap();

	assert_eq!(code, 0, "unexpected failure: {json}");
	assert_eq!(json["command"], "wait");
	assert_eq!(json["data"]["resources"][0]["idle"], true);
	assert!(json["data"]["waitedMs"].as_u64().unwrap() > 0);
	assert_eq!(json["inputs"]["timeoutMs"], 10000);
	let waited = json["timings"]["waitMs"].as_u64().unwrap();
	assert!(waited >= 250, "waitMs: {waited}");
	assert!(json["timings"]["durationMs"].as_u64().unwrap() >= waited);
}

#[test]
fn wait_times_out_naming_busy_resource() {
	let (workspace, marker) = sync_workspace();
	std::fs::write(&marker, b"").unwrap();

	let (code, json, _) = workspace.run(&[
		"wait",
		"-c",
		"com.example.SyncIdle, com.example.UiIdle",
		"--timeout-ms",
		"100",
		"--poll-ms",
		"10",
	]);

	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "IDLE_TIMEOUT");
	assert_eq!(json["error"]["details"]["busy"], json!(["sync"]));
	assert!(json["timings"]["durationMs"].as_u64().unwrap() >= 100);
}

#[test]
fn broken_config_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("config.json"), "{ nope").unwrap();
	let workspace = Workspace { dir };

	let (code, json, _) = workspace.run(&["classes"]);

	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "CONFIG_ERROR");
}
