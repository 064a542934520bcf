//! Shared testing utilities for payergen integration tests.

use assert_cmd::Command;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `payergen` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("payergen").expect("Failed to locate payergen binary");
        cmd.current_dir(&self.work_dir).env_remove("RUST_LOG");
        cmd
    }

    /// Write a configuration document into the work directory.
    pub fn write_config(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(value).expect("serialize config"))
            .expect("Failed to write config");
        path
    }

    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join("out")
    }
}

/// Attachments enabled, appeals disabled, one https endpoint.
#[allow(dead_code)]
pub fn sample_config() -> Value {
    json!({
        "payerId": "MCO001",
        "payerName": "Example Community Health Plan",
        "modules": {
            "attachments": {
                "enabled": true,
                "sftp": {
                    "host": "sftp.example.org",
                    "username": "mco001-edi",
                    "inboundFolder": "/inbound/275",
                    "outboundFolder": "/outbound/277"
                },
                "claimSystemEndpoint": "https://api.example.org/v1"
            },
            "appeals": { "enabled": false }
        },
        "infrastructure": { "region": "eastus", "environment": "dev" },
        "monitoring": { "logRetentionDays": 90, "alertEmails": ["ops@example.org"] }
    })
}

/// Every module enabled.
#[allow(dead_code)]
pub fn full_config() -> Value {
    let mut value = sample_config();
    value["modules"] = json!({
        "attachments": sample_config()["modules"]["attachments"].clone(),
        "authorizations": {
            "enabled": true,
            "x12Version": "005010X217",
            "endpoint": "https://auth.example.org/x12"
        },
        "appeals": {
            "enabled": true,
            "endpoint": "https://appeals.example.org/api",
            "requestTypes": ["standard", "expedited"],
            "subStatusEnabled": true
        },
        "ecs": {
            "enabled": true,
            "queryMethods": ["memberId", "checkNumber"],
            "endpoint": "https://ecs.example.org/v2"
        }
    });
    value
}

/// Every file under `root`, keyed by `/`-separated relative path.
#[allow(dead_code)]
pub fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    if root.exists() {
        collect(root, root, &mut files);
    }
    files
}

#[allow(dead_code)]
fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    for entry in fs::read_dir(dir).expect("read_dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).expect("relative path");
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(key, fs::read(&path).expect("read file"));
        }
    }
}
