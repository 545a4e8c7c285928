#![allow(dead_code)]

use anyhow::{bail, Result};
use assert_cmd::cargo;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Command isolated from the user's HOME/config and the network
pub fn base_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("rendafixa"));
    cmd.env("HOME", home.path());
    cmd.env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd.env("RENDAFIXA_OFFLINE", "1");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--no-color");
    cmd
}

pub fn run_cmd(home: &TempDir, args: &[&str]) -> Result<Output> {
    let mut cmd = base_cmd(home);
    cmd.args(args);
    let output = cmd.output()?;
    if !output.status.success() {
        bail!(
            "command failed: {:?}\nstdout: {}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn write_config(home: &TempDir, content: &str) {
    let dir = home.path().join(".config").join("rendafixa");
    std::fs::create_dir_all(&dir).expect("failed to create config dir");
    std::fs::write(dir.join("config.toml"), content).expect("failed to write config");
}
