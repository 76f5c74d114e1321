// Copyright (c) 2026 Faultbait
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]

// Faults end the process, so these drive the runner binary and look at how
// it exited.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, fixture: &str, input: &[u8]) -> Output {
    let path = dir.join("input.bin");
    fs::write(&path, input).expect("write input");
    Command::new(env!("CARGO_BIN_EXE_faultbait"))
        .arg(fixture)
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn runner")
}

#[test]
fn benign_input_exits_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run(dir.path(), "xyz-counted", b"hello world");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "no match");
}

#[test]
fn canary_match_is_printed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run(dir.path(), "fuzz-canary", b"FUZZ!");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "match");
}

#[test]
fn panic_selector_terminates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run(dir.path(), "xyz-counted", b"xyz4pad");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("panic"));
}

#[cfg(unix)]
#[test]
fn signal_selector_dies_by_sigsegv() {
    use std::os::unix::process::ExitStatusExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let out = run(dir.path(), "xyz-counted", b"xyz2pad");
    assert_eq!(out.status.signal(), Some(libc::SIGSEGV));
}

#[cfg(unix)]
#[test]
fn divide_by_zero_dies_by_sigfpe() {
    use std::os::unix::process::ExitStatusExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let out = run(dir.path(), "xyz-heap", b"xyz7");
    assert_eq!(out.status.signal(), Some(libc::SIGFPE));
}

#[test]
fn null_write_terminates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run(dir.path(), "xyz-native", b"xyz0");
    assert!(!out.status.success());
}

#[test]
fn short_input_never_reaches_a_fault() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Exactly four bytes: the > 4 gate rejects it before the selector is read.
    let out = run(dir.path(), "xyz-counted", b"xyz4");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "no match");
}

#[test]
fn unknown_fixture_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run(dir.path(), "no-such-fixture", b"");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn list_shows_builtins_and_config_fixtures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("fixtures.toml");
    fs::write(
        &cfg,
        "[[fixture]]\nname = \"extra\"\nlength = { at_least = 1 }\nprefix = \"q\"\ncompare = \"exact\"\n",
    )
    .expect("write config");

    let out = Command::new(env!("CARGO_BIN_EXE_faultbait"))
        .arg("list")
        .env("FAULTBAIT_CONFIG", &cfg)
        .output()
        .expect("spawn runner");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for name in ["xyz-counted", "abc-exact", "xyz-native", "xyz-heap", "fuzz-canary", "extra"] {
        assert!(stdout.lines().any(|l| l.starts_with(name)), "missing {name} in\n{stdout}");
    }
}

#[test]
fn json_log_format_initialises_logging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("input.bin");
    fs::write(&path, b"xyz9pad").expect("write input");
    let out = Command::new(env!("CARGO_BIN_EXE_faultbait"))
        .arg("xyz-counted")
        .arg(&path)
        .env("RUST_LOG", "debug")
        .env("FAULTBAIT_LOG_FORMAT", "json")
        .output()
        .expect("spawn runner");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("logging disabled"), "{stderr}");
    assert!(
        stderr.lines().any(|l| l.starts_with('{') && l.contains("input is benign")),
        "no json log line in\n{stderr}"
    );
}
