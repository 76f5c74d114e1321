#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Faultbait runner: feed one input to a fixture, outside any fuzzer.
//!
//! ```text
//! faultbait <fixture> [input-file]   # stdin when the file is omitted
//! faultbait list
//! faultbait version
//! ```
//!
//! `FAULTBAIT_CONFIG` names an extra fixture TOML file, `RUST_LOG` sets the
//! log filter and `FAULTBAIT_LOG_FORMAT=json` switches to JSON log lines.

use std::io::Read;

use anyhow::{anyhow, Context, Result};
use faultbait::core::types::Decision;
use faultbait::fixtures::FixtureSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);
    let res = if env("FAULTBAIT_LOG_FORMAT", "text") == "json" {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = res {
        eprintln!("faultbait: logging disabled: {e}");
    }
}

fn load_fixtures() -> Result<FixtureSet> {
    let mut set = FixtureSet::builtin();
    if let Ok(path) = std::env::var("FAULTBAIT_CONFIG") {
        let n = set
            .extend_from_file(&path)
            .with_context(|| format!("loading fixtures from {path}"))?;
        info!(path = %path, fixtures = n, "loaded fixture file");
    }
    Ok(set)
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(p) => std::fs::read(p).with_context(|| format!("reading {p}")),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn print_version() {
    println!(
        "faultbait {} (rustc {}, target {}, built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown"),
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
    );
}

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let cmd = args
        .next()
        .ok_or_else(|| anyhow!("usage: faultbait <fixture> [input-file] | list | version"))?;

    if cmd == "version" {
        print_version();
        return Ok(());
    }

    let set = load_fixtures()?;

    if cmd == "list" {
        for m in set.iter() {
            let faults: Vec<&str> = m.table().values().map(|c| c.name()).collect();
            println!("{}\t{}", m.name(), faults.join(","));
        }
        return Ok(());
    }

    let matcher = set
        .get(&cmd)
        .ok_or_else(|| anyhow!("unknown fixture {cmd:?}; try `faultbait list`"))?;
    let input_path = args.next();
    let data = read_input(input_path.as_deref())?;

    let head = &data[..data.len().min(8)];
    match matcher.classify(&data) {
        Decision::Fault(class) => info!(fixture = %cmd, fault = %class, head = %hex::encode(head), "input selects a fault"),
        other => debug!(fixture = %cmd, decision = ?other, head = %hex::encode(head), "input is benign"),
    }

    if matcher.evaluate(&data) {
        println!("match");
    } else {
        println!("no match");
    }
    Ok(())
}
