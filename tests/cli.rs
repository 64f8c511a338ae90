// tests/cli.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn domain_finder() -> Command {
    let mut cmd = Command::cargo_bin("domain-finder").unwrap();
    // keep a developer's .env or shell settings out of the run
    for key in [
        "DOMAIN_FINDER_MAX_WORKERS",
        "DOMAIN_FINDER_TIMEOUT",
        "DOMAIN_FINDER_RETRY_ATTEMPTS",
        "DOMAIN_FINDER_RETRY_BACKOFF_MS",
        "DOMAIN_FINDER_RESOLVER",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn write_temp(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write to temp file");
    file
}

#[test]
fn test_help_lists_subcommands() {
    domain_finder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("--workers"));
}

#[test]
fn test_generate_json() {
    let output = domain_finder()
        .args(["generate", "--count", "3", "--length", "4", "--tld", "com,io", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names.len(), 6);
    for name in &names {
        let (base, tld) = name.split_once('.').unwrap();
        assert_eq!(base.len(), 4);
        assert!(tld == "com" || tld == "io");
    }
}

#[test]
fn test_generate_pattern_and_prefix() {
    domain_finder()
        .args(["generate", "-n", "5", "-l", "5", "--pattern", "CVCVC", "--prefix", "zo"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^(zo[a-z]{3}\.com\n){5}$").unwrap());
}

#[test]
fn test_generate_rejects_out_of_range() {
    domain_finder().args(["generate", "--count", "0"]).assert().failure();
    domain_finder().args(["generate", "--length", "64"]).assert().failure();
}

#[test]
fn test_check_malformed_needs_no_network() {
    let list = write_temp("# candidates\nbad..com\n\n-nope.io # leading hyphen\n");

    let output = domain_finder()
        .args(["check", "no_underscores.com", "--json", "--file"])
        .arg(list.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["summary"]["unknown"], 3);
    assert_eq!(report["results"][0]["domain"], "-nope.io");
    assert_eq!(report["results"][1]["domain"], "bad..com");
    assert_eq!(report["results"][2]["domain"], "no_underscores.com");
}

#[test]
fn test_check_human_output() {
    domain_finder()
        .args(["check", "bad..com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("? bad..com UNKNOWN"))
        .stdout(predicate::str::contains("Total checked: 1"));
}

#[test]
fn test_check_without_domains_fails() {
    domain_finder()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no domains given"));
}

#[test]
fn test_invalid_worker_count_fails() {
    domain_finder()
        .args(["check", "bad..com", "--workers", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_workers"));
}

#[test]
fn test_config_file_is_validated() {
    let config = write_temp(r#"{"timeout": 30}"#);
    domain_finder()
        .args(["check", "bad..com", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout"));

    let broken = write_temp("{not json");
    domain_finder()
        .args(["check", "bad..com", "--config"])
        .arg(broken.path())
        .assert()
        .failure();
}

#[test]
fn test_flags_override_config_file() {
    let config = write_temp(r#"{"max_workers": 50}"#);
    domain_finder()
        .args(["check", "bad..com", "--workers", "4", "--config"])
        .arg(config.path())
        .assert()
        .success();
}

#[test]
fn test_unknown_resolver_rejected() {
    domain_finder()
        .args(["check", "bad..com", "--resolver", "bind"])
        .assert()
        .failure();
}

#[test]
fn test_verbose_prints_lookup_metrics() {
    domain_finder()
        .args(["check", "bad..com", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average check time"));

    domain_finder()
        .args(["check", "bad..com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average check time").not());
}
