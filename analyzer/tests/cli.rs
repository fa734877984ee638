use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const BIN: &str = "shard-plot";
const SEC: i64 = 1_000_000_000;

fn shard_plot() -> Command {
    let mut command = Command::cargo_bin(BIN).unwrap();
    command.env("RUST_LOG", "info");
    command
}

// `count timestamp` lines, one sample per second with a constant rate.
fn write_throughput_log(dir: &Path, partition: u32, rate: i64, seconds: i64) {
    let content = (0..=seconds)
        .map(|s| format!("{} {}\n", s * rate, s * SEC))
        .collect::<String>();
    fs::write(dir.join(format!("tput-partition-{partition}.txt")), content).unwrap();
}

#[test]
fn throughput_should_write_aggregated_report() {
    let dir = tempfile::tempdir().unwrap();
    write_throughput_log(dir.path(), 1, 10, 5);
    write_throughput_log(dir.path(), 2, 30, 5);

    shard_plot()
        .arg("throughput")
        .arg("2")
        .arg(dir.path())
        .args(["--relocation", "none", "--format", "json", "--format", "html"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Throughput results"));

    let report = fs::read_to_string(dir.path().join("tput-aggregated.json")).unwrap();
    assert!(report.contains("\"total_events\": 200"));
    assert!(dir.path().join("tput-aggregated.html").exists());
    assert!(dir.path().join("tput-partition-1.json").exists());
    assert!(dir.path().join("tput-partition-2.html").exists());
}

#[test]
fn throughput_should_render_svg_by_default() {
    let dir = tempfile::tempdir().unwrap();
    write_throughput_log(dir.path(), 1, 10, 5);
    write_throughput_log(dir.path(), 2, 30, 5);

    shard_plot()
        .arg("throughput")
        .arg("2")
        .arg(dir.path())
        .args(["--relocation", "none", "--bucket-width", "1"])
        .assert()
        .success();

    for name in [
        "tput-aggregated.svg",
        "tput-partition-1.svg",
        "tput-partition-2.svg",
    ] {
        let svg = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(svg.contains("<svg"), "{name} is not an SVG image");
    }
    assert!(!dir.path().join("tput-aggregated.json").exists());
}

#[test]
fn repeated_format_should_be_written_once() {
    let dir = tempfile::tempdir().unwrap();
    write_throughput_log(dir.path(), 1, 10, 5);

    shard_plot()
        .arg("throughput")
        .arg("1")
        .arg(dir.path())
        .args(["--relocation", "none", "--no-partition-charts"])
        .args(["-f", "json", "-f", "svg", "-f", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated json output").count(1));
}

#[test]
fn throughput_should_fail_on_missing_partition_log() {
    let dir = tempfile::tempdir().unwrap();
    write_throughput_log(dir.path(), 1, 10, 5);

    shard_plot()
        .arg("throughput")
        .arg("2")
        .arg(dir.path())
        .args(["--relocation", "none", "--format", "json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("tput-partition-2.txt"));
}

#[test]
fn accounts_should_print_count_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("transfers.log");
    fs::write(
        &log,
        "Transfer from A to B\nTransfer from B to C\nnoise line\nTransfer from A to D\n",
    )
    .unwrap();

    shard_plot()
        .arg("accounts")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::eq("4\n"));
}

#[test]
fn cdf_should_dump_latency_report() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("replay.txt");
    let content = (1..=100)
        .map(|i| format!("sendTx {} {} false\n", i * SEC, i * SEC + i * 1_000_000))
        .collect::<String>();
    fs::write(&log, content).unwrap();
    let output = dir.path().join("latency");

    shard_plot()
        .arg("cdf")
        .arg(&log)
        .args(["--trim-low", "0.1", "--trim-high", "0.9", "--format", "json"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report = fs::read_to_string(dir.path().join("latency.json")).unwrap();
    assert!(report.contains("\"samples\": 100"));
    assert!(report.contains("\"trimmed_samples\": 80"));
}

#[test]
fn invalid_trim_should_be_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("replay.txt");
    fs::write(&log, "sendTx 1 2 false\n").unwrap();

    shard_plot()
        .arg("cdf")
        .arg(&log)
        .args(["--trim-low", "0.9", "--trim-high", "0.1", "--format", "json"])
        .assert()
        .failure();
}

#[test]
fn examples_should_print_usage() {
    shard_plot()
        .arg("examples")
        .assert()
        .success()
        .stdout(predicate::str::contains("shard-plot throughput"));
}
