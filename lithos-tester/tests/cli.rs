use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "lithos-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_strategies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_lithos-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-strategies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available strategies"));
    assert!(content.contains("artisan"));
}

#[test]
fn cli_json_report_is_parseable() {
    let exe = env!("CARGO_BIN_EXE_lithos-tester");
    let output_path = temp_path("json");
    let output = Command::new(exe)
        .args([
            "--strategies",
            "gatherer,random",
            "--seeds",
            "1,LT-KINO07",
            "--days",
            "3",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Lithos Automated Tester"));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(value["playthroughs"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["aggregates"][0]["strategy"], "Gatherer");
    assert!(
        value["playthroughs"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p["share_code"] == "LT-KINO07")
    );
}

#[test]
fn cli_rejects_unknown_seed_tokens() {
    let exe = env!("CARGO_BIN_EXE_lithos-tester");
    let output = Command::new(exe)
        .args(["--seeds", "definitely-not-a-seed"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unrecognized seed token"));
}
