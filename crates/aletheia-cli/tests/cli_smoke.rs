use std::fs;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn aletheia(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aletheia"))
        .args(args)
        .output()
        .expect("run aletheia")
}

fn line_value(stdout: &str, prefix: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_else(|| panic!("missing `{prefix}` in output:\n{stdout}"))
}

#[test]
fn compile_then_verify_reproduces_hashes() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("cert.json");
    let out_str = out.to_str().expect("utf8 path");
    let compiled = aletheia(&[
        "compile",
        "--seed",
        "smoke",
        "--trials",
        "300",
        "--workers",
        "2",
        "--program-hash",
        "0xabc",
        "--machine",
        "ci",
        "--out",
        out_str,
    ]);
    assert!(compiled.status.success(), "{}", String::from_utf8_lossy(&compiled.stderr));
    let stdout = String::from_utf8(compiled.stdout).expect("utf8");
    let cert_hash = line_value(&stdout, "Certificate hash:");
    let file_hash = line_value(&stdout, "File sha256:");

    let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(doc["programHash"], "0xabc");
    assert_eq!(doc["claims"].as_array().map(Vec::len), Some(2));
    assert_eq!(doc["claims"][0]["results"]["trialsRun"], 300);

    let verified = aletheia(&["verify", out_str, "--expect", &file_hash]);
    assert!(verified.status.success());
    let stdout = String::from_utf8(verified.stdout).expect("utf8");
    assert_eq!(line_value(&stdout, "Computed certificate hash:"), cert_hash);
    assert_eq!(line_value(&stdout, "File sha256:"), file_hash);
}

#[test]
fn verify_rejects_a_tampered_file() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("cert.json");
    let out_str = out.to_str().expect("utf8 path");
    let compiled = aletheia(&["compile", "--seed", "s", "--trials", "50", "--out", out_str]);
    assert!(compiled.status.success());
    let stdout = String::from_utf8(compiled.stdout).expect("utf8");
    let file_hash = line_value(&stdout, "File sha256:");

    let text = fs::read_to_string(&out).unwrap().replacen("\"1.0\"", "\"1.0\" ", 1);
    fs::write(&out, text).unwrap();
    assert!(!aletheia(&["verify", out_str, "--expect", &file_hash]).status.success());

    fs::write(&out, "{}").unwrap();
    assert!(!aletheia(&["verify", out_str]).status.success());
}

#[test]
fn show_bug_reports_the_faulty_sort() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("cert.json");
    let output = aletheia(&[
        "compile",
        "--seed",
        "bug",
        "--trials",
        "2000",
        "--show-bug",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Bug caught in buggy_quicksort"), "{stdout}");
}

#[test]
fn claims_file_drives_compile() {
    let dir = tempdir().expect("tempdir");
    let claims = dir.path().join("claims.yaml");
    fs::write(
        &claims,
        r#"
claims:
  - implementation: quicksort3
    claim:
      id: AllEqual@quicksort3
      proposition: quicksort3 keeps runs of equal values
      domain: { name: int_array, params: { nmin: 1, nmax: 64 } }
      adversary: all_equal
      oracle: sort_correctness
      trials: 40
"#,
    )
    .unwrap();
    let out = dir.path().join("cert.json");
    let output = aletheia(&[
        "compile",
        "--seed",
        "yaml",
        "--claims",
        claims.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(doc["claims"][0]["id"], "AllEqual@quicksort3");
    assert_eq!(doc["claims"][0]["results"]["trialsRun"], 40);
}

#[test]
fn unknown_implementation_in_claims_file_fails() {
    let dir = tempdir().expect("tempdir");
    let claims = dir.path().join("claims.yaml");
    fs::write(
        &claims,
        r#"
claims:
  - implementation: timsort
    claim:
      id: X
      proposition: x
      domain: { name: d }
      adversary: dup_heavy_small
      oracle: sort_correctness
"#,
    )
    .unwrap();
    let output = aletheia(&[
        "compile",
        "--seed",
        "s",
        "--claims",
        claims.to_str().unwrap(),
        "--out",
        dir.path().join("c.json").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("timsort"));
}
