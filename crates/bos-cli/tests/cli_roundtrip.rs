use std::io::Write;
use std::process::{Command, Output, Stdio};

use bos::DecodeOptions;
use bos_cli::{inspect, pack, unpack};
use serde_json::json;

fn run(bin: &str, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("spawn {bin}: {e}"));
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn library_round_trip_matrix() {
    let cases = [
        json!(null),
        json!(true),
        json!(-300),
        json!(4294967290u64),
        json!(2.2),
        json!("this is a string"),
        json!([]),
        json!({"a": 1, "b": [true, null]}),
        json!({"bytes": "data:application/octet-stream;base64,AQE="}),
    ];
    for input in cases {
        let bytes = pack(&input.to_string()).unwrap();
        assert!(inspect(&bytes, DecodeOptions::default()).is_valid(), "{input}");
        let out = unpack(&bytes, DecodeOptions::default()).unwrap();
        let back: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back, input);
    }
}

#[test]
fn pack_and_unpack_binaries() {
    let packed = run(env!("CARGO_BIN_EXE_bos-pack"), &[], br#"{"key0": 1}"#);
    assert!(packed.status.success());
    assert_eq!(packed.stdout.len(), 13);

    let unpacked = run(env!("CARGO_BIN_EXE_bos-unpack"), &[], &packed.stdout);
    assert!(unpacked.status.success());
    let value: serde_json::Value = serde_json::from_slice(&unpacked.stdout).unwrap();
    assert_eq!(value, json!({"key0": 1}));
}

#[test]
fn validate_binary_exit_status() {
    let bin = env!("CARGO_BIN_EXE_bos-validate");

    let ok = run(bin, &["--explain", "--size"], &[5, 0, 0, 0, 0]);
    assert!(ok.status.success());
    let stdout = String::from_utf8(ok.stdout).unwrap();
    assert_eq!(stdout, "5\nvalid: declared size 5 (5 bytes supplied)\n");

    let bad = run(bin, &["--explain"], &[5, 0, 0, 0, 0x10]);
    assert!(!bad.status.success());
    let stdout = String::from_utf8(bad.stdout).unwrap();
    assert!(stdout.starts_with("invalid [UNKNOWN_TAG]"), "{stdout}");

    let trailing = [6, 0, 0, 0, 0, 0];
    assert!(run(bin, &[], &trailing).status.success());
    assert!(!run(bin, &["--exact-size"], &trailing).status.success());
}

#[test]
fn unpack_binary_legacy_flag() {
    let bin = env!("CARGO_BIN_EXE_bos-unpack");
    let data = [5, 0, 0, 0, 0x10];
    assert!(!run(bin, &[], &data).status.success());
    let legacy = run(bin, &["--legacy-null-tags"], &data);
    assert!(legacy.status.success());
    assert_eq!(String::from_utf8(legacy.stdout).unwrap(), "null\n");
}
