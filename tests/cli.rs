use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const PROBLEM: &str = r#"{
  "slots": 2,
  "items": [
    { "id": "a", "name": "Alpha" },
    { "id": "b" },
    { "id": "c" },
    { "id": "d" }
  ],
  "forbidden": [
    { "item": "a", "slot": 1 }
  ]
}"#;

fn slotpick(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slotpick"))
        .arg("-q")
        .args(args)
        .output()
        .expect("run slotpick")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn write_problem(tag: &str) -> PathBuf {
    let root = temp_dataset_dir(tag);
    fs::create_dir_all(&root).expect("mkdir");
    let path = root.join("problem.json");
    fs::write(&path, PROBLEM).expect("write problem");
    path
}

#[test]
fn assign_takes_positional_file_and_time_limit() {
    let path = write_problem("assign");
    let file = path.to_str().expect("utf8 path");
    let out = slotpick(&["assign", file, "--seed", "3", "--time_limit_ms", "50"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let text = stdout(&out);
    assert!(text.starts_with("run=0 seed=3 slots=2 "));
    assert!(text.contains("slot=1 item="));
    assert!(text.contains("slot=2 item="));
    assert!(!text.contains("slot=1 item=a\n"));
}

#[test]
fn assign_repeats_and_slot_override() {
    let path = write_problem("repeats");
    let file = path.to_str().expect("utf8 path");
    let out = slotpick(&[
        "assign",
        file,
        "--slots",
        "3",
        "--order",
        "most-constrained",
        "--repeats",
        "2",
    ]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("run=1 "));
    assert_eq!(text.matches("slot=3 item=").count(), 2);
}

#[test]
fn sample_and_pick_one_read_the_item_list() {
    let path = write_problem("sample");
    let file = path.to_str().expect("utf8 path");

    let out = slotpick(&["sample", file, "--k", "2", "--seed", "1"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("seed=1 k=2 of=4\n"));
    let picked = text
        .lines()
        .find_map(|l| l.strip_prefix("items="))
        .expect("items line");
    assert_eq!(picked.split(',').count(), 2);

    let out = slotpick(&["pick-one", file, "--seed", "1"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("item="));

    let out = slotpick(&["sample", file, "--k", "5"]);
    assert!(!out.status.success());
}

#[test]
fn check_accepts_valid_and_rejects_forbidden() {
    let path = write_problem("check");
    let file = path.to_str().expect("utf8 path");

    let out = slotpick(&["check", file, "--assignment", "b,a"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "VALID slots=2\n");

    let out = slotpick(&["check", file, "--assignment", "a,b"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("forbidden"));
}

#[test]
fn dashed_time_limit_flag_is_rejected() {
    let path = write_problem("flag");
    let file = path.to_str().expect("utf8 path");
    let out = slotpick(&["assign", file, "--time-limit-ms", "50"]);
    assert!(!out.status.success());
}

fn temp_dataset_dir(tag: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    p.push(format!("slotpick_{}_{}", tag, t));
    p
}
