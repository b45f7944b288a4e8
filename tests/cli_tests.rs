use std::process::{Command, Output};

fn kaban(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kaban"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute process")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_json_projection() {
    let output = kaban(&[
        "json",
        "name=kaban",
        "n:int=-3",
        "tags:strs=a,b",
        "flag:bool=true",
        "nothing:null",
    ]);

    assert!(output.status.success(), "json command failed: {output:?}");
    assert_eq!(
        stdout(&output),
        r#"{"flag":true,"n":-3,"name":"kaban","nothing":null,"tags":["a","b"]}"#
    );
}

#[test]
fn test_repeated_key_overwrites() {
    let output = kaban(&["json", "k:uint=1", "k:uint=2"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), r#"{"k":2}"#);
}

#[test]
fn test_get_prints_value_as_json() {
    let output = kaban(&["get", "when", "when:time=2024-01-02T03:04:05+09:00"]);

    assert!(output.status.success(), "get command failed: {output:?}");
    assert_eq!(stdout(&output), r#""2024-01-02T03:04:05+09:00""#);
}

#[test]
fn test_get_missing_key_fails() {
    let output = kaban(&["get", "ghost", "a=1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ghost"), "unexpected stderr: {stderr}");
}

#[test]
fn test_dump_shows_tombstone() {
    let output = kaban(&["dump", "a:int=1", "a:int=2"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], "0000|FF 31 FE FA 32 FE");
}

#[test]
fn test_info_reports_dead_bytes() {
    let output = kaban(&["--capacity", "4k", "info", "a=xy", "a=z"]);

    assert!(output.status.success(), "info command failed: {output:?}");
    let stdout = stdout(&output);
    assert!(stdout.contains("LIVE KEYS:"));
    assert!(stdout.contains("4 bytes"), "unexpected info output: {stdout}");
}

#[test]
fn test_json_gzip_writes_file() {
    let path = std::env::temp_dir().join(format!("kaban-cli-{}.json.gz", std::process::id()));
    let path_arg = path.to_string_lossy().to_string();

    let output = kaban(&["json", "--gzip", &path_arg, "k:ints=1,2"]);
    assert!(output.status.success(), "gzip command failed: {output:?}");

    let compressed = std::fs::read(&path).unwrap();
    let json = kaban::utils::decompress_gzip(&compressed).unwrap();
    assert_eq!(json, br#"{"k":[1,2]}"#);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_invalid_assignment_is_rejected() {
    let output = kaban(&["json", "n:int=abc"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_colon_in_key_needs_explicit_kind() {
    let help = kaban(&["--help"]);
    assert!(stdout(&help).contains("a:b:str=c"));

    let rejected = kaban(&["json", "a:b=c"]);
    assert!(!rejected.status.success());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("key:str=value"));

    let output = kaban(&["json", "a:b:str=c"]);
    assert!(output.status.success(), "json command failed: {output:?}");
    assert_eq!(stdout(&output), r#"{"a:b":"c"}"#);
}
