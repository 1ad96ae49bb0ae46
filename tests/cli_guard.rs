use assert_cmd::Command;

#[test]
fn refuses_to_run_without_a_tty() {
    let assert = Command::cargo_bin("guess-the-word")
        .unwrap()
        .write_stdin("")
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("stdin must be a tty"), "stderr was: {stderr}");
}

#[test]
fn prints_help() {
    let assert = Command::cargo_bin("guess-the-word")
        .unwrap()
        .arg("--help")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("--seed"));
    assert!(stdout.contains("--log-file"));
}
