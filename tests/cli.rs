use std::fs;
use std::net::TcpListener;
use std::process::Command;

fn ntlmrecon() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ntlmrecon"))
}

#[test]
fn no_input_is_reported_on_stderr_and_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = ntlmrecon().current_dir(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[-]"), "stderr was: {}", stderr);
    assert!(stderr.contains("Please specify either an input or an input file"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("[-]"));
}

#[test]
fn silent_run_without_hits_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    fs::write(&words, "EWS\nowa\n").unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let output = ntlmrecon()
        .current_dir(dir.path())
        .args(["--silent", "-o", "stdout", "--timeout", "2", "--wordlist"])
        .arg(&words)
        .args(["-i", &format!("http://{}", closed)])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty(), "stdout was: {}", String::from_utf8_lossy(&output.stdout));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_wordlist_is_a_hard_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = ntlmrecon()
        .current_dir(dir.path())
        .args(["-i", "example.com", "-o", "stdout", "--wordlist"])
        .arg(dir.path().join("absent-words.txt"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[-]") && stderr.contains("Unable to read wordlist"), "stderr was: {}", stderr);
}
