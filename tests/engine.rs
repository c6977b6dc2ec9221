use std::fs;
use std::io::Write;
use std::path::Path;

use ntlmrecon::{run_with_probe, Discovery, OutputType, RunConfig};

fn discovery(url: &str) -> Discovery {
    Discovery {
        url: url.to_string(),
        domain: "CORP".into(),
        server: "EXCH01".into(),
        dns_domain: "corp.example.com".into(),
        fqdn: "exch01.corp.example.com".into(),
        parent: "example.com".into(),
    }
}

fn wordlist_file(dir: &Path, entries: &[&str]) -> std::path::PathBuf {
    let path = dir.join("words.txt");
    fs::write(&path, entries.join("\n")).unwrap();
    path
}

#[test]
fn only_the_matching_endpoint_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("ntlmrecon.json");
    let config = RunConfig {
        input: Some("example.com".into()),
        wordlist: Some(wordlist_file(dir.path(), &["ntlmrecon1", "/ntlmrecon2"])),
        outfile: Some(outfile.clone()),
        threads: 2,
        silent: true,
        ..Default::default()
    };

    let probe = |url: &str| url.ends_with("/ntlmrecon2").then(|| discovery(url));
    let summary = run_with_probe(&config, &probe).unwrap();
    assert_eq!(summary.targets, 1);
    assert_eq!(summary.probes, 2);
    assert_eq!(summary.discoveries, 1);

    let content = fs::read_to_string(&outfile).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["url"], "https://example.com/ntlmrecon2");
    assert_eq!(record["domain"], "CORP");
    assert_eq!(record["server"], "EXCH01");
    assert_eq!(record["dns_domain"], "corp.example.com");
    assert_eq!(record["fqdn"], "exch01.corp.example.com");
    assert_eq!(record["parent"], "example.com");
}

#[test]
fn csv_run_over_a_target_file_has_one_header() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("targets.txt");
    let mut targets = fs::File::create(&infile).unwrap();
    writeln!(targets, "owa.corp.example.com").unwrap();
    writeln!(targets, "garbage token").unwrap();
    writeln!(targets, "10.0.0.8/31").unwrap();
    drop(targets);

    let outfile = dir.path().join("found.csv");
    let config = RunConfig {
        infile: Some(infile),
        wordlist: Some(wordlist_file(dir.path(), &["/EWS/", "/rpc"])),
        output_type: OutputType::Csv,
        outfile: Some(outfile.clone()),
        threads: 4,
        silent: true,
        ..Default::default()
    };

    let probe = |url: &str| url.ends_with("/EWS/").then(|| discovery(url));
    let summary = run_with_probe(&config, &probe).unwrap();
    assert_eq!(summary.targets, 3);
    assert_eq!(summary.discoveries, 3);

    let content = fs::read_to_string(&outfile).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "URL,AD Domain Name,Server Name,DNS Domain Name,FQDN,Parent DNS Domain"
    );
    assert_eq!(content.matches("URL,AD Domain Name").count(), 1);
    assert_eq!(
        &lines[1..],
        &[
            "https://owa.corp.example.com/EWS/,CORP,EXCH01,corp.example.com,exch01.corp.example.com,example.com",
            "https://10.0.0.8/EWS/,CORP,EXCH01,corp.example.com,exch01.corp.example.com,example.com",
            "https://10.0.0.9/EWS/,CORP,EXCH01,corp.example.com,exch01.corp.example.com,example.com",
        ]
    );
}

#[test]
fn missing_target_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("ntlmrecon.json");
    let config = RunConfig {
        infile: Some(dir.path().join("nope.txt")),
        outfile: Some(outfile.clone()),
        silent: true,
        ..Default::default()
    };

    let probe = |url: &str| Some(discovery(url));
    let summary = run_with_probe(&config, &probe).unwrap();
    assert_eq!(summary.targets, 0);
    assert!(!outfile.exists());
}

#[test]
fn previous_output_is_replaced_unless_forced() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("ntlmrecon.json");
    let words = wordlist_file(dir.path(), &["owa"]);
    let probe = |url: &str| Some(discovery(url));

    fs::write(&outfile, "{\"url\":\"stale\"}\n").unwrap();
    let fresh = RunConfig {
        input: Some("mail.example.com".into()),
        wordlist: Some(words.clone()),
        outfile: Some(outfile.clone()),
        silent: true,
        ..Default::default()
    };
    run_with_probe(&fresh, &probe).unwrap();
    let content = fs::read_to_string(&outfile).unwrap();
    assert!(!content.contains("stale"));
    assert_eq!(content.lines().count(), 1);

    let forced = RunConfig { force: true, ..fresh };
    run_with_probe(&forced, &probe).unwrap();
    assert_eq!(fs::read_to_string(&outfile).unwrap().lines().count(), 2);
}

#[test]
fn targets_without_hits_leave_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("ntlmrecon.csv");
    let config = RunConfig {
        input: Some("https://intranet.example.com".into()),
        wordlist: Some(wordlist_file(dir.path(), &["a", "b", "c"])),
        output_type: OutputType::Csv,
        outfile: Some(outfile.clone()),
        silent: true,
        ..Default::default()
    };

    let probe = |_: &str| -> Option<Discovery> { None };
    let summary = run_with_probe(&config, &probe).unwrap();
    assert_eq!(summary.probes, 3);
    assert!(!outfile.exists());
}

#[test]
fn unreadable_wordlist_is_a_hard_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        input: Some("example.com".into()),
        wordlist: Some(dir.path().join("missing-words.txt")),
        outfile: Some(dir.path().join("out.json")),
        silent: true,
        ..Default::default()
    };

    let probe = |_: &str| -> Option<Discovery> { None };
    assert!(matches!(
        run_with_probe(&config, &probe),
        Err(ntlmrecon::ReconError::Wordlist { .. })
    ));
}
