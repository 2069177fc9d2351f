use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

fn utf16le_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

#[test]
fn e2e_scans_and_writes_csv() {
    let tmp = tempdir().unwrap();
    let indir = tmp.path().join("reports");
    let nested = indir.join("sub");
    fs::create_dir_all(&nested).unwrap();
    let out = tmp.path().join("out.csv");

    {
        let mut f = fs::File::create(indir.join("plain.wer")).unwrap();
        writeln!(f, "Sig[0].Value=notepad.exe").unwrap();
        writeln!(f, "Sig[1].Value=10.0.19041.1").unwrap();
        writeln!(f, "Sig[2].Value=5F2D9A00").unwrap();
        writeln!(f, "Sig[6].Value=c0000005").unwrap();
        writeln!(f, "EventType=APPCRASH").unwrap();
    }
    // Null-padded UTF-16LE flavored report, as WER commonly writes them
    fs::write(
        nested.join("padded.wer"),
        utf16le_bytes("AppName=contoso.exe\r\nAppVersion=1.0.0.1\r\n"),
    )
    .unwrap();
    fs::write(indir.join("unrelated.txt"), "EventType=IGNORED").unwrap();

    let mut cmd = Command::cargo_bin("wer-parser").unwrap();
    cmd.arg(&indir).arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scan Summary"))
        .stdout(predicate::str::contains("Report files discovered: 2"))
        .stdout(predicate::str::contains("Reports retained: 2"));

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Report Path,Application Name,Application Version"));
    assert_eq!(lines.count(), 2);
    assert!(content.contains("notepad.exe"));
    assert!(content.contains("2020-08-07 18:14:24"));
    assert!(content.contains("contoso.exe"));
    assert!(content.contains("1.0.0.1"));
    assert!(!content.contains("IGNORED"));
}

#[test]
fn no_reports_means_no_csv_and_exit_zero() {
    let tmp = tempdir().unwrap();
    let indir = tmp.path().join("empty");
    fs::create_dir_all(&indir).unwrap();
    let out = tmp.path().join("out.csv");

    let mut cmd = Command::cargo_bin("wer-parser").unwrap();
    cmd.arg(&indir).arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Report files discovered: 0"));
    assert!(!out.exists());
}

#[test]
fn missing_input_directory_exits_zero() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("out.csv");

    let mut cmd = Command::cargo_bin("wer-parser").unwrap();
    cmd.arg(tmp.path().join("does-not-exist")).arg(&out);
    cmd.assert().success();
    assert!(!out.exists());
}

#[test]
fn uninformative_reports_are_skipped() {
    let tmp = tempdir().unwrap();
    let indir = tmp.path().join("reports");
    fs::create_dir_all(&indir).unwrap();
    let out = tmp.path().join("out.csv");

    fs::write(indir.join("noise.wer"), "UnrecognizedKey=value\n").unwrap();

    let mut cmd = Command::cargo_bin("wer-parser").unwrap();
    cmd.arg(&indir).arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Skipped (no information): 1"));
    assert!(!out.exists());
}

#[test]
fn unwritable_output_causes_non_zero_exit() {
    let tmp = tempdir().unwrap();
    let indir = tmp.path().join("reports");
    fs::create_dir_all(&indir).unwrap();
    fs::write(indir.join("crash.wer"), "EventType=APPCRASH\n").unwrap();
    // A directory cannot be created as the output file
    let out = tmp.path().join("outdir");
    fs::create_dir_all(&out).unwrap();

    let mut cmd = Command::cargo_bin("wer-parser").unwrap();
    cmd.arg(&indir).arg(&out);
    cmd.assert().failure();
}

#[test]
fn missing_arguments_exit_non_zero_with_usage() {
    let mut cmd = Command::cargo_bin("wer-parser").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn mmap_threshold_flag_is_accepted() {
    let tmp = tempdir().unwrap();
    let indir = tmp.path().join("reports");
    fs::create_dir_all(&indir).unwrap();
    let out = tmp.path().join("out.csv");
    fs::write(
        indir.join("crash.wer"),
        "Sig[0].Value=app.exe\nEventType=APPCRASH\n",
    )
    .unwrap();

    // Tiny threshold forces the mmap read path
    let mut cmd = Command::cargo_bin("wer-parser").unwrap();
    cmd.arg(&indir)
        .arg(&out)
        .arg("--mmap-threshold")
        .arg("1")
        .arg("-q");
    cmd.assert().success();
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("app.exe"));
}
