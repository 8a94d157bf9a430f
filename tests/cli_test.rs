use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::process::Command; // Run programs

const ARCHIVE: &str = r#"[
    {"name":"$.!BOOT","size":10,"data":[67,72,65,73,78,34,80,82,79,71]},
    {"name":"W.DATA/1","size":0,"data":[]}
]"#;

#[test]
fn unpack_archive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let archive = dir.path().join("disc.json");
    std::fs::write(&archive,ARCHIVE)?;
    let out = dir.path().join("files");
    let mut cmd = Command::cargo_bin("bbcdump")?;
    cmd.arg("unpack")
        .arg("-a").arg(&archive)
        .arg("-o").arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("unpacked 2 files"));
    assert_eq!(std::fs::read(out.join("$.!BOOT"))?,b"CHAIN\"PROG");
    assert_eq!(std::fs::read(out.join("W.DATA_1"))?.len(),0);
    Ok(())
}

#[test]
fn unpack_rejects_bad_size() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let archive = dir.path().join("disc.json");
    std::fs::write(&archive,r#"[{"name":"X","size":2,"data":[1]}]"#)?;
    let mut cmd = Command::cargo_bin("bbcdump")?;
    cmd.arg("unpack")
        .arg("-a").arg(&archive)
        .arg("-o").arg(dir.path().join("files"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("SizeMismatch"));
    Ok(())
}

#[test]
fn completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bbcdump")?;
    cmd.arg("completions")
        .arg("-s").arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("bbcdump"));
    Ok(())
}

#[test]
fn invalid_parity() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bbcdump")?;
    cmd.arg("catalog")
        .arg("--parity").arg("mark")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mark"));
    Ok(())
}

#[test]
fn missing_port() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("bbcdump")?;
    cmd.arg("catalog")
        .arg("-p").arg(dir.path().join("no-such-tty"))
        .assert()
        .failure();
    Ok(())
}

#[test]
fn no_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bbcdump")?;
    cmd.assert().failure();
    Ok(())
}
