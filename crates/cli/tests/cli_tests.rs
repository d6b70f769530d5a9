use assert_cmd::Command;
use predicates::prelude::*;

fn natura() -> Command {
    let mut cmd = Command::cargo_bin("natura").unwrap();
    for var in [
        "NATURA_DATABASE_URL",
        "PLANTNET_API_KEY",
        "NATURA_COOKIE_KEY",
        "MICROSOFT_CLIENT_ID",
        "MICROSOFT_CLIENT_SECRET",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help() {
    natura()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant identification and collection server"));
}

#[test]
fn test_cli_serve_help() {
    natura()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port"))
        .stdout(predicate::str::contains("PLANTNET_API_KEY"));
}

#[test]
fn test_serve_requires_plantnet_key() {
    natura()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("plantnet-api-key"));
}

#[test]
fn test_serve_rejects_short_cookie_key() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("natura.db").display());
    natura()
        .env("PLANTNET_API_KEY", "test-key")
        .env("NATURA_COOKIE_KEY", "short")
        .args(["--database-url", &url, "serve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NATURA_COOKIE_KEY"));
}

#[test]
fn test_migrate_creates_sqlite_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("natura.db");
    let url = format!("sqlite://{}?mode=rwc", db.display());

    natura()
        .args(["--database-url", &url, "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrations applied (sqlite)"));
    assert!(db.exists());

    natura().env("NATURA_DATABASE_URL", &url).arg("migrate").assert().success();
}
