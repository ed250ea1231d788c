//! Tests for `ghpm list`

use super::common::*;
use predicates::prelude::*;
use wiremock::MockServer;

fn row(name: &str, owner: &str, version: &str, available: &str) -> String {
    format!(
        "{:<40} {:<30} {:<15} {:<15}",
        name, owner, version, available
    )
}

#[test]
fn test_list_without_manifest() {
    let ctx = TestContext::new();
    ctx.write_config("http://127.0.0.1:1");

    ctx.ghpm()
        .arg("list")
        .assert()
        .success()
        .stdout("No packages installed.\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_shows_newer_releases() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v1.1", &[]).await;
    mount_release(&server, "z", "Zeta", "v1", &[]).await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());
    ctx.write_manifest(
        "[Zeta]\nowner = \"z\"\nversion = \"v1\"\n\n[widget]\nowner = \"acme\"\nversion = \"v1.0\"\n",
    );

    let output = ctx.ghpm().arg("list").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], row("Name", "Owner", "Version", "Available"));
    assert_eq!(lines[1], "-".repeat(lines[0].len()));
    assert_eq!(lines[2], row("widget", "acme", "v1.0", "v1.1"));
    assert_eq!(lines[3], row("Zeta", "z", "v1", ""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_warns_about_unresolvable_rows() {
    let server = MockServer::start().await;
    mount_status(&server, "acme", "gone", 404).await;
    mount_release(&server, "acme", "widget", "v1", &[]).await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());
    ctx.write_manifest(
        "[gone]\nowner = \"acme\"\nversion = \"v1\"\n\n[widget]\nowner = \"acme\"\nversion = \"v1\"\n",
    );

    ctx.ghpm()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(row("gone", "acme", "v1", "")))
        .stdout(predicate::str::contains(row("widget", "acme", "v1", "")))
        .stderr(predicate::str::contains("could not check acme/gone").count(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_reads_legacy_author_field() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v2", &[]).await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());
    ctx.write_manifest("[widget]\nauthor = \"acme\"\nversion = \"v1\"\n");

    ctx.ghpm()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(row("widget", "acme", "v1", "v2")));
}

#[test]
fn test_list_corrupt_manifest_is_empty_with_warning() {
    let ctx = TestContext::new();
    ctx.write_config("http://127.0.0.1:1");
    ctx.write_manifest("[widget\nowner = ");

    ctx.ghpm()
        .arg("list")
        .assert()
        .success()
        .stdout("No packages installed.\n")
        .stderr(predicate::str::contains("Warning"));

    // Listing leaves the file alone
    assert_eq!(ctx.read_manifest(), "[widget\nowner = ");
}

#[test]
fn test_list_ignores_target_argument() {
    let ctx = TestContext::new();
    ctx.write_config("http://127.0.0.1:1");

    ctx.ghpm()
        .args(["list", "acme/widget"])
        .assert()
        .success()
        .stdout("No packages installed.\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_uses_manifest_path_from_config() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v1", &[]).await;

    let ctx = TestContext::new();
    let manifest = ctx.temp.path().join("elsewhere.toml");
    std::fs::write(&manifest, "[widget]\nowner = \"acme\"\nversion = \"v1\"\n").unwrap();
    ctx.write_config_with(&server.uri(), Some(&manifest));

    ctx.ghpm_bare()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(row("widget", "acme", "v1", "")));
}
