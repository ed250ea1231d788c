//! Tests for `ghpm install`

use super::common::*;
use predicates::prelude::*;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread")]
async fn test_install_downloads_and_records() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v2", &["widget.bin"]).await;
    mount_asset(&server, "widget.bin", b"widget bytes").await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());

    ctx.ghpm()
        .args(["install", "acme/widget"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("latest tag: v2"))
        .stdout(predicate::str::contains(format!(
            "1. {}",
            asset_url(&server, "widget.bin")
        )))
        .stdout(predicate::str::contains("Finished downloading widget.bin."));

    assert_eq!(
        ctx.read_manifest(),
        "[widget]\nowner = \"acme\"\nversion = \"v2\"\n"
    );
    assert_eq!(
        std::fs::read(ctx.temp.path().join("widget.bin")).unwrap(),
        b"widget bytes"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_keeps_other_packages_sorted() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "Beta", "v3", &["beta.tar.gz"]).await;
    mount_asset(&server, "beta.tar.gz", b"beta").await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());
    ctx.write_manifest(
        "[Zeta]\nowner = \"z\"\nversion = \"v1\"\n\n[alpha]\nowner = \"a\"\nversion = \"v1\"\n",
    );

    ctx.ghpm()
        .args(["install", "acme/Beta"])
        .write_stdin("1\n")
        .assert()
        .success();

    let manifest = ctx.read_manifest();
    let alpha = manifest.find("[alpha]").unwrap();
    let beta = manifest.find("[Beta]").unwrap();
    let zeta = manifest.find("[Zeta]").unwrap();
    assert!(alpha < beta && beta < zeta, "unexpected order:\n{}", manifest);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_reprompts_on_invalid_input() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v2", &["a.zip", "b.zip"]).await;
    mount_asset(&server, "b.zip", b"b").await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());

    ctx.ghpm()
        .args(["install", "acme/widget"])
        .write_stdin("zero\n3\n2\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Invalid input. Please enter a number between 1 and 2.")
                .count(2),
        );

    assert!(ctx.temp.path().join("b.zip").exists());
    assert!(!ctx.temp.path().join("a.zip").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_without_assets_records_nothing() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v2", &[]).await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());

    ctx.ghpm()
        .args(["install", "acme/widget"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("There is no binary asset."))
        .stderr(predicate::str::contains("Cancelled"));

    assert!(!ctx.manifest_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_cancelled_when_stdin_closes() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v2", &["widget.bin"]).await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());

    ctx.ghpm()
        .args(["install", "acme/widget"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cancelled"));

    assert!(!ctx.manifest_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_repository_without_releases() {
    let server = MockServer::start().await;
    mount_status(&server, "acme", "widget", 404).await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());

    ctx.ghpm()
        .args(["install", "acme/widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No releases found for acme/widget"));

    assert!(!ctx.manifest_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_recovers_corrupt_manifest() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v2", &["widget.bin"]).await;
    mount_asset(&server, "widget.bin", b"w").await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());
    ctx.write_manifest("this is = = not toml");

    ctx.ghpm()
        .args(["install", "acme/widget"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning"));

    assert_eq!(
        ctx.read_manifest(),
        "[widget]\nowner = \"acme\"\nversion = \"v2\"\n"
    );
    let backup = ctx.temp.path().join("packages.toml.bak");
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "this is = = not toml"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_warns_when_backup_cannot_be_written() {
    let server = MockServer::start().await;
    mount_release(&server, "acme", "widget", "v2", &["widget.bin"]).await;
    mount_asset(&server, "widget.bin", b"w").await;

    let ctx = TestContext::new();
    ctx.write_config(&server.uri());
    ctx.write_manifest("this is = = not toml");
    std::fs::create_dir(ctx.temp.path().join("packages.toml.bak")).unwrap();

    ctx.ghpm()
        .args(["install", "acme/widget"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("could not save previous manifest"));

    assert_eq!(
        ctx.read_manifest(),
        "[widget]\nowner = \"acme\"\nversion = \"v2\"\n"
    );
}

#[test]
fn test_install_rejects_malformed_target() {
    let ctx = TestContext::new();
    ctx.write_config("http://127.0.0.1:1");

    ctx.ghpm()
        .args(["install", "widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target 'widget'"));
}
