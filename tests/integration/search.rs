//! Tests for `ghpm search`

use super::common::TestContext;

#[test]
fn test_search_is_inert() {
    let ctx = TestContext::new();

    ctx.ghpm()
        .args(["search", "widget"])
        .assert()
        .success()
        .stdout("");

    assert!(!ctx.manifest_path().exists());
}
