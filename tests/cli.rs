use std::fs;
use std::process::Command;

fn storefront() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_storefront"));
    for key in [
        "STOREFRONT_BASE_URL",
        "STOREFRONT_ASSET_ROOT",
        "STOREFRONT_EXTERNAL_LINK",
        "STOREFRONT_EXTERNAL_SVG",
        "STOREFRONT_USER_AGENT",
        "STOREFRONT_PLACEHOLDER_COUNT",
        "STOREFRONT_REQUEST_TIMEOUT_MS",
        "STOREFRONT_SIDEBAR_MENUS",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn render_with_broken_layout_writes_error_page_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("storefront.toml");
    fs::write(&cfg, "sections = [\"kotatsu\"]\n").unwrap();
    let out = dir.path().join("index.html");

    let status = storefront()
        .arg("--dir")
        .arg(dir.path().join("missing"))
        .arg("--config")
        .arg(&cfg)
        .arg("render")
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();

    assert!(!status.success());
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Failed to initialize application."));
}

#[test]
fn render_with_full_layout_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("storefront.toml");
    fs::write(&cfg, "placeholder_count = 2\n").unwrap();
    let out = dir.path().join("index.html");

    let status = storefront()
        .arg("--dir")
        .arg(dir.path().join("missing"))
        .arg("--config")
        .arg(&cfg)
        .arg("render")
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(fs::read_to_string(&out).unwrap().contains("kotatsu-2"));
}
