//! End-to-end tests driving the `officina` binary.
//!
//! Each test copies the fixture documents into a fresh temp directory laid
//! out like a site checkout (`config/gallery-items.json`,
//! `config/testimonials.json`) and runs the binary there, so the stock
//! `[paths]` defaults resolve without flags.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/config")
}

fn site_checkout() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config");
    std::fs::create_dir_all(&config).unwrap();
    for name in ["gallery-items.json", "testimonials.json"] {
        std::fs::copy(fixtures_dir().join(name), config.join(name)).unwrap();
    }
    tmp
}

fn officina(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_officina"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run officina")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ===========================================================================
// gallery
// ===========================================================================

#[test]
fn gallery_list_shows_counter_and_rows() {
    let tmp = site_checkout();
    let out = officina(tmp.path(), &["gallery", "list", "--category", "gemme"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[info] Configurazione caricata!"));
    assert!(text.contains("Gemme 2/100"));
    assert!(text.contains("001 Smeraldo colombiano"));
    assert!(text.contains("    Description: —"));
}

#[test]
fn gallery_add_exports_and_leaves_source_alone() {
    let tmp = site_checkout();
    std::fs::write(tmp.path().join("fede.jpg"), b"jpeg").unwrap();
    let source = tmp.path().join("config/gallery-items.json");
    let before = std::fs::read_to_string(&source).unwrap();

    let out = officina(
        tmp.path(),
        &[
            "gallery", "add", "--category", "anelli", "--title", "Fede", "--size", "wide",
            "--file", "fede.jpg",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    assert!(text.contains("[success] ✓ Foto \"Fede\" aggiunta!"));
    assert!(text.contains("Ricorda di sostituire il file config/gallery-items.json"));

    assert_eq!(std::fs::read_to_string(&source).unwrap(), before);

    let exported = read_json(&tmp.path().join("export/gallery-items.json"));
    let anelli = exported["anelli"].as_array().unwrap();
    assert_eq!(anelli.len(), 2);
    assert_eq!(anelli[1]["image"], "images/gallery/fede.jpg");
    assert_eq!(anelli[1]["description"], "");
    assert_eq!(anelli[1]["size"], "wide");
}

#[test]
fn gallery_add_at_capacity_fails() {
    let tmp = site_checkout();
    let rings: Vec<_> = (1..=15)
        .map(|i| serde_json::json!({"image": format!("images/gallery/r{i}.jpg"), "title": format!("R{i}"), "description": "", "size": "normal"}))
        .collect();
    std::fs::write(
        tmp.path().join("config/gallery-items.json"),
        serde_json::json!({ "anelli": rings }).to_string(),
    )
    .unwrap();
    std::fs::write(tmp.path().join("r16.jpg"), b"jpeg").unwrap();

    let out = officina(
        tmp.path(),
        &["gallery", "add", "--category", "anelli", "--title", "R16", "--file", "r16.jpg"],
    );
    assert!(!out.status.success());
    assert!(stdout(&out).contains("Limite raggiunto! Massimo 15 foto per questa categoria"));
    assert!(!tmp.path().join("export").exists());
}

#[test]
fn gallery_add_respects_configured_limit() {
    let tmp = site_checkout();
    std::fs::write(tmp.path().join("officina.toml"), "[admin.limits]\nanelli = 1\n").unwrap();
    std::fs::write(tmp.path().join("x.jpg"), b"jpeg").unwrap();

    let out = officina(
        tmp.path(),
        &["gallery", "add", "--category", "anelli", "--title", "X", "--file", "x.jpg"],
    );
    assert!(!out.status.success());
    assert!(stdout(&out).contains("Massimo 1 foto"));
}

#[test]
fn gallery_delete_without_yes_changes_nothing() {
    let tmp = site_checkout();
    let out = officina(
        tmp.path(),
        &["gallery", "delete", "--category", "gemme", "--index", "1"],
    );
    assert!(out.status.success());
    assert!(stdout(&out).contains("Nothing deleted"));
    assert!(!tmp.path().join("export").exists());
}

#[test]
fn gallery_delete_confirmed_shifts_rows() {
    let tmp = site_checkout();
    let out = officina(
        tmp.path(),
        &["gallery", "delete", "--category", "gemme", "--index", "1", "--yes"],
    );
    assert!(out.status.success());
    assert!(stdout(&out).contains("[success] Foto eliminata"));

    let exported = read_json(&tmp.path().join("export/gallery-items.json"));
    let gemme = exported["gemme"].as_array().unwrap();
    assert_eq!(gemme.len(), 1);
    assert_eq!(gemme[0]["title"], "Zaffiro blu");
}

#[test]
fn gallery_delete_position_zero_rejected() {
    let tmp = site_checkout();
    let out = officina(tmp.path(), &["gallery", "delete", "--index", "0", "--yes"]);
    assert!(!out.status.success());
}

#[test]
fn missing_documents_start_fresh() {
    let tmp = TempDir::new().unwrap();
    let out = officina(tmp.path(), &["gallery", "list"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Nessuna configurazione trovata"));
    assert!(text.contains("Gemme 0/100"));
}

#[test]
fn unreadable_gallery_refuses_add_and_export() {
    let tmp = site_checkout();
    let source = tmp.path().join("config/gallery-items.json");
    let mut doc = read_json(&source);
    doc["bracciali"] = serde_json::json!([]);
    std::fs::write(&source, doc.to_string()).unwrap();
    std::fs::write(tmp.path().join("fede.jpg"), b"jpeg").unwrap();

    let out = officina(
        tmp.path(),
        &["gallery", "add", "--category", "anelli", "--title", "Fede", "--file", "fede.jpg"],
    );
    assert!(!out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Impossibile leggere"));
    assert!(!text.contains("Nessuna configurazione trovata"));
    assert!(text.contains("modifiche ed esportazione disabilitate"));
    assert!(!tmp.path().join("export").exists());

    let out = officina(tmp.path(), &["gallery", "export"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("export").exists());
}

#[test]
fn gallery_render_outputs_admin_table() {
    let tmp = site_checkout();
    let out = officina(tmp.path(), &["gallery", "render", "--category", "anelli"]);
    assert!(out.status.success());
    let html = stdout(&out);
    assert!(html.contains("gallery-table"));
    assert!(html.contains("Orizzontale"));
    assert!(html.contains("1/15"));
}

// ===========================================================================
// testimonials
// ===========================================================================

#[test]
fn testimonials_add_formats_date() {
    let tmp = site_checkout();
    let out = officina(
        tmp.path(),
        &[
            "testimonials", "add", "--name", "Sara", "--text", "Bellissimo", "--url",
            "https://g.page/r/x", "--date", "2024-06-15", "--rating", "4", "--platform",
            "instagram",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("✓ Testimonianza di \"Sara\" aggiunta!"));

    let exported = read_json(&tmp.path().join("export/testimonials.json"));
    let list = exported["testimonials"].as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[2]["date"], "15 giugno 2024");
    assert_eq!(list[2]["platform"], "instagram");
    assert_eq!(list[2]["rating"], 4);
}

#[test]
fn testimonials_add_rejects_rating_six() {
    let tmp = site_checkout();
    let out = officina(
        tmp.path(),
        &[
            "testimonials", "add", "--name", "Sara", "--text", "x", "--url", "u", "--date",
            "2024-06-15", "--rating", "6",
        ],
    );
    assert!(!out.status.success());
    assert!(stdout(&out).contains("Rating deve essere tra 1 e 5 stelle"));
}

#[test]
fn testimonials_list() {
    let tmp = site_checkout();
    let out = officina(tmp.path(), &["testimonials", "list"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Testimonials (2)"));
    assert!(text.contains("002 Paolo M. ★★★★☆"));
}

#[test]
fn testimonials_delete_confirmed() {
    let tmp = site_checkout();
    let out = officina(tmp.path(), &["testimonials", "delete", "--index", "1", "--yes"]);
    assert!(out.status.success());
    let exported = read_json(&tmp.path().join("export/testimonials.json"));
    assert_eq!(exported["testimonials"][0]["name"], "Paolo M.");
}

// ===========================================================================
// site, config
// ===========================================================================

#[test]
fn site_render_merges_both_documents() {
    let tmp = site_checkout();
    let out = officina(tmp.path(), &["site", "render"]);
    assert!(out.status.success());
    let html = stdout(&out);
    assert!(html.contains(r#"data-category="gemme""#));
    assert!(html.contains("Anelli: 1/25"));
    assert!(html.contains("Leggi su Google →"));
    assert!(html.contains("Vedi altre recensioni"));
}

#[test]
fn gen_config_is_valid_toml() {
    let tmp = TempDir::new().unwrap();
    let out = officina(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    let value: toml::Value = toml::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["site"]["initial_visible"].as_integer(), Some(5));
}

#[test]
fn gen_config_ignores_broken_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("officina.toml"), "[site]\ninitial_visible = 0\n").unwrap();
    let out = officina(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("[site]"));
}

#[test]
fn invalid_config_is_reported() {
    let tmp = site_checkout();
    std::fs::write(tmp.path().join("officina.toml"), "[site]\ninitial_visible = 0\n").unwrap();
    let out = officina(tmp.path(), &["gallery", "list"]);
    assert!(!out.status.success());
}
