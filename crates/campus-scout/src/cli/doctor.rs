//! Environment readiness check.

use super::GlobalOpts;
use crate::catalog::Catalogs;
use crate::config::resolve_data_dir;
use crate::renderer::chromium::find_chromium;
use anyhow::Result;

/// Check Chromium availability, the data directory, the catalogs and the
/// configuration.
pub async fn run(opts: &GlobalOpts) -> Result<()> {
    println!("Campus Scout Doctor");
    println!("===================");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    let chromium_path = find_chromium();
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Set SCOUT_CHROMIUM_PATH or install Chrome/Chromium."
        ),
    }

    let config = match opts.load_config() {
        Ok(c) => {
            println!("[OK] Configuration loaded");
            Some(c)
        }
        Err(e) => {
            println!("[!!] Configuration error: {e:#}");
            None
        }
    };

    let data_dir = resolve_data_dir(opts.data_dir.as_deref());
    if data_dir.is_dir() {
        println!("[OK] Data directory: {}", data_dir.display());
    } else {
        println!("[!!] Data directory does not exist: {}", data_dir.display());
    }

    if let Some(config) = &config {
        let catalogs = Catalogs::load(config);
        report_table(
            "Curated catalog",
            &config.curated_path().display().to_string(),
            catalogs.curated.len(),
        );
        report_table(
            "Registry",
            &config.registry_path().display().to_string(),
            catalogs.registry.len(),
        );
        println!(
            "[OK] Search providers: searxng ({} instances), startpage, duckduckgo_lite, browser",
            config.searxng_instances.len()
        );
    }

    println!();
    let ready = chromium_path.is_some() && config.is_some();
    if ready {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
        if chromium_path.is_none() {
            println!("  Web search still works; page retrieval needs Chromium.");
        }
    }

    Ok(())
}

fn report_table(label: &str, path: &str, len: usize) {
    if len > 0 {
        println!("[OK] {label}: {len} institutions ({path})");
    } else {
        println!("[!!] {label} empty or missing: {path}");
    }
}
