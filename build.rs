//! Build script for tunesync.
//!
//! Copies the bundled `settings.example.json` into the platform config
//! directory so a fresh install has a template to start from. Missing
//! templates produce a cargo warning instead of failing the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=settings.example.json");

    // Where to copy FROM (crate root)
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template_path = manifest_dir.join("settings.example.json");

    // Compute target dir (the user's config dir) and ensure it exists
    let mut out_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("tunesync");
    fs::create_dir_all(&out_dir)?;

    // Only copy if the source exists; otherwise warn instead of failing
    if template_path.is_file() {
        let contents = fs::read_to_string(&template_path)?;
        fs::write(out_dir.join("settings.example.json"), contents)?;
    } else {
        println!(
            "cargo:warning=settings.example.json not found at {}",
            template_path.display()
        );
    }

    Ok(())
}
