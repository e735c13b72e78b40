//! Build script for Weekly Releases.
//!
//! Copies the `.env.example` configuration template to the user's local data
//! directory so it sits next to the `.env` file the tool reads:
//! - Linux: `~/.local/share/weekly-releases/.env.example`
//! - macOS: `~/Library/Application Support/weekly-releases/.env.example`
//! - Windows: `%LOCALAPPDATA%/weekly-releases/.env.example`
//!
//! Problems copying the template only produce cargo warnings; they never fail
//! the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("weekly-releases");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")));
    if let Err(e) = copied {
        println!(
            "cargo:warning=cannot copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
