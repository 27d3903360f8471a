//! apkchain - apktool, apksigner and zipalign driver.
//!
//! This binary decompiles and rebuilds Android packages with apktool and
//! signs and aligns every rebuilt package before handing it back.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match apkchain::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
