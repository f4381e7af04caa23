//! Generate TABLES.md from the engine's lookup tables.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-tables
//! ```
//!
//! The generated file is written to `estimate_core/TABLES.md`.

use std::fs;
use std::path::Path;

use estimate_core::settings::DEFAULT_SETTINGS;
use estimate_core::tables::generate_tables_markdown;

fn main() {
    println!("Generating TABLES.md...");

    let markdown = generate_tables_markdown(&DEFAULT_SETTINGS);

    // Relative to workspace root
    let output_path = Path::new("estimate_core/TABLES.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
