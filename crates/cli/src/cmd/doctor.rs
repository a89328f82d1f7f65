use pagedex_core::config::loader::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>) {
    match ConfigLoader::load(config) {
        Ok(rc) => {
            println!("OK   pdx doctor");
            println!("version: {}", pagedex_core::version());
            println!(
                "path: {}",
                rc.source
                    .as_ref()
                    .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
            );
            println!("import.workers: {}", rc.workers);
            println!("logging.level: {}", rc.logging.level);
            if let Some(level) = &rc.logging.file_level {
                println!("logging.file_level: {level}");
            }
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL pdx doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
