pub mod doctor;
pub mod import;
pub mod serve;

use std::path::Path;

use pagedex_core::config::{ConfigLoader, ResolvedConfig};

/// Load config and start logging, exiting with status 1 when the config is
/// unusable.
fn setup(config: Option<&Path>) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc);
    rc
}
