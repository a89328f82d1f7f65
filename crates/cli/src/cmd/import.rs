//! One-shot import: a single request in, a single response out.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use pagedex_core::worker::{Request, handle};

use crate::ImportArgs;

pub fn run(config: Option<&Path>, args: &ImportArgs) -> Result<()> {
    super::setup(config);

    let input = match &args.file {
        Some(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).wrap_err("failed to read stdin")?;
            buf
        }
    };

    let request: Request = serde_json::from_str(&input).wrap_err("invalid import request")?;
    tracing::debug!(path = %request.path(), "import request");
    let response = handle(request);

    let mut out = io::stdout().lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &response)?;
    } else {
        serde_json::to_writer(&mut out, &response)?;
    }
    writeln!(out)?;
    out.flush()?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
