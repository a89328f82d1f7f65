//! Long-running worker loop over newline-delimited JSON.
//!
//! Each input line is `{"id": <u64>, "request": <Request>}`; each output line
//! is `{"id": <u64>, "response": <Response>}`, written as soon as a worker
//! finishes, so responses may arrive out of order.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use color_eyre::eyre::{Result, eyre};
use pagedex_core::worker::{Request, Response, Submitter, WorkerPool};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct Envelope {
    id: u64,
    request: Request,
}

#[derive(Debug, Serialize)]
struct Reply<'a> {
    id: u64,
    response: &'a Response,
}

pub fn run(config: Option<&Path>) -> Result<()> {
    let rc = super::setup(config);

    let mut pool = WorkerPool::new(rc.workers);
    let submitter = pool.submitter().ok_or_else(|| eyre!("worker pool closed"))?;
    pool.close();

    let reader = thread::spawn(move || read_requests(io::stdin().lock(), &submitter));

    let mut out = io::stdout().lock();
    let mut answered = 0usize;
    while let Some((id, response)) = pool.recv() {
        serde_json::to_writer(&mut out, &Reply { id, response: &response })?;
        writeln!(out)?;
        out.flush()?;
        answered += 1;
    }

    let submitted = reader.join().map_err(|_| eyre!("request reader panicked"))?;
    tracing::info!(submitted, answered, "serve finished");
    Ok(())
}

/// Queue every well-formed envelope; malformed lines are logged and skipped.
fn read_requests(input: impl BufRead, submitter: &Submitter) -> usize {
    let mut submitted = 0;
    for (number, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "stopped reading requests");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Envelope>(&line) {
            Ok(envelope) => {
                if !submitter.submit(envelope.id, envelope.request) {
                    break;
                }
                submitted += 1;
            }
            Err(e) => tracing::warn!(line = number + 1, error = %e, "skipping malformed request"),
        }
    }
    submitted
}
