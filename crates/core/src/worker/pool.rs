use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::protocol::{Request, Response, handle};

type Job = (u64, Request);

/// How long an idle worker waits on the queue before rechecking for shutdown.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Cloneable handle for queueing requests from other threads.
#[derive(Debug, Clone)]
pub struct Submitter {
    jobs: Sender<Job>,
}

impl Submitter {
    /// Queue a request. Returns `false` if every worker has gone away.
    pub fn submit(&self, id: u64, request: Request) -> bool {
        self.jobs.send((id, request)).is_ok()
    }
}

/// Fixed set of import threads fed from one job queue.
///
/// Responses come back on a single channel in completion order, tagged with
/// the id the caller submitted. The pool keeps no state between jobs and
/// never retries or cancels: discarding stale responses is up to the caller.
pub struct WorkerPool {
    jobs: Option<Submitter>,
    results: Receiver<(u64, Response)>,
    workers: Vec<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl WorkerPool {
    pub fn new(count: NonZeroUsize) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (result_tx, results) = mpsc::channel();
        let job_rx = Arc::new(Mutex::new(job_rx));
        let shutdown = Arc::new(AtomicBool::new(false));

        let workers: Vec<_> = (0..count.get())
            .map(|n| {
                let jobs = Arc::clone(&job_rx);
                let results = result_tx.clone();
                let shutdown = Arc::clone(&shutdown);
                thread::spawn(move || run(n, &jobs, &results, &shutdown))
            })
            .collect();

        tracing::debug!(workers = count.get(), "started import workers");
        Self { jobs: Some(Submitter { jobs: job_tx }), results, workers, shutdown }
    }

    /// Queue a request. Returns `false` once the pool is closed or every
    /// worker has gone away.
    pub fn submit(&self, id: u64, request: Request) -> bool {
        self.jobs.as_ref().is_some_and(|jobs| jobs.submit(id, request))
    }

    /// A handle that can queue requests from another thread.
    pub fn submitter(&self) -> Option<Submitter> {
        self.jobs.clone()
    }

    /// Stop queueing through the pool itself. Workers keep running until every
    /// [`Submitter`] is dropped and the queue is drained, after which
    /// [`recv`](Self::recv) returns `None`.
    pub fn close(&mut self) {
        self.jobs.take();
    }

    /// Block until the next response is ready. `None` once the pool is closed,
    /// every submitter is gone and all responses have been received.
    pub fn recv(&self) -> Option<(u64, Response)> {
        self.results.recv().ok()
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    /// Stops every worker after its current job, even while cloned
    /// submitters are alive. Requests still queued are abandoned.
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        self.jobs.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::warn!("import worker panicked");
            }
        }
    }
}

fn run(
    n: usize,
    jobs: &Mutex<Receiver<Job>>,
    results: &Sender<(u64, Response)>,
    shutdown: &AtomicBool,
) {
    while !shutdown.load(Ordering::Acquire) {
        let job = match jobs.lock() {
            Ok(queue) => queue.recv_timeout(IDLE_POLL),
            Err(_) => break,
        };
        let (id, request) = match job {
            Ok(job) => job,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        tracing::trace!(worker = n, id, path = %request.path(), "import started");
        if results.send((id, handle(request))).is_err() {
            break;
        }
    }
}
