//! Background execution of reconcile jobs.
//!
//! The UI thread hands finished gestures to the worker and keeps handling
//! input. Each job runs on the tokio blocking pool with its own SQLite
//! connection; outcomes come back over a channel that the UI drains once per
//! frame. Jobs are not serialised against each other, so the outcome applied
//! last wins for overlapping keys.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tokio::runtime::Runtime;

use super::error::AvailabilityError;
use super::reconciler::{ReconcileJob, ReconcileOutcome};
use super::store::SqliteStore;
use crate::services::database::Database;

pub struct ReconcileWorker {
    runtime: Runtime,
    db_path: PathBuf,
    tx: Sender<ReconcileOutcome>,
    rx: Receiver<ReconcileOutcome>,
    in_flight: usize,
}

impl ReconcileWorker {
    /// Worker writing to the SQLite database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("availability-worker")
            .enable_all()
            .build()
            .context("Failed to start reconcile worker runtime")?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            db_path: db_path.into(),
            tx,
            rx,
            in_flight: 0,
        })
    }

    /// Queue `job` without waiting for it.
    pub fn submit(&mut self, job: ReconcileJob) {
        let tx = self.tx.clone();
        let db_path = self.db_path.clone();
        self.in_flight += 1;

        self.runtime.spawn_blocking(move || {
            let outcome = run_job(&db_path, job);
            if tx.send(outcome).is_err() {
                log::debug!("Reconcile outcome dropped: worker shut down");
            }
        });
    }

    /// Number of submitted jobs whose outcome has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Collect every outcome that is ready, in completion order.
    pub fn drain(&mut self) -> Vec<ReconcileOutcome> {
        let outcomes: Vec<_> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(outcomes.len());
        outcomes
    }

    /// Block up to `timeout` for the next outcome.
    pub fn wait_next(&mut self, timeout: Duration) -> Option<ReconcileOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn run_job(db_path: &std::path::Path, job: ReconcileJob) -> ReconcileOutcome {
    let path = db_path.to_string_lossy();
    match Database::new(&path) {
        Ok(db) => job.run(&SqliteStore::new(db.connection())),
        Err(e) => {
            log::warn!("Reconcile worker could not open {}: {:#}", path, e);
            ReconcileOutcome {
                owner: job.plan.owner,
                week_start: job.week_start,
                result: Err(AvailabilityError::persistence(e)),
                refetched: None,
            }
        }
    }
}
