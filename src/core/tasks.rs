//! Background execution of store operations
//!
//! Store calls run on a small tokio runtime so the UI thread never blocks on
//! I/O. Results come back through a channel that the UI drains every frame.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::banner::BannerConfig;
use super::editor::TaskOutcome;
use super::session;
use super::store::{BlobStore, DocumentRef, DocumentStore};

/// Callback used to wake the UI when an outcome is ready
pub type Notify = Arc<dyn Fn() + Send + Sync>;

/// Runs load, save and upload operations off the UI thread
pub struct TaskRunner {
    runtime: Runtime,
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    document: DocumentRef,
    outcome_tx: UnboundedSender<TaskOutcome>,
    outcome_rx: UnboundedReceiver<TaskOutcome>,
    notify: Notify,
}

impl TaskRunner {
    /// Create a runner over the given stores
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        document: DocumentRef,
        notify: Notify,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("banner-store")
            .build()
            .context("Failed to start background runtime")?;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(Self {
            runtime,
            documents,
            blobs,
            document,
            outcome_tx,
            outcome_rx,
            notify,
        })
    }

    /// Fetch the banner document
    ///
    /// A failed load leaves the form on its loading screen, including when a
    /// stored field has an unexpected JSON type.
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let documents = Arc::clone(&self.documents);
        let document = self.document.clone();
        self.spawn("load", move || {
            session::load_banner(documents.as_ref(), &document)
                .with_context(|| {
                    format!("{} not loaded, the form stays on the loading screen", document)
                })
                .map(TaskOutcome::Loaded)
        })
    }

    /// Persist a snapshot of the record
    pub fn spawn_save(&self, config: BannerConfig) -> JoinHandle<()> {
        let documents = Arc::clone(&self.documents);
        let document = self.document.clone();
        self.spawn("save", move || {
            session::save_banner(documents.as_ref(), &document, &config)?;
            Ok(TaskOutcome::Saved)
        })
    }

    /// Upload the image file at `path`
    pub fn spawn_upload(&self, path: PathBuf) -> JoinHandle<()> {
        let blobs = Arc::clone(&self.blobs);
        self.spawn("upload", move || {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))?;

            session::upload_image(blobs.as_ref(), session::unix_millis(), &file_name, &bytes)
                .map(TaskOutcome::ImageUploaded)
        })
    }

    /// Drain finished operations without blocking
    pub fn poll(&mut self) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    fn spawn<F>(&self, name: &'static str, job: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Result<TaskOutcome> + Send + 'static,
    {
        tracing::debug!("Spawning {} task", name);
        let tx = self.outcome_tx.clone();
        let notify = Arc::clone(&self.notify);

        self.runtime.spawn_blocking(move || match job() {
            Ok(outcome) => {
                if tx.send(outcome).is_ok() {
                    notify();
                }
            }
            // Failures are not surfaced in the form
            Err(e) => tracing::error!("Banner {} failed: {:#}", name, e),
        })
    }

    /// Block until the next outcome arrives
    #[cfg(test)]
    pub(crate) fn wait(&mut self) -> Option<TaskOutcome> {
        self.outcome_rx.blocking_recv()
    }

    /// Block until a spawned operation has finished
    #[cfg(test)]
    pub(crate) fn join(&self, handle: JoinHandle<()>) {
        self.runtime
            .block_on(handle)
            .expect("background task panicked");
    }
}
