//! Background worker thread — the dataset fetch runs here.
//!
//! The worker owns the `TableCache`; the UI thread only ever sees the
//! `Arc<Table>` it hands back. Communication is via `mpsc` channels.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use climadash_core::data::{DatasetSource, Table, TableCache};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Return the cached table, fetching it if this is the first success.
    LoadTable,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    TableLoaded { table: Arc<Table> },
    LoadFailed { error: String, is_fetch: bool },
}

/// Spawn the background worker thread.
pub fn spawn_worker<S>(
    cache: TableCache<S>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>>
where
    S: DatasetSource + 'static,
{
    thread::Builder::new()
        .name("climadash-worker".into())
        .spawn(move || worker_loop(cache, rx, tx))
}

fn worker_loop<S: DatasetSource>(
    cache: TableCache<S>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            WorkerCommand::LoadTable => {
                let resp = match cache.get_table() {
                    Ok(table) => WorkerResponse::TableLoaded { table },
                    Err(e) => {
                        error!(error = %e, "table load failed");
                        WorkerResponse::LoadFailed {
                            error: e.to_string(),
                            is_fetch: e.is_fetch(),
                        }
                    }
                };
                if tx.send(resp).is_err() {
                    break;
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
    debug!("worker exiting");
}
