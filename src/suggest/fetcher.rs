use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::trace;

use crate::backend::{BackendError, SuggestionBackend};
use crate::suggest::model::Suggestion;

#[derive(Debug)]
pub struct FetchCompletion {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<Suggestion>, BackendError>,
}

/// Dispatches lookups to worker threads and funnels their completions
/// back over an mpsc channel. A monotonically increasing sequence
/// number tags each dispatch; only the completion matching the latest
/// issued sequence is ever delivered, so a slow early response can
/// never overwrite a fast later one.
pub struct Fetcher {
    backend: Arc<dyn SuggestionBackend>,
    seq: u64,
    in_flight: usize,
    completion_tx: Sender<FetchCompletion>,
    completion_rx: Receiver<FetchCompletion>,
}

impl Fetcher {
    pub fn new(backend: Arc<dyn SuggestionBackend>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<FetchCompletion>();
        Self {
            backend,
            seq: 0,
            in_flight: 0,
            completion_tx,
            completion_rx,
        }
    }

    /// Issues one lookup on a worker thread. Returns the sequence number
    /// assigned to it.
    pub fn dispatch(&mut self, query: String) -> u64 {
        self.seq = self.seq.saturating_add(1);
        self.in_flight = self.in_flight.saturating_add(1);
        let seq = self.seq;
        let backend = Arc::clone(&self.backend);
        let completion_tx = self.completion_tx.clone();
        thread::spawn(move || {
            let result = backend.fetch(&query);
            let _ = completion_tx.send(FetchCompletion { seq, query, result });
        });
        seq
    }

    /// Supersedes any in-flight lookup without issuing a new one. Used
    /// on a forced clear, so a response for a query that is no longer
    /// current cannot reopen the dropdown.
    pub fn invalidate(&mut self) {
        self.seq = self.seq.saturating_add(1);
    }

    /// Drains every completion that has arrived and returns the one for
    /// the latest issued sequence, if present. Superseded completions
    /// are an expected race, not a fault; they are dropped with only a
    /// trace event.
    pub fn drain_latest(&mut self) -> Option<FetchCompletion> {
        let mut latest = None;
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if completion.seq == self.seq {
                        latest = Some(completion);
                    } else {
                        trace!(
                            seq = completion.seq,
                            current = self.seq,
                            query = %completion.query,
                            "discarding stale suggestion response"
                        );
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    /// The most recently issued (or invalidated-to) sequence number.
    pub fn latest_seq(&self) -> u64 {
        self.seq
    }
}
