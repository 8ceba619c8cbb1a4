//! Background persistence of stroke snapshots.
//!
//! The interactive thread hands owned snapshots to a writer thread. The
//! writer only knows the storage backend and the snapshots it receives, never
//! the session that feeds it.

use crate::storage::{Storage, StorageError, StorageResult};
use crate::stroke::Stroke;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Delay between the last mutation and the automatic save.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(2);

enum Message {
    Save(Vec<Stroke>),
    Sync(Sender<()>),
    Shutdown,
}

/// Handle to the writer thread.
pub struct AutoSaver {
    sender: Sender<Message>,
    worker: Option<JoinHandle<()>>,
}

impl AutoSaver {
    /// Start a writer thread saving under `document_id`.
    pub fn spawn<S: Storage + 'static>(
        storage: Arc<S>,
        document_id: impl Into<String>,
    ) -> StorageResult<Self> {
        let document_id = document_id.into();
        let (sender, receiver) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("geomatrix-autosave".to_string())
            .spawn(move || run_writer(storage.as_ref(), &document_id, receiver))
            .map_err(|e| StorageError::Io(format!("Failed to start autosave thread: {}", e)))?;

        Ok(Self {
            sender,
            worker: Some(worker),
        })
    }

    /// Queue a snapshot for writing. Never blocks.
    pub fn save(&self, strokes: Vec<Stroke>) {
        if self.sender.send(Message::Save(strokes)).is_err() {
            log::error!("Autosave thread is gone; snapshot dropped");
        }
    }

    /// Block until every snapshot queued before this call has been written
    /// (or has failed).
    pub fn sync(&self) {
        let (ack, done) = mpsc::channel();
        if self.sender.send(Message::Sync(ack)).is_ok() {
            let _ = done.recv();
        }
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        let _ = self.sender.send(Message::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Autosave thread panicked");
            }
        }
    }
}

fn run_writer<S: Storage + ?Sized>(storage: &S, document_id: &str, receiver: Receiver<Message>) {
    while let Ok(first) = receiver.recv() {
        let mut latest = None;
        let mut acks = Vec::new();
        let mut shutdown = false;

        // Only the newest queued snapshot is worth writing.
        for message in std::iter::once(first).chain(receiver.try_iter()) {
            match message {
                Message::Save(strokes) => latest = Some(strokes),
                Message::Sync(ack) => acks.push(ack),
                Message::Shutdown => shutdown = true,
            }
        }

        if let Some(strokes) = latest {
            match pollster::block_on(storage.save(document_id, &strokes)) {
                Ok(()) => log::info!("Saved {} strokes to '{}'", strokes.len(), document_id),
                Err(e) => log::error!("Failed to save document '{}': {}", document_id, e),
            }
        }

        for ack in acks {
            let _ = ack.send(());
        }

        if shutdown {
            break;
        }
    }
    log::debug!("Autosave thread for '{}' stopped", document_id);
}
