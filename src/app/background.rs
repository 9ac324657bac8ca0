//! Background Runner
//!
//! Runs file loads and saves off the UI thread. The gate is set before a job
//! is dispatched and cleared only when its completion is picked up again on
//! the UI thread, whether the job succeeded, failed or panicked.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{error, info, warn};

use crate::vault::{Entry, FileStore, VaultError, VaultResult};

use super::gate::InteractionGate;

#[derive(Debug)]
pub enum FileJob {
    Load(PathBuf),
    Save { path: PathBuf, entries: Vec<Entry> },
}

impl FileJob {
    fn describe(&self) -> (&'static str, String) {
        match self {
            Self::Load(path) => ("load", path.display().to_string()),
            Self::Save { path, .. } => ("save", path.display().to_string()),
        }
    }

    fn run(self) -> VaultResult<FileOutcome> {
        match self {
            Self::Load(path) => {
                let entries = FileStore::load(&path)?;
                Ok(FileOutcome::Loaded { path, entries })
            }
            Self::Save { path, entries } => {
                FileStore::save(&path, &entries)?;
                Ok(FileOutcome::Saved { path })
            }
        }
    }
}

#[derive(Debug)]
pub enum FileOutcome {
    Loaded { path: PathBuf, entries: Vec<Entry> },
    Saved { path: PathBuf },
}

/// What the UI does once a job finishes successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    Nothing,
    Exit,
    NewFile,
    Open(PathBuf),
}

#[derive(Debug)]
pub struct Completion {
    pub outcome: VaultResult<FileOutcome>,
    pub then: Followup,
}

pub struct BackgroundRunner {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Default for BackgroundRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundRunner {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Start `job` on a worker thread. Refused while another job holds the gate.
    pub fn dispatch(&self, gate: &mut InteractionGate, job: FileJob, then: Followup) -> bool {
        if gate.is_processing() {
            warn!("file operation refused, another one is in progress");
            return false;
        }

        let (kind, target) = job.describe();
        gate.set_processing(true);
        info!(kind, path = %target, "file operation started");

        let tx = self.tx.clone();
        let fallback = then.clone();
        let spawned = thread::Builder::new()
            .name(format!("file-{kind}"))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| job.run())).unwrap_or_else(|_| {
                    Err(VaultError::Io(io::Error::other("file operation panicked")))
                });
                let _ = tx.send(Completion { outcome, then });
            });

        if let Err(e) = spawned {
            error!(kind, error = %e, "cannot start file operation");
            let _ = self.tx.send(Completion {
                outcome: Err(VaultError::Io(e)),
                then: fallback,
            });
        }
        true
    }

    /// Pick up a finished job, if any, and release the gate.
    pub fn poll(&self, gate: &mut InteractionGate) -> Option<Completion> {
        let completion = self.rx.try_recv().ok()?;
        Self::finish(gate, completion)
    }

    fn finish(gate: &mut InteractionGate, completion: Completion) -> Option<Completion> {
        gate.set_processing(false);
        match &completion.outcome {
            Ok(FileOutcome::Loaded { path, entries }) => {
                info!(path = %path.display(), entries = entries.len(), "file loaded");
            }
            Ok(FileOutcome::Saved { path }) => info!(path = %path.display(), "file saved"),
            Err(e) => error!(error = %e, "file operation failed"),
        }
        Some(completion)
    }
}

#[cfg(test)]
impl BackgroundRunner {
    pub fn wait(&self, gate: &mut InteractionGate) -> Option<Completion> {
        let completion = self
            .rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .ok()?;
        Self::finish(gate, completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gate::ActionKind;

    #[test]
    fn test_gate_set_during_job_and_cleared_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        let runner = BackgroundRunner::new();
        let mut gate = InteractionGate::new();

        let entries = vec![Entry::new("Bank", "", "alice", "secret")];
        assert!(runner.dispatch(
            &mut gate,
            FileJob::Save { path: path.clone(), entries },
            Followup::Exit,
        ));
        assert!(gate.is_processing());
        assert!(!gate.is_action_enabled(ActionKind::Exit));

        let done = runner.wait(&mut gate).unwrap();
        assert!(!gate.is_processing());
        assert!(gate.is_action_enabled(ActionKind::Exit));
        assert_eq!(done.then, Followup::Exit);
        assert!(matches!(done.outcome, Ok(FileOutcome::Saved { .. })));

        runner.dispatch(&mut gate, FileJob::Load(path), Followup::Nothing);
        match runner.wait(&mut gate).unwrap().outcome {
            Ok(FileOutcome::Loaded { entries, .. }) => assert_eq!(entries[0].title, "Bank"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_gate_cleared_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let runner = BackgroundRunner::new();
        let mut gate = InteractionGate::new();

        runner.dispatch(&mut gate, FileJob::Load(dir.path().join("missing.json")), Followup::Nothing);
        let done = runner.wait(&mut gate).unwrap();

        assert!(done.outcome.is_err());
        assert!(!gate.is_processing());
        assert!(gate.is_search_enabled());
    }

    #[test]
    fn test_second_dispatch_refused_while_processing() {
        let dir = tempfile::tempdir().unwrap();
        let runner = BackgroundRunner::new();
        let mut gate = InteractionGate::new();
        gate.set_processing(true);

        assert!(!runner.dispatch(&mut gate, FileJob::Load(dir.path().join("a.json")), Followup::Nothing));
        assert!(runner.poll(&mut gate).is_none());
        assert!(gate.is_processing());
    }

    #[test]
    fn test_poll_without_job() {
        let runner = BackgroundRunner::new();
        let mut gate = InteractionGate::new();
        assert!(runner.poll(&mut gate).is_none());
        assert!(!gate.is_processing());
    }
}
