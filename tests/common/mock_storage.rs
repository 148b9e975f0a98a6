//! In-memory distributed storage.
//!
//! Tracks which remote paths hold a file so that a `LOAD DATA` issued through
//! the mock client can move (remove) the copy the way a real cluster does.

use super::{EventLog, MockBehavior};
use async_trait::async_trait;
use hive_search_suite::DistributedStorage;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const NAMENODE: &str = "hdfs://namenode:8020";

pub struct MockStorage {
    log: EventLog,
    behavior: MockBehavior,
    files: Mutex<HashMap<String, PathBuf>>,
    copies: Mutex<usize>,
}

impl MockStorage {
    pub fn new(log: EventLog, behavior: MockBehavior) -> Self {
        Self {
            log,
            behavior,
            files: Mutex::new(HashMap::new()),
            copies: Mutex::new(0),
        }
    }

    pub fn exists(&self, remote: &str) -> bool {
        self.files.lock().contains_key(remote)
    }

    /// Source path of the file currently stored at `remote`
    pub fn source_of(&self, remote: &str) -> Option<PathBuf> {
        self.files.lock().get(remote).cloned()
    }

    /// Remove the file behind a qualified URI, as `LOAD DATA INPATH` does
    pub fn consume_uri(&self, uri: &str) -> anyhow::Result<()> {
        let remote = uri.strip_prefix(NAMENODE).unwrap_or(uri);
        match self.files.lock().remove(remote) {
            Some(_) => {
                self.log.record(format!("storage.moved {remote}"));
                Ok(())
            }
            None => anyhow::bail!("Invalid path '{uri}': No files matching path {uri}"),
        }
    }

    pub fn copy_events(&self) -> Vec<String> {
        self.log
            .snapshot()
            .into_iter()
            .filter(|e| e.starts_with("storage.copy "))
            .collect()
    }
}

#[async_trait]
impl DistributedStorage for MockStorage {
    async fn copy_from_local(&self, local: &Path, remote: &str) -> anyhow::Result<()> {
        {
            let mut copies = self.copies.lock();
            if let Some(budget) = self.behavior.storage_copy_budget {
                if *copies >= budget {
                    self.log.record(format!("storage.copy-refused {remote}"));
                    anyhow::bail!("Name node is in safe mode");
                }
            }
            *copies += 1;
        }

        self.log
            .record(format!("storage.copy {} -> {remote}", local.display()));
        self.files
            .lock()
            .insert(remote.to_string(), local.to_path_buf());
        Ok(())
    }

    async fn qualify(&self, remote: &str) -> anyhow::Result<String> {
        self.log.record(format!("storage.qualify {remote}"));
        Ok(format!("{NAMENODE}{remote}"))
    }

    async fn add_to_classpath(&self, remote: &str) -> anyhow::Result<()> {
        self.log.record(format!("storage.classpath {remote}"));
        if self.behavior.storage_rejects_classpath || !self.exists(remote) {
            anyhow::bail!("File does not exist: {remote}");
        }
        Ok(())
    }
}
