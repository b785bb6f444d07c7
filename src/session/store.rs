// file: src/session/store.rs
// description: in-memory and JSON-file-backed session stores
// reference: key-value store injected at call sites for testability

use crate::error::{ResearcherError, Result};
use crate::session::TopicSession;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Key-value view over stored topic sessions. Call sites receive an
/// implementation instead of reaching for process-global state, so tests
/// can substitute the in-memory fake.
pub trait SessionStore {
    fn put(&mut self, session: TopicSession);
    fn get(&self, id: &Uuid) -> Option<&TopicSession>;
    /// Most recently created session, the default export target.
    fn latest(&self) -> Option<&TopicSession>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: HashMap<Uuid, TopicSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn put(&mut self, session: TopicSession) {
        self.sessions.insert(session.id, session);
    }

    fn get(&self, id: &Uuid) -> Option<&TopicSession> {
        self.sessions.get(id)
    }

    fn latest(&self) -> Option<&TopicSession> {
        self.sessions
            .values()
            .max_by_key(|s| (s.created_at_ms, s.id))
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Session store persisted as one JSON document, so separate CLI
/// invocations can export the most recent analysis.
pub struct FileSessionStore {
    storage_path: PathBuf,
    cache: HashMap<Uuid, TopicSession>,
}

impl FileSessionStore {
    pub async fn open(storage_path: PathBuf) -> Result<Self> {
        if let Some(parent) = storage_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ResearcherError::Session(format!("Failed to create session directory: {}", e))
            })?;
        }

        let mut store = Self {
            storage_path,
            cache: HashMap::new(),
        };
        store.load().await?;
        Ok(store)
    }

    async fn load(&mut self) -> Result<()> {
        if !self.storage_path.exists() {
            debug!("No existing session file at {:?}", self.storage_path);
            return Ok(());
        }

        let contents = fs::read_to_string(&self.storage_path)
            .await
            .map_err(|e| ResearcherError::Session(format!("Failed to read sessions: {}", e)))?;

        self.cache = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse session file: {}", e);
            ResearcherError::Session(format!("Failed to parse sessions: {}", e))
        })?;

        info!("Loaded {} stored sessions", self.cache.len());
        Ok(())
    }

    pub async fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.cache)?;

        fs::write(&self.storage_path, contents)
            .await
            .map_err(|e| ResearcherError::Session(format!("Failed to write sessions: {}", e)))?;

        debug!("Saved {} sessions", self.cache.len());
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn put(&mut self, session: TopicSession) {
        self.cache.insert(session.id, session);
    }

    fn get(&self, id: &Uuid) -> Option<&TopicSession> {
        self.cache.get(id)
    }

    fn latest(&self) -> Option<&TopicSession> {
        self.cache
            .values()
            .max_by_key(|s| (s.created_at_ms, s.id))
    }

    fn len(&self) -> usize {
        self.cache.len()
    }
}
