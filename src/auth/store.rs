use crate::auth::TeacherTable;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Source of teacher credentials, consulted on every authentication attempt.
#[async_trait]
pub trait TeacherStore: Send + Sync {
    async fn teachers(&self) -> Result<TeacherTable>;
}

/// Reads the credential document from disk on each call.
#[derive(Debug, Clone)]
pub struct FileTeacherStore {
    path: PathBuf,
}

impl FileTeacherStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TeacherStore for FileTeacherStore {
    async fn teachers(&self) -> Result<TeacherTable> {
        let raw = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read teachers from {}", self.path.display()))?;

        serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse teachers from {}", self.path.display()))
    }
}

pub struct CachedTeacherStore<T> {
    inner: T,
    ttl: Duration,
    cached: Mutex<Option<(Instant, TeacherTable)>>,
}

impl<T: TeacherStore> CachedTeacherStore<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }

    fn fresh(&self) -> Option<TeacherTable> {
        let cached = self.cached.lock().ok()?;
        match cached.as_ref() {
            Some((loaded_at, table)) if loaded_at.elapsed() < self.ttl => Some(table.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl<T: TeacherStore> TeacherStore for CachedTeacherStore<T> {
    async fn teachers(&self) -> Result<TeacherTable> {
        if let Some(table) = self.fresh() {
            return Ok(table);
        }

        debug!("Teacher cache miss, reloading");
        let table = self.inner.teachers().await?;

        // A poisoned cache only costs a reload next time.
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some((Instant::now(), table.clone()));
        }

        Ok(table)
    }
}
