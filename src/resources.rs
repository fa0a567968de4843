//! Text resources and report artifacts
//!
//! The engine only needs two capabilities from its host: read a named text
//! resource (definition tables) and write a named text artifact (reports).
//! Directory-backed and in-memory implementations are provided.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ChecklistError, Result};

/// Source of named text resources
pub trait ResourceLoader: Send + Sync {
    /// Read the full text of resource `name`
    fn read_text(&self, name: &str) -> Result<String>;
}

/// Sink for named text artifacts. Writing replaces any previous artifact.
pub trait ArtifactWriter {
    fn write_text(&self, name: &str, contents: &str) -> Result<()>;
}

/// Reads resources from files in a directory
#[derive(Debug, Clone)]
pub struct DirResourceLoader {
    dir: PathBuf,
}

impl DirResourceLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResourceLoader for DirResourceLoader {
    fn read_text(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ChecklistError::ResourceNotFound(path.display().to_string())
            } else {
                ChecklistError::io(path.display().to_string(), e)
            }
        })
    }
}

/// Writes artifacts as files in a directory
#[derive(Debug, Clone)]
pub struct DirArtifactWriter {
    dir: PathBuf,
}

impl DirArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactWriter for DirArtifactWriter {
    fn write_text(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.dir.join(name);
        std::fs::write(&path, contents)
            .map_err(|e| ChecklistError::io(path.display().to_string(), e))?;
        log::info!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

/// In-memory resources and artifacts, for hosts that embed their tables and
/// for tests
#[derive(Debug, Default)]
pub struct InMemoryResources {
    resources: HashMap<String, String>,
    artifacts: Mutex<HashMap<String, String>>,
    reads: Mutex<usize>,
}

impl InMemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, returning self
    pub fn with_resource(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.resources.insert(name.into(), text.into());
        self
    }

    /// Text of a written artifact
    pub fn artifact(&self, name: &str) -> Option<String> {
        self.artifacts.lock().get(name).cloned()
    }

    /// Names of all written artifacts
    pub fn artifact_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.artifacts.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of successful resource reads so far
    pub fn read_count(&self) -> usize {
        *self.reads.lock()
    }
}

impl ResourceLoader for InMemoryResources {
    fn read_text(&self, name: &str) -> Result<String> {
        let text = self
            .resources
            .get(name)
            .cloned()
            .ok_or_else(|| ChecklistError::ResourceNotFound(name.to_string()))?;
        *self.reads.lock() += 1;
        Ok(text)
    }
}

impl ArtifactWriter for InMemoryResources {
    fn write_text(&self, name: &str, contents: &str) -> Result<()> {
        self.artifacts
            .lock()
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

// =============================================================================
// Resource cache
// =============================================================================

/// Caches resource text so a title's table is read once per cache.
///
/// One lock guards the whole load-if-absent step.
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: Mutex<HashMap<String, Arc<str>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached text of `name`, loading it on first use.
    ///
    /// With `force_reload` the loader is always consulted and the cached
    /// entry replaced.
    pub fn get_or_load(
        &self,
        loader: &dyn ResourceLoader,
        name: &str,
        force_reload: bool,
    ) -> Result<Arc<str>> {
        let mut entries = self.entries.lock();

        if !force_reload {
            if let Some(text) = entries.get(name) {
                log::debug!("Resource cache hit: {}", name);
                return Ok(Arc::clone(text));
            }
        }

        log::debug!("Loading resource {} (force_reload={})", name, force_reload);
        let text: Arc<str> = Arc::from(loader.read_text(name)?);
        entries.insert(name.to_string(), Arc::clone(&text));
        Ok(text)
    }

    /// Whether `name` is cached
    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }

    /// Drop one cached entry
    pub fn invalidate(&self, name: &str) {
        self.entries.lock().remove(name);
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
