//! Configuration for the checklist engine
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! [resources]
//! dir = "resources"
//! force_reload = false
//!
//! [output]
//! dir = "reports"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ChecklistError, Result};
use crate::organizers::OrganizerRegistry;
use crate::resources::{DirArtifactWriter, DirResourceLoader};

/// Where definition tables come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSettings {
    /// Directory holding `chkdb_*.txt` tables
    #[serde(default = "default_resource_dir")]
    pub dir: PathBuf,
    /// Re-read tables on every organizer initialization
    #[serde(default)]
    pub force_reload: bool,
}

fn default_resource_dir() -> PathBuf {
    PathBuf::from("resources")
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            dir: default_resource_dir(),
            force_reload: false,
        }
    }
}

/// Where reports are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckerConfig {
    #[serde(default)]
    pub resources: ResourceSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl CheckerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChecklistError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ChecklistError::Config(e.to_string()))
    }

    /// Registry with the built-in organizers, reading tables from the
    /// configured directory
    pub fn build_registry(&self) -> OrganizerRegistry {
        let loader = DirResourceLoader::new(&self.resources.dir);
        let mut registry = OrganizerRegistry::new(Arc::new(loader));
        registry.set_force_reload(self.resources.force_reload);
        registry.register_builtin();
        registry
    }

    /// Writer for the configured output directory
    pub fn artifact_writer(&self) -> DirArtifactWriter {
        DirArtifactWriter::new(&self.output.dir)
    }
}
