//! Placeholder organizers for titles whose storage layout is known but whose
//! checklist has not been authored yet. They still dump raw flags.

use super::{
    expect_model, BoxedOrganizer, EvaluationMode, FlagsOrganizer, OrganizerContext,
    OrganizerFactory,
};
use crate::error::{ChecklistError, Result};
use crate::objective::{Objective, ObjectiveCategory};
use crate::resources::ArtifactWriter;
use crate::snapshot::{Snapshot, StorageModel};
use crate::version::GameVersion;

/// Organizer with no objectives
pub struct DummyOrganizer {
    version: GameVersion,
    model: StorageModel,
    snapshot: Option<Snapshot>,
    results: Vec<Objective>,
}

impl DummyOrganizer {
    pub fn new(version: GameVersion, model: StorageModel) -> Self {
        Self {
            version,
            model,
            snapshot: None,
            results: Vec::new(),
        }
    }
}

impl FlagsOrganizer for DummyOrganizer {
    fn version(&self) -> GameVersion {
        self.version
    }

    fn storage_model(&self) -> StorageModel {
        self.model
    }

    fn initialize(&mut self, snapshot: Snapshot) -> Result<()> {
        self.snapshot = None;
        expect_model(self.version, self.model, &snapshot)?;
        self.snapshot = Some(snapshot);
        Ok(())
    }

    fn snapshot(&self) -> Result<&Snapshot> {
        self.snapshot.as_ref().ok_or(ChecklistError::NotInitialized)
    }

    fn compute_all(&mut self, _mode: EvaluationMode) -> Result<&[Objective]> {
        self.snapshot()?;
        Ok(&self.results)
    }

    fn export_missing(&mut self, _out: &dyn ArtifactWriter) -> Result<()> {
        self.snapshot()?;
        log::debug!("{}: no checklist authored, skipping missing report", self.version);
        Ok(())
    }

    fn export_checklist(&mut self, _out: &dyn ArtifactWriter) -> Result<()> {
        self.snapshot()?;
        log::debug!("{}: no checklist authored, skipping checklist report", self.version);
        Ok(())
    }

    fn supports_editing(&self, _category: ObjectiveCategory) -> bool {
        false
    }
}

/// Factory for a family of dummy organizers
#[derive(Debug, Clone, Copy)]
pub struct DummyFactory {
    family: &'static str,
    titles: &'static [GameVersion],
    model: StorageModel,
}

impl DummyFactory {
    /// Dummy family over dense flag arrays
    pub const fn dense(family: &'static str, titles: &'static [GameVersion]) -> Self {
        Self {
            family,
            titles,
            model: StorageModel::Dense,
        }
    }

    /// Dummy family over keyed block stores
    pub const fn keyed(family: &'static str, titles: &'static [GameVersion]) -> Self {
        Self {
            family,
            titles,
            model: StorageModel::Keyed,
        }
    }
}

impl OrganizerFactory for DummyFactory {
    fn family(&self) -> &'static str {
        self.family
    }

    fn titles(&self) -> &[GameVersion] {
        self.titles
    }

    fn storage_model(&self) -> StorageModel {
        self.model
    }

    fn create(&self, version: GameVersion, _ctx: OrganizerContext) -> BoxedOrganizer {
        Box::new(DummyOrganizer::new(version, self.model))
    }
}
