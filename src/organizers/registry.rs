//! Organizer registry for dispatching titles to organizer families

use std::collections::HashMap;
use std::sync::Arc;

use super::{BoxedOrganizer, OrganizerContext};
use crate::error::Result;
use crate::resources::{ResourceCache, ResourceLoader};
use crate::snapshot::{Snapshot, StorageModel};
use crate::version::GameVersion;

/// Factory for creating organizers of one title family
pub trait OrganizerFactory: Send + Sync {
    /// Unique identifier for this family
    fn family(&self) -> &'static str;

    /// Titles this family serves
    fn titles(&self) -> &[GameVersion];

    /// Storage shape of the family's snapshots
    fn storage_model(&self) -> StorageModel;

    /// Create an uninitialized organizer for `version`
    fn create(&self, version: GameVersion, ctx: OrganizerContext) -> BoxedOrganizer;
}

/// Registry mapping titles to organizer families.
///
/// The registry owns the resource cache, so definition tables are read once
/// per registry no matter how many organizers it creates.
pub struct OrganizerRegistry {
    factories: HashMap<String, Box<dyn OrganizerFactory>>,
    /// Map from title to family id for quick lookup
    title_map: HashMap<GameVersion, String>,
    ctx: OrganizerContext,
}

impl OrganizerRegistry {
    /// Create an empty registry reading tables through `loader`
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            factories: HashMap::new(),
            title_map: HashMap::new(),
            ctx: OrganizerContext::new(loader),
        }
    }

    /// Share an existing resource cache
    pub fn with_cache(mut self, cache: Arc<ResourceCache>) -> Self {
        self.ctx.cache = cache;
        self
    }

    /// Bypass the resource cache on every table load
    pub fn set_force_reload(&mut self, force_reload: bool) {
        self.ctx.force_reload = force_reload;
    }

    /// The registry's resource cache
    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.ctx.cache
    }

    /// Register an organizer factory.
    ///
    /// A title already claimed by another family is re-pointed to this one.
    pub fn register(&mut self, factory: Box<dyn OrganizerFactory>) {
        let family = factory.family().to_string();

        for version in factory.titles() {
            if let Some(previous) = self.title_map.insert(*version, family.clone()) {
                if previous != family {
                    log::warn!("{} moved from {} to {}", version, previous, family);
                }
            }
        }

        self.factories.insert(family, factory);
    }

    /// Register all built-in families
    pub fn register_builtin(&mut self) {
        log::info!("Registering built-in organizers");

        for profile in super::builtin_profiles() {
            self.register(Box::new(*profile));
        }
        for dummy in super::builtin::builtin_dummies() {
            self.register(Box::new(*dummy));
        }

        log::info!(
            "Registered {} families covering {} titles",
            self.factories.len(),
            self.title_map.len()
        );
    }

    /// Check if a title has an organizer
    pub fn has_title(&self, version: GameVersion) -> bool {
        self.title_map.contains_key(&version)
    }

    /// Family id serving a title
    pub fn family_for(&self, version: GameVersion) -> Option<&str> {
        self.title_map.get(&version).map(|s| s.as_str())
    }

    /// Storage shape the title's organizer expects
    pub fn storage_model_for(&self, version: GameVersion) -> Option<StorageModel> {
        let family = self.title_map.get(&version)?;
        self.factories.get(family).map(|f| f.storage_model())
    }

    /// Create an uninitialized organizer for a title
    pub fn create(&self, version: GameVersion) -> Option<BoxedOrganizer> {
        let family = self.title_map.get(&version)?;
        self.factories
            .get(family)
            .map(|f| f.create(version, self.ctx.clone()))
    }

    /// Create and initialize the organizer for a title.
    ///
    /// `Ok(None)` means the title is unsupported; callers should skip
    /// checklist generation for it.
    pub fn organize_flags(
        &self,
        version: GameVersion,
        snapshot: Snapshot,
    ) -> Result<Option<BoxedOrganizer>> {
        let Some(mut organizer) = self.create(version) else {
            log::warn!("No organizer for {}", version);
            return Ok(None);
        };

        organizer.initialize(snapshot)?;
        Ok(Some(organizer))
    }

    /// All titles with an organizer, sorted
    pub fn supported_titles(&self) -> Vec<GameVersion> {
        let mut titles: Vec<GameVersion> = self.title_map.keys().copied().collect();
        titles.sort();
        titles
    }
}
