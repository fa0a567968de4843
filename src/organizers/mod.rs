//! Per-title flag organizers
//!
//! An organizer owns one title's checklist: it binds the snapshot, loads or
//! synthesizes the title's objectives, evaluates them and exports reports.
//! Organizers are created through the [`OrganizerRegistry`], which maps each
//! title to the organizer family that understands its storage layout.

mod builtin;
mod dummy;
mod registry;
mod table;

pub use builtin::{builtin_profiles, UNSUPPORTED_TITLES};
pub use dummy::{DummyFactory, DummyOrganizer};
pub use registry::{OrganizerFactory, OrganizerRegistry};
pub use table::{Synthesizer, TableOrganizer, TitleProfile};

use std::sync::Arc;

use crate::error::{ChecklistError, Result};
use crate::evaluator::{CompletionEvaluator, SourceKind};
use crate::objective::{Objective, ObjectiveCategory};
use crate::report::{self, ChecklistSummary};
use crate::resources::{ArtifactWriter, ResourceCache, ResourceLoader};
use crate::snapshot::{Snapshot, StorageModel};
use crate::version::GameVersion;

/// What an evaluation pass records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMode {
    /// Record only incomplete objectives
    #[default]
    Missing,
    /// Record every objective with its completion state
    Full,
}

/// Categories editable unless a title says otherwise
pub const DEFAULT_EDITABLE: &[ObjectiveCategory] = &[
    ObjectiveCategory::FieldItem,
    ObjectiveCategory::HiddenItem,
    ObjectiveCategory::TrainerBattle,
];

/// Shared services handed to every organizer the registry creates
#[derive(Clone)]
pub struct OrganizerContext {
    pub cache: Arc<ResourceCache>,
    pub loader: Arc<dyn ResourceLoader>,
    /// Bypass the cache when loading definition tables
    pub force_reload: bool,
}

impl OrganizerContext {
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            cache: Arc::new(ResourceCache::new()),
            loader,
            force_reload: false,
        }
    }

    /// Text of a definition table, through the cache
    pub fn load_text(&self, name: &str) -> Result<Arc<str>> {
        self.cache
            .get_or_load(self.loader.as_ref(), name, self.force_reload)
    }
}

/// Receives objectives during an evaluation pass.
///
/// Table rows and objectives synthesized in code both go through the sink,
/// which evaluates them and records them according to the pass mode.
pub struct ObjectiveSink<'a> {
    evaluator: CompletionEvaluator<'a>,
    mode: EvaluationMode,
    out: &'a mut Vec<Objective>,
}

impl<'a> ObjectiveSink<'a> {
    pub fn new(evaluator: CompletionEvaluator<'a>, mode: EvaluationMode, out: &'a mut Vec<Objective>) -> Self {
        Self { evaluator, mode, out }
    }

    /// Evaluate and record an objective defined in code
    pub fn check(
        &mut self,
        flag_id: u32,
        category: ObjectiveCategory,
        location: &str,
        message: &str,
    ) -> Result<()> {
        let complete = self.evaluator.is_complete(flag_id, SourceKind::BoolBlock)?;
        self.record(Objective::synthesized(flag_id, category, location, message), complete);
        Ok(())
    }

    /// Evaluate and record a table-defined objective
    pub fn check_objective(&mut self, objective: &Objective, source: SourceKind) -> Result<()> {
        let complete = self.evaluator.is_complete(objective.flag_id, source)?;
        self.record(objective.clone(), complete);
        Ok(())
    }

    fn record(&mut self, objective: Objective, complete: bool) {
        match self.mode {
            EvaluationMode::Full => self.out.push(objective.with_complete(complete)),
            EvaluationMode::Missing if !complete => self.out.push(objective.with_complete(false)),
            EvaluationMode::Missing => {}
        }
    }
}

/// Run one evaluation pass into `out`.
///
/// `out` is cleared first; if the pass fails it is left empty so a partial
/// checklist is never observed.
pub(crate) fn evaluate_pass<F>(
    snapshot: &Snapshot,
    mode: EvaluationMode,
    out: &mut Vec<Objective>,
    enumerate: F,
) -> Result<()>
where
    F: FnOnce(&mut ObjectiveSink<'_>) -> Result<()>,
{
    out.clear();
    let result = {
        let mut sink = ObjectiveSink::new(CompletionEvaluator::for_snapshot(snapshot), mode, out);
        enumerate(&mut sink)
    };
    if result.is_err() {
        out.clear();
    }
    result
}

/// Check that a snapshot has the storage shape a title expects
pub(crate) fn expect_model(
    version: GameVersion,
    expected: StorageModel,
    snapshot: &Snapshot,
) -> Result<()> {
    let found = snapshot.model();
    if found != expected {
        return Err(ChecklistError::StorageMismatch {
            title: version,
            expected,
            found,
        });
    }
    Ok(())
}

/// One title's checklist.
///
/// `initialize` must succeed before any other operation; until then the
/// operations fail with [`ChecklistError::NotInitialized`].
pub trait FlagsOrganizer {
    /// Title this organizer was created for
    fn version(&self) -> GameVersion;

    /// Storage shape the title uses
    fn storage_model(&self) -> StorageModel;

    /// Bind the snapshot and load the title's objectives.
    ///
    /// Any previous results are discarded.
    fn initialize(&mut self, snapshot: Snapshot) -> Result<()>;

    /// The bound snapshot
    fn snapshot(&self) -> Result<&Snapshot>;

    /// Run an evaluation pass, returning the recorded objectives in
    /// enumeration order
    fn compute_all(&mut self, mode: EvaluationMode) -> Result<&[Objective]>;

    /// Run a missing-only pass
    fn compute_all_missing(&mut self) -> Result<&[Objective]> {
        self.compute_all(EvaluationMode::Missing)
    }

    /// Write the missing-only report
    fn export_missing(&mut self, out: &dyn ArtifactWriter) -> Result<()> {
        let version = self.version();
        let mut list = self.compute_all_missing()?.to_vec();
        report::sort_objectives(&mut list);
        out.write_text(&report::missing_artifact_name(version), &report::render_missing(&list))
    }

    /// Write the full checklist report
    fn export_checklist(&mut self, out: &dyn ArtifactWriter) -> Result<()> {
        let version = self.version();
        let mut list = self.compute_all(EvaluationMode::Full)?.to_vec();
        report::sort_objectives(&mut list);
        out.write_text(&report::checklist_artifact_name(version), &report::render_checklist(&list))
    }

    /// Write every raw flag of the snapshot, independent of the objectives
    fn dump_all_flags(&self, out: &dyn ArtifactWriter) -> Result<()> {
        let text = report::render_flags_dump(self.snapshot()?);
        out.write_text(&report::flags_dump_artifact_name(self.version()), &text)
    }

    /// Whether objectives of `category` may be edited for this title
    fn supports_editing(&self, category: ObjectiveCategory) -> bool {
        DEFAULT_EDITABLE.contains(&category)
    }

    /// Completion counts from a full pass
    fn summary(&mut self) -> Result<ChecklistSummary> {
        let list = self.compute_all(EvaluationMode::Full)?;
        Ok(ChecklistSummary::from_objectives(list))
    }
}

/// Boxed organizer as returned by the registry
pub type BoxedOrganizer = Box<dyn FlagsOrganizer>;
