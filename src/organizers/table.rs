//! Table-driven organizers
//!
//! Most titles list their objectives in a definition table. Some also (or
//! only) enumerate objectives in code, e.g. a run of berry trees laid out on
//! consecutive flags; those provide a [`Synthesizer`]. A [`TitleProfile`]
//! describes one title family and doubles as its registry factory.

use std::fmt;

use super::{
    evaluate_pass, expect_model, BoxedOrganizer, EvaluationMode, FlagsOrganizer, ObjectiveSink,
    OrganizerContext, OrganizerFactory, DEFAULT_EDITABLE,
};
use crate::definitions::{parse_definitions, parse_sourced_definitions};
use crate::error::{ChecklistError, Result};
use crate::evaluator::SourceKind;
use crate::objective::{Objective, ObjectiveCategory};
use crate::snapshot::{Snapshot, StorageModel};
use crate::version::GameVersion;

/// Enumerates objectives in code during an evaluation pass
pub type Synthesizer = fn(&mut ObjectiveSink<'_>) -> Result<()>;

/// Static description of a title family
#[derive(Clone, Copy)]
pub struct TitleProfile {
    /// Family id (e.g. "gen4_hgss")
    pub family: &'static str,
    /// Titles served by this family
    pub titles: &'static [GameVersion],
    /// Storage shape of the family's snapshots
    pub model: StorageModel,
    /// Definition table resource, if any
    pub resource: Option<&'static str>,
    /// Objectives enumerated in code, run after the table rows
    pub synthesizer: Option<Synthesizer>,
    /// Editable categories; `None` uses the default policy
    pub editable: Option<&'static [ObjectiveCategory]>,
}

impl TitleProfile {
    /// Dense family driven by a definition table
    pub const fn dense(
        family: &'static str,
        titles: &'static [GameVersion],
        resource: &'static str,
    ) -> Self {
        Self {
            family,
            titles,
            model: StorageModel::Dense,
            resource: Some(resource),
            synthesizer: None,
            editable: None,
        }
    }

    /// Keyed family driven by a definition table with a source column
    pub const fn keyed(
        family: &'static str,
        titles: &'static [GameVersion],
        resource: &'static str,
    ) -> Self {
        Self {
            family,
            titles,
            model: StorageModel::Keyed,
            resource: Some(resource),
            synthesizer: None,
            editable: None,
        }
    }

    /// Dense family whose objectives are all enumerated in code
    pub const fn synthesized(
        family: &'static str,
        titles: &'static [GameVersion],
        synthesizer: Synthesizer,
    ) -> Self {
        Self {
            family,
            titles,
            model: StorageModel::Dense,
            resource: None,
            synthesizer: Some(synthesizer),
            editable: None,
        }
    }

    /// Add objectives enumerated in code
    pub const fn with_synthesizer(mut self, synthesizer: Synthesizer) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Override the editable categories
    pub const fn with_editable(mut self, editable: &'static [ObjectiveCategory]) -> Self {
        self.editable = Some(editable);
        self
    }
}

impl fmt::Debug for TitleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleProfile")
            .field("family", &self.family)
            .field("titles", &self.titles)
            .field("model", &self.model)
            .field("resource", &self.resource)
            .field("synthesized", &self.synthesizer.is_some())
            .finish()
    }
}

impl OrganizerFactory for TitleProfile {
    fn family(&self) -> &'static str {
        self.family
    }

    fn titles(&self) -> &[GameVersion] {
        self.titles
    }

    fn storage_model(&self) -> StorageModel {
        self.model
    }

    fn create(&self, version: GameVersion, ctx: OrganizerContext) -> BoxedOrganizer {
        Box::new(TableOrganizer::new(version, *self, ctx))
    }
}

/// Organizer for a table-driven (and optionally code-synthesized) title
pub struct TableOrganizer {
    version: GameVersion,
    profile: TitleProfile,
    ctx: OrganizerContext,
    snapshot: Option<Snapshot>,
    definitions: Vec<(Objective, SourceKind)>,
    results: Vec<Objective>,
}

impl TableOrganizer {
    pub fn new(version: GameVersion, profile: TitleProfile, ctx: OrganizerContext) -> Self {
        Self {
            version,
            profile,
            ctx,
            snapshot: None,
            definitions: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Number of table-defined objectives
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    fn load_definitions(&self) -> Result<Vec<(Objective, SourceKind)>> {
        let Some(resource) = self.profile.resource else {
            return Ok(Vec::new());
        };

        let text = self.ctx.load_text(resource)?;
        match self.profile.model {
            StorageModel::Dense => parse_definitions(&text)
                .map(|row| row.map(|obj| (obj, SourceKind::BoolBlock)))
                .collect(),
            StorageModel::Keyed => parse_sourced_definitions(&text).collect(),
        }
    }
}

impl FlagsOrganizer for TableOrganizer {
    fn version(&self) -> GameVersion {
        self.version
    }

    fn storage_model(&self) -> StorageModel {
        self.profile.model
    }

    fn initialize(&mut self, snapshot: Snapshot) -> Result<()> {
        self.results.clear();
        self.definitions.clear();
        self.snapshot = None;

        expect_model(self.version, self.profile.model, &snapshot)?;

        let definitions = self.load_definitions()?;
        log::debug!(
            "{}: loaded {} objectives for {}",
            self.profile.family,
            definitions.len(),
            self.version
        );

        self.definitions = definitions;
        self.snapshot = Some(snapshot);
        Ok(())
    }

    fn snapshot(&self) -> Result<&Snapshot> {
        self.snapshot.as_ref().ok_or(ChecklistError::NotInitialized)
    }

    fn compute_all(&mut self, mode: EvaluationMode) -> Result<&[Objective]> {
        let snapshot = self.snapshot.as_ref().ok_or(ChecklistError::NotInitialized)?;
        let definitions = &self.definitions;
        let synthesizer = self.profile.synthesizer;

        evaluate_pass(snapshot, mode, &mut self.results, |sink| {
            for (objective, source) in definitions {
                sink.check_objective(objective, *source)?;
            }
            match synthesizer {
                Some(synthesize) => synthesize(sink),
                None => Ok(()),
            }
        })?;

        log::debug!(
            "{}: {:?} pass recorded {} objectives",
            self.version,
            mode,
            self.results.len()
        );
        Ok(&self.results)
    }

    fn supports_editing(&self, category: ObjectiveCategory) -> bool {
        self.profile
            .editable
            .unwrap_or(DEFAULT_EDITABLE)
            .contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::InMemoryResources;
    use crate::snapshot::BlockType;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const TABLE: &str = "2\t1\tFIELD ITEM\tRoute 1\t\tPotion\n\
                         1\t3\tGIFT\tPallet Town\tLab\tStarter\n\
                         \t0\tEVENT\t\t\tIntro\n";

    fn context(resources: InMemoryResources) -> OrganizerContext {
        OrganizerContext::new(Arc::new(resources))
    }

    fn dense_profile() -> TitleProfile {
        TitleProfile::dense("test_dense", &[GameVersion::RB], "chkdb_test.txt")
    }

    fn berry_trees(sink: &mut ObjectiveSink<'_>) -> Result<()> {
        for (n, flag) in (4u32..6).enumerate() {
            sink.check(
                flag,
                ObjectiveCategory::BerryTree,
                "Route 104",
                &format!("Berry Tree #{}", n + 1),
            )?;
        }
        Ok(())
    }

    #[test]
    fn test_uninitialized_operations_fail() {
        let ctx = context(InMemoryResources::new());
        let mut org = TableOrganizer::new(GameVersion::RB, dense_profile(), ctx);

        assert!(matches!(org.compute_all_missing(), Err(ChecklistError::NotInitialized)));
        assert!(matches!(org.snapshot(), Err(ChecklistError::NotInitialized)));
        let out = InMemoryResources::new();
        assert!(matches!(org.dump_all_flags(&out), Err(ChecklistError::NotInitialized)));
    }

    #[test]
    fn test_dense_table_missing_and_full() {
        let ctx = context(InMemoryResources::new().with_resource("chkdb_test.txt", TABLE));
        let mut org = TableOrganizer::new(GameVersion::RB, dense_profile(), ctx);
        org.initialize(Snapshot::dense(vec![true, false, false, true])).unwrap();
        assert_eq!(org.definition_count(), 3);

        let missing: Vec<u32> = org.compute_all_missing().unwrap().iter().map(|o| o.flag_id).collect();
        assert_eq!(missing, vec![1]);

        let full = org.compute_all(EvaluationMode::Full).unwrap();
        assert_eq!(full.len(), 3);
        assert!(!full[0].is_complete);
        assert!(full[1].is_complete);
        assert!(full[2].is_complete);

        // A full pass does not leak into the next missing pass
        let missing_again = org.compute_all_missing().unwrap();
        assert_eq!(missing_again.len(), 1);
    }

    #[test]
    fn test_table_out_of_range_flag() {
        let ctx = context(InMemoryResources::new().with_resource("chkdb_test.txt", TABLE));
        let mut org = TableOrganizer::new(GameVersion::RB, dense_profile(), ctx);
        org.initialize(Snapshot::dense(vec![false; 2])).unwrap();

        let err = org.compute_all(EvaluationMode::Full).unwrap_err();
        assert!(matches!(err, ChecklistError::IndexOutOfRange { flag_id: 3, len: 2 }));
    }

    #[test]
    fn test_malformed_table_aborts_initialize() {
        let ctx = context(
            InMemoryResources::new().with_resource("chkdb_test.txt", "1\t1\tGIFT\t\t\tOk\nbad\n"),
        );
        let mut org = TableOrganizer::new(GameVersion::RB, dense_profile(), ctx);

        let err = org.initialize(Snapshot::dense(vec![false; 4])).unwrap_err();
        assert!(matches!(err, ChecklistError::MalformedDefinition { line: 2, .. }));
        assert_eq!(org.definition_count(), 0);
        assert!(matches!(org.compute_all_missing(), Err(ChecklistError::NotInitialized)));
    }

    #[test]
    fn test_storage_mismatch() {
        let ctx = context(InMemoryResources::new().with_resource("chkdb_test.txt", TABLE));
        let mut org = TableOrganizer::new(GameVersion::RB, dense_profile(), ctx);

        let err = org
            .initialize(Snapshot::keyed(BTreeMap::<u32, BlockType>::new()))
            .unwrap_err();
        assert!(matches!(err, ChecklistError::StorageMismatch { .. }));
    }

    #[test]
    fn test_failed_reinitialize_drops_previous_snapshot() {
        let ctx = context(InMemoryResources::new().with_resource("chkdb_test.txt", TABLE));
        let mut org = TableOrganizer::new(GameVersion::RB, dense_profile(), ctx);
        org.initialize(Snapshot::dense(vec![false; 4])).unwrap();
        assert_eq!(org.compute_all(EvaluationMode::Full).unwrap().len(), 3);

        let err = org
            .initialize(Snapshot::keyed(BTreeMap::<u32, BlockType>::new()))
            .unwrap_err();
        assert!(matches!(err, ChecklistError::StorageMismatch { .. }));
        assert_eq!(org.definition_count(), 0);
        assert!(matches!(
            org.compute_all(EvaluationMode::Full),
            Err(ChecklistError::NotInitialized)
        ));
    }

    #[test]
    fn test_synthesized_objectives() {
        let profile = TitleProfile::synthesized("test_berries", &[GameVersion::E], berry_trees);
        let mut org = TableOrganizer::new(GameVersion::E, profile, context(InMemoryResources::new()));
        org.initialize(Snapshot::dense(vec![false, false, false, false, true, false])).unwrap();

        let full = org.compute_all(EvaluationMode::Full).unwrap();
        assert_eq!(full.len(), 2);
        assert_eq!(full[0].category, "BERRY TREE");
        assert_eq!(full[0].order_key, 4);
        assert!(full[0].is_complete);
        assert_eq!(full[1].message, "Berry Tree #2");

        let missing = org.compute_all_missing().unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].flag_id, 5);
    }

    #[test]
    fn test_table_plus_synthesizer() {
        let profile = dense_profile().with_synthesizer(berry_trees);
        let ctx = context(InMemoryResources::new().with_resource("chkdb_test.txt", TABLE));
        let mut org = TableOrganizer::new(GameVersion::RB, profile, ctx);
        org.initialize(Snapshot::dense(vec![false; 6])).unwrap();

        assert_eq!(org.compute_all(EvaluationMode::Full).unwrap().len(), 5);
    }

    #[test]
    fn test_keyed_table() {
        let table = "1\tA0\tEVENT\t\t\tDone\n\
                     2\tB0\tEVENT\t\t\tNot done\t0\n\
                     3\tC0\tEVENT\t\t\tOther format\t-\n";
        let profile = TitleProfile::keyed("test_keyed", &[GameVersion::PLA], "chkdb_keyed.txt");
        let ctx = context(InMemoryResources::new().with_resource("chkdb_keyed.txt", table));
        let mut org = TableOrganizer::new(GameVersion::PLA, profile, ctx);

        org.initialize(Snapshot::keyed(BTreeMap::from([
            (0xA0u32, BlockType::Bool2),
            (0xB0u32, BlockType::Bool1),
        ])))
        .unwrap();

        let missing: Vec<&str> = org
            .compute_all_missing()
            .unwrap()
            .iter()
            .map(|o| o.message.as_str())
            .collect();
        assert_eq!(missing, vec!["Not done", "Other format"]);
    }

    #[test]
    fn test_keyed_table_unknown_flag() {
        let profile = TitleProfile::keyed("test_keyed", &[GameVersion::PLA], "chkdb_keyed.txt");
        let ctx = context(
            InMemoryResources::new().with_resource("chkdb_keyed.txt", "1\t8\tEVENT\t\t\tMissing block\n"),
        );
        let mut org = TableOrganizer::new(GameVersion::PLA, profile, ctx);
        org.initialize(Snapshot::keyed(BTreeMap::from([(7u32, BlockType::Bool2)])))
            .unwrap();

        let err = org.compute_all_missing().unwrap_err();
        assert!(matches!(err, ChecklistError::UnknownFlag { flag_id: 8 }));
    }

    #[test]
    fn test_editing_policy() {
        let ctx = context(InMemoryResources::new());
        let org = TableOrganizer::new(GameVersion::RB, dense_profile(), ctx.clone());
        assert!(org.supports_editing(ObjectiveCategory::FieldItem));
        assert!(org.supports_editing(ObjectiveCategory::TrainerBattle));
        assert!(!org.supports_editing(ObjectiveCategory::Gift));

        let profile = dense_profile().with_editable(&[ObjectiveCategory::Gift]);
        let org = TableOrganizer::new(GameVersion::RB, profile, ctx);
        assert!(org.supports_editing(ObjectiveCategory::Gift));
        assert!(!org.supports_editing(ObjectiveCategory::FieldItem));
    }
}
