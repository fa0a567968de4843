//! Report rendering
//!
//! Turns an organizer's evaluated objectives into the text artifacts a user
//! reads: the missing-only list, the full checklist and the raw flag dump.
//! Every line ends with CRLF.

use serde::Serialize;

use crate::objective::Objective;
use crate::snapshot::{BlockStore, EventFlagArray, Snapshot};
use crate::version::GameVersion;

/// Artifact name of the missing-only report
pub fn missing_artifact_name(version: GameVersion) -> String {
    format!("missing_events_{}.txt", version)
}

/// Artifact name of the checklist report
pub fn checklist_artifact_name(version: GameVersion) -> String {
    format!("checklist_{}.txt", version)
}

/// Artifact name of the raw flag dump
pub fn flags_dump_artifact_name(version: GameVersion) -> String {
    format!("flags_dump_{}.txt", version)
}

/// Sort objectives by order key. Ties keep their original order.
pub fn sort_objectives(objectives: &mut [Objective]) {
    objectives.sort_by_key(|o| o.order_key);
}

/// Concatenated lines of every incomplete objective
pub fn render_missing(objectives: &[Objective]) -> String {
    objectives
        .iter()
        .filter(|o| !o.is_complete)
        .map(Objective::render_line)
        .collect()
}

/// Concatenated lines of every objective, each prefixed with `[x]` or `[ ]`
pub fn render_checklist(objectives: &[Objective]) -> String {
    let mut out = String::new();
    for obj in objectives {
        let marker = if obj.is_complete { "x" } else { " " };
        out.push_str(&format!("[{}] {}\r\n", marker, obj));
    }
    out
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// One line per flag of a dense array, 4 hex digits wide
pub fn render_dense_dump(flags: &dyn EventFlagArray) -> String {
    let mut out = String::with_capacity(flags.len() * 16);
    for index in 0..flags.len() {
        out.push_str(&format!("FLAG_0x{:04X} {}\r\n", index, bool_text(flags.get(index))));
    }
    out
}

/// One line per boolean block of a keyed store, 8 hex digits wide, in key
/// order. Non-boolean blocks are skipped.
pub fn render_keyed_dump(blocks: &dyn BlockStore) -> String {
    let mut keys = blocks.keys();
    keys.sort_unstable();

    let mut out = String::new();
    for key in keys {
        if let Some(value) = blocks.block_type(key).and_then(|t| t.as_bool()) {
            out.push_str(&format!("FLAG_0x{:08X} {}\r\n", key, bool_text(value)));
        }
    }
    out
}

/// Raw dump in the format of the snapshot's storage shape
pub fn render_flags_dump(snapshot: &Snapshot) -> String {
    match snapshot {
        Snapshot::Dense(flags) => render_dense_dump(flags.as_ref()),
        Snapshot::Keyed(blocks) => render_keyed_dump(blocks.as_ref()),
    }
}

// =============================================================================
// Progress summary
// =============================================================================

/// Progress of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub category: String,
    pub complete: usize,
    pub total: usize,
}

/// Completion counts over a full checklist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistSummary {
    pub complete: usize,
    pub total: usize,
    /// Per category, in order of first appearance
    pub categories: Vec<CategoryProgress>,
}

impl ChecklistSummary {
    /// Count completion over evaluated objectives
    pub fn from_objectives(objectives: &[Objective]) -> Self {
        let mut summary = ChecklistSummary::default();

        for obj in objectives {
            summary.total += 1;
            if obj.is_complete {
                summary.complete += 1;
            }

            let idx = match summary
                .categories
                .iter()
                .position(|c| c.category == obj.category)
            {
                Some(idx) => idx,
                None => {
                    summary.categories.push(CategoryProgress {
                        category: obj.category.clone(),
                        complete: 0,
                        total: 0,
                    });
                    summary.categories.len() - 1
                }
            };

            let progress = &mut summary.categories[idx];
            progress.total += 1;
            if obj.is_complete {
                progress.complete += 1;
            }
        }

        summary
    }

    /// Completed objectives as a percentage (100 for an empty checklist)
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.complete as f64 * 100.0 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::ObjectiveCategory;
    use crate::snapshot::BlockType;
    use std::collections::BTreeMap;

    fn obj(order_key: i32, message: &str, is_complete: bool) -> Objective {
        Objective {
            order_key,
            flag_id: 0,
            category: "GIFT".to_string(),
            location: String::new(),
            message: message.to_string(),
            is_complete,
        }
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(missing_artifact_name(GameVersion::FRLG), "missing_events_FRLG.txt");
        assert_eq!(checklist_artifact_name(GameVersion::Pt), "checklist_Pt.txt");
        assert_eq!(flags_dump_artifact_name(GameVersion::SV), "flags_dump_SV.txt");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut list = vec![
            obj(3, "c", false),
            obj(1, "a1", false),
            obj(2, "b", false),
            obj(1, "a2", false),
            obj(i32::MAX, "last", false),
            obj(1, "a3", false),
        ];
        sort_objectives(&mut list);

        let order: Vec<&str> = list.iter().map(|o| o.message.as_str()).collect();
        assert_eq!(order, vec!["a1", "a2", "a3", "b", "c", "last"]);
        assert!(list.windows(2).all(|w| w[0].order_key <= w[1].order_key));
    }

    #[test]
    fn test_render_missing_skips_complete() {
        let list = vec![obj(1, "a", false), obj(2, "b", true), obj(3, "c", false)];
        assert_eq!(render_missing(&list), "GIFT - a\r\nGIFT - c\r\n");
    }

    #[test]
    fn test_render_checklist_markers() {
        let mut list = vec![obj(2, "done", true), obj(1, "todo", false)];
        sort_objectives(&mut list);
        assert_eq!(
            render_checklist(&list),
            "[ ] GIFT - todo\r\n[x] GIFT - done\r\n"
        );
    }

    #[test]
    fn test_dense_dump() {
        let flags = vec![false, true];
        assert_eq!(
            render_dense_dump(&flags),
            "FLAG_0x0000 False\r\nFLAG_0x0001 True\r\n"
        );
    }

    #[test]
    fn test_keyed_dump_only_bool_blocks() {
        let blocks = BTreeMap::from([
            (0xBEEFu32, BlockType::Bool2),
            (0x10u32, BlockType::Bool1),
            (0x20u32, BlockType::Other(7)),
        ]);
        assert_eq!(
            render_keyed_dump(&blocks),
            "FLAG_0x00000010 False\r\nFLAG_0x0000BEEF True\r\n"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut a = Objective::synthesized(1, ObjectiveCategory::FieldItem, "", "a");
        a.is_complete = true;
        let b = Objective::synthesized(2, ObjectiveCategory::FieldItem, "", "b");
        let c = Objective::synthesized(3, ObjectiveCategory::Gift, "", "c").with_complete(true);

        let summary = ChecklistSummary::from_objectives(&[a, b, c]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.complete, 2);
        assert_eq!(
            summary.categories,
            vec![
                CategoryProgress { category: "FIELD ITEM".into(), complete: 1, total: 2 },
                CategoryProgress { category: "GIFT".into(), complete: 1, total: 1 },
            ]
        );
        assert!((summary.percent_complete() - 66.666).abs() < 0.01);
        assert_eq!(ChecklistSummary::default().percent_complete(), 100.0);
    }
}
