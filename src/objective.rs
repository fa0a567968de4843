//! Objective descriptors
//!
//! An objective is one trackable unit of progress: an item pickup, a battle,
//! a trade or a story beat, backed by a single flag in the snapshot.

use serde::Serialize;
use std::fmt;

/// Order key given to objectives whose definition leaves it blank
pub const SORT_LAST: i32 = i32::MAX;

/// Kind of objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectiveCategory {
    FieldItem,
    HiddenItem,
    TrainerBattle,
    StationaryBattle,
    InGameTrade,
    Gift,
    GeneralEvent,
    SideEvent,
    StoryEvent,
    BerryTree,
}

impl ObjectiveCategory {
    /// Every category, in declaration order
    pub const ALL: [ObjectiveCategory; 10] = [
        ObjectiveCategory::FieldItem,
        ObjectiveCategory::HiddenItem,
        ObjectiveCategory::TrainerBattle,
        ObjectiveCategory::StationaryBattle,
        ObjectiveCategory::InGameTrade,
        ObjectiveCategory::Gift,
        ObjectiveCategory::GeneralEvent,
        ObjectiveCategory::SideEvent,
        ObjectiveCategory::StoryEvent,
        ObjectiveCategory::BerryTree,
    ];

    /// Label printed in reports
    pub fn label(&self) -> &'static str {
        match self {
            ObjectiveCategory::FieldItem => "FIELD ITEM",
            ObjectiveCategory::HiddenItem => "HIDDEN ITEM",
            ObjectiveCategory::TrainerBattle => "TRAINER BATTLE",
            ObjectiveCategory::StationaryBattle => "STATIONARY BATTLE",
            ObjectiveCategory::InGameTrade => "IN-GAME TRADE",
            ObjectiveCategory::Gift => "GIFT",
            ObjectiveCategory::GeneralEvent => "EVENT",
            ObjectiveCategory::SideEvent => "SIDE EVENT",
            ObjectiveCategory::StoryEvent => "STORY EVENT",
            ObjectiveCategory::BerryTree => "BERRY TREE",
        }
    }
}

impl fmt::Display for ObjectiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single objective and its completion state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Objective {
    /// Sort precedence in reports
    pub order_key: i32,
    /// Flag index (dense) or block key (keyed) backing this objective
    pub flag_id: u32,
    /// Category label, verbatim from the definition table for table rows
    pub category: String,
    /// Location, possibly empty
    pub location: String,
    /// Human-readable description
    pub message: String,
    /// Set by the evaluation pass
    pub is_complete: bool,
}

impl Objective {
    /// Create an objective synthesized in code rather than read from a table.
    ///
    /// Synthesized objectives sort by their flag id.
    pub fn synthesized(
        flag_id: u32,
        category: ObjectiveCategory,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            order_key: i32::try_from(flag_id).unwrap_or(SORT_LAST),
            flag_id,
            category: category.label().to_string(),
            location: location.into(),
            message: message.into(),
            is_complete: false,
        }
    }

    /// Mark completion state, returning the objective
    pub fn with_complete(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }

    /// Rendered report line, CRLF-terminated
    pub fn render_line(&self) -> String {
        format!("{}\r\n", self)
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{} - {}", self.category, self.message)
        } else {
            write!(f, "{} - {} - {}", self.category, self.location, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_location() {
        let obj = Objective::synthesized(0x2A, ObjectiveCategory::FieldItem, "Route 1", "Potion");
        assert_eq!(obj.render_line(), "FIELD ITEM - Route 1 - Potion\r\n");
    }

    #[test]
    fn test_render_without_location() {
        let obj = Objective::synthesized(0x10, ObjectiveCategory::GeneralEvent, "", "Got the Pokedex");
        assert_eq!(obj.render_line(), "EVENT - Got the Pokedex\r\n");
    }

    #[test]
    fn test_synthesized_order_key_is_flag_id() {
        let obj = Objective::synthesized(300, ObjectiveCategory::Gift, "", "Eevee");
        assert_eq!(obj.order_key, 300);
        assert!(!obj.is_complete);

        let huge = Objective::synthesized(u32::MAX, ObjectiveCategory::Gift, "", "x");
        assert_eq!(huge.order_key, SORT_LAST);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ObjectiveCategory::InGameTrade.label(), "IN-GAME TRADE");
        assert_eq!(ObjectiveCategory::GeneralEvent.label(), "EVENT");
        assert_eq!(ObjectiveCategory::ALL.len(), 10);
    }
}
