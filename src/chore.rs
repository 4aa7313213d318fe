//! Domain model: chores, roomies, and per-cycle assignments.
//!
//! Conversion from Notion records happens here, at the boundary. Pages
//! without a usable title are rejected (the caller decides whether that
//! is a skip or a warning); everything downstream works with fully-typed
//! values.

use crate::notion::types::Record;
use crate::rotation;

/// Notion column names used by the chores workspace.
pub mod columns {
    /// Title column on every database.
    pub const NAME: &str = "name";
    /// Due-date column on the to-dos database.
    pub const DUE_DATE: &str = "do by";
    /// Relation from a to-do to the responsible roomie.
    pub const RESPONSIBLE: &str = "responsible roomie";
    /// Relation from a to-do to its source chore.
    pub const CHORE: &str = "chore";
    /// Recurrence period column on the chores database, in weeks.
    pub const PERIOD_WEEKS: &str = "every n weeks";
}

/// A roommate on the rotation roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roomie {
    /// Notion page id, used for the responsible-roomie relation.
    pub id: String,
    /// Display name from the title property.
    pub name: String,
    /// Emoji from the page icon, if any.
    pub emoji: Option<String>,
}

impl Roomie {
    /// Build a roomie from a fetched record.
    ///
    /// Returns `None` when the page has no usable title.
    pub fn from_record(record: &Record) -> Option<Self> {
        let name = record.title()?.to_string();
        Some(Self {
            id: record.id.clone(),
            name,
            emoji: record.emoji().map(str::to_string),
        })
    }
}

/// A chore definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chore {
    /// Notion page id, used for the chore relation and block copying.
    pub id: String,
    /// Display name from the title property.
    pub name: String,
    /// Emoji from the page icon, copied onto created records.
    pub emoji: Option<String>,
    /// Recurrence period in weeks, normalized to be at least 1.
    pub period_weeks: u32,
}

impl Chore {
    /// Build a chore from a fetched record.
    ///
    /// Returns `None` when the page has no usable title (the original
    /// workspace keeps scratch pages in the chores database; they are
    /// skipped). The recurrence period comes from the
    /// [`columns::PERIOD_WEEKS`] number column, defaulting to weekly.
    pub fn from_record(record: &Record) -> Option<Self> {
        let name = record.title()?.to_string();
        Some(Self {
            id: record.id.clone(),
            name,
            emoji: record.emoji().map(str::to_string),
            period_weeks: rotation::normalize_period(record.number(columns::PERIOD_WEEKS)),
        })
    }

    /// Whether this chore is due on the given week of the rotation.
    pub fn is_due(&self, weeks_elapsed: i64) -> bool {
        rotation::is_due(self.period_weeks, weeks_elapsed)
    }
}

/// One chore assigned to one roomie for the current cycle. Derived every
/// run, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The chore's 0-based position in the sorted, unfiltered sequence.
    pub chore_ordinal: usize,
    /// The due chore.
    pub chore: Chore,
    /// The roomie responsible this cycle.
    pub roomie: Roomie,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn chore_from_full_record() {
        let chore = Chore::from_record(&record(json!({
            "id": "chore-1",
            "icon": {"type": "emoji", "emoji": "🍳"},
            "properties": {
                "name": {"type": "title", "title": [{"plain_text": "Kitchen"}]},
                "every n weeks": {"type": "number", "number": 2}
            }
        })))
        .unwrap();
        assert_eq!(chore.id, "chore-1");
        assert_eq!(chore.name, "Kitchen");
        assert_eq!(chore.emoji.as_deref(), Some("🍳"));
        assert_eq!(chore.period_weeks, 2);
    }

    #[test]
    fn chore_without_period_is_weekly() {
        let chore = Chore::from_record(&record(json!({
            "id": "chore-1",
            "properties": {
                "name": {"type": "title", "title": [{"plain_text": "Trash"}]}
            }
        })))
        .unwrap();
        assert_eq!(chore.period_weeks, 1);
        assert!(chore.emoji.is_none());
    }

    #[test]
    fn chore_with_empty_title_rejected() {
        let result = Chore::from_record(&record(json!({
            "id": "chore-1",
            "properties": {"name": {"type": "title", "title": []}}
        })));
        assert!(result.is_none());
    }

    #[test]
    fn roomie_from_record() {
        let roomie = Roomie::from_record(&record(json!({
            "id": "roomie-1",
            "icon": {"type": "emoji", "emoji": "🦝"},
            "properties": {
                "name": {"type": "title", "title": [{"plain_text": "Sam"}]}
            }
        })))
        .unwrap();
        assert_eq!(roomie.id, "roomie-1");
        assert_eq!(roomie.name, "Sam");
        assert_eq!(roomie.emoji.as_deref(), Some("🦝"));
    }

    #[test]
    fn biweekly_chore_dueness() {
        let chore = Chore {
            id: "chore-1".into(),
            name: "Fridge".into(),
            emoji: None,
            period_weeks: 2,
        };
        assert!(chore.is_due(0));
        assert!(!chore.is_due(1));
        assert!(chore.is_due(2));
    }
}
