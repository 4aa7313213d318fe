//! Wire types for the Notion API.
//!
//! Property values are modeled as a tagged union discriminated by the
//! `type` field, so a malformed or missing property surfaces at the
//! boundary instead of turning into a silent empty value deeper in the
//! planner. Property types the crate never reads collapse into
//! [`PropertyValue::Unsupported`].
//!
//! Content blocks are copied opaquely: only the `type` discriminator and
//! its matching payload are carried, never interpreted.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One page of results from `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Pages in this result page.
    pub results: Vec<Record>,
    /// Whether another page of results exists.
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page, present when `has_more` is true.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One page of results from `GET /v1/blocks/{id}/children`.
///
/// Block payloads stay as raw JSON; [`Block::from_api`] lifts them into
/// the opaque copy representation.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockChildrenResponse {
    /// Raw block objects in this result page.
    pub results: Vec<serde_json::Value>,
    /// Whether another page of results exists.
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page, present when `has_more` is true.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A page fetched from a Notion database.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Opaque page id.
    pub id: String,
    /// Creation timestamp (RFC 3339); used as the stable sort key.
    #[serde(default)]
    pub created_time: String,
    /// Named properties, each tagged with its type.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    /// Optional page icon.
    #[serde(default)]
    pub icon: Option<Icon>,
}

impl Record {
    /// The page title: the first non-empty fragment of the first
    /// title-typed property, or `None` if the page has no usable title.
    pub fn title(&self) -> Option<&str> {
        self.properties.values().find_map(|prop| match prop {
            PropertyValue::Title { title } => title
                .iter()
                .map(RichText::content)
                .find(|text| !text.is_empty()),
            _ => None,
        })
    }

    /// The page's emoji icon glyph, if it has one.
    pub fn emoji(&self) -> Option<&str> {
        match &self.icon {
            Some(Icon::Emoji { emoji }) => Some(emoji.as_str()),
            _ => None,
        }
    }

    /// The value of a number-typed property by column name.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.properties.get(name) {
            Some(PropertyValue::Number { number }) => *number,
            _ => None,
        }
    }
}

/// Sort records by `(created_time, id)`.
///
/// Notion documents no ordering for unsorted database queries, and the
/// rotation's fairness depends on stable ordinals across runs, so the
/// fetch order is never trusted.
pub fn sort_by_stable_key(records: &mut [Record]) {
    records.sort_by(|a, b| {
        a.created_time
            .cmp(&b.created_time)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// A property value tagged by its Notion type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// A title property: an array of rich-text fragments.
    Title {
        /// Rich-text fragments making up the title.
        title: Vec<RichText>,
    },
    /// A date property.
    Date {
        /// The date value, absent when the cell is empty.
        date: Option<DateValue>,
    },
    /// A relation property: links to other pages.
    Relation {
        /// Linked page references.
        relation: Vec<RelationRef>,
    },
    /// A number property.
    Number {
        /// The numeric value, absent when the cell is empty.
        number: Option<f64>,
    },
    /// Any property type this crate does not read.
    #[serde(other)]
    Unsupported,
}

/// A rich-text fragment within a title property.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    /// Rendered plain text, as reported by the API.
    #[serde(default)]
    pub plain_text: String,
    /// Underlying text payload.
    #[serde(default)]
    pub text: Option<TextContent>,
}

impl RichText {
    /// The fragment's text, preferring `plain_text` over the raw payload.
    pub fn content(&self) -> &str {
        if !self.plain_text.is_empty() {
            &self.plain_text
        } else {
            self.text.as_ref().map(|t| t.content.as_str()).unwrap_or("")
        }
    }
}

/// The `text` payload of a rich-text fragment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextContent {
    /// Literal text content.
    #[serde(default)]
    pub content: String,
}

/// A date property value.
#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    /// Start date, ISO `YYYY-MM-DD` (optionally with a time suffix).
    pub start: String,
}

/// A reference to a related page.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationRef {
    /// Id of the related page.
    pub id: String,
}

/// A page icon.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    /// An emoji icon.
    Emoji {
        /// The emoji glyph.
        emoji: String,
    },
    /// Uploaded or external image icons, which this crate never copies.
    #[serde(other)]
    Other,
}

/// An opaque copy of a content block: the type discriminator plus its
/// type-keyed payload, nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block type discriminator (`paragraph`, `to_do`, ...).
    pub block_type: String,
    /// The payload stored under the type key, carried verbatim.
    pub payload: serde_json::Value,
}

impl Block {
    /// Lift a raw API block object into an opaque copy.
    ///
    /// Returns `None` when the object lacks a `type` field or the
    /// type-keyed payload, which also filters out block types (like
    /// `unsupported`) that cannot be recreated.
    pub fn from_api(value: &serde_json::Value) -> Option<Self> {
        let block_type = value.get("type")?.as_str()?.to_string();
        let payload = value.get(&block_type)?.clone();
        Some(Self {
            block_type,
            payload,
        })
    }

    /// The block object shape accepted by page creation.
    pub fn to_create_request(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("object".into(), serde_json::Value::String("block".into()));
        object.insert(
            "type".into(),
            serde_json::Value::String(self.block_type.clone()),
        );
        object.insert(self.block_type.clone(), self.payload.clone());
        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_from(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn title_extracted_from_title_property() {
        let record = record_from(json!({
            "id": "page-1",
            "created_time": "2025-01-01T00:00:00.000Z",
            "properties": {
                "name": {
                    "type": "title",
                    "title": [{"plain_text": "Kitchen", "text": {"content": "Kitchen"}}]
                }
            }
        }));
        assert_eq!(record.title(), Some("Kitchen"));
    }

    #[test]
    fn title_falls_back_to_text_content() {
        let record = record_from(json!({
            "id": "page-1",
            "properties": {
                "name": {"type": "title", "title": [{"text": {"content": "Bathroom"}}]}
            }
        }));
        assert_eq!(record.title(), Some("Bathroom"));
    }

    #[test]
    fn empty_title_is_none() {
        let record = record_from(json!({
            "id": "page-1",
            "properties": {"name": {"type": "title", "title": []}}
        }));
        assert_eq!(record.title(), None);
    }

    #[test]
    fn missing_title_property_is_none() {
        let record = record_from(json!({
            "id": "page-1",
            "properties": {"count": {"type": "number", "number": 3}}
        }));
        assert_eq!(record.title(), None);
    }

    #[test]
    fn emoji_icon_extracted() {
        let record = record_from(json!({
            "id": "page-1",
            "icon": {"type": "emoji", "emoji": "🍳"},
            "properties": {}
        }));
        assert_eq!(record.emoji(), Some("🍳"));
    }

    #[test]
    fn non_emoji_icon_ignored() {
        let record = record_from(json!({
            "id": "page-1",
            "icon": {"type": "external", "external": {"url": "https://x/y.png"}},
            "properties": {}
        }));
        assert_eq!(record.emoji(), None);
    }

    #[test]
    fn number_property_read_by_name() {
        let record = record_from(json!({
            "id": "page-1",
            "properties": {"every n weeks": {"type": "number", "number": 2}}
        }));
        assert_eq!(record.number("every n weeks"), Some(2.0));
        assert_eq!(record.number("absent"), None);
    }

    #[test]
    fn empty_number_cell_is_none() {
        let record = record_from(json!({
            "id": "page-1",
            "properties": {"every n weeks": {"type": "number", "number": null}}
        }));
        assert_eq!(record.number("every n weeks"), None);
    }

    #[test]
    fn unknown_property_types_become_unsupported() {
        let record = record_from(json!({
            "id": "page-1",
            "properties": {
                "status": {"type": "select", "select": {"name": "done"}}
            }
        }));
        assert!(matches!(
            record.properties.get("status"),
            Some(PropertyValue::Unsupported)
        ));
    }

    #[test]
    fn stable_sort_orders_by_created_time_then_id() {
        let mut records = vec![
            record_from(json!({"id": "b", "created_time": "2025-02-01T00:00:00.000Z"})),
            record_from(json!({"id": "c", "created_time": "2025-01-01T00:00:00.000Z"})),
            record_from(json!({"id": "a", "created_time": "2025-02-01T00:00:00.000Z"})),
        ];
        sort_by_stable_key(&mut records);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn block_round_trips_type_and_payload() {
        let raw = json!({
            "id": "block-1",
            "type": "paragraph",
            "paragraph": {"rich_text": [{"text": {"content": "wipe counters"}}]}
        });
        let block = Block::from_api(&raw).unwrap();
        assert_eq!(block.block_type, "paragraph");

        let request = block.to_create_request();
        assert_eq!(request["object"], "block");
        assert_eq!(request["type"], "paragraph");
        assert_eq!(request["paragraph"], raw["paragraph"]);
        // Read-only fields are not forwarded to page creation.
        assert!(request.get("id").is_none());
    }

    #[test]
    fn block_without_payload_is_skipped() {
        assert_eq!(Block::from_api(&json!({"type": "unsupported"})), None);
        assert_eq!(Block::from_api(&json!({"id": "block-1"})), None);
    }
}
