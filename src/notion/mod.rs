//! Notion API collaborator: wire types and HTTP client.

pub mod client;
pub mod types;

pub use client::{NotionClient, NotionConfig, NOTION_VERSION};
pub use types::{Block, Icon, PropertyValue, Record};
