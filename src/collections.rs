//! Collection store boundary.
//!
//! The remote store is an external collaborator. This module only fixes the
//! shapes the interaction core reads (a listing of summaries and a detail
//! record with pages) and decodes the store's JSON envelopes into them.
//! Transport is left to `CollectionSource` implementations.

use crate::error::{CollectionError, CollectionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Publication style of a collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    #[default]
    Magazine,
    Stack,
}

/// One entry of the collection listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    #[serde(rename = "uid")]
    pub id: String,
    pub name: String,
    #[serde(rename = "cover_image", default)]
    pub cover_image_ref: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(rename = "user_name", default)]
    pub owner: String,
    #[serde(rename = "type", default)]
    pub kind: CollectionKind,
}

/// Content type of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Image,
    Text,
}

/// A single page. `content` is an image file name or the page's text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(rename = "uid")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PageKind,
    pub content: String,
}

/// A collection with all of its pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    #[serde(rename = "uid")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

impl CollectionDetail {
    pub fn page(&self, id: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.id == id)
    }
}

/// Read-only access to the collection store.
pub trait CollectionSource {
    fn list(&self) -> CollectionResult<Vec<CollectionSummary>>;
    fn fetch(&self, id: &str) -> CollectionResult<CollectionDetail>;
}

/// Decode the listing envelope `{"collections": [...]}`.
///
/// A missing or non-array `collections` field decodes as an empty listing.
pub fn parse_listing(json: &str) -> CollectionResult<Vec<CollectionSummary>> {
    let value: Value = serde_json::from_str(json)?;
    match value.get("collections") {
        Some(list @ Value::Array(_)) => Ok(serde_json::from_value(list.clone())?),
        _ => Ok(Vec::new()),
    }
}

/// Decode a detail envelope.
///
/// Accepts both `{"collection": {...}, "pages": [...]}` and a flat record.
pub fn parse_detail(json: &str) -> CollectionResult<CollectionDetail> {
    let value: Value = serde_json::from_str(json)?;
    let mut record = value.get("collection").cloned().unwrap_or_else(|| value.clone());
    let pages = value
        .get("pages")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    if let Value::Object(map) = &mut record {
        map.insert("pages".to_string(), pages);
    }
    Ok(serde_json::from_value(record)?)
}

/// URL of an uploaded page image under the store's base URL
pub fn image_url(base_url: &str, file_name: &str) -> String {
    format!("{}/uploads/{}", base_url.trim_end_matches('/'), file_name)
}

/// In-memory collection source, used by headless sessions and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCollections {
    collections: Vec<CollectionDetail>,
    summaries: Vec<CollectionSummary>,
}

impl InMemoryCollections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, summary: CollectionSummary, detail: CollectionDetail) {
        self.summaries.retain(|s| s.id != summary.id);
        self.collections.retain(|c| c.id != detail.id);
        self.summaries.push(summary);
        self.collections.push(detail);
    }
}

impl CollectionSource for InMemoryCollections {
    fn list(&self) -> CollectionResult<Vec<CollectionSummary>> {
        Ok(self.summaries.clone())
    }

    fn fetch(&self, id: &str) -> CollectionResult<CollectionDetail> {
        self.collections
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CollectionError::NotFound(id.to_string()))
    }
}
