use serde::{Deserialize, Serialize};

use crate::identity::hash_category_id;

/// One node of the storefront category forest, keyed by its path-like slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// `hash_category_id(slug)`.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Natural key, e.g. `"thuoc/thuoc-khang-sinh-khang-nam"`.
    pub slug: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl CategoryRecord {
    /// Builds a record whose id is derived from `slug` and whose parent id,
    /// when a parent slug is known, is derived from that slug.
    #[must_use]
    pub fn new(slug: &str, name: &str, parent_slug: Option<&str>) -> Self {
        Self {
            id: hash_category_id(slug),
            name: name.to_owned(),
            slug: slug.to_owned(),
            parent_id: parent_slug
                .filter(|p| !p.is_empty())
                .map(hash_category_id),
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Completes this record from a later sighting of the same slug.
    ///
    /// The id and slug never change. An existing non-empty name and an
    /// existing parent are kept; blanks are filled from `incoming`.
    pub fn merge_from(&mut self, incoming: CategoryRecord) {
        if self.name.is_empty() {
            self.name = incoming.name;
        }
        if self.parent_id.is_none() {
            self.parent_id = incoming.parent_id;
        }
    }
}
