//! Crawl-wide category registry.
//!
//! Each product page carries a partial view of the category tree (its own
//! breadcrumb chain). The registry folds those views into one record per slug,
//! completing names and parents as better-informed sightings arrive.

use std::collections::{BTreeMap, HashMap};

use medcat_core::CategoryRecord;

use crate::types::CategoryEntry;

/// Accumulator owned by a single crawl run.
#[derive(Debug, Default, Clone)]
pub struct CategoryRegistry {
    records: BTreeMap<String, CategoryRecord>,
}

impl CategoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&CategoryRecord> {
        self.records.get(slug)
    }

    /// Inserts `record`, or merges it into the existing record for its slug.
    pub fn merge(&mut self, record: CategoryRecord) {
        match self.records.get_mut(&record.slug) {
            Some(existing) => existing.merge_from(record),
            None => {
                self.records.insert(record.slug.clone(), record);
            }
        }
    }

    /// Registers one product's category chain.
    ///
    /// Parent resolution per entry, in order:
    /// 1. level `n > 1`: the slug last seen at level `n - 1` in this chain
    ///    (none if that level was not seen);
    /// 2. otherwise (no usable level, or level `<= 1`): the slug's own path
    ///    prefix, `"a/b/c"` → `"a/b"`;
    /// 3. otherwise: root.
    ///
    /// Entries without a slug are ignored.
    pub fn register(&mut self, chain: &[CategoryEntry]) {
        let mut level_tracker: HashMap<i64, String> = HashMap::new();

        for entry in chain {
            let slug = normalize_slug(entry.slug.as_deref().unwrap_or_default());
            if slug.is_empty() {
                continue;
            }
            let name = entry.name.as_deref().map(str::trim).unwrap_or_default();

            let parent_slug = match entry.level {
                Some(level) if level > 1 => level_tracker.get(&(level - 1)).map(String::as_str),
                _ => slug.rsplit_once('/').map(|(prefix, _)| prefix),
            };

            self.merge(CategoryRecord::new(slug, name, parent_slug));

            if let Some(level) = entry.level {
                level_tracker.insert(level, slug.to_owned());
            }
        }
    }

    /// All records in ascending slug order.
    #[must_use]
    pub fn into_sorted_records(self) -> Vec<CategoryRecord> {
        self.records.into_values().collect()
    }
}

/// Trims whitespace and surrounding `/` from a category slug.
#[must_use]
pub fn normalize_slug(raw: &str) -> &str {
    raw.trim().trim_matches('/')
}
