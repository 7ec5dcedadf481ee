//! Ingredient bucketing: active ingredients vs herbal/botanical components.

use medcat_core::slugify;

use crate::types::IngredientEntry;

/// Herbal and botanical terms, Vietnamese and English. Matched as substrings
/// of the lowercased `"{name} {slug_tail}"` string.
pub const HERB_KEYWORDS: [&str; 31] = [
    "ginkgo",
    "nhân sâm",
    "ginseng",
    "sâm",
    "hoàng kỳ",
    "artichoke",
    "atisho",
    "curcumin",
    "tam thất",
    "cam thảo",
    "thảo quyết minh",
    "milk thistle",
    "echinacea",
    "elderberry",
    "hawthorn",
    "hibiscus",
    "tảo",
    "spirulina",
    "aloe",
    "nha đam",
    "ginger",
    "gừng",
    "tỏi",
    "garlic",
    "saffron",
    "tràm",
    "peppermint",
    "chùm ngây",
    "moringa",
    "đinh lăng",
    "cao",
];

/// Ingredient id lists of one product, each ordered by first sighting and
/// free of duplicates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngredientBuckets {
    pub active_ingredient_ids: Vec<String>,
    pub herb_ids: Vec<String>,
}

/// Slug id of an ingredient: the slugified last path segment of its `slug`,
/// or of its name when it has no slug.
#[must_use]
pub fn ingredient_slug(entry: &IngredientEntry) -> String {
    let slug = entry.slug.as_deref().map(str::trim).unwrap_or_default();
    if slug.is_empty() {
        slugify(entry.name.as_deref().unwrap_or_default())
    } else {
        slugify(slug.rsplit('/').next().unwrap_or(slug))
    }
}

#[must_use]
pub fn is_herbal(name: &str, slug_tail: &str) -> bool {
    let haystack = format!("{name} {slug_tail}").to_lowercase();
    HERB_KEYWORDS.iter().any(|keyword| haystack.contains(keyword))
}

/// Partitions `entries` into active-ingredient and herb slug lists.
///
/// Entries whose slug id comes out empty are skipped. The result depends only
/// on the input list and its order.
#[must_use]
pub fn classify_ingredients(entries: &[IngredientEntry]) -> IngredientBuckets {
    let mut buckets = IngredientBuckets::default();

    for entry in entries {
        let slug_tail = ingredient_slug(entry);
        if slug_tail.is_empty() {
            continue;
        }
        let name = entry.name.as_deref().unwrap_or_default();
        let bucket = if is_herbal(name, &slug_tail) {
            &mut buckets.herb_ids
        } else {
            &mut buckets.active_ingredient_ids
        };
        if !bucket.contains(&slug_tail) {
            bucket.push(slug_tail);
        }
    }

    buckets
}

/// Human-readable ingredient summary: `"Name (amount), Name, ..."`.
///
/// Entries without a name are skipped; the amount comes from
/// `shortDescription` when present.
#[must_use]
pub fn ingredient_summary(entries: &[IngredientEntry]) -> String {
    entries
        .iter()
        .filter_map(|entry| {
            let name = entry.name.as_deref().map(str::trim).unwrap_or_default();
            if name.is_empty() {
                return None;
            }
            let amount = entry
                .short_description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            Some(if amount.is_empty() {
                name.to_owned()
            } else {
                format!("{name} ({amount})")
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, slug: &str) -> IngredientEntry {
        IngredientEntry {
            name: Some(name.to_owned()).filter(|s| !s.is_empty()),
            slug: Some(slug.to_owned()).filter(|s| !s.is_empty()),
            short_description: None,
        }
    }

    fn with_amount(name: &str, amount: &str) -> IngredientEntry {
        IngredientEntry {
            name: Some(name.to_owned()),
            slug: None,
            short_description: Some(amount.to_owned()),
        }
    }

    #[test]
    fn ginkgo_goes_to_herbs() {
        let buckets = classify_ingredients(&[entry("Ginkgo Biloba Extract", "san-pham/ginkgo-biloba")]);
        assert_eq!(buckets.herb_ids, vec!["ginkgo-biloba".to_owned()]);
        assert!(buckets.active_ingredient_ids.is_empty());
    }

    #[test]
    fn paracetamol_goes_to_active_ingredients() {
        let buckets = classify_ingredients(&[entry("Paracetamol 500mg", "san-pham/paracetamol-500mg")]);
        assert_eq!(
            buckets.active_ingredient_ids,
            vec!["paracetamol-500mg".to_owned()]
        );
        assert!(buckets.herb_ids.is_empty());
    }

    #[test]
    fn vietnamese_keyword_matches_display_name() {
        let buckets = classify_ingredients(&[entry("Nhân sâm", "")]);
        assert_eq!(buckets.herb_ids, vec!["nhan-sam".to_owned()]);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert!(is_herbal("GARLIC oil", ""));
        assert!(!is_herbal("Vitamin C", "vitamin-c"));
    }

    #[test]
    fn dedupes_preserving_first_seen_order() {
        let buckets = classify_ingredients(&[
            entry("Vitamin C", "duoc-chat/vitamin-c"),
            entry("Zinc", "duoc-chat/zinc"),
            entry("Vitamin C", "duoc-chat/vitamin-c"),
            entry("Ginger", "duoc-chat/ginger"),
            entry("Ginger root", "duoc-chat/ginger"),
        ]);
        assert_eq!(
            buckets.active_ingredient_ids,
            vec!["vitamin-c".to_owned(), "zinc".to_owned()]
        );
        assert_eq!(buckets.herb_ids, vec!["ginger".to_owned()]);
    }

    #[test]
    fn skips_entries_with_empty_slug() {
        let buckets = classify_ingredients(&[entry("", ""), entry("!!!", "")]);
        assert_eq!(buckets, IngredientBuckets::default());
    }

    #[test]
    fn classification_is_pure() {
        let input = vec![
            entry("Paracetamol", "duoc-chat/paracetamol"),
            entry("Tỏi đen", "duoc-chat/toi-den"),
        ];
        assert_eq!(classify_ingredients(&input), classify_ingredients(&input));
    }

    #[test]
    fn summary_pairs_names_with_amounts() {
        let entries = vec![
            with_amount("Paracetamol", "500mg"),
            with_amount("Caffeine", " "),
            with_amount("  ", "10mg"),
        ];
        assert_eq!(ingredient_summary(&entries), "Paracetamol (500mg), Caffeine");
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        assert_eq!(ingredient_summary(&[]), "");
    }
}
