use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Export key order for [`ProductRecord`]. JSON serialization follows struct
/// field order; the CSV writer uses this list as its header row.
pub const PRODUCT_FIELDS: [&str; 20] = [
    "_id",
    "name",
    "brand",
    "country",
    "description",
    "price",
    "discount",
    "stock",
    "unit",
    "image",
    "gallery",
    "usage",
    "ingredients",
    "warnings",
    "prescriptionRequired",
    "createDate",
    "expiredDate",
    "categoryId",
    "activeIngredientIds",
    "herbIds",
];

/// A product page normalized into the import schema.
///
/// Field order is the export key order; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Upstream SKU, or a hash of the source URL when the page has none.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub brand: String,
    pub country: Option<String>,
    /// Sanitized HTML.
    pub description: String,
    /// Final price actually charged, after any promotion.
    pub price: i64,
    /// `max(0, list price - price)`.
    pub discount: i64,
    /// `1` when the upstream inventory flag is set, else `0`. Not a quantity.
    pub stock: u8,
    pub unit: Option<String>,
    pub image: Option<String>,
    pub gallery: Vec<String>,
    pub usage: String,
    /// Human-readable summary, e.g. `"Paracetamol (500mg), Caffeine (65mg)"`.
    pub ingredients: String,
    pub warnings: String,
    #[serde(with = "prescription_label")]
    pub prescription_required: bool,
    /// Synthetic; the storefront does not publish lifecycle dates.
    #[serde(with = "iso_datetime")]
    pub create_date: DateTime<Utc>,
    /// Synthetic; see `create_date`.
    #[serde(with = "iso_datetime")]
    pub expired_date: DateTime<Utc>,
    pub category_id: String,
    pub active_ingredient_ids: Vec<String>,
    pub herb_ids: Vec<String>,
}

/// Serializes the prescription flag as the storefront's Vietnamese yes/no.
pub mod prescription_label {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const YES: &str = "Có";
    pub const NO: &str = "Không";

    #[must_use]
    pub fn label(required: bool) -> &'static str {
        if required {
            YES
        } else {
            NO
        }
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(required: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(label(*required))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw == YES)
    }
}

/// RFC 3339 with microseconds and a numeric `+00:00` offset.
pub mod iso_datetime {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[must_use]
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
