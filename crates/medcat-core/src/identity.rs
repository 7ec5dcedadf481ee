//! Deterministic identifiers for exported catalog records.
//!
//! Every id is the first [`ID_HEX_LEN`] lowercase hex characters of the MD5
//! digest of a natural key, so re-crawling the same slug or URL always yields
//! the same id and exports can be re-imported as upserts over earlier ones.

use md5::{Digest, Md5};
use unicode_normalization::UnicodeNormalization;

/// Width of a derived id. Matches a 12-byte document-store object id.
pub const ID_HEX_LEN: usize = 24;

/// Lowercase ASCII slug for a display name or path segment.
///
/// Diacritics are folded via NFKD (`"Nhân Sâm"` → `"nhan-sam"`), `đ` maps to
/// `d`, other non-ASCII characters are dropped, and every run of characters
/// outside `[a-z0-9]` becomes a single `-`. Returns an empty string when
/// nothing sluggable remains.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.nfkd() {
        let ch = match ch {
            'đ' | 'Đ' => 'd',
            other => other,
        };
        if !ch.is_ascii() {
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Id of the category whose natural key is `slug`.
#[must_use]
pub fn hash_category_id(slug: &str) -> String {
    short_digest(slug)
}

/// Fallback product id for pages whose payload carries no SKU.
#[must_use]
pub fn hash_url_id(url: &str) -> String {
    short_digest(url)
}

fn short_digest(input: &str) -> String {
    let mut hex = format!("{:x}", Md5::digest(input.as_bytes()));
    hex.truncate(ID_HEX_LEN);
    hex
}
