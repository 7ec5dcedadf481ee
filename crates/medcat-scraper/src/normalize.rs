//! Normalization from the raw page state to [`medcat_core::ProductRecord`].
//!
//! Every exported field is resolved by one accessor on [`PageProps`] that
//! walks a fixed fallback chain. A source value counts as absent when it is
//! missing, blank, or (for prices) zero; only when every source in a chain is
//! absent does the field take its default.

use chrono::{DateTime, Utc};
use medcat_core::{hash_category_id, hash_url_id, ProductRecord};
use reqwest::Url;

use crate::dates::{DayOffsetSource, LifecycleDates};
use crate::error::ScraperError;
use crate::ingredients::{classify_ingredients, ingredient_summary};
use crate::registry::normalize_slug;
use crate::sanitize::sanitize_optional;
use crate::types::{PageProps, PriceInfo, PromotionPrice, RawProduct};

/// Builds the export record for one product page.
///
/// `now` anchors the synthetic lifecycle dates drawn from `dates`.
///
/// # Errors
///
/// Returns [`ScraperError::MissingProduct`] if the payload has no product
/// section. Nothing else fails: missing fields fall back to defaults.
pub fn normalize_product<S: DayOffsetSource + ?Sized>(
    page: &PageProps,
    url: &str,
    now: DateTime<Utc>,
    dates: &mut S,
) -> Result<ProductRecord, ScraperError> {
    let product = page
        .product
        .as_ref()
        .ok_or_else(|| ScraperError::MissingProduct {
            url: url.to_owned(),
        })?;

    let list_price = page.list_price();
    let final_price = page.final_price();
    let buckets = classify_ingredients(&product.ingredient);
    let lifecycle = LifecycleDates::generate(now, dates);

    Ok(ProductRecord {
        id: product_id(product, url),
        name: non_blank(product.web_name.as_deref())
            .or_else(|| non_blank(product.name.as_deref()))
            .unwrap_or_default()
            .to_owned(),
        brand: non_blank(product.brand.as_deref())
            .unwrap_or_default()
            .to_owned(),
        country: non_blank(product.manufactor.as_deref())
            .or_else(|| non_blank(product.brand_origin.as_deref()))
            .map(str::to_owned),
        description: sanitize_optional(page.description_html()),
        price: final_price,
        discount: list_price.saturating_sub(final_price).max(0),
        stock: u8::from(page.in_stock()),
        unit: page.unit().map(str::to_owned),
        image: non_blank(product.primary_image.as_deref()).map(str::to_owned),
        gallery: page.gallery(),
        usage: sanitize_optional(page.usage_html()),
        ingredients: ingredient_summary(&product.ingredient),
        warnings: sanitize_optional(page.warnings_html()),
        prescription_required: product.prescription,
        create_date: lifecycle.create,
        expired_date: lifecycle.expired,
        category_id: hash_category_id(&page.category_slug(url)),
        active_ingredient_ids: buckets.active_ingredient_ids,
        herb_ids: buckets.herb_ids,
    })
}

/// SKU when present, else a hash of the source URL.
fn product_id(product: &RawProduct, url: &str) -> String {
    non_blank(product.sku.as_deref()).map_or_else(|| hash_url_id(url), str::to_owned)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn non_zero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

impl PageProps {
    fn raw_product(&self) -> Option<&RawProduct> {
        self.product.as_ref()
    }

    /// Price object the storefront shows by default:
    /// 1. `transformedProductData.defaultPrice`
    /// 2. `product.prices[0]`
    #[must_use]
    pub fn default_price(&self) -> Option<&PriceInfo> {
        self.transformed_product_data
            .as_ref()
            .and_then(|t| t.default_price.as_ref())
            .or_else(|| self.raw_product().and_then(|p| p.prices.first()))
    }

    /// First active promotion, `initPromotionPrices[0]`.
    #[must_use]
    pub fn promotion(&self) -> Option<&PromotionPrice> {
        self.init_promotion_prices.first()
    }

    /// Price before promotion:
    /// 1. [`Self::default_price`]`.price`
    /// 2. [`Self::promotion`]`.price`
    /// 3. `0`
    #[must_use]
    pub fn list_price(&self) -> i64 {
        non_zero(self.default_price().and_then(|p| p.price))
            .or_else(|| non_zero(self.promotion().and_then(|p| p.price)))
            .unwrap_or(0)
    }

    /// Price actually charged:
    /// 1. [`Self::promotion`]`.finalPrice`
    /// 2. [`Self::list_price`]
    #[must_use]
    pub fn final_price(&self) -> i64 {
        non_zero(self.promotion().and_then(|p| p.final_price)).unwrap_or_else(|| self.list_price())
    }

    /// `isInventory` of [`Self::default_price`]; `false` without one.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.default_price().is_some_and(|p| p.is_inventory)
    }

    /// 1. [`Self::default_price`]`.measureUnitName`
    /// 2. `product.dosageForm`
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        non_blank(self.default_price().and_then(|p| p.measure_unit_name.as_deref()))
            .or_else(|| non_blank(self.raw_product().and_then(|p| p.dosage_form.as_deref())))
    }

    /// Slug of the product's own category, normalized like registry slugs:
    /// 1. `transformedProductData.highestLevelCategory.slug`
    /// 2. last of `product.categories`, its slug
    /// 3. last of `breadcrumbs`, its slug
    /// 4. path of `url`
    ///
    /// Steps 1 and 2 pick the category object; a blank slug on the picked
    /// object moves on to step 3.
    #[must_use]
    pub fn category_slug(&self, url: &str) -> String {
        let picked = self
            .transformed_product_data
            .as_ref()
            .and_then(|t| t.highest_level_category.as_ref())
            .or_else(|| self.raw_product().and_then(|p| p.categories.last()));

        picked
            .and_then(|c| c.slug.as_deref())
            .map(normalize_slug)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.breadcrumbs
                    .last()
                    .and_then(|b| b.slug.as_deref())
                    .map(normalize_slug)
                    .filter(|s| !s.is_empty())
            })
            .map_or_else(|| url_path_slug(url), str::to_owned)
    }

    /// Order-preserving, duplicate-free image list:
    /// 1. `transformedProductData.galleryImgUrls`
    /// 2. `product.secondaryImages`
    #[must_use]
    pub fn gallery(&self) -> Vec<String> {
        let primary = self
            .transformed_product_data
            .as_ref()
            .map(|t| t.gallery_img_urls.as_slice())
            .unwrap_or_default();
        let source = if primary.is_empty() {
            self.raw_product()
                .map(|p| p.secondary_images.as_slice())
                .unwrap_or_default()
        } else {
            primary
        };

        let mut gallery: Vec<String> = Vec::with_capacity(source.len());
        for image in source {
            let image = image.trim();
            if !image.is_empty() && !gallery.iter().any(|seen| seen == image) {
                gallery.push(image.to_owned());
            }
        }
        gallery
    }

    /// 1. `content.description`
    /// 2. `seo.description`
    #[must_use]
    pub fn description_html(&self) -> Option<&str> {
        non_blank(self.content.as_ref().and_then(|c| c.description.as_deref()))
            .or_else(|| non_blank(self.seo.as_ref().and_then(|s| s.description.as_deref())))
    }

    /// 1. `content.usage`
    /// 2. `product.usage`
    #[must_use]
    pub fn usage_html(&self) -> Option<&str> {
        non_blank(self.content.as_ref().and_then(|c| c.usage.as_deref()))
            .or_else(|| non_blank(self.raw_product().and_then(|p| p.usage.as_deref())))
    }

    /// 1. `content.careful`
    /// 2. `product.contraindication`
    /// 3. `product.adverseEffect`
    #[must_use]
    pub fn warnings_html(&self) -> Option<&str> {
        non_blank(self.content.as_ref().and_then(|c| c.careful.as_deref()))
            .or_else(|| non_blank(self.raw_product().and_then(|p| p.contraindication.as_deref())))
            .or_else(|| non_blank(self.raw_product().and_then(|p| p.adverse_effect.as_deref())))
    }
}

/// Last-resort category slug: the URL path without surrounding slashes.
fn url_path_slug(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => normalize_slug(parsed.path()).to_owned(),
        Err(_) => normalize_slug(url).to_owned(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
