//! Page-state types decoded from the `__NEXT_DATA__` script of a product page.
//!
//! ## Observed shape
//!
//! ```text
//! props.pageProps
//! ├── product                    core product document (absent on non-product pages)
//! ├── transformedProductData     storefront view model: defaultPrice, highestLevelCategory, galleryImgUrls
//! ├── content                    CMS blocks: description, usage, careful
//! ├── initPromotionPrices[]      active promotions: price, finalPrice
//! ├── breadcrumbs[]              slug, name
//! └── seo                        description
//! ```
//!
//! ### Prices
//! Integer VND amounts. Mostly JSON numbers, occasionally numeric strings.
//! `defaultPrice` may be missing, `{}` or `null`; `product.prices[0]` then
//! carries the same fields.
//!
//! ### `isInventory`
//! Boolean on the price object. There is no stock quantity anywhere in the
//! payload.
//!
//! ### Category `level`
//! `1` for the top level, increasing towards the leaf. Sent as a number or a
//! digit string, sometimes missing.
//!
//! ### Ingredients
//! `product.ingredient[]` with `name`, a path-like `slug`
//! (e.g. `"duoc-chat/paracetamol"`) and a free-text `shortDescription`
//! holding the amount (e.g. `"500mg"`).
//!
//! Every leaf field is decoded leniently (see [`crate::lenient`]): wrong types
//! read as absent rather than failing the page.

use serde::Deserialize;

use crate::lenient;

/// Root of the `__NEXT_DATA__` document.
#[derive(Debug, Default, Deserialize)]
pub struct NextData {
    #[serde(default)]
    pub props: Props,
}

#[derive(Debug, Default, Deserialize)]
pub struct Props {
    #[serde(default, rename = "pageProps")]
    pub page_props: PageProps,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    /// `None` on category, article and landing pages. Present, possibly
    /// with every field defaulted, whenever the payload has the key.
    #[serde(default, deserialize_with = "lenient::section")]
    pub product: Option<RawProduct>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub transformed_product_data: Option<TransformedProductData>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub content: Option<PageContent>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub init_promotion_prices: Vec<PromotionPrice>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub breadcrumbs: Vec<Breadcrumb>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub seo: Option<Seo>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Storefront SKU, e.g. `"00021988"`. Stable across crawls.
    #[serde(default, deserialize_with = "lenient::string")]
    pub sku: Option<String>,

    /// Display name shown on the product page; preferred over `name`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub web_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: Option<String>,

    /// Manufacturing country (the upstream spelling).
    #[serde(default, deserialize_with = "lenient::string")]
    pub manufactor: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub brand_origin: Option<String>,

    /// E.g. `"Viên nén"`; used as the unit when no price unit is known.
    #[serde(default, deserialize_with = "lenient::string")]
    pub dosage_form: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub primary_image: Option<String>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub secondary_images: Vec<String>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub prescription: bool,

    #[serde(default, deserialize_with = "lenient::string")]
    pub usage: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub contraindication: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub adverse_effect: Option<String>,

    /// Breadcrumb-like category chain, broad to specific.
    #[serde(default, deserialize_with = "lenient::list")]
    pub categories: Vec<CategoryEntry>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub ingredient: Vec<IngredientEntry>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub prices: Vec<PriceInfo>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedProductData {
    #[serde(default, deserialize_with = "lenient::object")]
    pub default_price: Option<PriceInfo>,

    /// Most specific category of the product, precomputed by the storefront.
    #[serde(default, deserialize_with = "lenient::object")]
    pub highest_level_category: Option<CategoryEntry>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub gallery_img_urls: Vec<String>,
}

/// Shared shape of `transformedProductData.defaultPrice` and
/// `product.prices[]`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub price: Option<i64>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_inventory: bool,

    /// E.g. `"Hộp"`, `"Vỉ"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub measure_unit_name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionPrice {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub price: Option<i64>,

    #[serde(default, deserialize_with = "lenient::integer")]
    pub final_price: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryEntry {
    /// Path-like slug, e.g. `"thuoc/thuoc-khang-sinh-khang-nam"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::level")]
    pub level: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Breadcrumb {
    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: Option<String>,

    /// Amount or strength, e.g. `"500mg"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub short_description: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageContent {
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub usage: Option<String>,

    /// Warnings / precautions block.
    #[serde(default, deserialize_with = "lenient::string")]
    pub careful: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Seo {
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}
