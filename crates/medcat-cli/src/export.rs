//! Export writers for crawl results.
//!
//! Files are created or truncated at the given path. Any I/O or
//! serialization failure is returned to the caller; a crawl whose results
//! cannot be written has not finished its job.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use medcat_core::{ProductRecord, PRODUCT_FIELDS};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};
use serde_json::{Serializer, Value};

/// Writes `value` as JSON.
///
/// `indent > 0` pretty-prints with that many spaces per level; `0` or a
/// negative width writes compact JSON. Non-ASCII text is written as UTF-8.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    indent: i32,
) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let written = match usize::try_from(indent) {
        Ok(width) if width > 0 => {
            let indent = " ".repeat(width);
            let mut ser =
                Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(indent.as_bytes()));
            value.serialize(&mut ser)
        }
        _ => {
            let mut ser = Serializer::with_formatter(&mut writer, CompactFormatter);
            value.serialize(&mut ser)
        }
    };
    written.with_context(|| format!("failed to write JSON to {}", path.display()))?;

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}

/// Writes products as CSV with one column per exported field.
///
/// The header row is the fixed product key order and is only written when
/// there is at least one record. Lists are written as JSON arrays and
/// missing optionals as empty cells.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_products_csv(path: &Path, products: &[ProductRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    if !products.is_empty() {
        writer
            .write_record(PRODUCT_FIELDS)
            .with_context(|| format!("failed to write CSV header to {}", path.display()))?;
    }

    for product in products {
        let row = csv_row(product)?;
        writer
            .write_record(&row)
            .with_context(|| format!("failed to write CSV row for {}", product.id))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}

fn csv_row(product: &ProductRecord) -> anyhow::Result<Vec<String>> {
    let value = serde_json::to_value(product)
        .with_context(|| format!("failed to serialize product {}", product.id))?;
    Ok(PRODUCT_FIELDS
        .iter()
        .map(|field| csv_cell(value.get(field).unwrap_or(&Value::Null)))
        .collect())
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
