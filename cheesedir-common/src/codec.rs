//! CSV row codec
//!
//! Two row layouts are handled:
//! - **Source layout**: the 30-column bilingual dataset. Text fields are
//!   resolved pairwise through [`normalize`]; the last column (update date)
//!   passes through untouched.
//! - **Export layout**: the 18 logical fields in declaration order, as written
//!   by the persist operation and as entered interactively.
//!
//! Numeric and boolean columns never fail a decode: unparsable text becomes
//! the zero value of the field.

use crate::normalize::{normalize, UNKNOWN_PROVINCE};
use crate::record::Record;
use crate::{Error, Result};

/// Number of columns in the bilingual source layout
pub const SOURCE_COLUMN_COUNT: usize = 30;

/// Header row of the export layout
pub const EXPORT_HEADERS: [&str; 18] = [
    "CheeseId",
    "CheeseName",
    "ManufacturerName",
    "ManufacturerProvCode",
    "ManufacturingType",
    "WebSite",
    "FatContentPercent",
    "MoisturePercent",
    "Particularities",
    "Flavour",
    "Characteristics",
    "Ripening",
    "Organic",
    "CategoryType",
    "MilkType",
    "MilkTreatmentType",
    "RindType",
    "LastUpdateDate",
];

/// Number of columns in the export layout
pub const EXPORT_COLUMN_COUNT: usize = EXPORT_HEADERS.len();

/// Parse an integer, defaulting to 0
pub fn parse_int_or_default(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Parse a float, defaulting to 0.0
pub fn parse_float_or_default(text: &str) -> f32 {
    text.trim().parse().unwrap_or(0.0)
}

/// Parse a boolean token, defaulting to false
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool_or_default(text: &str) -> bool {
    matches!(text.trim(), "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Format a percentage the way the export layout stores it
pub fn format_percent(value: f32) -> String {
    format!("{:.2}", value)
}

fn require_columns<S: AsRef<str>>(fields: &[S], expected: usize, layout: &str) -> Result<()> {
    if fields.len() < expected {
        return Err(Error::InvalidInput(format!(
            "{} row has {} columns, expected {}",
            layout,
            fields.len(),
            expected
        )));
    }
    Ok(())
}

/// Decode one row of the 30-column bilingual source layout
pub fn decode_source_row<S: AsRef<str>>(fields: &[S]) -> Result<Record> {
    require_columns(fields, SOURCE_COLUMN_COUNT, "source")?;
    let col = |i: usize| fields[i].as_ref();
    let pair = |i: usize| normalize(col(i), col(i + 1));

    Ok(Record {
        cheese_id: parse_int_or_default(col(0)),
        cheese_name: pair(1),
        manufacturer_name: pair(3),
        manufacturer_prov_code: normalize(col(5), UNKNOWN_PROVINCE),
        manufacturing_type: pair(6),
        website: pair(8),
        fat_content_percent: parse_float_or_default(col(10)),
        moisture_percent: parse_float_or_default(col(11)),
        particularities: pair(12),
        flavour: pair(14),
        characteristics: pair(16),
        ripening: pair(18),
        organic: parse_bool_or_default(col(20)),
        category_type: pair(21),
        milk_type: pair(23),
        milk_treatment_type: pair(25),
        rind_type: pair(27),
        last_update_date: col(29).to_string(),
    })
}

/// Decode one row of the 18-column export layout
///
/// Inverse of [`encode`]. Blank text fields become `"N/A"` (province code
/// becomes `"??"`); the update date passes through untouched.
pub fn decode_export_row<S: AsRef<str>>(fields: &[S]) -> Result<Record> {
    require_columns(fields, EXPORT_COLUMN_COUNT, "export")?;
    let col = |i: usize| fields[i].as_ref();
    let text = |i: usize| normalize(col(i), "");

    Ok(Record {
        cheese_id: parse_int_or_default(col(0)),
        cheese_name: text(1),
        manufacturer_name: text(2),
        manufacturer_prov_code: normalize(col(3), UNKNOWN_PROVINCE),
        manufacturing_type: text(4),
        website: text(5),
        fat_content_percent: parse_float_or_default(col(6)),
        moisture_percent: parse_float_or_default(col(7)),
        particularities: text(8),
        flavour: text(9),
        characteristics: text(10),
        ripening: text(11),
        organic: parse_bool_or_default(col(12)),
        category_type: text(13),
        milk_type: text(14),
        milk_treatment_type: text(15),
        rind_type: text(16),
        last_update_date: col(17).to_string(),
    })
}

/// Encode a record into the 18-column export layout
///
/// Percentages keep two decimals, so encode→decode is lossy beyond that.
pub fn encode(record: &Record) -> Vec<String> {
    vec![
        record.cheese_id.to_string(),
        record.cheese_name.clone(),
        record.manufacturer_name.clone(),
        record.manufacturer_prov_code.clone(),
        record.manufacturing_type.clone(),
        record.website.clone(),
        format_percent(record.fat_content_percent),
        format_percent(record.moisture_percent),
        record.particularities.clone(),
        record.flavour.clone(),
        record.characteristics.clone(),
        record.ripening.clone(),
        record.organic.to_string(),
        record.category_type.clone(),
        record.milk_type.clone(),
        record.milk_treatment_type.clone(),
        record.rind_type.clone(),
        record.last_update_date.clone(),
    ]
}
