//! Field-by-field record entry
//!
//! Prompts follow the export layout, so answers decode with the same rules as
//! a persisted row: blank text becomes `"N/A"`, unparsable numbers become 0.

use crate::console::Console;
use cheesedir_common::codec::{decode_export_row, encode};
use cheesedir_common::{Record, Result};
use std::io::{BufRead, Write};

/// Prompt labels, in record declaration order
pub const FIELD_LABELS: [&str; 18] = [
    "Cheese ID (int)",
    "Cheese Name",
    "Manufacturer Name",
    "Manufacturer Prov Code",
    "Manufacturing Type",
    "Website",
    "Fat Content Percent (float)",
    "Moisture Percent (float)",
    "Particularities",
    "Flavour",
    "Characteristics",
    "Ripening",
    "Organic (bool)",
    "Category Type",
    "Milk Type",
    "Milk Treatment Type",
    "Rind Type",
    "Last Update Date",
];

/// Read every field of a new record
pub fn prompt_new_record<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Record> {
    let mut fields = Vec::with_capacity(FIELD_LABELS.len());
    for label in FIELD_LABELS {
        fields.push(console.read_string(label)?);
    }
    decode_export_row(&fields)
}

/// Read a replacement for `current`, offering each current value as default
pub fn prompt_edited_record<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    current: &Record,
) -> Result<Record> {
    let defaults = encode(current);
    let mut fields = Vec::with_capacity(FIELD_LABELS.len());
    for (label, default) in FIELD_LABELS.iter().zip(&defaults) {
        fields.push(console.read_or_keep(label, default)?);
    }
    decode_export_row(&fields)
}
