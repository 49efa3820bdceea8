//! Shared fixtures for integration tests

#![allow(dead_code)]

use cheesedir_common::Record;
use std::path::PathBuf;

/// Path to the bundled 30-column sample dataset
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("canadianCheeseDirectory.csv")
}

/// Expected decoding of the first data row of the fixture
pub fn first_record() -> Record {
    Record {
        cheese_id: 228,
        cheese_name: "Sieur de Duplessis (Le)".to_string(),
        manufacturer_name: "Fromages la faim de loup".to_string(),
        manufacturer_prov_code: "NB".to_string(),
        manufacturing_type: "Farmstead".to_string(),
        website: "N/A".to_string(),
        fat_content_percent: 24.2,
        moisture_percent: 47.0,
        particularities: "N/A".to_string(),
        flavour: "Sharp, lactic".to_string(),
        characteristics: "Uncooked".to_string(),
        ripening: "9 Months".to_string(),
        organic: false,
        category_type: "Firm Cheese".to_string(),
        milk_type: "Ewe".to_string(),
        milk_treatment_type: "Raw Milk".to_string(),
        rind_type: "Washed Rind".to_string(),
        last_update_date: "2016-02-03".to_string(),
    }
}
