//! Cheese product record model

use std::fmt;

/// One cheese product entry
///
/// `cheese_id` comes from the data and is neither unique nor tied to the
/// record's position; stores address records by position only.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub cheese_id: i64,
    pub cheese_name: String,
    pub manufacturer_name: String,
    pub manufacturer_prov_code: String,
    pub manufacturing_type: String,
    pub website: String,
    pub fat_content_percent: f32,
    pub moisture_percent: f32,
    pub particularities: String,
    pub flavour: String,
    pub characteristics: String,
    pub ripening: String,
    pub organic: bool,
    pub category_type: String,
    pub milk_type: String,
    pub milk_treatment_type: String,
    pub rind_type: String,
    /// Opaque date text, never parsed
    pub last_update_date: String,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{CheeseId:{} CheeseName:{} ManufacturerName:{} ManufacturerProvCode:{} \
             ManufacturingType:{} WebSite:{} FatContentPercent:{} MoisturePercent:{} \
             Particularities:{} Flavour:{} Characteristics:{} Ripening:{} Organic:{} \
             CategoryType:{} MilkType:{} MilkTreatmentType:{} RindType:{} LastUpdateDate:{}}}",
            self.cheese_id,
            self.cheese_name,
            self.manufacturer_name,
            self.manufacturer_prov_code,
            self.manufacturing_type,
            self.website,
            self.fat_content_percent,
            self.moisture_percent,
            self.particularities,
            self.flavour,
            self.characteristics,
            self.ripening,
            self.organic,
            self.category_type,
            self.milk_type,
            self.milk_treatment_type,
            self.rind_type,
            self.last_update_date,
        )
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Record;

    /// Build a record whose text fields all carry `tag`
    pub fn sample(cheese_id: i64, tag: &str) -> Record {
        Record {
            cheese_id,
            cheese_name: format!("{} name", tag),
            manufacturer_name: format!("{} maker", tag),
            manufacturer_prov_code: "ON".to_string(),
            manufacturing_type: "Industrial".to_string(),
            website: format!("https://{}.example", tag),
            fat_content_percent: 31.5,
            moisture_percent: 39.0,
            particularities: "N/A".to_string(),
            flavour: format!("{} flavour", tag),
            characteristics: "Pressed".to_string(),
            ripening: "3 Months".to_string(),
            organic: cheese_id % 2 == 0,
            category_type: "Firm Cheese".to_string(),
            milk_type: "Cow".to_string(),
            milk_treatment_type: "Pasteurized".to_string(),
            rind_type: "No Rind".to_string(),
            last_update_date: "2016-02-03".to_string(),
        }
    }
}
