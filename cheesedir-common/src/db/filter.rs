//! Exact-match record filter for the mirror
//!
//! A filter is a list of (column, value) pairs, all of which must match.
//! Column names come from a closed enum, never from caller text; values are
//! always bound as parameters.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Storage type of a mirror column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real,
    Boolean,
}

/// One of the 18 logical record columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CheeseId,
    CheeseName,
    ManufacturerName,
    ManufacturerProvCode,
    ManufacturingType,
    Website,
    FatContentPercent,
    MoisturePercent,
    Particularities,
    Flavour,
    Characteristics,
    Ripening,
    Organic,
    CategoryType,
    MilkType,
    MilkTreatmentType,
    RindType,
    LastUpdateDate,
}

impl Column {
    /// All columns in record declaration order
    pub fn all_variants() -> [Column; 18] {
        use Column::*;
        [
            CheeseId,
            CheeseName,
            ManufacturerName,
            ManufacturerProvCode,
            ManufacturingType,
            Website,
            FatContentPercent,
            MoisturePercent,
            Particularities,
            Flavour,
            Characteristics,
            Ripening,
            Organic,
            CategoryType,
            MilkType,
            MilkTreatmentType,
            RindType,
            LastUpdateDate,
        ]
    }

    /// SQL column name in the `cheeses` table
    pub fn name(self) -> &'static str {
        match self {
            Column::CheeseId => "cheese_id",
            Column::CheeseName => "cheese_name",
            Column::ManufacturerName => "manufacturer_name",
            Column::ManufacturerProvCode => "manufacturer_prov_code",
            Column::ManufacturingType => "manufacturing_type",
            Column::Website => "website",
            Column::FatContentPercent => "fat_content_percent",
            Column::MoisturePercent => "moisture_percent",
            Column::Particularities => "particularities",
            Column::Flavour => "flavour",
            Column::Characteristics => "characteristics",
            Column::Ripening => "ripening",
            Column::Organic => "organic",
            Column::CategoryType => "category_type",
            Column::MilkType => "milk_type",
            Column::MilkTreatmentType => "milk_treatment_type",
            Column::RindType => "rind_type",
            Column::LastUpdateDate => "last_update_date",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::CheeseId => ColumnKind::Integer,
            Column::FatContentPercent | Column::MoisturePercent => ColumnKind::Real,
            Column::Organic => ColumnKind::Boolean,
            _ => ColumnKind::Text,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Column::all_variants()
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown column: {}", s)))
    }
}

/// A typed value to compare a column against
///
/// `Real` holds the record's own `f32` so it widens to the same stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Real(f32),
    Boolean(bool),
}

impl FilterValue {
    fn kind(&self) -> ColumnKind {
        match self {
            FilterValue::Text(_) => ColumnKind::Text,
            FilterValue::Integer(_) => ColumnKind::Integer,
            FilterValue::Real(_) => ColumnKind::Real,
            FilterValue::Boolean(_) => ColumnKind::Boolean,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<f32> for FilterValue {
    fn from(value: f32) -> Self {
        FilterValue::Real(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

/// Conjunction of exact-match clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    clauses: Vec<(Column, FilterValue)>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `column = value` clause
    pub fn where_eq(mut self, column: Column, value: impl Into<FilterValue>) -> Self {
        self.clauses.push((column, value.into()));
        self
    }

    /// Build a text-only filter from (column name, value) pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self::new();
        for (name, value) in pairs {
            filter = filter.where_eq(name.parse()?, value);
        }
        Ok(filter)
    }

    pub fn clauses(&self) -> &[(Column, FilterValue)] {
        &self.clauses
    }

    /// Reject clauses whose value type does not match the column
    pub fn validate(&self) -> Result<()> {
        for (column, value) in &self.clauses {
            if column.kind() != value.kind() {
                return Err(Error::InvalidInput(format!(
                    "Column {} expects {:?}, got {:?}",
                    column,
                    column.kind(),
                    value
                )));
            }
        }
        Ok(())
    }

    /// `WHERE` clause text (empty when there are no clauses)
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self
            .clauses
            .iter()
            .map(|(column, _)| format!("{} = ?", column.name()))
            .collect();
        format!("WHERE {}", conditions.join(" AND "))
    }
}
