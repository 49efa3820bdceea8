//! Mirror store operations
//!
//! The mirror is a durable copy of the in-memory store. Every sync clears the
//! table and re-inserts all records in order: O(n) writes per sync no matter
//! how few records changed. Acceptable for a single user and a dataset that
//! fits in memory.
//!
//! All reads order by the internal row key, so mirror order is insertion
//! order. After a sync the row keys run 1..=n while store positions run
//! 0..n: row key `k` holds store position `k - 1`.

use super::filter::{FilterValue, RecordFilter};
use super::init::{init_database, init_memory_database};
use crate::record::Record;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::{debug, info};

const SELECT_COLUMNS: &str = r#"
    SELECT cheese_id, cheese_name, manufacturer_name, manufacturer_prov_code,
    manufacturing_type, website, fat_content_percent, moisture_percent,
    particularities, flavour, characteristics, ripening,
    organic, category_type, milk_type, milk_treatment_type,
    rind_type, last_update_date FROM cheeses
"#;

/// SQLite-backed copy of the record store
#[derive(Debug, Clone)]
pub struct Mirror {
    pool: SqlitePool,
}

impl Mirror {
    /// Open (or create) the mirror database file
    pub async fn open(db_path: &Path) -> Result<Self> {
        Ok(Self {
            pool: init_database(db_path).await?,
        })
    }

    /// Open a private in-memory mirror
    pub async fn in_memory() -> Result<Self> {
        Ok(Self {
            pool: init_memory_database().await?,
        })
    }

    /// Replace the mirror contents with `records`, in order
    ///
    /// Runs in one transaction, so a failed sync leaves the previous contents.
    pub async fn sync(&self, records: &[Record]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cheeses").execute(&mut *tx).await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO cheeses (
                    cheese_id, cheese_name, manufacturer_name, manufacturer_prov_code,
                    manufacturing_type, website, fat_content_percent, moisture_percent,
                    particularities, flavour, characteristics, ripening,
                    organic, category_type, milk_type, milk_treatment_type,
                    rind_type, last_update_date
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(record.cheese_id)
            .bind(&record.cheese_name)
            .bind(&record.manufacturer_name)
            .bind(&record.manufacturer_prov_code)
            .bind(&record.manufacturing_type)
            .bind(&record.website)
            .bind(f64::from(record.fat_content_percent))
            .bind(f64::from(record.moisture_percent))
            .bind(&record.particularities)
            .bind(&record.flavour)
            .bind(&record.characteristics)
            .bind(&record.ripening)
            .bind(record.organic)
            .bind(&record.category_type)
            .bind(&record.milk_type)
            .bind(&record.milk_treatment_type)
            .bind(&record.rind_type)
            .bind(&record.last_update_date)
            .execute(&mut *tx)
            .await?;
            debug!("Mirrored record {}", record.cheese_id);
        }

        tx.commit().await?;
        info!("Synchronized {} records to mirror", records.len());
        Ok(())
    }

    /// Number of mirrored records
    pub async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cheeses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    /// Record at 0-based `position` in insertion order
    pub async fn get_by_position(&self, position: usize) -> Result<Option<Record>> {
        let sql = format!("{} ORDER BY id ASC LIMIT 1 OFFSET ?", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(position as i64)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// Record stored under the internal 1-based row key
    pub async fn get_by_row_id(&self, row_id: i64) -> Result<Option<Record>> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(row_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// Every record in insertion order
    pub async fn all(&self) -> Result<Vec<Record>> {
        self.filter(&RecordFilter::new()).await
    }

    /// Records matching every clause of `filter`, in insertion order
    pub async fn filter(&self, filter: &RecordFilter) -> Result<Vec<Record>> {
        filter.validate()?;

        let sql = format!("{} {} ORDER BY id ASC", SELECT_COLUMNS, filter.where_clause());
        let mut query = sqlx::query(&sql);
        for (_, value) in filter.clauses() {
            query = match value {
                FilterValue::Text(text) => query.bind(text.clone()),
                FilterValue::Integer(n) => query.bind(*n),
                FilterValue::Real(x) => query.bind(f64::from(*x)),
                FilterValue::Boolean(b) => query.bind(*b),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(record_from_row).collect()
    }

    /// Record at `position`, or `NotFound` if the mirror is shorter
    pub async fn require_position(&self, position: usize) -> Result<Record> {
        self.get_by_position(position)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No mirrored record at position {}", position)))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn record_from_row(row: &SqliteRow) -> Result<Record> {
    let fat: f64 = row.try_get("fat_content_percent")?;
    let moisture: f64 = row.try_get("moisture_percent")?;

    Ok(Record {
        cheese_id: row.try_get("cheese_id")?,
        cheese_name: row.try_get("cheese_name")?,
        manufacturer_name: row.try_get("manufacturer_name")?,
        manufacturer_prov_code: row.try_get("manufacturer_prov_code")?,
        manufacturing_type: row.try_get("manufacturing_type")?,
        website: row.try_get("website")?,
        fat_content_percent: fat as f32,
        moisture_percent: moisture as f32,
        particularities: row.try_get("particularities")?,
        flavour: row.try_get("flavour")?,
        characteristics: row.try_get("characteristics")?,
        ripening: row.try_get("ripening")?,
        organic: row.try_get("organic")?,
        category_type: row.try_get("category_type")?,
        milk_type: row.try_get("milk_type")?,
        milk_treatment_type: row.try_get("milk_treatment_type")?,
        rind_type: row.try_get("rind_type")?,
        last_update_date: row.try_get("last_update_date")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::sample;

    #[tokio::test]
    async fn test_sync_replaces_contents() {
        let mirror = Mirror::in_memory().await.unwrap();

        mirror.sync(&[sample(1, "a"), sample(2, "b"), sample(3, "c")]).await.unwrap();
        assert_eq!(mirror.count().await.unwrap(), 3);

        mirror.sync(&[sample(9, "z")]).await.unwrap();
        assert_eq!(mirror.count().await.unwrap(), 1);
        assert_eq!(mirror.all().await.unwrap(), vec![sample(9, "z")]);
    }

    #[tokio::test]
    async fn test_sync_empty_clears_mirror() {
        let mirror = Mirror::in_memory().await.unwrap();
        mirror.sync(&[sample(1, "a")]).await.unwrap();
        mirror.sync(&[]).await.unwrap();
        assert_eq!(mirror.count().await.unwrap(), 0);
        assert!(mirror.get_by_position(0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_position_and_row_id_lookups() {
        let mirror = Mirror::in_memory().await.unwrap();
        let records = vec![sample(10, "a"), sample(20, "b"), sample(30, "c")];

        // resync twice: row keys restart at 1 once the table is emptied
        mirror.sync(&records).await.unwrap();
        mirror.sync(&records).await.unwrap();

        for (position, record) in records.iter().enumerate() {
            assert_eq!(mirror.get_by_position(position).await.unwrap().as_ref(), Some(record));
            assert_eq!(
                mirror.get_by_row_id(position as i64 + 1).await.unwrap().as_ref(),
                Some(record)
            );
        }
        assert!(mirror.get_by_position(3).await.unwrap().is_none());
        assert!(mirror.get_by_row_id(0).await.unwrap().is_none());
        assert!(matches!(mirror.require_position(3).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_filter_ands_clauses() {
        use crate::db::Column;

        let mirror = Mirror::in_memory().await.unwrap();
        let mut b = sample(2, "b");
        b.flavour = "a flavour".to_string();
        mirror.sync(&[sample(1, "a"), b.clone(), sample(3, "c")]).await.unwrap();

        let by_flavour = RecordFilter::new().where_eq(Column::Flavour, "a flavour");
        assert_eq!(mirror.filter(&by_flavour).await.unwrap().len(), 2);

        let narrowed = by_flavour.where_eq(Column::CheeseId, 2i64);
        assert_eq!(mirror.filter(&narrowed).await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_filter_by_boolean_and_real() {
        use crate::db::Column;

        let mirror = Mirror::in_memory().await.unwrap();
        mirror.sync(&[sample(1, "a"), sample(2, "b"), sample(4, "d")]).await.unwrap();

        let organic = RecordFilter::new().where_eq(Column::Organic, true);
        let ids: Vec<i64> = mirror
            .filter(&organic)
            .await
            .unwrap()
            .iter()
            .map(|r| r.cheese_id)
            .collect();
        assert_eq!(ids, vec![2, 4]);

        let fat = RecordFilter::new().where_eq(Column::FatContentPercent, 31.5f32);
        assert_eq!(mirror.filter(&fat).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_filter_rejects_mistyped_value() {
        use crate::db::Column;

        let mirror = Mirror::in_memory().await.unwrap();
        let bad = RecordFilter::new().where_eq(Column::Organic, "yes");
        assert!(matches!(mirror.filter(&bad).await, Err(Error::InvalidInput(_))));
    }
}
