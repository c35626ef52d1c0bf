//! SQLite-backed store.
//!
//! The dataset lives in a single `geoname` table. Every query checks a
//! connection out of the pool, so concurrent requests never share one.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::domain::{GeoNameId, PlaceRecord};

use super::error::StoreError;
use super::tsv::load_source;
use super::{LoadOutcome, Store};

const TABLE: &str = "geoname";

const CREATE_TABLE: &str = r#"
CREATE TABLE geoname (
    geo_name_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    ascii_name TEXT NOT NULL,
    alternate_names TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    feature_class TEXT NOT NULL,
    feature_code TEXT NOT NULL,
    country_code TEXT NOT NULL,
    alt_cc TEXT NOT NULL,
    admin1_code TEXT NOT NULL,
    admin2_code TEXT NOT NULL,
    admin3_code TEXT NOT NULL,
    admin4_code TEXT NOT NULL,
    population INTEGER NOT NULL,
    elevation TEXT NOT NULL,
    dem TEXT NOT NULL,
    timezone TEXT NOT NULL,
    modification_date TEXT NOT NULL
)"#;

const CREATE_NAME_INDEX: &str = "CREATE INDEX ix_geoname_name ON geoname (name)";

/// Literal, case-sensitive prefix match as a range over `ix_geoname_name`.
/// U+10FFFF sorts after every other character under BINARY collation.
/// Rows come back in name order; callers sort by id.
const SELECT_BY_PREFIX: &str = "SELECT geo_name_id, name FROM geoname \
    WHERE name >= ?1 AND name < ?1 || char(1114111)";

const INSERT: &str = r#"
INSERT INTO geoname (
    geo_name_id, name, ascii_name, alternate_names, latitude, longitude,
    feature_class, feature_code, country_code, alt_cc,
    admin1_code, admin2_code, admin3_code, admin4_code,
    population, elevation, dem, timezone, modification_date
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#;

const COLUMNS: &str = "geo_name_id, name, ascii_name, alternate_names, latitude, longitude, \
    feature_class, feature_code, country_code, alt_cc, \
    admin1_code, admin2_code, admin3_code, admin4_code, \
    population, elevation, dem, timezone, modification_date";

/// A `geoname` row as stored.
#[derive(sqlx::FromRow)]
struct PlaceRow {
    geo_name_id: i64,
    name: String,
    ascii_name: String,
    alternate_names: String,
    latitude: f64,
    longitude: f64,
    feature_class: String,
    feature_code: String,
    country_code: String,
    alt_cc: String,
    admin1_code: String,
    admin2_code: String,
    admin3_code: String,
    admin4_code: String,
    population: i64,
    elevation: String,
    dem: String,
    timezone: String,
    modification_date: String,
}

impl From<PlaceRow> for PlaceRecord {
    fn from(row: PlaceRow) -> Self {
        Self {
            geo_name_id: GeoNameId::new(row.geo_name_id),
            name: row.name,
            ascii_name: row.ascii_name,
            alternate_names: row.alternate_names,
            latitude: row.latitude,
            longitude: row.longitude,
            feature_class: row.feature_class,
            feature_code: row.feature_code,
            country_code: row.country_code,
            alt_country_code: row.alt_cc,
            admin1_code: row.admin1_code,
            admin2_code: row.admin2_code,
            admin3_code: row.admin3_code,
            admin4_code: row.admin4_code,
            population: row.population,
            elevation: row.elevation,
            digital_elevation_model: row.dem,
            timezone: row.timezone,
            modification_date: row.modification_date,
        }
    }
}

/// Store backed by an SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `database_url`.
    ///
    /// `database_url` is an sqlx SQLite URL such as `sqlite://gazetteer.db`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns true if the `geoname` table exists.
    pub async fn table_exists(&self) -> Result<bool, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(TABLE)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn load_if_empty(&self, source: &Path) -> Result<LoadOutcome, StoreError> {
        if self.table_exists().await? {
            info!(table = TABLE, "table already present, skipping import");
            return Ok(LoadOutcome::Skipped);
        }

        let records = load_source(source).await?;
        info!(path = %source.display(), rows = records.len(), "importing gazetteer");

        // Table, index and rows commit together: a failed import leaves no
        // table behind, so the next start retries it.
        let mut tx = self.pool.begin().await?;
        sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_NAME_INDEX).execute(&mut *tx).await?;
        for record in &records {
            sqlx::query(INSERT)
                .bind(record.geo_name_id.get())
                .bind(&record.name)
                .bind(&record.ascii_name)
                .bind(&record.alternate_names)
                .bind(record.latitude)
                .bind(record.longitude)
                .bind(&record.feature_class)
                .bind(&record.feature_code)
                .bind(&record.country_code)
                .bind(&record.alt_country_code)
                .bind(&record.admin1_code)
                .bind(&record.admin2_code)
                .bind(&record.admin3_code)
                .bind(&record.admin4_code)
                .bind(record.population)
                .bind(&record.elevation)
                .bind(&record.digital_elevation_model)
                .bind(&record.timezone)
                .bind(&record.modification_date)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(LoadOutcome::Loaded {
            rows: records.len(),
        })
    }

    async fn by_id(&self, id: GeoNameId) -> Result<Option<PlaceRecord>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM geoname WHERE geo_name_id = ?");
        let row: Option<PlaceRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(PlaceRecord::from))
    }

    async fn by_name(&self, name: &str) -> Result<Vec<PlaceRecord>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM geoname WHERE name = ? ORDER BY geo_name_id");
        let rows: Vec<PlaceRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        debug!(name, matches = rows.len(), "name lookup");
        Ok(rows.into_iter().map(PlaceRecord::from).collect())
    }

    async fn by_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut rows: Vec<(i64, String)> = sqlx::query_as(SELECT_BY_PREFIX)
            .bind(prefix)
            .fetch_all(&self.pool)
            .await?;
        rows.sort_unstable_by_key(|(id, _)| *id);
        Ok(rows.into_iter().map(|(_, name)| name).collect())
    }

    async fn page(&self, offset: i64, limit: i64) -> Result<Vec<PlaceRecord>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM geoname ORDER BY geo_name_id LIMIT ? OFFSET ?");
        let rows: Vec<PlaceRow> = sqlx::query_as(&sql)
            .bind(limit.max(0))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PlaceRecord::from).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM geoname")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::read_source;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir, tempdir};

    fn row(id: i64, name: &str, population: i64) -> String {
        format!(
            "{id}\t{name}\t{name}\t\t55.0\t37.0\tP\tPPL\tRU\t\t48\t\t\t\t{population}\t\t144\tEurope/Moscow\t2022-12-10"
        )
    }

    fn source(rows: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for r in rows {
            writeln!(file, "{r}").unwrap();
        }
        file
    }

    async fn open(dir: &TempDir) -> SqliteStore {
        let url = format!("sqlite://{}", dir.path().join("gazetteer.db").display());
        SqliteStore::connect(&url, 2).await.unwrap()
    }

    #[tokio::test]
    async fn load_then_skip() {
        let dir = tempdir().unwrap();
        let store = open(&dir).await;
        let file = source(&[row(2, "Omsk", 1), row(1, "Moscow", 2)]);

        assert!(!store.table_exists().await.unwrap());
        let first = store.load_if_empty(file.path()).await.unwrap();
        assert_eq!(first, LoadOutcome::Loaded { rows: 2 });
        assert_eq!(store.count().await.unwrap(), 2);

        let second = store.load_if_empty(file.path()).await.unwrap();
        assert_eq!(second, LoadOutcome::Skipped);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn reopened_database_skips_import() {
        let dir = tempdir().unwrap();
        let file = source(&[row(1, "Moscow", 2)]);

        let store = open(&dir).await;
        store.load_if_empty(file.path()).await.unwrap();
        store.close().await;

        let reopened = open(&dir).await;
        let outcome = reopened.load_if_empty(file.path()).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Skipped);
        assert_eq!(reopened.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_import_leaves_no_table() {
        let dir = tempdir().unwrap();
        let store = open(&dir).await;
        let bad = source(&[row(1, "Moscow", 2), "garbage".to_string()]);

        assert!(store.load_if_empty(bad.path()).await.is_err());
        assert!(!store.table_exists().await.unwrap());

        let good = source(&[row(1, "Moscow", 2)]);
        let outcome = store.load_if_empty(good.path()).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { rows: 1 });
    }

    #[tokio::test]
    async fn queries_follow_id_order() {
        let dir = tempdir().unwrap();
        let store = open(&dir).await;
        let file = source(&[
            row(30, "Omaha", 486_051),
            row(10, "Omsk", 1_129_281),
            row(20, "Moscow", 10_381_222),
            row(40, "Omsk", 0),
        ]);
        store.load_if_empty(file.path()).await.unwrap();

        let found = store.by_id(GeoNameId::new(20)).await.unwrap().unwrap();
        assert_eq!(found.name, "Moscow");
        assert_eq!(found.population, 10_381_222);
        assert_eq!(found.digital_elevation_model, "144");
        assert!(store.by_id(GeoNameId::new(99)).await.unwrap().is_none());

        let omsk: Vec<i64> = store
            .by_name("Omsk")
            .await
            .unwrap()
            .iter()
            .map(|r| r.geo_name_id.get())
            .collect();
        assert_eq!(omsk, vec![10, 40]);

        assert_eq!(
            store.by_prefix("Om").await.unwrap(),
            vec!["Omsk", "Omaha", "Omsk"]
        );
        assert!(store.by_prefix("om").await.unwrap().is_empty());
        assert!(store.by_prefix("O%").await.unwrap().is_empty());

        let page: Vec<i64> = store
            .page(1, 2)
            .await
            .unwrap()
            .iter()
            .map(|r| r.geo_name_id.get())
            .collect();
        assert_eq!(page, vec![20, 30]);
        assert!(store.page(4, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn prefix_edges() {
        let dir = tempdir().unwrap();
        let store = open(&dir).await;
        let file = source(&[
            row(1, "Om", 1),
            row(2, "Omsk", 1),
            row(3, "On", 1),
            row(4, "O_sk", 1),
            row(5, "Nizhniy Novgorod", 1),
        ]);
        store.load_if_empty(file.path()).await.unwrap();

        assert_eq!(store.by_prefix("Om").await.unwrap(), vec!["Om", "Omsk"]);
        assert_eq!(store.by_prefix("O_").await.unwrap(), vec!["O_sk"]);
        assert_eq!(
            store.by_prefix("Nizhniy ").await.unwrap(),
            vec!["Nizhniy Novgorod"]
        );
        assert_eq!(store.by_prefix("").await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn prefix_search_uses_name_index() {
        use sqlx::Row;

        let dir = tempdir().unwrap();
        let store = open(&dir).await;
        let file = source(&[row(1, "Omsk", 1)]);
        store.load_if_empty(file.path()).await.unwrap();

        let plan = sqlx::query(&format!("EXPLAIN QUERY PLAN {SELECT_BY_PREFIX}"))
            .bind("Om")
            .fetch_all(&store.pool)
            .await
            .unwrap();
        let details: Vec<String> = plan.iter().map(|r| r.get("detail")).collect();
        assert!(
            details.iter().any(|d| d.contains("ix_geoname_name")),
            "plan: {details:?}"
        );
    }

    #[tokio::test]
    async fn roundtrips_every_field() {
        let dir = tempdir().unwrap();
        let store = open(&dir).await;
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample.tsv");
        store.load_if_empty(&path).await.unwrap();

        let expected = read_source(&path).unwrap();
        for record in expected {
            let stored = store.by_id(record.geo_name_id).await.unwrap().unwrap();
            assert_eq!(stored, record);
        }
    }
}
