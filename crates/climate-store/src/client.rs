//! Store client and one-shot dataset loading

use std::time::Duration;

use climate_core::{Dataset, DatasetSource, Station};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, instrument};

use crate::rows::{MeasurementRow, StationRow};
use crate::StoreResult;

/// Store client wrapping a sqlx connection pool
///
/// The pool only lives through the startup load; the snapshot it produces is
/// what the rest of the process holds on to.
#[derive(Clone)]
pub struct StoreClient {
    pool: SqlitePool,
}

impl StoreClient {
    /// Open the dataset database, e.g. `sqlite://climate.db`
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get reference to underlying pool for direct queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Test the database connection
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Scan both collections into an immutable snapshot.
    ///
    /// Rows are read in `ORDER BY id`, the tables' insertion order, so the
    /// snapshot's enumeration order is stable across loads.
    #[instrument(skip(self))]
    pub async fn load_dataset(&self) -> StoreResult<Dataset> {
        let measurement_rows = sqlx::query_as::<_, MeasurementRow>(
            r#"
            SELECT id, station, date, prcp, tobs FROM measurement
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let station_rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, station, name, latitude, longitude, elevation FROM station
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let observations = measurement_rows
            .into_iter()
            .map(MeasurementRow::into_observation)
            .collect::<StoreResult<Vec<_>>>()?;
        let stations: Vec<Station> = station_rows.into_iter().map(Station::from).collect();

        debug!(
            "Loaded {} observations and {} stations",
            observations.len(),
            stations.len()
        );
        Ok(Dataset::new(observations, stations))
    }

    /// Close the connection pool gracefully
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl DatasetSource for StoreClient {
    async fn load(&self) -> anyhow::Result<Dataset> {
        Ok(self.load_dataset().await?)
    }
}
