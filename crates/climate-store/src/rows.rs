//! Row types matching the source SQLite schema
//!
//! IMPORTANT: column names must match the layout of the externally produced
//! dataset database. Do not rename fields without checking the source file.

use chrono::NaiveDate;
use climate_core::{Observation, Station};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{StoreError, StoreResult};

/// measurement table row (one station's readings for one date)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub id: i64,
    pub station: String,

    /// Stored as TEXT in `YYYY-MM-DD` form
    pub date: String,

    pub prcp: Option<f64>,
    pub tobs: f64,
}

impl MeasurementRow {
    pub fn into_observation(self) -> StoreResult<Observation> {
        let date =
            NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| StoreError::MalformedDate {
                row: self.id,
                value: self.date.clone(),
            })?;

        Ok(Observation {
            station_id: self.station,
            date,
            precipitation: self.prcp,
            temperature: self.tobs,
        })
    }
}

/// station table row (station identity plus descriptive metadata)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StationRow {
    pub id: i64,
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Station {
            station_id: row.station,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            elevation: row.elevation,
        }
    }
}

/// Table names in the source database
pub mod tables {
    pub const MEASUREMENT: &str = "measurement";
    pub const STATION: &str = "station";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_row_conversion() {
        let row = MeasurementRow {
            id: 1,
            station: "USC00519397".into(),
            date: "2017-08-01".into(),
            prcp: None,
            tobs: 81.0,
        };

        let obs = row.into_observation().unwrap();
        assert_eq!(obs.station_id, "USC00519397");
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2017, 8, 1).unwrap());
        assert_eq!(obs.precipitation, None);
    }

    #[test]
    fn test_measurement_row_rejects_malformed_date() {
        let row = MeasurementRow {
            id: 7,
            station: "USC00519397".into(),
            date: "08/01/2017".into(),
            prcp: Some(0.1),
            tobs: 80.0,
        };

        assert!(matches!(
            row.into_observation(),
            Err(StoreError::MalformedDate { row: 7, .. })
        ));
    }

    #[test]
    fn test_table_names() {
        assert_eq!(tables::MEASUREMENT, "measurement");
        assert_eq!(tables::STATION, "station");
    }
}
