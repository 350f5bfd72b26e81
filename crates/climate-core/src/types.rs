//! Record types for daily station observations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One station's recorded precipitation and temperature for one date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// Station this observation belongs to
    pub station_id: String,

    /// Calendar date of the observation (no time component)
    pub date: NaiveDate,

    /// Recorded precipitation; `None` means nothing was recorded that day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,

    /// Observed temperature
    pub temperature: f64,
}

/// A monitored station
///
/// Everything besides `station_id` is descriptive metadata that queries pass
/// through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub station_id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Immutable dataset snapshot
///
/// Both collections are loaded once at process start and never mutated.
/// Enumeration order is the store's natural order and is stable for the
/// process lifetime, which queries rely on.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
    stations: Vec<Station>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>, stations: Vec<Station>) -> Self {
        Self {
            observations,
            stations,
        }
    }

    /// All observations, in load order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// All stations, in load order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_serde() {
        let json = r#"{"station_id":"USC00519397","date":"2017-08-01","precipitation":0.08,"temperature":81.0}"#;
        let obs: Observation = serde_json::from_str(json).unwrap();

        assert_eq!(obs.station_id, "USC00519397");
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2017, 8, 1).unwrap());
        assert_eq!(obs.precipitation, Some(0.08));
        assert_eq!(obs.temperature, 81.0);
    }

    #[test]
    fn test_observation_missing_precipitation() {
        let json = r#"{"station_id":"USC00519397","date":"2017-08-01","temperature":81.0}"#;
        let obs: Observation = serde_json::from_str(json).unwrap();

        assert_eq!(obs.precipitation, None);
        let out = serde_json::to_string(&obs).unwrap();
        assert!(!out.contains("precipitation"));
    }

    #[test]
    fn test_dataset_preserves_load_order() {
        let stations = vec![
            Station {
                station_id: "S2".into(),
                name: None,
                latitude: None,
                longitude: None,
                elevation: None,
            },
            Station {
                station_id: "S1".into(),
                name: None,
                latitude: None,
                longitude: None,
                elevation: None,
            },
        ];
        let dataset = Dataset::new(Vec::new(), stations);

        let ids: Vec<_> = dataset.stations().iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(ids, vec!["S2", "S1"]);
        assert!(dataset.is_empty());
    }
}
