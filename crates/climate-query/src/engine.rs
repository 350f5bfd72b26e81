//! The four query operations over a dataset snapshot

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use climate_core::Dataset;
use serde::Serialize;

use crate::date::{one_year_before, parse_date};
use crate::{QueryError, QueryResult};

/// One `(date, temperature)` reading for the most active station
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureObservation {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Min/max/avg temperature over a date range
///
/// `end = None` marks an open-ended range. `avg` is rounded to two decimal
/// places; `min` and `max` are unrounded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureSummary {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Read-only query engine over an injected dataset snapshot
pub struct QueryEngine {
    dataset: Arc<Dataset>,
}

impl QueryEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    fn latest_date(&self) -> Option<NaiveDate> {
        self.dataset.observations().iter().map(|o| o.date).max()
    }

    /// Precipitation per date over the final year of the dataset.
    ///
    /// The cutoff is the latest observed date minus one calendar year. When
    /// several stations report the same date, the entry later in storage
    /// order overwrites the earlier one. A recorded-nothing day stays in the
    /// result as `None`. An empty dataset yields an empty map.
    pub fn recent_precipitation(&self) -> BTreeMap<NaiveDate, Option<f64>> {
        let Some(latest) = self.latest_date() else {
            return BTreeMap::new();
        };
        let cutoff = one_year_before(latest);

        let mut by_date = BTreeMap::new();
        for obs in self.dataset.observations() {
            if obs.date >= cutoff {
                by_date.insert(obs.date, obs.precipitation);
            }
        }
        by_date
    }

    /// Distinct station ids, first-seen order preserved
    pub fn list_stations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for station in self.dataset.stations() {
            if seen.insert(station.station_id.as_str()) {
                ids.push(station.station_id.clone());
            }
        }
        ids
    }

    /// The station with the most observations.
    ///
    /// Ties break to the lowest station id, so the selection is stable
    /// across calls over an unchanged snapshot.
    pub fn most_active_station(&self) -> QueryResult<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for obs in self.dataset.observations() {
            *counts.entry(obs.station_id.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .max_by(|(id_a, n_a), (id_b, n_b)| n_a.cmp(n_b).then_with(|| id_b.cmp(id_a)))
            .map(|(id, _)| id.to_string())
            .ok_or(QueryError::NoData)
    }

    /// Temperature readings for the most active station over the final year
    /// of the dataset, in storage order.
    pub fn recent_temperature_observations(&self) -> QueryResult<Vec<TemperatureObservation>> {
        let station = self.most_active_station()?;
        let latest = self.latest_date().ok_or(QueryError::NoData)?;
        let cutoff = one_year_before(latest);

        Ok(self
            .dataset
            .observations()
            .iter()
            .filter(|o| o.station_id == station && o.date >= cutoff)
            .map(|o| TemperatureObservation {
                date: o.date,
                temperature: o.temperature,
            })
            .collect())
    }

    /// Min/max/avg temperature from `start`, optionally bounded by `end`.
    ///
    /// Both inputs must be `YYYY-MM-DD`. An empty filtered set (including
    /// `end` before `start`) is reported as [`QueryError::NoData`] rather
    /// than a zero aggregate.
    pub fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> QueryResult<TemperatureSummary> {
        let start = parse_date(start)?;
        let end = end.map(parse_date).transpose()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for obs in self.dataset.observations() {
            if obs.date < start {
                continue;
            }
            if let Some(end) = end {
                if obs.date > end {
                    continue;
                }
            }
            min = min.min(obs.temperature);
            max = max.max(obs.temperature);
            sum += obs.temperature;
            count += 1;
        }

        if count == 0 {
            return Err(QueryError::NoData);
        }

        let avg = (sum / count as f64 * 100.0).round() / 100.0;
        Ok(TemperatureSummary {
            start,
            end,
            min,
            max,
            avg,
        })
    }
}
