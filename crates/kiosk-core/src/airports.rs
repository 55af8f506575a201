//! Airport-code to city-name reference table.

use std::collections::HashMap;

use thiserror::Error;

/// An airport code was not present in the reference table. This is a
/// reference-data gap, not a transient condition, so it is a hard
/// error at the point of use rather than a silent default.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("airport code {code} missing from reference table")]
pub struct LookupMiss {
    pub code: String,
}

/// City names keyed by IATA airport code, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    cities: HashMap<String, String>,
}

impl AirportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, city: impl Into<String>) {
        self.cities.insert(code.into(), city.into());
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Resolve an airport code to its city name.
    pub fn city(&self, code: &str) -> Result<&str, LookupMiss> {
        self.cities
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| LookupMiss {
                code: code.to_string(),
            })
    }
}

impl FromIterator<(String, String)> for AirportTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            cities: iter.into_iter().collect(),
        }
    }
}
