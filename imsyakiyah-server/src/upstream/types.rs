//! Upstream payload types.
//!
//! These mirror what the site sends. Schedule payloads are cached in this
//! shape, so a cached entry reads back exactly like a fresh scrape.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::domain::{ScheduleEntry, ScheduleMeta};

/// Message the site uses to flag a complete schedule.
pub const SUCCESS_MESSAGE: &str = "Success";

/// An `<option>` scraped from a region dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOption {
    /// The option's `value` attribute (empty if absent).
    pub code: String,
    /// The option's text content.
    pub name: String,
}

impl RegionOption {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Schedule payload returned by the `getImsyakiyah` endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpstreamSchedule {
    #[serde(default)]
    pub status: serde_json::Value,

    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,

    /// Province name
    #[serde(default, deserialize_with = "lenient_string")]
    pub prov: String,

    /// City/regency name
    #[serde(default, deserialize_with = "lenient_string")]
    pub kabko: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub lintang: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub bujur: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub hijriah: String,

    #[serde(default)]
    pub data: DayMap,
}

impl UpstreamSchedule {
    /// Whether the site reported a complete schedule.
    pub fn is_success(&self) -> bool {
        self.message == SUCCESS_MESSAGE
    }

    /// Metadata for the requested year.
    pub fn meta(&self, year: &str) -> ScheduleMeta {
        ScheduleMeta {
            state: self.prov.clone(),
            city: self.kabko.clone(),
            year: year.to_string(),
            latitude: self.lintang.clone(),
            longitude: self.bujur.clone(),
            hijri: self.hijriah.clone(),
        }
    }
}

/// One day as the site describes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamDay {
    pub tanggal: String,
    pub imsak: String,
    pub subuh: String,
    pub terbit: String,
    pub dhuha: String,
    pub dzuhur: String,
    pub ashar: String,
    pub maghrib: String,
    pub isya: String,
}

impl UpstreamDay {
    /// Flatten into the client-facing schema.
    pub fn to_entry(&self) -> ScheduleEntry {
        ScheduleEntry {
            date: self.tanggal.clone(),
            imsak: self.imsak.clone(),
            subuh: self.subuh.clone(),
            syuruk: self.terbit.clone(),
            dhuha: self.dhuha.clone(),
            dzuhur: self.dzuhur.clone(),
            ashar: self.ashar.clone(),
            maghrib: self.maghrib.clone(),
            isya: self.isya.clone(),
        }
    }
}

/// Per-day mapping that keeps the order the site sent.
///
/// Serialized as a JSON object. An empty mapping is often sent as `[]`,
/// which deserializes to an empty map; a non-empty array is keyed by index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayMap(Vec<(String, UpstreamDay)>);

impl DayMap {
    pub fn new(days: Vec<(String, UpstreamDay)>) -> Self {
        Self(days)
    }

    /// Look up a day by its key.
    pub fn get(&self, key: &str) -> Option<&UpstreamDay> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, day)| day)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UpstreamDay)> {
        self.0.iter().map(|(k, day)| (k.as_str(), day))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for DayMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, day) in &self.0 {
            map.serialize_entry(key, day)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DayMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DayMapVisitor)
    }
}

struct DayMapVisitor;

impl<'de> Visitor<'de> for DayMapVisitor {
    type Value = DayMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of days")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DayMap, A::Error> {
        let mut days = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, day)) = access.next_entry::<String, UpstreamDay>()? {
            days.push((key, day));
        }
        Ok(DayMap(days))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<DayMap, A::Error> {
        let mut days = Vec::new();
        while let Some(day) = access.next_element::<UpstreamDay>()? {
            days.push((days.len().to_string(), day));
        }
        Ok(DayMap(days))
    }

    fn visit_unit<E: de::Error>(self) -> Result<DayMap, E> {
        Ok(DayMap::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<DayMap, E> {
        Ok(DayMap::default())
    }
}

/// Accept a string, number, bool or null where a string is expected.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
