//! The aggregate booking record and its five sections.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::journey::Journey;

pub const MIN_ADULTS: u32 = 1;
pub const MAX_ADULTS: u32 = 20;
pub const MAX_CHILDREN: u32 = 20;

/// Selects one leg of a journey for date operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Leg {
    Collection,
    Return,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Collection => f.write_str("collection"),
            Leg::Return => f.write_str("return"),
        }
    }
}

/// Collection and return scheduling.
///
/// A leg is either flexible ("I'm not sure yet") or carries a concrete date;
/// the setters below keep the two states mutually exclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Dates {
    pub collection_date: Option<NaiveDate>,
    pub collection_time: String,
    pub is_collection_flexible: bool,
    pub return_date: Option<NaiveDate>,
    pub return_time: String,
    pub is_return_flexible: bool,
}

impl Dates {
    pub fn date(&self, leg: Leg) -> Option<NaiveDate> {
        match leg {
            Leg::Collection => self.collection_date,
            Leg::Return => self.return_date,
        }
    }

    pub fn time(&self, leg: Leg) -> &str {
        match leg {
            Leg::Collection => &self.collection_time,
            Leg::Return => &self.return_time,
        }
    }

    pub fn is_flexible(&self, leg: Leg) -> bool {
        match leg {
            Leg::Collection => self.is_collection_flexible,
            Leg::Return => self.is_return_flexible,
        }
    }

    /// Sets a concrete date; a concrete date always clears the flexible flag.
    pub fn set_date(&mut self, leg: Leg, date: Option<NaiveDate>) {
        let (slot, flexible) = self.date_slots(leg);
        *slot = date;
        if date.is_some() {
            *flexible = false;
        }
    }

    pub fn set_time(&mut self, leg: Leg, time: impl Into<String>) {
        match leg {
            Leg::Collection => self.collection_time = time.into(),
            Leg::Return => self.return_time = time.into(),
        }
    }

    /// Toggles the flexible flag. Becoming flexible clears date and time.
    pub fn set_flexible(&mut self, leg: Leg, flexible: bool) {
        match leg {
            Leg::Collection => {
                self.is_collection_flexible = flexible;
                if flexible {
                    self.collection_date = None;
                    self.collection_time.clear();
                }
            }
            Leg::Return => {
                self.is_return_flexible = flexible;
                if flexible {
                    self.return_date = None;
                    self.return_time.clear();
                }
            }
        }
    }

    /// Drops everything about the return leg.
    pub fn clear_return(&mut self) {
        self.return_date = None;
        self.return_time.clear();
        self.is_return_flexible = false;
    }

    /// Day gap between both legs when both carry concrete, non-flexible dates.
    pub fn concrete_gap_days(&self) -> Option<i64> {
        if self.is_collection_flexible || self.is_return_flexible {
            return None;
        }
        match (self.collection_date, self.return_date) {
            (Some(from), Some(to)) => Some((to - from).num_days()),
            _ => None,
        }
    }

    fn date_slots(&mut self, leg: Leg) -> (&mut Option<NaiveDate>, &mut bool) {
        match leg {
            Leg::Collection => (&mut self.collection_date, &mut self.is_collection_flexible),
            Leg::Return => (&mut self.return_date, &mut self.is_return_flexible),
        }
    }
}

/// Party size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct People {
    pub adults: u32,
    pub children: u32,
}

impl Default for People {
    fn default() -> Self {
        Self {
            adults: MIN_ADULTS,
            children: 0,
        }
    }
}

impl People {
    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// Luggage counts; every field is optional and never invalid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Luggage {
    pub skis: u32,
    pub snowboards: u32,
    pub suitcases: u32,
    pub prams: u32,
    pub extra_items: Vec<String>,
}

impl Luggage {
    /// Suitcases and prams, priced per item.
    pub fn bag_count(&self) -> u32 {
        self.suitcases.saturating_add(self.prams)
    }

    /// Skis and snowboards, priced with the equipment surcharge.
    pub fn board_count(&self) -> u32 {
        self.skis.saturating_add(self.snowboards)
    }

    pub fn is_empty(&self) -> bool {
        self.bag_count() == 0 && self.board_count() == 0 && self.extra_items.is_empty()
    }
}

/// Lead passenger contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Passenger {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Passenger {
    pub fn phone_opt(&self) -> Option<&str> {
        let trimmed = self.phone.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Aggregate booking request built up across the wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRecord {
    pub journey: Journey,
    pub dates: Dates,
    pub people: People,
    pub luggage: Luggage,
    pub passenger: Passenger,
}

impl BookingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JourneyType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn flexible_clears_date_and_time() {
        let mut dates = Dates::default();
        dates.set_date(Leg::Collection, Some(date(2025, 1, 10)));
        dates.set_time(Leg::Collection, "09:30");
        dates.set_flexible(Leg::Collection, true);

        assert!(dates.is_collection_flexible);
        assert_eq!(dates.collection_date, None);
        assert!(dates.collection_time.is_empty());
    }

    #[test]
    fn concrete_date_clears_flexible() {
        let mut dates = Dates::default();
        dates.set_flexible(Leg::Return, true);
        dates.set_date(Leg::Return, Some(date(2025, 1, 14)));

        assert!(!dates.is_return_flexible);
        assert_eq!(dates.return_date, Some(date(2025, 1, 14)));
    }

    #[test]
    fn gap_ignores_flexible_legs() {
        let mut dates = Dates::default();
        dates.set_date(Leg::Collection, Some(date(2025, 1, 10)));
        dates.set_date(Leg::Return, Some(date(2025, 1, 14)));
        assert_eq!(dates.concrete_gap_days(), Some(4));

        dates.set_flexible(Leg::Return, true);
        assert_eq!(dates.concrete_gap_days(), None);
    }

    #[test]
    fn record_uses_camel_case_wire_format() {
        let mut record = BookingRecord::new();
        record.journey.journey_type = JourneyType::Return;
        record.dates.set_date(Leg::Collection, Some(date(2025, 1, 10)));
        record.luggage.extra_items.push("Golf bag".into());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["journey"]["type"], "return");
        assert_eq!(value["dates"]["collectionDate"], "2025-01-10");
        assert_eq!(value["dates"]["isReturnFlexible"], false);
        assert_eq!(value["luggage"]["extraItems"][0], "Golf bag");
        assert_eq!(value["people"]["adults"], 1);
    }

    #[test]
    fn partial_payload_fills_defaults() {
        let record: BookingRecord = serde_json::from_str(
            r#"{"journey":{"collectionPoint":"GVA","destinationPoint":"Verbier"},"passenger":{"email":"a@b.ch"}}"#,
        )
        .unwrap();
        assert_eq!(record.journey.journey_type, JourneyType::OneWay);
        assert_eq!(record.people, People::default());
        assert!(record.luggage.is_empty());
        assert_eq!(record.passenger.phone_opt(), None);
    }
}
