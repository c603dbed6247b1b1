//! Deterministic price estimate from a small fixed-cost table.

use booking_domain::{BookingRecord, JourneyType};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "EUR";

/// Fixed costs, in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceTable {
    pub one_way_base: u32,
    pub return_base: u32,
    /// Charged for each passenger beyond the first.
    pub per_extra_passenger: u32,
    /// Charged for each suitcase or pram.
    pub per_luggage_item: u32,
    /// Charged for each pair of skis or snowboard.
    pub per_equipment_item: u32,
    pub currency: String,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            one_way_base: 80,
            return_base: 150,
            per_extra_passenger: 15,
            per_luggage_item: 5,
            per_equipment_item: 10,
            currency: DEFAULT_CURRENCY.into(),
        }
    }
}

/// Itemised estimate; `total` is the sum of the four components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    pub base: u32,
    pub passengers: u32,
    pub luggage: u32,
    pub equipment: u32,
    pub total: u32,
    pub currency: String,
}

impl PriceTable {
    pub fn base_fare(&self, journey_type: JourneyType) -> u32 {
        match journey_type {
            JourneyType::OneWay => self.one_way_base,
            JourneyType::Return => self.return_base,
        }
    }

    pub fn estimate(&self, record: &BookingRecord) -> PriceEstimate {
        let base = self.base_fare(record.journey.journey_type);
        let extra_passengers = record.people.total().saturating_sub(1);
        let passengers = extra_passengers.saturating_mul(self.per_extra_passenger);
        let luggage = record
            .luggage
            .bag_count()
            .saturating_mul(self.per_luggage_item);
        let equipment = record
            .luggage
            .board_count()
            .saturating_mul(self.per_equipment_item);
        let total = base
            .saturating_add(passengers)
            .saturating_add(luggage)
            .saturating_add(equipment);

        PriceEstimate {
            base,
            passengers,
            luggage,
            equipment,
            total,
            currency: self.currency.clone(),
        }
    }
}

/// Estimate with the default table.
pub fn estimate_price(record: &BookingRecord) -> PriceEstimate {
    PriceTable::default().estimate(record)
}
