//! Typed record mutations.
//!
//! Front ends never touch the [`BookingRecord`] directly; they build a
//! [`RecordUpdate`] and hand it to the wizard, which applies it and
//! re-validates the active step.

use booking_domain::{BookingRecord, FieldId, JourneyType, Leg};
use chrono::NaiveDate;

use crate::{validation::parse_time, CoreError, TIME_FORMAT};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordUpdate {
    JourneyType(JourneyType),
    CollectionPoint(String),
    DestinationPoint(String),
    Date(Leg, Option<NaiveDate>),
    Time(Leg, String),
    Flexible(Leg, bool),
    Count(FieldId, u32),
    AddExtraItem(String),
    RemoveExtraItem(usize),
    PassengerName(String),
    PassengerEmail(String),
    PassengerPhone(String),
}

impl RecordUpdate {
    /// Field the update targets, used for touched-state tracking.
    pub fn field(&self) -> FieldId {
        match self {
            RecordUpdate::JourneyType(_) => FieldId::JourneyType,
            RecordUpdate::CollectionPoint(_) => FieldId::CollectionPoint,
            RecordUpdate::DestinationPoint(_) => FieldId::DestinationPoint,
            RecordUpdate::Date(Leg::Collection, _) => FieldId::CollectionDate,
            RecordUpdate::Date(Leg::Return, _) => FieldId::ReturnDate,
            RecordUpdate::Time(Leg::Collection, _) => FieldId::CollectionTime,
            RecordUpdate::Time(Leg::Return, _) => FieldId::ReturnTime,
            RecordUpdate::Flexible(Leg::Collection, _) => FieldId::CollectionFlexible,
            RecordUpdate::Flexible(Leg::Return, _) => FieldId::ReturnFlexible,
            RecordUpdate::Count(field, _) => *field,
            RecordUpdate::AddExtraItem(_) | RecordUpdate::RemoveExtraItem(_) => {
                FieldId::ExtraItems
            }
            RecordUpdate::PassengerName(_) => FieldId::PassengerName,
            RecordUpdate::PassengerEmail(_) => FieldId::PassengerEmail,
            RecordUpdate::PassengerPhone(_) => FieldId::PassengerPhone,
        }
    }

    /// Builds an update from raw text input for `field`.
    ///
    /// Dates use `YYYY-MM-DD`; an empty date clears it. Flags accept
    /// yes/no/true/false/1/0. Counts must be non-negative integers.
    pub fn parse(field: FieldId, raw: &str) -> Result<Self, CoreError> {
        let value = raw.trim();
        let update = match field {
            FieldId::JourneyType => RecordUpdate::JourneyType(
                value
                    .parse::<JourneyType>()
                    .map_err(|err| CoreError::invalid_value(field, err.to_string()))?,
            ),
            FieldId::CollectionPoint => RecordUpdate::CollectionPoint(value.to_string()),
            FieldId::DestinationPoint => RecordUpdate::DestinationPoint(value.to_string()),
            FieldId::CollectionDate => RecordUpdate::Date(Leg::Collection, parse_date(field, value)?),
            FieldId::ReturnDate => RecordUpdate::Date(Leg::Return, parse_date(field, value)?),
            FieldId::CollectionTime => RecordUpdate::Time(Leg::Collection, normalize_time(field, value)?),
            FieldId::ReturnTime => RecordUpdate::Time(Leg::Return, normalize_time(field, value)?),
            FieldId::CollectionFlexible => {
                RecordUpdate::Flexible(Leg::Collection, parse_flag(field, value)?)
            }
            FieldId::ReturnFlexible => RecordUpdate::Flexible(Leg::Return, parse_flag(field, value)?),
            FieldId::Adults
            | FieldId::Children
            | FieldId::Skis
            | FieldId::Snowboards
            | FieldId::Suitcases
            | FieldId::Prams => RecordUpdate::Count(
                field,
                value.parse::<u32>().map_err(|_| {
                    CoreError::invalid_value(field, "enter a whole number of 0 or more")
                })?,
            ),
            FieldId::ExtraItems => {
                if value.is_empty() {
                    return Err(CoreError::invalid_value(field, "item description is empty"));
                }
                RecordUpdate::AddExtraItem(value.to_string())
            }
            FieldId::PassengerName => RecordUpdate::PassengerName(value.to_string()),
            FieldId::PassengerEmail => RecordUpdate::PassengerEmail(value.to_string()),
            FieldId::PassengerPhone => RecordUpdate::PassengerPhone(value.to_string()),
        };
        Ok(update)
    }

    /// Applies the update, keeping the record's cross-field invariants.
    pub fn apply(self, record: &mut BookingRecord) -> Result<(), CoreError> {
        match self {
            RecordUpdate::JourneyType(journey_type) => {
                record.journey.journey_type = journey_type;
                if !journey_type.is_return() {
                    record.dates.clear_return();
                }
            }
            RecordUpdate::CollectionPoint(value) => record.journey.collection_point = value,
            RecordUpdate::DestinationPoint(value) => record.journey.destination_point = value,
            RecordUpdate::Date(leg, date) => record.dates.set_date(leg, date),
            RecordUpdate::Time(leg, time) => record.dates.set_time(leg, time),
            RecordUpdate::Flexible(leg, flexible) => record.dates.set_flexible(leg, flexible),
            RecordUpdate::Count(field, value) => {
                let slot = match field {
                    FieldId::Adults => &mut record.people.adults,
                    FieldId::Children => &mut record.people.children,
                    FieldId::Skis => &mut record.luggage.skis,
                    FieldId::Snowboards => &mut record.luggage.snowboards,
                    FieldId::Suitcases => &mut record.luggage.suitcases,
                    FieldId::Prams => &mut record.luggage.prams,
                    other => return Err(CoreError::ReadOnlyField(other)),
                };
                *slot = value;
            }
            RecordUpdate::AddExtraItem(item) => record.luggage.extra_items.push(item),
            RecordUpdate::RemoveExtraItem(index) => {
                if index >= record.luggage.extra_items.len() {
                    return Err(CoreError::invalid_value(
                        FieldId::ExtraItems,
                        format!("no extra item at position {}", index + 1),
                    ));
                }
                record.luggage.extra_items.remove(index);
            }
            RecordUpdate::PassengerName(value) => record.passenger.name = value,
            RecordUpdate::PassengerEmail(value) => record.passenger.email = value,
            RecordUpdate::PassengerPhone(value) => record.passenger.phone = value,
        }
        Ok(())
    }
}

fn parse_date(field: FieldId, value: &str) -> Result<Option<NaiveDate>, CoreError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::invalid_value(field, "use YYYY-MM-DD format"))
}

fn normalize_time(field: FieldId, value: &str) -> Result<String, CoreError> {
    if value.is_empty() {
        return Ok(String::new());
    }
    parse_time(value)
        .map(|time| time.format(TIME_FORMAT).to_string())
        .ok_or_else(|| CoreError::invalid_value(field, "use 24-hour HH:MM format"))
}

fn parse_flag(field: FieldId, value: &str) -> Result<bool, CoreError> {
    match value.to_ascii_lowercase().as_str() {
        "" | "yes" | "y" | "true" | "1" | "on" => Ok(true),
        "no" | "n" | "false" | "0" | "off" => Ok(false),
        _ => Err(CoreError::invalid_value(field, "answer yes or no")),
    }
}
