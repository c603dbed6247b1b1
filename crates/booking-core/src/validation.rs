//! Per-step validation.
//!
//! Each wizard step owns one validator function; [`validator_for`] looks the
//! function up by step. Validators are pure and return every failing field
//! of their step, whether or not the user has touched it yet; deciding what
//! to display is left to the wizard.

use std::collections::{BTreeMap, BTreeSet};

use booking_domain::{
    BookingRecord, FieldId, Leg, MAX_ADULTS, MAX_CHILDREN, MIN_ADULTS,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::{step::WizardStep, time::Clock};

pub const TIME_FORMAT: &str = "%H:%M";
const MIN_PHONE_DIGITS: usize = 7;

/// Failing fields mapped to a user-facing message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldId, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldId, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.insert(field, message);
        }
    }

    /// Errors restricted to fields the user has interacted with.
    pub fn visible<'a>(&'a self, touched: &'a BTreeSet<FieldId>) -> Vec<(FieldId, &'a str)> {
        self.iter()
            .filter(|(field, _)| touched.contains(field))
            .collect()
    }
}

/// Inputs validators need besides the record itself.
///
/// `today` is the earliest acceptable travel date; `None` accepts any date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: Option<NaiveDate>,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    /// No lower bound on travel dates.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.today())
    }
}

pub type StepValidator = fn(&BookingRecord, &ValidationContext) -> FieldErrors;

const VALIDATORS: [StepValidator; WizardStep::COUNT as usize] = [
    validate_journey,
    validate_dates,
    validate_people,
    validate_luggage,
    validate_passenger,
    validate_summary,
];

pub fn validator_for(step: WizardStep) -> StepValidator {
    VALIDATORS[usize::from(step.index() - 1)]
}

pub fn validate_step(
    step: WizardStep,
    record: &BookingRecord,
    context: &ValidationContext,
) -> FieldErrors {
    validator_for(step)(record, context)
}

/// Runs every data-entry step against the full record.
pub fn validate_record(record: &BookingRecord, context: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for step in WizardStep::ALL.iter().filter(|step| !step.is_last()) {
        errors.merge(validate_step(*step, record, context));
    }
    errors
}

pub fn validate_journey(record: &BookingRecord, _context: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let collection = record.journey.collection_point.trim();
    let destination = record.journey.destination_point.trim();

    if collection.is_empty() {
        errors.insert(FieldId::CollectionPoint, "Please choose a collection point");
    }
    if destination.is_empty() {
        errors.insert(FieldId::DestinationPoint, "Please choose a destination");
    }
    if !collection.is_empty() && collection.eq_ignore_ascii_case(destination) {
        errors.insert(
            FieldId::DestinationPoint,
            "Destination must be different from the collection point",
        );
    }
    errors
}

pub fn validate_dates(record: &BookingRecord, context: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_leg(record, Leg::Collection, context, &mut errors);

    if record.journey.is_return() {
        validate_leg(record, Leg::Return, context, &mut errors);
        if let (Some(from), Some(to)) = (record.dates.collection_date, record.dates.return_date) {
            if to < from {
                errors.insert(
                    FieldId::ReturnDate,
                    "Return date must be on or after the collection date",
                );
            }
        }
    }
    errors
}

fn validate_leg(
    record: &BookingRecord,
    leg: Leg,
    context: &ValidationContext,
    errors: &mut FieldErrors,
) {
    let dates = &record.dates;
    if dates.is_flexible(leg) {
        return;
    }
    let (date_field, time_field) = match leg {
        Leg::Collection => (FieldId::CollectionDate, FieldId::CollectionTime),
        Leg::Return => (FieldId::ReturnDate, FieldId::ReturnTime),
    };

    let Some(date) = dates.date(leg) else {
        errors.insert(
            date_field,
            format!("Please choose a {leg} date or select \"I'm not sure\""),
        );
        return;
    };
    if context.today.is_some_and(|today| date < today) {
        errors.insert(date_field, format!("The {leg} date cannot be in the past"));
    }

    let time = dates.time(leg).trim();
    if time.is_empty() {
        errors.insert(time_field, format!("Please choose a {leg} time"));
    } else if parse_time(time).is_none() {
        errors.insert(time_field, "Use 24-hour HH:MM format");
    }
}

pub fn validate_people(record: &BookingRecord, _context: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let people = &record.people;
    if people.adults < MIN_ADULTS {
        errors.insert(FieldId::Adults, "At least one adult must travel");
    } else if people.adults > MAX_ADULTS {
        errors.insert(
            FieldId::Adults,
            format!("A maximum of {MAX_ADULTS} adults can be booked online"),
        );
    }
    if people.children > MAX_CHILDREN {
        errors.insert(
            FieldId::Children,
            format!("A maximum of {MAX_CHILDREN} children can be booked online"),
        );
    }
    errors
}

/// Luggage is entirely optional.
pub fn validate_luggage(_record: &BookingRecord, _context: &ValidationContext) -> FieldErrors {
    FieldErrors::new()
}

pub fn validate_passenger(record: &BookingRecord, _context: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let passenger = &record.passenger;

    if passenger.name.trim().is_empty() {
        errors.insert(FieldId::PassengerName, "Please enter the lead passenger's name");
    }
    let email = passenger.email.trim();
    if email.is_empty() {
        errors.insert(FieldId::PassengerEmail, "Please enter an email address");
    } else if !is_plausible_email(email) {
        errors.insert(FieldId::PassengerEmail, "Please enter a valid email address");
    }
    if let Some(phone) = passenger.phone_opt() {
        if !is_plausible_phone(phone) {
            errors.insert(
                FieldId::PassengerPhone,
                "Phone numbers may only contain digits, spaces and + - ( )",
            );
        }
    }
    errors
}

/// The summary can be submitted once every data-entry step is valid.
pub fn validate_summary(record: &BookingRecord, context: &ValidationContext) -> FieldErrors {
    validate_record(record, context)
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()
}

pub fn is_plausible_email(email: &str) -> bool {
    email.contains('@')
}

pub fn is_plausible_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '+' | '-' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= MIN_PHONE_DIGITS
}
