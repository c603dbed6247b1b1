use booking_domain::{BookingRecord, FieldId, JourneyType, Leg};
use chrono::NaiveDate;

use crate::{
    estimate_price, summary_rows, validate_record, validate_step, validator_for, FixedClock,
    PriceTable, QuoteId, RecordUpdate, ValidationContext, WizardStep,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn context() -> ValidationContext {
    ValidationContext::new(date(2025, 1, 1))
}

fn complete_record(journey_type: JourneyType) -> BookingRecord {
    let mut record = BookingRecord::new();
    record.journey.journey_type = journey_type;
    record.journey.collection_point = "Geneva Airport".into();
    record.journey.destination_point = "Verbier".into();
    record.dates.set_date(Leg::Collection, Some(date(2025, 1, 10)));
    record.dates.set_time(Leg::Collection, "10:30");
    if journey_type.is_return() {
        record.dates.set_date(Leg::Return, Some(date(2025, 1, 24)));
        record.dates.set_time(Leg::Return, "14:00");
    }
    record.passenger.name = "Ada Lovelace".into();
    record.passenger.email = "ada@example.com".into();
    record
}

#[test]
fn step_indices_round_trip() {
    for step in WizardStep::ALL {
        assert_eq!(WizardStep::from_index(step.index()).unwrap(), step);
    }
    assert!(WizardStep::from_index(0).is_err());
    assert!(WizardStep::from_index(7).is_err());
    assert_eq!(WizardStep::Journey.previous(), None);
    assert_eq!(WizardStep::Summary.next(), None);
}

#[test]
fn journey_validator_requires_distinct_points() {
    let mut record = BookingRecord::new();
    let errors = validate_step(WizardStep::Journey, &record, &context());
    assert!(errors.contains(FieldId::CollectionPoint));
    assert!(errors.contains(FieldId::DestinationPoint));

    record.journey.collection_point = "Verbier".into();
    record.journey.destination_point = " verbier ".into();
    let errors = validator_for(WizardStep::Journey)(&record, &context());
    assert_eq!(errors.len(), 1);
    assert!(errors
        .get(FieldId::DestinationPoint)
        .unwrap()
        .contains("different"));
}

#[test]
fn dates_validator_only_weighs_return_leg_on_return_journeys() {
    let mut record = complete_record(JourneyType::OneWay);
    record.dates.return_time = "not a time".into();
    assert!(validate_step(WizardStep::Dates, &record, &context()).is_empty());

    record.journey.journey_type = JourneyType::Return;
    let errors = validate_step(WizardStep::Dates, &record, &context());
    assert!(errors.contains(FieldId::ReturnDate));
}

#[test]
fn dates_validator_accepts_flexible_legs_and_rejects_bad_input() {
    let mut record = complete_record(JourneyType::Return);
    record.dates.set_flexible(Leg::Collection, true);
    record.dates.set_flexible(Leg::Return, true);
    assert!(validate_step(WizardStep::Dates, &record, &context()).is_empty());

    let mut record = complete_record(JourneyType::Return);
    record.dates.set_date(Leg::Return, Some(date(2025, 1, 5)));
    let errors = validate_step(WizardStep::Dates, &record, &context());
    assert!(errors.get(FieldId::ReturnDate).unwrap().contains("on or after"));

    let mut record = complete_record(JourneyType::OneWay);
    record.dates.set_date(Leg::Collection, Some(date(2024, 12, 24)));
    record.dates.set_time(Leg::Collection, "");
    let errors = validate_step(WizardStep::Dates, &record, &context());
    assert!(errors.get(FieldId::CollectionDate).unwrap().contains("past"));
    assert!(errors.contains(FieldId::CollectionTime));
}

#[test]
fn past_dates_are_accepted_without_a_lower_bound() {
    let mut record = complete_record(JourneyType::Return);
    record.dates.set_date(Leg::Collection, Some(date(2020, 3, 1)));
    record.dates.set_date(Leg::Return, Some(date(2020, 3, 5)));
    assert!(validate_step(WizardStep::Dates, &record, &ValidationContext::unbounded()).is_empty());
    assert!(!validate_step(WizardStep::Dates, &record, &context()).is_empty());
}

#[test]
fn people_validator_enforces_bounds() {
    let mut record = BookingRecord::new();
    assert!(validate_step(WizardStep::People, &record, &context()).is_empty());

    record.people.adults = 0;
    record.people.children = 21;
    let errors = validate_step(WizardStep::People, &record, &context());
    assert!(errors.contains(FieldId::Adults));
    assert!(errors.contains(FieldId::Children));

    record.people.adults = 21;
    record.people.children = 20;
    let errors = validate_step(WizardStep::People, &record, &context());
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(FieldId::Adults));
}

#[test]
fn luggage_never_fails() {
    let mut record = BookingRecord::new();
    record.luggage.skis = u32::MAX;
    assert!(validate_step(WizardStep::Luggage, &record, &context()).is_empty());
}

#[test]
fn passenger_validator_checks_name_email_and_optional_phone() {
    let mut record = BookingRecord::new();
    record.passenger.email = "not-an-email".into();
    let errors = validate_step(WizardStep::Passenger, &record, &context());
    assert!(errors.contains(FieldId::PassengerName));
    assert!(errors.get(FieldId::PassengerEmail).unwrap().contains("valid"));
    assert!(!errors.contains(FieldId::PassengerPhone));

    record.passenger.name = "Ada".into();
    record.passenger.email = "ada@example.com".into();
    record.passenger.phone = "call me".into();
    let errors = validate_step(WizardStep::Passenger, &record, &context());
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(FieldId::PassengerPhone));

    record.passenger.phone = "+41 (0)79 123 45 67".into();
    assert!(validate_step(WizardStep::Passenger, &record, &context()).is_empty());
}

#[test]
fn summary_validator_covers_every_step() {
    let record = complete_record(JourneyType::Return);
    assert!(validate_step(WizardStep::Summary, &record, &context()).is_empty());

    let mut broken = record.clone();
    broken.passenger.email.clear();
    broken.journey.destination_point.clear();
    let errors = validate_step(WizardStep::Summary, &broken, &context());
    assert_eq!(errors, validate_record(&broken, &context()));
    assert_eq!(errors.len(), 2);
}

#[test]
fn record_update_parses_text_input() {
    assert_eq!(
        RecordUpdate::parse(FieldId::ReturnDate, "2025-02-01").unwrap(),
        RecordUpdate::Date(Leg::Return, Some(date(2025, 2, 1)))
    );
    assert_eq!(
        RecordUpdate::parse(FieldId::CollectionTime, "9:05").unwrap(),
        RecordUpdate::Time(Leg::Collection, "09:05".into())
    );
    assert_eq!(
        RecordUpdate::parse(FieldId::CollectionFlexible, "yes").unwrap(),
        RecordUpdate::Flexible(Leg::Collection, true)
    );
    assert!(RecordUpdate::parse(FieldId::Adults, "-1").is_err());
    assert!(RecordUpdate::parse(FieldId::CollectionDate, "10/01/2025").is_err());
}

#[test]
fn switching_to_one_way_drops_return_leg() {
    let mut record = complete_record(JourneyType::Return);
    RecordUpdate::JourneyType(JourneyType::OneWay)
        .apply(&mut record)
        .unwrap();
    assert_eq!(record.dates.return_date, None);
    assert!(record.dates.return_time.is_empty());
    assert_eq!(record.dates.collection_date, Some(date(2025, 1, 10)));
}

#[test]
fn removing_missing_extra_item_fails() {
    let mut record = BookingRecord::new();
    assert!(RecordUpdate::RemoveExtraItem(0).apply(&mut record).is_err());
    RecordUpdate::AddExtraItem("Bike box".into())
        .apply(&mut record)
        .unwrap();
    RecordUpdate::RemoveExtraItem(0).apply(&mut record).unwrap();
    assert!(record.luggage.extra_items.is_empty());
}

#[test]
fn base_price_only_for_single_adult_one_way() {
    let mut record = complete_record(JourneyType::OneWay);
    record.people.adults = 1;
    record.people.children = 0;
    let estimate = estimate_price(&record);
    assert_eq!(estimate.total, 80);
    assert_eq!(estimate.base, 80);
    assert_eq!(estimate.currency, "EUR");
}

#[test]
fn return_price_adds_passengers_and_luggage() {
    let mut record = complete_record(JourneyType::Return);
    record.people.adults = 2;
    record.people.children = 1;
    record.luggage.suitcases = 2;
    let estimate = estimate_price(&record);
    assert_eq!(estimate.base, 150);
    assert_eq!(estimate.passengers, 30);
    assert_eq!(estimate.luggage, 10);
    assert_eq!(estimate.total, 190);
}

#[test]
fn equipment_surcharge_uses_configured_table() {
    let table = PriceTable {
        per_equipment_item: 12,
        currency: "CHF".into(),
        ..PriceTable::default()
    };
    let mut record = complete_record(JourneyType::OneWay);
    record.luggage.skis = 2;
    record.luggage.snowboards = 1;
    let estimate = table.estimate(&record);
    assert_eq!(estimate.equipment, 36);
    assert_eq!(estimate.total, 116);
    assert_eq!(estimate.currency, "CHF");
}

#[test]
fn quote_ids_embed_the_clock_date() {
    let clock = FixedClock::at_date(2025, 1, 10).unwrap();
    let first = QuoteId::generate(&clock);
    let second = QuoteId::generate(&clock);
    assert!(first.as_str().starts_with("Q-20250110-"));
    assert_eq!(first.as_str().len(), "Q-20250110-".len() + 8);
    assert_ne!(first, second);
}

#[test]
fn summary_rows_hide_return_leg_for_one_way() {
    let record = complete_record(JourneyType::OneWay);
    let rows = summary_rows(&record);
    assert!(rows.iter().all(|(label, _)| *label != "Return"));
    assert!(rows
        .iter()
        .any(|(label, value)| *label == "Collection" && value == "Fri 10 Jan 2025 at 10:30"));

    let mut flexible = complete_record(JourneyType::Return);
    flexible.dates.set_flexible(Leg::Return, true);
    let rows = summary_rows(&flexible);
    assert!(rows
        .iter()
        .any(|(label, value)| *label == "Return" && value == "Not sure yet"));
}
