//! Text rendering of wizard state.

use booking_core::{
    price_line, summary_rows, BookingReceipt, PriceTable, WizardStep, WizardView, DATE_FORMAT,
};
use booking_domain::{BookingRecord, FieldId};

use crate::cli::output::{self, section};

const NOT_SURE: &str = "not sure yet";
const EMPTY: &str = "-";

/// Current value of `field` as the user would type it.
pub fn field_value(record: &BookingRecord, field: FieldId) -> String {
    let dates = &record.dates;
    let people = &record.people;
    let luggage = &record.luggage;
    let passenger = &record.passenger;
    let value = match field {
        FieldId::JourneyType => record.journey.journey_type.as_str().to_string(),
        FieldId::CollectionPoint => record.journey.collection_point.clone(),
        FieldId::DestinationPoint => record.journey.destination_point.clone(),
        FieldId::CollectionDate => date_value(dates.collection_date, dates.is_collection_flexible),
        FieldId::ReturnDate => date_value(dates.return_date, dates.is_return_flexible),
        FieldId::CollectionTime => dates.collection_time.clone(),
        FieldId::ReturnTime => dates.return_time.clone(),
        FieldId::CollectionFlexible => yes_no(dates.is_collection_flexible),
        FieldId::ReturnFlexible => yes_no(dates.is_return_flexible),
        FieldId::Adults => people.adults.to_string(),
        FieldId::Children => people.children.to_string(),
        FieldId::Skis => luggage.skis.to_string(),
        FieldId::Snowboards => luggage.snowboards.to_string(),
        FieldId::Suitcases => luggage.suitcases.to_string(),
        FieldId::Prams => luggage.prams.to_string(),
        FieldId::ExtraItems => luggage
            .extra_items
            .iter()
            .enumerate()
            .map(|(idx, item)| format!("{}. {}", idx + 1, item))
            .collect::<Vec<_>>()
            .join(", "),
        FieldId::PassengerName => passenger.name.clone(),
        FieldId::PassengerEmail => passenger.email.clone(),
        FieldId::PassengerPhone => passenger.phone.clone(),
    };
    if value.trim().is_empty() {
        EMPTY.to_string()
    } else {
        value
    }
}

fn date_value(date: Option<chrono::NaiveDate>, flexible: bool) -> String {
    match (flexible, date) {
        (true, _) => NOT_SURE.to_string(),
        (false, Some(date)) => date.format(DATE_FORMAT).to_string(),
        (false, None) => String::new(),
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

/// Fields shown for a step; return-leg fields only on return journeys.
pub fn step_fields(step: WizardStep, record: &BookingRecord) -> Vec<FieldId> {
    step.section()
        .map(|section| {
            section
                .fields()
                .iter()
                .copied()
                .filter(|field| record.journey.is_return() || !field.is_return_leg())
                .collect()
        })
        .unwrap_or_default()
}

pub fn show_view(view: &WizardView<'_>, pricing: &PriceTable) {
    if view.show_success {
        if let Some(receipt) = view.receipt {
            show_receipt(receipt);
        }
        return;
    }

    section(view.step);
    if view.step == WizardStep::Summary {
        show_summary(view.record, pricing);
    } else {
        let rows: Vec<(String, String)> = step_fields(view.step, view.record)
            .into_iter()
            .map(|field| {
                (
                    format!("{} ({})", field.label(), short_name(field)),
                    field_value(view.record, field),
                )
            })
            .collect();
        output::rows(&rows);
    }
    show_errors(view);

    if let Some(confirmation) = view.pending_confirmation {
        output::warning(short_trip_message(confirmation.days));
    }
    if let Some(err) = view.last_error {
        output::error(format!("Last submission failed: {err}"));
    }
}

pub fn show_errors(view: &WizardView<'_>) {
    for (field, message) in &view.errors {
        output::warning(format!("{}: {}", field.label(), message));
    }
}

pub fn show_summary(record: &BookingRecord, pricing: &PriceTable) {
    output::rows(&summary_rows(record));
    output::info(format!(
        "  Estimated price: {}",
        price_line(&pricing.estimate(record))
    ));
}

pub fn show_receipt(receipt: &BookingReceipt) {
    output::success(format!(
        "Booking submitted. Quote {} ({} {}).",
        receipt.quote_id, receipt.estimated_price, receipt.currency
    ));
    if receipt.email_sent {
        output::info(&receipt.message);
    } else {
        output::warning(&receipt.message);
    }
}

pub fn short_trip_message(days: i64) -> String {
    let gap = match days {
        0 => "on the same day".to_string(),
        1 => "only 1 day apart".to_string(),
        n => format!("only {n} days apart"),
    };
    format!("Collection and return are {gap}. Is that right?")
}

/// Name accepted by `set`, e.g. `collectionDate`.
pub fn short_name(field: FieldId) -> &'static str {
    let key = field.key();
    key.split_once('.').map(|(_, name)| name).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_domain::JourneyType;

    #[test]
    fn return_leg_fields_follow_journey_type() {
        let mut record = BookingRecord::default();
        assert_eq!(step_fields(WizardStep::Dates, &record).len(), 3);
        record.journey.journey_type = JourneyType::Return;
        assert_eq!(step_fields(WizardStep::Dates, &record).len(), 6);
        assert!(step_fields(WizardStep::Summary, &record).is_empty());
    }

    #[test]
    fn values_render_like_input() {
        let mut record = BookingRecord::default();
        record.dates.is_collection_flexible = true;
        record.luggage.extra_items = vec!["Golf clubs".into(), "Bike".into()];
        assert_eq!(field_value(&record, FieldId::CollectionDate), "not sure yet");
        assert_eq!(field_value(&record, FieldId::ReturnDate), "-");
        assert_eq!(field_value(&record, FieldId::Adults), "1");
        assert_eq!(
            field_value(&record, FieldId::ExtraItems),
            "1. Golf clubs, 2. Bike"
        );
        assert_eq!(short_name(FieldId::CollectionFlexible), "isCollectionFlexible");
    }

    #[test]
    fn short_trip_wording() {
        assert!(short_trip_message(0).contains("same day"));
        assert!(short_trip_message(4).contains("4 days"));
    }
}
