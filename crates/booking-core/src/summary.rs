//! Human-readable rendering of a booking record, shared by the summary
//! step, the CLI and outgoing e-mails.

use booking_domain::{BookingRecord, Leg};

use crate::PriceEstimate;

const NOT_SURE: &str = "Not sure yet";
const NOT_SET: &str = "-";

/// Label/value rows in display order. Return rows only appear on return
/// journeys; luggage rows only when non-zero.
pub fn summary_rows(record: &BookingRecord) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Journey", record.journey.journey_type.to_string()),
        ("From", or_dash(&record.journey.collection_point)),
        ("To", or_dash(&record.journey.destination_point)),
        ("Collection", leg_label(record, Leg::Collection)),
    ];
    if record.journey.is_return() {
        rows.push(("Return", leg_label(record, Leg::Return)));
    }
    rows.push((
        "Passengers",
        format!(
            "{} adult(s), {} child(ren)",
            record.people.adults, record.people.children
        ),
    ));

    let luggage = &record.luggage;
    for (label, count) in [
        ("Suitcases", luggage.suitcases),
        ("Prams", luggage.prams),
        ("Skis", luggage.skis),
        ("Snowboards", luggage.snowboards),
    ] {
        if count > 0 {
            rows.push((label, count.to_string()));
        }
    }
    if !luggage.extra_items.is_empty() {
        rows.push(("Extra items", luggage.extra_items.join(", ")));
    }

    rows.push(("Name", or_dash(&record.passenger.name)));
    rows.push(("Email", or_dash(&record.passenger.email)));
    rows.push(("Phone", or_dash(&record.passenger.phone)));
    rows
}

/// Plain-text block, one `Label: value` line per row.
pub fn summary_text(record: &BookingRecord) -> String {
    let rows = summary_rows(record);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {}", format!("{label}:"), value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn price_line(estimate: &PriceEstimate) -> String {
    format!("{} {}", estimate.total, estimate.currency)
}

fn leg_label(record: &BookingRecord, leg: Leg) -> String {
    let dates = &record.dates;
    if dates.is_flexible(leg) {
        return NOT_SURE.to_string();
    }
    match dates.date(leg) {
        Some(date) => {
            let time = dates.time(leg).trim();
            if time.is_empty() {
                date.format("%a %d %b %Y").to_string()
            } else {
                format!("{} at {}", date.format("%a %d %b %Y"), time)
            }
        }
        None => NOT_SET.to_string(),
    }
}

fn or_dash(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_SET.to_string()
    } else {
        trimmed.to_string()
    }
}
