//! Message bodies sent by the intake endpoints.

use booking_core::{price_line, summary_rows, PriceEstimate, QuoteId};
use booking_domain::{BookingRecord, ContactMessage};

use crate::mailer::Email;

pub fn customer_quote(record: &BookingRecord, quote_id: &QuoteId, estimate: &PriceEstimate) -> Email {
    let name = first_name(&record.passenger.name);
    let details = details_text(record);
    let text = format!(
        "Hi {name},\n\n\
         Thank you for your transfer request. Your quote reference is {quote_id}.\n\n\
         {details}\n\n\
         Estimated price: {price}\n\n\
         We will confirm availability and the final price shortly.",
        price = price_line(estimate),
    );
    Email {
        to: record.passenger.email.trim().to_string(),
        subject: format!("Your transfer quote {quote_id}"),
        html: Some(details_html(record, Some((quote_id, estimate)))),
        text,
        reply_to: None,
    }
}

pub fn operator_booking(
    operator: &str,
    record: &BookingRecord,
    quote_id: &QuoteId,
    estimate: &PriceEstimate,
) -> Email {
    Email {
        to: operator.to_string(),
        subject: format!(
            "New booking request {quote_id}: {}",
            record.journey.route_label()
        ),
        text: format!(
            "Quote {quote_id}\nEstimated price: {}\n\n{}",
            price_line(estimate),
            details_text(record)
        ),
        html: Some(details_html(record, Some((quote_id, estimate)))),
        reply_to: Some(record.passenger.email.trim().to_string()),
    }
}

pub fn operator_contact(operator: &str, message: &ContactMessage) -> Email {
    Email {
        to: operator.to_string(),
        subject: format!("Website enquiry from {}", message.name.trim()),
        text: format!(
            "From: {} <{}>\n\n{}",
            message.name.trim(),
            message.email.trim(),
            message.message.trim()
        ),
        html: None,
        reply_to: Some(message.email.trim().to_string()),
    }
}

/// Sent to the operator when a quote could not be delivered.
pub fn delivery_failure(
    operator: &str,
    record: &BookingRecord,
    quote_id: &QuoteId,
    failure: &str,
) -> Email {
    Email {
        to: operator.to_string(),
        subject: format!("Quote {quote_id} could not be delivered"),
        text: format!(
            "Sending quote {quote_id} failed: {failure}\n\nPlease contact the customer manually.\n\n{}",
            details_text(record)
        ),
        html: None,
        reply_to: None,
    }
}

fn details_text(record: &BookingRecord) -> String {
    summary_rows(record)
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn details_html(record: &BookingRecord, quote: Option<(&QuoteId, &PriceEstimate)>) -> String {
    let mut html = String::from("<table>");
    if let Some((quote_id, estimate)) = quote {
        html.push_str(&row("Quote", quote_id.as_str()));
        html.push_str(&row("Estimated price", &price_line(estimate)));
    }
    for (label, value) in summary_rows(record) {
        html.push_str(&row(label, &value));
    }
    html.push_str("</table>");
    html
}

fn row(label: &str, value: &str) -> String {
    format!(
        "<tr><th align=\"left\">{}</th><td>{}</td></tr>",
        escape(label),
        escape(value)
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn first_name(full: &str) -> &str {
    full.split_whitespace().next().unwrap_or("there")
}
