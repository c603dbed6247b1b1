//! Prompt-driven pass through the booking wizard for interactive terminals.
//!
//! Every answer still goes through the wizard's own transitions, so the
//! guided flow and the `set`/`next` commands share one set of rules.

use booking_core::{RecordUpdate, Transition, WizardStep, DATE_FORMAT};
use booking_domain::{FieldId, FieldKind, JourneyType, Leg};

use crate::cli::commands::wizard::report_transition;
use crate::cli::context::ShellContext;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output;
use crate::cli::render;

const SUMMARY_ACTIONS: [&str; 4] = [
    "Submit booking",
    "Edit a step",
    "Go back",
    "Cancel booking",
];

pub fn run(context: &mut ShellContext) -> CommandResult {
    loop {
        if context.wizard.show_success() {
            return Ok(());
        }

        if let Some(confirmation) = context.wizard.pending_confirmation() {
            let prompt = render::short_trip_message(confirmation.days);
            let transition = if io::confirm_action(&context.theme, &prompt, true)? {
                context.wizard.confirm_short_trip()
            } else {
                context.wizard.cancel_short_trip()
            };
            report_transition(context, transition);
            continue;
        }

        let step = context.wizard.step();
        output::section(step);
        if step == WizardStep::Summary {
            if !summary_menu(context)? {
                return Ok(());
            }
            continue;
        }

        if step == WizardStep::Dates {
            prompt_dates(context)?;
        } else {
            let record = context.wizard.record().clone();
            for field in render::step_fields(step, &record) {
                prompt_field(context, field)?;
            }
        }

        let transition = context.wizard.next();
        if !matches!(transition, Transition::Advanced { .. }) {
            report_transition(context, transition);
        }
    }
}

/// Returns `false` when the user leaves the guided flow.
fn summary_menu(context: &mut ShellContext) -> Result<bool, CommandError> {
    render::show_summary(context.wizard.record(), &context.config.pricing);
    if let Some(err) = context.wizard.last_error() {
        io::print_warning(format!("Last submission failed: {err}"));
    }

    match io::select(&context.theme, "What next?", &SUMMARY_ACTIONS, 0)? {
        0 => {
            io::print_info("Submitting...");
            let transition = context.wizard.next();
            report_transition(context, transition);
        }
        1 => {
            let titles: Vec<String> = WizardStep::ALL
                .iter()
                .filter(|step| !step.is_last())
                .map(|step| step.to_string())
                .collect();
            let items: Vec<&str> = titles.iter().map(String::as_str).collect();
            let choice = io::select(&context.theme, "Edit which step?", &items, 0)?;
            let index = u8::try_from(choice + 1).unwrap_or(1);
            context.wizard.edit_step(index)?;
        }
        2 => {
            context.wizard.previous();
        }
        _ => {
            if io::confirm_action(&context.theme, "Discard this booking?", false)? {
                context.wizard.close();
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn prompt_dates(context: &mut ShellContext) -> CommandResult {
    prompt_leg(context, Leg::Collection)?;
    if context.wizard.record().journey.is_return() {
        prompt_leg(context, Leg::Return)?;
    }
    Ok(())
}

fn prompt_leg(context: &mut ShellContext, leg: Leg) -> CommandResult {
    let dates = &context.wizard.record().dates;
    let known = !dates.is_flexible(leg);
    let question = format!("Do you know the {leg} date?");
    if !io::confirm_action(&context.theme, &question, known)? {
        context.wizard.update(RecordUpdate::Flexible(leg, true))?;
        return Ok(());
    }
    context.wizard.update(RecordUpdate::Flexible(leg, false))?;

    let (date_field, time_field) = match leg {
        Leg::Collection => (FieldId::CollectionDate, FieldId::CollectionTime),
        Leg::Return => (FieldId::ReturnDate, FieldId::ReturnTime),
    };
    prompt_field(context, date_field)?;
    prompt_field(context, time_field)
}

/// Asks for one field until the wizard accepts the typed value.
fn prompt_field(context: &mut ShellContext, field: FieldId) -> CommandResult {
    match field.kind() {
        FieldKind::Choice => {
            let current = context.wizard.record().journey.journey_type;
            let options = JourneyType::all();
            let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
            let items: Vec<&str> = labels.iter().map(String::as_str).collect();
            let default = options.iter().position(|kind| *kind == current).unwrap_or(0);
            let choice = io::select(&context.theme, field.label(), &items, default)?;
            let selected = options.get(choice).copied().unwrap_or(current);
            context.wizard.update(RecordUpdate::JourneyType(selected))?;
        }
        FieldKind::Flag => {}
        FieldKind::Count => loop {
            let current = render::field_value(context.wizard.record(), field)
                .parse()
                .unwrap_or(0);
            let value = io::prompt_count(&context.theme, field.label(), current)?;
            context.wizard.set(field, &value.to_string())?;
            if !show_field_error(context, field) {
                break;
            }
        },
        FieldKind::List => prompt_extra_items(context)?,
        FieldKind::Text | FieldKind::Email | FieldKind::Phone | FieldKind::Date | FieldKind::Time => {
            loop {
                let current = raw_text(context, field);
                let prompt = match field.kind() {
                    FieldKind::Date => format!("{} (YYYY-MM-DD)", field.label()),
                    FieldKind::Time => format!("{} (HH:MM)", field.label()),
                    _ => field.label().to_string(),
                };
                let value = io::prompt_text(&context.theme, &prompt, &current)?;
                match context.wizard.set(field, &value) {
                    Ok(()) if !show_field_error(context, field) => break,
                    Ok(()) => {}
                    Err(err) => io::print_warning(err),
                }
            }
        }
    }
    Ok(())
}

fn prompt_extra_items(context: &mut ShellContext) -> CommandResult {
    let existing = context.wizard.record().luggage.extra_items.len();
    if existing > 0 {
        io::print_info(format!(
            "Extra items: {}",
            render::field_value(context.wizard.record(), FieldId::ExtraItems)
        ));
        if io::confirm_action(&context.theme, "Clear the extra items?", false)? {
            for _ in 0..existing {
                context.wizard.update(RecordUpdate::RemoveExtraItem(0))?;
            }
        }
    }
    loop {
        let item = io::prompt_text(&context.theme, "Extra item (leave empty to finish)", "")?;
        if item.trim().is_empty() {
            return Ok(());
        }
        context.wizard.set(FieldId::ExtraItems, &item)?;
    }
}

/// Editable text of a field, without the placeholders used for display.
fn raw_text(context: &ShellContext, field: FieldId) -> String {
    let record = context.wizard.record();
    match field {
        FieldId::CollectionPoint => record.journey.collection_point.clone(),
        FieldId::DestinationPoint => record.journey.destination_point.clone(),
        FieldId::CollectionTime => record.dates.collection_time.clone(),
        FieldId::ReturnTime => record.dates.return_time.clone(),
        FieldId::CollectionDate | FieldId::ReturnDate => {
            let leg = if field == FieldId::CollectionDate {
                Leg::Collection
            } else {
                Leg::Return
            };
            record
                .dates
                .date(leg)
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        }
        FieldId::PassengerName => record.passenger.name.clone(),
        FieldId::PassengerEmail => record.passenger.email.clone(),
        FieldId::PassengerPhone => record.passenger.phone.clone(),
        _ => String::new(),
    }
}

/// Prints the validation message for `field`, if any.
fn show_field_error(context: &ShellContext, field: FieldId) -> bool {
    match context.wizard.errors().get(field) {
        Some(message) => {
            io::print_warning(format!("{}: {message}", field.label()));
            true
        }
        None => false,
    }
}
