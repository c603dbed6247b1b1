//! Commands driving the six-step booking wizard.

use booking_core::{RecordUpdate, Transition, WizardStep};
use booking_domain::{FieldId, Leg};

use crate::cli::context::ShellContext;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::guided;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "book",
            "Fill in the booking with guided prompts",
            "book",
            cmd_book,
        ),
        CommandEntry::new("show", "Show the active step", "show", cmd_show),
        CommandEntry::new(
            "set",
            "Set a field on the booking",
            "set <field> <value>",
            cmd_set,
        ),
        CommandEntry::new(
            "flexible",
            "Mark a date as not decided yet",
            "flexible <collection|return> [yes|no]",
            cmd_flexible,
        ),
        CommandEntry::new(
            "item",
            "Add or remove an extra luggage item",
            "item add <description> | item remove <number>",
            cmd_item,
        ),
        CommandEntry::new(
            "touch",
            "Show validation messages for a field or the whole step",
            "touch [field|all]",
            cmd_touch,
        ),
        CommandEntry::new(
            "next",
            "Continue to the next step, or submit from the summary",
            "next",
            cmd_next,
        ),
        CommandEntry::new("back", "Return to the previous step", "back", cmd_back),
        CommandEntry::new("edit", "Jump to step 1-6", "edit <step>", cmd_edit),
        CommandEntry::new(
            "confirm",
            "Accept a short-trip warning and continue",
            "confirm",
            cmd_confirm,
        ),
        CommandEntry::new(
            "cancel",
            "Decline a short-trip warning and stay on the dates",
            "cancel",
            cmd_cancel,
        ),
        CommandEntry::new(
            "status",
            "Show progress, validity and price estimate",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "close",
            "Discard the booking and start over",
            "close",
            cmd_close,
        ),
        CommandEntry::new(
            "done",
            "Leave the confirmation and start a new booking",
            "done",
            cmd_done,
        ),
    ]
}

fn cmd_book(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.can_prompt() {
        return Err(CommandError::InvalidArguments(
            "`book` needs an interactive terminal; use `set` and `next` in scripts".into(),
        ));
    }
    guided::run(context)
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render::show_view(&context.wizard.view(), &context.config.pricing);
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((name, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value>".into(),
        ));
    };
    let field: FieldId = name.parse().map_err(booking_core::CoreError::from)?;
    if field == FieldId::ExtraItems {
        return Err(CommandError::InvalidArguments(
            "use `item add <description>` for extra items".into(),
        ));
    }
    let value = rest.join(" ");
    context.wizard.set(field, &value)?;
    io::print_success(format!(
        "{} set to {}.",
        field.label(),
        render::field_value(context.wizard.record(), field)
    ));
    report_field(context, field);
    Ok(())
}

fn cmd_flexible(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let leg = match args.first().map(|leg| leg.to_ascii_lowercase()).as_deref() {
        Some("collection") => Leg::Collection,
        Some("return") => Leg::Return,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: flexible <collection|return> [yes|no]".into(),
            ))
        }
    };
    let field = match leg {
        Leg::Collection => FieldId::CollectionFlexible,
        Leg::Return => FieldId::ReturnFlexible,
    };
    let answer = args.get(1).copied().unwrap_or("yes");
    context.wizard.set(field, answer)?;
    let flexible = context.wizard.record().dates.is_flexible(leg);
    if flexible {
        io::print_success(format!("The {leg} date is marked as not decided."));
    } else {
        io::print_success(format!("The {leg} date needs a concrete date and time."));
    }
    report_field(context, field);
    Ok(())
}

fn cmd_item(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = || {
        CommandError::InvalidArguments(
            "usage: item add <description> | item remove <number>".into(),
        )
    };
    let (action, rest) = args.split_first().ok_or_else(usage)?;
    match action.to_ascii_lowercase().as_str() {
        "add" => {
            let description = rest.join(" ");
            context.wizard.set(FieldId::ExtraItems, &description)?;
            io::print_success(format!("Added `{}`.", description.trim()));
        }
        "remove" => {
            let position: usize = rest
                .first()
                .and_then(|raw| raw.parse().ok())
                .filter(|position| *position > 0)
                .ok_or_else(usage)?;
            context
                .wizard
                .update(RecordUpdate::RemoveExtraItem(position - 1))?;
            io::print_success(format!("Removed item {position}."));
        }
        _ => return Err(usage()),
    }
    io::print_info(format!(
        "Extra items: {}",
        render::field_value(context.wizard.record(), FieldId::ExtraItems)
    ));
    Ok(())
}

fn cmd_touch(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => touch_step(context),
        Some(name) if name.eq_ignore_ascii_case("all") => touch_step(context),
        Some(name) => {
            let field: FieldId = name.parse().map_err(booking_core::CoreError::from)?;
            context.wizard.touch(field);
        }
    }
    let view = context.wizard.view();
    if view.errors.is_empty() {
        io::print_info("No problems on this step.");
    } else {
        render::show_errors(&view);
    }
    Ok(())
}

fn touch_step(context: &mut ShellContext) {
    let record = context.wizard.record().clone();
    for field in render::step_fields(context.wizard.step(), &record) {
        context.wizard.touch(field);
    }
    let failing: Vec<FieldId> = context.wizard.errors().iter().map(|(field, _)| field).collect();
    for field in failing {
        context.wizard.touch(field);
    }
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transition = context.wizard.next();
    report_transition(context, transition);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transition = context.wizard.previous();
    report_transition(context, transition);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index: u8 = args
        .first()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| CommandError::InvalidArguments("usage: edit <step 1-6>".into()))?;
    let transition = context.wizard.edit_step(index)?;
    report_transition(context, transition);
    Ok(())
}

fn cmd_confirm(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.wizard.pending_confirmation().is_none() {
        io::print_info("There is nothing to confirm.");
        return Ok(());
    }
    let transition = context.wizard.confirm_short_trip();
    report_transition(context, transition);
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.wizard.pending_confirmation().is_none() {
        io::print_info("There is nothing to cancel.");
        return Ok(());
    }
    context.wizard.cancel_short_trip();
    io::print_info("Staying on the dates step.");
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let wizard = &context.wizard;
    let step = wizard.step();
    let state = if wizard.show_success() {
        "submitted".to_string()
    } else if wizard.pending_confirmation().is_some() {
        "waiting for short-trip confirmation".to_string()
    } else if wizard.is_step_valid() {
        "ready to continue".to_string()
    } else {
        format!("{} field(s) need attention", wizard.errors().len())
    };
    let estimate = context.config.pricing.estimate(wizard.record());
    output::section("Booking status");
    output::rows(&[
        ("Step", format!("{} of {} ({})", step.index(), WizardStep::COUNT, step.title())),
        ("State", state),
        ("Estimate", booking_core::price_line(&estimate)),
        ("Service", wizard.submitter().url().to_string()),
    ]);
    if let Some(err) = wizard.last_error() {
        io::print_warning(format!("Last submission failed: {err}"));
    }
    Ok(())
}

fn cmd_close(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.wizard.close();
    render::show_view(&context.wizard.view(), &context.config.pricing);
    Ok(())
}

fn cmd_done(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.wizard.show_success() {
        io::print_info("The booking has not been submitted yet.");
        return Ok(());
    }
    context.wizard.dismiss_success();
    render::show_view(&context.wizard.view(), &context.config.pricing);
    Ok(())
}

fn report_field(context: &ShellContext, field: FieldId) {
    let view = context.wizard.view();
    for (failing, message) in &view.errors {
        if *failing == field {
            io::print_warning(format!("{}: {}", failing.label(), message));
        }
    }
}

/// Prints the outcome of a wizard transition.
pub(crate) fn report_transition(context: &ShellContext, transition: Transition) {
    let pricing = &context.config.pricing;
    match transition {
        Transition::Advanced { .. } | Transition::Retreated { .. } | Transition::Jumped { .. } => {
            render::show_view(&context.wizard.view(), pricing);
        }
        Transition::Blocked { step, errors } => {
            io::print_warning(format!(
                "Step {} cannot continue: {errors} field(s) need attention.",
                step.index()
            ));
            render::show_errors(&context.wizard.view());
        }
        Transition::ConfirmationRequired(confirmation) => {
            io::print_warning(render::short_trip_message(confirmation.days));
            io::print_hint("Type `confirm` to continue or `cancel` to change the dates.");
        }
        Transition::Submitted(receipt) => {
            render::show_receipt(&receipt);
            io::print_hint("Type `done` to start a new booking.");
        }
        Transition::SubmitFailed(err) => {
            io::print_error(format!("Submission failed: {err}"));
            io::print_hint("Your answers are kept. Type `next` to try again.");
        }
        Transition::Unchanged => {
            if context.wizard.show_success() {
                io::print_info("The booking is already submitted. Type `done` to start over.");
            } else {
                io::print_info("Nothing to do here.");
            }
        }
    }
}
