use std::path::Path;

use booking_core::{load_links, load_testimonials};

use crate::cli::context::ShellContext;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output;
use crate::cli::quote;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "testimonials",
            "Show what other travellers say",
            "testimonials",
            cmd_testimonials,
        ),
        CommandEntry::new(
            "links",
            "List useful links in a category",
            "links <category>",
            cmd_links,
        ),
        CommandEntry::new(
            "quote",
            "Price a booking saved as JSON without submitting it",
            "quote <file>",
            cmd_quote,
        ),
    ]
}

fn cmd_testimonials(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = load_testimonials(context.content.as_ref());
    output::section("Testimonials");
    for testimonial in outcome.get() {
        let mut byline = testimonial.name.clone();
        if let Some(location) = &testimonial.location {
            byline.push_str(&format!(", {location}"));
        }
        if let Some(rating) = testimonial.rating {
            byline.push_str(&format!(" ({rating}/5)"));
        }
        io::print_info(format!("  \"{}\"", testimonial.quote));
        io::print_info(format!("    {byline}"));
    }
    if outcome.is_fallback() {
        io::print_hint("The booking service is unavailable; showing saved testimonials.");
    }
    Ok(())
}

fn cmd_links(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = args.join(" ");
    let category = category.trim();
    if category.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: links <category>".into(),
        ));
    }
    let outcome = load_links(context.content.as_ref(), category);
    output::section(format!("Links: {category}"));
    if outcome.get().is_empty() {
        io::print_info("No links in this category.");
    }
    for link in outcome.get() {
        io::print_info(format!("  {} <{}>", link.title, link.url));
        if let Some(description) = &link.description {
            io::print_info(format!("    {description}"));
        }
    }
    if outcome.is_fallback() {
        io::print_hint("The booking service is unavailable; showing saved links.");
    }
    Ok(())
}

fn cmd_quote(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: quote <file>".into()))?;
    quote::quote_file(Path::new(path), &context.config.pricing)
}
