//! Terminal prompts for the guided booking flow.

use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Free text, pre-filled with the current value. Empty input is allowed.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    current: &str,
) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}

pub fn prompt_count(theme: &ColorfulTheme, prompt: &str, current: u32) -> Result<u32, CommandError> {
    Input::<u32>::with_theme(theme)
        .with_prompt(prompt)
        .default(current)
        .interact_text()
        .map_err(CommandError::from)
}

pub fn select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[&str],
    default: usize,
) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
