use std::fmt;
use std::sync::RwLock;

use colored::Colorize;
use once_cell::sync::Lazy;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No colours and no icons; used for scripted sessions.
    pub plain: bool,
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> =
    Lazy::new(|| RwLock::new(OutputPreferences::default()));

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
    colored::control::set_override(!prefs.plain);
}

fn preferences() -> OutputPreferences {
    PREFERENCES.read().map(|guard| *guard).unwrap_or_default()
}

fn icon(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "",
        MessageKind::Success => "✓ ",
        MessageKind::Warning => "! ",
        MessageKind::Error => "✗ ",
        MessageKind::Hint => "→ ",
        MessageKind::Section => "",
    }
}

/// Formats one message. Plain output keeps a textual prefix for warnings
/// and errors so scripts can grep for them.
pub fn format_message(kind: MessageKind, message: impl fmt::Display, plain: bool) -> String {
    let text = message.to_string();
    if plain {
        return match kind {
            MessageKind::Section => format!("== {} ==", text.trim()),
            MessageKind::Warning => format!("warning: {text}"),
            MessageKind::Error => format!("error: {text}"),
            MessageKind::Hint => format!("hint: {text}"),
            MessageKind::Info | MessageKind::Success => text,
        };
    }
    let body = format!("{}{}", icon(kind), text);
    match kind {
        MessageKind::Info => body,
        MessageKind::Success => body.bright_green().to_string(),
        MessageKind::Warning => body.bright_yellow().to_string(),
        MessageKind::Error => body.bright_red().to_string(),
        MessageKind::Hint => body.dimmed().to_string(),
        MessageKind::Section => format!("── {} ──", text.trim()).bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message, preferences().plain);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        MessageKind::Error => eprintln!("{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Label/value rows padded to a common width.
pub fn rows<L: AsRef<str>, V: fmt::Display>(rows: &[(L, V)]) {
    let width = rows
        .iter()
        .map(|(label, _)| label.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in rows {
        info(format!("  {:<width$}  {}", label.as_ref(), value, width = width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_carry_text_prefixes() {
        assert_eq!(format_message(MessageKind::Error, "boom", true), "error: boom");
        assert_eq!(format_message(MessageKind::Success, "done", true), "done");
        assert_eq!(
            format_message(MessageKind::Section, " Step 1 ", true),
            "== Step 1 =="
        );
    }
}
