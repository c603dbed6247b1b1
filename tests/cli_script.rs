mod common;

use common::{CliHarness, RETURN_BOOKING};
use insta::assert_snapshot;
use regex::Regex;

fn mask_quote_ids(text: &str) -> String {
    let quote_id = Regex::new(r"Q-\d{8}-[0-9A-F]{8}").expect("valid quote id pattern");
    quote_id.replace_all(text, "[QUOTE]").to_string()
}

#[test]
fn script_mode_books_a_return_transfer() {
    let harness = CliHarness::with_service();
    let output = harness.run_script(&format!("{RETURN_BOOKING}next\nexit\n"));

    let receipt = output
        .stdout
        .lines()
        .find(|line| line.starts_with("Booking submitted."))
        .map(mask_quote_ids)
        .unwrap_or_else(|| panic!("no receipt in output\n{}", output.stdout));
    assert_snapshot!(receipt, @"Booking submitted. Quote [QUOTE] (190 EUR).");
    assert!(
        output.stdout.contains("could not be sent"),
        "mail is disabled, the receipt should say so\n{}",
        output.stdout
    );
}

#[test]
fn summary_step_shows_the_estimate() {
    let harness = CliHarness::with_service();
    let output = harness.run_script(&format!("{RETURN_BOOKING}exit\n"));
    assert!(output.stdout.contains("Step 6 of 6"), "{}", output.stdout);
    assert!(
        output.stdout.contains("Estimated price: 190 EUR"),
        "{}",
        output.stdout
    );
}

#[test]
fn failed_submission_keeps_the_summary() {
    let harness = CliHarness::offline();
    let output = harness.run_script(&format!("{RETURN_BOOKING}next\nstatus\nexit\n"));
    assert!(
        output.stderr.contains("Submission failed"),
        "{}",
        output.stderr
    );
    assert!(output.stdout.contains("Type `next` to try again."));
    assert!(output.stdout.contains("6 of 6"), "{}", output.stdout);
    assert!(!output.stdout.contains("Booking submitted."));
}

#[test]
fn blocked_step_lists_missing_fields() {
    let harness = CliHarness::offline();
    let output = harness.run_script("next\nexit\n");
    assert!(output.stdout.contains("Step 1 cannot continue"));
    assert!(output.stdout.contains("Please choose a collection point"));
}

#[test]
fn short_return_trip_asks_for_confirmation() {
    let harness = CliHarness::offline();
    let script = "\
set type return
set collectionPoint Geneva
set destinationPoint Zermatt
next
set collectionDate 2099-01-10
set collectionTime 09:30
set returnDate 2099-01-14
set returnTime 14:00
next
confirm
status
exit
";
    let output = harness.run_script(script);
    assert!(output.stdout.contains("only 4 days apart"), "{}", output.stdout);
    assert!(output.stdout.contains("3 of 6"), "{}", output.stdout);
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let harness = CliHarness::offline();
    let output = harness.run_script("nxt\nexit\n");
    assert!(output.stdout.contains("Unknown command `nxt`"));
    assert!(output.stdout.contains("Did you mean `next`?"));
}

#[test]
fn config_changes_are_persisted() {
    let harness = CliHarness::offline();
    harness.run_script("config set pricing.currency chf\nconfig backup before-demo\nexit\n");

    let output = harness.run_script("config show\nconfig backups\nexit\n");
    assert!(output.stdout.contains("CHF"), "{}", output.stdout);
    assert!(output.stdout.contains("before-demo"), "{}", output.stdout);

    let json = std::fs::read_to_string(harness.home().join("config").join("config.json"))
        .expect("config written");
    assert!(json.contains("\"CHF\""));
}

#[test]
fn invalid_field_values_are_reported() {
    let harness = CliHarness::offline();
    let output = harness.run_script("set collectionDate tomorrow\nset colour red\nexit\n");
    assert!(output.stderr.contains("use YYYY-MM-DD format"), "{}", output.stderr);
    assert!(output.stderr.contains("Unknown field: colour"), "{}", output.stderr);
}
