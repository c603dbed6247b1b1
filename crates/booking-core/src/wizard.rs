//! The booking wizard state machine.
//!
//! [`BookingWizard`] owns the record, the active step, touched-field state
//! and the active step's validation result. Every change goes through a
//! transition method; renderers only ever get a read-only [`WizardView`].

use std::collections::BTreeSet;

use booking_domain::{BookingRecord, FieldId};
use tracing::{debug, info, warn};

use crate::{
    step::WizardStep,
    submission::{BookingReceipt, BookingSubmitter, SubmitError},
    time::Clock,
    update::RecordUpdate,
    validation::{validate_step, FieldErrors, ValidationContext},
    CoreError,
};

/// Largest day gap between collection and return that still asks the user
/// to double-check the dates.
pub const SHORT_TRIP_MAX_DAYS: i64 = 7;

/// Whatever hosts the wizard (modal, terminal session) and must be told to
/// hide it when the wizard closes.
pub trait ModalHost {
    fn hide(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl ModalHost for NoopHost {
    fn hide(&mut self) {}
}

/// Pending "this looks like a short trip" question raised when leaving the
/// dates step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortTripConfirmation {
    pub days: i64,
}

/// Outcome of a transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: WizardStep, to: WizardStep },
    Retreated { from: WizardStep, to: WizardStep },
    Jumped { from: WizardStep, to: WizardStep },
    /// `next` was refused; `errors` fields of the active step are invalid.
    Blocked { step: WizardStep, errors: usize },
    ConfirmationRequired(ShortTripConfirmation),
    Submitted(BookingReceipt),
    SubmitFailed(SubmitError),
    Unchanged,
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone)]
pub struct WizardView<'a> {
    pub step: WizardStep,
    pub record: &'a BookingRecord,
    /// Errors of the active step restricted to touched fields.
    pub errors: Vec<(FieldId, &'a str)>,
    pub can_advance: bool,
    pub pending_confirmation: Option<ShortTripConfirmation>,
    pub show_success: bool,
    pub is_submitting: bool,
    pub last_error: Option<&'a SubmitError>,
    pub receipt: Option<&'a BookingReceipt>,
}

pub struct BookingWizard<S> {
    record: BookingRecord,
    step: WizardStep,
    touched: BTreeSet<FieldId>,
    errors: FieldErrors,
    pending: Option<ShortTripConfirmation>,
    show_success: bool,
    is_submitting: bool,
    last_error: Option<SubmitError>,
    receipt: Option<BookingReceipt>,
    submitter: S,
    host: Box<dyn ModalHost>,
    /// Rejects past travel dates when set.
    clock: Option<Box<dyn Clock>>,
}

impl<S: BookingSubmitter> BookingWizard<S> {
    pub fn new(submitter: S) -> Self {
        let mut wizard = Self {
            record: BookingRecord::default(),
            step: WizardStep::FIRST,
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            pending: None,
            show_success: false,
            is_submitting: false,
            last_error: None,
            receipt: None,
            submitter,
            host: Box::new(NoopHost),
            clock: None,
        };
        wizard.revalidate();
        wizard
    }

    /// Enables the "not in the past" date rule relative to `clock`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self.revalidate();
        self
    }

    pub fn with_host(mut self, host: impl ModalHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn record(&self) -> &BookingRecord {
        &self.record
    }

    pub fn touched(&self) -> &BTreeSet<FieldId> {
        &self.touched
    }

    /// Every error of the active step, touched or not.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn visible_errors(&self) -> Vec<(FieldId, &str)> {
        self.errors.visible(&self.touched)
    }

    pub fn is_step_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn show_success(&self) -> bool {
        self.show_success
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn pending_confirmation(&self) -> Option<ShortTripConfirmation> {
        self.pending
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    pub fn receipt(&self) -> Option<&BookingReceipt> {
        self.receipt.as_ref()
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn submitter_mut(&mut self) -> &mut S {
        &mut self.submitter
    }

    pub fn view(&self) -> WizardView<'_> {
        WizardView {
            step: self.step,
            record: &self.record,
            errors: self.visible_errors(),
            can_advance: self.is_step_valid() && !self.show_success,
            pending_confirmation: self.pending,
            show_success: self.show_success,
            is_submitting: self.is_submitting,
            last_error: self.last_error.as_ref(),
            receipt: self.receipt.as_ref(),
        }
    }

    /// Applies a record mutation and re-validates the active step.
    pub fn update(&mut self, update: RecordUpdate) -> Result<(), CoreError> {
        if self.show_success {
            return Err(CoreError::InvalidOperation(
                "the booking has already been submitted".into(),
            ));
        }
        let field = update.field();
        update.apply(&mut self.record)?;
        self.touched.insert(field);
        self.pending = None;
        self.revalidate();
        debug!(field = %field, step = self.step.index(), "record updated");
        Ok(())
    }

    /// Parses raw text for `field` and applies it.
    pub fn set(&mut self, field: FieldId, raw: &str) -> Result<(), CoreError> {
        let update = RecordUpdate::parse(field, raw)?;
        self.update(update)
    }

    /// Marks a field as touched (the user left it).
    pub fn touch(&mut self, field: FieldId) {
        self.touched.insert(field);
    }

    /// Moves forward if the active step is valid; submits on the last step.
    pub fn next(&mut self) -> Transition {
        if self.show_success {
            return Transition::Unchanged;
        }
        if let Some(pending) = self.pending {
            return Transition::ConfirmationRequired(pending);
        }

        self.revalidate();
        if !self.errors.is_empty() {
            self.touch_active_step();
            debug!(
                step = self.step.index(),
                errors = self.errors.len(),
                "next blocked by validation"
            );
            return Transition::Blocked {
                step: self.step,
                errors: self.errors.len(),
            };
        }

        if let Some(confirmation) = self.short_trip() {
            debug!(days = confirmation.days, "short trip confirmation raised");
            self.pending = Some(confirmation);
            return Transition::ConfirmationRequired(confirmation);
        }

        self.advance()
    }

    /// Accepts the short-trip question and performs the pending `next`.
    pub fn confirm_short_trip(&mut self) -> Transition {
        if self.pending.take().is_none() {
            return Transition::Unchanged;
        }
        self.advance()
    }

    /// Declines the short-trip question; the wizard stays on the dates step.
    pub fn cancel_short_trip(&mut self) -> Transition {
        self.pending = None;
        Transition::Unchanged
    }

    pub fn previous(&mut self) -> Transition {
        if self.show_success {
            return Transition::Unchanged;
        }
        self.pending = None;
        match self.step.previous() {
            Some(target) => {
                let from = self.step;
                self.go_to(target);
                Transition::Retreated { from, to: target }
            }
            None => Transition::Unchanged,
        }
    }

    /// Jumps straight to step `index` (1-6), keeping every entered value.
    pub fn edit_step(&mut self, index: u8) -> Result<Transition, CoreError> {
        let target = WizardStep::from_index(index)?;
        if self.show_success {
            return Err(CoreError::InvalidOperation(
                "the booking has already been submitted".into(),
            ));
        }
        self.pending = None;
        let from = self.step;
        self.go_to(target);
        Ok(Transition::Jumped { from, to: target })
    }

    /// Discards everything and hides the host.
    pub fn close(&mut self) {
        self.record.reset();
        self.step = WizardStep::FIRST;
        self.touched.clear();
        self.pending = None;
        self.show_success = false;
        self.is_submitting = false;
        self.last_error = None;
        self.receipt = None;
        self.revalidate();
        self.host.hide();
        debug!("wizard closed");
    }

    /// Leaves the success screen; identical to `close`.
    pub fn dismiss_success(&mut self) {
        self.close();
    }

    fn advance(&mut self) -> Transition {
        let from = self.step;
        match from.next() {
            Some(to) => {
                self.go_to(to);
                Transition::Advanced { from, to }
            }
            None => self.submit(),
        }
    }

    fn submit(&mut self) -> Transition {
        if self.is_submitting {
            return Transition::Unchanged;
        }
        self.is_submitting = true;
        self.last_error = None;
        let result = self.submitter.submit(&self.record);
        self.is_submitting = false;

        match result {
            Ok(receipt) => {
                info!(
                    quote_id = %receipt.quote_id,
                    email_sent = receipt.email_sent,
                    "booking submitted"
                );
                self.show_success = true;
                self.receipt = Some(receipt.clone());
                Transition::Submitted(receipt)
            }
            Err(err) => {
                warn!(error = %err, "booking submission failed");
                self.last_error = Some(err.clone());
                Transition::SubmitFailed(err)
            }
        }
    }

    fn short_trip(&self) -> Option<ShortTripConfirmation> {
        if self.step != WizardStep::Dates || !self.record.journey.is_return() {
            return None;
        }
        self.record
            .dates
            .concrete_gap_days()
            .filter(|days| (0..=SHORT_TRIP_MAX_DAYS).contains(days))
            .map(|days| ShortTripConfirmation { days })
    }

    fn go_to(&mut self, step: WizardStep) {
        self.step = step;
        self.revalidate();
        debug!(step = step.index(), "step changed");
    }

    fn touch_active_step(&mut self) {
        match self.step.section() {
            Some(section) => self.touched.extend(section.fields().iter().copied()),
            None => {
                let failing: Vec<FieldId> = self.errors.iter().map(|(field, _)| field).collect();
                self.touched.extend(failing);
            }
        }
    }

    fn revalidate(&mut self) {
        let context = match &self.clock {
            Some(clock) => ValidationContext::from_clock(clock.as_ref()),
            None => ValidationContext::unbounded(),
        };
        self.errors = validate_step(self.step, &self.record, &context);
    }
}
