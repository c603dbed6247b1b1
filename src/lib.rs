#![doc(test(attr(deny(warnings))))]

//! Transfer Booking drives the six-step airport transfer booking wizard
//! from a terminal and hosts the intake service the wizard submits to.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing once per process.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Transfer Booking tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
