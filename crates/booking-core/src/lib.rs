//! booking-core
//!
//! Booking wizard state machine, per-step validation, pricing and quote
//! generation for transfer bookings.
//! Depends on booking-domain. No CLI, no terminal I/O, no HTTP.

pub mod content;
pub mod error;
pub mod intake;
pub mod pricing;
pub mod quote;
pub mod step;
pub mod submission;
pub mod summary;
pub mod time;
pub mod update;
pub mod validation;
pub mod wizard;

pub use content::*;
pub use error::CoreError;
pub use intake::*;
pub use pricing::*;
pub use quote::*;
pub use step::*;
pub use submission::*;
pub use summary::*;
pub use time::*;
pub use update::*;
pub use validation::*;
pub use wizard::*;

#[cfg(test)]
mod tests;
