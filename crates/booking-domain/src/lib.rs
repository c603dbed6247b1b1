//! booking-domain
//!
//! Pure data model for transfer bookings (journey, dates, people, luggage,
//! passenger), contact messages and CMS content items.
//! No I/O, no CLI, no HTTP. Only data types and core enums.

pub mod contact;
pub mod content;
pub mod field;
pub mod journey;
pub mod record;

pub use contact::*;
pub use content::*;
pub use field::*;
pub use journey::*;
pub use record::*;
