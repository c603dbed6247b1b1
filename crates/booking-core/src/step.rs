use std::fmt;

use booking_domain::Section;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The six wizard screens, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Journey = 1,
    Dates = 2,
    People = 3,
    Luggage = 4,
    Passenger = 5,
    Summary = 6,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Journey;
    pub const LAST: WizardStep = WizardStep::Summary;
    pub const COUNT: u8 = 6;

    pub const ALL: [WizardStep; 6] = [
        WizardStep::Journey,
        WizardStep::Dates,
        WizardStep::People,
        WizardStep::Luggage,
        WizardStep::Passenger,
        WizardStep::Summary,
    ];

    pub fn from_index(index: u8) -> Result<Self, CoreError> {
        match index {
            1 => Ok(WizardStep::Journey),
            2 => Ok(WizardStep::Dates),
            3 => Ok(WizardStep::People),
            4 => Ok(WizardStep::Luggage),
            5 => Ok(WizardStep::Passenger),
            6 => Ok(WizardStep::Summary),
            other => Err(CoreError::InvalidStep(other)),
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Option<Self> {
        WizardStep::from_index(self.index() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|index| WizardStep::from_index(index).ok())
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::LAST
    }

    /// Record section edited on this step; the summary owns none.
    pub fn section(self) -> Option<Section> {
        match self {
            WizardStep::Journey => Some(Section::Journey),
            WizardStep::Dates => Some(Section::Dates),
            WizardStep::People => Some(Section::People),
            WizardStep::Luggage => Some(Section::Luggage),
            WizardStep::Passenger => Some(Section::Passenger),
            WizardStep::Summary => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Journey => "Your journey",
            WizardStep::Dates => "Travel dates",
            WizardStep::People => "Who is travelling",
            WizardStep::Luggage => "Luggage & equipment",
            WizardStep::Passenger => "Lead passenger",
            WizardStep::Summary => "Review & submit",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} of {}: {}",
            self.index(),
            WizardStep::COUNT,
            self.title()
        )
    }
}
