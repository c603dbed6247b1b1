use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Direction of a transfer booking.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JourneyType {
    #[default]
    #[serde(rename = "one-way")]
    OneWay,
    #[serde(rename = "return")]
    Return,
}

impl JourneyType {
    pub fn is_return(self) -> bool {
        matches!(self, JourneyType::Return)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JourneyType::OneWay => "one-way",
            JourneyType::Return => "return",
        }
    }

    pub fn all() -> [JourneyType; 2] {
        [JourneyType::OneWay, JourneyType::Return]
    }
}

impl fmt::Display for JourneyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JourneyType::OneWay => "One way",
            JourneyType::Return => "Return",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseJourneyTypeError(pub String);

impl fmt::Display for ParseJourneyTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown journey type `{}` (expected one-way or return)", self.0)
    }
}

impl std::error::Error for ParseJourneyTypeError {}

impl FromStr for JourneyType {
    type Err = ParseJourneyTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "one-way" | "oneway" | "one_way" | "single" => Ok(JourneyType::OneWay),
            "return" | "round-trip" | "roundtrip" => Ok(JourneyType::Return),
            other => Err(ParseJourneyTypeError(other.to_string())),
        }
    }
}

/// Where the passengers are collected and where they are dropped off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    #[serde(rename = "type", default)]
    pub journey_type: JourneyType,
    #[serde(default)]
    pub collection_point: String,
    #[serde(default)]
    pub destination_point: String,
}

impl Journey {
    pub fn new(
        journey_type: JourneyType,
        collection_point: impl Into<String>,
        destination_point: impl Into<String>,
    ) -> Self {
        Self {
            journey_type,
            collection_point: collection_point.into(),
            destination_point: destination_point.into(),
        }
    }

    pub fn is_return(&self) -> bool {
        self.journey_type.is_return()
    }

    /// Both endpoints are filled in (after trimming).
    pub fn has_points(&self) -> bool {
        !self.collection_point.trim().is_empty() && !self.destination_point.trim().is_empty()
    }

    /// Short `A → B` label used by summaries and e-mail subjects.
    pub fn route_label(&self) -> String {
        format!(
            "{} → {}",
            self.collection_point.trim(),
            self.destination_point.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journey_type_uses_kebab_wire_names() {
        let json = serde_json::to_string(&JourneyType::OneWay).unwrap();
        assert_eq!(json, "\"one-way\"");
        let parsed: JourneyType = serde_json::from_str("\"return\"").unwrap();
        assert_eq!(parsed, JourneyType::Return);
    }

    #[test]
    fn journey_type_parses_loose_input() {
        assert_eq!("Round-Trip".parse::<JourneyType>(), Ok(JourneyType::Return));
        assert_eq!(" single ".parse::<JourneyType>(), Ok(JourneyType::OneWay));
        assert!("both".parse::<JourneyType>().is_err());
    }

    #[test]
    fn journey_requires_both_points() {
        let mut journey = Journey::new(JourneyType::OneWay, "Geneva Airport", " ");
        assert!(!journey.has_points());
        journey.destination_point = "Verbier".into();
        assert!(journey.has_points());
        assert_eq!(journey.route_label(), "Geneva Airport → Verbier");
    }
}
