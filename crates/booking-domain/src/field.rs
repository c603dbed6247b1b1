//! Field identifiers shared by validators, touched-state tracking and
//! front ends. Keys mirror the camelCase wire format (`section.field`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Record section owning a group of fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Journey,
    Dates,
    People,
    Luggage,
    Passenger,
}

impl Section {
    pub fn fields(self) -> &'static [FieldId] {
        use FieldId::*;
        match self {
            Section::Journey => &[JourneyType, CollectionPoint, DestinationPoint],
            Section::Dates => &[
                CollectionDate,
                CollectionTime,
                CollectionFlexible,
                ReturnDate,
                ReturnTime,
                ReturnFlexible,
            ],
            Section::People => &[Adults, Children],
            Section::Luggage => &[Skis, Snowboards, Suitcases, Prams, ExtraItems],
            Section::Passenger => &[PassengerName, PassengerEmail, PassengerPhone],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Journey => "Journey",
            Section::Dates => "Dates",
            Section::People => "People",
            Section::Luggage => "Luggage",
            Section::Passenger => "Passenger",
        }
    }
}

/// Input control a field is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Choice,
    Text,
    Email,
    Phone,
    Date,
    Time,
    Flag,
    Count,
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    #[serde(rename = "journey.type")]
    JourneyType,
    #[serde(rename = "journey.collectionPoint")]
    CollectionPoint,
    #[serde(rename = "journey.destinationPoint")]
    DestinationPoint,
    #[serde(rename = "dates.collectionDate")]
    CollectionDate,
    #[serde(rename = "dates.collectionTime")]
    CollectionTime,
    #[serde(rename = "dates.isCollectionFlexible")]
    CollectionFlexible,
    #[serde(rename = "dates.returnDate")]
    ReturnDate,
    #[serde(rename = "dates.returnTime")]
    ReturnTime,
    #[serde(rename = "dates.isReturnFlexible")]
    ReturnFlexible,
    #[serde(rename = "people.adults")]
    Adults,
    #[serde(rename = "people.children")]
    Children,
    #[serde(rename = "luggage.skis")]
    Skis,
    #[serde(rename = "luggage.snowboards")]
    Snowboards,
    #[serde(rename = "luggage.suitcases")]
    Suitcases,
    #[serde(rename = "luggage.prams")]
    Prams,
    #[serde(rename = "luggage.extraItems")]
    ExtraItems,
    #[serde(rename = "passenger.name")]
    PassengerName,
    #[serde(rename = "passenger.email")]
    PassengerEmail,
    #[serde(rename = "passenger.phone")]
    PassengerPhone,
}

impl FieldId {
    pub const ALL: [FieldId; 19] = [
        FieldId::JourneyType,
        FieldId::CollectionPoint,
        FieldId::DestinationPoint,
        FieldId::CollectionDate,
        FieldId::CollectionTime,
        FieldId::CollectionFlexible,
        FieldId::ReturnDate,
        FieldId::ReturnTime,
        FieldId::ReturnFlexible,
        FieldId::Adults,
        FieldId::Children,
        FieldId::Skis,
        FieldId::Snowboards,
        FieldId::Suitcases,
        FieldId::Prams,
        FieldId::ExtraItems,
        FieldId::PassengerName,
        FieldId::PassengerEmail,
        FieldId::PassengerPhone,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldId::JourneyType => "journey.type",
            FieldId::CollectionPoint => "journey.collectionPoint",
            FieldId::DestinationPoint => "journey.destinationPoint",
            FieldId::CollectionDate => "dates.collectionDate",
            FieldId::CollectionTime => "dates.collectionTime",
            FieldId::CollectionFlexible => "dates.isCollectionFlexible",
            FieldId::ReturnDate => "dates.returnDate",
            FieldId::ReturnTime => "dates.returnTime",
            FieldId::ReturnFlexible => "dates.isReturnFlexible",
            FieldId::Adults => "people.adults",
            FieldId::Children => "people.children",
            FieldId::Skis => "luggage.skis",
            FieldId::Snowboards => "luggage.snowboards",
            FieldId::Suitcases => "luggage.suitcases",
            FieldId::Prams => "luggage.prams",
            FieldId::ExtraItems => "luggage.extraItems",
            FieldId::PassengerName => "passenger.name",
            FieldId::PassengerEmail => "passenger.email",
            FieldId::PassengerPhone => "passenger.phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::JourneyType => "Journey type",
            FieldId::CollectionPoint => "Collection point",
            FieldId::DestinationPoint => "Destination",
            FieldId::CollectionDate => "Collection date",
            FieldId::CollectionTime => "Collection time",
            FieldId::CollectionFlexible => "Collection date not decided",
            FieldId::ReturnDate => "Return date",
            FieldId::ReturnTime => "Return time",
            FieldId::ReturnFlexible => "Return date not decided",
            FieldId::Adults => "Adults",
            FieldId::Children => "Children",
            FieldId::Skis => "Skis",
            FieldId::Snowboards => "Snowboards",
            FieldId::Suitcases => "Suitcases",
            FieldId::Prams => "Prams",
            FieldId::ExtraItems => "Extra items",
            FieldId::PassengerName => "Full name",
            FieldId::PassengerEmail => "Email",
            FieldId::PassengerPhone => "Phone",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::JourneyType => FieldKind::Choice,
            FieldId::CollectionPoint | FieldId::DestinationPoint | FieldId::PassengerName => {
                FieldKind::Text
            }
            FieldId::CollectionDate | FieldId::ReturnDate => FieldKind::Date,
            FieldId::CollectionTime | FieldId::ReturnTime => FieldKind::Time,
            FieldId::CollectionFlexible | FieldId::ReturnFlexible => FieldKind::Flag,
            FieldId::Adults
            | FieldId::Children
            | FieldId::Skis
            | FieldId::Snowboards
            | FieldId::Suitcases
            | FieldId::Prams => FieldKind::Count,
            FieldId::ExtraItems => FieldKind::List,
            FieldId::PassengerEmail => FieldKind::Email,
            FieldId::PassengerPhone => FieldKind::Phone,
        }
    }

    pub fn section(self) -> Section {
        match self {
            FieldId::JourneyType | FieldId::CollectionPoint | FieldId::DestinationPoint => {
                Section::Journey
            }
            FieldId::CollectionDate
            | FieldId::CollectionTime
            | FieldId::CollectionFlexible
            | FieldId::ReturnDate
            | FieldId::ReturnTime
            | FieldId::ReturnFlexible => Section::Dates,
            FieldId::Adults | FieldId::Children => Section::People,
            FieldId::Skis
            | FieldId::Snowboards
            | FieldId::Suitcases
            | FieldId::Prams
            | FieldId::ExtraItems => Section::Luggage,
            FieldId::PassengerName | FieldId::PassengerEmail | FieldId::PassengerPhone => {
                Section::Passenger
            }
        }
    }

    /// Fields of the return leg carry no weight on one-way journeys.
    pub fn is_return_leg(self) -> bool {
        matches!(
            self,
            FieldId::ReturnDate | FieldId::ReturnTime | FieldId::ReturnFlexible
        )
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field `{}`", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for FieldId {
    type Err = UnknownFieldError;

    /// Accepts the full key (`dates.returnTime`) or the bare field name
    /// (`returnTime`), case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        FieldId::ALL
            .iter()
            .copied()
            .find(|field| {
                let key = field.key().to_ascii_lowercase();
                key == needle
                    || key
                        .split_once('.')
                        .map(|(_, bare)| bare == needle)
                        .unwrap_or(false)
            })
            .ok_or_else(|| UnknownFieldError(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_belongs_to_its_section_list() {
        for field in FieldId::ALL {
            assert!(
                field.section().fields().contains(&field),
                "{} missing from {:?}",
                field,
                field.section()
            );
        }
    }

    #[test]
    fn parses_full_and_bare_keys() {
        assert_eq!("dates.returnTime".parse(), Ok(FieldId::ReturnTime));
        assert_eq!("COLLECTIONPOINT".parse(), Ok(FieldId::CollectionPoint));
        assert_eq!("email".parse(), Ok(FieldId::PassengerEmail));
        assert!("colour".parse::<FieldId>().is_err());
    }

    #[test]
    fn serializes_as_key() {
        let json = serde_json::to_string(&FieldId::CollectionFlexible).unwrap();
        assert_eq!(json, "\"dates.isCollectionFlexible\"");
    }
}
