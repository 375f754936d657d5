use serde::{Deserialize, Serialize};
use std::fmt;

/// The states an order can be in, as reported by the order authority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCondition {
    Pending,
    Confirmed,
    Declined,
    Authorized,
    Closed,
    ShipmentDeclined,
    Cancelled,
}

impl OrderCondition {
    /// Maps a numeric condition code to a condition. Codes outside 0-6 map
    /// to `None`, never an error.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Confirmed),
            2 => Some(Self::Declined),
            3 => Some(Self::Authorized),
            4 => Some(Self::Closed),
            5 => Some(Self::ShipmentDeclined),
            6 => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::Declined => 2,
            Self::Authorized => 3,
            Self::Closed => 4,
            Self::ShipmentDeclined => 5,
            Self::Cancelled => 6,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Declined => "Declined",
            Self::Authorized => "Authorized",
            Self::Closed => "Closed",
            Self::ShipmentDeclined => "Shipment Declined",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.description())
    }
}
