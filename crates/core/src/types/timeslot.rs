//! Pickup time windows.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fixed half-day windows offered to the public.
///
/// Variant order is chronological, so deriving `Ord` gives the ordering the
/// crew dashboard needs (the public labels do NOT sort chronologically as
/// strings: "8 AM–10 AM" would come last).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Timeslot {
    /// 8 AM–10 AM
    #[serde(rename = "8 AM–10 AM")]
    EarlyMorning,
    /// 10 AM–12 PM
    #[serde(rename = "10 AM–12 PM")]
    LateMorning,
    /// 12 PM–2 PM
    #[serde(rename = "12 PM–2 PM")]
    EarlyAfternoon,
    /// 2 PM–4 PM
    #[serde(rename = "2 PM–4 PM")]
    LateAfternoon,
}

/// Error returned when parsing an unknown timeslot label.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown timeslot: {0}")]
pub struct TimeslotParseError(pub String);

impl Timeslot {
    /// All slots in chronological order.
    pub const ALL: [Self; 4] = [
        Self::EarlyMorning,
        Self::LateMorning,
        Self::EarlyAfternoon,
        Self::LateAfternoon,
    ];

    /// The public-facing label, also the serialized and stored form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EarlyMorning => "8 AM–10 AM",
            Self::LateMorning => "10 AM–12 PM",
            Self::EarlyAfternoon => "12 PM–2 PM",
            Self::LateAfternoon => "2 PM–4 PM",
        }
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Timeslot {
    type Err = TimeslotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.label() == s)
            .ok_or_else(|| TimeslotParseError(s.to_owned()))
    }
}

// SQLx support (with postgres feature): stored as TEXT using the label.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Timeslot {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Timeslot {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse::<Self>()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Timeslot {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.label(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for slot in Timeslot::ALL {
            assert_eq!(slot.label().parse::<Timeslot>().unwrap(), slot);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        assert!("8 AM-10 AM".parse::<Timeslot>().is_err()); // hyphen, not en dash
        assert!("4 PM–6 PM".parse::<Timeslot>().is_err());
        assert!("".parse::<Timeslot>().is_err());
    }

    #[test]
    fn test_chronological_ordering() {
        let mut slots = vec![
            Timeslot::LateAfternoon,
            Timeslot::EarlyMorning,
            Timeslot::EarlyAfternoon,
            Timeslot::LateMorning,
        ];
        slots.sort();
        assert_eq!(slots, Timeslot::ALL);
        // Lexicographic label order would put EarlyMorning last.
        assert!(Timeslot::EarlyMorning < Timeslot::LateMorning);
    }

    #[test]
    fn test_serde_uses_public_labels() {
        let json = serde_json::to_string(&Timeslot::LateMorning).unwrap();
        assert_eq!(json, "\"10 AM–12 PM\"");
        let slot: Timeslot = serde_json::from_str("\"2 PM–4 PM\"").unwrap();
        assert_eq!(slot, Timeslot::LateAfternoon);
    }
}
