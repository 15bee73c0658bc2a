//! Status and template-kind enums.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown status or template type.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown value: {0}")]
pub struct StatusParseError(pub String);

/// Pickup lifecycle status.
///
/// The state machine is one-way: `Scheduled -> Completed`. There is no
/// cancellation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PickupStatus {
    #[default]
    Scheduled,
    Completed,
}

impl PickupStatus {
    /// The stored and serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PickupStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(Self::Scheduled),
            "Completed" => Ok(Self::Completed),
            other => Err(StatusParseError(other.to_owned())),
        }
    }
}

/// The two named SMS templates, keyed by the lifecycle event they announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Sent when a pickup is created.
    Scheduled,
    /// Sent when a crew marks a pickup completed.
    Completed,
}

impl TemplateKind {
    /// The stored and serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(Self::Scheduled),
            "Completed" => Ok(Self::Completed),
            other => Err(StatusParseError(other.to_owned())),
        }
    }
}

// SQLx support (with postgres feature): both stored as TEXT.
#[cfg(feature = "postgres")]
mod postgres_impls {
    use super::{PickupStatus, TemplateKind};

    macro_rules! text_enum_sqlx {
        ($name:ident) => {
            impl sqlx::Type<sqlx::Postgres> for $name {
                fn type_info() -> sqlx::postgres::PgTypeInfo {
                    <String as sqlx::Type<sqlx::Postgres>>::type_info()
                }

                fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                    <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
                }
            }

            impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
                fn decode(
                    value: sqlx::postgres::PgValueRef<'r>,
                ) -> Result<Self, sqlx::error::BoxDynError> {
                    let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                    Ok(s.parse::<Self>()?)
                }
            }

            impl sqlx::Encode<'_, sqlx::Postgres> for $name {
                fn encode_by_ref(
                    &self,
                    buf: &mut sqlx::postgres::PgArgumentBuffer,
                ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                    <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
                }
            }
        };
    }

    text_enum_sqlx!(PickupStatus);
    text_enum_sqlx!(TemplateKind);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(
            "Scheduled".parse::<PickupStatus>().unwrap(),
            PickupStatus::Scheduled
        );
        assert_eq!(
            "Completed".parse::<PickupStatus>().unwrap(),
            PickupStatus::Completed
        );
        assert!("Cancelled".parse::<PickupStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&PickupStatus::Scheduled).unwrap(),
            "\"Scheduled\""
        );
    }

    #[test]
    fn test_template_kind_roundtrip() {
        for kind in [TemplateKind::Scheduled, TemplateKind::Completed] {
            assert_eq!(kind.as_str().parse::<TemplateKind>().unwrap(), kind);
        }
    }
}
