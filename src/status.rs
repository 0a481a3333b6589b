//! Validation status taxonomy reported by ZeroBounce.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Classification the service assigns to a validated address.
///
/// Values the client does not know about are kept verbatim in
/// [`Status::Unrecognized`] so new service statuses never fail parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Valid,
    Invalid,
    CatchAll,
    Unknown,
    Spamtrap,
    Abuse,
    DoNotMail,
    /// A status this client version has no variant for.
    Unrecognized(String),
}

impl Status {
    /// Canonical snake_case name.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Valid => "valid",
            Status::Invalid => "invalid",
            Status::CatchAll => "catch_all",
            Status::Unknown => "unknown",
            Status::Spamtrap => "spamtrap",
            Status::Abuse => "abuse",
            Status::DoNotMail => "do_not_mail",
            Status::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Parse a wire value. Case-insensitive; `-` and `_` are interchangeable
    /// (the service reports `catch-all`).
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "valid" => Status::Valid,
            "invalid" => Status::Invalid,
            "catch_all" => Status::CatchAll,
            "unknown" => Status::Unknown,
            "spamtrap" => Status::Spamtrap,
            "abuse" => Status::Abuse,
            "do_not_mail" => Status::DoNotMail,
            _ => Status::Unrecognized(raw.to_string()),
        }
    }

    /// Whether this is one of the statuses the service documents.
    pub fn is_known(&self) -> bool {
        !matches!(self, Status::Unrecognized(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Status::parse(s))
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Status::parse(s)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Status::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_statuses() {
        assert_eq!(Status::parse("valid"), Status::Valid);
        assert_eq!(Status::parse("invalid"), Status::Invalid);
        assert_eq!(Status::parse("unknown"), Status::Unknown);
        assert_eq!(Status::parse("spamtrap"), Status::Spamtrap);
        assert_eq!(Status::parse("abuse"), Status::Abuse);
        assert_eq!(Status::parse("do_not_mail"), Status::DoNotMail);
    }

    #[test]
    fn catch_all_accepts_hyphen_and_case() {
        assert_eq!(Status::parse("catch-all"), Status::CatchAll);
        assert_eq!(Status::parse("Catch_All"), Status::CatchAll);
        assert_eq!(Status::CatchAll.to_string(), "catch_all");
    }

    #[test]
    fn unrecognized_values_pass_through() {
        let status = Status::parse("greylisted");
        assert_eq!(status, Status::Unrecognized("greylisted".to_string()));
        assert!(!status.is_known());
        assert_eq!(status.to_string(), "greylisted");
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Status::DoNotMail).unwrap();
        assert_eq!(json, "\"do_not_mail\"");
        let status: Status = serde_json::from_str("\"catch-all\"").unwrap();
        assert_eq!(status, Status::CatchAll);
    }
}
