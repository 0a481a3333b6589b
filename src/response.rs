//! The result of one API call.

use crate::middleware::redact;
use crate::{Error, Status};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Decoded response of a ZeroBounce call, or the failure that prevented one.
///
/// A successful response exposes whatever fields the service sent through
/// [`ApiResponse::get`] and the typed accessors. A failed one has an empty
/// body and a single entry in [`ApiResponse::errors`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    body: Map<String, Value>,
    success: bool,
    errors: Vec<String>,
    valid_statuses: HashSet<Status>,
}

impl ApiResponse {
    /// Wrap a decoded body; `valid_statuses` drives [`ApiResponse::is_valid`].
    pub fn from_body(body: Map<String, Value>, valid_statuses: HashSet<Status>) -> Self {
        Self {
            body,
            success: true,
            errors: Vec::new(),
            valid_statuses,
        }
    }

    /// A failed response carrying the error's message, credentials redacted.
    pub fn from_error(error: &Error) -> Self {
        Self {
            body: Map::new(),
            success: false,
            errors: vec![redact(&error.to_string()).into_owned()],
            valid_statuses: HashSet::new(),
        }
    }

    /// Whether the call completed with a 2xx answer.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Failure messages; empty on success, one entry otherwise.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Every field the service sent; empty for failures.
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// `true` when the call succeeded and the reported status is one of the
    /// configured valid statuses.
    pub fn is_valid(&self) -> bool {
        self.success
            && self
                .status()
                .is_some_and(|status| self.valid_statuses.contains(&status))
    }

    /// Whether the service sent `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.body.contains_key(key)
    }

    /// Raw value of a field, `None` when the service did not send it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// String field; `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Boolean field; the service sends some flags as `"true"`/`"false"` strings.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Integer field, accepting numbers or numeric strings.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Reported validation status.
    pub fn status(&self) -> Option<Status> {
        self.get_str("status").map(Status::parse)
    }

    /// Detail behind the status, e.g. `mailbox_not_found`.
    pub fn sub_status(&self) -> Option<&str> {
        self.non_empty("sub_status")
    }

    /// The address that was validated.
    pub fn address(&self) -> Option<&str> {
        self.get_str("address")
    }

    /// Whether the address belongs to a free mail provider.
    pub fn free_email(&self) -> Option<bool> {
        self.get_bool("free_email")
    }

    /// Suggested correction for a mistyped address.
    pub fn did_you_mean(&self) -> Option<&str> {
        self.non_empty("did_you_mean")
    }

    /// Local part of the address.
    pub fn account(&self) -> Option<&str> {
        self.get_str("account")
    }

    /// Domain part of the address.
    pub fn domain(&self) -> Option<&str> {
        self.get_str("domain")
    }

    /// Age of the domain in days.
    pub fn domain_age_days(&self) -> Option<i64> {
        self.get_i64("domain_age_days")
    }

    /// Mail provider behind the domain.
    pub fn smtp_provider(&self) -> Option<&str> {
        self.non_empty("smtp_provider")
    }

    /// Whether the domain has an MX record.
    pub fn mx_found(&self) -> Option<bool> {
        self.get_bool("mx_found")
    }

    /// Preferred MX record of the domain.
    pub fn mx_record(&self) -> Option<&str> {
        self.non_empty("mx_record")
    }

    /// Owner's first name, when known.
    pub fn firstname(&self) -> Option<&str> {
        self.non_empty("firstname")
    }

    /// Owner's last name, when known.
    pub fn lastname(&self) -> Option<&str> {
        self.non_empty("lastname")
    }

    /// Owner's gender, when known.
    pub fn gender(&self) -> Option<&str> {
        self.non_empty("gender")
    }

    /// Owner's country, when known.
    pub fn country(&self) -> Option<&str> {
        self.non_empty("country")
    }

    /// Owner's region, when known.
    pub fn region(&self) -> Option<&str> {
        self.non_empty("region")
    }

    /// Owner's city, when known.
    pub fn city(&self) -> Option<&str> {
        self.non_empty("city")
    }

    /// Owner's zip code, when known.
    pub fn zipcode(&self) -> Option<&str> {
        self.non_empty("zipcode")
    }

    /// Service-side timestamp of the validation, as sent.
    pub fn processed_at(&self) -> Option<&str> {
        self.get_str("processed_at")
    }

    /// Remaining credits from a `getcredits` call. The service answers
    /// `-1` for an invalid key.
    pub fn credits(&self) -> Option<i64> {
        self.get_i64("Credits").or_else(|| self.get_i64("credits"))
    }

    // The service sends "" for fields it has no data for.
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn response(value: Value) -> ApiResponse {
        ApiResponse::from_body(body(value), HashSet::from([Status::Valid, Status::CatchAll]))
    }

    #[test]
    fn valid_status_is_valid() {
        let response = response(json!({"status": "valid", "address": "test@example.com"}));
        assert!(response.is_success());
        assert!(response.is_valid());
        assert!(response.errors().is_empty());
        assert_eq!(response.address(), Some("test@example.com"));
    }

    #[test]
    fn catch_all_wire_value_is_valid_by_default() {
        assert!(response(json!({"status": "catch-all"})).is_valid());
    }

    #[test]
    fn other_statuses_are_not_valid() {
        for status in ["invalid", "unknown", "spamtrap", "abuse", "do_not_mail", "new_thing"] {
            assert!(!response(json!({"status": status})).is_valid(), "{status}");
        }
    }

    #[test]
    fn missing_or_non_string_status_is_not_valid() {
        assert!(!response(json!({"address": "a@b.c"})).is_valid());
        assert!(!response(json!({"status": 1})).is_valid());
    }

    #[test]
    fn stricter_policy_rejects_catch_all() {
        let strict = ApiResponse::from_body(
            body(json!({"status": "catch-all"})),
            HashSet::from([Status::Valid]),
        );
        assert!(!strict.is_valid());
    }

    #[test]
    fn error_response_shape() {
        let err = Error::from(ServiceError::new(500, "internal"));
        let response = ApiResponse::from_error(&err);
        assert!(!response.is_success());
        assert!(!response.is_valid());
        assert!(response.body().is_empty());
        assert_eq!(response.errors().len(), 1);
        assert!(response.errors()[0].contains("500"));
    }

    #[test]
    fn error_messages_are_redacted() {
        let err = Error::Connection("GET /v2/getcredits?api_key=SECRET123 refused".into());
        let response = ApiResponse::from_error(&err);
        assert!(!response.errors()[0].contains("SECRET123"));
        assert!(response.errors()[0].contains("api_key=[REMOVED]"));
    }

    #[test]
    fn typed_accessors() {
        let response = response(json!({
            "address": "john@example.com",
            "status": "valid",
            "sub_status": "",
            "free_email": false,
            "did_you_mean": null,
            "domain_age_days": "9692",
            "smtp_provider": "google",
            "mx_found": "true",
            "mx_record": "mx.example.com",
            "firstname": "John",
            "processed_at": "2024-01-01 10:00:00.000"
        }));

        assert_eq!(response.status(), Some(Status::Valid));
        assert_eq!(response.sub_status(), None);
        assert_eq!(response.free_email(), Some(false));
        assert_eq!(response.did_you_mean(), None);
        assert_eq!(response.domain_age_days(), Some(9692));
        assert_eq!(response.smtp_provider(), Some("google"));
        assert_eq!(response.mx_found(), Some(true));
        assert_eq!(response.mx_record(), Some("mx.example.com"));
        assert_eq!(response.firstname(), Some("John"));
        assert_eq!(response.lastname(), None);
        assert_eq!(response.processed_at(), Some("2024-01-01 10:00:00.000"));
    }

    #[test]
    fn credits_accepts_string_or_number() {
        assert_eq!(response(json!({"Credits": "2375323"})).credits(), Some(2375323));
        assert_eq!(response(json!({"credits": 12})).credits(), Some(12));
        assert_eq!(response(json!({"Credits": "-1"})).credits(), Some(-1));
        assert_eq!(response(json!({})).credits(), None);
    }

    #[test]
    fn absent_keys_are_none() {
        let response = response(json!({"status": "valid"}));
        assert!(!response.contains("city"));
        assert_eq!(response.get("city"), None);
        assert_eq!(response.get_bool("city"), None);
        assert_eq!(response.get_i64("city"), None);
    }
}
