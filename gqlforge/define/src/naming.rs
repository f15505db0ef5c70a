//! Service and method name inference from GraphQL operation names.
//!
//! Operation names are the only grouping signal left once documents have been
//! parsed, so grouping is a best-effort heuristic. Callers that need a fixed
//! layout pass an explicit [`ServiceGroups`](crate::ServiceGroups) instead.
//!
//! ## Service rules
//!
//! Evaluated in order, first match wins. The captured segment is lowercased
//! and gets a trailing `s` (no irregular plurals: `Policy` -> `policys`).
//!
//! | # | Pattern | Example |
//! |---|---------|---------|
//! | 1 | `Get<X>Service...` | `GetNotificationServiceApps` -> `notifications` |
//! | 2 | `<X>Service...` | `PaymentServiceCharge` -> `payments` |
//! | 3 | `Get<X>` (one word) | `GetUserProfile` -> `users` |
//! | 4 | `Create<X>` | `CreateBookingRequest` -> `bookingrequests` |
//! | 5 | `Update<X>` | `UpdateInvoice` -> `invoices` |
//! | 6 | `Delete<X>` | `DeleteComment` -> `comments` |
//!
//! Anything else lands in [`GENERAL_SERVICE`].

use lazy_static::lazy_static;
use regex::Regex;

/// Fallback service for operation names no rule matches.
pub const GENERAL_SERVICE: &str = "general";

/// A single service inference rule: a pattern whose first capture group is
/// the service stem.
struct ServiceRule {
    pattern: Regex,
}

impl ServiceRule {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    fn apply(&self, operation: &str) -> Option<String> {
        self.pattern
            .captures(operation)
            .and_then(|caps| caps.get(1))
            .map(|stem| pluralize(stem.as_str()))
    }
}

lazy_static! {
    /// Service rules in priority order.
    static ref SERVICE_RULES: Vec<ServiceRule> = vec![
        ServiceRule::new(r"^Get(\w+)Service"),
        ServiceRule::new(r"^(\w+)Service"),
        ServiceRule::new(r"^Get([A-Z][a-z]+)"),
        ServiceRule::new(r"^Create(\w+)"),
        ServiceRule::new(r"^Update(\w+)"),
        ServiceRule::new(r"^Delete(\w+)"),
    ];
    static ref VERB_PREFIX: Regex = Regex::new(r"^(Get|Create|Update|Delete)").unwrap();
    /// Notification operations drop verb and service as one unit.
    static ref NOTIFICATION_PREFIX: Regex =
        Regex::new(r"^(Get|Create|Update|Delete)NotificationService").unwrap();
}

fn pluralize(stem: &str) -> String {
    format!("{}s", stem.to_lowercase())
}

/// Infers the service group an operation belongs to.
///
/// ## Examples
///
/// ```
/// use gqlforge_define::naming::infer_service_name;
///
/// assert_eq!(infer_service_name("GetUserProfile"), "users");
/// assert_eq!(infer_service_name("CreateBookingRequest"), "bookingrequests");
/// assert_eq!(infer_service_name("SubscribeToFeed"), "general");
/// ```
pub fn infer_service_name(operation: &str) -> String {
    SERVICE_RULES
        .iter()
        .find_map(|rule| rule.apply(operation))
        .unwrap_or_else(|| GENERAL_SERVICE.to_string())
}

/// Infers a short method name for documentation.
///
/// Strips the leading verb and any `Service` token, then a leading `User`
/// and a leading `Booking`, and prefixes `get`. Names containing
/// `NotificationService` drop the whole `<Verb>NotificationService` prefix
/// and then one more leading `Get`.
///
/// The prefix is `get` for mutations too (`UpdateFoo` -> `getFoo`).
///
/// ## Examples
///
/// ```
/// use gqlforge_define::naming::infer_short_name;
///
/// assert_eq!(infer_short_name("GetNotificationServiceApps"), "getApps");
/// assert_eq!(infer_short_name("GetUserProfile"), "getProfile");
/// ```
pub fn infer_short_name(operation: &str) -> String {
    let stripped = if operation.contains("NotificationService") {
        let rest = NOTIFICATION_PREFIX.replace(operation, "");
        rest.strip_prefix("Get").unwrap_or(&rest).to_string()
    } else {
        VERB_PREFIX.replace(operation, "").replace("Service", "")
    };

    let stripped = stripped.strip_prefix("User").unwrap_or(&stripped);
    let stripped = stripped.strip_prefix("Booking").unwrap_or(stripped);

    format!("get{stripped}")
}

/// Lower-cases the first character of an operation name.
///
/// This is the key an operation is exposed under in the cache facade
/// (`GetUser` -> `getUser`).
pub fn to_camel_case(operation: &str) -> String {
    let mut chars = operation.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === infer_service_name ===

    #[test]
    fn get_with_service_token_uses_segment_before_service() {
        assert_eq!(infer_service_name("GetNotificationServiceApps"), "notifications");
    }

    #[test]
    fn service_token_without_get() {
        assert_eq!(infer_service_name("PaymentServiceCharge"), "payments");
        assert_eq!(infer_service_name("CreateNotificationServiceApp"), "createnotifications");
    }

    #[test]
    fn get_takes_only_first_word() {
        assert_eq!(infer_service_name("GetUserProfile"), "users");
        assert_eq!(infer_service_name("GetBookings"), "bookingss");
    }

    #[test]
    fn create_update_delete_take_whole_remainder() {
        assert_eq!(infer_service_name("CreateBookingRequest"), "bookingrequests");
        assert_eq!(infer_service_name("UpdateInvoice"), "invoices");
        assert_eq!(infer_service_name("DeleteComment"), "comments");
    }

    #[test]
    fn no_irregular_plurals() {
        assert_eq!(infer_service_name("UpdatePolicy"), "policys");
    }

    #[test]
    fn unmatched_falls_back_to_general() {
        assert_eq!(infer_service_name("SubscribeToFeed"), GENERAL_SERVICE);
        assert_eq!(infer_service_name("Me"), GENERAL_SERVICE);
        assert_eq!(infer_service_name(""), GENERAL_SERVICE);
    }

    #[test]
    fn bare_verbs_do_not_match() {
        assert_eq!(infer_service_name("Create"), GENERAL_SERVICE);
        assert_eq!(infer_service_name("Get"), GENERAL_SERVICE);
        // `Get` needs an uppercase word after it
        assert_eq!(infer_service_name("Getaway"), GENERAL_SERVICE);
    }

    // === infer_short_name ===

    #[test]
    fn notification_service_special_case() {
        assert_eq!(infer_short_name("GetNotificationServiceApps"), "getApps");
        assert_eq!(infer_short_name("CreateNotificationServiceGetToken"), "getToken");
    }

    #[test]
    fn strips_user_and_booking_tokens() {
        assert_eq!(infer_short_name("GetUserProfile"), "getProfile");
        assert_eq!(infer_short_name("CreateBookingRequest"), "getRequest");
        assert_eq!(infer_short_name("GetUserBookingHistory"), "getHistory");
    }

    #[test]
    fn strips_embedded_service_token() {
        assert_eq!(infer_short_name("GetPaymentServiceCharges"), "getPaymentCharges");
    }

    #[test]
    fn mutations_still_get_get_prefix() {
        assert_eq!(infer_short_name("UpdateFoo"), "getFoo");
        assert_eq!(infer_short_name("SubscribeToFeed"), "getSubscribeToFeed");
    }

    // === to_camel_case ===

    #[test]
    fn camel_case_lowers_first_char() {
        assert_eq!(to_camel_case("GetUser"), "getUser");
        assert_eq!(to_camel_case("getUser"), "getUser");
        assert_eq!(to_camel_case(""), "");
    }
}
