// ============================================================================
// PAYMENT REDIRECT PARAMETERS
// ============================================================================
// Read-only inputs from the gateway's browser redirect. Only presence is
// checked, values are passed through as received.
// ============================================================================

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// Look up a single query parameter, `?` prefix allowed
fn query_param(query: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Parameters of a failed-payment redirect
#[derive(Clone, PartialEq, Serialize, Debug, Default)]
pub struct PaymentFailure {
    pub merchant_oid: Option<String>,
    pub failed_reason_code: Option<String>,
    pub failed_reason_msg: Option<String>,
    pub payment_id: Option<String>,
}

impl PaymentFailure {
    pub fn from_query(query: &str) -> Self {
        Self {
            merchant_oid: query_param(query, "merchant_oid"),
            failed_reason_code: query_param(query, "failed_reason_code"),
            failed_reason_msg: query_param(query, "failed_reason_msg"),
            payment_id: query_param(query, "payment_id"),
        }
    }
}

/// Parameters of a successful-payment redirect
#[derive(Clone, PartialEq, Serialize, Debug, Default)]
pub struct PaymentSuccess {
    pub merchant_oid: Option<String>,
    pub payment_id: Option<String>,
}

impl PaymentSuccess {
    pub fn from_query(query: &str) -> Self {
        Self {
            merchant_oid: query_param(query, "merchant_oid"),
            payment_id: query_param(query, "payment_id"),
        }
    }
}

/// Diagnostic record written when a redirect page mounts
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct PaymentReport<P> {
    #[serde(flatten)]
    pub params: P,
    pub timestamp: String,
}

impl<P: Serialize> PaymentReport<P> {
    pub fn new(params: P, at: DateTime<Utc>) -> Self {
        Self {
            params,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl<P: Serialize> fmt::Display for PaymentReport<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("<unserializable payment report>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_failure_reads_all_gateway_params() {
        let failure = PaymentFailure::from_query(
            "?merchant_oid=A&failed_reason_code=1&failed_reason_msg=x&payment_id=P",
        );

        assert_eq!(failure.merchant_oid.as_deref(), Some("A"));
        assert_eq!(failure.failed_reason_code.as_deref(), Some("1"));
        assert_eq!(failure.failed_reason_msg.as_deref(), Some("x"));
        assert_eq!(failure.payment_id.as_deref(), Some("P"));
    }

    #[test]
    fn test_missing_params_are_none_and_values_decoded() {
        let failure = PaymentFailure::from_query("failed_reason_msg=Kart+reddedildi%21");

        assert_eq!(failure.merchant_oid, None);
        assert_eq!(failure.payment_id, None);
        assert_eq!(failure.failed_reason_msg.as_deref(), Some("Kart reddedildi!"));
        assert_eq!(PaymentFailure::from_query(""), PaymentFailure::default());
    }

    #[test]
    fn test_report_carries_params_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let failure = PaymentFailure::from_query(
            "?merchant_oid=A&failed_reason_code=1&failed_reason_msg=x&payment_id=P",
        );
        let logged: serde_json::Value =
            serde_json::from_str(&PaymentReport::new(failure, at).to_string()).unwrap();

        assert_eq!(logged["merchant_oid"], "A");
        assert_eq!(logged["failed_reason_code"], "1");
        assert_eq!(logged["failed_reason_msg"], "x");
        assert_eq!(logged["payment_id"], "P");
        assert_eq!(logged["timestamp"], "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_success_ignores_failure_fields() {
        let success = PaymentSuccess::from_query("merchant_oid=M9&failed_reason_code=3");
        assert_eq!(success.merchant_oid.as_deref(), Some("M9"));
        assert_eq!(success.payment_id, None);
    }
}
