//! Lookup response and detail record types.

use serde::{Deserialize, Serialize};

use crate::config::{LOOKUP_STATUS_SUCCESS, UNKNOWN_VALUE};
use crate::error_handling::{classify_upstream_message, LookupError};

/// Raw JSON document returned by the lookup service.
///
/// Every field is optional: failed lookups only carry `status` and `message`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timezone: Option<String>,
    pub isp: Option<String>,
    pub org: Option<String>,
    #[serde(rename = "as")]
    pub as_name: Option<String>,
    pub mobile: Option<bool>,
    pub proxy: Option<bool>,
    pub hosting: Option<bool>,
}

/// Normalized geolocation and network details for one address.
///
/// Text fields hold [`UNKNOWN_VALUE`] when the lookup service left them empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    /// Country name
    pub country: String,
    /// ISO 3166-1 alpha-2 code
    pub country_code: String,
    /// Region or state name
    pub region: String,
    /// City
    pub city: String,
    /// Postal code
    pub postal_code: String,
    /// Latitude in decimal degrees
    pub latitude: String,
    /// Longitude in decimal degrees
    pub longitude: String,
    /// IANA timezone
    pub timezone: String,
    /// Internet service provider
    pub isp: String,
    /// Organization the address is registered to
    pub organization: String,
    /// AS number and name, e.g. `AS13335 Cloudflare, Inc.`
    pub autonomous_system: String,
    /// Mobile (cellular) connection
    pub mobile: bool,
    /// Proxy, VPN or Tor exit
    pub proxy: bool,
    /// Hosting provider or data center
    pub hosting: bool,
}

impl DetailRecord {
    /// Builds a record from a lookup response.
    ///
    /// # Errors
    ///
    /// A response whose status is not `success` is classified from its message
    /// into `LookupError::RateLimited` or `LookupError::UpstreamFailure`.
    pub(crate) fn from_response(response: LookupResponse) -> Result<Self, LookupError> {
        if response.status.as_deref() != Some(LOOKUP_STATUS_SUCCESS) {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "lookup service reported failure".to_string());
            return Err(classify_upstream_message(&message));
        }

        Ok(DetailRecord {
            country: or_unknown(response.country),
            country_code: or_unknown(response.country_code),
            region: or_unknown(response.region_name),
            city: or_unknown(response.city),
            postal_code: or_unknown(response.zip),
            latitude: coordinate(response.lat),
            longitude: coordinate(response.lon),
            timezone: or_unknown(response.timezone),
            isp: or_unknown(response.isp),
            organization: or_unknown(response.org),
            autonomous_system: or_unknown(response.as_name),
            mobile: response.mobile.unwrap_or(false),
            proxy: response.proxy.unwrap_or(false),
            hosting: response.hosting.unwrap_or(false),
        })
    }

    /// `"Country (CC)"`, the form used in both table layouts.
    pub fn country_label(&self) -> String {
        format!("{} ({})", self.country, self.country_code)
    }

    /// `"lat, lon"`.
    pub fn coordinates(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
}

fn coordinate(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LookupResponse {
        serde_json::from_str(json).expect("valid lookup json")
    }

    #[test]
    fn test_success_maps_all_fields() {
        let response = parse(
            r#"{"status":"success","country":"United States","countryCode":"US",
                "region":"CA","regionName":"California","city":"San Jose","zip":"95122",
                "lat":37.3388,"lon":-121.8914,"timezone":"America/Los_Angeles",
                "isp":"Cloudflare, Inc.","org":"APNIC and Cloudflare DNS Resolver project",
                "as":"AS13335 Cloudflare, Inc.","mobile":false,"proxy":false,"hosting":true,
                "query":"1.1.1.1"}"#,
        );
        let record = DetailRecord::from_response(response).unwrap();
        assert_eq!(record.country_label(), "United States (US)");
        assert_eq!(record.region, "California");
        assert_eq!(record.postal_code, "95122");
        assert_eq!(record.coordinates(), "37.3388, -121.8914");
        assert_eq!(record.autonomous_system, "AS13335 Cloudflare, Inc.");
        assert!(record.hosting);
        assert!(!record.mobile);
    }

    #[test]
    fn test_missing_fields_become_unknown() {
        let record =
            DetailRecord::from_response(parse(r#"{"status":"success","country":""}"#)).unwrap();
        assert_eq!(record.country, UNKNOWN_VALUE);
        assert_eq!(record.city, UNKNOWN_VALUE);
        assert_eq!(record.latitude, UNKNOWN_VALUE);
        assert!(!record.proxy);
    }

    #[test]
    fn test_fail_status_carries_message() {
        let err = DetailRecord::from_response(parse(
            r#"{"status":"fail","message":"reserved range","query":"10.0.0.1"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, LookupError::UpstreamFailure(ref m) if m == "reserved range"));
    }

    #[test]
    fn test_fail_status_rate_limit_message() {
        let err = DetailRecord::from_response(parse(
            r#"{"status":"fail","message":"rate limit exceeded"}"#,
        ))
        .unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_missing_status_is_failure() {
        let err = DetailRecord::from_response(parse("{}")).unwrap_err();
        assert!(!err.is_rate_limited());
    }
}
