use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::models::flight::FlightSearchParams;

/// Length of a search id.
pub const SEARCH_ID_LEN: usize = 12;

/// Deterministic fingerprint of a flight search.
///
/// The parameter tuple is joined field-by-field (with `oneway` standing in
/// for a missing return date and 1 for unset max connections), digested with
/// SHA-256, base64-encoded, stripped to alphanumerics, and truncated to 12
/// characters. Any single changed field yields a different id. Truncation
/// keeps ~71 bits of digest: collision-resistant for practical search-space
/// sizes, not cryptographically guaranteed.
pub fn fingerprint(params: &FlightSearchParams) -> String {
    let joined = format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        params.origin,
        params.destination,
        params.departure_date,
        params.return_date.as_deref().unwrap_or("oneway"),
        params.passenger_count,
        params.cabin_class,
        params.currency,
        params.max_connections.unwrap_or(1),
    );
    let digest = Sha256::digest(joined.as_bytes());
    STANDARD
        .encode(digest)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(SEARCH_ID_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_params() -> FlightSearchParams {
        FlightSearchParams {
            origin: "JFK".to_string(),
            destination: "LHR".to_string(),
            departure_date: "2025-11-03".to_string(),
            return_date: Some("2025-11-10".to_string()),
            passenger_count: 2,
            cabin_class: "economy".to_string(),
            currency: "USD".to_string(),
            max_connections: Some(1),
        }
    }

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(fingerprint(&make_params()), fingerprint(&make_params()));
    }

    #[test]
    fn test_fingerprint_shape() {
        let id = fingerprint(&make_params());
        assert_eq!(id.len(), SEARCH_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_every_field_changes_the_id() {
        let base = make_params();
        let base_id = fingerprint(&base);

        let variants = [
            FlightSearchParams { origin: "EWR".to_string(), ..base.clone() },
            FlightSearchParams { destination: "CDG".to_string(), ..base.clone() },
            FlightSearchParams { departure_date: "2025-11-04".to_string(), ..base.clone() },
            FlightSearchParams { return_date: Some("2025-11-12".to_string()), ..base.clone() },
            FlightSearchParams { return_date: None, ..base.clone() },
            FlightSearchParams { passenger_count: 3, ..base.clone() },
            FlightSearchParams { cabin_class: "business".to_string(), ..base.clone() },
            FlightSearchParams { currency: "EUR".to_string(), ..base.clone() },
            FlightSearchParams { max_connections: Some(2), ..base.clone() },
        ];
        for variant in variants {
            assert_ne!(fingerprint(&variant), base_id, "variant collided: {variant:?}");
        }
    }

    #[test]
    fn test_max_connections_defaults_to_one() {
        let explicit = FlightSearchParams { max_connections: Some(1), ..make_params() };
        let implicit = FlightSearchParams { max_connections: None, ..make_params() };
        assert_eq!(fingerprint(&explicit), fingerprint(&implicit));
    }
}
