//! Response DTOs for the property cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use super::{Property, PropertySummary};

/// Status literal carried by successful listing and record responses.
pub const STATUS_SUCCESS: &str = "success";

/// Response body for the listing endpoint (GET /properties/)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    /// Always "success"
    pub status: String,
    /// Number of records in `data`
    pub count: usize,
    /// The projected records
    pub data: Vec<PropertySummary>,
}

impl ListingResponse {
    /// Creates a new ListingResponse, deriving `count` from the data
    pub fn new(data: Vec<PropertySummary>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            count: data.len(),
            data,
        }
    }
}

/// Response body for create, update and delete operations
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    /// Always "success"
    pub status: String,
    /// The record as it was committed (or removed)
    pub data: Property,
}

impl RecordResponse {
    pub fn new(data: Property) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;
    use chrono::Utc;

    fn summary(id: u64) -> PropertySummary {
        PropertySummary {
            id,
            title: format!("Property {}", id),
            description: String::new(),
            price: Price::from_cents(100_000),
            location: "Lisbon".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_listing_response_shape() {
        let resp = ListingResponse::new(vec![summary(1), summary(2)]);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"][0]["price"], "1000.00");
        for field in ["id", "title", "description", "price", "location", "created_at"] {
            assert!(json["data"][1].get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_listing_response_empty() {
        let resp = ListingResponse::new(Vec::new());
        assert_eq!(resp.count, 0);
        assert_eq!(resp.status, "success");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
