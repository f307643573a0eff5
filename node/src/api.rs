// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

pub use por_kernel::wire::{PathNode, PorResponse, ProofView, UserView, SUCCESS_MESSAGE};

/// Query string of `GET /por`.
///
/// Built from the raw key/value pairs so a missing, repeated or non-numeric
/// `id` reaches the handler and is reported as an invalid id rather than an
/// extractor rejection. A repeated `id` uses its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PorQuery {
    pub id: Option<String>,
}

impl From<Vec<(String, String)>> for PorQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self {
            id: pairs
                .into_iter()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error_message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub users: u64,
    pub merkle_root: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_takes_first_id() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("id".to_string(), "1".to_string()),
            ("id".to_string(), "2".to_string()),
        ];
        assert_eq!(PorQuery::from(pairs).id.as_deref(), Some("1"));
        assert_eq!(PorQuery::from(Vec::new()), PorQuery::default());
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_string(&ErrorResponse {
            error_message: "Not Found".into(),
        })
        .unwrap();
        assert_eq!(body, r#"{"error_message":"Not Found"}"#);
    }
}
