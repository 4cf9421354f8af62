//! Wire payloads for the policy endpoint.

use serde::{Deserialize, Serialize};

/// Body of `PUT /v1/sys/policy/<name>`.
#[derive(Debug, Serialize)]
pub struct PutPolicyRequest<'a> {
    pub rules: &'a str,
}

/// Error body returned by the server on non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_rules_verbatim() {
        let rules = "path \"*\" {\n  policy = \"read\"\n}\n";
        let json = serde_json::to_value(PutPolicyRequest { rules }).unwrap();
        assert_eq!(json["rules"], rules);
    }

    #[test]
    fn test_error_response_defaults_to_empty() {
        let resp: ApiErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn test_error_response_lists_errors() {
        let resp: ApiErrorResponse =
            serde_json::from_str(r#"{"errors":["permission denied"]}"#).unwrap();
        assert_eq!(resp.errors, vec!["permission denied"]);
    }
}
