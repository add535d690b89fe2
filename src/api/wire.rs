use serde::{Deserialize, Serialize};

pub const RUN_PATH: &str = "/api/run";
pub const HELP_PATH: &str = "/api/help";
pub const REFLECT_PATH: &str = "/api/reflect";

/// Body shared by `/api/run` and `/api/help`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectRequest {
    pub code: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectResponse {
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_request_serializes_single_field() {
        let body = serde_json::to_value(CodeRequest {
            code: "X".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "code": "X" }));
    }

    #[test]
    fn reflect_request_carries_code_and_explanation() {
        let body = serde_json::to_string(&ReflectRequest {
            code: "X".to_string(),
            explanation: "E".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"code":"X","explanation":"E"}"#);
    }

    #[test]
    fn responses_ignore_extra_fields() {
        let parsed: RunResponse =
            serde_json::from_str(r#"{"result":"All tests passed!","elapsed":3}"#).unwrap();
        assert_eq!(parsed.result, "All tests passed!");
    }

    #[test]
    fn response_missing_field_is_rejected() {
        assert!(serde_json::from_str::<HelpResponse>(r#"{"result":"wrong field"}"#).is_err());
    }
}
