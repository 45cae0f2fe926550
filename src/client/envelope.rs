//! The `{code, message, result}` wrapper every API response uses.

use serde::Deserialize;

use super::error::ApiError;

/// Envelope codes most endpoints answer success with. Create-style
/// endpoints add 201; no-content answers map onto 204.
pub const OK: &[i64] = &[200];
pub const CREATED: &[i64] = &[200, 201];
pub const NO_CONTENT: &[i64] = &[200, 204];

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    // The backend is not consistent about which codes mean success, so the
    // accepted set is chosen per call site rather than fixed here. An
    // absent code (empty 204-style body) counts as plain success.
    #[serde(default = "default_code")]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

fn default_code() -> i64 {
    200
}

impl<T> Envelope<T> {
    /// Unwrap the payload, requiring the envelope code to be in `accepted`.
    pub fn into_result(self, accepted: &[i64]) -> Result<T, ApiError> {
        self.check(accepted)?;
        self.result.ok_or(ApiError::EmptyResult)
    }

    /// Accept the envelope without caring about a payload.
    pub fn accepted(self, accepted: &[i64]) -> Result<(), ApiError> {
        self.check(accepted)
    }

    fn check(&self, accepted: &[i64]) -> Result<(), ApiError> {
        if accepted.contains(&self.code) {
            Ok(())
        } else {
            Err(ApiError::Client {
                // Codes a misbehaving backend sends outside u16 range must
                // not alias onto a real status.
                status: u16::try_from(self.code).unwrap_or(0),
                message: self.message.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_code_unwraps_result() {
        let env: Envelope<String> =
            serde_json::from_str(r#"{"code":200,"message":"ok","result":"hello"}"#).unwrap();
        assert_eq!(env.into_result(OK).unwrap(), "hello");
    }

    #[test]
    fn test_rejected_code_carries_message() {
        let env: Envelope<String> =
            serde_json::from_str(r#"{"code":400,"message":"Invalid phone","result":null}"#)
                .unwrap();
        match env.into_result(OK) {
            Err(ApiError::Client { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Invalid phone"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_per_call_accepted_set() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"code":201,"message":null,"result":{"id":"b1"}}"#).unwrap();
        assert!(env.accepted(CREATED).is_ok());

        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"code":201,"message":null,"result":null}"#).unwrap();
        assert!(env.accepted(OK).is_err());
    }

    #[test]
    fn test_empty_body_defaults_to_success() {
        // The transport layer substitutes `{}` for an empty 204 body.
        let env: Envelope<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert_eq!(env.code, 200);
        assert!(env.accepted(NO_CONTENT).is_ok());
    }

    #[test]
    fn test_out_of_range_code_does_not_alias_a_status() {
        let env: Envelope<String> =
            serde_json::from_str(r#"{"code":-1,"message":"bad","result":null}"#).unwrap();
        match env.into_result(OK) {
            Err(ApiError::Client { status, message }) => {
                assert_eq!(status, 0);
                assert_eq!(message.as_deref(), Some("bad"));
            }
            other => panic!("unexpected: {:?}", other),
        }

        let env: Envelope<String> =
            serde_json::from_str(r#"{"code":70000,"message":null,"result":null}"#).unwrap();
        assert!(matches!(
            env.accepted(OK),
            Err(ApiError::Client { status: 0, .. })
        ));
    }

    #[test]
    fn test_accepted_code_without_result_is_empty_result() {
        let env: Envelope<String> =
            serde_json::from_str(r#"{"code":200,"message":"ok","result":null}"#).unwrap();
        assert!(matches!(env.into_result(OK), Err(ApiError::EmptyResult)));
    }
}
