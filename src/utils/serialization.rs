// JSON helpers for the keystore files and transaction records
use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};

/// Compact JSON, fields in declaration order
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string(data)
        .map_err(|e| WalletError::Serialization(format!("Serialization failed: {e}")))
}

pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| WalletError::Serialization(format!("Serialization failed: {e}")))
}

pub fn from_json<T>(text: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(text)
        .map_err(|e| WalletError::Format(format!("Deserialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        id: u64,
        name: String,
    }

    #[test]
    fn test_field_order_is_preserved() {
        let data = TestData {
            id: 42,
            name: "test".to_string(),
        };
        assert_eq!(to_json(&data).unwrap(), r#"{"id":42,"name":"test"}"#);
    }

    #[test]
    fn test_deserialize_invalid_data() {
        let result: Result<TestData> = from_json("{\"id\": \"nope\"}");
        assert!(matches!(result, Err(WalletError::Format(_))));
    }
}
