//! Success envelope shared by the users endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire shape of every successful users response.
///
/// Example JSON:
/// `{"message":"User retrieved successfully","data":{"id":1,...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuccessEnvelope<T> {
    /// Human-readable outcome.
    pub message: String,
    /// Payload; omitted when the operation returns nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessEnvelope<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}
