use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- Wire Types ---
// The account API speaks length-delimited bincode frames: one ApiRequest
// out, one ApiReply back per connection.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiRequest {
    /// Account creation. The repeat-password field never appears here;
    /// it is a client-side check only.
    SignUp {
        display_name: String,
        username: String,
        password: String,
    },
    /// Credentials ride inside the message itself; the server treats them
    /// as transport-level auth rather than profile data.
    Login { username: String, password: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiReply {
    Ok,
    Err(ApiError),
}

/// Failure payload consumed by the form controllers. Both parts are
/// optional: a reply may carry a generic message, a per-field map keyed by
/// the API-side field names ("displayName", "username", "password"), both,
/// or neither. Transport-level failures are represented by the empty
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: Option<String>,
    pub validation_errors: Option<HashMap<String, String>>,
}

impl ApiError {
    /// A failure with nothing to show the user.
    pub fn opaque() -> Self {
        Self::default()
    }
}
