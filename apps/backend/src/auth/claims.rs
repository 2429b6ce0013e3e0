//! Claims carried by backend-issued access tokens.

use serde::{Deserialize, Serialize};

/// Identity asserted by an access token. Serialized with the field names the
/// frontend reads back from `GET /auth/user`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch), always `iat + ttl`
    pub exp: i64,
}
