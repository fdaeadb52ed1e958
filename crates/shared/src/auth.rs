use serde::{Deserialize, Serialize};

/// Header set by the platform gateway after it has authenticated the caller.
/// The service trusts the gateway; there is no in-process token check.
pub const USER_DID_HEADER: &str = "x-user-did";

/// The caller's decentralized identifier. Scopes both the storage key of the
/// list document and the `userId` field of broadcast events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDid(String);

impl UserDid {
    pub fn from_string(did: String) -> Self {
        Self(did)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserDid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
