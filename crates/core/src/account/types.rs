//! Account and token records supplied by the auth collaborator.

use serde::{Deserialize, Serialize};

/// Account details of a connected user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    pub uid: u64,
    pub email: String,
    pub display_name: String,
    pub country: String,
    pub referral_link: String,
    pub quota_info: QuotaInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaInfo {
    pub shared: u64,
    pub quota: u64,
    pub normal: u64,
}

/// Access token of a user. Stored as-is and handed back to the sync client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessToken {
    pub key: String,
    pub secret: String,
}
