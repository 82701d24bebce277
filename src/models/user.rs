use serde::Deserialize;

use crate::models::de::string_or_u64;

/// Envelope of `GET /api-d7/user.json?name=...`.
#[derive(Debug, Deserialize)]
pub struct UserList {
    pub list: Vec<RawUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(deserialize_with = "string_or_u64")]
    pub uid: u64,

    pub name: String,

    pub picture: Option<Picture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Picture {
    pub url: Option<String>,
}
