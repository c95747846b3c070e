use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::error::ApiError;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid object id {0:?}: expected 40 hex characters")]
pub struct InvalidObjectId(pub String);

/// 40-character hex digest naming one version of a file or directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    pub const LEN: usize = 40;

    pub fn parse(value: &str) -> Result<Self, InvalidObjectId> {
        if value.len() == Self::LEN && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidObjectId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = InvalidObjectId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DirentType {
    File,
    Dir,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Dirent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DirentType,
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(
        default,
        with = "time::serde::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub mtime: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

impl Dirent {
    pub fn is_dir(&self) -> bool {
        self.kind == DirentType::Dir
    }
}

/// Decodes a listing body. Any bad element fails the whole list; order is kept.
pub fn decode_dirents(value: serde_json::Value) -> Result<Vec<Dirent>, ApiError> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::decode(format!("invalid directory listing: {err}")))
}
