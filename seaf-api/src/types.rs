use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::dirent::{DirentType, ObjectId};

/// Download location of a file plus the content id the server reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub url: String,
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileDetail {
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DirentType,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, with = "time::serde::timestamp::option")]
    pub mtime: Option<OffsetDateTime>,
}

/// One commit that touched a file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileCommit {
    pub id: String,
    pub rev_file_id: String,
    #[serde(with = "time::serde::timestamp")]
    pub ctime: OffsetDateTime,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub rev_file_size: Option<u64>,
    #[serde(default)]
    pub desc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileHistory {
    pub commits: Vec<FileCommit>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StarredFile {
    #[serde(alias = "repo_id")]
    pub repo: String,
    pub path: String,
    #[serde(default, alias = "is_dir")]
    pub dir: bool,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, with = "time::serde::timestamp::option")]
    pub mtime: Option<OffsetDateTime>,
    #[serde(default)]
    pub oid: Option<String>,
}
