//! The protocol table: one [`RequestSpec`] builder per file-browser operation.
//!
//! File and directory paths always travel in the `p` query parameter.
//! Mutations are named by the `operation` form field.

use crate::interpret::ResponseRule;
use crate::request::{Endpoint, HttpMethod, RequestSpec};

pub fn list_directory(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::Dirents,
        repo_id,
        ResponseRule::Dirents,
    )
    .query("p", path)
}

pub fn get_file_download_link(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::Files,
        repo_id,
        ResponseRule::QuotedUrl,
    )
    .query("p", path)
}

pub fn get_shared_link(repo_id: &str, path: &str, is_file: bool) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Put,
        Endpoint::FileSharedLink,
        repo_id,
        ResponseRule::LocationHeader,
    )
    .form("type", if is_file { "f" } else { "d" })
    .form("p", path)
}

/// Creates a directory. The server expects GET here even though it mutates;
/// the `operation=mkdir` form field is what selects the action.
pub fn create_directory(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::Dirents,
        repo_id,
        ResponseRule::RawText,
    )
    .query("p", path)
    .form("operation", "mkdir")
}

pub fn rename_directory(repo_id: &str, path: &str, new_name: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Post,
        Endpoint::Dirents,
        repo_id,
        ResponseRule::EmptyAck,
    )
    .query("p", path)
    .form("operation", "rename")
    .form("newname", new_name)
}

pub fn remove_directory(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Delete,
        Endpoint::Dirents,
        repo_id,
        ResponseRule::EmptyAck,
    )
    .query("p", path)
}

pub fn get_upload_link(repo_id: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::FileUploadLink,
        repo_id,
        ResponseRule::QuotedUrl,
    )
}

pub fn get_update_link(repo_id: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::FileUpdateLink,
        repo_id,
        ResponseRule::QuotedUrl,
    )
}

pub fn rename_file(repo_id: &str, path: &str, new_name: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Post,
        Endpoint::Files,
        repo_id,
        ResponseRule::EmptyAck,
    )
    .query("p", path)
    .form("operation", "rename")
    .form("newname", new_name)
}

pub fn move_file(repo_id: &str, path: &str, dst_repo_id: &str, dst_dir: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Post,
        Endpoint::Files,
        repo_id,
        ResponseRule::EmptyAck,
    )
    .query("p", path)
    .form("operation", "move")
    .form("dst_repo", dst_repo_id)
    .form("dst_dir", dst_dir)
}

pub fn remove_file(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Delete,
        Endpoint::Files,
        repo_id,
        ResponseRule::EmptyAck,
    )
    .query("p", path)
}

pub fn star_file(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Post,
        Endpoint::StarredFiles,
        repo_id,
        ResponseRule::EmptyAck,
    )
    .form("repo_id", repo_id)
    .form("p", path)
}

pub fn unstar_file(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Delete,
        Endpoint::StarredFiles,
        repo_id,
        ResponseRule::EmptyAck,
    )
    .query("repo_id", repo_id)
    .query("p", path)
}

pub fn list_starred_files() -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::StarredFiles,
        "",
        ResponseRule::Json,
    )
}

pub fn get_file_revision_link(repo_id: &str, path: &str, commit_id: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::FileRevision,
        repo_id,
        ResponseRule::QuotedUrl,
    )
    .query("p", path)
    .query("commit_id", commit_id)
}

pub fn get_file_detail(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::FileDetail,
        repo_id,
        ResponseRule::Json,
    )
    .query("p", path)
}

pub fn get_file_history(repo_id: &str, path: &str) -> RequestSpec {
    RequestSpec::new(
        HttpMethod::Get,
        Endpoint::FileHistory,
        repo_id,
        ResponseRule::Json,
    )
    .query("p", path)
}
