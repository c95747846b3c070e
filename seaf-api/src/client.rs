use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::account::Account;
use crate::completion::Completion;
use crate::dirent::Dirent;
use crate::error::ApiError;
use crate::interpret::{Payload, interpret};
use crate::ops;
use crate::request::RequestSpec;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{DownloadLink, FileCommit, FileDetail, FileHistory, StarredFile};

/// File-browser operations for one account.
///
/// Every operation issues exactly one request and resolves exactly once,
/// either with its typed value or with an [`ApiError`].
pub struct SeafileClient<T = ReqwestTransport> {
    account: Account,
    transport: Arc<T>,
}

impl<T> Clone for SeafileClient<T> {
    fn clone(&self) -> Self {
        Self {
            account: self.account.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl SeafileClient<ReqwestTransport> {
    pub fn new(account: Account) -> Self {
        Self::with_transport(account, ReqwestTransport::new())
    }

    pub fn with_base_url(
        server_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self::new(Account::new(server_url, token)?))
    }
}

impl<T: Transport> SeafileClient<T> {
    pub fn with_transport(account: Account, transport: T) -> Self {
        Self {
            account,
            transport: Arc::new(transport),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub async fn list_directory(&self, repo_id: &str, path: &str) -> Result<Vec<Dirent>, ApiError> {
        match self.execute(ops::list_directory(repo_id, path)).await? {
            Payload::Dirents(dirents) => Ok(dirents),
            other => Err(unexpected_payload("dirents", &other)),
        }
    }

    pub async fn get_file_download_link(
        &self,
        repo_id: &str,
        path: &str,
    ) -> Result<DownloadLink, ApiError> {
        self.download_link(ops::get_file_download_link(repo_id, path))
            .await
    }

    pub async fn get_shared_link(
        &self,
        repo_id: &str,
        path: &str,
        is_file: bool,
    ) -> Result<String, ApiError> {
        match self
            .execute(ops::get_shared_link(repo_id, path, is_file))
            .await?
        {
            Payload::Location(location) => Ok(location),
            other => Err(unexpected_payload("location", &other)),
        }
    }

    /// Returns the server's reply text verbatim.
    pub async fn create_directory(&self, repo_id: &str, path: &str) -> Result<String, ApiError> {
        match self.execute(ops::create_directory(repo_id, path)).await? {
            Payload::Text(text) => Ok(text),
            other => Err(unexpected_payload("text", &other)),
        }
    }

    pub async fn rename_directory(
        &self,
        repo_id: &str,
        path: &str,
        new_name: &str,
    ) -> Result<(), ApiError> {
        self.acknowledge(ops::rename_directory(repo_id, path, new_name))
            .await
    }

    pub async fn remove_directory(&self, repo_id: &str, path: &str) -> Result<(), ApiError> {
        self.acknowledge(ops::remove_directory(repo_id, path)).await
    }

    pub async fn get_upload_link(&self, repo_id: &str) -> Result<String, ApiError> {
        let link = self.download_link(ops::get_upload_link(repo_id)).await?;
        Ok(link.url)
    }

    pub async fn get_update_link(&self, repo_id: &str) -> Result<String, ApiError> {
        let link = self.download_link(ops::get_update_link(repo_id)).await?;
        Ok(link.url)
    }

    pub async fn rename_file(
        &self,
        repo_id: &str,
        path: &str,
        new_name: &str,
    ) -> Result<(), ApiError> {
        self.acknowledge(ops::rename_file(repo_id, path, new_name))
            .await
    }

    pub async fn move_file(
        &self,
        repo_id: &str,
        path: &str,
        dst_repo_id: &str,
        dst_dir: &str,
    ) -> Result<(), ApiError> {
        self.acknowledge(ops::move_file(repo_id, path, dst_repo_id, dst_dir))
            .await
    }

    pub async fn remove_file(&self, repo_id: &str, path: &str) -> Result<(), ApiError> {
        self.acknowledge(ops::remove_file(repo_id, path)).await
    }

    pub async fn star_file(&self, repo_id: &str, path: &str) -> Result<(), ApiError> {
        self.acknowledge(ops::star_file(repo_id, path)).await
    }

    pub async fn unstar_file(&self, repo_id: &str, path: &str) -> Result<(), ApiError> {
        self.acknowledge(ops::unstar_file(repo_id, path)).await
    }

    pub async fn list_starred_files(&self) -> Result<Vec<StarredFile>, ApiError> {
        self.json(ops::list_starred_files()).await
    }

    pub async fn get_file_revision_link(
        &self,
        repo_id: &str,
        path: &str,
        commit_id: &str,
    ) -> Result<DownloadLink, ApiError> {
        self.download_link(ops::get_file_revision_link(repo_id, path, commit_id))
            .await
    }

    pub async fn get_file_detail(&self, repo_id: &str, path: &str) -> Result<FileDetail, ApiError> {
        self.json(ops::get_file_detail(repo_id, path)).await
    }

    pub async fn get_file_history(
        &self,
        repo_id: &str,
        path: &str,
    ) -> Result<Vec<FileCommit>, ApiError> {
        let history: FileHistory = self.json(ops::get_file_history(repo_id, path)).await?;
        Ok(history.commits)
    }

    /// Starts an operation in the background and returns a handle to its
    /// single outcome.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, like [`Completion::spawn`].
    ///
    /// ```no_run
    /// # async fn demo(client: seaf_api::SeafileClient) -> Result<(), seaf_api::ApiError> {
    /// let pending = client.dispatch(|c| async move { c.list_directory("repo", "/").await });
    /// let dirents = pending.await?;
    /// # Ok(()) }
    /// ```
    pub fn dispatch<O, F, Fut>(&self, operation: F) -> Completion<O>
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = Result<O, ApiError>> + Send + 'static,
        O: Send + 'static,
    {
        Completion::spawn(operation(self.clone()))
    }

    /// Sends `spec` and interprets the reply with its response rule.
    pub async fn execute(&self, spec: RequestSpec) -> Result<Payload, ApiError> {
        debug!(
            method = %spec.method,
            path = %spec.path,
            rule = spec.rule.name(),
            "dispatching request"
        );
        let outcome = match self.transport.execute(&self.account, &spec).await {
            Ok(reply) => interpret(spec.rule, &reply),
            Err(err) => Err(ApiError::from(err)),
        };
        if let Err(err) = &outcome {
            warn!(
                method = %spec.method,
                path = %spec.path,
                kind = %err.kind,
                status = ?err.http_status,
                "request failed: {err}"
            );
        }
        outcome
    }

    async fn acknowledge(&self, spec: RequestSpec) -> Result<(), ApiError> {
        match self.execute(spec).await? {
            Payload::Empty => Ok(()),
            other => Err(unexpected_payload("empty", &other)),
        }
    }

    async fn download_link(&self, spec: RequestSpec) -> Result<DownloadLink, ApiError> {
        match self.execute(spec).await? {
            Payload::Url { url, oid } => Ok(DownloadLink { url, file_id: oid }),
            other => Err(unexpected_payload("url", &other)),
        }
    }

    async fn json<D: DeserializeOwned>(&self, spec: RequestSpec) -> Result<D, ApiError> {
        match self.execute(spec).await? {
            Payload::Json(value) => serde_json::from_value(value)
                .map_err(|err| ApiError::decode(format!("unexpected json shape: {err}"))),
            other => Err(unexpected_payload("json", &other)),
        }
    }
}

fn unexpected_payload(expected: &str, payload: &Payload) -> ApiError {
    let actual = match payload {
        Payload::Dirents(_) => "dirents",
        Payload::Url { .. } => "url",
        Payload::Location(_) => "location",
        Payload::Text(_) => "text",
        Payload::Json(_) => "json",
        Payload::Empty => "empty",
    };
    ApiError::unexpected(format!("expected {expected} payload, got {actual}"))
}
