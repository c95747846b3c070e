use std::fmt;

use url::Url;

use crate::account::Account;
use crate::interpret::ResponseRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed api2 endpoints. `%1` is replaced by the repository id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Dirents,
    Files,
    FileSharedLink,
    FileUploadLink,
    FileUpdateLink,
    StarredFiles,
    FileRevision,
    FileDetail,
    FileHistory,
}

impl Endpoint {
    pub fn template(self) -> &'static str {
        match self {
            Endpoint::Dirents => "api2/repos/%1/dir/",
            Endpoint::Files => "api2/repos/%1/file/",
            Endpoint::FileSharedLink => "api2/repos/%1/file/shared-link/",
            Endpoint::FileUploadLink => "api2/repos/%1/upload-link/",
            Endpoint::FileUpdateLink => "api2/repos/%1/update-link/",
            Endpoint::StarredFiles => "api2/starredfiles/",
            Endpoint::FileRevision => "api2/repos/%1/file/revision/",
            Endpoint::FileDetail => "api2/repos/%1/file/detail/",
            Endpoint::FileHistory => "api2/repos/%1/file/history/",
        }
    }

    pub fn path(self, repo_id: &str) -> String {
        self.template().replace("%1", repo_id)
    }
}

/// Everything needed to issue one operation. Built per call, never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub form: Vec<(&'static str, String)>,
    pub rule: ResponseRule,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, endpoint: Endpoint, repo_id: &str, rule: ResponseRule) -> Self {
        Self {
            method,
            path: endpoint.path(repo_id),
            query: Vec::new(),
            form: Vec::new(),
            rule,
        }
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn form(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.form.push((key, value.into()));
        self
    }

    /// Absolute request url with the query string applied.
    pub fn url(&self, account: &Account) -> Result<Url, url::ParseError> {
        let mut url = account.absolute_url(&self.path)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        lookup(&self.form, key)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }
}

fn lookup<'a>(pairs: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}
