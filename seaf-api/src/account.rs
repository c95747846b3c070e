use std::fmt;

use url::Url;

/// Server location and credential used to sign every request.
#[derive(Clone)]
pub struct Account {
    server_url: Url,
    token: String,
}

impl Account {
    pub fn new(server_url: &str, token: impl Into<String>) -> Result<Self, url::ParseError> {
        let mut server_url = Url::parse(server_url)?;
        // relative api paths are joined onto the last segment otherwise
        if !server_url.path().ends_with('/') {
            let path = format!("{}/", server_url.path());
            server_url.set_path(&path);
        }
        Ok(Self {
            server_url,
            token: token.into(),
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn absolute_url(&self, relative: &str) -> Result<Url, url::ParseError> {
        self.server_url.join(relative)
    }

    pub(crate) fn auth_header_value(&self) -> String {
        format!("Token {}", self.token)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("server_url", &self.server_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}
