use std::future::Future;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use tracing::debug;

use crate::account::Account;
use crate::error::TransportError;
use crate::interpret::RawReply;
use crate::request::{HttpMethod, RequestSpec};

/// Executes one request and hands back whatever the server replied.
///
/// Implementations perform a single attempt: no retries, no caching. The
/// returned future resolves exactly once.
pub trait Transport: Send + Sync + 'static {
    fn execute(
        &self,
        account: &Account,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<RawReply, TransportError>> + Send;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        account: &Account,
        request: &RequestSpec,
    ) -> Result<RawReply, TransportError> {
        let url = request.url(account)?;
        let mut builder = self
            .http
            .request(reqwest_method(request.method), url)
            .header(AUTHORIZATION, account.auth_header_value());
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = header_pairs(response.headers());
        let body = response.bytes().await?.to_vec();

        Ok(RawReply {
            status,
            headers,
            body,
        })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Header values that are not valid UTF-8 are kept, decoded lossily.
fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = match value.to_str() {
                Ok(value) => value.to_string(),
                Err(_) => {
                    debug!(header = %name, "header value is not valid utf-8");
                    String::from_utf8_lossy(value.as_bytes()).into_owned()
                }
            };
            (name.as_str().to_string(), value)
        })
        .collect()
}
