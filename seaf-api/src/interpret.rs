//! Turning a raw HTTP reply into a typed payload.
//!
//! Every operation names exactly one [`ResponseRule`]. The rule only runs on
//! a 2xx status; anything else is reported as a transport error carrying the
//! original status. Each rule stops at its first failing check.

use url::Url;

use crate::dirent::{Dirent, ObjectId, decode_dirents};
use crate::error::ApiError;

const OID_HEADER: &str = "oid";
const LOCATION_HEADER: &str = "location";

/// Reply as handed back by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawReply {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup; the first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseRule {
    /// `oid` header check, then a JSON array of dirents.
    Dirents,
    /// Body is a URL wrapped in one leading and one trailing quote.
    QuotedUrl,
    /// The `Location` header, unchecked.
    LocationHeader,
    /// Whole body as text.
    RawText,
    /// Body ignored.
    EmptyAck,
    /// Any JSON document, decoded further by the caller.
    Json,
}

impl ResponseRule {
    pub fn name(self) -> &'static str {
        match self {
            ResponseRule::Dirents => "dirents",
            ResponseRule::QuotedUrl => "quoted-url",
            ResponseRule::LocationHeader => "location-header",
            ResponseRule::RawText => "raw-text",
            ResponseRule::EmptyAck => "empty-ack",
            ResponseRule::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Dirents(Vec<Dirent>),
    Url { url: String, oid: Option<String> },
    Location(String),
    Text(String),
    Json(serde_json::Value),
    Empty,
}

pub fn interpret(rule: ResponseRule, reply: &RawReply) -> Result<Payload, ApiError> {
    if !reply.is_success() {
        return Err(ApiError::from_http_status(reply.status, &reply.text()));
    }

    match rule {
        ResponseRule::Dirents => interpret_dirents(reply),
        ResponseRule::QuotedUrl => interpret_quoted_url(reply),
        ResponseRule::LocationHeader => {
            let location = reply.header(LOCATION_HEADER).unwrap_or_default();
            Ok(Payload::Location(location.to_string()))
        }
        ResponseRule::RawText => Ok(Payload::Text(reply.text())),
        ResponseRule::EmptyAck => Ok(Payload::Empty),
        ResponseRule::Json => parse_json(reply).map(Payload::Json),
    }
}

fn interpret_dirents(reply: &RawReply) -> Result<Payload, ApiError> {
    let oid = reply
        .header(OID_HEADER)
        .ok_or_else(|| ApiError::malformed("listing reply has no oid header"))?;
    ObjectId::parse(oid).map_err(|err| ApiError::malformed(err.to_string()))?;

    let json = parse_json(reply)?;
    decode_dirents(json).map(Payload::Dirents)
}

fn interpret_quoted_url(reply: &RawReply) -> Result<Payload, ApiError> {
    let text = reply.text();
    if text.chars().count() <= 2 {
        let message = format!("link reply too short: {text:?}");
        return Err(ApiError::malformed(message));
    }

    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    let unwrapped = chars.as_str();
    Url::parse(unwrapped)
        .map_err(|err| ApiError::malformed(format!("invalid link {unwrapped:?}: {err}")))?;

    Ok(Payload::Url {
        url: unwrapped.to_string(),
        oid: reply.header(OID_HEADER).map(str::to_string),
    })
}

fn parse_json(reply: &RawReply) -> Result<serde_json::Value, ApiError> {
    serde_json::from_slice(&reply.body)
        .map_err(|err| ApiError::decode(format!("failed to parse json: {err}")))
}
