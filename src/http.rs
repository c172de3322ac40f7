//! The HTTP side of the opening handshake.
//!
//! Requests and responses share `HttpMessage`: an ordered list of headers and
//! the protocol version, kept as an opaque string such as `"HTTP/1.1"`.
use std::fmt;

use sha1::Sha1;

/// Appended to `Sec-WebSocket-Key` before hashing (RFC 6455 1.3).
pub const WEBSOCKET_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

pub const HTTP_1_1: &str = "HTTP/1.1";

/// Headers in the order they were added. Names are matched without regard
/// to case; a name added twice keeps both values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HttpHeaders {
    entries: Vec<(String, String)>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HttpMessage {
    headers: HttpHeaders,
    http_version: Option<String>,
}

impl HttpMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.add(name, value);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn http_version(&self) -> Option<&str> {
        self.http_version.as_deref()
    }

    pub fn set_http_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.http_version = Some(version.into());
        self
    }
}

/// `Sec-WebSocket-Accept` value answering the client's `Sec-WebSocket-Key`.
pub fn sec_websocket_accept(key: &str) -> String {
    let guid = [key.as_bytes(), WEBSOCKET_GUID.as_bytes()].concat();
    let sha1 = Sha1::from(guid).digest().bytes();

    base64::encode(sha1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub reason: String,
    pub message: HttpMessage,
}

impl HttpResponse {
    /// `101 Switching Protocols`, with `Sec-WebSocket-Accept` when the client
    /// sent a key.
    pub fn switching_protocols(key: Option<&str>) -> Self {
        let mut message = HttpMessage::new();
        message
            .set_http_version(HTTP_1_1)
            .add_header("Upgrade", "websocket")
            .add_header("Connection", "Upgrade");

        if let Some(key) = key {
            message.add_header("Sec-WebSocket-Accept", sec_websocket_accept(key));
        }

        Self {
            status_code: 101,
            reason: "Switching Protocols".to_string(),
            message,
        }
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.message.http_version().unwrap_or(HTTP_1_1);

        write!(f, "{} {} {}\r\n", version, self.status_code, self.reason)?;

        for (name, value) in self.message.headers().iter() {
            write!(f, "{}: {}\r\n", name, value)?;
        }

        write!(f, "\r\n")
    }
}
