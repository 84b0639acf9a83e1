//! Just enough HTTP/1.1 to serve one chart per connection.

use crate::Result;
use ohno::bail;

/// The pieces of a request head the server routes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
    pub query: String,
}

/// Parse a request line such as `GET /api?theme=dark HTTP/1.1`.
pub fn parse_request_line(line: &str) -> Result<RequestHead> {
    let mut parts = line.split_ascii_whitespace();
    let (Some(method), Some(target), Some(version), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        bail!("malformed request line: '{line}'");
    };

    if !version.starts_with("HTTP/") {
        bail!("malformed request line: '{line}'");
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    Ok(RequestHead {
        method: method.to_string(),
        path: path.to_string(),
        query: query.to_string(),
    })
}

/// An HTTP response ready to be written to a connection.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: Vec<u8>,
}

impl Response {
    /// A successful chart response. The cache directives match what the
    /// upstream data is worth: GitHub only refreshes traffic counts a few
    /// times a day.
    #[must_use]
    pub fn svg(body: String) -> Self {
        Self {
            status: 200,
            headers: vec![
                ("Content-Type", "image/svg+xml; charset=utf-8".to_string()),
                (
                    "Cache-Control",
                    "public, max-age=1800, s-maxage=3600, stale-while-revalidate=86400".to_string(),
                ),
            ],
            body: body.into_bytes(),
        }
    }

    #[must_use]
    pub fn redirect(location: &str) -> Self {
        Self {
            status: 302,
            headers: vec![("Location", location.to_string())],
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "text/plain; charset=utf-8".to_string())],
            body: format!("{message}\n").into_bytes(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Serialize the response, head and body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status, reason(self.status));
        for (name, value) in &self.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        head.push_str("Connection: close\r\n\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        502 => "Bad Gateway",
        _ => "Internal Server Error",
    }
}
