//! HTTP responses.
//!
//! Handlers build a [`Reply`]; only [`send`] touches the connection, so the
//! request logic is testable without binding a socket.

use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::utils::mime::types::{HTML, JSON, PLAIN};

pub const HOTEL_NOT_FOUND: &str = "Hotel no encontrado";

/// Status, content type and body of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn new(status: u16, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    pub fn html(body: String) -> Self {
        Self::new(200, HTML, body)
    }

    pub fn json(body: String) -> Self {
        Self::new(200, JSON, body)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(404, PLAIN, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(405, PLAIN, "405 Method Not Allowed")
    }

    /// 500 with the error chain; the error is logged by the caller.
    pub fn internal_error(error: &anyhow::Error) -> Self {
        Self::new(500, PLAIN, format!("500 Internal Server Error\n\n{error:#}"))
    }
}

fn make_header(key: &'static str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header `{key}`"))
}

/// Write `reply` to the connection. HEAD requests get headers only.
pub fn send(request: Request, reply: Reply) -> Result<()> {
    let content_type = make_header("Content-Type", reply.content_type)?;
    let status = StatusCode(reply.status);

    if request.method() == &Method::Head {
        let response = Response::empty(status).with_header(content_type);
        request.respond(response)?;
    } else {
        let mut response = Response::from_data(reply.body)
            .with_status_code(status)
            .with_header(content_type);
        if reply.status == 405 {
            response.add_header(make_header("Allow", "GET, HEAD")?);
        }
        request.respond(response)?;
    }
    Ok(())
}
