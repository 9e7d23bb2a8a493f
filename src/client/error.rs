//! Failure kinds surfaced by the Trello client.

use reqwest::{Method, StatusCode};

/// Errors returned by every [`TrelloApi`](super::TrelloApi) operation.
///
/// Both kinds are terminal for the call; nothing is retried.
#[derive(Debug)]
pub enum RequestError {
    /// The HTTP exchange could not be completed (DNS, refused connection,
    /// timeout, unreadable body, unbuildable URL).
    Transport {
        method: Method,
        url: String,
        source: reqwest::Error,
    },
    /// The server answered with anything other than 200 OK.
    UnexpectedStatus(u16),
}

impl RequestError {
    pub(crate) fn transport(method: &Method, url: &str, source: reqwest::Error) -> Self {
        RequestError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        }
    }

    /// Returns the status code for [`RequestError::UnexpectedStatus`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::UnexpectedStatus(code) => StatusCode::from_u16(*code).ok(),
            RequestError::Transport { .. } => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport { .. })
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::Transport { method, url, .. } => {
                write!(f, "Could not make {} request to {}", method, url)
            }
            RequestError::UnexpectedStatus(code) => write!(f, "Response code {}", code),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Transport { source, .. } => Some(source),
            RequestError::UnexpectedStatus(_) => None,
        }
    }
}
