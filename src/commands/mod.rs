use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use crate::client::{Client, TrelloApi};

pub mod config;
mod param;

pub use param::{Param, to_params};

use config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Connection settings as given on the command line.
pub struct Connection {
    pub host: String,
    pub key: String,
    pub token: String,
    pub timeout: Option<u64>,
}

/// Sends one request to the configured Trello host and prints the body to stdout.
#[tracing::instrument(skip(connection, params))]
pub async fn call(
    connection: &Connection,
    method: Method,
    path: &str,
    params: Vec<Param>,
    pretty: bool,
) -> Result<()> {
    let config: Config<Client> = Config::new(
        &connection.host,
        &connection.key,
        &connection.token,
        connection.timeout,
    )?;
    let mut stdout = std::io::stdout().lock();
    request(&config.api, method, path, params, pretty, &mut stdout).await
}

/// Dispatches a request through any [`TrelloApi`] and writes the body to `out`.
///
/// With `pretty`, a JSON body is re-emitted indented. Anything that does not
/// parse as JSON is written unchanged.
#[tracing::instrument(skip(api, params, out))]
pub async fn request<A: TrelloApi, W: Write>(
    api: &A,
    method: Method,
    path: &str,
    params: Vec<Param>,
    pretty: bool,
    out: &mut W,
) -> Result<()> {
    let params = if params.is_empty() {
        None
    } else {
        Some(to_params(params))
    };

    let body = match method {
        Method::Get => api.get(path, params).await,
        Method::Post => api.post(path, params).await,
        Method::Put => api.put(path, params).await,
        Method::Delete => api.delete(path, params).await,
    }
    .with_context(|| format!("{} {} failed", method, path))?;

    debug!("Received {} bytes", body.len());

    if pretty {
        match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(value) => {
                serde_json::to_writer_pretty(&mut *out, &value)
                    .context("Failed to write response")?;
                writeln!(out).context("Failed to write response")?;
                return Ok(());
            }
            Err(e) => debug!("Response is not JSON ({}), writing it unchanged", e),
        }
    }

    out.write_all(&body).context("Failed to write response")?;
    out.flush().context("Failed to write response")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockTrelloApi, Params, RequestError};
    use mockall::predicate::eq;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_request_get_without_params() {
        let mut api = MockTrelloApi::new();
        api.expect_get()
            .with(eq("/1/members/me"), eq(None::<Params>))
            .times(1)
            .returning(|_, _| Ok(br#"{"id":"1"}"#.to_vec()));

        let mut out = Vec::new();
        request(&api, Method::Get, "/1/members/me", vec![], false, &mut out)
            .await
            .unwrap();

        assert_eq!(out, br#"{"id":"1"}"#);
    }

    #[tokio::test]
    async fn test_request_passes_params() {
        let mut api = MockTrelloApi::new();
        api.expect_post()
            .with(
                eq("/1/cards"),
                eq(Some(params(&[("idList", "abc"), ("name", "Card")]))),
            )
            .times(1)
            .returning(|_, _| Ok(b"created".to_vec()));

        let mut out = Vec::new();
        request(
            &api,
            Method::Post,
            "/1/cards",
            vec!["name=Card".parse().unwrap(), "idList=abc".parse().unwrap()],
            false,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(out, b"created");
    }

    #[tokio::test]
    async fn test_request_dispatches_put_and_delete() {
        let mut api = MockTrelloApi::new();
        api.expect_put()
            .with(eq("/1/cards/abc"), eq(Some(params(&[("closed", "true")]))))
            .times(1)
            .returning(|_, _| Ok(b"put".to_vec()));
        api.expect_delete()
            .with(eq("/1/cards/abc"), eq(None::<Params>))
            .times(1)
            .returning(|_, _| Ok(b"deleted".to_vec()));

        let mut out = Vec::new();
        request(
            &api,
            Method::Put,
            "/1/cards/abc",
            vec!["closed=true".parse().unwrap()],
            false,
            &mut out,
        )
        .await
        .unwrap();
        request(&api, Method::Delete, "/1/cards/abc", vec![], false, &mut out)
            .await
            .unwrap();

        assert_eq!(out, b"putdeleted");
    }

    #[tokio::test]
    async fn test_request_pretty_prints_json() {
        let mut api = MockTrelloApi::new();
        api.expect_get()
            .returning(|_, _| Ok(br#"{"name":"Board"}"#.to_vec()));

        let mut out = Vec::new();
        request(&api, Method::Get, "/1/boards/abc", vec![], true, &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"name\": \"Board\"\n}\n");
    }

    #[tokio::test]
    async fn test_request_pretty_leaves_non_json_unchanged() {
        let mut api = MockTrelloApi::new();
        api.expect_get().returning(|_, _| Ok(b"plain text".to_vec()));

        let mut out = Vec::new();
        request(&api, Method::Get, "/1/boards/abc", vec![], true, &mut out)
            .await
            .unwrap();

        assert_eq!(out, b"plain text");
    }

    #[tokio::test]
    async fn test_request_propagates_status_error() {
        let mut api = MockTrelloApi::new();
        api.expect_get()
            .returning(|_, _| Err(RequestError::UnexpectedStatus(401)));

        let mut out = Vec::new();
        let err = request(&api, Method::Get, "/1/members/me", vec![], false, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "GET /1/members/me failed");
        let source = err.downcast_ref::<RequestError>().unwrap();
        assert_eq!(source.to_string(), "Response code 401");
        assert!(out.is_empty());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
