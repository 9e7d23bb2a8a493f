use anyhow::{Context, Result};
use log::debug;
use std::time::Duration;

use crate::client::{Client, TrelloApi};

const USER_AGENT: &str = concat!("trello-cli/", env!("TRELLO_CLIENT_VERSION"));

pub struct Config<A: TrelloApi> {
    pub api: A,
}

impl Config<Client> {
    pub fn new(host: &str, key: &str, token: &str, timeout: Option<u64>) -> Result<Self> {
        debug!("Using Trello host {}", host);
        debug!("Using TRELLO_TOKEN for authentication: {}", mask(token));

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = timeout {
            debug!("Request timeout set to {}s", secs);
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api: Client::with_http_client(http, host, key, token),
        })
    }
}

/// Keeps the first and last four characters of a secret, hiding the rest.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(9);
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn test_mask_long_secret() {
        assert_eq!(mask("abcd0123456789wxyz"), "abcd*********wxyz");
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask("short"), "*********");
        assert_eq!(mask(""), "*********");
    }

    #[test]
    fn test_mask_multibyte_secret() {
        assert_eq!(mask("ééééabcdefghijklüüüü"), "éééé*********üüüü");
    }

    #[tokio::test]
    async fn test_config_new_sends_user_agent_and_credentials() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/1/members/me?key=mykey&token=private")
            .match_header("user-agent", Matcher::Regex("^trello-cli/".to_string()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let config = Config::new(&server.url(), "mykey", "private", Some(5)).unwrap();
        let body = config.api.get("/1/members/me", None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, b"{}");
        assert_eq!(config.api.host(), server.url());
    }
}
