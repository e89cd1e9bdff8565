use crate::{
    Error, Result,
    spotify_models::{TokenResponse, device::DevicePayload, playback::CurrentPlayback},
};
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::{
    fmt::Display,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use tracing::debug;

const API_BASE_URL: &str = "https://api.spotify.com/v1/";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Scope required to read playback state and adjust device volume.
pub const OAUTH_SCOPE: &str = "user-read-playback-state,user-modify-playback-state";

/// Url the user opens once in a browser to grant access and obtain the
/// authorization code that is then exchanged for a refresh token.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", OAUTH_SCOPE)
        .finish();

    format!("{AUTHORIZE_URL}?{query}")
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    access_token: RwLock<Option<AccessToken>>,
}

enum Endpoint {
    CurrentPlayback,
    Devices,
    Volume,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let endpoint = match self {
            Endpoint::CurrentPlayback => "me/player",
            Endpoint::Devices => "me/player/devices",
            Endpoint::Volume => "me/player/volume",
        };

        f.write_str(endpoint)
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|error| Error::DeserializeJson {
        message: error.to_string(),
    })
}

impl Client {
    pub fn new(client_id: String, client_secret: String, refresh_token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|error| Error::Api {
                message: error.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            client_id,
            client_secret,
            refresh_token,
            access_token: RwLock::new(None),
        })
    }

    /// Current playback across all of the user's devices. `None` means
    /// nothing is playing anywhere (the api answers 204 in that case).
    pub async fn current_playback(&self) -> Result<Option<CurrentPlayback>> {
        let endpoint = format!("{}{}", self.base_url, Endpoint::CurrentPlayback);
        let response = self.get(&endpoint).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = read_body(response).await?;
        if body.is_empty() {
            return Ok(None);
        }

        Ok(Some(parse(&body)?))
    }

    pub async fn device_list(&self) -> Result<DevicePayload> {
        let endpoint = format!("{}{}", self.base_url, Endpoint::Devices);
        let response = self.get(&endpoint).await?;
        let body = read_body(response).await?;

        parse(&body)
    }

    pub async fn set_device_volume(&self, percent: u8, device_id: Option<&str>) -> Result<()> {
        let endpoint = format!("{}{}", self.base_url, Endpoint::Volume);
        let token = self.bearer().await?;

        let percent = percent.to_string();
        let mut query = vec![("volume_percent", percent.as_str())];
        if let Some(id) = device_id {
            query.push(("device_id", id));
        }

        let response = self
            .http
            .put(&endpoint)
            .bearer_auth(token)
            .query(&query)
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await
            .map_err(|error| Error::Api {
                message: error.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api {
                message: format!("volume update rejected: {status}: {body}"),
            })
        }
    }

    async fn get(&self, endpoint: &str) -> Result<Response> {
        let token = self.bearer().await?;

        self.http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|error| Error::Api {
                message: error.to_string(),
            })
    }

    async fn bearer(&self) -> Result<String> {
        if let Some(token) = self.access_token.read().await.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.value.clone());
        }

        let mut slot = self.access_token.write().await;

        // another caller may have refreshed while we waited for the lock
        if let Some(token) = slot.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.value.clone());
        }

        let token = self.request_access_token().await?;
        let value = token.value.clone();
        *slot = Some(token);

        Ok(value)
    }

    async fn request_access_token(&self) -> Result<AccessToken> {
        debug!("requesting a fresh access token");

        let basic =
            general_purpose::STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .header("Authorization", format!("Basic {basic}"))
            .form(&params)
            .send()
            .await
            .map_err(|error| Error::Authorization {
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Authorization {
                message: format!("token endpoint returned {status}"),
            });
        }

        let grant: TokenResponse = response.json().await.map_err(|error| Error::DeserializeJson {
            message: error.to_string(),
        })?;

        // renew a minute early so a token never expires mid-request
        let lifetime = Duration::from_secs(grant.expires_in.saturating_sub(60));

        Ok(AccessToken {
            value: grant.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}

async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(|error| Error::Api {
        message: error.to_string(),
    })?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(Error::Api {
            message: format!("spotify api returned {status}: {body}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_scope_and_redirect() {
        let url = authorize_url("abc123", "http://127.0.0.1:8888/callback");

        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.contains("client_id=abc123"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
        assert!(url.contains("user-read-playback-state"));
    }
}
