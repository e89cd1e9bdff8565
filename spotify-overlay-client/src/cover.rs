use crate::{Error, Result};
use std::time::Duration;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Downloads album art. Kept separate from the api client: cover urls live
/// on a cdn and need neither authorization nor the api timeout budget.
#[derive(Debug)]
pub struct CoverClient {
    http: reqwest::Client,
}

impl CoverClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|error| Error::Api {
                message: error.to_string(),
            })?;

        Ok(Self { http })
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await.map_err(|error| Error::Api {
            message: error.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                message: format!("cover download returned {status}"),
            });
        }

        let bytes = response.bytes().await.map_err(|error| Error::Api {
            message: error.to_string(),
        })?;

        Ok(bytes.to_vec())
    }
}
