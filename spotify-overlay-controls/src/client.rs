use crate::{
    Result,
    models::{DeviceInfo, DeviceKind, PlaybackState, Track},
    overlay::{CoverArt, CoverFetcher},
};
use async_trait::async_trait;
use spotify_overlay_client::{
    client::Client as ApiClient,
    cover::CoverClient,
    spotify_models::{device, playback},
};

/// Seam to the remote playback service. Everything the cycles need, and
/// nothing about transport, so tests can stand in a fake.
#[async_trait]
pub trait PlaybackClient: Send + Sync + 'static {
    /// `None` when nothing is playing on any device.
    async fn playback_state(&self) -> Result<Option<PlaybackState>>;

    async fn devices(&self) -> Result<Vec<DeviceInfo>>;

    async fn set_volume(&self, percent: u8, device_id: Option<&str>) -> Result<()>;
}

#[async_trait]
impl PlaybackClient for ApiClient {
    async fn playback_state(&self) -> Result<Option<PlaybackState>> {
        Ok(self.current_playback().await?.map(PlaybackState::from))
    }

    async fn devices(&self) -> Result<Vec<DeviceInfo>> {
        let payload = self.device_list().await?;

        Ok(payload
            .devices
            .into_iter()
            .filter_map(device_info)
            .collect())
    }

    async fn set_volume(&self, percent: u8, device_id: Option<&str>) -> Result<()> {
        Ok(self.set_device_volume(percent, device_id).await?)
    }
}

#[async_trait]
impl CoverFetcher for CoverClient {
    async fn fetch(&self, url: &str) -> Result<CoverArt> {
        let bytes = self.download(url).await?;

        Ok(CoverArt {
            url: url.to_string(),
            bytes,
        })
    }
}

/// Restricted devices report no id and cannot be targeted; drop them.
fn device_info(device: device::Device) -> Option<DeviceInfo> {
    let id = device.id?;

    Some(DeviceInfo {
        id,
        kind: DeviceKind::from_wire(&device.kind),
        volume_percent: device.volume_percent,
    })
}

impl From<playback::CurrentPlayback> for PlaybackState {
    fn from(playback: playback::CurrentPlayback) -> Self {
        PlaybackState {
            device: playback.device.and_then(device_info),
            track: playback.item.map(|item| Track {
                title: item.name,
                artists: item.artists.into_iter().map(|artist| artist.name).collect(),
                cover_urls: item
                    .album
                    .map(|album| album.images.into_iter().map(|image| image.url).collect())
                    .unwrap_or_default(),
            }),
        }
    }
}
