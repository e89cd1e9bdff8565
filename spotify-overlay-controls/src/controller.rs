use crate::{
    Error, Result, client::PlaybackClient, device, models::NowPlaying, overlay::OverlayHandle,
    volume,
};
use std::sync::Arc;
use tracing::debug;

/// Shown as the title when the volume changes while nothing is playing.
pub const SERVICE_NAME: &str = "Spotify";

/// Runs the two cycles everything else triggers: fetch-and-display and
/// volume change. Stateless between cycles; every snapshot is built fresh.
pub struct Controller {
    client: Arc<dyn PlaybackClient>,
    overlay: OverlayHandle,
}

impl Controller {
    pub fn new(client: Arc<dyn PlaybackClient>, overlay: OverlayHandle) -> Self {
        Self { client, overlay }
    }

    /// One fetch-and-display cycle. Nothing playing means nothing to do;
    /// the overlay keeps whatever it showed last.
    pub async fn refresh_now(&self) -> Result<()> {
        let Some(state) = self.client.playback_state().await? else {
            return Ok(());
        };
        let Some(track) = state.track else {
            debug!("no track playing, leaving the overlay untouched");
            return Ok(());
        };

        let cover_url = track.preferred_cover().map(str::to_string);
        let snapshot = NowPlaying {
            title: track.title,
            artists: track.artists,
            volume_percent: state.device.as_ref().and_then(|device| device.volume_percent),
            cover_url,
            device_id: state.device.map(|device| device.id),
        };

        self.overlay.show(snapshot);
        Ok(())
    }

    /// One volume-change cycle. Works with nothing audibly playing: the
    /// device inventory is consulted whenever the state reports no device.
    pub async fn change_volume(&self, step: i32) -> Result<()> {
        let state = self.client.playback_state().await?;

        let devices = if state.as_ref().is_some_and(|state| state.device.is_some()) {
            Vec::new()
        } else {
            self.client.devices().await?
        };

        let target = match device::resolve(state.as_ref(), &devices) {
            Ok(target) => target,
            Err(Error::NoActiveDevice) => {
                debug!("spotify is not running on any device");
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        let new_volume = volume::apply_step(target.volume_percent, step);
        self.client.set_volume(new_volume, Some(&target.id)).await?;

        // show the level we just set; re-fetching here would race the
        // remote's eventual consistency
        let snapshot = match state.and_then(|state| state.track) {
            Some(track) => {
                let cover_url = track.preferred_cover().map(str::to_string);
                NowPlaying {
                    title: track.title,
                    artists: track.artists,
                    volume_percent: Some(new_volume),
                    cover_url,
                    device_id: Some(target.id),
                }
            }
            None => NowPlaying {
                title: SERVICE_NAME.to_string(),
                artists: Vec::new(),
                volume_percent: Some(new_volume),
                cover_url: None,
                device_id: Some(target.id),
            },
        };

        self.overlay.show(snapshot);
        Ok(())
    }
}
