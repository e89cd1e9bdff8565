use crate::spotify_models::device::Device;
use serde::{Deserialize, Serialize};

/// [get information about the user's current playback](https://developer.spotify.com/documentation/web-api/reference/get-information-about-the-users-current-playback)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPlayback {
    pub device: Option<Device>,
    pub item: Option<Item>,
    #[serde(default)]
    pub is_playing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Covers arrive largest first, usually in three sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
