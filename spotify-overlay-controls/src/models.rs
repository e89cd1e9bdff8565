#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Computer,
    Other,
}

impl DeviceKind {
    pub fn from_wire(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("computer") {
            DeviceKind::Computer
        } else {
            DeviceKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: String,
    pub kind: DeviceKind,
    /// Only reported while the device is actively rendering audio.
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artists: Vec<String>,
    /// Cover urls as the service lists them, largest first.
    pub cover_urls: Vec<String>,
}

impl Track {
    /// The middle size when several are offered: big enough for the
    /// overlay, small enough to not make the download noticeable.
    pub fn preferred_cover(&self) -> Option<&str> {
        match self.cover_urls.len() {
            0 => None,
            1 => Some(self.cover_urls[0].as_str()),
            _ => Some(self.cover_urls[1].as_str()),
        }
    }
}

/// What one `getState` call yields when the service reports anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub device: Option<DeviceInfo>,
    pub track: Option<Track>,
}

/// Immutable snapshot handed to the overlay. Built fresh per cycle and
/// discarded once displayed or superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artists: Vec<String>,
    pub volume_percent: Option<u8>,
    pub cover_url: Option<String>,
    pub device_id: Option<String>,
}

impl NowPlaying {
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}
