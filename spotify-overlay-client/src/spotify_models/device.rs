use serde::{Deserialize, Serialize};

/// [get a user's available devices](https://developer.spotify.com/documentation/web-api/reference/get-a-users-available-devices)
///
/// Restricted devices report no id and no volume; `volume_percent` is also
/// absent for devices that are not actively rendering audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_restricted: bool,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePayload {
    pub devices: Vec<Device>,
}
