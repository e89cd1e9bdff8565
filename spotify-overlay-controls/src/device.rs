use crate::{
    Error, Result,
    models::{DeviceInfo, DeviceKind, PlaybackState},
};

/// The api only reports volume for a device actively rendering audio.
/// An idle target still has to be volume-addressable somehow.
pub const DEFAULT_VOLUME: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDevice {
    pub id: String,
    pub volume_percent: u8,
}

/// Picks the device volume commands should target.
///
/// A state that reports an active device wins outright; the inventory is
/// never consulted. Otherwise the first `Computer` in the list is
/// preferred, falling back to the first device of any kind. An empty
/// inventory means Spotify is simply not running anywhere.
pub fn resolve(state: Option<&PlaybackState>, devices: &[DeviceInfo]) -> Result<ResolvedDevice> {
    if let Some(device) = state.and_then(|state| state.device.as_ref()) {
        return Ok(resolved(device));
    }

    let Some(device) = devices
        .iter()
        .find(|device| device.kind == DeviceKind::Computer)
        .or_else(|| devices.first())
    else {
        return Err(Error::NoActiveDevice);
    };

    Ok(resolved(device))
}

fn resolved(device: &DeviceInfo) -> ResolvedDevice {
    ResolvedDevice {
        id: device.id.clone(),
        volume_percent: device.volume_percent.unwrap_or(DEFAULT_VOLUME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, kind: DeviceKind, volume_percent: Option<u8>) -> DeviceInfo {
        DeviceInfo {
            id: id.to_string(),
            kind,
            volume_percent,
        }
    }

    #[test]
    fn active_device_wins_without_consulting_the_inventory() {
        let state = PlaybackState {
            device: Some(device("active", DeviceKind::Other, Some(30))),
            track: None,
        };
        // deliberately tempting inventory; it must be ignored
        let devices = vec![device("computer", DeviceKind::Computer, Some(99))];

        let target = resolve(Some(&state), &devices).unwrap();

        assert_eq!(target.id, "active");
        assert_eq!(target.volume_percent, 30);
    }

    #[test]
    fn computer_preferred_over_earlier_devices() {
        let devices = vec![
            device("speaker", DeviceKind::Other, Some(40)),
            device("desk", DeviceKind::Computer, Some(60)),
        ];

        let target = resolve(None, &devices).unwrap();

        assert_eq!(target.id, "desk");
        assert_eq!(target.volume_percent, 60);
    }

    #[test]
    fn first_device_taken_when_no_computer_exists() {
        let devices = vec![device("speaker", DeviceKind::Other, Some(40))];

        let target = resolve(None, &devices).unwrap();

        assert_eq!(target.id, "speaker");
        assert_eq!(target.volume_percent, 40);
    }

    #[test]
    fn empty_inventory_is_no_active_device() {
        assert!(matches!(resolve(None, &[]), Err(Error::NoActiveDevice)));
    }

    #[test]
    fn missing_volume_defaults_to_fifty() {
        let devices = vec![device("idle", DeviceKind::Computer, None)];

        let target = resolve(None, &devices).unwrap();

        assert_eq!(target.volume_percent, DEFAULT_VOLUME);
    }
}
