use crate::{controller::Controller, refresh::RefreshCoordinator};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

pub const VOLUME_STEP: i32 = 5;

/// Words that show up in media-key names across layouts and platforms.
pub const MEDIA_KEY_KEYWORDS: [&str; 6] =
    ["track", "media", "play", "pause", "next", "previous"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyEvent {
    VolumeUp,
    VolumeDown,
    /// Any other observed key press, by name.
    Key(String),
}

pub fn is_media_key(name: &str) -> bool {
    let name = name.to_lowercase();
    MEDIA_KEY_KEYWORDS.iter().any(|word| name.contains(word))
}

/// Turns raw key events into cycles. Volume steps run as their own
/// short-lived workers so a slow api call never stalls the event stream;
/// media keys only arm the coalescing timer. Failures are logged here and
/// never reach the event source.
pub struct HotkeyDispatcher {
    controller: Arc<Controller>,
    coordinator: Arc<RefreshCoordinator>,
    debounce: Duration,
}

impl HotkeyDispatcher {
    pub fn new(
        controller: Arc<Controller>,
        coordinator: Arc<RefreshCoordinator>,
        debounce: Duration,
    ) -> Self {
        Self {
            controller,
            coordinator,
            debounce,
        }
    }

    pub async fn run(&self, mut events: UnboundedReceiver<HotkeyEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
    }

    pub async fn dispatch(&self, event: HotkeyEvent) {
        match event {
            HotkeyEvent::VolumeUp => self.spawn_volume_worker(VOLUME_STEP),
            HotkeyEvent::VolumeDown => self.spawn_volume_worker(-VOLUME_STEP),
            HotkeyEvent::Key(name) => {
                if is_media_key(&name) {
                    self.coordinator.trigger(self.debounce).await;
                }
            }
        }
    }

    fn spawn_volume_worker(&self, step: i32) {
        let controller = self.controller.clone();

        tokio::spawn(async move {
            if let Err(error) = controller.change_volume(step).await {
                warn!(%error, step, "volume change failed");
            }
        });
    }
}
