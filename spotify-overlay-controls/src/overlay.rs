use crate::{Result, models::NowPlaying};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tokio::{
    select,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time::Instant,
};
use tracing::warn;

/// How long the overlay stays up after an update.
pub const DEFAULT_DWELL: Duration = Duration::from_millis(3000);

/// A downloaded cover image. The overlay loop keeps the one on display
/// alive for as long as it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub url: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait CoverFetcher: Send + Sync + 'static {
    async fn fetch(&self, url: &str) -> Result<CoverArt>;
}

/// The actual drawing surface. Only ever touched by the overlay loop task,
/// so implementations need no synchronization of their own.
pub trait OverlaySurface: Send + 'static {
    fn show(&mut self, snapshot: &NowPlaying);
    fn set_cover(&mut self, art: &CoverArt);
    fn hide(&mut self);
}

#[derive(Debug)]
pub enum OverlayMessage {
    Show(NowPlaying),
    CoverLoaded(CoverArt),
}

/// Cheap handle for posting display updates onto the loop from any task.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    tx: UnboundedSender<OverlayMessage>,
}

impl OverlayHandle {
    pub fn show(&self, snapshot: NowPlaying) {
        // the loop is gone during shutdown; nothing left to draw on
        let _ = self.tx.send(OverlayMessage::Show(snapshot));
    }
}

/// Starts the loop that exclusively owns the surface and returns its handle.
pub fn spawn(
    surface: impl OverlaySurface,
    fetcher: Arc<dyn CoverFetcher>,
    dwell: Duration,
) -> OverlayHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = OverlayHandle { tx: tx.clone() };

    tokio::spawn(run(surface, rx, tx, fetcher, dwell));

    handle
}

async fn run(
    mut surface: impl OverlaySurface,
    mut rx: UnboundedReceiver<OverlayMessage>,
    tx: UnboundedSender<OverlayMessage>,
    fetcher: Arc<dyn CoverFetcher>,
    dwell: Duration,
) {
    // url of the cover belonging to the content on display; downloads
    // completing for any other url are stale and dropped
    let mut requested_cover: Option<String> = None;
    let mut displayed_cover: Option<CoverArt> = None;
    let mut hide_at: Option<Instant> = None;

    loop {
        let auto_hide = async {
            match hide_at {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        select! {
            message = rx.recv() => match message {
                Some(OverlayMessage::Show(snapshot)) => {
                    match &snapshot.cover_url {
                        Some(url) if requested_cover.as_deref() != Some(url.as_str()) => {
                            requested_cover = Some(url.clone());
                            displayed_cover = None;

                            let fetcher = fetcher.clone();
                            let tx = tx.clone();
                            let url = url.clone();
                            tokio::spawn(async move {
                                match fetcher.fetch(&url).await {
                                    Ok(art) => {
                                        let _ = tx.send(OverlayMessage::CoverLoaded(art));
                                    }
                                    Err(error) => warn!(%error, %url, "cover download failed"),
                                }
                            });
                        }
                        // unchanged url: keep what we already hold
                        Some(_) => {}
                        None => {
                            requested_cover = None;
                            displayed_cover = None;
                        }
                    }

                    surface.show(&snapshot);
                    if let Some(art) = &displayed_cover {
                        surface.set_cover(art);
                    }
                    hide_at = Some(Instant::now() + dwell);
                }
                Some(OverlayMessage::CoverLoaded(art)) => {
                    // a newer show may have swapped the url while this ran
                    if requested_cover.as_deref() == Some(art.url.as_str()) {
                        surface.set_cover(&art);
                        displayed_cover = Some(art);
                    }
                }
                None => break,
            },
            _ = auto_hide => {
                surface.hide();
                hide_at = None;
            }
        }
    }
}
