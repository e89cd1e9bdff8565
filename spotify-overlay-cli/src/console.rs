use spotify_overlay_controls::{
    models::NowPlaying,
    overlay::{CoverArt, OverlaySurface},
};
use std::io::{self, Write};

/// Stand-in for the real transparent window: a single status line that is
/// rewritten in place and cleared when the overlay hides.
pub struct ConsoleOverlay {
    visible: bool,
}

impl ConsoleOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Default for ConsoleOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySurface for ConsoleOverlay {
    fn show(&mut self, snapshot: &NowPlaying) {
        self.visible = true;

        let volume = match snapshot.volume_percent {
            Some(volume) => format!("{volume:>3}%"),
            None => "  --".to_string(),
        };
        let artists = snapshot.artist_line();
        let line = if artists.is_empty() {
            format!("[{volume}] {}", snapshot.title)
        } else {
            format!("[{volume}] {} - {artists}", snapshot.title)
        };

        let mut out = io::stdout();
        let _ = write!(out, "\r\x1b[2K{line}");
        let _ = out.flush();
    }

    fn set_cover(&mut self, art: &CoverArt) {
        if !self.visible {
            return;
        }

        let mut out = io::stdout();
        let _ = write!(out, " [cover: {} bytes]", art.bytes.len());
        let _ = out.flush();
    }

    fn hide(&mut self) {
        self.visible = false;

        let mut out = io::stdout();
        let _ = write!(out, "\r\x1b[2K");
        let _ = out.flush();
    }
}
