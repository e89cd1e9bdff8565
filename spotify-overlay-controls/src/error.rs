use snafu::prelude::*;

#[derive(Snafu, Debug)]
pub enum Error {
    /// Spotify is not running on any device. Expected whenever the app is
    /// closed, so callers treat it as a no-op rather than a failure.
    #[snafu(display("no device is available for playback"))]
    NoActiveDevice,
    #[snafu(display("{message}"))]
    Client { message: String },
    #[snafu(display("malformed playback response: {message}"))]
    MalformedResponse { message: String },
}

impl From<spotify_overlay_client::Error> for Error {
    fn from(error: spotify_overlay_client::Error) -> Self {
        match error {
            spotify_overlay_client::Error::DeserializeJson { message } => {
                Error::MalformedResponse { message }
            }
            other => Error::Client {
                message: other.to_string(),
            },
        }
    }
}
