use snafu::prelude::*;

pub mod client;
pub mod cover;
pub mod spotify_models;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("authorization failed: {message}"))]
    Authorization { message: String },
    #[snafu(display("{message}"))]
    Api { message: String },
    #[snafu(display("failed to deserialize response: {message}"))]
    DeserializeJson { message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
