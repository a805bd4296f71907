#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod error;
#[cfg(unix)]
mod ffmpeg_encoder;
mod ffmpeg_provider;
mod output;
mod tray;
