mod adapter;
mod encoder;
mod event;
mod state;

pub use {
    adapter::RecorderAdapter,
    encoder::{EncoderFactory, EncoderOptions, MediaBlob, MediaEncoder, WEBM_VP8_OPUS},
    event::RecorderEvent,
    state::RecorderState,
};
