//! Desktop capture and encoding through an external ffmpeg binary.

pub(crate) mod args;
mod encoder;
pub(crate) mod provider;

pub(crate) use {
    args::{GrabPlatform, concat_args, concat_list, is_supported_mime, probe_args, segment_args},
    encoder::FfmpegEncoders,
    provider::FfmpegCapture,
};
