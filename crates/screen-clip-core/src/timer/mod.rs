mod tracker;

pub use tracker::{ElapsedTracker, TICK_INTERVAL, TrackerPhase, ZERO_DISPLAY, format_elapsed};
