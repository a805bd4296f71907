use crate::{ElapsedTracker, TrackerPhase, ZERO_DISPLAY, format_elapsed};

use std::time::Duration;

use tokio::time::sleep;

/// WHAT: Paused time is excluded from the elapsed total
/// WHY: Start at 0, pause at 5s, resume at 8s, stop at 10s must read 00:07
#[tokio::test(start_paused = true)]
async fn given_pause_and_resume_when_measuring_at_stop_then_paused_gap_excluded() {
    // Given: A running tracker
    let mut tracker = ElapsedTracker::new();
    tracker.start();

    // When: Paused from 5s to 8s and measured at 10s
    sleep(Duration::from_millis(5000)).await;
    tracker.pause();
    sleep(Duration::from_millis(3000)).await;
    tracker.resume();
    sleep(Duration::from_millis(2000)).await;

    // Then: Only the 7s of recording count
    assert_eq!(tracker.elapsed(), Duration::from_millis(7000));
    assert_eq!(format_elapsed(tracker.elapsed()), "00:07");
}

/// WHAT: Several pause/resume cycles accumulate correctly
/// WHY: Banking each run must neither double-count nor drop earlier runs
#[tokio::test(start_paused = true)]
async fn given_multiple_pause_cycles_when_measuring_then_only_active_runs_counted() {
    // Given: A running tracker
    let mut tracker = ElapsedTracker::new();
    tracker.start();

    // When: Runs of 1.5s, 2.5s and 1s separated by 10s and 4s pauses
    sleep(Duration::from_millis(1500)).await;
    tracker.pause();
    sleep(Duration::from_millis(10_000)).await;
    tracker.resume();
    sleep(Duration::from_millis(2500)).await;
    tracker.pause();
    sleep(Duration::from_millis(4000)).await;
    tracker.resume();
    sleep(Duration::from_millis(1000)).await;

    // Then: 5s recorded
    assert_eq!(tracker.elapsed(), Duration::from_millis(5000));
}

/// WHAT: The display refreshes once per second while running
/// WHY: The widget shows MM:SS from the tick alone
#[tokio::test(start_paused = true)]
async fn given_running_tracker_when_a_minute_passes_then_display_shows_minutes() {
    // Given: A running tracker and a display subscriber
    let mut tracker = ElapsedTracker::new();
    let display = tracker.subscribe();
    tracker.start();

    // When: 61.5 seconds pass
    sleep(Duration::from_millis(61_500)).await;

    // Then: The last tick (at 61s) rendered 01:01
    assert_eq!(*display.borrow(), "01:01");
    assert_eq!(tracker.display(), "01:01");
}

/// WHAT: Pausing freezes the display
/// WHY: No tick may run while paused
#[tokio::test(start_paused = true)]
async fn given_paused_tracker_when_time_passes_then_display_frozen() {
    // Given: A tracker paused after 3.5s
    let mut tracker = ElapsedTracker::new();
    tracker.start();
    sleep(Duration::from_millis(3500)).await;
    tracker.pause();

    // When: Ten more seconds pass
    sleep(Duration::from_secs(10)).await;

    // Then: Display and elapsed stay at the paused value
    assert_eq!(tracker.display(), "00:03");
    assert_eq!(tracker.elapsed(), Duration::from_millis(3500));
    assert_eq!(tracker.phase(), TrackerPhase::Paused);
}

/// WHAT: Reset always yields 00:00
/// WHY: Stop must clear the counter whatever state it was in
#[tokio::test(start_paused = true)]
async fn given_any_phase_when_reset_then_display_zero() {
    // Given: Trackers left idle, running and paused
    let mut idle = ElapsedTracker::new();

    let mut running = ElapsedTracker::new();
    running.start();
    sleep(Duration::from_millis(4200)).await;

    let mut paused = ElapsedTracker::new();
    paused.start();
    sleep(Duration::from_millis(2100)).await;
    paused.pause();

    // When: Each is reset
    idle.reset();
    running.reset();
    paused.reset();

    // Then: All show 00:00 with nothing accumulated
    for tracker in [&idle, &running, &paused] {
        assert_eq!(tracker.display(), ZERO_DISPLAY);
        assert_eq!(tracker.elapsed(), Duration::ZERO);
        assert_eq!(tracker.phase(), TrackerPhase::Idle);
    }

    // And: No tick resurrects the old value
    sleep(Duration::from_secs(3)).await;
    assert_eq!(running.display(), ZERO_DISPLAY);
}

/// WHAT: Out-of-order pause and resume are ignored
/// WHY: The tracker guards its own transitions instead of trusting callers
#[tokio::test(start_paused = true)]
async fn given_wrong_phase_when_pausing_or_resuming_then_no_op() {
    // Given: An idle tracker
    let mut tracker = ElapsedTracker::new();

    // When: Paused while idle
    tracker.pause();

    // Then: Still idle
    assert_eq!(tracker.phase(), TrackerPhase::Idle);

    // When: Resumed while running
    tracker.start();
    sleep(Duration::from_millis(2000)).await;
    tracker.resume();
    tracker.start();
    sleep(Duration::from_millis(1000)).await;

    // Then: The epoch was not moved
    assert_eq!(tracker.phase(), TrackerPhase::Running);
    assert_eq!(tracker.elapsed(), Duration::from_millis(3000));
}

/// WHAT: MM:SS formatting boundaries
/// WHY: Seconds floor, minutes are not wrapped into hours
#[test]
fn given_boundary_durations_when_formatting_then_zero_padded_mm_ss() {
    assert_eq!(format_elapsed(Duration::ZERO), "00:00");
    assert_eq!(format_elapsed(Duration::from_millis(999)), "00:00");
    assert_eq!(format_elapsed(Duration::from_millis(59_999)), "00:59");
    assert_eq!(format_elapsed(Duration::from_millis(60_000)), "01:00");
    assert_eq!(format_elapsed(Duration::from_secs(6000)), "100:00");
}
