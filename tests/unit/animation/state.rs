use super::*;

#[test]
fn once_visits_n_plus_one_frames_then_stops() {
    let mut s = AnimationState::new(4, Playback::Once);
    let mut seen = vec![s.current().0];
    while s.advance() {
        seen.push(s.current().0);
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    assert_eq!(s.frames_per_pass(), 5);
    assert_eq!(s.current(), s.last());
    assert!(!s.advance());
    assert_eq!(s.current(), FrameIndex(4));
}

#[test]
fn loop_wraps_to_zero_after_last_frame() {
    let mut s = AnimationState::new(2, Playback::Loop);
    let mut seen = vec![s.current().0];
    for _ in 0..7 {
        assert!(s.advance());
        seen.push(s.current().0);
    }
    assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0, 1]);
}

#[test]
fn reset_returns_to_frame_zero() {
    let mut s = AnimationState::new(3, Playback::Once);
    s.advance();
    s.advance();
    s.reset();
    assert_eq!(s.current(), FrameIndex(0));
}

#[test]
fn empty_trajectory_has_single_frame() {
    let mut s = AnimationState::new(0, Playback::Once);
    assert_eq!(s.frames_per_pass(), 1);
    assert!(!s.advance());
}

#[test]
fn ticker_advances_once_per_elapsed_interval() {
    let t0 = Instant::now();
    let interval = Duration::from_millis(150);
    let mut ticker = FrameTicker::new(AnimationState::new(3, Playback::Loop), interval, t0);

    assert!(!ticker.poll(t0));
    assert!(!ticker.poll(t0 + Duration::from_millis(149)));
    assert_eq!(ticker.state().current(), FrameIndex(0));

    assert!(ticker.poll(t0 + interval));
    assert_eq!(ticker.state().current(), FrameIndex(1));
    assert_eq!(ticker.next_tick(), t0 + interval * 2);
}

#[test]
fn stalled_ticker_advances_a_single_frame() {
    let t0 = Instant::now();
    let interval = Duration::from_millis(10);
    let mut ticker = FrameTicker::new(AnimationState::new(5, Playback::Loop), interval, t0);
    let late = t0 + Duration::from_secs(1);
    assert!(ticker.poll(late));
    assert_eq!(ticker.state().current(), FrameIndex(1));
    assert_eq!(ticker.next_tick(), late + interval);
}
