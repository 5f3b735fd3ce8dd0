use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Point;

fn small_opts() -> RenderOpts {
    RenderOpts::default().with_canvas(Canvas::new(48, 48).unwrap())
}

fn dataset(n: usize) -> PathDataset {
    (0..n)
        .map(|i| Point::new(i as f64, (i * i) as f64))
        .collect()
}

#[test]
fn empty_dataset_is_rejected() {
    assert!(RenderSession::new(PathDataset::default(), small_opts()).is_err());
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = small_opts().with_frame_interval(Duration::ZERO);
    assert!(RenderSession::new(dataset(2), opts).is_err());
}

#[test]
fn pass_pushes_n_plus_one_ordered_frames() {
    let mut session = RenderSession::new(dataset(4), small_opts()).unwrap();
    let mut sink = InMemorySink::new();
    let stats = session.render_pass(&mut sink).unwrap();

    assert_eq!(stats.frames_rendered, 5);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    assert!(sink.is_finished());

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (48, 48));
    assert_eq!(cfg.frame_interval, DEFAULT_FRAME_INTERVAL);
}

#[test]
fn pass_frames_are_distinct_states() {
    let mut session = RenderSession::new(dataset(3), small_opts()).unwrap();
    let mut sink = InMemorySink::new();
    session.render_pass(&mut sink).unwrap();
    let frames = sink.frames();
    for w in frames.windows(2) {
        assert_ne!(w[0].1.data, w[1].1.data, "frames {} and {}", w[0].0.0, w[1].0.0);
    }
}

#[test]
fn still_is_the_final_frame() {
    let mut session = RenderSession::new(dataset(3), small_opts()).unwrap();
    let still = session.render_still().unwrap();
    let last = session.render_frame(FrameIndex(3)).unwrap();
    assert_eq!(still, last);
    assert_eq!(session.last_frame(), FrameIndex(3));
}

#[test]
fn viewport_is_fixed_for_the_session() {
    let session = RenderSession::new(dataset(3), small_opts()).unwrap();
    let vp = session.viewport();
    assert_eq!(vp, Viewport::from_dataset(session.dataset()).unwrap());
    let a = session.plan_frame(FrameIndex(0), small_opts().canvas).unwrap();
    let b = session.plan_frame(FrameIndex(3), small_opts().canvas).unwrap();
    assert_eq!(a.items.first(), b.items.first());
}

#[test]
fn opts_builders_apply() {
    let opts = RenderOpts::default()
        .with_frame_interval(Duration::from_millis(40))
        .with_artifact_path("/tmp/x.gif");
    assert_eq!(opts.frame_interval, Duration::from_millis(40));
    assert_eq!(opts.artifact_path, PathBuf::from("/tmp/x.gif"));
    assert_eq!(
        RenderOpts::default().artifact_path,
        PathBuf::from(DEFAULT_ARTIFACT_PATH)
    );
}
