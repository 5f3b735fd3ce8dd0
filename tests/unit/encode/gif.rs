use super::*;
use crate::foundation::core::Rgba8;
use std::time::Duration;

fn cfg(w: u32, h: u32) -> SinkConfig {
    SinkConfig {
        width: w,
        height: h,
        frame_interval: Duration::from_millis(150),
        background: Rgba8::from_hex(0x1C1C1C),
    }
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
    }
}

#[test]
fn writes_decodable_animation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("anim.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(cfg(8, 8)).unwrap();
    sink.push_frame(FrameIndex(0), &solid(8, 8, [255, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(8, 8, [0, 0, 255, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(2), &solid(8, 8, [0, 255, 0, 255]))
        .unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 3);

    use image::AnimationDecoder as _;
    let file = std::io::BufReader::new(File::open(&path).unwrap());
    let decoder = image::codecs::gif::GifDecoder::new(file).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 150);
    assert_eq!(frames[1].buffer().get_pixel(0, 0).0, [0, 0, 255, 255]);
}

#[test]
fn rejects_out_of_order_frames() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(GifSinkOpts::new(dir.path().join("a.gif")));
    sink.begin(cfg(4, 4)).unwrap();
    sink.push_frame(FrameIndex(1), &solid(4, 4, [0, 0, 0, 255]))
        .unwrap();
    assert!(
        sink.push_frame(FrameIndex(1), &solid(4, 4, [0, 0, 0, 255]))
            .is_err()
    );
}

#[test]
fn rejects_size_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(GifSinkOpts::new(dir.path().join("a.gif")));
    sink.begin(cfg(4, 4)).unwrap();
    assert!(
        sink.push_frame(FrameIndex(0), &solid(2, 2, [0, 0, 0, 255]))
            .is_err()
    );
}

#[test]
fn push_before_begin_fails() {
    let mut sink = GifSink::new(GifSinkOpts::new("unused.gif"));
    assert!(
        sink.push_frame(FrameIndex(0), &solid(1, 1, [0, 0, 0, 255]))
            .is_err()
    );
    assert!(sink.end().is_err());
}
