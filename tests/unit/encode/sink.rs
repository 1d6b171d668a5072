use super::*;

fn cfg(start: u64, end: u64) -> SinkConfig {
    SinkConfig {
        canvas: Canvas {
            width: 4,
            height: 4,
        },
        fps: Fps::integer(30).unwrap(),
        frames: FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap(),
    }
}

fn empty_frame(at: u64) -> FrameOutput {
    FrameOutput {
        frame: FrameIndex(at),
        canvas: Canvas {
            width: 4,
            height: 4,
        },
        layers: vec![],
    }
}

#[test]
fn in_memory_sink_keeps_frames_and_resets_on_begin() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(0, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &empty_frame(0)).unwrap();
    sink.push_frame(FrameIndex(1), &empty_frame(1)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames().len(), 2);
    assert!(sink.is_ended());

    sink.begin(cfg(5, 6)).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
    assert_eq!(sink.config(), Some(cfg(5, 6)));
}

#[test]
fn json_lines_sink_writes_one_object_per_line() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.begin(cfg(3, 5)).unwrap();
    sink.push_frame(FrameIndex(3), &empty_frame(3)).unwrap();
    sink.push_frame(FrameIndex(4), &empty_frame(4)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let back: FrameOutput = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(back, empty_frame(4));
}

#[test]
fn json_lines_sink_rejects_out_of_order_and_unstarted() {
    let mut sink = JsonLinesSink::new(Vec::new());
    assert!(sink.push_frame(FrameIndex(0), &empty_frame(0)).is_err());

    sink.begin(cfg(0, 10)).unwrap();
    sink.push_frame(FrameIndex(2), &empty_frame(2)).unwrap();
    assert!(sink.push_frame(FrameIndex(2), &empty_frame(2)).is_err());
    assert!(sink.push_frame(FrameIndex(1), &empty_frame(1)).is_err());
    sink.push_frame(FrameIndex(3), &empty_frame(3)).unwrap();
}
