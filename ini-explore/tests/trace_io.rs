use std::path::PathBuf;

use initiative_core::PrngSeed;
use initiative_explore::io::{
    read_trace_from_path, write_trace_to_path, TraceFormat, TraceIoConfig, TraceIoError,
};
use initiative_explore::trace::{
    Outcome, RangeDraw, TieBreakDecision, Trace, TraceEvent, TraceMeta,
};

fn temp_path(suffix: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let unique = format!(
        "initiative_explore_trace_io_{}_{}_{}{}",
        std::process::id(),
        std::thread::current().name().unwrap_or("thread"),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        suffix
    );
    p.push(unique.replace("::", "_"));
    p
}

fn sample_trace() -> Trace {
    let mut trace = Trace::new(TraceMeta {
        seed: PrngSeed::new([1, 2, 3, 4]),
        scenario: "roundtrip".to_string(),
    });

    trace.record(TraceEvent::RangeDraw(RangeDraw {
        tag: Some("speed_tie".to_string()),
        site_id: Some(7),
        range: 2,
        value: 1,
    }));
    trace.record(TraceEvent::Outcome(Outcome::CoinFlip {
        numerator: 1,
        denominator: 2,
        result: false,
    }));
    trace.record(TraceEvent::RangeDraw(RangeDraw {
        tag: None,
        site_id: None,
        range: 3,
        value: 0,
    }));
    trace.record(TraceEvent::TieBreak(TieBreakDecision {
        group_len: 3,
        order: vec![2, 0, 1],
    }));

    trace
}

fn roundtrip(format: TraceFormat, suffix: &str) -> Trace {
    let trace = sample_trace();
    let path = temp_path(suffix);

    write_trace_to_path(&path, &trace, TraceIoConfig { format }).unwrap();
    let read_back = read_trace_from_path(&path, TraceIoConfig { format }).unwrap();

    let _ = std::fs::remove_file(&path);
    read_back
}

/// Roundtrip a trace through JSON encoding.
#[test]
fn json_roundtrip() {
    assert_eq!(roundtrip(TraceFormat::Json, ".json"), sample_trace());
}

/// Roundtrip a trace through postcard encoding.
#[test]
fn postcard_roundtrip() {
    assert_eq!(roundtrip(TraceFormat::Postcard, ".bin"), sample_trace());
}

/// JSON traces stay readable: the seed and event kinds are visible as text.
#[test]
fn json_trace_is_human_readable() {
    let path = temp_path(".json");
    write_trace_to_path(&path, &sample_trace(), TraceIoConfig::default()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert!(text.contains("\"scenario\": \"roundtrip\""));
    assert!(text.contains("RangeDraw"));
    assert!(text.contains("speed_tie"));
}

/// Reading a missing file or a file in the wrong format reports the cause.
#[test]
fn read_errors_are_reported() {
    let missing = temp_path(".json");
    match read_trace_from_path(&missing, TraceIoConfig::default()) {
        Err(TraceIoError::Read { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected a read error, got {other:?}"),
    }

    let garbage = temp_path(".bin");
    std::fs::write(&garbage, b"not a trace").unwrap();
    let err = read_trace_from_path(&garbage, TraceIoConfig::for_path(&garbage)).unwrap_err();
    let _ = std::fs::remove_file(&garbage);
    assert!(matches!(
        err,
        TraceIoError::Decode {
            format: TraceFormat::Postcard,
            ..
        }
    ));
}

/// A file whose draws could never be replayed is refused on load.
#[test]
fn out_of_range_draw_is_refused() {
    let mut trace = sample_trace();
    trace.record(TraceEvent::RangeDraw(RangeDraw {
        tag: None,
        site_id: None,
        range: 4,
        value: 9,
    }));
    let path = temp_path(".json");
    write_trace_to_path(&path, &trace, TraceIoConfig::default()).unwrap();
    let err = read_trace_from_path(&path, TraceIoConfig::default()).unwrap_err();
    let _ = std::fs::remove_file(&path);

    match err {
        TraceIoError::InvalidDraw {
            scenario,
            index,
            range,
            value,
        } => {
            assert_eq!(scenario, "roundtrip");
            assert_eq!((index, range, value), (2, 4, 9));
        }
        other => panic!("expected an invalid draw, got {other:?}"),
    }
}
