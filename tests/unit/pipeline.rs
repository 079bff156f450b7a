use std::sync::atomic::Ordering;

use super::*;
use crate::sequence::model::{Disposal, Frame, FrameMeta, Palette};

fn fixture_style() -> RenderStyle {
    RenderStyle {
        font_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans-Bold.ttf"),
        size_px: 20.0,
        margin_px: 25,
        bottom_offset_px: 50,
        ..RenderStyle::default()
    }
}

fn input_gif() -> Vec<u8> {
    let palette = Palette::new(vec![[40, 60, 200], [0, 0, 0], [255, 255, 255]]).unwrap();
    let mut seq = Sequence::new(100, 100).with_global_palette(Some(palette));
    for delay_cs in [5, 6, 7] {
        seq.push_frame(
            Frame::filled(100, 100, 0, None),
            FrameMeta {
                delay_cs,
                disposal: Disposal::Keep,
            },
        )
        .unwrap();
    }
    encode_gif(&seq).unwrap()
}

#[test]
fn run_produces_captioned_gif() {
    let out = CaptionPipeline::new(fixture_style())
        .run(&input_gif(), "A B C D E")
        .unwrap();
    assert!(out.report.is_clean());
    assert_eq!(out.report.frames_rendered, 3);

    let seq = decode_gif(&out.bytes).unwrap();
    assert_eq!(seq.len(), 3);
    let delays: Vec<u16> = seq.meta().iter().map(|m| m.delay_cs).collect();
    assert_eq!(delays, vec![5, 6, 7]);
}

#[test]
fn garbage_input_fails_in_fetch_stage() {
    let err = CaptionPipeline::new(fixture_style())
        .run(b"nope", "x")
        .unwrap_err();
    assert_eq!(err.stage, Stage::Fetch);
    assert!(matches!(err.source, CaptionError::Decode(_)));
    assert!(err.to_string().starts_with("fetch stage failed"));
}

#[test]
fn invalid_style_fails_in_process_stage() {
    let style = RenderStyle {
        line_spacing: 0.0,
        ..fixture_style()
    };
    let err = CaptionPipeline::new(style)
        .run(&input_gif(), "x")
        .unwrap_err();
    assert_eq!(err.stage, Stage::Process);
}

#[test]
fn unencodable_sequence_fails_in_encode_stage() {
    let mut seq = Sequence::new(4, 4);
    seq.push_frame(Frame::filled(4, 4, 0, None), FrameMeta::default())
        .unwrap();
    // No palette anywhere: processing rejects it before encode would.
    let err = CaptionPipeline::new(fixture_style())
        .run_sequence(seq, "")
        .unwrap_err();
    assert_eq!(err.stage, Stage::Process);

    let oversized = Sequence::new(70_000, 1)
        .with_global_palette(Some(Palette::new(vec![[0, 0, 0]]).unwrap()));
    let err = CaptionPipeline::new(fixture_style())
        .run_sequence(oversized, "x")
        .unwrap_err();
    assert_eq!(err.stage, Stage::Encode);
    assert!(matches!(err.source, CaptionError::DimensionMismatch(_)));
}

#[test]
fn cancelled_run_reports_process_stage() {
    let flag = Arc::new(AtomicBool::new(false));
    let pipeline = CaptionPipeline::new(fixture_style()).with_cancel_flag(flag.clone());
    flag.store(true, Ordering::Relaxed);
    let err = pipeline.run(&input_gif(), "x").unwrap_err();
    assert_eq!(err.stage, Stage::Process);
    assert!(matches!(err.source, CaptionError::Cancelled));
}

#[test]
fn run_to_file_writes_output() {
    let dir = std::env::temp_dir().join(format!("gifcaption-pipeline-{}", std::process::id()));
    let path = dir.join("captioned.gif");
    let _ = std::fs::remove_dir_all(&dir);

    let report = CaptionPipeline::new(fixture_style())
        .run_to_file(&input_gif(), "hello there", &path)
        .unwrap();
    assert_eq!(report.frames_rendered, 3);
    let written = std::fs::read(&path).unwrap();
    assert_eq!(decode_gif(&written).unwrap().len(), 3);

    let _ = std::fs::remove_dir_all(&dir);
}
