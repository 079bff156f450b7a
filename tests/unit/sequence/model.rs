use super::*;

fn pal() -> Palette {
    Palette::new(vec![[0, 0, 0], [255, 255, 255]]).unwrap()
}

#[test]
fn palette_rgb_bytes_roundtrip_and_limits() {
    let p = Palette::from_rgb_bytes(&[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(p.len(), 2);
    assert_eq!(p.get(1), Some([4, 5, 6]));
    assert_eq!(p.get(2), None);
    assert_eq!(p.to_rgb_bytes(), vec![1, 2, 3, 4, 5, 6]);

    assert!(Palette::from_rgb_bytes(&[1, 2]).is_err());
    assert!(Palette::new(vec![]).is_err());
    assert!(Palette::new(vec![[0, 0, 0]; 257]).is_err());
}

#[test]
fn frame_requires_matching_index_count() {
    let bounds = FrameBounds {
        left: 0,
        top: 0,
        width: 3,
        height: 2,
    };
    assert!(Frame::new(bounds, vec![0; 6], None, None).is_ok());
    assert!(matches!(
        Frame::new(bounds, vec![0; 5], None, None),
        Err(CaptionError::DimensionMismatch(_))
    ));
}

#[test]
fn push_frame_rejects_frames_outside_canvas() {
    let mut seq = Sequence::new(10, 10);
    let inside = Frame::new(
        FrameBounds {
            left: 5,
            top: 5,
            width: 5,
            height: 5,
        },
        vec![0; 25],
        None,
        None,
    )
    .unwrap();
    let outside = Frame::new(
        FrameBounds {
            left: 6,
            top: 0,
            width: 5,
            height: 5,
        },
        vec![0; 25],
        None,
        None,
    )
    .unwrap();
    seq.push_frame(inside, FrameMeta::default()).unwrap();
    assert!(seq.push_frame(outside, FrameMeta::default()).is_err());
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.meta().len(), 1);
}

#[test]
fn effective_palette_prefers_local_table() {
    let global = Palette::new(vec![[9, 9, 9]]).unwrap();
    let mut seq = Sequence::new(2, 2).with_global_palette(Some(global.clone()));
    seq.push_frame(Frame::filled(2, 2, 0, None), FrameMeta::default())
        .unwrap();
    seq.push_frame(Frame::filled(2, 2, 1, Some(pal())), FrameMeta::default())
        .unwrap();
    assert_eq!(seq.effective_palette(0), Some(&global));
    assert_eq!(seq.effective_palette(1), Some(&pal()));
    assert_eq!(seq.effective_palette(2), None);
}

#[test]
fn raster_expands_indices_and_transparency() {
    let mut seq = Sequence::new(2, 1);
    let frame = Frame::new(
        FrameBounds {
            left: 0,
            top: 0,
            width: 2,
            height: 1,
        },
        vec![1, 0],
        Some(pal()),
        Some(0),
    )
    .unwrap();
    seq.push_frame(frame, FrameMeta::default()).unwrap();
    let r = seq.raster(0).unwrap();
    assert_eq!(r.data(), &[255, 255, 255, 255, 0, 0, 0, 0]);
    assert!(seq.raster(1).is_err());
}

#[test]
fn replace_frame_enforces_bounds() {
    let mut seq = Sequence::new(4, 4);
    seq.push_frame(Frame::filled(4, 4, 0, Some(pal())), FrameMeta::default())
        .unwrap();

    seq.replace_frame(0, Frame::filled(4, 4, 1, Some(pal())))
        .unwrap();
    assert!(seq.frames()[0].indices().iter().all(|&i| i == 1));

    let err = seq
        .replace_frame(0, Frame::filled(3, 4, 1, Some(pal())))
        .unwrap_err();
    assert!(matches!(err, CaptionError::DimensionMismatch(_)));
    assert!(seq.replace_frame(1, Frame::filled(4, 4, 1, None)).is_err());
}

#[test]
fn validate_accepts_well_formed_sequence() {
    let mut seq = Sequence::new(4, 4);
    seq.push_frame(
        Frame::filled(4, 4, 0, Some(pal())),
        FrameMeta {
            delay_cs: 5,
            disposal: Disposal::Background,
        },
    )
    .unwrap();
    assert!(seq.validate().is_ok());
}
