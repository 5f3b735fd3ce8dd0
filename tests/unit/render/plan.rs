use super::*;
use crate::render::viewport::Viewport;

fn dataset() -> PathDataset {
    PathDataset::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 3.0),
    ])
}

fn layout(ds: &PathDataset) -> PlotLayout {
    PlotLayout::new(
        Viewport::from_dataset(ds).unwrap(),
        Canvas::new(120, 120).unwrap(),
    )
}

fn polyline_len(item: &DrawItem) -> usize {
    match &item.op {
        DrawOp::Polyline { points, .. } => points.len(),
        _ => panic!("expected polyline"),
    }
}

fn marker_center(item: &DrawItem) -> Point {
    match &item.op {
        DrawOp::Marker { center, .. } => *center,
        _ => panic!("expected marker"),
    }
}

#[test]
fn frame_zero_has_reference_and_endpoints_only() {
    let ds = dataset();
    let plan = compile_frame(&ds, &layout(&ds), &Palette::default(), &PlotLabels::default(), FrameIndex(0)).unwrap();
    assert!(plan.has(Role::ReferenceTrace));
    assert!(plan.has(Role::Start));
    assert!(plan.has(Role::End));
    assert!(!plan.has(Role::RevealedTrace));
    assert!(!plan.has(Role::CurrentPosition));
}

#[test]
fn revealed_trace_and_current_marker_follow_frame() {
    let ds = dataset();
    let lay = layout(&ds);
    for f in 1..=ds.len() {
        let plan = compile_frame(&ds, &lay, &Palette::default(), &PlotLabels::default(), FrameIndex(f as u64)).unwrap();
        let revealed: Vec<_> = plan.items_with(Role::RevealedTrace).collect();
        assert_eq!(revealed.len(), 1);
        assert_eq!(polyline_len(revealed[0]), f);

        let current = plan.items_with(Role::CurrentPosition).next().unwrap();
        assert_eq!(marker_center(current), lay.to_pixel(ds.points()[f - 1]));
    }
}

#[test]
fn frame_independent_elements_are_identical_across_frames() {
    let ds = dataset();
    let lay = layout(&ds);
    let palette = Palette::default();
    let a = compile_frame(&ds, &lay, &palette, &PlotLabels::default(), FrameIndex(0)).unwrap();
    let b = compile_frame(&ds, &lay, &palette, &PlotLabels::default(), FrameIndex(3)).unwrap();
    for role in [
        Role::Grid,
        Role::TickLabel,
        Role::AxisLabel,
        Role::Title,
        Role::ReferenceTrace,
        Role::Start,
        Role::End,
    ] {
        let ia: Vec<_> = a.items_with(role).collect();
        let ib: Vec<_> = b.items_with(role).collect();
        assert_eq!(ia, ib, "{role:?} changed between frames");
    }
    let reference = a.items_with(Role::ReferenceTrace).next().unwrap();
    assert_eq!(polyline_len(reference), ds.len());
}

#[test]
fn start_and_end_markers_sit_on_first_and_last_points() {
    let ds = dataset();
    let lay = layout(&ds);
    let plan = compile_frame(&ds, &lay, &Palette::default(), &PlotLabels::default(), FrameIndex(2)).unwrap();
    let start = plan.items_with(Role::Start).next().unwrap();
    let end = plan.items_with(Role::End).next().unwrap();
    assert_eq!(marker_center(start), lay.to_pixel(Point::new(0.0, 0.0)));
    assert_eq!(marker_center(end), lay.to_pixel(Point::new(3.0, 3.0)));
}

#[test]
fn markers_paint_above_traces() {
    let ds = dataset();
    let plan = compile_frame(&ds, &layout(&ds), &Palette::default(), &PlotLabels::default(), FrameIndex(2)).unwrap();
    let pos = |role| plan.items.iter().position(|i| i.role == role).unwrap();
    assert!(pos(Role::ReferenceTrace) < pos(Role::RevealedTrace));
    assert!(pos(Role::RevealedTrace) < pos(Role::CurrentPosition));
    assert!(pos(Role::CurrentPosition) < pos(Role::Start));
    assert!(pos(Role::Start) < pos(Role::End));
}

#[test]
fn frame_past_end_is_rejected() {
    let ds = dataset();
    assert!(compile_frame(&ds, &layout(&ds), &Palette::default(), &PlotLabels::default(), FrameIndex(5)).is_err());
}

#[test]
fn empty_dataset_is_rejected() {
    let ds = dataset();
    let lay = layout(&ds);
    let err = compile_frame(&PathDataset::default(), &lay, &Palette::default(), &PlotLabels::default(), FrameIndex(0));
    assert!(err.is_err());
}

fn text_of(item: &DrawItem) -> (&str, Point, TextAlign, f64) {
    match &item.op {
        DrawOp::Text {
            text,
            anchor,
            align,
            angle,
            ..
        } => (text.as_str(), *anchor, *align, *angle),
        _ => panic!("expected text"),
    }
}

#[test]
fn annotations_surround_the_plot() {
    let ds = dataset();
    let lay = layout(&ds);
    let plan = compile_frame(
        &ds,
        &lay,
        &Palette::default(),
        &PlotLabels::default(),
        FrameIndex(0),
    )
    .unwrap();
    let plot = lay.plot_rect();

    let (title, anchor, align, _) = text_of(plan.items_with(Role::Title).next().unwrap());
    assert_eq!(title, "UAV Path Visualization");
    assert_eq!(align, TextAlign::Center);
    assert!(anchor.y < plot.y0);

    let axes: Vec<_> = plan.items_with(Role::AxisLabel).map(text_of).collect();
    assert_eq!(axes.len(), 2);
    assert_eq!(axes[0].0, "X Position");
    assert!(axes[0].1.y > plot.y1);
    assert_eq!(axes[1].0, "Y Position");
    assert!(axes[1].1.x < plot.x0);
    assert!((axes[1].3 + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn every_grid_line_has_a_tick_value() {
    let ds = dataset();
    let plan = compile_frame(
        &ds,
        &layout(&ds),
        &Palette::default(),
        &PlotLabels::default(),
        FrameIndex(1),
    )
    .unwrap();
    let grid = plan.items_with(Role::Grid).count();
    let ticks: Vec<_> = plan.items_with(Role::TickLabel).map(text_of).collect();
    assert!(grid > 0);
    assert_eq!(ticks.len(), grid);
    assert!(ticks.iter().any(|(t, ..)| t.parse::<f64>() == Ok(0.0)));
    assert!(ticks.iter().all(|(t, ..)| !t.starts_with("-0.0")));
}

#[test]
fn empty_labels_are_not_drawn() {
    let ds = dataset();
    let labels = PlotLabels {
        title: String::new(),
        x_axis: String::new(),
        y_axis: String::new(),
    };
    let plan =
        compile_frame(&ds, &layout(&ds), &Palette::default(), &labels, FrameIndex(0)).unwrap();
    assert!(!plan.has(Role::Title));
    assert!(!plan.has(Role::AxisLabel));
    assert!(plan.has(Role::TickLabel));
}

#[test]
fn tick_values_use_step_precision() {
    let ticks = |step: f64| Ticks {
        step,
        values: Vec::new(),
    };
    assert_eq!(format_tick(10.0, &ticks(2.0)), "10");
    assert_eq!(format_tick(0.5, &ticks(0.5)), "0.5");
    assert_eq!(format_tick(-0.0, &ticks(1.0)), "0");
    assert_eq!(format_tick(-1e-18, &ticks(0.05)), "0.00");
    assert_eq!(format_tick(1.25, &ticks(0.05)), "1.25");
}

#[test]
fn far_from_origin_trajectory_compiles() {
    let ds = PathDataset::new(vec![Point::new(1e17, 0.0), Point::new(1e17 + 16.0, 0.0)]);
    let plan = compile_frame(
        &ds,
        &layout(&ds),
        &Palette::default(),
        &PlotLabels::default(),
        FrameIndex(2),
    )
    .unwrap();
    assert!(plan.items_with(Role::Grid).count() <= 14);
}
