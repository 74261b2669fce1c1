use barplot_rs::core::{
    CategorySlot, DrawRect, LinearScale, SeriesValue, StackEntry, StackSizing,
    layout_bar_stack,
};

fn rect() -> DrawRect {
    DrawRect::new(0.0, 0.0, 400.0, 240.0).expect("valid rect")
}

fn slot() -> CategorySlot {
    CategorySlot { x: 0.0, width: 30.0 }
}

/// pixel(v) = 100 - v, baseline at 100.
fn unit_scale() -> LinearScale {
    LinearScale::new((-100.0, 100.0), (200.0, 0.0)).expect("valid scale")
}

#[test]
fn flush_span_stack_rounds_only_the_outermost_ends() {
    let entries = [
        StackEntry::new(0, SeriesValue::Span(0.0, 5.0)),
        StackEntry::new(1, SeriesValue::Span(5.0, 10.0)),
        StackEntry::new(2, SeriesValue::Span(10.0, 15.0)),
    ];
    let layout = layout_bar_stack(&entries, slot(), unit_scale(), rect(), StackSizing::default());

    let bottom = layout.bars[0];
    let middle = layout.bars[1];
    let top = layout.bars[2];
    assert!(bottom.round_bottom && !bottom.round_top);
    assert!(!middle.round_bottom && !middle.round_top);
    assert!(!top.round_bottom && top.round_top);
}

#[test]
fn gapped_scalar_stack_rounds_every_bar_on_both_ends() {
    let entries = [
        StackEntry::new(0, SeriesValue::Scalar(5.0)),
        StackEntry::new(1, SeriesValue::Scalar(5.0)),
        StackEntry::new(2, SeriesValue::Scalar(5.0)),
    ];
    let sizing = StackSizing {
        stack_gap_px: 2.0,
        ..StackSizing::default()
    };
    let layout = layout_bar_stack(&entries, slot(), unit_scale(), rect(), sizing);

    for bar in &layout.bars {
        assert!(bar.round_top && bar.round_bottom);
    }
}

#[test]
fn visible_discontinuity_rounds_the_facing_ends() {
    let entries = [
        StackEntry::new(0, SeriesValue::Span(0.0, 5.0)),
        StackEntry::new(1, SeriesValue::Span(8.0, 12.0)),
    ];
    let layout = layout_bar_stack(&entries, slot(), unit_scale(), rect(), StackSizing::default());

    let lower = layout.bars[0];
    let upper = layout.bars[1];
    assert!(lower.round_top, "gap above the lower bar must round its top");
    assert!(upper.round_bottom, "gap below the upper bar must round its bottom");
}

#[test]
fn single_bar_rounds_both_ends() {
    let entries = [StackEntry::new(0, SeriesValue::Scalar(5.0))];
    let layout = layout_bar_stack(&entries, slot(), unit_scale(), rect(), StackSizing::default());
    let bar = layout.bars[0];
    assert!(bar.round_top && bar.round_bottom);
}

#[test]
fn rounding_is_recomputed_after_a_stack_rescale() {
    // Flush spans rescaled by the stack minimum stay flush after the
    // gap-preserving walk, so interior ends remain square.
    let entries = [
        StackEntry::new(0, SeriesValue::Span(0.0, 2.0)),
        StackEntry::new(1, SeriesValue::Span(2.0, 4.0)),
    ];
    let sizing = StackSizing {
        stack_min_height_px: 20.0,
        ..StackSizing::default()
    };
    let layout = layout_bar_stack(&entries, slot(), unit_scale(), rect(), sizing);

    let lower = layout.bars[0];
    let upper = layout.bars[1];
    assert!(lower.round_bottom && !lower.round_top);
    assert!(!upper.round_bottom && upper.round_top);
}

#[test]
fn silhouette_rounds_only_edges_off_the_baseline() {
    let positive_only = [
        StackEntry::new(0, SeriesValue::Scalar(5.0)),
        StackEntry::new(1, SeriesValue::Scalar(5.0)),
    ];
    let layout = layout_bar_stack(
        &positive_only,
        slot(),
        unit_scale(),
        rect(),
        StackSizing::default(),
    );
    let bounds = layout.bounds.expect("bounds");
    assert!(bounds.round_top);
    assert!(!bounds.round_bottom, "stack touches zero at its bottom edge");

    let mixed = [
        StackEntry::new(0, SeriesValue::Scalar(5.0)),
        StackEntry::new(1, SeriesValue::Scalar(-5.0)),
    ];
    let layout = layout_bar_stack(&mixed, slot(), unit_scale(), rect(), StackSizing::default());
    let bounds = layout.bounds.expect("bounds");
    assert!(bounds.round_top && bounds.round_bottom);
}

#[test]
fn forced_baseline_rounding_overrides_edge_coincidence() {
    let entries = [StackEntry::new(0, SeriesValue::Scalar(5.0))];
    let sizing = StackSizing {
        round_baseline: true,
        ..StackSizing::default()
    };
    let layout = layout_bar_stack(&entries, slot(), unit_scale(), rect(), sizing);
    let bounds = layout.bounds.expect("bounds");
    assert!(bounds.round_top && bounds.round_bottom);
}
