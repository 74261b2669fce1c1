use barplot_rs::api::{BarPlot, BarPlotConfig};
use barplot_rs::core::{
    BandScale, BarSeries, CategorySlot, DrawRect, LinearScale, SeriesValue, StackEntry,
    StackSizing, layout_bar_stack,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_single_stack_layout(c: &mut Criterion) {
    let rect = DrawRect::new(0.0, 0.0, 1920.0, 1080.0).expect("valid rect");
    let y_scale = LinearScale::new((-500.0, 500.0), (1080.0, 0.0)).expect("valid scale");
    let slot = CategorySlot { x: 10.0, width: 24.0 };
    let sizing = StackSizing {
        stack_gap_px: 2.0,
        bar_min_height_px: 4.0,
        stack_min_height_px: 16.0,
        round_baseline: false,
    };

    let entries: Vec<StackEntry> = (0..8)
        .map(|i| {
            let value = if i % 3 == 0 { -(i as f64) - 1.0 } else { i as f64 + 1.0 };
            StackEntry::new(i, SeriesValue::Scalar(value))
        })
        .collect();

    c.bench_function("single_stack_layout_8_series", |b| {
        b.iter(|| {
            let _ = layout_bar_stack(
                black_box(&entries),
                black_box(slot),
                black_box(y_scale),
                black_box(rect),
                black_box(sizing),
            );
        })
    });
}

fn bench_plot_layout_1k_categories(c: &mut Criterion) {
    let rect = DrawRect::new(0.0, 0.0, 1920.0, 1080.0).expect("valid rect");
    let x_scale = BandScale::new(1_000, (0.0, 1920.0)).expect("valid scale");
    let y_scale = LinearScale::new((-500.0, 500.0), (1080.0, 0.0)).expect("valid scale");
    let config = BarPlotConfig::new(rect)
        .expect("valid config")
        .with_stack_gap(2.0)
        .with_bar_min_height(3.0);

    let series: Vec<BarSeries> = (0..4)
        .map(|s| {
            let values: Vec<f64> = (0..1_000)
                .map(|i| {
                    let base = ((i * 7 + s * 13) % 100) as f64;
                    if (i + s) % 5 == 0 { -base } else { base }
                })
                .collect();
            BarSeries::from_scalars(format!("series-{s}"), &values).with_stack_id("load")
        })
        .collect();

    let plot = BarPlot::new(x_scale, y_scale, config)
        .expect("plot")
        .with_series(series);

    c.bench_function("plot_layout_4x1000", |b| {
        b.iter(|| {
            let layout = black_box(&plot).layout();
            black_box(layout.bar_count());
        })
    });
}

fn bench_render_frame_build(c: &mut Criterion) {
    let rect = DrawRect::new(0.0, 0.0, 1920.0, 1080.0).expect("valid rect");
    let x_scale = BandScale::new(200, (0.0, 1920.0)).expect("valid scale");
    let y_scale = LinearScale::new((-500.0, 500.0), (1080.0, 0.0)).expect("valid scale");
    let config = BarPlotConfig::new(rect)
        .expect("valid config")
        .with_stack_gap(2.0)
        .with_corner_radius(3.0);

    let series: Vec<BarSeries> = (0..3)
        .map(|s| {
            let values: Vec<f64> = (0..200).map(|i| ((i + s * 31) % 90) as f64 + 1.0).collect();
            BarSeries::from_scalars(format!("series-{s}"), &values).with_stack_id("frame")
        })
        .collect();

    let plot = BarPlot::new(x_scale, y_scale, config)
        .expect("plot")
        .with_series(series);

    c.bench_function("render_frame_3x200", |b| {
        b.iter(|| {
            let frame = black_box(&plot).build_render_frame();
            black_box(frame.figures.len());
        })
    });
}

criterion_group!(
    benches,
    bench_single_stack_layout,
    bench_plot_layout_1k_categories,
    bench_render_frame_build
);
criterion_main!(benches);
