use cover_ean::GrayView;
use cover_ean::utils::binarization::{line_threshold, threshold_binarize};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn gradient(width: u32, height: u32) -> Vec<u8> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x + y) % 256) as u8))
        .collect()
}

fn bench_threshold_binarize_medium(c: &mut Criterion) {
    let gray = gradient(640, 480);
    let view = GrayView::new(&gray, 640, 480).unwrap();
    c.bench_function("threshold_binarize_640x480", |b| {
        b.iter(|| threshold_binarize(black_box(&view), black_box(100)))
    });
}

fn bench_threshold_binarize_large(c: &mut Criterion) {
    let gray = gradient(2000, 1500);
    let view = GrayView::new(&gray, 2000, 1500).unwrap();
    c.bench_function("threshold_binarize_2000x1500", |b| {
        b.iter(|| threshold_binarize(black_box(&view), black_box(100)))
    });
}

fn bench_line_threshold(c: &mut Criterion) {
    let line = gradient(2000, 1);
    c.bench_function("line_threshold_2000", |b| {
        b.iter(|| line_threshold(black_box(&line), black_box(32)))
    });
}

criterion_group!(
    benches,
    bench_threshold_binarize_medium,
    bench_threshold_binarize_large,
    bench_line_threshold
);
criterion_main!(benches);
