use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_vss::SHARE_POLARITY;
use qr_vss::utils::binarization::threshold_binarize;
use qr_vss::utils::resize::resize_gray_nearest;

fn bench_threshold_binarize_small(c: &mut Criterion) {
    let gray = vec![128u8; 100 * 100];
    c.bench_function("threshold_binarize_100x100", |b| {
        b.iter(|| {
            threshold_binarize(
                black_box(&gray),
                black_box(100),
                black_box(100),
                black_box(128),
                SHARE_POLARITY,
            )
        })
    });
}

fn bench_threshold_binarize_medium(c: &mut Criterion) {
    let gray = vec![128u8; 640 * 480];
    c.bench_function("threshold_binarize_640x480", |b| {
        b.iter(|| {
            threshold_binarize(
                black_box(&gray),
                black_box(640),
                black_box(480),
                black_box(128),
                SHARE_POLARITY,
            )
        })
    });
}

fn bench_resize_nearest_double(c: &mut Criterion) {
    let gray = vec![0u8; 320 * 320];
    c.bench_function("resize_gray_nearest_320_to_640", |b| {
        b.iter(|| resize_gray_nearest(black_box(&gray), 320, 320, 640, 640))
    });
}

criterion_group!(
    benches,
    bench_threshold_binarize_small,
    bench_threshold_binarize_medium,
    bench_resize_nearest_double
);
criterion_main!(benches);
