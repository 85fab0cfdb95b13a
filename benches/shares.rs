use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_vss::shares::encode_grid;
use qr_vss::{
    RandomSource, Roster, VssConfig, generate_batch, generate_shares, reconstruct,
    reconstruct_images, render_secret,
};

fn secret() -> qr_vss::BitGrid {
    render_secret("https://example.com/api?class=101", 8, 4).expect("secret renders")
}

fn bench_generate_shares(c: &mut Criterion) {
    let secret = secret();
    let mut rng = RandomSource::Seeded(1).rng(0).expect("seeded rng");
    c.bench_function("generate_shares_296x296", |b| {
        b.iter(|| generate_shares(black_box(&secret), &mut rng))
    });
}

fn bench_reconstruct_grids(c: &mut Criterion) {
    let secret = secret();
    let pair = generate_shares(&secret, &mut RandomSource::Seeded(2).rng(0).expect("seeded rng"));
    c.bench_function("reconstruct_296x296", |b| {
        b.iter(|| reconstruct(black_box(&pair.a.grid), black_box(&pair.b.grid)))
    });
}

fn bench_reconstruct_images(c: &mut Criterion) {
    let secret = secret();
    let pair = generate_shares(&secret, &mut RandomSource::Seeded(3).rng(0).expect("seeded rng"));
    let a_png = encode_grid(&pair.a.grid, 1).expect("encode A");
    let b_png = encode_grid(&pair.b.grid, 2).expect("encode B");
    let config = VssConfig::default();
    c.bench_function("reconstruct_images_with_scan", |b| {
        b.iter(|| reconstruct_images(black_box(&a_png), black_box(&b_png), &config))
    });
}

fn bench_batch_30(c: &mut Criterion) {
    let secret = secret();
    let roster = Roster::new((0..30).map(|i| format!("s{:03}", i)).collect());
    c.bench_function("generate_batch_30_students", |b| {
        b.iter(|| generate_batch(black_box(&secret), &roster, &RandomSource::Seeded(4), 1))
    });
}

criterion_group!(
    benches,
    bench_generate_shares,
    bench_reconstruct_grids,
    bench_reconstruct_images,
    bench_batch_30
);
criterion_main!(benches);
