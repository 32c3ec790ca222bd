use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strip_colors::{analyze, AnalysisConfig, Region, RegionSet, RgbaBuffer};

/// Synthetic 256x256 strip photo with four 64x64 patches
fn synthetic_photo() -> (RgbaBuffer, RegionSet) {
    let mut photo = RgbaBuffer::new(256, 256);
    let a = Region::new(16, 16, 64, 64);
    let b = Region::new(96, 16, 64, 64);
    let test = Region::new(16, 96, 64, 64);
    let control = Region::new(96, 96, 64, 64);

    photo.fill_region(a, [190, 45, 40]);
    photo.fill_region(b, [45, 60, 185]);
    photo.fill_region(test, [180, 60, 55]);
    photo.fill_region(control, [235, 235, 235]);

    (photo, RegionSet::new(a, b, test, control))
}

fn benchmark_strip_analysis(c: &mut Criterion) {
    let (photo, regions) = synthetic_photo();
    let config = AnalysisConfig::default();

    c.bench_function("analyze_64x64_regions", |b| {
        b.iter(|| analyze(black_box(&photo), black_box(&regions), black_box(&config)).unwrap())
    });
}

criterion_group!(benches, benchmark_strip_analysis);
criterion_main!(benches);
