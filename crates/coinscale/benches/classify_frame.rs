use std::hint::black_box;

use coinscale::core::synthetic;
use coinscale::{compute_measurements, CameraConstants, CoinDetector, Contour, RectangleDetector};
use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point2;

/// A busy frame: one coin, one phone, and a spread of clutter outlines.
fn cluttered_contours() -> Vec<Contour> {
    let mut contours = vec![
        synthetic::ellipse_contour(Point2::new(300.0, 400.0), 120.0, 95.0, 12.0),
        synthetic::rectangle_contour(Point2::new(1100.0, 540.0), 320.0, 640.0, 4.0),
    ];
    for i in 0..40 {
        let x = 100.0 + 40.0 * i as f64;
        let y = 150.0 + 20.0 * (i % 7) as f64;
        contours.push(match i % 3 {
            0 => synthetic::circle_contour(Point2::new(x, y), 8.0 + i as f64),
            1 => synthetic::rectangle_contour(Point2::new(x, y + 600.0), 30.0, 60.0, 3.0 * i as f64),
            _ => synthetic::ellipse_contour(Point2::new(x, y + 300.0), 90.0, 12.0, 7.0 * i as f64),
        });
    }
    contours
}

fn bench_classify(c: &mut Criterion) {
    let contours = cluttered_contours();
    let coin = CoinDetector::default();
    let rect = RectangleDetector::default();
    let constants = CameraConstants::default();

    c.bench_function("coin_detect", |b| b.iter(|| coin.detect(black_box(&contours))));
    c.bench_function("rectangle_detect", |b| b.iter(|| rect.detect(black_box(&contours))));
    c.bench_function("classify_and_measure", |b| {
        b.iter(|| {
            let cr = coin.detect(black_box(&contours));
            let rr = rect.detect(black_box(&contours));
            compute_measurements(&cr, &rr, &constants)
        })
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
