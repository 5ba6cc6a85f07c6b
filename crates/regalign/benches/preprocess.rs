use criterion::{black_box, criterion_group, criterion_main, Criterion};

use regalign::core::ImageView;
use regalign::{preprocess, PreprocessParams};

fn synthetic_frame(width: usize, height: usize) -> Vec<f32> {
    (0..width * height)
        .map(|i| {
            let x = (i % width) as f32;
            let y = (i / width) as f32;
            (x * 0.7 + y * 1.3).sin() * 80.0 + 128.0
        })
        .collect()
}

fn bench_preprocess(c: &mut Criterion) {
    let data = synthetic_frame(512, 512);
    let image = ImageView::new(512, 512, &data).expect("bench image");
    let params = PreprocessParams::default();

    c.bench_function("preprocess_512_no_reference", |b| {
        b.iter(|| preprocess(black_box(&image), &params, None).expect("preprocess"))
    });

    let reference = preprocess(&image, &params, None).expect("reference");
    c.bench_function("preprocess_512_matched", |b| {
        b.iter(|| {
            preprocess(black_box(&image), &params, Some(&reference.as_view()))
                .expect("preprocess")
        })
    });
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
