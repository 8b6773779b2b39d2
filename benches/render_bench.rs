use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quotecraft::rendering::raster::{encode_png, rasterize, Resources};
use quotecraft::{match_template, Color, QuoteData, TemplateId};

fn bench_match(c: &mut Criterion) {
    let inputs = [
        "Be kind today",
        "Hustle and grow your business",
        "The Lord is my shepherd; I shall not want.",
    ];
    c.bench_function("match_template", |b| {
        b.iter(|| {
            for text in inputs {
                black_box(match_template(black_box(text)));
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let data = QuoteData::new("Faith moves mountains")
        .with_author("Matthew 17:20")
        .with_church_name("Christ Chosen Zion City Ministry")
        .with_church_handle("@churchhandle");
    let template = quotecraft::templates::lookup_or_default(TemplateId::GradientBurst);

    c.bench_function("compose_gradient_burst", |b| b.iter(|| black_box(template.render(&data))));

    let comp = template.render(&data);
    let resources = Resources::new();
    let mut group = c.benchmark_group("raster");
    group.sample_size(10);
    group.bench_function("rasterize_1x", |b| {
        b.iter(|| rasterize(&comp, 1.0, Color::WHITE, &resources).unwrap())
    });
    let img = rasterize(&comp, 1.0, Color::WHITE, &resources).unwrap();
    group.bench_function("encode_png_1x", |b| b.iter(|| encode_png(&img).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_match, bench_render);
criterion_main!(benches);
