//! Surface benchmark: construction, iteration and style resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xo1::{AttrToken, ColorCode, Layers, Palette, Surface, SurfaceFile};

fn layers(width: usize, height: usize) -> Layers {
    let image: Vec<String> = (0..height)
        .map(|y| (0..width).map(|x| char::from(b'A' + ((x + y) % 26) as u8)).collect())
        .collect();
    let color: Vec<String> = (0..height)
        .map(|y| (0..width).map(|x| if (x + y) % 2 == 0 { 'r' } else { 'g' }).collect())
        .collect();
    let attr = (0..height)
        .map(|_| (0..width).map(|x| if x % 4 == 0 { vec![AttrToken::from("bold")] } else { vec![] }).collect())
        .collect();
    Layers::new(&image).with_color(&color).with_attr(attr)
}

fn surface_construct(c: &mut Criterion) {
    let raw = layers(80, 24);
    c.bench_function("surface_construct_80x24", |b| {
        b.iter(|| Surface::from_layers("bench", black_box(raw.clone())).unwrap());
    });
}

fn surface_iterate(c: &mut Criterion) {
    let surface = Surface::from_layers("bench", layers(80, 24)).unwrap();
    c.bench_function("surface_iterate_80x24", |b| {
        b.iter(|| black_box(&surface).iter().count());
    });
}

fn surface_resolve_styles(c: &mut Criterion) {
    let surface = Surface::from_layers("bench", layers(80, 24)).unwrap();
    let palette = Palette::with_entries([
        ("r", ColorCode::RED, ColorCode::DEFAULT),
        ("g", ColorCode::GREEN, ColorCode::DEFAULT),
    ])
    .unwrap();

    c.bench_function("surface_resolve_80x24", |b| {
        b.iter(|| {
            surface
                .iter()
                .map(|textel| textel.style(&palette).unwrap().bits())
                .fold(0u32, u32::wrapping_add)
        });
    });
}

fn surface_parse(c: &mut Criterion) {
    let surface = Surface::from_layers("bench", layers(40, 12)).unwrap();
    let text = SurfaceFile::from_surface(&surface).to_toml_string().unwrap();
    c.bench_function("surface_parse_toml_40x12", |b| {
        b.iter(|| SurfaceFile::from_toml_str(black_box(&text)).unwrap());
    });
}

criterion_group!(
    benches,
    surface_construct,
    surface_iterate,
    surface_resolve_styles,
    surface_parse
);
criterion_main!(benches);
