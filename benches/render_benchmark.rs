//! Render pass benchmark: compositing sprites into a viewport.
//!
//! Measures `clear → render_objects → present` against both backends.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use xo1::{
    ColorCode, CrosstermBackend, Drawable, HeadlessBackend, Layers, Palette, Renderer, Sprite,
    Surface,
};

fn palette() -> Palette {
    Palette::with_entries([
        ("a", ColorCode::RED, ColorCode::BLACK),
        ("b", ColorCode::GREEN, ColorCode::BLACK),
        ("c", ColorCode::BLUE, ColorCode::WHITE),
    ])
    .unwrap()
}

/// A 16x8 block with mixed colors and some invisible cells.
fn block() -> Arc<Surface> {
    let image: Vec<String> = (0..8)
        .map(|y| (0..16).map(|x| if (x + y) % 5 == 0 { ' ' } else { '#' }).collect())
        .collect();
    let color: Vec<String> = (0..8)
        .map(|y| (0..16).map(|x| ['a', 'b', 'c'][(x + y) % 3]).collect())
        .collect();
    Arc::new(Surface::from_layers("block", Layers::new(&image).with_color(&color)).unwrap())
}

fn sprites(count: usize) -> Vec<Sprite> {
    let surface = block();
    (0..count)
        .map(|i| {
            let x = i32::try_from(i * 7 % 180).unwrap();
            let y = i32::try_from(i * 3 % 40).unwrap();
            Sprite::new(Arc::clone(&surface), (x, y)).with_priority(i32::try_from(i % 4).unwrap())
        })
        .collect()
}

fn render_headless(c: &mut Criterion) {
    let palette = palette();
    let mut group = c.benchmark_group("render_headless_200x50");

    for count in [1, 16, 64] {
        let sprites = sprites(count);
        let objects: Vec<&dyn Drawable> = sprites.iter().map(|s| s as &dyn Drawable).collect();
        let mut renderer = Renderer::new(HeadlessBackend::new(200, 50));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                renderer.clear();
                let stats = renderer.render_objects(black_box(&objects), &palette).unwrap();
                renderer.present().unwrap();
                stats
            });
        });
    }

    group.finish();
}

fn render_terminal(c: &mut Criterion) {
    let palette = palette();
    let sprites = sprites(16);
    let objects: Vec<&dyn Drawable> = sprites.iter().map(|s| s as &dyn Drawable).collect();
    let mut renderer = Renderer::new(CrosstermBackend::new(std::io::sink(), 200, 50));
    palette.initialize_all(renderer.backend_mut()).unwrap();

    // Same frame every time: after the first, the diff is empty.
    c.bench_function("render_terminal_200x50_steady", |b| {
        b.iter(|| {
            renderer.clear();
            renderer.render_objects(black_box(&objects), &palette).unwrap();
            renderer.present().unwrap();
        });
    });
}

criterion_group!(benches, render_headless, render_terminal);
criterion_main!(benches);
