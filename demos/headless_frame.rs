//! Headless frame: render one frame without a terminal and print it.
//!
//! Demonstrates:
//! - The same surface drawn under two palettes
//! - `FrameStats` from a render pass
//! - Reading back the in-memory viewport

use xo1::{
    Application, ColorCode, HeadlessBackend, Layers, Palette, Sprite, Surface,
};

fn main() -> xo1::Result<()> {
    let layers = Layers::new(&["+---+", "| o |", "+---+"]).with_color(&["aaaaa", "a b a", "aaaaa"]);
    let boxed = Surface::from_layers("box", layers)?;
    let sprite = Sprite::new(boxed, (2, 1)).with_anchor((9, 2));

    let day = Palette::with_entries([
        ("a", ColorCode::BLUE, ColorCode::WHITE),
        ("b", ColorCode::RED, ColorCode::WHITE),
    ])?;
    let night = Palette::with_entries([
        ("a", ColorCode::WHITE, ColorCode::BLACK),
        ("b", ColorCode::YELLOW, ColorCode::BLACK),
    ])?;

    let mut app = Application::new(HeadlessBackend::new(18, 6), day)?;
    let stats = app.frame(&[&sprite])?;
    println!("{stats:?}");
    for line in app.renderer().backend().lines() {
        println!("{line}");
    }

    app.set_palette(night)?;
    app.frame(&[&sprite])?;
    let backend = app.renderer().backend();
    println!(
        "pair 1 is now {:?}, cell (3, 2) uses {:?}",
        backend.color_pair(1),
        backend.style(3, 2)
    );

    app.shutdown()
}
