//! Gallery: a sprite you can steer around a real terminal.
//!
//! Demonstrates:
//! - Loading a surface from a TOML document
//! - A palette built from a configuration file (first argument, optional)
//! - Priority ordering, border clipping and labels on the border ring
//! - The input thread feeding the frame loop
//!
//! Arrow keys move the ship, `q`/`Esc`/Ctrl+C quit.
//! Run with `RUST_LOG=xo1=debug` and stderr redirected to see the log.

use std::time::Duration;
use xo1::{
    AppConfig, Application, Config, CrosstermBackend, InputEvent, KeyCode, Label, Sprite,
    Surface, SurfaceFile,
};

const SHIP: &str = r#"
[meta]
name = "ship"

[layers]
image = [" /\\ ", "/__\\", " ## "]
color = [" hh ", "hhhh", " ff "]
attr = [[[], "bold", "bold", []], [], [[], "blink", "blink", []]]
"#;

const PALETTE: &str = r#"
[palette]
pairs = [
    ["hull", "cyan"],
    ["flame", "red", "yellow"],
    ["star", "white"],
    ["title", "black", "white"],
]
"#;

fn main() -> xo1::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::from_toml_str(PALETTE)?,
    };
    let mut palette = config.palette()?;
    // The ship uses one-letter pair names.
    palette.register("h", xo1::ColorCode::CYAN, xo1::ColorCode::DEFAULT, None, true)?;
    palette.register("f", xo1::ColorCode::RED, xo1::ColorCode::YELLOW, None, true)?;

    let backend = CrosstermBackend::stdout(config.terminal.clone())?;
    let app_config = AppConfig {
        spawn_input: true,
        ..AppConfig::default()
    };
    let mut app = Application::with_config(backend, palette, app_config)?;

    let mut ship = Sprite::new(SurfaceFile::from_toml_str(SHIP)?.into_surface()?, (4, 3))
        .with_priority(2);
    let stars = Sprite::new(Surface::new(&["*   .", "  .  ", ".   *"])?, (10, 4))
        .with_anchor((30, 8))
        .with_anchor((50, 2))
        .with_priority(1);
    let title = Label::new(" xo1 gallery ", (2, 0))
        .with_color("title")
        .on_border(true);
    let mut status = Label::new("", (2, 0)).with_attr("dim").on_border(true);

    let (mut x, mut y) = (4i32, 3i32);
    while app.is_running() {
        for event in app.drain_input() {
            match event {
                event if event.is_quit() => app.stop(),
                InputEvent::Key { code, .. } => match code {
                    KeyCode::Left => x -= 1,
                    KeyCode::Right => x += 1,
                    KeyCode::Up => y -= 1,
                    KeyCode::Down => y += 1,
                    _ => {}
                },
                InputEvent::Shutdown => app.stop(),
                _ => {}
            }
        }
        ship.move_to((x, y));

        let bottom = i32::from(app.renderer().height()).saturating_sub(1);
        status.move_to((2, bottom));
        status.set_text(format!(" ship at ({x}, {y}) "));

        app.frame(&[&ship, &stars, &title, &status])?;
        std::thread::sleep(Duration::from_millis(16));
    }

    app.shutdown()
}
