//! Application shell: the frame loop around the compositor.
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │ Application  │
//! └──────────────┘  (crossbeam chan)   │  palette     │
//!                                      │  renderer ───┼──▶ Backend
//!                                      └──────────────┘
//! ```
//!
//! The palette is owned here and handed to the renderer explicitly on
//! every frame; there is no global "current palette".

mod input;
mod messages;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers};

use crate::backend::Backend;
use crate::color::Palette;
use crate::error::Result;
use crate::render::{Drawable, FrameStats, Renderer};
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info};
use std::time::Duration;

/// Configuration for the [`Application`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Erase and redraw the border before every frame.
    ///
    /// When false, frames draw over what the previous frame left.
    pub clear_each_frame: bool,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to spawn the input thread.
    pub spawn_input: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clear_each_frame: true,
            input_poll_timeout: Duration::from_millis(10),
            spawn_input: false,
        }
    }
}

/// Owns the renderer, the palette and the input channel.
pub struct Application<B: Backend> {
    /// Configuration.
    config: AppConfig,
    /// The compositor and its backend.
    renderer: Renderer<B>,
    /// The active palette.
    palette: Palette,
    /// Input event receiver.
    input_rx: Receiver<InputEvent>,
    /// Input event sender, cloned into the input thread.
    input_tx: Sender<InputEvent>,
    /// Input thread handle.
    input_actor: Option<InputActor>,
    /// Frames presented so far.
    frame_count: u64,
    /// Whether the application is running.
    running: bool,
}

impl<B: Backend> Application<B> {
    /// Create an application with default configuration.
    pub fn new(backend: B, palette: Palette) -> Result<Self> {
        Self::with_config(backend, palette, AppConfig::default())
    }

    /// Create an application with custom configuration.
    ///
    /// Every pair of `palette` is pushed to the backend.
    pub fn with_config(mut backend: B, palette: Palette, config: AppConfig) -> Result<Self> {
        palette.initialize_all(&mut backend)?;

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input_actor = config
            .spawn_input
            .then(|| InputActor::spawn(input_tx.clone(), config.input_poll_timeout));

        let (width, height) = backend.size();
        info!(
            "app: started {width}x{height} with {} pairs, input thread: {}",
            palette.len(),
            input_actor.is_some()
        );

        Ok(Self {
            config,
            renderer: Renderer::new(backend),
            palette,
            input_rx,
            input_tx,
            input_actor,
            frame_count: 0,
            running: true,
        })
    }

    /// Run one frame: `clear → render_objects → present`.
    ///
    /// `clear` is skipped when [`AppConfig::clear_each_frame`] is false.
    pub fn frame(&mut self, objects: &[&dyn Drawable]) -> Result<FrameStats> {
        if self.config.clear_each_frame {
            self.renderer.clear();
        }
        let stats = self.renderer.render_objects(objects, &self.palette)?;
        self.renderer.present()?;
        self.frame_count += 1;
        Ok(stats)
    }

    /// The configuration.
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The active palette.
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The active palette, mutably.
    ///
    /// Pairs registered here reach the backend on
    /// [`Application::initialize_palette`].
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Replace the palette and push its pairs to the backend.
    pub fn set_palette(&mut self, palette: Palette) -> Result<()> {
        self.palette = palette;
        self.initialize_palette()
    }

    /// Push every pair of the active palette to the backend.
    pub fn initialize_palette(&mut self) -> Result<()> {
        debug!("app: initializing {} pairs", self.palette.len());
        self.palette.initialize_all(self.renderer.backend_mut())
    }

    /// The compositor.
    pub const fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    /// The compositor, mutably.
    pub fn renderer_mut(&mut self) -> &mut Renderer<B> {
        &mut self.renderer
    }

    /// Frames presented so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// A sender feeding this application's input queue.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input_tx.clone()
    }

    /// Poll for the next input event without blocking.
    ///
    /// The application holds a sender itself, so the queue stays open
    /// after the input thread and every handed-out sender are gone.
    pub fn poll_input(&self) -> Option<InputEvent> {
        self.input_rx.try_recv().ok()
    }

    /// Drain all pending input events.
    pub fn drain_input(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.poll_input() {
            events.push(event);
        }
        events
    }

    /// Check if the application is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the frame loop to stop.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop the input thread and release the backend.
    pub fn shutdown(&mut self) -> Result<()> {
        self.running = false;
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        info!("app: shutting down after {} frames", self.frame_count);
        self.renderer.backend_mut().destroy()
    }
}

impl<B: Backend> Drop for Application<B> {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
    }
}
