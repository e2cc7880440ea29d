//! Native platform layer
//!
//! Owns the winit window and event loop, turns keyboard events into
//! `TickInput`, runs the fixed-timestep simulation and paces frames.

pub mod input;
pub mod time;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, anyhow};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::assets::{AssetPaths, Assets};
use crate::consts::{FRAME_TARGET_MS, SCREEN_HEIGHT, SCREEN_WIDTH, SIM_DT};
use crate::journal::GameLog;
use crate::renderer::{GlyphAtlas, HudOptions, RenderState, build_scene};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

use input::{Action, InputState, action_for};
use time::{FixedStep, FpsCounter};

pub const WINDOW_TITLE: &str = "Space Shooter";

/// Everything the app needs to start a run
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: Settings,
    pub assets: AssetPaths,
    pub seed: u64,
}

/// Window plus the GPU state bound to it
struct Graphics {
    window: Arc<Window>,
    renderer: RenderState,
    atlas: GlyphAtlas,
}

struct App<'a> {
    config: AppConfig,
    journal: &'a mut GameLog,
    graphics: Option<Graphics>,
    state: GameState,
    input: InputState,
    step: FixedStep,
    fps: FpsCounter,
    last_frame: Option<Instant>,
    next_frame: Instant,
    /// First fatal error; ends the event loop
    error: Option<anyhow::Error>,
}

impl<'a> App<'a> {
    fn new(config: AppConfig, journal: &'a mut GameLog) -> Self {
        let state = GameState::new(config.seed);
        Self {
            config,
            journal,
            graphics: None,
            state,
            input: InputState::default(),
            step: FixedStep::default(),
            fps: FpsCounter::default(),
            last_frame: None,
            next_frame: Instant::now(),
            error: None,
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Graphics> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let assets = Assets::load(&self.config.assets)?;

        let mut renderer = pollster::block_on(RenderState::new(
            window.clone(),
            self.config.settings.present_mode(),
        ))
        .context("failed to initialize renderer")?;

        for (label, image) in assets.slot_images() {
            renderer.register_texture(&label, &image);
        }
        log::info!("Registered {} textures", renderer.texture_count());

        Ok(Graphics {
            window,
            renderer,
            atlas: assets.atlas,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(action) = action_for(code) else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;
        if action == Action::Quit {
            if pressed {
                log::info!("Quit requested");
                event_loop.exit();
            }
            return;
        }
        self.input.handle(action, pressed, event.repeat);
    }

    /// Run pending ticks, journal their events, then draw
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(SIM_DT, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);

        for _ in 0..self.step.advance(dt) {
            let input = self.input.tick_input();
            tick(&mut self.state, &input, SIM_DT);
            self.input.clear_edges();
        }

        for event in std::mem::take(&mut self.state.events) {
            self.journal.record(&event);
        }

        self.fps.record(now);

        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        let options = HudOptions {
            show_fps: self.config.settings.show_fps,
            fps: self.fps.fps(),
        };
        let list = build_scene(&self.state, &graphics.atlas, &options);

        match graphics.renderer.render(&list) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                graphics.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
            }
            Err(e) => log::warn!("Skipping frame: {:?}", e),
        }
    }
}

impl ApplicationHandler for App<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                log::info!("Starting run with seed {}", self.config.seed);
                self.graphics = Some(graphics);
                self.next_frame = Instant::now();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match &self.graphics {
            Some(graphics) if graphics.window.id() == window_id => {}
            _ => return,
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(graphics) = self.graphics.as_mut() {
                    graphics.renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = &self.graphics else {
            return;
        };
        let now = Instant::now();
        if now >= self.next_frame {
            graphics.window.request_redraw();
            self.next_frame = now + Duration::from_millis(FRAME_TARGET_MS);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Open the window and run until the player quits or a fatal error occurs
pub fn run(config: AppConfig, journal: &mut GameLog) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config, journal);
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
