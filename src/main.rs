//! quartz - voxel client HUD and frame orchestration demo
//!
//! Opens a window and renders a cleared world pass every frame. The HUD is laid out
//! again whenever the window size or the debug screen changes.

mod config;
mod scene;

use anyhow::{Context, Result};
use config::{ClientConfig, DEFAULT_CLIENT_PATH};
use glam::IVec2;
use quartz_core::{Clock, ClientEvent, EventBus, SystemClock};
use quartz_render::{FrameOrchestrator, FrameOutcome, WgpuBackend};
use quartz_ui::{Font, GuiContext, OverlayBuilder};
use quartz_world::Game;
use std::{env, path::PathBuf, sync::Arc};
use tracing::info;
use winit::{
    dpi::PhysicalSize,
    event::{Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const FOV_STEP_DEGREES: f32 = 5.0;
const MIN_FOV_DEGREES: f32 = 30.0;
const MAX_FOV_DEGREES: f32 = 110.0;
const GLYPH_WIDTH: i32 = 5;
const SKY_COLOR: wgpu::Color = wgpu::Color {
    r: 0.47,
    g: 0.65,
    b: 1.0,
    a: 1.0,
};

fn main() -> Result<()> {
    // WARN by default; override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting quartz v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config = ClientConfig::load_from_path(&cli.config_path);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("quartz")
            .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
            .build(&event_loop)?,
    );

    let mut app = App::new(window, config, cli.config_path, cli.debug)?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, window_id } if window_id == app.window.id() => match event {
            WindowEvent::CloseRequested => {
                app.save_config();
                elwt.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => app.handle_key(&event),
            WindowEvent::Resized(size) => {
                app.orchestrator
                    .with_backend(|backend| backend.resize(size.width, size.height));
            }
            WindowEvent::RedrawRequested => app.redraw(),
            _ => {}
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}

/// Keys the client reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    ToggleDebugScreen,
    NarrowFov,
    WidenFov,
    ReloadWorld,
}

impl KeyAction {
    fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::F3 => Some(Self::ToggleDebugScreen),
            KeyCode::BracketLeft => Some(Self::NarrowFov),
            KeyCode::BracketRight => Some(Self::WidenFov),
            KeyCode::F5 => Some(Self::ReloadWorld),
            _ => None,
        }
    }
}

fn step_fov(current: f32, action: KeyAction) -> f32 {
    let step = match action {
        KeyAction::NarrowFov => -FOV_STEP_DEGREES,
        KeyAction::WidenFov => FOV_STEP_DEGREES,
        _ => 0.0,
    };
    (current + step).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES)
}

/// Redoes the HUD layout only when its inputs change.
#[derive(Debug, Default)]
struct HudLayout {
    viewport: Option<IVec2>,
    debug_shown: bool,
    batches: usize,
}

impl HudLayout {
    /// Lay the HUD out again if the viewport or the debug screen changed since the
    /// last call. Returns whether it did.
    fn refresh(&mut self, overlay: &OverlayBuilder, game: &Game, viewport: IVec2) -> bool {
        let debug_shown = overlay.debug_screen_shown();
        if self.viewport == Some(viewport) && self.debug_shown == debug_shown {
            return false;
        }
        self.viewport = Some(viewport);
        self.debug_shown = debug_shown;
        self.batches = overlay.meshes(game, viewport).len();
        tracing::debug!(batches = self.batches, ?viewport, "HUD laid out");
        true
    }
}

struct App {
    window: Arc<Window>,
    game: Arc<Game>,
    bus: EventBus,
    orchestrator: FrameOrchestrator<WgpuBackend>,
    overlay: OverlayBuilder,
    hud: HudLayout,
    config: ClientConfig,
    config_path: PathBuf,
}

impl App {
    /// `force_debug` shows the debug screen without persisting it to the config.
    fn new(
        window: Arc<Window>,
        config: ClientConfig,
        config_path: PathBuf,
        force_debug: bool,
    ) -> Result<Self> {
        let mut backend = pollster::block_on(WgpuBackend::new(Arc::clone(&window)))
            .context("Failed to initialize GPU backend")?;
        backend.set_clear_color(SKY_COLOR);
        let game = Arc::new(scene::demo_game());
        let bus = EventBus::new();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

        let orchestrator = FrameOrchestrator::new(
            backend,
            Box::new(scene::DemoFactory::default()),
            Arc::clone(&game),
            bus.clone(),
            Arc::clone(&clock),
            config.orchestrator(),
        )
        .context("Failed to build frame orchestrator")?;

        let mut settings = config.overlay();
        settings.show_debug_screen |= force_debug;
        let overlay = OverlayBuilder::new(GuiContext::new(Font::ascii(GLYPH_WIDTH)), clock, settings);

        Ok(Self {
            window,
            game,
            bus,
            orchestrator,
            overlay,
            hud: HudLayout::default(),
            config,
            config_path,
        })
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if !event.state.is_pressed() || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(action) = KeyAction::from_key(code) else {
            return;
        };

        match action {
            KeyAction::ToggleDebugScreen => {
                self.config.show_debug_screen = self.overlay.toggle_debug_screen();
                self.bus.publish(ClientEvent::DebugScreenToggled);
            }
            KeyAction::NarrowFov | KeyAction::WidenFov => {
                self.config.fov_degrees = step_fov(self.config.fov_degrees, action);
                info!(fov = self.config.fov_degrees, "Field of view changed");
                self.bus.publish(ClientEvent::FieldOfViewChanged {
                    fov_degrees: self.config.fov_degrees,
                });
            }
            KeyAction::ReloadWorld => self.bus.publish(ClientEvent::WorldChanged),
        }
    }

    fn redraw(&mut self) {
        if let FrameOutcome::Skipped(failure) = self.orchestrator.draw_frame() {
            tracing::debug!(?failure, "Frame skipped");
        }
        self.overlay
            .set_render_statistics(self.orchestrator.statistics());

        let size = self.window.inner_size();
        let viewport = IVec2::new(size.width as i32, size.height as i32);
        self.hud.refresh(&self.overlay, &self.game, viewport);
    }

    fn save_config(&self) {
        if let Err(err) = self.config.save_to_path(&self.config_path) {
            tracing::warn!(%err, path = %self.config_path.display(), "Failed to save client config");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    config_path: PathBuf,
    debug: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config_path: PathBuf::from(DEFAULT_CLIENT_PATH),
            debug: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config_path = PathBuf::from(path);
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--debug" => opts.debug = true,
                other => {
                    tracing::error!(arg = other, "Unknown argument");
                }
            }
        }

        opts
    }
}
