//! glint-search: AI search interface demo.
//!
//! A GPU-rendered desktop app with a home page, a results page whose AI
//! summary types itself out progressively, and a slide-in history sidebar.
//!
//! Uses vello/wgpu for rendering; all data is mocked locally.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, Renderer, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Fullscreen, Window};

use vello::wgpu;

use glint_search::app::AppCore;
use glint_search::model::QueryKind;
use glint_search::paths::GlintPaths;
use glint_search::text::Fonts;
use glint_search::theme::ThemeTokens;
use glint_search::{logging, theme};

/// AI search interface demo
#[derive(Parser, Debug)]
#[command(name = "glint-search", version, about = "AI search interface demo")]
struct Args {
    /// Start in windowed mode instead of fullscreen
    #[arg(short, long)]
    windowed: bool,

    /// Submit this query on startup and open the results page directly
    #[arg(short, long)]
    query: Option<String>,
}

#[derive(Debug)]
enum RenderState {
    Active {
        surface: Box<RenderSurface<'static>>,
        valid_surface: bool,
        window: Arc<Window>,
    },
    Suspended(Option<Arc<Window>>),
}

struct App {
    context: RenderContext,
    renderers: Vec<Option<Renderer>>,
    state: RenderState,
    scene: Scene,
    core: AppCore,
    fonts: Fonts,
    windowed: bool,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let RenderState::Suspended(cached_window) = &mut self.state else {
            return;
        };

        let window = cached_window
            .take()
            .unwrap_or_else(|| create_window(event_loop, self.windowed));

        let size = window.inner_size();
        let surface_future = self.context.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        );
        let surface = pollster::block_on(surface_future).expect("Error creating surface");

        self.renderers
            .resize_with(self.context.devices.len(), || None);
        self.renderers[surface.dev_id]
            .get_or_insert_with(|| create_renderer(&self.context, &surface));

        self.state = RenderState::Active {
            surface: Box::new(surface),
            valid_surface: true,
            window,
        };
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let RenderState::Active { window, .. } = &self.state {
            self.state = RenderState::Suspended(Some(window.clone()));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (surface, valid_surface, window) = match &mut self.state {
            RenderState::Active {
                surface,
                valid_surface,
                window,
            } if window.id() == window_id => (surface, valid_surface, window.clone()),
            _ => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match logical_key {
                // Escape closes overlays first; with nothing open it exits.
                Key::Named(NamedKey::Escape) => {
                    if !self.core.on_escape(Instant::now()) {
                        event_loop.exit();
                    }
                }
                Key::Named(NamedKey::Enter) => self.core.on_enter(Instant::now()),
                Key::Named(NamedKey::Backspace) => self.core.on_backspace(),
                Key::Named(NamedKey::Space) => self.core.on_char(' '),
                Key::Character(c) => {
                    for ch in c.as_str().chars() {
                        self.core.on_char(ch);
                    }
                }
                _ => {}
            },

            WindowEvent::CursorMoved { position, .. } => {
                self.core.cursor = (position.x, position.y);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.core.on_click(Instant::now());
            }

            WindowEvent::Resized(size) => {
                if size.width != 0 && size.height != 0 {
                    self.context
                        .resize_surface(surface, size.width, size.height);
                    *valid_surface = true;
                } else {
                    *valid_surface = false;
                }
            }

            WindowEvent::RedrawRequested => {
                if !*valid_surface {
                    return;
                }

                let now = Instant::now();
                self.core.tick(now);

                self.scene.reset();
                let width = surface.config.width as f64;
                let height = surface.config.height as f64;
                self.core.render(&mut self.scene, &self.fonts, width, height, now);

                let device_handle = &self.context.devices[surface.dev_id];
                let base = self.core.theme.palette.bg_top.color();

                self.renderers[surface.dev_id]
                    .as_mut()
                    .unwrap()
                    .render_to_texture(
                        &device_handle.device,
                        &device_handle.queue,
                        &self.scene,
                        &surface.target_view,
                        &vello::RenderParams {
                            base_color: base,
                            width: surface.config.width,
                            height: surface.config.height,
                            antialiasing_method: AaConfig::Msaa16,
                        },
                    )
                    .expect("failed to render to surface");

                let surface_texture = surface
                    .surface
                    .get_current_texture()
                    .expect("failed to get surface texture");

                let mut encoder =
                    device_handle
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Surface Blit"),
                        });
                surface.blitter.copy(
                    &device_handle.device,
                    &mut encoder,
                    &surface.target_view,
                    &surface_texture
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default()),
                );
                device_handle.queue.submit([encoder.finish()]);
                surface_texture.present();
                device_handle.device.poll(wgpu::PollType::Poll).unwrap();

                // Request another frame for continuous updates
                window.request_redraw();
            }

            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let paths = GlintPaths::resolve();
    paths.ensure_exist();
    let tokens = ThemeTokens::load_or_default(&paths.config);
    tracing::info!(
        "glint-search v{} (theme: {})",
        env!("CARGO_PKG_VERSION"),
        paths.config.join(theme::THEME_FILE).display()
    );

    let fonts = Fonts::load();

    let now = Instant::now();
    let mut core = AppCore::new(tokens, now);
    if let Some(query) = &args.query {
        core.submit_search(query, QueryKind::Text, now);
    }

    let mut app = App {
        context: RenderContext::new(),
        renderers: vec![],
        state: RenderState::Suspended(None),
        scene: Scene::new(),
        core,
        fonts,
        windowed: args.windowed,
    };

    let event_loop = EventLoop::new()?;
    event_loop
        .run_app(&mut app)
        .expect("Couldn't run event loop");

    Ok(())
}

fn create_window(event_loop: &ActiveEventLoop, windowed: bool) -> Arc<Window> {
    let mut attr = Window::default_attributes().with_title("glint-search | AI Search Demo");

    if !windowed {
        attr = attr.with_fullscreen(Some(Fullscreen::Borderless(None)));
    } else {
        attr = attr.with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
    }

    Arc::new(event_loop.create_window(attr).unwrap())
}

fn create_renderer(render_cx: &RenderContext, surface: &RenderSurface<'_>) -> Renderer {
    Renderer::new(
        &render_cx.devices[surface.dev_id].device,
        RendererOptions::default(),
    )
    .expect("Couldn't create renderer")
}
