//! Desktop preview app for the myrtio disc composer
//!
//! Renders the 61-LED disc in a window with interactive controls.
//! Frames go through the real scheduler and WS2812 encoder, and a decoding
//! transport turns the waveform back into colors for display.

use std::sync::Arc;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_disc_composer::{
    Color, ControlHandle, ControlMailbox, Duration, FrameScheduler, Instant, LED_COUNT,
    OperatingState, Palette, Renderer, RendererConfig, Transport, TransitionConfig,
    TransitionStrategy, WS2812_SPEED_HZ,
    color::PALETTE_SIZE,
    protocol::decode_frame,
    ring::{Lut, MAX_RING},
};
use tracing_subscriber::EnvFilter;

/// Radius of each LED circle in pixels
const LED_RADIUS: f32 = 9.0;

/// Distance between rings in pixels
const RING_PITCH: f32 = 48.0;

/// Transition the preview starts with, adjustable from the UI
const PREVIEW_TRANSITION: TransitionConfig = TransitionConfig {
    duration: Duration::from_millis(1200),
    strategy: TransitionStrategy::Crossfade,
};

/// Transport that decodes every waveform it receives
struct PreviewTransport {
    frame: [Color; LED_COUNT],
    speed_hz: u32,
}

impl Transport for PreviewTransport {
    type Error = &'static str;

    fn open(&mut self, speed_hz: u32) -> Result<(), Self::Error> {
        self.speed_hz = speed_hz;
        Ok(())
    }

    fn transfer(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.frame = decode_frame(bytes).ok_or("malformed waveform")?;
        Ok(())
    }
}

fn scheduler(
    config: &RendererConfig,
    mailbox: &Arc<ControlMailbox>,
) -> FrameScheduler<PreviewTransport> {
    let mut transport = PreviewTransport {
        frame: [Color::BLACK; LED_COUNT],
        speed_hz: 0,
    };
    let _ = transport.open(WS2812_SPEED_HZ);
    FrameScheduler::new(Renderer::new(config), transport, Arc::clone(mailbox))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("myrtio_disc_composer=debug")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 760.0])
            .with_title("Disc Composer Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-disc-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    scheduler: FrameScheduler<PreviewTransport>,
    mailbox: Arc<ControlMailbox>,
    handle: ControlHandle,
    lut: Lut,

    /// State picked in the UI
    state: OperatingState,
    strategy: TransitionStrategy,
    duration_ms: u64,
    /// Palette sent with the next request
    palette: [[u8; 3]; PALETTE_SIZE],
    send_palette: bool,
    /// Placeholder tint
    parameter: [u8; 3],

    /// Synthetic time in milliseconds
    t_ms: u64,
    last_frame: StdInstant,
    playing: bool,
    time_scale: f32,
}

impl PreviewApp {
    fn new() -> Self {
        let config = RendererConfig {
            initial_state: OperatingState::Boot,
            transition: PREVIEW_TRANSITION,
        };
        let mailbox = Arc::new(ControlMailbox::new());

        Self {
            scheduler: scheduler(&config, &mailbox),
            handle: ControlHandle::new(Arc::clone(&mailbox)),
            mailbox,
            lut: Lut::new(),
            state: config.initial_state,
            strategy: PREVIEW_TRANSITION.strategy,
            duration_ms: PREVIEW_TRANSITION.duration.as_millis(),
            palette: [[255, 60, 40], [40, 255, 120], [60, 80, 255]],
            send_palette: false,
            parameter: [20, 245, 255],
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
        }
    }

    fn palette(&self) -> Palette {
        Palette::from_colors(self.palette.map(|[r, g, b]| Color::new(r, g, b)))
    }

    fn request_state(&self, state: OperatingState) {
        let palette = self.send_palette.then(|| self.palette());
        self.handle.request_state(state, palette);
    }

    fn reset_time(&mut self) {
        self.t_ms = 0;
        self.last_frame = StdInstant::now();
        let config = RendererConfig {
            initial_state: self.state,
            transition: self.scheduler.renderer().transition_config(),
        };
        self.scheduler = scheduler(&config, &self.mailbox);
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = if delta_ms.is_finite() {
                delta_ms.max(0.0) as u64
            } else {
                0
            };
            self.t_ms = self.t_ms.saturating_add(delta_ms);
        }
    }

    fn render_frame(&mut self) -> [Color; LED_COUNT] {
        self.scheduler.tick(Instant::from_millis(self.t_ms));
        self.scheduler.transport().frame
    }

    fn playback_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("⏮ Reset").clicked() {
                self.reset_time();
            }
            if ui
                .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                .clicked()
            {
                self.playing = !self.playing;
            }
            let secs = self.t_ms / 1000;
            let ms = self.t_ms % 1000;
            ui.label(format!("Time: {secs}.{ms:03}s"));
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
        });
    }

    fn state_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("State:");
            let mut selected = self.state;
            egui::ComboBox::from_id_salt("state_selector")
                .selected_text(self.state.as_str())
                .show_ui(ui, |ui| {
                    for state in OperatingState::ALL {
                        ui.selectable_value(&mut selected, state, state.as_str());
                    }
                });
            if selected != self.state {
                self.state = selected;
                self.request_state(selected);
            }
            if ui.button("Request").clicked() {
                self.request_state(self.state);
            }
            if ui.button("Force").clicked() {
                self.handle.set_state(self.state);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Transition:");
            let old_strategy = self.strategy;
            let old_duration = self.duration_ms;
            ui.selectable_value(&mut self.strategy, TransitionStrategy::Crossfade, "crossfade");
            ui.selectable_value(
                &mut self.strategy,
                TransitionStrategy::SpiralFusion,
                "spiral fusion",
            );
            ui.add(egui::Slider::new(&mut self.duration_ms, 0..=5000).suffix(" ms"));
            if self.strategy != old_strategy || self.duration_ms != old_duration {
                self.scheduler.renderer_mut().set_transition_config(TransitionConfig {
                    duration: Duration::from_millis(self.duration_ms),
                    strategy: self.strategy,
                });
            }
        });

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.send_palette, "Palette:");
            for color in &mut self.palette {
                ui.color_edit_button_srgb(color);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Placeholder tint:");
            if ui.color_edit_button_srgb(&mut self.parameter).changed() {
                let [r, g, b] = self.parameter;
                self.handle.set_parameter(Color::new(r, g, b));
            }
        });

        let status = match self.scheduler.renderer().transition() {
            Some(transition) => format!(
                "{} → {}",
                transition.from().as_str(),
                transition.to().as_str()
            ),
            None => self.scheduler.renderer().current().as_str().to_owned(),
        };
        ui.label(status);
        ui.label(format!(
            "frames: {}  failures: {}  clock: {} Hz",
            self.scheduler.frames(),
            self.scheduler.failures(),
            self.scheduler.transport().speed_hz,
        ));
    }

    fn draw_disc(&self, ui: &mut egui::Ui, frame: &[Color; LED_COUNT]) {
        #[allow(clippy::cast_precision_loss)]
        let radius = MAX_RING as f32 * RING_PITCH + LED_RADIUS * 2.0;
        let (response, painter) =
            ui.allocate_painter(egui::vec2(radius * 2.0, radius * 2.0), egui::Sense::hover());
        let center = response.rect.center();
        painter.circle_filled(center, radius, egui::Color32::from_gray(16));

        for (index, pixel) in frame.iter().enumerate() {
            let Some(coord) = self.lut.coord(index) else {
                continue;
            };
            let distance = coord.r * RING_PITCH;
            let position = center
                + egui::vec2(
                    distance * coord.theta.cos(),
                    distance * coord.theta.sin(),
                );
            let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
            painter.circle_filled(position, LED_RADIUS, color);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        let frame = self.render_frame();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.playback_controls(ui);
            ui.add_space(8.0);
            self.state_controls(ui);
            ui.add_space(16.0);
            self.draw_disc(ui, &frame);
        });
    }
}
