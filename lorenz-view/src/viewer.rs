//! eframe application that hosts one animation session.
//!
//! [`Viewer`] owns the [`AnimationLoop`] and advances it by exactly one frame
//! per egui update. Window input is forwarded to the loop's [`Canvas`] as
//! [`Event`]s, and the canvas raster is shown as a texture filling the
//! central panel.

use crate::canvas::{Canvas, Upload};
use eframe::App;
use glam::UVec2;
use lorenz_core::{
    animation::{AnimationLoop, LoopState},
    config::{AnimationConfig, InitialCondition},
    display::{Display, Event, PacedClock},
    error::Result,
};

pub const BACKGROUND: egui::Color32 = egui::Color32::BLACK;

const TEXTURE_OPTIONS: egui::TextureOptions = egui::TextureOptions::NEAREST;

/// Main application state for one animation window.
///
/// ### Fields
/// - `animation` - The frame loop; owns the canvas and the clock.
/// - `texture` - GPU copy of the canvas raster, created on the first frame.
/// - `modifiers` - Modifier keys held during the previous update.
pub struct Viewer {
    animation: AnimationLoop<Canvas, PacedClock>,
    texture: Option<egui::TextureHandle>,
    modifiers: egui::Modifiers,
}

impl Viewer {
    /// Starts a session on a canvas of `initial_size` pixels.
    ///
    /// The canvas follows the panel size from the first frame on.
    ///
    /// ### Returns
    /// - `Ok(Viewer)` with the loop running.
    /// - `Err` if the configuration is invalid.
    pub fn new(
        conditions: &[InitialCondition],
        config: &AnimationConfig,
        initial_size: UVec2,
    ) -> Result<Self> {
        let fps_cap = config.fps_cap;
        let animation = AnimationLoop::start(conditions, config, || {
            Ok((Canvas::new(initial_size, BACKGROUND), PacedClock::new(fps_cap)))
        })?;
        Ok(Self {
            animation,
            texture: None,
            modifiers: egui::Modifiers::default(),
        })
    }

    /// Forwards this frame's window input to the canvas.
    fn collect_input(&mut self, ctx: &egui::Context) {
        let (events, modifiers, close_requested) = ctx.input(|i| {
            (
                i.events.clone(),
                i.modifiers,
                i.viewport().close_requested(),
            )
        });
        self.forward_input(&events, modifiers, close_requested);
    }

    /// Translates one update's input for the canvas.
    ///
    /// Modifier keys produce no key events of their own, so a modifier that
    /// went down since the previous update is reported as a key press. A
    /// close request closes the canvas's event source.
    fn forward_input(
        &mut self,
        events: &[egui::Event],
        modifiers: egui::Modifiers,
        close_requested: bool,
    ) {
        let canvas = self.animation.display_mut();
        for e in events {
            canvas.push_event(map_event(e));
        }
        if modifier_pressed(self.modifiers, modifiers) {
            canvas.push_event(Event::KeyPress);
        }
        self.modifiers = modifiers;
        if close_requested {
            canvas.mark_closed();
        }
    }

    /// Sends the parts of the canvas changed since the last frame to the GPU.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let canvas = self.animation.display_mut();
        // Zero-sized textures cannot be allocated; keep the upload pending.
        if canvas.size().min_element() == 0 {
            return;
        }
        let upload = canvas.take_upload();

        match self.texture.as_mut() {
            Some(texture) => match upload {
                Upload::Nothing => {}
                Upload::Full => texture.set(canvas.image().clone(), TEXTURE_OPTIONS),
                Upload::Regions(regions) => {
                    for r in &regions {
                        texture.set_partial(
                            [r.min.x as usize, r.min.y as usize],
                            canvas.sub_image(r),
                            TEXTURE_OPTIONS,
                        );
                    }
                }
            },
            None => {
                self.texture =
                    Some(ctx.load_texture("lorenz-trace", canvas.image().clone(), TEXTURE_OPTIONS));
            }
        }
    }

    /// Builds the central panel: resizes the canvas, runs one frame, paints.
    fn ui_central_panel(&mut self, ctx: &egui::Context) -> LoopState {
        let frame = egui::Frame::new().fill(BACKGROUND);
        egui::CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let ppp = ctx.pixels_per_point();
                self.animation
                    .display_mut()
                    .resize(surface_size(rect.size(), ppp));

                self.collect_input(ctx);
                let state = self.animation.frame();
                self.sync_texture(ctx);

                if let Some(texture) = &self.texture {
                    let size = self.animation.display().size();
                    let image_rect = egui::Rect::from_min_size(
                        rect.min,
                        egui::vec2(size.x as f32, size.y as f32) / ppp,
                    );
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter()
                        .image(texture.id(), image_rect, uv, egui::Color32::WHITE);
                }
                state
            })
            .inner
    }
}

impl App for Viewer {
    /// Runs one animation frame per egui update and closes the window once
    /// the loop has stopped.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.ui_central_panel(ctx) {
            LoopState::Stopped => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            LoopState::Running => ctx.request_repaint(),
        }
    }
}

/// Maps an egui input event onto the loop's event vocabulary.
///
/// Any pressed key counts, including the clipboard shortcuts egui reports as
/// `Copy`/`Cut`/`Paste` instead of key events. Releases and everything else
/// are ignorable.
pub fn map_event(event: &egui::Event) -> Event {
    match event {
        egui::Event::Key { pressed: true, .. }
        | egui::Event::Copy
        | egui::Event::Cut
        | egui::Event::Paste(_) => Event::KeyPress,
        _ => Event::Other,
    }
}

/// Whether any modifier key is down in `now` that was up in `prev`.
pub fn modifier_pressed(prev: egui::Modifiers, now: egui::Modifiers) -> bool {
    (now.alt && !prev.alt)
        || (now.ctrl && !prev.ctrl)
        || (now.shift && !prev.shift)
        || (now.mac_cmd && !prev.mac_cmd)
        || (now.command && !prev.command)
}

/// Physical pixel size of a panel of `points` logical size.
pub fn surface_size(points: egui::Vec2, pixels_per_point: f32) -> UVec2 {
    let px = (points * pixels_per_point).round();
    UVec2::new(px.x.max(0.0) as u32, px.y.max(0.0) as u32)
}
