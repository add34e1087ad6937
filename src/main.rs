use std::{path::PathBuf, time::Instant};

use clap::Parser;
use eframe::egui::{self, vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;

use geodesic_sketchpad::{config, ClickOutcome, Curvature, Session, Tool};

mod gfx;
mod status;
use gfx::View;
use status::StatusLine;

const SIDE_PANEL_WIDTH: f32 = 220.;

#[derive(Debug, Parser)]
#[command(about = "Build points, lines and circles in Euclidean, spherical and hyperbolic space")]
struct Args {
    /// Settings file; defaults to ./sketchpad.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Geometry to start in: euclidean, spherical or hyperbolic.
    #[arg(long)]
    geometry: Option<Curvature>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(geometry) = args.geometry {
        settings.geometry = geometry;
    }
    info!(geometry = %settings.geometry, canvas = ?settings.canvas, "starting");

    let native_options = eframe::NativeOptions {
        follow_system_theme: false,
        viewport: egui::ViewportBuilder::default().with_inner_size([
            settings.canvas.width as f32 + SIDE_PANEL_WIDTH + 20.,
            settings.canvas.height as f32 + 40.,
        ]),
        ..Default::default()
    };
    let session = Session::from_settings(&settings);
    eframe::run_native(
        "Geodesic Sketchpad",
        native_options,
        Box::new(move |_cc| Box::new(App::new(session))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}

struct App {
    session: Session,
    status: StatusLine,
}
impl App {
    fn new(session: Session) -> Self {
        Self {
            session,
            status: StatusLine::default(),
        }
    }

    fn select_geometry(&mut self, curvature: Curvature, now: Instant) {
        let pruned = self.session.set_geometry(curvature);
        if !pruned.points.is_empty() {
            self.status.flash(
                format!(
                    "Removed {} point(s) outside {} space",
                    pruned.points.len(),
                    curvature.name().to_lowercase()
                ),
                now,
            );
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context, now: Instant) {
        use egui::Key;
        let geometry_keys = [
            (Key::Num1, Curvature::Euclidean),
            (Key::Num2, Curvature::Spherical),
            (Key::Num3, Curvature::Hyperbolic),
        ];
        let tool_keys = [
            (Key::P, Tool::AddPoint),
            (Key::L, Tool::DrawLine),
            (Key::C, Tool::DrawCircle),
            (Key::M, Tool::Move),
            (Key::X, Tool::Clear),
        ];
        if ctx.wants_keyboard_input() {
            return;
        }
        for (key, curvature) in geometry_keys {
            if ctx.input(|i| i.key_pressed(key)) {
                self.select_geometry(curvature, now);
            }
        }
        for (key, tool) in tool_keys {
            if ctx.input(|i| i.key_pressed(key)) {
                self.session.set_tool(tool);
            }
        }
    }

    fn handle_pointer(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        view: &View,
        now: Instant,
    ) {
        let (pressed, released) =
            ctx.input(|i| (i.pointer.primary_pressed(), i.pointer.primary_released()));
        match response.hover_pos() {
            Some(screen) => {
                let pos = view.to_canvas(screen);
                self.session.pointer_move(pos);
                if pressed {
                    match self.session.click(pos, now) {
                        Ok(ClickOutcome::Cleared) => self.status.flash("Cleared", now),
                        Ok(_) => {}
                        Err(err) => self.status.flash(err.to_string(), now),
                    }
                }
            }
            None => {
                if self.session.pointer().is_some() {
                    self.session.pointer_leave();
                }
            }
        }
        if released {
            self.session.pointer_release();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.heading("Geometry");
        let current = self.session.curvature();
        for curvature in Curvature::ALL {
            if ui
                .selectable_label(current == curvature, curvature.name())
                .clicked()
            {
                self.select_geometry(curvature, now);
            }
        }
        ui.label(self.session.curvature().description());
        let (rect, _) = ui.allocate_exact_size(vec2(180., 180.), egui::Sense::hover());
        gfx::paint_thumbnail(&ui.painter_at(rect), rect, self.session.curvature());

        ui.separator();
        ui.heading("Tools");
        let tool = self.session.tool();
        for candidate in Tool::ALL {
            if ui
                .selectable_label(tool == candidate, candidate.label())
                .clicked()
            {
                self.session.set_tool(candidate);
            }
        }

        ui.separator();
        ui.label(self.session.geometry_label());
        ui.label(self.session.tool_label());
        ui.label(self.session.counts().to_string());
        ui.label(self.session.pointer_label());
    }
}
impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let animating = self.session.tick(now);
        self.handle_shortcuts(ctx, now);

        egui::SidePanel::left("Controls")
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| self.controls(ui, now));
        egui::TopBottomPanel::bottom("Status").show(ctx, |ui| {
            let hint = tool_hint(self.session.tool());
            ui.label(self.status.text(now, hint));
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            let view = View::fit(rect, self.session.config());
            let r = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            self.handle_pointer(ctx, &r, &view, now);
            gfx::paint_session(&ui.painter_at(rect), &view, &self.session, now);
        });

        if animating || self.status.is_flashing(now) || self.session.dragged().is_some() {
            ctx.request_repaint();
        }
    }
}

fn tool_hint(tool: Tool) -> &'static str {
    match tool {
        Tool::AddPoint => "Click inside the space to add a point",
        Tool::DrawLine => "Click two points to join them with a geodesic",
        Tool::DrawCircle => "Click a centre point, then a point on the circle",
        Tool::Move => "Click a point and drag it; hover to see parallels to the newest line",
        Tool::Clear => "Click anywhere to clear everything",
    }
}
