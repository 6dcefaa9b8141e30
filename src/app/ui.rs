use egui::{Context, Sense};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::error;

use super::state::ExportStatus;
use super::App;
use crate::plotting;
use crate::types::Timeframe;

/// Pixel size of the on-screen chart texture.
const CHART_SIZE: (u32, u32) = (960, 540);

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for timeframe in [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly] {
                if ui
                    .selectable_label(app.timeframe == timeframe, timeframe.label())
                    .clicked()
                {
                    app.set_timeframe(timeframe);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Export as PNG").clicked() {
                    handle_export(app, app_arc.clone());
                }
            });
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Chart Application");
        ui.separator();

        if let Some(message) = &app.error_message {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }

        if let Some(texture) = app.chart_texture.clone() {
            let response = ui.add(egui::Image::new(&texture).sense(Sense::click_and_drag()));
            handle_chart_interaction(app, ui, &response);
        } else {
            ui.label("No chart yet.");
        }

        if let Some((label, value)) = &app.inspected_point {
            ui.label(format!("Timestamp: {label}, Value: {value:.2}"));
        }

        match &app.export_status {
            ExportStatus::Idle => {}
            ExportStatus::InProgress => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Exporting...");
                });
            }
            ExportStatus::Done(path) => {
                ui.label(format!("Exported {}", path.display()));
            }
            ExportStatus::Failed(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, format!("Export failed: {message}"));
            }
        }
    });

    // Update the chart texture if needed
    if app.update_needed {
        match plotting::render_chart_png(
            &app.chart_series,
            app.view_window,
            &app.options,
            CHART_SIZE,
        ) {
            Ok(bytes) => load_chart_texture(app, ctx, &bytes),
            Err(e) => {
                error!("chart render failed: {e}");
                app.error_message = Some(format!("chart render failed: {e}"));
            }
        }
        app.update_needed = false;
    }
}

/// Forward pointer gestures on the chart image to the view state.
fn handle_chart_interaction(app: &mut App, ui: &egui::Ui, response: &egui::Response) {
    let rect = response.rect;

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let frac = f64::from((pos.x - rect.left()) / rect.width());
            app.inspect_at(frac);
        }
    }

    if response.dragged() && rect.width() > 0.0 {
        // Dragging right moves the window left, like grabbing the chart.
        let delta = f64::from(-response.drag_delta().x / rect.width());
        app.pan_by(delta * app.view_window.span());
    }

    if response.hovered() {
        let (scroll, pinch) = ui.input(|i| (i.raw_scroll_delta.y, i.zoom_delta()));

        if app.options.zoom.wheel && scroll != 0.0 {
            let factor = if scroll > 0.0 { 0.9 } else { 1.1 };
            app.zoom_by(factor);
        }

        if app.options.zoom.pinch && (pinch - 1.0).abs() > f32::EPSILON {
            app.zoom_by(1.0 / f64::from(pinch));
        }
    }
}

/// Kick off a one-shot export of the current view.
///
/// Each request is independent: the artifact name is resolved up front
/// and the render runs on a blocking worker, so further interaction is
/// never blocked. The outcome lands back in the shared state.
fn handle_export(app: &mut App, app_arc: Arc<Mutex<App>>) {
    let series = app.chart_series.clone();
    let window = app.view_window;
    let options = app.options;
    let path = plotting::resolve_export_path(Path::new("."));
    app.export_status = ExportStatus::InProgress;

    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            plotting::export_chart(&series, window, &options, &path).map(|()| path)
        })
        .await;

        let status = match result {
            Ok(Ok(path)) => ExportStatus::Done(path),
            Ok(Err(e)) => {
                error!("export failed: {e}");
                ExportStatus::Failed(e.to_string())
            }
            Err(e) => {
                error!("export task failed: {e}");
                ExportStatus::Failed(e.to_string())
            }
        };

        if let Ok(mut app) = app_arc.lock() {
            app.export_status = status;
        }
    });
}

fn load_chart_texture(app: &mut App, ctx: &Context, bytes: &[u8]) {
    match image::load_from_memory(bytes) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let pixels = image.to_rgba8();
            let pixels = pixels.as_flat_samples();
            let texture = ctx.load_texture(
                "chart_texture",
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
                egui::TextureOptions::LINEAR,
            );
            app.chart_texture = Some(texture);
        }
        Err(e) => {
            error!("failed to decode chart image: {e}");
        }
    }
}

