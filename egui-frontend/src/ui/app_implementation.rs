//! eframe::App implementation: frame loop, panel layout, and the
//! screenshot-based export capture.

use eframe::egui;
use log::{info, warn};

use backend::domain::export_service::ReceiptSnapshot;

use crate::ui::app_state::WritingReceiptApp;

impl eframe::App for WritingReceiptApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_workers();

        // The frame that arms a capture still painted the row controls,
        // so only a frame that began in capture mode may request the
        // screenshot.
        let started_in_capture = self.capture_in_progress;

        // Pick up a viewport screenshot from a previous frame's request.
        if self.capture_in_progress {
            if let Some(image) = take_screenshot_event(ctx) {
                match self.crop_to_receipt(ctx, &image) {
                    Some(snapshot) => self.finish_export(snapshot),
                    None => {
                        warn!("Receipt rect unknown; dropping capture");
                        self.error_message = Some("导出失败: 无法定位账单区域".to_string());
                    }
                }
                self.capture_in_progress = false;
                self.screenshot_requested = false;
            }
        }

        egui::SidePanel::left("entry_form_panel")
            .resizable(false)
            .exact_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(8.0);
                    self.render_form_panel(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(8.0);
                self.render_receipt_panel(ui);
            });
        });

        if self.capture_in_progress
            && ready_for_screenshot(started_in_capture, self.screenshot_requested)
        {
            info!("📷 EXPORT: requesting viewport screenshot");
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
            self.screenshot_requested = true;
        }

        // Keep the loop alive while workers or a capture are pending.
        if self.capture_in_progress || self.insight_pending || self.export_rx.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl WritingReceiptApp {
    /// Crop a full-viewport screenshot down to the receipt card.
    fn crop_to_receipt(
        &self,
        ctx: &egui::Context,
        image: &egui::ColorImage,
    ) -> Option<ReceiptSnapshot> {
        let rect = self.receipt_capture_rect?;
        let ppp = ctx.pixels_per_point();

        let [img_w, img_h] = image.size;
        let x0 = ((rect.min.x * ppp).floor().max(0.0) as usize).min(img_w);
        let y0 = ((rect.min.y * ppp).floor().max(0.0) as usize).min(img_h);
        let x1 = ((rect.max.x * ppp).ceil() as usize).min(img_w);
        let y1 = ((rect.max.y * ppp).ceil() as usize).min(img_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        let width = x1 - x0;
        let height = y1 - y0;
        let mut rgba = Vec::with_capacity(width * height * 4);
        for y in y0..y1 {
            for x in x0..x1 {
                rgba.extend_from_slice(&image.pixels[y * img_w + x].to_array());
            }
        }

        Some(ReceiptSnapshot {
            width: width as u32,
            height: height as u32,
            rgba,
        })
    }
}

/// Whether this frame may request the viewport screenshot. The frame in
/// which the export was started still painted the per-row controls, so
/// the request waits for a frame that started in capture mode.
fn ready_for_screenshot(started_in_capture: bool, requested: bool) -> bool {
    started_in_capture && !requested
}

/// Pull the screenshot (if any) out of this frame's input events.
fn take_screenshot_event(ctx: &egui::Context) -> Option<egui::ColorImage> {
    ctx.input(|input| {
        input.events.iter().find_map(|event| {
            if let egui::Event::Screenshot { image, .. } = event {
                Some((**image).clone())
            } else {
                None
            }
        })
    })
}
