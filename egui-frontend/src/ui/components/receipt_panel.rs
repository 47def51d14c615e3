//! Receipt panel: the bill card, export/clear controls, and the insight
//! section. The card's screen rect is recorded every frame so the export
//! capture can crop the viewport screenshot down to it.

use eframe::egui;

use crate::ui::app_state::WritingReceiptApp;

/// Background of the card and of the exported image.
const RECEIPT_BG: egui::Color32 = egui::Color32::from_rgb(0xf0, 0xf9, 0xff);
const INK: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);

impl WritingReceiptApp {
    pub fn render_receipt_panel(&mut self, ui: &mut egui::Ui) {
        let receipt = self.receipt.clone();
        let capturing = self.capture_in_progress;

        if !capturing {
            ui.horizontal(|ui| {
                let export_button = egui::Button::new("📷 保存图片");
                if ui.add_enabled(!receipt.is_empty, export_button).clicked() {
                    self.clear_messages();
                    self.start_export();
                }
                if ui.button("🗑 清空全部").clicked() {
                    self.clear_messages();
                    self.handle_clear();
                }
            });

            if let Some(message) = self.success_message.clone() {
                ui.colored_label(egui::Color32::from_rgb(22, 163, 74), message);
            }
            if let Some(message) = self.error_message.clone() {
                ui.colored_label(egui::Color32::from_rgb(220, 38, 38), message);
            }
            ui.add_space(8.0);
        }

        let mut pending_edit: Option<String> = None;
        let mut pending_delete: Option<String> = None;

        let card = egui::Frame::none()
            .fill(RECEIPT_BG)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(24.0))
            .show(ui, |ui| {
                ui.set_min_width(380.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("ANNUAL WRITING BILL")
                            .font(egui::FontId::monospace(20.0))
                            .strong()
                            .color(INK),
                    );
                    let now = chrono::Local::now();
                    ui.label(
                        egui::RichText::new(format!("INV #{}", now.format("%Y/%m/%d %H:%M")))
                            .font(egui::FontId::monospace(12.0))
                            .weak(),
                    );
                });
                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("ITEM").font(egui::FontId::monospace(11.0)).weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new("AMOUNT").font(egui::FontId::monospace(11.0)).weak(),
                        );
                    });
                });
                ui.separator();

                if receipt.is_empty {
                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("空空如也的行囊...").weak().italics());
                    });
                    ui.add_space(16.0);
                } else {
                    for row in &receipt.rows {
                        ui.add_space(6.0);
                        // Hover state comes from the row rect stored last
                        // frame; one frame of lag is invisible.
                        let row_id = ui.make_persistent_id(&row.id);
                        let row_hovered = ui
                            .ctx()
                            .data(|d| d.get_temp::<egui::Rect>(row_id))
                            .map_or(false, |rect| ui.rect_contains_pointer(rect));
                        let row_response = ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(
                                    egui::RichText::new(&row.month_label)
                                        .font(egui::FontId::monospace(11.0))
                                        .weak(),
                                );
                                ui.label(
                                    egui::RichText::new(format!("《{}》", row.title))
                                        .strong()
                                        .color(INK),
                                );
                                if let Some(chapters) = &row.chapters {
                                    ui.label(
                                        egui::RichText::new(format!("更新: {}", chapters))
                                            .size(11.0)
                                            .weak(),
                                    );
                                }
                                if row.is_finished {
                                    ui.label(
                                        egui::RichText::new("🎉 FINISHED")
                                            .size(11.0)
                                            .color(egui::Color32::from_rgb(219, 39, 119)),
                                    );
                                }
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Min),
                                |ui| {
                                    if row_controls_visible(row_hovered, capturing) {
                                        if ui.small_button("删").clicked() {
                                            pending_delete = Some(row.id.clone());
                                        }
                                        if ui.small_button("改").clicked() {
                                            pending_edit = Some(row.id.clone());
                                        }
                                    }
                                    ui.label(
                                        egui::RichText::new(format!("{} 字", row.formatted_word_count))
                                            .font(egui::FontId::monospace(14.0))
                                            .color(INK),
                                    );
                                },
                            );
                        });
                        ui.ctx()
                            .data_mut(|d| d.insert_temp(row_id, row_response.response.rect));
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("COUNT OF WORKS").font(egui::FontId::monospace(12.0)));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{}", receipt.work_count))
                                .font(egui::FontId::monospace(12.0)),
                        );
                    });
                });
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("GRAND TOTAL")
                            .font(egui::FontId::monospace(16.0))
                            .strong()
                            .color(INK),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{} 字", receipt.formatted_total_words))
                                .font(egui::FontId::monospace(16.0))
                                .strong()
                                .color(INK),
                        );
                    });
                });

                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("*** THINK, WRITE, CREATE ***")
                            .font(egui::FontId::monospace(11.0))
                            .weak(),
                    );
                    ui.label(
                        egui::RichText::new("HAPPY WRITING!")
                            .font(egui::FontId::monospace(11.0))
                            .weak(),
                    );
                });
            });

        // Remember where the card landed so the capture can crop to it.
        self.receipt_capture_rect = Some(card.response.rect);

        if let Some(id) = pending_edit {
            if let Some(entry) = self.entries.iter().find(|e| e.id == id).cloned() {
                self.form.begin_edit(&entry);
            }
        }
        if let Some(id) = pending_delete {
            self.handle_delete(&id);
        }

        if !capturing {
            ui.add_space(12.0);
            self.render_insight_section(ui);
        }
    }

    fn render_insight_section(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.insight_pending, egui::Button::new("☕ 店长锐评"))
                .clicked()
            {
                self.start_insight();
            }
            if self.insight_pending {
                ui.spinner();
                ui.label(egui::RichText::new("店长正在阅读你的大作...").weak());
            }
        });

        if let Some(text) = &self.insight_text {
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(254, 249, 231))
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(12.0))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(text).color(INK));
                });
        }
    }
}

/// Edit/delete controls appear only while the pointer is over the row,
/// and never on a capture frame.
fn row_controls_visible(row_hovered: bool, capturing: bool) -> bool {
    row_hovered && !capturing
}
