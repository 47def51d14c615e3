//! Entry form panel: a thin egui renderer over the form state machine.

use eframe::egui;
use shared::Month;

use crate::ui::app_state::WritingReceiptApp;

const PINK: egui::Color32 = egui::Color32::from_rgb(236, 72, 153);
const SKY: egui::Color32 = egui::Color32::from_rgb(2, 132, 199);

impl WritingReceiptApp {
    pub fn render_form_panel(&mut self, ui: &mut egui::Ui) {
        let editing = self.form.is_editing();
        let accent = if editing { PINK } else { SKY };

        egui::Frame::group(ui.style())
            .fill(egui::Color32::WHITE)
            .stroke(egui::Stroke::new(2.0, accent))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(16.0))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(if editing { "✏ 修改条目" } else { "📝 添加篇目" })
                        .font(egui::FontId::new(22.0, egui::FontFamily::Proportional))
                        .strong()
                        .color(accent),
                );
                ui.add_space(12.0);

                ui.label("作品标题");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.title)
                        .hint_text("例如：《大秽》")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label("创作月份");
                        egui::ComboBox::from_id_source("entry_month")
                            .selected_text(self.form.month.label())
                            .show_ui(ui, |ui| {
                                for month in Month::ALL {
                                    ui.selectable_value(&mut self.form.month, month, month.label());
                                }
                            });
                    });
                    ui.add_space(16.0);
                    ui.vertical(|ui| {
                        ui.label("本次字数");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form.word_count_input)
                                .hint_text("0")
                                .desired_width(120.0),
                        );
                    });
                });
                ui.add_space(8.0);

                ui.checkbox(&mut self.form.is_serial, "连载作品");

                if self.form.is_serial {
                    egui::Frame::none()
                        .fill(egui::Color32::from_rgb(240, 249, 255))
                        .rounding(egui::Rounding::same(8.0))
                        .inner_margin(egui::Margin::same(10.0))
                        .show(ui, |ui| {
                            ui.label("完成章节");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.form.chapters)
                                    .hint_text("例如：1-3章，番外2，真相线等")
                                    .desired_width(f32::INFINITY),
                            );
                            ui.add_space(4.0);
                            ui.checkbox(&mut self.form.is_finished, "宣告完结 ✨");
                        });
                }
                ui.add_space(12.0);

                let mut submitted = false;
                let mut cancelled = false;
                ui.horizontal(|ui| {
                    if editing && ui.add_sized([90.0, 36.0], egui::Button::new("取消")).clicked() {
                        cancelled = true;
                    }
                    let submit_label = if editing { "保存修改" } else { "加入账单" };
                    if ui
                        .add_sized(
                            [160.0, 36.0],
                            egui::Button::new(
                                egui::RichText::new(submit_label).color(egui::Color32::WHITE),
                            )
                            .fill(accent),
                        )
                        .clicked()
                    {
                        submitted = true;
                    }
                });

                if cancelled {
                    self.form.cancel_edit();
                }
                if submitted {
                    // Invalid input is a silent no-op; the form stays open.
                    if let Some(submit) = self.form.submit() {
                        self.handle_form_submit(submit);
                    }
                }
            });
    }
}
