//! 写手年终总结 - annual writing bill desktop app.

mod ui;

use eframe::egui;
use log::info;

use ui::WritingReceiptApp;

fn main() -> eframe::Result<()> {
    env_logger::init();
    info!("🚀 Starting writing receipt app");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([860.0, 600.0])
            .with_title("写手年终总结"),
        ..Default::default()
    };

    eframe::run_native(
        "writing-receipt",
        options,
        Box::new(|cc| match WritingReceiptApp::new(cc) {
            Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
            Err(e) => {
                log::error!("Failed to initialize app: {}", e);
                Err(format!("Failed to initialize app: {}", e).into())
            }
        }),
    )
}
