//! Font setup. The UI is Chinese, so a CJK-capable system font is
//! appended to egui's default families as a fallback.

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use log::{info, warn};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
];

/// Install the first CJK font found on the system. Fails soft: without
/// one the app still runs, just with missing glyphs.
pub fn setup_cjk_fonts(ctx: &egui::Context) {
    for path in FONT_CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };

        let mut fonts = FontDefinitions::default();
        fonts
            .font_data
            .insert("cjk".to_owned(), FontData::from_owned(bytes));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push("cjk".to_owned());
        }
        ctx.set_fonts(fonts);
        info!("Loaded CJK font from {}", path);
        return;
    }

    warn!("No CJK font found; Chinese text may render as boxes");
}
