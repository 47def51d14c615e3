//! Export service for the receipt image.
//!
//! Takes a raw RGBA snapshot of the rendered receipt (captured by the UI,
//! with form controls and row action buttons already excluded), composites
//! it onto the fixed receipt background, upscales it, encodes a PNG and
//! writes it next to the user's downloads. One attempt per invocation; a
//! failed attempt is reported back as a single outcome, never retried.

use anyhow::Result;
use chrono::Local;
use image::{imageops, Rgb, RgbImage, RgbaImage};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use shared::ExportResult;

/// Fixed upscaling factor applied to the captured snapshot.
pub const DEFAULT_EXPORT_SCALE: u32 = 3;

/// Fixed background color behind the receipt card (#f0f9ff).
pub const EXPORT_BACKGROUND: Rgb<u8> = Rgb([0xf0, 0xf9, 0xff]);

/// Raw pixels of the rendered receipt view, tightly packed RGBA.
#[derive(Debug, Clone)]
pub struct ReceiptSnapshot {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Export service that turns a receipt snapshot into a PNG on disk.
#[derive(Clone)]
pub struct ExportService {
    scale: u32,
}

impl ExportService {
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_EXPORT_SCALE,
        }
    }

    /// Export a snapshot as `writing-receipt-<YYYYMMDD>.png`.
    ///
    /// The file lands in `custom_path` when given, otherwise in the
    /// user's Downloads folder, falling back to Documents and then the
    /// home directory. Expected failures (bad snapshot, unwritable
    /// target) come back as an unsuccessful `ExportResult`.
    pub fn export_snapshot(
        &self,
        snapshot: &ReceiptSnapshot,
        custom_path: Option<String>,
    ) -> Result<ExportResult> {
        info!(
            "📸 EXPORT: Exporting {}x{} receipt snapshot at {}x scale",
            snapshot.width, snapshot.height, self.scale
        );

        let Some(image) = self.rasterize(snapshot) else {
            error!("❌ EXPORT: Snapshot dimensions do not match pixel data");
            return Ok(ExportResult {
                success: false,
                message: "截图数据无效，无法导出".to_string(),
                file_path: String::new(),
            });
        };

        let export_dir = match custom_path {
            Some(path) if !path.trim().is_empty() => PathBuf::from(sanitize_path(&path)),
            _ => match default_export_dir() {
                Some(dir) => dir,
                None => {
                    error!("❌ EXPORT: Could not determine an export directory");
                    return Ok(ExportResult {
                        success: false,
                        message: "无法确定导出目录".to_string(),
                        file_path: String::new(),
                    });
                }
            },
        };

        let filename = format!("writing-receipt-{}.png", Local::now().format("%Y%m%d"));
        let file_path = export_dir.join(&filename);

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("❌ EXPORT: Failed to create {}: {}", export_dir.display(), e);
            return Ok(ExportResult {
                success: false,
                message: format!("无法创建导出目录: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
            });
        }

        match image.save(&file_path) {
            Ok(()) => {
                let path_str = file_path.to_string_lossy().to_string();
                info!("✅ EXPORT: Receipt image saved to {}", path_str);
                Ok(ExportResult {
                    success: true,
                    message: format!("小票已保存到 {}", path_str),
                    file_path: path_str,
                })
            }
            Err(e) => {
                error!("❌ EXPORT: Failed to write {}: {}", file_path.display(), e);
                Ok(ExportResult {
                    success: false,
                    message: format!("图片保存失败: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                })
            }
        }
    }

    /// Composite the RGBA snapshot onto the fixed background and upscale.
    /// Returns None when the pixel buffer does not match the dimensions.
    fn rasterize(&self, snapshot: &ReceiptSnapshot) -> Option<RgbImage> {
        if snapshot.width == 0 || snapshot.height == 0 {
            return None;
        }
        let rgba = RgbaImage::from_raw(snapshot.width, snapshot.height, snapshot.rgba.clone())?;

        let mut flat = RgbImage::from_pixel(snapshot.width, snapshot.height, EXPORT_BACKGROUND);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let alpha = u32::from(pixel[3]);
            let base = flat.get_pixel_mut(x, y);
            for channel in 0..3 {
                let fg = u32::from(pixel[channel]) * alpha;
                let bg = u32::from(base[channel]) * (255 - alpha);
                base[channel] = ((fg + bg) / 255) as u8;
            }
        }

        Some(imageops::resize(
            &flat,
            snapshot.width * self.scale,
            snapshot.height * self.scale,
            imageops::FilterType::Triangle,
        ))
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_export_dir() -> Option<PathBuf> {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .or_else(dirs::home_dir)
}

/// Basic path sanitization for user-typed export directories.
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    if (cleaned.starts_with('"') && cleaned.ends_with('"') && cleaned.len() >= 2)
        || (cleaned.starts_with('\'') && cleaned.ends_with('\'') && cleaned.len() >= 2)
    {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }
    cleaned = cleaned.trim().to_string();

    while cleaned.ends_with('/') || cleaned.ends_with('\\') {
        cleaned.pop();
    }

    if cleaned.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            if cleaned == "~" {
                cleaned = home.to_string_lossy().to_string();
            } else if let Some(rest) = cleaned.strip_prefix("~/") {
                cleaned = home.join(rest).to_string_lossy().to_string();
            }
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn snapshot(width: u32, height: u32) -> ReceiptSnapshot {
        // Opaque red field with one fully transparent pixel at (0, 0).
        let mut rgba = vec![0u8; (width * height * 4) as usize];
        for pixel in rgba.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[200, 30, 60, 255]);
        }
        rgba[..4].copy_from_slice(&[0, 0, 0, 0]);
        ReceiptSnapshot { width, height, rgba }
    }

    #[test]
    fn test_export_writes_scaled_png() {
        let tmp = TempDir::new().unwrap();
        let service = ExportService::new();

        let result = service
            .export_snapshot(&snapshot(4, 2), Some(tmp.path().to_string_lossy().to_string()))
            .unwrap();

        assert!(result.success, "{}", result.message);
        let name = std::path::Path::new(&result.file_path)
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(name.starts_with("writing-receipt-"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "writing-receipt-YYYYMMDD.png".len());

        let written = image::open(&result.file_path).unwrap().to_rgb8();
        assert_eq!(written.width(), 4 * DEFAULT_EXPORT_SCALE);
        assert_eq!(written.height(), 2 * DEFAULT_EXPORT_SCALE);
    }

    #[test]
    fn test_transparent_pixels_take_background_color() {
        let service = ExportService::new();
        let image = service.rasterize(&snapshot(4, 2)).unwrap();

        // Top-left corner of the upscale originates from the transparent
        // pixel, so it carries the fixed background.
        assert_eq!(*image.get_pixel(0, 0), EXPORT_BACKGROUND);
    }

    #[test]
    fn test_mismatched_pixel_buffer_fails_softly() {
        let service = ExportService::new();
        let bad = ReceiptSnapshot {
            width: 10,
            height: 10,
            rgba: vec![0u8; 7],
        };

        let result = service.export_snapshot(&bad, None).unwrap();
        assert!(!result.success);
    }

    #[test]
    fn test_unwritable_target_is_a_single_failed_attempt() {
        let tmp = TempDir::new().unwrap();
        let blocking_file = tmp.path().join("not_a_directory");
        std::fs::write(&blocking_file, b"x").unwrap();

        let service = ExportService::new();
        let result = service
            .export_snapshot(
                &snapshot(2, 2),
                Some(blocking_file.to_string_lossy().to_string()),
            )
            .unwrap();

        assert!(!result.success);
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("  /data/out  "), "/data/out");
        assert_eq!(sanitize_path("\"/data/out\""), "/data/out");
        assert_eq!(sanitize_path("'/data/out/'"), "/data/out");

        if let Some(home) = dirs::home_dir() {
            let expected = home.join("Pictures").to_string_lossy().to_string();
            assert_eq!(sanitize_path("~/Pictures"), expected);
        }
    }
}
