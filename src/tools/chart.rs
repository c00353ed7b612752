//! Calorie target chart rendering
//!
//! Renders the five calorie targets as a PNG bar chart, keyed by the
//! target labels with the maintenance bar emphasized.

use std::path::Path;

use serde::Serialize;

use crate::models::CalorieTargets;

// Bar colors (RGB 0-255)
const COLOR_MODERATE: (u8, u8, u8) = (96, 165, 250); // Outer bars
const COLOR_MILD: (u8, u8, u8) = (147, 197, 253); // Mild loss/gain
const COLOR_MAINTENANCE: (u8, u8, u8) = (15, 98, 254); // Center bar

/// Default chart dimensions in pixels
pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Largest accepted chart dimension in pixels
pub const MAX_DIMENSION: u32 = 4096;

/// Response for the generate_chart tool
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub success: bool,
    pub file_path: String,
    pub width: u32,
    pub height: u32,
    pub message: String,
}

/// Color for the bar at a given position (loss, loss, maintenance, gain, gain)
fn bar_color(index: usize) -> (u8, u8, u8) {
    match index {
        2 => COLOR_MAINTENANCE,
        1 | 3 => COLOR_MILD,
        _ => COLOR_MODERATE,
    }
}

/// Generate the targets bar chart as PNG bytes
pub fn generate_targets_chart(
    targets: &CalorieTargets,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    if width == 0 || height == 0 {
        return Err("Chart dimensions must be non-zero".to_string());
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(format!(
            "Chart dimensions must be at most {} pixels",
            MAX_DIMENSION
        ));
    }

    let rows = targets.as_rows();

    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        // Y axis does not begin at zero; pad around the target range
        let y_min = (targets.moderate_loss - 300) as f64;
        let y_max = (targets.moderate_gain + 300) as f64;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..5u32).into_segmented(), y_min..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) if (*i as usize) < rows.len() => {
                    rows[*i as usize].0.to_string()
                }
                _ => String::new(),
            })
            .y_desc("calories/day")
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, (_, calories))| {
                let (r, g, b) = bar_color(i);
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i as u32), y_min),
                        (SegmentValue::Exact(i as u32 + 1), *calories as f64),
                    ],
                    RGBColor(r, g, b).filled(),
                )
            }))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    // Convert RGB buffer to PNG
    let img = image::RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    let dyn_img = image::DynamicImage::ImageRgb8(img);
    dyn_img
        .write_to(
            &mut std::io::Cursor::new(&mut png_bytes),
            image::ImageFormat::Png,
        )
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

/// Render the targets chart and write it to a file
pub fn write_targets_chart(
    targets: &CalorieTargets,
    file_path: &str,
    width: u32,
    height: u32,
) -> Result<ChartResponse, String> {
    let png_bytes = generate_targets_chart(targets, width, height)?;

    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    std::fs::write(file_path, &png_bytes).map_err(|e| e.to_string())?;

    Ok(ChartResponse {
        success: true,
        file_path: file_path.to_string(),
        width,
        height,
        message: format!("Wrote calorie target chart to {}", file_path),
    })
}
