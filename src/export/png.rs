use crate::error::{GradError, Result};
use crate::models::style::{ColourStop, parse_stops};
use colorgrad::{Gradient, GradientBuilder, LinearGradient};
use image::{ColorType, ImageEncoder, Rgba, RgbaImage, codecs::png::PngEncoder};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

pub const IMAGE_WIDTH: u32 = 300;
pub const IMAGE_HEIGHT: u32 = 100;

/// Horizontal linear gradient through the given stops
pub fn build_gradient(stops: &[ColourStop]) -> Result<LinearGradient> {
    if stops.len() < 2 {
        return Err(GradError::TooFewStops { count: stops.len() });
    }
    let colours: Vec<colorgrad::Color> = stops.iter().map(ColourStop::to_colorgrad).collect();
    let positions: Vec<f32> = stops.iter().map(|s| s.position).collect();
    GradientBuilder::new()
        .colors(&colours)
        .domain(&positions)
        .build::<LinearGradient>()
        .map_err(|e| GradError::Gradient(e.to_string()))
}

/// Paint the gradient left to right across every row of a `width` x `height` image
pub fn render(stops: &[ColourStop], width: u32, height: u32) -> Result<RgbaImage> {
    let grad = build_gradient(stops)?;
    let span = (width.max(2) - 1) as f32;
    let mut img = RgbaImage::new(width, height);
    for x in 0..width {
        let px = Rgba(grad.at(x as f32 / span).to_rgba8());
        for y in 0..height {
            img.put_pixel(x, y, px);
        }
    }
    Ok(img)
}

/// Render a `stop:… rgba(…)` gradient string and encode it as PNG.
///
/// No destination means the export was cancelled.
pub fn save_png(gradient: &str, width: u32, height: u32, dest: Option<&Path>) -> Result<bool> {
    let Some(path) = dest else {
        return Ok(false);
    };
    let stops = parse_stops(gradient)?;
    let img = render(&stops, width, height)?;
    let mut png_data = Vec::new();
    PngEncoder::new(Cursor::new(&mut png_data)).write_image(
        img.as_raw(),
        width,
        height,
        ColorType::Rgba8.into(),
    )?;
    fs::write(path, png_data)?;
    info!(
        path = %path.display(),
        width,
        height,
        stops = stops.len(),
        "exported gradient image"
    );
    Ok(true)
}
