// ABOUTME: HTTP handler exposing the color model
// ABOUTME: Lets clients preview HSV and contrast color for a tag color

use axum::{extract::Path, Json};
use serde::Serialize;

use super::response::{ApiError, ApiResult};
use atelier_core::{contrast_color, hex_to_hsv, parse_hex, Hsv};

#[derive(Debug, Serialize)]
pub struct ColorInfo {
    pub hex: String,
    pub hsv: Hsv,
    pub contrast: &'static str,
}

/// Describe a color given as six hex digits (the `#` is optional)
pub async fn describe_color(Path(hex): Path<String>) -> ApiResult<ColorInfo> {
    let hex = if hex.starts_with('#') {
        hex
    } else {
        format!("#{}", hex)
    };

    let rgb = parse_hex(&hex)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid color '{}': expected #RRGGBB", hex)))?;

    Ok(Json(ColorInfo {
        hex: rgb.to_hex(),
        hsv: hex_to_hsv(&hex),
        contrast: contrast_color(&hex),
    }))
}
