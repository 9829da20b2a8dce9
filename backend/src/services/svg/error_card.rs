use super::{escape_text, FONT_FAMILY};

/// Card shown in place of a badge when a request fails
pub fn render_error_card(message: &str, width: u32) -> String {
    format!(
        r##"<svg width="{width}" height="195" viewBox="0 0 {width} 195" fill="none" xmlns="http://www.w3.org/2000/svg">
  <style>
    .error-title {{ font: 700 18px {font}; fill: #e74c3c; }}
    .error-msg {{ font: 400 14px {font}; fill: #7f8c8d; }}
  </style>
  <rect x="0.5" y="0.5" rx="4.5" height="99%" stroke="#e4e2e2" width="{inner}" fill="#fffbfb"/>
  <g transform="translate({center}, 50)">
    <circle r="25" fill="#e74c3c" opacity="0.1"/>
    <text x="0" y="0" text-anchor="middle" dominant-baseline="middle" style="font-size: 40px; fill: #e74c3c;">⚠</text>
  </g>
  <g transform="translate({center}, 110)">
    <text x="0" y="0" text-anchor="middle" class="error-title">Error</text>
    <text x="0" y="25" text-anchor="middle" class="error-msg">{message}</text>
  </g>
</svg>"##,
        width = width,
        inner = width - 1,
        center = width as f64 / 2.0,
        font = FONT_FAMILY,
        message = escape_text(message),
    )
}
