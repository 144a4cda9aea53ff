//! Utility functions for visualization: axis bounds, tick formatting, locale mapping.

use crate::models::YearRange;
use num_format::{Locale, ToFormattedString};

use super::text::estimate_text_width_px;
use super::types::YAxisMode;

/// Headroom factor for [`YAxisMode::Derived`].
pub const DERIVED_HEADROOM: f64 = 1.1;
/// Headroom factor for [`YAxisMode::Unbounded`], leaving room for markers.
pub const AUTO_HEADROOM: f64 = 1.05;

/// Upper bound of the Y axis. The lower bound is always 0.
///
/// - `Derived`: largest stacked total × 1.1 (milestones may be clipped).
/// - `Unbounded`: fits both the stacked totals and the milestone heights.
///
/// Falls back to 1.0 when nothing positive is drawn.
pub fn y_upper_bound(mode: YAxisMode, max_total: f64, max_milestone: f64) -> f64 {
    let top = match mode {
        YAxisMode::Derived => max_total * DERIVED_HEADROOM,
        YAxisMode::Unbounded => max_total.max(max_milestone) * AUTO_HEADROOM,
    };
    if top.is_finite() && top > 0.0 { top } else { 1.0 }
}

/// X range as floats. A single-year range is widened so the chart has a width.
pub fn x_bounds(range: YearRange) -> (f64, f64) {
    if range.lo == range.hi {
        (range.lo as f64 - 0.5, range.hi as f64 + 0.5)
    } else {
        (range.lo as f64, range.hi as f64)
    }
}

/// Roughly one tick every five years, bounded to keep labels legible.
pub fn x_label_count(range: YearRange) -> usize {
    (range.len() / 5 + 1).clamp(2, 15)
}

/// Whole-number tick label with locale grouping, e.g. `2,500` or `2.500`.
pub fn format_count(v: f64, locale: &Locale) -> String {
    (v.round() as i64).to_formatted_string(locale)
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Width of the left label area: widest tick label, tick marks, and the rotated axis title.
pub fn compute_left_label_area_px(
    y_max: f64,
    ticks: usize,
    locale: &Locale,
    tick_font_px: u32,
    desc_font_px: u32,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 { 0.0 } else { i as f64 / ticks as f64 };
        let s = format_count(y_max * t, locale);
        max_px = max_px.max(estimate_text_width_px(&s, tick_font_px));
    }
    let desc_px = (desc_font_px as f32 * 1.6).ceil() as u32;
    max_px + desc_px + tick_font_px
}
