//! Text measurement and line splitting for labels and the legend.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Vertical distance between consecutive baselines.
pub fn line_height_px(font_px: u32) -> i32 {
    (font_px as f32 * 1.2).ceil() as i32
}

/// Split a label on explicit line breaks, dropping the trailing blanks authors leave
/// before `\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_label_lines() {
        let lines = split_lines("Maple More than 50% \nof Annual Planting");
        assert_eq!(lines, vec!["Maple More than 50%", "of Annual Planting"]);
    }

    #[test]
    fn width_grows_with_font() {
        assert!(estimate_text_width_px("Elm", 20) > estimate_text_width_px("Elm", 10));
        assert_eq!(estimate_text_width_px("", 20), 0);
    }
}
