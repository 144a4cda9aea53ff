//! Milestone geometry: reference line, marker and offset label per milestone.

use crate::models::{LabelAlign, Milestone};

use super::text::split_lines;

/// Label offset from the marker, in points (x right, y up).
pub const LABEL_OFFSET_PT: f64 = 5.0;

/// Text placement relative to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub lines: Vec<String>,
    /// Offset from the marker in points; positive y is up.
    pub offset_pt: (f64, f64),
    pub align: LabelAlign,
}

/// Everything drawn for one milestone, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Vertical reference line from the axis up to the milestone height.
    pub line: [(f64, f64); 2],
    pub marker: (f64, f64),
    pub label: LabelPlacement,
}

/// One annotation per milestone, in the order given. Overlaps are left alone.
pub fn annotations(milestones: &[Milestone]) -> Vec<Annotation> {
    milestones
        .iter()
        .map(|m| {
            let x = m.year as f64;
            let dx = match m.align {
                LabelAlign::Left => LABEL_OFFSET_PT,
                LabelAlign::Right => -LABEL_OFFSET_PT,
            };
            Annotation {
                line: [(x, 0.0), (x, m.y)],
                marker: (x, m.y),
                label: LabelPlacement {
                    lines: split_lines(&m.label),
                    offset_pt: (dx, LABEL_OFFSET_PT),
                    align: m.align,
                },
            }
        })
        .collect()
}

/// Tallest milestone, or 0 when there are none.
pub fn max_milestone_height(milestones: &[Milestone]) -> f64 {
    milestones.iter().map(|m| m.y).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_and_marker_at_milestone() {
        let a = annotations(&[Milestone::new(
            1958,
            "First Year Ornamental \nSpecies are Planted",
            2500.0,
        )
        .aligned(LabelAlign::Right)]);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].line, [(1958.0, 0.0), (1958.0, 2500.0)]);
        assert_eq!(a[0].marker, (1958.0, 2500.0));
        assert_eq!(a[0].label.offset_pt, (-5.0, 5.0));
        assert_eq!(a[0].label.lines.len(), 2);
    }

    #[test]
    fn default_label_sits_right_of_marker() {
        let a = annotations(&[Milestone::new(1922, "Maple", 2500.0)]);
        assert_eq!(a[0].label.offset_pt, (5.0, 5.0));
        assert_eq!(a[0].label.align, LabelAlign::Left);
        assert_eq!(max_milestone_height(&[]), 0.0);
    }
}
