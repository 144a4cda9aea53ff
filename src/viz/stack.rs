//! Cumulative layer geometry for stacked-area charts.

use crate::models::PlantingTable;
use plotters::style::RGBColor;

/// One filled band of the stack, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedLayer {
    pub species: String,
    pub color: RGBColor,
    /// Bottom edge: the running total of all layers below.
    pub lower: Vec<(f64, f64)>,
    /// Top edge: `lower` plus this species' count.
    pub upper: Vec<(f64, f64)>,
}

impl StackedLayer {
    /// Closed outline: bottom edge left to right, top edge right to left.
    pub fn polygon(&self) -> Vec<(f64, f64)> {
        let mut poly = Vec::with_capacity(self.lower.len() * 2);
        poly.extend(self.lower.iter().copied());
        poly.extend(self.upper.iter().rev().copied());
        poly
    }
}

/// Stack `species` (bottom first) over the rows of `table`, sorted by year.
///
/// `colors[i]` belongs to `species[i]`; both slices have the same length.
pub fn stack_layers<S: AsRef<str>>(
    table: &PlantingTable,
    species: &[S],
    colors: &[RGBColor],
) -> Vec<StackedLayer> {
    let mut rows: Vec<_> = table.rows.iter().collect();
    rows.sort_by_key(|r| r.year);

    let mut cum = vec![0.0f64; rows.len()];
    species
        .iter()
        .zip(colors)
        .map(|(name, color)| {
            let name = name.as_ref();
            let mut lower = Vec::with_capacity(rows.len());
            let mut upper = Vec::with_capacity(rows.len());
            for (i, row) in rows.iter().enumerate() {
                let x = row.year as f64;
                lower.push((x, cum[i]));
                cum[i] += row.count(name) as f64;
                upper.push((x, cum[i]));
            }
            StackedLayer {
                species: name.to_string(),
                color: *color,
                lower,
                upper,
            }
        })
        .collect()
}

/// Height of the whole stack at its tallest year.
pub fn max_stack_total(layers: &[StackedLayer]) -> f64 {
    layers
        .last()
        .map(|top| top.upper.iter().map(|(_, y)| *y).fold(0.0, f64::max))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlantingRecord;

    const RED: RGBColor = RGBColor(255, 0, 0);
    const GREEN: RGBColor = RGBColor(0, 255, 0);

    #[test]
    fn layers_chain_and_total_matches_rows() {
        let t = PlantingTable::new(
            vec!["Maple".into(), "Spruce".into()],
            vec![
                PlantingRecord::new(1921).with("Maple", 10).with("Spruce", 5),
                PlantingRecord::new(1920).with("Maple", 600).with("Spruce", 400),
            ],
        );
        let layers = stack_layers(&t, &["Maple", "Spruce"], &[RED, GREEN]);
        assert_eq!(layers.len(), 2);
        // sorted by year
        assert_eq!(layers[0].upper[0], (1920.0, 600.0));
        assert_eq!(layers[1].lower, layers[0].upper);
        assert_eq!(layers[1].upper[0], (1920.0, 1000.0));
        assert_eq!(layers[1].upper[1], (1921.0, 15.0));
        assert_eq!(max_stack_total(&layers), 1000.0);
        assert_eq!(layers[0].polygon().len(), 4);
    }

    #[test]
    fn empty_table_gives_empty_layers() {
        let t = PlantingTable::new(vec!["Elm".into()], vec![]);
        let layers = stack_layers(&t, &["Elm"], &[RED]);
        assert!(layers[0].upper.is_empty());
        assert_eq!(max_stack_total(&layers), 0.0);
    }
}
