use crate::error::PlantingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive range of years, e.g. `1913..=1941`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Result<Self, PlantingError> {
        let range = Self { lo, hi };
        range.validate()?;
        Ok(range)
    }

    /// Ranges built through serde skip `new`, so callers re-check before use.
    pub fn validate(&self) -> Result<(), PlantingError> {
        if self.lo > self.hi {
            return Err(PlantingError::InvalidRange {
                lo: self.lo,
                hi: self.hi,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, year: i32) -> bool {
        self.lo <= year && year <= self.hi
    }

    /// Number of calendar years covered.
    pub fn len(&self) -> usize {
        (i64::from(self.hi) - i64::from(self.lo) + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One spreadsheet row: a year and the number of trees planted per species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingRecord {
    pub year: i32,
    pub counts: BTreeMap<String, u64>,
}

impl PlantingRecord {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            counts: BTreeMap::new(),
        }
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, species: &str, count: u64) -> Self {
        self.counts.insert(species.to_string(), count);
        self
    }

    /// Count for `species`; absent columns read as zero.
    pub fn count(&self, species: &str) -> u64 {
        self.counts.get(species).copied().unwrap_or(0)
    }

    /// Sum over the given species only.
    pub fn total_of<S: AsRef<str>>(&self, species: &[S]) -> u64 {
        species.iter().map(|s| self.count(s.as_ref())).sum()
    }
}

/// Rows of a planting sheet plus its species columns in sheet order (`Year` excluded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingTable {
    pub species: Vec<String>,
    pub rows: Vec<PlantingRecord>,
}

impl PlantingTable {
    pub fn new(species: Vec<String>, rows: Vec<PlantingRecord>) -> Self {
        Self { species, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, species: &str) -> bool {
        self.species.iter().any(|s| s == species)
    }

    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    /// Keep rows with `lo <= year <= hi`, in their original order.
    /// Missing years are not filled in.
    pub fn filter_years(&self, range: YearRange) -> Result<PlantingTable, PlantingError> {
        range.validate()?;
        let rows = self
            .rows
            .iter()
            .filter(|r| range.contains(r.year))
            .cloned()
            .collect();
        Ok(PlantingTable {
            species: self.species.clone(),
            rows,
        })
    }
}

/// Horizontal placement of a milestone label relative to its marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelAlign {
    /// Label starts just right of the marker (left edge aligned).
    #[default]
    Left,
    /// Label ends just left of the marker (right edge aligned).
    Right,
}

/// A curated historical event drawn on the chart.
///
/// `y` is a hand-picked display height, not a value taken from the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: i32,
    pub label: String,
    pub y: f64,
    #[serde(default)]
    pub align: LabelAlign,
}

impl Milestone {
    pub fn new(year: i32, label: impl Into<String>, y: f64) -> Self {
        Self {
            year,
            label: label.into(),
            y,
            align: LabelAlign::Left,
        }
    }

    pub fn aligned(mut self, align: LabelAlign) -> Self {
        self.align = align;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PlantingTable {
        let rows = (1910..=1945)
            .map(|y| PlantingRecord::new(y).with("Maple", (y - 1900) as u64))
            .collect();
        PlantingTable::new(vec!["Maple".into()], rows)
    }

    #[test]
    fn filter_keeps_closed_range_in_order() {
        let t = table();
        let f = t.filter_years(YearRange::new(1913, 1941).unwrap()).unwrap();
        assert_eq!(f.len(), 29);
        assert_eq!(f.rows.first().unwrap().year, 1913);
        assert_eq!(f.rows.last().unwrap().year, 1941);
        assert!(f.years().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn full_i32_range_length_does_not_overflow() {
        let r = YearRange { lo: i32::MIN, hi: i32::MAX };
        assert_eq!(r.len(), 1usize << 32);
        assert_eq!(YearRange { lo: 1920, hi: 1919 }.len(), 0);
        assert_eq!(crate::viz::util::x_label_count(r), 15);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(YearRange::new(1941, 1913).is_err());
        let bad = YearRange { lo: 2, hi: 1 };
        assert!(table().filter_years(bad).is_err());
    }

    #[test]
    fn absent_species_reads_as_zero() {
        let r = PlantingRecord::new(1920).with("Maple", 600).with("Spruce", 400);
        assert_eq!(r.count("Elm"), 0);
        assert_eq!(r.total_of(&["Maple", "Spruce", "Elm"]), 1000);
    }

    #[test]
    fn milestone_alignment_defaults_left_in_json() {
        let m: Milestone =
            serde_json::from_str(r#"{"year":1958,"label":"x","y":2500.0}"#).unwrap();
        assert_eq!(m.align, LabelAlign::Left);
    }
}
