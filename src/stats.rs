use crate::models::{PlantingRecord, PlantingTable};
use serde::{Deserialize, Serialize};

/// Planting summary for one species over a (filtered) table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesSummary {
    pub species: String,
    pub total: u64,
    /// Number of years with at least one tree planted.
    pub years_planted: usize,
    pub first_year: Option<i32>,
    pub peak_year: Option<i32>,
    pub peak_count: u64,
    /// Fraction of all configured species planted over the table (0..=1).
    pub share: Option<f64>,
}

/// Per-species summary, in the order given.
pub fn species_summary<S: AsRef<str>>(table: &PlantingTable, species: &[S]) -> Vec<SpeciesSummary> {
    let grand: u64 = table.rows.iter().map(|r| r.total_of(species)).sum();
    species
        .iter()
        .map(|s| {
            let name = s.as_ref();
            let mut total = 0u64;
            let mut years_planted = 0usize;
            let mut first_year = None;
            let mut peak: Option<(i32, u64)> = None;
            for r in &table.rows {
                let c = r.count(name);
                total += c;
                if c > 0 {
                    years_planted += 1;
                    first_year = Some(first_year.map_or(r.year, |y: i32| y.min(r.year)));
                    // earliest year wins ties
                    if peak.is_none_or(|(_, best)| c > best) {
                        peak = Some((r.year, c));
                    }
                }
            }
            SpeciesSummary {
                species: name.to_string(),
                total,
                years_planted,
                first_year,
                peak_year: peak.map(|(y, _)| y),
                peak_count: peak.map(|(_, c)| c).unwrap_or(0),
                share: if grand > 0 {
                    Some(total as f64 / grand as f64)
                } else {
                    None
                },
            }
        })
        .collect()
}

/// `(year, total)` over the given species, in row order.
pub fn yearly_totals<S: AsRef<str>>(table: &PlantingTable, species: &[S]) -> Vec<(i32, u64)> {
    table
        .rows
        .iter()
        .map(|r| (r.year, r.total_of(species)))
        .collect()
}

/// Fraction of one year's planting (over `species`) that was `target`.
pub fn share_in_year<S: AsRef<str>>(row: &PlantingRecord, target: &str, species: &[S]) -> Option<f64> {
    let total = row.total_of(species);
    if total == 0 {
        None
    } else {
        Some(row.count(target) as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PlantingTable {
        PlantingTable::new(
            vec!["Maple".into(), "Elm".into()],
            vec![
                PlantingRecord::new(1921).with("Maple", 100).with("Elm", 0),
                PlantingRecord::new(1922).with("Maple", 600).with("Elm", 400),
                PlantingRecord::new(1929).with("Maple", 600).with("Elm", 900),
            ],
        )
    }

    #[test]
    fn summary_totals_peaks_and_shares() {
        let s = species_summary(&table(), &["Maple", "Elm"]);
        assert_eq!(s[0].species, "Maple");
        assert_eq!(s[0].total, 1300);
        assert_eq!(s[0].peak_year, Some(1922));
        assert_eq!(s[1].first_year, Some(1922));
        assert_eq!(s[1].years_planted, 2);
        let sum: f64 = s.iter().filter_map(|x| x.share).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn totals_and_yearly_share() {
        let t = table();
        assert_eq!(
            yearly_totals(&t, &["Maple", "Elm"]),
            vec![(1921, 100), (1922, 1000), (1929, 1500)]
        );
        assert_eq!(share_in_year(&t.rows[1], "Maple", &["Maple", "Elm"]), Some(0.6));
        let empty = PlantingRecord::new(1930);
        assert_eq!(share_in_year(&empty, "Maple", &["Maple"]), None);
    }
}
