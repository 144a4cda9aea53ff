use std::fs;
use std::path::Path;
use species_planted::viz::{self, YAxisMode};
use species_planted::{CityConfig, LabelAlign, PlantingError, YearRange, stats, storage};

const CALGARY_HEADER: &str =
    "Year,Poplars (incl. Cottonwoods),Spruce,Ash,Elm,Birch,Maple,Other,Unknown";

fn write_calgary_csv(dir: &Path) -> std::path::PathBuf {
    let mut body = String::from(CALGARY_HEADER);
    body.push('\n');
    for year in 1905..=1950 {
        let (maple, spruce) = if year == 1920 { (600, 400) } else { (0, 0) };
        body.push_str(&format!("{year},0,{spruce},0,0,0,{maple},0,0\n"));
    }
    let path = dir.join("Calgary.csv");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn filter_keeps_only_closed_range_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let table = storage::load_table(write_calgary_csv(dir.path())).unwrap();
    let f = table.filter_years(YearRange::new(1913, 1941).unwrap()).unwrap();
    let years = f.years();
    assert_eq!(years.len(), 29);
    assert!(years.iter().all(|y| (1913..=1941).contains(y)));
    let mut dedup = years.clone();
    dedup.dedup();
    assert_eq!(dedup, years);
}

#[test]
fn scenario_1920_stack_height_is_1000() {
    let dir = tempfile::tempdir().unwrap();
    let table = storage::load_table(write_calgary_csv(dir.path())).unwrap();
    let cfg = CityConfig::calgary();
    let scene = viz::prepare(&table, &cfg).unwrap();

    assert!(scene.table.years().contains(&1920));
    let top = scene.layers.last().unwrap();
    let (_, h) = top.upper.iter().copied().find(|(x, _)| *x == 1920.0).unwrap();
    assert_eq!(h, 1000.0);

    // stacking is additive at every year
    let names = cfg.species.names();
    for (i, row) in scene.table.rows.iter().enumerate() {
        assert_eq!(top.upper[i].1, row.total_of(&names) as f64);
    }
}

#[test]
fn every_milestone_yields_one_line_marker_label() {
    let dir = tempfile::tempdir().unwrap();
    let table = storage::load_table(write_calgary_csv(dir.path())).unwrap();
    let cfg = CityConfig::calgary();
    let scene = viz::prepare(&table, &cfg).unwrap();
    assert_eq!(scene.annotations.len(), cfg.milestones.len());
    for (a, m) in scene.annotations.iter().zip(&cfg.milestones) {
        assert_eq!(a.line, [(m.year as f64, 0.0), (m.year as f64, m.y)]);
        assert_eq!(a.marker, (m.year as f64, m.y));
        assert_eq!(a.label.align, LabelAlign::Left);
    }
}

#[test]
fn unbounded_axis_leaves_room_for_milestones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Winnipeg.csv");
    let cfg = CityConfig::winnipeg();
    let mut body = String::from("Year");
    for n in cfg.species.names() {
        body.push_str(&format!(",\"{n}\""));
    }
    body.push('\n');
    for year in 1945..=1971 {
        body.push_str(&format!("{year},100,0,0,0,0,0,0,0\n"));
    }
    fs::write(&path, body).unwrap();

    let table = storage::load_table(&path).unwrap();
    assert_eq!(cfg.chart.y_axis, YAxisMode::Unbounded);
    let scene = viz::prepare(&table, &cfg).unwrap();
    assert!(scene.y_max >= 2500.0);
    let legend: Vec<&str> = scene.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(legend, cfg.species.names());
}

#[test]
fn unknown_color_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let table = storage::load_table(write_calgary_csv(dir.path())).unwrap();
    let mut cfg = CityConfig::calgary();
    cfg.species.entries[0].color = "Treebark".into();
    let err = viz::prepare(&table, &cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PlantingError>(),
        Some(PlantingError::UnknownColor(_))
    ));
}

#[test]
fn stats_over_filtered_years() {
    let dir = tempfile::tempdir().unwrap();
    let table = storage::load_table(write_calgary_csv(dir.path())).unwrap();
    let f = table.filter_years(YearRange::new(1913, 1941).unwrap()).unwrap();
    let s = stats::species_summary(&f, &["Maple", "Spruce", "Elm"]);
    assert_eq!(s[0].total, 600);
    assert_eq!(s[0].peak_year, Some(1920));
    assert_eq!(s[1].share, Some(0.4));
    assert_eq!(s[2].first_year, None);
}

#[test]
fn any_css_color_name_works_in_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let table = storage::load_table(write_calgary_csv(dir.path())).unwrap();
    let mut v: serde_json::Value = serde_json::from_str(&CityConfig::calgary().to_json_pretty().unwrap()).unwrap();
    v["species"][0]["color"] = "DarkOliveGreen".into();
    v["species"][1]["color"] = "Wheat".into();
    v["species"][2]["color"] = "LightSteelBlue".into();
    let path = dir.path().join("city.json");
    fs::write(&path, v.to_string()).unwrap();

    let cfg = CityConfig::from_json_file(&path).unwrap();
    let scene = viz::prepare(&table, &cfg).unwrap();
    assert_eq!(scene.layers[0].color, plotters::style::RGBColor(85, 107, 47));
    assert_eq!(scene.layers[1].color, plotters::style::RGBColor(245, 222, 179));
}

#[test]
fn zero_dpi_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let table = storage::load_table(write_calgary_csv(dir.path())).unwrap();
    let mut cfg = CityConfig::calgary();
    cfg.chart.figure.dpi = 0;
    cfg.chart.output = dir.path().join("chart.png");
    let err = viz::plot_city(&table, &cfg, None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PlantingError>(),
        Some(PlantingError::InvalidFigure { dpi: 0, .. })
    ));
    assert!(!cfg.chart.output.exists());
}
