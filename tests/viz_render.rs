use std::fs;
use std::path::PathBuf;
use species_planted::viz::{self, fonts};
use species_planted::{CityConfig, PlantingRecord, PlantingTable};

/// Text needs a TrueType file; skip rendering checks on machines without one.
fn font_available() -> bool {
    let found = fonts::discover_font(None).is_some();
    if !found {
        eprintln!("skipping render test: no system font (set SPECIES_PLANTED_FONT)");
    }
    found
}

fn winnipeg_table() -> PlantingTable {
    let cfg = CityConfig::winnipeg();
    let species: Vec<String> = cfg.species.names().iter().map(|s| s.to_string()).collect();
    let rows = (1940..=1975)
        .map(|y| {
            let mut r = PlantingRecord::new(y);
            for (i, s) in species.iter().enumerate() {
                r.counts.insert(s.clone(), ((y - 1940) as u64 * 7 + i as u64 * 13) % 300);
            }
            r
        })
        .collect();
    PlantingTable::new(species, rows)
}

fn small(mut cfg: CityConfig, out: PathBuf) -> CityConfig {
    cfg.chart.figure.dpi = 60;
    cfg.chart.output = out;
    cfg
}

#[test]
fn writes_png_and_svg() {
    if !font_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    for name in ["chart.png", "chart.svg"] {
        let cfg = small(CityConfig::winnipeg(), dir.path().join(name));
        let out = viz::plot_city(&winnipeg_table(), &cfg, None).unwrap();
        let bytes = fs::read(&out).unwrap();
        assert!(!bytes.is_empty(), "{name} has content");
        if name.ends_with(".png") {
            assert_eq!(&bytes[..4], b"\x89PNG");
        } else {
            let text = String::from_utf8_lossy(&bytes);
            assert!(text.contains("<svg"));
            assert!(text.contains("Species Planted"));
        }
    }
}

#[test]
fn preview_raster_matches_figure_size() {
    if !font_available() {
        return;
    }
    let cfg = CityConfig::winnipeg();
    let scene = viz::prepare(&winnipeg_table(), &cfg).unwrap();
    let img = viz::render_rgb(&scene, &cfg.chart, 40, None).unwrap();
    assert_eq!((img.width, img.height), (600, 320));
    assert_eq!(img.pixels.len(), 600 * 320 * 3);
    // white background, colored layers somewhere
    assert!(img.pixels.iter().any(|&b| b != 255));
}

#[test]
fn invalid_output_directory_is_error() {
    if !font_available() {
        return;
    }
    let cfg = small(
        CityConfig::winnipeg(),
        PathBuf::from("/definitely/not/here/chart.png"),
    );
    assert!(viz::plot_city(&winnipeg_table(), &cfg, None).is_err());
}
