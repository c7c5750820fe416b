use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::errors::CoreError;
use crate::models::position::Position;

/// Artifact file names, under the static directory.
pub const STOCK_CHART_FILE: &str = "stock_piechart.jpg";
pub const ALLOCATION_CHART_FILE: &str = "cash_stock_piechart.jpg";

const CHART_SIZE: (u32, u32) = (1200, 1000);

/// Slice palette (matplotlib tab10 values). The dashboard page renders the
/// matching legend, so slice order here must stay index-aligned with the
/// slice lists below.
pub const SLICE_COLORS: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

/// Color for the slice at `index`, cycling through the palette.
#[must_use]
pub fn slice_color(index: usize) -> (u8, u8, u8) {
    SLICE_COLORS[index % SLICE_COLORS.len()]
}

/// What happened to a chart artifact on this view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartOutcome {
    /// Data present — the image file was (re)written.
    Rendered,
    /// No data — the image file was removed if it existed.
    Retracted,
}

/// Labelled slices for the per-ticker value chart: open positions with a
/// positive market value, in position order.
#[must_use]
pub fn stock_slices(positions: &[Position]) -> Vec<(String, f64)> {
    positions
        .iter()
        .filter(|p| p.market_value() > 0.0)
        .map(|p| (p.ticker.clone(), p.market_value()))
        .collect()
}

/// Labelled slices for the cash/stock allocation chart. Zero quantities are
/// dropped; when all three are zero the list is empty and the chart retracts.
#[must_use]
pub fn allocation_slices(usd_in_twd: f64, twd: f64, stock_value: f64) -> Vec<(String, f64)> {
    [
        ("USD".to_string(), usd_in_twd),
        ("NTD".to_string(), twd),
        ("Stock".to_string(), stock_value),
    ]
    .into_iter()
    .filter(|(_, value)| *value > 0.0)
    .collect()
}

/// Regenerates the two pie-chart artifacts on every dashboard view.
///
/// Each chart follows the same state machine: **render** (slices present →
/// overwrite the file) vs **retract** (no slices → delete the file,
/// ignoring an already-absent file).
pub struct ChartService {
    static_dir: PathBuf,
}

impl ChartService {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
        }
    }

    #[must_use]
    pub fn stock_chart_path(&self) -> PathBuf {
        self.static_dir.join(STOCK_CHART_FILE)
    }

    #[must_use]
    pub fn allocation_chart_path(&self) -> PathBuf {
        self.static_dir.join(ALLOCATION_CHART_FILE)
    }

    /// Chart A: each ticker's share of the total stock market value.
    pub fn render_stock_chart(&self, positions: &[Position]) -> Result<ChartOutcome, CoreError> {
        self.render_or_retract(&self.stock_chart_path(), &stock_slices(positions))
    }

    /// Chart B: three-way split of USD cash (in TWD terms), TWD cash, and
    /// total stock market value.
    pub fn render_allocation_chart(
        &self,
        usd_in_twd: f64,
        twd: f64,
        stock_value: f64,
    ) -> Result<ChartOutcome, CoreError> {
        self.render_or_retract(
            &self.allocation_chart_path(),
            &allocation_slices(usd_in_twd, twd, stock_value),
        )
    }

    fn render_or_retract(
        &self,
        path: &Path,
        slices: &[(String, f64)],
    ) -> Result<ChartOutcome, CoreError> {
        if slices.is_empty() {
            retract(path)?;
            return Ok(ChartOutcome::Retracted);
        }
        fs::create_dir_all(&self.static_dir)?;
        draw_pie(path, slices)?;
        Ok(ChartOutcome::Rendered)
    }
}

/// Best-effort delete; an already-absent file is not an error.
fn retract(path: &Path) -> Result<(), CoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Draw a pie as filled circle sectors.
///
/// Sectors are polygons sampled along the arc — no text is drawn into the
/// bitmap (labels live in the HTML legend), which keeps the renderer free
/// of system font dependencies.
fn draw_pie(path: &Path, slices: &[(String, f64)]) -> Result<(), CoreError> {
    let total: f64 = slices.iter().map(|(_, value)| value).sum();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let center = (CHART_SIZE.0 as i32 / 2, CHART_SIZE.1 as i32 / 2);
    let radius = f64::from(CHART_SIZE.0.min(CHART_SIZE.1)) * 0.4;

    // Start at 12 o'clock, sweep clockwise.
    let mut start = -std::f64::consts::FRAC_PI_2;
    for (index, (_, value)) in slices.iter().enumerate() {
        let sweep = value / total * std::f64::consts::TAU;
        let steps = ((sweep / 0.01).ceil() as usize).max(2);

        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for step in 0..=steps {
            let angle = start + sweep * (step as f64 / steps as f64);
            points.push((
                center.0 + (radius * angle.cos()).round() as i32,
                center.1 + (radius * angle.sin()).round() as i32,
            ));
        }

        let (r, g, b) = slice_color(index);
        root.draw(&Polygon::new(points, RGBColor(r, g, b).filled()))
            .map_err(chart_err)?;
        start += sweep;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

fn chart_err<E: std::fmt::Display>(e: E) -> CoreError {
    CoreError::Chart(e.to_string())
}
