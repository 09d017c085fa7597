//! Visualization layer: correlation heatmaps and composite scatter plots
//!
//! Presentation only; nothing here feeds back into the analysis. Rendering
//! uses the plotters bitmap backend and writes PNG files into the output
//! directory, overwriting prior runs.

use crate::correlate::CorrelationBlock;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use sra_common::{Error, Result};
use std::path::Path;
use tracing::warn;

/// Pixel size of one heatmap panel
const PANEL_WIDTH: u32 = 1000;
const PANEL_HEIGHT: u32 = 800;
/// Panels per row in the combined heatmap image
const PANELS_PER_ROW: usize = 2;

/// Panel-internal margins (pixels)
const MARGIN_LEFT: i32 = 190;
const MARGIN_TOP: i32 = 50;
const MARGIN_RIGHT: i32 = 20;
const MARGIN_BOTTOM: i32 = 170;

fn render_err(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

/// Diverging blue-white-red color scale over [-1, 1]
fn diverging_color(value: f64) -> RGBColor {
    let t = value.clamp(-1.0, 1.0);
    let lerp = |a: u8, b: u8, f: f64| (a as f64 + (b as f64 - a as f64) * f).round() as u8;

    let (white_r, white_g, white_b) = (245u8, 245u8, 245u8);
    if t < 0.0 {
        // white -> blue with increasing magnitude
        let f = -t;
        RGBColor(
            lerp(white_r, 59, f),
            lerp(white_g, 76, f),
            lerp(white_b, 192, f),
        )
    } else {
        // white -> red with increasing magnitude
        RGBColor(
            lerp(white_r, 180, t),
            lerp(white_g, 4, t),
            lerp(white_b, 38, t),
        )
    }
}

/// Render one combined image with one correlation heatmap panel per
/// eligible application, two panels per row.
pub fn render_heatmap_grid(path: &Path, panels: &[(String, CorrelationBlock)]) -> Result<()> {
    if panels.is_empty() {
        warn!("No eligible applications; skipping heatmap image");
        return Ok(());
    }

    let grid_rows = panels.len().div_ceil(PANELS_PER_ROW);
    let width = PANEL_WIDTH * PANELS_PER_ROW as u32;
    let height = PANEL_HEIGHT * grid_rows as u32;

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let areas = root.split_evenly((grid_rows, PANELS_PER_ROW));
    for ((app, block), area) in panels.iter().zip(areas.iter()) {
        draw_heatmap_panel(area, app, block)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Draw one application's heatmap into its panel area
fn draw_heatmap_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    app: &str,
    block: &CorrelationBlock,
) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let n_rows = block.row_labels.len();
    let n_cols = block.col_labels.len();
    if n_rows == 0 || n_cols == 0 {
        return Ok(());
    }

    let plot_w = width as i32 - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height as i32 - MARGIN_TOP - MARGIN_BOTTOM;
    let cell_w = plot_w / n_cols as i32;
    let cell_h = plot_h / n_rows as i32;

    let title_style = TextStyle::from(("sans-serif", 24).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    area.draw(&Text::new(
        format!("SCM vs AttrakDiff Correlation for {}", app.to_uppercase()),
        (width as i32 / 2, 12),
        title_style,
    ))
    .map_err(render_err)?;

    let annotation = |value: f64| {
        let color: &RGBColor = if value.abs() > 0.6 { &WHITE } else { &BLACK };
        TextStyle::from(("sans-serif", 14).into_font())
            .color(color)
            .pos(Pos::new(HPos::Center, VPos::Center))
    };

    for (r, row) in block.values.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let x0 = MARGIN_LEFT + c as i32 * cell_w;
            let y0 = MARGIN_TOP + r as i32 * cell_h;
            let fill = if value.is_nan() {
                WHITE
            } else {
                diverging_color(value)
            };
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                fill.filled(),
            ))
            .map_err(render_err)?;

            // Undefined coefficients stay blank
            if !value.is_nan() {
                area.draw(&Text::new(
                    format!("{:.2}", value),
                    (x0 + cell_w / 2, y0 + cell_h / 2),
                    annotation(value),
                ))
                .map_err(render_err)?;
            }
        }
    }

    // Row labels (SCM columns), right-aligned against the grid
    let row_style = TextStyle::from(("sans-serif", 15).into_font())
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (r, label) in block.row_labels.iter().enumerate() {
        let y = MARGIN_TOP + r as i32 * cell_h + cell_h / 2;
        area.draw(&Text::new(label.clone(), (MARGIN_LEFT - 8, y), row_style.clone()))
            .map_err(render_err)?;
    }

    // Column labels (AttrakDiff pairs), rotated below the grid
    let col_style = TextStyle::from(("sans-serif", 15).into_font())
        .transform(FontTransform::Rotate90)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (c, label) in block.col_labels.iter().enumerate() {
        let x = MARGIN_LEFT + c as i32 * cell_w + cell_w / 2;
        area.draw(&Text::new(
            label.clone(),
            (x, MARGIN_TOP + plot_h + 10),
            col_style.clone(),
        ))
        .map_err(render_err)?;
    }

    Ok(())
}

/// Render a labeled scatter plot of per-application composite indices
pub fn render_scatter(
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(String, f64, f64)],
    color: RGBColor,
) -> Result<()> {
    if points.is_empty() {
        warn!("No data points for '{}'; skipping scatter plot", title);
        return Ok(());
    }

    let (x_range, y_range) = padded_ranges(points);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(points.iter().map(|(name, x, y)| {
            EmptyElement::at((*x, *y))
                + Circle::new((0, 0), 5, color.filled())
                + Text::new(name.clone(), (8, -8), ("sans-serif", 14))
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Axis ranges with 10% padding around the data extent
fn padded_ranges(
    points: &[(String, f64, f64)],
) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let pad = |min: f64, max: f64| {
        let span = max - min;
        let pad = if span == 0.0 { 0.5 } else { span * 0.1 };
        (min - pad)..(max + pad)
    };

    let x_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p.2).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.2).fold(f64::NEG_INFINITY, f64::max);

    (pad(x_min, x_max), pad(y_min, y_max))
}
