//! Residual-versus-fitted scatter plots.
//!
//! The left panel shows the raw OLS residuals, the right panel the Pearson
//! residuals of the WLS fit. A fan that opens to the right on the left panel
//! and a flat band on the right panel is the expected picture.

use super::ReportError;
use crate::estimation::FittedModel;
use faer::Col;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// Output size in pixels (width, height).
pub const PLOT_SIZE: (u32, u32) = (1600, 600);

const X_LABEL: &str = "Valores Previstos";

const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

struct Panel<'a> {
    title: &'a str,
    y_label: &'a str,
    fitted: &'a Col<f64>,
    residuals: &'a Col<f64>,
}

/// Render both residual panels side by side and save them as PNG.
pub fn create_diagnostic_plots<P: AsRef<Path>>(
    ols: &FittedModel,
    wls: &FittedModel,
    path: P,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let wls_pearson = wls.pearson_residuals();

    let panels = [
        Panel {
            title: "Análise de Resíduos: Antes da Correção (OLS)",
            y_label: "Resíduos",
            fitted: ols.fitted_values(),
            residuals: ols.residuals(),
        },
        Panel {
            title: "Análise de Resíduos: Depois da Correção (WLS) - Pearson",
            y_label: "Resíduos Pearson",
            fitted: wls.fitted_values(),
            residuals: &wls_pearson,
        },
    ];

    register_fonts()?;

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let areas = root.split_evenly((1, 2));
    for (area, panel) in areas.iter().zip(&panels) {
        draw_panel(area, panel)?;
    }

    root.present().map_err(plot_error)?;
    println!("\nGráfico de diagnóstico salvo em: {}", path.display());
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel<'_>,
) -> Result<(), ReportError> {
    let x_range = padded_range(panel.fitted.iter().copied(), false);
    let y_range = padded_range(panel.residuals.iter().copied(), true);
    let zero_line = vec![(x_range.start, 0.0), (x_range.end, 0.0)];

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT_FAMILY, 22))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(panel.y_label)
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            panel
                .fitted
                .iter()
                .zip(panel.residuals.iter())
                .map(|(&x, &y)| Circle::new((x, y), 4, BLUE.mix(0.7).filled())),
        )
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(zero_line, RED.stroke_width(2)))
        .map_err(plot_error)?;

    Ok(())
}

/// Make the bundled typeface available to every text element of the chart.
fn register_fonts() -> Result<(), ReportError> {
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
        .map_err(|_| ReportError::Plot("bundled font could not be parsed".to_string()))
}

/// Data range widened by 5% on each side; optionally forced to contain zero.
fn padded_range(values: impl Iterator<Item = f64>, include_zero: bool) -> Range<f64> {
    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return -1.0..1.0;
    }
    if hi - lo <= f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }

    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}

fn plot_error<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Plot(err.to_string())
}
