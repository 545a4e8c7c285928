//! Net value over time as an SVG line chart.

use anyhow::{anyhow, bail, Result};
use plotters::prelude::*;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use crate::calculator::SeriesPoint;
use crate::utils::format_currency;

const CHART_SIZE: (u32, u32) = (960, 540);
const LINE_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

/// One line on the chart
pub struct ChartLine<'a> {
    pub label: &'a str,
    pub points: &'a [SeriesPoint],
}

fn chart_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("Chart rendering failed: {}", e)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Value range across all lines, padded so flat lines stay visible
fn value_bounds(lines: &[ChartLine]) -> (f64, f64) {
    let values = lines
        .iter()
        .flat_map(|l| l.points.iter())
        .map(|p| to_f64(p.net_value));
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}

pub fn render_chart_svg(path: &Path, title: &str, lines: &[ChartLine]) -> Result<()> {
    if lines.iter().all(|l| l.points.is_empty()) {
        bail!("No data to chart");
    }

    let max_day = lines
        .iter()
        .flat_map(|l| l.points.iter())
        .map(|p| p.day)
        .max()
        .unwrap_or(0)
        .max(1);
    let (y_min, y_max) = value_bounds(lines);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(0u32..max_day, y_min..y_max)
        .map_err(chart_err)?;

    let money = |v: &f64| format_currency(Decimal::from_f64(*v).unwrap_or_default());
    chart
        .configure_mesh()
        .x_desc("Dias")
        .y_desc("Valor líquido")
        .y_label_formatter(&money)
        .draw()
        .map_err(chart_err)?;

    for (idx, line) in lines.iter().enumerate() {
        let color = LINE_COLORS[idx % LINE_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                line.points.iter().map(|p| (p.day, to_f64(p.net_value))),
                color.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    info!("Chart written to {}", path.display());
    Ok(())
}
