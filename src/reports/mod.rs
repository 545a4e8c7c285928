// Reports module - single simulations, two-scenario comparison, CSV and chart output

pub mod chart;
pub mod export;
pub mod simulation;

pub use chart::{render_chart_svg, ChartLine};
pub use export::{export_csv, write_csv};
pub use simulation::{Comparison, Scenario};
