//! Chart rendering.
//!
//! The pipeline hands finished chart descriptions to a [`GraphRenderer`].
//! [`SvgRenderer`] draws them with `plotters` into one SVG file per chart,
//! numbered in emission order.

use std::f64::consts::PI;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::error::{ChatStatsError, Result};

/// Offset applied to every rendered pie slice, as a fraction of the radius
pub const PIE_EXPLODE: f64 = 0.1;

/// A bar chart ready to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    /// Bar positions, `1..=n`
    pub positions: Vec<usize>,
    pub heights: Vec<u64>,
    pub tick_labels: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

/// A pie chart ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    /// Every label of the source table, shown in the legend
    pub legend: Vec<String>,
    /// Slice sizes, already truncated
    pub sizes: Vec<u64>,
    /// Labels drawn next to the slices, `None` when the chart is unlabeled
    pub slice_labels: Option<Vec<String>>,
    /// Per-slice offset, one entry per size
    pub explode: Vec<f64>,
    pub title: String,
}

/// Consumer of finished charts
pub trait GraphRenderer {
    fn render_bar(&mut self, chart: &BarChart) -> Result<()>;
    fn render_pie(&mut self, chart: &PieChart) -> Result<()>;
}

/// Writes each chart to `<output_dir>/NN_<title>.svg`
pub struct SvgRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
    written: Vec<PathBuf>,
}

impl SvgRenderer {
    /// Create the renderer, creating `output_dir` if needed
    pub fn new(output_dir: &Path, size: (u32, u32)) -> Result<Self> {
        create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            size,
            written: Vec::new(),
        })
    }

    /// Files written so far, in order
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self, title: &str) -> PathBuf {
        self.output_dir
            .join(format!("{:02}_{}.svg", self.written.len() + 1, slug(title)))
    }

    fn finish(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "Chart written");
        self.written.push(path);
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> ChatStatsError {
    ChatStatsError::Render(err.to_string())
}

/// File-name friendly form of a chart title
#[must_use]
pub fn slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if slug.is_empty() {
        "chart".to_string()
    } else {
        slug
    }
}

impl GraphRenderer for SvgRenderer {
    fn render_bar(&mut self, chart: &BarChart) -> Result<()> {
        let path = self.next_path(&chart.title);
        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let top = chart.heights.iter().copied().max().unwrap_or(0) + 1;
            let labels = chart.tick_labels.clone();
            let mut plot = ChartBuilder::on(&root)
                .caption(&chart.title, ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d((0..chart.heights.len().max(1)).into_segmented(), 0..top)
                .map_err(render_err)?;

            plot.configure_mesh()
                .disable_x_mesh()
                .x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .x_label_formatter(&|value| match value {
                    SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                        labels.get(*i).cloned().unwrap_or_default()
                    }
                    SegmentValue::Last => String::new(),
                })
                .draw()
                .map_err(render_err)?;

            // Alternating red and green bars
            plot.draw_series(chart.heights.iter().enumerate().map(|(i, height)| {
                let color = if i % 2 == 0 { RED } else { GREEN };
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), *height)],
                    color.filled(),
                );
                bar.set_margin(0, 0, 15, 15);
                bar
            }))
            .map_err(render_err)?;

            root.present().map_err(render_err)?;
        }
        self.finish(path);
        Ok(())
    }

    fn render_pie(&mut self, chart: &PieChart) -> Result<()> {
        let path = self.next_path(&chart.title);
        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;
            let root = root
                .titled(&chart.title, ("sans-serif", 20).into_font())
                .map_err(render_err)?;

            let (width, height) = root.dim_in_pixel();
            let center = (f64::from(width) * 0.4, f64::from(height) / 2.0);
            let radius = f64::from(width.min(height)) * 0.35;
            let total: u64 = chart.sizes.iter().sum();

            if total > 0 {
                // Counter-clockwise from twelve o'clock
                let mut start = PI / 2.0;
                for (i, size) in chart.sizes.iter().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let sweep = 2.0 * PI * (*size as f64) / (total as f64);
                    let mid = start + sweep / 2.0;
                    let offset = chart.explode.get(i).copied().unwrap_or(0.0) * radius;
                    let origin = (center.0 + offset * mid.cos(), center.1 - offset * mid.sin());

                    let wedge = wedge_points(origin, radius, start, sweep);
                    root.draw(&Polygon::new(wedge, Palette99::pick(i).filled()))
                        .map_err(render_err)?;

                    if let Some(label) = chart.slice_labels.as_ref().and_then(|l| l.get(i)) {
                        let at = to_pixel((
                            origin.0 + radius * 1.1 * mid.cos(),
                            origin.1 - radius * 1.1 * mid.sin(),
                        ));
                        root.draw(&Text::new(label.clone(), at, ("sans-serif", 14).into_font()))
                            .map_err(render_err)?;
                    }
                    start += sweep;
                }
            } else {
                root.draw(&Text::new("no data", to_pixel(center), ("sans-serif", 16).into_font()))
                    .map_err(render_err)?;
            }

            // Legend lists every label, including slices past the limit
            let legend_x = to_pixel((f64::from(width) * 0.8, 0.0)).0;
            for (i, label) in chart.legend.iter().enumerate() {
                let y = 20 + 18 * i32::try_from(i).unwrap_or_default();
                root.draw(&Rectangle::new(
                    [(legend_x, y), (legend_x + 12, y + 12)],
                    Palette99::pick(i).filled(),
                ))
                .map_err(render_err)?;
                root.draw(&Text::new(label.clone(), (legend_x + 18, y), ("sans-serif", 12).into_font()))
                    .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
        }
        self.finish(path);
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_pixel(point: (f64, f64)) -> (i32, i32) {
    (point.0.round() as i32, point.1.round() as i32)
}

fn wedge_points(origin: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = ((sweep / (2.0 * PI)) * 90.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(to_pixel(origin));
    for step in 0..=steps {
        #[allow(clippy::cast_precision_loss)]
        let angle = start + sweep * (step as f64) / (steps as f64);
        points.push(to_pixel((
            origin.0 + radius * angle.cos(),
            origin.1 - radius * angle.sin(),
        )));
    }
    points
}

/// Log the files a [`SvgRenderer`] produced
pub fn log_written(renderer: &SvgRenderer) {
    info!(charts = renderer.written().len(), "Charts written to disk");
}
