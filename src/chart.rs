use std::path::{Path, PathBuf};

use log::{info, trace};
use svg::node::element::{Circle, Line, Path as SvgPath, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;

use crate::types::AngleOutputTable;

pub const POWER_VS_ANGLE_TITLE: &str = "Solar Panel Power Output vs. Angle";

/// A connected line-and-marker series with its labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(u32, f64)>,
    pub footnote: Option<String>,
}

impl LineChart {
    pub fn power_vs_angle(table: &AngleOutputTable) -> Self {
        Self {
            title: POWER_VS_ANGLE_TITLE.to_string(),
            x_label: "Angle (degrees)".to_string(),
            y_label: "Power Output (Watts)".to_string(),
            points: table.points(),
            footnote: None,
        }
    }

    pub fn with_footnote(mut self, footnote: impl Into<String>) -> Self {
        self.footnote = Some(footnote.into());
        self
    }
}

/// Anything that can display a [`LineChart`].
pub trait ChartSurface {
    fn plot(&mut self, chart: &LineChart) -> std::io::Result<()>;
}

/// Writes each plotted chart to an SVG file.
pub struct SvgFile {
    path: PathBuf,
}

impl SvgFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSurface for SvgFile {
    fn plot(&mut self, chart: &LineChart) -> std::io::Result<()> {
        let document = render_svg(chart);
        svg::save(&self.path, &document)?;
        info!("chart written to {}", self.path.display());
        Ok(())
    }
}

/// Swallows charts, for runs that only want the console report.
pub struct NoChart;

impl ChartSurface for NoChart {
    fn plot(&mut self, chart: &LineChart) -> std::io::Result<()> {
        trace!("skipping chart {:?}", chart.title);
        Ok(())
    }
}

/* # svg layout */

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = 70.0;

// dark palette
const BACKGROUND: &str = "#111111";
const FOREGROUND: &str = "#f2f5fa";
const GRID: &str = "#283442";
const SERIES: &str = "#636efa";

struct Frame {
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn fit(points: &[(u32, f64)]) -> Self {
        let x_max = points.iter().map(|&(x, _)| x).max().unwrap_or(0).max(1) as f64;
        let y_max = points.iter().map(|&(_, y)| y).fold(0.0_f64, f64::max);
        Self {
            x_max,
            y_max: if y_max > 0.0 { y_max } else { 1.0 },
        }
    }

    fn x(&self, value: f64) -> f64 {
        LEFT + value / self.x_max * (WIDTH - LEFT - RIGHT)
    }

    fn y(&self, value: f64) -> f64 {
        HEIGHT - BOTTOM - value / self.y_max * (HEIGHT - TOP - BOTTOM)
    }
}

fn label(x: f64, y: f64, content: &str, size: u32, anchor: &str) -> Text {
    Text::new()
        .set("x", format!("{:.2}", x))
        .set("y", format!("{:.2}", y))
        .set("fill", FOREGROUND)
        .set("font-family", "sans-serif")
        .set("font-size", size)
        .set("text-anchor", anchor)
        .add(TextNode::new(content))
}

fn rule(x1: f64, y1: f64, x2: f64, y2: f64, colour: &str) -> Line {
    Line::new()
        .set("x1", format!("{:.2}", x1))
        .set("y1", format!("{:.2}", y1))
        .set("x2", format!("{:.2}", x2))
        .set("y2", format!("{:.2}", y2))
        .set("stroke", colour)
}

fn series_path(frame: &Frame, points: &[(u32, f64)]) -> String {
    points
        .iter()
        .map(|&(x, y)| format!("{:.2} {:.2}", frame.x(x as f64), frame.y(y)))
        .collect::<Vec<String>>()
        .join("L")
}

/// Lays out `chart` on a dark background with grid, axis labels and markers.
pub fn render_svg(chart: &LineChart) -> Document {
    let frame = Frame::fit(&chart.points);
    let mut document = Document::new()
        .set("viewBox", (0, 0, WIDTH as u32, HEIGHT as u32))
        .set("width", WIDTH as u32)
        .set("height", HEIGHT as u32)
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", BACKGROUND),
        );

    for step in 0..=5 {
        let value = frame.y_max * step as f64 / 5.0;
        let y = frame.y(value);
        document = document
            .add(rule(LEFT, y, WIDTH - RIGHT, y, GRID))
            .add(label(LEFT - 8.0, y + 4.0, &format!("{:.0}", value), 12, "end"));
    }
    let x_step = 10;
    for tick in (0..=frame.x_max as u32).step_by(x_step) {
        let x = frame.x(tick as f64);
        document = document
            .add(rule(x, TOP, x, HEIGHT - BOTTOM, GRID))
            .add(label(x, HEIGHT - BOTTOM + 18.0, &tick.to_string(), 12, "middle"));
    }

    document = document
        .add(label(WIDTH / 2.0, TOP / 2.0 + 6.0, &chart.title, 20, "middle"))
        .add(label(
            (LEFT + WIDTH - RIGHT) / 2.0,
            HEIGHT - BOTTOM + 45.0,
            &chart.x_label,
            14,
            "middle",
        ))
        .add(
            label(0.0, 0.0, &chart.y_label, 14, "middle").set(
                "transform",
                format!("translate(24 {:.2}) rotate(-90)", (TOP + HEIGHT - BOTTOM) / 2.0),
            ),
        );

    if !chart.points.is_empty() {
        document = document.add(
            SvgPath::new()
                .set("d", format!("M{}", series_path(&frame, &chart.points)))
                .set("fill", "none")
                .set("stroke", SERIES)
                .set("stroke-width", 2),
        );
    }
    for &(x, y) in &chart.points {
        document = document.add(
            Circle::new()
                .set("class", "marker")
                .set("cx", format!("{:.2}", frame.x(x as f64)))
                .set("cy", format!("{:.2}", frame.y(y)))
                .set("r", 3)
                .set("fill", SERIES),
        );
    }

    if let Some(footnote) = &chart.footnote {
        document = document.add(label(WIDTH - RIGHT, HEIGHT - 8.0, footnote, 10, "end"));
    }
    document
}
