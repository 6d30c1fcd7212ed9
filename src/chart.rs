//! Line chart model for price history.
//!
//! Chart components are registered once per process through [`register`];
//! rendering takes the returned [`ChartRegistry`] so a chart cannot be drawn
//! before registration. The model serializes to a Chart.js-compatible
//! `{labels, datasets, options}` object; [`LineChart::render`] draws it as a
//! text block for terminal output.

use crate::domain::history::AssetHistoryPoint;
use crate::shared::price::{format_usd, to_f64};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::OnceLock;

/// Text shown instead of a chart when the series is empty.
pub const EMPTY_CHART_PLACEHOLDER: &str = "No price history available";

const DATASET_LABEL: &str = "Price (USD)";
const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

// ─── Registration ────────────────────────────────────────────────────────────

/// Building blocks a line chart needs before it can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartComponent {
    LineElement,
    CategoryScale,
    LinearScale,
    PointElement,
    Tooltip,
    Legend,
}

impl ChartComponent {
    pub const ALL: [ChartComponent; 6] = [
        ChartComponent::LineElement,
        ChartComponent::CategoryScale,
        ChartComponent::LinearScale,
        ChartComponent::PointElement,
        ChartComponent::Tooltip,
        ChartComponent::Legend,
    ];
}

/// Proof of registration. Only obtainable through [`register`].
#[derive(Debug)]
pub struct ChartRegistry {
    components: Vec<ChartComponent>,
}

impl ChartRegistry {
    pub fn components(&self) -> &[ChartComponent] {
        &self.components
    }

    pub fn is_registered(&self, component: ChartComponent) -> bool {
        self.components.contains(&component)
    }
}

static REGISTRY: OnceLock<ChartRegistry> = OnceLock::new();

/// Register the chart components. Idempotent: the first call registers,
/// later calls return the same registry.
pub fn register() -> &'static ChartRegistry {
    REGISTRY.get_or_init(|| {
        tracing::debug!("Registering {} chart components", ChartComponent::ALL.len());
        ChartRegistry {
            components: ChartComponent::ALL.to_vec(),
        }
    })
}

// ─── Model ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub title: String,
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub legend_position: String,
    pub x: AxisOptions,
    pub y: AxisOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            legend_position: "top".into(),
            x: AxisOptions {
                title: "Date".into(),
                begin_at_zero: false,
            },
            y: AxisOptions {
                title: DATASET_LABEL.into(),
                begin_at_zero: false,
            },
        }
    }
}

/// A single-series line chart: one x label and one price per history point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
    #[serde(skip)]
    min: Option<Decimal>,
    #[serde(skip)]
    max: Option<Decimal>,
}

impl LineChart {
    pub fn from_history(points: &[AssetHistoryPoint]) -> Self {
        let labels = points.iter().map(AssetHistoryPoint::label).collect();
        let data = points.iter().map(|p| to_f64(p.price_usd)).collect();

        Self {
            labels,
            datasets: vec![Dataset {
                label: DATASET_LABEL.into(),
                data,
                border_color: "rgb(75, 192, 192)".into(),
                background_color: "rgba(75, 192, 192, 0.2)".into(),
                tension: 0.4,
            }],
            options: ChartOptions::default(),
            min: points.iter().map(|p| p.price_usd).min(),
            max: points.iter().map(|p| p.price_usd).max(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    fn values(&self) -> &[f64] {
        self.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[])
    }

    /// Draw the chart as text, `width` columns by `height` rows of bars.
    ///
    /// More points than columns are downsampled by taking evenly spaced
    /// samples; fewer points use one column each.
    pub fn render(&self, _registry: &ChartRegistry, width: usize, height: usize) -> String {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return EMPTY_CHART_PLACEHOLDER.to_string();
        };
        let values = self.values();
        let width = width.max(1);
        let height = height.max(1);

        let columns: Vec<f64> = if values.len() <= width {
            values.to_vec()
        } else {
            (0..width)
                .map(|i| values[i * (values.len() - 1) / (width - 1).max(1)])
                .collect()
        };

        let lo = to_f64(min);
        let span = to_f64(max) - lo;
        let steps = height * 8;
        let levels: Vec<usize> = columns
            .iter()
            .map(|v| {
                if span <= 0.0 || !v.is_finite() {
                    steps / 2
                } else {
                    (((v - lo) / span) * (steps - 1) as f64).round() as usize + 1
                }
            })
            .collect();

        let mut out = format!("{} max {}\n", DATASET_LABEL, format_usd(max));
        for row in (0..height).rev() {
            let line: String = levels
                .iter()
                .map(|level| BARS[level.saturating_sub(row * 8).min(8)])
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push_str(&format!("{} min {}\n", DATASET_LABEL, format_usd(min)));

        if let (Some(first), Some(last)) = (self.labels.first(), self.labels.last()) {
            if self.labels.len() > 1 {
                out.push_str(&format!("{first} .. {last}"));
            } else {
                out.push_str(first);
            }
        }
        out
    }
}
