//! Display requests and their conversion into finished charts.
//!
//! Accumulators describe what they want drawn with [`DisplayRequest`]s. The
//! [`ReportEmitter`] applies bucketing, headline reduction and pie truncation,
//! then hands the result to a [`GraphRenderer`].

use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::bucketize::{bucketize, BucketedMapping};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::metrics::PipelineMetrics;
use crate::models::{FrequencyTable, HourSlot};
use crate::render::{BarChart, GraphRenderer, PieChart, PIE_EXPLODE};

/// Table key once it leaves its accumulator.
///
/// A table only ever holds one variant, so ordering across variants never
/// decides anything.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisplayKey {
    Number(u64),
    Hour(HourSlot),
    Label(String),
}

impl fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Hour(slot) => write!(f, "{slot}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<u64> for DisplayKey {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for DisplayKey {
    fn from(value: usize) -> Self {
        Self::Number(value as u64)
    }
}

impl From<HourSlot> for DisplayKey {
    fn from(value: HourSlot) -> Self {
        Self::Hour(value)
    }
}

impl From<String> for DisplayKey {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl From<&str> for DisplayKey {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

/// Snapshot of a frequency table in first-seen order
pub type ChartData = Vec<(DisplayKey, u64)>;

/// Copy a table out of its accumulator for display
pub fn snapshot<K>(table: &FrequencyTable<K>) -> ChartData
where
    K: Eq + Hash + Clone + Into<DisplayKey>,
{
    table.iter().map(|(k, v)| (k.clone().into(), v)).collect()
}

/// Bar chart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRequest {
    pub data: ChartData,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub title: &'static str,
    /// Use the table as-is instead of bucketizing it
    pub pre_bucketed: bool,
    /// Keep only the first bucket
    pub single_result: bool,
}

impl BarRequest {
    fn headline(data: ChartData, x_label: &'static str, title: &'static str, pre_bucketed: bool) -> Self {
        Self {
            data,
            x_label,
            y_label: "amount",
            title,
            pre_bucketed,
            single_result: true,
        }
    }
}

/// Pie chart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieRequest {
    pub data: ChartData,
    pub with_labels: bool,
    pub title: &'static str,
}

/// One chart an accumulator wants drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRequest {
    Bar(BarRequest),
    Pie(PieRequest),
}

impl DisplayRequest {
    /// Headline bar chart over a table that still needs bucketing
    pub fn bar(data: ChartData, x_label: &'static str, title: &'static str) -> Self {
        Self::Bar(BarRequest::headline(data, x_label, title, false))
    }

    /// Headline bar chart over a table used as-is
    pub fn prepared_bar(data: ChartData, x_label: &'static str, title: &'static str) -> Self {
        Self::Bar(BarRequest::headline(data, x_label, title, true))
    }

    pub fn pie(data: ChartData, with_labels: bool, title: &'static str) -> Self {
        Self::Pie(PieRequest {
            data,
            with_labels,
            title,
        })
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Bar(request) => request.title,
            Self::Pie(request) => request.title,
        }
    }
}

/// Turns display requests into charts and feeds them to a renderer
#[derive(Debug, Clone)]
pub struct ReportEmitter {
    group_size: usize,
    pie_slice_limit: usize,
    single_result_bars: bool,
}

impl Default for ReportEmitter {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}

impl ReportEmitter {
    #[must_use]
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            group_size: config.group_size,
            pie_slice_limit: config.pie_slice_limit,
            single_result_bars: config.single_result_bars,
        }
    }

    /// Bucketed (or raw) mapping a bar request resolves to
    #[must_use]
    pub fn bar_mapping(&self, request: &BarRequest) -> BucketedMapping {
        let mapping = if request.pre_bucketed {
            request
                .data
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect()
        } else {
            bucketize(request.data.iter().map(|(k, v)| (k, *v)), self.group_size)
        };

        if request.single_result && self.single_result_bars {
            mapping.headline()
        } else {
            mapping
        }
    }

    #[must_use]
    pub fn bar_chart(&self, request: &BarRequest) -> BarChart {
        let mapping = self.bar_mapping(request);
        BarChart {
            positions: (1..=mapping.len()).collect(),
            heights: mapping.values(),
            tick_labels: mapping.labels(),
            x_label: request.x_label.to_string(),
            y_label: request.y_label.to_string(),
            title: request.title.to_string(),
        }
    }

    #[must_use]
    pub fn pie_chart(&self, request: &PieRequest) -> PieChart {
        let legend: Vec<String> = request.data.iter().map(|(k, _)| k.to_string()).collect();
        let shown = request.data.len().min(self.pie_slice_limit);

        PieChart {
            sizes: request.data.iter().take(shown).map(|(_, v)| *v).collect(),
            slice_labels: request
                .with_labels
                .then(|| legend.iter().take(shown).cloned().collect()),
            explode: vec![PIE_EXPLODE; shown],
            legend,
            title: request.title.to_string(),
        }
    }

    /// Render every request in order
    pub fn emit<R>(
        &self,
        requests: &[DisplayRequest],
        renderer: &mut R,
        metrics: &mut PipelineMetrics,
    ) -> Result<()>
    where
        R: GraphRenderer + ?Sized,
    {
        for request in requests {
            debug!(title = request.title(), "Rendering chart");
            match request {
                DisplayRequest::Bar(bar) => {
                    renderer.render_bar(&self.bar_chart(bar))?;
                    metrics.record_chart("bar");
                }
                DisplayRequest::Pie(pie) => {
                    renderer.render_pie(&self.pie_chart(pie))?;
                    metrics.record_chart("pie");
                }
            }
        }
        Ok(())
    }
}
