use metrics::counter;

/// Metric names emitted through the `metrics` facade
pub mod names {
    pub const RECORDS_TOTAL: &str = "chat_stats_records_total";
    pub const RECORDS_DROPPED_TOTAL: &str = "chat_stats_records_dropped_total";
    pub const RECORDS_SKIPPED_TOTAL: &str = "chat_stats_records_skipped_total";
    pub const LANGUAGE_UNTRACKED_TOTAL: &str = "chat_stats_language_untracked_total";
    pub const DIALOGS_READ_TOTAL: &str = "chat_stats_dialogs_read_total";
    pub const CHARTS_RENDERED_TOTAL: &str = "chat_stats_charts_rendered_total";
}

/// Run-level counters.
///
/// Every `record_*` call updates the in-process snapshot and forwards to the
/// globally installed `metrics` recorder, which is a no-op unless the
/// embedding application installs one.
#[derive(Debug, Default, Clone)]
pub struct PipelineMetrics {
    pub dialogs_read: u64,
    pub records_ingested: u64,
    pub records_consumed: u64,
    pub records_dropped: u64,
    pub records_skipped: u64,
    pub languages_untracked: u64,
    pub bar_charts: u64,
    pub pie_charts: u64,
}

impl PipelineMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dialog file was opened
    pub fn record_dialog(&mut self) {
        self.dialogs_read += 1;
        counter!(names::DIALOGS_READ_TOTAL).increment(1);
    }

    /// A record entered the chain and was consumed by `link`
    pub fn record_consumed(&mut self, link: &'static str) {
        self.records_ingested += 1;
        self.records_consumed += 1;
        counter!(names::RECORDS_TOTAL, "link" => link).increment(1);
    }

    /// A record entered the chain and no link claimed it
    pub fn record_dropped(&mut self) {
        self.records_ingested += 1;
        self.records_dropped += 1;
        counter!(names::RECORDS_DROPPED_TOTAL).increment(1);
    }

    /// A record failed upstream validation and never entered the chain
    pub fn record_skipped(&mut self) {
        self.records_skipped += 1;
        counter!(names::RECORDS_SKIPPED_TOTAL).increment(1);
    }

    /// Text messages whose language was undetectable or not tracked
    pub fn record_languages_untracked(&mut self, count: u64) {
        self.languages_untracked += count;
        counter!(names::LANGUAGE_UNTRACKED_TOTAL).increment(count);
    }

    /// A chart was handed to the renderer
    pub fn record_chart(&mut self, kind: &'static str) {
        match kind {
            "pie" => self.pie_charts += 1,
            _ => self.bar_charts += 1,
        }
        counter!(names::CHARTS_RENDERED_TOTAL, "kind" => kind).increment(1);
    }

    /// One-line-per-metric summary for the end-of-run log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Dialogs read: {}\nRecords ingested: {}\nRecords consumed: {}\nRecords dropped: {}\nRecords skipped: {}\nLanguage untracked: {}\nCharts: {} bar, {} pie",
            self.dialogs_read,
            self.records_ingested,
            self.records_consumed,
            self.records_dropped,
            self.records_skipped,
            self.languages_untracked,
            self.bar_charts,
            self.pie_charts,
        )
    }
}
