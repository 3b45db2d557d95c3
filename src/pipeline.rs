use tracing::{debug, info, warn};

use crate::chain::ClassifierChain;
use crate::config::AppConfig;
use crate::error::Result;
use crate::logging::OperationTimer;
use crate::metrics::PipelineMetrics;
use crate::render::GraphRenderer;
use crate::report::ReportEmitter;
use crate::source::RecordSource;
use crate::validation::InputValidator;

/// One statistics run: ingest every dialog, then emit the charts.
pub struct AnalysisPipeline {
    chain: ClassifierChain,
    emitter: ReportEmitter,
    metrics: PipelineMetrics,
    skip_malformed: bool,
}

impl AnalysisPipeline {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            chain: ClassifierChain::new(&config.analysis)?,
            emitter: ReportEmitter::new(&config.report),
            metrics: PipelineMetrics::new(),
            skip_malformed: config.input.skip_malformed,
        })
    }

    /// Feed every record of every dialog through the chain.
    ///
    /// Aborts on the first fatal record unless malformed records are skipped.
    pub fn ingest<S: RecordSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        let timer = OperationTimer::new("ingest");

        for path in source.dialogs()? {
            let rows = source.read_dialog(&path)?;
            self.metrics.record_dialog();
            debug!(path = %path.display(), rows = rows.len(), "Ingesting dialog");

            for row in rows {
                let record = match row {
                    Ok(record) => record,
                    Err(e) if self.skip_malformed => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable row");
                        self.metrics.record_skipped();
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                if self.skip_malformed {
                    if let Err(e) = InputValidator::validate_record(&record) {
                        warn!(error = %e, "Skipping malformed record");
                        self.metrics.record_skipped();
                        continue;
                    }
                }

                match self.chain.handle(&record)? {
                    Some(link) => self.metrics.record_consumed(link),
                    None => self.metrics.record_dropped(),
                }
            }
        }

        // Only the increase since the previous ingest
        let untracked = self.chain.text.languages_untracked();
        let delta = untracked.saturating_sub(self.metrics.languages_untracked);
        self.metrics.record_languages_untracked(delta);

        info!(
            dialogs = self.metrics.dialogs_read,
            records = self.metrics.records_ingested,
            "Ingestion finished"
        );
        timer.finish();
        Ok(())
    }

    /// Render the charts of every link, head of the chain first
    pub fn emit<R: GraphRenderer + ?Sized>(&mut self, renderer: &mut R) -> Result<()> {
        let timer = OperationTimer::new("report");
        let requests = self.chain.response();
        info!(charts = requests.len(), "Emitting report");
        self.emitter.emit(&requests, renderer, &mut self.metrics)?;
        timer.finish();
        Ok(())
    }

    #[must_use]
    pub const fn chain(&self) -> &ClassifierChain {
        &self.chain
    }

    #[must_use]
    pub const fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }
}
