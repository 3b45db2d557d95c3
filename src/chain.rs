//! Fixed-order classification of records.
//!
//! Each record is offered to the links in order until one consumes it. The
//! any-message link sees every record and always lets it through; the typed
//! links consume only their own kind. Records nobody consumes are dropped.

use tracing::trace;

use crate::accumulators::{
    AnyMessageAccumulator, PhotoAccumulator, TextAccumulator, VideoAccumulator, VoiceAccumulator,
};
use crate::config::TextAnalysisConfig;
use crate::error::Result;
use crate::models::MessageRecord;
use crate::report::DisplayRequest;

/// Outcome of offering a record to one link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// The link claimed the record; later links never see it
    Consumed,
    /// The record continues, unmodified, to the next link
    Forwarded,
}

/// One statistic family: owns its tables and decides which records are its own.
pub trait Accumulator {
    /// Short name used in logs and metrics labels
    fn name(&self) -> &'static str;

    /// Update tables from `record` if it belongs here.
    ///
    /// Errors are fatal to the run; no partial state is rolled back.
    fn try_handle(&mut self, record: &MessageRecord) -> Result<Handling>;

    /// Charts describing the accumulated tables, in display order
    fn response(&self) -> Vec<DisplayRequest>;
}

/// The five links in their fixed order
pub struct ClassifierChain {
    pub any: AnyMessageAccumulator,
    pub text: TextAccumulator,
    pub voice: VoiceAccumulator,
    pub photo: PhotoAccumulator,
    pub video: VideoAccumulator,
}

impl ClassifierChain {
    pub fn new(analysis: &TextAnalysisConfig) -> Result<Self> {
        Ok(Self {
            any: AnyMessageAccumulator::default(),
            text: TextAccumulator::new(analysis)?,
            voice: VoiceAccumulator::default(),
            photo: PhotoAccumulator::default(),
            video: VideoAccumulator::default(),
        })
    }

    fn links(&self) -> [&dyn Accumulator; 5] {
        [&self.any, &self.text, &self.voice, &self.photo, &self.video]
    }

    fn links_mut(&mut self) -> [&mut dyn Accumulator; 5] {
        [
            &mut self.any,
            &mut self.text,
            &mut self.voice,
            &mut self.photo,
            &mut self.video,
        ]
    }

    /// Run `record` through the chain.
    ///
    /// Returns the name of the consuming link, or `None` if it fell through.
    pub fn handle(&mut self, record: &MessageRecord) -> Result<Option<&'static str>> {
        for link in self.links_mut() {
            if link.try_handle(record)? == Handling::Consumed {
                return Ok(Some(link.name()));
            }
        }
        trace!(kind = record.kind.as_str(), "Record not claimed by any link");
        Ok(None)
    }

    /// Every link's charts, head of the chain first
    #[must_use]
    pub fn response(&self) -> Vec<DisplayRequest> {
        self.links()
            .into_iter()
            .flat_map(|link| link.response())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageKind;

    fn record(kind: MessageKind) -> MessageRecord {
        MessageRecord {
            date: "2023-01-01 10:15".to_string(),
            kind,
            forwarded: false,
            sender: "u1".to_string(),
        }
    }

    fn chain() -> ClassifierChain {
        ClassifierChain::new(&TextAnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_each_kind_is_consumed_by_its_link() {
        let mut chain = chain();
        let cases = [
            (MessageKind::Text { body: "hi".to_string() }, Some("text")),
            (MessageKind::Voice { duration: 3 }, Some("voice")),
            (MessageKind::Photo, Some("photo")),
            (MessageKind::Video { duration: 9 }, Some("video")),
            (MessageKind::Other("sticker".to_string()), None),
        ];
        for (kind, expected) in cases {
            assert_eq!(chain.handle(&record(kind)).unwrap(), expected);
        }
        assert_eq!(chain.any.per_hour().total(), 5);
    }

    #[test]
    fn test_malformed_hour_aborts_before_typed_links() {
        let mut chain = chain();
        let mut bad = record(MessageKind::Photo);
        bad.date = "no-hour-here".to_string();

        assert!(chain.handle(&bad).is_err());
        assert!(chain.photo.per_hour().is_empty());
    }

    #[test]
    fn test_response_order_follows_links() {
        let titles: Vec<_> = chain().response().iter().map(DisplayRequest::title).collect();
        assert_eq!(titles.first(), Some(&"amount of all messages based on the hour of day"));
        assert_eq!(titles.last(), Some(&"amount of videos based on the hour of day"));
        assert_eq!(titles.len(), 2 + 13 + 2 + 1 + 2);
    }
}
