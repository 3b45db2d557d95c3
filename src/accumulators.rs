//! The statistic families behind each link of the classifier chain.

use crate::chain::{Accumulator, Handling};
use crate::config::TextAnalysisConfig;
use crate::error::Result;
use crate::models::{FrequencyTable, HourSlot, MessageKind, MessageRecord};
use crate::nlp::{classify_case, has_punctuation, CaseClass, Period, TextAnalyzer};
use crate::report::{snapshot, DisplayRequest};
use crate::utils::{hour_slot, parse_timestamp, slot_of};

pub const FORWARDED: &str = "forwarded";
pub const NOT_FORWARDED: &str = "not forwarded";
pub const LOWER_CASE_SYMBOL: &str = "lower case symbol";
pub const UPPER_CASE_SYMBOL: &str = "upper case symbol";
pub const LOWER_CASE_MESSAGE: &str = "lower case message";
pub const UPPER_CASE_MESSAGE: &str = "upper case message";
pub const WITH_PUNCTUATION: &str = "with punctuation";
pub const WITHOUT_PUNCTUATION: &str = "without punctuation";

/// Head of the chain: counts every record by hour and forwarding.
#[derive(Debug, Default)]
pub struct AnyMessageAccumulator {
    per_hour: FrequencyTable<HourSlot>,
    forwarding: FrequencyTable<&'static str>,
}

impl AnyMessageAccumulator {
    #[must_use]
    pub const fn per_hour(&self) -> &FrequencyTable<HourSlot> {
        &self.per_hour
    }

    #[must_use]
    pub const fn forwarding(&self) -> &FrequencyTable<&'static str> {
        &self.forwarding
    }
}

impl Accumulator for AnyMessageAccumulator {
    fn name(&self) -> &'static str {
        "any"
    }

    fn try_handle(&mut self, record: &MessageRecord) -> Result<Handling> {
        self.per_hour.increment(hour_slot(&record.date)?);
        self.forwarding
            .increment(if record.forwarded { FORWARDED } else { NOT_FORWARDED });
        Ok(Handling::Forwarded)
    }

    fn response(&self) -> Vec<DisplayRequest> {
        vec![
            DisplayRequest::prepared_bar(
                snapshot(&self.per_hour),
                "any message hour",
                "amount of all messages based on the hour of day",
            ),
            DisplayRequest::pie(snapshot(&self.forwarding), true, "forwarded messages"),
        ]
    }
}

/// Text messages: length, case, punctuation, terms and language.
pub struct TextAccumulator {
    analyzer: TextAnalyzer,
    lengths: FrequencyTable<usize>,
    word_counts: FrequencyTable<usize>,
    per_hour: FrequencyTable<HourSlot>,
    symbols: FrequencyTable<String>,
    punctuation: FrequencyTable<&'static str>,
    case_messages: FrequencyTable<&'static str>,
    case_symbols: FrequencyTable<&'static str>,
    languages: FrequencyTable<String>,
    languages_before: FrequencyTable<String>,
    languages_after: FrequencyTable<String>,
    alcohol_by_sender: FrequencyTable<String>,
    alcohol_by_kind: FrequencyTable<String>,
    neologisms: FrequencyTable<String>,
    languages_untracked: u64,
}

impl TextAccumulator {
    /// Create an empty accumulator using the given term lists and languages
    pub fn new(config: &TextAnalysisConfig) -> Result<Self> {
        Ok(Self {
            analyzer: TextAnalyzer::new(config)?,
            lengths: FrequencyTable::new(),
            word_counts: FrequencyTable::new(),
            per_hour: FrequencyTable::new(),
            symbols: FrequencyTable::new(),
            punctuation: FrequencyTable::new(),
            case_messages: FrequencyTable::new(),
            case_symbols: FrequencyTable::new(),
            languages: FrequencyTable::new(),
            languages_before: FrequencyTable::new(),
            languages_after: FrequencyTable::new(),
            alcohol_by_sender: FrequencyTable::new(),
            alcohol_by_kind: FrequencyTable::new(),
            neologisms: FrequencyTable::new(),
            languages_untracked: 0,
        })
    }

    fn record_text(&mut self, record: &MessageRecord, body: &str) -> Result<()> {
        // Parse first so a bad timestamp leaves every table untouched
        let sent_at = parse_timestamp(&record.date)?;

        let alcohol = self.analyzer.alcohol_mentions(body);
        if !alcohol.is_empty() {
            self.alcohol_by_sender.increment(record.sender.clone());
            for (name, count) in alcohol {
                self.alcohol_by_kind.add(name, count);
            }
        }
        for (term, count) in self.analyzer.neologism_mentions(body) {
            self.neologisms.add(term, count);
        }

        let length = body.chars().count();
        self.lengths.increment(length);
        self.word_counts.increment(body.split_whitespace().count());
        self.per_hour.increment(slot_of(&sent_at));

        for symbol in body.chars() {
            self.symbols.increment(symbol.to_string());
        }
        match classify_case(body) {
            CaseClass::Lower => {
                self.case_symbols.add(LOWER_CASE_SYMBOL, length as u64);
                self.case_messages.increment(LOWER_CASE_MESSAGE);
            }
            CaseClass::Upper => {
                self.case_symbols.add(UPPER_CASE_SYMBOL, length as u64);
                self.case_messages.increment(UPPER_CASE_MESSAGE);
            }
            CaseClass::Mixed => {
                for symbol in body.chars() {
                    self.case_symbols.increment(if symbol.is_uppercase() {
                        UPPER_CASE_SYMBOL
                    } else {
                        LOWER_CASE_SYMBOL
                    });
                }
            }
        }

        self.punctuation.increment(if has_punctuation(body) {
            WITH_PUNCTUATION
        } else {
            WITHOUT_PUNCTUATION
        });

        match self.analyzer.tracked_language(body) {
            Some(language) => {
                match self.analyzer.period_of(sent_at.date()) {
                    Period::Before => self.languages_before.increment(language.clone()),
                    Period::OnOrAfter => self.languages_after.increment(language.clone()),
                }
                self.languages.increment(language);
            }
            None => self.languages_untracked += 1,
        }

        Ok(())
    }

    /// Text messages left out of the language tables: detection failed or
    /// found a language outside the tracked set
    #[must_use]
    pub const fn languages_untracked(&self) -> u64 {
        self.languages_untracked
    }

    #[must_use]
    pub const fn lengths(&self) -> &FrequencyTable<usize> {
        &self.lengths
    }

    #[must_use]
    pub const fn word_counts(&self) -> &FrequencyTable<usize> {
        &self.word_counts
    }

    #[must_use]
    pub const fn per_hour(&self) -> &FrequencyTable<HourSlot> {
        &self.per_hour
    }

    #[must_use]
    pub const fn symbols(&self) -> &FrequencyTable<String> {
        &self.symbols
    }

    #[must_use]
    pub const fn punctuation(&self) -> &FrequencyTable<&'static str> {
        &self.punctuation
    }

    #[must_use]
    pub const fn case_messages(&self) -> &FrequencyTable<&'static str> {
        &self.case_messages
    }

    #[must_use]
    pub const fn case_symbols(&self) -> &FrequencyTable<&'static str> {
        &self.case_symbols
    }

    #[must_use]
    pub const fn languages(&self) -> &FrequencyTable<String> {
        &self.languages
    }

    #[must_use]
    pub const fn languages_before(&self) -> &FrequencyTable<String> {
        &self.languages_before
    }

    #[must_use]
    pub const fn languages_after(&self) -> &FrequencyTable<String> {
        &self.languages_after
    }

    #[must_use]
    pub const fn alcohol_by_sender(&self) -> &FrequencyTable<String> {
        &self.alcohol_by_sender
    }

    #[must_use]
    pub const fn alcohol_by_kind(&self) -> &FrequencyTable<String> {
        &self.alcohol_by_kind
    }

    #[must_use]
    pub const fn neologisms(&self) -> &FrequencyTable<String> {
        &self.neologisms
    }
}

impl Accumulator for TextAccumulator {
    fn name(&self) -> &'static str {
        "text"
    }

    fn try_handle(&mut self, record: &MessageRecord) -> Result<Handling> {
        match &record.kind {
            MessageKind::Text { body } => {
                self.record_text(record, body)?;
                Ok(Handling::Consumed)
            }
            _ => Ok(Handling::Forwarded),
        }
    }

    fn response(&self) -> Vec<DisplayRequest> {
        vec![
            DisplayRequest::bar(
                snapshot(&self.lengths),
                "message_length",
                "amount of messages based on their length",
            ),
            DisplayRequest::bar(
                snapshot(&self.word_counts),
                "words in message",
                "amount of messages based on their words amount",
            ),
            DisplayRequest::prepared_bar(
                snapshot(&self.per_hour),
                "message hour",
                "amount of messages based on the hour of day",
            ),
            DisplayRequest::pie(snapshot(&self.neologisms), true, "neologism mentions by users"),
            DisplayRequest::pie(snapshot(&self.symbols), true, "symbols by their amount"),
            DisplayRequest::pie(snapshot(&self.alcohol_by_sender), true, "alco mentions by users"),
            DisplayRequest::pie(snapshot(&self.alcohol_by_kind), true, "alco mentions by type"),
            DisplayRequest::pie(snapshot(&self.punctuation), true, "punctuation used"),
            DisplayRequest::pie(snapshot(&self.case_symbols), true, "upper lower symbols used"),
            DisplayRequest::pie(snapshot(&self.case_messages), true, "upper lower messages"),
            DisplayRequest::pie(snapshot(&self.languages), false, "languages used for all time"),
            DisplayRequest::pie(
                snapshot(&self.languages_before),
                true,
                "Lang of messages before war",
            ),
            DisplayRequest::pie(
                snapshot(&self.languages_after),
                true,
                "Lang of messages during war",
            ),
        ]
    }
}

/// Voice notes by duration and hour
#[derive(Debug, Default)]
pub struct VoiceAccumulator {
    durations: FrequencyTable<u64>,
    per_hour: FrequencyTable<HourSlot>,
}

impl VoiceAccumulator {
    #[must_use]
    pub const fn durations(&self) -> &FrequencyTable<u64> {
        &self.durations
    }

    #[must_use]
    pub const fn per_hour(&self) -> &FrequencyTable<HourSlot> {
        &self.per_hour
    }
}

impl Accumulator for VoiceAccumulator {
    fn name(&self) -> &'static str {
        "voice"
    }

    fn try_handle(&mut self, record: &MessageRecord) -> Result<Handling> {
        let MessageKind::Voice { duration } = record.kind else {
            return Ok(Handling::Forwarded);
        };
        let slot = hour_slot(&record.date)?;
        self.durations.increment(duration);
        self.per_hour.increment(slot);
        Ok(Handling::Consumed)
    }

    fn response(&self) -> Vec<DisplayRequest> {
        vec![
            DisplayRequest::prepared_bar(
                snapshot(&self.durations),
                "voice duration",
                "amount of voices based on their duration",
            ),
            DisplayRequest::prepared_bar(
                snapshot(&self.per_hour),
                "voice hour",
                "amount of voices based on the hour of day",
            ),
        ]
    }
}

/// Photos by hour
#[derive(Debug, Default)]
pub struct PhotoAccumulator {
    per_hour: FrequencyTable<HourSlot>,
}

impl PhotoAccumulator {
    #[must_use]
    pub const fn per_hour(&self) -> &FrequencyTable<HourSlot> {
        &self.per_hour
    }
}

impl Accumulator for PhotoAccumulator {
    fn name(&self) -> &'static str {
        "photo"
    }

    fn try_handle(&mut self, record: &MessageRecord) -> Result<Handling> {
        if record.kind != MessageKind::Photo {
            return Ok(Handling::Forwarded);
        }
        self.per_hour.increment(hour_slot(&record.date)?);
        Ok(Handling::Consumed)
    }

    fn response(&self) -> Vec<DisplayRequest> {
        vec![DisplayRequest::prepared_bar(
            snapshot(&self.per_hour),
            "photo hour",
            "amount of photos based on the hour of day",
        )]
    }
}

/// Videos by duration and hour. Last link of the chain.
#[derive(Debug, Default)]
pub struct VideoAccumulator {
    durations: FrequencyTable<u64>,
    per_hour: FrequencyTable<HourSlot>,
}

impl VideoAccumulator {
    #[must_use]
    pub const fn durations(&self) -> &FrequencyTable<u64> {
        &self.durations
    }

    #[must_use]
    pub const fn per_hour(&self) -> &FrequencyTable<HourSlot> {
        &self.per_hour
    }
}

impl Accumulator for VideoAccumulator {
    fn name(&self) -> &'static str {
        "video"
    }

    fn try_handle(&mut self, record: &MessageRecord) -> Result<Handling> {
        let MessageKind::Video { duration } = record.kind else {
            return Ok(Handling::Forwarded);
        };
        let slot = hour_slot(&record.date)?;
        self.per_hour.increment(slot);
        self.durations.increment(duration);
        Ok(Handling::Consumed)
    }

    fn response(&self) -> Vec<DisplayRequest> {
        vec![
            DisplayRequest::prepared_bar(
                snapshot(&self.durations),
                "video duration",
                "amount of videos based on their duration",
            ),
            DisplayRequest::prepared_bar(
                snapshot(&self.per_hour),
                "video hour",
                "amount of videos based on the hour of day",
            ),
        ]
    }
}
