use job_params::Parameters;
use rdkafka::ClientConfig;

/// Parameter key naming the starting-offset policy.
pub const STARTING_OFFSETS: &str = "startingOffsets";
/// Parameter key holding the epoch millis for the `timestamp` policy.
pub const STARTING_OFFSETS_TIMESTAMP: &str = "startingOffsetsTimestamp";

/// Where the consumer resets to when no committed offset is usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetReset {
    Earliest,
    Latest,
    None,
}

impl OffsetReset {
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetReset::Earliest => "earliest",
            OffsetReset::Latest => "latest",
            OffsetReset::None => "none",
        }
    }
}

/// Starting-offset strategy for a stream consumer, selected by name from the
/// job parameters and handed to the consumer source builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetsInitializer {
    /// Beginning of the stream.
    Earliest,
    /// End of the stream.
    Latest,
    /// Committed consumer-group offsets, with the given reset policy when
    /// none exist.
    Committed(OffsetReset),
    /// First record at or after the given epoch millis.
    Timestamp(i64),
}

impl OffsetsInitializer {
    /// Selects the strategy from the `startingOffsets` parameter (default
    /// `earliest`), reading `startingOffsetsTimestamp` (default `0`) for the
    /// timestamp policy.
    pub fn from_parameters(parameters: &Parameters) -> OffsetsInitializer {
        let name = parameters.get_or(STARTING_OFFSETS, "earliest");
        let timestamp = parameters.get_long_or(STARTING_OFFSETS_TIMESTAMP, 0);
        OffsetsInitializer::from_name(name, timestamp)
    }

    /// Maps a policy name to a strategy. Matching is exact and
    /// case-sensitive; anything unrecognized falls back to `Latest`.
    pub fn from_name(name: &str, timestamp: i64) -> OffsetsInitializer {
        match name {
            "earliest" => OffsetsInitializer::Earliest,
            "latest" => OffsetsInitializer::Latest,
            "committedOffsetsLatest" => OffsetsInitializer::Committed(OffsetReset::Latest),
            "committedOffsetsEarliest" => OffsetsInitializer::Committed(OffsetReset::Earliest),
            "committedOffsetsNone" => OffsetsInitializer::Committed(OffsetReset::None),
            "timestamp" => OffsetsInitializer::Timestamp(timestamp),
            _ => OffsetsInitializer::Latest,
        }
    }

    /// `auto.offset.reset` value for the consumer config, where one applies.
    ///
    /// `Timestamp` has no static config mapping; it is resolved against the
    /// broker with `offsets_for_times` once partitions are assigned.
    pub fn auto_offset_reset(&self) -> Option<&'static str> {
        match self {
            OffsetsInitializer::Earliest => Some("earliest"),
            OffsetsInitializer::Latest => Some("latest"),
            OffsetsInitializer::Committed(reset) => Some(reset.as_str()),
            OffsetsInitializer::Timestamp(_) => None,
        }
    }

    pub fn apply_to(&self, config: &mut ClientConfig) {
        if let Some(reset) = self.auto_offset_reset() {
            config.set("auto.offset.reset", reset);
        }
    }
}
