use std::io;

/// Errors surfaced by the tally core. Lookup misses are not errors; they are
/// normal [`LookupOutcome`](crate::table::LookupOutcome) values.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    /// The input record stream could not be opened or read. The table keeps
    /// whatever partial state existed before the failure.
    #[error("cannot read input source '{label}': {source}")]
    SourceUnavailable {
        label: String,
        #[source]
        source: io::Error,
    },

    /// The output destination could not be created or written.
    #[error("cannot write output destination '{label}': {source}")]
    SinkWriteFailure {
        label: String,
        #[source]
        source: io::Error,
    },

    /// The configuration file exists but does not parse.
    #[error("cannot parse config file '{label}': {source}")]
    ConfigInvalid {
        label: String,
        #[source]
        source: serde_json::Error,
    },
}
