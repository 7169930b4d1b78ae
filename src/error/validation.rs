use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing URL (set --url or provide in config).")]
    MissingUrl,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL is missing host.")]
    UrlMissingHost,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid value: {source}")]
    InvalidFloat {
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Threshold must be within 0-100, got {value}.")]
    ThresholdOutOfRange { value: f64 },
    #[error("Expected format min-max (e.g., 64-4096)")]
    ByteRangeFormat,
    #[error("Invalid range start: {source}")]
    ByteRangeInvalidStart {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid range end: {source}")]
    ByteRangeInvalidEnd {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Range start must be <= end")]
    ByteRangeStartAfterEnd,
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Cannot combine a fixed body with --payload-size.")]
    PayloadSizeWithData,
}
