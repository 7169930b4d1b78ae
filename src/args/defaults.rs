pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadcheck/", env!("CARGO_PKG_VERSION"));

/// Body sent when no payload size range is configured.
pub(crate) const DEFAULT_PROBE_BODY: &str = r#"{"test":"data","number":123}"#;
