//! Error types shared across all Gatewatch crates.

/// Errors the engine can return to its caller.
///
/// Nothing here is fatal to the host process: malformed event fields are
/// recovered with sentinels before any of these are raised, so the only
/// failure modes left are client errors and bad configuration.
#[derive(Debug, thiserror::Error)]
pub enum GatewatchError {
    /// A caller asked for a rule identifier the catalog does not contain.
    #[error("unknown rule: {0}")]
    UnknownRule(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_names_the_rule() {
        let err = GatewatchError::UnknownRule("bogus_rule".into());
        assert_eq!(err.to_string(), "unknown rule: bogus_rule");
    }
}
