use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// The per-tick path is closed-form geometry and does not produce errors for
/// valid physical configurations; every variant here reflects a contract
/// violation caught at configuration time, or caller misuse such as driving
/// the state non-finite from outside.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Numerical issue beyond the silently handled degenerate cases.
    #[error("numerical error: {0}")]
    MathError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("radius must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }
}
