//! Error types shared by config parsing, growth, and tessellation.

use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// `Configuration` covers everything detectable before generation starts
/// (malformed tables, bad resolution, non-finite inputs); `Geometry` covers
/// defects discovered while tessellating a finished tree. Both are terminal
/// for the current call; the caller decides whether to abort startup or
/// fall back to a default tree description.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("degenerate geometry: {0}")]
    Geometry(String),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Error::Geometry(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::configuration("stem table entry -1 at depth 2");
        assert!(e.to_string().contains("invalid configuration"));

        let e = Error::geometry("zero-length branch 4");
        assert!(e.to_string().contains("degenerate geometry"));
    }
}
