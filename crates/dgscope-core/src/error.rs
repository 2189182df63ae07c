//! Error type shared by every fallible graph operation.
//!
//! Only structural and configuration mistakes are errors: asking for a
//! property that was never registered, reading a property before it was
//! computed, or failing to read/write a file. Ordinary no-op edge cases
//! (self-loops, duplicate edges, edges to unknown vertices in ignore mode)
//! are reported through `bool`/sentinel return values instead.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Fatal usage and resource errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The property name is not in the registry.
    #[error("{name} is not a valid vertex property")]
    UnknownProperty { name: String },

    /// The property is registered but its values are missing or stale.
    #[error(
        "the property {name} has not been extracted/computed \
         (expected {expected} values, found {found})"
    )]
    PropertyNotComputed {
        name: String,
        expected: usize,
        found: usize,
    },

    /// The property was computed before the edge set last changed.
    #[error("the property {name} is stale: the graph changed after it was computed")]
    PropertyStale { name: String },

    /// A property with this name is already registered.
    #[error("vertex property {name} already exists")]
    PropertyExists { name: String },

    /// Built-in properties are only written by the engine.
    #[error("vertex property {name} is computed by the engine and cannot be set")]
    BuiltinProperty { name: String },

    /// A value array does not cover exactly `|V|` vertices.
    #[error("vertex property {name} needs {expected} values, got {found}")]
    PropertyLength {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A file could not be opened, read, or written.
    #[error("could not access file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to an unnamed stream failed.
    #[error("stream I/O failed: {0}")]
    Stream(#[source] std::io::Error),

    /// A property line has fewer value columns than requested.
    #[error("line {line}: no value in column {column}")]
    MissingColumn { line: usize, column: usize },

    /// A property value could not be parsed as a number.
    #[error("line {line}: cannot parse {token:?} as a number")]
    InvalidValue { line: usize, token: String },

    /// Value columns are counted from 1.
    #[error("column {column} is out of range: value columns start at 1")]
    InvalidColumn { column: usize },
}

impl GraphError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownProperty { .. } => "E1001",
            Self::PropertyNotComputed { .. } => "E1002",
            Self::PropertyExists { .. } => "E1003",
            Self::PropertyStale { .. } => "E1004",
            Self::BuiltinProperty { .. } => "E1005",
            Self::PropertyLength { .. } => "E1006",
            Self::Io { .. } => "E2001",
            Self::Stream(_) => "E2002",
            Self::MissingColumn { .. } => "E3001",
            Self::InvalidValue { .. } => "E3002",
            Self::InvalidColumn { .. } => "E3003",
        }
    }

    /// Attach a path to a bare I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GraphError;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            GraphError::UnknownProperty { name: "x".into() },
            GraphError::PropertyNotComputed {
                name: "x".into(),
                expected: 1,
                found: 0,
            },
            GraphError::PropertyExists { name: "x".into() },
            GraphError::PropertyStale { name: "x".into() },
            GraphError::BuiltinProperty { name: "x".into() },
            GraphError::PropertyLength {
                name: "x".into(),
                expected: 2,
                found: 1,
            },
            GraphError::io("f", std::io::Error::other("boom")),
            GraphError::Stream(std::io::Error::other("boom")),
            GraphError::MissingColumn { line: 1, column: 2 },
            GraphError::InvalidValue {
                line: 1,
                token: "x".into(),
            },
            GraphError::InvalidColumn { column: 0 },
        ];

        let mut seen = HashSet::new();
        for err in &all {
            assert!(seen.insert(err.code()), "duplicate code {}", err.code());
        }
    }

    #[test]
    fn not_computed_message_names_the_property() {
        let err = GraphError::PropertyNotComputed {
            name: "in-degree".into(),
            expected: 4,
            found: 0,
        };
        let msg = err.to_string();
        assert!(msg.contains("in-degree"));
        assert!(msg.contains("expected 4"));
    }

    #[test]
    fn io_error_names_the_path() {
        let err = GraphError::io("missing/edges.txt", std::io::Error::other("nope"));
        assert!(err.to_string().contains("missing/edges.txt"));
    }
}
