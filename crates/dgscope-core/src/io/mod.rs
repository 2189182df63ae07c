//! Plain-text input and output.
//!
//! All formats are whitespace-delimited and line oriented. A line whose
//! first token starts with `#` is a comment. Lines are split on `\n` bytes
//! and decoded lossily: a stray non-UTF-8 byte turns into `U+FFFD` inside its
//! own token instead of failing the whole file.
//!
//! Each format has a `read_*`/`write_*` function working on any
//! [`std::io::BufRead`]/[`std::io::Write`] and a `load_*`/`save_*` wrapper
//! that opens the file and reports failures with the path attached.

pub mod edgelist;
pub mod properties;
pub mod table;

use std::io::BufRead;
use std::path::Path;

use crate::error::GraphError;

/// `true` for comment lines: the first token starts with `#`.
pub(crate) fn is_comment(first_token: &str) -> bool {
    first_token.starts_with('#')
}

/// Lines of `reader` without requiring valid UTF-8.
pub(crate) fn lossy_lines<R: BufRead>(
    mut reader: R,
) -> impl Iterator<Item = std::io::Result<String>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&buf).into_owned())),
            Err(err) => Some(Err(err)),
        }
    })
}

/// Attach `path` to stream errors raised by a `read_*`/`write_*` function.
pub(crate) fn at_path(path: &Path) -> impl Fn(GraphError) -> GraphError + '_ {
    move |err| match err {
        GraphError::Stream(source) => GraphError::io(path, source),
        other => other,
    }
}
