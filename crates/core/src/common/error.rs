//! Error types for the simulator's one fallible boundary: loading a hex image.
//!
//! Every other failure mode inside the pipeline is total by construction — divide by
//! zero, signed overflow, and branch mispredicts are all routine cases handled inline,
//! not propagated as errors.

use thiserror::Error;

/// Failure modes when parsing a hex word image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Could not read the image file from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A non-empty, non-comment line was not a valid hex word or `@addr` marker.
    #[error("malformed image line {line}: {text:?}")]
    MalformedLine {
        /// 1-based line number within the image file.
        line: usize,
        /// The offending line's raw text.
        text: String,
    },

    /// An `@addr` segment marker pointed past the end of the backing memory.
    #[error("segment address {addr:#x} is out of range for this memory")]
    SegmentOutOfRange {
        /// The out-of-range byte address.
        addr: u32,
    },
}
