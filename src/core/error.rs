//! Typed errors for the I/O-facing collaborators.
//!
//! The core algorithms (`Extractor`, `Builder`, `Cluster`, `Neuron`) never
//! return this type: precondition and internal-invariant violations there
//! are fatal and panic, matching the teacher's `panic!`/`assert!` idiom.
//! `DendriteError` exists only at the boundary where failure is routine
//! (a missing directory, an unwritable path), mirroring
//! `examples/meilisearch-arroy/src/error.rs`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DendriteError {
    #[error("failed to read image directory {path}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write SWC file {path}")]
    WriteSwc {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {path}")]
    CreateOutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
