// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error types for bisector derivation, curve evaluation, solving and
// half-edge graph mutation.

use crate::geom::Real;
use crate::site::SiteKind;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Which arena an invalid handle pointed into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HandleKind {
    Vertex,
    Edge,
    Face,
    Site,
}

impl std::fmt::Display for HandleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HandleKind::Vertex => "vertex",
            HandleKind::Edge => "edge",
            HandleKind::Face => "face",
            HandleKind::Site => "site",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No bisector derivation or solver exists for this site combination.
    #[error("unsupported site configuration: {}", format_kinds(.0))]
    UnsupportedConfiguration(Vec<SiteKind>),

    /// Input geometry for which the requested quantity is undefined
    /// (parallel lines, coincident points, zero-length segments).
    #[error("degenerate input: {0}")]
    Degenerate(String),

    /// A bisector was evaluated outside the offset range where it exists.
    #[error("offset t = {t} lies outside the bisector domain (discriminant {discriminant})")]
    Domain { t: Real, discriminant: Real },

    /// A graph mutation was rejected because it would break half-edge invariants.
    #[error("topology violation: {0}")]
    Topology(String),

    #[error("invalid {kind} handle {index}")]
    InvalidHandle { kind: HandleKind, index: u32 },
}

fn format_kinds(kinds: &[SiteKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

impl Error {
    pub fn unsupported(kinds: &[SiteKind]) -> Self {
        Error::UnsupportedConfiguration(kinds.to_vec())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Error::Degenerate(msg.into())
    }

    pub fn topology(msg: impl Into<String>) -> Self {
        Error::Topology(msg.into())
    }

    pub fn invalid_handle(kind: HandleKind, index: u32) -> Self {
        Error::InvalidHandle { kind, index }
    }

    /// Geometric failures are local to one candidate and the caller can move
    /// on to the next one. Topology and handle errors abort the insertion.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedConfiguration(_) | Error::Degenerate(_) | Error::Domain { .. }
        )
    }
}
