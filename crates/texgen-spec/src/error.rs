/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for spec resolution and rendering.

use thiserror::Error;

/// Errors that can occur while resolving a spec tree.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A reference path could not be traversed and no default was configured.
    #[error("path '{path}' not found: missing segment '{segment}'")]
    PathNotFound { path: String, segment: String },

    /// An iteration source was missing, null, or not a sequence.
    #[error("iteration source error: {message}")]
    IterationSource { message: String },

    /// Mutually exclusive options were configured together.
    #[error("invalid spec configuration: {message}")]
    Configuration { message: String },

    /// Incompatible operand or content types.
    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;
