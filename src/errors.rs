//! Error types with rich diagnostics using miette
//!
//! Configuration errors that come from user-written text carry source spans
//! so the offending part of a descriptor can be pointed at.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::render::fit::{FitPolicy, PolicySupport};
use crate::types::NumericError;

/// Errors raised while configuring a shaped image.
///
/// All of these are reported eagerly, at the setter or parse call that
/// received the bad value. Rendering never starts with a half-valid setup.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("syntax error in {what}")]
    #[diagnostic(code(shaped_image::config::syntax))]
    Syntax {
        what: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("{expected}")]
        span: SourceSpan,
        expected: String,
    },

    #[error("invalid aspect ratio: {message}")]
    #[diagnostic(
        code(shaped_image::config::invalid_aspect_ratio),
        help("aspect ratios are written as `width:height`, e.g. `16:9`")
    )]
    InvalidAspectRatio {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unknown shape formula: {name}")]
    #[diagnostic(code(shaped_image::config::unknown_formula))]
    UnknownFormula {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("no formula registered under this name")]
        span: SourceSpan,
        #[help]
        suggestion: Option<String>,
    },

    #[error("invalid arguments for formula `{name}`: {message}")]
    #[diagnostic(code(shaped_image::config::invalid_formula_argument))]
    InvalidFormulaArgument {
        name: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("rejected by the formula")]
        span: SourceSpan,
    },

    #[error("unknown fit policy: {name}")]
    #[diagnostic(code(shaped_image::config::unknown_fit_policy))]
    UnknownFitPolicy {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a fit policy")]
        span: SourceSpan,
        #[help]
        accepted: Option<String>,
    },

    #[error("fit policy {policy} is not supported at this support level")]
    #[diagnostic(code(shaped_image::config::unsupported_fit_policy))]
    UnsupportedFitPolicy {
        policy: FitPolicy,
        support: PolicySupport,
        #[help]
        accepted: Option<String>,
    },

    #[error("invalid {field}: {source}")]
    #[diagnostic(code(shaped_image::config::invalid_number))]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: NumericError,
    },
}

impl ConfigError {
    /// Wrap a numeric validation failure for a named field.
    pub(crate) fn number(field: &'static str) -> impl FnOnce(NumericError) -> ConfigError {
        move |source| ConfigError::InvalidNumber { field, source }
    }
}
