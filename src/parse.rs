//! Parse configuration strings into typed values
//!
//! Two inputs are textual: formula descriptors (`ellipse`, `superellipse(4.5)`)
//! and aspect ratios (`16:9`). Both go through the pest grammar in
//! `shaped.pest`; errors keep the original text so diagnostics can point at it.

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::errors::ConfigError;
use crate::{Rule, ShapeParser};

/// A formula descriptor split into its name and numeric arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaDescriptor<'a> {
    /// The descriptor text as given
    pub source: &'a str,
    /// Formula name, e.g. `superellipse`
    pub name: &'a str,
    pub name_span: SourceSpan,
    /// Arguments in order; empty for `name` and `name()`
    pub args: Vec<f64>,
    /// Span of the argument list, or of the whole descriptor when there is none
    pub args_span: SourceSpan,
}

/// Parse `name` or `name(arg, ...)`.
pub fn parse_formula_descriptor(source: &str) -> Result<FormulaDescriptor<'_>, ConfigError> {
    const WHAT: &str = "formula descriptor";

    let pairs = ShapeParser::parse(Rule::formula, source).map_err(|e| syntax_error(WHAT, source, e))?;

    let mut name = "";
    let mut name_span = SourceSpan::from((0, source.len()));
    let mut args = Vec::new();
    let mut args_span = SourceSpan::from((0, source.len()));

    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::ident => {
                name = pair.as_str();
                name_span = span_of(&pair);
            }
            Rule::args => args_span = span_of(&pair),
            Rule::number => args.push(parse_number(&pair, WHAT, source)?),
            _ => {}
        }
    }

    Ok(FormulaDescriptor {
        source,
        name,
        name_span,
        args,
        args_span,
    })
}

/// Parse a `width:height` aspect ratio.
///
/// Blank input means "no fixed ratio" and yields `None`, as does a ratio with
/// a zero on either side. Negative ratios are rejected.
pub fn parse_aspect_ratio(source: &str) -> Result<Option<f64>, ConfigError> {
    const WHAT: &str = "aspect ratio";

    let text = source.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let pairs = ShapeParser::parse(Rule::aspect_ratio, text).map_err(|e| syntax_error(WHAT, text, e))?;

    let mut sides = Vec::with_capacity(2);
    for pair in pairs.flatten() {
        if pair.as_rule() == Rule::number {
            let value = parse_number(&pair, WHAT, text)?;
            if value < 0.0 {
                return Err(ConfigError::InvalidAspectRatio {
                    message: format!("`{}` is negative", pair.as_str()),
                    src: NamedSource::new(WHAT, text.to_string()),
                    span: span_of(&pair),
                });
            }
            sides.push(value);
        }
    }

    match sides.as_slice() {
        [w, h] if *w == 0.0 || *h == 0.0 => Ok(None),
        [w, h] => Ok(Some(w / h)),
        _ => Err(ConfigError::InvalidAspectRatio {
            message: "expected exactly two numbers".to_string(),
            src: NamedSource::new(WHAT, text.to_string()),
            span: (0, text.len()).into(),
        }),
    }
}

fn parse_number(pair: &Pair<'_, Rule>, what: &'static str, source: &str) -> Result<f64, ConfigError> {
    pair.as_str().parse::<f64>().map_err(|e| ConfigError::Syntax {
        what,
        src: NamedSource::new(what, source.to_string()),
        span: span_of(pair),
        expected: e.to_string(),
    })
}

fn span_of(pair: &Pair<'_, Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn syntax_error(what: &'static str, source: &str, err: pest::error::Error<Rule>) -> ConfigError {
    let span: SourceSpan = match err.location {
        InputLocation::Pos(pos) => (pos, 0).into(),
        InputLocation::Span((start, end)) => (start, end - start).into(),
    };
    ConfigError::Syntax {
        what,
        src: NamedSource::new(what, source.to_string()),
        span,
        expected: err.variant.message().into_owned(),
    }
}
