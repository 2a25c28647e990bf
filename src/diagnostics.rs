//! Unified diagnostics for the hailstone pipeline.
//!
//! Every failure mode of the expression evaluator and the trajectory
//! consumers is represented by [`HailstoneError`]. Internally each variant
//! keeps its own cause, source text, and span for logging and rich
//! `miette` rendering; at the user-facing boundary the input-validation
//! variants all collapse into a single "invalid expression" signal via
//! [`HailstoneError::user_message`]. A resource-ceiling breach is the one
//! failure deliberately kept distinct from invalid input.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::syntax::Span;

/// Shared handle to named source text for error reporting.
pub type SourceArc = Arc<NamedSource<String>>;

/// Type-safe error classification. Tests assert on this instead of
/// matching message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input does not parse under the restricted grammar.
    Syntax,
    /// A construct outside the grammar reached the builder (defensive).
    Operator,
    /// Power with non-positive base or negative exponent, division by zero.
    Domain,
    /// Estimated exponentiation result exceeds the digit budget.
    SizeLimit,
    /// The fully evaluated expression is not strictly positive.
    NonPositive,
    /// A trajectory consumer ran past the configured step ceiling.
    ResourceExceeded,
    /// Writing rendered output failed.
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Operator => "operator",
            ErrorKind::Domain => "domain",
            ErrorKind::SizeLimit => "size_limit",
            ErrorKind::NonPositive => "non_positive",
            ErrorKind::ResourceExceeded => "resource_exceeded",
            ErrorKind::Io => "io",
        }
    }

    /// Whether this kind is normalized to the single "invalid expression"
    /// message at the user-facing boundary.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::Syntax
                | ErrorKind::Operator
                | ErrorKind::Domain
                | ErrorKind::SizeLimit
                | ErrorKind::NonPositive
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal, composable error context: where the failure happened and how
/// to help. All fields optional; consumers degrade gracefully.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn spanned(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }
}

/// Unified error type for every hailstone failure mode.
#[derive(Debug, Error)]
pub enum HailstoneError {
    #[error("syntax error: {message}")]
    Syntax { message: String, ctx: ErrorContext },

    #[error("unsupported construct: {message}")]
    Operator { message: String, ctx: ErrorContext },

    #[error("domain error: {message}")]
    Domain { message: String, ctx: ErrorContext },

    #[error("number too large: {message}")]
    SizeLimit { message: String, ctx: ErrorContext },

    #[error("result is not a positive integer")]
    NonPositive { ctx: ErrorContext },

    #[error("step ceiling exceeded: {message}")]
    ResourceExceeded { message: String },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl HailstoneError {
    pub fn syntax(message: impl Into<String>, ctx: ErrorContext) -> Self {
        Self::Syntax {
            message: message.into(),
            ctx,
        }
    }

    pub fn operator(message: impl Into<String>, ctx: ErrorContext) -> Self {
        Self::Operator {
            message: message.into(),
            ctx,
        }
    }

    pub fn domain(message: impl Into<String>, ctx: ErrorContext) -> Self {
        Self::Domain {
            message: message.into(),
            ctx,
        }
    }

    pub fn size_limit(message: impl Into<String>, ctx: ErrorContext) -> Self {
        Self::SizeLimit {
            message: message.into(),
            ctx,
        }
    }

    pub fn non_positive(ctx: ErrorContext) -> Self {
        Self::NonPositive { ctx }
    }

    pub fn resource_exceeded(message: impl Into<String>) -> Self {
        Self::ResourceExceeded {
            message: message.into(),
        }
    }

    /// Attaches a help message to the error's context.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        if let Some(ctx) = self.ctx_mut() {
            ctx.help = Some(help.into());
        }
        self
    }

    /// Returns the type-safe classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HailstoneError::Syntax { .. } => ErrorKind::Syntax,
            HailstoneError::Operator { .. } => ErrorKind::Operator,
            HailstoneError::Domain { .. } => ErrorKind::Domain,
            HailstoneError::SizeLimit { .. } => ErrorKind::SizeLimit,
            HailstoneError::NonPositive { .. } => ErrorKind::NonPositive,
            HailstoneError::ResourceExceeded { .. } => ErrorKind::ResourceExceeded,
            HailstoneError::Io(_) => ErrorKind::Io,
        }
    }

    /// The normalized message shown to end users. All five input-error
    /// kinds are deliberately indistinguishable here; the detailed cause
    /// stays available through `Display` and the `Diagnostic` impl.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            kind if kind.is_input_error() => {
                "invalid expression: enter a positive integer (commas and powers like 10^25 are supported)"
            }
            ErrorKind::ResourceExceeded => "computation exceeded limits",
            _ => "output error",
        }
    }

    fn ctx(&self) -> Option<&ErrorContext> {
        match self {
            HailstoneError::Syntax { ctx, .. }
            | HailstoneError::Operator { ctx, .. }
            | HailstoneError::Domain { ctx, .. }
            | HailstoneError::SizeLimit { ctx, .. }
            | HailstoneError::NonPositive { ctx } => Some(ctx),
            HailstoneError::ResourceExceeded { .. } | HailstoneError::Io(_) => None,
        }
    }

    fn ctx_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            HailstoneError::Syntax { ctx, .. }
            | HailstoneError::Operator { ctx, .. }
            | HailstoneError::Domain { ctx, .. }
            | HailstoneError::SizeLimit { ctx, .. }
            | HailstoneError::NonPositive { ctx } => Some(ctx),
            HailstoneError::ResourceExceeded { .. } | HailstoneError::Io(_) => None,
        }
    }
}

impl Diagnostic for HailstoneError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("hailstone::{}", self.kind())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()?
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()?
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx()?.span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = match self.kind() {
            ErrorKind::Syntax => "does not parse here",
            ErrorKind::Operator => "unsupported construct",
            ErrorKind::Domain => "invalid operand",
            ErrorKind::SizeLimit => "result would be too large",
            ErrorKind::NonPositive => "evaluates to zero or below",
            _ => "here",
        };
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some(label.to_string()),
            span.start,
            len,
        ))))
    }
}

/// Source text plus a display name, converted to a [`NamedSource`] when an
/// error needs to carry it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn to_named_source(&self) -> SourceArc {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

/// Prints an error with full miette diagnostics. Use for user-facing
/// error display in CLI contexts.
pub fn print_error(error: HailstoneError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
