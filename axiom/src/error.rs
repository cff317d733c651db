//! Error surfaces for evaluation, serialization, and conversion.
//!
//! Every fallible operation returns an explicit `Result`; nothing is
//! recovered internally, and nothing panics at the public boundary.

use thiserror::Error;

/// Why evaluating a predicate failed.
///
/// `E` is the fact store's own error type, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError<E> {
    /// Operand kinds are incompatible for the requested comparison:
    /// a nested predicate compared against a literal answer, an ordering
    /// applied to a non-orderable answer kind, or two answers of
    /// different kinds.
    #[error("cannot compare answers of mismatched types")]
    TypeMismatch,

    /// An ordering operator was applied where at least one operand is a
    /// nested predicate; booleans have no ordering in this engine.
    #[error("nested predicates support equality comparisons only")]
    PredicatesAreOnlyEquatableNotComparable,

    /// A fact lookup failed.
    #[error("question evaluation failed: {0}")]
    QuestionEvaluationFailed(E),
}

/// Why encoding or decoding a wire document failed.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document is not syntactically valid JSON.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// A node does not have the expected JSON shape.
    #[error("expected {expected} in {node}")]
    InvalidNode {
        node: &'static str,
        expected: &'static str,
    },

    /// A required field is absent.
    #[error("missing field '{field}' in {node}")]
    MissingField {
        node: &'static str,
        field: &'static str,
    },

    /// The `type` discriminator names no known predicate case.
    #[error("unknown predicate type '{0}'")]
    UnknownPredicateTag(String),

    /// The operator value names no known comparison operator.
    #[error("unknown comparison operator '{0}'")]
    UnknownOperator(String),

    /// An expression object carries none of `question`, `answer`, or
    /// `predicate`.
    #[error("expression carries no operand")]
    EmptyExpression,

    /// An answer object carries none of the answer keys.
    #[error("answer carries no value")]
    EmptyAnswer,

    /// The declared extension type name has no registered decoder.
    #[error("no registered answer type named '{0}'")]
    UnregisteredAnswerType(String),

    /// The declared extension type is registered under the other
    /// capability.
    #[error("answer type '{type_name}' is registered as {registered} but the document declares it {declared}")]
    CapabilityMismatch {
        type_name: String,
        registered: &'static str,
        declared: &'static str,
    },

    /// An extension payload failed to encode or decode.
    #[error("extension payload for '{type_name}': {source}")]
    ExtensionPayload {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-finite doubles have no wire representation.
    #[error("double {0} has no wire representation")]
    NonFiniteDouble(f64),
}

/// Why converting a foreign predicate tree failed.
///
/// The `Unknown*` cases are forward-compatibility gaps: the foreign
/// library grew a case this converter does not recognize. They are
/// reported as ordinary failures, with a debug-build assertion at the
/// detection site so library evolution surfaces early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A foreign compound node arrived with an empty operand list. The
    /// foreign grammar never produces one, so the tree is malformed
    /// rather than vacuously true or false.
    #[error("compound predicate has no subpredicates")]
    CompoundHasNoSubpredicates,

    /// The source text did not parse as a foreign predicate.
    #[error("input was not recognized as a predicate")]
    InputWasNotRecognized,

    /// The foreign operator family has no counterpart in this engine.
    #[error("unsupported comparison operator {0}")]
    UnsupportedOperator(String),

    /// The foreign expression kind has no counterpart in this engine.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// The foreign constant kind has no counterpart in this engine.
    #[error("unsupported constant value: {0}")]
    UnsupportedConstantValue(String),

    /// The foreign library grew a predicate case this converter does not
    /// recognize.
    #[error("unknown foreign predicate type: {0}")]
    UnknownPredicateType(String),

    /// The foreign library grew a numeric kind this converter does not
    /// recognize.
    #[error("unknown foreign number type: {0}")]
    UnknownNumberType(String),

    /// The foreign library grew an expression case this converter does
    /// not recognize.
    #[error("unknown foreign expression: {0}")]
    UnknownExpression(String),
}
