//! The foreign predicate boundary.
//!
//! A host platform parses textual predicates such as
//! `age >= 21 AND state == "active"` with its own grammar; this module
//! models the parse-tree shapes consumed at that boundary and converts
//! them into this engine's [`Predicate`](crate::Predicate) tree. The
//! parser itself stays on the host side and is injected as a closure
//! (see [`convert_text`]).

mod convert;

pub use convert::{convert, convert_expression, convert_text, normalize_source};

/// The foreign grammar's dedicated always-true literal token.
pub const ALWAYS_TRUE_TOKEN: &str = "TRUEPREDICATE";

/// The foreign grammar's dedicated always-false literal token.
pub const ALWAYS_FALSE_TOKEN: &str = "FALSEPREDICATE";

/// A parsed foreign predicate node.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignPredicate {
    /// The grammar's dedicated always-true or always-false literal.
    Always(bool),
    /// A boolean combination of subpredicates.
    Compound {
        kind: ForeignCompoundKind,
        subpredicates: Vec<ForeignPredicate>,
    },
    /// A comparison between two foreign expressions.
    Comparison {
        lhs: ForeignExpression,
        operator: ForeignOperator,
        rhs: ForeignExpression,
    },
    /// A predicate case this converter does not recognize.
    Unrecognized { description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignCompoundKind {
    Not,
    And,
    Or,
}

/// Foreign comparison operator families.
///
/// Only the six relational operators map into this engine; the
/// text-match, membership, and range families have no counterpart here
/// and are rejected at conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignOperator {
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    EqualTo,
    NotEqualTo,
    Matches,
    Like,
    BeginsWith,
    EndsWith,
    In,
    Contains,
    Between,
    CustomSelector,
}

impl ForeignOperator {
    /// The operator's textual form in the foreign grammar.
    pub fn name(self) -> &'static str {
        match self {
            ForeignOperator::LessThan => "<",
            ForeignOperator::LessThanOrEqualTo => "<=",
            ForeignOperator::GreaterThan => ">",
            ForeignOperator::GreaterThanOrEqualTo => ">=",
            ForeignOperator::EqualTo => "==",
            ForeignOperator::NotEqualTo => "!=",
            ForeignOperator::Matches => "MATCHES",
            ForeignOperator::Like => "LIKE",
            ForeignOperator::BeginsWith => "BEGINSWITH",
            ForeignOperator::EndsWith => "ENDSWITH",
            ForeignOperator::In => "IN",
            ForeignOperator::Contains => "CONTAINS",
            ForeignOperator::Between => "BETWEEN",
            ForeignOperator::CustomSelector => "custom selector",
        }
    }
}

/// A parsed foreign expression operand.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignExpression {
    /// A key path naming a fact.
    KeyPath(String),
    /// A literal constant.
    Constant(ForeignConstant),
    SelfReference,
    Variable(String),
    Function(String),
    SetAlgebra,
    Subquery,
    Aggregate,
    AnyKey,
    Block,
    Conditional,
    /// An expression case this converter does not recognize.
    Unrecognized { description: String },
}

impl ForeignExpression {
    /// A short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            ForeignExpression::KeyPath(path) => format!("key path '{}'", path),
            ForeignExpression::Constant(_) => "constant".to_string(),
            ForeignExpression::SelfReference => "self reference".to_string(),
            ForeignExpression::Variable(name) => format!("variable '${}'", name),
            ForeignExpression::Function(name) => format!("function call '{}'", name),
            ForeignExpression::SetAlgebra => "set algebra expression".to_string(),
            ForeignExpression::Subquery => "subquery".to_string(),
            ForeignExpression::Aggregate => "aggregate expression".to_string(),
            ForeignExpression::AnyKey => "wildcard key".to_string(),
            ForeignExpression::Block => "block expression".to_string(),
            ForeignExpression::Conditional => "conditional expression".to_string(),
            ForeignExpression::Unrecognized { description } => description.clone(),
        }
    }
}

/// A literal constant in a foreign expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignConstant {
    Text(String),
    Number(ForeignNumber),
    /// A constant kind with no representation here (dates, data blobs,
    /// collections, ...).
    Other { description: String },
}

/// A numeric literal with the host's numeric-kind tag preserved.
///
/// Classification happens by the kind tag, not the stored value: the
/// host distinguishes a boolean-flavored single bit from a genuine
/// integer even when both hold `1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignNumber {
    pub kind: ForeignNumberKind,
    pub value: ForeignNumberValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForeignNumberKind {
    /// The single-bit, boolean-flavored tag.
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// A numeric kind this converter does not recognize.
    Unrecognized(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForeignNumberValue {
    Integer(i64),
    Floating(f64),
}

impl ForeignNumberValue {
    pub fn as_i64(self) -> i64 {
        match self {
            ForeignNumberValue::Integer(value) => value,
            ForeignNumberValue::Floating(value) => value as i64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            ForeignNumberValue::Integer(value) => value as f64,
            ForeignNumberValue::Floating(value) => value,
        }
    }

    pub fn is_nonzero(self) -> bool {
        match self {
            ForeignNumberValue::Integer(value) => value != 0,
            ForeignNumberValue::Floating(value) => value != 0.0,
        }
    }
}
