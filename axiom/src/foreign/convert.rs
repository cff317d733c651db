//! Conversion from foreign parse trees to engine predicates.

use super::{
    ForeignCompoundKind, ForeignConstant, ForeignExpression, ForeignNumber, ForeignNumberKind,
    ForeignOperator, ForeignPredicate, ALWAYS_FALSE_TOKEN, ALWAYS_TRUE_TOKEN,
};
use crate::answer::Answer;
use crate::error::ConversionError;
use crate::predicate::{ComparisonOperator, Expression, Predicate};
use crate::question::Question;

/// Rewrite bare boolean words to the grammar's dedicated literal tokens.
///
/// The foreign grammar parses `flag == true` but not a standalone
/// `true`, so the bare words (case-insensitive, surrounding whitespace
/// trimmed) are rewritten before the text reaches the parser.
pub fn normalize_source(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        ALWAYS_TRUE_TOKEN
    } else if trimmed.eq_ignore_ascii_case("false") {
        ALWAYS_FALSE_TOKEN
    } else {
        text
    }
}

/// Normalize, parse with the host's parser, and convert.
///
/// `parse` returns `None` when the host grammar rejects the text.
pub fn convert_text<P>(text: &str, parse: P) -> Result<Predicate, ConversionError>
where
    P: FnOnce(&str) -> Option<ForeignPredicate>,
{
    let source = normalize_source(text);
    let foreign = parse(source).ok_or(ConversionError::InputWasNotRecognized)?;
    convert(&foreign)
}

/// Convert a parsed foreign predicate into an engine predicate.
///
/// Conversion is depth-first and fails fast: subpredicates convert in
/// order, the first failure is returned unchanged, and no partial
/// results are retained.
pub fn convert(foreign: &ForeignPredicate) -> Result<Predicate, ConversionError> {
    match foreign {
        ForeignPredicate::Always(true) => Ok(Predicate::True),
        ForeignPredicate::Always(false) => Ok(Predicate::False),
        ForeignPredicate::Compound {
            kind,
            subpredicates,
        } => convert_compound(*kind, subpredicates),
        ForeignPredicate::Comparison { lhs, operator, rhs } => {
            let lhs = convert_expression(lhs)?;
            let op = convert_operator(*operator)?;
            let rhs = convert_expression(rhs)?;
            Ok(Predicate::Comparison { lhs, op, rhs })
        }
        ForeignPredicate::Unrecognized { description } => {
            debug_assert!(false, "unrecognized foreign predicate: {}", description);
            Err(ConversionError::UnknownPredicateType(description.clone()))
        }
    }
}

/// Convert a foreign expression operand.
pub fn convert_expression(expression: &ForeignExpression) -> Result<Expression, ConversionError> {
    match expression {
        ForeignExpression::KeyPath(path) => Ok(Expression::Question(Question::new(path.clone()))),
        ForeignExpression::Constant(constant) => convert_constant(constant),
        ForeignExpression::SelfReference
        | ForeignExpression::Variable(_)
        | ForeignExpression::Function(_)
        | ForeignExpression::SetAlgebra
        | ForeignExpression::Subquery
        | ForeignExpression::Aggregate
        | ForeignExpression::AnyKey
        | ForeignExpression::Block
        | ForeignExpression::Conditional => {
            Err(ConversionError::UnsupportedExpression(expression.describe()))
        }
        ForeignExpression::Unrecognized { description } => {
            debug_assert!(false, "unrecognized foreign expression: {}", description);
            Err(ConversionError::UnknownExpression(description.clone()))
        }
    }
}

fn convert_compound(
    kind: ForeignCompoundKind,
    subpredicates: &[ForeignPredicate],
) -> Result<Predicate, ConversionError> {
    // The foreign grammar never produces an empty compound; one here
    // means the tree is malformed rather than vacuously true or false.
    let first = subpredicates
        .first()
        .ok_or(ConversionError::CompoundHasNoSubpredicates)?;
    match kind {
        ForeignCompoundKind::Not => Ok(Predicate::not(convert(first)?)),
        ForeignCompoundKind::And => Ok(Predicate::And(convert_all(subpredicates)?)),
        ForeignCompoundKind::Or => Ok(Predicate::Or(convert_all(subpredicates)?)),
    }
}

fn convert_all(subpredicates: &[ForeignPredicate]) -> Result<Vec<Predicate>, ConversionError> {
    subpredicates.iter().map(convert).collect()
}

fn convert_operator(operator: ForeignOperator) -> Result<ComparisonOperator, ConversionError> {
    match operator {
        ForeignOperator::LessThan => Ok(ComparisonOperator::IsLessThan),
        ForeignOperator::LessThanOrEqualTo => Ok(ComparisonOperator::IsLessThanOrEqualTo),
        ForeignOperator::GreaterThan => Ok(ComparisonOperator::IsGreaterThan),
        ForeignOperator::GreaterThanOrEqualTo => Ok(ComparisonOperator::IsGreaterThanOrEqualTo),
        ForeignOperator::EqualTo => Ok(ComparisonOperator::IsEqualTo),
        ForeignOperator::NotEqualTo => Ok(ComparisonOperator::IsNotEqualTo),
        unsupported => Err(ConversionError::UnsupportedOperator(
            unsupported.name().to_string(),
        )),
    }
}

fn convert_constant(constant: &ForeignConstant) -> Result<Expression, ConversionError> {
    match constant {
        ForeignConstant::Text(text) => Ok(Expression::Answer(Answer::String(text.clone()))),
        ForeignConstant::Number(number) => convert_number(number),
        ForeignConstant::Other { description } => Err(ConversionError::UnsupportedConstantValue(
            description.clone(),
        )),
    }
}

/// Numeric literals classify by their kind tag. The single-bit tag marks
/// a bare boolean literal standing where a sub-predicate operand is
/// expected, so it becomes a nested always-true or always-false
/// predicate instead of an answer.
fn convert_number(number: &ForeignNumber) -> Result<Expression, ConversionError> {
    match &number.kind {
        ForeignNumberKind::Boolean => {
            let predicate = if number.value.is_nonzero() {
                Predicate::True
            } else {
                Predicate::False
            };
            Ok(Expression::Predicate(Box::new(predicate)))
        }
        ForeignNumberKind::Int8
        | ForeignNumberKind::Int16
        | ForeignNumberKind::Int32
        | ForeignNumberKind::Int64 => Ok(Expression::Answer(Answer::Int(number.value.as_i64()))),
        ForeignNumberKind::Float32 | ForeignNumberKind::Float64 => {
            Ok(Expression::Answer(Answer::Double(number.value.as_f64())))
        }
        ForeignNumberKind::Unrecognized(description) => {
            debug_assert!(false, "unrecognized foreign number kind: {}", description);
            Err(ConversionError::UnknownNumberType(description.clone()))
        }
    }
}
