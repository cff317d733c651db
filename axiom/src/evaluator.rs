//! Recursive predicate evaluation.
//!
//! A plain recursive call tree with no suspension points, no timeouts,
//! and no state of its own: the fact store is the only shared mutable
//! state, threaded through every call as an exclusive borrow.

use crate::answer::Answer;
use crate::error::EvaluationError;
use crate::evaluation::Evaluation;
use crate::facts::{AnswerWithDependencies, Facts};
use crate::predicate::{ComparisonOperator, Expression, Predicate};
use crate::question::Question;
use std::cmp::Ordering;

/// Shorthand for the outcome of evaluating against a store `F`.
pub type EvaluateResult<F> =
    Result<Evaluation<<F as Facts>::Rule>, EvaluationError<<F as Facts>::Error>>;

/// Evaluate a predicate against a fact lookup.
///
/// On success the evaluation carries the boolean the predicate evaluated
/// to, every question the result depended on, and the ambiguous-rule
/// groups reported while answering those questions. Failures surface
/// unchanged to the caller.
pub fn evaluate<F: Facts>(predicate: &Predicate, facts: &mut F) -> EvaluateResult<F> {
    match predicate {
        Predicate::False => Ok(Evaluation::new(false)),
        Predicate::True => Ok(Evaluation::new(true)),
        Predicate::Not(inner) => Ok(evaluate(inner, facts)?.negated()),
        Predicate::And(predicates) => evaluate_compound(predicates, false, facts),
        Predicate::Or(predicates) => evaluate_compound(predicates, true, facts),
        Predicate::Comparison { lhs, op, rhs } => evaluate_comparison(lhs, *op, rhs, facts),
    }
}

/// Short-circuit evaluation shared by `and` and `or`.
///
/// `identity` is the value that decides the compound early: `false` for
/// `and`, `true` for `or`. Provenance from every predicate actually
/// evaluated is kept, including the one that short-circuits. An empty
/// operand list never short-circuits, so `and([])` is true and `or([])`
/// is false.
fn evaluate_compound<F: Facts>(
    predicates: &[Predicate],
    identity: bool,
    facts: &mut F,
) -> EvaluateResult<F> {
    let mut accumulated = Evaluation::new(!identity);
    for predicate in predicates {
        let evaluation = evaluate(predicate, facts)?;
        let short_circuits = evaluation.value == identity;
        accumulated.absorb(evaluation);
        if short_circuits {
            accumulated.value = identity;
            return Ok(accumulated);
        }
    }
    Ok(accumulated)
}

/// Dispatch a comparison by the kinds of its operands.
fn evaluate_comparison<F: Facts>(
    lhs: &Expression,
    op: ComparisonOperator,
    rhs: &Expression,
    facts: &mut F,
) -> EvaluateResult<F> {
    // Booleans have no ordering in this engine, so an ordering operator
    // next to a nested predicate fails before any operand is evaluated.
    if op.is_ordering()
        && (matches!(lhs, Expression::Predicate(_)) || matches!(rhs, Expression::Predicate(_)))
    {
        return Err(EvaluationError::PredicatesAreOnlyEquatableNotComparable);
    }

    match (lhs, rhs) {
        (Expression::Predicate(left), Expression::Predicate(right)) => {
            // The comparator applies once both values are known, so the
            // right side is evaluated even when the left alone would
            // decide the outcome.
            let left = evaluate(left, facts)?;
            let right = evaluate(right, facts)?;
            let mut evaluation = Evaluation::new(equality_holds(op, left.value == right.value));
            evaluation.absorb(left);
            evaluation.absorb(right);
            Ok(evaluation)
        }
        (Expression::Predicate(_), Expression::Answer(_))
        | (Expression::Answer(_), Expression::Predicate(_)) => Err(EvaluationError::TypeMismatch),
        (Expression::Predicate(nested), Expression::Question(question))
        | (Expression::Question(question), Expression::Predicate(nested)) => {
            let nested = evaluate(nested, facts)?;
            let asked = ask(facts, question)?;
            let answered = match asked.answer {
                Answer::Bool(value) => value,
                _ => return Err(EvaluationError::TypeMismatch),
            };
            let mut evaluation = Evaluation::new(equality_holds(op, nested.value == answered));
            evaluation.absorb(nested);
            evaluation.dependencies.extend(asked.dependencies);
            evaluation.dependencies.insert(question.clone());
            evaluation.ambiguous_rules.extend(asked.ambiguous_rules);
            Ok(evaluation)
        }
        (Expression::Question(left), Expression::Question(right)) => {
            let left_asked = ask(facts, left)?;
            let right_asked = ask(facts, right)?;
            let value = compare_answers(&left_asked.answer, op, &right_asked.answer)?;
            let mut evaluation = Evaluation::new(value);
            evaluation.dependencies.insert(left.clone());
            evaluation.dependencies.insert(right.clone());
            evaluation.dependencies.extend(left_asked.dependencies);
            evaluation.dependencies.extend(right_asked.dependencies);
            evaluation.ambiguous_rules.extend(left_asked.ambiguous_rules);
            evaluation.ambiguous_rules.extend(right_asked.ambiguous_rules);
            Ok(evaluation)
        }
        (Expression::Question(question), Expression::Answer(literal)) => {
            compare_asked(facts, question, op, literal)
        }
        (Expression::Answer(literal), Expression::Question(question)) => {
            // Swapping the operator keeps the written operand order's
            // meaning while always placing the asked answer on the left.
            compare_asked(facts, question, op.swapped(), literal)
        }
        (Expression::Answer(left), Expression::Answer(right)) => {
            Ok(Evaluation::new(compare_answers(left, op, right)?))
        }
    }
}

/// Ask a question and compare the answer against a literal.
fn compare_asked<F: Facts>(
    facts: &mut F,
    question: &Question,
    op: ComparisonOperator,
    literal: &Answer,
) -> EvaluateResult<F> {
    let asked = ask(facts, question)?;
    let value = compare_answers(&asked.answer, op, literal)?;
    let mut evaluation = Evaluation::new(value);
    evaluation.dependencies.insert(question.clone());
    evaluation.dependencies.extend(asked.dependencies);
    evaluation.ambiguous_rules.extend(asked.ambiguous_rules);
    Ok(evaluation)
}

fn ask<F: Facts>(
    facts: &mut F,
    question: &Question,
) -> Result<AnswerWithDependencies<F::Rule>, EvaluationError<F::Error>> {
    facts
        .ask(question)
        .map_err(EvaluationError::QuestionEvaluationFailed)
}

/// Compare two answers under an operator.
///
/// Equality is defined for every answer kind; ordering only for `Int`,
/// `Double`, `String`, and comparable extension values. Answers of
/// different kinds never compare, and extension values only compare
/// within one registered type.
fn compare_answers<E>(
    lhs: &Answer,
    op: ComparisonOperator,
    rhs: &Answer,
) -> Result<bool, EvaluationError<E>> {
    if op.is_equality() {
        let equal = match (lhs, rhs) {
            (Answer::Bool(left), Answer::Bool(right)) => left == right,
            (Answer::Int(left), Answer::Int(right)) => left == right,
            (Answer::Double(left), Answer::Double(right)) => left == right,
            (Answer::String(left), Answer::String(right)) => left == right,
            (Answer::Comparable(left), Answer::Comparable(right))
                if left.type_name() == right.type_name() =>
            {
                left == right
            }
            (Answer::Equatable(left), Answer::Equatable(right))
                if left.type_name() == right.type_name() =>
            {
                left == right
            }
            _ => return Err(EvaluationError::TypeMismatch),
        };
        return Ok(equality_holds(op, equal));
    }

    let ordering = match (lhs, rhs) {
        (Answer::Int(left), Answer::Int(right)) => Some(left.cmp(right)),
        (Answer::Double(left), Answer::Double(right)) => left.partial_cmp(right),
        (Answer::String(left), Answer::String(right)) => Some(left.cmp(right)),
        (Answer::Comparable(left), Answer::Comparable(right))
            if left.type_name() == right.type_name() =>
        {
            left.partial_cmp(right)
        }
        _ => return Err(EvaluationError::TypeMismatch),
    };
    Ok(ordering_holds(op, ordering))
}

fn equality_holds(op: ComparisonOperator, equal: bool) -> bool {
    match op {
        ComparisonOperator::IsNotEqualTo => !equal,
        _ => equal,
    }
}

/// Whether an ordering satisfies an ordering operator. An undefined
/// ordering (IEEE-754 NaN) satisfies none of them.
fn ordering_holds(op: ComparisonOperator, ordering: Option<Ordering>) -> bool {
    match op {
        ComparisonOperator::IsEqualTo => ordering == Some(Ordering::Equal),
        ComparisonOperator::IsNotEqualTo => ordering != Some(Ordering::Equal),
        ComparisonOperator::IsLessThan => ordering == Some(Ordering::Less),
        ComparisonOperator::IsGreaterThan => ordering == Some(Ordering::Greater),
        ComparisonOperator::IsLessThanOrEqualTo => {
            matches!(ordering, Some(Ordering::Less | Ordering::Equal))
        }
        ComparisonOperator::IsGreaterThanOrEqualTo => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        }
    }
}
