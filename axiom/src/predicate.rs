//! The boolean-expression tree.

use crate::answer::Answer;
use crate::error::EvaluationError;
use crate::evaluation::Evaluation;
use crate::facts::Facts;
use crate::question::Question;
use std::fmt;

/// The comparison operators a predicate can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    IsEqualTo,
    IsNotEqualTo,
    IsLessThan,
    IsGreaterThan,
    IsLessThanOrEqualTo,
    IsGreaterThanOrEqualTo,
}

impl ComparisonOperator {
    /// The operator that preserves meaning when the operands swap sides.
    ///
    /// The equality operators are self-inverse; the ordering operators
    /// pair up (`<` with `>`, `<=` with `>=`).
    pub fn swapped(self) -> Self {
        match self {
            ComparisonOperator::IsEqualTo => ComparisonOperator::IsEqualTo,
            ComparisonOperator::IsNotEqualTo => ComparisonOperator::IsNotEqualTo,
            ComparisonOperator::IsLessThan => ComparisonOperator::IsGreaterThan,
            ComparisonOperator::IsGreaterThan => ComparisonOperator::IsLessThan,
            ComparisonOperator::IsLessThanOrEqualTo => ComparisonOperator::IsGreaterThanOrEqualTo,
            ComparisonOperator::IsGreaterThanOrEqualTo => ComparisonOperator::IsLessThanOrEqualTo,
        }
    }

    /// True for `<`, `>`, `<=`, `>=`.
    pub fn is_ordering(self) -> bool {
        !self.is_equality()
    }

    /// True for `==` and `!=`.
    pub fn is_equality(self) -> bool {
        matches!(
            self,
            ComparisonOperator::IsEqualTo | ComparisonOperator::IsNotEqualTo
        )
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOperator::IsEqualTo => write!(f, "=="),
            ComparisonOperator::IsNotEqualTo => write!(f, "!="),
            ComparisonOperator::IsLessThan => write!(f, "<"),
            ComparisonOperator::IsGreaterThan => write!(f, ">"),
            ComparisonOperator::IsLessThanOrEqualTo => write!(f, "<="),
            ComparisonOperator::IsGreaterThanOrEqualTo => write!(f, ">="),
        }
    }
}

/// An operand of a comparison: a question, a literal answer, or a nested
/// boolean sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Question(Question),
    Answer(Answer),
    Predicate(Box<Predicate>),
}

impl Expression {
    /// Structural size: questions and answers count 0, a nested predicate
    /// counts its own size.
    pub fn size(&self) -> usize {
        match self {
            Expression::Question(_) | Expression::Answer(_) => 0,
            Expression::Predicate(predicate) => predicate.size(),
        }
    }
}

impl From<Question> for Expression {
    fn from(question: Question) -> Self {
        Expression::Question(question)
    }
}

impl From<Answer> for Expression {
    fn from(answer: Answer) -> Self {
        Expression::Answer(answer)
    }
}

impl From<Predicate> for Expression {
    fn from(predicate: Predicate) -> Self {
        Expression::Predicate(Box::new(predicate))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Question(question) => write!(f, "{}", question),
            Expression::Answer(answer) => write!(f, "{}", answer),
            Expression::Predicate(predicate) => write!(f, "({})", predicate),
        }
    }
}

/// A recursive boolean-expression tree evaluated against a fact lookup.
///
/// A predicate exclusively owns its sub-predicates and expressions: the
/// structure is a tree, never a graph, so there is no sharing and no
/// cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    False,
    True,
    Not(Box<Predicate>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Comparison {
        lhs: Expression,
        op: ComparisonOperator,
        rhs: Expression,
    },
}

impl Predicate {
    pub fn not(predicate: Predicate) -> Self {
        Predicate::Not(Box::new(predicate))
    }

    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::And(predicates.into_iter().collect())
    }

    pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Or(predicates.into_iter().collect())
    }

    pub fn comparison(
        lhs: impl Into<Expression>,
        op: ComparisonOperator,
        rhs: impl Into<Expression>,
    ) -> Self {
        Predicate::Comparison {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    /// Structural size, used by rule selection to break ties between
    /// candidate rules of the same priority.
    ///
    /// The constants count 0, negation is transparent, a conjunction
    /// counts its operands, a disjunction counts its largest operand, and
    /// a comparison sums its operand expressions.
    pub fn size(&self) -> usize {
        match self {
            Predicate::False | Predicate::True => 0,
            Predicate::Not(predicate) => predicate.size(),
            Predicate::And(predicates) => predicates.len(),
            Predicate::Or(predicates) => {
                predicates.iter().map(Predicate::size).max().unwrap_or(0)
            }
            Predicate::Comparison { lhs, rhs, .. } => lhs.size() + rhs.size(),
        }
    }

    /// Evaluate this predicate against a fact lookup.
    ///
    /// See [`evaluate`](crate::evaluate).
    pub fn evaluate<F: Facts>(
        &self,
        facts: &mut F,
    ) -> Result<Evaluation<F::Rule>, EvaluationError<F::Error>> {
        crate::evaluator::evaluate(self, facts)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::False => write!(f, "false"),
            Predicate::True => write!(f, "true"),
            Predicate::Not(predicate) => write!(f, "not {}", predicate),
            Predicate::And(predicates) => write_joined(f, predicates, " and "),
            Predicate::Or(predicates) => write_joined(f, predicates, " or "),
            Predicate::Comparison { lhs, op, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    predicates: &[Predicate],
    separator: &str,
) -> fmt::Result {
    f.write_str("(")?;
    for (index, predicate) in predicates.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", predicate)?;
    }
    f.write_str(")")
}
