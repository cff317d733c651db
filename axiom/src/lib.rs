//! # Axiom Engine
//!
//! **Predicates for business rules**
//!
//! Axiom evaluates a boolean-expression tree (a [`Predicate`]) against a
//! lookup of typed facts ([`Question`]s answered by [`Answer`]s). The
//! result is a boolean together with the provenance a surrounding cache
//! needs: which facts the boolean depended on, and which candidate rules
//! were ambiguous in deriving them.
//!
//! ## Quick Start
//!
//! ```rust
//! use axiom::{Answer, ComparisonOperator, FactTable, Predicate, Question};
//!
//! let predicate = Predicate::and([
//!     Predicate::comparison(
//!         Question::new("age"),
//!         ComparisonOperator::IsGreaterThanOrEqualTo,
//!         Answer::Int(21),
//!     ),
//!     Predicate::comparison(
//!         Question::new("state"),
//!         ComparisonOperator::IsEqualTo,
//!         Answer::from("active"),
//!     ),
//! ]);
//!
//! let mut facts = FactTable::new();
//! facts.insert("age", 30);
//! facts.insert("state", "active");
//!
//! let evaluation = predicate.evaluate(&mut facts).unwrap();
//! assert!(evaluation.value);
//! assert!(evaluation.dependencies.contains(&Question::new("age")));
//! ```
//!
//! ## Core Concepts
//!
//! ### Predicates
//! A predicate is a tree of boolean combinators over comparisons. `and`
//! and `or` short-circuit left to right while still recording provenance
//! from everything actually evaluated.
//!
//! ### Questions and Answers
//! A question names a fact; asking the fact store produces a typed
//! answer plus the dependencies and ambiguity the store observed while
//! deriving it. Hosts plug in custom answer types at two capability
//! levels through the [`AnswerTypeRegistry`].
//!
//! ### Provenance
//! Every [`Evaluation`] reports the exact set of questions its boolean
//! depended on, so an external cache knows when a previously computed
//! result must be recomputed.
//!
//! ### Foreign predicates
//! Trees parsed by a host platform's textual-predicate grammar convert
//! into engine predicates through the [`foreign`] module.

pub mod answer;
pub mod error;
pub mod evaluation;
pub mod evaluator;
pub mod extension;
pub mod facts;
pub mod foreign;
pub mod predicate;
pub mod question;
pub mod registry;
pub mod serializers;

pub use answer::Answer;
pub use error::{CodecError, ConversionError, EvaluationError};
pub use evaluation::Evaluation;
pub use evaluator::{evaluate, EvaluateResult};
pub use extension::{ComparableValue, EquatableValue};
pub use facts::{AnswerWithDependencies, FactError, FactTable, Facts};
pub use predicate::{ComparisonOperator, Expression, Predicate};
pub use question::Question;
pub use registry::AnswerTypeRegistry;

#[cfg(test)]
mod tests;
