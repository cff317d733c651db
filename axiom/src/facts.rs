//! The fact store boundary.
//!
//! The engine consults facts through the [`Facts`] trait, passed by
//! exclusive mutable reference through the entire recursive call chain of
//! one evaluation and never stored beyond it. Ask calls may record side
//! effects (caching) inside the store; the engine trusts the returned
//! dependency set to be accurate and forwards ambiguous-rule groups
//! without inspecting them.

use crate::answer::Answer;
use crate::question::Question;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// An answer together with the provenance that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerWithDependencies<R> {
    pub answer: Answer,
    /// Questions whose answers influenced this answer.
    pub dependencies: HashSet<Question>,
    /// Groups of candidate rules that tied while deriving this answer.
    pub ambiguous_rules: Vec<Vec<R>>,
}

impl<R> AnswerWithDependencies<R> {
    /// An answer with no recorded provenance.
    pub fn bare(answer: Answer) -> Self {
        Self {
            answer,
            dependencies: HashSet::new(),
            ambiguous_rules: Vec::new(),
        }
    }
}

/// A lookup of typed facts.
pub trait Facts {
    /// The host's opaque rule type. The engine only accumulates groups of
    /// these, never inspects or compares them.
    type Rule;

    /// The host's fact-lookup failure type, surfaced unchanged through
    /// [`EvaluationError::QuestionEvaluationFailed`](crate::EvaluationError::QuestionEvaluationFailed).
    type Error;

    fn ask(
        &mut self,
        question: &Question,
    ) -> Result<AnswerWithDependencies<Self::Rule>, Self::Error>;
}

/// Error from [`FactTable`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactError {
    #[error("no answer for question '{0}'")]
    Unanswered(Question),
}

/// A minimal in-memory fact store.
///
/// Every answer is a plain table entry with no dependencies of its own
/// and no ambiguity. Hosts with derived or cached facts implement
/// [`Facts`] directly.
#[derive(Debug, Clone, Default)]
pub struct FactTable {
    answers: HashMap<Question, Answer>,
}

impl FactTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the answer for a question.
    pub fn insert(&mut self, question: impl Into<Question>, answer: impl Into<Answer>) -> &mut Self {
        self.answers.insert(question.into(), answer.into());
        self
    }

    pub fn get(&self, question: &Question) -> Option<&Answer> {
        self.answers.get(question)
    }
}

impl Facts for FactTable {
    type Rule = ();
    type Error = FactError;

    fn ask(&mut self, question: &Question) -> Result<AnswerWithDependencies<()>, FactError> {
        self.answers
            .get(question)
            .cloned()
            .map(AnswerWithDependencies::bare)
            .ok_or_else(|| FactError::Unanswered(question.clone()))
    }
}
