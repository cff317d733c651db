//! Shared fixtures for the unit tests.

use crate::{Answer, AnswerWithDependencies, FactError, Facts, Question};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A fact store that answers from a table and records every question it
/// was asked, with per-answer provenance.
pub struct TracedFacts {
    answers: HashMap<Question, AnswerWithDependencies<&'static str>>,
    pub asked: Vec<Question>,
}

impl TracedFacts {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            asked: Vec::new(),
        }
    }

    pub fn answer(mut self, question: &str, answer: impl Into<Answer>) -> Self {
        self.answers.insert(
            Question::new(question),
            AnswerWithDependencies::bare(answer.into()),
        );
        self
    }

    pub fn answer_with(
        mut self,
        question: &str,
        answer: impl Into<Answer>,
        dependencies: &[&str],
        ambiguous_rules: Vec<Vec<&'static str>>,
    ) -> Self {
        let dependencies: HashSet<Question> =
            dependencies.iter().map(|id| Question::new(*id)).collect();
        self.answers.insert(
            Question::new(question),
            AnswerWithDependencies {
                answer: answer.into(),
                dependencies,
                ambiguous_rules,
            },
        );
        self
    }
}

impl Facts for TracedFacts {
    type Rule = &'static str;
    type Error = FactError;

    fn ask(
        &mut self,
        question: &Question,
    ) -> Result<AnswerWithDependencies<&'static str>, FactError> {
        self.asked.push(question.clone());
        self.answers
            .get(question)
            .cloned()
            .ok_or_else(|| FactError::Unanswered(question.clone()))
    }
}

/// A fact store that fails every lookup; proves short-circuited operands
/// are never asked.
pub struct ExplodingFacts;

impl Facts for ExplodingFacts {
    type Rule = ();
    type Error = FactError;

    fn ask(&mut self, question: &Question) -> Result<AnswerWithDependencies<()>, FactError> {
        Err(FactError::Unanswered(question.clone()))
    }
}

/// A sample comparable extension type.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

/// A sample equality-only extension type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku(pub String);
