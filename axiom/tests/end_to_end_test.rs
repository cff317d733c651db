use axiom::foreign::{
    convert_text, ForeignCompoundKind, ForeignConstant, ForeignExpression, ForeignNumber,
    ForeignNumberKind, ForeignNumberValue, ForeignOperator, ForeignPredicate, ALWAYS_FALSE_TOKEN,
    ALWAYS_TRUE_TOKEN,
};
use axiom::serializers::{decode_predicate, encode_predicate};
use axiom::{
    evaluate, Answer, AnswerTypeRegistry, AnswerWithDependencies, ComparableValue,
    ComparisonOperator, EvaluationError, FactTable, Facts, Predicate, Question,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

fn eligibility_predicate() -> Predicate {
    Predicate::and([
        Predicate::comparison(
            Question::new("age"),
            ComparisonOperator::IsGreaterThanOrEqualTo,
            Answer::Int(21),
        ),
        Predicate::comparison(
            Question::new("state"),
            ComparisonOperator::IsEqualTo,
            Answer::from("active"),
        ),
        Predicate::not(Predicate::comparison(
            Question::new("suspended"),
            ComparisonOperator::IsEqualTo,
            Answer::Bool(true),
        )),
    ])
}

#[test]
fn test_eligibility_predicate_against_a_fact_table() {
    let predicate = eligibility_predicate();

    let mut facts = FactTable::new();
    facts.insert("age", 30);
    facts.insert("state", "active");
    facts.insert("suspended", false);

    let evaluation = predicate.evaluate(&mut facts).unwrap();
    assert!(evaluation.value);
    let expected: HashSet<Question> = ["age", "state", "suspended"]
        .into_iter()
        .map(Question::new)
        .collect();
    assert_eq!(evaluation.dependencies, expected);

    facts.insert("state", "lapsed");
    let evaluation = predicate.evaluate(&mut facts).unwrap();
    assert!(!evaluation.value);
}

/// A store whose answers are derived by rules, with dependencies and
/// ambiguity reported per answer.
struct RuleBook {
    answers: HashMap<Question, AnswerWithDependencies<String>>,
}

#[derive(Debug, Clone, PartialEq)]
struct UnknownQuestion(Question);

impl RuleBook {
    fn new() -> Self {
        Self {
            answers: HashMap::new(),
        }
    }

    fn derived(
        mut self,
        question: &str,
        answer: impl Into<Answer>,
        dependencies: &[&str],
        ambiguous_rules: &[&[&str]],
    ) -> Self {
        self.answers.insert(
            Question::new(question),
            AnswerWithDependencies {
                answer: answer.into(),
                dependencies: dependencies.iter().map(|id| Question::new(*id)).collect(),
                ambiguous_rules: ambiguous_rules
                    .iter()
                    .map(|group| group.iter().map(|rule| rule.to_string()).collect())
                    .collect(),
            },
        );
        self
    }
}

impl Facts for RuleBook {
    type Rule = String;
    type Error = UnknownQuestion;

    fn ask(
        &mut self,
        question: &Question,
    ) -> Result<AnswerWithDependencies<String>, UnknownQuestion> {
        self.answers
            .get(question)
            .cloned()
            .ok_or_else(|| UnknownQuestion(question.clone()))
    }
}

#[test]
fn test_provenance_flows_through_derived_answers() {
    let predicate = Predicate::and([
        Predicate::comparison(
            Question::new("age"),
            ComparisonOperator::IsGreaterThanOrEqualTo,
            Answer::Int(21),
        ),
        Predicate::comparison(
            Question::new("is_resident"),
            ComparisonOperator::IsEqualTo,
            Answer::Bool(true),
        ),
    ]);

    let mut facts = RuleBook::new()
        .derived("age", 34, &["birthdate"], &[&["age_v1", "age_v2"]])
        .derived(
            "is_resident",
            true,
            &["address", "visa_status"],
            &[&["residency_rule"]],
        );

    let evaluation = evaluate(&predicate, &mut facts).unwrap();
    assert!(evaluation.value);

    let expected: HashSet<Question> = ["age", "birthdate", "is_resident", "address", "visa_status"]
        .into_iter()
        .map(Question::new)
        .collect();
    assert_eq!(evaluation.dependencies, expected);
    assert_eq!(
        evaluation.ambiguous_rules,
        vec![
            vec!["age_v1".to_string(), "age_v2".to_string()],
            vec!["residency_rule".to_string()],
        ]
    );
}

#[test]
fn test_unknown_questions_surface_through_the_store_error() {
    let predicate = Predicate::comparison(
        Question::new("nope"),
        ComparisonOperator::IsEqualTo,
        Answer::Bool(true),
    );
    let mut facts = RuleBook::new();
    match evaluate(&predicate, &mut facts).unwrap_err() {
        EvaluationError::QuestionEvaluationFailed(UnknownQuestion(question)) => {
            assert_eq!(question, Question::new("nope"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
struct Version {
    major: u32,
    minor: u32,
}

#[test]
fn test_wire_round_trip_then_evaluation_with_extension_types() {
    let mut registry = AnswerTypeRegistry::new();
    registry.register_comparable::<Version>("version");

    let minimum = ComparableValue::new("version", Version { major: 2, minor: 0 });
    assert_eq!(
        minimum
            .downcast_ref::<Version>()
            .map(|version| (version.major, version.minor)),
        Some((2, 0))
    );

    let predicate = Predicate::comparison(
        Question::new("app_version"),
        ComparisonOperator::IsGreaterThanOrEqualTo,
        Answer::Comparable(minimum),
    );

    let encoded = encode_predicate(&predicate).unwrap();
    let decoded = decode_predicate(&encoded, &registry).unwrap();
    assert_eq!(decoded, predicate);

    let mut facts = FactTable::new();
    facts.insert(
        "app_version",
        Answer::Comparable(ComparableValue::new(
            "version",
            Version { major: 2, minor: 3 },
        )),
    );
    let evaluation = decoded.evaluate(&mut facts).unwrap();
    assert!(evaluation.value);
}

/// A stand-in for the host platform's parser, covering the shapes these
/// tests feed it.
fn parse_stub(text: &str) -> Option<ForeignPredicate> {
    match text {
        ALWAYS_TRUE_TOKEN => Some(ForeignPredicate::Always(true)),
        ALWAYS_FALSE_TOKEN => Some(ForeignPredicate::Always(false)),
        "age >= 21 AND state == \"active\"" => Some(ForeignPredicate::Compound {
            kind: ForeignCompoundKind::And,
            subpredicates: vec![
                ForeignPredicate::Comparison {
                    lhs: ForeignExpression::KeyPath("age".to_string()),
                    operator: ForeignOperator::GreaterThanOrEqualTo,
                    rhs: ForeignExpression::Constant(ForeignConstant::Number(ForeignNumber {
                        kind: ForeignNumberKind::Int64,
                        value: ForeignNumberValue::Integer(21),
                    })),
                },
                ForeignPredicate::Comparison {
                    lhs: ForeignExpression::KeyPath("state".to_string()),
                    operator: ForeignOperator::EqualTo,
                    rhs: ForeignExpression::Constant(ForeignConstant::Text("active".to_string())),
                },
            ],
        }),
        _ => None,
    }
}

#[test]
fn test_foreign_text_converts_and_evaluates() {
    let predicate = convert_text("age >= 21 AND state == \"active\"", parse_stub).unwrap();

    let mut facts = FactTable::new();
    facts.insert("age", 25);
    facts.insert("state", "active");
    assert!(predicate.evaluate(&mut facts).unwrap().value);

    facts.insert("age", 18);
    assert!(!predicate.evaluate(&mut facts).unwrap().value);
}

#[test]
fn test_bare_boolean_text_evaluates() {
    let predicate = convert_text("  True ", parse_stub).unwrap();
    assert_eq!(predicate, Predicate::True);

    let mut facts = FactTable::new();
    assert!(predicate.evaluate(&mut facts).unwrap().value);
}
