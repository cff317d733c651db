//! The tagged JSON wire representation.
//!
//! Field names are part of the wire contract: `type`, `operand`,
//! `operands`, `lhs`, `op`, `rhs` for predicates; `question`, `answer`,
//! `predicate` for expressions; `bool`, `double`, `int`, `string`,
//! `comparableType`, `comparable`, `equatableType`, `equatable` for
//! answers. A question at the root of a document encodes as a bare
//! string, not an object; the keyed form is reserved for expression
//! operands.

use crate::answer::Answer;
use crate::error::CodecError;
use crate::predicate::{ComparisonOperator, Expression, Predicate};
use crate::question::Question;
use crate::registry::AnswerTypeRegistry;
use serde_json::{json, Map, Value};

/// Encode a predicate to its wire value.
pub fn encode_predicate(predicate: &Predicate) -> Result<Value, CodecError> {
    Ok(match predicate {
        Predicate::False => json!({ "type": "false" }),
        Predicate::True => json!({ "type": "true" }),
        Predicate::Not(inner) => json!({
            "type": "not",
            "operand": encode_predicate(inner)?,
        }),
        Predicate::And(predicates) => json!({
            "type": "and",
            "operands": encode_predicates(predicates)?,
        }),
        Predicate::Or(predicates) => json!({
            "type": "or",
            "operands": encode_predicates(predicates)?,
        }),
        Predicate::Comparison { lhs, op, rhs } => json!({
            "type": "comparison",
            "lhs": encode_expression(lhs)?,
            "op": operator_tag(*op),
            "rhs": encode_expression(rhs)?,
        }),
    })
}

/// Decode a predicate from its wire value.
pub fn decode_predicate(
    value: &Value,
    registry: &AnswerTypeRegistry,
) -> Result<Predicate, CodecError> {
    let object = expect_object(value, "predicate")?;
    let tag = require(object, "predicate", "type")?
        .as_str()
        .ok_or(CodecError::InvalidNode {
            node: "predicate",
            expected: "a string 'type' discriminator",
        })?;
    match tag {
        "false" => Ok(Predicate::False),
        "true" => Ok(Predicate::True),
        "not" => {
            let operand = require(object, "predicate", "operand")?;
            Ok(Predicate::not(decode_predicate(operand, registry)?))
        }
        "and" => Ok(Predicate::And(decode_operands(object, registry)?)),
        "or" => Ok(Predicate::Or(decode_operands(object, registry)?)),
        "comparison" => {
            let lhs = decode_expression(require(object, "predicate", "lhs")?, registry)?;
            let op = require(object, "predicate", "op")?
                .as_str()
                .ok_or(CodecError::InvalidNode {
                    node: "predicate",
                    expected: "a string operator",
                })
                .and_then(operator_from_tag)?;
            let rhs = decode_expression(require(object, "predicate", "rhs")?, registry)?;
            Ok(Predicate::Comparison { lhs, op, rhs })
        }
        other => Err(CodecError::UnknownPredicateTag(other.to_string())),
    }
}

/// Encode an expression to its wire value.
pub fn encode_expression(expression: &Expression) -> Result<Value, CodecError> {
    Ok(match expression {
        Expression::Question(question) => json!({ "question": question.as_str() }),
        Expression::Answer(answer) => json!({ "answer": encode_answer(answer)? }),
        Expression::Predicate(predicate) => json!({ "predicate": encode_predicate(predicate)? }),
    })
}

/// Decode an expression from its wire value.
///
/// When more than one operand key is present, `question` wins over
/// `answer` over `predicate`; an expression with none of them is
/// corrupt.
pub fn decode_expression(
    value: &Value,
    registry: &AnswerTypeRegistry,
) -> Result<Expression, CodecError> {
    let object = expect_object(value, "expression")?;
    if let Some(question) = object.get("question") {
        let id = question.as_str().ok_or(CodecError::InvalidNode {
            node: "expression",
            expected: "a string question identifier",
        })?;
        return Ok(Expression::Question(Question::new(id)));
    }
    if let Some(answer) = object.get("answer") {
        return Ok(Expression::Answer(decode_answer(answer, registry)?));
    }
    if let Some(predicate) = object.get("predicate") {
        return Ok(Expression::Predicate(Box::new(decode_predicate(
            predicate, registry,
        )?)));
    }
    Err(CodecError::EmptyExpression)
}

/// Encode an answer to its wire value.
pub fn encode_answer(answer: &Answer) -> Result<Value, CodecError> {
    Ok(match answer {
        Answer::Bool(value) => json!({ "bool": value }),
        Answer::Int(value) => json!({ "int": value }),
        Answer::Double(value) => {
            let number = serde_json::Number::from_f64(*value)
                .ok_or(CodecError::NonFiniteDouble(*value))?;
            json!({ "double": number })
        }
        Answer::String(value) => json!({ "string": value }),
        Answer::Comparable(value) => json!({
            "comparableType": value.type_name(),
            "comparable": encode_extension(value.type_name(), value.encode_payload())?,
        }),
        Answer::Equatable(value) => json!({
            "equatableType": value.type_name(),
            "equatable": encode_extension(value.type_name(), value.encode_payload())?,
        }),
    })
}

/// Decode an answer from its wire value.
pub fn decode_answer(value: &Value, registry: &AnswerTypeRegistry) -> Result<Answer, CodecError> {
    let object = expect_object(value, "answer")?;
    if let Some(field) = object.get("bool") {
        return field
            .as_bool()
            .map(Answer::Bool)
            .ok_or(CodecError::InvalidNode {
                node: "answer",
                expected: "a boolean",
            });
    }
    if let Some(field) = object.get("double") {
        return field
            .as_f64()
            .map(Answer::Double)
            .ok_or(CodecError::InvalidNode {
                node: "answer",
                expected: "a number",
            });
    }
    if let Some(field) = object.get("int") {
        return field
            .as_i64()
            .map(Answer::Int)
            .ok_or(CodecError::InvalidNode {
                node: "answer",
                expected: "a signed 64-bit integer",
            });
    }
    if let Some(field) = object.get("string") {
        return field
            .as_str()
            .map(|value| Answer::String(value.to_string()))
            .ok_or(CodecError::InvalidNode {
                node: "answer",
                expected: "a string",
            });
    }
    if let Some(name) = object.get("comparableType") {
        let name = name.as_str().ok_or(CodecError::InvalidNode {
            node: "answer",
            expected: "a string type name",
        })?;
        let payload = require(object, "answer", "comparable")?;
        return Ok(Answer::Comparable(
            registry.decode_comparable(name, payload)?,
        ));
    }
    if let Some(name) = object.get("equatableType") {
        let name = name.as_str().ok_or(CodecError::InvalidNode {
            node: "answer",
            expected: "a string type name",
        })?;
        let payload = require(object, "answer", "equatable")?;
        return Ok(Answer::Equatable(registry.decode_equatable(name, payload)?));
    }
    Err(CodecError::EmptyAnswer)
}

/// A question at a document root encodes as its bare identifier, not as
/// the keyed object used inside expressions.
pub fn encode_question(question: &Question) -> Value {
    Value::String(question.as_str().to_string())
}

/// Decode a root-level question from its bare-string form.
pub fn decode_question(value: &Value) -> Result<Question, CodecError> {
    value
        .as_str()
        .map(Question::new)
        .ok_or(CodecError::InvalidNode {
            node: "question",
            expected: "a string",
        })
}

/// Encode a predicate to a JSON string.
pub fn predicate_to_json(predicate: &Predicate) -> Result<String, CodecError> {
    let value = encode_predicate(predicate)?;
    serde_json::to_string(&value).map_err(CodecError::Json)
}

/// Decode a predicate from a JSON string.
pub fn predicate_from_json(
    json: &str,
    registry: &AnswerTypeRegistry,
) -> Result<Predicate, CodecError> {
    let value: Value = serde_json::from_str(json)?;
    decode_predicate(&value, registry)
}

fn encode_predicates(predicates: &[Predicate]) -> Result<Vec<Value>, CodecError> {
    predicates.iter().map(encode_predicate).collect()
}

fn decode_operands(
    object: &Map<String, Value>,
    registry: &AnswerTypeRegistry,
) -> Result<Vec<Predicate>, CodecError> {
    let operands = require(object, "predicate", "operands")?
        .as_array()
        .ok_or(CodecError::InvalidNode {
            node: "predicate",
            expected: "an 'operands' array",
        })?;
    operands
        .iter()
        .map(|operand| decode_predicate(operand, registry))
        .collect()
}

fn encode_extension(
    type_name: &str,
    payload: Result<Value, serde_json::Error>,
) -> Result<Value, CodecError> {
    payload.map_err(|source| CodecError::ExtensionPayload {
        type_name: type_name.to_string(),
        source,
    })
}

fn operator_tag(op: ComparisonOperator) -> &'static str {
    match op {
        ComparisonOperator::IsEqualTo => "isEqualTo",
        ComparisonOperator::IsNotEqualTo => "isNotEqualTo",
        ComparisonOperator::IsLessThan => "isLessThan",
        ComparisonOperator::IsGreaterThan => "isGreaterThan",
        ComparisonOperator::IsLessThanOrEqualTo => "isLessThanOrEqualTo",
        ComparisonOperator::IsGreaterThanOrEqualTo => "isGreaterThanOrEqualTo",
    }
}

fn operator_from_tag(tag: &str) -> Result<ComparisonOperator, CodecError> {
    match tag {
        "isEqualTo" => Ok(ComparisonOperator::IsEqualTo),
        "isNotEqualTo" => Ok(ComparisonOperator::IsNotEqualTo),
        "isLessThan" => Ok(ComparisonOperator::IsLessThan),
        "isGreaterThan" => Ok(ComparisonOperator::IsGreaterThan),
        "isLessThanOrEqualTo" => Ok(ComparisonOperator::IsLessThanOrEqualTo),
        "isGreaterThanOrEqualTo" => Ok(ComparisonOperator::IsGreaterThanOrEqualTo),
        other => Err(CodecError::UnknownOperator(other.to_string())),
    }
}

fn expect_object<'a>(value: &'a Value, node: &'static str) -> Result<&'a Map<String, Value>, CodecError> {
    value.as_object().ok_or(CodecError::InvalidNode {
        node,
        expected: "an object",
    })
}

fn require<'a>(
    object: &'a Map<String, Value>,
    node: &'static str,
    field: &'static str,
) -> Result<&'a Value, CodecError> {
    object.get(field).ok_or(CodecError::MissingField { node, field })
}
