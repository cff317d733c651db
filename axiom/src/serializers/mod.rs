//! Wire codecs for predicates, expressions, answers, and questions.

mod json;

pub use json::{
    decode_answer, decode_expression, decode_predicate, decode_question, encode_answer,
    encode_expression, encode_predicate, encode_question, predicate_from_json, predicate_to_json,
};
