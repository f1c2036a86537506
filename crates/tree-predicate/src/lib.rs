//! 决策树谓词引擎
//!
//! 对已训练决策树的单个节点条件进行评估与渲染，支持：
//! - 标量字段的分段（版本号风格）比较
//! - 文本字段的词项匹配（分词模式、大小写、同义词）
//! - 与评估逻辑一致的自然语言规则描述

pub mod compare;
pub mod error;
pub mod models;
pub mod operators;
pub mod predicate;
pub mod rule;
pub mod term;

pub use compare::{compare_values, version_compare};
pub use error::{PredicateError, Result};
pub use models::{
    Field, FieldLookup, FieldSummary, Fields, InputData, InputLookup, TermAnalysis, TokenMode,
};
pub use operators::{Operator, plural};
pub use predicate::Predicate;
pub use rule::DEFAULT_LABEL;
pub use term::{full_term_match, is_full_term_pattern, term_matches, term_matches_tokens};
