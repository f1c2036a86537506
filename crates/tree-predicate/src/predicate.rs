//! 树节点谓词
//!
//! 谓词在节点反序列化时构建，之后只读，可被任意数量的评估调用并发使用。
//! 带词项的谓词为文本谓词，`value` 表示匹配次数阈值；否则直接比较字段值。

use crate::compare::{comparable_string, compare_values, version_compare};
use crate::error::{PredicateError, Result};
use crate::models::{Field, FieldLookup, InputLookup, TokenMode};
use crate::operators::Operator;
use crate::term::{is_full_term_pattern, term_matches};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, instrument};

/// 支持词项匹配的字段类型
const TERM_OPTYPES: [&str; 2] = ["text", "items"];

/// 模型 JSON 中的谓词结构
#[derive(Debug, Deserialize)]
struct RawPredicate {
    operator: String,
    field: String,
    value: Value,
    #[serde(default)]
    term: Option<String>,
}

impl TryFrom<RawPredicate> for Predicate {
    type Error = PredicateError;

    fn try_from(raw: RawPredicate) -> Result<Self> {
        Predicate::parse(&raw.operator, raw.field, raw.value, raw.term)
    }
}

/// 单个节点谓词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPredicate")]
pub struct Predicate {
    operator: Operator,
    field: String,
    value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    term: Option<String>,
    #[serde(skip)]
    count: Option<u64>,
}

impl Predicate {
    /// 标量谓词
    pub fn new(operator: Operator, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            operator,
            field: field.into(),
            value: value.into(),
            term: None,
            count: None,
        }
    }

    /// 文本谓词，`count` 为匹配次数阈值
    pub fn with_term(
        operator: Operator,
        field: impl Into<String>,
        count: u64,
        term: impl Into<String>,
    ) -> Self {
        Self {
            operator,
            field: field.into(),
            value: Value::from(count),
            term: Some(term.into()),
            count: Some(count),
        }
    }

    /// 从模型中的原始字段构建，校验操作符与次数阈值
    pub fn parse(
        operator: &str,
        field: impl Into<String>,
        value: Value,
        term: Option<String>,
    ) -> Result<Self> {
        let operator: Operator = operator.parse()?;
        let field = field.into();

        match term {
            Some(term) => {
                let count = parse_count(&value).ok_or_else(|| PredicateError::InvalidCount {
                    term: term.clone(),
                    value: value.to_string(),
                })?;
                Ok(Self {
                    operator,
                    field,
                    value,
                    term: Some(term),
                    count: Some(count),
                })
            }
            None => Ok(Self::new(operator, field, value)),
        }
    }

    /// 从 JSON 字符串构建
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// 文本谓词的次数阈值
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// 按字段声明的类型校验比较值
    ///
    /// 词项谓词要求文本类字段；标量谓词要求数值字段的值可解析为数字，
    /// 其他类型只接受标量值。未声明类型的字段不做校验。
    pub fn validate<F>(&self, fields: &F) -> Result<()>
    where
        F: FieldLookup + ?Sized,
    {
        let field = fields.require_field(&self.field)?;
        let Some(optype) = field.optype.as_deref() else {
            return Ok(());
        };

        let compatible = match (&self.term, optype) {
            (Some(_), optype) => TERM_OPTYPES.contains(&optype),
            (None, "numeric") => match &self.value {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            (None, _) => matches!(
                self.value,
                Value::String(_) | Value::Number(_) | Value::Bool(_)
            ),
        };

        if compatible {
            Ok(())
        } else {
            Err(PredicateError::TypeMismatch {
                field: self.field.clone(),
                optype: optype.to_string(),
                value: self.value.to_string(),
            })
        }
    }

    /// 是否按整串处理词项
    pub fn is_full_term<F>(&self, fields: &F) -> Result<bool>
    where
        F: FieldLookup + ?Sized,
    {
        let Some(term) = &self.term else {
            return Ok(false);
        };

        let field = fields.require_field(&self.field)?;
        Ok(match field.term_analysis.token_mode {
            TokenMode::FullTermsOnly => true,
            TokenMode::All => is_full_term_pattern(term),
            TokenMode::TokensOnly => false,
        })
    }

    /// 候选词项：规范词在前，同义词按原顺序追加
    pub fn candidate_terms(&self, field: &Field) -> Result<Vec<String>> {
        let Some(term) = &self.term else {
            return Ok(Vec::new());
        };

        let mut terms = vec![term.clone()];
        terms.extend(field.term_forms(&self.field, term)?);
        Ok(terms)
    }

    /// 对输入记录评估谓词
    #[instrument(level = "debug", skip(self, input, fields), fields(field = %self.field, operator = %self.operator))]
    pub fn apply<I, F>(&self, input: &I, fields: &F) -> Result<bool>
    where
        I: InputLookup + ?Sized,
        F: FieldLookup + ?Sized,
    {
        let field = fields.require_field(&self.field)?;
        let input_value = input.require_value(&self.field)?;

        let ordering = match &self.term {
            Some(_) => {
                let terms = self.candidate_terms(field)?;
                let text = comparable_string(input_value);
                let count = term_matches(&text, &terms, &field.term_analysis)?;
                let threshold = self.count.unwrap_or_default();
                debug!(count, threshold, candidates = terms.len(), "词项匹配次数");
                version_compare(&count.to_string(), &threshold.to_string())
            }
            None => compare_values(input_value, &self.value),
        };

        let matched = self.operator.accepts(ordering);
        debug!(matched, "谓词评估完成");
        Ok(matched)
    }
}

fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 展示用的值文本，字符串不带引号
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.term {
            Some(term) => write!(
                f,
                "{}[{}] {} {}",
                self.field,
                term,
                self.operator,
                display_value(&self.value)
            ),
            None => write!(
                f,
                "{} {} {}",
                self.field,
                self.operator,
                display_value(&self.value)
            ),
        }
    }
}
