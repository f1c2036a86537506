//! 字段元数据与输入记录模型
//!
//! 字段元数据由模型加载方提供，评估期间只读。结构与树模型 JSON 中的
//! `fields` 条目一致：
//!
//! ```json
//! {
//!   "name": "description",
//!   "optype": "text",
//!   "term_analysis": {"token_mode": "all", "case_sensitive": false},
//!   "summary": {"term_forms": {"free": ["gratis", "freebie"]}}
//! }
//! ```

use crate::error::{PredicateError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 分词模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMode {
    /// 只按词元匹配
    #[default]
    TokensOnly,
    /// 只按整串匹配
    FullTermsOnly,
    /// 多词短语按整串匹配，其余按词元匹配
    All,
}

/// 文本分析选项
///
/// 缺省值：`token_mode = tokens_only`，`case_sensitive = false`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermAnalysis {
    #[serde(default)]
    pub token_mode: TokenMode,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl TermAnalysis {
    pub fn new(token_mode: TokenMode, case_sensitive: bool) -> Self {
        Self {
            token_mode,
            case_sensitive,
        }
    }
}

/// 字段摘要（只保留评估需要的同义词表）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSummary {
    /// 规范词 -> 同义词列表。保留原始 JSON，格式错误在使用时报告
    #[serde(default)]
    pub term_forms: HashMap<String, Value>,
}

/// 字段元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optype: Option<String>,
    #[serde(default)]
    pub term_analysis: TermAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<FieldSummary>,
    /// 其他展示属性（如 `label`、`description`）
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optype: None,
            term_analysis: TermAnalysis::default(),
            summary: None,
            attributes: Map::new(),
        }
    }

    pub fn with_term_analysis(mut self, term_analysis: TermAnalysis) -> Self {
        self.term_analysis = term_analysis;
        self
    }

    /// 添加同义词
    pub fn with_term_forms<I, S>(mut self, term: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let forms: Vec<Value> = forms.into_iter().map(|s| Value::String(s.into())).collect();
        self.summary
            .get_or_insert_with(FieldSummary::default)
            .term_forms
            .insert(term.into(), Value::Array(forms));
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// 按标签读取展示属性，`name` 直接取字段名
    pub fn display_attribute(&self, label: &str) -> Option<&str> {
        if label == "name" {
            return Some(&self.name);
        }
        self.attributes.get(label).and_then(Value::as_str)
    }

    /// 获取某个规范词的同义词列表（不存在时为空）
    pub fn term_forms(&self, field_id: &str, term: &str) -> Result<Vec<String>> {
        let Some(forms) = self.summary.as_ref().and_then(|s| s.term_forms.get(term)) else {
            return Ok(Vec::new());
        };

        let malformed = || PredicateError::MalformedTermForms {
            field: field_id.to_string(),
            term: term.to_string(),
        };

        forms
            .as_array()
            .ok_or_else(malformed)?
            .iter()
            .map(|form| form.as_str().map(str::to_string).ok_or_else(malformed))
            .collect()
    }
}

/// 字段 ID -> 字段元数据
pub type Fields = HashMap<String, Field>;

/// 字段元数据查询接口
pub trait FieldLookup {
    fn field(&self, field_id: &str) -> Option<&Field>;

    fn require_field(&self, field_id: &str) -> Result<&Field> {
        self.field(field_id)
            .ok_or_else(|| PredicateError::MissingField(field_id.to_string()))
    }
}

impl FieldLookup for HashMap<String, Field> {
    fn field(&self, field_id: &str) -> Option<&Field> {
        self.get(field_id)
    }
}

/// 输入记录查询接口
pub trait InputLookup {
    fn input_value(&self, field_id: &str) -> Option<&Value>;

    /// 取字段值，缺失或为 null 时报错
    fn require_value(&self, field_id: &str) -> Result<&Value> {
        match self.input_value(field_id) {
            Some(Value::Null) | None => Err(PredicateError::MissingField(field_id.to_string())),
            Some(value) => Ok(value),
        }
    }
}

impl InputLookup for HashMap<String, Value> {
    fn input_value(&self, field_id: &str) -> Option<&Value> {
        self.get(field_id)
    }
}

impl InputLookup for Map<String, Value> {
    fn input_value(&self, field_id: &str) -> Option<&Value> {
        self.get(field_id)
    }
}

/// 输入记录 - 以字段 ID 为键的 JSON 对象
#[derive(Debug, Clone, Default)]
pub struct InputData {
    data: Map<String, Value>,
}

impl InputData {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// 从 JSON 对象创建，非对象输入视为空记录
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            _ => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self { data })
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl InputLookup for InputData {
    fn input_value(&self, field_id: &str) -> Option<&Value> {
        self.data.get(field_id)
    }
}
