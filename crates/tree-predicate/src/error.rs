//! 谓词评估错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("字段不存在: {0}")]
    MissingField(String),

    #[error("字段 {field} 缺少属性: {key}")]
    MissingKey { field: String, key: String },

    #[error("无效的操作符: {0}")]
    InvalidOperator(String),

    #[error("字段 {field} 的同义词表格式错误: term={term}, 期望字符串数组")]
    MalformedTermForms { field: String, term: String },

    #[error("词项谓词的阈值必须是非负整数: term={term}, value={value}")]
    InvalidCount { term: String, value: String },

    #[error("类型不匹配: 字段 {field} 类型为 {optype}, 比较值 {value}")]
    TypeMismatch {
        field: String,
        optype: String,
        value: String,
    },

    #[error("词项匹配表达式构建失败: {0}")]
    InvalidPattern(String),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PredicateError>;
