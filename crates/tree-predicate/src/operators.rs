//! 谓词操作符定义

use crate::error::PredicateError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// 操作符符号表（进程内只构建一次）
static OPERATORS: LazyLock<HashMap<&'static str, Operator>> = LazyLock::new(|| {
    HashMap::from([
        ("<", Operator::Lt),
        ("<=", Operator::Lte),
        ("=", Operator::Eq),
        ("!=", Operator::Neq),
        (">=", Operator::Gte),
        (">", Operator::Gt),
    ])
});

/// 次数短语表：(前缀, 后缀)，中间填入 "N time(s)"
static RELATIONS: LazyLock<HashMap<Operator, (&'static str, &'static str)>> =
    LazyLock::new(|| {
        HashMap::from([
            (Operator::Lte, ("no more than ", "")),
            (Operator::Gte, ("", " at most")),
            (Operator::Gt, ("more than ", "")),
            (Operator::Lt, ("less than ", "")),
            (Operator::Eq, ("exactly ", "")),
            (Operator::Neq, ("other than ", "")),
        ])
    });

/// 比较操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Lt,
    Lte,
    Eq,
    Neq,
    Gte,
    Gt,
}

impl Operator {
    /// 模型中使用的符号
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Gte => ">=",
            Self::Gt => ">",
        }
    }

    /// 判断比较结果是否满足该操作符
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
            Self::Eq => ordering == Ordering::Equal,
            Self::Neq => ordering != Ordering::Equal,
            Self::Gte => ordering != Ordering::Less,
            Self::Gt => ordering == Ordering::Greater,
        }
    }

    /// 生成次数短语，如 "more than 3 times"
    pub fn relation_phrase(&self, count: u64) -> String {
        let (prefix, suffix) = RELATIONS[self];
        format!("{}{} {}{}", prefix, count, plural("time", count), suffix)
    }
}

/// 按数量返回单数或复数形式
pub fn plural(word: &str, count: u64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

impl FromStr for Operator {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OPERATORS
            .get(s)
            .copied()
            .ok_or_else(|| PredicateError::InvalidOperator(s.to_string()))
    }
}

impl TryFrom<String> for Operator {
    type Error = PredicateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
