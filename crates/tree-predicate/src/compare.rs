//! 分段比较器
//!
//! 谓词的所有比较（包括词项匹配次数）都按版本号风格逐段比较：
//! 先把两侧值规范化为以 `.` 分隔的段，再从左到右比较。
//! 纯数字段按数值比较，其余段按特殊词等级比较：
//! `dev < alpha = a < beta = b < RC = rc < #（数字） < pl = p`，
//! 未知单词低于 `dev`。
//!
//! 对普通整数而言结果与数值比较一致；对小数和负数则按段比较，
//! 例如 `1.5 < 1.25`、`-5 > -3`。

use serde_json::Value;
use std::cmp::Ordering;

/// 与任意数字段等级相同的占位段
const NUMBER_SEGMENT: &str = "#N";

/// 特殊词等级表，按前缀匹配，顺序敏感
const SPECIAL_FORMS: [(&str, i32); 10] = [
    ("dev", 0),
    ("alpha", 1),
    ("a", 1),
    ("beta", 2),
    ("b", 2),
    ("RC", 3),
    ("rc", 3),
    ("#", 4),
    ("pl", 5),
    ("p", 5),
];

const UNKNOWN_FORM: i32 = -6;

/// 超过该量级的浮点数不再按整数输出
const MAX_INTEGRAL_FLOAT: f64 = 1e15;

/// 把 JSON 值转为参与比较的字符串
///
/// 整数值的浮点数去掉小数部分，`30.0` 与 `30` 比较结果相同。
pub fn comparable_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_INTEGRAL_FLOAT => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 比较两个 JSON 值
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    version_compare(&comparable_string(left), &comparable_string(right))
}

/// 按版本号风格比较两个字符串
pub fn version_compare(left: &str, right: &str) -> Ordering {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let left = canonicalize(left);
    let right = canonicalize(right);
    compare_segments(&segments(&left), &segments(&right))
}

/// 规范化：分隔符统一为 `.`，数字与非数字交界处插入 `.`
fn canonicalize(version: &str) -> String {
    let mut chars = version.chars();
    let mut out = String::with_capacity(version.len() * 2);

    let Some(first) = chars.next() else {
        return out;
    };
    out.push(first);
    let mut last_in = first;

    for c in chars {
        let last_out_is_dot = out.ends_with('.');

        if matches!(c, '-' | '_' | '+') {
            if !last_out_is_dot {
                out.push('.');
            }
        } else if is_digit_transition(last_in, c) {
            if !last_out_is_dot {
                out.push('.');
            }
            out.push(c);
        } else if !c.is_ascii_alphanumeric() {
            if !last_out_is_dot {
                out.push('.');
            }
        } else {
            out.push(c);
        }

        last_in = c;
    }

    out
}

fn is_digit_transition(prev: char, next: char) -> bool {
    let digit = |c: char| c.is_ascii_digit();
    let non_digit = |c: char| !c.is_ascii_digit() && c != '.';
    (non_digit(prev) && digit(next)) || (digit(prev) && non_digit(next))
}

fn segments(canonical: &str) -> Vec<&str> {
    canonical.split('.').filter(|s| !s.is_empty()).collect()
}

fn starts_with_digit(segment: &str) -> bool {
    segment.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn compare_segments(left: &[&str], right: &[&str]) -> Ordering {
    for (l, r) in left.iter().zip(right) {
        let ordering = compare_segment(l, r);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    match left.len().cmp(&right.len()) {
        Ordering::Equal => Ordering::Equal,
        // 多出的数字段使较长一侧更大，多出的单词段与数字占位比较
        Ordering::Greater => {
            let rest = &left[right.len()..];
            if starts_with_digit(rest[0]) {
                Ordering::Greater
            } else {
                compare_segments(rest, &[NUMBER_SEGMENT])
            }
        }
        Ordering::Less => {
            let rest = &right[left.len()..];
            if starts_with_digit(rest[0]) {
                Ordering::Less
            } else {
                compare_segments(&[NUMBER_SEGMENT], rest)
            }
        }
    }
}

fn compare_segment(left: &str, right: &str) -> Ordering {
    match (starts_with_digit(left), starts_with_digit(right)) {
        (true, true) => compare_numeric(left, right),
        (false, false) => special_rank(left).cmp(&special_rank(right)),
        (true, false) => special_rank(NUMBER_SEGMENT).cmp(&special_rank(right)),
        (false, true) => special_rank(left).cmp(&special_rank(NUMBER_SEGMENT)),
    }
}

/// 任意长度的十进制数字串比较
fn compare_numeric(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn special_rank(segment: &str) -> i32 {
    SPECIAL_FORMS
        .iter()
        .find(|(form, _)| segment.starts_with(*form))
        .map(|(_, rank)| *rank)
        .unwrap_or(UNKNOWN_FORM)
}
