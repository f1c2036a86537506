//! 词项匹配器
//!
//! 统计文本中词项（含同义词）的出现次数。匹配方式由字段的文本分析选项决定：
//! - `tokens_only`：按词元匹配，边界为单词边界或下划线
//! - `full_terms_only`：只用规范词做整串比较
//! - `all`：单个多词短语按整串比较，其余按词元匹配

use crate::error::{PredicateError, Result};
use crate::models::{TermAnalysis, TokenMode};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::trace;

/// 整串词项判定：内部至少有一个单词边界
static FULL_TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\b.+$").expect("full term pattern is valid"));

/// 词元边界：单词边界或下划线
const TOKEN_BOUNDARY: &str = r"(?:\b|_)";

/// 判断词项是否按整串处理
pub fn is_full_term_pattern(term: &str) -> bool {
    FULL_TERM_PATTERN.is_match(term)
}

/// 统计文本中词项的匹配次数
///
/// `terms[0]` 为规范词，其后为同义词。整串模式下结果只会是 0 或 1。
pub fn term_matches(text: &str, terms: &[String], options: &TermAnalysis) -> Result<usize> {
    let Some(first_term) = terms.first() else {
        return Ok(0);
    };

    match options.token_mode {
        TokenMode::FullTermsOnly => {
            trace!(term = %first_term, "full_terms_only 模式，整串比较");
            Ok(full_term_match(text, first_term, options.case_sensitive))
        }
        // all 模式下整串词项用相等比较，词元用包含比较
        TokenMode::All if terms.len() == 1 && is_full_term_pattern(first_term) => {
            trace!(term = %first_term, "all 模式下的整串词项");
            Ok(full_term_match(text, first_term, options.case_sensitive))
        }
        _ => term_matches_tokens(text, terms, options.case_sensitive),
    }
}

/// 整串比较，相等返回 1，否则返回 0
pub fn full_term_match(text: &str, term: &str, case_sensitive: bool) -> usize {
    let matched = if case_sensitive {
        text == term
    } else {
        text.to_lowercase() == term.to_lowercase()
    };

    usize::from(matched)
}

/// 统计所有词项以词元形式出现的次数（不重叠）
///
/// 两侧边界为单词边界或下划线，`"foo_bar"` 中的 `foo` 与 `bar` 各计一次。
pub fn term_matches_tokens(text: &str, terms: &[String], case_sensitive: bool) -> Result<usize> {
    let alternatives: Vec<String> = terms
        .iter()
        .filter(|term| !term.is_empty())
        .map(|term| regex::escape(term))
        .collect();

    if alternatives.is_empty() {
        return Ok(0);
    }

    // 词项单独捕获，下次从词项末尾继续扫描，分隔用的下划线可被下一个词元复用
    let pattern = format!(
        "{boundary}({terms}){boundary}",
        boundary = TOKEN_BOUNDARY,
        terms = alternatives.join("|")
    );

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| PredicateError::InvalidPattern(e.to_string()))?;

    let mut count = 0;
    let mut pos = 0;
    while let Some(token) = regex.captures_at(text, pos).and_then(|caps| caps.get(1)) {
        count += 1;
        pos = token.end();
    }

    trace!(count, terms = terms.len(), case_sensitive, "词元匹配完成");
    Ok(count)
}
