//! 规则文本渲染
//!
//! 把谓词描述为自然语言，整串/词元分类与评估共用同一逻辑。
//! 输出仅供展示，不参与决策。

use crate::error::{PredicateError, Result};
use crate::models::FieldLookup;
use crate::operators::Operator;
use crate::predicate::{Predicate, display_value};

/// 默认使用的字段展示属性
pub const DEFAULT_LABEL: &str = "name";

impl Predicate {
    /// 生成规则描述，`label` 缺省为 `name`
    pub fn to_rule<F>(&self, fields: &F, label: Option<&str>) -> Result<String>
    where
        F: FieldLookup + ?Sized,
    {
        let label = label.unwrap_or(DEFAULT_LABEL);
        let field = fields.require_field(self.field())?;
        let name = field
            .display_attribute(label)
            .ok_or_else(|| PredicateError::MissingKey {
                field: self.field().to_string(),
                key: label.to_string(),
            })?;

        let Some(term) = self.term() else {
            return Ok(format!(
                "{} {} {}",
                name,
                self.operator(),
                display_value(self.value())
            ));
        };

        let full_term = self.is_full_term(fields)?;
        let count = self.count().unwrap_or_default();
        let operator = self.operator();

        let negated = (operator == Operator::Lt && count <= 1)
            || (operator == Operator::Lte && count == 0);

        let rule = if negated {
            let literal = if full_term {
                "is not equal to"
            } else {
                "does not contain"
            };
            format!("{} {} {}", name, literal, term)
        } else if full_term {
            format!("{} is equal to {}", name, term)
        } else if operator == Operator::Gt && count == 0 {
            format!("{} contains {}", name, term)
        } else {
            format!(
                "{} contains {} {}",
                name,
                term,
                operator.relation_phrase(count)
            )
        };

        Ok(rule)
    }
}
