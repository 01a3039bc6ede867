//! 规则表
//!
//! 所有查表数据（目标循环、开头动词、引导语、形容词开头）都封装成不可变的值，
//! 由调用方传入引擎，引擎本身不读取全局状态。

pub mod cycle;
pub mod tables;

use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::services::normalizer::ClauseRoute;

pub use cycle::{CycleTable, TargetCycle};

/// 一条引导语
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadIn {
    pub phrase: String,
    /// 分句分类风格的路由提示
    pub route: Option<ClauseRoute>,
}

/// 选项改写规则
#[derive(Debug, Clone)]
pub struct RewriteRules {
    /// 按长度从长到短排列，保证具体的引导语先于通用的引导语匹配
    lead_ins: Vec<LeadIn>,
    verbs: Vec<String>,
    adjective_openers: BTreeSet<String>,
    max_words: usize,
}

impl Default for RewriteRules {
    fn default() -> Self {
        let mut rules = Self {
            lead_ins: Vec::new(),
            verbs: tables::OPENER_VERBS.iter().map(|v| v.to_string()).collect(),
            adjective_openers: tables::ADJECTIVE_OPENERS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            max_words: tables::DEFAULT_MAX_WORDS,
        };
        rules.rebuild_lead_ins();
        rules
    }
}

impl RewriteRules {
    /// 设置最大词数
    pub fn with_max_words(mut self, max_words: usize) -> Result<Self, ConfigError> {
        if max_words == 0 {
            return Err(ConfigError::InvalidRules("max_words 必须大于 0".to_string()));
        }
        self.max_words = max_words;
        Ok(self)
    }

    /// 替换开头动词轮换表
    pub fn with_verbs(mut self, verbs: Vec<String>) -> Result<Self, ConfigError> {
        let verbs: Vec<String> = verbs
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if verbs.is_empty() {
            return Err(ConfigError::InvalidRules("verbs 不能为空".to_string()));
        }
        self.verbs = verbs;
        self.rebuild_lead_ins();
        Ok(self)
    }

    /// 追加形容词开头
    pub fn with_extra_adjective_openers(mut self, words: &[String]) -> Self {
        self.adjective_openers
            .extend(words.iter().map(|w| w.trim().to_lowercase()).filter(|w| !w.is_empty()));
        self
    }

    /// 匹配文本开头的引导语（大小写不敏感）
    pub fn match_lead_in(&self, text: &str) -> Option<&LeadIn> {
        self.lead_ins.iter().find(|lead_in| {
            text.get(..lead_in.phrase.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(&lead_in.phrase))
        })
    }

    /// 第 `position` 个展示位置的开头动词
    pub fn verb_for(&self, position: usize) -> &str {
        &self.verbs[position % self.verbs.len()]
    }

    pub fn is_adjective_opener(&self, word: &str) -> bool {
        self.adjective_openers.contains(word)
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// 内置引导语 + 每个开头动词生成的 "{verb} that "，去重后按长度降序排列
    fn rebuild_lead_ins(&mut self) {
        let mut lead_ins: Vec<LeadIn> = tables::LEAD_INS
            .iter()
            .map(|(phrase, route)| LeadIn {
                phrase: phrase.to_string(),
                route: *route,
            })
            .collect();
        for verb in &self.verbs {
            let phrase = format!("{} that ", verb);
            if !lead_ins
                .iter()
                .any(|l| l.phrase.eq_ignore_ascii_case(&phrase))
            {
                lead_ins.push(LeadIn {
                    phrase,
                    route: None,
                });
            }
        }
        lead_ins.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
        self.lead_ins = lead_ins;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_lead_in_wins() {
        let rules = RewriteRules::default();
        let hit = rules
            .match_lead_in("claims that the model rests on broad rules")
            .unwrap();
        assert_eq!(hit.phrase, "Claims that the model rests on ");
        assert_eq!(hit.route, Some(ClauseRoute::ModelRestsOn));

        let hit = rules.match_lead_in("Advocates for reform").unwrap();
        assert_eq!(hit.phrase, "Advocates for ");
    }

    #[test]
    fn test_verb_lead_ins_follow_verbs() {
        let rules = RewriteRules::default();
        assert!(rules.match_lead_in("Posits that x").is_some());

        let rules = rules.with_verbs(vec!["Holds".to_string()]).unwrap();
        assert!(rules.match_lead_in("Holds that x").is_some());
        assert!(rules.match_lead_in("Posits that x").is_none());
        assert_eq!(rules.verb_for(5), "Holds");
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        assert!(RewriteRules::default().with_max_words(0).is_err());
        assert!(RewriteRules::default().with_verbs(vec!["  ".to_string()]).is_err());
    }

    #[test]
    fn test_no_match_inside_multibyte_text() {
        let rules = RewriteRules::default();
        assert!(rules.match_lead_in("法院认为").is_none());
    }
}
