//! Keyword heuristic that picks a template for free text.
//!
//! Matching is case-insensitive *substring* containment, not whole-word
//! matching, so "godly", "workshop" and "leadership" all hit a keyword.
//! Expect false positives such as "ungodly" selecting the devotional
//! template or "homework" selecting the business one.

use crate::templates::TemplateId;

/// Checked first; any hit selects the devotional template.
pub const DEVOTIONAL_KEYWORDS: [&str; 15] = [
    "god", "lord", "jesus", "pray", "bible", "verse", "psalm", "church", "faith", "holy", "bless", "amen", "soul",
    "spirit", "christ",
];

/// Checked second; any hit selects the business template.
pub const BUSINESS_KEYWORDS: [&str; 14] = [
    "success", "money", "business", "work", "goal", "lead", "team", "growth", "market", "strategy", "profit",
    "hustle", "career", "leader",
];

/// Outcome of a match with the keyword that decided it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    pub template: TemplateId,
    pub keyword: Option<&'static str>,
}

/// Best-fit template for `text`. Empty or unmatched text yields the general template.
pub fn match_template(text: &str) -> TemplateId {
    explain_match(text).template
}

/// Like [`match_template`] but also reports the first keyword that matched.
pub fn explain_match(text: &str) -> MatchReport {
    let lower = text.to_lowercase();
    let hit = |set: &[&'static str]| set.iter().copied().find(|k| lower.contains(k));

    if let Some(k) = hit(&DEVOTIONAL_KEYWORDS) {
        return MatchReport {
            template: TemplateId::DevotionClassic,
            keyword: Some(k),
        };
    }
    if let Some(k) = hit(&BUSINESS_KEYWORDS) {
        return MatchReport {
            template: TemplateId::BusinessPro,
            keyword: Some(k),
        };
    }
    MatchReport {
        template: TemplateId::MotivationBlue,
        keyword: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devotional_wins_over_business() {
        assert_eq!(match_template("church success"), TemplateId::DevotionClassic);
    }

    #[test]
    fn case_is_ignored() {
        let r = explain_match("PRAISE THE LORD");
        assert_eq!(r.template, TemplateId::DevotionClassic);
        assert_eq!(r.keyword, Some("lord"));
    }

    #[test]
    fn default_for_empty_and_unmatched() {
        assert_eq!(match_template(""), TemplateId::MotivationBlue);
        assert_eq!(match_template("hello world"), TemplateId::MotivationBlue);
        assert_eq!(explain_match("hello world").keyword, None);
    }

    #[test]
    fn keyword_inside_another_word_still_matches() {
        assert_eq!(match_template("an ungodly hour"), TemplateId::DevotionClassic);
        assert_eq!(match_template("homework"), TemplateId::BusinessPro);
    }

    #[test]
    fn keyword_sets_have_expected_sizes() {
        assert_eq!(DEVOTIONAL_KEYWORDS.len(), 15);
        assert_eq!(BUSINESS_KEYWORDS.len(), 14);
    }
}
