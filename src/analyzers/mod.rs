//! Keyword-driven document analysis.
//!
//! Splits raw text into sentences, classifies each sentence into a
//! category by trigger substrings, and keeps the actionable ones as
//! checklist candidates. No guarantee of completeness or precision is
//! made; the scoring engine consumes whatever comes out as-is.

pub mod extraction;

use crate::config::KeywordsConfig;
use crate::core::ChecklistItem;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

// Sentence boundaries: terminal punctuation followed by whitespace, or
// a line break.
static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+|\n").expect("valid sentence split regex"));

// Leading connectives carry no content in a checklist entry.
static LEADING_CONNECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(therefore|thus|hence|however|moreover|furthermore|also|accordingly|in addition)[,:]?\s+")
        .expect("valid connective regex")
});

const MAX_ITEM_LEN: usize = 100;

/// Keyword-driven text analyzer producing checklist candidates.
pub struct DocumentAnalyzer {
    categories: BTreeMap<String, Vec<String>>,
    action_triggers: Vec<String>,
    min_sentence_len: usize,
    fallback_category: String,
}

impl DocumentAnalyzer {
    pub fn new(config: KeywordsConfig) -> Self {
        // Lowercase all triggers once; sentences are lowercased per match.
        let categories = config
            .categories
            .into_iter()
            .map(|(category, keywords)| {
                (
                    category,
                    keywords.into_iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();
        let action_triggers = config
            .action_triggers
            .into_iter()
            .map(|k| k.to_lowercase())
            .collect();

        Self {
            categories,
            action_triggers,
            min_sentence_len: config.min_sentence_len,
            fallback_category: config.fallback_category,
        }
    }

    /// Analyzer over the active configuration.
    pub fn from_config() -> Self {
        Self::new(crate::config::get_keywords_config())
    }

    /// Extract ordered checklist candidates from raw text.
    ///
    /// Categories are visited in sorted order, sentences in document
    /// order within each category; ids are sequential from 1.
    pub fn analyze(&self, text: &str) -> Vec<ChecklistItem> {
        let sentences = self.split_sentences(text);
        let categorized = self.categorize_sentences(&sentences);

        let mut candidates = Vec::new();
        let mut next_id = 1u32;
        for (category, sentences) in &categorized {
            for sentence in sentences {
                if !self.is_actionable(sentence) {
                    continue;
                }
                candidates.push(ChecklistItem {
                    id: next_id,
                    category: category.clone(),
                    item: condense(sentence),
                    source_text: sentence.clone(),
                });
                next_id += 1;
            }
        }

        candidates
    }

    fn split_sentences(&self, text: &str) -> Vec<String> {
        SENTENCE_SPLIT
            .split(text)
            .map(str::trim)
            .filter(|s| s.chars().count() > self.min_sentence_len)
            .map(str::to_string)
            .collect()
    }

    // First matching keyword set wins; sorted category order keeps
    // multi-match classification deterministic.
    fn categorize(&self, sentence: &str) -> &str {
        let lowered = sentence.to_lowercase();
        self.categories
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|(category, _)| category.as_str())
            .unwrap_or(self.fallback_category.as_str())
    }

    fn categorize_sentences(&self, sentences: &[String]) -> BTreeMap<String, Vec<String>> {
        let mut categorized: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for sentence in sentences {
            categorized
                .entry(self.categorize(sentence).to_string())
                .or_default()
                .push(sentence.clone());
        }
        categorized
    }

    fn is_actionable(&self, sentence: &str) -> bool {
        let lowered = sentence.to_lowercase();
        self.action_triggers
            .iter()
            .any(|trigger| lowered.contains(trigger.as_str()))
    }
}

// Condense a sentence into checklist form: strip the leading
// connective and truncate overlong text on a char boundary.
fn condense(sentence: &str) -> String {
    let stripped = LEADING_CONNECTIVE.replace(sentence, "");
    if stripped.chars().count() > MAX_ITEM_LEN {
        let truncated: String = stripped.chars().take(MAX_ITEM_LEN).collect();
        format!("{truncated}...")
    } else {
        stripped.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn analyzer() -> DocumentAnalyzer {
        DocumentAnalyzer::new(KeywordsConfig::default())
    }

    #[test]
    fn splits_on_punctuation_and_newlines() {
        let analyzer = analyzer();
        let sentences = analyzer.split_sentences(
            "The permit must be obtained. The budget requires review!\nShort.\nok",
        );
        assert_eq!(
            sentences,
            vec![
                "The permit must be obtained".to_string(),
                "The budget requires review".to_string(),
            ]
        );
    }

    #[test]
    fn short_fragments_are_dropped() {
        let analyzer = analyzer();
        assert!(analyzer.split_sentences("tiny\nbits\nhere").is_empty());
    }

    #[test]
    fn classification_picks_first_category_in_sorted_order() {
        let analyzer = analyzer();
        // Matches both "approval" and "environment"; sorted order makes
        // "approval" win every run.
        let sentence = "Environmental approval is required before commencement";
        assert_eq!(analyzer.categorize(sentence), "approval");
    }

    #[test]
    fn unmatched_sentences_fall_back_to_general() {
        let analyzer = analyzer();
        assert_eq!(
            analyzer.categorize("The committee met again on Tuesday"),
            "general"
        );
    }

    #[test]
    fn only_actionable_sentences_become_candidates() {
        let analyzer = analyzer();
        let text = indoc! {"
            The runway capacity analysis must be performed before opening.
            The terminal roof is painted light grey.
        "};
        let items = analyzer.analyze(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "operations");
        assert!(items[0].item.contains("runway capacity analysis"));
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let analyzer = analyzer();
        let text = indoc! {"
            Environmental approval must be obtained before commencement.
            The construction budget requires review by the steering committee.
            A noise survey must be conducted near the northern villages.
        "};
        let items = analyzer.analyze(text);
        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn analysis_is_deterministic() {
        let analyzer = analyzer();
        let text = "Environmental approval must be obtained. \
                    The construction budget requires review. \
                    A safety assessment must be performed.";
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }

    #[test]
    fn condense_strips_connectives_and_truncates() {
        assert_eq!(
            condense("Therefore, the permit must be obtained"),
            "the permit must be obtained"
        );

        let long = format!("Review {}", "x".repeat(200));
        let condensed = condense(&long);
        assert_eq!(condensed.chars().count(), MAX_ITEM_LEN + 3);
        assert!(condensed.ends_with("..."));
    }

    #[test]
    fn source_text_preserves_the_original_sentence() {
        let analyzer = analyzer();
        let items =
            analyzer.analyze("However, the noise survey must be conducted this quarter.\n");
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].source_text,
            "However, the noise survey must be conducted this quarter"
        );
        assert_eq!(
            items[0].item,
            "the noise survey must be conducted this quarter"
        );
    }
}
