//! Sentence templates and the content supply seam.
//!
//! Content quality is somebody else's problem; the engine only does
//! blank-count arithmetic against the fixed marker.

use serde::{Deserialize, Serialize};

/// Marker that card text is substituted into, in order of appearance.
pub const BLANK_MARKER: &str = "_____";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceTemplate {
    pub text: String,
}

impl SentenceTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Number of card selections this template requires.
    pub fn blank_count(&self) -> usize {
        self.text.matches(BLANK_MARKER).count()
    }

    /// Substitute card text into the blanks, left to right. Callers are
    /// expected to have validated `cards.len() == blank_count()`.
    pub fn fill(&self, cards: &[String]) -> String {
        let mut filled = self.text.clone();
        for card in cards {
            filled = filled.replacen(BLANK_MARKER, card, 1);
        }
        filled
    }
}

/// Supply of sentence templates, provided by the excluded content loader.
pub trait SentenceDeck: Send + Sync {
    fn draw(&self) -> SentenceTemplate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_count_matches_markers() {
        let template = SentenceTemplate::new("A _____ walks into a _____.");
        assert_eq!(template.blank_count(), 2);
        assert_eq!(SentenceTemplate::new("no blanks here").blank_count(), 0);
    }

    #[test]
    fn fill_substitutes_in_order() {
        let template = SentenceTemplate::new("A _____ riding a _____.");
        let filled = template.fill(&["wizard".to_string(), "vacuum cleaner".to_string()]);
        assert_eq!(filled, "A wizard riding a vacuum cleaner.");
    }
}
