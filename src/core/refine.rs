// src/core/refine.rs — Prompt refinement policy

use crate::core::types::FeedbackItem;

/// Aspects scoring below this are called out in the refined prompt.
const IMPROVEMENT_CUTOFF: f32 = 0.6;

/// Compute the next prompt from evaluation feedback.
///
/// Pure and deterministic: every aspect scoring below the cutoff is named in
/// a trailing directive, in evaluation order, each at most once. With no
/// weak aspects the prompt comes back unchanged, which can repeat identical
/// work against a deterministic generator until the iteration budget runs
/// out; collaborators are expected to be stochastic.
pub fn refine_prompt(current_prompt: &str, feedback: &[FeedbackItem]) -> String {
    let mut improvements: Vec<&str> = Vec::new();
    for item in feedback {
        if item.score < IMPROVEMENT_CUTOFF && !improvements.contains(&item.aspect.as_str()) {
            improvements.push(&item.aspect);
        }
    }

    if improvements.is_empty() {
        return current_prompt.to_string();
    }

    format!(
        "{} (Please improve {})",
        current_prompt,
        improvements.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(aspect: &str, score: f32) -> FeedbackItem {
        FeedbackItem {
            aspect: aspect.into(),
            score,
            comment: String::new(),
        }
    }

    #[test]
    fn test_single_weak_aspect() {
        let feedback = vec![item("relevance", 0.5), item("creativity", 0.9)];
        let refined = refine_prompt("Write a story", &feedback);
        assert_eq!(refined, "Write a story (Please improve relevance)");
    }

    #[test]
    fn test_multiple_weak_aspects_keep_order() {
        let feedback = vec![
            item("quality", 0.4),
            item("relevance", 0.9),
            item("creativity", 0.2),
        ];
        let refined = refine_prompt("p", &feedback);
        assert_eq!(refined, "p (Please improve quality, creativity)");
    }

    #[test]
    fn test_no_weak_aspects_returns_unchanged() {
        let feedback = vec![item("quality", 0.65), item("relevance", 0.8)];
        assert_eq!(refine_prompt("unchanged", &feedback), "unchanged");
    }

    #[test]
    fn test_cutoff_is_exclusive() {
        // Exactly 0.6 does not trigger a directive
        let feedback = vec![item("quality", 0.6)];
        assert_eq!(refine_prompt("p", &feedback), "p");
        let feedback = vec![item("quality", 0.59)];
        assert_eq!(refine_prompt("p", &feedback), "p (Please improve quality)");
    }

    #[test]
    fn test_duplicate_aspects_named_once() {
        let feedback = vec![item("tone", 0.3), item("tone", 0.1)];
        assert_eq!(refine_prompt("p", &feedback), "p (Please improve tone)");
    }

    #[test]
    fn test_empty_feedback() {
        assert_eq!(refine_prompt("p", &[]), "p");
    }

    #[test]
    fn test_deterministic() {
        let feedback = vec![item("quality", 0.1), item("relevance", 0.5)];
        let a = refine_prompt("same input", &feedback);
        let b = refine_prompt("same input", &feedback);
        assert_eq!(a, b);
    }
}
