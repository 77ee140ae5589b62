//! Valence-lexicon sentiment scorer.
//!
//! Stands in for the original pretrained models: a compound score in
//! [-1, 1] from a general-purpose word lexicon, plus a categorical label
//! with a confidence derived from the score magnitude.

use subpulse_core::SentimentLabel;

/// Absolute compound score below which text is labeled `NEUTRAL`.
const NEUTRAL_BAND: f64 = 0.15;

/// Normalization constant for the compound score, so that a handful of
/// strong words saturates toward +/-1 without ever reaching it.
const NORM_ALPHA: f64 = 15.0;

/// General-purpose valence weights. Keys are lowercase single words;
/// positive values in (0, 1], negative in [-1, 0).
const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("good", 0.5),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.9),
    ("awesome", 0.9),
    ("love", 0.8),
    ("loved", 0.8),
    ("like", 0.4),
    ("best", 0.8),
    ("win", 0.7),
    ("winning", 0.7),
    ("won", 0.7),
    ("gain", 0.6),
    ("gains", 0.6),
    ("profit", 0.6),
    ("bullish", 0.7),
    ("rally", 0.5),
    ("happy", 0.7),
    ("hope", 0.4),
    ("success", 0.7),
    ("strong", 0.5),
    ("growth", 0.5),
    ("up", 0.3),
    // Negative signals
    ("bad", -0.5),
    ("terrible", -0.9),
    ("awful", -0.9),
    ("horrible", -0.9),
    ("worst", -0.9),
    ("hate", -0.8),
    ("loss", -0.6),
    ("losses", -0.6),
    ("lose", -0.6),
    ("losing", -0.6),
    ("crash", -0.8),
    ("bearish", -0.7),
    ("drop", -0.4),
    ("fear", -0.6),
    ("panic", -0.7),
    ("scam", -0.8),
    ("fraud", -0.8),
    ("fail", -0.6),
    ("failed", -0.6),
    ("weak", -0.4),
    ("sad", -0.6),
    ("angry", -0.6),
    ("down", -0.3),
];

/// Score a text's overall valence, in [-1, 1].
///
/// Sums matched lexicon weights over lowercase words (punctuation stripped)
/// and normalizes with `sum / sqrt(sum^2 + alpha)`. Empty or unmatched text
/// scores 0.0.
#[must_use]
pub fn compound_score(text: &str) -> f64 {
    let mut sum = 0.0_f64;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                sum += weight;
                break;
            }
        }
    }
    if sum == 0.0 {
        0.0
    } else {
        sum / (sum * sum + NORM_ALPHA).sqrt()
    }
}

/// Derive a categorical label and confidence from a compound score.
///
/// Scores within the neutral band map to `NEUTRAL`; outside it, the sign
/// picks the label. Confidence grows linearly with the score magnitude,
/// bottoming out at 0.5 for a dead-neutral score.
#[must_use]
pub fn classify(score: f64) -> (SentimentLabel, f64) {
    let confidence = (0.5 + score.abs() / 2.0).min(1.0);
    if score >= NEUTRAL_BAND {
        (SentimentLabel::Positive, confidence)
    } else if score <= -NEUTRAL_BAND {
        (SentimentLabel::Negative, confidence)
    } else {
        (SentimentLabel::Neutral, confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_scores_zero() {
        assert_eq!(compound_score(""), 0.0);
    }

    #[test]
    fn unmatched_text_scores_zero() {
        assert_eq!(compound_score("the quick brown fox"), 0.0);
    }

    #[test]
    fn positive_text_scores_positive() {
        let score = compound_score("great gains, love this rally");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn negative_text_scores_negative() {
        let score = compound_score("terrible crash, massive losses");
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn score_stays_within_unit_interval() {
        let stacked = "excellent amazing awesome best love great win profit bullish";
        let score = compound_score(stacked);
        assert!(score > 0.5 && score < 1.0, "got {score}");

        let negative = "worst awful horrible hate crash scam fraud panic";
        let score = compound_score(negative);
        assert!(score < -0.5 && score > -1.0, "got {score}");
    }

    #[test]
    fn punctuation_does_not_block_matches() {
        let score = compound_score("Great!");
        assert!(score > 0.0, "got {score}");
    }

    #[test]
    fn classify_uses_neutral_band() {
        assert_eq!(classify(0.0).0, SentimentLabel::Neutral);
        assert_eq!(classify(0.1).0, SentimentLabel::Neutral);
        assert_eq!(classify(0.5).0, SentimentLabel::Positive);
        assert_eq!(classify(-0.5).0, SentimentLabel::Negative);
    }

    #[test]
    fn classify_confidence_grows_with_magnitude() {
        let (_, low) = classify(0.0);
        let (_, high) = classify(0.9);
        assert!((low - 0.5).abs() < 1e-9);
        assert!(high > low);
        assert!(high <= 1.0);
    }
}
