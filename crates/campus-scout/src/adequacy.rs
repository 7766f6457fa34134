//! Topic-specific sufficiency checks for retrieved text.

use crate::topic::Topic;
use regex::Regex;
use std::sync::OnceLock;

fn placement_figure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:(?:lpa|lakhs?|crores?|cr|percent)\b|%)")
            .expect("placement regex is valid")
    })
}

fn fee_amount() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:₹|\brs\.?|\binr|\$)\s*\d+|\d[\d,]*\s*(?:per|/)\s*(?:year|annum|semester)")
            .expect("fee regex is valid")
    })
}

/// Whether `text` plausibly answers a question about `topic`.
///
/// Placements need a package or percentage figure, fees need a currency
/// amount or a per-period rate. Any other topic is satisfied by non-blank
/// text.
pub fn is_adequate(text: &str, topic: Topic) -> bool {
    match topic {
        Topic::Placements => placement_figure().is_match(text),
        Topic::Fees => fee_amount().is_match(text),
        _ => !text.trim().is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_amounts() {
        assert!(is_adequate("₹50,000 per year", Topic::Fees));
        assert!(is_adequate("Tuition: Rs. 1,20,000", Topic::Fees));
        assert!(is_adequate("INR 95000 for the programme", Topic::Fees));
        assert!(is_adequate("$12000", Topic::Fees));
        assert!(is_adequate("85,000 / semester", Topic::Fees));
        assert!(!is_adequate("fees are applicable", Topic::Fees));
        assert!(!is_adequate("Contact the office for charges", Topic::Fees));
    }

    #[test]
    fn test_placement_figures() {
        assert!(is_adequate("Highest package: 45 LPA", Topic::Placements));
        assert!(is_adequate("Average 12.5 lakhs", Topic::Placements));
        assert!(is_adequate("1.2 Cr offer", Topic::Placements));
        assert!(is_adequate("92% students placed", Topic::Placements));
        assert!(is_adequate("placed 95 percent", Topic::Placements));
        assert!(!is_adequate("Many companies visit our campus", Topic::Placements));
        // "cr" must stand alone, not start a word
        assert!(!is_adequate("Room 12 creche", Topic::Placements));
    }

    #[test]
    fn test_other_topics_need_non_blank_text() {
        assert!(is_adequate("Founded in 1958", Topic::About));
        assert!(!is_adequate("  \n ", Topic::Contact));
        assert!(!is_adequate("", Topic::General));
    }
}
