use rust_decimal::Decimal;

use crate::domain::request::{QuoteCategory, QuoteRequest};

/// Material vocabulary, ordered by precedence. First term found in the
/// message wins, so more specific terms must precede their substrings
/// (`quartzite` before `quartz`). Keyword matching is a known limitation;
/// the ordering is part of the contract.
pub const MATERIALS: &[&str] =
    &["quartzite", "granite", "quartz", "marble", "soapstone", "butcher block", "laminate"];

/// Edge-profile vocabulary, ordered by precedence.
pub const EDGE_PROFILES: &[&str] =
    &["bullnose", "ogee", "beveled", "eased", "waterfall", "straight"];

const COMBO_WORDS: &[&str] = &["both", "everything"];
const COMBO_PHRASES: &[&str] = &[
    "complete kitchen",
    "full kitchen",
    "whole kitchen",
    "entire kitchen",
    "kitchen remodel",
    "kitchen renovation",
];
const COUNTERTOP_KEYWORDS: &[&str] =
    &["countertop", "counter top", "counters", "counter", "worktop", "slab", "vanity top"];
const CABINET_KEYWORDS: &[&str] = &["cabinet", "cabinets", "cabinetry", "cupboard", "cupboards"];

/// Best-effort keyword extractor for inbound chat messages. Total: any text
/// yields a (possibly empty) partial request, never an error.
#[derive(Clone, Debug, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> QuoteRequest {
        let normalized_text = normalize_text(text);
        let tokens = tokenize(&normalized_text);

        let mut request = QuoteRequest {
            category: detect_category(&normalized_text, &tokens),
            sqft: extract_sqft(&tokens),
            ..QuoteRequest::default()
        };

        let linear = extract_linear_feet(&tokens);
        request.backsplash_lf = linear.backsplash;
        request.base_lf = linear.base;
        request.wall_lf = linear.wall;

        request.sink_cutouts = extract_sink_cutouts(&tokens);
        request.tall_units = extract_count(&tokens, &["tall"]);
        request.drawer_stacks = extract_count(&tokens, &["drawer", "drawers"]);

        request.material = match_vocabulary(&normalized_text, MATERIALS);
        request.edge_profile = match_vocabulary(&normalized_text, EDGE_PROFILES);

        // A bare "<n> lf" with no base/wall context only means something for
        // cabinet projects, where it reads as base-run footage.
        if request.category == Some(QuoteCategory::Cabinet)
            && request.base_lf.is_none()
            && request.wall_lf.is_none()
        {
            request.base_lf = linear.unlabeled;
        }

        request.zipcode = extract_zipcode(&tokens);
        request
    }
}

fn normalize_text(text: &str) -> String {
    text.to_ascii_lowercase()
}

fn tokenize(text: &str) -> Vec<String> {
    let mut sanitized = String::with_capacity(text.len());
    for character in text.chars() {
        if character.is_ascii_alphanumeric() || matches!(character, '.' | '-') {
            sanitized.push(character);
        } else {
            sanitized.push(' ');
        }
    }
    sanitized
        .split_whitespace()
        .map(|token| token.trim_matches(|c| matches!(c, '.' | '-')).to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn detect_category(normalized_text: &str, tokens: &[String]) -> Option<QuoteCategory> {
    // Explicit combo phrasing always wins over single-category keywords.
    let explicit_combo = COMBO_WORDS.iter().any(|word| tokens.iter().any(|t| t == word))
        || COMBO_PHRASES.iter().any(|phrase| normalized_text.contains(phrase));
    if explicit_combo {
        return Some(QuoteCategory::Combo);
    }

    let mentions_countertop = COUNTERTOP_KEYWORDS.iter().any(|kw| normalized_text.contains(kw))
        || MATERIALS.iter().any(|kw| normalized_text.contains(kw));
    let mentions_cabinet = CABINET_KEYWORDS.iter().any(|kw| normalized_text.contains(kw));

    match (mentions_countertop, mentions_cabinet) {
        (true, true) => Some(QuoteCategory::Combo),
        (true, false) => Some(QuoteCategory::Countertop),
        (false, true) => Some(QuoteCategory::Cabinet),
        (false, false) => None,
    }
}

fn parse_number(token: &str) -> Option<Decimal> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse::<Decimal>().ok()
}

fn parse_count(token: &str) -> Option<u32> {
    token.parse::<u32>().ok()
}

fn extract_sqft(tokens: &[String]) -> Option<Decimal> {
    for (index, token) in tokens.iter().enumerate() {
        // Glued forms: "45sqft", "45sf".
        for suffix in ["sqft", "sf"] {
            if let Some(prefix) = token.strip_suffix(suffix) {
                if let Some(value) = parse_number(prefix) {
                    return Some(value);
                }
            }
        }

        let Some(value) = parse_number(token) else { continue };
        let Some(next) = tokens.get(index + 1) else { continue };

        if matches!(next.as_str(), "sqft" | "sf") {
            return Some(value);
        }
        if matches!(next.as_str(), "sq" | "square") {
            if let Some(after) = tokens.get(index + 2) {
                if matches!(after.as_str(), "ft" | "feet" | "foot") {
                    return Some(value);
                }
            }
        }
    }
    None
}

#[derive(Debug, Default)]
struct LinearFeetMentions {
    backsplash: Option<Decimal>,
    base: Option<Decimal>,
    wall: Option<Decimal>,
    unlabeled: Option<Decimal>,
}

/// Number of unit tokens consumed by a linear-feet unit starting at `at`,
/// or None if the tokens there are not a linear-feet unit.
fn linear_unit_width(tokens: &[String], at: usize) -> Option<usize> {
    match tokens.get(at).map(String::as_str) {
        Some("lf") => Some(1),
        Some("linear" | "lin") => match tokens.get(at + 1).map(String::as_str) {
            Some("feet" | "ft" | "foot") => Some(2),
            _ => None,
        },
        _ => None,
    }
}

fn extract_linear_feet(tokens: &[String]) -> LinearFeetMentions {
    let mut mentions = LinearFeetMentions::default();

    for (index, token) in tokens.iter().enumerate() {
        let Some(value) = parse_number(token) else { continue };
        let Some(unit_width) = linear_unit_width(tokens, index + 1) else { continue };

        // Look for a run label near the measurement: first just after the
        // unit ("10 lf of base"), then just before the number ("base run is
        // 10 lf"). Forward wins so an earlier run's label cannot bleed into
        // the next measurement.
        let after_start = index + 1 + unit_width;
        let after_end = (after_start + 3).min(tokens.len());
        let before_start = index.saturating_sub(3);
        let label = tokens[after_start..after_end]
            .iter()
            .find_map(|t| run_label(t))
            .or_else(|| tokens[before_start..index].iter().find_map(|t| run_label(t)));

        // First match wins for each run.
        match label {
            Some("backsplash") => {
                if mentions.backsplash.is_none() {
                    mentions.backsplash = Some(value);
                }
            }
            Some("base") => {
                if mentions.base.is_none() {
                    mentions.base = Some(value);
                }
            }
            Some("wall") => {
                if mentions.wall.is_none() {
                    mentions.wall = Some(value);
                }
            }
            _ => {
                if mentions.unlabeled.is_none() {
                    mentions.unlabeled = Some(value);
                }
            }
        }
    }

    mentions
}

fn run_label(token: &str) -> Option<&'static str> {
    if token.starts_with("backsplash") {
        Some("backsplash")
    } else if token == "base" || token.starts_with("lower") {
        Some("base")
    } else if token == "wall" || token.starts_with("upper") {
        Some("wall")
    } else {
        None
    }
}

fn extract_sink_cutouts(tokens: &[String]) -> Option<u32> {
    for (index, token) in tokens.iter().enumerate() {
        let Some(count) = parse_count(token) else { continue };
        let followed_by_sink = tokens
            .get(index + 1)
            .map(|next| next.starts_with("sink"))
            .unwrap_or(false);
        if followed_by_sink {
            return Some(count);
        }
    }

    // A bare sink mention with no count reads as one cutout.
    if tokens.iter().any(|token| token.starts_with("sink")) {
        return Some(1);
    }
    None
}

fn extract_count(tokens: &[String], labels: &[&str]) -> Option<u32> {
    for (index, token) in tokens.iter().enumerate() {
        let Some(count) = parse_count(token) else { continue };
        let labeled = tokens
            .get(index + 1)
            .map(|next| labels.contains(&next.as_str()))
            .unwrap_or(false);
        if labeled {
            return Some(count);
        }
    }
    None
}

fn match_vocabulary(normalized_text: &str, vocabulary: &[&str]) -> Option<String> {
    vocabulary
        .iter()
        .find(|term| normalized_text.contains(**term))
        .map(|term| (*term).to_string())
}

fn extract_zipcode(tokens: &[String]) -> Option<String> {
    tokens.iter().find(|token| is_zip_like(token.as_str())).cloned()
}

fn is_zip_like(token: &str) -> bool {
    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    match token.split_once('-') {
        Some((zip, plus4)) => {
            zip.len() == 5 && plus4.len() == 4 && is_digits(zip) && is_digits(plus4)
        }
        None => (token.len() == 5 || token.len() == 9) && is_digits(token),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::FieldExtractor;
    use crate::domain::request::QuoteCategory;

    fn extract(text: &str) -> crate::domain::request::QuoteRequest {
        FieldExtractor::new().extract(text)
    }

    #[test]
    fn extracts_full_countertop_request_from_one_message() {
        let request = extract(
            "I'd like granite countertops, about 45 sq ft with a bullnose edge, \
             1 sink cutout and 12 lf of backsplash. Zip is 30301.",
        );

        assert_eq!(request.category, Some(QuoteCategory::Countertop));
        assert_eq!(request.material.as_deref(), Some("granite"));
        assert_eq!(request.sqft, Some(Decimal::from(45)));
        assert_eq!(request.edge_profile.as_deref(), Some("bullnose"));
        assert_eq!(request.sink_cutouts, Some(1));
        assert_eq!(request.backsplash_lf, Some(Decimal::from(12)));
        assert_eq!(request.zipcode.as_deref(), Some("30301"));
    }

    #[test]
    fn explicit_combo_phrase_wins_over_single_category_keywords() {
        let request = extract("We're doing a complete kitchen, countertops only for now");
        assert_eq!(request.category, Some(QuoteCategory::Combo));
    }

    #[test]
    fn both_keyword_families_present_reads_as_combo() {
        let request = extract("need new countertops and cabinets");
        assert_eq!(request.category, Some(QuoteCategory::Combo));
    }

    #[test]
    fn material_mention_alone_reads_as_countertop() {
        let request = extract("thinking about quartz, roughly 30 sqft");
        assert_eq!(request.category, Some(QuoteCategory::Countertop));
        assert_eq!(request.material.as_deref(), Some("quartz"));
        assert_eq!(request.sqft, Some(Decimal::from(30)));
    }

    #[test]
    fn quartzite_wins_over_its_quartz_substring() {
        let request = extract("leaning towards quartzite counters");
        assert_eq!(request.material.as_deref(), Some("quartzite"));
    }

    #[test]
    fn labeled_linear_feet_land_on_their_runs() {
        let request = extract(
            "cabinets: 10 lf of base cabinets, 8 lf of wall cabinets, 3 tall units \
             and 2 drawer stacks",
        );

        assert_eq!(request.category, Some(QuoteCategory::Cabinet));
        assert_eq!(request.base_lf, Some(Decimal::from(10)));
        assert_eq!(request.wall_lf, Some(Decimal::from(8)));
        assert_eq!(request.tall_units, Some(3));
        assert_eq!(request.drawer_stacks, Some(2));
    }

    #[test]
    fn bare_linear_feet_default_to_base_run_for_cabinet_requests() {
        let request = extract("looking for cabinets, about 14 lf");
        assert_eq!(request.base_lf, Some(Decimal::from(14)));
        assert_eq!(request.wall_lf, None);
    }

    #[test]
    fn bare_linear_feet_are_ignored_without_cabinet_context() {
        let request = extract("about 14 lf");
        assert_eq!(request.base_lf, None);
        assert_eq!(request.wall_lf, None);
    }

    #[test]
    fn bare_sink_mention_defaults_to_one_cutout() {
        let request = extract("granite with a sink please");
        assert_eq!(request.sink_cutouts, Some(1));
    }

    #[test]
    fn counted_sinks_win_over_the_bare_default() {
        let request = extract("marble top with 2 sink cutouts");
        assert_eq!(request.sink_cutouts, Some(2));
    }

    #[test]
    fn nine_digit_zip_is_accepted() {
        let request = extract("we're at 30301-1234");
        assert_eq!(request.zipcode.as_deref(), Some("30301-1234"));
    }

    #[test]
    fn unparseable_text_yields_an_empty_request() {
        let request = extract("hello there!");
        assert_eq!(request, crate::domain::request::QuoteRequest::default());
    }

    #[test]
    fn extraction_is_deterministic_on_complete_input() {
        let text = "granite countertops, 45 sq ft, bullnose edge, 2 sinks, 12 lf backsplash";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn handles_common_phrasings() {
        struct Case {
            text: &'static str,
            category: Option<QuoteCategory>,
            sqft: Option<u32>,
        }

        let cases = vec![
            Case { text: "quote for 60 square feet of quartz", category: Some(QuoteCategory::Countertop), sqft: Some(60) },
            Case { text: "new cabinets for the laundry room", category: Some(QuoteCategory::Cabinet), sqft: None },
            Case { text: "both countertops and cabinets", category: Some(QuoteCategory::Combo), sqft: None },
            Case { text: "whole kitchen refresh", category: Some(QuoteCategory::Combo), sqft: None },
            Case { text: "45sf marble vanity top", category: Some(QuoteCategory::Countertop), sqft: Some(45) },
            Case { text: "do you install butcher block?", category: Some(QuoteCategory::Countertop), sqft: None },
            Case { text: "hi, what are your hours?", category: None, sqft: None },
        ];

        for (index, case) in cases.iter().enumerate() {
            let request = extract(case.text);
            assert_eq!(request.category, case.category, "case {index}: {}", case.text);
            assert_eq!(
                request.sqft,
                case.sqft.map(Decimal::from),
                "case {index}: {}",
                case.text
            );
        }
    }
}
