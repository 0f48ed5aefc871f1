//! Matching a free-text goal against advertised modules and actions.
//!
//! Goal and schema text go through the same normalisation: lowercase,
//! split on anything that is not alphanumeric (`search_rooms` becomes
//! `search` + `rooms`), drop stopwords, strip a plural `s`, and map verbs
//! onto the canonical ones actions are named with (`find` → `search`,
//! `book` → `create` + `booking`).
//!
//! Scoring per distinct goal token: 2 when it appears in the action name,
//! 1 when it only appears in the description, 1 for a near miss (typo)
//! against either. The highest score wins; ties prefer read-only actions,
//! then declaration order. A best score of zero means nothing matched.

use std::collections::BTreeSet;

use crate::discovery::{ActionDescriptor, ModuleDocument, ModuleRef};

const STOPWORDS: &[&str] = &[
    "a", "all", "an", "and", "any", "are", "at", "be", "by", "can", "could", "do", "for", "from",
    "get", "give", "i", "in", "is", "it", "me", "my", "of", "on", "or", "our", "please", "some",
    "that", "the", "there", "this", "to", "us", "want", "we", "what", "which", "with", "would",
    "you",
];

/// Verb synonyms; each maps onto one or more canonical tokens.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("find", &["search"]),
    ("look", &["search"]),
    ("looking", &["search"]),
    ("lookup", &["search"]),
    ("check", &["search"]),
    ("browse", &["search"]),
    ("query", &["search"]),
    ("availability", &["available"]),
    ("free", &["available"]),
    ("vacant", &["available"]),
    ("show", &["list"]),
    ("view", &["list"]),
    ("every", &["list"]),
    ("book", &["create", "booking"]),
    ("reserve", &["create", "booking"]),
    ("reservation", &["booking"]),
    ("make", &["create"]),
    ("new", &["create"]),
    ("drop", &["cancel"]),
    ("cancellation", &["cancel"]),
    ("abort", &["cancel"]),
];

/// Similarity a token pair needs to count as a near miss.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Shortest token considered for near-miss matching.
const FUZZY_MIN_LEN: usize = 5;

/// Normalise text into a set of match tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for raw in text.split(|c: char| !c.is_ascii_alphanumeric()) {
        let lower = raw.to_ascii_lowercase();
        if lower.is_empty() || STOPWORDS.contains(&lower.as_str()) {
            continue;
        }
        if let Some((_, canonical)) = SYNONYMS.iter().find(|(word, _)| *word == lower) {
            tokens.extend(canonical.iter().map(|c| c.to_string()));
            continue;
        }
        let stemmed = stem(&lower);
        match SYNONYMS.iter().find(|(word, _)| *word == stemmed) {
            Some((_, canonical)) => tokens.extend(canonical.iter().map(|c| c.to_string())),
            None => {
                tokens.insert(stemmed);
            }
        }
    }
    tokens
}

fn stem(token: &str) -> String {
    if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        token[..token.len() - 1].to_string()
    } else {
        token.to_string()
    }
}

/// Score of one goal against a named, described item.
fn score(goal: &BTreeSet<String>, name: &str, description: &str) -> u32 {
    let name_tokens = tokenize(name);
    let description_tokens = tokenize(description);

    goal.iter()
        .map(|token| {
            if name_tokens.contains(token) {
                2
            } else if description_tokens.contains(token) {
                1
            } else if token.len() >= FUZZY_MIN_LEN
                && name_tokens
                    .iter()
                    .chain(description_tokens.iter())
                    .any(|t| similarity_ratio(t, token) > FUZZY_THRESHOLD)
            {
                1
            } else {
                0
            }
        })
        .sum()
}

/// Score an action against a goal.
pub fn score_action(goal: &str, action: &ActionDescriptor) -> u32 {
    score(&tokenize(goal), &action.name, &action.description)
}

/// The winning action of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index into the module slice.
    pub module: usize,
    /// Index into that module's actions.
    pub action: usize,
    pub score: u32,
}

/// Pick the best action across `modules`, `None` when nothing matches.
pub fn select_action(goal: &str, modules: &[ModuleDocument]) -> Option<Selection> {
    let goal_tokens = tokenize(goal);
    let mut best: Option<(Selection, bool)> = None;

    for (m, module) in modules.iter().enumerate() {
        for (a, action) in module.actions.iter().enumerate() {
            let candidate = Selection {
                module: m,
                action: a,
                score: score(&goal_tokens, &action.name, &action.description),
            };
            if candidate.score == 0 {
                continue;
            }
            let read_only = action.is_read_only();
            let better = match best {
                None => true,
                Some((current, current_read_only)) => {
                    candidate.score > current.score
                        || (candidate.score == current.score && read_only && !current_read_only)
                }
            };
            if better {
                best = Some((candidate, read_only));
            }
        }
    }

    best.map(|(selection, _)| selection)
}

/// Module references worth fetching for `goal`, most relevant first.
///
/// When none of them looks relevant every module is returned in document
/// order, since a module's description may not mention all its actions.
pub fn rank_modules<'a>(goal: &str, modules: &'a [ModuleRef]) -> Vec<&'a ModuleRef> {
    let goal_tokens = tokenize(goal);
    let mut scored: Vec<(u32, usize, &ModuleRef)> = modules
        .iter()
        .enumerate()
        .map(|(i, m)| (score(&goal_tokens, &m.id, &m.description), i, m))
        .filter(|(s, _, _)| *s > 0)
        .collect();

    if scored.is_empty() {
        return modules.iter().collect();
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, m)| m).collect()
}

/// Character-level similarity between two strings, 0.0 to 1.0.
///
/// `2 * LCS / (len_a + len_b)`, a simplified `SequenceMatcher.ratio()`.
fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let len_a = a_chars.len();
    let len_b = b_chars.len();

    let mut dp = vec![vec![0u32; len_b + 1]; len_a + 1];
    for i in 1..=len_a {
        for j in 1..=len_b {
            if a_chars[i - 1] == b_chars[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    let lcs = dp[len_a][len_b] as f64;
    2.0 * lcs / (len_a + len_b) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::Catalog;

    fn booking() -> Vec<ModuleDocument> {
        vec![Catalog::hotel("Example Hotel")
            .module("booking", "http://hotel.test")
            .unwrap()]
    }

    fn selected(goal: &str) -> Option<String> {
        let modules = booking();
        select_action(goal, &modules).map(|s| modules[s.module].actions[s.action].name.clone())
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Find available rooms for next weekend");
        let expected: BTreeSet<String> = ["search", "available", "room", "next", "weekend"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tokens, expected);
        assert!(tokenize("search_rooms").contains("room"));
        assert!(tokenize("class").contains("class"));
    }

    #[test]
    fn test_find_available_rooms_selects_search_rooms() {
        assert_eq!(
            selected("Find available rooms for next weekend").as_deref(),
            Some("search_rooms")
        );
    }

    #[test]
    fn test_other_intents() {
        assert_eq!(selected("List all rooms").as_deref(), Some("list_rooms"));
        assert_eq!(
            selected("Book room-101 for Ada Lovelace next weekend").as_deref(),
            Some("create_booking")
        );
        assert_eq!(
            selected("Please cancel my booking 3f2504e0-4f89-11d3-9a0c-0305e82c3301").as_deref(),
            Some("cancel_booking")
        );
        assert_eq!(selected("Any vacancies? check availability").as_deref(), Some("search_rooms"));
    }

    #[test]
    fn test_typo_still_matches() {
        assert_eq!(selected("serch rooms").as_deref(), Some("search_rooms"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(selected("Order a pizza with extra cheese"), None);
        assert_eq!(selected(""), None);
    }

    #[test]
    fn test_tie_prefers_read_only() {
        // "room" hits list_rooms and search_rooms equally; both read-only, first wins.
        assert_eq!(selected("rooms").as_deref(), Some("list_rooms"));
        // "booking" hits create_booking and cancel_booking; neither is read-only.
        assert_eq!(selected("booking").as_deref(), Some("create_booking"));
    }

    #[test]
    fn test_rank_modules() {
        let modules = vec![
            ModuleRef {
                id: "spa".into(),
                description: "Massage and sauna appointments".into(),
                href: "http://h/.well-known/spa.json".into(),
            },
            ModuleRef {
                id: "booking".into(),
                description: "Room availability and booking".into(),
                href: "http://h/.well-known/booking.json".into(),
            },
        ];
        let ranked = rank_modules("Find available rooms for next weekend", &modules);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "booking");

        let ranked = rank_modules("Order a pizza", &modules);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "spa");
    }

    #[test]
    fn test_similarity_ratio() {
        assert!((similarity_ratio("hello", "hello") - 1.0).abs() < f64::EPSILON);
        assert!(similarity_ratio("", "hello").abs() < f64::EPSILON);
        assert!(similarity_ratio("search", "serch") > FUZZY_THRESHOLD);
        assert!(similarity_ratio("search", "zzzzzzz") < 0.5);
    }
}
