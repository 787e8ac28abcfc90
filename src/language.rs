//! Language suggestions for new snippets
//!
//! When a snippet is added, the language picker lists the languages whose
//! name or description appears in the title first. A whole-word hit on
//! the name dominates, a plain substring hit on a longer name counts for
//! less, and a description word found in the title only breaks ties.

use crate::model::Language;
use regex::Regex;
use std::cmp::Reverse;

/// Names shorter than this only count as whole words ("c" in "code")
const MIN_SUBSTRING_LEN: usize = 3;
/// Description words shorter than this are ignored
const MIN_DESCRIPTION_WORD_LEN: usize = 3;

fn whole_word(word: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(word))).ok()
}

fn contains_word(haystack: &str, word: &str) -> bool {
    whole_word(word).is_some_and(|re| re.is_match(haystack))
}

/// Relevance of `language` for a snippet titled `title`; 0 means no hit
#[must_use]
pub fn match_score(language: &Language, title: &str) -> usize {
    let title = title.to_lowercase();
    let name = language.name.to_lowercase();

    let mut score = 0;
    if !name.is_empty() {
        if contains_word(&title, &name) {
            score += name.len() * 100;
        } else if name.len() >= MIN_SUBSTRING_LEN && title.contains(&name) {
            score += name.len() * 10;
        }
    }

    let description = language.description.to_lowercase();
    let longest = description
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() >= MIN_DESCRIPTION_WORD_LEN)
        .filter(|word| contains_word(&title, word))
        .map(str::len)
        .max()
        .unwrap_or(0);

    score + longest
}

/// Order languages for the picker: matches by score, then the rest
///
/// Within both groups, more used languages come first and names break
/// the remaining ties.
#[must_use]
pub fn rank_languages<'a>(languages: &'a [Language], title: &str) -> Vec<&'a Language> {
    let (mut matches, mut others): (Vec<_>, Vec<_>) = languages
        .iter()
        .map(|language| (match_score(language, title), language))
        .partition(|(score, _)| *score > 0);

    matches.sort_by_key(|(score, l)| {
        (Reverse(*score), Reverse(l.snippet_count), l.name.to_lowercase())
    });
    others.sort_by_key(|(_, l)| (Reverse(l.snippet_count), l.name.to_lowercase()));

    matches
        .into_iter()
        .chain(others)
        .map(|(_, language)| language)
        .collect()
}

/// One picker row: upper-cased name, description and usage count
#[must_use]
pub fn picker_label(language: &Language) -> String {
    format!(
        "{:<10}  {:<45}  [{:>3}]",
        language.name.to_uppercase(),
        language.description,
        language.snippet_count
    )
}
