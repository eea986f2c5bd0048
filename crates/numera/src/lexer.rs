//! Table-driven lexer.
//!
//! Splits text into word, digit-run and single-character tokens and tags each
//! with the categories and values found in the locale table. Lookup order for
//! a word is: exact folded key, the key with a plural ending removed, the
//! compound-word table, and finally the generic ordinal suffix rule.

use std::collections::HashMap;

use tracing::trace;

use crate::config::LocaleConfig;
use crate::duration::DurationUnit;
use crate::error::{NumeraError, Result};
use crate::numeral::Numeral;
use crate::token::{Category, Token};

/// Categories an ordinal built by the suffix rule inherits from its cardinal.
const MAGNITUDE_CATEGORIES: Category = Category::DIGIT
    .union(Category::TEEN)
    .union(Category::TENS)
    .union(Category::HUNDRED)
    .union(Category::GROUPING);

#[derive(Debug, Clone, Default)]
struct Entry {
    categories: Category,
    number: Option<Numeral>,
    unit: Option<DurationUnit>,
}

#[derive(Debug, Clone)]
pub struct Lexer {
    spaces: Vec<char>,
    characters_as_word: Vec<char>,
    plural_endings: Vec<String>,
    ordinal_suffixes: Vec<String>,
    stem_completions: Vec<String>,
    compounds: HashMap<String, Vec<String>>,
    entries: HashMap<String, Entry>,
}

impl Lexer {
    /// Compiles a locale table.
    ///
    /// # Errors
    ///
    /// Returns [`NumeraError::UnknownCategory`] if the table names a
    /// category that does not exist.
    pub fn new(config: &LocaleConfig) -> Result<Self> {
        let category_named = |name: &str| {
            Category::from_table_name(name).ok_or_else(|| NumeraError::UnknownCategory {
                locale: config.locale.clone(),
                name: name.to_string(),
            })
        };

        let mut entries: HashMap<String, Entry> = HashMap::new();

        for (name, words) in &config.categories {
            let category = category_named(name)?;
            for word in words {
                entries.entry(fold(word)).or_default().categories |= category;
            }
        }

        for number in &config.numbers {
            let mut categories = Category::empty();
            for name in &number.categories {
                categories |= category_named(name)?;
            }
            if number.ordinal {
                categories |= Category::ORDINAL;
            }
            let numeral = number.value.to_numeral(number.ordinal);
            for word in &number.words {
                let entry = entries.entry(fold(word)).or_default();
                entry.categories |= categories;
                entry.number.get_or_insert(numeral);
            }
        }

        for duration in &config.durations {
            let words = duration.words.iter().map(|w| (w, Category::DURATION));
            let restricted = duration.restricted.iter().map(|w| {
                (
                    w,
                    Category::DURATION | Category::DURATION_RESTRICTED_AFTER_NUMBER,
                )
            });
            for (word, categories) in words.chain(restricted) {
                let entry = entries.entry(fold(word)).or_default();
                entry.categories |= categories;
                entry.unit.get_or_insert(duration.unit);
            }
        }

        let mut ordinal_suffixes: Vec<String> =
            config.ordinal_suffixes.iter().map(|s| fold(s)).collect();
        ordinal_suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));

        trace!(
            locale = %config.locale,
            words = entries.len(),
            compounds = config.compound_words.len(),
            "compiled locale table"
        );

        Ok(Self {
            spaces: config.spaces.chars().collect(),
            characters_as_word: config.characters_as_word.chars().collect(),
            plural_endings: config.plural_endings.iter().map(|s| fold(s)).collect(),
            ordinal_suffixes,
            stem_completions: config.ordinal_stem_completions.iter().map(|s| fold(s)).collect(),
            compounds: config
                .compound_words
                .iter()
                .map(|(word, pieces)| (fold(word), pieces.iter().map(|p| fold(p)).collect()))
                .collect(),
            entries,
        })
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word: Option<(usize, bool)> = None;

        for (index, c) in text.char_indices() {
            let is_space = c.is_whitespace() || self.spaces.contains(&c);
            let is_single = !is_space && self.characters_as_word.contains(&c);
            let kind_changes = word.is_some_and(|(_, digits)| digits != c.is_ascii_digit());

            if is_space || is_single || kind_changes {
                if let Some((start, _)) = word.take() {
                    self.push_word(text, start, index, &mut tokens);
                }
            }

            if is_single {
                self.push_word(text, index, index + c.len_utf8(), &mut tokens);
            } else if !is_space && word.is_none() {
                word = Some((index, c.is_ascii_digit()));
            }
        }
        if let Some((start, _)) = word {
            self.push_word(text, start, text.len(), &mut tokens);
        }
        detach_ordinal_suffixes(&mut tokens);
        tokens
    }

    fn push_word(&self, text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
        let value = &text[start..end];
        let key = fold(value);
        let token = |value: &str, key: String, entry: Entry| Token {
            value: value.to_string(),
            key,
            start,
            end,
            categories: entry.categories,
            number: entry.number,
            unit: entry.unit,
        };

        if value.bytes().all(|b| b.is_ascii_digit()) {
            let number = value
                .parse::<i64>()
                .map(Numeral::integer)
                .or_else(|_| value.parse::<f64>().map(Numeral::decimal))
                .ok();
            tokens.push(token(
                value,
                key,
                Entry {
                    categories: Category::NUMBER | Category::RAW,
                    number,
                    unit: None,
                },
            ));
            return;
        }

        if let Some(entry) = self.lookup(&key) {
            tokens.push(token(value, key, entry));
            return;
        }

        if let Some(pieces) = self.compounds.get(&key) {
            for piece in pieces {
                let entry = self.lookup(piece).unwrap_or_default();
                tokens.push(token(piece.as_str(), piece.clone(), entry));
            }
            return;
        }

        let entry = self.ordinal_by_suffix(&key).unwrap_or_default();
        tokens.push(token(value, key, entry));
    }

    fn lookup(&self, key: &str) -> Option<Entry> {
        if let Some(entry) = self.entries.get(key) {
            return Some(entry.clone());
        }
        self.plural_endings
            .iter()
            .filter_map(|ending| key.strip_suffix(ending.as_str()))
            .filter(|stem| !stem.is_empty())
            .find_map(|stem| self.entries.get(stem).cloned())
    }

    /// "treceavo" is the 13th, "treintavos" the 30th: a known cardinal above
    /// two followed by an ordinal suffix, possibly missing its final vowel.
    fn ordinal_by_suffix(&self, key: &str) -> Option<Entry> {
        for suffix in &self.ordinal_suffixes {
            let Some(stem) = key.strip_suffix(suffix.as_str()) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let candidates = std::iter::once(stem.to_string())
                .chain(self.stem_completions.iter().map(|c| format!("{stem}{c}")));
            for candidate in candidates {
                let Some(entry) = self.entries.get(&candidate) else {
                    continue;
                };
                let cardinal = entry
                    .number
                    .filter(|n| n.is_integer() && !n.is_ordinal() && n.more_than(2));
                if let Some(n) = cardinal {
                    if entry.categories.contains(Category::NUMBER) {
                        return Some(Entry {
                            categories: (entry.categories & MAGNITUDE_CATEGORIES)
                                | Category::NUMBER
                                | Category::ORDINAL,
                            number: Some(n.with_ordinal(true)),
                            unit: None,
                        });
                    }
                }
            }
        }
        None
    }
}

/// Lowercases and strips acute, grave, circumflex and diaeresis accents from
/// vowels. `ñ` is a distinct letter and is kept.
/// An ordinal suffix ("er", "º") only counts when glued to the digit run before it,
/// so "3 era" stays a number followed by a word.
fn detach_ordinal_suffixes(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if !tokens[i].has(Category::ORDINAL_SUFFIX) {
            continue;
        }
        let attached = i
            .checked_sub(1)
            .map(|prev| &tokens[prev])
            .is_some_and(|prev| prev.is_raw_number() && prev.end == tokens[i].start);
        if !attached {
            tokens[i].categories.remove(Category::ORDINAL_SUFFIX);
        }
    }
}

pub fn fold(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            c => c,
        })
        .collect()
}

/// Tokens of `text` under the embedded Spanish table.
#[cfg(test)]
pub(crate) fn spanish(text: &str) -> Vec<Token> {
    use std::sync::OnceLock;

    static LEXER: OnceLock<Lexer> = OnceLock::new();
    LEXER
        .get_or_init(|| Lexer::new(&LocaleConfig::spanish().unwrap()).unwrap())
        .tokenize(text)
}

// ── Tests ───────────────────────────────────────────────────────────────────
