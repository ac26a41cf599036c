//! Topic extraction from article text.
//!
//! Topics are the most frequent content words and two-word phrases in a text.
//! The extractor:
//!
//! 1. lowercases and tokenizes the text, dropping tokens that are not purely
//!    alphanumeric (punctuation, hyphenated compounds, decimals) and English
//!    plus news-domain stopwords
//! 2. counts single words longer than 3 characters
//! 3. counts adjacent word pairs where both words are longer than 3
//!    characters, each occurrence weighted 2×
//! 4. ranks all candidates by weighted frequency (ties keep first-seen order)
//!    and greedily admits a candidate only if it neither contains nor is
//!    contained in an already admitted topic
//!
//! Extraction never fails; text that yields no candidates yields no topics.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

use crate::models::Article;

/// Words shorter than or equal to this many characters are never topics.
const MIN_WORD_LEN: usize = 3;

/// Bigram occurrences count this many times a unigram occurrence.
const BIGRAM_WEIGHT: usize = 2;

/// Standard English stopwords.
static ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Words too generic in business news to carry a topic.
static NEWS_STOPWORDS: &[&str] = &[
    "said", "says", "reported", "according", "company", "companies", "business",
];

static DEFAULT_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_STOPWORDS
        .iter()
        .chain(NEWS_STOPWORDS.iter())
        .copied()
        .collect()
});

/// Clitics split off a word the way a treebank tokenizer does ("acme's" →
/// "acme" + "'s", "don't" → "do" + "n't").
static CLITIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<stem>.+?)(?:n't|'s|'re|'ve|'ll|'d|'m|’s|n’t)$").expect("valid clitic pattern")
});

/// Symbols a treebank tokenizer always splits into their own token.
const SPLIT_SYMBOLS: &[char] = &[';', '@', '#', '$', '%', '&'];

/// Put whitespace around the punctuation that separates words even without
/// spaces: the symbols above, and commas or colons not followed by a digit
/// (so `15,000` and `10:30` stay whole).
fn pad_punctuation(text: &str) -> String {
    let mut padded = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let splits = SPLIT_SYMBOLS.contains(&c)
            || (matches!(c, ',' | ':') && !chars.peek().is_some_and(|n| n.is_ascii_digit()));
        if splits {
            padded.push(' ');
            padded.push(c);
            padded.push(' ');
        } else {
            padded.push(c);
        }
    }
    padded
}

/// Lowercase `text` and split it into word tokens, approximating the Penn
/// Treebank rules.
///
/// # Arguments
///
/// * `text` - Raw article text, any case and punctuation.
///
/// # Returns
///
/// Word tokens in text order. Symbols such as `&` and unspaced commas split
/// words apart (`at&t` becomes `at`, `t`). Surrounding punctuation is
/// stripped and trailing clitics are split off and dropped, since they are
/// never alphanumeric. Anything else is kept as-is, so `year-over-year` or
/// `3.5` survive here and are rejected by the alphanumeric check in the
/// extractor.
///
/// Unlike a treebank tokenizer with a sentence splitter, an abbreviation
/// period is always stripped: `inc.` mid-sentence yields `inc` rather than a
/// non-alphanumeric `inc.` token. Such words are 3 characters or shorter in
/// practice, so they never become topics, but they do sit between their
/// neighbours and keep them from forming a bigram.
pub fn tokenize(text: &str) -> Vec<String> {
    pad_punctuation(&text.to_lowercase())
        .split_whitespace()
        .filter_map(|chunk| {
            let trimmed = chunk.trim_matches(|c: char| !c.is_alphanumeric());
            if trimmed.is_empty() {
                return None;
            }
            let word = match CLITIC.captures(trimmed) {
                Some(caps) => caps.name("stem").map_or(trimmed, |m| m.as_str()),
                None => trimmed,
            };
            Some(word.to_string())
        })
        .collect()
}

/// Ranks salient words and phrases; the stopword set is read-only after
/// construction.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    stopwords: HashSet<String>,
    max_topics: usize,
}

impl TopicExtractor {
    /// An extractor with the default stopwords that keeps up to 5 topics.
    pub fn new() -> Self {
        Self::with_max_topics(5)
    }

    pub fn with_max_topics(max_topics: usize) -> Self {
        Self {
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            max_topics,
        }
    }

    /// Add custom stopwords.
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    pub fn max_topics(&self) -> usize {
        self.max_topics
    }

    /// Tokens of `text` that are purely alphanumeric and not stopwords, in
    /// text order.
    fn content_words(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|w| w.chars().all(char::is_alphanumeric))
            .filter(|w| !self.stopwords.contains(w))
            .collect()
    }

    /// Weighted candidate frequencies in first-seen order: all unigrams, then
    /// all bigrams.
    fn candidate_frequencies(words: &[String]) -> Vec<(String, usize)> {
        let mut table: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut bump = |key: String, weight: usize| match index.get(&key) {
            Some(&slot) => table[slot].1 += weight,
            None => {
                index.insert(key.clone(), table.len());
                table.push((key, weight));
            }
        };

        for word in words.iter().filter(|w| w.chars().count() > MIN_WORD_LEN) {
            bump(word.clone(), 1);
        }
        for pair in words.windows(2) {
            if pair.iter().all(|w| w.chars().count() > MIN_WORD_LEN) {
                bump(format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT);
            }
        }
        table
    }

    /// Extract up to `k` topics from `text`, most salient first.
    ///
    /// No returned topic is a substring of another.
    pub fn extract_topics_k(&self, text: &str, k: usize) -> Vec<String> {
        if k == 0 {
            return Vec::new();
        }
        let words = self.content_words(text);
        let mut ranked = Self::candidate_frequencies(&words);
        // stable: equal weights keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut topics: Vec<String> = Vec::with_capacity(k);
        for (candidate, _) in ranked {
            let overlaps = topics
                .iter()
                .any(|t| t.contains(candidate.as_str()) || candidate.contains(t.as_str()));
            if !overlaps {
                topics.push(candidate);
                if topics.len() >= k {
                    break;
                }
            }
        }
        debug!(count = topics.len(), ?topics, "Extracted topics");
        topics
    }

    /// Extract up to the configured number of topics from `text`.
    pub fn extract_topics(&self, text: &str) -> Vec<String> {
        self.extract_topics_k(text, self.max_topics)
    }

    /// Extract topics from an article's title and summary and record them on
    /// the article.
    #[instrument(level = "debug", skip_all, fields(title = %article.title))]
    pub fn extract_article_topics(&self, article: &mut Article) {
        article.topics = self.extract_topics(&article.analysis_text());
    }
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}
