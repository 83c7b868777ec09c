pub mod loader;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 前缀匹配固定取成语的前 3 个字符
pub const PREFIX_CHARS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Idiom {
    pub word: String,
    pub pinyin: String,
    pub explanation: String,
    pub derivation: String,
    pub example: String,
    pub abbreviation: String,
}

/// 启动时构建、之后只读的成语目录
#[derive(Debug, Default)]
pub struct IdiomCatalog {
    index: HashMap<String, Idiom>,
    words: Vec<String>,
    by_head: HashMap<String, Vec<usize>>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    pub skipped_empty: usize,
    pub duplicates: usize,
}

impl IdiomCatalog {
    pub fn from_records(records: Vec<Idiom>) -> Self {
        Self::build(records).0
    }

    /// Duplicate words collapse to the last record seen.
    pub fn build(records: Vec<Idiom>) -> (Self, BuildStats) {
        let mut stats = BuildStats {
            records: records.len(),
            ..BuildStats::default()
        };

        let mut index: HashMap<String, Idiom> = HashMap::with_capacity(records.len());
        for idiom in records {
            if idiom.word.is_empty() {
                stats.skipped_empty += 1;
                continue;
            }
            if index.insert(idiom.word.clone(), idiom).is_some() {
                stats.duplicates += 1;
            }
        }

        let words: Vec<String> = index.keys().cloned().collect();

        let mut by_head: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, word) in words.iter().enumerate() {
            if let Some(head) = leading_chars(word, PREFIX_CHARS) {
                by_head.entry(head.to_string()).or_default().push(pos);
            }
        }

        (
            Self {
                index,
                words,
                by_head,
            },
            stats,
        )
    }

    /// 返回前 3 个字符与 `prefix` 完全相同的成语，顺序与词表一致
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<String> {
        match self.by_head.get(prefix) {
            Some(positions) => positions
                .iter()
                .map(|&pos| self.words[pos].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn get_detail(&self, word: &str) -> Option<&Idiom> {
        self.index.get(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Returns the first `n` characters of `s`, or `None` when `s` is shorter.
pub fn leading_chars(s: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return Some("");
    }
    let mut indices = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()));
    indices.nth(n).map(|end| &s[..end])
}

/// 单个成语的前缀判断，结果与 `find_by_prefix` 一致
pub fn head_matches(word: &str, prefix: &str) -> bool {
    leading_chars(word, PREFIX_CHARS).is_some_and(|head| head == prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idiom(word: &str, pinyin: &str) -> Idiom {
        Idiom {
            word: word.to_string(),
            pinyin: pinyin.to_string(),
            ..Idiom::default()
        }
    }

    fn sample() -> IdiomCatalog {
        IdiomCatalog::from_records(vec![
            idiom("一马当先", "yī mǎ dāng xiān"),
            idiom("一马平川", "yī mǎ píng chuān"),
            idiom("二三其德", "èr sān qí dé"),
        ])
    }

    #[test]
    fn leading_chars_counts_characters_not_bytes() {
        assert_eq!(leading_chars("一马当先", 3), Some("一马当"));
        assert_eq!(leading_chars("abc", 3), Some("abc"));
        assert_eq!(leading_chars("一马", 3), None);
        assert_eq!(leading_chars("", 3), None);
        assert_eq!(leading_chars("", 0), Some(""));
    }

    #[test]
    fn prefix_match_is_exact_three_characters() {
        let catalog = sample();
        assert_eq!(catalog.find_by_prefix("一马当"), vec!["一马当先".to_string()]);

        let mut both = catalog.find_by_prefix("一马平");
        both.extend(catalog.find_by_prefix("一马当"));
        both.sort();
        assert_eq!(both, vec!["一马平川".to_string(), "一马当先".to_string()]);

        assert!(catalog.find_by_prefix("一马").is_empty());
        assert!(catalog.find_by_prefix("一").is_empty());
        assert!(catalog.find_by_prefix("一马当先").is_empty());
    }

    #[test]
    fn short_words_and_prefixes_never_match() {
        let catalog =
            IdiomCatalog::from_records(vec![idiom("一", ""), idiom("ab", ""), idiom("abcd", "")]);
        assert_eq!(catalog.find_by_prefix("abc"), vec!["abcd".to_string()]);
        assert!(catalog.find_by_prefix("").is_empty());
        assert!(catalog.find_by_prefix("ab").is_empty());
        assert!(!head_matches("ab", "ab"));
    }

    #[test]
    fn three_character_word_matches_itself() {
        let catalog = IdiomCatalog::from_records(vec![idiom("莫须有", "mò xū yǒu")]);
        assert_eq!(catalog.find_by_prefix("莫须有"), vec!["莫须有".to_string()]);
    }

    #[test]
    fn detail_lookup_returns_record_or_none() {
        let catalog = sample();
        let detail = catalog.get_detail("一马平川").expect("known word");
        assert_eq!(detail.pinyin, "yī mǎ píng chuān");
        assert!(catalog.get_detail("不存在").is_none());
        assert!(catalog.get_detail("").is_none());
    }

    #[test]
    fn duplicate_words_keep_last_record() {
        let (catalog, stats) =
            IdiomCatalog::build(vec![idiom("重复", "first"), idiom("重复", "second")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.words().len(), 1);
        assert_eq!(catalog.get_detail("重复").unwrap().pinyin, "second");
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn empty_words_are_skipped() {
        let (catalog, stats) = IdiomCatalog::build(vec![idiom("", "x"), idiom("一马当先", "")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(stats.skipped_empty, 1);
        assert!(catalog.get_detail("").is_none());
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let parsed: Idiom = serde_json::from_str(r#"{"word":"一马当先"}"#).unwrap();
        assert_eq!(parsed.word, "一马当先");
        assert!(parsed.explanation.is_empty());
        assert!(parsed.abbreviation.is_empty());
    }

    #[test]
    fn empty_catalog_answers_empty() {
        let catalog = IdiomCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.find_by_prefix("一马当").is_empty());
        assert!(catalog.get_detail("一马当先").is_none());
    }
}
