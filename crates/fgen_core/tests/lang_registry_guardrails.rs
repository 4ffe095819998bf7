use std::collections::HashMap;

use fgen_core::lang::keywords;
use fgen_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            keywords::as_str(info.id),
            info.canonical,
            "keyword as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn keyword_spellings_are_identifier_shaped() {
    for info in keywords::KEYWORDS {
        assert!(
            info.canonical.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "keyword {:?} would never lex as a single word",
            info.canonical
        );
    }
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for info in punctuation::PUNCTUATION {
        assert_eq!(
            punctuation::from_str(info.canonical),
            Some(info.id),
            "punctuation canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            punctuation::as_str(info.id),
            info.canonical,
            "punctuation as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate punctuation spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn multi_char_punctuation_starts_with_registered_char() {
    // The segmenter matches the longest spelling first, so every multi-character spelling must begin with a
    // character that is itself punctuation.
    for info in punctuation::PUNCTUATION {
        if info.canonical.len() > 1 {
            let first = info.canonical.chars().next().unwrap();
            assert!(
                punctuation::from_char(first).is_some(),
                "{:?} starts with an unregistered character",
                info.canonical
            );
        }
    }
}
