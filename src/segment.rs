use unicode_segmentation::UnicodeSegmentation;

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Rev", "Gen", "Sen", "Rep", "Gov", "Capt", "Lt", "Col",
    "Sgt", "St", "Mt", "vs", "e.g", "i.e", "cf", "approx",
];

/// Split `message` into sentences and keep those of at most `max_length`
/// characters, in original order. Longer sentences are dropped, not split.
///
/// Boundaries are UAX #29 sentence bounds, except that a bound right after
/// a title, abbreviation or single-letter initial is not a break.
pub fn chunks(message: &str, max_length: usize) -> Vec<&str> {
    sentences(message)
        .into_iter()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .filter(|sentence| {
            let len = sentence.chars().count();
            if len > max_length {
                tracing::debug!(
                    "Dropping sentence of {} chars (limit {})",
                    len,
                    max_length
                );
                return false;
            }
            true
        })
        .collect()
}

fn sentences(message: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut pending: Option<usize> = None;
    for (offset, piece) in message.split_sentence_bound_indices() {
        let begin = pending.unwrap_or(offset);
        if ends_with_abbreviation(piece.trim_end()) {
            pending = Some(begin);
            continue;
        }
        out.push(&message[begin..offset + piece.len()]);
        pending = None;
    }
    if let Some(begin) = pending {
        out.push(&message[begin..]);
    }
    out
}

fn ends_with_abbreviation(piece: &str) -> bool {
    let Some(head) = piece.strip_suffix('.') else {
        return false;
    };
    let word = head
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or(head)
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut letters = word.chars();
    let initial = matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase());
    initial || ABBREVIATIONS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_sentence_boundaries() {
        let got = chunks("Hello there. How are you? I am fine!", 100);
        assert_eq!(got, vec!["Hello there.", "How are you?", "I am fine!"]);
    }

    #[test]
    fn test_decimal_point_is_not_a_boundary() {
        let got = chunks("Pi is about 3.14 today. Really.", 100);
        assert_eq!(got, vec!["Pi is about 3.14 today.", "Really."]);
    }

    #[test]
    fn test_titles_stay_with_their_sentence() {
        let got = chunks("Dr. Smith arrived at 5 p.m. today. Then left.", 100);
        assert_eq!(got, vec!["Dr. Smith arrived at 5 p.m. today.", "Then left."]);

        let got = chunks("I met Mrs. Jones and J. Doe. They waved.", 100);
        assert_eq!(got, vec!["I met Mrs. Jones and J. Doe.", "They waved."]);
    }

    #[test]
    fn test_trailing_abbreviation_is_kept() {
        assert_eq!(chunks("Ask Dr.", 100), vec!["Ask Dr."]);
    }

    #[test]
    fn test_symbol_only_sentences_are_kept() {
        assert_eq!(chunks("?", 100), vec!["?"]);
        assert_eq!(chunks("👍", 100), vec!["👍"]);
        assert_eq!(chunks("...", 100), vec!["..."]);
    }

    #[test]
    fn test_drops_sentences_over_the_limit() {
        let got = chunks("Short one. This sentence is far too long to keep. Ok.", 10);
        assert_eq!(got, vec!["Short one.", "Ok."]);
    }

    #[test]
    fn test_limit_is_inclusive() {
        // "Exactly." is 8 characters
        assert_eq!(chunks("Exactly.", 8), vec!["Exactly."]);
        assert!(chunks("Exactly.", 7).is_empty());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert_eq!(chunks("éééé.", 5), vec!["éééé."]);
    }

    #[test]
    fn test_empty_message_has_no_chunks() {
        assert!(chunks("", 4096).is_empty());
        assert!(chunks("   ", 4096).is_empty());
    }
}
