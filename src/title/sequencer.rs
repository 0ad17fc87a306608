/// Entrance stagger between consecutive words, seconds.
pub const WORD_STAGGER: f64 = 0.1;
/// Entrance stagger between consecutive letters of a word, seconds.
pub const LETTER_STAGGER: f64 = 0.03;
/// Pulse phase contribution of the word index, seconds (wrapped to 1 s).
pub const PULSE_WORD_PHASE: f64 = 0.2;
/// Pulse phase contribution of the letter index, seconds (wrapped to 1 s).
pub const PULSE_LETTER_PHASE: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LetterUnit {
    pub character: char,
    pub word_index: usize,
    pub letter_index: usize,
    /// Seconds from mount before the entrance starts.
    pub reveal_delay: f64,
    /// Seconds from the phase flip before the first pulse.
    pub pulse_delay: f64,
}

impl LetterUnit {
    fn new(character: char, word_index: usize, letter_index: usize) -> Self {
        let (wi, li) = (word_index as f64, letter_index as f64);
        Self {
            character,
            word_index,
            letter_index,
            reveal_delay: wi * WORD_STAGGER + li * LETTER_STAGGER,
            pulse_delay: (wi * PULSE_WORD_PHASE + li * PULSE_LETTER_PHASE) % 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub index: usize,
    pub text: String,
    pub letters: Vec<LetterUnit>,
}

/// Split `title` into words on single spaces and words into letters.
///
/// Consecutive spaces keep an empty word in place so word indices (and hence
/// delays) follow the raw string. An empty title yields no words.
pub fn sequence(title: &str) -> Vec<Word> {
    if title.is_empty() {
        return Vec::new();
    }
    title
        .split(' ')
        .enumerate()
        .map(|(word_index, text)| Word {
            index: word_index,
            text: text.to_string(),
            letters: text
                .chars()
                .enumerate()
                .map(|(letter_index, c)| LetterUnit::new(c, word_index, letter_index))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_delays(word: &Word, want: &[f64]) {
        let got: Vec<f64> = word.letters.iter().map(|l| l.reveal_delay).collect();
        assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-9, "{got:?} != {want:?}");
        }
    }

    #[test]
    fn ai_router_example() {
        let words = sequence("AI Router");
        assert_eq!(words.len(), 2);

        let chars0: Vec<char> = words[0].letters.iter().map(|l| l.character).collect();
        assert_eq!(chars0, vec!['A', 'I']);
        assert_delays(&words[0], &[0.0, 0.03]);

        let chars1: Vec<char> = words[1].letters.iter().map(|l| l.character).collect();
        assert_eq!(chars1, vec!['R', 'o', 'u', 't', 'e', 'r']);
        assert_delays(&words[1], &[0.1, 0.13, 0.16, 0.19, 0.22, 0.25]);
    }

    #[test]
    fn letters_reconstruct_words() {
        for title in ["a b", "xRouter", "Route your way to the future", "héllo wörld"] {
            let words = sequence(title);
            assert_eq!(words.len(), title.split(' ').count());
            for (word, original) in words.iter().zip(title.split(' ')) {
                assert_eq!(word.letters.len(), original.chars().count());
                let rebuilt: String = word.letters.iter().map(|l| l.character).collect();
                assert_eq!(rebuilt, original);
                assert_eq!(word.text, original);
            }
        }
    }

    #[test]
    fn delays_increase_within_word_and_reset_per_word() {
        let words = sequence("alpha beta gamma");
        for word in &words {
            assert!((word.letters[0].reveal_delay - word.index as f64 * WORD_STAGGER).abs() < 1e-9);
            for w in word.letters.windows(2) {
                assert!(w[0].reveal_delay < w[1].reveal_delay);
                assert_eq!(w[0].word_index, word.index);
            }
        }
    }

    #[test]
    fn pulse_phase_wraps_to_one_second() {
        let words = sequence("abcdefghijklmnopqrstuvwxyz abc");
        for l in words.iter().flat_map(|w| &w.letters) {
            assert!((0.0..1.0).contains(&l.pulse_delay));
        }
        // 0.2 + 5 * 0.05 = 0.45; 20 * 0.05 = 1.0 wraps to 0.
        assert!((words[0].letters[20].pulse_delay - 0.0).abs() < 1e-9);
        let r = &sequence("AI Router")[1].letters[5];
        assert!((r.pulse_delay - 0.45).abs() < 1e-9);
    }

    #[test]
    fn empty_and_spacing_edge_cases() {
        assert!(sequence("").is_empty());

        let words = sequence("a  b");
        assert_eq!(words.len(), 3);
        assert!(words[1].letters.is_empty());
        assert_eq!(words[2].letters[0].word_index, 2);
        assert!((words[2].letters[0].reveal_delay - 0.2).abs() < 1e-9);
    }
}
