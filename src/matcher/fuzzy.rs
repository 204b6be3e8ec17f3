// file: src/matcher/fuzzy.rs
// description: partial-ratio fuzzy string similarity on a 0-100 scale
// reference: https://docs.rs/strsim

/// Windows scoring at or above this ratio are treated as a perfect hit.
const PERFECT_WINDOW: f64 = 0.995;

/// Best-aligned substring similarity between `a` and `b`.
///
/// The shorter string is slid across the longer one; each equal-length window
/// is scored by normalized Levenshtein distance and the best window wins.
/// Returns 0 when either side is empty.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return 0;
    }

    let needle: String = short.iter().collect();
    let width = short.len();
    let mut window = String::with_capacity(needle.len());
    let mut best = 0.0_f64;

    for chars in long.windows(width) {
        window.clear();
        window.extend(chars);
        let ratio = strsim::normalized_levenshtein(&needle, &window);

        if ratio > best {
            best = ratio;
        }
        if best >= PERFECT_WINDOW {
            return 100;
        }
    }

    (best * 100.0).round() as u8
}
