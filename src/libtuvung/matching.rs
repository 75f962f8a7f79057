use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Similarity at or above this accepts an answer against a synonym.
pub const SYNONYM_THRESHOLD: f64 = 0.75;

/// Prepares a string for comparison: trim, lowercase, fold diacritics.
///
/// The stroke letter đ does not decompose into a base letter plus a
/// combining mark, so it gets substituted before NFD. Lowercasing first
/// covers Đ as well. Both the user's answer and every candidate string
/// must go through this before any comparison.
pub fn normalize_for_matching(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace('đ', "d")
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Similarity ratio in [0, 1] between two strings, based on the length of
/// their longest common subsequence: `2 * lcs / (len_a + len_b)`. Two empty
/// strings are identical, ratio 1.0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    // One-row DP over the LCS table.
    let mut row = vec![0usize; b.len() + 1];
    for ca in &a {
        let mut prev_diag = 0;
        for (j, cb) in b.iter().enumerate() {
            let prev_row = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag + 1
            } else {
                row[j + 1].max(row[j])
            };
            prev_diag = prev_row;
        }
    }
    let lcs = row[b.len()];

    2.0 * lcs as f64 / (a.len() + b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for s in ["Hà Nội", "  Đặc biệt  ", "straße", "café", "plain"] {
            let once = normalize_for_matching(s);
            assert_eq!(normalize_for_matching(&once), once);
        }
    }

    #[test]
    fn normalize_strips_marks_and_strokes() {
        for s in ["Hà Nội", "Đặc biệt", "đường", "ĐÀ NẴNG"] {
            let folded = normalize_for_matching(s);
            assert!(!folded.chars().any(is_combining_mark), "marks in {folded:?}");
            assert!(!folded.contains(['đ', 'Đ']), "stroke in {folded:?}");
        }
        assert_eq!(normalize_for_matching("Hà Nội"), "ha noi");
        assert_eq!(normalize_for_matching("Đặc biệt"), "dac biet");
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_for_matching("  Hello World  "), "hello world");
        assert_eq!(normalize_for_matching(""), "");
    }

    #[test]
    fn ratio_identical_and_disjoint() {
        assert_eq!(similarity_ratio("glad", "glad"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn ratio_counts_subsequences() {
        // lcs("galad", "glad") = 4 -> 8/9
        let ratio = similarity_ratio("galad", "glad");
        assert!((ratio - 8.0 / 9.0).abs() < 1e-9);
        // lcs("sad", "glad") = 2 -> 4/7
        let ratio = similarity_ratio("sad", "glad");
        assert!((ratio - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_threshold_is_inclusive() {
        // lcs("abc", "abcde") = 3 -> 6/8 = 0.75 exactly
        let ratio = similarity_ratio("abc", "abcde");
        assert_eq!(ratio, SYNONYM_THRESHOLD);
        assert!(ratio >= SYNONYM_THRESHOLD);
    }
}
