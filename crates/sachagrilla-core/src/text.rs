//! Text normalization and quote splitting.
//!
//! Both functions are pure and total: any input string is accepted and no
//! error path exists. Everything downstream (matching, rendering checks)
//! compares letters only after they went through [`normalize`].

/// Canonicalizes raw text into a comparable letter stream.
///
/// Lowercases the input, maps accented vowels to their unaccented form
/// (including `ü` to `u`) and strips `, . : ;`. Other punctuation and
/// whitespace are kept; callers strip whitespace separately. `ñ` is a
/// letter in its own right and survives untouched.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => Some('a'),
            'è' | 'é' | 'ê' | 'ë' => Some('e'),
            'ì' | 'í' | 'î' | 'ï' => Some('i'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => Some('o'),
            'ù' | 'ú' | 'û' | 'ü' => Some('u'),
            ',' | '.' | ':' | ';' => None,
            other => Some(other),
        })
        .collect()
}

/// Splits a quotation into its two letter halves.
///
/// The quote is normalized and all whitespace removed; the split point is
/// `n / 2` for even length and `ceil(n / 2)` for odd, so on odd lengths
/// the first half is the longer one by exactly one character. Empty input
/// yields two empty halves.
pub fn split_quote(quote: &str) -> (String, String) {
    let stripped: Vec<char> = normalize(quote)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let n = stripped.len();
    let cut = if n % 2 == 0 { n / 2 } else { n / 2 + 1 };
    let half_a: String = stripped[..cut].iter().collect();
    let half_b: String = stripped[cut..].iter().collect();
    (half_a, half_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_lowercases_and_deaccents() {
        assert_eq!(normalize("Árbol"), "arbol");
        assert_eq!(normalize("CAMIÓN"), "camion");
        assert_eq!(normalize("pingüino"), "pinguino");
        // Uppercase accented vowels lowercase first, then lose the accent.
        assert_eq!(normalize("ÉXITO"), "exito");
    }

    #[test]
    fn test_normalize_strips_only_listed_punctuation() {
        assert_eq!(normalize("hola, mundo. cruel: fin;"), "hola mundo cruel fin");
        // Question marks, quotes and dashes are kept.
        assert_eq!(normalize("¿Qué?"), "¿que?");
        assert_eq!(normalize("\"así\" - dijo"), "\"asi\" - dijo");
    }

    #[test]
    fn test_normalize_keeps_enie() {
        assert_eq!(normalize("ÑANDÚ"), "ñandu");
    }

    #[test]
    fn test_split_even_length() {
        // "hola mundo cruel" strips to "holamundocruel", 14 letters.
        let (a, b) = split_quote("hola mundo cruel");
        assert_eq!(a, "holamun");
        assert_eq!(b, "docruel");
    }

    #[test]
    fn test_split_odd_length_first_half_longer() {
        let (a, b) = split_quote("cielo");
        assert_eq!(a, "cie");
        assert_eq!(b, "lo");
    }

    #[test]
    fn test_split_empty_and_single() {
        assert_eq!(split_quote(""), (String::new(), String::new()));
        assert_eq!(split_quote("a"), ("a".to_string(), String::new()));
    }

    #[test]
    fn test_split_strips_all_whitespace_kinds() {
        // Non-breaking space and tab count as whitespace too.
        let (a, b) = split_quote("ab\u{a0}cd\tef");
        assert_eq!(format!("{a}{b}"), "abcdef");
    }

    proptest! {
        #[test]
        fn prop_halves_concatenate_to_stripped_input(input in ".{0,60}") {
            let (a, b) = split_quote(&input);
            let stripped: String = normalize(&input)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            prop_assert_eq!(format!("{a}{b}"), stripped);
        }

        #[test]
        fn prop_first_half_longer_only_on_odd(input in ".{0,60}") {
            let (a, b) = split_quote(&input);
            let (la, lb) = (a.chars().count(), b.chars().count());
            prop_assert!(la >= lb);
            prop_assert!(la - lb <= 1);
            // Equal halves exactly when the stripped length is even.
            prop_assert_eq!(la == lb, (la + lb) % 2 == 0);
        }
    }
}
