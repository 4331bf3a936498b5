//! Spanish syllable division for the puzzle's syllable bank.
//!
//! The hint panel of a printed grid lists every syllable of every chosen
//! word, alphabetically sorted, so the solver can assemble answers from
//! parts. Division follows the standard Spanish rules: open vowels in
//! contact form a hiatus (own syllables), a weak vowel glues into a
//! diphthong unless it carries an accent, single consonants start the next
//! syllable, and consonant clusters split around the inseparable onsets
//! (pr, br, tr, dr, cr, gr, fr, pl, bl, cl, gl, fl) and the digraphs
//! ch, ll, rr.

fn is_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü'
    )
}

/// Open ("strong") vowels, accented or not.
fn is_open(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'o' | 'á' | 'é' | 'ó')
}

/// Accented weak vowels break diphthongs: pa-ís, ba-úl.
fn is_accented_weak(c: char) -> bool {
    matches!(c, 'í' | 'ú')
}

/// Two adjacent vowels that refuse to share a syllable.
fn is_hiatus(a: char, b: char) -> bool {
    let hiatus_maker = |c: char| is_open(c) || is_accented_weak(c);
    hiatus_maker(a) && hiatus_maker(b)
}

/// Consonant pairs that always travel together at a syllable start.
fn is_inseparable(a: char, b: char) -> bool {
    matches!(
        (a, b),
        ('p' | 'b' | 'f' | 'c' | 'g' | 'k', 'l' | 'r')
            | ('t' | 'd', 'r')
            | ('c', 'h')
            | ('l', 'l')
            | ('r', 'r')
    )
}

/// How many consonants of an intervocalic cluster stay with the previous
/// syllable as coda; the rest open the next one.
fn coda_len(cluster: &[char]) -> usize {
    match cluster.len() {
        0 | 1 => 0,
        2 => {
            if is_inseparable(cluster[0], cluster[1]) {
                0
            } else {
                1
            }
        }
        3 => {
            if is_inseparable(cluster[1], cluster[2]) {
                1
            } else {
                2
            }
        }
        _ => 2,
    }
}

/// Divides a word into its syllables.
///
/// The input is lowercased first; accents are kept because they decide
/// diphthong vs hiatus. A word without vowels comes back whole.
pub fn syllabify(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.to_lowercase().chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    // Runs of vowels and consonants, in order.
    let mut runs: Vec<(bool, Vec<char>)> = Vec::new();
    for &c in &chars {
        let v = is_vowel(c);
        match runs.last_mut() {
            Some((run_is_vowel, run)) if *run_is_vowel == v => run.push(c),
            _ => runs.push((v, vec![c])),
        }
    }

    // Vowel runs split at hiatus boundaries become nuclei; consonant runs
    // are clusters waiting to be distributed.
    enum Piece {
        Nucleus(Vec<char>),
        Cluster(Vec<char>),
    }
    let mut pieces: Vec<Piece> = Vec::new();
    for (run_is_vowel, run) in runs {
        if !run_is_vowel {
            pieces.push(Piece::Cluster(run));
            continue;
        }
        let mut nucleus = vec![run[0]];
        for pair in run.windows(2) {
            if is_hiatus(pair[0], pair[1]) {
                pieces.push(Piece::Nucleus(nucleus));
                nucleus = vec![pair[1]];
            } else {
                nucleus.push(pair[1]);
            }
        }
        pieces.push(Piece::Nucleus(nucleus));
    }

    let nucleus_total = pieces
        .iter()
        .filter(|p| matches!(p, Piece::Nucleus(_)))
        .count();
    if nucleus_total == 0 {
        return vec![chars.into_iter().collect()];
    }

    // One syllable per nucleus; clusters attach as coda of the previous
    // syllable and onset of the next.
    let mut onsets: Vec<Vec<char>> = vec![Vec::new(); nucleus_total];
    let mut nuclei: Vec<Vec<char>> = Vec::with_capacity(nucleus_total);
    let mut codas: Vec<Vec<char>> = vec![Vec::new(); nucleus_total];

    let mut seen = 0;
    for piece in pieces {
        match piece {
            Piece::Nucleus(run) => {
                nuclei.push(run);
                seen += 1;
            }
            Piece::Cluster(run) => {
                if seen == 0 {
                    // Word-initial consonants all open the first syllable.
                    onsets[0] = run;
                } else if seen == nucleus_total {
                    // Word-final consonants all close the last syllable.
                    codas[seen - 1] = run;
                } else {
                    let cut = coda_len(&run);
                    codas[seen - 1] = run[..cut].to_vec();
                    onsets[seen] = run[cut..].to_vec();
                }
            }
        }
    }

    (0..nucleus_total)
        .map(|k| {
            onsets[k]
                .iter()
                .chain(nuclei[k].iter())
                .chain(codas[k].iter())
                .collect()
        })
        .collect()
}

/// The syllable bank of a whole grid: every syllable of every word,
/// alphabetically sorted (duplicates kept) and comma-joined.
pub fn all_syllables<S: AsRef<str>>(words: &[S]) -> String {
    let mut syllables: Vec<String> = words
        .iter()
        .flat_map(|word| syllabify(word.as_ref()))
        .collect();
    syllables.sort();
    syllables.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(word: &str) -> Vec<String> {
        syllabify(word)
    }

    #[test]
    fn test_digraphs_stay_whole() {
        assert_eq!(parts("perro"), ["pe", "rro"]);
        assert_eq!(parts("calle"), ["ca", "lle"]);
        assert_eq!(parts("chancho"), ["chan", "cho"]);
    }

    #[test]
    fn test_single_consonant_opens_next_syllable() {
        assert_eq!(parts("casa"), ["ca", "sa"]);
        assert_eq!(parts("agua"), ["a", "gua"]);
    }

    #[test]
    fn test_inseparable_onset_clusters() {
        assert_eq!(parts("libro"), ["li", "bro"]);
        assert_eq!(parts("maestro"), ["ma", "es", "tro"]);
    }

    #[test]
    fn test_cluster_distribution() {
        assert_eq!(parts("transporte"), ["trans", "por", "te"]);
        assert_eq!(parts("constante"), ["cons", "tan", "te"]);
    }

    #[test]
    fn test_diphthongs_and_hiatus() {
        assert_eq!(parts("aire"), ["ai", "re"]);
        assert_eq!(parts("ciudad"), ["ciu", "dad"]);
        assert_eq!(parts("leer"), ["le", "er"]);
        assert_eq!(parts("país"), ["pa", "ís"]);
        assert_eq!(parts("huevo"), ["hue", "vo"]);
    }

    #[test]
    fn test_uppercase_input_is_lowercased() {
        assert_eq!(parts("GATO"), ["ga", "to"]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(parts("").is_empty());
        // No vowels: the word comes back in one piece.
        assert_eq!(parts("pst"), ["pst"]);
    }

    #[test]
    fn test_syllable_bank_is_sorted() {
        let words = ["perro".to_string(), "agua".to_string()];
        assert_eq!(all_syllables(&words), "a, gua, pe, rro");
    }
}
