//! Terminal rendering of grids and solutions.
//!
//! The printed puzzle has the same panels as the paper one: the numbered
//! grid with the two quote columns shaded, the clue list, the syllable
//! bank, and (on demand) the solution with every word written backwards,
//! the way the game is read.

use colored::Colorize;

use sachagrilla_core::syllables::all_syllables;
use sachagrilla_core::Solution;

/// The full puzzle view: grid, clues, syllables and optionally the
/// solution panel.
pub fn render_grid(solution: &Solution, include_solution: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n  SACHAGRILLA N° {}\n\n", solution.grid_id));

    for line in &solution.lines {
        out.push_str(&format!("  {:>2} ", line.row_nbr + 1));
        for column in 0..line.word.chars().count() {
            let cell = if column == solution.position1 || column == solution.position2 {
                "[ ]".on_yellow().to_string()
            } else {
                "[ ]".to_string()
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }

    out.push_str(&render_clues(solution));
    out.push_str(&render_syllables(solution));
    if include_solution {
        out.push_str(&render_solution_panel(solution));
    }
    out
}

/// Only the solution view, for already-printed grids.
pub fn render_solution(solution: &Solution) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n  SACHAGRILLA N° {}\n", solution.grid_id));
    out.push_str(&render_solution_panel(solution));
    out
}

fn render_clues(solution: &Solution) -> String {
    let mut out = String::new();
    out.push_str("\n  DEFINICIONES\n");
    for line in &solution.lines {
        out.push_str(&format!("  {:>2}: {}\n", line.row_nbr + 1, line.clue));
    }
    out
}

fn render_syllables(solution: &Solution) -> String {
    let words: Vec<&str> = solution.lines.iter().map(|l| l.word.as_str()).collect();
    format!("\n  SÍLABAS\n  {}\n", all_syllables(&words))
}

fn render_solution_panel(solution: &Solution) -> String {
    let mut out = String::new();
    out.push_str("\n  SOLUCIÓN\n  ");
    let reversed_words: Vec<String> = solution
        .lines
        .iter()
        .map(|line| format!("{}: {}", line.row_nbr + 1, reversed(&line.word)))
        .collect();
    out.push_str(&reversed_words.join(" - "));
    out.push_str(&format!(
        "\n  \"{}\" ({})\n",
        reversed(&solution.quote),
        solution.author
    ));
    out
}

fn reversed(text: &str) -> String {
    text.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sachagrilla_core::SolutionLine;

    fn sample() -> Solution {
        Solution {
            grid_id: 7,
            quote: "hola".to_string(),
            author: "Anónimo".to_string(),
            position1: 0,
            position2: 2,
            lines: vec![
                SolutionLine {
                    row_nbr: 0,
                    word: "gato".to_string(),
                    clue: "mamífero doméstico".to_string(),
                },
                SolutionLine {
                    row_nbr: 1,
                    word: "sol".to_string(),
                    clue: "astro rey".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_grid_has_all_panels() {
        let out = render_grid(&sample(), false);
        assert!(out.contains("SACHAGRILLA N° 7"));
        assert!(out.contains("DEFINICIONES"));
        assert!(out.contains("1: mamífero doméstico"));
        assert!(out.contains("SÍLABAS"));
        assert!(!out.contains("SOLUCIÓN"));
    }

    #[test]
    fn test_solution_words_and_quote_come_reversed() {
        let out = render_solution(&sample());
        assert!(out.contains("1: otag"));
        assert!(out.contains("2: los"));
        assert!(out.contains("\"aloh\""));
        assert!(out.contains("(Anónimo)"));
    }

    #[test]
    fn test_syllable_bank_lists_word_parts() {
        let out = render_grid(&sample(), false);
        assert!(out.contains("ga"));
        assert!(out.contains("to"));
        assert!(out.contains("sol"));
    }

    #[test]
    fn test_optional_solution_panel() {
        let out = render_grid(&sample(), true);
        assert!(out.contains("SOLUCIÓN"));
        assert!(out.contains("otag"));
    }
}
