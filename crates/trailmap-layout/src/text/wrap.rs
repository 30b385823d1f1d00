//! Greedy label wrapping.
//!
//! Both entry points share one contract: an ordered, non-empty sequence of lines where no line
//! exceeds the budget. Words wider than the budget are split by characters; a single
//! character that is still too wide is emitted on its own line.

use super::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use std::collections::VecDeque;
use unicode_width::UnicodeWidthStr;

/// Splits a line into word tokens separated by single `" "` tokens (runs of whitespace
/// collapse into one separator).
pub fn split_line_to_words(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    for (i, word) in line.split_whitespace().enumerate() {
        if i > 0 {
            out.push(" ".to_string());
        }
        out.push(word.to_string());
    }
    out
}

/// Wraps `text` so that every line measures at most `max_width_px` under `measurer`.
///
/// A missing or non-positive budget disables wrapping (explicit breaks are still honored).
pub fn wrap_label(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: Option<f64>,
) -> Vec<String> {
    let max_width_px = max_width_px.filter(|w| w.is_finite() && *w > 0.0);
    let fits = |s: &str| match max_width_px {
        Some(max) => measurer.measure(s, style).width <= max,
        None => true,
    };
    wrap_lines(text, &fits)
}

/// Column-count variant of [`wrap_label`], used when no measurer is available. Widths are
/// display columns, so East Asian wide characters count twice.
pub fn wrap_label_chars(text: &str, max_columns: usize) -> Vec<String> {
    let max_columns = max_columns.max(1);
    wrap_lines(text, &|s: &str| s.width() <= max_columns)
}

fn wrap_lines(text: &str, fits: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in DeterministicTextMeasurer::normalized_text_lines(text) {
        lines.extend(wrap_line(&line, fits));
    }
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

fn wrap_line(line: &str, fits: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut tokens = VecDeque::from(split_line_to_words(line));
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();

    while let Some(tok) = tokens.pop_front() {
        if cur.is_empty() && tok == " " {
            continue;
        }

        let candidate = format!("{cur}{tok}");
        if fits(candidate.trim_end()) {
            cur = candidate;
            continue;
        }

        if !cur.trim().is_empty() {
            out.push(cur.trim_end().to_string());
            cur.clear();
            tokens.push_front(tok);
            continue;
        }

        if tok == " " {
            continue;
        }

        // Token does not fit on an empty line; split by characters.
        let chars = tok.chars().collect::<Vec<_>>();
        let mut cut = 1usize;
        while cut < chars.len() {
            let head: String = chars[..cut].iter().collect();
            if !fits(&head) {
                break;
            }
            cut += 1;
        }
        cut = cut.saturating_sub(1).max(1);
        let head: String = chars[..cut].iter().collect();
        let tail: String = chars[cut..].iter().collect();
        out.push(head);
        if !tail.is_empty() {
            tokens.push_front(tail);
        }
    }

    if !cur.trim().is_empty() {
        out.push(cur.trim_end().to_string());
    }

    if out.is_empty() {
        vec![String::new()]
    } else {
        out
    }
}
