use super::*;

/// Measurer with a per-character width table, so tests do not depend on font heuristics.
struct WideM;

impl TextMeasurer for WideM {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let width = text
            .chars()
            .map(|c| if c == 'M' || c == 'W' { 1.0 } else { 0.5 })
            .sum::<f64>()
            * style.font_size;
        TextMetrics {
            width,
            height: style.font_size,
            line_count: 1,
        }
    }
}

#[test]
fn deterministic_measurer_counts_display_columns() {
    let m = DeterministicTextMeasurer::default();
    let style = TextStyle::default();
    let metrics = m.measure("abcd", &style);
    assert_eq!(metrics.width, 4.0 * 16.0 * 0.6);
    assert_eq!(metrics.line_count, 1);

    // Wide CJK characters take two columns.
    let wide = m.measure("路线", &style);
    assert_eq!(wide.width, 4.0 * 16.0 * 0.6);

    let two_lines = m.measure("ab<br/>abc", &style);
    assert_eq!(two_lines.line_count, 2);
    assert_eq!(two_lines.width, 3.0 * 16.0 * 0.6);
    assert_eq!(two_lines.height, 2.0 * 16.0 * 1.2);
}

#[test]
fn wrap_label_never_exceeds_budget() {
    let style = TextStyle {
        font_size: 10.0,
        ..Default::default()
    };
    let text = "Migrate MMW billing pipeline to the new event bus WWWWWWWWWWWW";
    for budget in [12.0, 25.0, 40.0, 80.0, 200.0] {
        let lines = wrap_label(text, &WideM, &style, Some(budget));
        assert!(!lines.is_empty());
        for line in &lines {
            let w = WideM.measure(line, &style).width;
            assert!(w <= budget, "line {line:?} is {w}px, budget {budget}");
        }
        // No characters are lost besides collapsed whitespace.
        let joined: String = lines.concat();
        let expected: String = text.split_whitespace().collect();
        assert_eq!(joined.replace(' ', ""), expected);
    }
}

#[test]
fn wrap_label_is_greedy_by_words() {
    let style = TextStyle {
        font_size: 2.0,
        ..Default::default()
    };
    // Each lowercase char is 1px wide at font size 2.
    let lines = wrap_label("aaa bbb ccc", &WideM, &style, Some(7.0));
    assert_eq!(lines, ["aaa bbb", "ccc"]);
}

#[test]
fn wrap_label_without_budget_only_honors_explicit_breaks() {
    let style = TextStyle::default();
    assert_eq!(
        wrap_label("one two<br>three", &WideM, &style, None),
        ["one two", "three"]
    );
    assert_eq!(wrap_label("x", &WideM, &style, Some(f64::NAN)), ["x"]);
    assert_eq!(wrap_label("", &WideM, &style, Some(10.0)), [""]);
}

#[test]
fn single_character_wider_than_budget_stands_alone() {
    let style = TextStyle {
        font_size: 10.0,
        ..Default::default()
    };
    assert_eq!(wrap_label("WW", &WideM, &style, Some(4.0)), ["W", "W"]);
}

#[test]
fn char_budget_wrapping() {
    assert_eq!(
        wrap_label_chars("Launch public API docs", 10),
        ["Launch", "public API", "docs"]
    );
    assert_eq!(wrap_label_chars("abcdefghij", 4), ["abcd", "efgh", "ij"]);
    assert_eq!(wrap_label_chars("a b", 0), ["a", "b"]);
}

#[test]
fn char_budget_counts_wide_characters_as_two_columns() {
    assert_eq!(wrap_label_chars("数据平台迁移", 4), ["数据", "平台", "迁移"]);
    assert_eq!(wrap_label_chars("ab数据", 4), ["ab数", "据"]);
}

#[test]
fn split_words_collapses_whitespace() {
    assert_eq!(split_line_to_words("  a \t b  "), ["a", " ", "b"]);
    assert!(split_line_to_words("   ").is_empty());
}
