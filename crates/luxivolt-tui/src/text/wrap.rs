//! Width-aware wrapping for message bubbles.
//!
//! Widths are measured in terminal cells, so wide characters count double.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Wrap plain text to `width` cells. Explicit newlines are kept as breaks.
pub fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Wrap styled lines to `width` cells, preserving span styles.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Wrap one styled line.
fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if line.width() <= width {
        return vec![line];
    }

    // Style of every character, so wrapped pieces can be restyled.
    let styled: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();
    let plain: String = styled.iter().map(|(ch, _)| ch).collect();

    let mut result = Vec::new();
    let mut idx = 0;

    for piece in textwrap::wrap(&plain, width) {
        // textwrap drops the whitespace it breaks on.
        while idx < styled.len() && styled[idx].0.is_whitespace() && !piece.starts_with(styled[idx].0)
        {
            idx += 1;
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut text = String::new();
        let mut style: Option<Style> = None;

        for expected in piece.chars() {
            let (ch, ch_style) = styled.get(idx).copied().unwrap_or((expected, Style::default()));
            idx += 1;
            if style.is_some_and(|s| s != ch_style) {
                spans.push(Span::styled(std::mem::take(&mut text), style.unwrap_or_default()));
            }
            style = Some(ch_style);
            text.push(ch);
        }
        if !text.is_empty() {
            spans.push(Span::styled(text, style.unwrap_or_default()));
        }
        result.push(Line::from(spans));
    }

    if result.is_empty() {
        result.push(Line::from(""));
    }
    result
}
