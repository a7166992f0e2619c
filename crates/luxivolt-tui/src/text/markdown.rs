//! Markdown rendering using pulldown-cmark.
//!
//! Provides [`render_markdown`] to convert assistant replies to styled ratatui
//! Lines. Raw HTML is never interpreted; it is shown as literal text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::theme::Theme;

use super::styles::MarkdownStyles;

/// Render markdown text to styled ratatui Lines.
///
/// Lines are not wrapped; see [`super::wrap_lines`].
pub fn render_markdown(input: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(input, options);
    let styles = MarkdownStyles::from_theme(theme);

    let mut renderer = MarkdownRenderer::new(styles);
    renderer.run(parser);
    renderer.finish()
}

/// Internal renderer that processes pulldown-cmark events.
struct MarkdownRenderer {
    /// Accumulated output lines.
    lines: Vec<Line<'static>>,
    /// Style configuration.
    styles: MarkdownStyles,
    /// Stack of active styles for nested formatting.
    style_stack: Vec<Style>,
    /// Current line being built.
    current_spans: Vec<Span<'static>>,
    /// Open lists; `Some(n)` holds the next number of an ordered list.
    list_stack: Vec<Option<u64>>,
    /// Whether we're inside a code block.
    in_code_block: bool,
    /// Whether we're inside a blockquote.
    in_blockquote: bool,
    /// Pending list marker to prepend to next text.
    pending_list_marker: Option<String>,
    /// Task list checkbox state (Some(checked) if in task item).
    task_checkbox: Option<bool>,
    /// Destinations of open links.
    link_stack: Vec<String>,
}

impl MarkdownRenderer {
    fn new(styles: MarkdownStyles) -> Self {
        Self {
            lines: Vec::new(),
            styles,
            style_stack: Vec::new(),
            current_spans: Vec::new(),
            list_stack: Vec::new(),
            in_code_block: false,
            in_blockquote: false,
            pending_list_marker: None,
            task_checkbox: None,
            link_stack: Vec::new(),
        }
    }

    fn run<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            self.handle_event(event);
        }
        self.flush_line();
    }

    /// Take the rendered lines, dropping trailing blank lines.
    fn finish(mut self) -> Vec<Line<'static>> {
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }

    #[allow(clippy::too_many_lines)]
    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            // Headings
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_line();
                self.style_stack.push(self.styles.heading(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush_line();
                self.style_stack.pop();
            }

            // Inline formatting
            Event::Start(Tag::Emphasis) => {
                self.style_stack.push(self.styles.emphasis);
            }
            Event::Start(Tag::Strong) => {
                self.style_stack.push(self.styles.strong);
            }
            Event::Start(Tag::Strikethrough) => {
                self.style_stack.push(self.styles.strikethrough);
            }
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough) => {
                self.style_stack.pop();
            }

            // Links: text is styled, external destinations are shown after it
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.style_stack.push(self.styles.link);
                self.link_stack.push(dest_url.into_string());
            }
            Event::End(TagEnd::Link) => {
                self.style_stack.pop();
                if let Some(dest) = self.link_stack.pop() {
                    if dest.starts_with("http://") || dest.starts_with("https://") {
                        self.current_spans
                            .push(Span::styled(format!(" ({dest})"), self.styles.link_url));
                    }
                }
            }

            // Code blocks
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush_line();
                self.in_code_block = false;
            }

            // Lists
            Event::Start(Tag::List(start)) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.lines.push(Line::from(""));
                }
            }
            Event::Start(Tag::Item) => {
                self.flush_line();
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.pending_list_marker = Some(marker);
            }
            Event::End(TagEnd::Item) => {
                self.flush_line();
                self.task_checkbox = None;
            }
            Event::TaskListMarker(checked) => {
                self.task_checkbox = Some(checked);
            }

            // Blockquotes
            Event::Start(Tag::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = true;
            }
            Event::End(TagEnd::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = false;
            }

            // Paragraphs end with a blank line, except inside list items
            Event::End(TagEnd::Paragraph) => {
                self.flush_line();
                if self.list_stack.is_empty() {
                    self.lines.push(Line::from(""));
                }
            }

            Event::Text(text) => {
                self.add_text(&text);
            }
            Event::Code(code) => {
                self.take_list_marker();
                self.current_spans
                    .push(Span::styled(format!("`{code}`"), self.styles.code));
            }

            // HTML is shown verbatim, never interpreted
            Event::InlineHtml(html) => {
                self.add_text(&html);
            }
            Event::Html(html) => {
                for line in html.lines() {
                    self.add_text(line);
                    self.flush_line();
                }
            }

            Event::SoftBreak => {
                self.add_text(" ");
            }
            Event::HardBreak => {
                self.flush_line();
            }

            Event::Start(
                Tag::Paragraph
                | Tag::Image { .. }
                | Tag::Table(_)
                | Tag::TableHead
                | Tag::TableRow
                | Tag::TableCell
                | Tag::FootnoteDefinition(_)
                | Tag::MetadataBlock(_)
                | Tag::HtmlBlock,
            )
            | Event::End(
                TagEnd::Image
                | TagEnd::Table
                | TagEnd::TableHead
                | TagEnd::TableRow
                | TagEnd::TableCell
                | TagEnd::FootnoteDefinition
                | TagEnd::MetadataBlock(_)
                | TagEnd::HtmlBlock,
            )
            | Event::FootnoteReference(_)
            | Event::Rule => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                self.current_spans
                    .push(Span::styled(format!("  {line}"), self.styles.code_block));
                self.flush_line();
            }
            return;
        }

        self.take_list_marker();

        if self.in_blockquote && self.current_spans.is_empty() {
            self.current_spans
                .push(Span::styled("> ".to_string(), self.styles.blockquote));
        }

        let style = self.current_style();
        self.current_spans.push(Span::styled(text.to_string(), style));
    }

    /// Emit the pending list marker (and task checkbox) if there is one.
    fn take_list_marker(&mut self) {
        if let Some(marker) = self.pending_list_marker.take() {
            self.current_spans
                .push(Span::styled(marker, self.styles.list_marker));
            if let Some(checked) = self.task_checkbox.take() {
                let checkbox = if checked { "[x] " } else { "[ ] " };
                self.current_spans
                    .push(Span::styled(checkbox, self.styles.list_marker));
            }
        }
    }

    fn current_style(&self) -> Style {
        let mut style = self.styles.text;
        for s in &self.style_stack {
            style = style.patch(*s);
        }
        style
    }

    fn flush_line(&mut self) {
        if !self.current_spans.is_empty() {
            let spans = std::mem::take(&mut self.current_spans);
            self.lines.push(Line::from(spans));
        }
    }
}
