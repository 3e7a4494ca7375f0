//! Markdown to terminal line rendering.
//!
//! Walks pulldown-cmark events and produces styled ratatui lines. Covers the
//! subset the report uses: headings, paragraphs, lists, tables, emphasis,
//! inline code, code blocks and rules.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const RULE_WIDTH: usize = 40;

#[derive(Debug, Default)]
struct TableBuffer {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

impl TableBuffer {
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in self.header.iter().chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.chars().count();
                match widths.get_mut(i) {
                    Some(existing) => *existing = (*existing).max(w),
                    None => widths.push(w),
                }
            }
        }
        widths
    }
}

fn pad(cell: &str, width: usize) -> String {
    format!("{:<width$}", cell, width = width)
}

#[derive(Debug, Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    table: Option<TableBuffer>,
    in_code_block: bool,
    in_strong: bool,
}

impl Renderer {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, style: Style) {
        let patched = self.style().patch(style);
        self.styles.push(patched);
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.lines.push(Line::from(spans));
        }
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }
        if self.in_code_block {
            let style = Style::default().fg(Color::Yellow);
            for line in text.lines() {
                self.lines.push(Line::from(Span::styled(format!("    {}", line), style)));
            }
            return;
        }
        let mut style = self.style();
        if self.in_strong {
            match text {
                "WARN" => style = style.fg(Color::Yellow),
                "INFO" => style = style.fg(Color::Green),
                _ => {}
            }
        }
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn code(&mut self, code: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(code);
            return;
        }
        self.spans
            .push(Span::styled(code.to_string(), Style::default().fg(Color::DarkGray)));
    }

    fn start_item(&mut self) {
        self.flush();
        let depth = self.lists.len().saturating_sub(1);
        let bullet = match self.lists.last_mut() {
            Some(Some(n)) => {
                let b = format!("{}. ", n);
                *n += 1;
                b
            }
            _ => "• ".to_string(),
        };
        self.spans.push(Span::raw("  ".repeat(depth)));
        self.spans.push(Span::styled(bullet, Style::default().fg(Color::Cyan)));
    }

    fn end_table(&mut self) {
        let Some(table) = self.table.take() else {
            return;
        };
        let widths = table.widths();
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));

        let render_row = |row: &[String], style: Style| -> Line<'static> {
            let mut spans = Vec::new();
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    spans.push(separator.clone());
                }
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                spans.push(Span::styled(pad(cell, *width), style));
            }
            Line::from(spans)
        };

        if let Some(header) = &table.header {
            let header_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            self.lines.push(render_row(header, header_style));
            let rule = widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>().join("─┼─");
            self.lines
                .push(Line::from(Span::styled(rule, Style::default().fg(Color::DarkGray))));
        }
        for row in &table.rows {
            self.lines.push(render_row(row, Style::default()));
        }
        self.blank();
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.code(&code),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::default().fg(Color::DarkGray),
                )));
                self.blank();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                let style = match level {
                    HeadingLevel::H1 => Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    HeadingLevel::H2 => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    _ => Style::default().add_modifier(Modifier::BOLD),
                };
                self.push_style(style);
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => self.start_item(),
            Tag::Strong => {
                self.in_strong = true;
                self.push_style(Style::default().add_modifier(Modifier::BOLD));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::CodeBlock(kind) => {
                self.flush();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    self.lines
                        .push(Line::from(Span::styled(format!("  [{}]", lang), Style::default().fg(Color::DarkGray))));
                }
            }
            Tag::Table(_) => {
                self.flush();
                self.table = Some(TableBuffer::default());
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.blank();
            }
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.blank();
                } else {
                    self.flush();
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                } else {
                    self.flush();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Strong => {
                self.in_strong = false;
                self.styles.pop();
            }
            TagEnd::Emphasis => {
                self.styles.pop();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = Some(std::mem::take(&mut table.row));
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => self.end_table(),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Render markdown into display lines, in document order.
pub fn render_markdown(markdown: &str) -> Vec<Line<'static>> {
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        renderer.event(event);
    }
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn plain_lines(markdown: &str) -> Vec<String> {
        render_markdown(markdown).iter().map(plain).collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let lines = plain_lines("# Title\n\nSome text\nwrapped here.\n");
        assert_eq!(lines, vec!["Title", "", "Some text wrapped here."]);
    }

    #[test]
    fn test_heading_is_styled() {
        let lines = render_markdown("## Summary\n");
        let style = lines[0].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_bullet_list() {
        let lines = plain_lines("- one\n- two\n- three\n");
        assert_eq!(lines, vec!["• one", "• two", "• three"]);
    }

    #[test]
    fn test_ordered_list() {
        let lines = plain_lines("1. first\n2. second\n");
        assert_eq!(lines, vec!["1. first", "2. second"]);
    }

    #[test]
    fn test_table_alignment() {
        let md = "| Metric | Value |\n|---|---|\n| Outer iterations completed | 5 |\n| Short-circuit events | 12 |\n";
        let lines = plain_lines(md);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Metric                     │ Value");
        assert!(lines[1].contains("─┼─"));
        assert_eq!(lines[2], "Outer iterations completed │ 5    ");
        assert_eq!(lines[3], "Short-circuit events       │ 12   ");
    }

    #[test]
    fn test_log_entry_line() {
        let lines = render_markdown("- `2026-10-19T09:00:00.000Z` **WARN** Short-circuit\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "• 2026-10-19T09:00:00.000Z WARN Short-circuit");
        let warn = lines[0].spans.iter().find(|s| s.content == "WARN").unwrap();
        assert_eq!(warn.style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_code_block() {
        let lines = plain_lines("```text\nline a\nline b\n```\n");
        assert_eq!(lines, vec!["  [text]", "    line a", "    line b"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(render_markdown("").is_empty());
    }
}
