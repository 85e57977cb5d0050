//! Markdown → ratatui `Text` renderer.
//!
//! Thin wrapper around `pulldown_cmark` that converts markdown events into
//! styled `Line`/`Span` values. Headings, bold, italic, inline code, fenced
//! code blocks (with syntect highlighting and a numbered copy control),
//! lists, blockquotes, and links.
//!
//! Input may be cut at any character while the typewriter runs: an open
//! fence, a lone `**` or half a link must still render. pulldown-cmark closes
//! every open tag at end of input, so the writer only has to avoid assuming
//! anything about what comes after the last event.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";

/// A code block as the user would copy it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// First word of the fence info string; `None` for bare or indented blocks.
    pub language: Option<String>,
    /// Contents without the final newline.
    pub code: String,
}

/// Header label for a code block: the language upper-cased, or `CODE`.
pub fn language_label(language: Option<&str>) -> String {
    match language {
        Some(lang) => lang.to_uppercase(),
        None => "CODE".to_string(),
    }
}

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

fn strip_final_newline(mut code: String) -> String {
    if code.ends_with('\n') {
        code.pop();
    }
    code
}

/// Code blocks of `content`, in document order. Numbering in the rendered
/// headers is the index here plus one.
pub fn code_blocks(content: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CodeBlock> = None;
    for event in Parser::new_ext(content, parser_options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                current = Some(CodeBlock {
                    language: fence_language(&kind),
                    code: String::new(),
                });
            }
            Event::Text(t) => {
                if let Some(block) = current.as_mut() {
                    block.code.push_str(&t);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(mut block) = current.take() {
                    block.code = strip_final_newline(block.code);
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Parse markdown content into styled `Text` using Luma's color scheme.
///
/// `copied` is the code whose block should show the copied marker.
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color, copied: Option<&str>) -> Text<'static> {
    let mut w = Writer::new(base_fg, copied);
    for event in Parser::new_ext(content, parser_options()) {
        w.handle(event);
    }
    w.text
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer<'c> {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack (bold, italic, heading text, etc.). Styles compose
    /// via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Code block being collected; emitted whole when it closes.
    code: Option<CodeBlock>,
    /// Code blocks emitted so far, for numbering.
    code_count: usize,
    copied: Option<&'c str>,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl<'c> Writer<'c> {
    fn new(base_fg: Color, copied: Option<&'c str>) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            code: None,
            code_count: 0,
            copied,
            link_url: None,
            needs_newline: false,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    /// Current effective style: top of stack, or base foreground color.
    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(Span::raw(marker));
            }
            _ => {} // HTML, footnotes, math: skip
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            // ── Block elements ──────────────────────────────────────────
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                let depth = heading_depth(level) as usize;
                self.push_line(Line::from(Span::styled(
                    format!("{} ", "#".repeat(depth)),
                    hs,
                )));
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => {
                self.code = Some(CodeBlock {
                    language: fence_language(&kind),
                    code: String::new(),
                });
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }

            // ── Inline elements ─────────────────────────────────────────
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // Tables, images, definitions: skip
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                if let Some(block) = self.code.take() {
                    self.emit_code_block(block);
                }
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Item => {}
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) {
        if let Some(block) = self.code.as_mut() {
            block.code.push_str(&cow);
            return;
        }

        // Expand tabs → 4 spaces (ratatui renders \t as zero-width)
        let raw = cow.to_string();
        let text = if raw.contains('\t') {
            raw.replace('\t', "    ")
        } else {
            raw
        };
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }

    /// Header with label and copy control, highlighted body, footer.
    fn emit_code_block(&mut self, block: CodeBlock) {
        self.code_count += 1;
        let code = strip_final_newline(block.code);
        let language = block.language.as_deref();

        if !self.text.lines.is_empty() {
            self.push_line(Line::default());
        }
        self.needs_newline = false;

        let bs = Style::default().fg(Color::DarkGray);
        let copy_control = if self.copied == Some(code.as_str()) {
            Span::styled(
                format!("[{}] ✓ copied", self.code_count),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!("[{}] copy", self.code_count), bs)
        };
        self.push_line(Line::from(vec![
            Span::styled("╭── ", bs),
            Span::styled(language_label(language), bs.add_modifier(Modifier::BOLD)),
            Span::styled(" ── ", bs),
            copy_control,
        ]));

        self.line_prefixes.push(Span::styled("│ ", bs));
        for line in highlight(&code, language) {
            self.push_line(line);
        }
        self.line_prefixes.pop();

        self.push_line(Line::from(Span::styled("╰──", bs)));
    }
}

/// Syntax-highlighted lines for a known language, neutral lines otherwise.
fn highlight(code: &str, language: Option<&str>) -> Vec<Line<'static>> {
    let syntax = language.and_then(|lang| SYNTAX_SET.find_syntax_by_token(lang));
    let theme = THEME_SET.themes.get(THEME);

    let (Some(syntax), Some(theme)) = (syntax, theme) else {
        return plain_code_lines(code);
    };

    let mut hl = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        match hl.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => {
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(hl_style, frag)| {
                        let content = frag.trim_end_matches('\n').replace('\t', "    ");
                        if content.is_empty() {
                            return None;
                        }
                        let fg = Color::Rgb(
                            hl_style.foreground.r,
                            hl_style.foreground.g,
                            hl_style.foreground.b,
                        );
                        Some(Span::styled(content, Style::default().fg(fg)))
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            Err(e) => {
                log::debug!("Highlighting failed, falling back to plain: {}", e);
                return plain_code_lines(code);
            }
        }
    }
    lines
}

fn plain_code_lines(code: &str) -> Vec<Line<'static>> {
    let code_style = Style::default().fg(Color::White);
    code.lines()
        .map(|line| Line::from(Span::styled(line.replace('\t', "    "), code_style)))
        .collect()
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(base_fg).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn heading_text_inherits_heading_style() {
        let text = render("## Hello", Color::Blue, None);
        let line = &text.lines[0];
        assert!(line.spans.len() >= 2, "expected >= 2 spans, got {:?}", line);
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line.spans[1].style.fg, Some(Color::Blue));
    }

    #[test]
    fn bold_text_is_bold() {
        let text = render("Some **bold** text", Color::Blue, None);
        let bold_span = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "bold")
            .unwrap();
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled_neutral() {
        let text = render("Use `foo()` here", Color::Blue, None);
        let code_span = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "foo()")
            .unwrap();
        assert_eq!(code_span.style.fg, Some(Color::White));
        assert_eq!(code_span.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn labeled_code_block_has_header_body_footer() {
        let text = render("```rust\nlet a = 1;\nlet b = 2;\n```", Color::Blue, None);
        let lines = plain(&text);
        assert!(lines[0].starts_with("╭── RUST ── [1] copy"), "got {:?}", lines[0]);
        assert!(lines[1].starts_with("│ ") && lines[1].contains("let a = 1;"));
        assert!(lines[2].starts_with("│ ") && lines[2].contains("let b = 2;"));
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[test]
    fn known_language_is_highlighted() {
        let text = render("```rust\nfn main() {}\n```", Color::Blue, None);
        let has_rgb = text.lines[1]
            .spans
            .iter()
            .any(|s| matches!(s.style.fg, Some(Color::Rgb(..))));
        assert!(has_rgb, "expected syntect colors in {:?}", text.lines[1]);
    }

    #[test]
    fn unlabeled_block_uses_code_label_and_neutral_style() {
        let text = render("```\nplain words\n```", Color::Blue, None);
        let lines = plain(&text);
        assert!(lines[0].contains("CODE"), "got {:?}", lines[0]);
        let body = text.lines[1]
            .spans
            .iter()
            .find(|s| s.content.contains("plain words"))
            .unwrap();
        assert_eq!(body.style.fg, Some(Color::White));
    }

    #[test]
    fn code_blocks_are_numbered() {
        let md = "```py\nprint(1)\n```\n\ntext\n\n```\nraw\n```";
        let lines = plain(&render(md, Color::Blue, None));
        assert!(lines.iter().any(|l| l.contains("PY ── [1] copy")));
        assert!(lines.iter().any(|l| l.contains("CODE ── [2] copy")));
    }

    #[test]
    fn copied_block_shows_marker() {
        let md = "```sh\necho hi\n```";
        let lines = plain(&render(md, Color::Blue, Some("echo hi")));
        assert!(lines[0].contains("[1] ✓ copied"), "got {:?}", lines[0]);

        let lines = plain(&render(md, Color::Blue, Some("something else")));
        assert!(lines[0].contains("[1] copy"));
    }

    #[test]
    fn extracts_code_blocks_for_copy() {
        let md = "intro\n\n```rust ignore\nfn a() {}\n```\n\n    indented\n";
        let blocks = code_blocks(md);
        assert_eq!(
            blocks,
            vec![
                CodeBlock {
                    language: Some("rust".to_string()),
                    code: "fn a() {}".to_string(),
                },
                CodeBlock {
                    language: None,
                    code: "indented".to_string(),
                },
            ]
        );
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green, None);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue, None);
        let lines = plain(&text);
        assert!(lines.iter().any(|l| l.contains("    indented")));
        assert!(!lines.iter().any(|l| l.contains('\t')));
    }

    #[test]
    fn unterminated_fence_renders_as_code() {
        let text = render("Look:\n\n```rust\nlet x = ", Color::Blue, None);
        let lines = plain(&text);
        assert!(lines.iter().any(|l| l.contains("RUST")));
        assert!(lines.iter().any(|l| l.contains("let x =")));
    }

    #[test]
    fn every_prefix_of_a_document_renders() {
        let doc = "# Title\n\nSome **bold** and *it* with `code` and a [link](https://x.y).\n\n\
                   > quote\n\n1. one\n2. two\n\n```rust\nfn main() {\n\tprintln!(\"🦀\");\n}\n```\n\n- [ ] task\n";
        for (i, _) in doc.char_indices() {
            let _ = render(&doc[..i], Color::Blue, None);
            let _ = code_blocks(&doc[..i]);
        }
        let _ = render(doc, Color::Blue, None);
    }
}
