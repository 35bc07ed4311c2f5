//! Markdown rendering for the blog reader
//!
//! Bodies are standard markdown. They render either to HTML or to a flat
//! list of [`Block`]s that a view can style on its own. A paragraph that
//! opens with strong emphasis (`**Result:** ...`) is a [`Block::Callout`].

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// A top-level piece of a rendered body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, text: String },
    Callout { text: String },
    Paragraph { text: String },
    List { ordered: bool, items: Vec<String> },
    Code { lang: Option<String>, code: String },
    Rule,
}

/// Markdown renderer
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // No smart punctuation: quotes stay as the author typed them
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }

    /// Render markdown to structured blocks
    pub fn blocks(&self, markdown: &str) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut buf = String::new();
        let mut lead_strong = false;
        let mut list_depth = 0usize;
        let mut list: Option<(bool, Vec<String>)> = None;
        let mut code: Option<Option<String>> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::Paragraph) if list_depth == 0 => {
                    buf.clear();
                    lead_strong = false;
                }
                Event::End(TagEnd::Paragraph) if list_depth == 0 => {
                    let text = take_trimmed(&mut buf);
                    if text.is_empty() {
                        continue;
                    }
                    blocks.push(if lead_strong {
                        Block::Callout { text }
                    } else {
                        Block::Paragraph { text }
                    });
                }
                Event::End(TagEnd::Paragraph) => buf.push(' '),
                Event::Start(Tag::Strong) => {
                    if list_depth == 0 && buf.trim().is_empty() {
                        lead_strong = true;
                    }
                }
                Event::Start(Tag::Heading { .. }) => buf.clear(),
                Event::End(TagEnd::Heading(level)) => blocks.push(Block::Heading {
                    level: level as u8,
                    text: take_trimmed(&mut buf),
                }),
                Event::Start(Tag::List(start)) => {
                    list_depth += 1;
                    if list_depth == 1 {
                        buf.clear();
                        list = Some((start.is_some(), Vec::new()));
                    } else {
                        push_item(&mut list, &mut buf);
                    }
                }
                Event::End(TagEnd::List(_)) => {
                    list_depth = list_depth.saturating_sub(1);
                    if list_depth == 0 {
                        if let Some((ordered, items)) = list.take() {
                            blocks.push(Block::List { ordered, items });
                        }
                    }
                }
                Event::Start(Tag::Item) => push_item(&mut list, &mut buf),
                Event::End(TagEnd::Item) => push_item(&mut list, &mut buf),
                Event::Start(Tag::CodeBlock(kind)) => {
                    buf.clear();
                    code = Some(match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code.take().flatten();
                    let text = std::mem::take(&mut buf);
                    blocks.push(Block::Code {
                        lang,
                        code: text.trim_end_matches('\n').to_string(),
                    });
                }
                Event::Text(text) | Event::Code(text) => buf.push_str(&text),
                Event::SoftBreak => buf.push(' '),
                Event::HardBreak => buf.push('\n'),
                Event::Rule => blocks.push(Block::Rule),
                _ => {}
            }
        }

        blocks
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn take_trimmed(buf: &mut String) -> String {
    let text = buf.trim().to_string();
    buf.clear();
    text
}

/// Move pending item text into the open list
fn push_item(list: &mut Option<(bool, Vec<String>)>, buf: &mut String) {
    let text = take_trimmed(buf);
    if text.is_empty() {
        return;
    }
    if let Some((_, items)) = list.as_mut() {
        items.push(text);
    }
}

/// Render a markdown body to HTML
pub fn render_html(markdown: &str) -> String {
    MarkdownRenderer::new().render(markdown)
}

/// Render a markdown body to structured blocks
pub fn blocks(markdown: &str) -> Vec<Block> {
    MarkdownRenderer::new().blocks(markdown)
}

/// First paragraph of a body as plain text, cut to `max_chars`
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let first = blocks(markdown).into_iter().find_map(|block| match block {
        Block::Paragraph { text } | Block::Callout { text } => Some(text),
        _ => None,
    });
    let Some(text) = first else {
        return String::new();
    };

    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// Lay blocks out as plain text for a terminal
pub fn to_plain_text(blocks: &[Block]) -> String {
    let mut out = Vec::with_capacity(blocks.len());

    for block in blocks {
        let rendered = match block {
            Block::Heading { level: 1, text } => {
                format!("{}\n{}", text, "=".repeat(text.chars().count()))
            }
            Block::Heading { level: 2, text } => {
                format!("{}\n{}", text, "-".repeat(text.chars().count()))
            }
            Block::Heading { level, text } => {
                format!("{} {}", "#".repeat(*level as usize), text)
            }
            Block::Callout { text } => format!("  | {}", text),
            Block::Paragraph { text } => text.clone(),
            Block::List { ordered, items } => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    if *ordered {
                        format!("{}. {}", i + 1, item)
                    } else {
                        format!("- {}", item)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Code { code, .. } => code
                .lines()
                .map(|line| format!("    {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Rule => "---".to_string(),
        };
        out.push(rendered);
    }

    out.join("\n\n")
}
