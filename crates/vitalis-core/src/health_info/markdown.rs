//! Minimal line-oriented Markdown conversion for generated articles.
//!
//! Only a small, deterministic subset is recognized:
//! - `#`, `##`, `###` headers
//! - `* ` bullet lines, merged into one list until a non-bullet line
//! - inline `**bold**`
//!
//! Every other non-blank line is a paragraph. There is no nesting.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static STRONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("strong-emphasis pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Inline {
    Text(String),
    Strong(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Heading { level: u8, inlines: Vec<Inline> },
    List(Vec<Vec<Inline>>),
    Paragraph(Vec<Inline>),
}

pub fn convert(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open_list: Vec<Vec<Inline>> = Vec::new();

    for raw_line in markdown.lines() {
        let line = raw_line.trim();

        if let Some(item) = line.strip_prefix("* ") {
            open_list.push(parse_inline(item.trim()));
            continue;
        }

        close_list(&mut open_list, &mut blocks);

        if line.is_empty() {
            continue;
        }

        match heading(line) {
            Some((level, text)) => blocks.push(Block::Heading {
                level,
                inlines: parse_inline(text),
            }),
            None => blocks.push(Block::Paragraph(parse_inline(line))),
        }
    }

    close_list(&mut open_list, &mut blocks);
    blocks
}

fn close_list(open_list: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>) {
    if !open_list.is_empty() {
        blocks.push(Block::List(std::mem::take(open_list)));
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    [("### ", 3), ("## ", 2), ("# ", 1)]
        .into_iter()
        .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|text| (level, text.trim())))
}

fn parse_inline(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut cursor = 0;

    for caps in STRONG.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            inlines.push(Inline::Text(text[cursor..whole.start()].to_string()));
        }
        inlines.push(Inline::Strong(inner.as_str().to_string()));
        cursor = whole.end();
    }

    if cursor < text.len() {
        inlines.push(Inline::Text(text[cursor..].to_string()));
    }
    inlines
}

/// Renders blocks as HTML. Text is escaped, so converting the output again
/// yields plain paragraphs rather than re-interpreted markup.
pub fn render_html(blocks: &[Block]) -> String {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            Block::Heading { level, inlines } => {
                out.push(format!("<h{level}>{}</h{level}>", render_inlines(inlines)));
            }
            Block::List(items) => {
                out.push("<ul>".to_string());
                for item in items {
                    out.push(format!("<li>{}</li>", render_inlines(item)));
                }
                out.push("</ul>".to_string());
            }
            Block::Paragraph(inlines) => {
                out.push(format!("<p>{}</p>", render_inlines(inlines)));
            }
        }
    }
    out.join("\n")
}

fn render_inlines(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => escape_html(text),
            Inline::Strong(text) => format!("<strong>{}</strong>", escape_html(text)),
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Flattens inline runs into plain text.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) | Inline::Strong(text) => text.as_str(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_heading_list_paragraph() {
        let blocks = convert("## Title\n* item one\n* item two\nplain text");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    inlines: vec![text("Title")]
                },
                Block::List(vec![vec![text("item one")], vec![text("item two")]]),
                Block::Paragraph(vec![text("plain text")]),
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        let blocks = convert("# One\n## Two\n### Three\n#### Four");
        let levels: Vec<u8> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert!(matches!(blocks[3], Block::Paragraph(_)));
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        let blocks = convert("intro\n* a\n* b");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[1], Block::List(items) if items.len() == 2));
    }

    #[test]
    fn test_interrupted_list_makes_two_lists() {
        let blocks = convert("* a\nbreak\n* b");
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn test_strong_emphasis() {
        let blocks = convert("Eat **more** fiber and **less** sugar");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                text("Eat "),
                Inline::Strong("more".into()),
                text(" fiber and "),
                Inline::Strong("less".into()),
                text(" sugar"),
            ])]
        );
    }

    #[test]
    fn test_unclosed_strong_is_text() {
        let blocks = convert("a **dangling marker");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("a **dangling marker")])]);
    }

    #[test]
    fn test_rendered_html_reconverts_as_plain_paragraphs() {
        let html = render_html(&convert("## Title\n* item <one>\nplain **text**"));
        assert_eq!(
            html,
            "<h2>Title</h2>\n<ul>\n<li>item &lt;one&gt;</li>\n</ul>\n<p>plain <strong>text</strong></p>"
        );

        let again = convert(&html);
        assert_eq!(again.len(), html.lines().count());
        assert!(again.iter().all(|b| matches!(b, Block::Paragraph(_))));
    }

    #[test]
    fn test_plain_text_flattening() {
        let blocks = convert("**Note:** rest");
        let Block::Paragraph(inlines) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(plain_text(inlines), "Note: rest");
    }
}
