//! Article body HTML to display text using `scraper`.

use scraper::{ElementRef, Html, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Quote,
    ListItem,
}

/// One styled run of body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

/// Split an HTML body into typed text blocks. Plain text without markup comes
/// back as a single paragraph.
pub fn html_to_blocks(html: &str) -> Vec<Block> {
    let fragment = Html::parse_fragment(html);
    let mut blocks = Vec::new();
    collect_blocks(fragment.root_element(), &mut blocks);
    blocks
}

/// Render an HTML body as plain text: blank lines between paragraphs, list
/// items bulleted on consecutive lines.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::new();
    let mut previous: Option<BlockKind> = None;
    for block in html_to_blocks(html) {
        if let Some(prev) = previous {
            let tight = prev == BlockKind::ListItem && block.kind == BlockKind::ListItem;
            out.push_str(if tight { "\n" } else { "\n\n" });
        }
        if block.kind == BlockKind::ListItem {
            out.push_str("• ");
        }
        out.push_str(&block.text);
        previous = Some(block.kind);
    }
    out
}

fn block_kind(name: &str) -> Option<BlockKind> {
    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(BlockKind::Heading),
        "p" | "pre" | "figcaption" => Some(BlockKind::Paragraph),
        "blockquote" => Some(BlockKind::Quote),
        "li" => Some(BlockKind::ListItem),
        _ => None,
    }
}

fn is_container(name: &str) -> bool {
    matches!(
        name,
        "html" | "body" | "div" | "section" | "article" | "main" | "header" | "footer"
            | "ul" | "ol" | "figure" | "table" | "tbody" | "tr" | "td"
    )
}

fn is_skipped(name: &str) -> bool {
    matches!(name, "script" | "style" | "noscript" | "template" | "img")
}

fn collect_blocks(element: ElementRef, blocks: &mut Vec<Block>) {
    let mut loose = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(&mut loose, text),
            Node::Element(el) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.name();
                if is_skipped(name) {
                    continue;
                }
                if let Some(kind) = block_kind(name) {
                    flush(&mut loose, BlockKind::Paragraph, blocks);
                    let mut text = String::new();
                    render_inline(child_el, &mut text);
                    flush(&mut text, kind, blocks);
                } else if is_container(name) {
                    flush(&mut loose, BlockKind::Paragraph, blocks);
                    collect_blocks(child_el, blocks);
                } else {
                    render_inline(child_el, &mut loose);
                }
            }
            _ => {}
        }
    }
    flush(&mut loose, BlockKind::Paragraph, blocks);
}

fn render_inline(element: ElementRef, buf: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(buf, text),
            Node::Element(el) => {
                let name = el.name();
                if is_skipped(name) {
                    continue;
                }
                if name == "br" {
                    trim_trailing_space(buf);
                    buf.push('\n');
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    let nested_block = block_kind(name).is_some();
                    if nested_block && !buf.is_empty() && !buf.ends_with('\n') {
                        trim_trailing_space(buf);
                        buf.push('\n');
                    }
                    render_inline(child_el, buf);
                }
            }
            _ => {}
        }
    }
}

/// Append text collapsing whitespace runs to one space.
fn push_text(buf: &mut String, text: &str) {
    let mut last_was_space = buf.is_empty() || buf.ends_with(' ') || buf.ends_with('\n');
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                buf.push(' ');
                last_was_space = true;
            }
        } else {
            buf.push(ch);
            last_was_space = false;
        }
    }
}

fn trim_trailing_space(buf: &mut String) {
    while buf.ends_with(' ') {
        buf.pop();
    }
}

fn flush(buf: &mut String, kind: BlockKind, blocks: &mut Vec<Block>) {
    let text = buf
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();
    buf.clear();
    if !text.is_empty() {
        blocks.push(Block { kind, text });
    }
}
