//! Restricted markdown for slide bodies.
//!
//! The authoring surface only promises paragraphs, bullet lists and ordered
//! lists; anything fancier is treated as plain paragraph text. No external
//! markup crate: the subset is three line shapes.

/// One renderable block of body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Bullets(Vec<String>),
    Ordered(Vec<String>),
}

/// Parse a body string into blocks. Blank lines separate paragraphs;
/// consecutive list lines of the same kind group into one list.
pub fn parse_blocks(body: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    fn flush(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(paragraph.join(" ")));
            paragraph.clear();
        }
    }

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut paragraph, &mut blocks);
        } else if let Some(item) = bullet_item(line) {
            flush(&mut paragraph, &mut blocks);
            match blocks.last_mut() {
                Some(Block::Bullets(items)) => items.push(item.to_string()),
                _ => blocks.push(Block::Bullets(vec![item.to_string()])),
            }
        } else if let Some(item) = ordered_item(line) {
            flush(&mut paragraph, &mut blocks);
            match blocks.last_mut() {
                Some(Block::Ordered(items)) => items.push(item.to_string()),
                _ => blocks.push(Block::Ordered(vec![item.to_string()])),
            }
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut paragraph, &mut blocks);
    blocks
}

fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let blocks = parse_blocks("first line\nstill first\n\nsecond");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("first line still first".into()),
                Block::Paragraph("second".into()),
            ]
        );
    }

    #[test]
    fn test_bullet_and_ordered_lists() {
        let blocks = parse_blocks("Specials:\n- one\n* two\n1. first\n2) second");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("Specials:".into()),
                Block::Bullets(vec!["one".into(), "two".into()]),
                Block::Ordered(vec!["first".into(), "second".into()]),
            ]
        );
    }

    #[test]
    fn test_unsupported_markup_stays_plain() {
        let blocks = parse_blocks("# not a heading\n<b>not html</b>");
        assert_eq!(
            blocks,
            vec![Block::Paragraph("# not a heading <b>not html</b>".into())]
        );
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n\n").is_empty());
    }
}
