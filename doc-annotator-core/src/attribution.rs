//! Attribution templates and the "after the first heading" insertion point.
//!
//! Documents are treated as `\n`-separated lines. Insertion walks the lines once with a
//! small state machine:
//!
//! - `SeekingHeading`: copy lines until one starts with `#`.
//! - `CopyingHeaderSpan`: copy the lines following the heading. A line starting with `---`
//!   is copied and closes the span; a blank line closes the span without being consumed.
//!   The block goes right after the span.
//! - `Done`: copy everything else unchanged.
//!
//! If the span reaches the end of the document the block is appended there. A document
//! without any heading is left alone.

use crate::contract::Language;
use tracing::debug;

/// A fixed author/contact block and the literal markers that identify it in a document.
#[derive(Debug)]
pub struct AttributionBlock {
    pub language: Language,
    /// Block text as spliced into the document, without surrounding blank lines.
    pub text: &'static str,
    /// Any of these occurring in a document means it is already attributed.
    pub markers: &'static [&'static str],
}

pub static ENGLISH_BLOCK: AttributionBlock = AttributionBlock {
    language: Language::En,
    text: "---\n\
           \n\
           **Author**: Aitachi\n\
           **Email**: 44158892@qq.com\n\
           **Wechat**: 18116011230\n\
           \n\
           ---",
    markers: &["Author: Aitachi", "**Author**: Aitachi"],
};

pub static CHINESE_BLOCK: AttributionBlock = AttributionBlock {
    language: Language::Cn,
    text: "---\n\
           \n\
           **作者**: Aitachi\n\
           **邮箱**: 44158892@qq.com\n\
           **微信**: 18116011230\n\
           \n\
           ---",
    markers: &["作者: Aitachi", "**作者**: Aitachi"],
};

impl AttributionBlock {
    pub fn for_language(language: Language) -> &'static AttributionBlock {
        match language {
            Language::En => &ENGLISH_BLOCK,
            Language::Cn => &CHINESE_BLOCK,
        }
    }

    /// Whether `content` already carries one of this block's markers.
    pub fn is_present_in(&self, content: &str) -> bool {
        self.markers.iter().any(|m| content.contains(m))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingHeading,
    CopyingHeaderSpan,
    Done,
}

fn is_heading(line: &str) -> bool {
    line.starts_with('#')
}

fn is_rule(line: &str) -> bool {
    line.starts_with("---")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Splice `block` into `lines` after the first heading's span.
///
/// Returns `None` when no line is a heading.
pub fn splice_after_first_heading<'a>(lines: &[&'a str], block: &'a str) -> Option<Vec<&'a str>> {
    let mut out = Vec::with_capacity(lines.len() + 1);
    let mut state = ScanState::SeekingHeading;

    for (idx, &line) in lines.iter().enumerate() {
        state = match state {
            ScanState::SeekingHeading => {
                out.push(line);
                if is_heading(line) {
                    debug!(line = idx + 1, "Found first heading");
                    ScanState::CopyingHeaderSpan
                } else {
                    ScanState::SeekingHeading
                }
            }
            ScanState::CopyingHeaderSpan => {
                if is_blank(line) {
                    out.push(block);
                    out.push(line);
                    ScanState::Done
                } else if is_rule(line) {
                    out.push(line);
                    out.push(block);
                    ScanState::Done
                } else {
                    out.push(line);
                    ScanState::CopyingHeaderSpan
                }
            }
            ScanState::Done => {
                out.push(line);
                ScanState::Done
            }
        };
    }

    match state {
        ScanState::SeekingHeading => None,
        ScanState::CopyingHeaderSpan => {
            out.push(block);
            Some(out)
        }
        ScanState::Done => Some(out),
    }
}

/// Insert the attribution block for `language` into `content`.
///
/// Returns `None` if the document is already attributed or has no heading.
pub fn insert_attribution(content: &str, language: Language) -> Option<String> {
    let block = AttributionBlock::for_language(language);
    if block.is_present_in(content) {
        return None;
    }
    let lines: Vec<&str> = content.split('\n').collect();
    splice_after_first_heading(&lines, block.text).map(|spliced| spliced.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_block() -> &'static str {
        ENGLISH_BLOCK.text
    }

    #[test]
    fn block_goes_after_rule_line_following_heading() {
        let input = "# Title\n---\nBody text\n";
        let out = insert_attribution(input, Language::En).unwrap();
        assert_eq!(out, format!("# Title\n---\n{}\nBody text\n", en_block()));
    }

    #[test]
    fn block_goes_before_blank_line_following_heading() {
        let input = "# Title\n\nBody text\n";
        let out = insert_attribution(input, Language::En).unwrap();
        assert_eq!(out, format!("# Title\n{}\n\nBody text\n", en_block()));
    }

    #[test]
    fn non_blank_lines_after_heading_stay_in_the_span() {
        let input = "# Title\nsubtitle\n> quote\n\nBody\n";
        let out = insert_attribution(input, Language::En).unwrap();
        assert_eq!(
            out,
            format!("# Title\nsubtitle\n> quote\n{}\n\nBody\n", en_block())
        );
    }

    #[test]
    fn lines_before_heading_are_preserved() {
        let input = "<!-- front -->\n\n## Section\n\ntext";
        let out = insert_attribution(input, Language::En).unwrap();
        assert_eq!(
            out,
            format!("<!-- front -->\n\n## Section\n{}\n\ntext", en_block())
        );
    }

    #[test]
    fn only_first_heading_triggers_insertion() {
        let input = "# One\n\n# Two\n\n";
        let out = insert_attribution(input, Language::En).unwrap();
        assert_eq!(out.matches("**Author**: Aitachi").count(), 1);
        assert!(out.starts_with(&format!("# One\n{}\n", en_block())));
    }

    #[test]
    fn no_heading_means_no_insertion() {
        assert_eq!(insert_attribution("plain text\nmore\n", Language::En), None);
        assert_eq!(insert_attribution("", Language::Cn), None);
    }

    #[test]
    fn span_reaching_end_of_document_appends_block() {
        let input = "# Title\nonly line";
        let out = insert_attribution(input, Language::En).unwrap();
        assert_eq!(out, format!("# Title\nonly line\n{}", en_block()));
    }

    #[test]
    fn chinese_template_is_selected_by_language() {
        let input = "# 标题\n\n正文\n";
        let out = insert_attribution(input, Language::Cn).unwrap();
        assert!(out.contains("**作者**: Aitachi"));
        assert!(out.contains("**微信**: 18116011230"));
        assert!(!out.contains("**Author**"));
    }

    #[test]
    fn existing_marker_skips_insertion() {
        assert_eq!(
            insert_attribution("# T\n\nAuthor: Aitachi\n", Language::En),
            None
        );
        let once = insert_attribution("# T\n\nbody\n", Language::En).unwrap();
        assert_eq!(insert_attribution(&once, Language::En), None);
    }

    #[test]
    fn marker_check_is_language_specific() {
        let zh_attributed = insert_attribution("# T\n\nbody\n", Language::Cn).unwrap();
        assert!(CHINESE_BLOCK.is_present_in(&zh_attributed));
        assert!(!ENGLISH_BLOCK.is_present_in(&zh_attributed));
    }

    #[test]
    fn crlf_lines_are_handled_and_preserved() {
        let input = "# Title\r\n\r\nBody\r\n";
        let out = insert_attribution(input, Language::En).unwrap();
        assert_eq!(out, format!("# Title\r\n{}\n\r\nBody\r\n", en_block()));
    }
}
