//! Message text sanitization.
//!
//! Message bodies in the export sometimes carry literal markup: paragraph
//! wrappers, image and sticker tags, links. [`sanitize`] removes it, reports
//! which element kinds were removed, then repairs corrupted characters and
//! turns ascii smileys into emoji.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;

/// Any opening, closing or self-closing tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?P<close>/?)(?P<name>[A-Za-z][A-Za-z0-9-]*)[^<>]*?(?P<selfclose>/?)>")
        .expect("valid regex")
});

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Literal paragraph wrappers left over from older exports.
const PARAGRAPH_ARTIFACTS: &[&str] = &["<p>", "</p>"];

/// Sanitized text plus the kinds of markup removed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanitized {
    /// Cleaned text.
    pub text: String,
    /// Lower-cased element names of markup found, in document order.
    pub stripped_tags: Vec<String>,
}

/// Cleans one raw message text.
///
/// Steps, in order:
/// 1. remove literal `<p>` / `</p>` wrappers
/// 2. remove embedded markup fragments, recording their element names
/// 3. repair corrupted characters with the lexicon's fix map
/// 4. replace ascii smileys with emoji, longest token first
///
/// Never fails: unbalanced markup only leaves residual text behind.
///
/// # Example
///
/// ```rust
/// use chatstats::lexicon::Lexicon;
/// use chatstats::parsing::sanitize;
///
/// let lexicon = Lexicon::builtin()?;
/// let clean = sanitize("<p>kolla <img src=\"cat.gif\"> :)</p>", &lexicon);
/// assert_eq!(clean.text, "kolla  🙂");
/// assert_eq!(clean.stripped_tags, vec!["img"]);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn sanitize(raw: &str, lexicon: &Lexicon) -> Sanitized {
    let mut text = raw.to_string();
    for artifact in PARAGRAPH_ARTIFACTS {
        text = text.replace(artifact, "");
    }

    let (text, stripped_tags) = strip_markup(&text);
    let text = lexicon.fixes().apply(&text);
    let text = lexicon.ascii_emoji().apply(&text);

    Sanitized {
        text,
        stripped_tags,
    }
}

#[derive(Debug)]
struct TagToken<'a> {
    start: usize,
    end: usize,
    name: &'a str,
    closing: bool,
    self_closing: bool,
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Removes embedded markup fragments from `text`.
///
/// Each outermost element is cut out verbatim, from its opening tag through
/// its matching closing tag. Every element seen, nested ones included,
/// contributes its lower-cased name to the returned list. An opening tag
/// without a matching close is recorded but kept in the text, as are stray
/// closing tags. Removal repeats until nothing more can be cut, so markup
/// assembled from the pieces around a removed element goes too.
///
/// ```rust
/// use chatstats::parsing::sanitize::strip_markup;
///
/// let (text, tags) = strip_markup("se <a href=\"x\"><b>här</b></a>!");
/// assert_eq!(text, "se !");
/// assert_eq!(tags, vec!["a", "b"]);
/// ```
pub fn strip_markup(text: &str) -> (String, Vec<String>) {
    let mut tags = Vec::new();
    let mut current = text.to_string();
    loop {
        let (next, removed) = strip_pass(&current, &mut tags);
        if !removed {
            return (next, tags);
        }
        current = next;
    }
}

/// One removal pass. Returns the new text and whether anything was cut.
fn strip_pass(text: &str, tags: &mut Vec<String>) -> (String, bool) {
    let tokens: Vec<TagToken<'_>> = TAG_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(TagToken {
                start: whole.start(),
                end: whole.end(),
                name: caps.name("name")?.as_str(),
                closing: !caps["close"].is_empty(),
                self_closing: !caps["selfclose"].is_empty(),
            })
        })
        .collect();

    if tokens.is_empty() {
        return (text.to_string(), false);
    }

    let mut spans = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let open = &tokens[i];
        if open.closing {
            i += 1;
            continue;
        }

        if open.self_closing || is_void(open.name) {
            tags.push(open.name.to_ascii_lowercase());
            spans.push((open.start, open.end));
            i += 1;
            continue;
        }

        match find_close(&tokens, i) {
            Some(close) => {
                tags.extend(
                    tokens[i..close]
                        .iter()
                        .filter(|t| !t.closing)
                        .map(|t| t.name.to_ascii_lowercase()),
                );
                spans.push((open.start, tokens[close].end));
                i = close + 1;
            }
            None => {
                tags.push(open.name.to_ascii_lowercase());
                i += 1;
            }
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for &(start, end) in &spans {
        out.push_str(&text[cursor..start]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);

    (out, !spans.is_empty())
}

/// Finds the closing token matching the opening token at `open`.
fn find_close(tokens: &[TagToken<'_>], open: usize) -> Option<usize> {
    let name = tokens[open].name;
    let mut depth = 0usize;
    for (offset, token) in tokens[open + 1..].iter().enumerate() {
        if !token.name.eq_ignore_ascii_case(name) || token.self_closing {
            continue;
        }
        if token.closing {
            if depth == 0 {
                return Some(open + 1 + offset);
            }
            depth -= 1;
        } else {
            depth += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{AsciiEmojiMap, LexicalFixMap, MonthMap};

    fn lexicon() -> Lexicon {
        Lexicon::new(
            [('\u{e415}', '😄')].into_iter().collect::<LexicalFixMap>(),
            [(":)", "🙂"), (":-)", "🙂"), ("<3", "❤")]
                .into_iter()
                .collect::<AsciiEmojiMap>(),
            MonthMap::default(),
        )
    }

    #[test]
    fn test_plain_text_untouched() {
        let clean = sanitize("Hej på dig", &lexicon());
        assert_eq!(clean.text, "Hej på dig");
        assert!(clean.stripped_tags.is_empty());
    }

    #[test]
    fn test_paragraph_wrappers_removed() {
        let clean = sanitize("<p>Hej</p><p>då</p>", &lexicon());
        assert_eq!(clean.text, "Hejdå");
        assert!(clean.stripped_tags.is_empty());
    }

    #[test]
    fn test_image_and_link_removed() {
        let clean = sanitize(
            r#"titta <img src="photos/1.jpg" /> och <a href="https://example.com">länken</a>"#,
            &lexicon(),
        );
        assert_eq!(clean.text, "titta  och ");
        assert_eq!(clean.stripped_tags, vec!["img", "a"]);
    }

    #[test]
    fn test_nested_tags_reported_in_order() {
        let (text, tags) = strip_markup("x<div class=\"sticker\"><img src=\"s.png\"><span>hi</span></div>y");
        assert_eq!(text, "xy");
        assert_eq!(tags, vec!["div", "img", "span"]);
    }

    #[test]
    fn test_same_name_nesting() {
        let (text, tags) = strip_markup("a<div><div>in</div></div>b");
        assert_eq!(text, "ab");
        assert_eq!(tags, vec!["div", "div"]);
    }

    #[test]
    fn test_unclosed_tag_kept_in_text() {
        let (text, tags) = strip_markup("före <b>fet text");
        assert_eq!(text, "före <b>fet text");
        assert_eq!(tags, vec!["b"]);
    }

    #[test]
    fn test_tag_like_prose_survives() {
        let clean = sanitize("haha <lol> ok", &lexicon());
        assert_eq!(clean.text, "haha <lol> ok");
        assert_eq!(clean.stripped_tags, vec!["lol"]);

        let clean = sanitize("if a<b and c>d then", &lexicon());
        assert_eq!(clean.text, "if a<b and c>d then");
        assert_eq!(clean.stripped_tags, vec!["b"]);

        let clean = sanitize("hej <3 <Anna>", &lexicon());
        assert_eq!(clean.text, "hej ❤ <Anna>");
    }

    #[test]
    fn test_markup_exposed_by_removal_is_stripped() {
        let (text, tags) = strip_markup("<<i>x</i>b>y</b>");
        assert_eq!(text, "");
        assert_eq!(tags, vec!["i", "b"]);

        let once = sanitize("<<i>x</i>b>y</b> hej", &lexicon());
        let twice = sanitize(&once.text, &lexicon());
        assert_eq!(once.text, " hej");
        assert_eq!(once.text, twice.text);
    }

    #[test]
    fn test_stray_closing_tag_left() {
        let (text, tags) = strip_markup("text</b> mer");
        assert_eq!(text, "text</b> mer");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_heart_is_not_markup() {
        let clean = sanitize("jag <3 dig", &lexicon());
        assert_eq!(clean.text, "jag ❤ dig");
        assert!(clean.stripped_tags.is_empty());
    }

    #[test]
    fn test_fixes_then_emoji() {
        let clean = sanitize("\u{e415} :-) :)", &lexicon());
        assert_eq!(clean.text, "😄 🙂 🙂");
    }

    #[test]
    fn test_uppercase_tags_lowercased() {
        let (text, tags) = strip_markup("<IMG SRC=x>bild");
        assert_eq!(text, "bild");
        assert_eq!(tags, vec!["img"]);
    }

    #[test]
    fn test_idempotent() {
        let lexicon = lexicon();
        let inputs = [
            "<p>hej :)</p>",
            r#"kolla <a href="x">här</a> <3"#,
            "\u{e415}\u{e415}",
            "",
            "a  b   c",
        ];
        for input in inputs {
            let once = sanitize(input, &lexicon);
            let twice = sanitize(&once.text, &lexicon);
            assert_eq!(once.text, twice.text, "not idempotent for {input:?}");
        }
    }
}
