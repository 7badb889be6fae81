//! Markdown code-fence stripping:  ```lang … ```

use log::debug;
use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::multispace0,
    combinator::opt,
    sequence::terminated,
    IResult,
};

const FENCE: &str = "```";

#[inline]
fn is_lang_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

/// "```" + optional language tag + the whitespace that follows it.
fn fence_opener(input: &str) -> IResult<&str, Option<&str>> {
    let (input, _) = tag(FENCE)(input)?;
    terminated(opt(take_while1(is_lang_char)), multispace0)(input)
}

/// If `text` opens with a fence, return the fenced body with the opener
/// line removed and, when it is the last thing in the text, the closing
/// fence too. Returns `None` when `text` does not start with a fence.
pub fn strip_fence(text: &str) -> Option<&str> {
    let (body, lang) = fence_opener(text).ok()?;
    debug!("[fence] stripping opener (lang: {:?})", lang);

    let body = body.trim_end();
    let body = match body.strip_suffix(FENCE) {
        Some(inner) => inner.trim_end(),
        // closing fence is followed by prose; boundary extraction deals with it
        None => body,
    };
    Some(body)
}
