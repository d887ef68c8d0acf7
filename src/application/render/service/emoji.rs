//! Emoji-to-image substitution over rendered HTML fragments.

use lol_html::{RewriteStrSettings, doc_text, html_content::ContentType, rewrite_str};

use crate::application::render::types::{EmojiRender, RenderError};

const ZWJ: char = '\u{200D}';
const VARIATION_SELECTOR: char = '\u{FE0F}';
const COMBINING_KEYCAP: char = '\u{20E3}';
const BLACK_FLAG: char = '\u{1F3F4}';
const TAG_TERMINATOR: char = '\u{E007F}';

/// Replaces Unicode emoji sequences with fixed-shape `<img class="emoji">`
/// tags pointing at a Twemoji-style asset location.
///
/// Substitution runs over the *final* markup of the body text: only text
/// nodes are rewritten, so tags and attribute values pass through untouched
/// and the emitted `<img>` tags are the only markup this stage introduces.
/// Input containing no emoji is returned byte-identical.
pub struct TwemojiRenderer {
    prefix: String,
    ext: String,
}

impl TwemojiRenderer {
    pub fn new(asset_base: &str, folder: &str, ext: &str) -> Self {
        Self {
            prefix: format!("{asset_base}{folder}/"),
            ext: ext.to_string(),
        }
    }
}

impl EmojiRender for TwemojiRenderer {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        if !source.chars().any(could_be_emoji) {
            return Ok(source.to_string());
        }

        let prefix = self.prefix.as_str();
        let ext = self.ext.as_str();
        // Text nodes may arrive split across several chunks; buffer until the
        // final chunk so sequences cannot be cut mid-scan.
        let mut buffer = String::new();

        rewrite_str(
            source,
            RewriteStrSettings {
                document_content_handlers: vec![doc_text!(move |chunk| {
                    buffer.push_str(chunk.as_str());
                    if chunk.last_in_text_node() {
                        let replaced = replace_emoji(&buffer, prefix, ext);
                        chunk.replace(&replaced, ContentType::Html);
                        buffer.clear();
                    } else {
                        chunk.remove();
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
        .map_err(|err| RenderError::Emoji {
            message: err.to_string(),
        })
    }
}

fn replace_emoji(text: &str, prefix: &str, ext: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut index = 0;

    while index < chars.len() {
        match match_emoji(&chars[index..]) {
            Some(len) => {
                let sequence: String = chars[index..index + len].iter().collect();
                push_emoji_img(&mut out, &sequence, prefix, ext);
                index += len;
            }
            None => {
                out.push(chars[index]);
                index += 1;
            }
        }
    }

    out
}

fn push_emoji_img(out: &mut String, sequence: &str, prefix: &str, ext: &str) {
    out.push_str("<img class=\"emoji\" draggable=\"false\" alt=\"");
    out.push_str(sequence);
    out.push_str("\" src=\"");
    out.push_str(prefix);
    out.push_str(&asset_name(sequence));
    out.push_str(ext);
    out.push_str("\"/>");
}

/// Twemoji asset naming: lowercase hex scalars joined by `-`, dropping
/// `U+FE0F` whenever the sequence carries no `U+200D`.
fn asset_name(sequence: &str) -> String {
    let keep_variation = sequence.contains(ZWJ);
    let codes: Vec<String> = sequence
        .chars()
        .filter(|&ch| keep_variation || ch != VARIATION_SELECTOR)
        .map(|ch| format!("{:x}", ch as u32))
        .collect();
    codes.join("-")
}

/// Length in chars of the emoji sequence starting at `chars[0]`, if any.
fn match_emoji(chars: &[char]) -> Option<usize> {
    let first = *chars.first()?;

    if is_regional_indicator(first) {
        return match chars.get(1) {
            Some(&second) if is_regional_indicator(second) => Some(2),
            _ => None,
        };
    }

    if is_keycap_base(first) {
        let mut len = 1;
        if chars.get(len) == Some(&VARIATION_SELECTOR) {
            len += 1;
        }
        return (chars.get(len) == Some(&COMBINING_KEYCAP)).then_some(len + 1);
    }

    if first == BLACK_FLAG
        && let Some(len) = match_tag_sequence(chars)
    {
        return Some(len);
    }

    let mut len = match_single_emoji(chars)?;
    while chars.get(len) == Some(&ZWJ) {
        match match_single_emoji(&chars[len + 1..]) {
            Some(next) => len += 1 + next,
            None => break,
        }
    }
    Some(len)
}

/// Subdivision flags: black flag, one or more tag characters, terminator.
fn match_tag_sequence(chars: &[char]) -> Option<usize> {
    let mut len = 1;
    while chars.get(len).is_some_and(|&c| is_tag_char(c)) {
        len += 1;
    }
    (len > 1 && chars.get(len) == Some(&TAG_TERMINATOR)).then_some(len + 1)
}

/// One emoji unit: a pictographic scalar, or a text-presentation symbol
/// upgraded by `U+FE0F`, optionally followed by a skin tone and/or `U+FE0F`.
fn match_single_emoji(chars: &[char]) -> Option<usize> {
    let first = *chars.first()?;

    if !is_pictographic(first)
        && !(is_text_presentation(first) && chars.get(1) == Some(&VARIATION_SELECTOR))
    {
        return None;
    }

    let mut len = 1;
    if chars.get(len).is_some_and(|&c| is_skin_tone(c)) {
        len += 1;
    }
    if chars.get(len) == Some(&VARIATION_SELECTOR) {
        len += 1;
    }
    Some(len)
}

/// Cheap prefilter: can this scalar appear anywhere inside an emoji
/// sequence this renderer recognizes?
fn could_be_emoji(c: char) -> bool {
    let cp = c as u32;
    (0x2000..=0x3300).contains(&cp)
        || (0x1F000..=0x1FAFF).contains(&cp)
        || (0xE0020..=0xE007F).contains(&cp)
        || cp == 0xFE0F
        || cp == 0xA9
        || cp == 0xAE
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_keycap_base(c: char) -> bool {
    matches!(c, '#' | '*' | '0'..='9')
}

fn is_tag_char(c: char) -> bool {
    ('\u{E0020}'..='\u{E007E}').contains(&c)
}

fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

/// Scalars rendered with emoji presentation by default (Unicode
/// `Emoji_Presentation` blocks, pragmatically grouped).
fn is_pictographic(c: char) -> bool {
    matches!(c,
        '\u{231A}' | '\u{231B}'
        | '\u{23E9}'..='\u{23EC}'
        | '\u{23F0}' | '\u{23F3}'
        | '\u{25FD}' | '\u{25FE}'
        | '\u{2614}' | '\u{2615}'
        | '\u{2648}'..='\u{2653}'
        | '\u{267F}' | '\u{2693}' | '\u{26A1}' | '\u{26AA}' | '\u{26AB}'
        | '\u{26BD}' | '\u{26BE}' | '\u{26C4}' | '\u{26C5}'
        | '\u{26CE}' | '\u{26D4}' | '\u{26EA}'
        | '\u{26F2}' | '\u{26F3}' | '\u{26F5}' | '\u{26FA}' | '\u{26FD}'
        | '\u{2705}' | '\u{270A}' | '\u{270B}'
        | '\u{2728}' | '\u{274C}' | '\u{274E}'
        | '\u{2753}'..='\u{2755}' | '\u{2757}'
        | '\u{2795}'..='\u{2797}' | '\u{27B0}' | '\u{27BF}'
        | '\u{2B1B}' | '\u{2B1C}' | '\u{2B50}' | '\u{2B55}'
        | '\u{1F004}' | '\u{1F0CF}'
        | '\u{1F18E}' | '\u{1F191}'..='\u{1F19A}'
        | '\u{1F201}' | '\u{1F21A}' | '\u{1F22F}'
        | '\u{1F232}'..='\u{1F236}' | '\u{1F238}'..='\u{1F23A}'
        | '\u{1F250}' | '\u{1F251}'
        | '\u{1F300}'..='\u{1F320}'
        | '\u{1F32D}'..='\u{1F335}'
        | '\u{1F337}'..='\u{1F37C}'
        | '\u{1F37E}'..='\u{1F393}'
        | '\u{1F3A0}'..='\u{1F3CA}'
        | '\u{1F3CF}'..='\u{1F3D3}'
        | '\u{1F3E0}'..='\u{1F3F0}'
        | '\u{1F3F4}'
        | '\u{1F3F8}'..='\u{1F43E}'
        | '\u{1F440}'
        | '\u{1F442}'..='\u{1F4FC}'
        | '\u{1F4FF}'..='\u{1F53D}'
        | '\u{1F54B}'..='\u{1F54E}'
        | '\u{1F550}'..='\u{1F567}'
        | '\u{1F57A}' | '\u{1F595}' | '\u{1F596}' | '\u{1F5A4}'
        | '\u{1F5FB}'..='\u{1F64F}'
        | '\u{1F680}'..='\u{1F6C5}'
        | '\u{1F6CC}' | '\u{1F6D0}'..='\u{1F6D2}' | '\u{1F6D5}'..='\u{1F6D7}'
        | '\u{1F6DC}'..='\u{1F6DF}' | '\u{1F6EB}' | '\u{1F6EC}'
        | '\u{1F6F4}'..='\u{1F6FC}'
        | '\u{1F7E0}'..='\u{1F7EB}' | '\u{1F7F0}'
        | '\u{1F90C}'..='\u{1F93A}' | '\u{1F93C}'..='\u{1F945}'
        | '\u{1F947}'..='\u{1F9FF}'
        | '\u{1FA70}'..='\u{1FAFF}'
    )
}

/// Text-presentation symbols that become emoji only when followed by
/// `U+FE0F`.
fn is_text_presentation(c: char) -> bool {
    matches!(c,
        '\u{00A9}' | '\u{00AE}' | '\u{203C}' | '\u{2049}' | '\u{2122}' | '\u{2139}'
        | '\u{2194}'..='\u{2199}' | '\u{21A9}' | '\u{21AA}'
        | '\u{2328}' | '\u{23CF}' | '\u{23ED}'..='\u{23EF}'
        | '\u{23F1}' | '\u{23F2}' | '\u{23F8}'..='\u{23FA}'
        | '\u{24C2}' | '\u{25AA}' | '\u{25AB}' | '\u{25B6}' | '\u{25C0}'
        | '\u{25FB}' | '\u{25FC}'
        | '\u{2600}'..='\u{2604}' | '\u{260E}' | '\u{2611}' | '\u{2618}'
        | '\u{261D}' | '\u{2620}' | '\u{2622}' | '\u{2623}' | '\u{2626}'
        | '\u{262A}' | '\u{262E}' | '\u{262F}' | '\u{2638}'..='\u{263A}'
        | '\u{2640}' | '\u{2642}' | '\u{265F}' | '\u{2660}' | '\u{2663}'
        | '\u{2665}' | '\u{2666}' | '\u{2668}' | '\u{267B}' | '\u{267E}'
        | '\u{2692}' | '\u{2694}'..='\u{2697}' | '\u{2699}' | '\u{269B}'
        | '\u{269C}' | '\u{26A0}' | '\u{26A7}' | '\u{26B0}' | '\u{26B1}'
        | '\u{26C8}' | '\u{26CF}' | '\u{26D1}' | '\u{26D3}' | '\u{26E9}'
        | '\u{26F0}' | '\u{26F1}' | '\u{26F4}' | '\u{26F7}'..='\u{26F9}'
        | '\u{2702}' | '\u{2708}' | '\u{2709}' | '\u{270C}' | '\u{270D}'
        | '\u{270F}' | '\u{2712}' | '\u{2714}' | '\u{2716}' | '\u{271D}'
        | '\u{2721}' | '\u{2733}' | '\u{2734}' | '\u{2744}' | '\u{2747}'
        | '\u{2763}' | '\u{2764}' | '\u{27A1}' | '\u{2934}' | '\u{2935}'
        | '\u{2B05}'..='\u{2B07}'
        | '\u{3030}' | '\u{303D}' | '\u{3297}' | '\u{3299}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TwemojiRenderer {
        TwemojiRenderer::new("https://twemoji.maxcdn.com/2/", "svg", ".svg")
    }

    #[test]
    fn replaces_a_single_pictograph() {
        let html = renderer().render("Ship it 🚀").expect("render succeeds");
        assert!(html.contains("src=\"https://twemoji.maxcdn.com/2/svg/1f680.svg\""));
        assert!(html.contains("class=\"emoji\""));
        assert!(html.contains("alt=\"🚀\""));
        assert!(html.starts_with("Ship it "));
    }

    #[test]
    fn skin_tone_modifier_joins_the_asset_name() {
        let html = renderer().render("👍🏽").expect("render succeeds");
        assert!(html.contains("/1f44d-1f3fd.svg"));
    }

    #[test]
    fn flag_pairs_become_one_image() {
        let html = renderer().render("🇺🇸").expect("render succeeds");
        assert!(html.contains("/1f1fa-1f1f8.svg"));
        assert_eq!(html.matches("<img").count(), 1);
    }

    #[test]
    fn keycap_sequence_drops_the_variation_selector() {
        let html = renderer().render("#️⃣").expect("render succeeds");
        assert!(html.contains("/23-20e3.svg"));
    }

    #[test]
    fn zwj_sequence_keeps_variation_selectors() {
        let html = renderer().render("❤️‍🔥").expect("render succeeds");
        assert!(html.contains("/2764-fe0f-200d-1f525.svg"));
        assert_eq!(html.matches("<img").count(), 1);
    }

    #[test]
    fn lone_variation_sequence_drops_fe0f_from_the_name() {
        let html = renderer().render("❤️").expect("render succeeds");
        assert!(html.contains("/2764.svg"));
    }

    #[test]
    fn family_zwj_sequence_is_a_single_image() {
        let html = renderer().render("👨‍👩‍👧").expect("render succeeds");
        assert!(html.contains("/1f468-200d-1f469-200d-1f467.svg"));
        assert_eq!(html.matches("<img").count(), 1);
    }

    #[test]
    fn subdivision_flag_tag_sequence_is_matched() {
        let html = renderer()
            .render("\u{1F3F4}\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}")
            .expect("render succeeds");
        assert!(html.contains("/1f3f4-e0067-e0062-e0065-e006e-e0067-e007f.svg"));
    }

    #[test]
    fn text_presentation_symbols_need_the_selector() {
        let plain = renderer().render("trademark ™ sign").expect("render succeeds");
        assert_eq!(plain, "trademark ™ sign");

        let upgraded = renderer().render("™️").expect("render succeeds");
        assert!(upgraded.contains("/2122.svg"));
    }

    #[test]
    fn plain_digits_are_not_keycaps() {
        let html = renderer().render("5 items for #2").expect("render succeeds");
        assert_eq!(html, "5 items for #2");
    }

    #[test]
    fn input_without_emoji_is_returned_verbatim() {
        let source = "<p>fish &amp; chips — £4</p>";
        let html = renderer().render(source).expect("render succeeds");
        assert_eq!(html, source);
    }

    #[test]
    fn attribute_values_are_never_rewritten() {
        let source = "<img src=\"rocket-🚀.png\" alt=\"🚀\"/> launch 🚀";
        let html = renderer().render(source).expect("render succeeds");
        assert!(html.contains("src=\"rocket-🚀.png\""));
        assert!(html.contains("alt=\"🚀\""));
        assert!(html.contains("/1f680.svg"));
    }

    #[test]
    fn emoji_between_escaped_entities_is_detected() {
        let html = renderer().render("&quot;😀&quot;").expect("render succeeds");
        assert!(html.starts_with("&quot;<img"));
        assert!(html.contains("/1f600.svg"));
        assert!(html.ends_with("&quot;"));
    }
}
