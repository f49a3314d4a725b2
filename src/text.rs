//! Color-code handling and identifier normalization for menu titles and item names.
//!
//! Authors write colors with `&` prefixes (`&bShop`); the host displays the
//! section-sign form (`§bShop`). Identifiers used for lookup and equality are
//! derived from the color-stripped text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix used by the host for formatting codes
pub const SECTION_SIGN: char = '§';

/// Prefix menu authors use for formatting codes
pub const ALT_COLOR_CHAR: char = '&';

static AUTHOR_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&([0-9A-Fa-fK-Ok-oRr])").expect("valid author color regex"));

static ANY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[§&][0-9A-Fa-fK-Ok-oRrXx]").expect("valid strip color regex"));

/// Translate `&`-prefixed codes into host codes (`&a` -> `§a`)
pub fn colorize(text: &str) -> String {
    AUTHOR_CODE
        .replace_all(text, |caps: &regex::Captures| {
            format!("{}{}", SECTION_SIGN, caps[1].to_ascii_lowercase())
        })
        .into_owned()
}

/// Remove every formatting code, in either form
pub fn strip_colors(text: &str) -> String {
    ANY_CODE.replace_all(text, "").into_owned()
}

/// Normalize a title into the identifier used for lookup and equality.
///
/// `"&bMy Shop"` and `"My shop"` both become `MY_SHOP`.
pub fn raw_identifier(text: &str) -> String {
    strip_colors(&colorize(text)).to_uppercase().replace(' ', "_")
}
