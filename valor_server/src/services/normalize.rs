//! Comparison keys for free-form place names.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching: strip diacritics, uppercase, join words with
/// a single underscore.
///
/// `"  Madre de Díos "` and `"MADRE_DE__DIOS"` both become `"MADRE_DE_DIOS"`.
/// The result is only ever compared, never stored or returned to clients.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let joined = stripped
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

/// [`normalize`] for optional input; absent text normalizes to `""`.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(normalize("Junín"), "JUNIN");
        assert_eq!(normalize("LÍMA"), "LIMA");
        assert_eq!(normalize("áncash"), "ANCASH");
    }

    #[test]
    fn enye_loses_its_tilde() {
        assert_eq!(normalize("Cañete"), "CANETE");
    }

    #[test]
    fn whitespace_becomes_single_underscore() {
        assert_eq!(normalize("  la   libertad "), "LA_LIBERTAD");
        assert_eq!(normalize("madre\tde\ndios"), "MADRE_DE_DIOS");
    }

    #[test]
    fn repeated_underscores_collapse() {
        assert_eq!(normalize("SAN__MARTIN"), "SAN_MARTIN");
        assert_eq!(normalize("san _ martin"), "SAN_MARTIN");
    }

    #[test]
    fn absent_text_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("piura")), "PIURA");
        assert_eq!(normalize(""), "");
    }
}
