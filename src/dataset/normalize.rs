//! Record normalization.
//!
//! Header names arrive in whatever casing and spacing the spreadsheet used
//! ("Buying Entity", "ORBIT AU", "orbitau"). Rows are re-keyed by the
//! lower-cased, whitespace-free header so lookups only deal with canonical
//! names. Values are left untouched; trimming happens at lookup time.

use std::collections::HashMap;

/// One input row as `(header, value)` pairs in column order.
pub type RawRow = Vec<(String, String)>;

/// Canonical field names, with aliases listed in lookup priority.
pub mod fields {
    pub const BUYING_ENTITY: &[&str] = &["buyingentity"];
    pub const TENANT: &[&str] = &["tenant"];
    pub const GALAXY: &[&str] = &["galaxy"];
    pub const STAR: &[&str] = &["star"];
    pub const STAR_COLOR: &[&str] = &["starcolor"];
    pub const STAR_RADIUS: &[&str] = &["starradius"];
    pub const ORBIT_ID: &[&str] = &["orbit", "orbitid", "orbitindex"];
    pub const ORBIT_NAME: &[&str] = &["orbitname", "orbitlabel", "orbitdesc"];
    pub const ORBIT_TYPE: &[&str] = &["orbittype"];
    pub const ORBIT_STYLE: &[&str] = &["orbitstyle"];
    pub const ORBIT_COLOR: &[&str] = &["orbitcolor"];
    pub const ORBIT_AU: &[&str] = &["orbitau"];
    pub const BODY_NAME: &[&str] = &["bodyname", "planet", "name"];
    pub const BODY_TYPE: &[&str] = &["bodytype"];
    pub const BODY_RADIUS: &[&str] = &["bodyradius", "planetradius"];
    pub const BODY_COLOR: &[&str] = &["bodycolor", "planetcolor"];
    pub const PERIOD_DAYS: &[&str] = &["perioddays"];
    pub const NOTES: &[&str] = &["notes"];
}

/// A row keyed by canonical field names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedRow {
    fields: HashMap<String, String>,
}

/// Lower-case a header name and strip every whitespace character.
pub fn canonical_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Re-key a row by canonical header names.
///
/// When two headers collapse onto the same canonical name the later column
/// wins. Never fails; absent headers are simply absent from the result.
pub fn normalize_row<K, V>(row: impl IntoIterator<Item = (K, V)>) -> NormalizedRow
where
    K: AsRef<str>,
    V: Into<String>,
{
    let fields = row
        .into_iter()
        .map(|(key, value)| (canonical_key(key.as_ref()), value.into()))
        .collect();
    NormalizedRow { fields }
}

/// Parse a decimal that may use a comma as the fractional separator.
///
/// Returns `None` for empty, unparsable or non-finite input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

impl NormalizedRow {
    /// Raw value stored under a canonical key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Number of distinct canonical keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First non-empty trimmed value among `aliases`, or an empty string.
    pub fn text(&self, aliases: &[&str]) -> String {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    /// Numeric value of the first non-empty alias.
    pub fn number(&self, aliases: &[&str]) -> Option<f64> {
        parse_number(&self.text(aliases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_strips_case_and_spaces() {
        assert_eq!(canonical_key("Buying Entity"), "buyingentity");
        assert_eq!(canonical_key("  ORBIT\tAU "), "orbitau");
        assert_eq!(canonical_key("period days"), "perioddays");
    }

    #[test]
    fn test_normalize_keeps_values_verbatim() {
        let row = normalize_row([("Star Color", "  #FFAA00 "), ("Tenant", "Acme")]);
        assert_eq!(row.get("starcolor"), Some("  #FFAA00 "));
        assert_eq!(row.get("tenant"), Some("Acme"));
        assert_eq!(row.get("Tenant"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_later_duplicate_header_wins() {
        let row = normalize_row([("Star", "Sol"), ("STAR", "Vega")]);
        assert_eq!(row.get("star"), Some("Vega"));
    }

    #[test]
    fn test_text_uses_alias_priority_and_skips_blank() {
        let row = normalize_row([("planet", "  "), ("name", " Earth "), ("bodyname", "")]);
        assert_eq!(row.text(fields::BODY_NAME), "Earth");

        let row = normalize_row([("orbitindex", "3"), ("orbit", "inner")]);
        assert_eq!(row.text(fields::ORBIT_ID), "inner");
    }

    #[test]
    fn test_parse_number_accepts_comma_decimal() {
        assert_eq!(parse_number("2,5"), Some(2.5));
        assert_eq!(parse_number(" 10.25 "), Some(10.25));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
