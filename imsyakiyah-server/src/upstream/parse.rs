//! Extraction of region dropdowns from upstream HTML.
//!
//! The site answers city lookups with a bare list of `<option>` elements
//! and renders provinces as a `<select>` on its landing page. Neither needs
//! a full HTML parser.

use std::sync::OnceLock;

use regex::Regex;

use super::error::UpstreamError;
use super::types::RegionOption;

/// Regexes for dropdown markup, compiled once.
struct DropdownRegex {
    select: Regex,
    option: Regex,
    value: Regex,
    tag: Regex,
}

impl DropdownRegex {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<DropdownRegex>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    select: Regex::new(r"(?is)<select\b([^>]*)>(.*?)</select\s*>").ok()?,
                    option: Regex::new(r"(?is)<option\b([^>]*)>(.*?)</option\s*>").ok()?,
                    value: Regex::new(r#"(?is)\bvalue\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
                        .ok()?,
                    tag: Regex::new(r"(?s)<[^>]*>").ok()?,
                })
            })
            .as_ref()
    }
}

/// Parse every `<option>` in `html`, in document order.
///
/// The `value` attribute becomes the code (empty if absent); the text with
/// nested tags stripped becomes the name. Entities are decoded in both.
pub fn parse_options(html: &str) -> Vec<RegionOption> {
    let Some(re) = DropdownRegex::get() else {
        return Vec::new();
    };

    re.option
        .captures_iter(html)
        .map(|c| {
            let attrs = c.get(1).map_or("", |m| m.as_str());
            let inner = c.get(2).map_or("", |m| m.as_str());

            let code = re
                .value
                .captures(attrs)
                .and_then(|v| v.get(1).or_else(|| v.get(2)).or_else(|| v.get(3)))
                .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned())
                .unwrap_or_default();

            let text = re.tag.replace_all(inner, "");
            let name = html_escape::decode_html_entities(&text).trim().to_string();

            RegionOption { code, name }
        })
        .collect()
}

/// Parse the province dropdown from the landing page.
///
/// Picks the first `<select>` whose attributes mention "prov" and drops the
/// placeholder option (the one without a value).
pub fn parse_province_options(html: &str) -> Result<Vec<RegionOption>, UpstreamError> {
    let re = DropdownRegex::get()
        .ok_or_else(|| UpstreamError::Markup("dropdown patterns unavailable".to_string()))?;

    let body = re
        .select
        .captures_iter(html)
        .find(|c| {
            c.get(1)
                .is_some_and(|attrs| attrs.as_str().to_lowercase().contains("prov"))
        })
        .and_then(|c| c.get(2))
        .ok_or_else(|| UpstreamError::Markup("no province dropdown on landing page".to_string()))?;

    Ok(parse_options(body.as_str())
        .into_iter()
        .filter(|o| !o.code.is_empty())
        .collect())
}
