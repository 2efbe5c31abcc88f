//! Login-form scraping for the hosted Keycloak login page
//!
//! The authorization endpoint answers the initial GET with an HTML login
//! page. The credential POST must go to the URL in that page's
//! `<form ... action="...">` attribute, which carries per-session query
//! parameters (`session_code`, `execution`, `tab_id`). This module extracts
//! that URL and decodes the HTML entities Keycloak escapes it with.
//!
//! Regex-based scraping is deliberate: the selection is "first form-like
//! element with an action attribute", nothing more, and a full HTML parser
//! would not change which URL is picked.

use regex::Regex;

use crate::error::{ItmoError, Result};

// ---------------------------------------------------------------------------
// Public functions
// ---------------------------------------------------------------------------

/// Extracts the first form action URL from a login page.
///
/// The match is case-insensitive, tolerates newlines inside the `<form>`
/// tag, and accepts any attribute order. The extracted value is
/// HTML-entity-decoded before it is returned, since Keycloak escapes the
/// `&` separators of the action's query string as `&amp;`.
///
/// # Arguments
///
/// * `html` - The full response body of the authorization endpoint.
///
/// # Errors
///
/// Returns [`ItmoError::FormNotFound`] when no `<form ... action="...">`
/// can be found, which signals that the provider's login markup changed or
/// that login is otherwise unavailable.
///
/// # Examples
///
/// ```
/// use itmo_schedule::auth::form::extract_form_action;
///
/// let html = r#"<form method="post" action="https://example/login?a=1&amp;b=2">"#;
/// let action = extract_form_action(html).unwrap();
/// assert_eq!(action, "https://example/login?a=1&b=2");
/// ```
pub fn extract_form_action(html: &str) -> Result<String> {
    let re = Regex::new(r#"(?is)<form\s[^>]*?action\s*=\s*"([^"]*)""#).unwrap();

    let action = re
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            ItmoError::FormNotFound("no <form ... action=\"...\"> in login page".to_string())
        })?;

    Ok(decode_html_entities(action))
}

/// Decodes the HTML entities that can appear in an escaped attribute value.
///
/// Handles the five named entities (`&amp;` `&lt;` `&gt;` `&quot;`
/// `&#39;`/`&apos;`) plus decimal (`&#38;`) and hex (`&#x26;`) numeric
/// references. Unrecognized or malformed sequences pass through unchanged.
pub fn decode_html_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let Some(end) = rest.find(';') else {
            // No terminating ';' anywhere after this '&'.
            out.push_str(rest);
            return out;
        };

        let entity = &rest[..=end];
        match decode_entity(entity) {
            Some(decoded) => {
                out.push(decoded);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decodes a single `&...;` sequence, returning `None` when it is not a
/// recognized entity.
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "&amp;" => Some('&'),
        "&lt;" => Some('<'),
        "&gt;" => Some('>'),
        "&quot;" => Some('"'),
        "&apos;" | "&#39;" => Some('\''),
        _ => {
            let body = entity.strip_prefix("&#")?.strip_suffix(';')?;
            let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X'))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                body.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // extract_form_action
    // -----------------------------------------------------------------------

    #[test]
    fn test_extracts_simple_action() {
        let html = r#"<form method="post" action="https://example/login">"#;
        let action = extract_form_action(html).expect("action must be found");
        assert_eq!(action, "https://example/login");
    }

    #[test]
    fn test_decodes_amp_entities_in_action() {
        let html = concat!(
            r#"<form id="kc-form-login" onsubmit="login.disabled = true; return true;" "#,
            r#"action="https://id.example/login-actions/authenticate?session_code=abc&amp;execution=def&amp;tab_id=g" "#,
            r#"method="post">"#
        );
        let action = extract_form_action(html).expect("action must be found");
        assert_eq!(
            action,
            "https://id.example/login-actions/authenticate?session_code=abc&execution=def&tab_id=g"
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let html = r#"<FORM METHOD="POST" ACTION="https://example/login">"#;
        let action = extract_form_action(html).expect("action must be found");
        assert_eq!(action, "https://example/login");
    }

    #[test]
    fn test_match_spans_multiple_lines() {
        let html = "<form\n  method=\"post\"\n  action=\"https://example/login\"\n>";
        let action = extract_form_action(html).expect("action must be found");
        assert_eq!(action, "https://example/login");
    }

    #[test]
    fn test_first_form_wins() {
        let html = concat!(
            r#"<form method="post" action="https://example/first">"#,
            r#"<form method="post" action="https://example/second">"#
        );
        let action = extract_form_action(html).expect("action must be found");
        assert_eq!(action, "https://example/first");
    }

    #[test]
    fn test_tolerates_whitespace_around_equals() {
        let html = r#"<form method="post" action = "https://example/login">"#;
        let action = extract_form_action(html).expect("action must be found");
        assert_eq!(action, "https://example/login");
    }

    #[test]
    fn test_missing_form_is_form_not_found() {
        let html = "<html><body><p>Service temporarily unavailable</p></body></html>";
        let err = extract_form_action(html).unwrap_err();
        assert!(
            err.to_string().contains("Login form not found"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_form_without_action_is_form_not_found() {
        let html = r#"<form method="post" id="kc-form-login">"#;
        assert!(extract_form_action(html).is_err());
    }

    #[test]
    fn test_empty_body_is_form_not_found() {
        assert!(extract_form_action("").is_err());
    }

    // -----------------------------------------------------------------------
    // decode_html_entities
    // -----------------------------------------------------------------------

    #[test]
    fn test_decode_plain_string_unchanged() {
        assert_eq!(decode_html_entities("https://example/login"), "https://example/login");
    }

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_html_entities("a&amp;b&lt;c&gt;d&quot;e&apos;f"), "a&b<c>d\"e'f");
    }

    #[test]
    fn test_decode_decimal_entity() {
        assert_eq!(decode_html_entities("a&#38;b"), "a&b");
    }

    #[test]
    fn test_decode_hex_entity() {
        assert_eq!(decode_html_entities("a&#x26;b"), "a&b");
        assert_eq!(decode_html_entities("a&#X26;b"), "a&b");
    }

    #[test]
    fn test_decode_numeric_apostrophe() {
        assert_eq!(decode_html_entities("it&#39;s"), "it's");
    }

    #[test]
    fn test_unknown_entity_passes_through() {
        assert_eq!(decode_html_entities("a&unknown;b"), "a&unknown;b");
    }

    #[test]
    fn test_lone_ampersand_passes_through() {
        assert_eq!(decode_html_entities("a&b"), "a&b");
        assert_eq!(decode_html_entities("a&"), "a&");
    }

    #[test]
    fn test_consecutive_entities_decode_independently() {
        assert_eq!(decode_html_entities("&amp;&amp;&amp;"), "&&&");
    }

    #[test]
    fn test_invalid_numeric_entity_passes_through() {
        assert_eq!(decode_html_entities("&#zz;"), "&#zz;");
        // Out-of-range code point.
        assert_eq!(decode_html_entities("&#1114112;"), "&#1114112;");
    }
}
