//! # Hyperlink Rewriting
//!
//! Generated replies mention emails and web addresses as plain text. This
//! module rewrites them into HTML anchors so the frontend can render them as
//! clickable links. Emails and bare domains overlap (every email contains a
//! domain), so the rewrite runs as independent passes over a placeholder
//! table: matched spans are swapped for opaque tokens first and only
//! resolved to markup at the end, which keeps one pass from re-matching the
//! output of another.

use regex::Regex;

const LINK_STYLE: &str = "color: #0066cc; text-decoration: underline; font-weight: 500;";

/// Rewrites emails and URLs in free text into HTML anchors.
///
/// Running the rewriter over its own output is a no-op: existing anchors are
/// protected behind placeholders before the email and URL passes run.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    anchor_re: Regex,
    email_re: Regex,
    url_re: Regex,
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkRewriter {
    pub fn new() -> Self {
        // The patterns are fixed literals, so compilation cannot fail.
        Self {
            anchor_re: Regex::new(r"(?s)<a\s[^>]*>.*?</a>").unwrap(),
            email_re: Regex::new(r"([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})").unwrap(),
            url_re: Regex::new(r"((?:https?://)?(?:www\.)?[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(?:/[^\s]*)?)")
                .unwrap(),
        }
    }

    /// Converts URLs and email addresses in `text` to HTML hyperlinks.
    pub fn rewrite(&self, text: &str) -> String {
        let mut placeholders: Vec<(String, String)> = Vec::new();

        // Pass 0: protect spans that are already anchors.
        let result = self
            .anchor_re
            .replace_all(text, |caps: &regex::Captures| {
                stash(&mut placeholders, caps[0].to_string())
            })
            .into_owned();

        // Pass 1: emails become mailto links.
        let result = self
            .email_re
            .replace_all(&result, |caps: &regex::Captures| {
                let email = &caps[1];
                let markup =
                    format!("<a href=\"mailto:{email}\" style=\"{LINK_STYLE}\">{email}</a>");
                stash(&mut placeholders, markup)
            })
            .into_owned();

        // Pass 2: remaining URL-shaped tokens. Emails are placeholders by
        // now, so they cannot be re-matched here.
        let result = self
            .url_re
            .replace_all(&result, |caps: &regex::Captures| {
                let url = &caps[1];
                if url.contains("___LINK_") {
                    return url.to_string();
                }
                let href = normalize_href(url);
                let markup = format!(
                    "<a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"{LINK_STYLE}\">{url}</a>"
                );
                stash(&mut placeholders, markup)
            })
            .into_owned();

        // Pass 3: resolve every placeholder to its markup.
        let mut resolved = result;
        for (token, markup) in placeholders {
            resolved = resolved.replace(&token, &markup);
        }
        resolved
    }
}

fn stash(placeholders: &mut Vec<(String, String)>, markup: String) -> String {
    let token = format!("___LINK_{}___", placeholders.len());
    placeholders.push((token.clone(), markup));
    token
}

/// Normalizes a matched URL to an absolute `https://` href. The portal's own
/// `www.`-prefixed domain maps to its canonical root.
fn normalize_href(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("www.possap.gov.ng") {
        format!("https://possap.gov.ng{rest}")
    } else if let Some(rest) = url.strip_prefix("www.") {
        format!("https://{rest}")
    } else {
        format!("https://{url}")
    }
}

/// Convenience wrapper for one-off rewrites.
pub fn convert_to_hyperlinks(text: &str) -> String {
    LinkRewriter::new().rewrite(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_email_and_url_without_corrupting_either() {
        let input = "Contact us at info@possap.gov.ng or www.possap.gov.ng";
        let output = convert_to_hyperlinks(input);

        assert!(
            output.contains("<a href=\"mailto:info@possap.gov.ng\""),
            "email was not linked: {output}"
        );
        assert!(
            output.contains("<a href=\"https://possap.gov.ng\""),
            "url was not normalized to the canonical root: {output}"
        );
        assert!(output.contains(">www.possap.gov.ng</a>"));
        assert!(!output.contains("___LINK_"), "placeholder leaked: {output}");
    }

    #[test]
    fn is_idempotent() {
        let input = "Email info@possap.gov.ng, visit www.possap.gov.ng or https://nimc.gov.ng/help now.";
        let once = convert_to_hyperlinks(input);
        let twice = convert_to_hyperlinks(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn identity_on_text_without_linkable_tokens() {
        let input = "Hello! May I know your name?";
        assert_eq!(convert_to_hyperlinks(input), input);
    }

    #[test]
    fn preserves_scheme_prefixed_urls() {
        let output = convert_to_hyperlinks("See https://possap.gov.ng/faq for details");
        assert!(output.contains("<a href=\"https://possap.gov.ng/faq\""));
        assert!(output.contains(">https://possap.gov.ng/faq</a>"));
    }

    #[test]
    fn prefixes_bare_domains_with_https() {
        let output = convert_to_hyperlinks("try possap.gov.ng first");
        assert!(output.contains("<a href=\"https://possap.gov.ng\""));
    }

    #[test]
    fn strips_www_from_external_domains() {
        let output = convert_to_hyperlinks("see www.nimc.gov.ng");
        assert!(output.contains("<a href=\"https://nimc.gov.ng\""));
        assert!(output.contains(">www.nimc.gov.ng</a>"));
    }

    #[test]
    fn opens_urls_in_new_tab_without_referrer() {
        let output = convert_to_hyperlinks("possap.gov.ng");
        assert!(output.contains("target=\"_blank\""));
        assert!(output.contains("rel=\"noopener noreferrer\""));
    }
}
