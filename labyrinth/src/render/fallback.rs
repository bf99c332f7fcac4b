// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Placeholder card shown when no user data is available.

use std::fmt::Write as _;

use super::{
    BRAND_TAG, CANVAS_HEIGHT, CANVAS_WIDTH, escape_xml, open_document, write_brand_tag, write_frame,
    write_style
};
use crate::locale::Locale;

/// Site advertised on the placeholder card.
pub const SITE_URL: &str = "labyrinth.forimaginary.dev";

/// Renders the placeholder card with copy localized for `locale`.
///
/// ```
/// use labyrinth::render_fallback_card;
///
/// let svg = render_fallback_card("AAAA", "ko");
/// assert!(svg.contains("아직 등록되지 않은 모험가입니다."));
/// ```
pub fn render_fallback_card(font_base64: &str, locale: &str) -> String {
    let (headline, call_to_action) = Locale::from_tag(locale).fallback_lines();
    let center_x = f64::from(CANVAS_WIDTH) / 2.0;

    let mut buffer = String::with_capacity(4 * 1024 + font_base64.len());
    open_document(&mut buffer);
    buffer.push_str("  <defs>\n");
    write_style(&mut buffer, font_base64, "");
    buffer.push_str("  </defs>\n");

    let _ = writeln!(
        buffer,
        "  <rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"#0c0c16\"/>"
    );
    write_frame(&mut buffer);

    let _ = writeln!(
        buffer,
        "  <text x=\"{center_x}\" y=\"90\" fill=\"#d4a843\" font-size=\"20\" text-anchor=\"middle\" letter-spacing=\"4\">{BRAND_TAG}</text>"
    );
    let _ = writeln!(
        buffer,
        "  <line x1=\"120\" y1=\"105\" x2=\"{}\" y2=\"105\" stroke=\"#3a3525\" stroke-width=\"1\" opacity=\"0.5\"/>",
        CANVAS_WIDTH - 120
    );
    for (y, line) in [(140, headline), (165, call_to_action)] {
        let _ = writeln!(
            buffer,
            "  <text x=\"{center_x}\" y=\"{y}\" fill=\"#6a6a7a\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
            escape_xml(line)
        );
    }
    let _ = writeln!(
        buffer,
        "  <text x=\"{center_x}\" y=\"210\" fill=\"#d4a843\" font-size=\"9\" text-anchor=\"middle\" opacity=\"0.8\">{SITE_URL}</text>"
    );
    write_brand_tag(&mut buffer, "#1e1e30");
    buffer.push_str("</svg>\n");

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_copy_by_default() {
        let svg = render_fallback_card("Rk9OVA==", "en-US");
        assert!(svg.contains("This adventurer has not been registered yet."));
        assert!(svg.contains("Visit the site to create your character!"));
        assert!(svg.contains(SITE_URL));
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let svg = render_fallback_card("Rk9OVA==", "de");
        assert!(svg.contains("This adventurer"));
    }

    #[test]
    fn korean_copy_for_korean_tags() {
        let svg = render_fallback_card("Rk9OVA==", "ko-KR");
        assert!(svg.contains("사이트에 방문하여 캐릭터를 생성해 보세요!"));
    }

    #[test]
    fn embeds_font_and_title() {
        let svg = render_fallback_card("Rk9OVA==", "en");
        assert!(svg.contains("base64,Rk9OVA=="));
        assert_eq!(svg.matches(BRAND_TAG).count(), 2);
        assert!(svg.contains("x2=\"375\""));
    }

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(render_fallback_card("AA==", "en"), render_fallback_card("AA==", "en"));
    }
}
