// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! SVG card rendering.
//!
//! The builders in this module are pure: they receive fully resolved data,
//! including base64 encoded font and sprite bytes, and return a
//! self-contained SVG document on a fixed 495×270 canvas. Identical input
//! always yields byte-identical output.
//!
//! All dynamic text passes through [`escape_xml`] before it is embedded.

mod campfire;
mod fallback;
mod status;

use std::{borrow::Cow, fmt::Write as _};

pub use campfire::{CampfireCardData, CampfireCharacter, SEATS, Seat, render_campfire_card};
pub use fallback::render_fallback_card;
pub use status::{StatusCardData, bar_begin_delay, bar_fill_width, render_status_card};

/// Canvas width in SVG user units.
pub const CANVAS_WIDTH: u32 = 495;

/// Canvas height in SVG user units.
pub const CANVAS_HEIGHT: u32 = 270;

/// Font family name registered by the embedded `@font-face` rule.
pub(crate) const FONT_FAMILY: &str = "Galmuri9";

/// Brand tag printed along the bottom edge of every card.
pub(crate) const BRAND_TAG: &str = "GIT LABYRINTH";

/// Escapes characters reserved by XML.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// ```
/// use labyrinth::escape_xml;
///
/// assert_eq!(escape_xml("<script>"), "&lt;script&gt;");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len() + 16);
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

fn open_document(buffer: &mut String) {
    let _ = writeln!(
        buffer,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" viewBox=\"0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}\">"
    );
}

/// Writes the `@font-face` rule. `extra_rules` lands inside the same
/// `<style>` element.
fn write_style(buffer: &mut String, font_base64: &str, extra_rules: &str) {
    let _ = writeln!(
        buffer,
        "    <style>\n      @font-face {{\n        font-family: '{FONT_FAMILY}';\n        src: url('data:font/woff2;base64,{}') format('woff2');\n      }}\n      text {{ font-family: '{FONT_FAMILY}', monospace; }}\n{extra_rules}    </style>",
        escape_xml(font_base64)
    );
}

/// Double border with diamond accents in each corner.
fn write_frame(buffer: &mut String) {
    let w = CANVAS_WIDTH;
    let h = CANVAS_HEIGHT;
    let _ = writeln!(
        buffer,
        "  <rect x=\"4\" y=\"4\" width=\"{}\" height=\"{}\" rx=\"2\" fill=\"none\" stroke=\"#1e1e30\" stroke-width=\"1\"/>",
        w - 8,
        h - 8
    );
    let _ = writeln!(
        buffer,
        "  <rect x=\"6\" y=\"6\" width=\"{}\" height=\"{}\" rx=\"1\" fill=\"none\" stroke=\"#2a2a3a\" stroke-width=\"0.5\"/>",
        w - 12,
        h - 12
    );

    // Bottom corners grow upwards.
    let corners: [(i64, i64, i64); 4] = [
        (10, 4, 1),
        (i64::from(w) - 10, 4, 1),
        (10, i64::from(h) - 4, -1),
        (i64::from(w) - 10, i64::from(h) - 4, -1)
    ];
    for (x, y, down) in corners {
        let _ = writeln!(
            buffer,
            "  <polygon points=\"{x},{y} {},{} {x},{} {},{}\" fill=\"#3a3525\" opacity=\"0.6\"/>",
            x + 4,
            y + 4 * down,
            y + 8 * down,
            x - 4,
            y + 4 * down
        );
    }
}

fn write_brand_tag(buffer: &mut String, fill: &str) {
    let _ = writeln!(
        buffer,
        "  <text x=\"{}\" y=\"{}\" fill=\"{fill}\" font-size=\"6\" text-anchor=\"middle\" letter-spacing=\"3\">{BRAND_TAG}</text>",
        f64::from(CANVAS_WIDTH) / 2.0,
        CANVAS_HEIGHT - 2
    );
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn escape_xml_handles_all_special_characters() {
        assert_eq!(escape_xml("&<>\"'normal"), "&amp;&lt;&gt;&quot;&apos;normal");
    }

    #[test]
    fn escape_xml_returns_borrowed_when_no_escaping_needed() {
        match escape_xml("no special characters") {
            Cow::Borrowed(value) => assert_eq!(value, "no special characters"),
            Cow::Owned(_) => panic!("expected borrowed variant")
        }
    }

    #[test]
    fn frame_places_mirrored_corner_diamonds() {
        let mut buffer = String::new();
        write_frame(&mut buffer);
        assert!(buffer.contains("points=\"10,4 14,8 10,12 6,8\""));
        assert!(buffer.contains("points=\"485,4 489,8 485,12 481,8\""));
        assert!(buffer.contains("points=\"10,266 14,262 10,258 6,262\""));
        assert!(buffer.contains("points=\"485,266 489,262 485,258 481,262\""));
    }

    #[test]
    fn document_uses_fixed_canvas() {
        let mut buffer = String::new();
        open_document(&mut buffer);
        assert!(buffer.contains("viewBox=\"0 0 495 270\""));
    }

    proptest! {
        #[test]
        fn escaped_text_has_no_raw_markup(input in "\\PC{0,64}") {
            let escaped = escape_xml(&input);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.replace("&amp;", "").replace("&lt;", "").replace("&gt;", "").replace("&quot;", "").replace("&apos;", "").contains('&'));
        }
    }
}
