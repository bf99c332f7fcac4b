// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Character status card.
//!
//! A fixed portrait frame on the left holds the sprite, weapon label and
//! level badge. The right panel stacks the username, job name, a divider,
//! five attribute bars and a footer with the main language and streak.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{
    CANVAS_HEIGHT, CANVAS_WIDTH, escape_xml, open_document, write_brand_tag, write_frame,
    write_style
};
use crate::attributes::{Attribute, RpgAttributes};

const PAD: u32 = 14;
const FRAME_X: u32 = PAD;
const FRAME_Y: u32 = PAD;
const FRAME_W: u32 = 160;
const FRAME_H: u32 = CANVAS_HEIGHT - PAD * 2;
const SPRITE_SIZE: u32 = 115;
const SPRITE_Y: u32 = FRAME_Y + 60;

const PANEL_X: u32 = FRAME_X + FRAME_W + 18;
const PANEL_RIGHT: u32 = CANVAS_WIDTH - PAD;

const BAR_START_Y: u32 = 118;
const BAR_HEIGHT: u32 = 8;
const BAR_GAP: u32 = 19;
const BAR_X: u32 = PANEL_X + 32;
const BAR_WIDTH: u32 = PANEL_RIGHT - BAR_X - 32;
const VALUE_X: u32 = PANEL_RIGHT - 8;

const SPRITE_GLOW_RULES: &str = "
      .sprite-glow {
        animation: sglow 2.5s ease-in-out infinite;
      }
      @keyframes sglow {
        0%, 100% { filter: drop-shadow(0 0 3px rgba(212, 168, 67, 0.12)); }
        50% { filter: drop-shadow(0 0 8px rgba(212, 168, 67, 0.3)); }
      }
";

/// Resolved input for [`render_status_card`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCardData {
    /// GitHub login, shown as `@username`.
    pub username:        String,
    /// Localized class name.
    pub job_name:        String,
    /// Hex color of the class name.
    pub job_color:       String,
    /// Localized weapon label.
    pub weapon:          String,
    /// Character level in `1..=5`.
    pub level:           u8,
    /// Main language label.
    pub language:        String,
    pub attributes:      RpgAttributes,
    /// Current streak in days.
    pub current_streak:  u32,
    /// Sprite as a `data:` URI.
    pub sprite_data_uri: String,
    /// Raw base64 of the embedded woff2 font.
    pub font_base64:     String
}

/// Width of a bar filled to `value` percent of `bar_width`.
pub fn bar_fill_width(value: u8, bar_width: u32) -> u32 {
    (f64::from(value.min(100)) / 100.0 * f64::from(bar_width)).round() as u32
}

/// Animation start delay of bar `index`, in seconds, with two decimals.
///
/// Bars start strictly one after another.
///
/// ```
/// use labyrinth::bar_begin_delay;
///
/// assert_eq!(bar_begin_delay(0), "0.30");
/// assert_eq!(bar_begin_delay(4), "0.78");
/// ```
pub fn bar_begin_delay(index: usize) -> String {
    let hundredths = 30 + index * 12;
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Renders the status card.
///
/// # Examples
///
/// ```
/// use labyrinth::{RpgAttributes, StatusCardData, render_status_card};
///
/// let svg = render_status_card(&StatusCardData {
///     username:        "<script>".to_owned(),
///     job_name:        "Blacksmith".to_owned(),
///     job_color:       "#9a3412".to_owned(),
///     weapon:          "Forge Hammer".to_owned(),
///     level:           3,
///     language:        "Rust".to_owned(),
///     attributes:      RpgAttributes::default(),
///     current_streak:  4,
///     sprite_data_uri: "data:image/png;base64,AAAA".to_owned(),
///     font_base64:     "AAAA".to_owned()
/// });
/// assert!(svg.contains("@&lt;script&gt;"));
/// ```
pub fn render_status_card(data: &StatusCardData) -> String {
    let mut buffer = String::with_capacity(8 * 1024 + data.font_base64.len() + data.sprite_data_uri.len());

    open_document(&mut buffer);
    write_defs(&mut buffer, &data.font_base64);

    let _ = writeln!(
        buffer,
        "  <rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"#0c0c16\"/>\n  <rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"url(#vignette)\"/>"
    );
    write_frame(&mut buffer);
    write_portrait(&mut buffer, data);
    write_header(&mut buffer, data);

    for (index, attribute) in Attribute::ALL.into_iter().enumerate() {
        write_bar(&mut buffer, index, attribute, data.attributes.get(attribute));
    }

    write_footer(&mut buffer, data);
    write_brand_tag(&mut buffer, "#1e1e30");
    buffer.push_str("</svg>\n");

    buffer
}

fn write_defs(buffer: &mut String, font_base64: &str) {
    buffer.push_str("  <defs>\n");
    write_style(buffer, font_base64, SPRITE_GLOW_RULES);
    buffer.push_str(
        "    <radialGradient id=\"vignette\" cx=\"50%\" cy=\"50%\" r=\"70%\">
      <stop offset=\"0%\" stop-color=\"#0c0c16\" stop-opacity=\"0\"/>
      <stop offset=\"100%\" stop-color=\"#000000\" stop-opacity=\"0.35\"/>
    </radialGradient>
    <radialGradient id=\"charGlow\" cx=\"50%\" cy=\"45%\">
      <stop offset=\"0%\" stop-color=\"#d4a843\" stop-opacity=\"0.06\"/>
      <stop offset=\"100%\" stop-color=\"#d4a843\" stop-opacity=\"0\"/>
    </radialGradient>
  </defs>
"
    );
}

fn write_portrait(buffer: &mut String, data: &StatusCardData) {
    let sprite_x = f64::from(FRAME_X) + f64::from(FRAME_W - SPRITE_SIZE) / 2.0;
    let center_x = f64::from(FRAME_X) + f64::from(FRAME_W) / 2.0;
    let bottom = FRAME_Y + FRAME_H;

    for fill in ["fill=\"#0a0a18\"", "fill=\"none\" stroke=\"#2a2a3a\" stroke-width=\"1\"", "fill=\"url(#charGlow)\""] {
        let _ = writeln!(
            buffer,
            "  <rect x=\"{FRAME_X}\" y=\"{FRAME_Y}\" width=\"{FRAME_W}\" height=\"{FRAME_H}\" rx=\"2\" {fill}/>"
        );
    }
    let _ = writeln!(
        buffer,
        "  <line x1=\"{}\" y1=\"{FRAME_Y}\" x2=\"{}\" y2=\"{FRAME_Y}\" stroke=\"#3a3525\" stroke-width=\"1\" opacity=\"0.5\"/>",
        FRAME_X + 8,
        FRAME_X + FRAME_W - 8
    );
    let _ = writeln!(
        buffer,
        "  <g class=\"sprite-glow\">\n    <image href=\"{}\" x=\"{sprite_x}\" y=\"{SPRITE_Y}\" width=\"{SPRITE_SIZE}\" height=\"{SPRITE_SIZE}\" image-rendering=\"pixelated\"/>\n  </g>",
        escape_xml(&data.sprite_data_uri)
    );
    let _ = writeln!(
        buffer,
        "  <text x=\"{center_x}\" y=\"{}\" fill=\"#5a5a6a\" font-size=\"7\" text-anchor=\"middle\">{}</text>",
        bottom - 30,
        escape_xml(&data.weapon)
    );

    // Level badge
    let _ = writeln!(
        buffer,
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"19\" rx=\"0 0 2 2\" fill=\"#0e0e1a\"/>",
        FRAME_X + 1,
        bottom - 20,
        FRAME_W - 2
    );
    let _ = writeln!(
        buffer,
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#2a2a3a\" stroke-width=\"0.5\"/>",
        FRAME_X + 10,
        bottom - 20,
        FRAME_X + FRAME_W - 10,
        bottom - 20
    );
    let _ = writeln!(
        buffer,
        "  <text x=\"{center_x}\" y=\"{}\" fill=\"#d4a843\" font-size=\"9\" text-anchor=\"middle\">Lv. {}</text>",
        bottom - 7,
        data.level
    );
}

fn write_header(buffer: &mut String, data: &StatusCardData) {
    let divider_y = PAD + 56;
    let _ = writeln!(
        buffer,
        "  <text x=\"{PANEL_X}\" y=\"{}\" fill=\"#5a5a6a\" font-size=\"9\">@{}</text>",
        PAD + 22,
        escape_xml(&data.username)
    );
    let _ = writeln!(
        buffer,
        "  <text x=\"{PANEL_X}\" y=\"{}\" fill=\"{}\" font-size=\"18\">{}</text>",
        PAD + 46,
        escape_xml(&data.job_color),
        escape_xml(&data.job_name)
    );
    let _ = writeln!(
        buffer,
        "  <line x1=\"{PANEL_X}\" y1=\"{divider_y}\" x2=\"{}\" y2=\"{divider_y}\" stroke=\"#1e1e30\" stroke-width=\"1\"/>",
        PANEL_RIGHT - 8
    );
    let _ = writeln!(
        buffer,
        "  <line x1=\"{PANEL_X}\" y1=\"{divider_y}\" x2=\"{}\" y2=\"{divider_y}\" stroke=\"#3a3525\" stroke-width=\"1\" opacity=\"0.7\"/>",
        PANEL_X + 50
    );
    let _ = writeln!(
        buffer,
        "  <text x=\"{PANEL_X}\" y=\"108\" fill=\"#3a3a4a\" font-size=\"7\" letter-spacing=\"2\">─ ATTRIBUTES ─</text>"
    );
}

fn write_bar(buffer: &mut String, index: usize, attribute: Attribute, value: u8) {
    let y = BAR_START_Y + index as u32 * BAR_GAP;
    let mid_y = y + BAR_HEIGHT / 2;
    let fill_width = bar_fill_width(value, BAR_WIDTH);
    let begin = bar_begin_delay(index);
    let color = attribute.color();
    let label = attribute.label();

    let _ = writeln!(
        buffer,
        "  <text x=\"{PANEL_X}\" y=\"{mid_y}\" fill=\"{color}\" font-size=\"9\" dominant-baseline=\"central\">{label}</text>"
    );
    let _ = writeln!(
        buffer,
        "  <rect x=\"{BAR_X}\" y=\"{y}\" width=\"{BAR_WIDTH}\" height=\"{BAR_HEIGHT}\" rx=\"1\" fill=\"#0a0a18\"/>"
    );
    let _ = writeln!(
        buffer,
        "  <rect x=\"{BAR_X}\" y=\"{y}\" width=\"0\" height=\"{BAR_HEIGHT}\" rx=\"1\" fill=\"{color}\" opacity=\"0.7\">\n    <animate attributeName=\"width\" from=\"0\" to=\"{fill_width}\" dur=\"0.6s\" begin=\"{begin}s\" fill=\"freeze\" calcMode=\"spline\" keySplines=\"0.25 0.1 0.25 1\"/>\n  </rect>"
    );
    let _ = writeln!(
        buffer,
        "  <text x=\"{VALUE_X}\" y=\"{mid_y}\" fill=\"#6a6a7a\" font-size=\"8\" text-anchor=\"end\" dominant-baseline=\"central\" opacity=\"0\">\n    <animate attributeName=\"opacity\" from=\"0\" to=\"1\" dur=\"0.3s\" begin=\"{begin}s\" fill=\"freeze\"/>\n    {}\n  </text>",
        pad_figure(value)
    );
}

/// Left-pads a score to three columns with figure spaces.
fn pad_figure(value: u8) -> String {
    let digits = value.to_string();
    let mut padded = "\u{2007}".repeat(3usize.saturating_sub(digits.len()));
    padded.push_str(&digits);
    padded
}

fn write_footer(buffer: &mut String, data: &StatusCardData) {
    let divider_y = CANVAS_HEIGHT - PAD - 28;
    let text_y = CANVAS_HEIGHT - PAD - 12;
    let right = PANEL_RIGHT - 8;

    let _ = writeln!(
        buffer,
        "  <line x1=\"{PANEL_X}\" y1=\"{divider_y}\" x2=\"{right}\" y2=\"{divider_y}\" stroke=\"#1e1e30\" stroke-width=\"1\"/>"
    );
    let _ = writeln!(
        buffer,
        "  <text x=\"{PANEL_X}\" y=\"{text_y}\" fill=\"#5a5a6a\" font-size=\"9\">\n    MAIN <tspan fill=\"#d4a843\" dx=\"4\">{}</tspan>\n  </text>",
        escape_xml(&data.language)
    );
    let _ = writeln!(
        buffer,
        "  <text x=\"{right}\" y=\"{text_y}\" fill=\"#5a5a6a\" font-size=\"9\" text-anchor=\"end\">\n    STREAK <tspan fill=\"#c2783c\" dx=\"4\">{}d</tspan>\n  </text>",
        data.current_streak
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatusCardData {
        StatusCardData {
            username:        "octocat".to_owned(),
            job_name:        "Blacksmith".to_owned(),
            job_color:       "#9a3412".to_owned(),
            weapon:          "Forge Hammer".to_owned(),
            level:           4,
            language:        "Rust".to_owned(),
            attributes:      RpgAttributes {
                vit: 20,
                cha: 100,
                wis: 50,
                str: 0,
                agi: 24
            },
            current_streak:  73,
            sprite_data_uri: "data:image/png;base64,iVBORw0KGgo=".to_owned(),
            font_base64:     "d09GMgABAAAAAA==".to_owned()
        }
    }

    #[test]
    fn layout_constants_match_canvas() {
        assert_eq!(FRAME_H, 242);
        assert_eq!(PANEL_X, 192);
        assert_eq!(BAR_X, 224);
        assert_eq!(BAR_WIDTH, 225);
    }

    #[test]
    fn fill_width_is_rounded_fraction_of_bar() {
        assert_eq!(bar_fill_width(0, 225), 0);
        assert_eq!(bar_fill_width(50, 225), 113);
        assert_eq!(bar_fill_width(100, 225), 225);
        assert_eq!(bar_fill_width(24, 225), 54);
    }

    #[test]
    fn bars_start_strictly_in_sequence() {
        let delays: Vec<f64> = (0..5)
            .map(|index| bar_begin_delay(index).parse().expect("numeric delay"))
            .collect();
        assert_eq!(bar_begin_delay(1), "0.42");
        assert!(delays.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn card_contains_every_attribute_bar() {
        let svg = render_status_card(&sample());
        for attribute in Attribute::ALL {
            assert!(svg.contains(&format!(">{}</text>", attribute.label())));
        }
        assert!(svg.contains("to=\"225\""));
        assert!(svg.contains("to=\"113\""));
        assert!(svg.contains("begin=\"0.78s\""));
    }

    #[test]
    fn card_embeds_font_and_sprite() {
        let svg = render_status_card(&sample());
        assert!(svg.contains("data:font/woff2;base64,d09GMgABAAAAAA=="));
        assert!(svg.contains("href=\"data:image/png;base64,iVBORw0KGgo=\""));
        assert!(svg.contains("x=\"36.5\" y=\"74\""));
    }

    #[test]
    fn card_renders_footer_and_badge() {
        let svg = render_status_card(&sample());
        assert!(svg.contains("Lv. 4"));
        assert!(svg.contains("73d</tspan>"));
        assert!(svg.contains(">Rust</tspan>"));
        assert!(svg.contains("@octocat"));
        assert!(svg.contains("fill=\"#9a3412\" font-size=\"18\">Blacksmith"));
    }

    #[test]
    fn username_is_escaped() {
        let mut data = sample();
        data.username = "<script>alert(1)</script>".to_owned();
        data.job_name = "Tom & Jerry".to_owned();
        let svg = render_status_card(&data);
        assert!(svg.contains("@&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let data = sample();
        assert_eq!(render_status_card(&data), render_status_card(&data.clone()));
    }

    #[test]
    fn scores_are_padded_with_figure_spaces() {
        assert_eq!(pad_figure(7), "\u{2007}\u{2007}7");
        assert_eq!(pad_figure(100), "100");
    }

    #[test]
    fn document_is_closed() {
        let svg = render_status_card(&sample());
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>\n"));
    }
}
