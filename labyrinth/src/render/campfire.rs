// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Campfire scene: up to four characters seated around a bonfire.
//!
//! Seats are fixed. Seat `i` always has the same offset, pose and mirroring,
//! and characters are placed in the order supplied by the caller.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{CANVAS_HEIGHT, CANVAS_WIDTH, FONT_FAMILY, escape_xml, open_document, write_brand_tag, write_style};
use crate::jobs::Pose;

const CENTER_X: f64 = CANVAS_WIDTH as f64 / 2.0;
const CENTER_Y: f64 = CANVAS_HEIGHT as f64 / 2.0 - 5.0;
const BONFIRE_SIZE: f64 = 80.0;
const SPRITE_SIZE: f64 = 72.0;

/// A fixed position around the fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Horizontal offset from the fire center.
    pub x:      i32,
    /// Vertical offset from the fire center.
    pub y:      i32,
    pub pose:   Pose,
    /// Mirror the sprite so it faces the fire.
    pub flip_x: bool
}

/// Seat table, in fill order.
pub const SEATS: [Seat; 4] = [
    Seat {
        x:      -75,
        y:      -30,
        pose:   Pose::Sitting,
        flip_x: true
    },
    Seat {
        x:      75,
        y:      -30,
        pose:   Pose::Sitting,
        flip_x: false
    },
    Seat {
        x:      -75,
        y:      30,
        pose:   Pose::Back,
        flip_x: false
    },
    Seat {
        x:      75,
        y:      30,
        pose:   Pose::Back,
        flip_x: true
    }
];

/// Offsets and animation delays of the fire sparkles.
const SPARKS: [(i32, i32, &str); 6] = [
    (-8, -20, "0.0"),
    (12, -28, "0.3"),
    (-15, -35, "0.6"),
    (5, -42, "0.9"),
    (-3, -15, "1.2"),
    (18, -22, "0.5")
];

const SCENE_RULES: &str = "
      .fire-glow {
        animation: fglow 2s ease-in-out infinite;
      }
      @keyframes fglow {
        0%, 100% { opacity: 0.12; }
        50% { opacity: 0.25; }
      }

      .fire-glow-inner {
        animation: fglowi 1.5s ease-in-out infinite;
      }
      @keyframes fglowi {
        0%, 100% { opacity: 0.2; }
        50% { opacity: 0.45; }
      }

      .sparkle {
        animation: spark 1.8s ease-in-out infinite;
      }
      @keyframes spark {
        0%, 100% { opacity: 0; transform: translateY(0); }
        30% { opacity: 0.9; }
        100% { opacity: 0; transform: translateY(-12px); }
      }

      .char-tooltip { transition: opacity 0.15s; }
      .char-hitbox:hover ~ .char-tooltip { opacity: 1; }
";

const SCENE_GRADIENTS: &str = "    <radialGradient id=\"fireGlow\" cx=\"50%\" cy=\"50%\">
      <stop offset=\"0%\" stop-color=\"#f59e0b\" stop-opacity=\"0.3\"/>
      <stop offset=\"40%\" stop-color=\"#ef4444\" stop-opacity=\"0.08\"/>
      <stop offset=\"100%\" stop-color=\"#f59e0b\" stop-opacity=\"0\"/>
    </radialGradient>
    <radialGradient id=\"fireGlowInner\" cx=\"50%\" cy=\"50%\">
      <stop offset=\"0%\" stop-color=\"#fbbf24\" stop-opacity=\"0.5\"/>
      <stop offset=\"60%\" stop-color=\"#f59e0b\" stop-opacity=\"0.15\"/>
      <stop offset=\"100%\" stop-color=\"#f59e0b\" stop-opacity=\"0\"/>
    </radialGradient>
    <pattern id=\"grid\" width=\"40\" height=\"40\" patternUnits=\"userSpaceOnUse\">
      <rect width=\"40\" height=\"40\" fill=\"none\"/>
      <line x1=\"40\" y1=\"0\" x2=\"40\" y2=\"40\" stroke=\"#1a1a2e\" stroke-width=\"0.5\"/>
      <line x1=\"0\" y1=\"40\" x2=\"40\" y2=\"40\" stroke=\"#1a1a2e\" stroke-width=\"0.5\"/>
    </pattern>
";

/// A character placed at a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampfireCharacter {
    /// Pose sprite as a `data:` URI.
    pub sprite_data_uri: String,
    pub level:           u8,
    /// Localized class name shown in the hover tooltip.
    pub job_name:        String,
    pub seat:            Seat
}

/// Resolved input for [`render_campfire_card`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampfireCardData {
    pub username:         String,
    /// Raw base64 of the embedded woff2 font.
    pub font_base64:      String,
    /// Bonfire image as a `data:` URI.
    pub bonfire_data_uri: String,
    /// At most four characters, already ranked by the caller.
    pub characters:       Vec<CampfireCharacter>
}

/// Renders the campfire scene.
///
/// Characters beyond the fourth are ignored; the renderer never reorders
/// them.
pub fn render_campfire_card(data: &CampfireCardData) -> String {
    let mut buffer = String::with_capacity(
        8 * 1024
            + data.font_base64.len()
            + data.bonfire_data_uri.len()
            + data
                .characters
                .iter()
                .map(|character| character.sprite_data_uri.len())
                .sum::<usize>()
    );

    open_document(&mut buffer);
    buffer.push_str("  <defs>\n");
    write_style(&mut buffer, &data.font_base64, SCENE_RULES);
    buffer.push_str(SCENE_GRADIENTS);
    buffer.push_str("  </defs>\n");

    let _ = writeln!(
        buffer,
        "  <rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"#0c0c16\"/>\n  <rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"url(#grid)\"/>"
    );
    let _ = writeln!(
        buffer,
        "  <ellipse cx=\"{CENTER_X}\" cy=\"{CENTER_Y}\" rx=\"140\" ry=\"100\" fill=\"url(#fireGlow)\" class=\"fire-glow\"/>"
    );
    let _ = writeln!(
        buffer,
        "  <ellipse cx=\"{CENTER_X}\" cy=\"{}\" rx=\"55\" ry=\"45\" fill=\"url(#fireGlowInner)\" class=\"fire-glow-inner\"/>",
        CENTER_Y + 5.0
    );

    for character in data.characters.iter().take(SEATS.len()) {
        write_character(&mut buffer, character);
    }

    let _ = writeln!(
        buffer,
        "  <image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{BONFIRE_SIZE}\" height=\"{BONFIRE_SIZE}\" image-rendering=\"pixelated\"/>",
        escape_xml(&data.bonfire_data_uri),
        CENTER_X - BONFIRE_SIZE / 2.0,
        CENTER_Y - BONFIRE_SIZE / 2.0 + 5.0
    );

    for (dx, dy, delay) in SPARKS {
        let _ = writeln!(
            buffer,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"1\" fill=\"#fbbf24\" class=\"sparkle\" style=\"animation-delay:{delay}s\"/>",
            CENTER_X + f64::from(dx),
            CENTER_Y + f64::from(dy)
        );
    }

    let _ = writeln!(
        buffer,
        "  <text x=\"{CENTER_X}\" y=\"{}\" fill=\"#4a4a5a\" font-size=\"8\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}, monospace\">\n    @{}\n  </text>",
        CANVAS_HEIGHT - 16,
        escape_xml(&data.username)
    );
    write_brand_tag(&mut buffer, "#2a2a3a");
    buffer.push_str("</svg>\n");

    buffer
}

fn write_character(buffer: &mut String, character: &CampfireCharacter) {
    let seat = character.seat;
    let sprite_x = CENTER_X + f64::from(seat.x) - SPRITE_SIZE / 2.0;
    let sprite_y = CENTER_Y + f64::from(seat.y) - SPRITE_SIZE / 2.0;
    let transform = if seat.flip_x {
        format!("translate({}, {sprite_y}) scale(-1, 1)", sprite_x + SPRITE_SIZE)
    } else {
        format!("translate({sprite_x}, {sprite_y})")
    };

    let tooltip_x = CENTER_X + f64::from(seat.x);
    let tooltip_y = sprite_y - 4.0;

    let _ = writeln!(
        buffer,
        "  <g class=\"char-group\">\n    <g transform=\"{transform}\">\n      <image href=\"{}\" width=\"{SPRITE_SIZE}\" height=\"{SPRITE_SIZE}\" image-rendering=\"pixelated\"/>\n    </g>",
        escape_xml(&character.sprite_data_uri)
    );
    let _ = writeln!(
        buffer,
        "    <rect x=\"{sprite_x}\" y=\"{sprite_y}\" width=\"{SPRITE_SIZE}\" height=\"{SPRITE_SIZE}\" fill=\"transparent\" class=\"char-hitbox\"/>"
    );
    let _ = writeln!(
        buffer,
        "    <g class=\"char-tooltip\" opacity=\"0\">\n      <rect x=\"{}\" y=\"{}\" width=\"80\" height=\"14\" rx=\"1\" fill=\"#0c0c16\" stroke=\"#d4a843\" stroke-width=\"0.5\" opacity=\"0.9\"/>\n      <text x=\"{tooltip_x}\" y=\"{}\" fill=\"#d4a843\" font-size=\"7\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}, monospace\">{} Lv.{}</text>\n    </g>\n  </g>",
        tooltip_x - 40.0,
        tooltip_y - 12.0,
        tooltip_y - 2.0,
        escape_xml(&character.job_name),
        character.level
    );
}
