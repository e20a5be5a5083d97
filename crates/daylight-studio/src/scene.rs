//! Builds the frame's draw list: the rotating sprite grid and the status panel.

use daylight_engine::coords::{Vec2, Viewport};
use daylight_engine::paint::Color;
use daylight_engine::scene::{DrawList, QuadCmd, ZIndex};
use daylight_engine::text::FontId;

use crate::status::{HEADING, StatusPanel};

pub const GRID_SIZE: usize = 5;
pub const GRID_PITCH: f32 = 40.0;
pub const SPRITE_SIZE: f32 = 30.0;

pub const PANEL_MARGIN: f32 = 16.0;
pub const PANEL_PADDING: f32 = 12.0;
pub const MIN_PANEL_WIDTH: f32 = 240.0;
pub const HEADING_SIZE: f32 = 20.0;
pub const LINE_SIZE: f32 = 16.0;
/// Line advance as a multiple of the font size.
const LINE_SPACING: f32 = 1.4;
const PANEL_BORDER: f32 = 2.0;
const GAUGE_GAP: f32 = 8.0;
const GAUGE_HEIGHT: f32 = 10.0;

const Z_SPRITES: ZIndex = ZIndex::new(0);
const Z_PANEL: ZIndex = ZIndex::new(10);
const Z_PANEL_CONTENT: ZIndex = ZIndex::new(11);

/// Centre of every grid cell relative to the grid centre, row-major.
pub fn grid_offsets() -> impl Iterator<Item = Vec2> {
    let half = (GRID_SIZE as f32 - 1.0) * 0.5;
    (0..GRID_SIZE * GRID_SIZE).map(move |i| {
        let col = (i % GRID_SIZE) as f32 - half;
        let row = (i / GRID_SIZE) as f32 - half;
        Vec2::new(col * GRID_PITCH, row * GRID_PITCH)
    })
}

/// Sprites rotated as a group about the window centre.
pub fn push_grid(list: &mut DrawList, viewport: Viewport, rotation: f32) {
    let center = viewport.center();
    let half = Vec2::new(SPRITE_SIZE * 0.5, SPRITE_SIZE * 0.5);
    for (i, offset) in grid_offsets().enumerate() {
        // Alternate tints so the rotation is visible.
        let color = if i % 2 == 0 {
            Color::from_hex_rgb(0xf4e9c1)
        } else {
            Color::from_hex_rgb(0xd9a441)
        };
        list.push_quad(
            Z_SPRITES,
            QuadCmd {
                center: center + offset.rotated(rotation),
                half_extents: half,
                rotation,
                color,
            },
        );
    }
}

// ── status panel ──────────────────────────────────────────────────────────

/// Heading then name, time, and metric lines, each with its font size.
pub fn panel_rows(status: &StatusPanel) -> [(String, f32); 4] {
    let [name, time, metric] = status.lines();
    [
        (HEADING.to_string(), HEADING_SIZE),
        (name, LINE_SIZE),
        (time, LINE_SIZE),
        (metric, LINE_SIZE),
    ]
}

/// Width of the widest row according to `measure(text, size)`.
pub fn widest_row(rows: &[(String, f32)], measure: impl Fn(&str, f32) -> f32) -> f32 {
    rows.iter()
        .map(|(text, size)| measure(text, *size))
        .fold(0.0, f32::max)
}

/// Placement of the panel and its contents in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub origin: Vec2,
    pub size: Vec2,
    /// Top-left of the heading and of each status line.
    pub rows: [Vec2; 4],
    pub gauge_origin: Vec2,
    pub gauge_size: Vec2,
}

impl PanelLayout {
    /// Pins the panel to the top-right corner, wide enough for `text_width`.
    pub fn new(viewport: Viewport, text_width: f32) -> Self {
        let inner_w = text_width.max(MIN_PANEL_WIDTH - 2.0 * PANEL_PADDING);
        let heading_h = HEADING_SIZE * LINE_SPACING;
        let line_h = LINE_SIZE * LINE_SPACING;
        let size = Vec2::new(
            inner_w + 2.0 * PANEL_PADDING,
            2.0 * PANEL_PADDING + heading_h + 3.0 * line_h + GAUGE_GAP + GAUGE_HEIGHT,
        );
        let origin = Vec2::new(viewport.width - size.x - PANEL_MARGIN, PANEL_MARGIN);

        let left = origin.x + PANEL_PADDING;
        let top = origin.y + PANEL_PADDING;
        let line_top = |i: usize| top + heading_h + i as f32 * line_h;
        let rows = [
            Vec2::new(left, top),
            Vec2::new(left, line_top(0)),
            Vec2::new(left, line_top(1)),
            Vec2::new(left, line_top(2)),
        ];

        Self {
            origin,
            size,
            rows,
            gauge_origin: Vec2::new(left, line_top(3) + GAUGE_GAP),
            gauge_size: Vec2::new(inner_w, GAUGE_HEIGHT),
        }
    }
}

/// Framed panel with the status text and a brightness gauge.
///
/// Without a font each row is drawn as a bar of roughly the text's width.
pub fn push_panel(
    list: &mut DrawList,
    layout: &PanelLayout,
    rows: &[(String, f32); 4],
    font: Option<FontId>,
    brightness: u8,
) {
    list.push_rect(
        Z_PANEL,
        layout.origin,
        layout.size,
        Color::from_srgb_u8(0x10, 0x10, 0x18, 0xd0),
    );
    list.push_frame(Z_PANEL, layout.origin, layout.size, PANEL_BORDER, Color::WHITE);

    let ink = Color::from_srgb_u8(0xf0, 0xf0, 0xf0, 0xff);
    for ((text, size), at) in rows.iter().zip(layout.rows) {
        match font {
            Some(font) => list.push_text(Z_PANEL_CONTENT, text.as_str(), font, *size, ink, at),
            None => {
                let w = estimate_width(text, *size).min(layout.gauge_size.x);
                list.push_rect(Z_PANEL_CONTENT, at, Vec2::new(w, *size * 0.5), ink);
            }
        }
    }

    let fill = layout.gauge_size.x * f32::from(brightness) / 255.0;
    list.push_frame(
        Z_PANEL_CONTENT,
        layout.gauge_origin,
        layout.gauge_size,
        1.0,
        Color::from_srgb_u8(0x80, 0x80, 0x80, 0xff),
    );
    list.push_rect(
        Z_PANEL_CONTENT,
        layout.gauge_origin,
        Vec2::new(fill, GAUGE_HEIGHT),
        Color::from_srgb_u8(0xff, 0xd8, 0x4a, 0xff),
    );
}

/// Rough advance for when no font is loaded: Hangul is about one em wide,
/// everything else about half.
pub fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.55 } else { 1.0 })
        .sum::<f32>()
        * size
}
