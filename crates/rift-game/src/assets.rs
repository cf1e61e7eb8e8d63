//! The game's texture atlas.
//!
//! Every sprite lives in one image with a fixed layout. By default the image
//! is painted procedurally at startup; an `atlas.png` with the same layout
//! can replace it.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rift_engine::assets::{Atlas, AtlasEntry, AtlasImage};
use rift_engine::paint::Color;
use rift_engine::render::{TextureId, SOLID};
use rift_engine::text::Font;

use crate::cards;

pub const ATLAS_WIDTH: u32 = 512;
pub const ATLAS_HEIGHT: u32 = 160;

pub const POINTER: &str = "pointer";

const CARD_W: u32 = 32;
const CARD_H: u32 = 48;
const ART_H: u32 = 34;
const ARTS_PER_ROW: u32 = ATLAS_WIDTH / CARD_W;

const FRAMES_Y: u32 = 16;
const ARTS_Y: u32 = 64;
const BIT_Y: u32 = 136;
const GB_Y: u32 = 144;

const FRAMES: [&str; 4] = ["card_player", "card_enemy", "card_empty_space", "card_back"];

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgba(r, g, b, 0xFF)
}

/// Where every named region sits in the atlas image.
pub fn atlas_entries() -> Vec<AtlasEntry> {
    let mut entries = vec![
        AtlasEntry::sprite(SOLID, 0, 0, 1, 1),
        AtlasEntry::sprite(POINTER, 4, 0, 8, 10),
        AtlasEntry::sprite("money_icon", 16, 0, 5, 5),
        AtlasEntry::row(FRAMES, 0, FRAMES_Y, CARD_W, CARD_H),
    ];
    for (i, name) in cards::art_names().into_iter().enumerate() {
        let (x, y) = art_origin(i as u32);
        entries.push(AtlasEntry::sprite(name, x, y, CARD_W, ART_H));
    }
    entries.push(Font::Bit.atlas_entry(0, BIT_Y));
    entries.push(Font::Gb.atlas_entry(0, GB_Y));
    entries
}

fn art_origin(i: u32) -> (u32, u32) {
    ((i % ARTS_PER_ROW) * CARD_W, ARTS_Y + (i / ARTS_PER_ROW) * ART_H)
}

/// Paints the built-in atlas image.
pub fn procedural_image() -> AtlasImage {
    let mut image = AtlasImage::new(ATLAS_WIDTH, ATLAS_HEIGHT);
    // 2x2 so sampling the solid pixel never bleeds into a neighbour
    image.fill_rect(0, 0, 2, 2, Color::WHITE);
    paint_pointer(&mut image, 4, 0);
    paint_coin(&mut image, 16, 0);

    for (i, name) in FRAMES.into_iter().enumerate() {
        let x = i as u32 * CARD_W;
        match name {
            "card_player" => paint_frame(&mut image, x, FRAMES_Y, rgb(0xC8, 0xC8, 0xD2)),
            "card_enemy" => paint_frame(&mut image, x, FRAMES_Y, rgb(0xB4, 0x32, 0x3C)),
            "card_empty_space" => image.stroke_rect(x, FRAMES_Y, CARD_W, CARD_H, Color::WHITE),
            _ => paint_back(&mut image, x, FRAMES_Y),
        }
    }

    for (i, _) in cards::art_names().into_iter().enumerate() {
        let (x, y) = art_origin(i as u32);
        paint_art(&mut image, x, y, i as u32);
    }

    Font::Bit.rasterize(&mut image, 0, BIT_Y);
    Font::Gb.rasterize(&mut image, 0, GB_Y);
    image
}

/// The built-in atlas, addressed as `texture`.
pub fn procedural_atlas(texture: TextureId) -> (Atlas, AtlasImage) {
    let image = procedural_image();
    let atlas = Atlas::with_entries(texture, image.width(), image.height(), &atlas_entries());
    (atlas, image)
}

/// Loads `dir/atlas.png` when a directory is given, else paints the
/// built-in image.
pub fn load_image(dir: Option<&Path>) -> Result<AtlasImage> {
    let Some(dir) = dir else {
        return Ok(procedural_image());
    };
    let path = dir.join("atlas.png");
    let image = AtlasImage::load_png(&path).with_context(|| format!("loading {}", path.display()))?;
    if (image.width(), image.height()) != (ATLAS_WIDTH, ATLAS_HEIGHT) {
        bail!(
            "{} is {}x{}, expected {ATLAS_WIDTH}x{ATLAS_HEIGHT}",
            path.display(),
            image.width(),
            image.height()
        );
    }
    log::info!("using atlas image {}", path.display());
    Ok(image)
}

// ── painting ──────────────────────────────────────────────────────────────

fn paint_pointer(image: &mut AtlasImage, x: u32, y: u32) {
    for row in 0..8 {
        for col in 0..=row.min(5) {
            let edge = col == 0 || col == row.min(5) || row == 7;
            image.set(x + col, y + row, if edge { Color::BLACK } else { Color::WHITE });
        }
    }
    image.fill_rect(x + 2, y + 8, 2, 2, Color::BLACK);
}

fn paint_coin(image: &mut AtlasImage, x: u32, y: u32) {
    let gold = rgb(0xFF, 0xCC, 0x22);
    image.fill_rect(x + 1, y, 3, 5, gold);
    image.fill_rect(x, y + 1, 5, 3, gold);
    image.set(x + 2, y + 2, rgb(0xAA, 0x77, 0x00));
}

// Opaque border and footer around a transparent window for the art.
fn paint_frame(image: &mut AtlasImage, x: u32, y: u32, border: Color) {
    image.stroke_rect(x, y, CARD_W, CARD_H, border);
    image.fill_rect(x + 1, y + ART_H - 1, CARD_W - 2, CARD_H - ART_H, rgb(0x1E, 0x1E, 0x28));
    image.fill_rect(x, y + ART_H - 1, CARD_W, 1, border);
    image.stroke_rect(x + CARD_W - 13, y + CARD_H - 11, 12, 10, border);
}

fn paint_back(image: &mut AtlasImage, x: u32, y: u32) {
    image.fill_rect(x, y, CARD_W, CARD_H, rgb(0x28, 0x1E, 0x46));
    image.stroke_rect(x, y, CARD_W, CARD_H, rgb(0xE0, 0x0D, 0xBD));
    image.stroke_rect(x + 3, y + 3, CARD_W - 6, CARD_H - 6, rgb(0x22, 0xA6, 0xF5));
    for i in 0..8 {
        image.set(x + 12 + i, y + 20 + i, Color::WHITE);
        image.set(x + 19 - i, y + 20 + i, Color::WHITE);
    }
}

const ART_INKS: [(u8, u8, u8); 7] = [
    (0xF5, 0xA6, 0x22),
    (0x4F, 0xE3, 0xC1),
    (0xBD, 0x0D, 0xE0),
    (0x55, 0xCC, 0x55),
    (0xFF, 0x66, 0x66),
    (0x66, 0x99, 0xFF),
    (0xEE, 0xEE, 0x88),
];

// Dark backdrop with one of three motifs, so every art name looks distinct.
fn paint_art(image: &mut AtlasImage, x: u32, y: u32, index: u32) {
    let (r, g, b) = ART_INKS[(index as usize) % ART_INKS.len()];
    let ink = rgb(r, g, b);
    image.fill_rect(x, y, CARD_W, ART_H, rgb(r / 6, g / 6, b / 6));
    let (cx, cy) = (x + CARD_W / 2, y + ART_H / 2);
    match index % 3 {
        0 => {
            for dy in 0..9u32 {
                let half = 8 - dy.abs_diff(4) * 2;
                image.fill_rect(cx - half / 2 - 4, cy - 4 + dy, half + 8, 1, ink);
            }
        }
        1 => {
            for dy in 0..=12u32 {
                let w = 12 - dy.abs_diff(6) * 2;
                image.fill_rect(cx - w / 2, cy - 6 + dy, w.max(1), 1, ink);
            }
        }
        _ => {
            for i in 0..4 {
                image.fill_rect(x + 6 + i * 6, y + 8 + (i % 2) * 4, 3, 18 - (i % 2) * 4, ink);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rift_engine::text::glyph_chars;

    fn atlas() -> Atlas {
        procedural_atlas(TextureId(3)).0
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn every_card_art_has_a_region() {
        let atlas = atlas();
        for name in cards::art_names() {
            let region = atlas.sprite(name).unwrap();
            assert_eq!((region.w, region.h), (32.0, 34.0), "{name}");
            assert_eq!(region.texture, TextureId(3));
        }
    }

    #[test]
    fn frames_and_icons_are_registered() {
        let atlas = atlas();
        for name in [SOLID, POINTER, "money_icon", "card_player", "card_enemy", "card_empty_space", "card_back"] {
            assert!(atlas.contains(name), "{name}");
        }
        assert_eq!(atlas.sprite("card_back").unwrap().w, 32.0);
    }

    #[test]
    fn arts_stay_inside_the_image() {
        let last = cards::art_names().len() as u32 - 1;
        let (x, y) = art_origin(last);
        assert!(x + CARD_W <= ATLAS_WIDTH);
        assert!(y + ART_H <= BIT_Y);
    }

    #[test]
    fn both_fonts_cover_every_glyph() {
        let atlas = atlas();
        for ch in glyph_chars().chars() {
            assert!(atlas.glyph("bit", ch).is_ok(), "bit {ch:?}");
            assert!(atlas.glyph("gb", ch).is_ok(), "gb {ch:?}");
        }
    }

    // ── pixels ────────────────────────────────────────────────────────────

    #[test]
    fn solid_is_opaque_white() {
        let image = procedural_image();
        assert_eq!(image.get(0, 0), Some(Color::WHITE));
        assert_eq!(image.get(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn card_frames_leave_the_art_window_clear() {
        let image = procedural_image();
        assert_eq!(image.get(16, FRAMES_Y + 16), Some(Color::TRANSPARENT));
        assert_ne!(image.get(0, FRAMES_Y), Some(Color::TRANSPARENT));
        // card back is filled all the way through
        assert_ne!(image.get(3 * CARD_W + 16, FRAMES_Y + 40), Some(Color::TRANSPARENT));
    }

    #[test]
    fn no_directory_means_the_built_in_image() {
        let image = load_image(None).unwrap();
        assert_eq!((image.width(), image.height()), (ATLAS_WIDTH, ATLAS_HEIGHT));
    }

    #[test]
    fn a_missing_png_is_an_error_naming_the_file() {
        let err = load_image(Some(Path::new("/nonexistent/rift"))).unwrap_err();
        assert!(format!("{err:#}").contains("atlas.png"));
    }
}
