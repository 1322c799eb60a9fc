use crate::mesh::TerrainMesh;
use font8x8::UnicodeFonts;
use image::{Rgb, RgbImage};

// Contour lines are drawn whenever a vertex and a neighbour straddle one of
// these normalized-height levels.
const CONTOUR_LEVELS: &[f32] = &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
// Fraction to darken a pixel by when it sits on a contour line (0.0 = no change, 1.0 = black).
const CONTOUR_DARKNESS: f32 = 0.40;

/// Hypsometric ramp over normalized height `t` ∈ [0, 1]:
/// lowland green → tan → brown → grey → snow white.
fn hypsometric(t: f32) -> [u8; 3] {
    const STOPS: &[(f32, [f32; 3])] = &[
        (0.00, [70.0, 120.0, 62.0]),
        (0.25, [120.0, 150.0, 78.0]),
        (0.50, [168.0, 140.0, 90.0]),
        (0.75, [130.0, 115.0, 105.0]),
        (0.90, [190.0, 190.0, 190.0]),
        (1.00, [245.0, 245.0, 245.0]),
    ];
    let t = t.clamp(0.0, 1.0);
    for pair in STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            return [
                (c0[0] + (c1[0] - c0[0]) * f) as u8,
                (c0[1] + (c1[1] - c0[1]) * f) as u8,
                (c0[2] + (c1[2] - c0[2]) * f) as u8,
            ];
        }
    }
    [245, 245, 245]
}

/// Render the displaced vertex grid as a hypsometric heightmap PNG, one
/// pixel per vertex, with contour-line darkening.
pub fn export_png(mesh: &TerrainMesh, path: &str) {
    let side = mesh.side();
    let mut img = RgbImage::new(side, side);

    let (min, max) = mesh.height_range();
    let span = (max - min).max(f32::EPSILON);
    let norm = |y: f32| (y - min) / span;

    let height_at = |col: i64, row: i64| -> Option<f32> {
        if col < 0 || row < 0 || col >= side as i64 || row >= side as i64 {
            return None;
        }
        Some(norm(mesh.at(col as u32, row as u32).y))
    };

    // Returns true if the edge between normalized heights `a` and `b` crosses any contour level.
    let crosses_contour =
        |a: f32, b: f32| -> bool { CONTOUR_LEVELS.iter().any(|&lvl| (a < lvl) != (b < lvl)) };

    for row in 0..side {
        for col in 0..side {
            let t = norm(mesh.at(col, row).y);
            let mut color = hypsometric(t);

            // Check the 4-connected neighbours.
            let is_contour = [
                height_at(col as i64 - 1, row as i64),
                height_at(col as i64 + 1, row as i64),
                height_at(col as i64, row as i64 - 1),
                height_at(col as i64, row as i64 + 1),
            ]
            .iter()
            .filter_map(|n| *n)
            .any(|nt| crosses_contour(t, nt));

            if is_contour {
                color = color.map(|c| (c as f32 * (1.0 - CONTOUR_DARKNESS)) as u8);
            }

            img.put_pixel(col, row, Rgb(color));
        }
    }

    img.save(path).unwrap();
}

// ── Legend PNG ────────────────────────────────────────────────────────────────

/// Scale factor for the bitmap font (each logical pixel becomes `SCALE` screen pixels).
const FONT_SCALE: u32 = 2;
/// Width of one character in screen pixels.
const CHAR_W: u32 = 8 * FONT_SCALE;
/// Height of one character in screen pixels.
const CHAR_H: u32 = 8 * FONT_SCALE;

/// Draw a single character at (x, y) using the 8×8 bitmap font.
fn draw_char(img: &mut RgbImage, c: char, x: u32, y: u32, color: [u8; 3]) {
    let Some(glyph) = font8x8::BASIC_FONTS.get(c) else {
        return;
    };
    for (row, &byte) in glyph.iter().enumerate() {
        for col in 0u32..8 {
            if byte & (1 << col) != 0 {
                for dy in 0..FONT_SCALE {
                    for dx in 0..FONT_SCALE {
                        let px = x + col * FONT_SCALE + dx;
                        let py = y + row as u32 * FONT_SCALE + dy;
                        if px < img.width() && py < img.height() {
                            img.put_pixel(px, py, Rgb(color));
                        }
                    }
                }
            }
        }
    }
}

/// Draw a string starting at (x, y).
fn draw_str(img: &mut RgbImage, s: &str, x: u32, y: u32, color: [u8; 3]) {
    for (i, c) in s.chars().enumerate() {
        draw_char(img, c, x + i as u32 * CHAR_W, y, color);
    }
}

/// Draw a 1-pixel border around a rectangle.
fn outline_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
    for dx in 0..w {
        img.put_pixel(x + dx, y, Rgb(color));
        img.put_pixel(x + dx, y + h - 1, Rgb(color));
    }
    for dy in 0..h {
        img.put_pixel(x, y + dy, Rgb(color));
        img.put_pixel(x + w - 1, y + dy, Rgb(color));
    }
}

/// Generate a legend PNG: generation parameters plus the height colour ramp.
pub fn export_legend_png(mesh: &TerrainMesh, path: &str) {
    let (min, max) = mesh.height_range();

    // ── Metadata lines (key, value) ───────────────────────────────────────────
    let meta: &[(&str, String)] = &[
        ("Seed", format!("{}", mesh.seed)),
        ("Extent", format!("{:.0}", mesh.extent)),
        ("Segments", format!("{}", mesh.segments)),
        ("Octaves", format!("{}", mesh.options.octaves)),
        ("Amplitude", format!("{:.2}", mesh.options.amplitude)),
        ("Frequency", format!("{:.2}", mesh.options.frequency)),
        ("Persistence", format!("{:.2}", mesh.options.persistence)),
        ("Height", format!("{:+.3} .. {:+.3}", min, max)),
    ];

    // ── Layout constants ──────────────────────────────────────────────────────
    const PAD: u32 = 14;
    const META_ROW_H: u32 = CHAR_H + 5;
    const RAMP_H: u32 = CHAR_H;
    // Space added before and after each horizontal divider line.
    const SECTION_GAP: u32 = 8;

    let title = "TERRAIN LEGEND";

    // For metadata we align values at a fixed column (longest key + ": ").
    let max_key_len = meta.iter().map(|(k, _)| k.len()).max().unwrap_or(0) as u32;
    let key_col_chars = max_key_len + 2; // +2 for ": "
    let max_val_len = meta.iter().map(|(_, v)| v.len()).max().unwrap_or(0) as u32;
    let meta_col_w = (key_col_chars + max_val_len) * CHAR_W;

    let content_w = meta_col_w.max(title.len() as u32 * CHAR_W);
    let img_w = PAD + content_w + PAD;

    // Height = title + divider + meta rows + divider + ramp bar.
    let divider_block_h = SECTION_GAP + 1 + SECTION_GAP; // gap · line · gap
    let img_h = PAD
        + CHAR_H                                  // title
        + divider_block_h                         // divider above meta
        + meta.len() as u32 * META_ROW_H          // meta rows
        + divider_block_h                         // divider below meta
        + RAMP_H                                  // height colour ramp
        + PAD;

    const BG: [u8; 3] = [22, 22, 35];
    const TITLE_COLOR: [u8; 3] = [240, 240, 240];
    const KEY_COLOR: [u8; 3] = [140, 155, 190];
    const VAL_COLOR: [u8; 3] = [220, 225, 240];
    const DIVIDER_COLOR: [u8; 3] = [70, 70, 95];

    let mut img = RgbImage::from_pixel(img_w, img_h, Rgb(BG));
    let mut y = PAD;

    draw_str(&mut img, title, PAD, y, TITLE_COLOR);
    y += CHAR_H + SECTION_GAP;

    for x in PAD..img_w - PAD {
        img.put_pixel(x, y, Rgb(DIVIDER_COLOR));
    }
    y += 1 + SECTION_GAP;

    for (key, value) in meta {
        draw_str(&mut img, &format!("{key}:"), PAD, y, KEY_COLOR);
        draw_str(
            &mut img,
            value,
            PAD + key_col_chars * CHAR_W,
            y,
            VAL_COLOR,
        );
        y += META_ROW_H;
    }

    for x in PAD..img_w - PAD {
        img.put_pixel(x, y, Rgb(DIVIDER_COLOR));
    }
    y += 1 + SECTION_GAP;

    // Colour ramp: low height on the left, high on the right.
    let ramp_w = content_w;
    for dx in 0..ramp_w {
        let t = dx as f32 / (ramp_w - 1) as f32;
        let color = hypsometric(t);
        for dy in 0..RAMP_H {
            img.put_pixel(PAD + dx, y + dy, Rgb(color));
        }
    }
    outline_rect(&mut img, PAD, y, ramp_w, RAMP_H, DIVIDER_COLOR);

    img.save(path).unwrap();
}
