//! Built-in raster backend: draws the call graph onto an RGB canvas with a
//! deterministic circular layout and encodes it as PNG. Layout quality is
//! deliberately basic; callers wanting publication-grade output can feed the
//! DOT backend to an external layout engine instead.

use anyhow::Result;
use std::io::Cursor;

use crate::core::graph::CallGraphHolder;
use crate::render::{node_label, GraphImageBackend};
use crate::report::fonts::ResolvedFonts;

const BACKGROUND: Rgb = Rgb(255, 255, 255);
const EDGE_COLOR: Rgb = Rgb(90, 90, 90);
const NODE_FILL: Rgb = Rgb(176, 208, 230);
const NODE_MISSING_FILL: Rgb = Rgb(240, 170, 160);
const NODE_BORDER: Rgb = Rgb(40, 40, 40);
const NODE_MISSING_BORDER: Rgb = Rgb(170, 30, 30);
const TEXT_COLOR: Rgb = Rgb(15, 15, 15);

const NODE_HEIGHT: i64 = 18;
const GLYPH_WIDTH: i64 = 6;
const MARGIN: i64 = 24;

#[derive(Debug, Clone, Copy)]
struct Rgb(u8, u8, u8);

pub struct RasterBackend;

impl RasterBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RasterBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphImageBackend for RasterBackend {
    // This backend has no TTF rasterizer: whatever the font configuration
    // resolves to, labels are drawn with the embedded bitmap face, the same
    // built-in the resolution step falls back to for missing font paths.
    fn render(&self, holder: &CallGraphHolder, _fonts: &ResolvedFonts) -> Result<Vec<u8>> {
        let nodes: Vec<_> = holder
            .graph()
            .node_indices()
            .filter_map(|index| holder.node(index).map(|node| (index, node)))
            .collect();

        let labels: Vec<String> = nodes.iter().map(|(_, node)| node_label(node)).collect();
        let max_label = labels
            .iter()
            .map(|label| label.chars().count() as i64)
            .max()
            .unwrap_or(0);
        let node_width = (max_label * GLYPH_WIDTH + 10).max(40);

        // Circle big enough that neighbouring boxes cannot overlap.
        let count = nodes.len() as i64;
        let radius = (count * (node_width + NODE_HEIGHT) / 4).max(100);
        let size = 2 * (radius + node_width / 2 + MARGIN);

        let mut canvas = Canvas::new(size as usize, size as usize);
        let center = size / 2;

        let positions: Vec<(i64, i64)> = (0..nodes.len())
            .map(|slot| {
                let angle = std::f64::consts::TAU * slot as f64 / nodes.len().max(1) as f64
                    - std::f64::consts::FRAC_PI_2;
                (
                    center + (radius as f64 * angle.cos()) as i64,
                    center + (radius as f64 * angle.sin()) as i64,
                )
            })
            .collect();

        // Edges first so node boxes paint over the line ends.
        let slot_of = |index: petgraph::graph::NodeIndex| {
            nodes.iter().position(|(node_index, _)| *node_index == index)
        };
        for endpoints in holder.edges() {
            let (Some(from), Some(to)) = (slot_of(endpoints.from), slot_of(endpoints.to)) else {
                continue;
            };
            if from == to {
                canvas.draw_self_loop(positions[from], node_width, EDGE_COLOR);
            } else {
                canvas.draw_edge(positions[from], positions[to], EDGE_COLOR);
            }
        }

        for (slot, (_, node)) in nodes.iter().enumerate() {
            let (fill, border) = if node.exists {
                (NODE_FILL, NODE_BORDER)
            } else {
                (NODE_MISSING_FILL, NODE_MISSING_BORDER)
            };
            canvas.draw_node_box(positions[slot], node_width, fill, border);
            canvas.draw_text_centered(positions[slot], &labels[slot], TEXT_COLOR);
        }

        canvas.encode_png()
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}

struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        let width = width.max(320);
        let height = height.max(240);
        let mut pixels = vec![0u8; width * height * 3];
        for chunk in pixels.chunks_exact_mut(3) {
            chunk[0] = BACKGROUND.0;
            chunk[1] = BACKGROUND.1;
            chunk[2] = BACKGROUND.2;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let offset = (y as usize * self.width + x as usize) * 3;
        self.pixels[offset] = color.0;
        self.pixels[offset + 1] = color.1;
        self.pixels[offset + 2] = color.2;
    }

    fn fill_rect(&mut self, x0: i64, y0: i64, w: i64, h: i64, color: Rgb) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.put(x, y, color);
            }
        }
    }

    fn line(&mut self, mut x0: i64, mut y0: i64, x1: i64, y1: i64, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x0 += sx;
            }
            if doubled <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Line with a direction tick: a filled square placed at 80% of the way
    /// from source to target, standing in for an arrow head.
    fn draw_edge(&mut self, from: (i64, i64), to: (i64, i64), color: Rgb) {
        self.line(from.0, from.1, to.0, to.1, color);
        let tick_x = from.0 + (to.0 - from.0) * 4 / 5;
        let tick_y = from.1 + (to.1 - from.1) * 4 / 5;
        self.fill_rect(tick_x - 2, tick_y - 2, 5, 5, color);
    }

    fn draw_self_loop(&mut self, at: (i64, i64), node_width: i64, color: Rgb) {
        // Small square hanging off the top-right corner of the box.
        let x = at.0 + node_width / 2;
        let y = at.1 - NODE_HEIGHT / 2;
        self.line(x, y, x + 10, y - 10, color);
        self.line(x + 10, y - 10, x + 10, y + 10, color);
        self.line(x + 10, y + 10, x, y + 2, color);
    }

    fn draw_node_box(&mut self, at: (i64, i64), node_width: i64, fill: Rgb, border: Rgb) {
        let x0 = at.0 - node_width / 2;
        let y0 = at.1 - NODE_HEIGHT / 2;
        self.fill_rect(x0, y0, node_width, NODE_HEIGHT, fill);
        self.line(x0, y0, x0 + node_width - 1, y0, border);
        self.line(x0, y0 + NODE_HEIGHT - 1, x0 + node_width - 1, y0 + NODE_HEIGHT - 1, border);
        self.line(x0, y0, x0, y0 + NODE_HEIGHT - 1, border);
        self.line(x0 + node_width - 1, y0, x0 + node_width - 1, y0 + NODE_HEIGHT - 1, border);
    }

    fn draw_text_centered(&mut self, at: (i64, i64), text: &str, color: Rgb) {
        let width = text.chars().count() as i64 * GLYPH_WIDTH;
        let mut x = at.0 - width / 2;
        let y = at.1 - 3;
        for ch in text.chars() {
            self.draw_glyph(x, y, ch, color);
            x += GLYPH_WIDTH;
        }
    }

    fn draw_glyph(&mut self, x: i64, y: i64, ch: char, color: Rgb) {
        let rows = glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5 {
                if bits & (0b10000 >> col) != 0 {
                    self.put(x + col as i64, y - 3 + row as i64, color);
                }
            }
        }
    }

    fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(Cursor::new(&mut out), self.width as u32, self.height as u32);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
        }
        Ok(out)
    }
}

/// 5x7 bitmap for the characters node labels can contain; lowercase input is
/// drawn with the uppercase shape, anything unknown as a hollow box.
fn glyph(ch: char) -> [u8; 7] {
    let ch = ch.to_ascii_uppercase();
    match ch {
        ' ' => [0, 0, 0, 0, 0, 0, 0],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        '-' => [0, 0, 0, 0b01110, 0, 0, 0],
        '.' => [0, 0, 0, 0, 0, 0b00100, 0b00100],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}
