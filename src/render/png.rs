use super::font::{draw_text, draw_text_up, fill, text_height, text_width};
use super::Renderer;
use crate::error::{HeatError, Result};
use crate::heat::grid::{COLUMNS, ROWS};
use crate::heat::Grid;
use crate::model::{month_name, weekday_name, MONTHS, WEEKDAYS};
use image::{Rgb, RgbImage};
use palette::{LinSrgb, Mix, Srgb};
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 600;

const SCALE: u32 = 2;
const MARGIN: i64 = 16;
const LEGEND_BAR: i64 = 24;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([40, 40, 40]);
const LIGHT_INK: Rgb<u8> = Rgb([250, 250, 250]);

// Yellow-orange-brown, lightest first.
const GRADIENT: [(u8, u8, u8); 9] = [
    (0xff, 0xff, 0xe5),
    (0xff, 0xf7, 0xbc),
    (0xfe, 0xe3, 0x91),
    (0xfe, 0xc4, 0x4f),
    (0xfe, 0x99, 0x29),
    (0xec, 0x70, 0x14),
    (0xcc, 0x4c, 0x02),
    (0x99, 0x34, 0x04),
    (0x66, 0x25, 0x06),
];

/// Writes a weekday x month heatmap as a PNG.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

struct Layout {
    left: i64,
    top: i64,
    cell_w: i64,
    cell_h: i64,
}

impl Layout {
    fn right(&self) -> i64 {
        self.left + self.cell_w * COLUMNS as i64
    }

    fn bottom(&self) -> i64 {
        self.top + self.cell_h * ROWS as i64
    }
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn draw(&self, grid: &Grid, title: &str) -> Result<RgbImage> {
        let layout = self.layout(grid)?;
        let mut image = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        let line = i64::from(text_height(SCALE));

        let title_x = (i64::from(self.width) - i64::from(text_width(title, SCALE))) / 2;
        draw_text(&mut image, title_x.max(MARGIN), MARGIN, title, SCALE, INK);

        let max = grid.max();
        for (row, (_, counts)) in grid.rows().enumerate() {
            for (column, count) in counts.iter().enumerate() {
                let x = layout.left + column as i64 * layout.cell_w;
                let y = layout.top + row as i64 * layout.cell_h;
                let t = intensity(*count, max);
                fill(&mut image, x, y, layout.cell_w - 1, layout.cell_h - 1, heat_color(t));

                let label = count.to_string();
                let w = i64::from(text_width(&label, SCALE));
                if *count > 0 && w + 4 <= layout.cell_w && line + 4 <= layout.cell_h {
                    let ink = if t > 0.6 { LIGHT_INK } else { INK };
                    draw_text(
                        &mut image,
                        x + (layout.cell_w - w) / 2,
                        y + (layout.cell_h - line) / 2,
                        &label,
                        SCALE,
                        ink,
                    );
                }
            }
        }

        for (row, weekday) in WEEKDAYS.iter().enumerate() {
            let name = weekday_name(*weekday);
            let w = i64::from(text_width(name, SCALE));
            let y = layout.top + row as i64 * layout.cell_h + (layout.cell_h - line) / 2;
            draw_text(&mut image, layout.left - MARGIN / 2 - w, y, name, SCALE, INK);
        }

        for (column, month) in MONTHS.iter().enumerate() {
            let short: String = month_name(*month).chars().take(3).collect();
            let w = i64::from(text_width(&short, SCALE));
            let x = layout.left + column as i64 * layout.cell_w + (layout.cell_w - w) / 2;
            draw_text(&mut image, x, layout.bottom() + MARGIN / 2, &short, SCALE, INK);
        }

        let axis = "Month";
        let axis_x = layout.left + (layout.right() - layout.left - i64::from(text_width(axis, SCALE))) / 2;
        draw_text(&mut image, axis_x, layout.bottom() + MARGIN + line, axis, SCALE, INK);

        let axis = "Day of the Week";
        let axis_y = layout.top + (layout.bottom() - layout.top + i64::from(text_width(axis, SCALE))) / 2;
        draw_text_up(&mut image, MARGIN, axis_y, axis, SCALE, INK);

        self.draw_legend(&mut image, &layout, max);
        Ok(image)
    }

    fn draw_legend(&self, image: &mut RgbImage, layout: &Layout, max: u64) {
        let x = layout.right() + MARGIN;
        let height = layout.bottom() - layout.top;
        for dy in 0..height {
            let t = 1.0 - dy as f32 / (height - 1).max(1) as f32;
            fill(image, x, layout.top + dy, LEGEND_BAR, 1, heat_color(t));
        }

        let line = i64::from(text_height(SCALE));
        let label_x = x + LEGEND_BAR + MARGIN / 2;
        draw_text(image, label_x, layout.top, &max.to_string(), SCALE, INK);
        draw_text(image, label_x, layout.bottom() - line, "0", SCALE, INK);

        let caption = "Number of Changes";
        let caption_x = i64::from(self.width) - MARGIN - line;
        let caption_y = layout.top + (height + i64::from(text_width(caption, SCALE))) / 2;
        draw_text_up(image, caption_x, caption_y, caption, SCALE, INK);
    }

    fn layout(&self, grid: &Grid) -> Result<Layout> {
        let line = i64::from(text_height(SCALE));
        let widest_day = WEEKDAYS
            .iter()
            .map(|w| text_width(weekday_name(*w), SCALE))
            .max()
            .unwrap_or(0);
        let legend_label = text_width(&grid.max().to_string(), SCALE);

        let left = MARGIN + line + MARGIN / 2 + i64::from(widest_day) + MARGIN / 2;
        let top = MARGIN * 2 + line;
        let right =
            MARGIN + LEGEND_BAR + MARGIN / 2 + i64::from(legend_label) + MARGIN / 2 + line + MARGIN;
        let bottom = MARGIN * 2 + line * 2;

        let cell_w = (i64::from(self.width) - left - right) / COLUMNS as i64;
        let cell_h = (i64::from(self.height) - top - bottom) / ROWS as i64;
        if cell_w < 2 || cell_h < 2 {
            return Err(HeatError::Render(format!(
                "Image size {}x{} is too small for a {ROWS}x{COLUMNS} heatmap",
                self.width, self.height
            )));
        }

        Ok(Layout { left, top, cell_w, cell_h })
    }
}

impl Renderer for PngRenderer {
    fn render(&self, grid: &Grid, title: &str, path: &Path) -> Result<()> {
        let image = self.draw(grid, title)?;
        image.save(path)?;
        Ok(())
    }
}

fn intensity(count: u64, max: u64) -> f32 {
    if max == 0 {
        0.0
    } else {
        count as f32 / max as f32
    }
}

/// Color for a normalised intensity in `[0, 1]`, interpolated in linear RGB.
pub fn heat_color(t: f32) -> Rgb<u8> {
    let stops: Vec<LinSrgb<f32>> = GRADIENT
        .iter()
        .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
        .collect();

    let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
    let idx1 = scaled.floor() as usize;
    let idx2 = (idx1 + 1).min(stops.len() - 1);
    let mixed = stops[idx1].mix(stops[idx2], scaled.fract());

    let srgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    let (r, g, b) = srgb.into_components();
    Rgb([r, g, b])
}
