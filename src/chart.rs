//! 集計結果を棒グラフとして描画するモジュール
//!
//! 上位作成者・時（0-23）・曜日の3つのパネルを横に並べ、1枚のPNG画像に合成します。

use crate::analyzer::{AggregatedView, AnalyzerError};
use image::{Rgb, RgbImage};
use palette::{FromColor, Lch, Srgb};
use std::path::Path;
use tracing::debug;

const BACKGROUND: Rgb<u8> = Rgb([250, 250, 252]);
const AXIS: Rgb<u8> = Rgb([60, 60, 70]);
const GRID: Rgb<u8> = Rgb([225, 225, 232]);
const MARGIN: u32 = 24;
const GRID_LINES: u32 = 4;

/// 各パネルの大きさ（ピクセル）
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub panel_width: u32,
    pub panel_height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            panel_width: 480,
            panel_height: 360,
        }
    }
}

/// 3つのパネルを合成した画像を作成します
///
/// 空の集計結果に対しては、軸だけのパネルを描画します。
/// 文字は描画しないため、棒は作成者の順位順・0時から23時・月曜日から日曜日の順に並びます。
pub fn draw(view: &AggregatedView, options: ChartOptions) -> RgbImage {
    let authors: Vec<usize> = view.author_series().into_iter().map(|(_, c)| c).collect();
    let hours: Vec<usize> = view.hour_series().into_iter().map(|(_, c)| c).collect();
    let weekdays: Vec<usize> = view.weekday_series().into_iter().map(|(_, c)| c).collect();

    let panels: [(&[usize], f32); 3] = [
        (authors.as_slice(), 20.0),
        (hours.as_slice(), 250.0),
        (weekdays.as_slice(), 140.0),
    ];

    let mut image = RgbImage::from_pixel(options.panel_width * 3, options.panel_height, BACKGROUND);
    for (index, (values, hue)) in panels.iter().enumerate() {
        let x_offset = index as u32 * options.panel_width;
        draw_panel(&mut image, x_offset, values, bar_color(*hue), options);
    }

    image
}

/// 合成した画像をPNGとして保存します
pub fn render(
    view: &AggregatedView,
    path: impl AsRef<Path>,
    options: ChartOptions,
) -> Result<(), AnalyzerError> {
    let path = path.as_ref();
    draw(view, options).save(path)?;
    debug!("Wrote chart to {}", path.display());
    Ok(())
}

fn draw_panel(
    image: &mut RgbImage,
    x_offset: u32,
    values: &[usize],
    color: Rgb<u8>,
    options: ChartOptions,
) {
    let left = x_offset + MARGIN;
    let right = x_offset + options.panel_width.saturating_sub(MARGIN);
    let top = MARGIN;
    let bottom = options.panel_height.saturating_sub(MARGIN);
    if right <= left || bottom <= top {
        return;
    }
    let plot_height = bottom - top;

    for step in 1..=GRID_LINES {
        let y = bottom - plot_height * step / GRID_LINES;
        fill_rect(image, left, y, right, y + 1, GRID);
    }

    let max = values.iter().copied().max().unwrap_or(0);
    if !values.is_empty() && max > 0 {
        let slot = (right - left) / values.len() as u32;
        let gap = (slot / 5).max(1);
        for (i, &value) in values.iter().enumerate() {
            let height = (plot_height as u64 * value as u64 / max as u64) as u32;
            if height == 0 {
                continue;
            }
            let x0 = left + slot * i as u32 + gap;
            let x1 = left + slot * (i as u32 + 1) - gap;
            fill_rect(image, x0, bottom - height, x1.max(x0 + 1), bottom, color);
        }
    }

    // 軸
    fill_rect(image, left, bottom, right, bottom + 2, AXIS);
    fill_rect(image, left.saturating_sub(2), top, left, bottom + 2, AXIS);
}

fn fill_rect(image: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    let x1 = x1.min(image.width());
    let y1 = y1.min(image.height());
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

fn bar_color(hue: f32) -> Rgb<u8> {
    let srgb: Srgb<f32> = Srgb::from_color(Lch::new(60.0f32, 60.0f32, hue));
    let (r, g, b) = srgb.into_components();
    Rgb([
        (r.clamp(0.0, 1.0) * 255.0) as u8,
        (g.clamp(0.0, 1.0) * 255.0) as u8,
        (b.clamp(0.0, 1.0) * 255.0) as u8,
    ])
}
