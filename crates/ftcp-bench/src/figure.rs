// FTCP - File Transfer Communication Protocol
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SVG candlestick figures.
//!
//! One figure per file size: a grid of panels with timeout settings as rows
//! and packet loss rates as columns. Each window size is drawn as a grey
//! min-to-max bar with a black tick at the average. All panels share a
//! logarithmic y axis and the fixed window-size x ticks.

use crate::dataset::{AggregatedDataset, Candle, PLR_VALUES, TIMEOUT_SETTINGS, WINDOW_SIZES};

/// Figure width in pixels.
pub const WIDTH: f64 = 1500.0;
/// Figure height in pixels.
pub const HEIGHT: f64 = 700.0;

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 10.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TITLE_HEIGHT: f64 = 26.0;
const H_GAP: f64 = 24.0;
const V_GAP: f64 = 30.0;

const X_MIN: f64 = 0.0;
const X_MAX: f64 = 17.0;
const AVG_HALF_WIDTH: f64 = 0.2;

const RANGE_COLOR: &str = "grey";
const AVG_COLOR: &str = "black";
const GRID_COLOR: &str = "#b0b0b0";
const STROKE_WIDTH: f64 = 4.0;

/// Shared x-axis label.
pub const X_LABEL: &str = "Window Size (in Blocks of 1450 Bytes)";
/// Shared y-axis label.
pub const Y_LABEL: &str = "Transfer Duration (s)";

/// Decade-aligned logarithmic axis range `[10^lo, 10^hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogScale {
    /// Exponent of the lowest decade.
    pub lo: i32,
    /// Exponent of the highest decade.
    pub hi: i32,
}

impl LogScale {
    /// Smallest decade range covering every positive duration.
    ///
    /// Falls back to `[0.1, 10]` when there is nothing positive to show.
    pub fn covering<'a>(candles: impl IntoIterator<Item = &'a Candle>) -> Self {
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for candle in candles {
            for v in [candle.min, candle.avg, candle.max] {
                if v > 0.0 && v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }

        if !min.is_finite() {
            return Self { lo: -1, hi: 1 };
        }

        let lo = min.log10().floor() as i32;
        let mut hi = max.log10().ceil() as i32;
        if hi <= lo {
            hi = lo + 1;
        }
        Self { lo, hi }
    }

    /// Position of `value` on the axis, 0.0 at the bottom and 1.0 at the top.
    ///
    /// Values at or below zero clamp to the bottom.
    pub fn fraction(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return 0.0;
        }
        let f = (value.log10() - f64::from(self.lo)) / f64::from(self.hi - self.lo);
        f.clamp(0.0, 1.0)
    }
}

/// Pixel rectangle of one panel's plotting area.
#[derive(Debug, Clone, Copy)]
struct Panel {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Panel {
    fn at(row: usize, col: usize) -> Self {
        let rows = TIMEOUT_SETTINGS.len() as f64;
        let cols = PLR_VALUES.len() as f64;
        let w = (WIDTH - MARGIN_LEFT - MARGIN_RIGHT - (cols - 1.0) * H_GAP) / cols;
        let h = (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM - rows * TITLE_HEIGHT - (rows - 1.0) * V_GAP)
            / rows;
        Self {
            x: MARGIN_LEFT + col as f64 * (w + H_GAP),
            y: MARGIN_TOP + TITLE_HEIGHT + row as f64 * (h + TITLE_HEIGHT + V_GAP),
            w,
            h,
        }
    }

    fn px(&self, window: f64) -> f64 {
        self.x + (window - X_MIN) / (X_MAX - X_MIN) * self.w
    }

    fn py(&self, scale: &LogScale, value: f64) -> f64 {
        self.y + self.h - scale.fraction(value) * self.h
    }
}

/// Escapes text for use in SVG character data and attributes.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn line(svg: &mut String, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        x1, y1, x2, y2, color, width
    ));
}

fn text(svg: &mut String, x: f64, y: f64, anchor: &str, size: u32, content: &str) {
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" font-size=\"{}\">{}</text>\n",
        x,
        y,
        anchor,
        size,
        escape(content)
    ));
}

/// Title shown above one panel.
pub fn panel_title(file_size: &str, plr: f64, timeout: &str) -> String {
    format!("File Size: {}, PLR: {}, Timeout: {}", file_size, plr, timeout)
}

/// Renders the figure for one file size as a standalone SVG document.
pub fn render_svg(dataset: &AggregatedDataset) -> String {
    let scale = LogScale::covering(dataset.candles());
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
        WIDTH, HEIGHT
    ));

    for (row, timeout) in TIMEOUT_SETTINGS.into_iter().enumerate() {
        for (col, plr) in PLR_VALUES.into_iter().enumerate() {
            let panel = Panel::at(row, col);
            let last_row = row + 1 == TIMEOUT_SETTINGS.len();
            render_panel(
                &mut svg,
                &panel,
                &scale,
                dataset.cell(timeout, plr),
                col == 0,
                last_row,
            );
            text(
                &mut svg,
                panel.x + panel.w / 2.0,
                panel.y - 8.0,
                "middle",
                13,
                &panel_title(dataset.file_size(), plr, timeout),
            );
        }
    }

    let plot_center_x = MARGIN_LEFT + (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / 2.0;
    let plot_center_y = MARGIN_TOP + (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) / 2.0;
    text(&mut svg, plot_center_x, HEIGHT - 15.0, "middle", 15, X_LABEL);
    svg.push_str(&format!(
        "<text x=\"0\" y=\"0\" text-anchor=\"middle\" font-size=\"15\" transform=\"translate(22,{:.2}) rotate(-90)\">{}</text>\n",
        plot_center_y,
        escape(Y_LABEL)
    ));

    svg.push_str("</svg>\n");
    svg
}

fn render_panel(
    svg: &mut String,
    panel: &Panel,
    scale: &LogScale,
    candles: &[Candle],
    y_labels: bool,
    x_labels: bool,
) {
    svg.push_str("<g>\n");

    for exp in scale.lo..=scale.hi {
        let y = panel.py(scale, 10f64.powi(exp));
        line(svg, panel.x, y, panel.x + panel.w, y, GRID_COLOR, 0.8);
        line(svg, panel.x - 5.0, y, panel.x, y, AVG_COLOR, 1.0);
        if y_labels {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"12\">10<tspan dy=\"-6\" font-size=\"9\">{}</tspan></text>\n",
                panel.x - 8.0,
                y + 4.0,
                exp
            ));
        }
    }

    for window in WINDOW_SIZES {
        let x = panel.px(f64::from(window));
        line(svg, x, panel.y, x, panel.y + panel.h, GRID_COLOR, 0.8);
        line(svg, x, panel.y + panel.h, x, panel.y + panel.h + 5.0, AVG_COLOR, 1.0);
        if x_labels {
            text(svg, x, panel.y + panel.h + 18.0, "middle", 12, &window.to_string());
        }
    }

    for candle in candles {
        let window = f64::from(candle.window_size);
        let x = panel.px(window);
        line(
            svg,
            x,
            panel.py(scale, candle.min),
            x,
            panel.py(scale, candle.max),
            RANGE_COLOR,
            STROKE_WIDTH,
        );
        let avg = panel.py(scale, candle.avg);
        line(
            svg,
            panel.px(window - AVG_HALF_WIDTH),
            avg,
            panel.px(window + AVG_HALF_WIDTH),
            avg,
            AVG_COLOR,
            STROKE_WIDTH,
        );
    }

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"black\" stroke-width=\"1\"/>\n",
        panel.x, panel.y, panel.w, panel.h
    ));
    svg.push_str("</g>\n");
}
