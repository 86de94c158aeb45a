use std::fmt::{self, Write};

const WIDTH: f32 = 720.0;
const HEIGHT: f32 = 400.0;
const MARGIN_LEFT: f32 = 60.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 50.0;
const TICK_EVERY_HZ: f32 = 50.0;

/// Fixed-width histogram of F0 values over `[min_hz, max_hz)`.
#[derive(Debug, Clone, PartialEq)]
pub struct F0Histogram {
    pub min_hz: f32,
    pub bin_width: f32,
    pub counts: Vec<usize>,
}

impl F0Histogram {
    /// Bin `values`; anything outside `[min_hz, max_hz)` is dropped.
    pub fn from_values(values: &[f32], min_hz: f32, max_hz: f32, bin_width: f32) -> Self {
        let bins = ((max_hz - min_hz) / bin_width).ceil().max(1.0) as usize;
        let mut counts = vec![0usize; bins];
        for &v in values {
            if v < min_hz || v >= max_hz {
                continue;
            }
            let idx = (((v - min_hz) / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Self {
            min_hz,
            bin_width,
            counts,
        }
    }

    pub fn max_hz(&self) -> f32 {
        self.min_hz + self.bin_width * self.counts.len() as f32
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Render as a standalone SVG bar chart.
    pub fn to_svg(&self, title: &str) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut svg, title);
        svg
    }

    /// Write the SVG bar chart into `svg`.
    pub fn write_svg<W: Write>(&self, svg: &mut W, title: &str) -> fmt::Result {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1) as f32;
        let bar_w = plot_w / self.counts.len() as f32;
        let x_of = |hz: f32| MARGIN_LEFT + (hz - self.min_hz) / self.bin_width * bar_w;
        let baseline = MARGIN_TOP + plot_h;

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        )?;
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            svg,
            r#"<text x="{}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
            WIDTH / 2.0,
            escape(title)
        )?;

        for (i, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let h = count as f32 / peak * plot_h;
            writeln!(
                svg,
                r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#4c72b0"><title>{:.0}-{:.0} Hz: {count}</title></rect>"##,
                MARGIN_LEFT + i as f32 * bar_w,
                baseline - h,
                bar_w,
                h,
                self.min_hz + i as f32 * self.bin_width,
                self.min_hz + (i + 1) as f32 * self.bin_width,
            )?;
        }

        writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="black"/>"#,
            MARGIN_LEFT + plot_w
        )?;
        writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline}" stroke="black"/>"#
        )?;

        let mut tick = (self.min_hz / TICK_EVERY_HZ).ceil() * TICK_EVERY_HZ;
        while tick <= self.max_hz() {
            let x = x_of(tick);
            writeln!(
                svg,
                r#"<line x1="{x:.2}" y1="{baseline}" x2="{x:.2}" y2="{}" stroke="black"/>"#,
                baseline + 4.0
            )?;
            if (tick / TICK_EVERY_HZ) as u32 % 2 == 0 {
                writeln!(
                    svg,
                    r#"<text x="{x:.2}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="11">{tick:.0}</text>"#,
                    baseline + 18.0
                )?;
            }
            tick += TICK_EVERY_HZ;
        }

        writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">F0 [Hz]</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 10.0
        )?;
        writeln!(
            svg,
            r#"<text x="{MARGIN_LEFT}" y="{}" text-anchor="end" font-family="sans-serif" font-size="11">{}</text>"#,
            MARGIN_TOP - 4.0,
            peak as usize
        )?;
        writeln!(svg, "</svg>")
    }
}

/// Value at percentile `p` (0-100) of `values`, by nearest rank.
pub fn percentile(values: &[f32], p: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let rank = ((p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f32).round() as usize;
    Some(sorted[rank])
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
