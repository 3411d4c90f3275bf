use dioxus::prelude::*;
use time::{macros::format_description, OffsetDateTime};

use crate::history::ChartPoint;

const WIDTH: f64 = 680.0;
const HEIGHT: f64 = 260.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 32.0;

/// Price-over-time line chart, rendered as inline SVG.
///
/// Expects the points pre-sorted ascending by `t` (the aggregator's
/// invariant); fewer than two points renders a placeholder instead.
#[component]
pub fn PriceChart(points: Vec<ChartPoint>, currency: String) -> Element {
    if points.len() < 2 {
        return rsx! {
            section { class: "dash-card dash-chart",
                div { class: "dash-card__header", h2 { "Price trend" } }
                p { class: "dash-card__placeholder", "Not enough data to chart yet." }
            }
        };
    }

    let geometry = ChartGeometry::fit(&points);
    let polyline = geometry.polyline(&points);
    let markers: Vec<(f64, f64)> = points.iter().map(|p| geometry.project(p)).collect();

    let y_top = format!("{:.0}", geometry.y_max);
    let y_bottom = format!("{:.0}", geometry.y_min);
    let x_first = date_label(points.first().map(|p| p.t).unwrap_or(0));
    let x_last = date_label(points.last().map(|p| p.t).unwrap_or(0));

    let baseline = HEIGHT - PAD_BOTTOM;

    rsx! {
        section { class: "dash-card dash-chart",
            div { class: "dash-card__header",
                h2 { "Price trend" }
                span { class: "dash-card__meta", "{points.len()} samples · {currency}" }
            }

            svg {
                class: "dash-chart__svg",
                view_box: "0 0 {WIDTH} {HEIGHT}",
                preserve_aspect_ratio: "xMidYMid meet",
                role: "img",
                "aria-label": "Price history line chart",

                // frame
                line {
                    x1: "{PAD_LEFT}", y1: "{PAD_TOP}",
                    x2: "{PAD_LEFT}", y2: "{baseline}",
                    class: "dash-chart__axis",
                }
                line {
                    x1: "{PAD_LEFT}", y1: "{baseline}",
                    x2: "{WIDTH - PAD_RIGHT}", y2: "{baseline}",
                    class: "dash-chart__axis",
                }

                polyline {
                    points: "{polyline}",
                    class: "dash-chart__line",
                    fill: "none",
                }

                for (x, y) in markers.into_iter() {
                    circle { cx: "{x}", cy: "{y}", r: "3", class: "dash-chart__point" }
                }

                text { x: "{PAD_LEFT - 8.0}", y: "{PAD_TOP + 4.0}",
                    text_anchor: "end", class: "dash-chart__label", "{y_top}" }
                text { x: "{PAD_LEFT - 8.0}", y: "{baseline}",
                    text_anchor: "end", class: "dash-chart__label", "{y_bottom}" }
                text { x: "{PAD_LEFT}", y: "{HEIGHT - 8.0}",
                    text_anchor: "start", class: "dash-chart__label", "{x_first}" }
                text { x: "{WIDTH - PAD_RIGHT}", y: "{HEIGHT - 8.0}",
                    text_anchor: "end", class: "dash-chart__label", "{x_last}" }
            }
        }
    }
}

struct ChartGeometry {
    t_min: f64,
    t_span: f64,
    y_min: f64,
    y_max: f64,
}

impl ChartGeometry {
    fn fit(points: &[ChartPoint]) -> Self {
        let t_min = points.iter().map(|p| p.t).min().unwrap_or(0) as f64;
        let t_max = points.iter().map(|p| p.t).max().unwrap_or(0) as f64;
        let mut y_min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let mut y_max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        // Flat series still needs a visible band.
        if (y_max - y_min).abs() < f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }

        Self {
            t_min,
            t_span: (t_max - t_min).max(1.0),
            y_min,
            y_max,
        }
    }

    fn project(&self, point: &ChartPoint) -> (f64, f64) {
        let plot_width = WIDTH - PAD_LEFT - PAD_RIGHT;
        let plot_height = HEIGHT - PAD_TOP - PAD_BOTTOM;
        let x = PAD_LEFT + (point.t as f64 - self.t_min) / self.t_span * plot_width;
        let y_fraction = (point.y - self.y_min) / (self.y_max - self.y_min);
        let y = PAD_TOP + (1.0 - y_fraction) * plot_height;
        (x, y)
    }

    fn polyline(&self, points: &[ChartPoint]) -> String {
        points
            .iter()
            .map(|p| {
                let (x, y) = self.project(p);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn date_label(epoch_ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(epoch_ms as i128 * 1_000_000)
        .ok()
        .and_then(|instant| {
            instant
                .format(&format_description!("[month repr:short] [day padding:none]"))
                .ok()
        })
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_spans_the_plot_area() {
        let points = vec![
            ChartPoint { t: 0, y: 100.0 },
            ChartPoint { t: 1_000, y: 200.0 },
        ];
        let geometry = ChartGeometry::fit(&points);

        let (x0, y0) = geometry.project(&points[0]);
        let (x1, y1) = geometry.project(&points[1]);

        assert_eq!(x0, PAD_LEFT);
        assert_eq!(x1, WIDTH - PAD_RIGHT);
        // lower price sits lower on screen (larger y)
        assert!(y0 > y1);
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let points = vec![
            ChartPoint { t: 0, y: 150.0 },
            ChartPoint { t: 1, y: 150.0 },
        ];
        let geometry = ChartGeometry::fit(&points);
        let (_, y) = geometry.project(&points[0]);
        assert!(y.is_finite());
    }
}
