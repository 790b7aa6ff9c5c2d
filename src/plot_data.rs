use egui::Color32;
use egui_plot::{Legend, Line, PlotPoint, PlotPoints};

use crate::colors::series_color;

/// One resolved curve ready to draw.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub label: String,
    pub color: Color32,
    pub y: Vec<f64>,
}

/// The fully resolved bundle handed to the plot layer: a shared x axis, one
/// or more y series with legend labels, and axis/chart titles. This is the
/// whole contract between resolution and rendering; nothing here knows how
/// the selection was made.
#[derive(Debug, Clone, Default)]
pub struct PlotData {
    pub x: Vec<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

impl PlotData {
    pub fn new(
        x: Vec<f64>,
        y_list: Vec<Vec<f64>>,
        labels: Option<Vec<String>>,
        x_label: &str,
        y_label: &str,
        title: &str,
    ) -> Self {
        let labels = labels
            .unwrap_or_else(|| (0..y_list.len()).map(|i| format!("Series {}", i + 1)).collect());
        let series = y_list
            .into_iter()
            .zip(labels)
            .enumerate()
            .map(|(i, (y, label))| PlotSeries {
                label,
                color: series_color(i),
                y,
            })
            .collect();
        PlotData {
            x,
            series,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            title: title.to_string(),
        }
    }

    /// Render with egui_plot: title above, legend on, one line per series.
    pub fn draw(&self, ui: &mut egui::Ui, plot_id: &str) {
        self.draw_impl(ui, plot_id, None);
    }

    /// Same as [`draw`](Self::draw) but with a fixed plot height, for grid
    /// panels that share the tab vertically.
    pub fn draw_sized(&self, ui: &mut egui::Ui, plot_id: &str, height: f32) {
        self.draw_impl(ui, plot_id, Some(height));
    }

    fn draw_impl(&self, ui: &mut egui::Ui, plot_id: &str, height: Option<f32>) {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&self.title).strong());
            let mut plot = egui_plot::Plot::new(plot_id.to_string())
                .legend(Legend::default())
                .x_axis_label(self.x_label.clone())
                .y_axis_label(self.y_label.clone());
            if let Some(height) = height {
                plot = plot.height(height);
            }
            plot.show(ui, |plot_ui| {
                for series in &self.series {
                    let points: Vec<PlotPoint> = self
                        .x
                        .iter()
                        .zip(&series.y)
                        .map(|(&x, &y)| PlotPoint::new(x, y))
                        .collect();
                    plot_ui.line(
                        Line::new(series.label.clone(), PlotPoints::Owned(points))
                            .color(series.color),
                    );
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_are_numbered() {
        let data = PlotData::new(
            vec![0.0, 1.0],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            None,
            "Time",
            "Power",
            "Scan 1",
        );
        assert_eq!(data.series[0].label, "Series 1");
        assert_eq!(data.series[1].label, "Series 2");
    }

    #[test]
    fn test_series_colors_follow_palette_order() {
        let data = PlotData::new(
            vec![0.0],
            vec![vec![1.0], vec![2.0]],
            Some(vec!["(0, X)".to_string(), "(0, Y)".to_string()]),
            "",
            "",
            "",
        );
        assert_eq!(data.series[0].color, series_color(0));
        assert_eq!(data.series[1].color, series_color(1));
    }
}
