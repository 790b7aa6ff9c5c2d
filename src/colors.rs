use egui::Color32;

/// Fixed series palette. Resolved keys take colors in order, so the same
/// selection always maps the same key to the same color, and the console key
/// table can name the color it reports.
pub const SERIES_COLORS: &[(Color32, &str)] = &[
    (Color32::from_rgb(31, 119, 180), "Blue"),
    (Color32::from_rgb(255, 127, 14), "Orange"),
    (Color32::from_rgb(44, 160, 44), "Green"),
    (Color32::from_rgb(214, 39, 40), "Red"),
    (Color32::from_rgb(148, 103, 189), "Purple"),
    (Color32::from_rgb(140, 86, 75), "Brown"),
    (Color32::from_rgb(227, 119, 194), "Pink"),
    (Color32::from_rgb(127, 127, 127), "Gray"),
    (Color32::from_rgb(188, 189, 34), "Olive"),
    (Color32::from_rgb(23, 190, 207), "Cyan"),
];

pub fn series_color(index: usize) -> Color32 {
    SERIES_COLORS[index % SERIES_COLORS.len()].0
}

pub fn series_color_name(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps_around() {
        assert_eq!(series_color(0), series_color(SERIES_COLORS.len()));
        assert_eq!(series_color_name(1), series_color_name(SERIES_COLORS.len() + 1));
    }
}
