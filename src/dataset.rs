use crate::config::Y_AXIS_BUFFER_FRACTION;
use crate::data::PricePoint;

pub const HISTORICAL_SERIES: &str = "Historical Price";
pub const PREDICTED_SERIES: &str = "Predicted Price";

/// One named line on the chart: an ordered run of (category, value) points.
#[derive(Clone, Debug)]
pub struct Series {
    pub name: String,
    pub points: Vec<PricePoint>,
}

/// Padded numeric range for the chart's value axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Category-keyed series store, the in-memory model behind the chart.
///
/// Categories are date strings; their x position is first-appearance order
/// across all series, so a date shared between the historical and predicted
/// series (the join point) lands on one shared x coordinate.
#[derive(Clone, Debug, Default)]
pub struct ChartDataset {
    series: Vec<Series>,
    categories: Vec<String>,
}

impl ChartDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.series.clear();
        self.categories.clear();
    }

    /// Appends a point under `series_name`, creating the series on first use
    /// and registering the category if it has not been seen yet.
    pub fn push(&mut self, series_name: &str, date: &str, price: f64) {
        if !self.categories.iter().any(|c| c == date) {
            self.categories.push(date.to_string());
        }
        match self.series.iter_mut().find(|s| s.name == series_name) {
            Some(series) => series.points.push(PricePoint::new(date, price)),
            None => self.series.push(Series {
                name: series_name.to_string(),
                points: vec![PricePoint::new(date, price)],
            }),
        }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get_series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category_index(&self, date: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == date)
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Observed (min, max) over every value in every series, or `None` when
    /// the dataset holds no points at all.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for series in &self.series {
            for point in &series.points {
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(point.price), hi.max(point.price)),
                    None => (point.price, point.price),
                });
            }
        }
        bounds
    }

    /// Display range for the value axis: observed bounds padded by
    /// `Y_AXIS_BUFFER_FRACTION` of the spread on each side. A single
    /// distinct value yields a zero-width range; an empty dataset has no
    /// range at all.
    pub fn axis_range(&self) -> Option<AxisRange> {
        let (min, max) = self.value_bounds()?;
        let buffer = (max - min) * Y_AXIS_BUFFER_FRACTION;
        Some(AxisRange {
            min: min - buffer,
            max: max + buffer,
        })
    }
}

/// Tooltip text for one plotted point, e.g. `Historical Price: 2024-01-02 - 110.5`.
/// Values show at most two decimals with trailing zeros dropped.
pub fn format_tooltip(series: &str, date: &str, value: f64) -> String {
    format!("{}: {} - {}", series, date, format_price(value))
}

fn format_price(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> ChartDataset {
        let mut ds = ChartDataset::new();
        ds.push(HISTORICAL_SERIES, "2024-01-01", 100.0);
        ds.push(HISTORICAL_SERIES, "2024-01-02", 110.0);
        ds
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let ds = sample_dataset();
        let series = ds.get_series(HISTORICAL_SERIES).unwrap();
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0], PricePoint::new("2024-01-01", 100.0));
        assert_eq!(series.points[1], PricePoint::new("2024-01-02", 110.0));
        assert_eq!(ds.categories(), ["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_shared_category_is_registered_once() {
        let mut ds = sample_dataset();
        ds.push(PREDICTED_SERIES, "2024-01-02", 110.0);
        ds.push(PREDICTED_SERIES, "2024-01-03", 115.0);
        assert_eq!(ds.categories().len(), 3);
        assert_eq!(ds.category_index("2024-01-02"), Some(1));
        assert_eq!(ds.category_index("2024-01-03"), Some(2));
    }

    #[test]
    fn test_axis_range_is_padded_by_half_the_spread() {
        let ds = sample_dataset();
        let range = ds.axis_range().unwrap();
        assert_eq!(range, AxisRange { min: 95.0, max: 115.0 });
    }

    #[test]
    fn test_axis_range_scans_all_series() {
        let mut ds = sample_dataset();
        ds.push(PREDICTED_SERIES, "2024-01-03", 130.0);
        let (min, max) = ds.value_bounds().unwrap();
        assert_eq!((min, max), (100.0, 130.0));
        let range = ds.axis_range().unwrap();
        assert_eq!(range, AxisRange { min: 85.0, max: 145.0 });
    }

    #[test]
    fn test_single_value_collapses_to_zero_buffer() {
        let mut ds = ChartDataset::new();
        ds.push(HISTORICAL_SERIES, "2024-01-01", 42.0);
        let range = ds.axis_range().unwrap();
        assert_eq!(range, AxisRange { min: 42.0, max: 42.0 });
    }

    #[test]
    fn test_empty_dataset_has_no_range() {
        let ds = ChartDataset::new();
        assert!(ds.is_empty());
        assert!(ds.value_bounds().is_none());
        assert!(ds.axis_range().is_none());
    }

    #[test]
    fn test_clear_drops_series_and_categories() {
        let mut ds = sample_dataset();
        ds.clear();
        assert!(ds.is_empty());
        assert!(ds.categories().is_empty());
        assert!(ds.get_series(HISTORICAL_SERIES).is_none());
    }

    #[test]
    fn test_tooltip_format_and_rounding() {
        assert_eq!(
            format_tooltip(HISTORICAL_SERIES, "2024-01-02", 110.0),
            "Historical Price: 2024-01-02 - 110"
        );
        assert_eq!(
            format_tooltip(PREDICTED_SERIES, "2024-01-03", 115.5),
            "Predicted Price: 2024-01-03 - 115.5"
        );
        assert_eq!(
            format_tooltip(PREDICTED_SERIES, "2024-01-04", 110.567),
            "Predicted Price: 2024-01-04 - 110.57"
        );
    }
}
