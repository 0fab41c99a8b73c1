use std::path::PathBuf;

/// Fraction of the observed value spread added below the minimum and above
/// the maximum when computing the displayed Y-axis range.
pub const Y_AXIS_BUFFER_FRACTION: f64 = 0.5;

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// The fixed set of stock universes the selection screen offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockUniverse {
    Nifty50,
    Nifty100,
    Nifty200,
}

impl StockUniverse {
    pub const ALL: [StockUniverse; 3] = [
        StockUniverse::Nifty50,
        StockUniverse::Nifty100,
        StockUniverse::Nifty200,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Nifty50 => "Nifty50",
            Self::Nifty100 => "Nifty100",
            Self::Nifty200 => "Nifty200",
        }
    }

    pub fn historical_file_name(self) -> &'static str {
        match self {
            Self::Nifty50 => "nifty50_stock_data.csv",
            Self::Nifty100 => "nifty100_stock_data.csv",
            Self::Nifty200 => "nifty200_stock_data.csv",
        }
    }

    pub fn prediction_file_name(self) -> &'static str {
        match self {
            Self::Nifty50 => "stock_predictions_nifty50.csv",
            Self::Nifty100 => "stock_predictions_nifty100.csv",
            Self::Nifty200 => "stock_predictions_nifty200.csv",
        }
    }
}

impl std::fmt::Display for StockUniverse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn project_root_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Directory holding the per-universe historical and prediction CSV files.
pub fn default_data_dir() -> PathBuf {
    project_root_path().join("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_file_names_are_distinct() {
        let hist: Vec<&str> = StockUniverse::ALL
            .iter()
            .map(|u| u.historical_file_name())
            .collect();
        let pred: Vec<&str> = StockUniverse::ALL
            .iter()
            .map(|u| u.prediction_file_name())
            .collect();
        for (i, h) in hist.iter().enumerate() {
            for (j, other) in hist.iter().enumerate() {
                if i != j {
                    assert_ne!(h, other);
                }
            }
            assert!(!pred.contains(h));
        }
    }

    #[test]
    fn test_labels_match_selector_entries() {
        assert_eq!(StockUniverse::Nifty50.label(), "Nifty50");
        assert_eq!(StockUniverse::Nifty100.label(), "Nifty100");
        assert_eq!(StockUniverse::Nifty200.label(), "Nifty200");
    }
}
