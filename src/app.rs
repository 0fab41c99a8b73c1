use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{self, StockUniverse};
use crate::data::{HISTORICAL_SCHEMA, PREDICTION_SCHEMA, PricePoint, PriceRecordReader};
use crate::dataset::{AxisRange, ChartDataset, HISTORICAL_SERIES, PREDICTED_SERIES};

/// The two screens of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Selection,
    Chart,
}

/// UI events, reduced to the commands the controller understands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    SelectStock(StockUniverse),
    Back,
    ShowPrediction,
}

/// Owns the dataset, the screen state machine and both CSV loads. The GUI
/// layer feeds it `Action`s and renders whatever it holds afterwards;
/// ingestion failures are logged and swallowed, leaving whatever partial
/// data was built.
pub struct ChartSession {
    pub screen: Screen,
    pub selected: StockUniverse,
    pub dataset: ChartDataset,
    pub axis: Option<AxisRange>,
    pub prediction_shown: bool,
    join_point: Option<PricePoint>,
    data_dir: PathBuf,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::with_data_dir(config::default_data_dir())
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            screen: Screen::Selection,
            selected: StockUniverse::Nifty50,
            dataset: ChartDataset::new(),
            axis: None,
            prediction_shown: false,
            join_point: None,
            data_dir,
        }
    }

    pub fn join_point(&self) -> Option<&PricePoint> {
        self.join_point.as_ref()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectStock(universe) => {
                self.selected = universe;
                self.dataset.clear();
                self.join_point = None;
                self.prediction_shown = false;
                self.load_historical(universe);
                self.axis = self.dataset.axis_range();
                self.screen = Screen::Chart;
            }
            Action::Back => {
                self.screen = Screen::Selection;
            }
            Action::ShowPrediction => {
                if self.screen != Screen::Chart || self.prediction_shown {
                    return;
                }
                self.load_prediction(self.selected);
                self.axis = self.dataset.axis_range();
                self.prediction_shown = true;
            }
        }
    }

    fn load_historical(&mut self, universe: StockUniverse) {
        let path = self.data_dir.join(universe.historical_file_name());
        let reader = match PriceRecordReader::open(&path, HISTORICAL_SCHEMA) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("historical load for {} failed: {}", universe, e);
                return;
            }
        };

        let mut rows = 0usize;
        for result in reader {
            match result {
                Ok(point) => {
                    self.dataset
                        .push(HISTORICAL_SERIES, &point.date, point.price);
                    self.join_point = Some(point);
                    rows += 1;
                }
                Err(e) => {
                    warn!("historical load for {} aborted: {}", universe, e);
                    break;
                }
            }
        }
        info!("loaded {} historical rows for {}", rows, universe);
    }

    fn load_prediction(&mut self, universe: StockUniverse) {
        let path = self.data_dir.join(universe.prediction_file_name());
        let reader = match PriceRecordReader::open(&path, PREDICTION_SCHEMA) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("prediction load for {} failed: {}", universe, e);
                return;
            }
        };

        // The predicted line starts at the last historical point so the two
        // lines meet on a shared category. An empty historical load leaves
        // no join point, in which case the file rows stand alone.
        if let Some(join) = self.join_point.clone() {
            self.dataset.push(PREDICTED_SERIES, &join.date, join.price);
        }

        let mut rows = 0usize;
        for result in reader {
            match result {
                Ok(point) => {
                    self.dataset.push(PREDICTED_SERIES, &point.date, point.price);
                    rows += 1;
                }
                Err(e) => {
                    warn!("prediction load for {} aborted: {}", universe, e);
                    break;
                }
            }
        }
        info!("loaded {} predicted rows for {}", rows, universe);
    }
}

impl Default for ChartSession {
    fn default() -> Self {
        Self::new()
    }
}
