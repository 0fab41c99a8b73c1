use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// One parsed (date, close price) row from an input CSV.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

/// Fixed column positions for one CSV layout. Input files carry a single
/// header row which the reader skips.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSchema {
    pub date_col: usize,
    pub price_col: usize,
}

/// Historical files: date in column 0, close price in column 4.
pub const HISTORICAL_SCHEMA: ColumnSchema = ColumnSchema {
    date_col: 0,
    price_col: 4,
};

/// Prediction files: date in column 0, predicted price in column 1.
pub const PREDICTION_SCHEMA: ColumnSchema = ColumnSchema {
    date_col: 0,
    price_col: 1,
};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Streaming reader over one CSV file, yielding one `PricePoint` per data
/// row. The first error terminates the stream; callers keep whatever rows
/// were yielded before it.
pub struct PriceRecordReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    schema: ColumnSchema,
    line: usize,
}

impl PriceRecordReader<File> {
    pub fn open(path: &Path, schema: ColumnSchema) -> Result<Self, IngestError> {
        let file = File::open(path).map_err(|source| IngestError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(file, schema))
    }
}

impl<R: Read> PriceRecordReader<R> {
    pub fn from_reader(reader: R, schema: ColumnSchema) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_records();
        // Line 1 is the header; data rows are numbered from 2.
        Self {
            records,
            schema,
            line: 1,
        }
    }

    fn parse_record(&self, record: &csv::StringRecord) -> Result<PricePoint, IngestError> {
        let date = record
            .get(self.schema.date_col)
            .ok_or_else(|| IngestError::Parse {
                line: self.line,
                message: format!("missing date column {}", self.schema.date_col),
            })?;
        let raw_price = record
            .get(self.schema.price_col)
            .ok_or_else(|| IngestError::Parse {
                line: self.line,
                message: format!("missing price column {}", self.schema.price_col),
            })?;
        let price = raw_price.parse::<f64>().map_err(|_| IngestError::Parse {
            line: self.line,
            message: format!("non-numeric price {:?}", raw_price),
        })?;
        Ok(PricePoint::new(date, price))
    }
}

impl<R: Read> Iterator for PriceRecordReader<R> {
    type Item = Result<PricePoint, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line += 1;
        let record = match self.records.next()? {
            Ok(r) => r,
            Err(e) => {
                return Some(Err(IngestError::Parse {
                    line: self.line,
                    message: format!("malformed CSV record: {e}"),
                }));
            }
        };
        Some(self.parse_record(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORICAL_CSV: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-01,99.0,101.0,98.5,100.0,1000
2024-01-02,100.5,111.0,100.0,110.0,1200
";

    #[test]
    fn test_historical_rows_in_file_order() {
        let reader = PriceRecordReader::from_reader(HISTORICAL_CSV.as_bytes(), HISTORICAL_SCHEMA);
        let points: Vec<PricePoint> = reader.map(|r| r.unwrap()).collect();
        assert_eq!(
            points,
            vec![
                PricePoint::new("2024-01-01", 100.0),
                PricePoint::new("2024-01-02", 110.0),
            ]
        );
    }

    #[test]
    fn test_header_row_is_skipped() {
        let csv = "Date,Predicted\n2024-01-03,115.0\n";
        let reader = PriceRecordReader::from_reader(csv.as_bytes(), PREDICTION_SCHEMA);
        let points: Vec<PricePoint> = reader.map(|r| r.unwrap()).collect();
        assert_eq!(points, vec![PricePoint::new("2024-01-03", 115.0)]);
    }

    #[test]
    fn test_non_numeric_price_reports_line() {
        let csv = "Date,Predicted\n2024-01-03,115.0\n2024-01-04,abc\n";
        let mut reader = PriceRecordReader::from_reader(csv.as_bytes(), PREDICTION_SCHEMA);
        assert!(reader.next().unwrap().is_ok());
        match reader.next().unwrap() {
            Err(IngestError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("non-numeric"));
            }
            other => panic!("expected parse error, got {:?}", other.map(|p| p.date)),
        }
    }

    #[test]
    fn test_short_row_is_a_parse_error() {
        let csv = "Date,Open,High,Low,Close\n2024-01-01,99.0\n";
        let mut reader = PriceRecordReader::from_reader(csv.as_bytes(), HISTORICAL_SCHEMA);
        match reader.next().unwrap() {
            Err(IngestError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("price column"));
            }
            other => panic!("expected parse error, got {:?}", other.map(|p| p.date)),
        }
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let path = Path::new("definitely/not/here.csv");
        match PriceRecordReader::open(path, HISTORICAL_SCHEMA) {
            Err(IngestError::FileAccess { path: p, .. }) => {
                assert_eq!(p, path.to_path_buf());
            }
            _ => panic!("expected file access error"),
        }
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        let reader = PriceRecordReader::from_reader("".as_bytes(), HISTORICAL_SCHEMA);
        assert_eq!(reader.count(), 0);
    }
}
