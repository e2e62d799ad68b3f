//! Formatting utilities for the dashctl client.
//!
//! This module provides functionality for formatting output as JSON or CSV.

use csv::Writer;
use serde::Serialize;
use std::str::FromStr;
use strum::EnumIter;

pub const JSON: &str = "json";
pub const CSV: &str = "csv";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    /// Error specific to CSV operations
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Error when converting bytes to UTF-8 string
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("CSV writer into inner error: {0}")]
    CsvIntoInnerError(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
}

#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
pub struct OutputFormatOptions {
    pub with_headers: bool,
    pub pretty: bool,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq, PartialOrd, EnumIter)]
pub enum OutputFormat {
    /// CSV (Comma-Separated Values) format
    Csv(OutputFormatOptions),
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        vec![JSON, CSV]
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        let normalized_format = format_str.to_lowercase();
        match normalized_format.as_str() {
            JSON => Ok(OutputFormat::Json(options)),
            CSV => Ok(OutputFormat::Csv(options)),
            _ => Err(FormattingError::UnsupportedOutputFormat(normalized_format)),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Csv(_) => write!(f, "csv"),
            OutputFormat::Json(_) => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

/// Trait for producing CSV records from data
pub trait CsvRecordProducer {
    /// Returns the header row for the CSV output
    fn csv_header() -> Vec<String>;

    /// Converts the data into CSV records
    fn as_csv_records(&self) -> Vec<Vec<String>>;

    /// Produces CSV output with or without a header row
    fn to_csv(&self, with_header: bool) -> Result<String, FormattingError> {
        let mut wtr = Writer::from_writer(Vec::new());
        if with_header {
            wtr.write_record(Self::csv_header())?;
        }
        for record in self.as_csv_records() {
            wtr.write_record(&record)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        let bytes = wtr.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl<T: CsvRecordProducer> CsvRecordProducer for Vec<T> {
    fn csv_header() -> Vec<String> {
        T::csv_header()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        self.iter().flat_map(|item| item.as_csv_records()).collect()
    }
}

pub trait Formattable {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError>;
}

impl<T> Formattable for T
where
    T: Serialize + CsvRecordProducer,
{
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => self.to_csv(options.with_headers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        count: u64,
    }

    impl CsvRecordProducer for Row {
        fn csv_header() -> Vec<String> {
            vec!["NAME".to_string(), "COUNT".to_string()]
        }

        fn as_csv_records(&self) -> Vec<Vec<String>> {
            vec![vec![self.name.clone(), self.count.to_string()]]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "a".to_string(), count: 1 },
            Row { name: "b, c".to_string(), count: 2 },
        ]
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap().to_string(), "json");
        assert_eq!(OutputFormat::from_str("csv").unwrap().to_string(), "csv");
        assert!(OutputFormat::from_str("tree").is_err());
        assert_eq!(OutputFormat::names(), vec!["json", "csv"]);
    }

    #[test]
    fn test_csv_output() {
        let with_headers = OutputFormat::Csv(OutputFormatOptions {
            with_headers: true,
            pretty: false,
        });
        assert_eq!(
            rows().format(&with_headers).unwrap(),
            "NAME,COUNT\na,1\n\"b, c\",2\n"
        );

        let plain = OutputFormat::Csv(OutputFormatOptions::default());
        assert_eq!(rows().format(&plain).unwrap(), "a,1\n\"b, c\",2\n");
    }

    #[test]
    fn test_json_output() {
        let json = rows().format(&OutputFormat::default()).unwrap();
        assert_eq!(json, r#"[{"name":"a","count":1},{"name":"b, c","count":2}]"#);

        let pretty = OutputFormat::Json(OutputFormatOptions {
            with_headers: false,
            pretty: true,
        });
        assert!(rows().format(&pretty).unwrap().contains("\n  {"));
    }
}
