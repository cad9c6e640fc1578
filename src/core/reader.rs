use crate::domain::model::SourceRecord;
use crate::utils::error::{EtlError, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Cursor;
use std::sync::Arc;

/// Comma separated, double-quoted text with a mandatory header row.
///
/// Rows whose field count differs from the header are rejected rather than
/// padded, so a reshaped upstream file fails loudly instead of shifting
/// columns.
pub struct DelimitedReader {
    text: String,
    origin: String,
}

impl DelimitedReader {
    /// `origin` names the text's source (usually its URL) in error messages.
    pub fn new(text: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: origin.into(),
        }
    }

    /// Reads the header and returns a one-pass iterator over the data rows.
    pub fn records(self) -> Result<Records> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .quote(b'"')
            .flexible(false)
            .from_reader(Cursor::new(self.text));

        let headers = reader
            .headers()
            .map_err(|e| parse_error(&self.origin, e))?
            .clone();

        if headers.is_empty() {
            return Err(EtlError::ParseError {
                origin: self.origin,
                line: None,
                message: "missing header row".to_string(),
            });
        }

        tracing::debug!(
            origin = %self.origin,
            columns = ?headers.iter().collect::<Vec<_>>(),
            "Parsed CSV header"
        );

        Ok(Records {
            headers: Arc::new(headers),
            inner: reader.into_records(),
            origin: self.origin,
        })
    }
}

pub struct Records {
    headers: Arc<StringRecord>,
    inner: StringRecordsIntoIter<Cursor<String>>,
    origin: String,
}

impl Iterator for Records {
    type Item = Result<SourceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        Some(match next {
            Ok(values) => {
                let line = values.position().map(|p| p.line()).unwrap_or_default();
                Ok(SourceRecord::new(Arc::clone(&self.headers), values, line))
            }
            Err(e) => Err(parse_error(&self.origin, e)),
        })
    }
}

fn parse_error(origin: &str, err: csv::Error) -> EtlError {
    let line = err.position().map(|p| p.line());
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("row has {len} fields but the header has {expected_len}"),
        _ => err.to_string(),
    };
    EtlError::ParseError {
        origin: origin.to_string(),
        line,
        message,
    }
}
