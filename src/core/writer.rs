use crate::domain::ports::OutputRecord;
use crate::utils::error::{EtlError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Every field is quoted, so postal codes such as `8001` stay text for
/// spreadsheet consumers. Rows end with CRLF, header included.
pub struct DelimitedWriter;

impl DelimitedWriter {
    pub fn encode<R: OutputRecord>(rows: &[R]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .quote(b'"')
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(R::HEADER)?;
        for row in rows {
            writer.serialize(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| EtlError::IoError(e.into_error()))
    }
}
