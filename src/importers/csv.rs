use crate::backends::request::RequestBackend;
use crate::util::{base_26, detect_encoding};
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read, Seek, SeekFrom};
use tap::Tap;

/// Bytes looked at when guessing the encoding and the separator.
const SNIFF_BYTES: usize = 1024 * 1024;

/// Loads request rows from a CSV export into a [`RequestBackend`].
pub struct CsvImporter {
    encoding: Option<&'static Encoding>,
    status: IoStatus,
}

#[derive(Default, Debug)]
pub enum IoStatus {
    #[default]
    Empty,
    IoError(std::io::Error),
    ReaderError(csv::Error),
    ReaderErrorAtLine(usize, csv::Error),
    Loaded(usize),
    UnknownSeparator,
}

impl IoStatus {
    pub fn is_error(&self) -> bool {
        match self {
            IoStatus::Empty => false,
            IoStatus::IoError(_) | IoStatus::ReaderError(_) | IoStatus::ReaderErrorAtLine(_, _) => {
                true
            }
            IoStatus::Loaded(_) => false,
            IoStatus::UnknownSeparator => true,
        }
    }
}

#[derive(
    strum::EnumIter, strum::Display, Debug, PartialEq, Copy, Clone, Default, Serialize, Deserialize,
)]
pub enum Separator {
    #[default]
    Auto,
    Comma,
    Tab,
    Semicolon,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct CsvImporterConfig {
    pub separator: Separator,
    pub skip_first_rows: usize,
    pub has_headers: bool,
}

impl Default for CsvImporterConfig {
    fn default() -> Self {
        CsvImporterConfig {
            separator: Default::default(),
            skip_first_rows: 0,
            has_headers: true,
        }
    }
}

impl Default for CsvImporter {
    fn default() -> Self {
        CsvImporter::new()
    }
}

impl CsvImporter {
    pub fn new() -> Self {
        CsvImporter {
            encoding: None,
            status: IoStatus::Empty,
        }
    }

    /// Skip detection and decode input with the given encoding.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Replace backend rows (and columns, if the file has a header row) with the file contents.
    pub fn load<R: Read + Seek>(
        &mut self,
        config: &CsvImporterConfig,
        rdr: &mut BufReader<R>,
        backend: &mut RequestBackend,
    ) {
        trace!("CsvImporter: loading");
        backend.clear();

        let encoding = match self.encoding {
            Some(encoding) => encoding,
            None => match detect_encoding(rdr, Some(SNIFF_BYTES)) {
                Ok(encoding) => encoding,
                Err(e) => {
                    self.status = IoStatus::IoError(e);
                    return;
                }
            },
        };
        debug!("CsvImporter: encoding {}", encoding.name());

        let separator = match self.determine_separator(config, rdr) {
            Ok(Some(separator)) => separator,
            Ok(None) => {
                self.status = IoStatus::UnknownSeparator;
                return;
            }
            Err(e) => {
                self.status = IoStatus::IoError(e);
                return;
            }
        };

        if let Err(e) = rdr.seek(SeekFrom::Start(0)) {
            self.status = IoStatus::IoError(e);
            return;
        }
        let decoded = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .build(&mut *rdr);
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(separator)
            .has_headers(false) // to be able to ignore first N rows
            .flexible(true)
            .from_reader(decoded);
        let mut records = rdr.records();
        for _ in 0..config.skip_first_rows {
            records.next();
        }

        let mut headers = None;
        if config.has_headers {
            match records.next() {
                Some(Ok(record)) => {
                    headers = Some(record.iter().map(str::to_owned).collect::<Vec<_>>());
                }
                Some(Err(e)) => {
                    self.status = IoStatus::ReaderError(e);
                    return;
                }
                None => {
                    self.status = IoStatus::Empty;
                    return;
                }
            }
        }

        let mut rows_loaded = 0;
        let mut max_width = 0;
        for (row_idx, record) in records.enumerate() {
            match record {
                Ok(record) => {
                    max_width = max_width.max(record.len());
                    backend.insert_row(record.iter());
                    rows_loaded += 1;
                }
                Err(e) => {
                    let header_rows = usize::from(config.has_headers);
                    self.status = IoStatus::ReaderErrorAtLine(
                        row_idx + 1 + header_rows + config.skip_first_rows,
                        e,
                    );
                    warn!("CsvImporter: {:?}", self.status);
                    return;
                }
            }
        }

        match headers {
            Some(headers) => backend.set_columns(headers),
            None => backend.set_columns((1..=max_width as u32).map(base_26)),
        }
        debug!("CsvImporter: {rows_loaded} rows loaded");
        self.status = IoStatus::Loaded(rows_loaded);
    }

    /// Pick the separator, counting candidates in the first bytes when set to `Auto`.
    fn determine_separator<R: Read + Seek>(
        &self,
        config: &CsvImporterConfig,
        rdr: &mut BufReader<R>,
    ) -> std::io::Result<Option<u8>> {
        Ok(Some(match config.separator {
            Separator::Auto => {
                let mut counts: [(usize, u8); 3] = [(0, b','), (0, b'\t'), (0, b';')];
                for b in (&mut *rdr).bytes().take(SNIFF_BYTES) {
                    match b? {
                        b',' => counts[0].0 += 1,
                        b'\t' => counts[1].0 += 1,
                        b';' => counts[2].0 += 1,
                        _ => {}
                    }
                }
                rdr.seek(SeekFrom::Start(0))?;
                let (count, separator) = counts
                    .tap_mut(|counts| counts.sort_by(|a, b| a.0.cmp(&b.0)))[2];
                if count == 0 {
                    return Ok(None);
                }
                separator
            }
            Separator::Comma => b',',
            Separator::Tab => b'\t',
            Separator::Semicolon => b';',
        }))
    }

    pub fn status(&self) -> &IoStatus {
        &self.status
    }
}
