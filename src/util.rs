use crate::frontend::TableFrontend;
use encoding_rs::Encoding;
use filter_core::ColumnIdx;
use log::{info, warn};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};

/// Spreadsheet style column name: 1 -> A, 27 -> AA.
pub fn base_26(mut num: u32) -> String {
    let mut result = String::new();
    while num > 0 {
        num -= 1; // Adjust for 1-based indexing
        let remainder = (num % 26) as u8;
        let letter = (b'A' + remainder) as char; // Convert to letter A-Z
        result.insert(0, letter); // Prepend letter
        num /= 26;
    }
    result
}

/// Guess text encoding from the first `max_bytes` (or all) bytes, rewinds the reader afterwards.
pub fn detect_encoding<R: Read + Seek>(
    rdr: &mut BufReader<R>,
    max_bytes: Option<usize>,
) -> std::io::Result<&'static Encoding> {
    const CHUNK_SIZE: usize = 64 * 1024;
    rdr.seek(SeekFrom::Start(0))?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut read = 0;
    let mut detector = chardetng::EncodingDetector::new();
    loop {
        let n = rdr.read(&mut buf)?;
        if n == 0 {
            break;
        }
        read += n;
        detector.feed(&buf[..n], false);
        if let Some(max) = max_bytes {
            if read >= max {
                break;
            }
        }
    }
    detector.feed(&[], true);
    rdr.seek(SeekFrom::Start(0))?;

    Ok(detector.guess(None, true))
}

/// Write header and visible rows as CSV.
pub fn write_visible_csv<W: Write>(table: &impl TableFrontend, wtr: W) -> csv::Result<usize> {
    let column_count = table.column_count();
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(wtr);
    let header: Vec<&str> = (0..column_count)
        .map(|col| table.column_name(ColumnIdx(col)).unwrap_or_default())
        .collect();
    wtr.write_record(&header)?;
    let mut written = 0;
    for row_uid in table.visible_row_uids() {
        let record: Vec<&str> = (0..column_count)
            .map(|col| table.cell_text(row_uid, ColumnIdx(col)).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

/// Ask for a file name and export visible rows to it.
pub fn export_csv(table: &impl TableFrontend) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };
    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            warn!("export: cannot create {path:?}: {e}");
            return;
        }
    };
    match write_visible_csv(table, file) {
        Ok(rows) => info!("export: {rows} rows written to {path:?}"),
        Err(e) => warn!("export to {path:?} failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::request::RequestBackend;
    use filter_core::{RowSource, RowUid};
    use std::io::Cursor;

    #[test]
    fn base_26_names() {
        assert_eq!(base_26(1), "A");
        assert_eq!(base_26(26), "Z");
        assert_eq!(base_26(27), "AA");
        assert_eq!(base_26(0), "");
    }

    #[test]
    fn detects_utf8_and_rewinds() {
        let text = "Серийный номер;Модель;Статус\nSN1;Бас 12;Закрыта\n";
        let mut rdr = BufReader::new(Cursor::new(text.as_bytes().to_vec()));
        let encoding = detect_encoding(&mut rdr, None).unwrap();
        assert_eq!(encoding, encoding_rs::UTF_8);
        assert_eq!(rdr.stream_position().unwrap(), 0);
    }

    #[test]
    fn exports_only_visible_rows() {
        let mut backend = RequestBackend::new(["#", "Serial"]);
        backend.insert_row(["1", "SN1"]);
        let hidden = backend.insert_row(["2", "SN2"]);
        backend.insert_row(["3"]);
        backend.set_row_visible(hidden, false);
        assert!(!backend.is_row_visible(RowUid(1)));

        let mut out = Vec::new();
        let written = write_visible_csv(&backend, &mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "#,Serial\n1,SN1\n3,\n");
    }
}
