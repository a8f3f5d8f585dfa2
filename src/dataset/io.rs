//! CSV persistence for [`Dataset`].
//!
//! The on-disk format is a header row `x,y` followed by one row per
//! observation. Writing overwrites any existing file.

use super::{Dataset, Observation};
use crate::error::{LinearLabError, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

const HEADER: [&str; 2] = ["x", "y"];

/// Writes `data` to `path`, creating parent directories as needed.
pub fn write_csv<P: AsRef<Path>>(data: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_to(data, file)?;
    log::info!("wrote {} observations to {}", data.len(), path.display());
    Ok(())
}

/// Reads a dataset previously written by [`write_csv`].
///
/// # Errors
/// - [`LinearLabError::Io`] if the file is missing or unreadable
/// - [`LinearLabError::MalformedData`] if the header is not `x,y`
/// - [`LinearLabError::Csv`] if a row has the wrong arity or a non-numeric field
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let data = read_from(BufReader::new(file))?;
    log::debug!("read {} observations from {}", data.len(), path.display());
    Ok(data)
}

/// Serializes `data` into any writer.
pub fn write_to<W: Write>(data: &Dataset, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    if data.is_empty() {
        // serde only emits the header together with the first record
        wtr.write_record(HEADER)?;
    }
    for obs in data.observations() {
        wtr.serialize(obs)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parses a dataset from any reader.
pub fn read_from<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let names: Vec<&str> = headers.iter().map(str::trim).collect();
    if names != HEADER {
        return Err(LinearLabError::MalformedData(format!(
            "expected columns [x, y], got [{}]",
            names.join(", ")
        )));
    }

    let mut observations = Vec::new();
    for record in rdr.deserialize::<Observation>() {
        observations.push(record?);
    }
    Ok(Dataset::new(observations))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_columns(&[10.0, 10.0, 11.0], &[9.47, 11.3, 10.05]).unwrap()
    }

    #[test]
    fn test_write_then_read_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("nested").join("simple_example.csv");

        write_csv(&sample(), &path)?;
        let loaded = read_csv(&path)?;

        assert_eq!(loaded, sample());
        Ok(())
    }

    #[test]
    fn test_written_header_and_column_order() -> Result<()> {
        let mut buf = Vec::new();
        write_to(&sample(), &mut buf)?;
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x,y"));
        assert_eq!(text.lines().count(), 4);
        Ok(())
    }

    #[test]
    fn test_empty_dataset_keeps_header() -> Result<()> {
        let mut buf = Vec::new();
        write_to(&Dataset::default(), &mut buf)?;
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "x,y");
        assert!(read_from("x,y\n".as_bytes())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_overwrite_existing_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("data.csv");
        std::fs::write(&path, "garbage")?;

        write_csv(&sample(), &path)?;
        assert_eq!(read_csv(&path)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_integer_formatted_x_is_accepted() -> Result<()> {
        let data = read_from("x,y\n10,9.47\n11,12.1\n".as_bytes())?;
        assert_eq!(data.xs(), vec![10.0, 11.0]);
        assert_eq!(data.ys(), vec![9.47, 12.1]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, LinearLabError::Io(_)));
    }

    #[test]
    fn test_wrong_header_is_malformed() {
        let err = read_from("a,b\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LinearLabError::MalformedData(_)));
    }

    #[test]
    fn test_non_numeric_field_is_csv_error() {
        let err = read_from("x,y\n1,abc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LinearLabError::Csv(_)));
    }

    #[test]
    fn test_wrong_arity_is_csv_error() {
        let err = read_from("x,y\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LinearLabError::Csv(_)));
    }
}
