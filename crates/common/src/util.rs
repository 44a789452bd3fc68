//! Assorted utility functions shared across the dotmatrix codebase.

use std::{
    fs::File,
    io::{Read, Write},
};

use crate::error::Error;

/// Reads the contents of the file at the given path into
/// a vector of bytes.
pub fn read_file(path: &str) -> Result<Vec<u8>, Error> {
    let mut file =
        File::open(path).map_err(|_| Error::CustomError(format!("Failed to open file: {path}")))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|_| Error::CustomError(format!("Failed to read from file: {path}")))?;
    Ok(data)
}

/// Writes the given data to the file at the given path.
pub fn write_file(path: &str, data: &[u8], flush: Option<bool>) -> Result<(), Error> {
    let mut file = File::create(path)
        .map_err(|_| Error::CustomError(format!("Failed to create file: {path}")))?;
    file.write_all(data)
        .map_err(|_| Error::CustomError(format!("Failed to write to file: {path}")))?;
    if flush.unwrap_or(true) {
        file.flush()
            .map_err(|_| Error::CustomError(format!("Failed to flush file: {path}")))?;
    }
    Ok(())
}

/// Current wall-clock time as seconds since the Unix epoch.
///
/// Used by the cartridge RTC to account for time elapsed while
/// the emulator was not running.
pub fn timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now();
    now.duration_since(UNIX_EPOCH).unwrap().as_secs()
}

#[cfg(test)]
mod tests {
    use std::{env::temp_dir, fs::remove_file};

    use super::{read_file, timestamp, write_file};

    #[test]
    fn test_file_round_trip() {
        let path = temp_dir().join("dotmatrix_util_test.bin");
        let path_s = path.to_str().unwrap();
        write_file(path_s, &[0x01, 0x02, 0x03], None).unwrap();
        let data = read_file(path_s).unwrap();
        assert_eq!(data, vec![0x01, 0x02, 0x03]);
        remove_file(path).unwrap();
    }

    #[test]
    fn test_timestamp_epoch() {
        // any host this code runs on is comfortably past 2020
        assert!(timestamp() > 1_577_836_800);
    }
}
