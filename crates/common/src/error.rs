//! Error related data structures to be shared and used.
//!
//! This module contains the [`Error`] enum, which is used to represent
//! errors that can occur within the dotmatrix domain.

use std::{
    fmt::{self, Display, Formatter},
    io,
};

/// Top level enum for error handling within dotmatrix.
///
/// Most of the time, you will want to use the `CustomError` variant
/// to provide a more detailed error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidData,
    RomSize,
    RomChecksum,
    UnsupportedCartridge(u8),
    InvalidParameter(String),
    CustomError(String),
}

impl Error {
    pub fn description(&self) -> String {
        match self {
            Error::InvalidData => String::from("Invalid data format"),
            Error::RomSize => String::from("Invalid ROM size"),
            Error::RomChecksum => String::from("Invalid ROM header checksum"),
            Error::UnsupportedCartridge(rom_type) => {
                format!("Unsupported cartridge type: 0x{:02x}", rom_type)
            }
            Error::InvalidParameter(message) => format!("Invalid parameter: {}", message),
            Error::CustomError(message) => String::from(message),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::CustomError(value.to_string())
    }
}
