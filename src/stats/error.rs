//! Statistics error types.

use derive_more::{Display, Error, From};

use crate::StoreError;

/// Errors raised while recording, exporting or importing statistics.
#[derive(Debug, Display, Error, From)]
pub enum StatsError {
    /// The backing store failed.
    #[display("{}", _0)]
    Store(StoreError),
    /// Save data was not valid JSON of the expected shape.
    #[display("Malformed save data: {}", _0)]
    Malformed(serde_json::Error),
    /// A save file could not be read or written.
    #[display("Save file error: {}", _0)]
    Io(std::io::Error),
}
