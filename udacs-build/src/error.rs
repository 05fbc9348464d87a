//! Board identity errors.

use displaydoc::Display;
use thiserror::Error;

/// Error selecting the board identity.
///
/// All of these are build configuration defects and must stop the build.
#[derive(Display, Error, Debug)]
pub enum Error {
    /// UDACS_BOARD_SN must be defined in the build properties
    MissingSerialNumber,
    /// unsupported subfunction number {0}
    UnsupportedSubfunction(u8),
    /// no firmware family is defined
    NoFamilies,
    /// serial number {serial_number} is unknown for subfunction {subfunction}
    UnknownSerialNumber {
        /// Board family code.
        subfunction: u8,
        /// Requested serial number.
        serial_number: u16,
    },
    /// firmware for serial number {serial_number} of subfunction {subfunction} is maintained in another repository
    ForeignSerialNumber {
        /// Board family code.
        subfunction: u8,
        /// Requested serial number.
        serial_number: u16,
    },
    /// location of serial number {0} is not defined
    MissingLocation(u16),
    /// {field} of serial number {serial_number} is not defined
    MissingField {
        /// Serial number of the defective entry.
        serial_number: u16,
        /// Name of the missing field.
        field: &'static str,
    },
    /// subfunction hex {hex:?} does not match subfunction {subfunction}
    HexMismatch {
        /// Board family code.
        subfunction: u8,
        /// Supplied hexadecimal representation.
        hex: String,
    },
    /// invalid value {value:?} for {name}
    InvalidValue {
        /// Setting name.
        name: String,
        /// Offending value.
        value: String,
    },
    /// subfunction {0} is defined more than once
    DuplicateSubfunction(u8),
    /// serial number {serial_number} is defined more than once for subfunction {subfunction}
    DuplicateSerialNumber {
        /// Board family code.
        subfunction: u8,
        /// Duplicated serial number.
        serial_number: u16,
    },
    /// serial number {serial_number} is listed although it is maintained in another repository
    ListedForeignSerialNumber {
        /// Board family code.
        subfunction: u8,
        /// Listed serial number.
        serial_number: u16,
    },
    /// board id {board_id} of serial number {serial_number} repeats the family default
    RedundantBoardId {
        /// Serial number of the entry.
        serial_number: u16,
        /// Overriding board id.
        board_id: u8,
    },
    /// cannot read build properties {path}: {source}
    Properties {
        /// Path of the properties file.
        path: String,
        /// Cause.
        source: std::io::Error,
    },
}
