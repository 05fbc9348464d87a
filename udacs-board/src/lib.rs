//
// uDACS board identity
// Copyright (C) 2023 The uDACS developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

//! uDACS board identity of this firmware image.
//!
//! The identity is selected at build time by the serial number in
//! `UDACS_BOARD_SN`, optionally together with the CAN bus identifier in
//! `UDACS_CAN_BOARD_ID`. The build fails if the serial number is missing
//! or unknown.

#![no_std]

pub use udacs_shared::{BoardIdentity, BoardInfo, Family};

include!(concat!(env!("OUT_DIR"), "/board.rs"));

const _: () = assert!(BOARD.is_complete(), "board identity is incomplete");

/// Board type code as defined in "SYSCON Memory Maps and Subbus Board IDs".
pub const SUBBUS_SUBFUNCTION: u8 = BOARD.family.subfunction;

/// Subfunction in hex, as used in the revision string.
pub const SUBBUS_SUBFUNCTION_HEX: &str = BOARD.subfunction_hex;

/// Board identification number (*not* the CAN board id).
pub const SUBBUS_BOARD_ID: u8 = BOARD.identity.board_id;

/// Serial number among boards of the same subfunction.
pub const SUBBUS_BOARD_SN: u16 = BOARD.serial_number;

/// Build number.
pub const SUBBUS_BOARD_BUILD_NUM: u16 = BOARD.family.build_num;

/// Number that maps to the instrument name.
pub const SUBBUS_BOARD_INSTRUMENT_ID: u8 = BOARD.identity.instrument_id;

/// Instrument name.
pub const SUBBUS_BOARD_INSTRUMENT: &str = BOARD.identity.instrument;

/// Board type.
pub const SUBBUS_BOARD_BOARD_TYPE: &str = BOARD.identity.board_type;

/// Install location.
pub const SUBBUS_BOARD_LOCATION: &str = BOARD.identity.location;

/// Hardware revision.
pub const SUBBUS_BOARD_BOARD_REV: &str = BOARD.family.board_rev;

/// Firmware revision.
pub const SUBBUS_BOARD_FIRMWARE_REV: &str = BOARD.family.firmware_rev;

/// Board description.
pub const SUBBUS_BOARD_DESC: &str = BOARD.description;

/// Board revision string.
pub const SUBBUS_BOARD_REV: &str = BOARD.revision;

/// CAN bus identifier, if defined at build time.
pub const CAN_BOARD_ID: Option<u8> = BOARD.can_board_id;

/// Board has a real-time clock.
pub const HAVE_RTC: bool = BOARD.family.have_rtc;

/// Board revision string as bytes, e.g. for bus identification replies.
pub static BOARD_REV: &[u8] = env!("UDACS_BOARD_REV").as_bytes();

/// Logs the board identity.
#[cfg(feature = "defmt")]
pub fn log() {
    BOARD.log();
}
