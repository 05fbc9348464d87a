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

//! uDACS shared code.
//!
//! Types describing the identity of a uDACS board. They are used by the
//! firmware at run time and by the build tools that select the identity.

#![no_std]

/// Firmware family.
///
/// Holds the constants common to all boards built from one firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Family {
    /// Board type code as defined in "SYSCON Memory Maps and Subbus Board IDs".
    pub subfunction: u8,
    /// Hexadecimal representation of the subfunction, if supplied.
    pub subfunction_hex: Option<&'static str>,
    /// Default board identification number (*not* the CAN board id).
    pub board_id: u8,
    /// Hardware revision label.
    pub board_rev: &'static str,
    /// Firmware revision label.
    pub firmware_rev: &'static str,
    /// Build number.
    pub build_num: u16,
    /// Secondary version field of the revision string.
    pub secondary_version: u8,
    /// Board has a real-time clock.
    pub have_rtc: bool,
}

/// uDACS Rev B.1.
///
/// Rev B.1 differs from earlier Rev B boards by the installed components
/// and by what is connected remotely. Serial numbers are unique across all
/// Rev B boards.
pub const UDACS_REV_B1: Family = Family {
    subfunction: 14,
    subfunction_hex: Some("E"),
    board_id: 3,
    board_rev: "Rev B.1",
    firmware_rev: "V2.0",
    build_num: 14,
    secondary_version: 0,
    have_rtc: true,
};

/// Identity of one board within a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardIdentity {
    /// Number that maps to the instrument name.
    pub instrument_id: u8,
    /// Instrument name.
    pub instrument: &'static str,
    /// Board identification number.
    pub board_id: u8,
    /// Board type.
    pub board_type: &'static str,
    /// Install location or role.
    pub location: &'static str,
}

impl BoardIdentity {
    /// Whether all descriptive fields are present.
    pub const fn is_complete(&self) -> bool {
        !self.instrument.is_empty() && !self.board_type.is_empty() && !self.location.is_empty()
    }
}

/// Board identity selected for a firmware image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardInfo {
    /// Firmware family.
    pub family: Family,
    /// Serial number among boards of the same subfunction.
    pub serial_number: u16,
    /// CAN bus identifier, if known at build time.
    ///
    /// Must be unique on a specific CAN bus.
    pub can_board_id: Option<u8>,
    /// Identity record.
    pub identity: BoardIdentity,
    /// Hexadecimal representation of the subfunction.
    pub subfunction_hex: &'static str,
    /// Human-readable board description.
    pub description: &'static str,
    /// Board revision string announced on the bus.
    pub revision: &'static str,
}

impl BoardInfo {
    /// Whether the identity and all composed strings are present.
    pub const fn is_complete(&self) -> bool {
        self.identity.is_complete()
            && !self.subfunction_hex.is_empty()
            && !self.description.is_empty()
            && !self.revision.is_empty()
    }

    /// Logs the board identity.
    #[cfg(feature = "defmt")]
    pub fn log(&self) {
        defmt::info!("board:          {}", self.description);
        defmt::info!("board revision: {}", self.revision);
        defmt::info!(
            "subfunction:    0x{:02x} board id: {} instrument id: {}",
            self.family.subfunction,
            self.identity.board_id,
            self.identity.instrument_id
        );
    }
}
