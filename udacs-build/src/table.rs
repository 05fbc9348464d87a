//! Serial number tables.

use std::collections::HashSet;

use udacs_shared::{BoardIdentity, Family, UDACS_REV_B1};

use crate::Error;

/// Table entry for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Serial number among boards of the same subfunction.
    pub serial_number: u16,
    /// Number that maps to the instrument name.
    pub instrument_id: u8,
    /// Instrument name.
    pub instrument: &'static str,
    /// Board id, if it differs from the family default.
    pub board_id: Option<u8>,
    /// Board type.
    pub board_type: &'static str,
    /// Install location or role.
    pub location: &'static str,
}

impl Entry {
    /// Identity of the board, with the board id resolved against the family.
    pub fn identity(&self, family: &Family) -> BoardIdentity {
        BoardIdentity {
            instrument_id: self.instrument_id,
            instrument: self.instrument,
            board_id: self.board_id.unwrap_or(family.board_id),
            board_type: self.board_type,
            location: self.location,
        }
    }

    /// Checks that all descriptive fields are present.
    pub fn check(&self) -> Result<(), Error> {
        for (field, value) in [("instrument", self.instrument), ("board type", self.board_type)] {
            if value.is_empty() {
                return Err(Error::MissingField { serial_number: self.serial_number, field });
            }
        }
        if self.location.is_empty() {
            return Err(Error::MissingLocation(self.serial_number));
        }
        Ok(())
    }
}

/// Serial number table of a firmware family.
#[derive(Clone, Copy, Debug)]
pub struct FamilyTable {
    /// Firmware family.
    pub family: Family,
    /// Boards built from this firmware.
    pub entries: &'static [Entry],
    /// Serial numbers of the same subfunction whose firmware is maintained elsewhere.
    pub foreign_serial_numbers: &'static [u16],
}

impl FamilyTable {
    /// Entry for the specified serial number.
    pub fn entry(&self, serial_number: u16) -> Result<&'static Entry, Error> {
        let subfunction = self.family.subfunction;
        if self.foreign_serial_numbers.contains(&serial_number) {
            return Err(Error::ForeignSerialNumber { subfunction, serial_number });
        }
        self.entries
            .iter()
            .find(|entry| entry.serial_number == serial_number)
            .ok_or(Error::UnknownSerialNumber { subfunction, serial_number })
    }

    /// Validates the table and returns all defects found.
    pub fn check(&self) -> Vec<Error> {
        let subfunction = self.family.subfunction;
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for entry in self.entries {
            let serial_number = entry.serial_number;
            if !seen.insert(serial_number) {
                errors.push(Error::DuplicateSerialNumber { subfunction, serial_number });
            }
            if self.foreign_serial_numbers.contains(&serial_number) {
                errors.push(Error::ListedForeignSerialNumber { subfunction, serial_number });
            }
            if let Err(err) = entry.check() {
                errors.push(err);
            }
            match entry.board_id {
                Some(board_id) if board_id == self.family.board_id => {
                    errors.push(Error::RedundantBoardId { serial_number, board_id })
                }
                _ => (),
            }
        }

        errors
    }
}

/// Serial numbers 1 through 4 are Rev B boards with board ids 1 and 2.
const REV_B_FOREIGN: &[u16] = &[1, 2, 3, 4];

/// uDACS Rev B.1 boards.
const REV_B1_BOARDS: &[Entry] = &[
    Entry {
        serial_number: 5,
        instrument_id: 10,
        instrument: "FOCAL",
        board_id: None,
        board_type: "OE uDACS",
        location: "CO2",
    },
    Entry {
        serial_number: 6,
        instrument_id: 10,
        instrument: "FOCAL",
        board_id: None,
        board_type: "OE uDACS",
        location: "Methane",
    },
    Entry {
        serial_number: 7,
        instrument_id: 10,
        instrument: "FOCAL",
        board_id: None,
        board_type: "OE uDACS",
        location: "CO2 Backup",
    },
    Entry {
        serial_number: 8,
        instrument_id: 10,
        instrument: "FOCAL",
        board_id: None,
        board_type: "OE uDACS",
        location: "Methane Backup",
    },
    Entry {
        serial_number: 9,
        instrument_id: 10,
        instrument: "Test",
        board_id: None,
        board_type: "Spare uDACS",
        location: "Stock",
    },
];

/// Supported firmware families.
pub static FAMILIES: &[FamilyTable] =
    &[FamilyTable { family: UDACS_REV_B1, entries: REV_B1_BOARDS, foreign_serial_numbers: REV_B_FOREIGN }];

/// Table of the specified subfunction within the specified families.
pub fn family_in(families: &'static [FamilyTable], subfunction: u8) -> Result<&'static FamilyTable, Error> {
    families
        .iter()
        .find(|table| table.family.subfunction == subfunction)
        .ok_or(Error::UnsupportedSubfunction(subfunction))
}

/// Table of the specified subfunction.
pub fn family(subfunction: u8) -> Result<&'static FamilyTable, Error> {
    family_in(FAMILIES, subfunction)
}

/// Validates all specified families and returns all defects found.
pub fn check_tables(families: &[FamilyTable]) -> Vec<Error> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for table in families {
        if !seen.insert(table.family.subfunction) {
            errors.push(Error::DuplicateSubfunction(table.family.subfunction));
        }
        errors.extend(table.check());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPARE: Entry = Entry {
        serial_number: 20,
        instrument_id: 1,
        instrument: "Test",
        board_id: None,
        board_type: "Spare uDACS",
        location: "Stock",
    };

    #[test]
    fn shipped_tables_are_valid() {
        let errors = check_tables(FAMILIES);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn unsupported_subfunction() {
        for subfunction in [0, 1, 13, 15, 255] {
            assert!(matches!(family(subfunction), Err(Error::UnsupportedSubfunction(sf)) if sf == subfunction));
        }
        assert_eq!(family(14).unwrap().family, UDACS_REV_B1);
    }

    #[test]
    fn foreign_serial_numbers() {
        let table = family(14).unwrap();
        for serial_number in 1..=4 {
            assert!(matches!(table.entry(serial_number), Err(Error::ForeignSerialNumber { .. })));
        }
    }

    #[test]
    fn board_id_defaults_to_family() {
        assert_eq!(SPARE.identity(&UDACS_REV_B1).board_id, 3);
        assert_eq!(Entry { board_id: Some(7), ..SPARE }.identity(&UDACS_REV_B1).board_id, 7);
    }

    #[test]
    fn missing_location_is_distinct() {
        let entry = Entry { location: "", ..SPARE };
        assert!(matches!(entry.check(), Err(Error::MissingLocation(20))));

        let entry = Entry { board_type: "", ..SPARE };
        assert!(matches!(entry.check(), Err(Error::MissingField { serial_number: 20, field: "board type" })));
    }

    #[test]
    fn defective_table() {
        static ENTRIES: &[Entry] = &[
            SPARE,
            Entry { instrument: "", ..SPARE },
            Entry { serial_number: 2, ..SPARE },
            Entry { serial_number: 21, board_id: Some(3), ..SPARE },
            Entry { serial_number: 22, board_id: Some(4), ..SPARE },
        ];
        let table = FamilyTable { family: UDACS_REV_B1, entries: ENTRIES, foreign_serial_numbers: &[2] };

        let errors = check_tables(&[table, table]);
        let messages: Vec<_> = errors.iter().map(|err| err.to_string()).collect();
        assert_eq!(
            messages[..5],
            [
                "serial number 20 is defined more than once for subfunction 14",
                "instrument of serial number 20 is not defined",
                "serial number 2 is listed although it is maintained in another repository",
                "board id 3 of serial number 21 repeats the family default",
                "subfunction 14 is defined more than once",
            ]
        );
        assert_eq!(errors.len(), 9);
    }
}
