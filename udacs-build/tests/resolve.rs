use std::io::Write;

use udacs_build::{
    resolve,
    resolve::resolve_in,
    settings::{BOARD_SN, CAN_BOARD_ID, PROPERTIES, SUBFUNCTION},
    table::{FamilyTable, FAMILIES},
    BuildInputs, Error,
};

fn serial_numbers() -> impl Iterator<Item = u16> {
    FAMILIES[0].entries.iter().map(|entry| entry.serial_number)
}

#[test]
fn all_boards_resolve_completely() {
    for serial_number in serial_numbers() {
        for can_board_id in [None, Some(1), Some(0x3f)] {
            let inputs = BuildInputs { can_board_id, ..BuildInputs::for_serial_number(serial_number) };
            let board = resolve(&inputs).unwrap();

            assert_eq!(board.serial_number, serial_number);
            assert_eq!(board.family.subfunction, 14);
            assert_eq!(board.identity.board_id, 3);
            assert!(board.identity.is_complete());
            assert!(!board.subfunction_hex.is_empty());
            assert!(board.description.contains(&format!("S/N:{serial_number}")));
            assert!(board.revision.ends_with(&board.description));
        }
    }
}

#[test]
fn focal_co2() {
    let board = resolve(&BuildInputs::for_serial_number(5)).unwrap();
    assert_eq!(board.identity.instrument_id, 10);
    assert_eq!(board.identity.instrument, "FOCAL");
    assert_eq!(board.identity.board_type, "OE uDACS");
    assert_eq!(board.identity.location, "CO2");
    assert_eq!(board.subfunction_hex, "E");
    assert_eq!(board.description, "FOCAL OE uDACS Rev B.1 V2.0 S/N:5 CO2");
    assert_eq!(board.revision, "VE:0:FOCAL OE uDACS Rev B.1 V2.0 S/N:5 CO2");
}

#[test]
fn spare_with_can_id() {
    let inputs = BuildInputs { can_board_id: Some(2), ..BuildInputs::for_serial_number(9) };
    let board = resolve(&inputs).unwrap();
    assert_eq!(board.identity.instrument, "Test");
    assert_eq!(board.identity.board_type, "Spare uDACS");
    assert_eq!(board.identity.location, "Stock");
    assert_eq!(board.description, "Test Spare uDACS Rev B.1 V2.0 S/N:9 CAN ID:2 Stock");
    assert_eq!(board.revision, "VE:0:Test Spare uDACS Rev B.1 V2.0 S/N:9 CAN ID:2 Stock");
}

#[test]
fn remaining_locations() {
    let locations: Vec<_> =
        (6..=8).map(|sn| resolve(&BuildInputs::for_serial_number(sn)).unwrap().identity.location).collect();
    assert_eq!(locations, ["Methane", "CO2 Backup", "Methane Backup"]);
}

#[test]
fn resolution_is_deterministic() {
    let inputs = BuildInputs { can_board_id: Some(7), ..BuildInputs::for_serial_number(6) };
    assert_eq!(resolve(&inputs).unwrap(), resolve(&inputs).unwrap());
}

#[test]
fn unknown_serial_numbers() {
    for serial_number in [0, 10, 100, u16::MAX] {
        let err = resolve(&BuildInputs::for_serial_number(serial_number)).unwrap_err();
        assert!(
            matches!(err, Error::UnknownSerialNumber { subfunction: 14, serial_number: sn } if sn == serial_number),
            "{err}"
        );
    }
}

#[test]
fn serial_numbers_of_other_repository() {
    let err = resolve(&BuildInputs::for_serial_number(3)).unwrap_err();
    assert_eq!(err.to_string(), "firmware for serial number 3 of subfunction 14 is maintained in another repository");
}

#[test]
fn unsupported_subfunctions() {
    for subfunction in [0, 9, 13, 15, 0xff] {
        for serial_number in serial_numbers().chain([0, 10]) {
            let inputs = BuildInputs { subfunction: Some(subfunction), ..BuildInputs::for_serial_number(serial_number) };
            assert!(matches!(resolve(&inputs), Err(Error::UnsupportedSubfunction(sf)) if sf == subfunction));
        }
    }
}

#[test]
fn missing_serial_number() {
    let err = resolve(&BuildInputs::default()).unwrap_err();
    assert!(matches!(err, Error::MissingSerialNumber));
    assert_eq!(err.to_string(), "UDACS_BOARD_SN must be defined in the build properties");
}

#[test]
fn supplied_hex_must_match() {
    let inputs = BuildInputs { subfunction_hex: Some("D".to_string()), ..BuildInputs::for_serial_number(5) };
    assert!(matches!(resolve(&inputs), Err(Error::HexMismatch { subfunction: 14, ref hex }) if hex == "D"));
}

#[test]
fn missing_location_fails_resolution() {
    static BROKEN: &[FamilyTable] = &[FamilyTable {
        family: udacs_shared::UDACS_REV_B1,
        entries: &[udacs_build::table::Entry {
            serial_number: 5,
            instrument_id: 10,
            instrument: "FOCAL",
            board_id: None,
            board_type: "OE uDACS",
            location: "",
        }],
        foreign_serial_numbers: &[],
    }];

    let err = resolve_in(BROKEN, &BuildInputs::for_serial_number(5)).unwrap_err();
    assert!(matches!(err, Error::MissingLocation(5)));
}

#[test]
fn properties_file_with_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "// Build properties of the CO2 board").unwrap();
    writeln!(file, "// UDACS-BOARD-SN: 5").unwrap();
    writeln!(file, "// UDACS-CAN-BOARD-ID: 0x0a").unwrap();
    writeln!(file, "// UDACS-SUBFUNCTION: 14").unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let lookup = |name: &str| match name {
        PROPERTIES => Some(path.clone()),
        BOARD_SN => Some("6".to_string()),
        _ => None,
    };
    let inputs = BuildInputs::from_lookup(lookup).unwrap();
    assert_eq!(inputs.serial_number, Some(6));
    assert_eq!(inputs.can_board_id, Some(10));
    assert_eq!(inputs.subfunction, Some(14));
    assert_eq!(inputs.properties.as_deref(), Some(file.path()));

    let board = resolve(&inputs).unwrap();
    assert_eq!(board.description, "FOCAL OE uDACS Rev B.1 V2.0 S/N:6 CAN ID:10 Methane");
}

#[test]
fn env_values_are_validated() {
    let lookup = |name: &str| match name {
        BOARD_SN => Some("5".to_string()),
        SUBFUNCTION => Some("0x100".to_string()),
        CAN_BOARD_ID => Some("3".to_string()),
        _ => None,
    };
    let err = BuildInputs::from_lookup(lookup).unwrap_err();
    assert_eq!(err.to_string(), "invalid value \"0x100\" for UDACS_SUBFUNCTION");
}
