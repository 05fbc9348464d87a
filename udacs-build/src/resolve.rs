//! Board identity resolution.

use std::fmt::Write;

use udacs_shared::{BoardIdentity, Family};

use crate::{
    settings::BuildInputs,
    table::{family_in, FamilyTable, FAMILIES},
    Error,
};

/// Board identity resolved from build inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// Firmware family.
    pub family: Family,
    /// Serial number.
    pub serial_number: u16,
    /// CAN bus identifier.
    pub can_board_id: Option<u8>,
    /// Identity record.
    pub identity: BoardIdentity,
    /// Hexadecimal representation of the subfunction.
    pub subfunction_hex: String,
    /// Board description.
    pub description: String,
    /// Board revision string.
    pub revision: String,
}

/// Hexadecimal representation of a subfunction.
///
/// A supplied representation must consist of hex digits only and denote the
/// subfunction. Otherwise it is derived as upper-case hex digits without prefix.
pub fn subfunction_hex(subfunction: u8, supplied: Option<&str>) -> Result<String, Error> {
    match supplied {
        Some(hex) => {
            let digits = !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
            match u8::from_str_radix(hex, 16) {
                Ok(value) if digits && value == subfunction => Ok(hex.to_string()),
                _ => Err(Error::HexMismatch { subfunction, hex: hex.to_string() }),
            }
        }
        None => Ok(format!("{subfunction:X}")),
    }
}

/// Composes the board description.
///
/// For example: `FOCAL OE uDACS Rev B.1 V2.0 S/N:5 CAN ID:3 CO2`
pub fn describe(family: &Family, serial_number: u16, can_board_id: Option<u8>, identity: &BoardIdentity) -> String {
    let mut desc = format!(
        "{} {} {} {} S/N:{serial_number}",
        identity.instrument, identity.board_type, family.board_rev, family.firmware_rev
    );
    if let Some(id) = can_board_id {
        write!(desc, " CAN ID:{id}").unwrap();
    }
    write!(desc, " {}", identity.location).unwrap();
    desc
}

/// Composes the board revision string from the subfunction hex and the description.
pub fn revision(family: &Family, subfunction_hex: &str, description: &str) -> String {
    format!("V{subfunction_hex}:{}:{description}", family.secondary_version)
}

/// Resolves the board identity from the supported families.
pub fn resolve(inputs: &BuildInputs) -> Result<Resolved, Error> {
    resolve_in(FAMILIES, inputs)
}

/// Resolves the board identity from the specified families.
///
/// The subfunction defaults to the first family.
pub fn resolve_in(families: &'static [FamilyTable], inputs: &BuildInputs) -> Result<Resolved, Error> {
    let serial_number = inputs.serial_number.ok_or(Error::MissingSerialNumber)?;
    let subfunction = match (inputs.subfunction, families.first()) {
        (Some(subfunction), _) => subfunction,
        (None, Some(table)) => table.family.subfunction,
        (None, None) => return Err(Error::NoFamilies),
    };

    let table = family_in(families, subfunction)?;
    let family = table.family;
    let entry = table.entry(serial_number)?;
    entry.check()?;
    let identity = entry.identity(&family);

    let subfunction_hex = subfunction_hex(subfunction, inputs.subfunction_hex.as_deref().or(family.subfunction_hex))?;
    let description = describe(&family, serial_number, inputs.can_board_id, &identity);
    let revision = revision(&family, &subfunction_hex, &description);

    log::debug!("resolved S/N {serial_number} of subfunction {subfunction}: {revision}");

    Ok(Resolved {
        family,
        serial_number,
        can_board_id: inputs.can_board_id,
        identity,
        subfunction_hex,
        description,
        revision,
    })
}
