//! Generation of board constants for inclusion by firmware.

use std::io::{Result, Write};

use crate::Resolved;

/// Writes Rust source defining `BOARD`, the [`udacs_shared::BoardInfo`] of the resolved board.
pub fn write_board(out: &mut impl Write, board: &Resolved) -> Result<()> {
    let Resolved { family, serial_number, can_board_id, identity, subfunction_hex, description, revision } = board;

    writeln!(out, "// Board identity for S/N {serial_number}, generated by udacs-build.")?;
    writeln!(out)?;
    writeln!(out, "/// Board identity of this firmware image.")?;
    writeln!(out, "pub const BOARD: ::udacs_shared::BoardInfo = ::udacs_shared::BoardInfo {{")?;
    writeln!(out, "    family: ::udacs_shared::Family {{")?;
    writeln!(out, "        subfunction: {},", family.subfunction)?;
    writeln!(out, "        subfunction_hex: {:?},", family.subfunction_hex)?;
    writeln!(out, "        board_id: {},", family.board_id)?;
    writeln!(out, "        board_rev: {:?},", family.board_rev)?;
    writeln!(out, "        firmware_rev: {:?},", family.firmware_rev)?;
    writeln!(out, "        build_num: {},", family.build_num)?;
    writeln!(out, "        secondary_version: {},", family.secondary_version)?;
    writeln!(out, "        have_rtc: {},", family.have_rtc)?;
    writeln!(out, "    }},")?;
    writeln!(out, "    serial_number: {serial_number},")?;
    writeln!(out, "    can_board_id: {can_board_id:?},")?;
    writeln!(out, "    identity: ::udacs_shared::BoardIdentity {{")?;
    writeln!(out, "        instrument_id: {},", identity.instrument_id)?;
    writeln!(out, "        instrument: {:?},", identity.instrument)?;
    writeln!(out, "        board_id: {},", identity.board_id)?;
    writeln!(out, "        board_type: {:?},", identity.board_type)?;
    writeln!(out, "        location: {:?},", identity.location)?;
    writeln!(out, "    }},")?;
    writeln!(out, "    subfunction_hex: {subfunction_hex:?},")?;
    writeln!(out, "    description: {description:?},")?;
    writeln!(out, "    revision: {revision:?},")?;
    writeln!(out, "}};")?;

    Ok(())
}
