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

//! uDACS board identity tool.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Target;
use log::LevelFilter;
use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use udacs_build::{
    codegen, resolve,
    settings::{self, parse_number},
    table::{check_tables, FAMILIES},
    BuildInputs, Resolved,
};

/// Inspects and validates uDACS board identities.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// Log level.
    #[arg(short, long, global = true, default_value_t = LevelFilter::Info)]
    level: LevelFilter,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List the boards of all supported families.
    List,
    /// Show the identity constants of a board.
    Show {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Validate the serial number tables.
    Check,
    /// Generate the board constants included by firmware.
    Generate {
        #[command(flatten)]
        board: BoardArgs,
        /// Output file. Standard output if not specified.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Board selection.
#[derive(clap::Args, Debug)]
struct BoardArgs {
    /// Serial number.
    #[arg(env = settings::BOARD_SN, value_parser = parse_number::<u16>)]
    serial_number: u16,
    /// CAN bus identifier.
    #[arg(short, long, env = settings::CAN_BOARD_ID, value_parser = parse_number::<u8>)]
    can_id: Option<u8>,
    /// Board family code.
    #[arg(short, long, value_parser = parse_number::<u8>)]
    subfunction: Option<u8>,
    /// Hexadecimal representation of the board family code.
    #[arg(long)]
    subfunction_hex: Option<String>,
}

impl BoardArgs {
    fn resolve(&self) -> Result<Resolved> {
        let inputs = BuildInputs {
            subfunction: self.subfunction,
            subfunction_hex: self.subfunction_hex.clone(),
            serial_number: Some(self.serial_number),
            can_board_id: self.can_id,
            properties: None,
        };
        resolve(&inputs).with_context(|| format!("cannot resolve board S/N {}", self.serial_number))
    }
}

fn list() {
    for table in FAMILIES {
        let family = &table.family;
        println!(
            "subfunction {} (0x{:x}) {} firmware {} build {}",
            family.subfunction, family.subfunction, family.board_rev, family.firmware_rev, family.build_num
        );
        for entry in table.entries {
            let identity = entry.identity(family);
            println!(
                "  S/N {:>3}  board id {}  instrument {:>3} {:<8} {:<12} {}",
                entry.serial_number,
                identity.board_id,
                identity.instrument_id,
                identity.instrument,
                identity.board_type,
                identity.location
            );
        }
        if !table.foreign_serial_numbers.is_empty() {
            println!("  S/N {:?} maintained in another repository", table.foreign_serial_numbers);
        }
    }
}

fn show(board: &Resolved) {
    let can_board_id = match board.can_board_id {
        Some(id) => id.to_string(),
        None => "undefined".to_string(),
    };

    println!("SUBBUS_SUBFUNCTION          {}", board.family.subfunction);
    println!("SUBBUS_SUBFUNCTION_HEX      {}", board.subfunction_hex);
    println!("SUBBUS_BOARD_ID             {}", board.identity.board_id);
    println!("SUBBUS_BOARD_SN             {}", board.serial_number);
    println!("SUBBUS_BOARD_BUILD_NUM      {}", board.family.build_num);
    println!("SUBBUS_BOARD_INSTRUMENT_ID  {}", board.identity.instrument_id);
    println!("SUBBUS_BOARD_INSTRUMENT     {}", board.identity.instrument);
    println!("SUBBUS_BOARD_BOARD_TYPE     {}", board.identity.board_type);
    println!("SUBBUS_BOARD_LOCATION       {}", board.identity.location);
    println!("SUBBUS_BOARD_BOARD_REV      {}", board.family.board_rev);
    println!("SUBBUS_BOARD_FIRMWARE_REV   {}", board.family.firmware_rev);
    println!("SUBBUS_BOARD_DESC           {}", board.description);
    println!("SUBBUS_BOARD_REV            {}", board.revision);
    println!("CAN_BOARD_ID                {can_board_id}");
    println!("HAVE_RTC                    {}", board.family.have_rtc);
}

fn check() -> Result<()> {
    let errors = check_tables(FAMILIES);
    for err in &errors {
        log::error!("{err}");
    }
    if !errors.is_empty() {
        bail!("serial number tables have {} defect(s)", errors.len());
    }

    let boards: usize = FAMILIES.iter().map(|table| table.entries.len()).sum();
    log::info!("{} families with {boards} boards are valid", FAMILIES.len());
    Ok(())
}

fn generate(board: &Resolved, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            codegen::write_board(&mut file, board)?;
            file.flush()?;
            log::info!("wrote board constants for S/N {} to {}", board.serial_number, path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            codegen::write_board(&mut stdout, board)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn perform(opts: &Opts) -> Result<()> {
    match &opts.cmd {
        Cmd::List => list(),
        Cmd::Show { board } => show(&board.resolve()?),
        Cmd::Check => check()?,
        Cmd::Generate { board, output } => generate(&board.resolve()?, output.as_ref())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    env_logger::builder().target(Target::Stderr).filter_level(opts.level).init();

    let res = perform(&opts);
    if let Err(err) = &res {
        log::error!("{err:#}");
    }
    res
}
