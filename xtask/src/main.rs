//! Build script.
//!
//! Use `cargo xtask` to execute.

use anyhow::{bail, Context};
use clap::Parser;
use devx_cmd::cmd;
use std::{
    env, fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use udacs_build::{
    codegen,
    settings::{self, parse_number},
    table::FAMILIES,
    BuildInputs, Resolved,
};

/// Build uDACS board identities.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Build all boards of all supported families.
    #[arg(short, long)]
    all: bool,

    /// CAN bus identifier of the boards.
    #[arg(short, long, value_parser = parse_number::<u8>)]
    can_id: Option<u8>,

    /// Build in release mode.
    #[arg(short, long)]
    release: bool,

    /// Target triple to build for.
    #[arg(short, long)]
    target: Option<String>,

    /// Serial numbers of the boards to build.
    #[arg(required_unless_present = "all", conflicts_with = "all", value_parser = parse_number::<u16>)]
    serial_numbers: Vec<u16>,
}

fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR")).ancestors().nth(1).unwrap().to_path_buf()
}

/// Image name of a board, e.g. `udacs_e_sn5`.
fn image_name(board: &Resolved) -> String {
    format!("udacs_{}_sn{}", board.subfunction_hex.to_ascii_lowercase(), board.serial_number)
}

/// Cargo target directory of a board, so that boards do not overwrite each other.
fn board_target_dir(root: &Path, board: &Resolved) -> PathBuf {
    root.join("target").join("boards").join(image_name(board))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::builder().filter_level(log::LevelFilter::Info).parse_default_env().init();

    let serial_numbers = if args.all {
        FAMILIES.iter().flat_map(|table| table.entries.iter().map(|entry| entry.serial_number)).collect()
    } else {
        args.serial_numbers.clone()
    };
    if serial_numbers.is_empty() {
        bail!("no boards to build");
    }

    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let root = project_root();
    fs::create_dir_all(root.join("image"))?;

    // Settings from the environment are seen by the board build script as well.
    let base = BuildInputs::from_env().context("invalid build environment")?;

    let mut built = Vec::new();
    for serial_number in serial_numbers {
        // Fail before invoking cargo, with a readable message.
        let inputs = BuildInputs {
            serial_number: Some(serial_number),
            can_board_id: args.can_id.or(base.can_board_id),
            ..base.clone()
        };
        let board = udacs_build::resolve(&inputs).with_context(|| format!("cannot build board S/N {serial_number}"))?;
        log::info!("building {}", board.revision);

        let target_dir = board_target_dir(&root, &board);
        let mut build = cmd!(&cargo, "build");
        build
            .current_dir(root.join("udacs-board"))
            .env(settings::BOARD_SN, serial_number.to_string())
            .arg("--target-dir")
            .arg(&target_dir);
        if args.release {
            build.arg("--release");
        }
        if let Some(target) = &args.target {
            build.arg("--target").arg(target);
        }
        if let Some(can_id) = args.can_id {
            build.env(settings::CAN_BOARD_ID, can_id.to_string());
        }
        build.run()?;

        let constants = root.join("image").join(format!("{}.rs", image_name(&board)));
        let mut file = File::create(&constants).with_context(|| format!("cannot create {}", constants.display()))?;
        codegen::write_board(&mut file, &board)?;
        file.flush()?;

        built.push((board.revision, target_dir, constants));
    }

    println!();
    println!("Built {} board identities:", built.len());
    for (revision, target_dir, constants) in built {
        println!("  {revision}");
        println!("    artifacts: {}", target_dir.display());
        println!("    constants: {}", constants.display());
    }

    Ok(())
}
