use std::{env, fs::File, io::Write, path::PathBuf};

use udacs_build::{codegen, settings, BuildInputs};

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    for var in settings::ENV_VARS {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let inputs = BuildInputs::from_env().unwrap_or_else(|err| panic!("{err}"));
    if let Some(properties) = &inputs.properties {
        println!("cargo:rerun-if-changed={}", properties.display());
    }

    let board = udacs_build::resolve(&inputs).unwrap_or_else(|err| panic!("{err}"));

    let mut file = File::create(out.join("board.rs")).unwrap();
    codegen::write_board(&mut file, &board).unwrap();
    file.flush().unwrap();

    println!("cargo:rustc-env=UDACS_BOARD_REV={}", board.revision);
    println!("cargo:rerun-if-changed=build.rs");
}
