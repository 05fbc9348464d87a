//! uDACS build tools.
//!
//! Selects the identity of a uDACS board at build time. A build script
//! reads the [`BuildInputs`], [`resolve`]s them against the serial number
//! tables and writes the resulting constants with [`codegen::write_board`].
//! Any error must fail the build.

pub mod codegen;
mod error;
pub mod resolve;
pub mod settings;
pub mod table;

pub use error::Error;
pub use resolve::{resolve, Resolved};
pub use settings::BuildInputs;
