//! Build inputs.
//!
//! Inputs come from environment variables and from an optional build
//! properties file. Environment variables take precedence.

use std::{
    collections::HashMap,
    env,
    fs::File,
    io::{self, BufRead, BufReader},
    num::ParseIntError,
    path::{Path, PathBuf},
};

use crate::Error;

/// Serial number of the board.
pub const BOARD_SN: &str = "UDACS_BOARD_SN";

/// CAN bus identifier of the board.
pub const CAN_BOARD_ID: &str = "UDACS_CAN_BOARD_ID";

/// Board family code.
pub const SUBFUNCTION: &str = "UDACS_SUBFUNCTION";

/// Hexadecimal representation of the board family code.
pub const SUBFUNCTION_HEX: &str = "UDACS_SUBFUNCTION_HEX";

/// Path of the build properties file.
pub const PROPERTIES: &str = "UDACS_PROPERTIES";

/// All environment variables that influence the selected identity.
pub const ENV_VARS: &[&str] = &[BOARD_SN, CAN_BOARD_ID, SUBFUNCTION, SUBFUNCTION_HEX, PROPERTIES];

/// Reads uDACS settings from comments in a build properties file.
///
/// A setting line has the form: `// UDACS-BOARD-SN: value`
///
/// Names are returned in environment variable form, i.e. `UDACS_BOARD_SN`.
pub fn read_settings(path: &Path) -> io::Result<HashMap<String, String>> {
    let file = File::open(path)?;
    parse_settings(BufReader::new(file))
}

/// Parses uDACS settings from comment lines.
pub fn parse_settings(lines: impl BufRead) -> io::Result<HashMap<String, String>> {
    let mut settings = HashMap::new();
    for line in lines.lines() {
        let line = line?;
        let line = line.trim();
        if let Some(line) = line.strip_prefix("// UDACS-") {
            if let Some((name, value)) = line.split_once(':') {
                let name = name.trim().to_ascii_uppercase().replace('-', "_");
                settings.insert(format!("UDACS_{name}"), value.trim().to_string());
            }
        }
    }

    Ok(settings)
}

/// Parses a decimal or `0x`-prefixed hexadecimal number.
pub fn parse_maybe_hex(s: &str) -> Result<u32, ParseIntError> {
    match s.to_ascii_lowercase().strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal number into the target type.
///
/// Used as command line value parser.
pub fn parse_number<T: TryFrom<u32>>(s: &str) -> Result<T, String> {
    parse_maybe_hex(s)
        .map_err(|err| err.to_string())
        .and_then(|v| T::try_from(v).map_err(|_| format!("{v} is out of range")))
}

/// Inputs supplied by the build environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildInputs {
    /// Board family code, if overridden.
    pub subfunction: Option<u8>,
    /// Hexadecimal representation of the board family code, if overridden.
    pub subfunction_hex: Option<String>,
    /// Serial number.
    pub serial_number: Option<u16>,
    /// CAN bus identifier.
    pub can_board_id: Option<u8>,
    /// Build properties file the inputs were partially read from.
    pub properties: Option<PathBuf>,
}

impl BuildInputs {
    /// Inputs for the specified serial number.
    pub fn for_serial_number(serial_number: u16) -> Self {
        Self { serial_number: Some(serial_number), ..Default::default() }
    }

    /// Reads inputs from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads inputs using the specified variable lookup.
    ///
    /// If [`PROPERTIES`] is set, the named file is read first and the
    /// variables override its settings.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let properties = lookup(PROPERTIES).filter(|path| !path.trim().is_empty()).map(PathBuf::from);

        let mut settings = match &properties {
            Some(path) => read_settings(path)
                .map_err(|source| Error::Properties { path: path.display().to_string(), source })?,
            None => HashMap::new(),
        };
        for &name in ENV_VARS {
            if let Some(value) = lookup(name) {
                settings.insert(name.to_string(), value);
            }
        }

        let mut inputs = Self::from_settings(&settings)?;
        inputs.properties = properties;
        Ok(inputs)
    }

    /// Parses inputs from settings in environment variable form.
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self, Error> {
        Ok(Self {
            subfunction: parse_setting(settings, SUBFUNCTION)?,
            subfunction_hex: settings
                .get(SUBFUNCTION_HEX)
                .map(|hex| hex.trim().to_string())
                .filter(|hex| !hex.is_empty()),
            serial_number: parse_setting(settings, BOARD_SN)?,
            can_board_id: parse_setting(settings, CAN_BOARD_ID)?,
            properties: None,
        })
    }
}

/// Parses a numeric setting. Empty values count as undefined.
fn parse_setting<T: TryFrom<u32>>(settings: &HashMap<String, String>, name: &str) -> Result<Option<T>, Error> {
    let Some(value) = settings.get(name) else { return Ok(None) };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    parse_maybe_hex(trimmed)
        .ok()
        .and_then(|v| T::try_from(v).ok())
        .map(Some)
        .ok_or_else(|| Error::InvalidValue { name: name.to_string(), value: value.clone() })
}
