//! Preset/project state as a flat little-endian byte stream.
//!
//! Layout, in order, no length prefix and no tags:
//!
//! ```text
//! offset  type  field
//!  0      i32   bypass (1 = on, 0 = off)
//!  4      f32   resolution
//!  8      f32   lfo rate
//! 12      f32   lfo depth
//! 16      f32   wet mix
//! 20      f32   dry mix
//! ```
//!
//! Field order is the compatibility contract. Reordering or inserting fields
//! breaks every saved project and needs explicit versioning on top of this.

use std::io::{self, Read, Write};

use crate::error::StateError;
use crate::params::{CrushParams, ParamId};

pub const STATE_SIZE: usize = 4 + 4 * ParamId::ALL.len();

pub fn write_state<W: Write>(params: &CrushParams, mut writer: W) -> Result<(), StateError> {
    let bypass: i32 = if params.bypass { 1 } else { 0 };
    writer.write_all(&bypass.to_le_bytes())?;

    for id in ParamId::ALL {
        writer.write_all(&params.get(id).to_le_bytes())?;
    }
    Ok(())
}

/// Read a full state. Float fields are taken verbatim, bit for bit.
pub fn read_state<R: Read>(mut reader: R) -> Result<CrushParams, StateError> {
    let bypass = i32::from_le_bytes(read_field(&mut reader, "bypass")?);

    let mut params = CrushParams::new();
    params.bypass = bypass > 0;

    for id in ParamId::ALL {
        let value = f32::from_le_bytes(read_field(&mut reader, id.name())?);
        match id {
            ParamId::Resolution => params.resolution = value,
            ParamId::LfoRate => params.lfo_rate = value,
            ParamId::LfoDepth => params.lfo_depth = value,
            ParamId::WetMix => params.wet_mix = value,
            ParamId::DryMix => params.dry_mix = value,
        }
    }
    Ok(params)
}

pub fn to_bytes(params: &CrushParams) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(STATE_SIZE);
    // Writing into a Vec cannot fail
    let written = write_state(params, &mut bytes);
    debug_assert!(written.is_ok() && bytes.len() == STATE_SIZE);
    bytes
}

pub fn from_bytes(bytes: &[u8]) -> Result<CrushParams, StateError> {
    read_state(bytes)
}

fn read_field<R: Read>(reader: &mut R, field: &'static str) -> Result<[u8; 4], StateError> {
    let mut buf = [0u8; 4];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(buf),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            Err(StateError::Truncated { field })
        }
        Err(err) => Err(StateError::Io(err)),
    }
}
