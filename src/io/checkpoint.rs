//! Checkpoint read/write. The teacher serializes state to HDF5 through an
//! external `nicer_hdf5` helper crate; this engine has no such dependency,
//! so it leans on `serde_cbor` instead (already in the dependency table
//! for this reason) and serializes the whole bundle as one opaque blob.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::state::State;
use crate::tasks::Tasks;

/// Everything needed to resume a run: the solution state, the task
/// schedule, and the configuration that produced them (so a resumed run
/// can still be overridden from the command line the same way a fresh one
/// can).
#[derive(Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub state: State,
    pub tasks: Tasks,
    pub config: Configuration,
    pub version: String,
}

fn to_io_error(e: serde_cbor::Error) -> Error {
    Error::IO(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

pub fn write_checkpoint(path: impl AsRef<Path>, checkpoint: &Checkpoint) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_cbor::to_writer(writer, checkpoint).map_err(to_io_error)
}

pub fn read_checkpoint(path: impl AsRef<Path>) -> Result<Checkpoint> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_cbor::from_reader(reader).map_err(to_io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AnyPrimitive;
    use ndarray::Array1;

    #[test]
    fn checkpoint_roundtrips_through_cbor_bytes() {
        let primitive = AnyPrimitive::Euler1D(Array1::from_elem(8, crate::numeric::Vector([1.0, 0.0, 1.0])));
        let checkpoint = Checkpoint {
            state: State::new(3, 0.2, primitive),
            tasks: Tasks::new(100),
            config: Configuration::default(),
            version: "test".into(),
        };
        let bytes = serde_cbor::to_vec(&checkpoint).unwrap();
        let back: Checkpoint = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(back.state.iteration, 3);
        assert_eq!(back.state.total_zones, 8);
    }
}
