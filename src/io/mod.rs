pub mod checkpoint;

pub use checkpoint::{read_checkpoint, write_checkpoint, Checkpoint};
