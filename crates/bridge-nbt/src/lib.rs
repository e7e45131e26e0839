//! Little-endian NBT (Named Binary Tag) reader/writer.
//!
//! This is the wire format used for the pre-serialized tag blobs embedded
//! in creative-item entries: ints are i32_le, string lengths are u16_le.

mod io;
mod le;
pub mod error;
pub mod tag;

pub use error::NbtError;
pub use tag::{NbtCompound, NbtRoot, NbtTag};

use bytes::{Buf, BufMut};

/// Read little-endian NBT from a buffer.
pub fn read_nbt_le(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt::<le::LeVariant>(buf)
}

/// Write little-endian NBT to a buffer.
pub fn write_nbt_le(buf: &mut impl BufMut, root: &NbtRoot) {
    io::write_nbt::<le::LeVariant>(buf, root)
}
