//! Binary framing for `StreamHeader`, `Dim`, and the `Chunk`/`Section`
//! layout `spec.md` §6 fixes as a wire contract.
//!
//! Grounded on the stream shape in `original_source/mcticks/go/judge/save.go`
//! (header record, then one `Dim` record per sampled tick), re-expressed
//! over the length-prefixed primitives in [`crate::codec`] instead of gob.

use std::io::{Read, Write};

use mctick_core::block_store::SECTIONS_PER_CHUNK;
use mctick_core::{Chunk, Section};

use crate::codec::*;
use crate::error::JudgeError;

/// First record of a judge stream: total sampled ticks and the interval
/// between samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    /// Number of `Dim` records that follow.
    pub count: u64,
    /// Ticks between consecutive samples.
    pub sample_rate: u64,
}

/// A snapshot of a rectangular array of chunks at one sampled tick,
/// row-major over x then z.
#[derive(Clone, Debug, PartialEq)]
pub struct Dim {
    /// Chunks in row-major `(x - x1) + (z - z1) * (x2 - x1)` order.
    pub chunks: Vec<Chunk>,
}

pub(crate) fn write_header(w: &mut impl Write, header: StreamHeader) -> Result<(), JudgeError> {
    write_u64(w, header.count)?;
    write_u64(w, header.sample_rate)?;
    Ok(())
}

pub(crate) fn read_header(r: &mut impl Read) -> Result<StreamHeader, JudgeError> {
    let count = read_u64(r)?;
    let sample_rate = read_u64(r)?;
    Ok(StreamHeader { count, sample_rate })
}

fn write_section(w: &mut impl Write, section: &Section) -> Result<(), JudgeError> {
    write_i16(w, section.blockcount)?;
    write_i32_slice(w, section.blocks_state.as_ref())?;
    write_i32_slice(w, section.biomes.as_ref())?;
    write_bytes(w, section.sky_light.as_ref())?;
    write_bytes(w, section.block_light.as_ref())?;
    Ok(())
}

fn read_section(r: &mut impl Read) -> Result<Section, JudgeError> {
    let blockcount = read_i16(r)?;
    let blocks_state = read_i32_vec(r, 4096)?;
    let biomes = read_i32_vec(r, 64)?;
    let sky_light = read_bytes(r, 2048)?;
    let block_light = read_bytes(r, 2048)?;
    Ok(Section {
        blockcount,
        blocks_state: blocks_state
            .into_boxed_slice()
            .try_into()
            .unwrap_or_else(|_| unreachable!("read_i32_vec(_, 4096) always yields len 4096")),
        biomes: biomes
            .into_boxed_slice()
            .try_into()
            .unwrap_or_else(|_| unreachable!("read_i32_vec(_, 64) always yields len 64")),
        sky_light: sky_light
            .into_boxed_slice()
            .try_into()
            .unwrap_or_else(|_| unreachable!("read_bytes(_, 2048) always yields len 2048")),
        block_light: block_light
            .into_boxed_slice()
            .try_into()
            .unwrap_or_else(|_| unreachable!("read_bytes(_, 2048) always yields len 2048")),
    })
}

fn write_chunk(w: &mut impl Write, chunk: &Chunk) -> Result<(), JudgeError> {
    write_i32(w, chunk.last_update)?;
    for section in &chunk.sections {
        write_section(w, section)?;
    }
    Ok(())
}

fn read_chunk(r: &mut impl Read) -> Result<Chunk, JudgeError> {
    let last_update = read_i32(r)?;
    let mut sections = Vec::with_capacity(SECTIONS_PER_CHUNK);
    for _ in 0..SECTIONS_PER_CHUNK {
        sections.push(read_section(r)?);
    }
    Ok(Chunk {
        last_update,
        sections,
    })
}

pub(crate) fn write_dim(w: &mut impl Write, dim: &Dim) -> Result<(), JudgeError> {
    write_u32(w, dim.chunks.len() as u32)?;
    for chunk in &dim.chunks {
        write_chunk(w, chunk)?;
    }
    Ok(())
}

pub(crate) fn read_dim(r: &mut impl Read) -> Result<Dim, JudgeError> {
    let count = read_u32(r)? as usize;
    let mut chunks = Vec::with_capacity(count);
    for _ in 0..count {
        chunks.push(read_chunk(r)?);
    }
    Ok(Dim { chunks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trips() {
        let mut buf = Vec::new();
        let header = StreamHeader {
            count: 10,
            sample_rate: 5,
        };
        write_header(&mut buf, header).unwrap();
        let mut cursor = &buf[..];
        assert_eq!(read_header(&mut cursor).unwrap(), header);
    }

    #[test]
    fn dim_round_trips_with_nonempty_chunk() {
        let mut chunk = Chunk::empty();
        chunk.sections[3].set_block(100, 7);
        let dim = Dim {
            chunks: vec![Chunk::empty(), chunk],
        };
        let mut buf = Vec::new();
        write_dim(&mut buf, &dim).unwrap();
        let mut cursor = &buf[..];
        let decoded = read_dim(&mut cursor).unwrap();
        assert_eq!(decoded.chunks.len(), 2);
        assert!(decoded.chunks[0].equals_for_judge(&dim.chunks[0]));
        assert!(decoded.chunks[1].equals_for_judge(&dim.chunks[1]));
    }
}
