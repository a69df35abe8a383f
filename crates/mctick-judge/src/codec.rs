//! Length-prefixed little-endian primitive codec for the judge stream.
//!
//! Grounded on `murk-replay::codec`'s approach to writing replay frames:
//! small free functions over `io::Write`/`io::Read`, one per primitive,
//! rather than a derive-based serialization crate — the wire layout here
//! is a stability contract (`spec.md` §6), not a convenience format.

use std::io::{self, Read, Write};

/// Write a single byte.
pub fn write_u8(w: &mut impl Write, v: u8) -> io::Result<()> {
    w.write_all(&[v])
}

/// Read a single byte.
pub fn read_u8(r: &mut impl Read) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Write a little-endian `i16`.
pub fn write_i16(w: &mut impl Write, v: i16) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Read a little-endian `i16`.
pub fn read_i16(r: &mut impl Read) -> io::Result<i16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(i16::from_le_bytes(buf))
}

/// Write a little-endian `u32`.
pub fn write_u32(w: &mut impl Write, v: u32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Read a little-endian `u32`.
pub fn read_u32(r: &mut impl Read) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Write a little-endian `u64`.
pub fn write_u64(w: &mut impl Write, v: u64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Read a little-endian `u64`.
pub fn read_u64(r: &mut impl Read) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Write a little-endian `i32`.
pub fn write_i32(w: &mut impl Write, v: i32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Read a little-endian `i32`.
pub fn read_i32(r: &mut impl Read) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Write a slice of `i32`s in order, each little-endian.
pub fn write_i32_slice(w: &mut impl Write, values: &[i32]) -> io::Result<()> {
    for &v in values {
        write_i32(w, v)?;
    }
    Ok(())
}

/// Read exactly `len` little-endian `i32`s.
pub fn read_i32_vec(r: &mut impl Read, len: usize) -> io::Result<Vec<i32>> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(read_i32(r)?);
    }
    Ok(out)
}

/// Write a raw byte slice verbatim (fixed-length fields; no length prefix).
pub fn write_bytes(w: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    w.write_all(bytes)
}

/// Read exactly `len` raw bytes.
pub fn read_bytes(r: &mut impl Read, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_primitive() {
        let mut buf = Vec::new();
        write_u8(&mut buf, 7).unwrap();
        write_i16(&mut buf, -3).unwrap();
        write_u32(&mut buf, 42).unwrap();
        write_u64(&mut buf, u64::MAX).unwrap();
        write_i32(&mut buf, -100).unwrap();
        write_bytes(&mut buf, &[1, 2, 3]).unwrap();

        let mut cursor = &buf[..];
        assert_eq!(read_u8(&mut cursor).unwrap(), 7);
        assert_eq!(read_i16(&mut cursor).unwrap(), -3);
        assert_eq!(read_u32(&mut cursor).unwrap(), 42);
        assert_eq!(read_u64(&mut cursor).unwrap(), u64::MAX);
        assert_eq!(read_i32(&mut cursor).unwrap(), -100);
        assert_eq!(read_bytes(&mut cursor, 3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn i32_slice_round_trips() {
        let mut buf = Vec::new();
        let values = [1, -2, 3, -4];
        write_i32_slice(&mut buf, &values).unwrap();
        let mut cursor = &buf[..];
        assert_eq!(read_i32_vec(&mut cursor, 4).unwrap(), vec![1, -2, 3, -4]);
    }
}
