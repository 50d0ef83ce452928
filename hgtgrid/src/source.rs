//! Payload sources and sample decoding.
//!
//! Samples are read with positional reads only: a [`ByteSource`] keeps no
//! cursor, so any number of readers and iterators can share one tile.

use std::io;

use memmap2::Mmap;

use crate::error::{HgtError, Result};
use crate::geometry::{GridGeometry, BYTES_PER_SAMPLE};

/// Random-access byte storage holding an HGT payload.
pub trait ByteSource {
    /// Total payload length in bytes.
    fn len(&self) -> u64;

    /// Fill `buf` with the bytes starting at `offset`.
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if fewer than `buf.len()`
    /// bytes are available.
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for [u8] {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let range = usize::try_from(offset)
            .ok()
            .and_then(|start| Some(start..start.checked_add(buf.len())?))
            .filter(|range| range.end <= <[u8]>::len(self));

        match range {
            Some(range) => {
                buf.copy_from_slice(&self[range]);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "read of {} bytes at offset {} past end of {}-byte payload",
                    buf.len(),
                    offset,
                    <[u8]>::len(self)
                ),
            )),
        }
    }
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> u64 {
        ByteSource::len(self.as_slice())
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.as_slice().read_exact_at(offset, buf)
    }
}

impl ByteSource for Mmap {
    fn len(&self) -> u64 {
        ByteSource::len(&self[..])
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self[..].read_exact_at(offset, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        (**self).read_exact_at(offset, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        (**self).read_exact_at(offset, buf)
    }
}

/// Decodes big-endian `i16` samples from a source laid out by a geometry.
#[derive(Debug)]
pub struct SampleReader<'a, S: ?Sized> {
    source: &'a S,
    geometry: GridGeometry,
}

// Manual impls: derives would require `S: Clone`
impl<S: ?Sized> Clone for SampleReader<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for SampleReader<'_, S> {}

impl<'a, S: ByteSource + ?Sized> SampleReader<'a, S> {
    pub fn new(source: &'a S, geometry: GridGeometry) -> Self {
        Self { source, geometry }
    }

    fn check_run(&self, row: usize, col: usize, width: usize) -> Result<()> {
        let side = self.geometry.side();
        if row >= side || col >= side || width > side - col {
            return Err(HgtError::CellOutOfBounds { row, col, side });
        }
        Ok(())
    }

    /// Read the sample at `(row, col)`.
    ///
    /// The void sentinel is returned unchanged.
    pub fn read(&self, row: usize, col: usize) -> Result<i16> {
        self.check_run(row, col, 1)?;
        self.read_index(row * self.geometry.side() + col)
    }

    /// Read the sample at a flat index without bounds checking the grid.
    pub(crate) fn read_index(&self, index: usize) -> Result<i16> {
        let mut buf = [0u8; BYTES_PER_SAMPLE];
        self.source
            .read_exact_at((index * BYTES_PER_SAMPLE) as u64, &mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    /// Read `width` consecutive samples of `row` starting at `col`.
    pub fn read_row(&self, row: usize, col: usize, width: usize) -> Result<Vec<i16>> {
        self.check_run(row, col, width)?;

        let index = row * self.geometry.side() + col;
        let mut buf = vec![0u8; width * BYTES_PER_SAMPLE];
        self.source
            .read_exact_at((index * BYTES_PER_SAMPLE) as u64, &mut buf)?;

        Ok(buf
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
            .collect())
    }
}
