//! Lazy traversals over a tile's grid.
//!
//! [`Values`] walks every cell and [`Samples`] walks rectangular blocks. Both
//! emit in row-major order (north to south, west to east), read on demand and
//! hold nothing but a cursor and a shared borrow of the tile. A read failure is
//! yielded once as an `Err` item, after which the iterator is exhausted.

use std::iter::FusedIterator;

use tracing::trace;

use crate::error::{HgtError, Result};
use crate::mapper::Footprint;
use crate::source::ByteSource;
use crate::tile::{HgtTile, VOID_VALUE};

/// One cell of the grid, as produced by [`Values`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellValue {
    pub row: usize,
    pub col: usize,
    /// Flat index, `row * side + col`.
    pub index: usize,
    pub footprint: Footprint,
    /// Raw sample value, [`VOID_VALUE`] included.
    pub value: i16,
}

impl CellValue {
    /// The elevation in meters, or `None` for a void sample.
    pub fn elevation(&self) -> Option<i16> {
        (self.value != VOID_VALUE).then_some(self.value)
    }
}

/// A rectangular group of cells, as produced by [`Samples`].
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Row of the top-left cell.
    pub row: usize,
    /// Column of the top-left cell.
    pub col: usize,
    /// Flat index of the top-left cell.
    pub index: usize,
    /// Actual number of columns, clipped at the eastern edge.
    pub width: usize,
    /// Actual number of rows, clipped at the southern edge.
    pub height: usize,
    pub requested_width: usize,
    pub requested_height: usize,
    /// Bounding square of all cells in the block.
    pub footprint: Footprint,
    /// `height` rows of `width` raw values each.
    pub values: Vec<Vec<i16>>,
}

impl Block {
    /// Whether the block was cut short by the grid's edge.
    pub fn is_clipped(&self) -> bool {
        self.width < self.requested_width || self.height < self.requested_height
    }

    /// Lowest and highest non-void values, or `None` if every value is void.
    pub fn elevation_range(&self) -> Option<(i16, i16)> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|&value| value != VOID_VALUE)
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}

/// Iterator over every cell of a tile, see [`HgtTile::values`].
#[derive(Debug)]
pub struct Values<'a, S: ByteSource> {
    tile: &'a HgtTile<S>,
    next: usize,
    done: bool,
}

impl<'a, S: ByteSource> Values<'a, S> {
    pub(crate) fn new(tile: &'a HgtTile<S>) -> Self {
        Self {
            tile,
            next: 0,
            done: false,
        }
    }

    /// Total number of cells the iterator visits from start to end.
    pub fn total_len(&self) -> usize {
        self.tile.geometry().len()
    }

    fn read_cell(&self, index: usize) -> Result<CellValue> {
        let side = self.tile.geometry().side();
        let (row, col) = (index / side, index % side);

        Ok(CellValue {
            row,
            col,
            index,
            footprint: self.tile.mapper().footprint(row, col)?,
            value: self.tile.reader().read_index(index)?,
        })
    }
}

impl<S: ByteSource> Iterator for Values<'_, S> {
    type Item = Result<CellValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.next >= self.total_len() {
            return None;
        }

        let cell = self.read_cell(self.next);
        self.next += 1;
        if cell.is_err() {
            self.done = true;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            self.total_len() - self.next
        };
        // A failed read ends the iteration early
        (remaining.min(1), Some(remaining))
    }
}

impl<S: ByteSource> FusedIterator for Values<'_, S> {}

/// Iterator over rectangular blocks of a tile, see [`HgtTile::samples`].
///
/// Block origins advance `width` columns at a time along a band of `height`
/// rows, then move down to the next band. Blocks on the eastern and southern
/// edges are clipped to the grid.
#[derive(Debug)]
pub struct Samples<'a, S: ByteSource> {
    tile: &'a HgtTile<S>,
    width: usize,
    height: usize,
    row: usize,
    col: usize,
    done: bool,
}

impl<'a, S: ByteSource> Samples<'a, S> {
    pub(crate) fn new(tile: &'a HgtTile<S>, width: usize, height: usize) -> Result<Self> {
        if width == 0 {
            return Err(HgtError::InvalidArgument {
                name: "width",
                value: width,
            });
        }
        if height == 0 {
            return Err(HgtError::InvalidArgument {
                name: "height",
                value: height,
            });
        }

        Ok(Self {
            tile,
            width,
            height,
            row: 0,
            col: 0,
            done: false,
        })
    }

    /// Total number of blocks the iterator visits from start to end.
    pub fn block_count(&self) -> usize {
        let side = self.tile.geometry().side();
        side.div_ceil(self.height) * side.div_ceil(self.width)
    }

    fn remaining(&self) -> usize {
        let side = self.tile.geometry().side();
        if self.done || self.row >= side {
            return 0;
        }
        // `col` is always a multiple of `width`
        (side - self.row).div_ceil(self.height) * side.div_ceil(self.width)
            - self.col / self.width
    }

    fn read_block(&self, row: usize, col: usize) -> Result<Block> {
        let side = self.tile.geometry().side();
        let width = self.width.min(side - col);
        let height = self.height.min(side - row);
        trace!(row, col, width, height, "reading block");

        let reader = self.tile.reader();
        let values = (row..row + height)
            .map(|r| reader.read_row(r, col, width))
            .collect::<Result<Vec<_>>>()?;

        Ok(Block {
            row,
            col,
            index: self.tile.mapper().index(row, col)?,
            width,
            height,
            requested_width: self.width,
            requested_height: self.height,
            footprint: self
                .tile
                .mapper()
                .block_footprint(row, col, width, height)?,
            values,
        })
    }
}

impl<S: ByteSource> Iterator for Samples<'_, S> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        let side = self.tile.geometry().side();
        if self.done || self.row >= side {
            return None;
        }

        let block = self.read_block(self.row, self.col);

        self.col = self.col.saturating_add(self.width);
        if self.col >= side {
            self.col = 0;
            self.row = self.row.saturating_add(self.height);
        }
        if block.is_err() {
            self.done = true;
        }
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining.min(1), Some(remaining))
    }
}

impl<S: ByteSource> FusedIterator for Samples<'_, S> {}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    /// Payload where every sample encodes its own position.
    fn numbered_payload(side: usize) -> Vec<u8> {
        (0..side * side)
            .flat_map(|index| ((index % 30_000) as i16).to_be_bytes())
            .collect()
    }

    /// Source that fails every read at or past `fail_at`.
    struct FailingSource {
        data: Vec<u8>,
        fail_at: u64,
    }

    impl ByteSource for FailingSource {
        fn len(&self) -> u64 {
            self.data.len() as u64
        }

        fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
            if offset + buf.len() as u64 > self.fail_at {
                return Err(io::Error::new(io::ErrorKind::Other, "disk gone"));
            }
            self.data.read_exact_at(offset, buf)
        }
    }

    #[test]
    fn test_values_row_major() {
        let side = 7;
        let tile = HgtTile::from_source("N10E020", numbered_payload(side)).unwrap();
        let values = tile.values();
        assert_eq!(values.total_len(), 49);

        let cells: Vec<_> = values.collect::<Result<_>>().unwrap();
        assert_eq!(cells.len(), side * side);
        for (expected, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index, expected);
            assert_eq!((cell.row, cell.col), (expected / side, expected % side));
            assert_eq!(cell.value, expected as i16);
            assert_eq!(
                cell.footprint,
                tile.mapper().footprint(cell.row, cell.col).unwrap()
            );
        }
    }

    #[test]
    fn test_values_srtm3_count_and_first_cell() {
        let tile = HgtTile::from_source("N00E010", vec![0u8; 1201 * 1201 * 2]).unwrap();
        let mut values = tile.values();

        let first = values.next().unwrap().unwrap();
        assert_eq!((first.row, first.col, first.index), (0, 0, 0));
        assert!((first.footprint.north_west.lat - 2401.0 / 2400.0).abs() < 1e-12);
        assert!((first.footprint.south_west.lon - 23999.0 / 2400.0).abs() < 1e-12);

        let mut last = None;
        let mut count = 1;
        for cell in values {
            let cell = cell.unwrap();
            count += 1;
            last = Some((cell.row, cell.col, cell.index));
        }
        assert_eq!(count, 1_442_401);
        assert_eq!(last, Some((1200, 1200, 1_442_400)));
    }

    #[test]
    fn test_values_size_hint() {
        let tile = HgtTile::from_source("N00E000", numbered_payload(3)).unwrap();
        let mut values = tile.values();
        assert_eq!(values.size_hint(), (1, Some(9)));
        values.nth(7);
        assert_eq!(values.size_hint(), (1, Some(1)));
        values.next();
        assert_eq!(values.size_hint(), (0, Some(0)));
        assert!(values.next().is_none());
    }

    #[test]
    fn test_samples_size_hint() {
        let tile = HgtTile::from_source("N00E000", numbered_payload(5)).unwrap();
        let mut samples = tile.samples(2, 3).unwrap();
        assert_eq!(samples.size_hint(), (1, Some(6)));

        // Mid-band, then into the second band
        samples.next();
        assert_eq!(samples.size_hint(), (1, Some(5)));
        samples.nth(2);
        assert_eq!(samples.size_hint(), (1, Some(2)));

        let rest: Vec<_> = samples.by_ref().collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(samples.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_samples_size_hint_after_error() {
        let source = FailingSource {
            data: numbered_payload(4),
            fail_at: 0,
        };
        let tile = HgtTile::from_source("N00E000", source).unwrap();
        let mut samples = tile.samples(2, 2).unwrap();
        assert_eq!(samples.size_hint(), (1, Some(4)));
        assert!(matches!(samples.next(), Some(Err(HgtError::Io(_)))));
        assert_eq!(samples.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_values_stop_after_read_error() {
        let source = FailingSource {
            data: numbered_payload(4),
            fail_at: 10,
        };
        let tile = HgtTile::from_source("N00E000", source).unwrap();
        let mut values = tile.values();

        for expected in 0..5 {
            assert_eq!(values.next().unwrap().unwrap().value, expected);
        }
        assert!(matches!(values.next(), Some(Err(HgtError::Io(_)))));
        assert!(values.next().is_none());
        assert!(values.next().is_none());
    }

    #[test]
    fn test_independent_iterators() {
        let tile = HgtTile::from_source("N00E000", numbered_payload(5)).unwrap();
        let mut a = tile.values();
        let mut b = tile.values();
        a.nth(10);
        assert_eq!(b.next().unwrap().unwrap().index, 0);
        assert_eq!(a.next().unwrap().unwrap().index, 11);
    }

    #[test]
    fn test_samples_rejects_empty_blocks() {
        let tile = HgtTile::from_source("N00E000", numbered_payload(3)).unwrap();
        assert!(matches!(
            tile.samples(0, 2),
            Err(HgtError::InvalidArgument { name: "width", value: 0 })
        ));
        assert!(matches!(
            tile.samples(2, 0),
            Err(HgtError::InvalidArgument { name: "height", value: 0 })
        ));
    }

    #[test]
    fn test_samples_small_grid() {
        let side = 5;
        let tile = HgtTile::from_source("N00E000", numbered_payload(side)).unwrap();
        let samples = tile.samples(2, 3).unwrap();
        assert_eq!(samples.block_count(), 6);

        let blocks: Vec<_> = samples.collect::<Result<_>>().unwrap();
        let origins: Vec<_> = blocks.iter().map(|b| (b.row, b.col)).collect();
        assert_eq!(origins, [(0, 0), (0, 2), (0, 4), (3, 0), (3, 2), (3, 4)]);

        let sizes: Vec<_> = blocks.iter().map(|b| (b.width, b.height)).collect();
        assert_eq!(sizes, [(2, 3), (2, 3), (1, 3), (2, 2), (2, 2), (1, 2)]);

        let block = &blocks[4];
        assert_eq!(block.index, 17);
        assert_eq!(block.values, vec![vec![17, 18], vec![22, 23]]);
        assert!(block.is_clipped());
        assert!(!blocks[0].is_clipped());
        assert_eq!(
            block.footprint,
            tile.mapper().block_footprint(3, 2, 2, 2).unwrap()
        );
    }

    #[test]
    fn test_samples_srtm3_clipping() {
        let tile = HgtTile::from_source("N00E010", numbered_payload(1201)).unwrap();
        let samples = tile.samples(50, 50).unwrap();
        assert_eq!(samples.block_count(), 625);

        let blocks: Vec<_> = samples.collect::<Result<_>>().unwrap();
        assert_eq!(blocks.len(), 625);

        let first = &blocks[0];
        assert_eq!((first.row, first.col, first.index), (0, 0, 0));
        assert_eq!(first.values.iter().flatten().count(), 2500);
        assert!((first.footprint.south_west.lat - 0.95875).abs() < 1e-12);
        assert!((first.footprint.north_east.lon - 10.04125).abs() < 1e-12);

        let east = &blocks[24];
        assert_eq!((east.row, east.col, east.index), (0, 1200, 1200));
        assert_eq!((east.width, east.height), (1, 50));
        assert_eq!(east.values.iter().flatten().count(), 50);

        let second_band = &blocks[25];
        assert_eq!((second_band.row, second_band.col), (50, 0));
        assert_eq!(second_band.index, 60_050);

        let south = &blocks[600];
        assert_eq!((south.row, south.col), (1200, 0));
        assert_eq!((south.width, south.height), (50, 1));
        assert_eq!(south.values.len(), 1);

        let corner = &blocks[624];
        assert_eq!((corner.width, corner.height), (1, 1));
        assert_eq!(corner.values, vec![vec![(1_442_400 % 30_000) as i16]]);
    }

    #[test]
    fn test_samples_single_block_covers_grid() {
        let tile = HgtTile::from_source("N00E000", numbered_payload(4)).unwrap();
        let blocks: Vec<_> = tile.samples(10, 10).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!((blocks[0].width, blocks[0].height), (4, 4));
        assert_eq!(blocks[0].footprint, tile.mapper().bounds());
    }

    #[test]
    fn test_samples_stop_after_read_error() {
        let source = FailingSource {
            data: numbered_payload(4),
            // Fails from the fourth row on
            fail_at: 20,
        };
        let tile = HgtTile::from_source("N00E000", source).unwrap();
        let mut samples = tile.samples(2, 2).unwrap();

        let first = samples.next().unwrap().unwrap();
        assert_eq!(first.values, vec![vec![0, 1], vec![4, 5]]);
        assert!(samples.next().unwrap().is_ok());
        assert!(matches!(samples.next(), Some(Err(HgtError::Io(_)))));
        assert!(samples.next().is_none());
    }

    #[test]
    fn test_elevation_range_skips_void() {
        let mut payload = numbered_payload(2);
        payload[0..2].copy_from_slice(&VOID_VALUE.to_be_bytes());
        let tile = HgtTile::from_source("N00E000", payload).unwrap();
        let block = tile.samples(2, 2).unwrap().next().unwrap().unwrap();
        assert_eq!(block.elevation_range(), Some((1, 3)));

        let void = HgtTile::from_source("N00E000", VOID_VALUE.to_be_bytes().repeat(4)).unwrap();
        let block = void.samples(2, 2).unwrap().next().unwrap().unwrap();
        assert_eq!(block.elevation_range(), None);
    }
}
