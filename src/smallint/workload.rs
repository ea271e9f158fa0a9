//! The arrays-of-vectors case the container exists for: many records, each
//! holding a handful of integers, where the size of every record decides how
//! many fit in a cache line.

use std::fmt::Display;

use rayon::prelude::*;

use super::error::Result;
use super::vector::{Int, SmallIntVector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub records: usize,
    pub inline: usize,
    pub heap: usize,
    pub elements: usize,
    pub footprint_bytes: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "records={} inline={} heap={} elements={} footprint={}B",
            self.records, self.inline, self.heap, self.elements, self.footprint_bytes
        )
    }
}

#[derive(Debug, Default)]
pub struct RecordSet {
    records: Vec<SmallIntVector>,
}

impl RecordSet {
    /// Builds `records` vectors in parallel. Record `i` gets a length in
    /// `0..=max_len` derived from `seed` and `i`, and element `j` of it holds
    /// `i + j`.
    pub fn generate(records: usize, max_len: usize, seed: u64) -> Result<Self> {
        let records = (0..records)
            .into_par_iter()
            .map(|i| {
                let len = record_len(seed, i, max_len);
                let mut record = SmallIntVector::try_new(len)?;
                for j in 0..len {
                    record.set(j, (i + j) as Int)?;
                }
                Ok(record)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Generated {} records (max_len={})", records.len(), max_len);
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&SmallIntVector> {
        self.records.get(index)
    }

    pub fn total(&self) -> Int {
        self.records
            .par_iter()
            .map(|record| record.iter().sum::<Int>())
            .sum()
    }

    pub fn stats(&self) -> Stats {
        let inline = self.records.par_iter().filter(|r| r.is_inline()).count();
        let elements = self.records.par_iter().map(SmallIntVector::len).sum();
        Stats {
            records: self.records.len(),
            inline,
            heap: self.records.len() - inline,
            elements,
            footprint_bytes: self.records.len() * std::mem::size_of::<SmallIntVector>(),
        }
    }
}

/// splitmix64 of `seed + index`, reduced to `0..=max_len`.
fn record_len(seed: u64, index: usize, max_len: usize) -> usize {
    let mut z = seed.wrapping_add((index as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z % (max_len as u64 + 1)) as usize
}
