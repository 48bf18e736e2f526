use std::collections::HashMap;

use crate::{config::PanRow, error::Error, Result};

/// Static symbol → stereo position lookup, built from keyboard rows.
///
/// Within a row of `k` symbols, symbol `i` sits at
/// `start + (end - start) * i / (k - 1)`. Lookups are case-insensitive and
/// anything not on a row is centred.
#[derive(Debug, Clone, Default)]
pub struct PanMap {
    pans: HashMap<char, f32>,
}

impl PanMap {
    /// Build the map. Rows shorter than two symbols, or with endpoints
    /// outside [-1, 1], are rejected.
    ///
    /// A symbol that appears on several rows keeps the position from the
    /// last one.
    pub fn new(rows: &[PanRow]) -> Result<Self> {
        let mut pans = HashMap::new();

        for (row_index, row) in rows.iter().enumerate() {
            let symbols: Vec<char> = row.symbols.chars().map(fold_case).collect();
            let len = symbols.len();
            if len < 2 {
                return Err(Error::PanRowTooShort { row: row_index, len });
            }
            if !in_pan_range(row.start) || !in_pan_range(row.end) {
                return Err(Error::PanOutOfRange {
                    row: row_index,
                    start: row.start,
                    end: row.end,
                });
            }

            let span = row.end - row.start;
            let last = (len - 1) as f32;
            for (i, symbol) in symbols.into_iter().enumerate() {
                let t = i as f32 / last;
                pans.insert(symbol, (row.start + span * t).clamp(-1.0, 1.0));
            }
        }

        Ok(Self { pans })
    }

    /// Pan coefficient for a symbol, 0.0 when unmapped.
    #[inline]
    pub fn pan(&self, symbol: char) -> f32 {
        self.pans.get(&fold_case(symbol)).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.pans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pans.is_empty()
    }
}

/// Lowercase a char when its lowercase form is a single char.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn in_pan_range(x: f32) -> bool {
    (-1.0..=1.0).contains(&x)
}
