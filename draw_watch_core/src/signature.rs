//draw_watch_core/signature.rs

use std::fmt;

use crate::snapshot::{Slot, Snapshot};

const SEPARATOR: char = '-';

/// Comparable key for a snapshot. Only ever compared, never parsed back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the signature of a snapshot. Total and deterministic.
///
/// Encoding per slot:
///   - `Pad`         -> `_`
///   - `Drawn(n)`    -> decimal `n`
///   - `Garbled(s)`  -> `~{len}:{s}` (length prefix keeps `s` from faking a separator)
pub fn signature(snapshot: &Snapshot) -> Signature {
    let mut out = String::with_capacity(16);
    for (i, slot) in snapshot.slots().iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        match slot {
            Slot::Pad => out.push('_'),
            Slot::Drawn(n) => out.push_str(&n.to_string()),
            Slot::Garbled(s) => {
                out.push('~');
                out.push_str(&s.len().to_string());
                out.push(':');
                out.push_str(s);
            }
        }
    }
    Signature(out)
}
