use std::fmt;

/// Highest value a wheel can produce (single-zero wheel: 0..=36).
pub const OUTCOME_MAX: u8 = 36;

/// Number of recent draws carried by every snapshot.
pub const SNAPSHOT_WIDTH: usize = 5;

/// One validated draw value in `0..=OUTCOME_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Outcome(u8);

impl Outcome {
    #[inline]
    pub fn new(value: u8) -> Option<Self> {
        (value <= OUTCOME_MAX).then_some(Self(value))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Outcome {
    type Error = i64;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u8::try_from(raw)
            .ok()
            .and_then(Outcome::new)
            .ok_or(raw)
    }
}

impl From<Outcome> for u8 {
    fn from(o: Outcome) -> u8 {
        o.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One position in a snapshot.
///
/// Provenance lives in the variant: `Drawn(0)` is a zero the source actually
/// showed, `Pad` is filler added because the read came up short.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Pad,
    /// An integer read from the source. Not range-checked.
    Drawn(i64),
    /// A label that did not parse as an integer.
    Garbled(String),
}

impl Slot {
    #[inline]
    pub fn is_pad(&self) -> bool {
        matches!(self, Slot::Pad)
    }
}

/// The most recent draws, newest first. Always exactly `SNAPSHOT_WIDTH` slots.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    slots: [Slot; SNAPSHOT_WIDTH],
}

impl Snapshot {
    /// All-pad snapshot: the source gave us nothing usable.
    pub fn degraded() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::Pad),
        }
    }

    /// Take up to `SNAPSHOT_WIDTH` slots; short reads are padded at the tail.
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Slot>,
    {
        let mut snap = Self::degraded();
        for (dst, src) in snap.slots.iter_mut().zip(slots) {
            *dst = src;
        }
        snap
    }

    /// Convenience for reads where every label parsed as an integer.
    pub fn from_values(values: &[i64]) -> Self {
        Self::from_slots(values.iter().copied().map(Slot::Drawn))
    }

    #[inline]
    pub fn lead(&self) -> &Slot {
        &self.slots[0]
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// True iff every slot is the pad sentinel.
    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.slots.iter().all(Slot::is_pad)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::degraded()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Slot::Pad => f.write_str("?")?,
                Slot::Drawn(n) => write!(f, "{n}")?,
                Slot::Garbled(s) => write!(f, "{s:?}")?,
            }
        }
        f.write_str("]")
    }
}
