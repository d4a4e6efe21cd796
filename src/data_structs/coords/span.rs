use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::PosType;
use crate::error::{
    Result,
    SjError,
};

/// A pair of coordinates ordered along the direction of transcription
/// (5' to 3').
///
/// On the forward strand `start <= stop`; on the reverse strand `start >=
/// stop`. Novelty lookups compare `start` with `start` and `stop` with `stop`,
/// so the orientation must never be lost by sorting the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientedSpan {
    start: PosType,
    stop:  PosType,
}

impl OrientedSpan {
    /// Creates a span from coordinates that are already in transcriptional
    /// order.
    pub fn new(
        start: PosType,
        stop: PosType,
    ) -> Self {
        Self { start, stop }
    }

    /// Orients genomic bounds (`lo <= hi`) according to `strand`.
    pub fn from_genomic(
        lo: PosType,
        hi: PosType,
        strand: Strand,
    ) -> Result<Self> {
        if lo > hi {
            return Err(SjError::validation(format!(
                "genomic bounds out of order: {}-{}",
                lo, hi
            )));
        }
        match strand {
            Strand::Forward => Ok(Self::new(lo, hi)),
            Strand::Reverse => Ok(Self::new(hi, lo)),
            Strand::None => Err(SjError::validation(format!(
                "cannot orient {}-{} without a strand",
                lo, hi
            ))),
        }
    }

    /// 5' coordinate.
    pub fn start(&self) -> PosType {
        self.start
    }

    /// 3' coordinate.
    pub fn stop(&self) -> PosType {
        self.stop
    }

    /// `(start, stop)` in transcriptional order.
    pub fn pair(&self) -> (PosType, PosType) {
        (self.start, self.stop)
    }

    /// Bounds in ascending genomic order.
    pub fn genomic_bounds(&self) -> (PosType, PosType) {
        if self.start <= self.stop {
            (self.start, self.stop)
        }
        else {
            (self.stop, self.start)
        }
    }

    /// Checks that the orientation agrees with `strand`. Single-base spans
    /// agree with both strands.
    pub fn agrees_with(
        &self,
        strand: Strand,
    ) -> bool {
        match strand {
            Strand::Forward => self.start <= self.stop,
            Strand::Reverse => self.start >= self.stop,
            Strand::None => false,
        }
    }
}

impl Display for OrientedSpan {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}->{}", self.start, self.stop)
    }
}
