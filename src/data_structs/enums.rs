use std::convert::Infallible;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::SjError;

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Strand {
    /// Forward strand.
    Forward,
    /// Reverse strand.
    Reverse,
    /// No strand.
    None,
}

impl Strand {
    /// Returns `true` for the two transcribable strands.
    pub fn is_stranded(&self) -> bool {
        !matches!(self, Strand::None)
    }

    pub fn opposite(&self) -> Strand {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
            Strand::None => Strand::None,
        }
    }
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Ok(Strand::None),
        }
    }
}

impl From<Strand> for char {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::None => '.',
        }
    }
}

impl From<bio::bio_types::strand::Strand> for Strand {
    fn from(value: bio::bio_types::strand::Strand) -> Self {
        match value {
            bio::bio_types::strand::Strand::Forward => Strand::Forward,
            bio::bio_types::strand::Strand::Reverse => Strand::Reverse,
            bio::bio_types::strand::Strand::Unknown => Strand::None,
        }
    }
}

impl Display for Strand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Serialize for Strand {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Strand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Kind of a splice graph edge. Doubles as the `exon`/`intron` mode selector
/// of the filtering and assignment stages.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum EdgeKind {
    Exon,
    Intron,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Exon => "exon",
            EdgeKind::Intron => "intron",
        }
    }

    /// Position of the first edge of this kind inside a vertex path. Exons
    /// start at the first vertex pair, introns at the second.
    pub(crate) fn path_offset(&self) -> usize {
        match self {
            EdgeKind::Exon => 0,
            EdgeKind::Intron => 1,
        }
    }
}

impl FromStr for EdgeKind {
    type Err = SjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exon" => Ok(EdgeKind::Exon),
            "intron" => Ok(EdgeKind::Intron),
            other => Err(SjError::InvalidMode(other.to_string())),
        }
    }
}

impl Display for EdgeKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for EdgeKind {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EdgeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}
