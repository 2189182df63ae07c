//! Classification of triangles by their directed wiring.
//!
//! Each of a triangle's three vertex pairs is linked forward, backward or
//! both ways. Reading the pairs `(v0, v1)`, `(v1, v2)`, `(v2, v0)` as digits
//! (`1` forward only, `2` backward only, `3` mutual) gives a three-digit
//! code; the 27 codes fall into seven classes:
//!
//! | class      | codes                         |
//! |------------|-------------------------------|
//! | `3cycle`   | 111 222                       |
//! | `3nocycle` | 211 121 112 122 212 221       |
//! | `4cycle`   | 311 131 113 322 232 223       |
//! | `4outward` | 123 312 231                   |
//! | `4inward`  | 321 132 213                   |
//! | `5cycle`   | 133 313 331 233 323 332       |
//! | `6cycle`   | 333                           |
//!
//! The leading number is the count of directed edges present.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, instrument, warn};

use crate::graph::edges::EdgeStore;
use crate::graph::{DirectedGraph, Stamped, current};
use crate::metrics::triangles::TriangleSurvey;

/// How one vertex pair `(x, y)` is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairLink {
    /// Only `x → y`.
    Forward,
    /// Only `y → x`.
    Backward,
    /// Both directions.
    Mutual,
}

impl PairLink {
    /// `None` if neither direction exists.
    #[must_use]
    pub fn between(edges: &EdgeStore, x: usize, y: usize) -> Option<Self> {
        match (edges.contains(x, y), edges.contains(y, x)) {
            (true, true) => Some(Self::Mutual),
            (true, false) => Some(Self::Forward),
            (false, true) => Some(Self::Backward),
            (false, false) => None,
        }
    }

    #[must_use]
    pub const fn digit(self) -> u8 {
        match self {
            Self::Forward => 1,
            Self::Backward => 2,
            Self::Mutual => 3,
        }
    }

    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::Forward),
            2 => Some(Self::Backward),
            3 => Some(Self::Mutual),
            _ => None,
        }
    }
}

/// The seven directed-triangle classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriangleTopology {
    ThreeCycle,
    ThreeNoCycle,
    FourCycle,
    FourOutward,
    FourInward,
    FiveCycle,
    SixCycle,
}

impl TriangleTopology {
    pub const ALL: [Self; 7] = [
        Self::ThreeCycle,
        Self::ThreeNoCycle,
        Self::FourCycle,
        Self::FourOutward,
        Self::FourInward,
        Self::FiveCycle,
        Self::SixCycle,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThreeCycle => "3cycle",
            Self::ThreeNoCycle => "3nocycle",
            Self::FourCycle => "4cycle",
            Self::FourOutward => "4outward",
            Self::FourInward => "4inward",
            Self::FiveCycle => "5cycle",
            Self::SixCycle => "6cycle",
        }
    }

    /// Classify the links of pairs `(v0,v1)`, `(v1,v2)`, `(v2,v0)`.
    #[must_use]
    pub const fn classify(links: [PairLink; 3]) -> Self {
        use PairLink::{Backward as B, Forward as F, Mutual as M};
        match links {
            [F, F, F] | [B, B, B] => Self::ThreeCycle,
            [B, F, F] | [F, B, F] | [F, F, B] | [F, B, B] | [B, F, B] | [B, B, F] => {
                Self::ThreeNoCycle
            }
            [M, F, F] | [F, M, F] | [F, F, M] | [M, B, B] | [B, M, B] | [B, B, M] => {
                Self::FourCycle
            }
            [F, B, M] | [M, F, B] | [B, M, F] => Self::FourOutward,
            [M, B, F] | [F, M, B] | [B, F, M] => Self::FourInward,
            [F, M, M] | [M, F, M] | [M, M, F] | [B, M, M] | [M, B, M] | [M, M, B] => {
                Self::FiveCycle
            }
            [M, M, M] => Self::SixCycle,
        }
    }

    /// Look up a three-digit code such as `[3, 3, 2]`.
    ///
    /// `None` if any digit is outside `1..=3`.
    #[must_use]
    pub const fn from_code(code: &[u8; 3]) -> Option<Self> {
        let (Some(a), Some(b), Some(c)) = (
            PairLink::from_digit(code[0]),
            PairLink::from_digit(code[1]),
            PairLink::from_digit(code[2]),
        ) else {
            return None;
        };
        Some(Self::classify([a, b, c]))
    }
}

impl fmt::Display for TriangleTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair links of triangle `[v0, v1, v2]`, or `None` if it is not one.
#[must_use]
pub fn triangle_links(edges: &EdgeStore, [v0, v1, v2]: [usize; 3]) -> Option<[PairLink; 3]> {
    Some([
        PairLink::between(edges, v0, v1)?,
        PairLink::between(edges, v1, v2)?,
        PairLink::between(edges, v2, v0)?,
    ])
}

/// Triangle count per topology class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriangleSpectrum {
    counts: [usize; 7],
}

impl TriangleSpectrum {
    #[must_use]
    pub const fn get(&self, topology: TriangleTopology) -> usize {
        self.counts[topology as usize]
    }

    /// Sum over all classes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(class, count)` in class order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (TriangleTopology, usize)> + '_ {
        TriangleTopology::ALL.into_iter().map(|t| (t, self.get(t)))
    }

    fn record(&mut self, topology: TriangleTopology) {
        self.counts[topology as usize] += 1;
    }
}

impl Serialize for TriangleSpectrum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (topology, count) in self.iter() {
            map.serialize_entry(topology.as_str(), &count)?;
        }
        map.end()
    }
}

impl DirectedGraph {
    /// Classify every triangle and tally the classes.
    ///
    /// Runs a full triangle survey first when no current triangle list
    /// exists.
    #[instrument(skip(self))]
    pub fn compile_triangle_spectrum(&mut self) -> TriangleSpectrum {
        if current(self.triangles.as_ref(), self.generation).is_none() {
            self.survey_triangles(TriangleSurvey::default());
        }

        let mut spectrum = TriangleSpectrum::default();
        for &triangle in self.triangles().unwrap_or_default() {
            match triangle_links(&self.edges, triangle) {
                Some(links) => spectrum.record(TriangleTopology::classify(links)),
                None => warn!(?triangle, "listed triangle is missing a pair"),
            }
        }

        self.metrics.spectrum = Some(Stamped::new(spectrum, self.generation));
        debug!(triangles = spectrum.total(), "triangle spectrum compiled");
        spectrum
    }

    /// Triangle spectrum, compiling it first if needed.
    pub fn triangle_spectrum(&mut self) -> TriangleSpectrum {
        if let Some(s) = current(self.metrics.spectrum.as_ref(), self.generation) {
            return *s;
        }
        self.compile_triangle_spectrum()
    }
}
