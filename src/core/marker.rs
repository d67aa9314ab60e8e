//! Markers - the four tokens moved around the circle
//!
//! Sun, Moon, and the two lunar nodes each occupy one hole at a time.
//! Movement is modular: anticlockwise increases the position, clockwise
//! decreases it, always re-normalized into `[0, num_holes)`.

use serde::{Deserialize, Serialize};

use crate::core::circle::opposite;
use crate::core::error::{AubreyError, Result};

/// Which of the four markers a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerName {
    Sun,
    Moon,
    AscendingNode,
    DescendingNode,
}

impl MarkerName {
    /// Conventional short label (S, M, N, N')
    pub fn label(&self) -> &'static str {
        match self {
            MarkerName::Sun => "S",
            MarkerName::Moon => "M",
            MarkerName::AscendingNode => "N",
            MarkerName::DescendingNode => "N'",
        }
    }
}

/// Direction of travel around the circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing position (the direction of increasing ecliptic longitude)
    Anticlockwise,
    /// Decreasing position
    Clockwise,
}

/// A named token occupying one hole on the circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    name: MarkerName,
    position: u16,
}

impl Marker {
    /// Create a marker at `position`
    ///
    /// Fails with `OutOfRange` if the position is not in `[0, num_holes)`.
    pub fn new(name: MarkerName, position: u16, num_holes: u16) -> Result<Self> {
        if position >= num_holes {
            return Err(AubreyError::OutOfRange {
                position,
                num_holes,
            });
        }
        Ok(Self { name, position })
    }

    pub fn name(&self) -> MarkerName {
        self.name
    }

    pub fn position(&self) -> u16 {
        self.position
    }

    /// Move `steps` holes in `direction`, wrapping around the circle
    ///
    /// Clockwise movement adds `num_holes` before reducing so the arithmetic
    /// never goes negative. `steps >= num_holes` reduces to
    /// `steps % num_holes`.
    pub fn shift(&mut self, steps: u16, num_holes: u16, direction: Direction) {
        let steps = steps % num_holes;
        self.position = match direction {
            Direction::Anticlockwise => (self.position + steps) % num_holes,
            Direction::Clockwise => (self.position + num_holes - steps) % num_holes,
        };
    }

    /// Force the marker onto `position`, wrapping into range
    pub(crate) fn snap_to(&mut self, position: u16, num_holes: u16) {
        self.position = position % num_holes;
    }
}

/// The four markers of the Hoyle model as one value
///
/// Cheap to copy, which is how prediction builds its independent forks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub sun: Marker,
    pub moon: Marker,
    pub ascending_node: Marker,
    pub descending_node: Marker,
}

impl MarkerSet {
    /// The canonical Hoyle starting layout: Moon and ascending node at hole
    /// 0, Sun and descending node opposite them
    pub fn canonical(num_holes: u16) -> Self {
        let half = opposite(0, num_holes);
        Self {
            sun: Marker {
                name: MarkerName::Sun,
                position: half,
            },
            moon: Marker {
                name: MarkerName::Moon,
                position: 0,
            },
            ascending_node: Marker {
                name: MarkerName::AscendingNode,
                position: 0,
            },
            descending_node: Marker {
                name: MarkerName::DescendingNode,
                position: half,
            },
        }
    }

    /// Build a set from explicit positions, deriving the descending node
    /// from its opposition to the ascending node
    pub fn from_positions(sun: u16, moon: u16, node: u16, num_holes: u16) -> Result<Self> {
        Ok(Self {
            sun: Marker::new(MarkerName::Sun, sun, num_holes)?,
            moon: Marker::new(MarkerName::Moon, moon, num_holes)?,
            ascending_node: Marker::new(MarkerName::AscendingNode, node, num_holes)?,
            descending_node: Marker::new(
                MarkerName::DescendingNode,
                opposite(node, num_holes),
                num_holes,
            )?,
        })
    }

    pub fn get(&self, name: MarkerName) -> &Marker {
        match name {
            MarkerName::Sun => &self.sun,
            MarkerName::Moon => &self.moon,
            MarkerName::AscendingNode => &self.ascending_node,
            MarkerName::DescendingNode => &self.descending_node,
        }
    }

    pub fn get_mut(&mut self, name: MarkerName) -> &mut Marker {
        match name {
            MarkerName::Sun => &mut self.sun,
            MarkerName::Moon => &mut self.moon,
            MarkerName::AscendingNode => &mut self.ascending_node,
            MarkerName::DescendingNode => &mut self.descending_node,
        }
    }

    /// Snapshot of the four positions
    pub fn positions(&self) -> MarkerPositions {
        MarkerPositions {
            sun: self.sun.position,
            moon: self.moon.position,
            ascending_node: self.ascending_node.position,
            descending_node: self.descending_node.position,
        }
    }
}

/// Read-only snapshot of the four marker positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPositions {
    pub sun: u16,
    pub moon: u16,
    pub ascending_node: u16,
    pub descending_node: u16,
}

impl MarkerPositions {
    pub fn get(&self, name: MarkerName) -> u16 {
        match name {
            MarkerName::Sun => self.sun,
            MarkerName::Moon => self.moon,
            MarkerName::AscendingNode => self.ascending_node,
            MarkerName::DescendingNode => self.descending_node,
        }
    }
}
