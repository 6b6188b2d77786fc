use std::fmt;
use std::str::FromStr;

use ndarray as nd;

use crate::sim::heat_transfer::boundary::BoundaryCategory;
use crate::sim::heat_transfer::error::DomainError;
use crate::sim::heat_transfer::grid::MIN_RESOLUTION;

/// A user-supplied wall layout: one boundary category per cell.
///
/// Text form is one line per x-index and one character per y-index, using the
/// marker table of [`BoundaryCategory::from_marker`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    cells: nd::Array2<BoundaryCategory>,
}

impl Layout {
    /// Parses a layout from text.
    ///
    /// Trailing empty lines are ignored; every other line is a row, spaces
    /// included. Rows must all have the same length and contain only known
    /// markers.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let expected = lines.first().map_or(0, |l| l.chars().count());
        let mut rows = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(DomainError::RaggedRows {
                    row,
                    expected,
                    found,
                });
            }
            let categories = line
                .chars()
                .enumerate()
                .map(|(column, marker)| {
                    BoundaryCategory::from_marker(marker).ok_or(DomainError::UnknownMarker {
                        marker,
                        row,
                        column,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(categories);
        }

        Self::from_rows(&rows)
    }

    /// Builds a layout from already-classified rows.
    pub fn from_rows(rows: &[Vec<BoundaryCategory>]) -> Result<Self, DomainError> {
        let nx = rows.len();
        let ny = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ny) {
            return Err(DomainError::RaggedRows {
                row,
                expected: ny,
                found: r.len(),
            });
        }
        if nx < MIN_RESOLUTION || ny < MIN_RESOLUTION {
            return Err(DomainError::TooSmall { nx, ny });
        }
        let cells = nd::Array2::from_shape_fn((nx, ny), |(i, j)| rows[i][j]);
        Ok(Self { cells })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn get(&self, i: usize, j: usize) -> BoundaryCategory {
        self.cells[[i, j]]
    }
}

impl FromStr for Layout {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: String = row.iter().map(|c| c.marker()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// An insulating inner wall rising from the lower edge of a [`GeometricBox`].
///
/// Occupies columns `start .. start + thickness` and rows `0 .. height`. Its
/// faces are zero-gradient walls, its cap row carries convex corners at both
/// ends and everything inside is insulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub thickness: usize,
    pub height: usize,
}

impl Partition {
    fn last(&self) -> usize {
        self.start + self.thickness - 1
    }

    fn validate(&self, nx: usize, ny: usize) -> Result<(), DomainError> {
        if self.thickness < 2 {
            return Err(DomainError::InvalidPartition(format!(
                "thickness must be at least 2, got {}",
                self.thickness
            )));
        }
        // Columns nx - 3 and nx - 1 feed the flux stencil and must stay outside.
        if self.start < 2 || self.start + self.thickness + 3 > nx {
            return Err(DomainError::InvalidPartition(format!(
                "columns {}..{} must leave free air on both sides within 0..{nx}",
                self.start,
                self.start + self.thickness
            )));
        }
        if self.height < 2 || self.height + 2 > ny {
            return Err(DomainError::InvalidPartition(format!(
                "height {} must be in 2..={}",
                self.height,
                ny.saturating_sub(2)
            )));
        }
        Ok(())
    }

    fn classify(&self, i: usize, j: usize) -> Option<BoundaryCategory> {
        let last = self.last();
        if i < self.start || i > last || j >= self.height {
            return None;
        }
        let category = if j == 0 {
            BoundaryCategory::InteriorInsulation
        } else if j == self.height - 1 {
            if i == self.start {
                BoundaryCategory::CornerUpperLeft
            } else if i == last {
                BoundaryCategory::CornerLowerLeft
            } else {
                BoundaryCategory::ZeroGradientLower
            }
        } else if i == self.start {
            BoundaryCategory::ZeroGradientRight
        } else if i == last {
            BoundaryCategory::ZeroGradientLeft
        } else {
            BoundaryCategory::InteriorInsulation
        };
        Some(category)
    }
}

impl FromStr for Partition {
    type Err = String;

    /// Parses `START,THICKNESS,HEIGHT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid partition {s:?}: {e}"))?;
        match parts.as_slice() {
            [start, thickness, height] => Ok(Self {
                start: *start,
                thickness: *thickness,
                height: *height,
            }),
            _ => Err(format!(
                "invalid partition {s:?}: expected START,THICKNESS,HEIGHT"
            )),
        }
    }
}

/// Box geometry described by index arithmetic alone.
///
/// The `i = 0` row is held hot and the `i = nx - 1` row cold, so heat flows
/// along x. The j-edges are zero-gradient walls, or wrap onto each other when
/// the box is periodic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricBox {
    nx: usize,
    ny: usize,
    periodic: bool,
    partition: Option<Partition>,
}

impl GeometricBox {
    pub fn new(nx: usize, ny: usize) -> Result<Self, DomainError> {
        if nx < MIN_RESOLUTION || ny < MIN_RESOLUTION {
            return Err(DomainError::TooSmall { nx, ny });
        }
        Ok(Self {
            nx,
            ny,
            periodic: false,
            partition: None,
        })
    }

    pub fn square(resolution: usize) -> Result<Self, DomainError> {
        Self::new(resolution, resolution)
    }

    /// Identifies the two j-edges with each other.
    pub fn periodic(mut self) -> Result<Self, DomainError> {
        if self.partition.is_some() {
            return Err(DomainError::InvalidPartition(
                "a partition cannot be combined with periodic edges".into(),
            ));
        }
        self.periodic = true;
        Ok(self)
    }

    pub fn with_partition(mut self, partition: Partition) -> Result<Self, DomainError> {
        if self.periodic {
            return Err(DomainError::InvalidPartition(
                "a partition cannot be combined with periodic edges".into(),
            ));
        }
        partition.validate(self.nx, self.ny)?;
        self.partition = Some(partition);
        Ok(self)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn classify(&self, i: usize, j: usize) -> BoundaryCategory {
        if i == 0 {
            return BoundaryCategory::FixedHot;
        }
        if i == self.nx - 1 {
            return BoundaryCategory::FixedCold;
        }
        if let Some(category) = self.partition.and_then(|p| p.classify(i, j)) {
            return category;
        }
        if j == 0 {
            if self.periodic {
                BoundaryCategory::PeriodicLower
            } else {
                BoundaryCategory::ZeroGradientLower
            }
        } else if j == self.ny - 1 {
            if self.periodic {
                BoundaryCategory::PeriodicUpper
            } else {
                BoundaryCategory::ZeroGradientUpper
            }
        } else {
            BoundaryCategory::FreeAir
        }
    }

    /// Renders the geometry as a [`Layout`], e.g. to save and hand-edit it.
    pub fn to_layout(&self) -> Layout {
        Layout {
            cells: nd::Array2::from_shape_fn((self.nx, self.ny), |(i, j)| self.classify(i, j)),
        }
    }
}

/// Shape of the domain: where each boundary condition applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    Layout(Layout),
    Geometric(GeometricBox),
}

impl Domain {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Domain::Layout(layout) => layout.shape(),
            Domain::Geometric(geometry) => geometry.shape(),
        }
    }

    /// Boundary category of cell `(i, j)`.
    ///
    /// Pure in `(i, j)`; never looks at temperatures.
    pub fn classify(&self, i: usize, j: usize) -> BoundaryCategory {
        match self {
            Domain::Layout(layout) => layout.get(i, j),
            Domain::Geometric(geometry) => geometry.classify(i, j),
        }
    }
}

impl From<Layout> for Domain {
    fn from(layout: Layout) -> Self {
        Domain::Layout(layout)
    }
}

impl From<GeometricBox> for Domain {
    fn from(geometry: GeometricBox) -> Self {
        Domain::Geometric(geometry)
    }
}
