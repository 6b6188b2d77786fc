use std::fmt;

/// Temperature held by [`BoundaryCategory::FixedHot`] cells.
pub const HOT_TEMPERATURE: f64 = 1.0;
/// Temperature held by [`BoundaryCategory::FixedCold`] cells.
pub const COLD_TEMPERATURE: f64 = 0.0;
/// Value written into insulation cells.
///
/// Far outside the physical range so that a misclassified cell shows up
/// immediately in a heatmap. Never read by a correctly classified domain.
pub const INSULATION_SENTINEL: f64 = -f64::MAX;

/// Boundary condition applied at a single grid cell.
///
/// Naming follows the rule each cell obeys, not the side of the domain it
/// sits on: an `Upper` cell copies the cell below it (`j - 1`), a `Left` cell
/// copies the cell after it in x (`i + 1`), and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCategory {
    /// Held at T = 1.0.
    FixedHot,
    /// Held at T = 0.0.
    FixedCold,
    /// dT/dy = 0: T[i,j] = T[i,j-1].
    ZeroGradientUpper,
    /// dT/dy = 0: T[i,j] = T[i,j+1].
    ZeroGradientLower,
    /// dT/dx = 0: T[i,j] = T[i+1,j].
    ZeroGradientLeft,
    /// dT/dx = 0: T[i,j] = T[i-1,j].
    ZeroGradientRight,
    /// Convex corner, grad T . n = 0 with n ~ (1, 1).
    CornerUpperRight,
    /// Convex corner, grad T . n = 0 with n ~ (1, -1).
    CornerUpperLeft,
    /// Convex corner, grad T . n = 0 with n ~ (-1, 1).
    CornerLowerRight,
    /// Convex corner, grad T . n = 0 with n ~ (-1, -1).
    CornerLowerLeft,
    /// Wraps the upper j-edge onto row `j = 1`.
    PeriodicUpper,
    /// Wraps the lower j-edge onto row `j = ny - 2`.
    PeriodicLower,
    /// Solid insulation, set to [`INSULATION_SENTINEL`].
    InteriorInsulation,
    /// Relaxes under the diffusion equation.
    FreeAir,
}

/// Which sub-pass of a relaxation step updates a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    /// Free-air cells: the diffusion update.
    Relax,
    /// Fixed, zero-gradient, periodic and insulation cells.
    Edge,
    /// Convex corners, which may read edge cells.
    Corner,
}

impl BoundaryCategory {
    /// Every category, in declaration order.
    pub const ALL: [BoundaryCategory; 14] = [
        Self::FixedHot,
        Self::FixedCold,
        Self::ZeroGradientUpper,
        Self::ZeroGradientLower,
        Self::ZeroGradientLeft,
        Self::ZeroGradientRight,
        Self::CornerUpperRight,
        Self::CornerUpperLeft,
        Self::CornerLowerRight,
        Self::CornerLowerLeft,
        Self::PeriodicUpper,
        Self::PeriodicLower,
        Self::InteriorInsulation,
        Self::FreeAir,
    ];

    /// Looks up the category for a layout marker.
    ///
    /// Returns `None` for anything outside the fixed marker table.
    pub fn from_marker(marker: char) -> Option<Self> {
        let category = match marker {
            'H' => Self::FixedHot,
            'C' => Self::FixedCold,
            'U' => Self::ZeroGradientUpper,
            'L' => Self::ZeroGradientLower,
            'v' => Self::ZeroGradientLeft,
            '"' => Self::ZeroGradientRight,
            '/' => Self::CornerUpperRight,
            '6' => Self::CornerUpperLeft,
            '\\' => Self::CornerLowerRight,
            '7' => Self::CornerLowerLeft,
            'P' => Self::PeriodicUpper,
            'p' => Self::PeriodicLower,
            'I' => Self::InteriorInsulation,
            ' ' => Self::FreeAir,
            _ => return None,
        };
        Some(category)
    }

    /// The layout marker for this category (inverse of [`Self::from_marker`]).
    pub fn marker(self) -> char {
        match self {
            Self::FixedHot => 'H',
            Self::FixedCold => 'C',
            Self::ZeroGradientUpper => 'U',
            Self::ZeroGradientLower => 'L',
            Self::ZeroGradientLeft => 'v',
            Self::ZeroGradientRight => '"',
            Self::CornerUpperRight => '/',
            Self::CornerUpperLeft => '6',
            Self::CornerLowerRight => '\\',
            Self::CornerLowerLeft => '7',
            Self::PeriodicUpper => 'P',
            Self::PeriodicLower => 'p',
            Self::InteriorInsulation => 'I',
            Self::FreeAir => ' ',
        }
    }

    pub fn phase(self) -> UpdatePhase {
        match self {
            Self::FreeAir => UpdatePhase::Relax,
            Self::CornerUpperRight
            | Self::CornerUpperLeft
            | Self::CornerLowerRight
            | Self::CornerLowerLeft => UpdatePhase::Corner,
            _ => UpdatePhase::Edge,
        }
    }

    /// Relative `(di, dj)` offsets of the neighbours this category reads.
    ///
    /// Periodic categories read an absolute row and are not listed here; they
    /// are always in bounds on a grid of at least 3x3.
    pub fn neighbour_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::FixedHot
            | Self::FixedCold
            | Self::InteriorInsulation
            | Self::PeriodicUpper
            | Self::PeriodicLower => &[],
            Self::ZeroGradientUpper => &[(0, -1)],
            Self::ZeroGradientLower => &[(0, 1)],
            Self::ZeroGradientLeft => &[(1, 0)],
            Self::ZeroGradientRight => &[(-1, 0)],
            Self::CornerUpperRight => &[(-1, 0), (0, -1)],
            Self::CornerUpperLeft => &[(-1, 0), (0, 1)],
            Self::CornerLowerRight => &[(1, 0), (0, -1)],
            Self::CornerLowerLeft => &[(1, 0), (0, 1)],
            Self::FreeAir => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::FixedHot => "fixed-hot",
            Self::FixedCold => "fixed-cold",
            Self::ZeroGradientUpper => "zero-gradient-upper",
            Self::ZeroGradientLower => "zero-gradient-lower",
            Self::ZeroGradientLeft => "zero-gradient-left",
            Self::ZeroGradientRight => "zero-gradient-right",
            Self::CornerUpperRight => "convex-corner-upper-right",
            Self::CornerUpperLeft => "convex-corner-upper-left",
            Self::CornerLowerRight => "convex-corner-lower-right",
            Self::CornerLowerLeft => "convex-corner-lower-left",
            Self::PeriodicUpper => "periodic-upper",
            Self::PeriodicLower => "periodic-lower",
            Self::InteriorInsulation => "interior-insulation",
            Self::FreeAir => "free-air",
        }
    }
}

impl fmt::Display for BoundaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
