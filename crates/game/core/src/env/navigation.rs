/// Provides the player's jump heading while preparing for hyperspace.
///
/// Non-player pilots always jump outward from the system centre; the player
/// jumps toward whatever destination the navigation UI has selected.
pub trait NavigationOracle: Send + Sync {
    /// Heading in radians toward the selected jump point, if any.
    fn hyperspace_heading(&self) -> Option<f64>;
}

/// Navigation without a selected destination.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDestination;

impl NavigationOracle for NoDestination {
    fn hyperspace_heading(&self) -> Option<f64> {
        None
    }
}

/// Navigation locked onto a fixed heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedHeading(pub f64);

impl NavigationOracle for FixedHeading {
    fn hyperspace_heading(&self) -> Option<f64> {
        Some(self.0)
    }
}
