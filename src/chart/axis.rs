use crate::error::ChartError;

/// (ceiling, divisions) pairs in ascending ceiling order
const AXIS_STEPS: [(u32, u32); 30] = [
    (5, 1),
    (10, 2),
    (20, 4),
    (25, 5),
    (30, 6),
    (40, 4),
    (50, 5),
    (60, 6),
    (80, 4),
    (100, 5),
    (120, 6),
    (160, 4),
    (200, 5),
    (240, 6),
    (250, 5),
    (300, 6),
    (400, 4),
    (500, 5),
    (600, 6),
    (800, 4),
    (1000, 5),
    (1200, 6),
    (1600, 4),
    (2000, 5),
    (2400, 6),
    (2500, 5),
    (3000, 6),
    (4000, 4),
    (5000, 5),
    (6000, 6),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AxisSpec {
    pub(crate) ceiling: u32,
    pub(crate) divisions: u32,
}

impl AxisSpec {
    /// Label of the `index`-th gridline counted from the top
    pub(crate) fn tick_value(&self, index: u32) -> u32 {
        (self.divisions - index) * self.ceiling / self.divisions
    }
}

/// Smallest axis whose ceiling is at least `value` (in days).
pub(crate) fn select_axis(value: f64) -> Result<AxisSpec, ChartError> {
    AXIS_STEPS
        .iter()
        .find(|(ceiling, _)| f64::from(*ceiling) >= value)
        .map(|&(ceiling, divisions)| AxisSpec { ceiling, divisions })
        .ok_or(ChartError::AxisOutOfRange { value })
}
