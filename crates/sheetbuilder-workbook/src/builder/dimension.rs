//! Width and height unit conversion.
//!
//! Column widths and row heights are stored in points but use different
//! conversion factors, so each dimension carries its own table.

pub const WIDTH_POINTS_PER_CM: f64 = 4.666_666_666_666_666_7;
pub const WIDTH_POINTS_PER_INCH: f64 = 12.0;
pub const HEIGHT_POINTS_PER_CM: f64 = 28.0;
pub const HEIGHT_POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub fn points_per_cm(self) -> f64 {
        match self {
            Dimension::Width => WIDTH_POINTS_PER_CM,
            Dimension::Height => HEIGHT_POINTS_PER_CM,
        }
    }

    pub fn points_per_inch(self) -> f64 {
        match self {
            Dimension::Width => WIDTH_POINTS_PER_INCH,
            Dimension::Height => HEIGHT_POINTS_PER_INCH,
        }
    }
}

/// A width or height that has been written as raw points.
///
/// Calling one of the unit methods rescales it; the modifier is consumed so a
/// conversion can only happen once. Dropping it keeps the value in points.
#[derive(Debug)]
pub struct DimensionModifier<'d> {
    target: &'d mut f64,
    value: f64,
    dimension: Dimension,
}

impl<'d> DimensionModifier<'d> {
    pub(crate) fn new(target: &'d mut f64, value: f64, dimension: Dimension) -> Self {
        *target = value;
        Self {
            target,
            value,
            dimension,
        }
    }

    pub fn cm(self) {
        *self.target = self.value * self.dimension.points_per_cm();
    }

    pub fn inch(self) {
        *self.target = self.value * self.dimension.points_per_inch();
    }

    pub fn inches(self) {
        self.inch();
    }

    pub fn points(self) {
        *self.target = self.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(dimension: Dimension, value: f64, apply: impl FnOnce(DimensionModifier<'_>)) -> f64 {
        let mut slot = 0.0;
        apply(DimensionModifier::new(&mut slot, value, dimension));
        slot
    }

    #[test]
    fn width_and_height_use_different_tables() {
        let w = convert(Dimension::Width, 1.0, |m| m.cm());
        let h = convert(Dimension::Height, 1.0, |m| m.cm());
        assert!((w - 4.666_666_666_666_667).abs() < 1e-9);
        assert_eq!(h, 28.0);
        assert_eq!(convert(Dimension::Width, 2.0, |m| m.inches()), 24.0);
        assert_eq!(convert(Dimension::Height, 2.0, |m| m.inch()), 144.0);
    }

    #[test]
    fn dropped_modifier_keeps_points() {
        assert_eq!(convert(Dimension::Height, 15.0, |m| drop(m)), 15.0);
        assert_eq!(convert(Dimension::Width, 15.0, |m| m.points()), 15.0);
    }
}
