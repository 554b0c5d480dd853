//! Sine profile configuration.

use crate::float_types::{MM, Real};

/// Which frame axis the waves run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Waves advance along the longest boundary edge.
    #[default]
    U,
    /// Waves advance across it.
    V,
}

impl Axis {
    pub const fn flipped(self) -> Self {
        match self {
            Axis::U => Axis::V,
            Axis::V => Axis::U,
        }
    }
}

/// Parameters of a corrugated panel.
///
/// `segments_per_period` is kept at three or more; every other field is
/// taken as given and sanitized where it is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub direction: Axis,
    /// Peak height of the wave, signed.
    pub amplitude: Real,
    /// Length of one full wave.
    pub pitch: Real,
    segments_per_period: usize,
    /// Sheet thickness. Carried for downstream use, the generated surface has none.
    pub thickness: Option<Real>,
}

impl Parameters {
    pub const DEFAULT_AMPLITUDE: Real = 50.0 * MM;
    pub const DEFAULT_PITCH: Real = 200.0 * MM;
    pub const DEFAULT_SEGMENTS: usize = 16;
    pub const MIN_SEGMENTS: usize = 3;

    pub fn new(
        direction: Axis,
        amplitude: Real,
        pitch: Real,
        segments_per_period: usize,
        thickness: Option<Real>,
    ) -> Self {
        Parameters {
            direction,
            amplitude,
            pitch,
            segments_per_period: segments_per_period.max(Self::MIN_SEGMENTS),
            thickness,
        }
    }

    pub const fn segments_per_period(&self) -> usize {
        self.segments_per_period
    }

    pub fn set_segments_per_period(&mut self, segments: usize) {
        self.segments_per_period = segments.max(Self::MIN_SEGMENTS);
    }

    /// Toggle between [`Axis::U`] and [`Axis::V`].
    pub fn flip_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    pub fn with_direction(mut self, direction: Axis) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_amplitude(mut self, amplitude: Real) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_pitch(mut self, pitch: Real) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_segments_per_period(mut self, segments: usize) -> Self {
        self.set_segments_per_period(segments);
        self
    }

    pub fn with_thickness(mut self, thickness: Option<Real>) -> Self {
        self.thickness = thickness;
        self
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters::new(
            Axis::U,
            Self::DEFAULT_AMPLITUDE,
            Self::DEFAULT_PITCH,
            Self::DEFAULT_SEGMENTS,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = Parameters::default();
        assert_eq!(params.direction, Axis::U);
        assert_eq!(params.amplitude, 50.0);
        assert_eq!(params.pitch, 200.0);
        assert_eq!(params.segments_per_period(), 16);
        assert_eq!(params.thickness, None);
    }

    #[test]
    fn segments_never_drop_below_three() {
        let mut params = Parameters::new(Axis::V, 1.0, 1.0, 0, None);
        assert_eq!(params.segments_per_period(), 3);
        params.set_segments_per_period(2);
        assert_eq!(params.segments_per_period(), 3);
        params.set_segments_per_period(40);
        assert_eq!(params.segments_per_period(), 40);
        assert_eq!(Parameters::default().with_segments_per_period(1).segments_per_period(), 3);
    }

    #[test]
    fn flip_toggles_axis() {
        let mut params = Parameters::default();
        params.flip_direction();
        assert_eq!(params.direction, Axis::V);
        params.flip_direction();
        assert_eq!(params.direction, Axis::U);
    }
}
