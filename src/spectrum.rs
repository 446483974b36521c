//! Spectrum model - frequency/magnitude points plus running maximum.
//!
//! The point sequence is sized and positioned by setup records and filled
//! in by data records. Point order is ascending frequency.
//!
//! # Example
//!
//! ```
//! use spectrum_link::record::{DataRecord, SetupRecord};
//! use spectrum_link::Spectrum;
//!
//! let mut spectrum = Spectrum::new();
//! spectrum.apply_setup(&SetupRecord::new(1000.0, 8.0));
//!
//! let data = DataRecord { leading: Some(0.0), magnitudes: vec![5.0, 7.0] };
//! assert_eq!(spectrum.apply_data(&data), 2);
//!
//! assert_eq!(spectrum.points()[1].magnitude, 7.0);
//! assert_eq!(spectrum.max_magnitude(), 7.0);
//! ```

use serde::Serialize;

use crate::record::{DataRecord, SetupRecord};

/// One bin of the spectrum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpectrumPoint {
    /// Bin frequency in Hz.
    pub frequency: f64,
    /// Magnitude as sent by the device.
    pub magnitude: f64,
}

impl SpectrumPoint {
    pub fn new(frequency: f64, magnitude: f64) -> Self {
        Self {
            frequency,
            magnitude,
        }
    }
}

/// Plot bounds derived from the last setup and all data so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AxisBounds {
    /// First bin frequency.
    pub frequency_min: f64,
    /// Nyquist frequency.
    pub frequency_max: f64,
    /// Largest magnitude seen.
    pub magnitude_max: f64,
}

/// Serializable copy of the spectrum for external plotters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumSnapshot {
    pub axis: AxisBounds,
    pub points: Vec<SpectrumPoint>,
}

/// Ordered spectrum points with a monotone running maximum.
#[derive(Debug, Clone, Default)]
pub struct Spectrum {
    points: Vec<SpectrumPoint>,
    /// Never decreases for the life of the spectrum.
    max_magnitude: f64,
    frequency_min: f64,
    frequency_max: f64,
}

impl Spectrum {
    /// Create an empty spectrum (no points, maximum 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the point frequencies.
    ///
    /// The sequence is resized to the number of frequencies given. Points
    /// that already existed keep their magnitude; new points start at 0.
    pub fn resize_and_retarget<I>(&mut self, frequencies: I)
    where
        I: IntoIterator<Item = f64>,
    {
        let frequencies: Vec<f64> = frequencies.into_iter().collect();
        self.points.resize(frequencies.len(), SpectrumPoint::default());

        for (point, frequency) in self.points.iter_mut().zip(frequencies) {
            point.frequency = frequency;
        }
    }

    /// Set one magnitude and fold it into the running maximum.
    ///
    /// Returns `false` (and changes nothing) if `index` is out of range.
    /// A NaN magnitude is stored but never becomes the maximum.
    pub fn set_magnitude_at(&mut self, index: usize, value: f64) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.magnitude = value;
                self.max_magnitude = self.max_magnitude.max(value);
                true
            }
            None => false,
        }
    }

    /// Resize to the setup's bins and move the frequency axis.
    ///
    /// Does not touch the running maximum.
    pub fn apply_setup(&mut self, setup: &SetupRecord) {
        self.resize_and_retarget(setup.frequencies());
        self.frequency_min = setup.resolution();
        self.frequency_max = setup.nyquist();
    }

    /// Assign magnitudes to points 0, 1, 2, ... in order.
    ///
    /// Stops at whichever runs out first; never resizes. Points past the
    /// end of a short record keep their previous magnitude. Returns the
    /// number of points assigned.
    pub fn apply_data(&mut self, data: &DataRecord) -> usize {
        let assigned = data.magnitudes.len().min(self.points.len());
        for (index, &magnitude) in data.magnitudes[..assigned].iter().enumerate() {
            self.set_magnitude_at(index, magnitude);
        }
        assigned
    }

    /// Read-only view of the points.
    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn max_magnitude(&self) -> f64 {
        self.max_magnitude
    }

    pub fn axis(&self) -> AxisBounds {
        AxisBounds {
            frequency_min: self.frequency_min,
            frequency_max: self.frequency_max,
            magnitude_max: self.max_magnitude,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn snapshot(&self) -> SpectrumSnapshot {
        SpectrumSnapshot {
            axis: self.axis(),
            points: self.points.clone(),
        }
    }
}
