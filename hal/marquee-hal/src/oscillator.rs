//! Internal oscillator abstraction
//!
//! Crystal-less parts run the USB bit timing from an RC oscillator whose
//! frequency is adjusted through a trim register. The only reference
//! available is the host's 1 ms USB frame, so the transport layer measures
//! how many CPU ticks (in its own units) one frame takes.

/// Trim register width is one byte on every supported part
pub type Trim = u8;

/// Tunable internal oscillator
pub trait Oscillator {
    /// Write a new value into the trim register
    fn set_trim(&mut self, trim: Trim);

    /// Current trim register value
    fn trim(&self) -> Trim;

    /// Measure the length of one USB frame at the current trim
    ///
    /// The unit is defined by the transport layer; calibration only
    /// compares it against a target in the same unit.
    fn measure_frame_length(&mut self) -> u16;
}

impl<O: Oscillator + ?Sized> Oscillator for &mut O {
    fn set_trim(&mut self, trim: Trim) {
        (**self).set_trim(trim);
    }

    fn trim(&self) -> Trim {
        (**self).trim()
    }

    fn measure_frame_length(&mut self) -> u16 {
        (**self).measure_frame_length()
    }
}

/// Oscillator for crystal-clocked parts
///
/// Has no trim register and measures nothing. Paired with calibration
/// disabled, so it is never asked to measure.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoOscillator;

impl Oscillator for NoOscillator {
    fn set_trim(&mut self, _trim: Trim) {}

    fn trim(&self) -> Trim {
        0
    }

    fn measure_frame_length(&mut self) -> u16 {
        0
    }
}
