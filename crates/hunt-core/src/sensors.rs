//! Analog sensor conversions
//!
//! Thin typed wrappers over [`AnalogInput`] channels. Readings are transient:
//! re-sampled every tick, never filtered, and consumed immediately by the
//! state machine's threshold checks.

use crate::hal::AnalogInput;

/// Rotary angle sensor (the ship's helm).
///
/// Converts a 10-bit ADC count to degrees:
/// `angle = raw * adc_ref / 1023 * full_angle / vcc`.
pub struct RotaryAngleSensor<A> {
    pin: A,
    adc_ref: f32,
    vcc: f32,
    full_angle: f32,
}

impl<A: AnalogInput> RotaryAngleSensor<A> {
    pub fn new(pin: A, adc_ref: f32, vcc: f32, full_angle: u16) -> Self {
        Self {
            pin,
            adc_ref,
            vcc,
            full_angle: f32::from(full_angle),
        }
    }

    /// Sample the pin and convert to degrees.
    pub fn read_angle(&mut self) -> f32 {
        let raw = self.pin.read_raw() as f32;
        raw * self.adc_ref / 1023.0 * self.full_angle / self.vcc
    }
}

/// Light sensor behind an external converter channel (the torch). Raw counts
/// are compared against a fixed threshold, no unit conversion.
pub struct LightSensor<A> {
    channel: A,
}

impl<A: AnalogInput> LightSensor<A> {
    pub fn new(channel: A) -> Self {
        Self { channel }
    }

    pub fn read_level(&mut self) -> i32 {
        self.channel.read_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedChannel(i32);

    impl AnalogInput for FixedChannel {
        fn read_raw(&mut self) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_angle_conversion_spans_full_range() {
        // 3.3 V reference and supply, 300 degree potentiometer.
        let mut helm = RotaryAngleSensor::new(FixedChannel(0), 3.3, 3.3, 300);
        assert_eq!(helm.read_angle(), 0.0);

        let mut helm = RotaryAngleSensor::new(FixedChannel(1023), 3.3, 3.3, 300);
        assert!((helm.read_angle() - 300.0).abs() < 0.01);

        // Mid-travel lands near half the range.
        let mut helm = RotaryAngleSensor::new(FixedChannel(512), 3.3, 3.3, 300);
        assert!((helm.read_angle() - 150.0).abs() < 0.5);
    }

    #[test]
    fn test_light_level_is_raw_counts() {
        let mut torch = LightSensor::new(FixedChannel(27350));
        assert_eq!(torch.read_level(), 27350);
    }
}
