//! Object temperature computation.
//!
//! Follows the TMP006 user guide (SBOU107, section 5.1) and the
//! register scaling of the datasheet (SBOS518, section 8.3.6).
use fixed::types::I11F5;

/// 0 °C expressed in Kelvin.
pub const CELSIUS_OFFSET: f64 = 273.15;

/// Value reported in place of a temperature when a read fails.
///
/// This is not a plausible reading and must be treated as "read failed".
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -CELSIUS_OFFSET;

/// Example thermopile sensitivity S0 from the user guide.
///
/// Each part should be calibrated against a black body to obtain its own
/// value. This one is only a rough approximation.
pub const DEFAULT_SENSITIVITY: f64 = 6.4e-14;

const T_REF: f64 = CELSIUS_OFFSET + 25.0;
const A1: f64 = 1.75e-3;
const A2: f64 = -1.678e-5;
const B0: f64 = -2.94e-5;
const B1: f64 = -5.7e-7;
const B2: f64 = 4.63e-9;
const C2: f64 = 13.4;

/// Sensor voltage resolution, V/LSB.
const VOLTAGE_LSB: f64 = 156.25e-9;

/// Die temperature in °C, 1/32 °C resolution.
pub type DieTemperature = I11F5;

/// One pair of raw readings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Raw content of the sensor voltage register.
    pub object_voltage_raw: i16,
    /// Raw content of the die temperature register, flag bits included.
    pub die_temperature_raw: i16,
}

impl Sample {
    /// Creates a sample from raw register contents.
    pub const fn new(object_voltage_raw: i16, die_temperature_raw: i16) -> Self {
        Self {
            object_voltage_raw,
            die_temperature_raw,
        }
    }

    /// Thermopile voltage in volts.
    pub fn object_voltage(&self) -> f64 {
        self.object_voltage_raw as f64 * VOLTAGE_LSB
    }

    /// Die temperature in °C.
    ///
    /// The two least significant bits of the register are not part of the
    /// result and are shifted out.
    pub fn die_temperature(&self) -> DieTemperature {
        DieTemperature::from_bits(self.die_temperature_raw >> 2)
    }

    /// Die temperature in Kelvin.
    pub fn die_temperature_kelvin(&self) -> f64 {
        self.die_temperature().to_num::<f64>() + CELSIUS_OFFSET
    }

    /// Object temperature in °C for the given sensitivity S0.
    ///
    /// NaN when a strongly negative sensor voltage drives `Tdie⁴ + f(Vobj)/S`
    /// below zero (at a 25 °C die and the default S0, raw values of about
    /// -3450 and lower). Such a result is not a temperature.
    pub fn object_temperature(&self, s0: f64) -> f64 {
        object_temperature_kelvin(self.object_voltage(), self.die_temperature_kelvin(), s0)
            - CELSIUS_OFFSET
    }
}

/// Object temperature in Kelvin from the thermopile voltage `v_obj` (V) and
/// the die temperature `t_die` (K).
pub fn object_temperature_kelvin(v_obj: f64, t_die: f64, s0: f64) -> f64 {
    let t = t_die - T_REF;
    let s = s0 * (1.0 + t * (A1 + t * A2));
    let v_os = B0 + t * (B1 + t * B2);
    let d = v_obj - v_os;
    let f_v_obj = d * (1.0 + d * C2);
    libm::pow(libm::pow(t_die, 4.0) + f_v_obj / s, 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIE_25C: i16 = 0x0c80;

    #[test]
    fn die_temperature_scaling() {
        let celsius_25 = DieTemperature::from_num(25);
        assert_eq!(Sample::new(0, DIE_25C).die_temperature(), celsius_25);
        assert_eq!(Sample::new(0, DIE_25C).die_temperature_kelvin(), T_REF);
        // flag bits are ignored
        assert_eq!(Sample::new(0, DIE_25C | 0b11).die_temperature(), celsius_25);
        // -25 °C, two's complement
        assert_eq!(
            Sample::new(0, -3200).die_temperature(),
            DieTemperature::from_num(-25)
        );
        assert_eq!(Sample::new(0, 0x0004).die_temperature().to_num::<f64>(), 0.03125);
    }

    #[test]
    fn object_voltage_scaling() {
        assert_eq!(Sample::new(1, 0).object_voltage(), 156.25e-9);
        assert!((Sample::new(-64, 0).object_voltage() + 10e-6).abs() < 1e-15);
    }

    #[test]
    fn zero_correction_returns_die_temperature() {
        // v_obj equal to the offset voltage cancels the thermopile term
        let t = object_temperature_kelvin(B0, T_REF, DEFAULT_SENSITIVITY);
        assert!((t - T_REF).abs() < 1e-9);
    }

    #[test]
    fn reference_point() {
        let temp = Sample::new(0, DIE_25C).object_temperature(DEFAULT_SENSITIVITY);
        assert!((temp - 29.243395820133173).abs() < 1e-9, "{temp}");
        let temp = Sample::new(256, DIE_25C).object_temperature(DEFAULT_SENSITIVITY);
        assert!((temp - 34.74937518211448).abs() < 1e-9, "{temp}");
        let temp = Sample::new(-100, DIE_25C).object_temperature(DEFAULT_SENSITIVITY);
        assert!((temp - 27.01019264405602).abs() < 1e-9, "{temp}");
    }

    #[test]
    fn deterministic() {
        let sample = Sample::new(-1234, 0x0d04);
        let first = sample.object_temperature(DEFAULT_SENSITIVITY);
        for _ in 0..16 {
            assert_eq!(sample.object_temperature(DEFAULT_SENSITIVITY).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn hotter_object_reads_higher() {
        let mut last = f64::MIN;
        for raw in (-2000..=2000).step_by(50) {
            let temp = Sample::new(raw, DIE_25C).object_temperature(DEFAULT_SENSITIVITY);
            assert!(temp > last, "{raw}: {temp} <= {last}");
            last = temp;
        }
    }

    #[test]
    fn sensitivity_scales_correction() {
        let sample = Sample::new(500, DIE_25C);
        let default = sample.object_temperature(DEFAULT_SENSITIVITY);
        let calibrated = sample.object_temperature(2.0 * DEFAULT_SENSITIVITY);
        assert!(calibrated < default);
        assert!(calibrated > 25.0);
    }

    #[test]
    fn out_of_domain_voltage_is_nan() {
        let temp = |raw| Sample::new(raw, DIE_25C).object_temperature(DEFAULT_SENSITIVITY);
        assert!(temp(-3500).is_nan());
        assert!(temp(i16::MIN).is_nan());
        assert!(!temp(-3400).is_nan());
    }
}
