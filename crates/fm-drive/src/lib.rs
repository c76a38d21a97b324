//! Motor and variable-frequency drive efficiency models.
//!
//! Both models take motor load in percent of rated power and return an
//! efficiency fraction. Each has a scalar form and a sequence form that
//! always returns one value per input load.

pub mod motor;
pub mod vfd;

pub use motor::{motor_efficiency, motor_efficiency_curve};
pub use vfd::{speed_from_load, vfd_efficiency, vfd_efficiency_curve};

/// Motor × VFD efficiency at `load_pct`, with speed derived from load when
/// not given.
pub fn drive_train_efficiency(load_pct: f64, speed: Option<f64>) -> f64 {
    motor_efficiency(load_pct) * vfd_efficiency(load_pct, speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_train_is_product() {
        let combined = drive_train_efficiency(80.0, Some(0.9));
        let expected = motor_efficiency(80.0) * vfd_efficiency(80.0, Some(0.9));
        assert_eq!(combined, expected);
        assert!(combined < motor_efficiency(80.0));
    }
}
