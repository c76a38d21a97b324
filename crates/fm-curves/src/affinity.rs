//! Fan affinity laws.
//!
//! Flow scales linearly, pressure quadratically and power cubically with the
//! shaft speed ratio. A zero base speed returns the base value unchanged.

fn speed_ratio(speed_base: f64, speed_new: f64) -> f64 {
    fm_core::safe_div(speed_new, speed_base, 1.0)
}

pub fn fan_affinity_flow(flow_base: f64, speed_base: f64, speed_new: f64) -> f64 {
    flow_base * speed_ratio(speed_base, speed_new)
}

pub fn fan_affinity_pressure(pressure_base: f64, speed_base: f64, speed_new: f64) -> f64 {
    pressure_base * speed_ratio(speed_base, speed_new).powi(2)
}

pub fn fan_affinity_power(power_base: f64, speed_base: f64, speed_new: f64) -> f64 {
    power_base * speed_ratio(speed_base, speed_new).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_speed() {
        assert_eq!(fan_affinity_flow(100.0, 750.0, 1500.0), 200.0);
        assert_eq!(fan_affinity_pressure(10.0, 750.0, 1500.0), 40.0);
        assert_eq!(fan_affinity_power(3.0, 750.0, 1500.0), 24.0);
    }

    #[test]
    fn zero_base_speed_is_identity() {
        assert_eq!(fan_affinity_flow(100.0, 0.0, 1500.0), 100.0);
        assert_eq!(fan_affinity_power(5.0, 0.0, 1500.0), 5.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn laws_are_homogeneous(q in 1.0_f64..1e6, p in 0.1_f64..500.0, w in 0.1_f64..5e3, n in 100.0_f64..3000.0) {
            prop_assert_eq!(fan_affinity_flow(q, n, 2.0 * n), 2.0 * q);
            prop_assert_eq!(fan_affinity_pressure(p, n, 2.0 * n), 4.0 * p);
            prop_assert_eq!(fan_affinity_power(w, n, 2.0 * n), 8.0 * w);
        }
    }
}
