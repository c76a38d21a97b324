// fm-core/src/units.rs

use uom::si::f64::{
    Energy as UomEnergy, Power as UomPower, Pressure as UomPressure, Time as UomTime,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Time = UomTime;
pub type VolumeRate = UomVolumeRate;

/// Datasheet pressure unit.
#[inline]
pub fn mbar(v: f64) -> Pressure {
    use uom::si::pressure::millibar;
    Pressure::new::<millibar>(v)
}

/// Datasheet flow unit.
#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_hour;
    VolumeRate::new::<cubic_meter_per_hour>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

/// Air power delivered to the gas stream, `Q * Δp`, in kW.
pub fn air_power_kw(flow_m3_per_h: f64, pressure_mbar: f64) -> f64 {
    use uom::si::power::kilowatt;
    let power: Power = m3ph(flow_m3_per_h) * mbar(pressure_mbar);
    power.get::<kilowatt>()
}

/// Energy drawn by a constant load over a number of hours, in kWh.
pub fn energy_kwh(power_kw: f64, duration_h: f64) -> f64 {
    use uom::si::energy::kilowatt_hour;
    let energy: Energy = kw(power_kw) * hours(duration_h);
    energy.get::<kilowatt_hour>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = mbar(1013.25);
        let _q = m3ph(3600.0);
        let _w = kw(1.0);
        let _t = hours(2.0);
    }

    #[test]
    fn datasheet_units_convert_to_si() {
        use uom::si::pressure::pascal;
        use uom::si::volume_rate::cubic_meter_per_second;
        assert!((mbar(59.3).get::<pascal>() - 5930.0).abs() < 1e-9);
        assert!((m3ph(3600.0).get::<cubic_meter_per_second>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn air_power_matches_hand_calculation() {
        // 1 m³/s through 1000 Pa is 1 kW
        let p = air_power_kw(3600.0, 10.0);
        assert!((p - 1.0).abs() < 1e-9);
    }

    #[test]
    fn energy_is_power_times_hours() {
        assert!((energy_kwh(250.0, 8000.0) - 2_000_000.0).abs() < 1e-6);
    }
}
