// adc-core/src/units.rs

use uom::si::f64::{AngularVelocity as UomAngularVelocity, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type AngularFreq = UomAngularVelocity;
pub type Time = UomTime;

#[inline]
pub fn rad_per_s(v: f64) -> AngularFreq {
    use uom::si::angular_velocity::radian_per_second;
    AngularFreq::new::<radian_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hours(t: Time) -> f64 {
    use uom::si::time::hour;
    t.get::<hour>()
}

/// Angular speed in degrees per hour, the usual unit for constituent speeds.
#[inline]
pub fn degrees_per_hour(w: AngularFreq) -> f64 {
    use uom::si::angular_velocity::degree_per_second;
    w.get::<degree_per_second>() * constants::SECONDS_PER_HOUR
}

pub mod constants {
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}
