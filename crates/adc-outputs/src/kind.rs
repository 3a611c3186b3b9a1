//! Output file types.

use std::fmt;

use crate::OutputError;

/// Which dataset of a file an output kind exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSlot {
    /// Time series: every record is meaningful.
    All,
    /// A single record at a fixed position (extrema files store the
    /// extreme value first and the time it occurred second).
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    ElevationStations,
    ElevationSurface,
    VelocitySurface,
    Maxele,
    MaximumElevationTimes,
    Minpr,
    MinimumPressureTimes,
    Maxvel,
    MaximumVelocityTimes,
    Maxwvel,
    MaximumWindVelocityTimes,
}

impl OutputKind {
    pub const ALL: [OutputKind; 11] = [
        OutputKind::ElevationStations,
        OutputKind::ElevationSurface,
        OutputKind::VelocitySurface,
        OutputKind::Maxele,
        OutputKind::MaximumElevationTimes,
        OutputKind::Minpr,
        OutputKind::MinimumPressureTimes,
        OutputKind::Maxvel,
        OutputKind::MaximumVelocityTimes,
        OutputKind::Maxwvel,
        OutputKind::MaximumWindVelocityTimes,
    ];

    /// File-type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            OutputKind::ElevationStations => "fort61",
            OutputKind::ElevationSurface => "fort63",
            OutputKind::VelocitySurface => "fort64",
            OutputKind::Maxele => "maxele",
            OutputKind::MaximumElevationTimes => "time_of_maxele",
            OutputKind::Minpr => "minpr",
            OutputKind::MinimumPressureTimes => "time_of_minpr",
            OutputKind::Maxvel => "maxvel",
            OutputKind::MaximumVelocityTimes => "time_of_maxvel",
            OutputKind::Maxwvel => "maxwvel",
            OutputKind::MaximumWindVelocityTimes => "time_of_maxwvel",
        }
    }

    /// Name of the file ADCIRC writes this output into.
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputKind::ElevationStations => "fort.61",
            OutputKind::ElevationSurface => "fort.63",
            OutputKind::VelocitySurface => "fort.64",
            OutputKind::Maxele | OutputKind::MaximumElevationTimes => "maxele.63",
            OutputKind::Minpr | OutputKind::MinimumPressureTimes => "minpr.63",
            OutputKind::Maxvel | OutputKind::MaximumVelocityTimes => "maxvel.63",
            OutputKind::Maxwvel | OutputKind::MaximumWindVelocityTimes => "maxwvel.63",
        }
    }

    pub fn slot(&self) -> DatasetSlot {
        match self {
            OutputKind::ElevationStations
            | OutputKind::ElevationSurface
            | OutputKind::VelocitySurface => DatasetSlot::All,
            OutputKind::Maxele | OutputKind::Minpr | OutputKind::Maxvel | OutputKind::Maxwvel => {
                DatasetSlot::Index(0)
            }
            OutputKind::MaximumElevationTimes
            | OutputKind::MinimumPressureTimes
            | OutputKind::MaximumVelocityTimes
            | OutputKind::MaximumWindVelocityTimes => DatasetSlot::Index(1),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputKind::ElevationStations => "Elevation time series at recording stations",
            OutputKind::ElevationSurface => "Global water surface elevation time series",
            OutputKind::VelocitySurface => "Global depth-averaged velocity time series",
            OutputKind::Maxele => "Maximum water surface elevation",
            OutputKind::MaximumElevationTimes => "Time of maximum water surface elevation",
            OutputKind::Minpr => "Minimum atmospheric pressure",
            OutputKind::MinimumPressureTimes => "Time of minimum atmospheric pressure",
            OutputKind::Maxvel => "Maximum depth-averaged velocity",
            OutputKind::MaximumVelocityTimes => "Time of maximum depth-averaged velocity",
            OutputKind::Maxwvel => "Maximum wind velocity",
            OutputKind::MaximumWindVelocityTimes => "Time of maximum wind velocity",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for OutputKind {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| OutputError::UnknownKind(s.to_string()))
    }
}
