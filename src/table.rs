//! The table-store collaborator and the keys it is queried with.
//!
//! Storage is external; the engine only needs a [`TableStore`] that can
//! answer exact-key lookups. Every key passed in is a tabulated value taken
//! from a column the same store returned, never an interpolated one.

use core::fmt;

use crate::error::Result;

/// Braking event, in the order the schedule is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrakingEvent {
    MaxManual = 0,
    AutobrakeMax = 1,
    Autobrake3 = 2,
    Autobrake2 = 3,
    Autobrake1 = 4,
}

impl BrakingEvent {
    pub const ALL: [BrakingEvent; 5] = [
        BrakingEvent::MaxManual,
        BrakingEvent::AutobrakeMax,
        BrakingEvent::Autobrake3,
        BrakingEvent::Autobrake2,
        BrakingEvent::Autobrake1,
    ];

    /// Key used by the adjusted-energy table.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            BrakingEvent::MaxManual => "MAX MANUAL",
            BrakingEvent::AutobrakeMax => "AUTOBRAKE MAX",
            BrakingEvent::Autobrake3 => "AUTOBRAKE 3",
            BrakingEvent::Autobrake2 => "AUTOBRAKE 2",
            BrakingEvent::Autobrake1 => "AUTOBRAKE 1",
        }
    }
}

/// Reverse thrust setting during the landing roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReverseThrust {
    Idle,
    SecondDetent,
}

impl ReverseThrust {
    pub const ALL: [ReverseThrust; 2] = [ReverseThrust::Idle, ReverseThrust::SecondDetent];

    /// Whether reverse thrust beyond idle was used.
    #[inline]
    pub const fn is_used(self) -> bool {
        matches!(self, ReverseThrust::SecondDetent)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReverseThrust::Idle => "IDLE",
            ReverseThrust::SecondDetent => "SECOND DETENT",
        }
    }
}

/// Brake heat-sink material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrakeCategory {
    Steel = 0,
    Carbon = 1,
}

impl BrakeCategory {
    pub const ALL: [BrakeCategory; 2] = [BrakeCategory::Steel, BrakeCategory::Carbon];

    /// Key used by the cooling-time table.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            BrakeCategory::Steel => "C (Steel Brakes)",
            BrakeCategory::Carbon => "N (Carbon Brakes)",
        }
    }
}

/// A tabulated axis that can be fetched as a sorted column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Column {
    /// Approach speed, kt
    Speed,
    /// Landing weight, 1000 kg
    Weight,
    /// Ambient temperature, deg C
    Temperature,
    /// Field altitude, 1000 ft
    Altitude,
    /// Reference brake energy, million ft-lb
    ReferenceEnergy,
    /// Adjusted brake energy for one brake category, million ft-lb
    AdjustedEnergy(BrakeCategory),
}

impl Column {
    /// Conventional column name in tabular storage.
    pub const fn name(self) -> &'static str {
        match self {
            Column::Speed => "speed",
            Column::Weight => "weight",
            Column::Temperature => "temp",
            Column::Altitude => "alt",
            Column::ReferenceEnergy => "referenceBrakeEnergy",
            Column::AdjustedEnergy(BrakeCategory::Steel) => "adjustedBrakeEnergySteel",
            Column::AdjustedEnergy(BrakeCategory::Carbon) => "adjustedBrakeEnergyCarbon",
        }
    }
}

/// An exact four-axis grid coordinate of the reference energy table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub speed: f64,
    pub weight: f64,
    pub temperature: f64,
    pub altitude: f64,
}

impl GridPoint {
    pub const fn new(speed: f64, weight: f64, temperature: f64, altitude: f64) -> Self {
        Self {
            speed,
            weight,
            temperature,
            altitude,
        }
    }
}

impl From<[f64; 4]> for GridPoint {
    fn from(x: [f64; 4]) -> Self {
        Self::new(x[0], x[1], x[2], x[3])
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed {} / weight {} / temperature {} / altitude {}",
            self.speed, self.weight, self.temperature, self.altitude
        )
    }
}

/// Read-only access to one or more aircraft models' performance tables.
///
/// Lookups are keyed by exact tabulated values. Implementations report
/// absent rows with [`Error::MissingCorner`](crate::Error::MissingCorner) or
/// [`Error::MissingRow`](crate::Error::MissingRow) and absent models with
/// [`Error::TableNotFound`](crate::Error::TableNotFound); nothing is
/// substituted for missing data.
///
/// Engine calls are independent, so a store that is `Sync` can serve
/// concurrent queries.
pub trait TableStore {
    /// All non-null values of one column, ascending.
    fn column(&self, model: &str, column: Column) -> Result<Vec<f64>>;

    /// Reference brake energy at an exact grid point.
    fn reference_energy(&self, model: &str, point: GridPoint) -> Result<f64>;

    /// Adjusted brake energy for a tabulated reference energy.
    fn adjusted_energy(
        &self,
        model: &str,
        reference_energy: f64,
        event: BrakingEvent,
        reverse_thrust: ReverseThrust,
    ) -> Result<f64>;

    /// Cooling time in minutes for a tabulated adjusted energy.
    fn cooling_time(&self, model: &str, category: BrakeCategory, adjusted_energy: f64)
        -> Result<f64>;

    /// Adjusted energy above which the caution procedure applies.
    fn caution_threshold(&self, model: &str, category: BrakeCategory) -> Result<f64>;

    /// Adjusted energy above which the warning procedure applies.
    fn warning_threshold(&self, model: &str, category: BrakeCategory) -> Result<f64>;
}

impl<S: TableStore + ?Sized> TableStore for &S {
    fn column(&self, model: &str, column: Column) -> Result<Vec<f64>> {
        (**self).column(model, column)
    }

    fn reference_energy(&self, model: &str, point: GridPoint) -> Result<f64> {
        (**self).reference_energy(model, point)
    }

    fn adjusted_energy(
        &self,
        model: &str,
        reference_energy: f64,
        event: BrakingEvent,
        reverse_thrust: ReverseThrust,
    ) -> Result<f64> {
        (**self).adjusted_energy(model, reference_energy, event, reverse_thrust)
    }

    fn cooling_time(
        &self,
        model: &str,
        category: BrakeCategory,
        adjusted_energy: f64,
    ) -> Result<f64> {
        (**self).cooling_time(model, category, adjusted_energy)
    }

    fn caution_threshold(&self, model: &str, category: BrakeCategory) -> Result<f64> {
        (**self).caution_threshold(model, category)
    }

    fn warning_threshold(&self, model: &str, category: BrakeCategory) -> Result<f64> {
        (**self).warning_threshold(model, category)
    }
}
