//! Brake energy and cooling time evaluation against a [`TableStore`].
//!
//! The chain runs in three steps, each exposed separately so callers can
//! inspect intermediate brackets:
//!
//! 1. [`Engine::compute_reference_braking_energy`] brackets the four landing
//!    inputs, fetches the distinct cell corners and reduces them.
//! 2. [`Engine::compute_adjusted_braking_energy`] interpolates the adjusted
//!    energy for one braking event and reverse thrust setting along the
//!    reference energy bracket.
//! 3. [`Engine::compute_cooling_time`] interpolates the cooling time along
//!    the adjusted energy bracket for one brake category.
//!
//! [`Engine::schedule`] runs the whole chain for every braking event and
//! reverse thrust combination and classifies each against the caution and
//! warning thresholds.
//!
//! The engine holds no mutable state; every call is a pure function of its
//! arguments and the store's contents.

use tracing::{debug, warn};

use crate::error::Result;
use crate::multilinear::{reduce, AxisBrackets, Corner, NCORNERS};
use crate::one_dim::{bracket_with, Bracket, OutOfRangePolicy};
use crate::table::{BrakeCategory, BrakingEvent, Column, GridPoint, ReverseThrust, TableStore};
use crate::utils::normalize_column;

/// Aircraft model whose tables are used when none is configured.
pub const DEFAULT_MODEL: &str = "B_737_800WSFP1";

/// Which tables to read and how to treat inputs outside them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Table-set name passed to every store lookup
    pub model: String,

    /// Handling of inputs outside the tabulated range
    pub out_of_range: OutOfRangePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            out_of_range: OutOfRangePolicy::Clamp,
        }
    }
}

impl EngineConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }
}

/// Landing conditions, in table units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandingInputs {
    /// Approach speed, kt
    pub speed: f64,
    /// Landing weight, 1000 kg
    pub weight: f64,
    /// Ambient temperature, deg C
    pub temperature: f64,
    /// Field altitude, 1000 ft
    pub altitude: f64,
    /// Brake energy added by taxiing, million ft-lb
    pub taxi_energy: f64,
}

impl LandingInputs {
    pub const fn new(speed: f64, weight: f64, temperature: f64, altitude: f64) -> Self {
        Self {
            speed,
            weight,
            temperature,
            altitude,
            taxi_energy: 0.0,
        }
    }

    /// Build from instrument units; weight and altitude are tabulated in thousands.
    pub fn from_raw(speed_kt: f64, weight_kg: f64, temperature_c: f64, altitude_ft: f64) -> Self {
        Self::new(
            speed_kt,
            weight_kg / 1000.0,
            temperature_c,
            altitude_ft / 1000.0,
        )
    }

    pub fn with_taxi_energy(mut self, taxi_energy: f64) -> Self {
        self.taxi_energy = taxi_energy;
        self
    }
}

/// An interpolated value and whether any input was clamped to produce it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    pub value: f64,
    pub extrapolated: bool,
}

/// Cooling time after landing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingTime {
    /// The energy is low enough that no cooling procedure applies.
    NoProcedureRequired,
    /// Minutes to wait before the next takeoff; may be zero.
    Minutes(f64),
}

impl CoolingTime {
    pub fn minutes(&self) -> Option<f64> {
        match self {
            CoolingTime::NoProcedureRequired => None,
            CoolingTime::Minutes(m) => Some(*m),
        }
    }
}

/// Result for one braking event and reverse thrust combination.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Cooling(CoolingTime),
    /// Adjusted energy above the caution threshold
    Caution,
    /// Adjusted energy above the warning threshold
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleEntry {
    pub event: BrakingEvent,
    pub reverse_thrust: ReverseThrust,
    pub adjusted_energy: f64,
    pub outcome: Outcome,
}

/// Outcomes for every braking event and reverse thrust setting,
/// idle reverse first, events in [`BrakingEvent::ALL`] order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoolingSchedule {
    pub category: BrakeCategory,
    pub reference_energy: Estimate,
    pub entries: Vec<ScheduleEntry>,
    /// Whether any bracket in the chain was clamped
    pub extrapolated: bool,
}

impl CoolingSchedule {
    pub fn get(&self, event: BrakingEvent, reverse_thrust: ReverseThrust) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|e| e.event == event && e.reverse_thrust == reverse_thrust)
    }
}

/// Brake energy and cooling time evaluation over one model's tables.
pub struct Engine<'a, S: ?Sized> {
    store: &'a S,
    config: EngineConfig,
}

impl<'a, S: TableStore + ?Sized> Engine<'a, S> {
    pub fn new(store: &'a S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch a column and condition it for bracketing.
    ///
    /// # Errors
    /// * If the store fails
    /// * If the column contains NaN
    pub fn column(&self, column: Column) -> Result<Vec<f64>> {
        normalize_column(self.store.column(&self.config.model, column)?)
    }

    /// Bracket `value` against one column of the configured model.
    ///
    /// # Errors
    /// * If the column cannot be fetched or is empty
    /// * If `value` is NaN, or out of range under [`OutOfRangePolicy::Reject`]
    pub fn bracket(&self, column: Column, value: f64) -> Result<Bracket<f64>> {
        let values = self.column(column)?;
        self.bracket_in(column, value, &values)
    }

    fn bracket_in(&self, column: Column, value: f64, values: &[f64]) -> Result<Bracket<f64>> {
        let b = bracket_with(value, values, self.config.out_of_range)?;
        if b.is_extrapolated() {
            warn!(
                column = column.name(),
                requested = value,
                clamped = b.input(),
                "Value outside tabulated range; clamped to table edge"
            );
        }
        debug!(
            column = column.name(),
            input = b.input(),
            low = b.low(),
            high = b.high(),
            "Bracketed"
        );
        Ok(b)
    }

    /// Bracket all four landing inputs.
    pub fn reference_brackets(&self, inputs: &LandingInputs) -> Result<AxisBrackets<f64>> {
        Ok(AxisBrackets {
            speed: self.bracket(Column::Speed, inputs.speed)?,
            weight: self.bracket(Column::Weight, inputs.weight)?,
            temperature: self.bracket(Column::Temperature, inputs.temperature)?,
            altitude: self.bracket(Column::Altitude, inputs.altitude)?,
        })
    }

    /// Fetch the reference energy at every corner of the bracketed cell,
    /// in canonical corner order.
    ///
    /// Corners that coincide because a bracket collapsed are fetched once.
    ///
    /// # Errors
    /// * If the store has no value for any distinct corner
    pub fn corner_values(&self, brackets: &AxisBrackets<f64>) -> Result<[f64; NCORNERS]> {
        let mut vals = [0.0; NCORNERS];
        for corner in Corner::all() {
            let i = corner.index();
            // The canonical corner only clears bits, so it was visited already
            let j = corner.canonical(brackets).index();
            if j != i {
                vals[i] = vals[j];
                continue;
            }

            let point = GridPoint::from(corner.select(brackets));
            vals[i] = self.store.reference_energy(&self.config.model, point)?;
            debug!(corner = i, %point, value = vals[i], "Fetched reference energy");
        }
        Ok(vals)
    }

    /// Reference brake energy for the landing inputs, including any taxi energy.
    ///
    /// # Errors
    /// * If any column is empty or any distinct corner is missing
    /// * If an input is NaN, or out of range under [`OutOfRangePolicy::Reject`]
    pub fn compute_reference_braking_energy(&self, inputs: &LandingInputs) -> Result<Estimate> {
        let brackets = self.reference_brackets(inputs)?;
        let corners = self.corner_values(&brackets)?;
        let interpolated = reduce(corners, &brackets)?;

        let value = if inputs.taxi_energy == 0.0 {
            interpolated
        } else {
            interpolated + inputs.taxi_energy
        };
        debug!(
            interpolated,
            taxi_energy = inputs.taxi_energy,
            value,
            "Reference braking energy"
        );

        Ok(Estimate {
            value,
            extrapolated: brackets.any_extrapolated(),
        })
    }

    /// Bracket a reference energy against the reference energy column.
    pub fn reference_energy_bracket(&self, reference_energy: f64) -> Result<Bracket<f64>> {
        self.bracket(Column::ReferenceEnergy, reference_energy)
    }

    /// Adjusted brake energy for one braking event and reverse thrust setting.
    ///
    /// # Errors
    /// * If the store has no adjusted energy for either bracket endpoint
    pub fn compute_adjusted_braking_energy(
        &self,
        reference: &Bracket<f64>,
        event: BrakingEvent,
        reverse_thrust: ReverseThrust,
    ) -> Result<f64> {
        let model = &self.config.model;
        let low = self
            .store
            .adjusted_energy(model, reference.low(), event, reverse_thrust)?;
        let high = match reference.is_exact() {
            true => low,
            false => self
                .store
                .adjusted_energy(model, reference.high(), event, reverse_thrust)?,
        };

        let adjusted = reference.interp(low, high)?;
        debug!(
            event = event.label(),
            reverse_thrust = reverse_thrust.label(),
            adjusted,
            "Adjusted braking energy"
        );
        Ok(adjusted)
    }

    /// Bracket an adjusted energy against one brake category's column.
    pub fn adjusted_energy_bracket(
        &self,
        adjusted_energy: f64,
        category: BrakeCategory,
    ) -> Result<Bracket<f64>> {
        self.bracket(Column::AdjustedEnergy(category), adjusted_energy)
    }

    /// Cooling time for an adjusted energy bracket.
    ///
    /// A bracket whose high end is exactly zero needs no cooling procedure,
    /// which is reported apart from a zero-minute cooling time.
    ///
    /// # Errors
    /// * If the store has no cooling time for either bracket endpoint
    pub fn compute_cooling_time(
        &self,
        adjusted: &Bracket<f64>,
        category: BrakeCategory,
    ) -> Result<CoolingTime> {
        if adjusted.high() == 0.0 {
            debug!(category = category.label(), "No cooling procedure required");
            return Ok(CoolingTime::NoProcedureRequired);
        }

        let model = &self.config.model;
        let low = self.store.cooling_time(model, category, adjusted.low())?;
        let high = match adjusted.is_exact() {
            true => low,
            false => self.store.cooling_time(model, category, adjusted.high())?,
        };

        let minutes = adjusted.interp(low, high)?;
        debug!(category = category.label(), minutes, "Cooling time");
        Ok(CoolingTime::Minutes(minutes))
    }

    /// Evaluate every braking event and reverse thrust combination for one
    /// brake category.
    ///
    /// Adjusted energies above the caution threshold are reported as
    /// [`Outcome::Caution`], or [`Outcome::Warning`] above the warning
    /// threshold; only the rest get a cooling time.
    ///
    /// # Errors
    /// * Any failure of the individual steps; no partial schedule is returned
    pub fn schedule(
        &self,
        inputs: &LandingInputs,
        category: BrakeCategory,
    ) -> Result<CoolingSchedule> {
        let model = &self.config.model;
        let reference_energy = self.compute_reference_braking_energy(inputs)?;
        let reference = self.reference_energy_bracket(reference_energy.value)?;

        let caution = self.store.caution_threshold(model, category)?;
        let warning = self.store.warning_threshold(model, category)?;
        let adjusted_column = Column::AdjustedEnergy(category);
        let adjusted_values = self.column(adjusted_column)?;

        let mut extrapolated = reference_energy.extrapolated || reference.is_extrapolated();
        let mut entries = Vec::with_capacity(ReverseThrust::ALL.len() * BrakingEvent::ALL.len());
        for reverse_thrust in ReverseThrust::ALL {
            for event in BrakingEvent::ALL {
                let adjusted_energy =
                    self.compute_adjusted_braking_energy(&reference, event, reverse_thrust)?;

                let outcome = if adjusted_energy > caution {
                    if adjusted_energy > warning {
                        Outcome::Warning
                    } else {
                        Outcome::Caution
                    }
                } else {
                    let b = self.bracket_in(adjusted_column, adjusted_energy, &adjusted_values)?;
                    extrapolated |= b.is_extrapolated();
                    Outcome::Cooling(self.compute_cooling_time(&b, category)?)
                };

                entries.push(ScheduleEntry {
                    event,
                    reverse_thrust,
                    adjusted_energy,
                    outcome,
                });
            }
        }

        Ok(CoolingSchedule {
            category,
            reference_energy,
            entries,
            extrapolated,
        })
    }
}
