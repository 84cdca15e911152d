use ndarray::{Array3, Array4};
use num_traits::Float;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::table::{BrakeCategory, BrakingEvent, Column, GridPoint, ReverseThrust, TableStore};

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers in [0, 1) using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
pub fn linspace<T: Float>(start: T, stop: T, n: usize) -> Vec<T> {
    let dx: T = (stop - start) / T::from(n - 1).unwrap();
    (0..n).map(|i| start + T::from(i).unwrap() * dx).collect()
}

pub const MODEL: &str = "B_737_800WSFP1";

/// In-memory tables for one model, filled from closed-form functions so
/// interpolated results can be checked exactly.
pub struct GridStore {
    pub speeds: Vec<f64>,
    pub weights: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub altitudes: Vec<f64>,

    /// Reference energy indexed [speed, weight, temperature, altitude]
    pub reference: Array4<f64>,

    pub reference_energies: Vec<f64>,

    /// Adjusted energy indexed [event, reverse thrust, reference energy]
    pub adjusted: Array3<f64>,

    /// Adjusted energy and cooling minutes per brake category
    pub adjusted_energies: [Vec<f64>; 2],
    pub cooling_minutes: [Vec<f64>; 2],
}

impl GridStore {
    pub fn new() -> Self {
        let speeds = vec![100.0, 120.0, 140.0, 160.0];
        let weights = vec![40.0, 50.0, 60.0, 70.0];
        let temperatures = vec![-10.0, 0.0, 10.0, 20.0, 30.0];
        let altitudes = vec![0.0, 2.0, 4.0, 6.0, 8.0];

        let shape = (
            speeds.len(),
            weights.len(),
            temperatures.len(),
            altitudes.len(),
        );
        let reference = Array4::from_shape_fn(shape, |(i, j, k, l)| {
            Self::reference_fn([speeds[i], weights[j], temperatures[k], altitudes[l]])
        });

        let reference_energies = linspace(0.0, 100.0, 11);
        let adjusted = Array3::from_shape_fn(
            (BrakingEvent::ALL.len(), ReverseThrust::ALL.len(), reference_energies.len()),
            |(e, r, k)| {
                reference_energies[k]
                    * Self::adjustment_factor(BrakingEvent::ALL[e], ReverseThrust::ALL[r])
            },
        );

        Self {
            speeds,
            weights,
            temperatures,
            altitudes,
            reference,
            reference_energies,
            adjusted,
            adjusted_energies: [
                vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
                vec![0.0, 15.0, 30.0, 45.0, 60.0, 75.0],
            ],
            cooling_minutes: [
                vec![0.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
                vec![0.0, 0.0, 15.0, 30.0, 45.0, 60.0],
            ],
        }
    }

    /// Multilinear in every axis, so four-axis interpolation reproduces it
    pub fn reference_fn(x: [f64; 4]) -> f64 {
        0.1 * x[0] + 0.5 * x[1] + 0.02 * x[2] + 0.25 * x[3] + 0.001 * x[0] * x[1]
    }

    pub fn adjustment_factor(event: BrakingEvent, reverse_thrust: ReverseThrust) -> f64 {
        let idle = match event {
            BrakingEvent::MaxManual => 1.0,
            BrakingEvent::AutobrakeMax => 0.9,
            BrakingEvent::Autobrake3 => 0.75,
            BrakingEvent::Autobrake2 => 0.6,
            BrakingEvent::Autobrake1 => 0.5,
        };
        match reverse_thrust {
            ReverseThrust::Idle => idle,
            ReverseThrust::SecondDetent => idle - 0.1,
        }
    }

    fn check_model(&self, model: &str) -> Result<()> {
        if model != MODEL {
            return Err(Error::TableNotFound {
                model: model.to_string(),
            });
        }
        Ok(())
    }
}

fn find(column: &[f64], key: f64) -> Option<usize> {
    column.iter().position(|&x| x == key)
}

fn missing_row(model: &str, table: &'static str, key: f64) -> Error {
    Error::MissingRow {
        model: model.to_string(),
        table,
        key,
    }
}

impl TableStore for GridStore {
    fn column(&self, model: &str, column: Column) -> Result<Vec<f64>> {
        self.check_model(model)?;
        let values = match column {
            Column::Speed => &self.speeds,
            Column::Weight => &self.weights,
            Column::Temperature => &self.temperatures,
            Column::Altitude => &self.altitudes,
            Column::ReferenceEnergy => &self.reference_energies,
            Column::AdjustedEnergy(c) => &self.adjusted_energies[c.code() as usize],
        };
        Ok(values.clone())
    }

    fn reference_energy(&self, model: &str, point: GridPoint) -> Result<f64> {
        self.check_model(model)?;
        let missing = || Error::MissingCorner {
            model: model.to_string(),
            point,
        };
        let i = find(&self.speeds, point.speed).ok_or_else(missing)?;
        let j = find(&self.weights, point.weight).ok_or_else(missing)?;
        let k = find(&self.temperatures, point.temperature).ok_or_else(missing)?;
        let l = find(&self.altitudes, point.altitude).ok_or_else(missing)?;
        Ok(self.reference[[i, j, k, l]])
    }

    fn adjusted_energy(
        &self,
        model: &str,
        reference_energy: f64,
        event: BrakingEvent,
        reverse_thrust: ReverseThrust,
    ) -> Result<f64> {
        self.check_model(model)?;
        let k = find(&self.reference_energies, reference_energy)
            .ok_or_else(|| missing_row(model, "ADJ_BE", reference_energy))?;
        let r = reverse_thrust.is_used() as usize;
        Ok(self.adjusted[[event.code() as usize, r, k]])
    }

    fn cooling_time(
        &self,
        model: &str,
        category: BrakeCategory,
        adjusted_energy: f64,
    ) -> Result<f64> {
        self.check_model(model)?;
        let c = category.code() as usize;
        let k = find(&self.adjusted_energies[c], adjusted_energy)
            .ok_or_else(|| missing_row(model, "COOLING_TIME", adjusted_energy))?;
        Ok(self.cooling_minutes[c][k])
    }

    fn caution_threshold(&self, model: &str, category: BrakeCategory) -> Result<f64> {
        // Largest tabulated value strictly below the maximum
        let warning = self.warning_threshold(model, category)?;
        self.adjusted_energies[category.code() as usize]
            .iter()
            .copied()
            .filter(|&x| x < warning)
            .reduce(f64::max)
            .ok_or(Error::EmptyTable)
    }

    fn warning_threshold(&self, model: &str, category: BrakeCategory) -> Result<f64> {
        self.check_model(model)?;
        self.adjusted_energies[category.code() as usize]
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(Error::EmptyTable)
    }
}
