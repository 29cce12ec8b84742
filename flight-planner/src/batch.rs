use std::fmt;
use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use crate::registry::aircraft::AircraftRegistry;
use crate::registry::airports::AirportRegistry;
use crate::route_planner::plan_flight;
use crate::types::aircraft::Aircraft;
use crate::types::airport::Airport;
use crate::types::flight::Flight;
use crate::types::planner_error::PlannerError;

/// Read-only view of both registries, shared between planning workers.
#[derive(Debug, Clone)]
pub struct PlanningSnapshot {
    pub airports: Arc<[Airport]>,
    pub aircraft: Arc<[Aircraft]>,
}

impl PlanningSnapshot {
    pub fn new(airports: &AirportRegistry, aircraft: &AircraftRegistry) -> Self {
        PlanningSnapshot {
            airports: airports.snapshot(),
            aircraft: aircraft.snapshot(),
        }
    }

    pub fn from_parts(airports: Vec<Airport>, aircraft: Vec<Aircraft>) -> Self {
        PlanningSnapshot {
            airports: Arc::from(airports),
            aircraft: Arc::from(aircraft),
        }
    }

    pub fn airport(&self, icao: &str) -> Option<&Airport> {
        self.airports.iter().find(|airport| airport.has_icao(icao))
    }

    pub fn aircraft(&self, make_model: &str) -> Option<&Aircraft> {
        self.aircraft
            .iter()
            .find(|aircraft| aircraft.has_model(make_model))
    }
}

/// A flight to plan, named by registry keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRequest {
    pub start_icao: String,
    pub destination_icao: String,
    pub aircraft_model: String,
}

impl FlightRequest {
    pub fn new(start_icao: &str, destination_icao: &str, aircraft_model: &str) -> Self {
        FlightRequest {
            start_icao: start_icao.trim().to_string(),
            destination_icao: destination_icao.trim().to_string(),
            aircraft_model: aircraft_model.trim().to_string(),
        }
    }

    /// Parses a `START:DEST` leg, e.g. `"KJFK:KLAX"`.
    pub fn parse(leg: &str, aircraft_model: &str) -> Result<Self, PlannerError> {
        match leg.split_once(':') {
            Some((start, dest)) if !start.trim().is_empty() && !dest.trim().is_empty() => {
                Ok(FlightRequest::new(start, dest, aircraft_model))
            }
            _ => Err(PlannerError::InvalidInput(format!(
                "expected a leg like KJFK:KLAX, got '{}'",
                leg
            ))),
        }
    }

    /// Looks the request's keys up in `snapshot`.
    pub fn resolve<'a>(
        &self,
        snapshot: &'a PlanningSnapshot,
    ) -> Result<(&'a Airport, &'a Airport, &'a Aircraft), PlannerError> {
        let start = snapshot
            .airport(&self.start_icao)
            .ok_or_else(|| PlannerError::AirportNotFound(self.start_icao.clone()))?;
        let destination = snapshot
            .airport(&self.destination_icao)
            .ok_or_else(|| PlannerError::AirportNotFound(self.destination_icao.clone()))?;
        let aircraft = snapshot
            .aircraft(&self.aircraft_model)
            .ok_or_else(|| PlannerError::AircraftNotFound(self.aircraft_model.clone()))?;
        Ok((start, destination, aircraft))
    }

    /// Resolves and plans the request against `snapshot`.
    pub fn plan(&self, snapshot: &PlanningSnapshot) -> Result<Flight, PlannerError> {
        let (start, destination, aircraft) = self.resolve(snapshot)?;
        plan_flight(
            Some(start),
            Some(destination),
            Some(aircraft),
            Some(&snapshot.airports[..]),
        )
    }
}

impl fmt::Display for FlightRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.start_icao, self.destination_icao, self.aircraft_model
        )
    }
}

/// Plans every request on `pool` and returns the results in request order.
///
/// # Parameters
/// - `pool`: Worker pool the requests are fanned out on.
/// - `snapshot`: Registries to plan against. Each worker gets a cheap clone.
/// - `requests`: Flights to plan.
///
/// # Returns
/// * `Vec<Result<Flight, PlannerError>>` - One entry per request. A worker that stopped
///   without reporting leaves a `PlannerError::Other` in its slot.
pub fn plan_batch(
    pool: &ThreadPool,
    snapshot: &PlanningSnapshot,
    requests: &[FlightRequest],
) -> Vec<Result<Flight, PlannerError>> {
    let (tx, rx) = mpsc::channel();

    for (index, request) in requests.iter().enumerate() {
        let tx = tx.clone();
        let snapshot = snapshot.clone();
        let request = request.clone();

        pool.execute(move || {
            let result = request.plan(&snapshot);
            // The receiver only goes away once the batch is abandoned.
            let _ = tx.send((index, result));
        });
    }
    drop(tx);

    let mut slots: Vec<Option<Result<Flight, PlannerError>>> =
        requests.iter().map(|_| None).collect();
    for (index, result) in rx.iter() {
        slots[index] = Some(result);
    }

    slots
        .into_iter()
        .zip(requests)
        .map(|(slot, request)| {
            slot.unwrap_or_else(|| {
                Err(PlannerError::Other(format!(
                    "planning {} stopped without a result",
                    request
                )))
            })
        })
        .collect()
}
