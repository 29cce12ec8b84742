use crate::geodesy::{distance, heading};
use crate::refuel_search::find_refuel_stops;
use crate::types::aircraft::Aircraft;
use crate::types::airport::Airport;
use crate::types::flight::Flight;
use crate::types::planner_error::PlannerError;

/// Factor applied to the rated airspeed to turn it into miles per hour.
pub const AIRSPEED_TO_MPH: f64 = 0.621371;

/// Share of the rated airspeed actually held in cruise.
pub const CRUISE_DERATING: f64 = 0.85;

/// Litres to US gallons.
pub const LITERS_TO_GALLONS: f64 = 0.264172;

/// Plans a single flight from `start` to `destination` with `aircraft`.
///
/// Every argument is optional so that registry lookups can be passed straight in;
/// a missing one is reported as [`PlannerError::InvalidInput`] and nothing is computed.
/// `all_airports` may be empty. Refuel stops are searched only when the direct
/// distance exceeds the aircraft's maximum range. If the search gets stuck the
/// partial route is still returned, with [`Flight::unreachable_from`] set.
///
/// # Parameters
/// - `start`: Departure airport.
/// - `destination`: Arrival airport. May be the same as `start`.
/// - `aircraft`: Aircraft flying the route.
/// - `all_airports`: Candidate refuel airports.
///
/// # Returns
/// * `Result<Flight, PlannerError>` - The planned flight, or `InvalidInput` when an argument
///   is absent.
pub fn plan_flight(
    start: Option<&Airport>,
    destination: Option<&Airport>,
    aircraft: Option<&Aircraft>,
    all_airports: Option<&[Airport]>,
) -> Result<Flight, PlannerError> {
    let start = start.ok_or_else(|| missing("start airport"))?;
    let destination = destination.ok_or_else(|| missing("destination airport"))?;
    let aircraft = aircraft.ok_or_else(|| missing("aircraft"))?;
    let all_airports = all_airports.ok_or_else(|| missing("airport list"))?;

    let distance = distance(start, destination);
    let airspeed_mph = aircraft.airspeed * AIRSPEED_TO_MPH;
    let estimated_time = if distance == 0.0 {
        0.0
    } else {
        distance / (airspeed_mph * CRUISE_DERATING)
    };
    let fuel_needed = estimated_time * aircraft.fuel_burn_rate * LITERS_TO_GALLONS;
    let heading = heading(start, destination);

    let (refuel_stops, stranded_at) = if distance > aircraft.max_range() {
        let route = find_refuel_stops(start, destination, aircraft, all_airports);
        (route.stop_names(), route.stranded_at.map(|airport| airport.name.clone()))
    } else {
        (Vec::new(), None)
    };

    let flight = Flight::new(
        start.name.clone(),
        destination.name.clone(),
        estimated_time,
        distance,
        fuel_needed,
        heading,
        destination.radio_frequency,
        refuel_stops,
    );

    Ok(match stranded_at {
        Some(name) => flight.stranded_at(name),
        None => flight,
    })
}

fn missing(what: &str) -> PlannerError {
    PlannerError::InvalidInput(format!("no {} was provided", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::EARTH_RADIUS_MILES;
    use crate::types::aircraft::AircraftCategory;
    use crate::types::fuel_type::{FuelAvailability, FuelType};

    const NO_AIRPORTS: &[Airport] = &[];

    fn equator_airport(icao: &str, miles: f64, fuel: FuelAvailability) -> Airport {
        let longitude = (miles / EARTH_RADIUS_MILES).to_degrees();
        Airport::new(format!("{} Field", icao), icao.to_string(), 0.0, longitude, 121.5, fuel)
    }

    /// 2.5 h endurance at 200 kt: 500 miles of range.
    fn piston_twin() -> Aircraft {
        Aircraft::new(
            "Baron 58".to_string(),
            AircraftCategory::Prop,
            FuelType::Avgas,
            40.0,
            100.0,
            200.0,
        )
    }

    #[test]
    fn test_direct_flight_within_range() {
        let start = equator_airport("STRT", 0.0, FuelAvailability::both());
        let dest = equator_airport("DEST", 300.0, FuelAvailability::both());
        let aircraft = piston_twin();
        let airports = vec![start.clone(), dest.clone()];

        let flight = plan_flight(
            Some(&start),
            Some(&dest),
            Some(&aircraft),
            Some(airports.as_slice()),
        )
        .unwrap();

        let airspeed_mph = 200.0 * AIRSPEED_TO_MPH;
        let expected_time = 300.0 / (airspeed_mph * CRUISE_DERATING);
        let expected_fuel = expected_time * 40.0 * LITERS_TO_GALLONS;

        assert!(flight.refuel_stops().is_empty());
        assert!(flight.is_complete());
        assert!((flight.distance() - 300.0).abs() < 1e-6);
        assert!((flight.estimated_time() - expected_time).abs() < 1e-9);
        assert!((flight.fuel_needed() - expected_fuel).abs() < 1e-9);
        assert!((flight.heading() - 90.0).abs() < 1e-9);
        assert_eq!(flight.starting_airport(), "STRT Field");
        assert_eq!(flight.destination_airport(), "DEST Field");
        assert_eq!(flight.destination_frequency(), 121.5);
    }

    #[test]
    fn test_long_flight_gets_refuel_stop() {
        let start = equator_airport("STRT", 0.0, FuelAvailability::both());
        let dest = equator_airport("DEST", 900.0, FuelAvailability::both());
        let airports = vec![
            start.clone(),
            equator_airport("MIDA", 420.0, FuelAvailability::only(FuelType::Avgas)),
            equator_airport("MIDJ", 480.0, FuelAvailability::only(FuelType::JetA)),
            dest.clone(),
        ];

        let flight = plan_flight(
            Some(&start),
            Some(&dest),
            Some(&piston_twin()),
            Some(airports.as_slice()),
        )
        .unwrap();

        assert_eq!(flight.refuel_stops().to_vec(), vec!["MIDA Field".to_string()]);
        assert!(flight.is_complete());
        // Time and fuel cover the direct great-circle distance, not the legs.
        assert!((flight.distance() - 900.0).abs() < 1e-6);
    }

    #[test]
    fn test_unreachable_destination_returns_partial_flight() {
        let start = equator_airport("STRT", 0.0, FuelAvailability::both());
        let dest = equator_airport("DEST", 1200.0, FuelAvailability::both());
        let airports = vec![start.clone(), dest.clone()];

        let flight = plan_flight(
            Some(&start),
            Some(&dest),
            Some(&piston_twin()),
            Some(airports.as_slice()),
        )
        .unwrap();

        assert!(flight.refuel_stops().is_empty());
        assert!(!flight.is_complete());
        assert_eq!(flight.unreachable_from(), Some("STRT Field"));
    }

    #[test]
    fn test_same_start_and_destination() {
        let start = equator_airport("STRT", 0.0, FuelAvailability::both());

        let flight = plan_flight(
            Some(&start),
            Some(&start),
            Some(&piston_twin()),
            Some(NO_AIRPORTS),
        )
        .unwrap();

        assert_eq!(flight.distance(), 0.0);
        assert_eq!(flight.estimated_time(), 0.0);
        assert_eq!(flight.fuel_needed(), 0.0);
        assert_eq!(flight.heading(), 0.0);
        assert!(flight.refuel_stops().is_empty());
    }

    #[test]
    fn test_missing_aircraft_is_invalid_input() {
        let start = equator_airport("STRT", 0.0, FuelAvailability::both());
        let dest = equator_airport("DEST", 300.0, FuelAvailability::both());

        let result = plan_flight(Some(&start), Some(&dest), None, Some(NO_AIRPORTS));

        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_every_missing_argument_is_rejected() {
        let airport = equator_airport("STRT", 0.0, FuelAvailability::both());
        let aircraft = piston_twin();

        assert!(plan_flight(None, Some(&airport), Some(&aircraft), Some(NO_AIRPORTS)).is_err());
        assert!(plan_flight(Some(&airport), None, Some(&aircraft), Some(NO_AIRPORTS)).is_err());
        assert!(plan_flight(Some(&airport), Some(&airport), Some(&aircraft), None).is_err());
    }
}
