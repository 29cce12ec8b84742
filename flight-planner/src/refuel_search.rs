use crate::geodesy::distance;
use crate::types::aircraft::Aircraft;
use crate::types::airport::Airport;

/// Stops chosen by [`find_refuel_stops`], in flying order.
#[derive(Debug)]
pub struct RefuelRoute<'a> {
    pub stops: Vec<&'a Airport>,
    /// Set when the search ran out of reachable candidates; holds the airport it got stuck at.
    pub stranded_at: Option<&'a Airport>,
}

impl RefuelRoute<'_> {
    pub fn is_complete(&self) -> bool {
        self.stranded_at.is_none()
    }

    pub fn stop_names(&self) -> Vec<String> {
        self.stops.iter().map(|stop| stop.name.clone()).collect()
    }
}

/// Greedily chains refuel stops from `start` until `destination` is within range.
///
/// At each step the candidate closest to the destination is taken among those that
/// are within the aircraft's maximum range of the current airport, sell its fuel,
/// and are neither the current airport, the destination, nor an earlier stop
/// (compared by ICAO code). Ties go to the candidate listed first. The search never
/// backtracks, so it is not guaranteed to find a route even when one exists.
pub fn find_refuel_stops<'a>(
    start: &'a Airport,
    destination: &'a Airport,
    aircraft: &Aircraft,
    candidates: &'a [Airport],
) -> RefuelRoute<'a> {
    let max_range = aircraft.max_range();
    let mut stops: Vec<&'a Airport> = Vec::new();
    let mut current = start;

    while distance(current, destination) > max_range {
        let next = candidates
            .iter()
            .filter(|candidate| {
                !candidate.has_icao(&current.icao)
                    && !candidate.has_icao(&destination.icao)
                    && !stops.iter().any(|stop| candidate.has_icao(&stop.icao))
                    && candidate.sells(aircraft.fuel_type)
            })
            .map(|candidate| (candidate, distance(current, candidate)))
            .filter(|(_, leg)| *leg <= max_range)
            .map(|(candidate, _)| (candidate, distance(candidate, destination)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        match next {
            Some((stop, _)) => {
                stops.push(stop);
                current = stop;
            }
            None => {
                return RefuelRoute {
                    stops,
                    stranded_at: Some(current),
                }
            }
        }
    }

    RefuelRoute {
        stops,
        stranded_at: None,
    }
}
