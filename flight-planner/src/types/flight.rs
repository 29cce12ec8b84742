use std::fmt;

/// The outcome of planning one flight between two airports.
///
/// A `Flight` is a plain computation result: it is built once by
/// [`plan_flight`](crate::route_planner::plan_flight) and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    starting_airport: String,
    destination_airport: String,
    estimated_time: f64,
    distance: f64,
    fuel_needed: f64,
    heading: f64,
    destination_frequency: f64,
    refuel_stops: Vec<String>,
    unreachable_from: Option<String>,
}

impl Flight {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        starting_airport: String,
        destination_airport: String,
        estimated_time: f64,
        distance: f64,
        fuel_needed: f64,
        heading: f64,
        destination_frequency: f64,
        refuel_stops: Vec<String>,
    ) -> Self {
        Flight {
            starting_airport,
            destination_airport,
            estimated_time,
            distance,
            fuel_needed,
            heading,
            destination_frequency,
            refuel_stops,
            unreachable_from: None,
        }
    }

    /// Marks the route as incomplete: no usable refuel stop was found after `airport_name`.
    pub fn stranded_at(mut self, airport_name: String) -> Self {
        self.unreachable_from = Some(airport_name);
        self
    }

    pub fn starting_airport(&self) -> &str {
        &self.starting_airport
    }

    pub fn destination_airport(&self) -> &str {
        &self.destination_airport
    }

    /// Hours in the air.
    pub fn estimated_time(&self) -> f64 {
        self.estimated_time
    }

    /// Great-circle distance in statute miles.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Gallons.
    pub fn fuel_needed(&self) -> f64 {
        self.fuel_needed
    }

    /// Initial true heading in degrees, in `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn destination_frequency(&self) -> f64 {
        self.destination_frequency
    }

    pub fn refuel_stops(&self) -> &[String] {
        &self.refuel_stops
    }

    /// Name of the last airport reached before the refuel search ran out of candidates.
    pub fn unreachable_from(&self) -> Option<&str> {
        self.unreachable_from.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.unreachable_from.is_none()
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Flight Plan:")?;
        writeln!(f, "Starting Airport: {}", self.starting_airport)?;
        writeln!(f, "Destination Airport: {}", self.destination_airport)?;
        writeln!(f, "Estimated Time of Arrival: {:.2} hours", self.estimated_time)?;
        writeln!(f, "Approximate Distance: {:.2} miles", self.distance)?;
        writeln!(f, "Fuel Needed: {:.2} gallons", self.fuel_needed)?;
        writeln!(f, "Plane Heading: {:.2} degrees", self.heading)?;
        writeln!(
            f,
            "Destination Communication Frequency: {}",
            self.destination_frequency
        )?;

        if self.refuel_stops.is_empty() {
            write!(f, "No refuel stops necessary.")?;
        } else {
            write!(f, "Refuel Stops:")?;
            for stop in &self.refuel_stops {
                write!(f, "\n - {}", stop)?;
            }
        }

        if let Some(stranded) = &self.unreachable_from {
            write!(
                f,
                "\nWARNING: route incomplete, no valid refuel stop from {}",
                stranded
            )?;
        }
        Ok(())
    }
}
