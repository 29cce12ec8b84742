use std::fmt;

/// Represents errors that can occur while planning flights or managing the registries.
#[derive(Debug)]
pub enum PlannerError {
    InvalidInput(String),     // A required argument is missing or a value is unusable
    AirportNotFound(String),  // No airport with the given ICAO code
    AircraftNotFound(String), // No aircraft with the given make and model
    InvalidRecord(String),    // A registry row that could not be turned into a record
    Io(std::io::Error),
    Csv(csv::Error),
    Other(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidInput(ref msg) => write!(f, "Invalid input data: {}", msg),
            PlannerError::AirportNotFound(ref icao) => write!(f, "Airport not found: {}", icao),
            PlannerError::AircraftNotFound(ref model) => {
                write!(f, "Aircraft not found: {}", model)
            }
            PlannerError::InvalidRecord(ref msg) => write!(f, "Invalid record: {}", msg),
            PlannerError::Io(e) => write!(f, "I/O error: {}", e),
            PlannerError::Csv(e) => write!(f, "CSV error: {}", e),
            PlannerError::Other(ref message) => write!(f, "Error: {}", message),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Io(e) => Some(e),
            PlannerError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::Io(err)
    }
}

impl From<csv::Error> for PlannerError {
    fn from(err: csv::Error) -> Self {
        PlannerError::Csv(err)
    }
}
