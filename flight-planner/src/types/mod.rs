pub mod aircraft;

pub mod airport;

pub mod flight;

pub mod fuel_type;

pub mod planner_error;

use planner_error::PlannerError;

/// Parses a numeric field value given on the command line or in an update.
pub(crate) fn parse_number(field: &str, value: &str) -> Result<f64, PlannerError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| PlannerError::InvalidInput(format!("invalid {}: '{}'", field, value)))
}
