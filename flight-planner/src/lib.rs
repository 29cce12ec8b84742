pub mod batch;

pub mod config;

pub mod geodesy;

pub mod refuel_search;

pub mod registry;

pub mod route_planner;

pub mod types;

pub use batch::{plan_batch, FlightRequest, PlanningSnapshot};
pub use config::PlannerConfig;
pub use registry::aircraft::AircraftRegistry;
pub use registry::airports::AirportRegistry;
pub use route_planner::plan_flight;
pub use types::aircraft::{Aircraft, AircraftCategory};
pub use types::airport::Airport;
pub use types::flight::Flight;
pub use types::fuel_type::{FuelAvailability, FuelType};
pub use types::planner_error::PlannerError;
