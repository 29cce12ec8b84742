use std::env;

use chrono::Local;
use flight_planner::registry::LoadReport;
use flight_planner::{
    plan_batch, plan_flight, Aircraft, AircraftCategory, AircraftRegistry, Airport,
    AirportRegistry, FlightRequest, FuelAvailability, FuelType, PlannerConfig, PlannerError,
    PlanningSnapshot,
};
use logger::{Color, Logger};
use threadpool::ThreadPool;

/// Command-line front end for the flight planner.
///
/// # Usage
///
/// ```sh
/// cargo run -- plan KJFK KLAX "Boeing 737-800"
/// cargo run -- plan-batch "Cessna 172" KJFK:KBOS KBOS:KORD
/// ```
///
/// The airport and aircraft files, the log directory, the log level and the
/// worker count are taken from the `PLANNER_*` environment variables.
fn main() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();

    let command = match args.get(1).map(String::as_str) {
        None => {
            print_help();
            return Err("Usage: rustic-flight-planner <command> [args]".to_string());
        }
        Some("help") | Some("-h") | Some("--help") => {
            print_help();
            return Ok(());
        }
        Some(command) => command,
    };

    let config = PlannerConfig::from_env().map_err(|e| e.to_string())?;
    let logger = build_logger(&config).map_err(|e| e.to_string())?;

    let _ = logger.debug(&format!("running '{}' with {:?}", command, config));

    match run(command, &args[2..], &config, &logger) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = logger.error(&e.to_string());
            Err(e.to_string())
        }
    }
}

fn build_logger(config: &PlannerConfig) -> Result<Logger, logger::LoggerError> {
    let logger = match &config.log_dir {
        Some(dir) => {
            let session = Local::now().format("%Y%m%d-%H%M%S").to_string();
            Logger::new(dir, &session)?
        }
        None => Logger::console(),
    };

    Ok(logger.with_min_level(config.log_level))
}

fn run(
    command: &str,
    args: &[String],
    config: &PlannerConfig,
    logger: &Logger,
) -> Result<(), PlannerError> {
    match command {
        "plan" => {
            expect_args(command, args, 3, "<START_ICAO> <DEST_ICAO> <AIRCRAFT_MODEL>")?;
            let airports = load_airports(config, logger)?;
            let aircraft = load_aircraft(config, logger)?;
            plan(&airports, &aircraft, &args[0], &args[1], &args[2], logger)
        }
        "plan-batch" => {
            if args.len() < 2 {
                return Err(usage(command, "<AIRCRAFT_MODEL> <START:DEST>..."));
            }
            let airports = load_airports(config, logger)?;
            let aircraft = load_aircraft(config, logger)?;
            let requests = args[1..]
                .iter()
                .map(|leg| FlightRequest::parse(leg, &args[0]))
                .collect::<Result<Vec<_>, _>>()?;
            batch(&airports, &aircraft, &requests, config.workers, logger);
            Ok(())
        }
        "list-airports" => {
            let airports = load_airports(config, logger)?;
            for airport in airports.airports() {
                print_airport_line(airport);
            }
            Ok(())
        }
        "list-aircraft" => {
            let aircraft = load_aircraft(config, logger)?;
            for entry in aircraft.aircraft() {
                println!(
                    "{:<32} {:<10} {:<6} range {:.0} mi",
                    entry.make_model,
                    entry.category,
                    entry.fuel_type,
                    entry.max_range()
                );
            }
            Ok(())
        }
        "show-airport" => {
            expect_args(command, args, 1, "<ICAO>")?;
            let airports = load_airports(config, logger)?;
            let airport = airports
                .find(&args[0])
                .ok_or_else(|| PlannerError::AirportNotFound(args[0].clone()))?;
            print_airport_details(airport);
            Ok(())
        }
        "search-airports" => {
            if args.is_empty() {
                return Err(usage(command, "<TEXT>"));
            }
            let airports = load_airports(config, logger)?;
            let matches = airports.search_by_name(&args.join(" "));
            if matches.is_empty() {
                println!("No airports match '{}'.", args.join(" "));
            }
            for airport in matches {
                print_airport_line(airport);
            }
            Ok(())
        }
        "add-airport" => {
            expect_args(command, args, 6, "<ICAO> <NAME> <LAT> <LON> <FREQ> <FUEL>")?;
            let mut airports = load_airports(config, logger)?;
            let airport = Airport::new(
                args[1].clone(),
                args[0].trim().to_uppercase(),
                parse_number(&args[2], "latitude")?,
                parse_number(&args[3], "longitude")?,
                parse_number(&args[4], "frequency")?,
                args[5].parse::<FuelAvailability>()?,
            );
            let added = airport.to_string();
            airports.add(airport);
            airports.save()?;
            let _ = logger.info(&format!("added airport {}", added), Color::Green);
            Ok(())
        }
        "remove-airport" => {
            expect_args(command, args, 1, "<ICAO>")?;
            let mut airports = load_airports(config, logger)?;
            let removed = airports.remove(&args[0])?;
            airports.save()?;
            let _ = logger.info(
                &format!("removed {} airport(s) with ICAO {}", removed, args[0]),
                Color::Green,
            );
            Ok(())
        }
        "modify-airport" => {
            expect_args(command, args, 3, "<ICAO> <FIELD> <VALUE>")?;
            let mut airports = load_airports(config, logger)?;
            airports.modify_field(&args[0], &args[1], &args[2])?;
            airports.save()?;
            let _ = logger.info(
                &format!("set {} of airport {} to {}", args[1], args[0], args[2]),
                Color::Green,
            );
            Ok(())
        }
        "add-aircraft" => {
            expect_args(
                command,
                args,
                6,
                "<MODEL> <CATEGORY> <FUEL> <BURN> <CAPACITY> <AIRSPEED>",
            )?;
            let mut aircraft = load_aircraft(config, logger)?;
            let entry = Aircraft::new(
                args[0].trim().to_string(),
                args[1].parse::<AircraftCategory>()?,
                args[2].parse::<FuelType>()?,
                parse_number(&args[3], "fuel burn rate")?,
                parse_number(&args[4], "fuel capacity")?,
                parse_number(&args[5], "airspeed")?,
            );
            entry.check_performance()?;
            let added = entry.to_string();
            aircraft.add(entry);
            aircraft.save()?;
            let _ = logger.info(&format!("added aircraft {}", added), Color::Green);
            Ok(())
        }
        "modify-aircraft" => {
            expect_args(command, args, 3, "<MODEL> <FIELD> <VALUE>")?;
            let mut aircraft = load_aircraft(config, logger)?;
            aircraft.modify_field(&args[0], &args[1], &args[2])?;
            aircraft.save()?;
            let _ = logger.info(
                &format!("set {} of aircraft {} to {}", args[1], args[0], args[2]),
                Color::Green,
            );
            Ok(())
        }
        "remove-aircraft" => {
            expect_args(command, args, 1, "<MODEL>")?;
            let mut aircraft = load_aircraft(config, logger)?;
            let removed = aircraft.remove(&args[0])?;
            aircraft.save()?;
            let _ = logger.info(
                &format!("removed {} aircraft named {}", removed, args[0]),
                Color::Green,
            );
            Ok(())
        }
        other => {
            print_help();
            Err(PlannerError::InvalidInput(format!(
                "unknown command '{}'",
                other
            )))
        }
    }
}

fn plan(
    airports: &AirportRegistry,
    aircraft: &AircraftRegistry,
    start_icao: &str,
    destination_icao: &str,
    aircraft_model: &str,
    logger: &Logger,
) -> Result<(), PlannerError> {
    let start = airports
        .find(start_icao)
        .ok_or_else(|| PlannerError::AirportNotFound(start_icao.to_string()))?;
    let destination = airports
        .find(destination_icao)
        .ok_or_else(|| PlannerError::AirportNotFound(destination_icao.to_string()))?;
    let plane = aircraft
        .find(aircraft_model)
        .ok_or_else(|| PlannerError::AircraftNotFound(aircraft_model.to_string()))?;

    let flight = plan_flight(
        Some(start),
        Some(destination),
        Some(plane),
        Some(airports.airports()),
    )?;

    println!("{}", flight);

    if let Some(stuck) = flight.unreachable_from() {
        let _ = logger.warn(&format!(
            "{} -> {} with {} is incomplete: no refuel stop in range of {}",
            start.icao, destination.icao, plane.make_model, stuck
        ));
    } else {
        let _ = logger.info(
            &format!(
                "planned {} -> {} with {} ({} refuel stops)",
                start.icao,
                destination.icao,
                plane.make_model,
                flight.refuel_stops().len()
            ),
            Color::Blue,
        );
    }
    Ok(())
}

fn batch(
    airports: &AirportRegistry,
    aircraft: &AircraftRegistry,
    requests: &[FlightRequest],
    workers: usize,
    logger: &Logger,
) {
    let snapshot = PlanningSnapshot::new(airports, aircraft);
    let pool = ThreadPool::new(workers);

    let _ = logger.debug(&format!(
        "planning {} legs on {} workers",
        requests.len(),
        workers
    ));

    let results = plan_batch(&pool, &snapshot, requests);

    for (request, result) in requests.iter().zip(results) {
        println!("=== {} ===", request);
        match result {
            Ok(flight) => {
                println!("{}\n", flight);
                if !flight.is_complete() {
                    let _ = logger.warn(&format!("{} is incomplete", request));
                }
            }
            Err(e) => {
                println!("{}\n", e);
                let _ = logger.warn(&format!("{} failed: {}", request, e));
            }
        }
    }
}

fn load_airports(config: &PlannerConfig, logger: &Logger) -> Result<AirportRegistry, PlannerError> {
    let (registry, report) = AirportRegistry::load(&config.airports_file)?;
    log_report(logger, "airports", &config.airports_file.display().to_string(), &report);
    Ok(registry)
}

fn load_aircraft(
    config: &PlannerConfig,
    logger: &Logger,
) -> Result<AircraftRegistry, PlannerError> {
    let (registry, report) = AircraftRegistry::load(&config.aircraft_file)?;
    log_report(logger, "aircraft", &config.aircraft_file.display().to_string(), &report);
    Ok(registry)
}

fn log_report(logger: &Logger, what: &str, path: &str, report: &LoadReport) {
    if report.missing_file {
        let _ = logger.warn(&format!("{}: {} not found, starting empty", what, path));
        return;
    }
    let _ = logger.debug(&format!("{} from {}: {}", what, path, report));
    for row in &report.skipped {
        let _ = logger.warn(&format!(
            "{}: skipped line {} of {}: {}",
            what, row.line, path, row.reason
        ));
    }
}

fn expect_args(
    command: &str,
    args: &[String],
    count: usize,
    shape: &str,
) -> Result<(), PlannerError> {
    if args.len() != count {
        return Err(usage(command, shape));
    }
    Ok(())
}

fn usage(command: &str, shape: &str) -> PlannerError {
    PlannerError::InvalidInput(format!("Usage: rustic-flight-planner {} {}", command, shape))
}

fn parse_number(raw: &str, what: &str) -> Result<f64, PlannerError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PlannerError::InvalidInput(format!("invalid {}: '{}'", what, raw)))
}

fn print_airport_line(airport: &Airport) {
    println!(
        "{:<6} {:<40} {:>9.4} {:>10.4}  {}",
        airport.icao, airport.name, airport.latitude, airport.longitude, airport.fuel_types
    );
}

fn print_airport_details(airport: &Airport) {
    println!("{}", airport);
    println!("  City: {} ({})", airport.city, airport.region_abbr);
    println!("  IATA: {}", airport.iata_code);
    println!(
        "  Position: {:.4}, {:.4} at {} ft",
        airport.latitude, airport.longitude, airport.elevation_ft
    );
    println!("  Frequency: {}", airport.radio_frequency);
    println!("  Fuel: {}", airport.fuel_types);
}

fn print_help() {
    println!("Available commands:");
    println!("  plan <START_ICAO> <DEST_ICAO> <AIRCRAFT_MODEL>");
    println!("    Plans a flight and prints distance, time, fuel, heading and refuel stops.");
    println!("  plan-batch <AIRCRAFT_MODEL> <START:DEST>...");
    println!("    Plans several legs in parallel with the same aircraft.");
    println!("  list-airports");
    println!("    Shows every airport in the database.");
    println!("  list-aircraft");
    println!("    Shows every aircraft with its maximum range.");
    println!("  show-airport <ICAO>");
    println!("    Shows the details of one airport.");
    println!("  search-airports <TEXT>");
    println!("    Finds airports whose name contains the text.");
    println!("  add-airport <ICAO> <NAME> <LAT> <LON> <FREQ> <FUEL>");
    println!("    Adds an airport. FUEL is 1 (AVGAS), 2 (Jet A) or 3 (both).");
    println!("  modify-airport <ICAO> <FIELD> <VALUE>");
    println!("    Changes one field: name, icao, latitude, longitude, elevation, frequency,");
    println!("    state, region, city, iata or fuel.");
    println!("  remove-airport <ICAO>");
    println!("    Removes every airport with that ICAO code.");
    println!("  add-aircraft <MODEL> <CATEGORY> <FUEL> <BURN> <CAPACITY> <AIRSPEED>");
    println!("    Adds an aircraft. CATEGORY is Jet, Prop or TurboProp.");
    println!("  modify-aircraft <MODEL> <FIELD> <VALUE>");
    println!("    Changes one field: model, category, fuel, burn, capacity or airspeed.");
    println!("  remove-aircraft <MODEL>");
    println!("    Removes an aircraft.");
    println!("  help");
    println!("    Shows this message.");
    println!();
    println!("Environment: PLANNER_AIRPORTS_FILE, PLANNER_AIRCRAFT_FILE, PLANNER_LOG_DIR,");
    println!("             PLANNER_LOG_LEVEL, PLANNER_WORKERS");
}
