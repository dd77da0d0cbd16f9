use std::process::ExitCode;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_query::domain::{DayNameStyle, GeoPoint, ScheduleError, TimeError, TimeOfDay};
use transit_query::query::{QueryConfig, Timetable};
use transit_query::store::{CacheConfig, CachedSchedule, Snapshot, StoreError};

const USAGE: &str = "\
usage: transit-query <command> [args]

commands:
  current-trip <route_id> [time]      trip running on a route
  siblings <trip_id> [route_id]       trips before and after a trip
  next-stop <trip_id> [time]          next stop of a trip
  next-stop-route <route_id> [time]   next stop of any trip on a route
  first-last <trip_id>                first and last stop of a trip
  nearest <lat> <lng> [radius|any]    nearest stop to a coordinate
  days <service_id>                   days a service runs
  stop <stop_id>                      a stop as GeoJSON
  shape <shape_id>                    a shape as GeoJSON

times are HH:MM:SS and default to now

environment:
  SCHEDULE_PATH     schedule snapshot (JSON), required
  STOP_RADIUS       default nearest-stop radius in degrees
  DAY_NAME_STYLE    normal, short or min
  RUST_LOG          log filter";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Query(#[from] ScheduleError),

    #[error("invalid time: {0}")]
    Time(#[from] TimeError),

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, CliError::Usage(_)) {
                eprintln!();
                eprintln!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}

fn config_from_env() -> Result<QueryConfig, CliError> {
    let max_stop_distance = match std::env::var("STOP_RADIUS") {
        Ok(radius) => Some(parse_number(&radius, "STOP_RADIUS")?),
        Err(_) => None,
    };
    let day_name_style = match std::env::var("DAY_NAME_STYLE") {
        Ok(style) => style.parse::<DayNameStyle>()?,
        Err(_) => DayNameStyle::default(),
    };
    Ok(QueryConfig::new(max_stop_distance, day_name_style))
}

fn parse_number(s: &str, what: &str) -> Result<f64, CliError> {
    s.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CliError::Usage(format!("{what} must be a finite number, got {s:?}")))
}

fn parse_time(arg: Option<&String>) -> Result<Option<TimeOfDay>, CliError> {
    Ok(arg.map(|s| TimeOfDay::parse(s)).transpose()?)
}

fn to_json(value: &impl Serialize) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn run(args: &[String]) -> Result<String, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(CliError::Usage("missing command".to_string()));
    };
    let required = |i: usize, name: &str| {
        rest.get(i)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("{command}: missing <{name}>")))
    };

    let path = std::env::var("SCHEDULE_PATH")
        .map_err(|_| CliError::Usage("SCHEDULE_PATH is not set".to_string()))?;
    let config = config_from_env()?;

    let stores = Snapshot::load(&path).await?.into_stores();
    let schedule = CachedSchedule::new(stores, &CacheConfig::default());
    let timetable = Timetable::new(&schedule, &config);
    info!(path = %path, command = %command, "Loaded schedule");

    match command.as_str() {
        "current-trip" => {
            let now = parse_time(rest.get(1))?;
            to_json(&timetable.current_trip(required(0, "route_id")?, now).await?)
        }
        "siblings" => {
            let route_id = rest.get(1).map(String::as_str);
            to_json(&timetable.siblings(required(0, "trip_id")?, route_id).await?)
        }
        "next-stop" => {
            let now = parse_time(rest.get(1))?;
            to_json(&timetable.next_stop_of_trip(required(0, "trip_id")?, now).await?)
        }
        "next-stop-route" => {
            let now = parse_time(rest.get(1))?;
            to_json(&timetable.next_stop_of_route(required(0, "route_id")?, now).await?)
        }
        "first-last" => to_json(&timetable.first_and_last_stop(required(0, "trip_id")?).await?),
        "nearest" => {
            let lat = parse_number(required(0, "lat")?, "lat")?;
            let lng = parse_number(required(1, "lng")?, "lng")?;
            let point = GeoPoint::new(lat, lng);
            let stop = match rest.get(2).map(String::as_str) {
                Some("any") => timetable.nearest_stop_unbounded(point).await?,
                Some(r) => {
                    let radius = parse_number(r, "radius")?;
                    timetable.nearest_stop(point, Some(radius)).await?
                }
                None => timetable.nearest_stop(point, None).await?,
            };
            to_json(&stop)
        }
        "days" => {
            let service_id = required(0, "service_id")?;
            let days = timetable.service_days(service_id).await?;
            to_json(&serde_json::json!({
                "service_id": service_id,
                "days": days.iter().map(|d| config.day_name_style.name(d)).collect::<Vec<_>>(),
                "label": days.format(config.day_name_style)?,
            }))
        }
        "stop" => to_json(&timetable.stop_feature(required(0, "stop_id")?).await?),
        "shape" => to_json(&timetable.shape_feature(required(0, "shape_id")?).await?),
        other => Err(CliError::Usage(format!("unknown command: {other}"))),
    }
}
