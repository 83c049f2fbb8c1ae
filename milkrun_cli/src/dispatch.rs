use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::info;

use milkrun_core::{
    config::{DispatchConfig, ServiceArea},
    dispatch::{DispatchScheduler, SingleTripReport},
    location::Location,
    matrix::TravelCostMatrix,
    problem::ProblemBuilder,
};
use milkrun_matrix_providers::{
    travel_matrix_client::TravelMatrixClient, travel_matrix_provider::TravelMatrixProvider,
};
use milkrun_optimizer::{
    greedy_solver::GreedySolver,
    route_optimizer::RouteOptimizer,
    solver_params::{FirstSolutionStrategy, LocalSearchStrategy, SolverParams},
};

use crate::{orders, orders::OrderColumns, parsers, render};

#[derive(Clone, Copy, ValueEnum)]
pub enum FirstSolution {
    Savings,
    NearestNeighbor,
}

impl From<FirstSolution> for FirstSolutionStrategy {
    fn from(value: FirstSolution) -> Self {
        match value {
            FirstSolution::Savings => FirstSolutionStrategy::Savings,
            FirstSolution::NearestNeighbor => FirstSolutionStrategy::NearestNeighbor,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LocalSearch {
    None,
    TwoOpt,
}

impl From<LocalSearch> for LocalSearchStrategy {
    fn from(value: LocalSearch) -> Self {
        match value {
            LocalSearch::None => LocalSearchStrategy::None,
            LocalSearch::TwoOpt => LocalSearchStrategy::TwoOpt,
        }
    }
}

#[derive(Args)]
pub struct DispatchArgs {
    /// Order list CSV
    #[arg(short, long)]
    orders: PathBuf,

    /// Number of vehicles in the fleet
    #[arg(long, default_value_t = 5)]
    vehicles: usize,

    /// Capacity of each vehicle, in demand units
    #[arg(long, default_value_t = 50)]
    capacity: u32,

    /// Demand units delivered per customer
    #[arg(long, default_value_t = 3)]
    demand: u32,

    #[arg(long, default_value_t = 77.5946)]
    depot_lon: f64,

    #[arg(long, default_value_t = 12.9716)]
    depot_lat: f64,

    /// Service-area bounding box
    #[arg(long, default_value_t = 12.5)]
    min_lat: f64,

    #[arg(long, default_value_t = 13.5)]
    max_lat: f64,

    #[arg(long, default_value_t = 77.0)]
    min_lon: f64,

    #[arg(long, default_value_t = 78.0)]
    max_lon: f64,

    /// Base URL of an OSRM instance; falls back to the OSRM_URL environment
    /// variable, then to straight-line distances
    #[arg(long)]
    osrm_url: Option<String>,

    /// Assumed speed for the straight-line fallback provider
    #[arg(long, default_value_t = 30.0)]
    crow_flies_kmh: f64,

    /// Time budget for the route optimizer (e.g. "30s", "2m")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "10s")]
    timeout: jiff::SignedDuration,

    #[arg(long, value_enum, default_value_t = FirstSolution::Savings)]
    first_solution: FirstSolution,

    #[arg(long, value_enum, default_value_t = LocalSearch::TwoOpt)]
    local_search: LocalSearch,

    /// Column-name overrides for the order list
    #[arg(long, default_value = "Latitude")]
    lat_column: String,

    #[arg(long, default_value = "Longitude")]
    lon_column: String,

    #[arg(long, default_value = "Customer Name")]
    name_column: String,

    #[arg(long, default_value = "City")]
    city_column: String,

    #[arg(long, default_value = "Order Value")]
    value_column: String,

    /// Emit the outcome as JSON instead of tables
    #[arg(long)]
    json: bool,
}

pub async fn run(args: DispatchArgs) -> anyhow::Result<()> {
    let columns = OrderColumns {
        latitude: args.lat_column.clone(),
        longitude: args.lon_column.clone(),
        customer_name: args.name_column.clone(),
        city: args.city_column.clone(),
        order_value: args.value_column.clone(),
    };

    let records = orders::read_orders(&args.orders, &columns)?;

    let config = DispatchConfig {
        num_vehicles: args.vehicles,
        vehicle_capacity: args.capacity,
        demand_per_customer: args.demand,
        depot: Location::from_lon_lat(args.depot_lon, args.depot_lat),
        service_area: ServiceArea {
            min_lat: args.min_lat,
            max_lat: args.max_lat,
            min_lon: args.min_lon,
            max_lon: args.max_lon,
        },
    };

    let built = ProblemBuilder::new(config)?.build(records)?;
    let problem = built.problem;

    info!(
        customers = problem.num_customers(),
        excluded = built.excluded.len(),
        vehicles = args.vehicles,
        capacity = args.capacity,
        "Built problem instance"
    );

    let provider = match args
        .osrm_url
        .clone()
        .or_else(|| std::env::var("OSRM_URL").ok())
    {
        Some(url) => TravelMatrixProvider::Osrm { url },
        None => TravelMatrixProvider::AsTheCrowFlies {
            speed_kmh: args.crow_flies_kmh,
        },
    };

    let matrices = TravelMatrixClient::new()
        .fetch_matrix(problem.locations(), &provider)
        .await
        .context("fetching travel matrix")?;

    let matrix = TravelCostMatrix::from_flat(matrices.distances, problem.num_locations())
        .context("building travel cost matrix")?;

    let params = SolverParams {
        first_solution: args.first_solution.into(),
        local_search: args.local_search.into(),
        time_limit: args.timeout,
    };

    let solution = GreedySolver::new()
        .solve(&problem, &matrix, &params)
        .context("single-trip solve failed")?;

    let single_trip = SingleTripReport::new(&problem, &matrix, &solution.routes);
    let outcome = DispatchScheduler::new(&problem, &matrix, &solution.routes)?.run();

    if args.json {
        let output = serde_json::json!({
            "single_trip": single_trip,
            "rounds": outcome.rounds,
            "summary": outcome.summary,
            "stalled": outcome.stalled,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        render::print_single_trip(&problem, &single_trip);
        render::print_rounds(&problem, &outcome);
        render::print_summary(&problem, &outcome);
    }

    Ok(())
}
