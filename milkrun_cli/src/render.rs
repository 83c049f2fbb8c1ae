use comfy_table::{Cell, Table, presets::UTF8_FULL};

use milkrun_core::{
    dispatch::{DispatchOutcome, SingleTripReport},
    problem::DeliveryProblem,
};

fn km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

pub fn print_single_trip(problem: &DeliveryProblem, report: &SingleTripReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Vehicle", "Stops", "Load", "Distance"]);

    for vehicle in &report.vehicles {
        let stops: Vec<String> = vehicle
            .stops
            .iter()
            .map(|&node| problem.customer_label(node))
            .collect();

        table.add_row(vec![
            Cell::new(problem.fleet().vehicle(vehicle.vehicle).external_id()),
            Cell::new(if stops.is_empty() {
                "(idle)".to_string()
            } else {
                stops.join(" -> ")
            }),
            Cell::new(vehicle.load),
            Cell::new(km(vehicle.distance)),
        ]);
    }

    println!("\nSingle-trip visiting order:");
    println!("{table}");
    println!(
        "Total: {} over {} demand units\n",
        km(report.total_distance),
        report.total_load
    );
}

pub fn print_rounds(problem: &DeliveryProblem, outcome: &DispatchOutcome) {
    for round in &outcome.rounds {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Vehicle", "Stop", "Customer", "City", "Order Value", "Load"]);

        for trip in &round.trips {
            let capacity = problem.fleet().vehicle(trip.vehicle).capacity();
            let vehicle_id = problem.fleet().vehicle(trip.vehicle).external_id();

            for (position, stop) in trip.stops.iter().enumerate() {
                let customer = problem.customer(stop.node);
                let city = customer.and_then(|c| c.city()).unwrap_or("N/A");
                let order_value = customer.and_then(|c| c.order_value()).unwrap_or("N/A");

                table.add_row(vec![
                    Cell::new(vehicle_id),
                    Cell::new(position + 1),
                    Cell::new(problem.customer_label(stop.node)),
                    Cell::new(city),
                    Cell::new(order_value),
                    Cell::new(format!("{}/{capacity}", stop.load_after)),
                ]);
            }
        }

        println!(
            "Round {} ({} served, {}):",
            round.round,
            round.served.len(),
            km(round.distance)
        );
        println!("{table}\n");
    }
}

pub fn print_summary(problem: &DeliveryProblem, outcome: &DispatchOutcome) {
    let summary = &outcome.summary;

    println!(
        "Served {} of {} customers in {} round(s).",
        summary.served_count, summary.total_customers, summary.rounds_used
    );

    if outcome.stalled {
        println!("Dispatch stalled before full coverage.");
    }

    if !summary.unserved.is_empty() {
        println!("Unserved customers:");
        for customer in &summary.unserved {
            println!(
                "  - {}: {}",
                problem.customer_label(customer.node),
                customer.reason
            );
        }
    }
}
