use milkrun_core::{
    matrix::TravelCostMatrix,
    problem::{DEPOT, DeliveryProblem, NodeIdx},
};

/// Savings value for joining the routes of customers `i` and `j`
/// (Clarke & Wright 1964): `s(i, j) = d(0, i) + d(0, j) - d(i, j)`.
struct Saving {
    i: NodeIdx,
    j: NodeIdx,
    value: f64,
}

/// Clarke-Wright savings construction. Starts with one depot round trip per
/// customer and merges route endpoints in decreasing savings order while the
/// combined load fits `capacity`. Returns customer sequences (no depot
/// nodes), one per remaining route.
pub(crate) fn construct(
    problem: &DeliveryProblem,
    matrix: &TravelCostMatrix,
    capacity: u32,
) -> Vec<Vec<NodeIdx>> {
    let customers: Vec<NodeIdx> = problem.customer_nodes().collect();
    if customers.is_empty() {
        return Vec::new();
    }

    let mut savings = Vec::with_capacity(customers.len() * (customers.len() - 1) / 2);
    for (index, &i) in customers.iter().enumerate() {
        for &j in &customers[index + 1..] {
            let value =
                matrix.distance(DEPOT, i) + matrix.distance(DEPOT, j) - matrix.distance(i, j);
            savings.push(Saving { i, j, value });
        }
    }

    savings.sort_by(|a, b| b.value.total_cmp(&a.value));

    // Each customer starts in its own route; routes are keyed by the node
    // identity of their initial member.
    let num_nodes = problem.num_locations();
    let mut route_of: Vec<usize> = (0..num_nodes).collect();
    let mut route_load: Vec<u64> = vec![0; num_nodes];
    let mut route_members: Vec<Vec<NodeIdx>> = vec![Vec::new(); num_nodes];

    for &node in &customers {
        route_load[node.get()] = problem.demand(node) as u64;
        route_members[node.get()].push(node);
    }

    for saving in &savings {
        let ri = route_of[saving.i.get()];
        let rj = route_of[saving.j.get()];

        if ri == rj {
            continue;
        }

        let combined_load = route_load[ri] + route_load[rj];
        if combined_load > capacity as u64 {
            continue;
        }

        // Only endpoint-to-endpoint merges keep both partial orders intact.
        let i_at_end = route_members[ri].last() == Some(&saving.i);
        let i_at_start = route_members[ri].first() == Some(&saving.i);
        let j_at_end = route_members[rj].last() == Some(&saving.j);
        let j_at_start = route_members[rj].first() == Some(&saving.j);

        let (merge_from, merge_into, reverse_from, reverse_into) = if i_at_end && j_at_start {
            (rj, ri, false, false)
        } else if j_at_end && i_at_start {
            (ri, rj, false, false)
        } else if i_at_end && j_at_end {
            (rj, ri, true, false)
        } else if i_at_start && j_at_start {
            (rj, ri, false, true)
        } else {
            continue;
        };

        let mut from_members = std::mem::take(&mut route_members[merge_from]);
        if reverse_from {
            from_members.reverse();
        }

        if reverse_into {
            route_members[merge_into].reverse();
        }

        route_members[merge_into].append(&mut from_members);
        route_load[merge_into] = combined_load;
        route_load[merge_from] = 0;

        for &member in &route_members[merge_into] {
            route_of[member.get()] = merge_into;
        }
    }

    route_members
        .into_iter()
        .filter(|members| !members.is_empty())
        .collect()
}
