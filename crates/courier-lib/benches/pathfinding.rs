use criterion::{criterion_group, criterion_main, Criterion};
use courier_lib::{
    dispatch_all, shortest_distances, shortest_path, DeliveryTier, DispatchOptions,
    DispatchQueue, Location, LocationCatalog, LocationId, NetworkConfig, RouteGraph,
};
use std::hint::black_box;

/// Square grid of `side * side` locations joined to their right and lower
/// neighbours.
fn grid_graph(side: usize) -> RouteGraph {
    let catalog: LocationCatalog = (0..side * side)
        .map(|index| Location {
            code: LocationId::new(format!("L{index}")),
            label: format!("Cell {index}"),
        })
        .collect();
    let mut graph = RouteGraph::new(catalog);

    for row in 0..side {
        for col in 0..side {
            let here = row * side + col;
            let weight = ((row * 7 + col * 13) % 50 + 1) as u32;
            if col + 1 < side {
                graph
                    .add_edge(format!("L{here}"), format!("L{}", here + 1), weight)
                    .expect("grid cell exists");
            }
            if row + 1 < side {
                graph
                    .add_edge(format!("L{here}"), format!("L{}", here + side), weight)
                    .expect("grid cell exists");
            }
        }
    }
    graph
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let (_, reference) = NetworkConfig::builtin().build().expect("builtin network");
    let grid = grid_graph(40);
    let colombo = LocationId::from("A");
    let corner = LocationId::from("L0");
    let far_corner = LocationId::new(format!("L{}", 40 * 40 - 1));

    c.bench_function("dijkstra_reference_from_colombo", |b| {
        b.iter(|| black_box(shortest_distances(&reference, &colombo).len()));
    });

    c.bench_function("dijkstra_grid_40x40", |b| {
        b.iter(|| black_box(shortest_distances(&grid, &corner).len()));
    });

    c.bench_function("shortest_path_grid_corner_to_corner", |b| {
        b.iter(|| black_box(shortest_path(&grid, &corner, &far_corner).map(|p| p.distance)));
    });

    c.bench_function("dispatch_pass_reference_32_orders", |b| {
        let codes: Vec<LocationId> = reference.catalog().codes().cloned().collect();
        b.iter(|| {
            let mut queue = DispatchQueue::with_available(codes.iter().cloned());
            for (index, code) in codes.iter().cycle().take(32).enumerate() {
                let tier = DeliveryTier::from(index % 3 == 0);
                queue
                    .enqueue(format!("order-{index}"), tier, code.clone())
                    .expect("available");
            }
            let plan = dispatch_all(&mut queue, &reference, &DispatchOptions::from_start("A"));
            black_box(plan.total_distance())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
