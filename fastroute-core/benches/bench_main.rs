use criterion::{Criterion, criterion_group, criterion_main};
use fastroute_core::prelude::*;

const SIDE: i32 = 30;

/// Square grid with right and down edges; every fifth node is a highway
fn grid() -> Graph {
    let mut graph = Graph::new();
    for id in 0..SIDE * SIDE {
        let road = if id % 5 == 0 {
            RoadType::Highway
        } else {
            RoadType::RegularRoad
        };
        graph.add_node(Node::new(id, road));
    }
    for row in 0..SIDE {
        for col in 0..SIDE {
            let id = row * SIDE + col;
            if col + 1 < SIDE {
                graph.add_edge(id, id + 1, 1.0 + f64::from((id * 7) % 5));
            }
            if row + 1 < SIDE {
                graph.add_edge(id, id + SIDE, 1.0 + f64::from((id * 3) % 4));
            }
        }
    }
    graph
}

fn planners_benchmark(c: &mut Criterion) {
    let graph = grid();
    let vehicle = Vehicle::new("Standard Vehicle", 1000.0, false, 1e6, 1e6, 0.1, 0.0, false);
    let context = SearchContext::new(&graph, 0, SIDE * SIDE - 1, vehicle).unwrap();

    let mut group = c.benchmark_group("planners");
    group.sample_size(20);

    for kind in [
        RouteAlgorithm::Dijkstra,
        RouteAlgorithm::AStar,
        RouteAlgorithm::BellmanFord,
        RouteAlgorithm::ShortestTimeFirst,
    ] {
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| {
                let optimizer =
                    RouteOptimizer::for_algorithm(kind, context.clone(), PlannerOptions::default())
                        .unwrap();
                optimizer.optimize_route()
            });
        });
    }

    group.bench_function("floyd-warshall all pairs", |b| {
        b.iter(|| FloydWarshall::new(&graph));
    });

    group.finish();
}

criterion_group!(benches, planners_benchmark);
criterion_main!(benches);
