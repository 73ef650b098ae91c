//! End-to-end scenarios through the service boundary.

use rand::seq::SliceRandom;
use rand::Rng;

use u_tsp::aco::AcoConfig;
use u_tsp::distance::DistanceMatrix;
use u_tsp::local_search::{LinKernighanConfig, LinKernighanOptimizer, Tour};
use u_tsp::models::{GeoNode, SolverResult};
use u_tsp::random::create_rng;
use u_tsp::service::{
    run_ant_colony, run_branch_and_bound, run_lin_kernighan, solve, solve_json, AlgorithmRequest,
    Engine, SolverConfig,
};
use u_tsp::{CancelToken, SolveError};

/// Hull slot `k` of each input position.
const PENTAGON_SLOTS: [usize; 5] = [0, 2, 4, 1, 3];

/// Regular pentagon of radius one degree, listed out of hull order.
fn pentagon() -> Vec<GeoNode> {
    PENTAGON_SLOTS
        .iter()
        .enumerate()
        .map(|(i, &k)| {
            let angle = (90.0 + 72.0 * k as f64).to_radians();
            GeoNode::new(i as i64 + 1, angle.cos(), angle.sin())
        })
        .collect()
}

fn random_nodes(n: usize, seed: u64) -> Vec<GeoNode> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|i| GeoNode::new(i as i64 + 1, rng.random_range(49.0..55.0), rng.random_range(14.0..24.0)))
        .collect()
}

fn quick_config(seed: u64) -> SolverConfig {
    SolverConfig {
        aco: AcoConfig::default().with_iterations(60).with_num_ants(20).with_seed(seed),
        lin_kernighan: LinKernighanConfig::default().with_restarts(10).with_seed(seed),
    }
}

fn assert_labels(result: &SolverResult, n: usize) {
    let mut labels = result.best_path_indexes().to_vec();
    labels.sort_unstable();
    assert_eq!(labels, (1..=n as i64).collect::<Vec<_>>());
    assert!(result.distance().is_finite());
}

#[test]
fn pentagon_exact_tour_follows_the_hull() {
    let nodes = pentagon();
    let result = run_branch_and_bound(&nodes, &CancelToken::new()).unwrap();
    assert_labels(&result, 5);

    let slots: Vec<usize> = result
        .best_path_indexes()
        .iter()
        .map(|&p| PENTAGON_SLOTS[p as usize - 1])
        .collect();
    for i in 0..5 {
        let step = (slots[(i + 1) % 5] + 5 - slots[i]) % 5;
        assert!(step == 1 || step == 4, "not hull order: {slots:?}");
    }
    assert!((result.distance() - 653.530070185873).abs() < 1e-6);
}

#[test]
fn pentagon_lin_kernighan_converges_from_shuffles() {
    let nodes = pentagon();
    let dm = DistanceMatrix::from_nodes(&nodes);
    let optimum = run_branch_and_bound(&nodes, &CancelToken::new()).unwrap().distance();
    let cancel = CancelToken::new();
    let mut rng = create_rng(2024);

    for _ in 0..50 {
        let mut order: Vec<usize> = (0..5).collect();
        order.shuffle(&mut rng);
        let mut lk = LinKernighanOptimizer::new(&dm, Tour::new(order, &dm), &cancel);
        lk.optimize().unwrap();
        assert!((lk.tour().cost() - optimum).abs() < 1e-6);
    }
}

#[test]
fn coincident_nodes_solve_on_every_engine() {
    let nodes = vec![
        GeoNode::new(1, 52.0, 21.0),
        GeoNode::new(2, 52.0, 21.0),
        GeoNode::new(3, 50.0, 20.0),
        GeoNode::new(4, 50.0, 20.0),
        GeoNode::new(5, 51.0, 17.0),
    ];
    let request = AlgorithmRequest::new(nodes);
    let cancel = CancelToken::new();
    let exact = solve(Engine::BranchAndBound, &request, &SolverConfig::default(), &cancel).unwrap();

    for engine in Engine::ALL {
        let result = solve(engine, &request, &quick_config(7), &cancel).unwrap();
        assert_labels(&result, 5);
        assert!(result.distance() >= exact.distance() - 1e-9);
    }
}

#[test]
fn all_nodes_coincident() {
    let nodes: Vec<GeoNode> = (1..=4).map(|id| GeoNode::new(id, 45.0, 9.0)).collect();
    let cancel = CancelToken::new();
    let config = quick_config(3);

    for result in [
        run_branch_and_bound(&nodes, &cancel).unwrap(),
        run_ant_colony(&nodes, &config.aco, &cancel).unwrap(),
        run_lin_kernighan(&nodes, &config.lin_kernighan, &cancel).unwrap(),
    ] {
        assert_labels(&result, 4);
        assert_eq!(result.distance(), 0.0);
    }
}

#[test]
fn ant_colony_beats_random_tours() {
    let cancel = CancelToken::new();
    let mut colony_total = 0.0;
    let mut random_total = 0.0;

    for seed in 0..5 {
        let nodes = random_nodes(20, seed);
        let dm = DistanceMatrix::from_nodes(&nodes);
        let result = run_ant_colony(&nodes, &quick_config(seed).aco, &cancel).unwrap();
        assert_labels(&result, 20);
        colony_total += result.distance();

        let mut rng = create_rng(seed + 1000);
        let mut order: Vec<usize> = (0..20).collect();
        let samples = 100;
        for _ in 0..samples {
            order.shuffle(&mut rng);
            random_total += dm.tour_length(&order) / samples as f64;
        }
    }

    assert!(colony_total <= random_total);
}

#[test]
fn heuristics_stay_close_to_exact() {
    let cancel = CancelToken::new();
    for seed in 0..3 {
        let nodes = random_nodes(9, seed);
        let exact = run_branch_and_bound(&nodes, &cancel).unwrap().distance();
        let config = quick_config(seed);
        let lk = run_lin_kernighan(&nodes, &config.lin_kernighan, &cancel).unwrap();
        let aco = run_ant_colony(&nodes, &config.aco, &cancel).unwrap();
        assert!(lk.distance() >= exact - 1e-9);
        assert!(aco.distance() >= exact - 1e-9);
        assert!(lk.distance() <= exact * 1.1);
    }
}

#[test]
fn json_boundary_for_every_engine() {
    let request = serde_json::json!({
        "nodes": [
            {"nodeIndex": 1, "lat": 52.2297, "lng": 21.0122},
            {"nodeIndex": 2, "lat": 50.0647, "lng": 19.9450},
            {"nodeIndex": 3, "lat": 51.1079, "lng": 17.0385},
            {"nodeIndex": 4, "lat": 54.3520, "lng": 18.6466}
        ]
    })
    .to_string();

    for engine in Engine::ALL {
        let response = solve_json(engine, &request, &quick_config(1)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["bestPathIndexes"].as_array().map(Vec::len), Some(4));
        assert!(value["distance"].as_f64().is_some_and(|d| d > 0.0));
        assert!(value["time"].is_string());
    }
}

#[test]
fn json_boundary_rejects_bad_requests() {
    let config = SolverConfig::default();
    let one_node = r#"{"nodes": [{"nodeIndex": 1, "lat": 0.0, "lng": 0.0}]}"#;
    assert!(matches!(
        solve_json(Engine::AntColony, one_node, &config),
        Err(SolveError::InvalidInput(_))
    ));
    assert!(matches!(
        solve_json(Engine::AntColony, "[1, 2", &config),
        Err(SolveError::Json(_))
    ));
}

#[test]
fn deadline_in_the_past_cancels() {
    let nodes = random_nodes(12, 9);
    let cancel = CancelToken::new().with_timeout(std::time::Duration::ZERO);
    assert!(matches!(
        run_branch_and_bound(&nodes, &cancel),
        Err(SolveError::Cancelled)
    ));
}
