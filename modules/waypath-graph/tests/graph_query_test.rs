//! End-to-end graph queries through the service facade: the three-city
//! routing scenario, connectivity before and after bridging edges, proximity
//! bounds, statistics, and tolerance of dangling edges after vertex
//! deletion.

use waypath_common::{Config, NewPathEdge, NewPathPoint, PathPoint, WaypathError};
use waypath_graph::PathGraphService;
use waypath_store::MemoryStore;

fn service() -> PathGraphService {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let store = MemoryStore::open();
    PathGraphService::with_store(&store, &Config::default())
}

async fn create_point(svc: &PathGraphService, lat: f64, lng: f64) -> PathPoint {
    svc.create_point(
        NewPathPoint {
            latitude: lat,
            longitude: lng,
        },
        Some("graph-test"),
    )
    .await
    .unwrap()
}

async fn create_edge(svc: &PathGraphService, a: &str, b: &str, weight: Option<f64>) {
    svc.create_edge(
        NewPathEdge {
            point_a_id: a.to_string(),
            point_b_id: b.to_string(),
            weight,
        },
        Some("graph-test"),
    )
    .await
    .unwrap();
}

/// New York, Los Angeles, Chicago.
async fn three_cities(svc: &PathGraphService) -> (PathPoint, PathPoint, PathPoint) {
    let a = create_point(svc, 40.7128, -74.0060).await;
    let b = create_point(svc, 34.0522, -118.2437).await;
    let c = create_point(svc, 41.8781, -87.6298).await;
    (a, b, c)
}

#[tokio::test]
async fn three_city_scenario_routes_over_the_explicit_edge() {
    let svc = service();
    let (a, b, c) = three_cities(&svc).await;

    // A-B auto-weighted from coordinates, A-C with an explicit weight.
    create_edge(&svc, &a.id, &b.id, None).await;
    create_edge(&svc, &a.id, &c.id, Some(1000.0)).await;

    let ab = svc.find_edge_between(&a.id, &b.id).await.unwrap().unwrap();
    assert!(ab.weight > 3_935_000.0 && ab.weight < 3_945_000.0);

    let route = svc.shortest_path(&a.id, &c.id).await.unwrap();
    assert!(route.found);
    assert_eq!(route.distance, 1000.0);
    assert_eq!(route.path, vec![a.id.clone(), c.id.clone()]);
    assert_eq!(route.path_with_coords.len(), 2);
    assert_eq!(route.path_with_coords[1].latitude, 41.8781);

    // B reaches C only through A.
    let bc = svc.shortest_path(&b.id, &c.id).await.unwrap();
    assert!(bc.found);
    assert_eq!(bc.path, vec![b.id.clone(), a.id.clone(), c.id.clone()]);
    assert_eq!(bc.distance, ab.weight + 1000.0);
}

#[tokio::test]
async fn components_merge_as_bridging_edges_arrive() {
    let svc = service();
    let (a, b, c) = three_cities(&svc).await;

    // No edges: every city is its own component.
    assert_eq!(svc.connected_components().await.unwrap().len(), 3);

    create_edge(&svc, &a.id, &b.id, None).await;
    let components = svc.connected_components().await.unwrap();
    assert_eq!(components.len(), 2);

    create_edge(&svc, &b.id, &c.id, None).await;
    let components = svc.connected_components().await.unwrap();
    assert_eq!(components.len(), 1);
    let mut ids = components[0].clone();
    ids.sort();
    let mut expected = vec![a.id.clone(), b.id.clone(), c.id.clone()];
    expected.sort();
    assert_eq!(ids, expected);

    assert!(svc.are_connected(&a.id, &c.id).await.unwrap());
}

#[tokio::test]
async fn shortest_path_start_equals_end() {
    let svc = service();
    let (a, _, _) = three_cities(&svc).await;

    let route = svc.shortest_path(&a.id, &a.id).await.unwrap();
    assert!(route.found);
    assert_eq!(route.distance, 0.0);
    assert_eq!(route.path, vec![a.id.clone()]);
}

#[tokio::test]
async fn no_route_is_a_result_not_an_error() {
    let svc = service();
    let (a, b, c) = three_cities(&svc).await;
    create_edge(&svc, &a.id, &b.id, None).await;

    let route = svc.shortest_path(&a.id, &c.id).await.unwrap();
    assert!(!route.found);
    assert!(route.distance.is_infinite());
    assert!(route.path.is_empty());

    assert!(!svc.are_connected(&a.id, &c.id).await.unwrap());

    // An endpoint missing from the graph, on the other hand, is an error.
    assert!(matches!(
        svc.shortest_path(&a.id, "ghost").await,
        Err(WaypathError::NotFound { .. })
    ));
}

#[tokio::test]
async fn within_distance_bounds_and_sorts() {
    let svc = service();
    let (a, b, c) = three_cities(&svc).await;
    create_edge(&svc, &a.id, &c.id, Some(1000.0)).await;
    create_edge(&svc, &c.id, &b.id, Some(500.0)).await;

    let nearby = svc.within_distance(&a.id, 0.0).await.unwrap();
    assert!(nearby.is_empty());

    let nearby = svc.within_distance(&a.id, 1200.0).await.unwrap();
    let ids: Vec<&str> = nearby.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![c.id.as_str()]);

    let nearby = svc.within_distance(&a.id, 2000.0).await.unwrap();
    let ids: Vec<&str> = nearby.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![c.id.as_str(), b.id.as_str()]);
    assert_eq!(nearby[0].distance, 1000.0);
    assert_eq!(nearby[1].distance, 1500.0);
}

#[tokio::test]
async fn statistics_over_the_live_graph() {
    let svc = service();
    let (a, b, c) = three_cities(&svc).await;
    create_edge(&svc, &a.id, &b.id, Some(100.0)).await;
    create_edge(&svc, &a.id, &c.id, Some(300.0)).await;

    let stats = svc.statistics().await.unwrap();
    assert_eq!(stats.vertex_count, 3);
    assert_eq!(stats.edge_count, 2);
    assert_eq!(stats.component_count, 1);
    assert!(stats.is_connected);
    assert_eq!(stats.max_degree, 2);
    assert_eq!(stats.min_degree, 1);
    assert_eq!(stats.avg_edge_weight, 200.0);
    assert_eq!(stats.min_edge_weight, 100.0);
    assert_eq!(stats.max_edge_weight, 300.0);
}

#[tokio::test]
async fn empty_graph_statistics_use_zero_sentinels() {
    let svc = service();
    let stats = svc.statistics().await.unwrap();
    assert_eq!(stats.vertex_count, 0);
    assert_eq!(stats.min_edge_weight, 0.0);
    assert_eq!(stats.avg_degree, 0.0);
    assert!(!stats.is_connected);
}

#[tokio::test]
async fn vertex_deletion_leaves_a_dangling_edge_the_builder_skips() {
    let svc = service();
    let (a, b, c) = three_cities(&svc).await;
    create_edge(&svc, &a.id, &b.id, Some(100.0)).await;

    // Deleting a vertex does not cascade; the edge record survives.
    svc.delete_point(&b.id).await.unwrap();
    assert_eq!(svc.list_edges(None).await.unwrap().len(), 1);

    // The builder drops the missing vertex's adjacency side, so queries
    // keep working over the surviving vertices.
    let components = svc.connected_components().await.unwrap();
    assert_eq!(components.len(), 2);

    let route = svc.shortest_path(&a.id, &c.id).await.unwrap();
    assert!(!route.found);

    let stats = svc.statistics().await.unwrap();
    assert_eq!(stats.vertex_count, 2);
    assert_eq!(stats.edge_count, 1);
    // The surviving endpoint still carries its half of the dangling edge.
    assert_eq!(stats.max_degree, 1);
    assert_eq!(stats.min_degree, 0);
}

#[tokio::test]
async fn path_distance_follows_coordinates_not_edges() {
    let svc = service();
    let (a, b, c) = three_cities(&svc).await;

    // No edges needed: path distance is pure geometry over the id sequence.
    let ids = vec![a.id.clone(), c.id.clone(), b.id.clone()];
    let total = svc.path_distance(&ids).await.unwrap();

    let ac = waypath_common::haversine_m(40.7128, -74.0060, 41.8781, -87.6298);
    let cb = waypath_common::haversine_m(41.8781, -87.6298, 34.0522, -118.2437);
    assert!((total - (ac + cb)).abs() < 1e-6);

    assert_eq!(svc.path_distance(&[a.id.clone()]).await.unwrap(), 0.0);
}
