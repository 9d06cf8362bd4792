//! Integration tests running the route facade against the embedded sample
//! dataset.

mod common;

use cityroute_lib::{
    find_route_a_star, find_route_dijkstra, Coordinate, GreatCircle, RouteAlgorithm,
    RouteOutcome, RouteRequest, RouteResult, RouteService, RouteServiceConfig, SearchLimits,
};

use common::{ids, names, sample_data, sample_service};

fn found(service: &RouteService, from: &str, to: &str) -> RouteResult {
    match service
        .find_route(&RouteRequest::new(from, to))
        .expect("route query succeeds")
    {
        RouteOutcome::Found(result) => result,
        other => panic!("expected a route from {from} to {to}, got {other:?}"),
    }
}

#[test]
fn ballari_to_hospet_is_direct() {
    let route = found(&sample_service(), "Ballari", "Hospet");
    assert_eq!(route.path, vec!["Ballari", "Hospet"]);
    assert_eq!(route.distance_km, 60.0);
    assert_eq!(route.time_label(), "1.2 hours");
    assert_eq!(
        route.coordinates,
        vec![
            Some(Coordinate::new(15.1394, 76.9214)),
            Some(Coordinate::new(15.2663, 76.3862)),
        ]
    );
}

#[test]
fn lookup_is_case_insensitive() {
    let service = sample_service();
    let exact = found(&service, "Ballari", "Hospet");
    let mixed = found(&service, "ballari", "HOSPET");
    assert_eq!(exact, mixed);
}

#[test]
fn ballari_to_gadag_goes_through_koppal() {
    let route = found(&sample_service(), "Ballari", "Gadag");
    assert_eq!(
        route.path,
        vec!["Ballari", "Hospet", "Gangavathi Junction", "Koppal", "Gadag"]
    );
    assert_eq!(route.distance_km, 156.0);
    assert_eq!(route.time_label(), "3.12 hours");
    assert_eq!(route.hops, 4);
}

#[test]
fn chitradurga_to_raichur_crosses_the_region() {
    let route = found(&sample_service(), "Chitradurga", "Raichur");
    assert_eq!(
        route.path,
        vec![
            "Chitradurga",
            "Ballari",
            "Hospet",
            "Gangavathi Junction",
            "Raichur"
        ]
    );
    assert_eq!(route.distance_km, 350.0);
    assert_eq!(route.time_label(), "7.0 hours");
}

#[test]
fn reverse_direction_follows_available_edges() {
    // Hospet lists no direct edge back to Ballari.
    let route = found(&sample_service(), "Hospet", "Ballari");
    assert_eq!(route.path, vec!["Hospet", "Toranagallu", "Ballari"]);
    assert_eq!(route.distance_km, 60.0);
}

#[test]
fn one_way_rows_make_distances_asymmetric() {
    // Kamalapura lists Ballari, Ballari does not list Kamalapura.
    let service = sample_service();
    let outbound = found(&service, "Ballari", "Kamalapura");
    assert_eq!(outbound.path, vec!["Ballari", "Hospet", "Kamalapura"]);
    assert_eq!(outbound.distance_km, 68.0);

    let inbound = found(&service, "Kamalapura", "Ballari");
    assert_eq!(inbound.path, vec!["Kamalapura", "Ballari"]);
    assert_eq!(inbound.distance_km, 60.0);
}

#[test]
fn unknown_city_is_a_normal_outcome() {
    let outcome = sample_service()
        .find_route(&RouteRequest::new("Nowhere", "Hospet"))
        .expect("unknown city is not an error");
    match &outcome {
        RouteOutcome::CityNotFound { unresolved } => {
            assert_eq!(unresolved.len(), 1);
            assert_eq!(unresolved[0].name, "Nowhere");
        }
        other => panic!("expected city not found, got {other:?}"),
    }
    assert!(outcome
        .message()
        .unwrap()
        .contains("One or both cities not found"));
}

#[test]
fn misspelled_city_gets_suggestions() {
    let outcome = sample_service()
        .find_route(&RouteRequest::new("Hospett", "Ballari"))
        .unwrap();
    let RouteOutcome::CityNotFound { unresolved } = outcome else {
        panic!("expected city not found");
    };
    assert_eq!(unresolved[0].suggestions.first().map(String::as_str), Some("Hospet"));
}

#[test]
fn restricted_graph_can_leave_no_route() {
    // Only Ballari's adjacency survives, so nothing leads back to it.
    let request = RouteRequest::new("Hospet", "Ballari").allow(["Ballari"]);
    let outcome = sample_service().find_route(&request).unwrap();
    assert_eq!(
        outcome,
        RouteOutcome::NoRoute {
            from: "Hospet".into(),
            to: "Ballari".into()
        }
    );

    let request = RouteRequest::new("Ballari", "Hospet").allow(["Ballari"]);
    assert!(sample_service().find_route(&request).unwrap().is_found());
}

#[test]
fn landmarks_without_coordinates_map_to_none() {
    let route = found(&sample_service(), "Royal Circle", "Hampi");
    assert_eq!(route.path.first().map(String::as_str), Some("Royal Circle"));
    assert_eq!(route.coordinates.len(), route.path.len());
    assert!(route.coordinates[0].is_none());
    assert!(route.coordinates.last().unwrap().is_some());
    assert_eq!(route.distance_km, 73.0);
}

#[test]
fn calibrated_a_star_matches_dijkstra_for_every_pair() {
    let service = sample_service();
    let locations: Vec<String> = service.graph().names().map(str::to_string).collect();
    for from in &locations {
        for to in &locations {
            let a_star = service
                .find_route(&RouteRequest::new(from.as_str(), to.as_str()))
                .unwrap();
            let dijkstra = service
                .find_route(
                    &RouteRequest::new(from.as_str(), to.as_str())
                        .with_algorithm(RouteAlgorithm::Dijkstra),
                )
                .unwrap();
            assert_eq!(
                a_star.route().map(|r| r.distance_km),
                dijkstra.route().map(|r| r.distance_km),
                "{from} -> {to}"
            );
        }
    }
}

#[test]
fn unscaled_great_circle_overestimates_on_sample_data() {
    // Some sample road distances are shorter than the straight line between
    // the recorded coordinates, so the raw haversine estimate is not
    // admissible there.
    let service = RouteService::new(
        sample_data(),
        RouteServiceConfig {
            calibrate_heuristic: false,
            ..RouteServiceConfig::default()
        },
    );
    assert_eq!(service.heuristic_scale(), 1.0);
    let graph = service.graph();
    let path = ids(graph, &["Ballari", "Gadag"]);

    let raw = GreatCircle::new(service.coordinates());
    let outcome = find_route_a_star(graph, path[0], path[1], &raw, &SearchLimits::default());
    assert_eq!(outcome.distance, 159.0);
    assert_eq!(
        names(graph, outcome.path.as_deref().unwrap()),
        vec!["Ballari", "Hospet", "Koppal", "Gadag"]
    );

    let reference = find_route_dijkstra(graph, path[0], path[1], &SearchLimits::default());
    assert_eq!(reference.distance, 156.0);
}

#[test]
fn locations_include_landmarks_and_major_cities() {
    let locations = sample_service().locations();
    assert_eq!(locations.len(), 37);
    assert!(locations.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(locations.iter().any(|name| name == "Royal Circle"));
    assert!(locations.iter().any(|name| name == "Chitradurga"));
}
