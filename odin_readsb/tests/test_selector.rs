/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

// run with "cargo test --test test_selector -- --nocapture"

mod common;

use std::sync::Arc;
use odin_readsb::{
    aircraft::{Aircraft,ReceiverInfo},
    direction::DirectionSector,
    errors::OdinReadsbError,
    selector::{AircraftSelector,Count,RankedAircraft,SelectionQuery,by_direction,closest_n,select},
};
use common::*;

fn count (n: i64)->Count { Count::new(n).unwrap() }

fn hexes (ranked: &[RankedAircraft<'_>])->Vec<String> {
    ranked.iter().map( |r| r.aircraft.hex().unwrap_or("?").to_string()).collect()
}

#[test]
fn test_closest_orders_and_truncates () {
    let snapshot = vec![ north_of_ref("A", 5.0), north_of_ref("B", 2.0), north_of_ref("C", 8.0) ];
    let ranked = closest_n( &snapshot, &reference(), count(2), None);

    assert_eq!( hexes(&ranked), vec!["B", "A"]);
    assert!( (ranked[0].distance_nm - 2.0).abs() < 1e-6);
    assert!( (ranked[1].distance_nm - 5.0).abs() < 1e-6);
    assert!( ranked.iter().all( |r| r.bearing_deg.is_none()));
}

#[test]
fn test_length_is_min_of_count_and_eligible () {
    let mut snapshot = vec![ north_of_ref("A", 5.0), south_of_ref("B", 12.0) ];
    snapshot.push( Aircraft { hex: Some("NOPOS".into()), flight: Some("UAL1    ".into()), ..Default::default() });
    snapshot.push( Aircraft { hex: Some("LATONLY".into()), lat: Some(REF_LAT), ..Default::default() });

    let ranked = closest_n( &snapshot, &reference(), count(5), None);
    assert_eq!( hexes(&ranked), vec!["A", "B"]);

    let ranked = closest_n( &snapshot, &reference(), count(1), None);
    assert_eq!( ranked.len(), 1);
}

#[test]
fn test_max_distance_filter () {
    let snapshot = vec![ north_of_ref("A", 60.0) ];
    let ranked = closest_n( &snapshot, &reference(), count(5), Some(50.0));
    assert!( ranked.is_empty());

    let snapshot: Vec<Aircraft> = (1..=20).map( |i| north_of_ref( &format!("N{i}"), i as f64 * 5.0)).collect();
    let max = 42.0;
    let ranked = closest_n( &snapshot, &reference(), count(50), Some(max));
    assert!( ranked.iter().all( |r| r.distance_nm <= max));

    // no eligible aircraft within max is left out
    let within = snapshot.iter().filter( |a| reference().distance_nm( &a.position().unwrap()) <= max).count();
    assert_eq!( ranked.len(), within);
    assert_eq!( ranked.len(), 8);
}

#[test]
fn test_sorted_non_decreasing () {
    let snapshot: Vec<Aircraft> = [17.0, 3.0, 44.0, 3.5, 9.0, 0.5, 23.0].iter().enumerate()
        .map( |(i,d)| if i % 2 == 0 { north_of_ref( &format!("X{i}"), *d) } else { south_of_ref( &format!("X{i}"), *d) })
        .collect();
    let ranked = closest_n( &snapshot, &reference(), count(50), None);
    assert_eq!( ranked.len(), snapshot.len());
    assert!( ranked.windows(2).all( |w| w[0].distance_nm <= w[1].distance_nm));
}

#[test]
fn test_ties_keep_snapshot_order () {
    let snapshot = vec![ north_of_ref("FIRST", 10.0), north_of_ref("SECOND", 10.0), north_of_ref("CLOSE", 1.0), north_of_ref("THIRD", 10.0) ];
    let ranked = closest_n( &snapshot, &reference(), count(4), None);
    assert_eq!( hexes(&ranked), vec!["CLOSE", "FIRST", "SECOND", "THIRD"]);
}

#[test]
fn test_by_direction_north () {
    let a = aircraft( "A", Some("NORTH1"), REF_LAT + 0.5, REF_LON - 0.1);
    let b = south_of_ref( "B", 10.0);
    let snapshot = vec![ a, b ];

    let ranked = by_direction( &snapshot, &reference(), DirectionSector::North, count(10), None);
    assert_eq!( hexes(&ranked), vec!["A"]);

    let bearing = ranked[0].bearing_deg.unwrap();
    println!("bearing of A: {bearing:.2}");
    assert!( bearing > 337.5 && bearing < 360.0);
    assert!( DirectionSector::North.contains( bearing));

    let ranked = by_direction( &snapshot, &reference(), DirectionSector::South, count(10), None);
    assert_eq!( hexes(&ranked), vec!["B"]);
    assert!( (ranked[0].bearing_deg.unwrap() - 180.0).abs() < 1e-9);

    assert!( by_direction( &snapshot, &reference(), DirectionSector::East, count(10), None).is_empty());
}

#[test]
fn test_by_direction_members_are_in_sector () {
    // a ring of aircraft around the receiver
    let snapshot: Vec<Aircraft> = (0..72).map( |i| {
        let angle = (i as f64 * 5.0 + 1.0).to_radians();
        aircraft( &format!("R{i}"), None, REF_LAT + 0.3 * angle.cos(), REF_LON + 0.4 * angle.sin())
    }).collect();

    let mut total = 0;
    for sector in DirectionSector::ALL {
        let ranked = by_direction( &snapshot, &reference(), sector, count(50), None);
        assert!( !ranked.is_empty(), "no aircraft in {sector}");
        assert!( ranked.iter().all( |r| sector.contains( r.bearing_deg.unwrap())));
        total += ranked.len();
    }
    assert_eq!( total, snapshot.len()); // each aircraft shows up in exactly one sector
}

#[test]
fn test_receiver_scenario () {
    let snapshot = vec![ aircraft( "a1b2c3", Some("UAL123"), 40.7234, -73.9856) ];

    let ranked = closest_n( &snapshot, &reference(), count(5), None);
    assert_eq!( ranked.len(), 1);
    println!("distance: {:.4} nm", ranked[0].distance_nm);
    assert!( (ranked[0].distance_nm - 1.1255).abs() < 1e-3);

    let ranked = by_direction( &snapshot, &reference(), DirectionSector::Northeast, count(5), None);
    assert_eq!( ranked.len(), 1);
    let bearing = ranked[0].bearing_deg.unwrap();
    println!("bearing: {:.2}°", bearing);
    assert!( bearing >= 22.5 && bearing < 67.5);
    assert_eq!( DirectionSector::from_bearing( bearing), DirectionSector::Northeast);
}

#[test]
fn test_idempotent () {
    let snapshot: Vec<Aircraft> = (1..=10).map( |i| south_of_ref( &format!("S{i}"), 100.0 / i as f64)).collect();
    let query = SelectionQuery::by_direction( DirectionSector::South, count(4), Some(60.0)).unwrap();

    let r1 = select( &snapshot, &reference(), &query);
    let r2 = select( &snapshot, &reference(), &query);
    assert_eq!( r1, r2);
    assert_eq!( hexes(&r1), vec!["S10", "S9", "S8", "S7"]);
}

#[tokio::test]
async fn test_selector_precondition () {
    for receiver in [ ReceiverInfo::new( 0.0, 0.0), ReceiverInfo::new( 0.0, -74.0), ReceiverInfo::new( 40.7128, 0.0), ReceiverInfo::default() ] {
        let source = Arc::new( FakeSource::new( receiver, vec![ north_of_ref("A", 5.0) ]));
        let selector = AircraftSelector::new( source.clone());

        match selector.closest( count(5), None).await {
            Err(OdinReadsbError::PreconditionError(msg)) => assert_eq!( msg, "Receiver location cannot be determined from feeder data"),
            other => panic!("expected precondition error, got {:?}", other.map( |s| s.snapshot.aircraft.len()))
        }
        assert_eq!( source.fetch_count(), 1); // receiver only, no aircraft fetch
    }
}

#[tokio::test]
async fn test_selector_validates_before_fetch () {
    let source = Arc::new( FakeSource::at_ref( vec![ north_of_ref("A", 5.0) ]));
    let selector = AircraftSelector::new( source.clone());

    let res = selector.by_direction( DirectionSector::North, count(5), Some(-1.0)).await;
    assert!( matches!( res, Err(OdinReadsbError::ValidationError(_))));
    assert_eq!( source.fetch_count(), 0);

    let selection = selector.by_direction( DirectionSector::North, count(5), Some(10.0)).await.unwrap();
    assert_eq!( source.fetch_count(), 2);
    assert_eq!( selection.reference, reference());
    assert_eq!( hexes( &selection.ranked()), vec!["A"]);
}

#[tokio::test]
async fn test_selector_propagates_fetch_errors () {
    let mut source = FakeSource::at_ref( vec![ north_of_ref("A", 5.0) ]);
    source.fail_aircraft = true;
    let selector = AircraftSelector::new( Arc::new( source));

    let res = selector.closest( count(5), None).await;
    assert!( matches!( res, Err(OdinReadsbError::OpFailed(_))));
}
