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

use odin_common::geo::*;
use odin_common::geo_constants::MEAN_EARTH_RADIUS_NM;

// run with "cargo test -p odin_common --test test_geo -- --nocapture"

fn sample_points ()->Vec<GeoPoint> {
    let mut points = Vec::new();
    let mut lat = -90.0;
    while lat <= 90.0 {
        let mut lon = -180.0;
        while lon <= 180.0 {
            points.push( GeoPoint::from_lon_lat_degrees( lon, lat));
            lon += 37.5;
        }
        lat += 22.5;
    }
    points
}

#[test]
fn test_distance_symmetry () {
    let points = sample_points();
    for a in &points {
        assert_eq!( a.distance_nm(a), 0.0, "non-zero self distance for {a}");
        for b in &points {
            let d_ab = a.distance_nm(b);
            let d_ba = b.distance_nm(a);
            assert!( d_ab.is_finite(), "non-finite distance {a} -> {b}");
            assert!( (d_ab - d_ba).abs() < 1e-9, "asymmetric distance {a} <-> {b}: {d_ab} != {d_ba}");
            assert!( d_ab <= MEAN_EARTH_RADIUS_NM * std::f64::consts::PI + 1e-6);
        }
    }
}

#[test]
fn test_bearing_range () {
    let points = sample_points();
    for a in &points {
        for b in &points {
            if a != b {
                let brg = a.bearing_to(b);
                assert!( brg >= 0.0 && brg < 360.0, "bearing out of range {a} -> {b}: {brg}");
            }
        }
    }
}

#[test]
fn test_receiver_scenario () {
    let receiver = GeoPoint::from_lon_lat_degrees( -74.0060, 40.7128);
    let aircraft = GeoPoint::from_lon_lat_degrees( -73.9856, 40.7234);

    let dist = receiver.distance_nm( &aircraft);
    let brg = receiver.bearing_to( &aircraft);
    println!("distance: {dist:.3}nm, bearing: {brg:.1}°");

    assert!( (dist - 1.1255).abs() < 1e-3, "unexpected distance {dist}");
    assert!( brg > 22.5 && brg < 67.5, "not in northeast quadrant: {brg}");
}

#[test]
fn test_deserialize_aliases () {
    let p: GeoPoint = serde_json::from_str( r#"{ "longitude": -122.0, "latitude": 37.0 }"#).unwrap();
    assert_eq!( p, GeoPoint::from_lon_lat_degrees( -122.0, 37.0));

    let p: GeoPoint = serde_json::from_str( r#"{ "lng": -122.0, "lat": 37.0 }"#).unwrap();
    assert_eq!( p, GeoPoint::from_lon_lat_degrees( -122.0, 37.0));
}
