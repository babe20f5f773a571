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
#![allow(unused)]

//! in-memory test doubles for the readsb data source and route lookup

use std::sync::{Arc,atomic::{AtomicUsize,Ordering}};
use async_trait::async_trait;

use odin_common::{geo::GeoPoint, geo_constants::MEAN_EARTH_RADIUS_NM};
use odin_readsb::{
    aircraft::{Aircraft,AircraftSnapshot,Altitude,ReceiverInfo,ReceiverStats},
    errors::{Result,op_failed},
    routes::{RouteLookup,RouteQuery,Routes},
    source::ReadsbSource,
};

pub const REF_LAT: f64 = 40.7128;
pub const REF_LON: f64 = -74.0060;

pub fn reference ()->GeoPoint { GeoPoint::from_lon_lat_degrees( REF_LON, REF_LAT) }

/// degrees of latitude that correspond to `nm` along a meridian
pub fn lat_offset (nm: f64)->f64 { (nm / MEAN_EARTH_RADIUS_NM).to_degrees() }

pub fn aircraft (hex: &str, flight: Option<&str>, lat: f64, lon: f64)->Aircraft {
    Aircraft {
        hex: Some( hex.to_string()),
        flight: flight.map( |s| format!("{:<8}", s)),
        alt_baro: Some( Altitude::Feet( 12000.0)),
        gs: Some( 250.0),
        track: Some( 90.0),
        lat: Some(lat),
        lon: Some(lon),
        ..Default::default()
    }
}

/// aircraft `nm` due north of the reference point
pub fn north_of_ref (hex: &str, nm: f64)->Aircraft {
    aircraft( hex, None, REF_LAT + lat_offset(nm), REF_LON)
}

/// aircraft `nm` due south of the reference point
pub fn south_of_ref (hex: &str, nm: f64)->Aircraft {
    aircraft( hex, None, REF_LAT - lat_offset(nm), REF_LON)
}

pub struct FakeSource {
    pub receiver: ReceiverInfo,
    pub snapshot: AircraftSnapshot,
    pub stats: ReceiverStats,
    pub fail_aircraft: bool,
    pub fetches: AtomicUsize,
}

impl FakeSource {
    pub fn new (receiver: ReceiverInfo, aircraft: Vec<Aircraft>)->Self {
        FakeSource {
            receiver,
            snapshot: AircraftSnapshot { now: Some(1753227401.9), messages: Some(1000), aircraft, ..Default::default() },
            stats: ReceiverStats::default(),
            fail_aircraft: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn at_ref (aircraft: Vec<Aircraft>)->Self {
        FakeSource::new( ReceiverInfo::new( REF_LAT, REF_LON), aircraft)
    }

    pub fn fetch_count (&self)->usize { self.fetches.load( Ordering::SeqCst) }
}

#[async_trait]
impl ReadsbSource for FakeSource {
    async fn get_aircraft (&self)->Result<AircraftSnapshot> {
        self.fetches.fetch_add( 1, Ordering::SeqCst);
        if self.fail_aircraft {
            Err( op_failed("aircraft.json not available"))
        } else {
            Ok( self.snapshot.clone())
        }
    }

    async fn get_receiver (&self)->Result<ReceiverInfo> {
        self.fetches.fetch_add( 1, Ordering::SeqCst);
        Ok( self.receiver.clone())
    }

    async fn get_stats (&self)->Result<ReceiverStats> {
        self.fetches.fetch_add( 1, Ordering::SeqCst);
        Ok( self.stats.clone())
    }

    async fn get_text (&self, url: &str)->Result<String> {
        self.fetches.fetch_add( 1, Ordering::SeqCst);
        Ok( format!("{{\"url\":\"{}\"}}", url))
    }
}

/// route lookup that knows a fixed set of routes, or always fails
pub struct FakeRouteLookup {
    pub routes: Routes,
    pub fail: bool,
}

#[async_trait]
impl RouteLookup for FakeRouteLookup {
    async fn lookup_routes (&self, queries: &[RouteQuery])->Result<Routes> {
        if self.fail {
            return Err( op_failed("route service unavailable"))
        }
        Ok( queries.iter()
            .filter_map( |q| self.routes.get( &q.callsign).map( |r| (q.callsign.clone(), r.clone())))
            .collect())
    }
}
