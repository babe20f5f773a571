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

//! proximity and direction ranking of aircraft relative to the receiver location.
//!
//! The ranking itself ([`select`], [`closest_n`], [`by_direction`]) is a pure function of an aircraft list and a
//! reference point. [`AircraftSelector`] adds parameter validation and data retrieval through a [`ReadsbSource`]

use std::sync::Arc;
use serde_json::Value;
use tracing::debug;

use odin_common::geo::GeoPoint;
use crate::{
    aircraft::{Aircraft,AircraftSnapshot,ReceiverInfo},
    direction::DirectionSector,
    errors::{Result,validation_error},
    source::ReadsbSource,
};

pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 50;
pub const DEFAULT_CLOSEST_COUNT: usize = 5;
pub const DEFAULT_DIRECTION_COUNT: usize = 10;

/* #region parameters *********************************************************************************************/

/// number of results to return, guaranteed to be within [MIN_COUNT,MAX_COUNT]
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Count(usize);

impl Count {
    pub fn new (n: i64)->Result<Count> {
        if n >= MIN_COUNT as i64 && n <= MAX_COUNT as i64 {
            Ok( Count( n as usize))
        } else {
            Err( invalid_count())
        }
    }

    /// parse from an optional JSON argument, which has to be an integer number if present
    pub fn from_json (v: Option<&Value>, default: usize)->Result<Count> {
        match v {
            None | Some(Value::Null) => Count::new( default as i64),
            Some(Value::Number(n)) => n.as_i64().ok_or_else( invalid_count).and_then( Count::new),
            Some(_) => Err( invalid_count())
        }
    }

    pub fn get (&self)->usize { self.0 }
}

fn invalid_count ()->crate::errors::OdinReadsbError {
    validation_error( format!("Invalid count parameter. Must be an integer between {} and {}", MIN_COUNT, MAX_COUNT))
}

/// validate optional distance limit in nautical miles (has to be a finite, positive number)
pub fn check_max_distance (max_distance: Option<f64>)->Result<Option<f64>> {
    match max_distance {
        Some(d) if !(d.is_finite() && d > 0.0) => Err( invalid_max_distance()),
        _ => Ok( max_distance)
    }
}

pub fn max_distance_from_json (v: Option<&Value>)->Result<Option<f64>> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => check_max_distance( n.as_f64()),
        Some(_) => Err( invalid_max_distance())
    }
}

fn invalid_max_distance ()->crate::errors::OdinReadsbError {
    validation_error( "Invalid max_distance parameter. Must be a positive number of nautical miles")
}

/// a validated selection query
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SelectionQuery {
    pub count: Count,
    pub max_distance: Option<f64>,
    pub sector: Option<DirectionSector>,
}

impl SelectionQuery {
    pub fn closest (count: Count, max_distance: Option<f64>)->Result<Self> {
        Ok( SelectionQuery { count, max_distance: check_max_distance( max_distance)?, sector: None })
    }

    pub fn by_direction (sector: DirectionSector, count: Count, max_distance: Option<f64>)->Result<Self> {
        Ok( SelectionQuery { count, max_distance: check_max_distance( max_distance)?, sector: Some(sector) })
    }
}

/* #endregion parameters */

/* #region ranking ************************************************************************************************/

/// an aircraft together with its distance (and, for directional queries, bearing) from the reference point
#[derive(Debug,Clone,PartialEq)]
pub struct RankedAircraft<'a> {
    pub aircraft: &'a Aircraft,
    pub position: GeoPoint,
    pub distance_nm: f64,
    pub bearing_deg: Option<f64>,
}

/// rank positioned aircraft by ascending distance from `reference`, optionally restricted to a compass sector
/// and a maximum distance, and truncate to `query.count` entries.
/// Aircraft without position never show up. Equidistant aircraft keep their input order
pub fn select<'a> (aircraft: &'a [Aircraft], reference: &GeoPoint, query: &SelectionQuery)->Vec<RankedAircraft<'a>> {
    let mut ranked: Vec<RankedAircraft<'a>> = aircraft.iter()
        .filter_map( |a| {
            let position = a.position()?;
            let distance_nm = reference.distance_nm( &position);
            let bearing_deg = query.sector.map( |_| reference.bearing_to( &position));
            Some( RankedAircraft { aircraft: a, position, distance_nm, bearing_deg })
        })
        .filter( |r| match (query.sector, r.bearing_deg) {
            (Some(sector), Some(bearing)) => sector.contains( bearing),
            _ => true
        })
        .filter( |r| query.max_distance.map_or( true, |max| r.distance_nm <= max))
        .collect();

    ranked.sort_by( |a,b| a.distance_nm.total_cmp( &b.distance_nm));
    ranked.truncate( query.count.get());
    ranked
}

pub fn closest_n<'a> (aircraft: &'a [Aircraft], reference: &GeoPoint, count: Count, max_distance: Option<f64>)->Vec<RankedAircraft<'a>> {
    select( aircraft, reference, &SelectionQuery { count, max_distance, sector: None })
}

pub fn by_direction<'a> (aircraft: &'a [Aircraft], reference: &GeoPoint, sector: DirectionSector, count: Count, max_distance: Option<f64>)->Vec<RankedAircraft<'a>> {
    select( aircraft, reference, &SelectionQuery { count, max_distance, sector: Some(sector) })
}

/* #endregion ranking */

/* #region AircraftSelector ***************************************************************************************/

/// the result of a selection query: the snapshot it was computed from and the reference point
#[derive(Debug,Clone)]
pub struct Selection {
    pub query: SelectionQuery,
    pub receiver: ReceiverInfo,
    pub reference: GeoPoint,
    pub snapshot: AircraftSnapshot,
}

impl Selection {
    pub fn ranked (&self)->Vec<RankedAircraft<'_>> {
        select( &self.snapshot.aircraft, &self.reference, &self.query)
    }
}

/// retrieves receiver location and aircraft snapshot from a [`ReadsbSource`] and ranks the aircraft.
/// Queries are validated before anything is retrieved, and the receiver location is checked before we fetch aircraft
pub struct AircraftSelector {
    source: Arc<dyn ReadsbSource>,
}

impl AircraftSelector {
    pub fn new (source: Arc<dyn ReadsbSource>)->Self {
        AircraftSelector { source }
    }

    pub async fn select (&self, query: SelectionQuery)->Result<Selection> {
        check_max_distance( query.max_distance)?;

        let receiver = self.source.get_receiver().await?;
        let reference = receiver.reference_point()?;
        let snapshot = self.source.get_aircraft().await?;
        debug!("selecting from {} aircraft relative to {}", snapshot.aircraft.len(), reference);

        Ok( Selection { query, receiver, reference, snapshot })
    }

    pub async fn closest (&self, count: Count, max_distance: Option<f64>)->Result<Selection> {
        self.select( SelectionQuery::closest( count, max_distance)?).await
    }

    pub async fn by_direction (&self, sector: DirectionSector, count: Count, max_distance: Option<f64>)->Result<Selection> {
        self.select( SelectionQuery::by_direction( sector, count, max_distance)?).await
    }
}

/* #endregion AircraftSelector */
