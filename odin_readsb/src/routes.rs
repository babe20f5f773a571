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

//! optional flight route lookup for ranked aircraft, using adsb.lol style `routeset` web services

use std::{collections::HashMap,time::Duration};
use async_trait::async_trait;
use serde::{Serialize,Deserialize};
use serde_json::Value;
use tracing::{debug,warn};

use crate::{errors::Result,selector::RankedAircraft};

pub const DEFAULT_ROUTESET_URL: &str = "https://api.adsb.lol/api/0/routeset";

#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct RouteQuery {
    pub callsign: String,
    pub lat: f64,
    pub lng: f64,
}

impl RouteQuery {
    /// one query per distinct callsign of positioned aircraft
    pub fn from_ranked (ranked: &[RankedAircraft<'_>])->Vec<RouteQuery> {
        let mut queries: Vec<RouteQuery> = Vec::with_capacity( ranked.len());
        for r in ranked {
            if let Some(callsign) = r.aircraft.callsign() {
                if !queries.iter().any( |q| q.callsign == callsign) {
                    queries.push( RouteQuery { callsign: callsign.to_string(), lat: r.position.lat, lng: r.position.lon });
                }
            }
        }
        queries
    }
}

/// callsign -> route string (e.g. "SFO-JFK")
pub type Routes = HashMap<String,String>;

#[async_trait]
pub trait RouteLookup: Send + Sync {
    async fn lookup_routes (&self, queries: &[RouteQuery])->Result<Routes>;
}

#[derive(Serialize)]
struct RouteSetRequest<'a> {
    planes: &'a [RouteQuery],
}

#[derive(Deserialize,Debug)]
struct RouteSetEntry {
    callsign: String,

    #[serde(rename = "_airport_codes_iata", default)]
    airport_codes: Option<String>,

    #[serde(default)]
    plausible: Option<Value>,
}

impl RouteSetEntry {
    // the service reports plausibility either as bool or as 0/1
    fn is_plausible (&self)->bool {
        match &self.plausible {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().is_some_and( |i| i != 0),
            _ => false
        }
    }
}

fn routes_from_entries (entries: Vec<RouteSetEntry>)->Routes {
    entries.into_iter()
        .filter( |e| e.is_plausible())
        .filter_map( |e| {
            let route = e.airport_codes.as_deref().map( str::trim).filter( |s| !s.is_empty() && !s.eq_ignore_ascii_case("unknown"))?.to_string();
            Some( (e.callsign.trim().to_string(), route))
        })
        .collect()
}

pub struct AdsbLolRouteLookup {
    client: reqwest::Client,
    url: String,
}

impl AdsbLolRouteLookup {
    pub fn new (url: impl ToString, request_timeout: Duration)->Result<Self> {
        let client = reqwest::Client::builder().timeout( request_timeout).build()?;
        Ok( AdsbLolRouteLookup { client, url: url.to_string() })
    }
}

#[async_trait]
impl RouteLookup for AdsbLolRouteLookup {
    async fn lookup_routes (&self, queries: &[RouteQuery])->Result<Routes> {
        if queries.is_empty() { return Ok( Routes::new()) }

        debug!("looking up {} routes from {}", queries.len(), self.url);
        let entries: Vec<RouteSetEntry> = self.client.post( &self.url)
            .json( &RouteSetRequest { planes: queries })
            .send().await?
            .error_for_status()?
            .json().await?;

        Ok( routes_from_entries( entries))
    }
}

/// run the lookup if there is one. Failures only get logged since routes are an optional output
pub async fn lookup_optional (lookup: Option<&dyn RouteLookup>, ranked: &[RankedAircraft<'_>])->Routes {
    let Some(lookup) = lookup else { return Routes::new() };

    let queries = RouteQuery::from_ranked( ranked);
    match lookup.lookup_routes( &queries).await {
        Ok(routes) => routes,
        Err(e) => {
            warn!("route lookup failed: {}", e);
            Routes::new()
        }
    }
}
