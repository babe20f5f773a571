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

//! the tool level operations of the readsb adapter. Each operation validates its parameters, retrieves what it
//! needs through the injected [`ReadsbSource`] and renders a text result

use std::{fmt,str::FromStr,sync::Arc};
use serde::{Serialize,Deserialize};
use tracing::{debug,info};

use crate::{
    ReadsbConfig,
    aircraft::{Aircraft,AircraftSnapshot},
    direction::DirectionSector,
    errors::{OdinReadsbError,Result,validation_error},
    format,
    routes::{self,AdsbLolRouteLookup,RouteLookup},
    selector::{AircraftSelector,Count,Selection},
    source::{HttpReadsbSource,ReadsbEndpoints,ReadsbSource},
};

pub const DEFAULT_MIN_ALTITUDE_FT: f64 = 0.0;
pub const DEFAULT_MAX_ALTITUDE_FT: f64 = 50_000.0;

/* #region query parameters ***************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Summary,
}

impl FromStr for OutputFormat {
    type Err = OdinReadsbError;

    fn from_str (s: &str)->Result<Self> {
        match s {
            "json" => Ok( OutputFormat::Json),
            "summary" => Ok( OutputFormat::Summary),
            _ => Err( validation_error( format!("Invalid format '{}'. Valid formats are: json, summary", s)))
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Callsign,
    Hex,
    Flight,
    Any,
}

impl SearchType {
    pub fn name (&self)->&'static str {
        match self {
            SearchType::Callsign => "callsign",
            SearchType::Hex => "hex",
            SearchType::Flight => "flight",
            SearchType::Any => "any",
        }
    }

    fn matches_callsign (&self)->bool { !matches!( self, SearchType::Hex) }
    fn matches_hex (&self)->bool { matches!( self, SearchType::Hex | SearchType::Any) }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SearchType {
    type Err = OdinReadsbError;

    fn from_str (s: &str)->Result<Self> {
        match s {
            "callsign" => Ok( SearchType::Callsign),
            "hex" => Ok( SearchType::Hex),
            "flight" => Ok( SearchType::Flight),
            "any" => Ok( SearchType::Any),
            _ => Err( validation_error( format!("Invalid search_type '{}'. Valid types are: callsign, hex, flight, any", s)))
        }
    }
}

/// inclusive altitude range in feet
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct AltitudeFilter {
    pub min: f64,
    pub max: f64,
}

impl Default for AltitudeFilter {
    fn default()->Self { AltitudeFilter { min: DEFAULT_MIN_ALTITUDE_FT, max: DEFAULT_MAX_ALTITUDE_FT } }
}

impl AltitudeFilter {
    pub fn contains (&self, a: &Aircraft)->bool {
        let alt = a.altitude_ft();
        alt >= self.min && alt <= self.max
    }
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct AircraftDataQuery {
    pub format: OutputFormat,
    /// upper bound for the receiver reported distance in nm
    pub filter_distance: Option<f64>,
    pub filter_altitude: Option<AltitudeFilter>,
}

impl Default for AircraftDataQuery {
    fn default()->Self { AircraftDataQuery { format: OutputFormat::Json, filter_distance: None, filter_altitude: None } }
}

impl AircraftDataQuery {
    pub fn matches (&self, a: &Aircraft)->bool {
        self.filter_distance.map_or( true, |max| a.r_dst.unwrap_or(0.0) <= max)
            && self.filter_altitude.map_or( true, |f| f.contains(a))
    }
}

/* #endregion query parameters */

/* #region ReadsbService ******************************************************************************************/

pub struct ReadsbService {
    source: Arc<dyn ReadsbSource>,
    selector: AircraftSelector,
    route_lookup: Option<Arc<dyn RouteLookup>>,
    endpoints: ReadsbEndpoints,
    summary_limit: usize,
}

impl ReadsbService {
    pub fn new (source: Arc<dyn ReadsbSource>, route_lookup: Option<Arc<dyn RouteLookup>>, endpoints: ReadsbEndpoints, summary_limit: usize)->Self {
        let selector = AircraftSelector::new( source.clone());
        ReadsbService { source, selector, route_lookup, endpoints, summary_limit }
    }

    /// create a service that uses the HTTP endpoints and (optional) route lookup of the given config
    pub fn from_config (config: &ReadsbConfig)->Result<Self> {
        let endpoints = ReadsbEndpoints::new( &config.base_url);
        let source: Arc<dyn ReadsbSource> = Arc::new( HttpReadsbSource::new( endpoints.clone(), config.request_timeout)?);

        let route_lookup: Option<Arc<dyn RouteLookup>> = match &config.route_lookup {
            Some(rc) => Some( Arc::new( AdsbLolRouteLookup::new( &rc.url, rc.request_timeout)?)),
            None => None
        };

        info!("using readsb API at {}, tar1090 at {}", endpoints.api_base, endpoints.web_base);
        Ok( ReadsbService::new( source, route_lookup, endpoints, config.summary_limit))
    }

    pub fn endpoints (&self)->&ReadsbEndpoints { &self.endpoints }

    pub async fn aircraft_data (&self, query: &AircraftDataQuery)->Result<String> {
        let snapshot = self.source.get_aircraft().await?;
        let filtered: Vec<&Aircraft> = snapshot.aircraft.iter().filter( |a| query.matches(a)).collect();
        debug!("{} of {} aircraft pass filter", filtered.len(), snapshot.aircraft.len());

        match query.format {
            OutputFormat::Summary => Ok( format::aircraft_summary( &snapshot, &filtered, &self.endpoints, self.summary_limit)),
            OutputFormat::Json => {
                let filtered_snapshot = AircraftSnapshot {
                    aircraft: filtered.into_iter().cloned().collect(),
                    ..snapshot.clone()
                };
                Ok( serde_json::to_string_pretty( &filtered_snapshot)?)
            }
        }
    }

    pub async fn receiver_stats (&self, format: OutputFormat)->Result<String> {
        let stats = self.source.get_stats().await?;
        match format {
            OutputFormat::Summary => Ok( format::stats_summary( &stats)),
            OutputFormat::Json => Ok( serde_json::to_string_pretty( &stats)?)
        }
    }

    /// case insensitive substring search on callsign and/or hex id. Each aircraft is reported at most once
    pub async fn search_aircraft (&self, query: &str, search_type: SearchType)->Result<String> {
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return Err( validation_error("Search query cannot be empty"))
        }

        let snapshot = self.source.get_aircraft().await?;
        let matches: Vec<&Aircraft> = snapshot.aircraft.iter().filter( |a| {
            (search_type.matches_callsign() && a.callsign().is_some_and( |cs| cs.to_uppercase().contains( &query)))
             || (search_type.matches_hex() && a.hex().is_some_and( |hex| hex.to_uppercase().contains( &query)))
        }).collect();

        if matches.is_empty() {
            Ok( format!("No aircraft found matching '{}' with search type '{}'", query, search_type))
        } else {
            Ok( format::search_results( &query, &matches, &self.endpoints))
        }
    }

    pub async fn range_statistics (&self)->Result<String> {
        let receiver = self.source.get_receiver().await?;
        let stats = self.source.get_stats().await?;
        Ok( format::range_statistics( &receiver, &stats))
    }

    pub async fn closest_aircraft (&self, count: Count, max_distance: Option<f64>)->Result<String> {
        let selection = self.selector.closest( count, max_distance).await?;
        Ok( self.render_selection( &selection).await)
    }

    pub async fn aircraft_by_direction (&self, sector: DirectionSector, count: Count, max_distance: Option<f64>)->Result<String> {
        let selection = self.selector.by_direction( sector, count, max_distance).await?;
        Ok( self.render_selection( &selection).await)
    }

    async fn render_selection (&self, selection: &Selection)->String {
        let ranked = selection.ranked();
        let routes = routes::lookup_optional( self.route_lookup.as_deref(), &ranked).await;
        format::ranked_selection( selection, &ranked, &routes, &self.endpoints)
    }

    /// raw text of a resource URL
    pub async fn read_text (&self, url: &str)->Result<String> {
        self.source.get_text( url).await
    }

    /// retrieve all upstream endpoints once and log what we got
    pub async fn probe_endpoints (&self)->Result<()> {
        let snapshot = self.source.get_aircraft().await?;
        info!("aircraft endpoint OK - {} aircraft found", snapshot.aircraft.len());

        let stats = self.source.get_stats().await?;
        let total_messages = stats.total.as_ref().and_then( |p| p.messages).unwrap_or(0);
        info!("stats endpoint OK - {} total messages", format::thousands( total_messages));

        let receiver = self.source.get_receiver().await?;
        info!("receiver endpoint OK - version: {}", receiver.version.as_deref().unwrap_or( format::UNKNOWN));
        Ok(())
    }
}

/* #endregion ReadsbService */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::Altitude;

    #[test]
    fn test_parse_params () {
        assert_eq!( "summary".parse::<OutputFormat>().unwrap(), OutputFormat::Summary);
        assert!( "xml".parse::<OutputFormat>().is_err());
        assert_eq!( "hex".parse::<SearchType>().unwrap(), SearchType::Hex);

        let e = "tail".parse::<SearchType>().unwrap_err();
        assert_eq!( e.to_string(), "Invalid search_type 'tail'. Valid types are: callsign, hex, flight, any");
    }

    #[test]
    fn test_aircraft_data_filter () {
        let query = AircraftDataQuery {
            format: OutputFormat::Json,
            filter_distance: Some(20.0),
            filter_altitude: Some( AltitudeFilter { min: 0.0, max: 10_000.0 }),
        };
        let low_close = Aircraft { r_dst: Some(5.0), alt_baro: Some(Altitude::Feet(3000.0)), ..Default::default() };
        let high_close = Aircraft { r_dst: Some(5.0), alt_baro: Some(Altitude::Feet(35000.0)), ..Default::default() };
        let low_far = Aircraft { r_dst: Some(25.0), alt_baro: Some(Altitude::Feet(3000.0)), ..Default::default() };
        let on_ground = Aircraft { alt_baro: Some(Altitude::Ground), ..Default::default() };

        assert!( query.matches( &low_close));
        assert!( !query.matches( &high_close));
        assert!( !query.matches( &low_far));
        assert!( query.matches( &on_ground));
        assert!( AircraftDataQuery::default().matches( &high_close));
    }
}
