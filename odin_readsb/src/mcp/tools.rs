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

//! the MCP tools and resources of the readsb server: their descriptors and the mapping of JSON arguments to
//! [`ReadsbService`] operations

use std::sync::Arc;
use rmcp::model::{AnnotateAble,CallToolResult,Content,JsonObject,RawResource,Resource,Tool};
use serde_json::{Map,Value,json};
use tracing::{debug,warn};

use crate::{
    direction::DirectionSector,
    errors::{OdinReadsbError,Result,validation_error},
    selector::{self,Count,DEFAULT_CLOSEST_COUNT,DEFAULT_DIRECTION_COUNT,MIN_COUNT,MAX_COUNT},
    service::{AircraftDataQuery,AltitudeFilter,OutputFormat,ReadsbService,SearchType},
    source::ReadsbEndpoints,
};

pub const GET_AIRCRAFT_DATA: &str = "get_aircraft_data";
pub const GET_RECEIVER_STATS: &str = "get_receiver_stats";
pub const SEARCH_AIRCRAFT: &str = "search_aircraft";
pub const GET_RANGE_STATISTICS: &str = "get_range_statistics";
pub const GET_CLOSEST_AIRCRAFT: &str = "get_closest_aircraft";
pub const GET_AIRCRAFT_BY_DIRECTION: &str = "get_aircraft_by_direction";

const JSON_MIME_TYPE: &str = "application/json";

/* #region descriptors ********************************************************************************************/

fn tool (name: &'static str, description: &'static str, input_schema: Value)->Tool {
    let schema = match input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new()
    };
    Tool::new( name, description, Arc::new(schema))
}

pub fn tool_list ()->Vec<Tool> {
    let directions: Vec<&str> = ["north","south","east","west","northeast","northwest","southeast","southwest"].to_vec();

    vec![
        tool( GET_AIRCRAFT_DATA, "Get current aircraft positions and information", json!({
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "enum": ["json", "summary"],
                    "default": "json",
                    "description": "Output format: 'json' for raw data, 'summary' for human-readable"
                },
                "filter_distance": {
                    "type": "number",
                    "description": "Filter aircraft within this distance (nautical miles)"
                },
                "filter_altitude": {
                    "type": "object",
                    "properties": {
                        "min": { "type": "number" },
                        "max": { "type": "number" }
                    },
                    "description": "Filter aircraft by altitude range (feet)"
                }
            }
        })),
        tool( GET_RECEIVER_STATS, "Get readsb receiver statistics and performance metrics", json!({
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "enum": ["json", "summary"],
                    "default": "summary",
                    "description": "Output format"
                }
            }
        })),
        tool( SEARCH_AIRCRAFT, "Search for specific aircraft by callsign, hex code, or flight number", json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (callsign, hex code, or flight number)"
                },
                "search_type": {
                    "type": "string",
                    "enum": ["callsign", "hex", "flight", "any"],
                    "default": "any",
                    "description": "Type of search to perform"
                }
            },
            "required": ["query"]
        })),
        tool( GET_RANGE_STATISTICS, "Get receiver range and coverage statistics", json!({
            "type": "object",
            "properties": {}
        })),
        tool( GET_CLOSEST_AIRCRAFT, "Get the N closest aircraft to the feeder location", json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "integer",
                    "default": DEFAULT_CLOSEST_COUNT,
                    "minimum": MIN_COUNT,
                    "maximum": MAX_COUNT,
                    "description": format!("Number of closest aircraft to return ({}-{})", MIN_COUNT, MAX_COUNT)
                },
                "max_distance": {
                    "type": "number",
                    "description": "Maximum distance to consider (nautical miles)"
                }
            }
        })),
        tool( GET_AIRCRAFT_BY_DIRECTION, "Get aircraft in a specific direction from the feeder", json!({
            "type": "object",
            "properties": {
                "direction": {
                    "type": "string",
                    "enum": directions,
                    "description": "Direction to search for aircraft"
                },
                "max_distance": {
                    "type": "number",
                    "description": "Maximum distance to consider (nautical miles)"
                },
                "count": {
                    "type": "integer",
                    "default": DEFAULT_DIRECTION_COUNT,
                    "minimum": MIN_COUNT,
                    "maximum": MAX_COUNT,
                    "description": "Maximum number of aircraft to return"
                }
            },
            "required": ["direction"]
        })),
    ]
}

pub fn resource_list (endpoints: &ReadsbEndpoints)->Vec<Resource> {
    let resource = |uri: String, name: &str, description: &str| {
        let mut raw = RawResource::new( uri, name);
        raw.description = Some( description.to_string());
        raw.mime_type = Some( JSON_MIME_TYPE.to_string());
        raw.no_annotation()
    };

    vec![
        resource( endpoints.aircraft_url(), "Aircraft Data", "Current aircraft positions and data"),
        resource( endpoints.stats_url(), "Statistics", "readsb receiver statistics"),
        resource( endpoints.receiver_url(), "Receiver Info", "Receiver configuration and status"),
        resource( endpoints.tar1090_aircraft_url(), "TAR1090 Aircraft", "Aircraft data from TAR1090 web interface"),
    ]
}

/* #endregion descriptors */

/* #region argument parsing ***************************************************************************************/

fn opt_str<'a> (args: &'a Map<String,Value>, key: &str)->Result<Option<&'a str>> {
    match args.get( key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok( Some(s.as_str())),
        Some(_) => Err( validation_error( format!("Invalid {} parameter. Must be a string", key)))
    }
}

fn required_str<'a> (args: &'a Map<String,Value>, key: &str)->Result<&'a str> {
    opt_str( args, key)?.ok_or_else( || validation_error( format!("Missing required parameter '{}'", key)))
}

fn opt_number (args: &Map<String,Value>, key: &str)->Result<Option<f64>> {
    match args.get( key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok( n.as_f64()),
        Some(_) => Err( validation_error( format!("Invalid {} parameter. Must be a number", key)))
    }
}

fn format_arg (args: &Map<String,Value>, default: OutputFormat)->Result<OutputFormat> {
    match opt_str( args, "format")? {
        Some(s) => s.parse(),
        None => Ok(default)
    }
}

fn altitude_filter_arg (args: &Map<String,Value>)->Result<Option<AltitudeFilter>> {
    match args.get( "filter_altitude") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(range)) => {
            let default = AltitudeFilter::default();
            Ok( Some( AltitudeFilter {
                min: opt_number( range, "min")?.unwrap_or( default.min),
                max: opt_number( range, "max")?.unwrap_or( default.max),
            }))
        }
        Some(_) => Err( validation_error( "Invalid filter_altitude parameter. Must be an object with optional 'min' and 'max' feet"))
    }
}

pub fn aircraft_data_query (args: &Map<String,Value>)->Result<AircraftDataQuery> {
    Ok( AircraftDataQuery {
        format: format_arg( args, OutputFormat::Json)?,
        filter_distance: opt_number( args, "filter_distance")?,
        filter_altitude: altitude_filter_arg( args)?,
    })
}

/* #endregion argument parsing */

/* #region tool calls *********************************************************************************************/

/// the text we report for failed tool calls. Validation messages are passed through as is, everything else is
/// prefixed so that the caller can tell what failed
fn error_text (context: &str, e: &OdinReadsbError)->String {
    match e {
        OdinReadsbError::ValidationError(msg) => msg.clone(),
        OdinReadsbError::PreconditionError(msg) => format!("Error: {}", msg),
        _ => format!("Error {}: {}", context, e)
    }
}

async fn get_aircraft_data (service: &ReadsbService, args: &Map<String,Value>)->Result<String> {
    let query = aircraft_data_query( args)?;
    service.aircraft_data( &query).await
}

async fn get_receiver_stats (service: &ReadsbService, args: &Map<String,Value>)->Result<String> {
    let format = format_arg( args, OutputFormat::Summary)?;
    service.receiver_stats( format).await
}

async fn search_aircraft (service: &ReadsbService, args: &Map<String,Value>)->Result<String> {
    let query = required_str( args, "query")?;
    let search_type = match opt_str( args, "search_type")? {
        Some(s) => s.parse::<SearchType>()?,
        None => SearchType::Any
    };
    service.search_aircraft( query, search_type).await
}

async fn get_closest_aircraft (service: &ReadsbService, args: &Map<String,Value>)->Result<String> {
    let count = Count::from_json( args.get("count"), DEFAULT_CLOSEST_COUNT)?;
    let max_distance = selector::max_distance_from_json( args.get("max_distance"))?;
    service.closest_aircraft( count, max_distance).await
}

async fn get_aircraft_by_direction (service: &ReadsbService, args: &Map<String,Value>)->Result<String> {
    let sector: DirectionSector = required_str( args, "direction")?.parse()?;
    let count = Count::from_json( args.get("count"), DEFAULT_DIRECTION_COUNT)?;
    let max_distance = selector::max_distance_from_json( args.get("max_distance"))?;
    service.aircraft_by_direction( sector, count, max_distance).await
}

/// execute a tool call. Failures are reported as tool results with `is_error` set, not as protocol errors
pub async fn call_tool (service: &ReadsbService, name: &str, args: &Map<String,Value>)->CallToolResult {
    debug!("calling tool {} with {:?}", name, args);

    let (context, res) = match name {
        GET_AIRCRAFT_DATA => ("fetching aircraft data", get_aircraft_data( service, args).await),
        GET_RECEIVER_STATS => ("fetching stats", get_receiver_stats( service, args).await),
        SEARCH_AIRCRAFT => ("searching aircraft", search_aircraft( service, args).await),
        GET_RANGE_STATISTICS => ("fetching range statistics", service.range_statistics().await),
        GET_CLOSEST_AIRCRAFT => ("getting closest aircraft", get_closest_aircraft( service, args).await),
        GET_AIRCRAFT_BY_DIRECTION => ("getting aircraft by direction", get_aircraft_by_direction( service, args).await),
        _ => {
            warn!("unknown tool {}", name);
            return CallToolResult::error( vec![ Content::text( format!("Error: Unknown tool: {}", name)) ])
        }
    };

    match res {
        Ok(text) => CallToolResult::success( vec![ Content::text( text) ]),
        Err(e) => {
            warn!("tool {} failed: {}", name, e);
            CallToolResult::error( vec![ Content::text( error_text( context, &e)) ])
        }
    }
}

/* #endregion tool calls */
