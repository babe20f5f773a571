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

//! odin_readsb provides access to aircraft data of readsb / Ultrafeeder ADS-B receivers, including proximity and
//! direction queries relative to the receiver location, and exposes it as MCP tools and resources

use std::{path::Path,time::Duration};
use serde::Deserialize;

use odin_common::{config,datetime::{deserialize_duration,secs}};

pub mod errors;
pub mod aircraft;
pub mod direction;
pub mod selector;
pub mod source;
pub mod routes;
pub mod format;
pub mod service;
pub mod mcp;

use errors::Result;

pub const CONFIG_FILE: &str = "readsb.ron";
pub const DEFAULT_BASE_URL: &str = "http://localhost";

#[derive(Deserialize,Debug,Clone)]
#[serde(default)]
pub struct ReadsbConfig {
    /// base URL of the readsb / Ultrafeeder host
    pub base_url: String,

    #[serde(deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,

    /// optional route lookup for ranked aircraft. Disabled if not set
    pub route_lookup: Option<RouteLookupConfig>,

    /// max number of aircraft listed in summaries
    pub summary_limit: usize,

    /// interval of "still running" messages in test mode
    #[serde(deserialize_with = "deserialize_duration")]
    pub heartbeat_interval: Duration,
}

impl Default for ReadsbConfig {
    fn default()->Self {
        ReadsbConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: secs(10),
            route_lookup: None,
            summary_limit: 10,
            heartbeat_interval: secs(30),
        }
    }
}

#[derive(Deserialize,Debug,Clone)]
pub struct RouteLookupConfig {
    #[serde(default = "default_routeset_url")]
    pub url: String,

    #[serde(deserialize_with = "deserialize_duration", default = "default_route_timeout")]
    pub request_timeout: Duration,
}

fn default_routeset_url ()->String { routes::DEFAULT_ROUTESET_URL.to_string() }
fn default_route_timeout ()->Duration { secs(5) }

/// load config from explicit path or through the standard lookup in `$ODIN_ROOT` and `~/.odin`.
/// Returns the built-in defaults if there is no config file
pub fn load_config (path: Option<&Path>)->Result<ReadsbConfig> {
    match path {
        Some(path) => Ok( config::load_config_path( path)?),
        None => match config::find_config_file( env!("CARGO_PKG_NAME"), CONFIG_FILE) {
            Some(path) => Ok( config::load_config_path( path)?),
            None => Ok( ReadsbConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config () {
        let input = r#"ReadsbConfig(
            base_url: "http://adsb-feeder.local:8080",
            request_timeout: "3s",
            route_lookup: Some( RouteLookupConfig( url: "http://localhost:9000/routeset" )),
        )"#;
        let config: ReadsbConfig = ron::from_str( input).unwrap();
        assert_eq!( config.base_url, "http://adsb-feeder.local:8080");
        assert_eq!( config.request_timeout, secs(3));
        assert_eq!( config.summary_limit, 10);
        assert_eq!( config.heartbeat_interval, secs(30));

        let rl = config.route_lookup.unwrap();
        assert_eq!( rl.url, "http://localhost:9000/routeset");
        assert_eq!( rl.request_timeout, secs(5));
    }
}
