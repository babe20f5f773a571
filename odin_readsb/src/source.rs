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

//! data access for readsb / Ultrafeeder HTTP endpoints

use std::time::Duration;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug,warn};

use crate::{
    aircraft::{AircraftSnapshot,ReceiverInfo,ReceiverStats},
    errors::Result,
};

pub const AIRCRAFT_JSON: &str = "aircraft.json";
pub const STATS_JSON: &str = "stats.json";
pub const RECEIVER_JSON: &str = "receiver.json";

/// standard port of the readsb REST API if the base url does not specify one
pub const DEFAULT_API_PORT: u16 = 80;
/// standard port of the tar1090 web interface if the base url does not specify one
pub const DEFAULT_WEB_PORT: u16 = 8080;

/* #region ReadsbEndpoints ****************************************************************************************/

/// the URLs we derive from a configured readsb base url
#[derive(Debug,Clone,PartialEq)]
pub struct ReadsbEndpoints {
    pub base_url: String,
    pub api_base: String,
    pub web_base: String,
}

impl ReadsbEndpoints {
    /// if the host part of `base_url` carries an explicit port we use that for all endpoints (remote feeders
    /// behind a proxy), otherwise the standard API and web ports of an Ultrafeeder container apply
    pub fn new (base_url: &str)->Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let host_part = base_url.rsplit("//").next().unwrap_or( base_url.as_str());

        if host_part.contains(':') {
            ReadsbEndpoints {
                api_base: format!("{}/data", base_url),
                web_base: base_url.clone(),
                base_url,
            }
        } else {
            ReadsbEndpoints {
                api_base: format!("{}:{}/data", base_url, DEFAULT_API_PORT),
                web_base: format!("{}:{}", base_url, DEFAULT_WEB_PORT),
                base_url,
            }
        }
    }

    pub fn api_url (&self, endpoint: &str)->String {
        format!("{}/{}", self.api_base, endpoint)
    }

    pub fn aircraft_url (&self)->String { self.api_url( AIRCRAFT_JSON) }
    pub fn stats_url (&self)->String { self.api_url( STATS_JSON) }
    pub fn receiver_url (&self)->String { self.api_url( RECEIVER_JSON) }

    /// the aircraft feed of the tar1090 web interface
    pub fn tar1090_aircraft_url (&self)->String {
        format!("{}/data/{}", self.web_base, AIRCRAFT_JSON)
    }

    /// tar1090 map link that selects the aircraft with the given ICAO hex id
    pub fn map_link (&self, hex: &str)->String {
        format!("{}/?icao={}", self.web_base, hex)
    }
}

/* #endregion ReadsbEndpoints */

/* #region ReadsbSource *******************************************************************************************/

/// the data access capability used by selectors and tool implementations
#[async_trait]
pub trait ReadsbSource: Send + Sync {
    async fn get_aircraft (&self)->Result<AircraftSnapshot>;
    async fn get_receiver (&self)->Result<ReceiverInfo>;
    async fn get_stats (&self)->Result<ReceiverStats>;

    /// raw body of a resource URL
    async fn get_text (&self, url: &str)->Result<String>;
}

pub struct HttpReadsbSource {
    client: reqwest::Client,
    endpoints: ReadsbEndpoints,
}

impl HttpReadsbSource {
    pub fn new (endpoints: ReadsbEndpoints, request_timeout: Duration)->Result<Self> {
        let client = reqwest::Client::builder().timeout( request_timeout).build()?;
        Ok( HttpReadsbSource { client, endpoints })
    }

    pub fn endpoints (&self)->&ReadsbEndpoints { &self.endpoints }

    async fn fetch_json<T: DeserializeOwned> (&self, endpoint: &str)->Result<T> {
        let url = self.endpoints.api_url( endpoint);
        debug!("GET {}", url);

        let response = self.client.get( &url).send().await
            .and_then( |r| r.error_for_status())
            .inspect_err( |e| warn!("failed to retrieve {}: {}", url, e))?;
        Ok( response.json::<T>().await? )
    }
}

#[async_trait]
impl ReadsbSource for HttpReadsbSource {
    async fn get_aircraft (&self)->Result<AircraftSnapshot> { self.fetch_json( AIRCRAFT_JSON).await }

    async fn get_receiver (&self)->Result<ReceiverInfo> { self.fetch_json( RECEIVER_JSON).await }

    async fn get_stats (&self)->Result<ReceiverStats> { self.fetch_json( STATS_JSON).await }

    async fn get_text (&self, url: &str)->Result<String> {
        debug!("GET {}", url);
        let response = self.client.get( url).send().await?.error_for_status()?;
        Ok( response.text().await? )
    }
}

/* #endregion ReadsbSource */
