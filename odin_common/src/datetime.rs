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

use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize,Deserializer};
use std::time::Duration;
use std::fmt;
use parse_duration::parse;

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,PartialOrd)]
pub struct EpochMillis(i64);

impl EpochMillis {
    /// readsb and friends report fractional epoch seconds
    pub fn from_secs_f64(secs: f64)->Self { EpochMillis( (secs * 1000.0).round() as i64) }

    pub fn millis(&self)->i64 { self.0 }

    pub fn to_utc (&self)->Option<DateTime<Utc>> { DateTime::<Utc>::from_timestamp_millis( self.0) }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "{}ms", self.0)
        }
    }
}

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

/// serde support for human readable durations in config files (e.g. "10s" or "2min")
pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}
