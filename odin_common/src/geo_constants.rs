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

//! common geodetic constants that should be consistent through ODIN applications

/// mean earth radius in nautical miles. This is what we use for all haversine distances that are
/// reported in nm (which is the unit of choice for anything aviation related)
pub const MEAN_EARTH_RADIUS_NM: f64 = 3440.065;

/// meters per (international) nautical mile
pub const METERS_PER_NM: f64 = 1852.0;

/// number of degrees in a full circle (upper, exclusive bound for normalized bearings)
pub const FULL_CIRCLE_DEG: f64 = 360.0;
