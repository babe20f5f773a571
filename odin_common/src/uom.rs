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

//! convenience ctors and accessors for the uom quantities we use in aviation contexts

use uom::si::{length::{meter,nautical_mile},f64::Length};

#[inline]
pub fn meters (len: f64)-> Length { Length::new::<meter>(len) }

/// shortcut for receiver ranges that are reported in meters but presented in nautical miles
#[inline]
pub fn meters_to_nautical_miles (len: f64)->f64 { meters(len).get::<nautical_mile>() }
