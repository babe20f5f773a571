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

//! angle normalization for degree values we get from external sources

use crate::geo_constants::FULL_CIRCLE_DEG;

/// normalize compass angles into [0,360)
/// note that tiny negative inputs would round up to exactly 360.0 when shifted, which we fold back to 0
#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = (d % FULL_CIRCLE_DEG + FULL_CIRCLE_DEG) % FULL_CIRCLE_DEG;
    if x >= FULL_CIRCLE_DEG { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_360 () {
        assert_eq!( normalize_360( 0.0), 0.0);
        assert_eq!( normalize_360( 360.0), 0.0);
        assert_eq!( normalize_360( -90.0), 270.0);
        assert_eq!( normalize_360( 725.0), 5.0);

        let x = normalize_360( -1.0e-15);
        assert!( x >= 0.0 && x < 360.0, "out of range: {x}");
    }
}
