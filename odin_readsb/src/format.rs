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

//! human readable text renditions of readsb data and query results

use std::fmt::{self,Display,Write};
use num_format::{Locale,ToFormattedString};

use odin_common::uom::meters_to_nautical_miles;
use crate::{
    aircraft::{Aircraft,AircraftSnapshot,ReceiverInfo,ReceiverStats},
    routes::Routes,
    selector::{RankedAircraft,Selection},
    source::ReadsbEndpoints,
};

pub const UNKNOWN: &str = "Unknown";

const SEPARATOR_WIDTH: usize = 50;
const SEARCH_SEPARATOR_WIDTH: usize = 30;

fn or_unknown<T: Display> (v: Option<T>)->String {
    v.map( |v| v.to_string()).unwrap_or_else( || UNKNOWN.to_string())
}

pub(crate) fn thousands (n: u64)->String { n.to_formatted_string( &Locale::en) }

fn separator (width: usize)->String { "-".repeat( width) }

/// run a text writer fn on a new String. Writing into a String does not fail, hence the result is ignored
fn render<F> (capacity: usize, write_fn: F)->String where F: FnOnce(&mut String)->fmt::Result {
    let mut s = String::with_capacity( capacity);
    let _ = write_fn( &mut s);
    s
}

/* #region aircraft data ******************************************************************************************/

pub fn aircraft_summary (snapshot: &AircraftSnapshot, aircraft: &[&Aircraft], endpoints: &ReadsbEndpoints, limit: usize)->String {
    render( 256 + limit * 128, |w| write_aircraft_summary( w, snapshot, aircraft, endpoints, limit))
}

fn write_aircraft_summary (w: &mut impl Write, snapshot: &AircraftSnapshot, aircraft: &[&Aircraft], endpoints: &ReadsbEndpoints, limit: usize)->fmt::Result {
    let total = aircraft.len();
    let with_pos = aircraft.iter().filter( |a| a.has_position()).count();

    writeln!( w, "Aircraft Summary (Updated: {})", or_unknown( snapshot.timestamp()))?;
    writeln!( w, "Total Aircraft: {}", total)?;
    writeln!( w, "With Position: {}\n", with_pos)?;

    if !aircraft.is_empty() {
        w.write_str("Recent Aircraft:\n")?;
        for (i,a) in aircraft.iter().take( limit).enumerate() {
            writeln!( w, "{:2}. {:<8} ({})", i+1, a.callsign().unwrap_or(UNKNOWN), a.hex().unwrap_or(UNKNOWN))?;
            if let Some(hex) = a.hex() {
                writeln!( w, "     Map Link: {}", endpoints.map_link( hex))?;
            }
            writeln!( w, "     Alt: {} ft, Dist: {} nm", or_unknown( a.alt_baro), or_unknown( a.r_dst))?;
        }
        if total > limit {
            writeln!( w, "... and {} more aircraft", total - limit)?;
        }
    }
    Ok(())
}

pub fn search_results (query: &str, matches: &[&Aircraft], endpoints: &ReadsbEndpoints)->String {
    render( 64 + matches.len() * 192, |w| write_search_results( w, query, matches, endpoints))
}

fn write_search_results (w: &mut impl Write, query: &str, matches: &[&Aircraft], endpoints: &ReadsbEndpoints)->fmt::Result {
    write!( w, "Found {} aircraft matching '{}':\n\n", matches.len(), query)?;
    for a in matches {
        writeln!( w, "Callsign: {}", a.callsign().unwrap_or(UNKNOWN))?;
        writeln!( w, "Hex: {}", a.hex().unwrap_or(UNKNOWN))?;
        if let Some(hex) = a.hex() {
            writeln!( w, "Map Link: {}", endpoints.map_link( hex))?;
        }
        writeln!( w, "Altitude: {} ft", or_unknown( a.alt_baro))?;
        writeln!( w, "Position: {}, {}", or_unknown( a.lat), or_unknown( a.lon))?;
        writeln!( w, "{}", separator( SEARCH_SEPARATOR_WIDTH))?;
    }
    Ok(())
}

/* #endregion aircraft data */

/* #region receiver statistics ************************************************************************************/

pub fn stats_summary (stats: &ReceiverStats)->String {
    render( 256, |w| write_stats_summary( w, stats))
}

fn write_stats_summary (w: &mut impl Write, stats: &ReceiverStats)->fmt::Result {
    w.write_str("Receiver Statistics\n==================\n\n")?;

    if let Some(total) = &stats.total {
        writeln!( w, "Total Messages: {}", thousands( total.messages.unwrap_or(0)))?;
        writeln!( w, "Total Aircraft: {}", thousands( total.aircraft_with_pos.unwrap_or(0)))?;
    }
    if let Some(last1min) = &stats.last1min {
        w.write_str("\nLast Minute:\n")?;
        writeln!( w, "  Messages: {}", thousands( last1min.messages.unwrap_or(0)))?;
        writeln!( w, "  Aircraft: {}", thousands( last1min.aircraft_with_pos.unwrap_or(0)))?;
    }
    if stats.other.contains_key("cpu") {
        writeln!( w, "\nSystem Load: {}", or_unknown( stats.cpu_load()))?;
    }
    Ok(())
}

pub fn range_statistics (receiver: &ReceiverInfo, stats: &ReceiverStats)->String {
    render( 256, |w| write_range_statistics( w, receiver, stats))
}

fn write_range_statistics (w: &mut impl Write, receiver: &ReceiverInfo, stats: &ReceiverStats)->fmt::Result {
    w.write_str("Range Statistics\n================\n\n")?;

    if let (Some(lat), Some(lon)) = (receiver.lat, receiver.lon) {
        writeln!( w, "Receiver Location: {:.4}, {:.4}", lat, lon)?;
    }
    if let Some(max_distance) = stats.total.as_ref().and_then( |p| p.max_distance) {
        writeln!( w, "Max Range: {} meters or {:.1} nautical miles", max_distance, meters_to_nautical_miles( max_distance))?;
    }
    if let Some(max_distance) = stats.last15min.as_ref().and_then( |p| p.max_distance) {
        writeln!( w, "Last 15 Minutes Max Range: {} meters or {:.1} nautical miles", max_distance, meters_to_nautical_miles( max_distance))?;
    }
    Ok(())
}

/* #endregion receiver statistics */

/* #region ranked selections **************************************************************************************/

/// the message for selections without any matching aircraft, which depends on query sector and distance limit
pub fn empty_selection (selection: &Selection)->String {
    let query = &selection.query;
    match (query.sector, query.max_distance) {
        (None, Some(max)) => format!("No aircraft found within {} nautical miles of the feeder", max),
        (None, None) => "No aircraft found near the feeder at this time".to_string(),
        (Some(sector), Some(max)) => format!("No aircraft found to the {} within {} nautical miles of the feeder", sector, max),
        (Some(sector), None) => format!("No aircraft found to the {} of the feeder at this time", sector),
    }
}

pub fn ranked_selection (selection: &Selection, ranked: &[RankedAircraft<'_>], routes: &Routes, endpoints: &ReadsbEndpoints)->String {
    if ranked.is_empty() {
        empty_selection( selection)
    } else {
        render( 128 + ranked.len() * 320, |w| write_ranked_selection( w, selection, ranked, routes, endpoints))
    }
}

fn write_ranked_selection (w: &mut impl Write, selection: &Selection, ranked: &[RankedAircraft<'_>], routes: &Routes, endpoints: &ReadsbEndpoints)->fmt::Result {
    let reference = &selection.reference;

    match selection.query.sector {
        Some(sector) => {
            write!( w, "Aircraft to the {} of feeder ({:.4}, {:.4}):\n\n", sector, reference.lat, reference.lon)?;
            write!( w, "Found {} aircraft\n\n", ranked.len())?;
        }
        None => {
            write!( w, "Closest {} aircraft to feeder ({:.4}, {:.4}):\n\n", ranked.len(), reference.lat, reference.lon)?;
        }
    }

    for (i,r) in ranked.iter().enumerate() {
        let a = r.aircraft;
        let callsign = a.callsign();

        writeln!( w, "{}. {:<10} ({})", i+1, callsign.unwrap_or(UNKNOWN), a.hex().unwrap_or(UNKNOWN))?;
        if let Some(hex) = a.hex() {
            writeln!( w, "   Map Link: {}", endpoints.map_link( hex))?;
        }
        writeln!( w, "   Distance: {:.1} nm", r.distance_nm)?;
        if let Some(bearing) = r.bearing_deg {
            writeln!( w, "   Bearing: {:.1}°", bearing)?;
        }
        writeln!( w, "   Altitude: {} ft", or_unknown( a.alt_baro))?;
        writeln!( w, "   Speed: {} kts", or_unknown( a.gs))?;
        writeln!( w, "   Track: {}°", or_unknown( a.track))?;
        writeln!( w, "   Position: {:.4}, {:.4}", r.position.lat, r.position.lon)?;
        if let Some(route) = callsign.and_then( |cs| routes.get( cs)) {
            writeln!( w, "   Route: {}", route)?;
        }
        writeln!( w, "{}", separator( SEPARATOR_WIDTH))?;
    }
    Ok(())
}

/* #endregion ranked selections */
