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

use std::{path::Path,time::Duration};
use anyhow::Result;
use tokio::time::{MissedTickBehavior,interval};
use tracing::{info,warn,error};
use tracing_subscriber::EnvFilter;

use odin_common::define_cli;
use odin_readsb::{ReadsbConfig,load_config,mcp::{self,ReadsbMcpServer},service::ReadsbService};

const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

define_cli! { ARGS [about="MCP server for readsb / Ultrafeeder ADS-B receivers", version] =
    base_url: Option<String> [help="base URL for readsb/Ultrafeeder (default: http://localhost)", long],
    config: Option<String> [help="pathname of RON config file (default: lookup of odin_readsb/readsb.ron)", long],
    test: bool [help="run in test mode - test endpoints and keep running", long],
    no_routes: bool [help="disable route lookup for ranked aircraft", long]
}

#[tokio::main]
async fn main()->Result<()> {
    // stdout is reserved for protocol messages
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .with_writer( std::io::stderr)
        .init();
    info!("parsed args {:?}", *ARGS);

    let config = get_config()?;
    let service = ReadsbService::from_config( &config)?;

    if ARGS.test {
        run_test_mode( &service, config.heartbeat_interval).await;
    } else {
        if let Err(e) = mcp::serve_stdio( ReadsbMcpServer::new( service)).await {
            error!("MCP server error: {}", e);
            return Err( e.into())
        }
    }

    info!("server finished");
    Ok(())
}

fn get_config ()->Result<ReadsbConfig> {
    let mut config = load_config( ARGS.config.as_deref().map( Path::new))?;

    if let Some(base_url) = &ARGS.base_url {
        config.base_url = base_url.clone();
    }
    if ARGS.no_routes {
        config.route_lookup = None;
    }
    Ok(config)
}

async fn run_test_mode (service: &ReadsbService, heartbeat_interval: Duration) {
    info!("starting MCP server in test mode");

    info!("testing readsb endpoints...");
    if let Err(e) = service.probe_endpoints().await {
        error!("endpoint test failed: {}", e);
        warn!("server will still run, but endpoints may not work");
    }

    info!("MCP server is ready, use Ctrl+C to stop");

    let mut heartbeat = interval( heartbeat_interval.max( MIN_HEARTBEAT_INTERVAL));
    heartbeat.set_missed_tick_behavior( MissedTickBehavior::Delay);
    heartbeat.tick().await; // first tick completes immediately

    loop {
        tokio::select! {
            _ = heartbeat.tick() => info!("MCP server still running..."),
            _ = tokio::signal::ctrl_c() => {
                info!("server stopped by user");
                break
            }
        }
    }
}
