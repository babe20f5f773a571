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

use std::sync::Arc;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use tracing::{debug,error,warn};

use crate::service::ReadsbService;
use super::tools::{call_tool,resource_list,tool_list};

pub const SERVER_NAME: &str = "readsb-mcp";

const INSTRUCTIONS: &str = "Live ADS-B data of a readsb/Ultrafeeder receiver: aircraft positions, receiver statistics, \
aircraft search and the closest aircraft or aircraft in a given direction from the receiver location.";

/// the MCP face of a [`ReadsbService`]
#[derive(Clone)]
pub struct ReadsbMcpServer {
    service: Arc<ReadsbService>,
}

impl ReadsbMcpServer {
    pub fn new (service: ReadsbService)->Self {
        ReadsbMcpServer { service: Arc::new(service) }
    }

    pub fn service (&self)->&ReadsbService { &self.service }

    pub fn tools (&self)->Vec<Tool> { tool_list() }

    pub fn resources (&self)->Vec<Resource> { resource_list( self.service.endpoints()) }

    /// run a tool. Failures are reported in the result (with `isError` set), never as protocol errors
    pub async fn call (&self, name: &str, args: &JsonObject)->CallToolResult {
        call_tool( &self.service, name, args).await
    }

    /// read one of our listed resources. Anything else is rejected as invalid params
    pub async fn read (&self, uri: &str)->Result<ReadResourceResult,McpError> {
        if !self.resources().iter().any( |r| r.uri == uri) {
            warn!("rejected read of unknown resource {}", uri);
            return Err( McpError::invalid_params( format!("Unknown resource: {}", uri), None))
        }

        match self.service.read_text( uri).await {
            Ok(text) => Ok( ReadResourceResult { contents: vec![ ResourceContents::text( text, uri) ] }),
            Err(e) => {
                error!("error reading resource {}: {}", uri, e);
                Err( McpError::internal_error( format!("Error reading resource {}: {}", uri, e), None))
            }
        }
    }
}

impl ServerHandler for ReadsbMcpServer {
    fn get_info (&self)->ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_resources().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some( INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools (&self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>)->Result<ListToolsResult,McpError> {
        Ok( ListToolsResult::with_all_items( self.tools()))
    }

    async fn call_tool (&self, request: CallToolRequestParam, _context: RequestContext<RoleServer>)->Result<CallToolResult,McpError> {
        let args = request.arguments.unwrap_or_default();
        Ok( self.call( &request.name, &args).await)
    }

    async fn list_resources (&self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>)->Result<ListResourcesResult,McpError> {
        Ok( ListResourcesResult::with_all_items( self.resources()))
    }

    async fn read_resource (&self, request: ReadResourceRequestParam, _context: RequestContext<RoleServer>)->Result<ReadResourceResult,McpError> {
        debug!("reading resource {}", request.uri);
        self.read( &request.uri).await
    }
}
