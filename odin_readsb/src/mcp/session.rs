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

//! serving a [`ReadsbMcpServer`] over a newline delimited byte stream (normally stdin/stdout).
//!
//! Input lines are checked before they reach the rmcp service: lines that are not UTF-8 or not JSON are answered
//! with a JSON-RPC parse error (id `null`) and the session continues. Everything else is passed through as is.

use rmcp::{ServiceExt, model::ErrorData};
use serde_json::{Value,json};
use tokio::{
    io::{AsyncBufReadExt,AsyncRead,AsyncWrite,AsyncWriteExt,BufReader,duplex,split},
    sync::mpsc::{Receiver,Sender,channel},
};
use tracing::{debug,info,warn};

use crate::errors::{Result,protocol_error};
use super::server::ReadsbMcpServer;

const PIPE_CAPACITY: usize = 64 * 1024;
const MAX_PENDING_LINES: usize = 64;

enum InputLine {
    Blank,
    Message(String),
    Malformed(String),
}

fn check_line (bytes: &[u8])->InputLine {
    let Ok(line) = std::str::from_utf8( bytes) else {
        return InputLine::Malformed( "invalid UTF-8".to_string())
    };

    let line = line.trim();
    if line.is_empty() {
        InputLine::Blank
    } else {
        match serde_json::from_str::<Value>( line) {
            Ok(_) => InputLine::Message( line.to_string()),
            Err(e) => InputLine::Malformed( e.to_string())
        }
    }
}

fn parse_error_line (reason: &str)->Vec<u8> {
    let error = ErrorData::parse_error( format!("Parse error: {}", reason), None);
    let mut line = json!({ "jsonrpc": "2.0", "id": null, "error": error }).to_string();
    line.push('\n');
    line.into_bytes()
}

/// serve MCP requests read from `input` until it is closed, writing responses to `output`
pub async fn serve<R,W> (server: ReadsbMcpServer, input: R, output: W)->Result<()>
    where R: AsyncRead + Unpin + Send + 'static, W: AsyncWrite + Unpin + Send + 'static
{
    let (service_io, session_io) = duplex( PIPE_CAPACITY);
    let (from_service, to_service) = split( session_io);
    let (tx, rx) = channel::<Vec<u8>>( MAX_PENDING_LINES);

    let writer = tokio::spawn( write_lines( rx, output));
    let relay = tokio::spawn( relay_responses( from_service, tx.clone()));
    let forward = tokio::spawn( forward_requests( input, to_service, tx));

    let res = match server.serve( split( service_io)).await {
        Ok(service) => {
            info!("MCP server ready");
            match service.waiting().await {
                Ok(reason) => { info!("MCP session ended: {:?}", reason); Ok(()) }
                Err(e) => Err( protocol_error( format!("MCP service terminated abnormally: {}", e)))
            }
        }
        Err(e) => Err( protocol_error( format!("MCP initialization failed: {}", e)))
    };

    // the service side of the pipe is closed now, drain what it has written
    forward.abort();
    let _ = relay.await;
    let _ = writer.await;
    res
}

/// serve on stdin/stdout
pub async fn serve_stdio (server: ReadsbMcpServer)->Result<()> {
    let (stdin, stdout) = rmcp::transport::stdio();
    serve( server, stdin, stdout).await
}

async fn forward_requests<R,W> (input: R, mut to_service: W, responses: Sender<Vec<u8>>)
    where R: AsyncRead + Unpin, W: AsyncWrite + Unpin
{
    let mut reader = BufReader::new( input);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until( b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => { warn!("error reading MCP input: {}", e); break }
        }

        match check_line( &buf) {
            InputLine::Blank => {}
            InputLine::Message(mut msg) => {
                msg.push('\n');
                if let Err(e) = to_service.write_all( msg.as_bytes()).await {
                    warn!("MCP service input closed: {}", e);
                    break
                }
            }
            InputLine::Malformed(reason) => {
                warn!("rejected malformed MCP input: {}", reason);
                if responses.send( parse_error_line( &reason)).await.is_err() { break }
            }
        }
    }

    debug!("MCP input closed");
    let _ = to_service.shutdown().await;
}

async fn relay_responses<R> (from_service: R, responses: Sender<Vec<u8>>) where R: AsyncRead + Unpin {
    let mut reader = BufReader::new( from_service);
    loop {
        let mut line = Vec::new();
        match reader.read_until( b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => if responses.send( line).await.is_err() { break }
            Err(e) => { warn!("error reading MCP service output: {}", e); break }
        }
    }
}

async fn write_lines<W> (mut lines: Receiver<Vec<u8>>, mut output: W) where W: AsyncWrite + Unpin {
    while let Some(line) = lines.recv().await {
        if let Err(e) = output.write_all( &line).await {
            warn!("error writing MCP output: {}", e);
            break
        }
        let _ = output.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_line () {
        assert!( matches!( check_line( b"  \r\n"), InputLine::Blank));
        assert!( matches!( check_line( b"{\"jsonrpc\":\"2.0\",\"method\":\"ping\",\"id\":1}\r\n"), InputLine::Message(m) if m.ends_with('}')));
        assert!( matches!( check_line( b"\xff\xfe garbage\n"), InputLine::Malformed(r) if r == "invalid UTF-8"));
        assert!( matches!( check_line( b"{not json\n"), InputLine::Malformed(_)));
    }

    #[test]
    fn test_parse_error_line () {
        let line = String::from_utf8( parse_error_line("invalid UTF-8")).unwrap();
        assert!( line.ends_with('\n'));

        let v: Value = serde_json::from_str( &line).unwrap();
        assert_eq!( v["id"], Value::Null);
        assert_eq!( v["error"]["code"], -32700);
        assert_eq!( v["error"]["message"], "Parse error: invalid UTF-8");
    }
}
