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

use thiserror::Error;

pub type Result<T> = std::result::Result<T,OdinReadsbError>;

#[derive(Error,Debug)]
pub enum OdinReadsbError {

    /// invalid call parameters - the message is reported verbatim to the caller
    #[error("{0}")]
    ValidationError(String),

    /// data we need for a query is not available from the receiver
    #[error("{0}")]
    PreconditionError(String),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config error {0}")]
    ConfigError( #[from] odin_common::config::OdinConfigError),

    #[error("protocol error {0}")]
    ProtocolError(String),

    #[error("operation failed {0}")]
    OpFailed(String)
}

pub fn validation_error (msg: impl ToString)->OdinReadsbError {
    OdinReadsbError::ValidationError(msg.to_string())
}

pub fn precondition_error (msg: impl ToString)->OdinReadsbError {
    OdinReadsbError::PreconditionError(msg.to_string())
}

pub fn protocol_error (msg: impl ToString)->OdinReadsbError {
    OdinReadsbError::ProtocolError(msg.to_string())
}

pub fn op_failed (msg: impl ToString)->OdinReadsbError {
    OdinReadsbError::OpFailed(msg.to_string())
}
