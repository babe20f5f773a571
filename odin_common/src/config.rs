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

//! lookup and loading of RON config files.
//! Configs for crate `C` are looked up as `configs/C/<filename>` below the following root dirs (in this order):
//!
//! 1. `$ODIN_ROOT`
//! 2. `$HOME/.odin`
//!
//! Applications can bypass the lookup by passing an explicit path to [`load_config_path`]

use std::{env, fs, path::{Path,PathBuf}};
use serde::de::DeserializeOwned;
use crate::define_error;

pub const CONFIGS: &'static str = "configs";

define_error!{ pub OdinConfigError =
    IOError( #[from] std::io::Error) : "IO error: {0}",
    RonError( #[from] ron::de::SpannedError) : "RON deserialization error: {0}",
    NotFound(String) : "config not found: {0}"
}

pub type Result<T> = std::result::Result<T,OdinConfigError>;

/// the root dirs we search for configs, in order of precedence
pub fn config_roots ()->Vec<PathBuf> {
    let mut roots = Vec::with_capacity(2);
    if let Ok(odin_root) = env::var("ODIN_ROOT") {
        roots.push( PathBuf::from( odin_root));
    }
    if let Ok(usr_home) = env::var("HOME") {
        roots.push( Path::new( usr_home.as_str()).join(".odin"));
    }
    roots
}

pub fn find_config_file (resource_crate: &str, filename: &str) -> Option<PathBuf> {
    find_config_file_in( &config_roots(), resource_crate, filename)
}

pub fn find_config_file_in (roots: &[PathBuf], resource_crate: &str, filename: &str) -> Option<PathBuf> {
    roots.iter()
        .map( |root| root.join( CONFIGS).join( resource_crate).join( filename))
        .find( |path| path.is_file())
}

/// load config from explicit path
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let data = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// load config through standard lookup. Returns `NotFound` if there is no config file for `resource_crate`
pub fn load_config<C> (resource_crate: &str, filename: &str) -> Result<C> where C: DeserializeOwned {
    match find_config_file( resource_crate, filename) {
        Some(path) => load_config_path( path),
        None => Err( OdinConfigError::NotFound( format!("{}/{}", resource_crate, filename)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize,Debug)]
    struct TestConfig {
        url: String,
        max: usize,
    }

    #[test]
    fn test_lookup_and_load () {
        let root = env::temp_dir().join( format!("odin_config_test_{}", std::process::id()));
        let dir = root.join( CONFIGS).join( "test_crate");
        fs::create_dir_all( &dir).unwrap();
        fs::write( dir.join( "test.ron"), r#"TestConfig( url: "http://localhost", max: 42 )"#).unwrap();

        let roots = vec![ root.join("does_not_exist"), root.clone() ];
        let path = find_config_file_in( &roots, "test_crate", "test.ron").expect("config not found");
        let config: TestConfig = load_config_path( &path).unwrap();
        assert_eq!( config.url, "http://localhost");
        assert_eq!( config.max, 42);

        assert!( find_config_file_in( &roots, "test_crate", "other.ron").is_none());
        fs::remove_dir_all( &root).unwrap();
    }
}
