/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

//! RON based configuration lookup.
//!
//! Config files are searched in this order:
//! 1. `$ROVER_CONFIG_DIR/❬crate❭/❬file❭` and `$ROVER_CONFIG_DIR/❬file❭`
//! 2. `./configs/❬crate❭/❬file❭`
//! 3. `./configs/❬file❭`
//! 4. `❬crate-manifest-dir❭/configs/❬file❭` (the defaults that ship with the crate)

use std::{env, fs, path::{Path,PathBuf}};
use serde::de::DeserializeOwned;
use tracing::{debug,warn};

use crate::define_error;

pub const CONFIG_DIR_ENV: &str = "ROVER_CONFIG_DIR";

define_error!{ pub ConfigError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    RonError(#[from] ron::de::SpannedError) : "RON deserialization error: {0}",
    NotFound(String) : "config not found: {0}"
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// candidate paths for config `filename` of `resource_crate`, in lookup order
pub fn config_candidates (resource_crate: &str, manifest_dir: &str, filename: &str)->Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(5);

    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        let dir = PathBuf::from(dir);
        candidates.push( dir.join(resource_crate).join(filename));
        candidates.push( dir.join(filename));
    }

    let local = Path::new("configs");
    candidates.push( local.join(resource_crate).join(filename));
    candidates.push( local.join(filename));
    candidates.push( Path::new(manifest_dir).join("configs").join(filename));

    candidates
}

pub fn find_config_file (resource_crate: &str, manifest_dir: &str, filename: &str)->Option<PathBuf> {
    config_candidates( resource_crate, manifest_dir, filename).into_iter().find( |p| p.is_file())
}

pub fn load_config_from<C> (path: &Path)->Result<C> where C: DeserializeOwned {
    let data = fs::read(path)?;
    debug!("loading config {:?}", path);
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// parse a config from a RON string (used by tests and inline defaults)
pub fn config_from_str<C> (s: &str)->Result<C> where C: DeserializeOwned {
    Ok( ron::de::from_str(s)? )
}

/// this is the macro that needs to be expanded at the top of crates (lib.rs) that define configs.
/// It defines `load_config(filename)` (error if not found) and `load_config_or_default(filename)`
#[macro_export]
macro_rules! define_load_config {
    () => {
        /// load config using the rover_common lookup mechanism
        pub fn load_config<C> (filename: &str) -> $crate::config::Result<C> where C: serde::de::DeserializeOwned {
            match $crate::config::find_config_file( env!("CARGO_PKG_NAME"), env!("CARGO_MANIFEST_DIR"), filename) {
                Some(path) => $crate::config::load_config_from( &path),
                None => Err( $crate::config::ConfigError::NotFound( filename.to_string()))
            }
        }

        /// load config or fall back to `C::default()` if there is none (parse errors are still reported)
        pub fn load_config_or_default<C> (filename: &str) -> $crate::config::Result<C> where C: serde::de::DeserializeOwned + Default {
            match load_config( filename) {
                Err( $crate::config::ConfigError::NotFound(_)) => {
                    $crate::config::warn_default( filename);
                    Ok( C::default())
                }
                other => other
            }
        }
    }
}

#[doc(hidden)]
pub fn warn_default (filename: &str) {
    warn!("no config file {} found, using defaults", filename);
}
