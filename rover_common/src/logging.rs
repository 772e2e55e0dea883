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

use tracing_subscriber::EnvFilter;

/// install a global fmt subscriber that uses RUST_LOG to set the max level (default is `default_directive`).
/// Note this only succeeds if there is no global subscriber set yet, which is why we ignore the result
pub fn init_tracing (default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else( |_| EnvFilter::new( default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .try_init();
}
