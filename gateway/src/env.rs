// ShareIt
// Copyright 2025 The ShareIt Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Utilities to deal with environment variables.

use std::env;
use std::str::FromStr;

/// Result type for environment errors.
type Result<T> = std::result::Result<T, String>;

/// Gets a required environment variable whose name is `<prefix>_<suffix>` and parses it as `T`.
pub fn get_required_var<T: FromStr>(prefix: &str, suffix: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let name = format!("{}_{}", prefix, suffix);
    match env::var(&name) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|e| format!("Invalid value in environment variable {}: {}", name, e)),
        Err(env::VarError::NotPresent) => {
            Err(format!("Required environment variable {} not present", name))
        }
        Err(env::VarError::NotUnicode(_)) => {
            Err(format!("Invalid value in environment variable {}", name))
        }
    }
}

/// Gets an optional environment variable whose name is `<prefix>_<suffix>` and parses it as `T`.
pub fn get_optional_var<T: FromStr>(prefix: &str, suffix: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    let name = format!("{}_{}", prefix, suffix);
    match env::var(&name) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value in environment variable {}: {}", name, e)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(format!("Invalid value in environment variable {}", name))
        }
    }
}
