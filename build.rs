// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Stamps the resolved `arrow-array` version into the crate as
//! `SNOWFLAKE_ADBC_ARROW_VERSION`.
//!
//! A value already present in the environment wins, so packaging can pin it.
//! Otherwise the nearest `Cargo.lock` above the manifest directory is read.
//! When no lockfile lists `arrow-array` nothing is emitted and the driver
//! reports its unknown-version sentinel.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const ARROW_VERSION_ENV: &str = "SNOWFLAKE_ADBC_ARROW_VERSION";
const ARROW_PACKAGE: &str = "arrow-array";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={ARROW_VERSION_ENV}");

    if env::var_os(ARROW_VERSION_ENV).is_some() {
        return;
    }
    let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") else {
        return;
    };
    let Some(lockfile) = find_lockfile(Path::new(&manifest_dir)) else {
        return;
    };
    println!("cargo:rerun-if-changed={}", lockfile.display());

    match fs::read_to_string(&lockfile) {
        Ok(contents) => {
            if let Some(version) = locked_version(&contents, ARROW_PACKAGE) {
                println!("cargo:rustc-env={ARROW_VERSION_ENV}={version}");
            }
        }
        Err(e) => println!("cargo:warning=could not read {}: {e}", lockfile.display()),
    }
}

fn find_lockfile(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("Cargo.lock"))
        .find(|candidate| candidate.is_file())
}

fn locked_version(lockfile: &str, package: &str) -> Option<String> {
    let lock = lockfile.parse::<toml::Table>().ok()?;
    lock.get("package")?
        .as_array()?
        .iter()
        .filter_map(toml::Value::as_table)
        .find(|entry| entry.get("name").and_then(toml::Value::as_str) == Some(package))
        .and_then(|entry| entry.get("version"))
        .and_then(toml::Value::as_str)
        .map(str::to_string)
}
