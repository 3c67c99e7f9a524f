// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
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

//! Coordinate reference systems named by `srsName`.
//!
//! The library does not carry a CRS database. A [`CrsResolver`] turns a
//! name into a [`Crs`] descriptor; [`AuthorityResolver`] understands the
//! usual spellings of EPSG codes and `CRS:84`. A name that cannot be resolved
//! is not an error: [`resolve_crs`] logs a warning and returns `None`.

use std::fmt;

use log::warn;

use crate::base::AbstractGeometry;

/// A CRS identified by an authority and a code, e.g. `EPSG` and `4326`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crs {
    pub authority: String,
    pub code: String,
}

impl Crs {
    pub fn new(authority: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            code: code.into(),
        }
    }

    pub fn epsg(code: u32) -> Self {
        Self::new("EPSG", code.to_string())
    }

    /// WGS 84 with longitude first.
    pub fn crs84() -> Self {
        Self::new("OGC", "CRS84")
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

/// Looks up the CRS named by an `srsName`.
pub trait CrsResolver {
    fn resolve(&self, srs_name: &str) -> Option<Crs>;
}

/// Resolves EPSG codes and `CRS:84` from their name alone.
///
/// Accepted forms:
///
/// - `EPSG:4326`
/// - `urn:ogc:def:crs:EPSG::4326`, also with a version or the `x-ogc` prefix
/// - `http://www.opengis.net/gml/srs/epsg.xml#4326`
/// - `CRS:84` and `urn:ogc:def:crs:OGC:1.3:CRS84`
///
/// ```
/// use gml::crs::{AuthorityResolver, Crs, CrsResolver};
///
/// let resolver = AuthorityResolver;
/// assert_eq!(resolver.resolve("urn:ogc:def:crs:EPSG::4326"), Some(Crs::epsg(4326)));
/// assert_eq!(resolver.resolve("local-grid"), None);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct AuthorityResolver;

fn epsg(code: &str) -> Option<Crs> {
    code.parse::<u32>().ok().map(Crs::epsg)
}

impl CrsResolver for AuthorityResolver {
    fn resolve(&self, srs_name: &str) -> Option<Crs> {
        let name = srs_name.trim();

        if name.eq_ignore_ascii_case("CRS:84") || name == "urn:ogc:def:crs:OGC:1.3:CRS84" {
            return Some(Crs::crs84());
        }
        if let Some(code) = name.strip_prefix("EPSG:") {
            return epsg(code);
        }
        if let Some(code) = name.strip_prefix("http://www.opengis.net/gml/srs/epsg.xml#") {
            return epsg(code);
        }

        // urn:ogc:def:crs:EPSG:[version]:code
        name.strip_prefix("urn:ogc:def:crs:EPSG:")
            .or_else(|| name.strip_prefix("urn:x-ogc:def:crs:EPSG:"))
            .and_then(|rest| rest.rsplit(':').next())
            .and_then(epsg)
    }
}

/// Resolves `srs_name`, logging a warning if the resolver does not know it.
pub fn resolve_crs(srs_name: &str, resolver: &dyn CrsResolver) -> Option<Crs> {
    let crs = resolver.resolve(srs_name);
    if crs.is_none() {
        warn!("unresolved CRS {srs_name:?}, continuing without one");
    }
    crs
}

impl AbstractGeometry {
    /// Resolves the `srsName` of the geometry. A geometry without an
    /// `srsName` has no CRS of its own and yields `None` silently.
    pub fn crs(&self, resolver: &dyn CrsResolver) -> Option<Crs> {
        self.srs
            .srs_name
            .as_deref()
            .and_then(|name| resolve_crs(name, resolver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_the_common_epsg_spellings() {
        let resolver = AuthorityResolver;
        for name in [
            "EPSG:4326",
            "urn:ogc:def:crs:EPSG::4326",
            "urn:ogc:def:crs:EPSG:6.6:4326",
            "urn:x-ogc:def:crs:EPSG:4326",
            "http://www.opengis.net/gml/srs/epsg.xml#4326",
        ] {
            assert_eq!(resolver.resolve(name), Some(Crs::epsg(4326)), "{name}");
        }
        assert_eq!(resolver.resolve("CRS:84"), Some(Crs::crs84()));
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let resolver = AuthorityResolver;
        assert_eq!(resolve_crs("EPSG:abc", &resolver), None);
        assert_eq!(resolve_crs("urn:ogc:def:crs:EPSG::", &resolver), None);

        let geometry = AbstractGeometry::with_srs("my-local-grid");
        assert_eq!(geometry.crs(&resolver), None);
        assert_eq!(AbstractGeometry::default().crs(&resolver), None);
    }

    #[test]
    fn geometry_resolves_its_srs_name() {
        let geometry = AbstractGeometry::with_srs("EPSG:25832");
        let crs = geometry.crs(&AuthorityResolver);
        assert_eq!(crs.map(|c| c.to_string()), Some("EPSG:25832".to_string()));
    }
}
