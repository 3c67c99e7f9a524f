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

//! Property wrappers: a single value given inline or by reference, and
//! ordered arrays of family members.
//!
//! ```
//! use gml::geometry::Point;
//! use gml::Property;
//!
//! let mut location: Property<Point> = Property::reference("#arp");
//! assert_eq!(location.href(), Some("#arp"));
//! assert!(location.get_inline().is_none());
//!
//! location.set_inline(Point::xy(52.3, 13.5));
//! assert!(location.href().is_none());
//! assert_eq!(location.get_inline().and_then(|p| p.pos.x()), Some(52.3));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::registry::{self, Variant};

/// `xlink:show` values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Show {
    New,
    Replace,
    Embed,
    Other,
    None,
}

impl Show {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Replace => "replace",
            Self::Embed => "embed",
            Self::Other => "other",
            Self::None => "none",
        }
    }
}

impl FromStr for Show {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "replace" => Ok(Self::Replace),
            "embed" => Ok(Self::Embed),
            "other" => Ok(Self::Other),
            "none" => Ok(Self::None),
            _ => Err(Error::invalid("xlink:show", s)),
        }
    }
}

/// `xlink:actuate` values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Actuate {
    OnLoad,
    OnRequest,
    Other,
    None,
}

impl Actuate {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnLoad => "onLoad",
            Self::OnRequest => "onRequest",
            Self::Other => "other",
            Self::None => "none",
        }
    }
}

impl FromStr for Actuate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onLoad" => Ok(Self::OnLoad),
            "onRequest" => Ok(Self::OnRequest),
            "other" => Ok(Self::Other),
            "none" => Ok(Self::None),
            _ => Err(Error::invalid("xlink:actuate", s)),
        }
    }
}

/// The XLink attributes of a reference.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XLink {
    pub href: String,
    pub role: Option<String>,
    pub arcrole: Option<String>,
    pub title: Option<String>,
    pub show: Option<Show>,
    pub actuate: Option<Actuate>,
    /// `xlink:type`, `"simple"` unless the producer said otherwise.
    pub link_type: String,
    /// `gml:remoteSchema`.
    pub remote_schema: Option<String>,
}

/// The default `xlink:type`.
pub const SIMPLE_LINK: &str = "simple";

impl XLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            role: None,
            arcrole: None,
            title: None,
            show: None,
            actuate: None,
            link_type: SIMPLE_LINK.to_string(),
            remote_schema: None,
        }
    }
}

impl fmt::Display for XLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xlink:href={}", self.href)?;
        if let Some(title) = &self.title {
            write!(f, " ({title})")?;
        }
        Ok(())
    }
}

/// A property holding a value inline or a reference to it.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property<T> {
    Inline(Box<T>),
    Reference(XLink),
}

impl<T> Property<T> {
    pub fn inline(value: T) -> Self {
        Self::Inline(Box::new(value))
    }

    pub fn reference(href: impl Into<String>) -> Self {
        Self::Reference(XLink::new(href))
    }

    /// Returns the inline value, `None` for references.
    pub fn get_inline(&self) -> Option<&T> {
        match self {
            Self::Inline(value) => Some(value),
            Self::Reference(_) => None,
        }
    }

    pub fn get_inline_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Inline(value) => Some(value),
            Self::Reference(_) => None,
        }
    }

    pub fn into_inline(self) -> Option<T> {
        match self {
            Self::Inline(value) => Some(*value),
            Self::Reference(_) => None,
        }
    }

    /// Returns the reference target, `None` for inline values.
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Inline(_) => None,
            Self::Reference(link) => Some(&link.href),
        }
    }

    pub fn xlink(&self) -> Option<&XLink> {
        match self {
            Self::Inline(_) => None,
            Self::Reference(link) => Some(link),
        }
    }

    /// Stores the value inline, replacing a reference.
    pub fn set_inline(&mut self, value: T) {
        *self = Self::inline(value);
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

impl<T: Variant> Property<T> {
    /// Returns the element name the inline value is written as.
    pub fn tag(&self) -> Option<&'static str> {
        self.get_inline().map(|v| registry::wrap(v).tag())
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Self::inline(value)
    }
}

impl<T: fmt::Display> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(value) => value.fmt(f),
            Self::Reference(link) => link.fmt(f),
        }
    }
}

/// An ordered array of inline values, e.g. `segments` or `featureMembers`.
///
/// Order is preserved and duplicates are kept.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayProperty<T> {
    values: Vec<T>,
}

impl<T> Default for ArrayProperty<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T> ArrayProperty<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: T) {
        self.values.push(value);
    }

    pub fn get_all(&self) -> &[T] {
        &self.values
    }

    /// Replaces the contents with `values`, converting each one into `T`.
    ///
    /// All values are converted before anything is stored. If one of them
    /// fails, the array keeps its previous contents.
    ///
    /// ```
    /// use gml::geometry::{AnyCurve, Geometry, LineString, Point};
    /// use gml::{ArrayProperty, Error, Positions};
    ///
    /// let line = LineString::new(Positions::xy(&[(0.0, 0.0), (1.0, 1.0)]));
    /// let mut curves = ArrayProperty::<AnyCurve>::new();
    /// curves.add(AnyCurve::LineString(line.clone()));
    ///
    /// let result = curves.set_all([
    ///     Geometry::LineString(line.clone()),
    ///     Geometry::Point(Point::xy(1.0, 2.0)),
    /// ]);
    /// assert!(matches!(result, Err(Error::UnsupportedVariant { .. })));
    /// assert_eq!(curves.len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the conversion error of the first value that is not a member
    /// of `T`.
    pub fn set_all<I, V>(&mut self, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = V>,
        V: TryInto<T>,
        Error: From<V::Error>,
    {
        let converted = values
            .into_iter()
            .map(|v| v.try_into().map_err(Error::from))
            .collect::<Result<Vec<T>, Error>>()?;
        self.values = converted;
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T: Variant> ArrayProperty<T> {
    /// Returns the element name of every value.
    pub fn tags(&self) -> Vec<&'static str> {
        self.values.iter().map(|v| registry::wrap(v).tag()).collect()
    }
}

impl<T> FromIterator<T> for ArrayProperty<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ArrayProperty<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Members of an aggregate or collection: any number of single member
/// properties followed by an optional array.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Members<T> {
    /// Repeated `xxxMember` properties.
    pub member: Vec<Property<T>>,
    /// The `xxxMembers` array.
    pub members: Option<ArrayProperty<T>>,
}

impl<T> Default for Members<T> {
    fn default() -> Self {
        Self {
            member: Vec::new(),
            members: None,
        }
    }
}

impl<T> Members<T> {
    /// Adds an inline member property.
    pub fn push(&mut self, value: T) {
        self.member.push(Property::inline(value));
    }

    pub fn push_reference(&mut self, href: impl Into<String>) {
        self.member.push(Property::reference(href));
    }

    pub fn set_array(&mut self, members: ArrayProperty<T>) {
        self.members = Some(members);
    }

    /// Returns the inline values of the single member properties.
    pub fn inline(&self) -> impl Iterator<Item = &T> {
        self.member.iter().filter_map(Property::get_inline)
    }

    /// Returns all values: inline member properties first, then the array.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inline()
            .chain(self.members.iter().flat_map(ArrayProperty::iter))
    }

    pub fn is_empty(&self) -> bool {
        self.member.is_empty() && self.members.as_ref().is_none_or(ArrayProperty::is_empty)
    }
}
