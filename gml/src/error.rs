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

use std::convert::Infallible;
use std::fmt;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// An XML parsing or writing error from the underlying reader/writer.
    Xml(String),
    /// An element (or a value of a kind) that is not a member of the
    /// substitution group expected at this position.
    UnsupportedVariant {
        element: String,
        expected: &'static str,
    },
    /// A required element or attribute is missing.
    MissingField(&'static str),
    /// A value could not be parsed (e.g. an ordinate or a count).
    InvalidValue { field: &'static str, value: String },
    /// The geometry operation exists in the API but has no implementation.
    NotYetImplemented { operation: &'static str },
    /// Writing the encoded document failed.
    Io(String),
}

impl Error {
    pub(crate) fn unsupported(element: impl Into<String>, expected: &'static str) -> Self {
        Self::UnsupportedVariant {
            element: element.into(),
            expected,
        }
    }

    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "XML error: {e}"),
            Self::UnsupportedVariant { element, expected } => {
                write!(f, "{element} is not a member of {expected}")
            }
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid value for {field}: {value}")
            }
            Self::NotYetImplemented { operation } => {
                write!(f, "geometry operation {operation} is not implemented")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<Infallible> for Error {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
