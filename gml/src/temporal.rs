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

//! The `_TimePrimitive` family.

use std::fmt;
use std::str::FromStr;

use crate::base::AbstractTimePrimitive;
use crate::display::{FieldWriter, Fields};
use crate::error::Error;
use crate::registry::{Group, Head};

/// Stand-in for a time value that is not known exactly.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndeterminateValue {
    After,
    Before,
    Now,
    Unknown,
}

impl IndeterminateValue {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::After => "after",
            Self::Before => "before",
            Self::Now => "now",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for IndeterminateValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "after" => Ok(Self::After),
            "before" => Ok(Self::Before),
            "now" => Ok(Self::Now),
            "unknown" => Ok(Self::Unknown),
            _ => Err(Error::invalid("indeterminatePosition", s)),
        }
    }
}

/// A position in time, kept as the text given by the producer (usually
/// ISO 8601).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimePosition {
    pub value: String,
    /// Temporal reference system, `#ISO-8601` if absent.
    pub frame: Option<String>,
    pub calendar_era_name: Option<String>,
    pub indeterminate_position: Option<IndeterminateValue>,
}

impl TimePosition {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn indeterminate(value: IndeterminateValue) -> Self {
        Self {
            indeterminate_position: Some(value),
            ..Default::default()
        }
    }
}

impl fmt::Display for TimePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)?;
        if let Some(indeterminate) = self.indeterminate_position {
            if !self.value.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "({})", indeterminate.as_str())?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeInstant {
    pub time: AbstractTimePrimitive,
    pub position: TimePosition,
}

impl TimeInstant {
    pub fn new(position: TimePosition) -> Self {
        Self {
            time: AbstractTimePrimitive::default(),
            position,
        }
    }
}

impl Fields for TimeInstant {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.time.fields(w)?;
        w.field("timePosition", &self.position)
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimePeriod {
    pub time: AbstractTimePrimitive,
    pub begin: TimePosition,
    pub end: TimePosition,
    /// ISO 8601 duration, e.g. `P1D`.
    pub duration: Option<String>,
}

impl TimePeriod {
    pub fn new(begin: TimePosition, end: TimePosition) -> Self {
        Self {
            time: AbstractTimePrimitive::default(),
            begin,
            end,
            duration: None,
        }
    }
}

impl Fields for TimePeriod {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.time.fields(w)?;
        w.field("beginPosition", &self.begin)?;
        w.field("endPosition", &self.end)?;
        w.opt("duration", &self.duration)
    }
}

family! {
    /// Any member of `_TimePrimitive`.
    pub enum TimePrimitive in (Group::Abstract(Head::TimePrimitive)) {
        TimeInstant(TimeInstant),
        TimePeriod(TimePeriod),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indeterminate_positions_parse() {
        assert_eq!("now".parse::<IndeterminateValue>(), Ok(IndeterminateValue::Now));
        assert!("later".parse::<IndeterminateValue>().is_err());
    }

    #[test]
    fn period_renders_both_ends() {
        let period = TimePrimitive::TimePeriod(TimePeriod::new(
            TimePosition::new("2009-01-01T00:00:00Z"),
            TimePosition::indeterminate(IndeterminateValue::Unknown),
        ));
        assert_eq!(
            period.to_string(),
            "TimePeriod\n  beginPosition: 2009-01-01T00:00:00Z\n  endPosition: (unknown)"
        );
    }
}
