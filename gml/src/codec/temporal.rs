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

use super::{attribute, read_time, required, text_element, value_of, write_time, Content};
use crate::error::Error;
use crate::registry::Kind;
use crate::temporal::{TimeInstant, TimePeriod, TimePosition};
use crate::xml::Element;

fn position_element(name: &str, position: &TimePosition) -> Element {
    let mut element = text_element(name, position.value.clone());
    if let Some(frame) = &position.frame {
        element.set_attribute("frame", frame.clone());
    }
    if let Some(era) = &position.calendar_era_name {
        element.set_attribute("calendarEraName", era.clone());
    }
    if let Some(indeterminate) = position.indeterminate_position {
        element.set_attribute("indeterminatePosition", indeterminate.as_str());
    }
    element
}

fn read_position(element: &Element) -> Result<TimePosition, Error> {
    Ok(TimePosition {
        value: element.text().to_string(),
        frame: element.attribute("frame").map(str::to_string),
        calendar_era_name: element.attribute("calendarEraName").map(str::to_string),
        indeterminate_position: attribute(element, "indeterminatePosition")?,
    })
}

impl Content for TimeInstant {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_time(&self.time, element);
        element.push(position_element("timePosition", &self.position));
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            time: read_time(element)?,
            position: read_position(required(element, "timePosition")?)?,
        })
    }
}

/// Reads one end of a period from `beginPosition`, or from a `begin`
/// property holding a `TimeInstant`.
fn read_end(
    element: &Element,
    position: &'static str,
    property: &'static str,
) -> Result<TimePosition, Error> {
    if let Some(value) = element.child(position) {
        return read_position(value);
    }

    let instant = required(element, property)?;
    let instant = value_of(instant)
        .filter(|i| i.is_gml() && i.name == "TimeInstant")
        .ok_or(Error::MissingField(position))?;
    read_position(required(instant, "timePosition")?)
}

impl Content for TimePeriod {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_time(&self.time, element);
        element.push(position_element("beginPosition", &self.begin));
        element.push(position_element("endPosition", &self.end));
        if let Some(duration) = &self.duration {
            element.push(text_element("duration", duration.clone()));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            time: read_time(element)?,
            begin: read_end(element, "beginPosition", "begin")?,
            end: read_end(element, "endPosition", "end")?,
            duration: element.child("duration").map(|d| d.text().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ReaderConfig;
    use crate::registry;
    use crate::temporal::{IndeterminateValue, TimePosition, TimePrimitive};
    use crate::xml::read_document;

    fn decode(xml: &[u8]) -> TimePrimitive {
        let root = read_document(xml, &ReaderConfig::default()).unwrap();
        registry::unwrap(&root.name, &root).unwrap()
    }

    #[test]
    fn period_accepts_instants_for_its_ends() {
        let time = decode(
            br#"<gml:TimePeriod xmlns:gml="http://www.opengis.net/gml">
                  <gml:begin><gml:TimeInstant><gml:timePosition>2009-01-01</gml:timePosition></gml:TimeInstant></gml:begin>
                  <gml:endPosition indeterminatePosition="now"/>
                </gml:TimePeriod>"#,
        );

        let TimePrimitive::TimePeriod(period) = time else {
            panic!("expected a TimePeriod");
        };
        assert_eq!(period.begin, TimePosition::new("2009-01-01"));
        assert_eq!(period.end, TimePosition::indeterminate(IndeterminateValue::Now));
    }

    #[test]
    fn instant_keeps_position_attributes() {
        let time = decode(
            br##"<gml:TimeInstant xmlns:gml="http://www.opengis.net/gml" gml:id="t1">
                  <gml:timePosition frame="#ISO-8601" calendarEraName="Gregorian">2010-05-01</gml:timePosition>
                </gml:TimeInstant>"##,
        );

        let TimePrimitive::TimeInstant(instant) = time else {
            panic!("expected a TimeInstant");
        };
        assert_eq!(instant.time.gml.id.as_deref(), Some("t1"));
        assert_eq!(instant.position.frame.as_deref(), Some("#ISO-8601"));
        assert_eq!(instant.position.calendar_era_name.as_deref(), Some("Gregorian"));
    }
}
