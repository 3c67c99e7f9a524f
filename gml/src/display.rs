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

//! Text rendering of model values.
//!
//! Every family renders a label line with its element name followed by one
//! line per populated field. Fields of the abstract levels come first, each
//! level contributing its own before the concrete type adds the rest.

use std::fmt::{self, Display, Write};

/// Writes the field lines of a value.
pub struct FieldWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> FieldWriter<'a, 'b> {
    /// Writes the label line.
    pub fn new(f: &'a mut fmt::Formatter<'b>, label: &str) -> Result<Self, fmt::Error> {
        f.write_str(label)?;
        Ok(Self { f })
    }

    /// Writes a field. Nested multi-line values are indented below the
    /// field name.
    pub fn field(&mut self, name: &str, value: &dyn Display) -> fmt::Result {
        let rendered = value.to_string();
        write!(self.f, "\n  {name}: ")?;
        let mut lines = rendered.lines();
        if let Some(first) = lines.next() {
            self.f.write_str(first)?;
        }
        for line in lines {
            write!(self.f, "\n  {line}")?;
        }
        Ok(())
    }

    /// Writes the field if it is set.
    pub fn opt<T: Display>(&mut self, name: &str, value: &Option<T>) -> fmt::Result {
        match value {
            Some(v) => self.field(name, v),
            None => Ok(()),
        }
    }

    /// Writes the field if the text is not empty.
    pub fn text(&mut self, name: &str, value: &str) -> fmt::Result {
        if value.is_empty() {
            return Ok(());
        }
        self.field(name, &value)
    }

    /// Writes one line per item, numbered from zero.
    pub fn list<T: Display>(&mut self, name: &str, values: &[T]) -> fmt::Result {
        for (i, value) in values.iter().enumerate() {
            self.field(&format!("{name}[{i}]"), value)?;
        }
        Ok(())
    }

    /// Writes the ordinates space separated.
    pub fn ordinates(&mut self, name: &str, values: &[f64]) -> fmt::Result {
        if values.is_empty() {
            return Ok(());
        }
        let mut joined = String::new();
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                joined.push(' ');
            }
            write!(joined, "{v}")?;
        }
        self.field(name, &joined)
    }
}

/// A value that contributes field lines to its rendering.
pub trait Fields {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result;
}

/// Implements `Display` for a struct that is rendered under a fixed label.
macro_rules! display_fields {
    ($($ty:ty => $label:literal),* $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let mut w = $crate::display::FieldWriter::new(f, $label)?;
                    $crate::display::Fields::fields(self, &mut w)
                }
            }
        )*
    };
}

pub(crate) use display_fields;

#[cfg(test)]
mod tests {
    use super::*;

    struct Base {
        id: Option<String>,
    }

    struct Leaf {
        base: Base,
        values: Vec<f64>,
        tags: Vec<&'static str>,
    }

    impl Fields for Base {
        fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
            w.opt("id", &self.id)
        }
    }

    impl Fields for Leaf {
        fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
            self.base.fields(w)?;
            w.ordinates("values", &self.values)?;
            w.list("tags", &self.tags)
        }
    }

    display_fields!(Leaf => "Leaf");

    #[test]
    fn renders_base_fields_first_and_skips_empty_ones() {
        let leaf = Leaf {
            base: Base {
                id: Some("l1".to_string()),
            },
            values: vec![1.0, 2.5],
            tags: vec![],
        };
        assert_eq!(leaf.to_string(), "Leaf\n  id: l1\n  values: 1 2.5");

        let bare = Leaf {
            base: Base { id: None },
            values: vec![],
            tags: vec!["a", "b"],
        };
        assert_eq!(bare.to_string(), "Leaf\n  tags[0]: a\n  tags[1]: b");
    }

    #[test]
    fn indents_nested_values() {
        let inner = Leaf {
            base: Base {
                id: Some("inner".to_string()),
            },
            values: vec![],
            tags: vec![],
        };

        struct Outer(Leaf);
        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                FieldWriter::new(f, "Outer")?.field("member", &self.0)
            }
        }

        assert_eq!(
            Outer(inner).to_string(),
            "Outer\n  member: Leaf\n    id: inner"
        );
    }
}
