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

/// Expands the substitution group of a registry entry.
macro_rules! group {
    (root) => {
        None
    };
    (abstract $head:ident) => {
        Some(Group::Abstract(Head::$head))
    };
    (concrete $kind:ident) => {
        Some(Group::Concrete(Kind::$kind))
    };
}

/// Declares the closed set of concrete GML elements.
///
/// Each entry names the [`Kind`](crate::registry::Kind) variant, the element's
/// local name and the group it substitutes for. The lookup tables are plain
/// `match` expressions, so the registry is immutable and needs no
/// initialization.
macro_rules! registry {
    (
        $(
            $(#[$doc:meta])*
            $kind:ident => $element:literal in ($($group:tt)+)
        ),* $(,)?
    ) => {
        /// A concrete GML element known to this crate.
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Kind {
            $( $(#[$doc])* $kind, )*
        }

        impl Kind {
            /// All registered kinds in declaration order.
            pub const ALL: &'static [Kind] = &[ $( Kind::$kind, )* ];

            /// Returns the local name of the element in the GML namespace.
            pub const fn element(self) -> &'static str {
                match self {
                    $( Kind::$kind => $element, )*
                }
            }

            /// Returns the group this element is declared to substitute for,
            /// or `None` if it is not part of a substitution group.
            pub const fn substitution_group(self) -> Option<Group> {
                match self {
                    $( Kind::$kind => group!($($group)+), )*
                }
            }

            /// Looks up the kind by the element's local name.
            pub fn from_element(name: &str) -> Option<Kind> {
                match name {
                    $( $element => Some(Kind::$kind), )*
                    _ => None,
                }
            }
        }
    };
}

/// Declares a closed family of substitution-group members.
///
/// The enum variants are named after their [`Kind`](crate::registry::Kind),
/// which lets the macro derive the kind, the element encoding, the
/// tag-driven decoding and the field rendering from the variant alone.
///
/// ```
/// use gml::geometry::{AnyCurve, Geometry};
/// use gml::temporal::TimePrimitive;
/// use gml::{Group, Head, Kind, Variant};
///
/// assert_eq!(Geometry::GROUP, Group::Abstract(Head::Geometry));
/// assert_eq!(AnyCurve::GROUP, Group::Abstract(Head::Curve));
/// assert_eq!(TimePrimitive::GROUP, Group::Abstract(Head::TimePrimitive));
///
/// let curve: Geometry = gml::from_str(
///     r#"<gml:LineString xmlns:gml="http://www.opengis.net/gml">
///          <gml:posList>0 0 1 1</gml:posList>
///        </gml:LineString>"#,
/// )?;
/// assert_eq!(curve.kind(), Kind::LineString);
/// # Ok::<(), gml::Error>(())
/// ```
macro_rules! family {
    (
        $(#[$meta:meta])*
        pub enum $family:ident in ($group:expr) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($payload:ty),
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $family {
            $( $(#[$vmeta])* $variant($payload), )*
        }

        impl $crate::registry::Variant for $family {
            const GROUP: $crate::registry::Group = $group;

            fn kind(&self) -> $crate::registry::Kind {
                match self {
                    $( Self::$variant(_) => $crate::registry::Kind::$variant, )*
                }
            }

            fn encode(&self) -> $crate::xml::Element {
                let kind = self.kind();
                let mut element = $crate::xml::Element::gml(kind.element());
                match self {
                    $( Self::$variant(value) => {
                        $crate::codec::Content::write(value, kind, &mut element)
                    } )*
                }
                element
            }

            fn decode(
                kind: $crate::registry::Kind,
                element: &$crate::xml::Element,
            ) -> Result<Self, $crate::Error> {
                match kind {
                    $( $crate::registry::Kind::$variant => Ok(Self::$variant(
                        <$payload as $crate::codec::Content>::read(kind, element)?,
                    )), )*
                    #[allow(unreachable_patterns)]
                    other => Err($crate::Error::unsupported(
                        other.element(),
                        Self::GROUP.element(),
                    )),
                }
            }
        }

        impl std::fmt::Display for $family {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::registry::Variant;
                let mut w = $crate::display::FieldWriter::new(f, self.kind().element())?;
                match self {
                    $( Self::$variant(value) => $crate::display::Fields::fields(value, &mut w), )*
                }
            }
        }
    };
}

/// Converts between a family and one of its sub-families.
///
/// Widening is infallible, narrowing fails with
/// [`Error::UnsupportedVariant`](crate::Error::UnsupportedVariant) when the
/// value's kind is outside the sub-family.
macro_rules! narrow {
    ($sub:ident => $family:ident { $( $variant:ident ),* $(,)? }) => {
        impl From<$sub> for $family {
            fn from(value: $sub) -> Self {
                match value {
                    $( $sub::$variant(v) => $family::$variant(v), )*
                }
            }
        }

        impl TryFrom<$family> for $sub {
            type Error = $crate::Error;

            fn try_from(value: $family) -> Result<Self, Self::Error> {
                use $crate::registry::Variant;
                match value {
                    $( $family::$variant(v) => Ok($sub::$variant(v)), )*
                    #[allow(unreachable_patterns)]
                    other => Err($crate::Error::unsupported(
                        other.kind().element(),
                        <$sub as Variant>::GROUP.element(),
                    )),
                }
            }
        }
    };
}
