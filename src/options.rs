//! Option descriptors and the table-driven load/save engine
//!
//! A record type declares its JSON schema once as an ordered table of
//! descriptors; [`OptionTable::load`] and [`OptionTable::save`] then walk
//! the table instead of per-field hand-written code. Field access goes
//! through typed [`Lens`] pairs built by the [`json_option!`] macro, so a
//! descriptor can never address memory its record type does not have.

use std::fmt;
use thiserror::Error;
use tracing::warn;

use crate::JsonObject;
use crate::color::{Color, Rgba};
use crate::enums::EnumTable;
use crate::scalars;

/// Scalar type tag of one option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Enum,
    Int,
    Bool,
    Color,
    Rgba,
    String,
}

/// Statically-typed accessor pair into one field of a record
pub struct Lens<R, T> {
    pub get: fn(&R) -> &T,
    pub get_mut: fn(&mut R) -> &mut T,
}

impl<R, T> Clone for Lens<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Lens<R, T> {}

/// Typed binding of one option to its record field
///
/// Enum fields store their code as `i32`; int fields are `i64`, matching
/// the JSON number width.
pub enum FieldBinding<R> {
    Enum {
        lens: Lens<R, i32>,
        table: &'static EnumTable,
    },
    Int(Lens<R, i64>),
    Bool(Lens<R, bool>),
    Color(Lens<R, Color>),
    Rgba(Lens<R, Rgba>),
    String(Lens<R, String>),
}

/// One field's marshaling description: type tag, JSON key, field binding
pub struct OptionDescriptor<R> {
    pub kind: FieldKind,
    pub key: &'static str,
    pub binding: FieldBinding<R>,
}

impl<R> OptionDescriptor<R> {
    /// Whether the type tag agrees with the binding variant
    fn matches(&self) -> bool {
        matches!(
            (self.kind, &self.binding),
            (FieldKind::Enum, FieldBinding::Enum { .. })
                | (FieldKind::Int, FieldBinding::Int(_))
                | (FieldKind::Bool, FieldBinding::Bool(_))
                | (FieldKind::Color, FieldBinding::Color(_))
                | (FieldKind::Rgba, FieldBinding::Rgba(_))
                | (FieldKind::String, FieldBinding::String(_))
        )
    }
}

impl<R> fmt::Debug for OptionDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("option {key:?}: type tag does not match its field binding")]
    KindMismatch { key: &'static str },
    #[error("option descriptor with an empty key")]
    EmptyKey,
}

/// Ordered descriptor table for one record type
///
/// Built once per record type and shared read-only afterwards; `load` and
/// `save` never mutate the table.
pub struct OptionTable<R> {
    options: Vec<OptionDescriptor<R>>,
}

impl<R> OptionTable<R> {
    /// Build a table without validation, like the original declaration-only
    /// surface; a malformed descriptor is reported per call instead
    pub fn new(options: Vec<OptionDescriptor<R>>) -> Self {
        Self { options }
    }

    /// Fail-fast alternative to [`OptionTable::new`]: rejects empty keys and
    /// tag/binding mismatches at registration time
    pub fn validated(options: Vec<OptionDescriptor<R>>) -> Result<Self, TableError> {
        for descriptor in &options {
            if descriptor.key.is_empty() {
                return Err(TableError::EmptyKey);
            }
            if !descriptor.matches() {
                return Err(TableError::KindMismatch { key: descriptor.key });
            }
        }
        Ok(Self { options })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Read every described field from `json` into `record`
    ///
    /// This is a partial override, not reset-then-fill: each getter receives
    /// the field's current value as its default, so keys that are absent or
    /// unreadable leave the caller-initialized field untouched.
    pub fn load(&self, json: &JsonObject, record: &mut R) {
        for descriptor in &self.options {
            let key = descriptor.key;
            match (descriptor.kind, &descriptor.binding) {
                (FieldKind::Enum, FieldBinding::Enum { lens, table }) => {
                    let current = *(lens.get)(record);
                    *(lens.get_mut)(record) = scalars::get_enum(json, key, table, current);
                }
                (FieldKind::Int, FieldBinding::Int(lens)) => {
                    let current = *(lens.get)(record);
                    *(lens.get_mut)(record) = scalars::get_int(json, key, current);
                }
                (FieldKind::Bool, FieldBinding::Bool(lens)) => {
                    let current = *(lens.get)(record);
                    *(lens.get_mut)(record) = scalars::get_bool(json, key, current);
                }
                (FieldKind::Color, FieldBinding::Color(lens)) => {
                    let current = *(lens.get)(record);
                    *(lens.get_mut)(record) = scalars::get_color(json, key, current);
                }
                (FieldKind::Rgba, FieldBinding::Rgba(lens)) => {
                    let current = *(lens.get)(record);
                    *(lens.get_mut)(record) = scalars::get_rgba(json, key, current);
                }
                (FieldKind::String, FieldBinding::String(lens)) => {
                    if let Some(value) = scalars::try_get_str(json, key) {
                        let field = (lens.get_mut)(record);
                        // equal values keep the existing allocation
                        if field.as_str() != value {
                            *field = value.to_owned();
                        }
                    }
                }
                _ => warn!(key, "load: descriptor type tag does not match its field binding, skipping"),
            }
        }
    }

    /// Write every described field of `record` into `json`
    ///
    /// Described keys are overwritten in place; keys the table does not
    /// mention are left alone, so re-saving never reorders or drops a
    /// hand-added member.
    pub fn save(&self, json: &mut JsonObject, record: &R) {
        for descriptor in &self.options {
            let key = descriptor.key;
            match (descriptor.kind, &descriptor.binding) {
                (FieldKind::Enum, FieldBinding::Enum { lens, table }) => {
                    scalars::set_enum(json, key, table, *(lens.get)(record));
                }
                (FieldKind::Int, FieldBinding::Int(lens)) => {
                    scalars::set_int(json, key, *(lens.get)(record));
                }
                (FieldKind::Bool, FieldBinding::Bool(lens)) => {
                    scalars::set_bool(json, key, *(lens.get)(record));
                }
                (FieldKind::Color, FieldBinding::Color(lens)) => {
                    scalars::set_color(json, key, *(lens.get)(record));
                }
                (FieldKind::Rgba, FieldBinding::Rgba(lens)) => {
                    scalars::set_rgba(json, key, *(lens.get)(record));
                }
                (FieldKind::String, FieldBinding::String(lens)) => {
                    scalars::set_str(json, key, (lens.get)(record));
                }
                _ => warn!(key, "save: descriptor type tag does not match its field binding, skipping"),
            }
        }
    }
}

impl<R> fmt::Debug for OptionTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.options).finish()
    }
}

/// Declare one option descriptor for a field of a record type
///
/// The JSON key defaults to the field name; pass an explicit key as the
/// extra argument to override it. Enum options take the enum table last:
///
/// ```
/// use json_options::{json_option, EnumPair, EnumTable, OptionTable};
///
/// struct Panel {
///     width: i64,
///     edge: i32,
/// }
///
/// static EDGES: EnumTable = EnumTable::new(&[
///     EnumPair { value: 0, name: "top" },
///     EnumPair { value: 1, name: "bottom" },
/// ]);
///
/// let table = OptionTable::new(vec![
///     json_option!(int, Panel, width),
///     json_option!(enum, Panel, edge, "screen_edge", &EDGES),
/// ]);
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! json_option {
    (enum, $record:ty, $field:ident, $table:expr) => {
        $crate::json_option!(enum, $record, $field, stringify!($field), $table)
    };
    (enum, $record:ty, $field:ident, $key:expr, $table:expr) => {
        $crate::OptionDescriptor {
            kind: $crate::FieldKind::Enum,
            key: $key,
            binding: $crate::FieldBinding::<$record>::Enum {
                lens: $crate::Lens {
                    get: |record| &record.$field,
                    get_mut: |record| &mut record.$field,
                },
                table: $table,
            },
        }
    };
    (int, $record:ty, $field:ident) => {
        $crate::json_option!(int, $record, $field, stringify!($field))
    };
    (int, $record:ty, $field:ident, $key:expr) => {
        $crate::json_option!(@plain Int, $record, $field, $key)
    };
    (bool, $record:ty, $field:ident) => {
        $crate::json_option!(bool, $record, $field, stringify!($field))
    };
    (bool, $record:ty, $field:ident, $key:expr) => {
        $crate::json_option!(@plain Bool, $record, $field, $key)
    };
    (color, $record:ty, $field:ident) => {
        $crate::json_option!(color, $record, $field, stringify!($field))
    };
    (color, $record:ty, $field:ident, $key:expr) => {
        $crate::json_option!(@plain Color, $record, $field, $key)
    };
    (rgba, $record:ty, $field:ident) => {
        $crate::json_option!(rgba, $record, $field, stringify!($field))
    };
    (rgba, $record:ty, $field:ident, $key:expr) => {
        $crate::json_option!(@plain Rgba, $record, $field, $key)
    };
    (string, $record:ty, $field:ident) => {
        $crate::json_option!(string, $record, $field, stringify!($field))
    };
    (string, $record:ty, $field:ident, $key:expr) => {
        $crate::json_option!(@plain String, $record, $field, $key)
    };
    (@plain $variant:ident, $record:ty, $field:ident, $key:expr) => {
        $crate::OptionDescriptor {
            kind: $crate::FieldKind::$variant,
            key: $key,
            binding: $crate::FieldBinding::<$record>::$variant($crate::Lens {
                get: |record| &record.$field,
                get_mut: |record| &mut record.$field,
            }),
        }
    };
}
