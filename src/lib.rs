#![forbid(unsafe_code)]

//! Descriptor-driven marshaling between configuration structs and JSON
//!
//! A record type declares its schema once as an [`OptionTable`] of field
//! descriptors; the table then performs whole-record loads and saves
//! against a JSON object. Loading is a partial override: any key that is
//! absent or unreadable leaves the corresponding field at the value the
//! caller put there, so defaults live in the record, not in the engine.
//!
//! ```
//! use json_options::{json_option, JsonObject, OptionTable};
//!
//! struct Clock {
//!     format: String,
//!     interval: i64,
//!     blink: bool,
//! }
//!
//! let table = OptionTable::new(vec![
//!     json_option!(string, Clock, format),
//!     json_option!(int, Clock, interval, "interval_ms"),
//!     json_option!(bool, Clock, blink),
//! ]);
//!
//! let mut clock = Clock {
//!     format: "%H:%M".to_string(),
//!     interval: 1000,
//!     blink: false,
//! };
//!
//! let json: JsonObject = serde_json::from_str(r#"{"interval_ms": 500, "blink": "1"}"#).unwrap();
//! table.load(&json, &mut clock);
//!
//! assert_eq!(clock.format, "%H:%M"); // key absent, field untouched
//! assert_eq!(clock.interval, 500);
//! assert!(clock.blink);
//! ```

pub mod color;
pub mod enums;
pub mod options;
pub mod scalars;

pub use color::{Color, ParseColorError, Rgba};
pub use enums::{BOOL_TABLE, EnumPair, EnumTable};
pub use options::{FieldBinding, FieldKind, Lens, OptionDescriptor, OptionTable, TableError};

/// A JSON object as the engine sees it: string keys mapping to values,
/// member order preserved across overwrites
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
