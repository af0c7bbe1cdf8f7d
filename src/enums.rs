//! Bidirectional enum name tables
//!
//! Configuration files are hand-edited as often as they are machine-written,
//! so an enum field must accept either the symbolic name or the raw numeric
//! code and always re-serialize to the canonical symbolic form.

/// One (numeric code, symbolic name) entry of an enum table
#[derive(Debug, Clone, Copy)]
pub struct EnumPair {
    pub value: i32,
    pub name: &'static str,
}

/// Ordered name/value mapping for one enumeration
///
/// Tables are plain static data with process lifetime; construction is
/// `const` so they can be declared alongside the record type they describe.
#[derive(Debug, Clone, Copy)]
pub struct EnumTable {
    pairs: &'static [EnumPair],
}

/// Canonical boolean table: accepts "false"/"true" as well as "0"/"1",
/// serializes to "false"/"true" (the first match for each value wins)
pub static BOOL_TABLE: EnumTable = EnumTable::new(&[
    EnumPair { value: 0, name: "false" },
    EnumPair { value: 1, name: "true" },
    EnumPair { value: 0, name: "0" },
    EnumPair { value: 1, name: "1" },
]);

impl EnumTable {
    pub const fn new(pairs: &'static [EnumPair]) -> Self {
        Self { pairs }
    }

    /// Resolve a symbolic name (or numeric code spelled as digits) to its value
    ///
    /// Two-phase lookup: first the name is matched case-insensitively against
    /// the table; failing that, a string composed entirely of decimal digits
    /// is accepted as a literal code, but only when that code is a member of
    /// the table. Anything else resolves to `default`.
    pub fn name_to_value(&self, name: &str, default: i32) -> i32 {
        for pair in self.pairs {
            if pair.name.eq_ignore_ascii_case(name) {
                return pair.value;
            }
        }

        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
            return default;
        }

        match name.parse::<i32>() {
            Ok(value) if self.pairs.iter().any(|pair| pair.value == value) => value,
            _ => default,
        }
    }

    /// Resolve a value to its canonical name; first matching pair wins
    pub fn value_to_name<'a>(&self, value: i32, default: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|pair| pair.value == value)
            .map(|pair| pair.name)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ALIGNMENT: EnumTable = EnumTable::new(&[
        EnumPair { value: 0, name: "left" },
        EnumPair { value: 1, name: "center" },
        EnumPair { value: 2, name: "right" },
    ]);

    #[test]
    fn test_round_trip_every_entry() {
        for (value, name) in [(0, "left"), (1, "center"), (2, "right")] {
            assert_eq!(ALIGNMENT.name_to_value(name, -1), value);
            assert_eq!(ALIGNMENT.value_to_name(value, "?"), name);
        }
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        assert_eq!(ALIGNMENT.name_to_value("LEFT", -1), 0);
        assert_eq!(ALIGNMENT.name_to_value("Center", -1), 1);
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(ALIGNMENT.name_to_value("middle", 7), 7);
        assert_eq!(ALIGNMENT.name_to_value("", 7), 7);
    }

    #[test]
    fn test_numeric_string_accepted_only_when_member() {
        // "2" is a member value, "9" is not
        assert_eq!(ALIGNMENT.name_to_value("2", -1), 2);
        assert_eq!(ALIGNMENT.name_to_value("9", -1), -1);
        // digits mixed with anything else never reach the numeric phase
        assert_eq!(ALIGNMENT.name_to_value("2x", -1), -1);
        assert_eq!(ALIGNMENT.name_to_value("-2", -1), -1);
    }

    #[test]
    fn test_overlong_digit_string_falls_back() {
        assert_eq!(ALIGNMENT.name_to_value("99999999999999999999", -1), -1);
    }

    #[test]
    fn test_value_to_name_first_match_wins() {
        // BOOL_TABLE maps 0 to both "false" and "0"; the first entry wins
        assert_eq!(BOOL_TABLE.value_to_name(0, "?"), "false");
        assert_eq!(BOOL_TABLE.value_to_name(1, "?"), "true");
        assert_eq!(BOOL_TABLE.value_to_name(5, "?"), "?");
    }

    #[test]
    fn test_bool_table_accepts_all_spellings() {
        assert_eq!(BOOL_TABLE.name_to_value("true", 0), 1);
        assert_eq!(BOOL_TABLE.name_to_value("FALSE", 1), 0);
        assert_eq!(BOOL_TABLE.name_to_value("1", 0), 1);
        assert_eq!(BOOL_TABLE.name_to_value("0", 1), 0);
    }
}
