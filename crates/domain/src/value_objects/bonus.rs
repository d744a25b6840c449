//! Fixed-size bonus records indexed by a stat enum.
//!
//! Item and class bonuses arrive from the host as sparse maps keyed by stat
//! name. They are stored as one slot per enum variant so a missing key is an
//! explicit 0 rather than an absent property. Unknown keys are dropped.

/// Defines a `[i32; N]` record keyed by `$key`.
///
/// `$key` must provide `ALL: [$key; $len]`, `index(self) -> usize`,
/// `key(self) -> &'static str` and `from_key(&str) -> Option<$key>`.
macro_rules! define_bonus_record {
    ($(#[$meta:meta])* $name:ident, $key:ty, $len:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([i32; $len]);

        impl $name {
            /// All slots zero.
            pub const fn zero() -> Self {
                Self([0; $len])
            }

            /// Value for one key (0 when never set).
            pub fn get(&self, key: $key) -> i32 {
                self.0[key.index()]
            }

            pub fn set(&mut self, key: $key, value: i32) {
                self.0[key.index()] = value;
            }

            /// Builder-style setter.
            pub fn with(mut self, key: $key, value: i32) -> Self {
                self.set(key, value);
                self
            }

            /// Iterate `(key, value)` pairs in declaration order.
            pub fn iter(&self) -> impl Iterator<Item = ($key, i32)> + '_ {
                <$key>::ALL.into_iter().map(move |k| (k, self.get(k)))
            }

            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|v| *v == 0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            fn add(mut self, rhs: Self) -> Self {
                self += rhs;
                self
            }
        }

        /// Slot-wise addition, saturating at the `i32` bounds.
        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                for (slot, other) in self.0.iter_mut().zip(rhs.0) {
                    *slot = slot.saturating_add(other);
                }
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, b| acc + b)
            }
        }

        impl<'a> std::iter::Sum<&'a $name> for $name {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, b| acc + *b)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some($len))?;
                for (key, value) in self.iter() {
                    map.serialize_entry(key.key(), &value)?;
                }
                map.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                // `null` and non-map values read as all zero
                let raw = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                let mut record = Self::zero();
                if let serde_json::Value::Object(entries) = &raw {
                    for (name, value) in entries {
                        if let Some(key) = <$key>::from_key(name) {
                            record.set(key, $crate::value_objects::lenient::coerce_i32(value));
                        }
                    }
                }
                Ok(record)
            }
        }
    };
}

pub(crate) use define_bonus_record;
