use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for object and layer IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Counter shared by every generated ID.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate `{prefix}_{n}`, skipping names that were already interned
/// (for example IDs that arrived inside a loaded snapshot).
fn fresh_name(prefix: &str) -> String {
    loop {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = format!("{prefix}_{n}");
        if !INTERNER.contains(&name) {
            return name;
        }
    }
}

/// Stable key of a drawable object inside the scene graph.
/// Internally a 4-byte `Spur` index, so copies and comparisons are cheap.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Spur);

impl ObjectId {
    /// Intern a string as an ObjectId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ObjectId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a unique ID with a type prefix (e.g. `rect_1`, `path_7`).
    pub fn with_prefix(prefix: &str) -> Self {
        Self::intern(&fresh_name(prefix))
    }
}

/// Identifier of an entry in the layer list.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(Spur);

impl LayerId {
    pub fn intern(s: &str) -> Self {
        LayerId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh `layer_N` ID.
    pub fn generate() -> Self {
        Self::intern(&fresh_name("layer"))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer:{}", self.as_str())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ObjectId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ObjectId::intern("hero_banner");
        let b = ObjectId::intern("hero_banner");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hero_banner");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ObjectId::with_prefix("rect");
        let b = ObjectId::with_prefix("rect");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("rect_"));
    }

    #[test]
    fn generated_ids_skip_loaded_names() {
        // Pre-intern the next few candidates as if a snapshot had carried them.
        let upcoming = COUNTER.load(Ordering::Relaxed);
        for n in upcoming..upcoming + 3 {
            ObjectId::intern(&format!("circle_{n}"));
        }
        let fresh = ObjectId::with_prefix("circle");
        let taken: Vec<String> = (upcoming..upcoming + 3)
            .map(|n| format!("circle_{n}"))
            .collect();
        assert!(!taken.iter().any(|t| t == fresh.as_str()));
    }

    #[test]
    fn layer_ids_are_unique() {
        assert_ne!(LayerId::generate(), LayerId::generate());
    }
}
