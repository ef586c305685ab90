use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for shape names.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned shape name, e.g. the `clip` tag of the workspace marker.
/// Internally a 4-byte `Spur` index, so comparisons are O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameTag(Spur);

impl NameTag {
    /// Intern a string as a tag, or return the existing one.
    pub fn intern(s: &str) -> Self {
        NameTag(INTERNER.get_or_intern(s))
    }

    /// Look up a tag without interning. `None` means no shape can carry it.
    pub fn get(s: &str) -> Option<Self> {
        INTERNER.get(s).map(NameTag)
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for NameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NameTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NameTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NameTag::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let a = NameTag::intern("clip");
        let b = NameTag::intern("clip");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "clip");
    }

    #[test]
    fn get_does_not_intern() {
        assert!(NameTag::get("never_interned_tag_xyz").is_none());
        let t = NameTag::intern("interned_tag_xyz");
        assert_eq!(NameTag::get("interned_tag_xyz"), Some(t));
    }
}
