use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The three record types a client may upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    File,
    Image,
}

impl FileKind {
    /// Converts a type string to its kind. Returns None for anything unaccepted.
    pub fn parse(s: &str) -> Option<FileKind> {
        match s {
            "folder" => Some(Self::Folder),
            "file" => Some(Self::File),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Image => "image",
        }
    }

    /// Folders never carry content bytes.
    #[must_use]
    pub const fn has_content(self) -> bool {
        !matches!(self, Self::Folder)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record lives in the folder tree.
///
/// On the wire the root is the integer `0` and any other parent is the id string
/// of a folder record. Inputs of `null`, `0` and `"0"` all mean root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParentRef {
    #[default]
    Root,
    Folder(String),
}

impl ParentRef {
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Returns the parent id, or None for root.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(id),
        }
    }

    /// Builds a reference from a stored column, where NULL is root.
    #[must_use]
    pub fn from_column(value: Option<String>) -> Self {
        value.map_or(Self::Root, Self::Folder)
    }

    /// Parses a query-string value. Empty and `0` mean root.
    #[must_use]
    pub fn from_query(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "0" {
            Self::Root
        } else {
            Self::Folder(value.to_string())
        }
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Root => serializer.serialize_u8(0),
            Self::Folder(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None | Some(Raw::Int(0)) => Self::Root,
            Some(Raw::Int(n)) => Self::Folder(n.to_string()),
            Some(Raw::Text(s)) => Self::from_query(&s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(FileKind::parse("folder"), Some(FileKind::Folder));
        assert_eq!(FileKind::parse("image"), Some(FileKind::Image));
        assert_eq!(FileKind::parse("Folder"), None);
        assert_eq!(FileKind::parse("video"), None);
    }

    #[test]
    fn test_parent_root_serializes_as_zero() {
        assert_eq!(serde_json::to_value(ParentRef::Root).unwrap(), 0);
        assert_eq!(
            serde_json::to_value(ParentRef::Folder("abc".into())).unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_parent_root_spellings() {
        for input in ["null", "0", "\"0\"", "\"\""] {
            let parent: ParentRef = serde_json::from_str(input).unwrap();
            assert!(parent.is_root(), "{input} should be root");
        }

        let parent: ParentRef = serde_json::from_str("\"f-1\"").unwrap();
        assert_eq!(parent, ParentRef::Folder("f-1".into()));
    }
}
