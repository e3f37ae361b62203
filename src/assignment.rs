use std::fmt;

/// A single group assignment.
///
/// Allocators that accept optional group labels report an [`Assignment::Label`]
/// when labels were supplied and a 1-based [`Assignment::Index`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Assignment {
    /// 1-based group index.
    Index(usize),
    /// Caller-supplied group label.
    Label(String),
}

impl Assignment {
    /// Resolve a 0-based position against optional labels.
    pub(crate) fn resolve(position: usize, labels: Option<&[String]>) -> Self {
        match labels {
            Some(labels) => Assignment::Label(labels[position].clone()),
            None => Assignment::Index(position + 1),
        }
    }

    /// The 1-based index, if this is an index assignment.
    pub fn index(&self) -> Option<usize> {
        match self {
            Assignment::Index(index) => Some(*index),
            Assignment::Label(_) => None,
        }
    }

    /// The label, if this is a labelled assignment.
    pub fn label(&self) -> Option<&str> {
        match self {
            Assignment::Index(_) => None,
            Assignment::Label(label) => Some(label),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Index(index) => write!(f, "{}", index),
            Assignment::Label(label) => f.write_str(label),
        }
    }
}
