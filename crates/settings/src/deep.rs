/// Recursion limit for dynamic traversal.
///
/// Depth counts path segments below a task's base directory, so direct
/// children sit at depth 1. `Limited(0)` walks nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "DeepRepr", into = "DeepRepr"))]
pub enum Deep {
    /// Walk the whole subtree.
    #[default]
    Unlimited,
    /// Walk at most this many levels below the base.
    Limited(usize),
}

impl Deep {
    /// Returns the finite limit, if any.
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Unlimited => None,
            Self::Limited(depth) => Some(depth),
        }
    }

    /// Returns `true` when entries at `depth` are within the limit.
    #[must_use]
    pub const fn allows(self, depth: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(max) => depth <= max,
        }
    }
}

impl From<bool> for Deep {
    fn from(unlimited: bool) -> Self {
        if unlimited {
            Self::Unlimited
        } else {
            Self::Limited(0)
        }
    }
}

impl From<usize> for Deep {
    fn from(depth: usize) -> Self {
        Self::Limited(depth)
    }
}

/// Wire form accepting both `"deep": true` and `"deep": 3`.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum DeepRepr {
    Flag(bool),
    Depth(usize),
}

#[cfg(feature = "serde")]
impl From<DeepRepr> for Deep {
    fn from(repr: DeepRepr) -> Self {
        match repr {
            DeepRepr::Flag(flag) => Self::from(flag),
            DeepRepr::Depth(depth) => Self::from(depth),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Deep> for DeepRepr {
    fn from(deep: Deep) -> Self {
        match deep {
            Deep::Unlimited => Self::Flag(true),
            Deep::Limited(depth) => Self::Depth(depth),
        }
    }
}
