use std::convert::TryInto;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Refers to a triangle of a [TriangleMesh](crate::mesh_core::TriangleMesh).
///
/// Handles are small integers, assigned in increasing order as triangles are created. A
/// handle stays valid for the whole lifetime of its mesh: triangles are updated in place and
/// never removed.
///
/// The handle with index `0` is reserved, see [SENTINEL_HANDLE].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedTriangleHandle {
    index: u32,
}

/// The "no triangle" handle.
///
/// Used in neighbor slots of triangles on the mesh boundary. It must never be resolved as a
/// real triangle.
pub const SENTINEL_HANDLE: FixedTriangleHandle = FixedTriangleHandle::const_new(0);

impl FixedTriangleHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self::const_new(
            index
                .try_into()
                .expect("Index too big - at most 2^32 triangles supported"),
        )
    }

    const fn const_new(index: u32) -> Self {
        Self { index }
    }

    /// Returns the index of this handle.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Returns `true` if this is the reserved [SENTINEL_HANDLE].
    pub fn is_sentinel(&self) -> bool {
        self.index == 0
    }
}

impl std::fmt::Debug for FixedTriangleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_sentinel() {
            f.write_str("SentinelHandle")
        } else {
            f.debug_struct("FixedTriangleHandle")
                .field("index", &self.index)
                .finish()
        }
    }
}
