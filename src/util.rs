/// How many children a node has, and on which side. Deletion and the
/// shape queries branch on this instead of re-checking both links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Degree {
    /// No children.
    Leaf,
    /// Only a left child.
    OnlyLeft,
    /// Only a right child.
    OnlyRight,
    /// Both children. Deleting this node promotes its predecessor's key.
    Full,
}

impl Degree {
    /// Whether this node has exactly one child.
    pub(crate) fn is_single_parent(self) -> bool {
        matches!(self, Degree::OnlyLeft | Degree::OnlyRight)
    }
}
