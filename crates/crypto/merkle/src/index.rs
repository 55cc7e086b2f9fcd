/// ``LeafIndex`` is the index of a leaf in the **bottom** layer of the ``tree``.
pub type LeafIndex = u64;

/// ``GeneralizedIndex`` is the index of a node in the ``tree``, the root being ``1``.
pub type GeneralizedIndex = u64;

/// Return the given bit of a generalized index.
/// Note: It is fine to pass ``LeafIndex`` to this function,
/// as the result will be the same.
pub(crate) fn get_generalized_index_bit(index: GeneralizedIndex, position: u64) -> bool {
    (index & (1 << position)) > 0
}

pub(crate) fn generalized_index_sibling(index: GeneralizedIndex) -> GeneralizedIndex {
    index ^ 1
}

pub(crate) fn generalized_index_parent(index: GeneralizedIndex) -> GeneralizedIndex {
    index / 2
}

/// Depth of the node at ``generalized_index``, the root being at depth ``0``.
///
/// ``generalized_index`` must be non-zero.
pub fn get_generalized_index_length(generalized_index: GeneralizedIndex) -> u64 {
    generalized_index.ilog2() as u64
}

/// Position of ``generalized_index`` within its own layer.
pub fn get_subtree_index(generalized_index: GeneralizedIndex) -> LeafIndex {
    generalized_index % (1 << get_generalized_index_length(generalized_index))
}

/// Return the generalized index of the leaf index with ``depth``.
pub fn generalized_index_from_leaf_index(leaf_index: LeafIndex, depth: u64) -> GeneralizedIndex {
    leaf_index + (1 << depth)
}

/// Express ``generalized_index`` relative to its ancestor ``levels`` layers above it.
pub(crate) fn generalized_index_below_ancestor(
    generalized_index: GeneralizedIndex,
    levels: u64,
) -> GeneralizedIndex {
    (generalized_index & ((1 << levels) - 1)) | (1 << levels)
}
