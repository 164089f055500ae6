use glauber_core::VertexId;

/// Creates a [`VertexId`] from an index.
pub(crate) fn make_vertex(index: usize) -> VertexId {
    VertexId::from_raw(index as u64)
}

/// Orders the endpoints of an undirected edge so that the smaller id comes first.
pub(crate) fn canonical_edge(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
