// Type aliases for data values.
pub type Coords = Vec<f64>;
pub type Vertex2 = [f64; 2];
pub type Vertex3 = [f64; 3];

// Type aliases for data indices.
pub type VertexIdx = usize;

/// Indices of the `K + 1` vertices of a K-dimensional simplex.
pub type Simplex = Vec<VertexIdx>;

/// Indices of the `K` vertices of a simplex facet, sorted ascending when used as a key.
pub type Facet = Vec<VertexIdx>;

// Type aliases for mesh indices.
// This is to know, when a function accepts or returns a usize, what it is for.
pub type FaceIdx = usize;
pub type ComponentIdx = usize;
