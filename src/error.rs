/// Reasons a vertex count / edge list pair cannot form a graph with an edge cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("number of vertices must be positive")]
    NoVertices,
    #[error("edge ({start}, {end}) has an endpoint outside 0..{vertices}")]
    VertexOutOfRange { start: u32, end: u32, vertices: u32 },
    #[error("self-loop on vertex {vertex} is not supported")]
    SelfLoop { vertex: u32 },
    #[error("vertex {vertex} is isolated, no edge cover exists")]
    IsolatedVertex { vertex: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("empty input")]
    Empty,
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("expected {expected} {what} lines, found {found}")]
    Count {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Graph(#[from] InvalidArgument),
}

impl ParseError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        ParseError::Malformed {
            line,
            message: message.into(),
        }
    }
}
