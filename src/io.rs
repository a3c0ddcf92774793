//! Text formats at the edge of the crate.
//!
//! Graph input is `n m` followed by `m` lines of `u v`. A solution is written as
//! `n m k`, the `m` graph edges, then the `k` cover edges.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crate::{Cover, Graph, InvalidArgument, ParseError};

pub fn parse_graph(reader: impl BufRead) -> Result<Graph, ParseError> {
    let mut lines = content_lines(reader);
    let (line, header) = lines.next().ok_or(ParseError::Empty)??;
    let [vertices, edge_count] = parse_numbers::<2>(line, &header)?;
    let edges = read_edges(&mut lines, edge_count as usize, "edge")?;
    ensure_exhausted(lines, "edge", edge_count as usize)?;
    Ok(Graph::new(vertices, edges)?)
}

/// A graph together with a cover, as read back from the solution format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub vertices: u32,
    pub edges: Vec<(u32, u32)>,
    pub cover: Cover,
}

impl Solution {
    pub fn graph(&self) -> Result<Graph, InvalidArgument> {
        Graph::new(self.vertices, self.edges.clone())
    }
}

/// Reads the solution format without judging the cover.
pub fn parse_solution(reader: impl BufRead) -> Result<Solution, ParseError> {
    let mut lines = content_lines(reader);
    let (line, header) = lines.next().ok_or(ParseError::Empty)??;
    let [vertices, edge_count, cover_size] = parse_numbers::<3>(line, &header)?;
    let edges = read_edges(&mut lines, edge_count as usize, "edge")?;
    let cover = read_edges(&mut lines, cover_size as usize, "cover")?;
    ensure_exhausted(lines, "cover", cover_size as usize)?;
    Ok(Solution {
        vertices,
        edges,
        cover: Cover::from(cover),
    })
}

pub fn write_solution(mut writer: impl Write, graph: &Graph, cover: &Cover) -> io::Result<()> {
    writer.write_all(graph.format_solution(cover).as_bytes())?;
    writer.flush()
}

impl Graph {
    pub fn format_solution(&self, cover: &Cover) -> String {
        let mut output = String::new();
        let _ = writeln!(
            &mut output,
            "{} {} {}",
            self.vertices(),
            self.edge_count(),
            cover.len()
        );
        for (start, end) in self.edges().iter().chain(cover.iter()) {
            let _ = writeln!(&mut output, "{start} {end}");
        }
        output
    }
}

// Non-blank lines with their 1-based line numbers.
fn content_lines(
    reader: impl BufRead,
) -> impl Iterator<Item = Result<(usize, String), ParseError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(Ok((i + 1, line))),
            Err(err) => Some(Err(ParseError::Io(err))),
        })
}

fn parse_numbers<const N: usize>(line: usize, text: &str) -> Result<[u32; N], ParseError> {
    let mut values = [0u32; N];
    let mut tokens = text.split_whitespace();
    for value in values.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| ParseError::malformed(line, format!("expected {N} numbers")))?;
        *value = token
            .parse()
            .map_err(|_| ParseError::malformed(line, format!("invalid number `{token}`")))?;
    }
    if tokens.next().is_some() {
        return Err(ParseError::malformed(line, format!("expected {N} numbers")));
    }
    Ok(values)
}

fn read_edges(
    lines: &mut impl Iterator<Item = Result<(usize, String), ParseError>>,
    count: usize,
    what: &'static str,
) -> Result<Vec<(u32, u32)>, ParseError> {
    // The header count is untrusted until the lines arrive.
    let mut edges = Vec::with_capacity(count.min(1 << 16));
    for found in 0..count {
        let Some(next) = lines.next() else {
            return Err(ParseError::Count {
                what,
                expected: count,
                found,
            });
        };
        let (line, text) = next?;
        let [start, end] = parse_numbers::<2>(line, &text)?;
        edges.push((start, end));
    }
    Ok(edges)
}

fn ensure_exhausted(
    lines: impl Iterator<Item = Result<(usize, String), ParseError>>,
    what: &'static str,
    expected: usize,
) -> Result<(), ParseError> {
    match lines.count() {
        0 => Ok(()),
        extra => Err(ParseError::Count {
            what,
            expected,
            found: expected + extra,
        }),
    }
}
