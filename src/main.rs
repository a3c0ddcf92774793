use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use edge_cover::{
    generate, parse_graph, parse_solution, write_solution, Cover, Graph, InvalidArgument,
    MatchingStrategy, ParseError, Solution, SolveOptions,
};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Parse(ParseError),
    Graph(InvalidArgument),
    InvalidCover(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Parse(err) => write!(f, "{err}"),
            CliError::Graph(err) => write!(f, "invalid graph: {err}"),
            CliError::InvalidCover(msg) => write!(f, "invalid cover: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ParseError> for CliError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<InvalidArgument> for CliError {
    fn from(value: InvalidArgument) -> Self {
        Self::Graph(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Solve,
    Demo,
    Verify,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    out_dir: Option<String>,
    strategy: MatchingStrategy,
    verify: bool,
}

fn usage() -> &'static str {
    "edge-cover\n\
\n\
USAGE:\n\
  edge-cover [solve] [--strategy augmenting|blossom] [--out <path>] [--no-verify] [<path>|-]\n\
  edge-cover demo [--strategy augmenting|blossom] [--out-dir <dir>]\n\
  edge-cover verify [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - solve reads `n m` followed by m lines of `u v` and prints the cover size and edges.\n\
  - --out writes `n m k`, the graph edges and the cover edges instead.\n\
  - demo solves the built-in graphs and writes graph1.txt, graph2.txt, ... to --out-dir.\n\
  - verify reads a file written by --out and checks the cover against the graph.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        verify: true,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "solve" => args.command = Command::Solve,
            "demo" => args.command = Command::Demo,
            "verify" => args.command = Command::Verify,
            "--no-verify" => args.verify = false,
            "--strategy" => {
                let Some(strategy) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.strategy = strategy
                    .parse::<MatchingStrategy>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(dir.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn open_input(input: Option<&str>) -> Result<Box<dyn BufRead>, CliError> {
    match input {
        None | Some("-") => Ok(Box::new(std::io::stdin().lock())),
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
    }
}

fn format_edges(edges: &[(u32, u32)]) -> String {
    edges
        .iter()
        .map(|(u, v)| format!("({u}, {v})"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_solve(args: &Args) -> Result<(), CliError> {
    let graph = parse_graph(open_input(args.input.as_deref())?)?;
    let cover = graph.solve_with(&SolveOptions::with_strategy(args.strategy));
    if args.verify && !graph.validate_cover(&cover) {
        return Err(CliError::InvalidCover(format!(
            "computed cover of {} edges does not touch every vertex",
            cover.len()
        )));
    }

    match &args.out {
        Some(path) => {
            write_solution(File::create(path)?, &graph, &cover)?;
            println!("Data saved to file: {path}");
        }
        None => print!("{}", cover.format()),
    }
    Ok(())
}

fn run_demo(args: &Args) -> Result<(), CliError> {
    let out_dir = PathBuf::from(args.out_dir.as_deref().unwrap_or("."));
    std::fs::create_dir_all(&out_dir)?;
    let options = SolveOptions::with_strategy(args.strategy);

    for (i, (name, (vertices, edges))) in generate::demo_graphs().into_iter().enumerate() {
        println!("\n=== Example {}: {name} ===", i + 1);
        println!("Number of vertices: {vertices}");
        println!("Number of edges: {}", edges.len());
        println!("Edges: {}", format_edges(&edges));

        let graph = Graph::new(vertices, edges)?;
        let cover = graph.solve_with(&options);
        println!("\nMinimum Edge Cover:");
        println!("Number of edges in cover: {}", cover.len());
        println!("Edges: {}", format_edges(cover.edges()));
        let verdict = if graph.validate_cover(&cover) {
            "CORRECT"
        } else {
            "ERROR"
        };
        println!("Verification: {verdict}");

        let path = out_dir.join(format!("graph{}.txt", i + 1));
        write_solution(File::create(&path)?, &graph, &cover)?;
        println!("Data saved to file: {}", path.display());
    }
    Ok(())
}

fn check_solution(solution: &Solution) -> Result<(), CliError> {
    let graph = solution.graph()?;
    let cover: &Cover = &solution.cover;
    if !graph.validate_cover(cover) {
        return Err(CliError::InvalidCover(
            "an edge is not in the graph or a vertex is left uncovered".to_string(),
        ));
    }

    let maximum = graph.maximum_matching(MatchingStrategy::Blossom);
    let minimum = graph.vertices() as usize - maximum.len();
    if cover.len() != minimum {
        return Err(CliError::InvalidCover(format!(
            "cover has {} edges, a minimum cover has {minimum}",
            cover.len()
        )));
    }
    Ok(())
}

fn run_verify(args: &Args) -> Result<(), CliError> {
    let solution = parse_solution(open_input(args.input.as_deref())?)?;
    check_solution(&solution)?;
    println!("Cover size: {}", solution.cover.len());
    println!("OK");
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Solve => run_solve(&args),
        Command::Demo => run_demo(&args),
        Command::Verify => run_verify(&args),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("edge-cover")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        let args = parse_args(&argv(&["graph.in"])).unwrap();
        assert!(matches!(args.command, Command::Solve));
        assert_eq!(args.input.as_deref(), Some("graph.in"));
        assert_eq!(args.strategy, MatchingStrategy::Augmenting);
        assert!(args.verify);
    }

    #[test]
    fn test_parse_args_options() {
        let args = parse_args(&argv(&[
            "solve",
            "--strategy",
            "blossom",
            "--no-verify",
            "--out",
            "cover.txt",
            "-",
        ]))
        .unwrap();
        assert_eq!(args.strategy, MatchingStrategy::Blossom);
        assert!(!args.verify);
        assert_eq!(args.out.as_deref(), Some("cover.txt"));
        assert_eq!(args.input.as_deref(), Some("-"));

        let args = parse_args(&argv(&["demo", "--out-dir", "target/demo"])).unwrap();
        assert!(matches!(args.command, Command::Demo));
        assert_eq!(args.out_dir.as_deref(), Some("target/demo"));
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        for bad in [
            &["--strategy"][..],
            &["--strategy", "greedy"][..],
            &["--bogus"][..],
            &["a.in", "b.in"][..],
        ] {
            assert!(matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))));
        }
    }

    fn solution(text: &str) -> Solution {
        parse_solution(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_check_solution_accepts_minimum_cover() {
        assert!(check_solution(&solution("4 3 2\n0 1\n1 2\n2 3\n0 1\n2 3\n")).is_ok());

        let graph = Graph::new(7, generate::binary_tree(7).1).unwrap();
        let cover = graph.solve();
        let mut buffer = Vec::new();
        write_solution(&mut buffer, &graph, &cover).unwrap();
        let written = parse_solution(buffer.as_slice()).unwrap();
        assert!(check_solution(&written).is_ok());
    }

    #[test]
    fn test_check_solution_rejects_foreign_edge() {
        assert!(matches!(
            check_solution(&solution("4 3 2\n0 1\n1 2\n2 3\n0 2\n1 3\n")),
            Err(CliError::InvalidCover(_))
        ));
    }

    #[test]
    fn test_check_solution_rejects_uncovered_vertex() {
        assert!(matches!(
            check_solution(&solution("4 3 1\n0 1\n1 2\n2 3\n1 2\n")),
            Err(CliError::InvalidCover(_))
        ));
    }

    #[test]
    fn test_check_solution_rejects_oversized_cover() {
        let err = check_solution(&solution("4 3 3\n0 1\n1 2\n2 3\n0 1\n1 2\n2 3\n"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid cover: cover has 3 edges, a minimum cover has 2"
        );
    }

    #[test]
    fn test_check_solution_rejects_invalid_graph() {
        assert!(matches!(
            check_solution(&solution("3 1 1\n0 1\n0 1\n")),
            Err(CliError::Graph(InvalidArgument::IsolatedVertex { vertex: 2 }))
        ));
    }

    #[test]
    fn test_format_edges() {
        assert_eq!(format_edges(&[(0, 1), (2, 3)]), "(0, 1), (2, 3)");
        assert_eq!(format_edges(&[]), "");
    }
}
