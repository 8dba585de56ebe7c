use std::collections::BTreeSet;
use std::fmt::Display;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use densegraph::prelude::*;
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "densegraph",
    about = "Build a weighted graph from the command line and run one algorithm on it."
)]
struct Cli {
    /// Treat every edge as directed.
    #[arg(long)]
    directed: bool,
    /// Edge between two integer vertices, weight 1 unless given.
    #[arg(short = 'e', long = "edge", value_name = "U,V[,W]", value_parser = parse_edge, action = ArgAction::Append)]
    edges: Vec<EdgeArg>,
    /// Vertex to add even if no edge touches it.
    #[arg(short = 'v', long = "vertex", value_name = "V", action = ArgAction::Append)]
    vertices: Vec<i64>,
    /// Log algorithm details to stderr. RUST_LOG overrides this.
    #[arg(long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Adjacency listing, one vertex per line.
    Show,
    /// Weight matrix table.
    Matrix,
    /// Topological order of a directed graph.
    Topo,
    /// Strongly connected components of a directed graph.
    Scc,
    /// Component graph of a directed graph.
    Condense,
    /// Fewest-edge path in a directed graph.
    Path { from: i64, to: i64 },
    /// Connected components of an undirected graph.
    Components,
    /// Two-colouring of an undirected graph.
    Bipartite,
    /// Eulerian circuit and path checks of an undirected graph.
    Euler,
    /// Greedy vertex colouring of an undirected graph.
    Color,
    /// Minimum spanning tree of an undirected graph.
    Mst {
        #[arg(long, value_enum, default_value_t = MstAlgorithm::Kruskal)]
        algorithm: MstAlgorithm,
        /// Root for Prim's algorithm.
        #[arg(long, value_name = "V")]
        start: Option<i64>,
    },
    /// Counts, connectivity and edge weight statistics.
    Analyze,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MstAlgorithm {
    Kruskal,
    Prim,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EdgeArg {
    from: i64,
    to: i64,
    weight: f64,
}

fn parse_edge(raw: &str) -> Result<EdgeArg, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let vertex = |s: &str| {
        s.parse::<i64>()
            .map_err(|e| format!("invalid vertex {s:?}: {e}"))
    };
    match parts.as_slice() {
        [u, v] => Ok(EdgeArg {
            from: vertex(u)?,
            to: vertex(v)?,
            weight: 1.0,
        }),
        [u, v, w] => Ok(EdgeArg {
            from: vertex(u)?,
            to: vertex(v)?,
            weight: w
                .parse()
                .map_err(|e| format!("invalid weight {w:?}: {e}"))?,
        }),
        _ => Err(format!("expected U,V or U,V,W, got {raw:?}")),
    }
}

enum AnyGraph {
    Directed(DiGraph<i64>),
    Undirected(UnGraph<i64>),
}

impl AnyGraph {
    fn directed(&self, command: &str) -> Result<&DiGraph<i64>> {
        match self {
            AnyGraph::Directed(graph) => Ok(graph),
            AnyGraph::Undirected(_) => bail!("`{command}` needs a directed graph, pass --directed"),
        }
    }

    fn undirected(&self, command: &str) -> Result<&UnGraph<i64>> {
        match self {
            AnyGraph::Undirected(graph) => Ok(graph),
            AnyGraph::Directed(_) => bail!("`{command}` needs an undirected graph, drop --directed"),
        }
    }
}

fn build<D: Direction>(cli: &Cli) -> Result<Graph<i64, D>> {
    let mut graph = Graph::from_vertices(cli.vertices.iter().copied());
    for edge in &cli.edges {
        for v in [edge.from, edge.to] {
            if !graph.has_vertex(&v) {
                graph.add_vertex(v)?;
            }
        }
        graph
            .add_edge(&edge.from, &edge.to, edge.weight)
            .with_context(|| format!("failed to add edge {},{}", edge.from, edge.to))?;
    }
    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph built"
    );
    Ok(graph)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let graph = if cli.directed {
        AnyGraph::Directed(build(&cli)?)
    } else {
        AnyGraph::Undirected(build(&cli)?)
    };
    println!("{}", execute(&cli.command, &graph)?);
    Ok(())
}

fn sets<V: Display>(sets: &[BTreeSet<V>]) -> String {
    sets.iter()
        .map(|set| format!("{{{}}}", set.iter().join(", ")))
        .join("\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn execute(command: &Command, graph: &AnyGraph) -> Result<String> {
    let out = match command {
        Command::Show => match graph {
            AnyGraph::Directed(g) => g.to_string(),
            AnyGraph::Undirected(g) => g.to_string(),
        },
        Command::Matrix => match graph {
            AnyGraph::Directed(g) => g.matrix_table(),
            AnyGraph::Undirected(g) => g.matrix_table(),
        },
        Command::Topo => graph
            .directed("topo")?
            .topological_sort()
            .context("no topological order")?
            .iter()
            .join(" "),
        Command::Scc => sets(&graph.directed("scc")?.strongly_connected_components()),
        Command::Condense => {
            let g = graph.directed("condense")?;
            let components = g
                .strongly_connected_components()
                .iter()
                .enumerate()
                .map(|(k, set)| format!("{k}: {{{}}}", set.iter().join(", ")))
                .join("\n");
            format!("{components}\n{}", g.condensation())
        }
        Command::Path { from, to } => match graph.directed("path")?.find_path(from, to)? {
            Some(path) => path.iter().join(" -> "),
            None => format!("no path from {from} to {to}"),
        },
        Command::Components => sets(&graph.undirected("components")?.connected_components()),
        Command::Bipartite => match graph.undirected("bipartite")?.bipartition() {
            Some((left, right)) => format!("bipartite\n{}", sets(&[left, right])),
            None => "not bipartite".to_string(),
        },
        Command::Euler => {
            let g = graph.undirected("euler")?;
            format!(
                "eulerian circuit: {}\neulerian path: {}",
                yes_no(g.has_eulerian_circuit()),
                yes_no(g.has_eulerian_path())
            )
        }
        Command::Color => {
            let g = graph.undirected("color")?;
            let colouring = g.vertex_coloring();
            let used = g.chromatic_upper_bound();
            let lines = colouring.iter().map(|(v, c)| format!("{v}: {c}")).join("\n");
            format!("{lines}\ncolours used: {used}")
        }
        Command::Mst { algorithm, start } => {
            let g = graph.undirected("mst")?;
            let tree = match algorithm {
                MstAlgorithm::Kruskal => kruskal(g)?,
                MstAlgorithm::Prim => prim(g, start.as_ref())?,
            };
            format!("{tree}\ntotal weight: {}", tree.total_weight())
        }
        Command::Analyze => {
            let (vertices, edges, connected, cyclic, stats) = match graph {
                AnyGraph::Directed(g) => (
                    g.vertex_count(),
                    g.edge_count(),
                    g.is_connected(),
                    g.has_cycle(),
                    analyze_edge_weights(g),
                ),
                AnyGraph::Undirected(g) => (
                    g.vertex_count(),
                    g.edge_count(),
                    g.is_connected(),
                    g.has_cycle(),
                    analyze_edge_weights(g),
                ),
            };
            format!(
                "vertices: {vertices}\nedges: {edges}\nconnected: {}\ncyclic: {}\n\
                 weights: min {} max {} mean {} total {}",
                yes_no(connected),
                yes_no(cyclic),
                stats.min,
                stats.max,
                stats.mean,
                stats.total
            )
        }
    };
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("densegraph").chain(args.iter().copied()))?;
        let graph = if cli.directed {
            AnyGraph::Directed(build(&cli)?)
        } else {
            AnyGraph::Undirected(build(&cli)?)
        };
        execute(&cli.command, &graph)
    }

    #[test]
    fn edge_arguments() {
        assert_eq!(
            parse_edge("1,2"),
            Ok(EdgeArg {
                from: 1,
                to: 2,
                weight: 1.0
            })
        );
        assert_eq!(
            parse_edge(" 3, 4, 0.5 "),
            Ok(EdgeArg {
                from: 3,
                to: 4,
                weight: 0.5
            })
        );
        assert!(parse_edge("1").is_err());
        assert!(parse_edge("a,2").is_err());
    }

    #[test]
    fn topo_order() {
        let out = run_args(&["--directed", "-e", "0,1", "-e", "1,2", "-e", "0,2", "topo"]).unwrap();
        assert_eq!(out, "0 1 2");
    }

    #[test]
    fn mst_total() {
        let out = run_args(&[
            "-e", "0,1,4", "-e", "0,2,3", "-e", "1,2,1", "-e", "1,3,2", "-e", "2,3,4", "-e", "3,4,2",
            "-e", "3,5,5", "-e", "4,5,1", "mst", "--algorithm", "prim", "--start", "3",
        ])
        .unwrap();
        assert!(out.ends_with("total weight: 9"), "{out}");
    }

    #[test]
    fn wrong_direction_is_an_error() {
        let err = run_args(&["-e", "0,1", "scc"]).unwrap_err();
        assert!(err.to_string().contains("--directed"));

        let err = run_args(&["--directed", "-e", "0,1", "color"]).unwrap_err();
        assert!(err.to_string().contains("undirected"));
    }

    #[test]
    fn duplicate_edge_is_reported() {
        let err = run_args(&["-e", "0,1", "-e", "1,0", "show"]).unwrap_err();
        assert!(err.to_string().contains("failed to add edge 1,0"));
    }

    #[test]
    fn isolated_vertices() {
        let out = run_args(&["-e", "0,1", "-v", "5", "components"]).unwrap();
        assert_eq!(out, "{5}\n{0, 1}");
    }
}
