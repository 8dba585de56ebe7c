//! Human-readable renderings of a graph.
//!
//! Both renderings list vertices, and the neighbours of each vertex, in
//! ascending identity order independent of their indices, so equal graphs
//! built in different orders print the same.

use std::fmt::{self, Display};

use itertools::Itertools;

use super::{Direction, Graph, VertexId};
use crate::index::VertexIndex;

impl<V: VertexId, D: Direction> Graph<V, D> {
    fn indices_by_identity(&self) -> Vec<VertexIndex> {
        self.indices()
            .sorted_by(|a, b| self[*a].cmp(&self[*b]))
            .collect()
    }
}

impl<V: VertexId + Display, D: Direction> Graph<V, D> {
    /// Row/column table of weights, `.` for absent cells. Every column is as
    /// wide as the longest vertex label, and at least four characters.
    pub fn matrix_table(&self) -> String {
        if self.is_empty() {
            return "Empty Graph".to_string();
        }
        let order = self.indices_by_identity();
        let labels: Vec<String> = order.iter().map(|&i| self[i].to_string()).collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(4);

        let header = format!(
            "{:width$}   {}",
            "",
            labels.iter().map(|l| format!("{l:>width$}")).join(" ")
        );
        let rows = order.iter().zip(&labels).map(|(&i, label)| {
            let mut cells = order.iter().map(|&j| match self.weight_at(i, j) {
                Some(w) => format!("{w:>width$.1}"),
                None => format!("{:>width$}", "."),
            });
            format!("{label:>width$} | {}", cells.join(" "))
        });

        std::iter::once(header).chain(rows).join("\n")
    }
}

/// One line per vertex: `u -> a(w), b(w)` for directed graphs and
/// `u -- a(w), b(w)` for undirected ones.
impl<V: VertexId + Display, D: Direction> Display for Graph<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, arrow, lonely) = if D::DIRECTED {
            ("Directed", "->", "(no outgoing edges)")
        } else {
            ("Undirected", "--", "(no edges)")
        };
        if self.is_empty() {
            return write!(f, "Empty {kind} Graph");
        }

        for (n, i) in self.indices_by_identity().into_iter().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            let out: Vec<_> = self
                .matrix
                .row(i)
                .sorted_by(|(a, _), (b, _)| self[*a].cmp(&self[*b]))
                .collect();
            if out.is_empty() {
                write!(f, "{} {arrow} {lonely}", self[i])?;
            } else {
                let listed = out
                    .iter()
                    .map(|(j, w)| format!("{}({w:?})", self[*j]))
                    .join(", ");
                write!(f, "{} {arrow} {listed}", self[i])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{DiGraph, UnGraph};

    #[test]
    fn directed_listing() {
        let mut graph: DiGraph<u32> =
            DiGraph::from_edges([(2, 0, 1.0), (0, 1, 2.0), (0, 2, 3.5)]).unwrap();
        graph.add_vertex(3).unwrap();

        insta::assert_snapshot!(graph.to_string(), @r"
        0 -> 1(2.0), 2(3.5)
        1 -> (no outgoing edges)
        2 -> 0(1.0)
        3 -> (no outgoing edges)
        ");
    }

    #[test]
    fn undirected_listing() {
        let graph: UnGraph<u32> = UnGraph::from_edges([(0, 1, 4.0), (1, 2, 0.5)]).unwrap();

        insta::assert_snapshot!(graph.to_string(), @r"
        0 -- 1(4.0)
        1 -- 0(4.0), 2(0.5)
        2 -- 1(0.5)
        ");
    }

    #[test]
    fn empty_graphs() {
        assert_eq!(DiGraph::<u32>::new().to_string(), "Empty Directed Graph");
        assert_eq!(UnGraph::<u32>::new().to_string(), "Empty Undirected Graph");
        assert_eq!(UnGraph::<u32>::new().matrix_table(), "Empty Graph");
    }

    #[test]
    fn matrix_table() {
        let graph: UnGraph<u32> = UnGraph::from_edges([(1, 2, 0.5), (0, 1, 2.0)]).unwrap();

        let expected = [
            "          0    1    2",
            "   0 |    .  2.0    .",
            "   1 |  2.0    .  0.5",
            "   2 |    .  0.5    .",
        ]
        .join("\n");
        similar_asserts::assert_eq!(graph.matrix_table(), expected);
    }

    #[test]
    fn listing_ignores_insertion_order() {
        let forward: UnGraph<u32> = UnGraph::from_edges([(0, 1, 1.0), (0, 2, 1.0)]).unwrap();

        let mut shuffled: UnGraph<u32> = UnGraph::from_vertices([2, 0, 1]);
        shuffled.add_edge(&0, &2, 1.0).unwrap();
        shuffled.add_edge(&1, &0, 1.0).unwrap();

        assert_eq!(forward.to_string(), shuffled.to_string());
        assert_eq!(forward.matrix_table(), shuffled.matrix_table());
        insta::assert_snapshot!(shuffled.to_string(), @r"
        0 -- 1(1.0), 2(1.0)
        1 -- 0(1.0)
        2 -- 0(1.0)
        ");
    }

    #[test]
    fn matrix_table_widens_for_long_labels() {
        let graph: DiGraph<String> =
            DiGraph::from_edges([("alpha".to_string(), "b".to_string(), 12.5)]).unwrap();

        let table = graph.matrix_table();
        let lines: Vec<&str> = table.lines().collect();
        similar_asserts::assert_eq!(
            lines,
            vec![
                "        alpha     b",
                "alpha |     .  12.5",
                "    b |     .     .",
            ]
        );
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }
}
