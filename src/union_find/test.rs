use super::*;

#[test]
fn test_basic_union_find() {
    let mut uf = UnionFind::new(5);
    assert_eq!(uf.n_sets(), 5);

    let root = uf.union(VertexIndex(0), VertexIndex(1));
    assert!(root.is_some());
    assert_eq!(uf.find(VertexIndex(0)), uf.find(VertexIndex(1)));
    assert_ne!(uf.find(VertexIndex(0)), uf.find(VertexIndex(2)));
    assert_eq!(uf.n_sets(), 4);
}

#[test]
fn test_union_of_same_set_is_noop() {
    let mut uf = UnionFind::new(3);
    uf.union(VertexIndex(0), VertexIndex(1));

    assert_eq!(uf.union(VertexIndex(1), VertexIndex(0)), None);
    assert_eq!(uf.n_sets(), 2);
}

#[test]
fn test_path_compression() {
    let mut uf = UnionFind::new(4);

    uf.union(VertexIndex(0), VertexIndex(1));
    uf.union(VertexIndex(2), VertexIndex(3));
    uf.union(VertexIndex(1), VertexIndex(3));

    let root = uf.find(VertexIndex(3));
    for i in 0..4 {
        assert_eq!(uf.find(VertexIndex(i)), root);
        match uf.nodes[i].get() {
            UFNode::Root { .. } => assert_eq!(VertexIndex(i), root),
            UFNode::Child(parent) => assert_eq!(parent, root),
        }
    }
    assert_eq!(uf.n_sets(), 1);
}

#[test]
fn test_union_by_rank() {
    let mut uf = UnionFind::new(3);

    // {0, 1} has rank 1, {2} has rank 0: the singleton hangs below.
    let first = uf.union(VertexIndex(0), VertexIndex(1));
    let second = uf.union(VertexIndex(2), VertexIndex(0));

    assert_eq!(first, Some(VertexIndex(0)));
    assert_eq!(second, Some(VertexIndex(0)));
    assert_eq!(uf.nodes[2].get(), UFNode::Child(VertexIndex(0)));
    assert_eq!(uf.nodes[0].get(), UFNode::Root { rank: 1 });
}
