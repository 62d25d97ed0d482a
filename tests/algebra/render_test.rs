// tests/algebra/render_test.rs
use insta::assert_snapshot;
use relalg::algebra::{AlgebraNode, GraphNode, NodeKind};

fn aliased(table: &str, alias: &str) -> AlgebraNode {
    AlgebraNode::table(table, Some(alias.to_string()))
}

fn sample_tree() -> AlgebraNode {
    AlgebraNode::project(
        "p.Nome, s.Descricao",
        AlgebraNode::select(
            "p.Preco > 10 ∨ s.idStatus = 1",
            AlgebraNode::join(
                "i.Pedido_idPedido = s.idStatus",
                AlgebraNode::join(
                    "p.idProduto = i.Produto_idProduto",
                    AlgebraNode::select("p.QuantEstoque > 0", aliased("Produto", "p")),
                    aliased("Pedido_has_Produto", "i"),
                ),
                aliased("Status", "s"),
            ),
        ),
    )
}

/// Every node's label must appear in the infix form, and rebuilding the infix
/// form from the labeled tree must give the same string.
fn assert_forms_agree(plan: &AlgebraNode) {
    let graph = plan.to_graph();
    let infix = plan.to_string();

    assert_eq!(graph.to_infix(), infix);

    fn walk(node: &GraphNode, infix: &str) {
        assert!(
            infix.contains(&node.label),
            "label '{}' missing from '{}'",
            node.label,
            infix
        );
        for child in &node.children {
            walk(child, infix);
        }
    }
    walk(&graph, &infix);
}

#[test]
fn test_infix_snapshot() {
    assert_snapshot!(
        sample_tree().to_string(),
        @"π_p.Nome, s.Descricao(σ_p.Preco > 10 ∨ s.idStatus = 1((σ_p.QuantEstoque > 0(p ← Produto) ⨝_{p.idProduto = i.Produto_idProduto} (i ← Pedido_has_Produto)) ⨝_{i.Pedido_idPedido = s.idStatus} (s ← Status)))"
    );
}

#[test]
fn test_forms_agree() {
    assert_forms_agree(&sample_tree());
    assert_forms_agree(&AlgebraNode::table("Cliente", None));
    assert_forms_agree(&AlgebraNode::project("*", aliased("Cliente", "c")));
}

#[test]
fn test_graph_structure() {
    let graph = sample_tree().to_graph();

    assert_eq!(graph.kind, NodeKind::Projection);
    assert_eq!(graph.label, "π_p.Nome, s.Descricao");
    assert_eq!(graph.children.len(), 1);

    let selection = &graph.children[0];
    assert_eq!(selection.kind, NodeKind::Selection);

    let join = &selection.children[0];
    assert_eq!(join.kind, NodeKind::Join);
    assert_eq!(join.label, "⨝_{i.Pedido_idPedido = s.idStatus}");
    assert_eq!(join.children.len(), 2);
    assert_eq!(join.children[1].label, "s ← Status");
    assert!(join.children[1].children.is_empty());
}

#[test]
fn test_tree_json() {
    let plan = AlgebraNode::project("Nome", AlgebraNode::table("Cliente", None));
    let json = serde_json::to_string(&plan.to_graph()).unwrap();

    assert_snapshot!(
        json,
        @r#"{"type":"Projection","label":"π_Nome","children":[{"type":"Table","label":"Cliente","children":[]}]}"#
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let first = sample_tree();
    let second = sample_tree();

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(
        serde_json::to_string(&first.to_graph()).unwrap(),
        serde_json::to_string(&second.to_graph()).unwrap()
    );
}
