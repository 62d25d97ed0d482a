// tests/translation/flow_test.rs
use relalg::flow::{ClauseFlow, FlowEdge};
use relalg::translate::parse;

fn edges(pairs: &[(usize, usize)]) -> Vec<FlowEdge> {
    pairs
        .iter()
        .map(|&(from, to)| FlowEdge { from, to })
        .collect()
}

#[test]
fn test_two_joins_with_where() {
    let output = parse(
        "SELECT c.Nome FROM Pedido p JOIN Cliente c ON p.Cliente_idCliente = c.idCliente JOIN Status s ON p.Status_idStatus = s.idStatus WHERE s.idStatus = 4",
    )
    .unwrap();
    let flow = output.flow();

    let labels: Vec<_> = flow.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "FROM Pedido",
            "JOIN Cliente ON p.Cliente_idCliente = c.idCliente",
            "JOIN Status ON p.Status_idStatus = s.idStatus",
            "WHERE s.idStatus = 4",
            "SELECT c.Nome",
        ]
    );
    assert_eq!(
        flow.edges,
        edges(&[(0, 1), (0, 2), (0, 3), (1, 3), (2, 3), (3, 4)])
    );
}

#[test]
fn test_joins_without_where_feed_select() {
    let output = parse(
        "SELECT p.Nome FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria",
    )
    .unwrap();
    let flow = output.flow();

    assert_eq!(flow.nodes.len(), 3);
    assert_eq!(flow.edges, edges(&[(0, 1), (0, 2), (1, 2)]));
}

#[test]
fn test_flow_is_acyclic() {
    let output = parse(
        "SELECT c.Nome FROM Pedido p JOIN Cliente c ON p.Cliente_idCliente = c.idCliente WHERE c.idCliente = 1",
    )
    .unwrap();
    let flow: ClauseFlow = output.flow();

    // Nodes are added in topological order, so every edge points forward.
    assert!(flow.edges.iter().all(|e| e.from < e.to));
    assert_eq!(flow.successors(flow.nodes.len() - 1).count(), 0);
}

#[test]
fn test_flow_json() {
    let flow = parse("SELECT * FROM Cliente WHERE idCliente = 1").unwrap().flow();
    let json = serde_json::to_value(&flow).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "nodes": [
                { "id": 0, "label": "FROM Cliente" },
                { "id": 1, "label": "WHERE idCliente = 1" },
                { "id": 2, "label": "SELECT *" }
            ],
            "edges": [
                { "from": 0, "to": 1 },
                { "from": 1, "to": 2 }
            ]
        })
    );
}
