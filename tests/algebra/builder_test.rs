// tests/algebra/builder_test.rs
use relalg::algebra::{build, AlgebraNode, JoinNode, ProjectionNode, SelectionNode, TableNode};
use relalg::catalog::builtin;
use relalg::translate::{self, TranslateOptions};
use relalg::validation::ValidatedQuery;

fn validated(sql: &str) -> ValidatedQuery {
    translate::validate(sql, builtin(), &TranslateOptions::default()).unwrap()
}

fn table(name: &str, alias: Option<&str>) -> AlgebraNode {
    AlgebraNode::Table(TableNode {
        table: name.to_string(),
        alias: alias.map(str::to_string),
    })
}

#[test]
fn test_single_table_shape() {
    let plan = build(&validated("SELECT * FROM Cliente"));

    assert_eq!(
        plan,
        AlgebraNode::Projection(ProjectionNode {
            attributes: "*".to_string(),
            input: Box::new(table("Cliente", None)),
        })
    );
}

#[test]
fn test_qualified_conjuncts_pushed_to_their_alias() {
    let plan = build(&validated(
        "SELECT p.Nome FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria \
         WHERE p.Preco > 10 AND c.Descricao = 'Livros' AND p.QuantEstoque > 0",
    ));

    let expected = AlgebraNode::project(
        "p.Nome",
        AlgebraNode::join(
            "p.Categoria_idCategoria = c.idCategoria",
            AlgebraNode::select("p.Preco > 10 ∧ p.QuantEstoque > 0", table("Produto", Some("p"))),
            AlgebraNode::select("c.Descricao = 'Livros'", table("Categoria", Some("c"))),
        ),
    );
    assert_eq!(plan, expected);
}

#[test]
fn test_unattributed_conjunct_adds_top_selection() {
    let plan = build(&validated(
        "SELECT p.Nome FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria \
         WHERE p.Preco > 10 AND Nome = 'Caneta'",
    ));

    let AlgebraNode::Projection(ProjectionNode { input, .. }) = plan else {
        panic!("expected projection at the root");
    };
    let AlgebraNode::Selection(SelectionNode { condition, input }) = *input else {
        panic!("expected selection under the projection");
    };
    assert_eq!(condition, "p.Preco > 10 ∧ Nome = 'Caneta'");

    let AlgebraNode::Join(JoinNode { left, right, .. }) = *input else {
        panic!("expected join under the selection");
    };
    assert_eq!(
        *left,
        AlgebraNode::select("p.Preco > 10", table("Produto", Some("p")))
    );
    assert_eq!(*right, table("Categoria", Some("c")));
}

#[test]
fn test_cross_alias_conjunct_is_unattributed() {
    let plan = build(&validated(
        "SELECT * FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria \
         WHERE p.Categoria_idCategoria = c.idCategoria",
    ));

    assert_eq!(
        plan.to_string(),
        "π_*(σ_p.Categoria_idCategoria = c.idCategoria((p ← Produto) ⨝_{p.Categoria_idCategoria = c.idCategoria} (c ← Categoria)))"
    );
}

#[test]
fn test_joins_are_left_deep() {
    let plan = build(&validated(
        "SELECT c.Nome FROM Pedido p \
         JOIN Cliente c ON p.Cliente_idCliente = c.idCliente \
         JOIN Status s ON p.Status_idStatus = s.idStatus",
    ));

    let AlgebraNode::Projection(ProjectionNode { input, .. }) = plan else {
        panic!("expected projection at the root");
    };
    let AlgebraNode::Join(outer) = *input else {
        panic!("expected join");
    };
    assert_eq!(outer.condition, "p.Status_idStatus = s.idStatus");
    assert_eq!(*outer.right, table("Status", Some("s")));

    let AlgebraNode::Join(inner) = *outer.left else {
        panic!("expected nested join on the left");
    };
    assert_eq!(inner.condition, "p.Cliente_idCliente = c.idCliente");
    assert_eq!(*inner.left, table("Pedido", Some("p")));
    assert_eq!(*inner.right, table("Cliente", Some("c")));
}

#[test]
fn test_node_count() {
    let plan = build(&validated(
        "SELECT p.Nome FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria WHERE p.Preco > 10",
    ));

    // π, ⨝, σ, Produto, Categoria
    assert_eq!(plan.size(), 5);
}
