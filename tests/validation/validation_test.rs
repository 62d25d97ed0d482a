// tests/validation/validation_test.rs
use relalg::catalog::{builtin, ColumnType, SchemaCatalog};
use relalg::error::{TranslateError, TranslateResult};
use relalg::translate::{self, TranslateOptions};
use relalg::validation::{Predicate, SubqueryPolicy, ValidatedQuery};

fn check(sql: &str) -> TranslateResult<ValidatedQuery> {
    translate::validate(sql, builtin(), &TranslateOptions::default())
}

fn kind(sql: &str) -> &'static str {
    match check(sql) {
        Ok(_) => "Ok",
        Err(e) => e.kind(),
    }
}

// ============================================================================
// Tables and SELECT fields
// ============================================================================

#[test]
fn test_unknown_table() {
    assert_eq!(
        check("SELECT x FROM Ghost").unwrap_err(),
        TranslateError::UnknownTable("Ghost".to_string())
    );

    let err = check("SELECT * FROM Cliente c JOIN Ghost g ON c.idCliente = g.id").unwrap_err();
    assert_eq!(err, TranslateError::UnknownTable("Ghost".to_string()));
}

#[test]
fn test_table_names_are_case_sensitive() {
    assert_eq!(kind("SELECT * FROM cliente"), "UnknownTable");
}

#[test]
fn test_select_fields() {
    assert_eq!(kind("SELECT Nome, Email FROM Cliente"), "Ok");
    assert_eq!(kind("SELECT c.Nome FROM Cliente c"), "Ok");
    assert_eq!(kind("SELECT Nome, Ghost FROM Cliente"), "UnknownField");
    assert_eq!(kind("SELECT x.Nome FROM Cliente c"), "UnknownField");
    assert_eq!(kind("SELECT Nome,, Email FROM Cliente"), "MalformedQuery");
}

#[test]
fn test_qualified_unknown_column_names_table() {
    let err = check("SELECT c.Preco FROM Cliente c").unwrap_err();

    assert_eq!(
        err,
        TranslateError::UnknownField {
            field: "c.Preco".to_string(),
            table: Some("Cliente".to_string()),
        }
    );
}

#[test]
fn test_bare_field_needs_exactly_one_owner() {
    let join = "FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria";

    // Owned by Produto only
    assert_eq!(kind(&format!("SELECT Preco {}", join)), "Ok");
    // Owned by neither
    assert_eq!(kind(&format!("SELECT Email {}", join)), "UnknownField");
    // Owned by both
    let err = check(&format!("SELECT Descricao {}", join)).unwrap_err();
    assert_eq!(
        err,
        TranslateError::AmbiguousField {
            field: "Descricao".to_string(),
            tables: vec!["Produto".to_string(), "Categoria".to_string()],
        }
    );
}

#[test]
fn test_self_join_bare_field_is_not_ambiguous() {
    // Both sources are the same table, so the column has a single owner.
    assert_eq!(
        kind("SELECT Nome FROM Produto a JOIN Produto b ON a.idProduto = b.idProduto"),
        "Ok"
    );
}

// ============================================================================
// WHERE literals
// ============================================================================

#[test]
fn test_type_mismatch_message() {
    let err = check("SELECT Nome FROM Produto WHERE Preco = 'abc'").unwrap_err();

    assert_eq!(
        err,
        TranslateError::TypeMismatch {
            field: "Preco".to_string(),
            expected: ColumnType::Decimal,
            found: "'abc'".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "Type mismatch: Field 'Preco' expects decimal, but got 'abc'."
    );
}

#[test]
fn test_literals_per_type() {
    let cases = [
        ("SELECT * FROM Produto WHERE QuantEstoque >= 5", "Ok"),
        ("SELECT * FROM Produto WHERE QuantEstoque >= 5.5", "TypeMismatch"),
        ("SELECT * FROM Produto WHERE Preco < 19.90", "Ok"),
        ("SELECT * FROM Produto WHERE Preco < 20", "Ok"),
        ("SELECT * FROM Cliente WHERE Nome = 'Ana'", "Ok"),
        ("SELECT * FROM Cliente WHERE Nome = Ana", "TypeMismatch"),
        ("SELECT * FROM Produto WHERE Preco = abc", "TypeMismatch"),
        ("SELECT * FROM Cliente c WHERE c.Nome = c.Apelido", "UnknownField"),
        ("SELECT * FROM Cliente WHERE Nome = Email", "Ok"),
        ("SELECT * FROM Cliente WHERE Nome = 42", "TypeMismatch"),
        ("SELECT * FROM Cliente WHERE Nascimento > '1990-05-01'", "Ok"),
        ("SELECT * FROM Cliente WHERE DataRegistro <= '2024-01-01 08:00:00'", "Ok"),
        ("SELECT * FROM Cliente WHERE Nascimento > '01/05/1990'", "TypeMismatch"),
        ("SELECT * FROM Cliente WHERE Nascimento > 1990", "TypeMismatch"),
    ];

    for (sql, expected) in cases {
        assert_eq!(kind(sql), expected, "{}", sql);
    }
}

#[test]
fn test_operator_without_spaces_is_malformed() {
    assert_eq!(kind("SELECT * FROM Cliente WHERE idCliente=1"), "MalformedQuery");
}

#[test]
fn test_every_or_branch_is_checked() {
    assert_eq!(
        kind("SELECT * FROM Cliente WHERE idCliente = 1 OR Nome = 2"),
        "TypeMismatch"
    );
    assert_eq!(
        kind("SELECT * FROM Cliente WHERE (idCliente = 1 OR idCliente = 2) AND Nome = 'Ana'"),
        "Ok"
    );
}

#[test]
fn test_in_list_values_are_checked() {
    assert_eq!(kind("SELECT * FROM Endereco WHERE UF IN ('SP', 'RJ')"), "Ok");
    assert_eq!(kind("SELECT * FROM Endereco WHERE UF IN ('SP', 3)"), "TypeMismatch");
}

#[test]
fn test_bool_column_is_unsupported() {
    assert_eq!(
        kind("SELECT * FROM Endereco WHERE EnderecoPadrao = true"),
        "UnsupportedType"
    );
}

#[test]
fn test_custom_catalog() {
    let catalog = SchemaCatalog::new().with_table(
        "Livro",
        [("id", ColumnType::Int), ("Titulo", ColumnType::String)],
    );
    let options = TranslateOptions::default();

    assert!(translate::validate("SELECT Titulo FROM Livro WHERE id = 3", &catalog, &options).is_ok());
    assert_eq!(
        translate::validate("SELECT * FROM Cliente", &catalog, &options)
            .unwrap_err()
            .kind(),
        "UnknownTable"
    );
}

// ============================================================================
// Conjuncts and subqueries
// ============================================================================

#[test]
fn test_conjunct_text_uses_logical_symbols() {
    let validated = check(
        "SELECT * FROM Cliente WHERE Nome = 'Ana' AND (idCliente = 1 OR idCliente = 2)",
    )
    .unwrap();

    let texts: Vec<_> = validated.conjuncts.iter().map(|c| c.text()).collect();
    assert_eq!(
        texts,
        vec!["Nome = 'Ana'", "(idCliente = 1 ∨ idCliente = 2)"]
    );
}

#[test]
fn test_subquery_rewrites_conjunct() {
    let validated = check(
        "SELECT Nome FROM Cliente WHERE idCliente IN (SELECT Cliente_idCliente FROM Pedido)",
    )
    .unwrap();

    assert_eq!(
        validated.conjuncts[0].text(),
        "idCliente ∈ π_Cliente_idCliente(Pedido)"
    );
}

#[test]
fn test_subquery_type_must_match() {
    let options = TranslateOptions::default().with_subquery_policy(SubqueryPolicy::Strict);
    let err = translate::validate(
        "SELECT Nome FROM Cliente WHERE Nome IN (SELECT idPedido FROM Pedido)",
        builtin(),
        &options,
    )
    .unwrap_err();

    assert_eq!(
        err,
        TranslateError::TypeMismatch {
            field: "Nome".to_string(),
            expected: ColumnType::String,
            found: "(subquery)".to_string(),
        }
    );
}

#[test]
fn test_lenient_subquery_keeps_raw_text() {
    let sql = "SELECT Nome FROM Cliente WHERE idCliente IN (SELECT Ghost FROM Pedido) AND Nome = 'Ana'";
    let validated = check(sql).unwrap();

    assert_eq!(
        validated.conjuncts[0].predicate,
        Predicate::Raw("idCliente IN (SELECT Ghost FROM Pedido)".to_string())
    );
    assert_eq!(validated.conjuncts[1].text(), "Nome = 'Ana'");
}

#[test]
fn test_lenient_still_checks_outer_field() {
    assert_eq!(
        kind("SELECT Nome FROM Cliente WHERE Ghost IN (SELECT Cliente_idCliente FROM Pedido)"),
        "UnknownField"
    );
}
