//! The compiled-in store schema.

use std::sync::LazyLock;

use super::{ColumnType, SchemaCatalog};
use ColumnType::*;

static BUILTIN: LazyLock<SchemaCatalog> = LazyLock::new(|| {
    SchemaCatalog::new()
        .with_table("Categoria", [("idCategoria", Int), ("Descricao", String)])
        .with_table(
            "Produto",
            [
                ("idProduto", Int),
                ("Nome", String),
                ("Descricao", String),
                ("Preco", Decimal),
                ("QuantEstoque", Int),
                ("Categoria_idCategoria", Int),
            ],
        )
        .with_table("TipoCliente", [("idTipoCliente", Int), ("Descricao", String)])
        .with_table(
            "Cliente",
            [
                ("idCliente", Int),
                ("Nome", String),
                ("Email", String),
                ("Nascimento", Date),
                ("Senha", String),
                ("TipoCliente_idTipoCliente", Int),
                ("DataRegistro", Date),
            ],
        )
        .with_table("TipoEndereco", [("idTipoEndereco", Int), ("Descricao", String)])
        .with_table(
            "Endereco",
            [
                ("idEndereco", Int),
                ("EnderecoPadrao", Bool),
                ("Logradouro", String),
                ("Numero", Int),
                ("Complemento", String),
                ("Bairro", String),
                ("Cidade", String),
                ("UF", String),
                ("CEP", String),
                ("TipoEndereco_idTipoEndereco", Int),
                ("Cliente_idCliente", Int),
            ],
        )
        .with_table("Telefone", [("Numero", String), ("Cliente_idCliente", Int)])
        .with_table("Status", [("idStatus", Int), ("Descricao", String)])
        .with_table(
            "Pedido",
            [
                ("idPedido", Int),
                ("Status_idStatus", Int),
                ("DataPedido", Date),
                ("ValorTotalPedido", Decimal),
                ("Cliente_idCliente", Int),
            ],
        )
        .with_table(
            "Pedido_has_Produto",
            [
                ("idPedidoProduto", Int),
                ("Pedido_idPedido", Int),
                ("Produto_idProduto", Int),
                ("Quantidade", Int),
                ("PrecoUnitario", Decimal),
            ],
        )
});

/// The store schema shipped with the translator.
pub fn builtin() -> &'static SchemaCatalog {
    &BUILTIN
}
