//! SQL keywords recognized by the clause scanner.
//!
//! Keywords are matched case-insensitively against whole words. Only the
//! clause keywords split a query into clauses; the rest are reserved so they
//! are never taken for a table alias.

/// SQL keyword.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // === Clause keywords ===
    Select,
    From,
    Join,
    On,
    Where,
    As,

    // === Logical / predicate keywords ===
    And,
    Or,
    Not,
    In,
    Like,
    Between,
    Is,
    Null,
    True,
    False,
    Exists,

    // === Join modifiers ===
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    Natural,

    // === Unsupported clause keywords ===
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Union,
    Intersect,
    Except,
    Distinct,
    Asc,
    Desc,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: &'static [Keyword] = &[
        Keyword::Select,
        Keyword::From,
        Keyword::Join,
        Keyword::On,
        Keyword::Where,
        Keyword::As,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::In,
        Keyword::Like,
        Keyword::Between,
        Keyword::Is,
        Keyword::Null,
        Keyword::True,
        Keyword::False,
        Keyword::Exists,
        Keyword::Inner,
        Keyword::Left,
        Keyword::Right,
        Keyword::Full,
        Keyword::Outer,
        Keyword::Cross,
        Keyword::Natural,
        Keyword::Group,
        Keyword::By,
        Keyword::Having,
        Keyword::Order,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Union,
        Keyword::Intersect,
        Keyword::Except,
        Keyword::Distinct,
        Keyword::Asc,
        Keyword::Desc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Join => "JOIN",
            Keyword::On => "ON",
            Keyword::Where => "WHERE",
            Keyword::As => "AS",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::In => "IN",
            Keyword::Like => "LIKE",
            Keyword::Between => "BETWEEN",
            Keyword::Is => "IS",
            Keyword::Null => "NULL",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Exists => "EXISTS",
            Keyword::Inner => "INNER",
            Keyword::Left => "LEFT",
            Keyword::Right => "RIGHT",
            Keyword::Full => "FULL",
            Keyword::Outer => "OUTER",
            Keyword::Cross => "CROSS",
            Keyword::Natural => "NATURAL",
            Keyword::Group => "GROUP",
            Keyword::By => "BY",
            Keyword::Having => "HAVING",
            Keyword::Order => "ORDER",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Union => "UNION",
            Keyword::Intersect => "INTERSECT",
            Keyword::Except => "EXCEPT",
            Keyword::Distinct => "DISTINCT",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
        }
    }

    /// Match a single word against the keyword list, ignoring case.
    pub fn parse(word: &str) -> Option<Keyword> {
        Keyword::ALL
            .iter()
            .copied()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(word))
    }

    /// Whether this keyword starts a new clause.
    pub fn is_clause(&self) -> bool {
        matches!(
            self,
            Keyword::Select | Keyword::From | Keyword::Join | Keyword::Where
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `word` is a reserved keyword.
pub fn is_reserved(word: &str) -> bool {
    Keyword::parse(word).is_some()
}

/// Whether `word` is the given keyword.
pub fn is_keyword(word: &str, keyword: Keyword) -> bool {
    keyword.as_str().eq_ignore_ascii_case(word)
}
