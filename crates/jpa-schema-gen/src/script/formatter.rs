//! Deterministic DDL reformatting.
//!
//! The formatter is whitespace-insensitive: the input is tokenized (quoted
//! literals kept whole), split into statements, and re-laid out from the
//! token stream alone. Because the output tokenizes back to the same
//! stream, formatting is idempotent.

/// Default statement delimiter assumed when none is configured.
pub const DEFAULT_DELIMITER: &str = ";";

// Keyword pairs that open a new statement at paren depth zero. Needed
// because generators commonly emit one statement per line with no delimiter
// at all. Pairs rather than single keywords: "drop" and "alter" also occur
// mid-statement ("alter table t alter column", "on delete set null").
const STATEMENT_STARTERS: &[(&str, &[&str])] = &[
    (
        "create",
        &[
            "table", "index", "sequence", "view", "schema", "trigger", "function", "procedure",
            "materialized", "unique", "or", "global", "temporary", "temp",
        ],
    ),
    (
        "drop",
        &[
            "table", "index", "sequence", "view", "schema", "trigger", "function", "procedure",
            "materialized", "if",
        ],
    ),
    ("alter", &["table", "sequence", "view", "schema", "index"]),
    ("comment", &["on"]),
];

fn starts_statement(token: &str, next: Option<&String>) -> bool {
    STATEMENT_STARTERS.iter().any(|(keyword, followers)| {
        token.eq_ignore_ascii_case(keyword)
            && next.is_some_and(|n| followers.iter().any(|f| n.eq_ignore_ascii_case(f)))
    })
}

/// Reformat a DDL script.
///
/// Each statement becomes its own block separated by a blank line;
/// `create table` column lists are broken one item per line. Statements
/// that carried the delimiter keep it.
pub fn format(sql: &str, delimiter: &str) -> String {
    let tokens = tokenize(sql, delimiter);
    let statements = split_statements(&tokens, delimiter);

    let mut blocks = Vec::with_capacity(statements.len());
    for statement in &statements {
        if statement.tokens.is_empty() {
            continue;
        }
        let mut block = format_statement(&statement.tokens);
        if statement.delimited {
            block.push_str(delimiter);
        }
        blocks.push(block);
    }

    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn tokenize(sql: &str, delimiter: &str) -> Vec<String> {
    let chars: Vec<char> = sql.chars().collect();
    let delim: Vec<char> = delimiter.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.is_empty() {
            tokens.push(std::mem::take(current));
        }
    };

    while i < chars.len() {
        if !delim.is_empty() && chars[i..].starts_with(delim.as_slice()) {
            flush(&mut current, &mut tokens);
            tokens.push(delimiter.to_string());
            i += delim.len();
            continue;
        }
        let c = chars[i];
        match c {
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            '(' | ')' | ',' => {
                flush(&mut current, &mut tokens);
                tokens.push(c.to_string());
            }
            '\'' | '"' => {
                flush(&mut current, &mut tokens);
                let quote = c;
                let mut literal = String::from(c);
                i += 1;
                while i < chars.len() {
                    literal.push(chars[i]);
                    if chars[i] == quote {
                        break;
                    }
                    i += 1;
                }
                tokens.push(literal);
            }
            _ => current.push(c),
        }
        i += 1;
    }
    flush(&mut current, &mut tokens);
    tokens
}

struct Statement {
    tokens: Vec<String>,
    delimited: bool,
}

fn split_statements(tokens: &[String], delimiter: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut depth: i32 = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token == delimiter {
            statements.push(Statement {
                tokens: std::mem::take(&mut current),
                delimited: true,
            });
            depth = 0;
            continue;
        }
        match token.as_str() {
            "(" => depth += 1,
            ")" => depth -= 1,
            _ => {
                if depth == 0
                    && !current.is_empty()
                    && starts_statement(token, tokens.get(i + 1))
                {
                    statements.push(Statement {
                        tokens: std::mem::take(&mut current),
                        delimited: false,
                    });
                }
            }
        }
        current.push(token.clone());
    }
    if !current.is_empty() {
        statements.push(Statement {
            tokens: current,
            delimited: false,
        });
    }
    statements
}

fn format_statement(tokens: &[String]) -> String {
    if is_create_table(tokens) {
        if let Some(open) = tokens.iter().position(|t| t == "(") {
            return format_create_table(tokens, open);
        }
    }
    join_inline(tokens)
}

fn is_create_table(tokens: &[String]) -> bool {
    tokens
        .first()
        .is_some_and(|t| t.eq_ignore_ascii_case("create"))
        && tokens
            .iter()
            .take(3)
            .any(|t| t.eq_ignore_ascii_case("table"))
}

fn format_create_table(tokens: &[String], open: usize) -> String {
    let mut out = join_inline(&tokens[..open]);
    out.push_str(" (");

    let mut depth = 1;
    let mut item: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();
    let mut rest_start = tokens.len();

    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        match token.as_str() {
            "(" => {
                depth += 1;
                item.push(token.clone());
            }
            ")" => {
                depth -= 1;
                if depth == 0 {
                    rest_start = i + 1;
                    break;
                }
                item.push(token.clone());
            }
            "," if depth == 1 => {
                items.push(join_inline(&item));
                item.clear();
            }
            _ => item.push(token.clone()),
        }
    }
    if !item.is_empty() {
        items.push(join_inline(&item));
    }

    for (i, entry) in items.iter().enumerate() {
        out.push_str("\n    ");
        out.push_str(entry);
        if i + 1 < items.len() {
            out.push(',');
        }
    }
    out.push_str("\n)");

    if rest_start < tokens.len() {
        out.push(' ');
        out.push_str(&join_inline(&tokens[rest_start..]));
    }
    out
}

fn join_inline(tokens: &[String]) -> String {
    let mut out = String::new();
    for token in tokens {
        let no_space = out.is_empty()
            || out.ends_with('(')
            || matches!(token.as_str(), ")" | "," | "(");
        if !no_space {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
