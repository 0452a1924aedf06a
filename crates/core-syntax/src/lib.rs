//! Language descriptors and the per-row lexer.
//!
//! A [`Syntax`] is an immutable rules record: extension list, word lists,
//! single-line comment starter, and feature flags. [`highlight_row`] turns a
//! rendered (tab-expanded) row into a tag array of the same length. The lexer
//! is pure with respect to other rows: strings and comments never span a row
//! boundary.

/// Highlight tag attached to one rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Number,
    Str,
    Comment,
    Keyword,
    Type,
    Const,
}

/// Immutable per-language lexing rules.
pub struct Syntax {
    /// Display name shown in the status bar.
    pub name: &'static str,
    /// File extensions (without the dot) that select this descriptor.
    pub extensions: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub types: &'static [&'static str],
    pub consts: &'static [&'static str],
    /// Single-line comment starter; empty disables comment highlighting.
    pub line_comment: &'static str,
    pub highlight_numbers: bool,
    pub highlight_strings: bool,
}

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else",
    "struct", "union", "typedef", "static", "enum", "class", "using",
    "namespace", "case", "const", "inline", "auto", "constexpr", "template",
    "typename", "#include", "#pragma", "#define", "#if", "#ifdef", "#ifndef",
    "#elif", "#endif",
];

const C_TYPES: &[&str] = &[
    "void", "char", "bool", "short", "int", "size_t", "ssize_t", "ptrdiff_t",
    "long", "float", "double",
];

const C_CONSTS: &[&str] = &["true", "false", "NULL"];

/// Built-in language table.
pub static SYNTAXES: &[Syntax] = &[Syntax {
    name: "c",
    extensions: &["c", "h", "cpp"],
    keywords: C_KEYWORDS,
    types: C_TYPES,
    consts: C_CONSTS,
    line_comment: "//",
    highlight_numbers: true,
    highlight_strings: true,
}];

/// Select a descriptor from a file path by its extension (the text after the
/// first `.` in the path). Returns `None` when no descriptor matches.
pub fn detect(path: &str) -> Option<&'static Syntax> {
    let dot = path.find('.')?;
    let ext = &path[dot + 1..];
    if ext.is_empty() {
        return None;
    }
    SYNTAXES
        .iter()
        .find(|syn| syn.extensions.iter().any(|e| *e == ext))
}

/// Separator set used by the lexer and by keyword-boundary checks. NUL is a
/// separator so that end-of-row counts as a boundary.
pub fn is_separator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0 || b",.()+-/*=~%<>[];".contains(&c)
}

fn match_word_list(
    render: &[u8],
    hl: &mut [Highlight],
    i: &mut usize,
    words: &'static [&'static str],
    tag: Highlight,
) -> bool {
    for word in words {
        let w = word.as_bytes();
        let end = *i + w.len();
        if end > render.len() || &render[*i..end] != w {
            continue;
        }
        let after = render.get(end).copied().unwrap_or(0);
        if is_separator(after) {
            hl[*i..end].fill(tag);
            *i = end;
            return true;
        }
    }
    false
}

/// Lex one rendered row into a tag array of equal length.
///
/// `syn == None` yields all-`Normal`. The scan follows the previous-separator
/// rule: keywords, types, consts, and number starts only match right after a
/// separator (or another number tag for digits and `.`).
pub fn highlight_row(render: &[u8], syn: Option<&Syntax>) -> Vec<Highlight> {
    let mut hl = vec![Highlight::Normal; render.len()];
    let Some(syn) = syn else {
        return hl;
    };

    let comment = syn.line_comment.as_bytes();
    let mut prev_sep = true;
    let mut in_string: u8 = 0;
    let mut i = 0;

    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if !comment.is_empty() && in_string == 0 && render[i..].starts_with(comment) {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if syn.highlight_strings {
            if in_string != 0 {
                hl[i] = Highlight::Str;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::Str;
                    i += 2;
                    continue;
                }
                if c == in_string {
                    in_string = 0;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = c;
                hl[i] = Highlight::Str;
                i += 1;
                continue;
            }
        }

        if syn.highlight_numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            // Priority order: keywords, then types, then consts.
            let found = match_word_list(render, &mut hl, &mut i, syn.keywords, Highlight::Keyword)
                || match_word_list(render, &mut hl, &mut i, syn.types, Highlight::Type)
                || match_word_list(render, &mut hl, &mut i, syn.consts, Highlight::Const);
            if found {
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    hl
}
