use indoc::indoc;

use super::cst::SyntaxKind::{self, *};
use super::lexer::lex;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source).iter().map(|t| t.kind()).collect()
}

fn texts(source: &str) -> Vec<String> {
    lex(source).iter().map(|t| t.text().to_string()).collect()
}

#[test]
fn simple_query() {
    assert_eq!(
        kinds("SELECT [System.Id] FROM WorkItems"),
        vec![Select, Identifier, From, WorkItems, Eof]
    );
}

#[test]
fn keywords_ignore_case() {
    assert_eq!(
        kinds("select Select SELECT where Or aNd"),
        vec![Select, Select, Select, Where, Or, And, Eof]
    );
}

#[test]
fn multi_word_keywords_allow_whitespace() {
    assert_eq!(
        kinds("ORDER  BY AS OF asof Work Items WorkItemLinks"),
        vec![OrderBy, Asof, Asof, WorkItems, WorkItemLinks, Eof]
    );
}

#[test]
fn keyword_prefixes_stay_identifiers() {
    assert_eq!(
        kinds("Selection Orders Index System.State"),
        vec![Identifier, Identifier, Identifier, Identifier, Eof]
    );
}

#[test]
fn bracketed_identifiers_keep_brackets() {
    assert_eq!(
        texts("[Assigned To] [System.Id]"),
        vec!["[Assigned To]", "[System.Id]", ""]
    );
}

#[test]
fn link_sides() {
    assert_eq!(
        kinds("[Source].[System.Id] [target].x source"),
        vec![Source, Dot, Identifier, Target, Dot, Identifier, Source, Eof]
    );
}

#[test]
fn operators() {
    assert_eq!(
        kinds("= <> != > >= < <= + - ( ) , ."),
        vec![
            Equals,
            NotEquals,
            NotEquals,
            GreaterThan,
            GreaterOrEq,
            LessThan,
            LessOrEq,
            Plus,
            Minus,
            LParen,
            RParen,
            Comma,
            Dot,
            Eof
        ]
    );
}

#[test]
fn literals() {
    assert_eq!(
        kinds("'Active' \"x\" 42 @Today @me true FALSE"),
        vec![Str, Str, Digits, Variable, Variable, True, False, Eof]
    );
}

#[test]
fn string_escapes() {
    let tokens = lex("'it''s' \"say \"\"hi\"\"\"");
    assert_eq!(tokens[0].kind(), Str);
    assert_eq!(tokens[0].string_value().as_deref(), Some("it's"));
    assert_eq!(tokens[1].kind(), Str);
    assert_eq!(tokens[1].string_value().as_deref(), Some("say \"hi\""));
}

#[test]
fn unterminated_string() {
    let tokens = lex("[State] = 'Active");
    assert_eq!(tokens[2].kind(), NonterminatingString);
    assert_eq!(tokens[2].text(), "'Active");
    assert_eq!(tokens[2].string_value().as_deref(), Some("Active"));
    assert_eq!(tokens[3].kind(), Eof);
}

#[test]
fn unrecognized_characters_coalesce() {
    let tokens = lex("SELECT ### [x]");
    assert_eq!(tokens[1].kind(), UnexpectedToken);
    assert_eq!(tokens[1].text(), "###");
    assert_eq!(tokens[2].kind(), Identifier);
}

#[test]
fn trailing_garbage() {
    let tokens = lex("[x] $%");
    assert_eq!(tokens[1].kind(), UnexpectedToken);
    assert_eq!(tokens[1].text(), "$%");
    assert_eq!(tokens[2].kind(), Eof);
}

#[test]
fn positions_are_one_based() {
    let source = indoc! {"
        SELECT [System.Id]
          FROM WorkItems
    "};
    let tokens = lex(source);

    let from = &tokens[2];
    assert_eq!(from.kind(), From);
    assert_eq!(from.line(), 2);
    assert_eq!(from.start_column(), 3);
    assert_eq!(from.end_column(), 7);

    let id = &tokens[1];
    assert_eq!(id.line(), 1);
    assert_eq!(id.start_column(), 8);
    assert_eq!(id.end_column(), 8 + "[System.Id]".len() as u32);
}

#[test]
fn end_column_is_start_plus_length() {
    let source = "SELECT [Título], [x] FROM WorkItems WHERE [a] = 'ünïcode'";
    for token in lex(source) {
        assert_eq!(
            token.end_column(),
            token.start_column() + token.text().chars().count() as u32
        );
    }
}

#[test]
fn columns_count_characters() {
    let tokens = lex("'é' [x]");
    assert_eq!(tokens[1].start_column(), 5);
    assert_eq!(u32::from(tokens[1].span().start()), 5);
}

#[test]
fn eof_remembers_previous_token() {
    let tokens = lex("SELECT [x]  ");
    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind(), Eof);
    assert_eq!(eof.text(), "");
    assert_eq!(eof.start_column(), 13);
    let prev = eof.prev().unwrap();
    assert_eq!(prev.kind(), Identifier);
    assert_eq!(prev.text(), "[x]");
    assert!(tokens[0].prev().is_none());
}

#[test]
fn empty_input() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), Eof);
    assert_eq!((tokens[0].line(), tokens[0].start_column()), (1, 1));
    assert!(tokens[0].prev().is_none());
}
