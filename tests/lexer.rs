use pylpex_parser::tokenizer::Lexer;
use pylpex_ast::token::TokenKind;

#[test]
fn tokenizes_a_small_program() {
    let tokens = Lexer::new("x = 1 + 2\n").tokenize().expect("lex");
    let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
    assert!(kinds.contains(&&TokenKind::Identifier("x".into())));
    assert!(kinds.contains(&&TokenKind::Plus));
    assert_eq!(*kinds.last().unwrap(), &TokenKind::Eof);
}

#[test]
fn reports_position_of_unexpected_character() {
    let err = Lexer::new("x = 1 @ 2").tokenize().unwrap_err();
    assert_eq!(err.position.unwrap().column, 7);
}
