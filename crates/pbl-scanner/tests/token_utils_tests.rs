use super::*;
use crate::tokenize::tokenize;

fn find(tokens: &TokenStream, value: &str) -> TokenId {
    tokens
        .iter()
        .find(|(_, token)| token.value == value)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no token '{value}'"))
}

#[test]
fn test_is_start_of_line() {
    let tokens = tokenize("a b\n  c").expect("tokenize");
    assert!(is_start_of_line(&tokens, find(&tokens, "a")));
    assert!(!is_start_of_line(&tokens, find(&tokens, "b")));
    assert!(is_start_of_line(&tokens, find(&tokens, "c")));
}

#[test]
fn test_kind_predicates() {
    let tokens = tokenize("x 1 ;").expect("tokenize");
    assert!(is_word(&tokens, find(&tokens, "x")));
    assert!(is_number(&tokens, find(&tokens, "1")));
    assert!(is_symbol(&tokens, find(&tokens, ";")));
    assert!(is_text(&tokens, find(&tokens, ";")));
    assert!(!is_text(&tokens, tokens.eof()));
}

#[test]
fn test_search_finds_qualifying_token() {
    let tokens = tokenize("List < String > name").expect("tokenize");
    let open = find(&tokens, "<");
    let close = search(
        &tokens,
        open,
        TokenStep::NextText,
        |t, id| t.value(id) == ">",
        |t, id| t.value(id) == ";",
    );
    assert_eq!(close, Some(find(&tokens, ">")));
}

#[test]
fn test_search_stops_at_disqualifier() {
    let tokens = tokenize("a < b ; c >").expect("tokenize");
    let open = find(&tokens, "<");
    let close = search(
        &tokens,
        open,
        TokenStep::NextText,
        |t, id| t.value(id) == ">",
        |t, id| t.value(id) == ";",
    );
    assert_eq!(close, None, "search should give up at ';'");
}

#[test]
fn test_search_stops_at_eof() {
    let tokens = tokenize("a b").expect("tokenize");
    let found = search(
        &tokens,
        tokens.first_text(),
        TokenStep::NextText,
        |t, id| t.value(id) == "z",
        |_, _| false,
    );
    assert_eq!(found, None);
}

#[test]
fn test_search_backwards() {
    let tokens = tokenize("x = y + z").expect("tokenize");
    let found = search(
        &tokens,
        find(&tokens, "z"),
        TokenStep::PreviousText,
        |t, id| t.value(id) == "=",
        |_, _| false,
    );
    assert_eq!(found, Some(find(&tokens, "=")));
}

#[test]
fn test_line_preview_marks_focus() {
    let tokens = tokenize("first();\nint x = oops;\nlast();").expect("tokenize");
    let oops = find(&tokens, "oops");
    let preview = line_preview(&tokens, oops, 10);
    assert_eq!(preview.text, "int x = oops;");
    assert_eq!(&preview.text[preview.focus.clone()], "oops");
}
