use pylpex_eval::Value;

fn eval_ok(src: &str) -> Value {
    pylpex::run(src).unwrap_or_else(|e| panic!("unexpected error for `{src}`: {}", pylpex::format_error(&e)))
}

fn eval_err(src: &str) -> String {
    match pylpex::run(src) {
        Ok(v) => panic!("expected error for `{src}`, got {v}"),
        Err(e) => pylpex::format_error(&e),
    }
}

#[test]
fn division_by_zero_reports_message() {
    assert!(eval_err("1 / 0").contains("division by zero"));
}

#[test]
fn operator_precedence_matches_math() {
    match eval_ok("89 + 3 * (4 + 5) - 2 ** (7 - 5) * (4 + 7)") {
        Value::Integer(n) => assert_eq!(n, 72),
        other => panic!("expected integer, got {other}"),
    }
}

#[test]
fn compound_assignment_updates_binding() {
    match eval_ok("x = 5; x += 6; x") {
        Value::Integer(n) => assert_eq!(n, 11),
        other => panic!("expected integer, got {other}"),
    }
}

#[test]
fn negative_index_counts_from_end() {
    match eval_ok("a = [1, 2, 3]; a[-1]") {
        Value::Integer(n) => assert_eq!(n, 3),
        other => panic!("expected integer, got {other}"),
    }
}

#[test]
fn missing_dict_key_is_an_error() {
    assert!(eval_err("d = {\"a\": 1, \"b\": 2}; d[\"c\"]").contains("key"));
}

#[test]
fn break_exits_while_loop_early() {
    match eval_ok("count = 0; while count < 10 { count += 1; if count == 5 { break } } count") {
        Value::Integer(n) => assert_eq!(n, 5),
        other => panic!("expected integer, got {other}"),
    }
}

#[test]
fn default_parameters_fill_missing_arguments() {
    match eval_ok("function add(a, b, c = 0) { return a + b + c } add(1, 2)") {
        Value::Integer(n) => assert_eq!(n, 3),
        other => panic!("expected integer, got {other}"),
    }
}

#[test]
fn closures_share_mutable_captured_state() {
    let src = "function make_counter() { n = 0; function increment() { n += 1; return n } return increment } \
               f = make_counter(); f(); f(); f()";
    match eval_ok(src) {
        Value::Integer(n) => assert_eq!(n, 3),
        other => panic!("expected integer, got {other}"),
    }
}

#[test]
fn ternary_selects_the_true_branch() {
    match eval_ok("\"ok\" if true else \"no\"") {
        Value::String(s) => assert_eq!(*s, "ok"),
        other => panic!("expected string, got {other}"),
    }
}

#[test]
fn power_is_right_associative() {
    match eval_ok("2 ** 3 ** 2") {
        Value::Integer(n) => assert_eq!(n, 512),
        other => panic!("expected integer, got {other}"),
    }
}

#[test]
fn error_message_includes_position() {
    let message = eval_err("x = 1\ny = x +\n");
    assert!(message.starts_with("Error at line"));
}
