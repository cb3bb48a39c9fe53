//! Tree-walking evaluator, environment model, and runtime value types for
//! the pylpex language.

pub mod environment;
pub mod evaluator;
pub mod flow;
pub mod intrinsics;
pub mod operators;
pub mod types;
pub mod value;

pub use environment::Environment;
pub use evaluator::Evaluator;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use pylpex_parser::parse_source;

    fn run(src: &str) -> Value {
        let program = parse_source(src).expect("parse");
        Evaluator::new().evaluate_program(&program).expect("eval")
    }

    fn run_err(src: &str) -> String {
        let program = parse_source(src).expect("parse");
        Evaluator::new().evaluate_program(&program).unwrap_err().message
    }

    #[test]
    fn division_by_zero() {
        assert!(run_err("1 / 0").contains("division by zero"));
    }

    #[test]
    fn operator_precedence() {
        match run("89 + 3 * (4 + 5) - 2 ** (7 - 5) * (4 + 7)") {
            Value::Integer(n) => assert_eq!(n, 72),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn compound_assignment() {
        match run("x = 5; x += 6; x") {
            Value::Integer(n) => assert_eq!(n, 11),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn negative_indexing() {
        match run("a = [1,2,3]; a[-1]") {
            Value::Integer(n) => assert_eq!(n, 3),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn missing_dict_key() {
        assert!(run_err("d = {\"a\": 1, \"b\": 2}; d[\"c\"]").contains("key"));
    }

    #[test]
    fn break_inside_while() {
        match run("count = 0; while count < 10 { count += 1; if count == 5 { break } } count") {
            Value::Integer(n) => assert_eq!(n, 5),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn default_parameters() {
        match run("function add(a, b, c = 0) { return a + b + c } add(1, 2)") {
            Value::Integer(n) => assert_eq!(n, 3),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn closures_capture_environment() {
        match run(
            "function make_counter() { n = 0; function increment() { n += 1; return n } return increment } \
             f = make_counter(); f(); f(); f()",
        ) {
            Value::Integer(n) => assert_eq!(n, 3),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn ternary_expression() {
        match run("\"ok\" if true else \"no\"") {
            Value::String(s) => assert_eq!(*s, "ok"),
            other => panic!("expected string, got {other}"),
        }
    }

    #[test]
    fn power_is_right_associative() {
        match run("2 ** 3 ** 2") {
            Value::Integer(n) => assert_eq!(n, 512),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn list_aliasing() {
        match run("a = [1,2,3]; b = a; b[0] = 9; a[0]") {
            Value::Integer(n) => assert_eq!(n, 9),
            other => panic!("expected integer, got {other}"),
        }
    }

    #[test]
    fn short_circuit_and() {
        match run("false and (1 / 0 == 0)") {
            Value::Boolean(b) => assert!(!b),
            other => panic!("expected boolean, got {other}"),
        }
    }

    #[test]
    fn get_type_reports_list_union() {
        match run("get_type([1, \"a\"])") {
            Value::String(s) => assert_eq!(*s, "list[union[int, string]]"),
            other => panic!("expected string, got {other}"),
        }
    }

    #[test]
    fn bound_method_push() {
        match run("a = [1]; a.push(2); a.length()") {
            Value::Integer(n) => assert_eq!(n, 2),
            other => panic!("expected integer, got {other}"),
        }
    }
}
