//! # 流水线集成测试
//!
//! 源码 → tokenize → Parser → Interpreter 的完整链路。

use inky_runtime::script::parser::MAX_NESTING;
use inky_runtime::{
    InkyError, Interpreter, LexError, Outcome, ParseError, Parser, RuntimeError, Value,
    evaluate_expr, parse_tokens, run_source, to_source, tokenize,
};

fn eval(source: &str) -> Value {
    let mut interpreter = Interpreter::new(Vec::new());
    match run_source(source, &mut interpreter) {
        Ok(Outcome::Value(value)) => value,
        other => panic!("{:?} 期望得到值，实际 {:?}", source, other),
    }
}

fn eval_err(source: &str) -> InkyError {
    let mut interpreter = Interpreter::new(Vec::new());
    run_source(source, &mut interpreter).unwrap_err()
}

fn output_of(source: &str) -> String {
    let mut interpreter = Interpreter::new(Vec::new());
    let outcome = run_source(source, &mut interpreter).unwrap();
    assert_eq!(outcome, Outcome::Executed);
    String::from_utf8(interpreter.into_output()).unwrap()
}

/// 端到端用例表
#[test]
fn test_end_to_end_table() {
    let cases: &[(&str, Value)] = &[
        // 算术
        ("3 + 4", Value::Number(7.0)),
        ("10 - 5", Value::Number(5.0)),
        ("3 * 4", Value::Number(12.0)),
        ("10 / 2", Value::Number(5.0)),
        ("10 % 3", Value::Number(1.0)),
        ("2 + 3 * 4", Value::Number(14.0)),
        ("(2 + 3) * 4", Value::Number(20.0)),
        // 一元
        ("~3", Value::Number(-3.0)),
        ("-5", Value::Number(-5.0)),
        ("+5", Value::Number(5.0)),
        ("~-5", Value::Number(5.0)),
        // 乘方
        ("2^3", Value::Number(8.0)),
        ("2^3^2", Value::Number(512.0)),
        ("(2^3)^2", Value::Number(64.0)),
        // 比较
        ("5 > 3", Value::Bool(true)),
        ("3 > 5", Value::Bool(false)),
        ("3 < 5", Value::Bool(true)),
        ("5 < 3", Value::Bool(false)),
        ("5 >= 5", Value::Bool(true)),
        ("5 >= 3", Value::Bool(true)),
        ("3 >= 5", Value::Bool(false)),
        ("5 <= 5", Value::Bool(true)),
        ("3 <= 5", Value::Bool(true)),
        ("5 <= 3", Value::Bool(false)),
        // 相等
        ("5 == 5", Value::Bool(true)),
        ("5 == 3", Value::Bool(false)),
        ("5 ~= 3", Value::Bool(true)),
        ("5 ~= 5", Value::Bool(false)),
        // 逻辑
        ("2 > 1 and 5 > 1", Value::Bool(true)),
        ("~(3 < 1 + -6)", Value::Bool(true)),
        ("true and true", Value::Bool(true)),
        ("true and false", Value::Bool(false)),
        ("true or true", Value::Bool(true)),
        ("true or false", Value::Bool(true)),
        ("false or false", Value::Bool(false)),
        ("true and false or true", Value::Bool(true)),
        ("false or true and false", Value::Bool(false)),
        (
            "(5 > 3 and 2 < 4) or (7 <= 7 and 9 >= 8)",
            Value::Bool(true),
        ),
        ("~(false or true and false) and 3^2 > 8", Value::Bool(true)),
        // 字符串与混合类型
        ("\"hello\" == \"hello\"", Value::Bool(true)),
        ("\"n=\" + 5", Value::String("n=5".to_string())),
        ("~true", Value::Bool(false)),
        ("2^3 + 1 > 8 and ~false", Value::Bool(true)),
    ];

    for (source, expected) in cases {
        assert_eq!(&eval(source), expected, "源码: {}", source);
    }
}

#[test]
fn test_arithmetic_matches_host_numbers() {
    let pairs = [(1.0, 2.0), (7.5, 2.0), (-3.0, 4.25), (10.0, 3.0), (0.5, 0.25)];
    for (a, b) in pairs {
        let fmt = |n: f64| {
            if n < 0.0 {
                format!("-{}", -n)
            } else {
                n.to_string()
            }
        };
        let (sa, sb) = (fmt(a), fmt(b));
        assert_eq!(eval(&format!("{sa} + {sb}")), Value::Number(a + b));
        assert_eq!(eval(&format!("{sa} - {sb}")), Value::Number(a - b));
        assert_eq!(eval(&format!("{sa} * {sb}")), Value::Number(a * b));
        assert_eq!(eval(&format!("{sa} / {sb}")), Value::Number(a / b));
        assert_eq!(eval(&format!("{sa} % {sb}")), Value::Number(a % b));
    }
}

#[test]
fn test_short_circuit_skips_failing_operand() {
    assert_eq!(eval("false and (\"a\" - 1)"), Value::Bool(false));
    assert_eq!(eval("true or (\"a\" - 1)"), Value::Bool(true));
}

#[test]
fn test_cross_kind_equality_is_an_error() {
    assert!(matches!(
        eval_err("5 == \"5\""),
        InkyError::Runtime(RuntimeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_unterminated_string_reports_start_line() {
    assert_eq!(
        eval_err("print 1\n\"abc"),
        InkyError::Lex(LexError::UnterminatedString { line: 2 })
    );
}

#[test]
fn test_non_boolean_if_runs_no_branch() {
    let mut interpreter = Interpreter::new(Vec::new());
    let err = run_source("if 5 then print 1 end", &mut interpreter).unwrap_err();
    assert!(matches!(
        err,
        InkyError::Runtime(RuntimeError::ExpectedBoolean { line: 1, .. })
    ));
    assert!(interpreter.output().is_empty());
}

#[test]
fn test_program_output() {
    let source = "# greeting\nprint \"hello, \"\nprintln 'world'\n\
                  if 2^3 == 8 then\n  println 'eight'\nelse\n  println 'other'\nend\n\
                  -- trailing comment";
    assert_eq!(output_of(source), "hello, world\neight\n");
}

#[test]
fn test_round_trip_through_source_formatter() {
    let samples = [
        ("2 + 3 * 4", Value::Number(14.0)),
        ("(2+3)*4", Value::Number(20.0)),
        ("2>1 and 5>1", Value::Bool(true)),
        ("10 % 3", Value::Number(1.0)),
        ("2^3^2", Value::Number(512.0)),
        ("-(-5) + ~2", Value::Number(3.0)),
        ("'a' + 1.5", Value::String("a1.5".to_string())),
        ("~(false or true and false)", Value::Bool(true)),
    ];

    for (source, expected) in samples {
        let tokens = tokenize(source).unwrap();
        let ast = parse_tokens(tokens).unwrap().unwrap();
        let text = to_source(&ast);

        let reparsed = Parser::new(tokenize(&text).unwrap())
            .parse_expression()
            .unwrap();
        assert_eq!(evaluate_expr(&ast).unwrap(), expected, "源码: {}", source);
        assert_eq!(
            evaluate_expr(&reparsed).unwrap(),
            expected,
            "格式化后: {}",
            text
        );
    }
}

#[test]
fn test_round_trip_program() {
    let source = "if 1 < 2 then println 'yes' else print 'no' end\nprintln 1 + 1";
    let program = Parser::new(tokenize(source).unwrap()).parse().unwrap();
    let text = to_source(&program);
    let reparsed = Parser::new(tokenize(&text).unwrap()).parse().unwrap();

    let mut first = Interpreter::new(Vec::new());
    first.execute(&program).unwrap();
    let mut second = Interpreter::new(Vec::new());
    second.execute(&reparsed).unwrap();
    assert_eq!(first.into_output(), second.into_output());
}

#[test]
fn test_huge_integer_literal_widens_to_number() {
    assert_eq!(
        eval("99999999999999999999 + 1"),
        Value::Number(99999999999999999999.0 + 1.0)
    );
    assert_eq!(
        eval("99999999999999999999 > 9223372036854775807"),
        Value::Bool(true)
    );
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let source = format!("{}1{}", "(".repeat(20000), ")".repeat(20000));
    assert_eq!(
        eval_err(&source),
        InkyError::Parse(ParseError::NestingTooDeep {
            limit: MAX_NESTING,
            line: 1
        })
    );

    // 出错之后同一个解释器仍可继续使用
    let mut interpreter = Interpreter::new(Vec::new());
    assert!(run_source(&format!("println {}1", "~".repeat(20000)), &mut interpreter).is_err());
    assert_eq!(
        run_source("1 + 1", &mut interpreter).unwrap(),
        Outcome::Value(Value::Number(2.0))
    );
}
