use num_complex::Complex64;

use super::*;
use crate::{from_str, Cons, Position, Span};

fn print(value: &Value) -> String {
    to_string(value).unwrap()
}

fn reprint(src: &str) -> String {
    let forms = from_str(src).unwrap();
    assert_eq!(forms.len(), 1);
    print(&forms[0])
}

#[test]
fn atoms() {
    assert_eq!(print(&Value::symbol("foo_bar")), "foo_bar");
    assert_eq!(print(&Value::keyword("key")), ":key");
    assert_eq!(print(&Value::keyword("")), ":");
    assert_eq!(print(&Value::from(-12i64)), "-12");
    assert_eq!(print(&Value::from(1.5)), "1.5");
    assert_eq!(print(&Value::from(3.0)), "3.0");
}

#[test]
fn special_floats() {
    assert_eq!(print(&Value::from(f64::INFINITY)), "Inf");
    assert_eq!(print(&Value::from(f64::NEG_INFINITY)), "-Inf");
    assert_eq!(print(&Value::from(f64::NAN)), "NaN");
}

#[test]
fn complex_numbers() {
    assert_eq!(print(&Value::from(Complex64::new(0.0, 2.0))), "2.0j");
    assert_eq!(print(&Value::from(Complex64::new(1.0, 2.0))), "1.0+2.0j");
    assert_eq!(print(&Value::from(Complex64::new(1.0, -2.5))), "1.0-2.5j");
    assert_eq!(
        print(&Value::from(Complex64::new(f64::INFINITY, f64::NAN))),
        "Inf+NaNj"
    );
}

#[test]
fn string_escapes() {
    assert_eq!(print(&Value::string("plain")), r#""plain""#);
    assert_eq!(
        print(&Value::string("say \"hi\"\\\n\t\r\u{7}")),
        r#""say \"hi\"\\\n\t\r\x07""#
    );
    assert_eq!(print(&Value::string("grüß")), "\"grüß\"");
}

#[test]
fn bracket_strings() {
    assert_eq!(print(&Value::bracket_string("a\"b", "x")), "#[x[a\"b]x]");
    assert_eq!(print(&Value::bracket_string("\nline", "")), "#[[\n\nline]]");
    // Contents that would end the literal early fall back to quotes.
    assert_eq!(print(&Value::bracket_string("a]]b", "")), r#""a]]b""#);
    assert_eq!(print(&Value::bracket_string("a]", "")), r#""a]""#);
}

#[test]
fn bytes() {
    assert_eq!(
        print(&Value::bytes(b"ab\"\\\n\x00\xff".to_vec())),
        r#"b"ab\"\\\n\x00\xff""#
    );
}

#[test]
fn collections() {
    assert_eq!(reprint("(a [b c] {:d 1} #{e})"), "(a [b c] {:d 1} #{e})");
    assert_eq!(reprint("()"), "()");
    assert_eq!(reprint("[]"), "[]");
    assert_eq!(reprint("#{}"), "#{}");
}

#[test]
fn dotted_lists() {
    assert_eq!(reprint("(a . b)"), "(a . b)");
    assert_eq!(reprint("(a b c . d)"), "(a b c . d)");
    let span = Span::new(Position::new(1, 1), Position::new(1, 1));
    let cell = Cons::new(
        Datum::new(Value::symbol("x"), span),
        Datum::new(Value::from(1i64), span),
    );
    assert_eq!(print(&Value::from(cell)), "(x . 1)");
}

#[test]
fn reader_macros_print_expanded() {
    assert_eq!(reprint("'a"), "(quote a)");
    assert_eq!(reprint("#*xs"), "(unpack_iterable xs)");
    assert_eq!(reprint("#tag x"), "(dispatch_tag_macro \"tag\" x)");
    assert_eq!(reprint("1/2"), "(fraction 1 2)");
}

#[test]
fn symbol_styles() {
    let value = Value::symbol("is_empty.FOO.set_bang");
    assert_eq!(print(&value), "is_empty.FOO.set_bang");
    assert_eq!(Options::default().symbol_style(), SymbolStyle::Mangled);
    let options = Options::new().with_symbol_style(SymbolStyle::Unmangled);
    assert_eq!(options.symbol_style(), SymbolStyle::Unmangled);
    assert_eq!(
        to_string_custom(&value, options).unwrap(),
        "empty?.*foo*.set!"
    );
}

#[test]
fn printer_writes_to_any_writer() {
    let mut printer = Printer::new(Vec::new());
    printer.print(&Value::symbol("a")).unwrap();
    io::Write::write_all(&mut printer, b" ").unwrap();
    printer.print(&Value::from(2i64)).unwrap();
    assert_eq!(printer.into_inner(), b"a 2");
}

#[test]
fn display_matches_printer() {
    let forms = from_str("(foo :bar \"baz\")").unwrap();
    assert_eq!(forms[0].to_string(), "(foo :bar \"baz\")");
    assert_eq!(format!("{}", forms[0].value()), "(foo :bar \"baz\")");
}
