//! Round-trip checking of the printer and reader.
//!
//! Values are generated with quickcheck, printed, and read back. Only values
//! the reader can produce are generated: symbols are already mangled, and
//! bracket strings have contents their delimiter can enclose.

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;
use rand::Rng;

use num_bigint::BigInt;
use num_complex::Complex64;

use crate::{from_str, mangle, print, to_string, to_string_custom, Datum, Position, Span, Value};

enum ValueKind {
    Symbol,
    Keyword,
    Integer,
    Float,
    Complex,
    String,
    BracketString,
    Bytes,
    Expression,
    List,
    Dict,
    Set,
    Cons,
}

fn datum(value: Value) -> Datum {
    let origin = Position::new(1, 1);
    Datum::new(value, Span::new(origin, origin))
}

fn gen_elements(g: &mut Gen, depth: usize) -> Vec<Datum> {
    let len = usize::arbitrary(g) % (g.size() + 1);
    (0..len).map(|_| datum(gen_value(g, depth + 1))).collect()
}

fn gen_value(g: &mut Gen, depth: usize) -> Value {
    use ValueKind::*;
    let choices = if depth >= g.size() {
        &[
            Symbol,
            Keyword,
            Integer,
            Float,
            Complex,
            String,
            BracketString,
            Bytes,
        ] as &[ValueKind]
    } else {
        &[
            Symbol,
            Keyword,
            Integer,
            Float,
            Complex,
            String,
            BracketString,
            Bytes,
            Expression,
            List,
            Dict,
            Set,
            Cons,
        ]
    };
    // The `Arbitrary` implementations for numbers stay close to zero, so
    // draw from the whole range instead.
    let mut rng = rand::thread_rng();
    match g.choose(choices).unwrap() {
        Symbol => {
            let choices = [
                "foo", "foo_bar", "is_valid", "set_bang", "OUT", "+", "-", "..", ".foo", "a.b",
                "%$<>",
            ];
            Value::symbol(*g.choose(&choices).unwrap())
        }
        Keyword => {
            let choices = ["foo", "a-keyword", ""];
            Value::keyword(*g.choose(&choices).unwrap())
        }
        Integer => Value::from(rng.gen::<i64>()),
        Float => {
            let special = [-9876.5e10, -1.0, 0.0, 1.4, 123.45e10, 5e-324, f64::INFINITY];
            if bool::arbitrary(g) {
                Value::from(*g.choose(&special).unwrap())
            } else {
                Value::from(rng.gen::<f64>())
            }
        }
        Complex => {
            let choices = [
                Complex64::new(0.0, 2.0),
                Complex64::new(1.0, -2.5),
                Complex64::new(-3.0, 0.0),
                Complex64::new(f64::NEG_INFINITY, 1e-7),
            ];
            Value::from(*g.choose(&choices).unwrap())
        }
        String => {
            let choices = ["", "foo", "\"", "\t", "\x01", "grüß\n", "a\\b"];
            Value::string(*g.choose(&choices).unwrap())
        }
        BracketString => {
            let choices = [("a\"b", "x"), ("\nleading newline", ""), ("", "doc")];
            let (text, delimiter) = *g.choose(&choices).unwrap();
            Value::bracket_string(text, delimiter)
        }
        Bytes => {
            let choices = [b"".as_ref(), b"\x01\x02\x03", b"Hello World\x00", b"\xff\""];
            Value::bytes(g.choose(&choices).map(|&bytes| bytes.to_vec()).unwrap())
        }
        Expression => Value::Expression(gen_elements(g, depth)),
        List => Value::List(gen_elements(g, depth)),
        Dict => Value::Dict(gen_elements(g, depth)),
        Set => Value::Set(gen_elements(g, depth)),
        Cons => Value::from(crate::Cons::new(
            datum(gen_value(g, depth + 1)),
            datum(gen_value(g, depth + 1)),
        )),
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_value(g, 0)
    }
}

fn read_back(printed: &str) -> Value {
    let mut forms = from_str(printed).expect("parsing failed");
    assert_eq!(forms.len(), 1, "{}", printed);
    forms.remove(0).into_value()
}

#[test]
fn print_read_roundtrip_default() {
    fn prop(input: Value) -> bool {
        let string = to_string(&input).expect("conversion to string failed");
        input == read_back(&string)
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .gen(Gen::new(4))
        .quickcheck(prop as fn(Value) -> bool);
}

// Unmangled symbols are mangled again when read.
#[test]
fn print_read_roundtrip_unmangled() {
    fn prop(input: Value) -> bool {
        let options = print::Options::new().with_symbol_style(print::SymbolStyle::Unmangled);
        let string = to_string_custom(&input, options).expect("conversion to string failed");
        input == read_back(&string)
    }
    QuickCheck::new()
        .tests(500)
        .gen(Gen::new(3))
        .quickcheck(prop as fn(Value) -> bool);
}

#[quickcheck]
fn integers_read_back(n: i64) -> bool {
    read_back(&n.to_string()).as_integer() == Some(&BigInt::from(n))
}

#[quickcheck]
fn integers_with_separators_read_back(n: u32) -> bool {
    let digits = n.to_string();
    let mut text = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            text.push('_');
        }
        text.push(c);
    }
    read_back(&text).as_integer() == Some(&BigInt::from(n))
}

/// A hyphenated name, optionally ending in `?` or `!`.
#[derive(Debug, Clone)]
struct Name(String);

impl Arbitrary for Name {
    fn arbitrary(g: &mut Gen) -> Self {
        let alphabet = ['a', 'b', 'x', 'y', '-', '-'];
        let len = 1 + usize::arbitrary(g) % 8;
        let mut name: String = (0..len).map(|_| *g.choose(&alphabet).unwrap()).collect();
        match u8::arbitrary(g) % 3 {
            0 => name.push('?'),
            1 => name.push('!'),
            _ => {}
        }
        Name(name)
    }
}

#[quickcheck]
fn mangling_is_idempotent(name: Name) -> bool {
    let once = mangle(&name.0);
    mangle(&once) == once
}

#[quickcheck]
fn mangled_names_have_no_hyphens(name: Name) -> bool {
    name.0 == "-" || !mangle(&name.0).contains('-')
}

#[quickcheck]
fn symbols_are_read_mangled(name: Name) -> bool {
    let value = read_back(&name.0);
    value.as_symbol() == Some(mangle(&name.0).as_str())
}

#[test]
fn write_float() {
    #[allow(clippy::unreadable_literal)]
    let value = Value::from(-11.287888289184039);
    assert_eq!(to_string(&value).unwrap(), "-11.287888289184039");
    assert_eq!(to_string(&Value::from(1e300)).unwrap(), "1e300");
    assert_eq!(read_back("1e300"), Value::from(1e300));
}
