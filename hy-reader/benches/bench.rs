use criterion::*;

use hy_reader::lex::tokenize;
use hy_reader::{from_str, to_string, Reader};

const PROGRAM: &str = r#"
(import os sys)

(defn fizzbuzz [n]
  "Print the first `n` fizzbuzz numbers."
  (for [i (range 1 (+ n 1))]
    (print (cond (= 0 (% i 15)) "FizzBuzz"
                 (= 0 (% i 3)) "Fizz"
                 (= 0 (% i 5)) "Buzz"
                 True i))))

(setv *config* {:depth 3 :ratio 1/3 :scale 2.5e3 :shift 1+2j})
(defmacro unless [test #* body] `(when (not ~test) ~@body))
#_ (fizzbuzz 100)
(fizzbuzz (int (get sys.argv 1)))
"#;

fn bench_float_parsing(c: &mut Criterion) {
    c.bench_function("float parsing", |b| {
        b.iter(|| black_box(from_str("-1.360438755021694e308")))
    });
}

fn bench_mangled_symbols(c: &mut Criterion) {
    c.bench_function("symbol mangling", |b| {
        b.iter(|| black_box(from_str("*earmuffed* kebab-case-name valid? set! a-b.c-d")))
    });
}

fn bench_lexing(c: &mut Criterion) {
    c.bench_function("lexing a program", |b| {
        b.iter(|| black_box(tokenize(PROGRAM)))
    });
}

fn bench_reading_tokens(c: &mut Criterion) {
    let tokens = tokenize(PROGRAM).unwrap();
    let reader = Reader::new();
    c.bench_function("reading pre-lexed tokens", |b| {
        b.iter(|| black_box(reader.read(tokens.iter().cloned())))
    });
}

fn bench_printing(c: &mut Criterion) {
    let forms = from_str(PROGRAM).unwrap();
    c.bench_function("printing a program", |b| {
        b.iter(|| {
            for form in &forms {
                black_box(to_string(form.value()).unwrap());
            }
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = bench_float_parsing, bench_mangled_symbols, bench_lexing, bench_reading_tokens, bench_printing
}
criterion_main!(benches);
