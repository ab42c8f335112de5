use rexpr::{parse_functional, parse_postfix, parse_prefix, simplify};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let inputs = [
        parse_prefix("(* (negate x) (+ y 0))"),
        parse_postfix("(x (x y *) /)"),
        parse_functional("x negate y normal2 1 *"),
    ];
    for parsed in inputs {
        match parsed {
            Ok(expr) => println!("{expr}  =>  {}", simplify(&expr)),
            Err(err) => eprintln!("parse error: {err}"),
        }
    }
}
