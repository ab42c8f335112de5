use rexpr::{parse_prefix, simplify};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = "(/ (sumCb x y) (* x 2))";
    match parse_prefix(input) {
        Ok(expr) => {
            let derivative = simplify(&expr.differentiate("x"));
            println!("d/dx {expr} = {derivative}");
            println!("prefix: {}", derivative.to_prefix());
        }
        Err(err) => eprintln!("parse error for {input}: {err}"),
    }
}
