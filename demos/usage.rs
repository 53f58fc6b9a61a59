use logicka::*;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::collections::HashMap;

fn main() -> Result<(), LogicError> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    println!("A simple example!");

    let e: Expr = "(p -> q) & (q -> r) & !(r \\/ s)".parse()?;
    println!("Parsed expression: {}", &e);
    println!("{}", TreePrinter::render(&e));

    let engine = Engine::default();
    let simplified = engine.simplify_expression("(p -> q) & p & !(q & r)")?;
    println!("Simplified: {}", simplified);
    for application in engine.applications() {
        println!("  {}", application);
    }

    let fixed = HashMap::from([("q".to_string(), true)]);
    for entry in engine.calculate_truth_table("p \\/ q -> r", &fixed)? {
        println!("{}", entry);
    }

    println!("Variables: {:?}", extract_variables("p and q or (r -> p)"));
    Ok(())
}
