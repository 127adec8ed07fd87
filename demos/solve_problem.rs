use anyhow::Result;
use sole::SolverMethod;

fn load_yaml(path: &str) -> Result<sole::Problem> {
    let file = std::fs::File::open(path)?;
    let problem = sole::load(file)?;
    Ok(problem)
}

fn print_system(system: &sole::LinearSystem) {
    println!("A =\n{}", system.a());
    println!("B =\n{}", system.b());
    println!("initial X =\n{}", system.x());
}

fn compare_methods(problem: &sole::Problem) -> Result<()> {
    println!("\nSolving the same system with every method:\n");
    for method in [
        SolverMethod::GaussElimination,
        SolverMethod::JacobiIteration,
        SolverMethod::GaussSeidelRelaxation,
    ] {
        let mut system = problem.clone().into_system()?;
        match system.solve(method) {
            Ok(()) => println!(
                "{method}: X = {:?}, |AX - B| = {}",
                system.x().column_values(0),
                system.residual_magnitude()?
            ),
            // Gauss-Seidel is declared but not available
            Err(e) => println!("{method}: {e}"),
        }
    }
    Ok(())
}

fn do_work(path: &str) -> Result<()> {
    let problem = load_yaml(path)?;

    let system = problem.clone().into_system()?;
    print_system(&system);

    // sole::Solution implements Display,
    // which writes out a YAML representation.
    let solution = problem.clone().solve()?;
    println!("\nSolution using {}:\n{solution}", problem.method());

    #[cfg(feature = "json")]
    {
        println!("The solution in JSON format:\n{}", solution.as_json_string()?);
    }

    compare_methods(&problem)?;

    Ok(())
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/diagonally_dominant.yaml".to_string());
    do_work(&path).unwrap();
}

#[test]
fn test_diagonally_dominant() {
    do_work("demos/diagonally_dominant.yaml").unwrap();
}
