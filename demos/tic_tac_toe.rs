extern crate retro_solver;

use retro_solver::games::tic_tac_toe::TicTacToe;
use retro_solver::games::triangle_peg_board::TrianglePegBoard;
use retro_solver::rules::Outcome;
use retro_solver::solver::Solver;

fn main() -> Result<(), retro_solver::Error> {
    tracing_subscriber::fmt().with_target(false).init();

    // Solve classic tic-tac-toe, keeping every optimal move
    let mut solver = Solver::two_player(TicTacToe::new(3)?)
        .with_keep_all_solutions(true)
        .build();
    let solved = solver.solve()?;

    let root = solved.root();
    println!(
        "Tic-tac-toe: {} positions, result under perfect play: {:?}",
        solved.node_count(),
        solved.root_label()
    );

    // Print every optimal opening
    for opening in solved.best_moves(root) {
        println!("{}", opening.state);
    }

    // Play one optimal game
    println!("One optimal game:");
    for position in solved.principal_line(root) {
        println!("{}", position.state);
    }
    assert_eq!(solved.label(root), Some(Outcome::Draw));

    let tree = solved.strategy_tree();
    println!("Optimal strategy tree has {} nodes", tree.nodes().count());

    // The 15-hole peg board from the diner table
    let mut pegs = Solver::one_player(TrianglePegBoard::new(5)?).build();
    let solved = pegs.solve()?;
    println!(
        "Triangle peg board: {} positions, best finish leaves {} peg(s)",
        solved.node_count(),
        solved.root_label().map_or(0, |score| -score)
    );

    Ok(())
}
