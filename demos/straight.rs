//! Example: longest straight of a small dice set, with the matching shown.
//!
//! Run with:
//! `cargo run --example straight`

use straight_match::{ResourceCatalog, ScanEvent, StraightEngine};

fn main() {
    let dice = ResourceCatalog::from_values([
        vec![4, 8, 15, 16, 23, 42],
        vec![8, 6, 7, 5, 30, 9],
        vec![1, 2, 3, 4, 55, 6],
        vec![2, 10, 18, 36, 54, 86],
    ]);

    let engine = StraightEngine::new(&dice).expect("dice set is valid");
    let mut events = Vec::new();
    let report = engine.run_with(&mut events);

    println!("Longest straight: {}", report.longest);
    println!(
        "Direct assignments: {}, via reshuffling: {}",
        report.stats.direct_assignments, report.stats.augmented_assignments
    );

    for event in &events {
        match event {
            ScanEvent::WindowOpened { value, .. } => println!("open window at {value}"),
            ScanEvent::Extended {
                value,
                slot,
                augmented,
                ..
            } => println!(
                "  {value} on die {}{}",
                slot + 1,
                if *augmented { " (after reshuffle)" } else { "" }
            ),
            ScanEvent::Blocked { value, .. } => println!("  no die left for {value}"),
            ScanEvent::GapRestart { value, .. } => println!("  gap before {value}"),
            _ => {}
        }
    }
}
