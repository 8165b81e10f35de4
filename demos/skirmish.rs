//! Terminal skirmish demo: runs every kind of path request on a random map
//! and prints the routes and engine statistics.
//!
//! Run: cargo run --bin skirmish [seed]

use warband_demos::Skirmish;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut skirmish = match Skirmish::new(seed) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let outcomes = match skirmish.run() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mapper = skirmish.mapper();
    for o in &outcomes {
        println!("== {} ({} waypoints)", o.label, o.path.len());
        let cells: Vec<String> = o
            .path
            .iter()
            .map(|&p| mapper.world_to_grid(p).to_string())
            .collect();
        println!("   {}", cells.join(" "));
        if let Some(last) = o.facings.last() {
            println!("   arrives facing {last:?}");
        }
        print!("{}", skirmish.render(&o.path));
        println!();
    }

    let stats = skirmish.stats();
    println!("searches run:      {}", stats.total_paths_calculated);
    println!("average search:    {:.3} ms", stats.average_path_time);
    println!(
        "cache:             {} hits / {} misses ({:.0}%)",
        stats.cache_hits,
        stats.cache_misses,
        stats.cache_hit_rate * 100.0
    );
    println!("cached routes:     {}", stats.active_cache_entries);
}
