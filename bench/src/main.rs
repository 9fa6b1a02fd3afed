use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use separation_core::Graph;
use std::collections::BTreeSet;
use std::time::Instant;

/// Same label shape as the costar graph: the set of shared movie titles.
type BenchGraph = Graph<u64, BTreeSet<String>>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: separation-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!();
        println!("Default node_count: 200000");
        return;
    }

    if node_count < 32 {
        eprintln!("node_count must be at least 32");
        return;
    }

    println!("separation-bench");
    println!("================");
    println!();

    let generators: Vec<(&str, fn(u64) -> BenchGraph)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> BenchGraph),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(u64) -> BenchGraph, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.2}s, {} nodes, {} arcs, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.num_vertices(),
        graph.num_arcs(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    println!();

    // BFS tree from node 0 (typically a hub or root)
    let t = Instant::now();
    let tree = separation_core::bfs(&graph, &0);
    println!(
        "{:<24} {:>8.1}ms  ({} reachable)",
        "bfs tree from 0",
        ms(t),
        tree.num_vertices().saturating_sub(1)
    );

    // Path from the last node back to the center
    let far_node = graph.num_vertices() as u64 - 1;
    let t = Instant::now();
    match separation_core::get_path(&tree, &far_node) {
        Ok(path) => println!("{:<24} {:>8.1}ms  ({} hops to {})", "path", ms(t), path.len() - 1, far_node),
        Err(e) => println!("{:<24} {:>8.1}ms  ({})", "path", ms(t), e),
    }

    let t = Instant::now();
    match separation_core::average_separation(&tree, &0) {
        Ok(avg) => println!("{:<24} {:>8.1}ms  ({:.3})", "average separation", ms(t), avg),
        Err(e) => println!("{:<24} {:>8.1}ms  ({})", "average separation", ms(t), e),
    }

    let t = Instant::now();
    let top = separation_core::highest_in_degree(&graph, 5);
    let best = top.first().map(|d| (d.vertex, d.in_degree)).unwrap_or((0, 0));
    println!(
        "{:<24} {:>8.1}ms  (top: node {} with {})",
        "in-degree ranking",
        ms(t),
        best.0,
        best.1
    );

    let mut rng = StdRng::seed_from_u64(2024);
    let t = Instant::now();
    let walk = separation_core::random_walk(&graph, &0, 1_000, &mut rng);
    println!("{:<24} {:>8.1}ms  ({} steps)", "random walk", ms(t), walk.len().saturating_sub(1));

    // Full separation ranking is one BFS per node; only run it on small graphs.
    if graph.num_vertices() <= 5_000 {
        let t = Instant::now();
        let ranked = separation_core::lowest_average_separation(&graph, 5);
        let best = ranked.first().map(|r| r.average_separation).unwrap_or(f64::NAN);
        println!("{:<24} {:>8.1}ms  (best {:.3})", "separation ranking", ms(t), best);
    }

    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, seeded
// ---------------------------------------------------------------------------

const TITLES: [&str; 8] = [
    "Footloose",
    "Apollo 13",
    "Mystic River",
    "The River Wild",
    "Tremors",
    "Diner",
    "Frost/Nixon",
    "Flatliners",
];

/// A movie title with a release year, so repeated edges collect a few
/// distinct titles.
fn title(rng: &mut StdRng) -> String {
    let name = TITLES[rng.gen_range(0..TITLES.len())];
    format!("{} ({})", name, rng.gen_range(1970..2025))
}

/// Add `movie` to the edge between `a` and `b`, creating endpoints and the
/// edge as needed.
fn connect(graph: &mut BenchGraph, a: u64, b: u64, movie: String) {
    graph.insert_vertex(a);
    graph.insert_vertex(b);
    if let Ok(titles) = graph.undirected_label_or_insert_with(a, b, BTreeSet::new) {
        titles.insert(movie);
    }
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each node spawns `branching` children. Produces deep paths (log depth)
/// with exponential width. Tests deep BFS and path reconstruction.
fn gen_lsystem(node_count: u64) -> BenchGraph {
    let mut graph = Graph::with_capacity(node_count as usize, node_count as usize);
    let mut rng = StdRng::seed_from_u64(42);

    let branching = 3u64;
    graph.insert_vertex(0);

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                let label = title(&mut rng);
                connect(&mut graph, parent, child, label);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint.
/// Nodes with more edges are more likely to be picked.
fn gen_scale_free(node_count: u64) -> BenchGraph {
    let edges_per_node = 10u64;
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * edges_per_node) as usize);
    let mut rng = StdRng::seed_from_u64(12345);

    let mut edge_endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    // Seed: small clique
    let seed = 5u64;
    for i in 0..seed {
        for j in (i + 1)..seed {
            let label = title(&mut rng);
            connect(&mut graph, i, j, label);
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        graph.insert_vertex(new_node);
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            let target = edge_endpoints[rng.gen_range(0..edge_endpoints.len())];
            if target != new_node {
                let label = title(&mut rng);
                connect(&mut graph, new_node, target, label);
                edge_endpoints.push(new_node);
                edge_endpoints.push(target);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node connects to its K nearest ring neighbors, and each of those
/// edges is rewired to a random node with probability p.
fn gen_small_world(node_count: u64) -> BenchGraph {
    let k = 10u64;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * k) as usize);
    let mut rng = StdRng::seed_from_u64(67890);

    for i in 0..node_count {
        graph.insert_vertex(i);
    }

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let label = title(&mut rng);
            let target = if rng.gen_bool(p) {
                let rewired = rng.gen_range(0..node_count);
                if rewired != i {
                    rewired
                } else {
                    neighbor
                }
            } else {
                neighbor
            };
            connect(&mut graph, i, target, label);
        }
    }

    graph
}

/// Erdos-Renyi: uniform random edges, ~10 per node on average.
fn gen_random(node_count: u64) -> BenchGraph {
    let target_edges = node_count * 10;
    let mut graph = Graph::with_capacity(node_count as usize, target_edges as usize);
    let mut rng = StdRng::seed_from_u64(54321);

    for i in 0..node_count {
        graph.insert_vertex(i);
    }

    for _ in 0..target_edges {
        let from = rng.gen_range(0..node_count);
        let to = rng.gen_range(0..node_count);
        if from != to {
            let label = title(&mut rng);
            connect(&mut graph, from, to, label);
        }
    }

    graph
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Worst case for average separation: every cross-clique path squeezes
/// through the ~10-node bridge.
fn gen_barbell(node_count: u64) -> BenchGraph {
    let bridge_len = 10u64;
    let clique_size = (node_count - bridge_len) / 2;
    let mut graph = Graph::with_capacity(node_count as usize, (clique_size * 40 + bridge_len) as usize);
    let mut rng = StdRng::seed_from_u64(99999);

    let clique = |graph: &mut BenchGraph, offset: u64, rng: &mut StdRng| {
        for i in 0..clique_size {
            graph.insert_vertex(offset + i);
        }
        for i in 0..clique_size {
            for _ in 0..20u64.min(clique_size - 1) {
                let target = rng.gen_range(0..clique_size);
                if target != i {
                    let label = title(rng);
                    connect(graph, offset + i, offset + target, label);
                }
            }
        }
    };

    // Clique A, bridge chain, clique B
    clique(&mut graph, 0, &mut rng);
    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let label = title(&mut rng);
        connect(&mut graph, id - 1, id, label);
    }
    let b_start = bridge_start + bridge_len;
    clique(&mut graph, b_start, &mut rng);
    let label = title(&mut rng);
    connect(&mut graph, b_start - 1, b_start, label);

    graph
}
