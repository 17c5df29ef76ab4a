use flow_network::{FlowNetwork, Label};
use petgraph::dot::{Config, Dot};

fn show_tables<L: Label>(network: &FlowNetwork<L, i64>) {
    println!("---------- Residual Adjacency Table ----------");
    println!("{:?}", Dot::with_config(&network.residual_graph(), &[Config::GraphContentOnly]));
    println!("---------- Flow Adjacency Table ----------");
    println!("{:?}", Dot::with_config(&network.flow_graph(), &[Config::GraphContentOnly]));
}

fn letters_network() -> FlowNetwork<String, i64> {
    let mut network = FlowNetwork::new();
    for (u, v, c) in [
        ("s", "a", 3),
        ("s", "b", 2),
        ("a", "b", 1),
        ("a", "c", 3),
        ("a", "d", 4),
        ("b", "d", 2),
        ("c", "t", 2),
        ("d", "t", 3),
    ] {
        network.add_edge(&u.to_owned(), &v.to_owned(), c);
    }
    network
}

fn numbered_network() -> FlowNetwork<u32, i64> {
    let mut network = FlowNetwork::new();
    for (u, v, c) in [
        (0, 1, 16),
        (0, 2, 13),
        (1, 3, 12),
        (1, 2, 10),
        (2, 1, 4),
        (2, 4, 14),
        (3, 2, 9),
        (3, 5, 20),
        (4, 3, 7),
        (4, 5, 4),
    ] {
        network.add_edge(&u, &v, c);
    }
    network
}

fn main() -> flow_network::Result<()> {
    env_logger::init();

    let mut network = letters_network();
    println!("Original tables:");
    show_tables(&network);
    network.set_source(&"s".to_owned());
    network.set_sink(&"t".to_owned());
    println!("Final flow: {}\n", network.max_flow()?);
    println!("Tables after max flow:");
    show_tables(&network);
    println!("Minimum cut: {:?}\n", network.min_cut());

    let mut network = numbered_network();
    network.set_source(&0);
    network.set_sink(&5);
    println!("Another network with a final flow of 23");
    println!("Final flow: {}", network.max_flow()?);
    Ok(())
}
