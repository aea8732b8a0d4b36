extern crate ordered_trees;
#[macro_use]
extern crate log;
extern crate simplelog;

use log::LevelFilter;
use ordered_trees::persist::{self, AnyTree};
use ordered_trees::{NodeView, OrderedContainer, TreeKind};
use simplelog::{Config, SimpleLogger};
use std::env;
use std::process;

fn print_shape(view: &dyn NodeView<'_, u32>, depth: usize) {
    println!("{}{} ({})", "  ".repeat(depth), view.value(), view.color());
    for child in view.left().iter().chain(view.right().iter()) {
        print_shape(&**child, depth + 1);
    }
}

fn run(kind: TreeKind, values: &[u32]) -> persist::Result<()> {
    let mut tree = AnyTree::new(kind);
    for value in values {
        tree.insert(*value);
    }

    let bytes = persist::to_bytes(&tree)?;
    let loaded: AnyTree<u32> = persist::from_bytes(&bytes)?;
    info!("{}: {} bytes on disk", loaded.name(), bytes.len());

    println!("{}: {:?}", loaded.name(), loaded.traverse());
    if let Some(root) = loaded.root_view() {
        print_shape(&*root, 1);
    }
    if let Some(root) = loaded.root_view_multiway() {
        let keys: Vec<&u32> = (0..root.key_count()).filter_map(|index| root.key(index)).collect();
        println!("  root keys {:?} with {} children", keys, root.child_count());
    }
    Ok(())
}

fn main() {
    if let Err(error) = SimpleLogger::init(LevelFilter::Info, Config::default()) {
        eprintln!("Error: failed to initialize logger: {}", error);
    }

    let mut values = Vec::new();
    for arg in env::args().skip(1) {
        match arg.parse::<u32>() {
            Ok(value) => values.push(value),
            Err(_) => {
                eprintln!("Error: `{}` is not a non-negative integer.", arg);
                process::exit(1);
            },
        }
    }
    if values.is_empty() {
        values = vec![10, 20, 30, 40, 50, 25];
    }

    for kind in TreeKind::ALL.iter() {
        if let Err(error) = run(*kind, &values) {
            error!("{}: {}", kind.name(), error);
            process::exit(1);
        }
    }
}
