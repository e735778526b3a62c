use arcnav::{HierarchyConfig, NodeId, NodeKind, NodeSnapshot, PathTree};

use crate::error::{Error, Result};

fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::GoBack => "up",
        NodeKind::Directory => "dir",
        NodeKind::File => "file",
    }
}

fn open(entries: &[String], config: HierarchyConfig) -> Result<PathTree> {
    let mut tree = PathTree::new(config)?;
    tree.load(entries);
    Ok(tree)
}

fn print_level(tree: &PathTree, ids: &[NodeId]) {
    for id in ids {
        let node = tree.node(*id);
        println!("{:<4} {}", kind_label(node.kind()), node.display_name());
    }
}

fn find_directory(tree: &mut PathTree, entries: &[String], path: &str) -> Result<NodeId> {
    match tree.find(path, entries)? {
        Some(id) if tree.node(id).is_directory() => Ok(id),
        Some(_) => Err(Error::CliInputError(format!("{} is not a directory", path))),
        None => Err(Error::NotFound(path.to_string())),
    }
}

pub fn show_roots(entries: &[String], config: HierarchyConfig) -> Result<()> {
    let tree = open(entries, config)?;
    println!("Roots\n-----");
    print_level(&tree, &tree.sorted_roots());
    Ok(())
}

pub fn show_directory(entries: &[String], config: HierarchyConfig, path: &str) -> Result<()> {
    let mut tree = open(entries, config)?;
    let dir = find_directory(&mut tree, entries, path)?;
    tree.expand(dir, entries)?;

    println!("Directory: {}\n", tree.node(dir).full_path());
    print_level(&tree, &tree.sorted_children(dir));
    Ok(())
}

pub fn show_path(entries: &[String], config: HierarchyConfig, path: &str) -> Result<()> {
    let mut tree = open(entries, config)?;
    let id = tree
        .find(path, entries)?
        .ok_or_else(|| Error::NotFound(path.to_string()))?;

    let node = tree.node(id);
    println!("{:<4} {}", kind_label(node.kind()), node.full_path());
    let parents: Vec<&str> = tree
        .ancestors(id)
        .map(|parent| tree.node(parent).display_name())
        .collect();
    if !parents.is_empty() {
        println!("   - parents: {}", parents.join(" < "));
    }
    Ok(())
}

fn print_snapshot(node: &NodeSnapshot, depth: usize, separator: char) {
    let indent = "  ".repeat(depth);
    match node.kind {
        NodeKind::GoBack => return,
        NodeKind::Directory => println!("{}{}{}", indent, node.name, separator),
        NodeKind::File => println!("{}{}", indent, node.name),
    }
    for child in node.children.iter().flatten() {
        print_snapshot(child, depth + 1, separator);
    }
}

pub fn show_tree(entries: &[String], config: HierarchyConfig, json: bool) -> Result<()> {
    let mut tree = open(entries, config)?;
    tree.expand_all(entries)?;
    let snapshot = tree.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }
    let separator = tree.config().separator;
    for root in &snapshot {
        print_snapshot(root, 0, separator);
    }
    Ok(())
}

pub fn show_stats(entries: &[String], config: HierarchyConfig) -> Result<()> {
    let mut tree = open(entries, config)?;
    tree.expand_all(entries)?;

    let (mut directories, mut files) = (0, 0);
    for (id, _) in tree.walk() {
        match tree.node(id).kind() {
            NodeKind::Directory => directories += 1,
            NodeKind::File => files += 1,
            NodeKind::GoBack => {}
        }
    }

    let stats = tree.stats();
    println!("Entries: {}", entries.len());
    println!("Directories: {}", directories);
    println!("Files: {}", files);
    println!("Pool capacity: {}", stats.capacity);
    println!("Pool used: {}", stats.used);
    println!("Pool free: {}", stats.free);
    println!("Pool grown: {} times", stats.grow_count);
    Ok(())
}
