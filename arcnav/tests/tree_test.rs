use arcnav::*;
use std::io::Write;

const ENTRIES: [&str; 6] = [
    "Meshes\\Armor\\iron.nif",
    "Meshes\\Armor\\steel.nif",
    "Meshes\\clutter.nif",
    "Textures\\sky.dds",
    "Textures\\Armor\\iron.dds",
    "Interface.swf",
];

fn loaded() -> PathTree {
    let mut tree = PathTree::new(HierarchyConfig::default()).unwrap();
    tree.load(&ENTRIES);
    tree
}

#[test]
fn test_reset_returns_every_node() {
    let mut tree = loaded();
    tree.expand_all(&ENTRIES).unwrap();
    let stats = tree.stats();
    assert_eq!(stats.used, tree.walk().count());

    tree.reset();
    let after = tree.stats();
    assert_eq!(after.used, 0);
    assert_eq!(after.free, after.capacity);
    assert_eq!(after.capacity, stats.capacity);
    assert!(tree.roots().is_empty());
}

#[test]
fn test_reset_restarts_slots_at_zero() {
    let mut tree = loaded();
    tree.expand_all(&ENTRIES).unwrap();
    tree.reset();
    let roots = tree.load(&ENTRIES).to_vec();
    let indices: Vec<usize> = roots.iter().map(|id| id.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_handles_go_stale_after_reset() {
    let mut tree = loaded();
    let old = tree.roots()[0];
    tree.reset();
    tree.load(&ENTRIES);
    assert!(tree.try_node(old).is_none());
    assert!(!tree.pool().contains(old));
}

#[test]
#[should_panic(expected = "not live")]
fn test_reading_stale_handle_panics() {
    let mut tree = loaded();
    let old = tree.roots()[0];
    tree.load(&ENTRIES);
    tree.node(old);
}

#[test]
fn test_load_replaces_previous_archive() {
    let mut tree = loaded();
    tree.expand_all(&ENTRIES).unwrap();
    let other = ["music\\theme.mp3"];
    let roots = tree.load(&other).to_vec();
    assert_eq!(roots.len(), 1);
    assert_eq!(tree.node(roots[0]).display_name(), "music");
    assert_eq!(tree.stats().used, 1);
}

#[test]
fn test_collapse_releases_subtree_only() {
    let mut tree = loaded();
    tree.expand_all(&ENTRIES).unwrap();
    let used = tree.stats().used;
    let meshes = tree.roots()[0];
    let armor = tree.node(meshes).children()[0];
    let armor_size = 1 + tree.node(armor).children().len();
    let meshes_below = armor_size + 1; // Armor subtree plus clutter.nif

    tree.collapse(meshes);
    assert!(!tree.node(meshes).is_discovered());
    assert!(tree.node(meshes).children().is_empty());
    assert!(tree.try_node(armor).is_none());
    assert_eq!(tree.stats().used, used - meshes_below);

    let again = tree.expand(meshes, &ENTRIES).unwrap().len();
    assert_eq!(again, 2);
    assert_eq!(tree.stats().used, used - armor_size + 1);
}

#[test]
fn test_reset_node_detaches_from_parent() {
    let mut tree = loaded();
    tree.expand_all(&ENTRIES).unwrap();
    let textures = tree.roots()[1];
    let armor = tree
        .find("Textures\\Armor", &ENTRIES)
        .unwrap()
        .unwrap();
    let used = tree.stats().used;

    tree.reset_node(armor);
    assert_eq!(tree.stats().used, used - 2);
    assert_eq!(tree.node(textures).children().len(), 1);

    tree.reset_node(textures);
    assert_eq!(tree.roots().len(), 2);
    assert!(tree.try_node(textures).is_none());
}

#[test]
fn test_find_discovers_lazily() {
    let mut tree = loaded();
    let meshes = tree.roots()[0];
    assert!(!tree.node(meshes).is_discovered());

    let steel = tree
        .find("meshes\\ARMOR\\Steel.NIF", &ENTRIES)
        .unwrap()
        .unwrap();
    assert_eq!(tree.node(steel).full_path(), "Meshes\\Armor\\steel.nif");
    assert!(tree.node(meshes).is_discovered());
    // Textures was never on the way.
    assert!(!tree.node(tree.roots()[1]).is_discovered());
}

#[test]
fn test_find_missing_and_trailing_separator() {
    let mut tree = loaded();
    assert_eq!(tree.find("Meshes\\nope.nif", &ENTRIES).unwrap(), None);
    assert_eq!(tree.find("", &ENTRIES).unwrap(), None);
    assert_eq!(tree.find("Interface.swf\\", &ENTRIES).unwrap(), None);
    assert_eq!(tree.find("Interface.swf\\x", &ENTRIES).unwrap(), None);

    let meshes = tree.find("Meshes\\", &ENTRIES).unwrap().unwrap();
    assert_eq!(tree.node(meshes).kind(), NodeKind::Directory);
}

#[test]
fn test_ancestors() {
    let mut tree = loaded();
    let iron = tree.find("Meshes\\Armor\\iron.nif", &ENTRIES).unwrap().unwrap();
    let chain: Vec<&str> = tree
        .ancestors(iron)
        .map(|id| tree.node(id).display_name())
        .collect();
    assert_eq!(chain, vec!["Armor", "Meshes"]);
    assert_eq!(tree.ancestors(tree.roots()[0]).count(), 0);
}

#[test]
fn test_sorted_roots() {
    let tree = loaded();
    let sorted: Vec<&str> = tree
        .sorted_roots()
        .into_iter()
        .map(|id| tree.node(id).display_name())
        .collect();
    assert_eq!(sorted, vec!["Meshes", "Textures", "Interface.swf"]);
}

#[test]
fn test_ignore_case_collation() {
    let entries = ["b.txt", "C.txt", "a.txt"];
    let mut tree = PathTree::new(HierarchyConfig {
        collation: Collation::IgnoreCase,
        ..HierarchyConfig::default()
    })
    .unwrap();
    tree.load(&entries);
    let sorted: Vec<&str> = tree
        .sorted_roots()
        .into_iter()
        .map(|id| tree.node(id).display_name())
        .collect();
    assert_eq!(sorted, vec!["a.txt", "b.txt", "C.txt"]);
}

#[test]
fn test_tree_with_builder_takes_its_config() {
    let builder = HierarchyBuilder::new(HierarchyConfig {
        separator: '/',
        collation: Collation::IgnoreCase,
        initial_capacity: 5,
        ..HierarchyConfig::default()
    })
    .unwrap();
    let mut tree = PathTree::with_builder(builder);
    assert_eq!(tree.stats().capacity, 5);
    assert_eq!(tree.sorter().collation(), Collation::IgnoreCase);
    assert_eq!(tree.config().separator, '/');

    let entries = ["usr/bin/ls", "Usr/lib/libc.so"];
    tree.load(&entries);
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.node(tree.roots()[0]).display_name(), "usr");
}

#[test]
fn test_snapshot_marks_undiscovered_directories() {
    let mut tree = loaded();
    let meshes = tree.roots()[0];
    tree.expand(meshes, &ENTRIES).unwrap();

    let snapshot = tree.snapshot();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[0].name, "Meshes");
    let children = snapshot[0].children.as_ref().unwrap();
    assert_eq!(children[0].name, "Armor");
    assert!(children[0].children.is_none());
    assert!(snapshot[1].children.is_none());
    assert_eq!(snapshot[2].kind, NodeKind::File);
}

#[test]
fn test_snapshot_json() {
    let entries = ["Dir\\f.txt"];
    let mut tree = PathTree::new(HierarchyConfig::default()).unwrap();
    tree.load(&entries);
    tree.expand_all(&entries).unwrap();

    let json = serde_json::to_value(tree.snapshot()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {
                "kind": "Directory",
                "name": "Dir",
                "path": "Dir",
                "children": [
                    { "kind": "File", "name": "f.txt", "path": "Dir\\f.txt" }
                ]
            }
        ])
    );
    let back: Vec<NodeSnapshot> = serde_json::from_value(json).unwrap();
    assert_eq!(back, tree.snapshot());
}

#[test]
fn test_growth_keeps_issued_handles() {
    let entries: Vec<String> = (0..200).map(|i| format!("dir{}\\file{}.bin", i % 7, i)).collect();
    let mut tree = PathTree::new(HierarchyConfig {
        initial_capacity: 2,
        ..HierarchyConfig::default()
    })
    .unwrap();
    let roots = tree.load(&entries).to_vec();
    let first_root = roots[0];
    tree.expand_all(&entries).unwrap();

    assert!(tree.stats().grow_count > 0);
    assert_eq!(tree.stats().used, 207);
    assert_eq!(tree.node(first_root).display_name(), "dir0");
    assert_eq!(tree.node(first_root).children().len(), 29);

    let mut seen = std::collections::HashSet::new();
    for (id, _) in tree.walk() {
        assert!(seen.insert(id.index()));
    }
}

#[test]
fn test_tree_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "separator": "/", "goBackSentinel": true }}"#).unwrap();

    let config = HierarchyConfig::from_file(file.path()).unwrap();
    let entries = ["a/b.txt"];
    let mut tree = PathTree::new(config).unwrap();
    let roots = tree.load(&entries).to_vec();
    let children = tree.expand(roots[0], &entries).unwrap().to_vec();
    assert_eq!(children.len(), 2);
    assert_eq!(tree.node(children[0]).kind(), NodeKind::GoBack);
    assert_eq!(tree.node(children[1]).full_path(), "a/b.txt");
}

#[test]
fn test_invalid_config_rejected() {
    let config = HierarchyConfig {
        growth_factor: 0.5,
        ..HierarchyConfig::default()
    };
    assert!(matches!(PathTree::new(config), Err(Error::InvalidConfig(_))));
}
