use super::*;

#[test]
fn test_push_keeps_order_and_duplicates() {
    let mut queue = Queue::new();
    queue.push("zlib");
    queue.push("libpng >= 1.6");
    queue.push("zlib");

    assert_eq!(queue.len(), 3);
    assert_eq!(
        queue.iter().collect::<Vec<_>>(),
        vec!["zlib", "libpng >= 1.6", "zlib"]
    );
}

#[test]
fn test_push_does_not_validate() {
    let mut queue = Queue::new();
    queue.push(">= ,,");
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_push_copies_atom() {
    let mut queue = Queue::new();
    let mut atom = String::from("zlib");
    queue.push(&atom);
    atom.push_str("-ng");

    assert_eq!(queue.iter().next(), Some("zlib"));
}

#[test]
fn test_free_empty_queue() {
    Queue::new().free();
}

#[test]
fn test_from_iterator() {
    let queue: Queue = ["a", "b"].into_iter().collect();
    assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["a", "b"]);

    let owned: Queue = vec![String::from("c")].into_iter().collect();
    assert_eq!(owned.len(), 1);
}

// ============================================================================
// Compilation
// ============================================================================

#[test]
fn test_compile_empty_queue() {
    let mut world = Package::world();
    assert!(!Queue::new().compile(&mut world));
    assert!(world.required.is_empty());
}

#[test]
fn test_compile_in_insertion_order() {
    let queue: Queue = ["b", "a >= 1, c"].into_iter().collect();
    let mut world = Package::world();

    assert!(queue.compile(&mut world));
    let atoms: Vec<String> = world.required.iter().map(|dep| dep.to_atom()).collect();
    assert_eq!(atoms, vec!["b", "a >= 1", "c"]);
    assert!(world.requires_private.is_empty());
}

#[test]
fn test_compile_skips_malformed_atoms() {
    let queue: Queue = [">= 2", "a"].into_iter().collect();
    let mut world = Package::world();

    assert!(queue.compile(&mut world));
    assert_eq!(world.required.len(), 1);
}

#[test]
fn test_compile_only_malformed_atoms_is_empty() {
    let queue: Queue = [">= 2", ""].into_iter().collect();
    let mut world = Package::world();
    assert!(!queue.compile(&mut world));
}

#[test]
fn test_compile_twice_appends_twice() {
    let queue: Queue = ["a"].into_iter().collect();
    let mut world = Package::world();

    queue.compile(&mut world);
    queue.compile(&mut world);
    assert_eq!(world.required.len(), 2);
}
