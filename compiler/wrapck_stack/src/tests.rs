use super::ensure_sufficient_stack;

fn depth(n: u64) -> u64 {
    ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
}

#[test]
fn returns_the_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| "done"), "done");
}

#[test]
fn deep_recursion_does_not_overflow() {
    assert_eq!(depth(200_000), 200_000);
}

#[test]
fn grows_inside_small_threads() {
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| depth(50_000))
        .unwrap();
    assert_eq!(handle.join().unwrap(), 50_000);
}
