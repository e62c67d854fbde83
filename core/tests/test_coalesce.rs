use coalescence::*;

fn log_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn check_provable(s: &str) -> TokenSet {
    log_init();
    let e = parse_formula(s).unwrap();
    match coalesce(&e) {
        Verdict::Provable(tokens) => {
            assert!(tokens.contains(&Place::singleton(e.clone())));
            assert_eq!(tokens.goal(), &e);
            tokens
        }
        Verdict::NotProvable(r) => panic!("`{}` should be provable, got {:?}", s, r),
    }
}

fn check_not_provable(s: &str) -> NotProvable {
    log_init();
    let e = parse_formula(s).unwrap();
    match coalesce(&e) {
        Verdict::Provable(_) => panic!("`{}` should not be provable", s),
        Verdict::NotProvable(r) => r,
    }
}

#[test]
fn test_identity() {
    let tokens = check_provable("a > a");
    assert_eq!(tokens.stats().max_dim, 2);
}

#[test]
fn test_identity_twice() {
    check_provable("(a > a) & (a > a)");
}

#[test]
fn test_identity_two_vars() {
    check_provable("(a > a) & (b > b)");
}

#[test]
fn test_excluded_middle_2() {
    check_provable("(a & b) | (a & ~b) | (~a & b) | (~a & ~b)");
}

#[test]
fn test_excluded_middle_3() {
    check_provable(
        "(a & b & c) | (a & ~b & c) | (~a & b & c) | (~a & ~b & c) \
         | (a & b & ~c) | (a & ~b & ~c) | (~a & b & ~c) | (~a & ~b & ~c)",
    );
}

#[test]
#[ignore = "slow"]
fn test_excluded_middle_4() {
    check_provable(
        "(a & b & c & d) | (a & ~b & c & d) | (~a & b & c & d) | (~a & ~b & c & d) \
         | (a & b & ~c & d) | (a & ~b & ~c & d) | (~a & b & ~c & d) | (~a & ~b & ~c & d) \
         | (a & b & c & ~d) | (a & ~b & c & ~d) | (~a & b & c & ~d) | (~a & ~b & c & ~d) \
         | (a & b & ~c & ~d) | (a & ~b & ~c & ~d) | (~a & b & ~c & ~d) | (~a & ~b & ~c & ~d)",
    );
}

#[test]
fn test_peirce() {
    check_provable("((a > b) > a) > a");
}

#[test]
fn test_linearity() {
    check_provable("(a > b) | (b > a)");
}

#[test]
fn test_iff_refl() {
    check_provable("a = a");
    check_provable("a <-> a");
}

#[test]
fn test_modus_ponens() {
    check_provable("(a & (a > b)) > b");
}

#[test]
fn test_contradiction() {
    let r = check_not_provable("a & ~a");
    assert!(matches!(r, NotProvable::Exhausted { max_dim: 2, .. }));
}

#[test]
fn test_bare_atom() {
    assert_eq!(check_not_provable("a"), NotProvable::NoComplementaryPair);
    assert_eq!(check_not_provable("a | b"), NotProvable::NoComplementaryPair);
}

#[test]
fn test_three_of_four() {
    let r = check_not_provable("(a & b) | (a & ~b) | (~a & b)");
    assert!(matches!(r, NotProvable::Exhausted { max_dim: 3, .. }));
}

#[test]
fn test_not_provable_display() {
    let r = check_not_provable("a");
    assert_eq!(r.to_string(), "no literal occurs together with its negation");
}
