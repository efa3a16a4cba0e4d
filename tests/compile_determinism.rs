use bindkit::compile_expression;
use bindkit::expression::algebra::{
    and, constant, greater_than, if_else, length, not, or, path_in_model,
};
use bindkit::Expression;

fn mix64(mut z: u64) -> u64 {
    // SplitMix64 mixing function.
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn p(path: &str) -> Expression<bool> {
    path_in_model(path, None)
}

fn battery() -> Vec<Expression<bool>> {
    vec![
        and([not(p("Hidden")), p("Insertable")]),
        or([p("A"), and([p("B"), not(p("C"))])]),
        if_else(p("Editable"), p("A"), constant(false)),
        greater_than(
            length(path_in_model::<()>("deletableContexts", Some("internal"))),
            constant(0i64),
        ),
        or([
            greater_than(
                length(path_in_model::<()>("x", Some("internal"))),
                constant(0i64),
            ),
            greater_than(
                length(path_in_model::<()>("y", Some("internal"))),
                constant(0i64),
            ),
        ]),
    ]
}

#[test]
fn repeated_compilation_is_byte_identical() {
    let first: Vec<String> = battery()
        .iter()
        .map(|e| compile_expression(e).unwrap().to_string())
        .collect();
    let second: Vec<String> = battery()
        .iter()
        .map(|e| compile_expression(e).unwrap().to_string())
        .collect();
    assert_eq!(first, second);

    let mut digest = 0u64;
    for s in &first {
        digest ^= digest_u64(s.as_bytes());
    }
    let mut digest_again = 0u64;
    for s in &second {
        digest_again ^= digest_u64(s.as_bytes());
    }
    assert_eq!(digest, digest_again);
}

#[test]
fn part_ordering_is_first_seen_depth_first() {
    let e = and([or([p("B"), p("A")]), p("B"), p("C")]);
    let s = compile_expression(&e).unwrap().to_string();
    let b = s.find("{path:'B'}").unwrap();
    let a = s.find("{path:'A'}").unwrap();
    let c = s.find("{path:'C'}").unwrap();
    assert!(b < a && a < c);
}

#[test]
fn structurally_equal_trees_render_identically() {
    let left = and([not(p("H")), or([p("X"), p("Y")])]);
    let right = and([not(p("H")), or([p("X"), p("Y")])]);
    assert_eq!(
        compile_expression(&left).unwrap().to_string(),
        compile_expression(&right).unwrap().to_string()
    );
}
