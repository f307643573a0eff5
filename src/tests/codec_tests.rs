// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codec::{encode_record, parse_record};
use crate::error::CodecError;
use crate::proof::{MerkleStep, Position, UserProof};

const LONG_RECORD: &str = "(8,8888) 0x6266ab587ef565a55daf01ff5101d1b40b4f4334c9ece68c130fe223a1a37c96 \
(left,0x33471d10e51b83e3419eba1f096203264d1e60de57522402827a4de50dee8375) \
(right,0x03b6089f6b1adf08e6f1b5c7f2eff348e3bcc97903216a726c62f358e97c1df1) \
(left,0xfafe4ecc00e37d340d72f581fbbda4e179ad24bdc2f45713dcc2a38ebfc30439) \
0xb1231de33da17c23cebd80c104b88198e0914b0463d0e14db163605b904a7ba3";

#[test]
fn test_parse_without_steps() {
    let proof = parse_record("(8,8888) 0xabc 0xdef").unwrap();
    assert_eq!(proof.id(), 8);
    assert_eq!(proof.balance(), 8888);
    assert_eq!(proof.user_hash(), "0xabc");
    assert!(proof.path().is_empty());
    assert_eq!(proof.root(), "0xdef");
}

#[test]
fn test_parse_single_step() {
    let proof = parse_record("(8,8888) 0xabc (left,0x111) 0xdef").unwrap();
    assert_eq!(proof.path(), &[MerkleStep::new(Position::Left, "0x111")]);
    assert_eq!(proof.root(), "0xdef");
}

#[test]
fn test_non_numeric_balance_is_malformed_leaf() {
    let err = parse_record("(8,eight) 0xabc 0xdef").unwrap_err();
    assert!(matches!(err, CodecError::MalformedLeaf(_)), "{:?}", err);
}

#[test]
fn test_unknown_position_is_malformed_step() {
    let err = parse_record("(8,8888) 0xabc (up,0x111) 0xdef").unwrap_err();
    assert!(matches!(err, CodecError::MalformedStep(_)), "{:?}", err);
}

#[test]
fn test_empty_input_is_malformed_record() {
    assert!(matches!(parse_record(""), Err(CodecError::MalformedRecord(_))));
    assert!(matches!(parse_record("   \n\t"), Err(CodecError::MalformedRecord(_))));
    assert!(matches!(
        parse_record("(8,8888) 0xabc"),
        Err(CodecError::MalformedRecord(_))
    ));
}

#[test]
fn test_leaf_shape_is_strict() {
    for bad in [
        "8,8888",
        "(8,8888",
        "8,8888)",
        "(8)",
        "(8,88,88)",
        "(,8888)",
        "(8,)",
        "(+8,8888)",
        "(-8,8888)",
        "(8,18446744073709551616)",
        "((8,8888))",
    ] {
        let raw = format!("{} 0xabc 0xdef", bad);
        assert!(
            matches!(parse_record(&raw), Err(CodecError::MalformedLeaf(_))),
            "accepted leaf {:?}",
            bad
        );
    }
}

#[test]
fn test_leaf_accepts_u64_max() {
    let proof = parse_record("(18446744073709551615,0) 0xabc 0xdef").unwrap();
    assert_eq!(proof.id(), u64::MAX);
    assert_eq!(proof.balance(), 0);
}

#[test]
fn test_step_shape_is_strict() {
    for bad in [
        "(Left,0x111)",
        "(RIGHT,0x111)",
        "left,0x111",
        "(left0x111)",
        "(left,0x1,0x2)",
        "(left,)",
    ] {
        let raw = format!("(8,8888) 0xabc {} 0xdef", bad);
        assert!(
            matches!(parse_record(&raw), Err(CodecError::MalformedStep(_))),
            "accepted step {:?}",
            bad
        );
    }
}

#[test]
fn test_one_bad_step_rejects_whole_record() {
    let raw = "(8,8888) 0xabc (left,0x1) (right,0x2) (middle,0x3) (left,0x4) 0xdef";
    assert!(matches!(parse_record(raw), Err(CodecError::MalformedStep(s)) if s == "(middle,0x3)"));
}

#[test]
fn test_step_count_and_order() {
    // Every token after the leaf carries a hash; all but user hash and root are steps.
    let hash_tokens = LONG_RECORD.split_whitespace().skip(1).count();
    let proof = parse_record(LONG_RECORD).unwrap();

    assert_eq!(proof.path().len(), hash_tokens - 2);
    let positions: Vec<Position> = proof.path().iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![Position::Left, Position::Right, Position::Left]);
    assert!(proof.path()[0].hash.starts_with("0x3347"));
    assert!(proof.path()[2].hash.starts_with("0xfafe"));
}

#[test]
fn test_hashes_are_kept_verbatim() {
    let proof = parse_record("(1,2) 0xABcd (right,0XFF) 0xDeAd").unwrap();
    assert_eq!(proof.user_hash(), "0xABcd");
    assert_eq!(proof.path()[0].hash, "0XFF");
    assert_eq!(proof.root(), "0xDeAd");
}

#[test]
fn test_tolerates_irregular_whitespace() {
    let proof = parse_record("  (1,2)\t0xaa   (left,0xbb)\n0xcc ").unwrap();
    assert_eq!(proof.id(), 1);
    assert_eq!(proof.path().len(), 1);
    assert_eq!(proof.root(), "0xcc");
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse_record(LONG_RECORD).unwrap();
    for _ in 0..8 {
        assert_eq!(parse_record(LONG_RECORD).unwrap(), first);
    }
}

#[test]
fn test_encode_is_inverse_of_parse() {
    let proof = UserProof::new(
        42,
        1_000_000,
        "0xaa",
        vec![
            MerkleStep::new(Position::Right, "0xbb"),
            MerkleStep::new(Position::Left, "0xcc"),
        ],
        "0xdd",
    );
    let raw = encode_record(&proof);
    assert_eq!(raw, "(42,1000000) 0xaa (right,0xbb) (left,0xcc) 0xdd");
    assert_eq!(parse_record(&raw).unwrap(), proof);

    assert_eq!(encode_record(&parse_record(LONG_RECORD).unwrap()), LONG_RECORD);
}
