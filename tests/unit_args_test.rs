use bytes::Bytes;
use typedcmds::core::commands::ArgBuffer;

#[test]
fn test_push_preserves_order() {
    let mut args = ArgBuffer::new();
    args.push(Bytes::from_static(b"SET"));
    args.push(Bytes::from_static(b"k"));
    args.push_all([Bytes::from_static(b"v"), Bytes::from_static(b"NX")]);
    assert_eq!(args.as_slice(), ["SET", "k", "v", "NX"]);
    assert_eq!(args.len(), 4);
    assert!(!args.is_empty());
}

#[test]
fn test_freeze_and_reset() {
    let mut args = ArgBuffer::with_capacity(16);
    args.push(Bytes::from_static(b"PING"));
    args.freeze();
    assert!(args.is_frozen());
    assert_eq!(args.as_slice(), ["PING"]);

    args.reset();
    assert!(!args.is_frozen());
    assert!(args.is_empty());
    assert!(args.capacity() >= 16);
}

#[test]
#[should_panic(expected = "frozen")]
fn test_push_after_freeze_panics() {
    let mut args = ArgBuffer::new();
    args.push(Bytes::from_static(b"PING"));
    args.freeze();
    args.push(Bytes::from_static(b"again"));
}

#[test]
#[should_panic(expected = "frozen")]
fn test_push_all_after_freeze_panics() {
    let mut args = ArgBuffer::new();
    args.freeze();
    args.push_all([Bytes::from_static(b"x")]);
}
