use crate::{error::Result, from_bytes, read_unnamed, test::builder::Builder, to_bytes, Tag, TagKind};

/// Inputs worth keeping from fuzzing runs.

#[test]
fn partial_input_in_name() {
    let input = Builder::new().start_compound("some long name").build();
    for len in 0..input.len() {
        let v: Result<_> = from_bytes(&input[..len]);
        assert!(v.is_err());
    }
}

#[test]
fn list_of_end_in_compound() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", TagKind::End, 1)
        .kind(TagKind::End)
        .end_compound()
        .build();

    assert!(from_bytes(&input).is_err());
}

#[test]
fn huge_list_of_compounds_with_little_data() {
    let input = Builder::new()
        .start_list("", TagKind::Compound, i32::MAX)
        .end_compound()
        .build();

    let err = from_bytes(&input).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn huge_string_length_with_little_data() {
    let input = Builder::new()
        .kind(TagKind::String)
        .raw_str_len(u16::MAX as usize)
        .raw_bytes(b"short")
        .build();

    assert!(read_unnamed(input.as_slice()).unwrap_err().is_eof());
}

#[test]
fn anything_read_can_be_written() -> Result<()> {
    let input = Builder::new()
        .start_compound("\u{0}")
        .start_list("", TagKind::List, 1)
        .start_anon_list(TagKind::End, 0)
        .float("nan", f32::NAN)
        .end_compound()
        .build();

    let root = from_bytes(&input)?;
    assert_eq!(to_bytes(&root)?, input);
    assert!(matches!(
        root.tag().as_compound()?.get("nan"),
        Some(Tag::Float(f)) if f.is_nan()
    ));
    Ok(())
}

#[test]
fn replaced_utf8_can_outgrow_string_limit() {
    let bad = vec![0xffu8; 30000];
    let input = Builder::new()
        .kind(TagKind::String)
        .raw_name(&bad)
        .build();

    let tag = read_unnamed(input.as_slice()).unwrap();
    assert_eq!(tag.as_string().unwrap().len(), 90000);

    let err = crate::write_unnamed(Vec::new(), &tag).unwrap_err();
    assert_eq!(err.kind(), &crate::error::ErrorKind::StringTooLong(90000));
}
