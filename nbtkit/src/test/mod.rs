use std::convert::TryFrom;

use crate::TagKind;

pub mod builder;
mod fuzz;
mod gzip;

macro_rules! check_kinds {
    {$($kind:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(TagKind::$kind), $val);
            assert_eq!(TagKind::try_from($val as u8), Ok(TagKind::$kind));
        )*
    };
}

#[test]
fn exhaustive_kind_check() {
    check_kinds! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }

    for value in 13..=u8::MAX {
        assert!(TagKind::try_from(value).is_err())
    }
}

#[test]
fn kind_names() {
    assert_eq!(TagKind::End.name(), "TAG_End");
    assert_eq!(TagKind::ByteArray.to_string(), "TAG_Byte_Array");
    assert_eq!(TagKind::LongArray.to_string(), "TAG_Long_Array");
}
