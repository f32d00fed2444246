use std::io::{BufReader, Write};

use flate2::{write::GzEncoder, Compression};

use super::builder::Builder;
use crate::error::{ErrorKind, Result};
use crate::gzip::{is_gzip, read_gzip, read_maybe_gzip, read_maybe_gzip_with_opts, write_gzip};
use crate::{Compound, NamedTag, ReadOpts, RootTag, TagKind};

fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn sample() -> Vec<u8> {
    Builder::new()
        .start_compound("Data")
        .int("version", 19133)
        .string("LevelName", "world")
        .end_compound()
        .build()
}

#[test]
fn detects_magic() {
    assert!(is_gzip(&compress(b"anything")));
    assert!(!is_gzip(&sample()));
    assert!(!is_gzip(&[]));
    assert!(!is_gzip(&[0x1f]));
}

#[test]
fn reads_plain_and_compressed_alike() -> Result<()> {
    let plain = sample();
    let compressed = compress(&plain);

    let from_plain = read_maybe_gzip(plain.as_slice(), true)?;
    let from_compressed = read_maybe_gzip(compressed.as_slice(), true)?;

    assert_eq!(from_plain, from_compressed);
    assert_eq!(from_plain.name(), Some("Data"));
    assert_eq!(read_gzip(compressed.as_slice(), true)?, from_plain);
    Ok(())
}

#[test]
fn detection_works_through_small_buffers() -> Result<()> {
    let compressed = compress(&sample());
    let reader = BufReader::with_capacity(1, compressed.as_slice());
    let root = read_maybe_gzip(reader, true)?;
    assert_eq!(root.name(), Some("Data"));
    Ok(())
}

#[test]
fn options_apply_inside_compression() {
    let payload = Builder::new()
        .start_compound("")
        .start_compound("")
        .end_compound()
        .end_compound()
        .build();
    let compressed = compress(&payload);

    let opts = ReadOpts::new().max_depth(1);
    let err = read_maybe_gzip_with_opts(compressed.as_slice(), true, opts).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MaxDepthExceeded);
}

#[test]
fn truncated_stream_is_error() {
    let compressed = compress(&sample());
    let truncated = &compressed[..compressed.len() / 2];
    assert!(read_maybe_gzip(truncated, true).is_err());
}

#[test]
fn write_then_read() -> Result<()> {
    let mut compound = Compound::new();
    compound.push("x", 1i8);
    let root = RootTag::from(NamedTag::new("root", compound));

    let bytes = write_gzip(Vec::new(), &root, true)?;
    assert!(is_gzip(&bytes));
    assert_eq!(read_maybe_gzip(bytes.as_slice(), true)?, root);

    let unnamed = RootTag::from(root.clone().into_tag());
    let bytes = write_gzip(Vec::new(), &unnamed, false)?;
    assert_eq!(read_gzip(bytes.as_slice(), false)?, unnamed);
    Ok(())
}

#[test]
fn empty_input_is_eof() {
    let err = read_maybe_gzip(&[0u8; 0][..], true).unwrap_err();
    assert!(err.is_eof());

    let err = read_maybe_gzip(&[TagKind::Compound as u8][..], true).unwrap_err();
    assert!(err.is_eof());
}
