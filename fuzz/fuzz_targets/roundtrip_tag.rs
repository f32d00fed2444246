#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtkit::error::ErrorKind;
use nbtkit::NamedTag;

fuzz_target!(|root: NamedTag| {
    // Long strings are a legitimate write failure.
    let bytes = match nbtkit::to_bytes(&root) {
        Ok(bytes) => bytes,
        Err(_) => return,
    };

    let back = match nbtkit::from_bytes(&bytes) {
        Ok(back) => back,
        Err(e) if *e.kind() == ErrorKind::MaxDepthExceeded => return,
        Err(e) => panic!("failed to read back written nbt: {}", e),
    };

    // Compare bytes rather than trees, NaN is never equal to itself.
    assert_eq!(nbtkit::to_bytes(&back).unwrap(), bytes);
});
