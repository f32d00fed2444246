#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtkit::error::ErrorKind;
use nbtkit::{ReadOpts, Reader};

fuzz_target!(|data: &[u8]| {
    let opts = ReadOpts::new().max_seq_len(100);
    for named in [true, false] {
        if let Ok(root) = Reader::with_opts(data, opts).read_root(named) {
            let mut out = Vec::new();
            // Replacement characters for invalid UTF-8 can push a string
            // past the 16-bit length limit.
            if let Err(e) = nbtkit::write(&mut out, &root, named) {
                assert!(matches!(e.kind(), ErrorKind::StringTooLong(_)), "{}", e);
            }
        }
    }
});
