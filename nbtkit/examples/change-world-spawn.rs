//! This executable takes a path to a level.dat file for a world, and spits out
//! a new level.dat file in the current directory. The data is changed so that
//! the world spawn is set to 0,0.
//!
//! Everything else in the file, including the order of entries, is written
//! back as it was read.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use nbtkit::{gzip, RootTag, Tag};

fn main() {
    let args: Vec<_> = std::env::args_os().collect();
    let file = BufReader::new(File::open(&args[1]).unwrap());

    let mut leveldat = gzip::read_maybe_gzip(file, true).unwrap().into_named();

    let data = leveldat
        .tag_mut()
        .as_compound_mut()
        .unwrap()
        .get_mut("Data")
        .unwrap()
        .as_compound_mut()
        .unwrap();

    *data.get_mut("SpawnX").unwrap() = Tag::Int(0);
    *data.get_mut("SpawnY").unwrap() = Tag::Int(100);
    *data.get_mut("SpawnZ").unwrap() = Tag::Int(0);

    let outfile = BufWriter::new(File::create("level.dat").unwrap());
    gzip::write_gzip(outfile, &RootTag::from(leveldat), true).unwrap();
}
